mod signatures;
mod vectors;
