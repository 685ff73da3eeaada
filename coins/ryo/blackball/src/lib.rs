#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod transaction;
pub use transaction::*;

mod source;
pub use source::*;

mod ringdb;
pub use ringdb::*;

mod blackball;
pub use blackball::*;

#[cfg(test)]
mod tests;
