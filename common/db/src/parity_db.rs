use std::{sync::Arc, path::Path};

pub use ::parity_db::{Options, Db as ParityDb};

use crate::*;

pub struct Transaction<'a>(&'a Arc<ParityDb>, Vec<(u8, Vec<u8>, Option<Vec<u8>>)>);

impl Get for Transaction<'_> {
  fn get(&self, key: impl AsRef<[u8]>) -> Option<Vec<u8>> {
    // Reads observe this transaction's own writes, as MemDb's do
    if let Some((_, _, value)) = self.1.iter().find(|(_, pending, _)| pending == key.as_ref()) {
      return value.clone();
    }
    self.0.get(key)
  }
}
impl DbTxn for Transaction<'_> {
  fn put(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) {
    self.1.retain(|(_, pending, _)| pending != key.as_ref());
    self.1.push((0, key.as_ref().to_vec(), Some(value.as_ref().to_vec())))
  }
  fn del(&mut self, key: impl AsRef<[u8]>) {
    self.1.retain(|(_, pending, _)| pending != key.as_ref());
    self.1.push((0, key.as_ref().to_vec(), None))
  }
  fn commit(self) {
    self.0.commit(self.1).expect("couldn't commit to parity-db")
  }
}

impl Get for Arc<ParityDb> {
  fn get(&self, key: impl AsRef<[u8]>) -> Option<Vec<u8>> {
    ParityDb::get(self, 0, key.as_ref()).expect("couldn't read from parity-db")
  }
}
impl Db for Arc<ParityDb> {
  type Transaction<'a> = Transaction<'a>;
  fn keys_with_prefix(&self, prefix: impl AsRef<[u8]>) -> Vec<Vec<u8>> {
    let prefix = prefix.as_ref();
    let mut iter = self.iter(0).expect("couldn't iterate parity-db");
    iter.seek(prefix).expect("couldn't seek within parity-db");
    let mut keys = vec![];
    while let Some((key, _)) = iter.next().expect("couldn't iterate parity-db") {
      if !key.starts_with(prefix) {
        break;
      }
      keys.push(key);
    }
    keys
  }
  fn txn(&mut self) -> Self::Transaction<'_> {
    Transaction(self, vec![])
  }
}

/// Open, or create, a parity-db database at the specified path.
///
/// The single column is B-tree indexed so its keys may be iterated.
pub fn new_parity_db(path: &str) -> Arc<ParityDb> {
  let mut options = Options::with_columns(Path::new(path), 1);
  options.columns[0].btree_index = true;
  Arc::new(ParityDb::open_or_create(&options).expect("couldn't open parity-db"))
}
