#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]

mod mem;
pub use mem::*;

#[cfg(feature = "parity-db")]
mod parity_db;
#[cfg(feature = "parity-db")]
pub use parity_db::{ParityDb, new_parity_db};


/// An object implementing get.
pub trait Get {
  /// Get the value for a key, if one is present.
  fn get(&self, key: impl AsRef<[u8]>) -> Option<Vec<u8>>;
}

/// An atomic database operation.
#[must_use]
pub trait DbTxn: Send + Get {
  /// Set the value for a key.
  fn put(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>);
  /// Delete a key.
  fn del(&mut self, key: impl AsRef<[u8]>);
  /// Commit every write made by this transaction.
  fn commit(self);
}

/// A database supporting atomic operations.
pub trait Db: 'static + Send + Sync + Clone + Get {
  /// The transaction type for this database.
  type Transaction<'a>: DbTxn;

  /// Build a key namespaced by a database name and an item name.
  fn key(db_dst: &'static [u8], item_dst: &'static [u8], key: impl AsRef<[u8]>) -> Vec<u8> {
    let db_len = u8::try_from(db_dst.len()).unwrap();
    let dst_len = u8::try_from(item_dst.len()).unwrap();
    [[db_len].as_ref(), db_dst, [dst_len].as_ref(), item_dst, key.as_ref()].concat()
  }

  /// Every committed key starting with this prefix, in lexicographic order.
  fn keys_with_prefix(&self, prefix: impl AsRef<[u8]>) -> Vec<Vec<u8>>;

  /// Start a new transaction.
  fn txn(&mut self) -> Self::Transaction<'_>;
}
