use ryo_db::{DbTxn, Db};
use ryo_primitives::PublicKey;

/// A store of blackballed output keys.
///
/// Keys are namespaced by the genesis hash of the chain they were blackballed on, so one database
/// may be shared across networks.
#[derive(Clone, Debug)]
pub struct RingDb<D: Db> {
  db: D,
  genesis: String,
}

impl<D: Db> RingDb<D> {
  /// Open the blackball store for the chain with this genesis hash.
  pub fn new(db: D, genesis_hash: [u8; 32]) -> RingDb<D> {
    RingDb { db, genesis: hex::encode(genesis_hash) }
  }

  fn prefix(&self) -> Vec<u8> {
    D::key(b"RingDb", b"blackball", self.genesis.as_bytes())
  }

  fn key(&self, output: &PublicKey) -> Vec<u8> {
    [self.prefix().as_slice(), output.as_bytes()].concat()
  }

  /// Blackball an output.
  pub fn blackball(&mut self, output: &PublicKey) {
    self.blackball_all(core::slice::from_ref(output));
  }

  /// Blackball a list of outputs, atomically.
  pub fn blackball_all(&mut self, outputs: &[PublicKey]) {
    let keys = outputs.iter().map(|output| self.key(output)).collect::<Vec<_>>();
    let mut txn = self.db.txn();
    for key in keys {
      txn.put(key, [1]);
    }
    txn.commit();
  }

  /// Remove an output from the blackball list.
  pub fn unblackball(&mut self, output: &PublicKey) {
    let key = self.key(output);
    let mut txn = self.db.txn();
    txn.del(key);
    txn.commit();
  }

  /// If an output is blackballed.
  pub fn blackballed(&self, output: &PublicKey) -> bool {
    self.db.get(self.key(output)).is_some()
  }

  /// Every blackballed output, ordered by key.
  pub fn blackballs(&self) -> Vec<PublicKey> {
    let prefix_len = self.prefix().len();
    self
      .db
      .keys_with_prefix(self.prefix())
      .into_iter()
      .filter_map(|key| <[u8; 32]>::try_from(&key[prefix_len ..]).ok())
      .map(PublicKey::from_bytes)
      .collect()
  }

  /// Remove every output from the blackball list.
  pub fn clear_blackballs(&mut self) {
    let keys = self.db.keys_with_prefix(self.prefix());
    let mut txn = self.db.txn();
    for key in keys {
      txn.del(key);
    }
    txn.commit();
  }
}
