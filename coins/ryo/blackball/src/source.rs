use std::{
  io::{self, Read, BufRead, BufReader},
  path::{Path, PathBuf},
  fs::File,
  collections::HashMap,
};

use ryo_io::{read_varint, write_varint};
use ryo_primitives::{keccak256, PublicKey};

use crate::TransactionPrefix;

/// An error from a source of transactions.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
  /// The source couldn't be read.
  #[error("couldn't read the chain: {0}")]
  Io(#[from] io::Error),
  /// A transaction within the source was malformed.
  #[error("transaction {index} was malformed: {error}")]
  MalformedTransaction {
    /// The position of the transaction within the source.
    index: usize,
    /// The reason it was malformed.
    #[source]
    error: io::Error,
  },
  /// The source had no transactions, and accordingly no genesis.
  #[error("the chain had no transactions")]
  EmptyChain,
}

/// A chain to read transactions and outputs from.
pub trait TransactionSource {
  /// Call `f` with every transaction, in the order they're stored.
  ///
  /// Iteration stops early if `f` returns false. Returns whether every transaction was visited.
  fn for_each_transaction(
    &self,
    f: &mut dyn FnMut(&TransactionPrefix) -> bool,
  ) -> Result<bool, SourceError>;

  /// The key of the output with this amount and global index, if it exists.
  fn output_key(&self, amount: u64, index: u64) -> Option<PublicKey>;

  /// The hash identifying this chain's genesis.
  fn genesis_hash(&self) -> [u8; 32];
}

impl<S: ?Sized + TransactionSource> TransactionSource for Box<S> {
  fn for_each_transaction(
    &self,
    f: &mut dyn FnMut(&TransactionPrefix) -> bool,
  ) -> Result<bool, SourceError> {
    (**self).for_each_transaction(f)
  }
  fn output_key(&self, amount: u64, index: u64) -> Option<PublicKey> {
    (**self).output_key(amount, index)
  }
  fn genesis_hash(&self) -> [u8; 32] {
    (**self).genesis_hash()
  }
}

// The outputs of a chain, by amount, in order of their global index
#[derive(Clone, Default, Debug)]
struct OutputIndex(HashMap<u64, Vec<PublicKey>>);

impl OutputIndex {
  fn index(&mut self, tx: &TransactionPrefix) {
    for output in &tx.outputs {
      self.0.entry(tx.output_index_amount(output)).or_default().push(output.key);
    }
  }

  fn get(&self, amount: u64, index: u64) -> Option<PublicKey> {
    self.0.get(&amount)?.get(usize::try_from(index).ok()?).copied()
  }
}

/// An in-memory chain of transactions.
#[derive(Clone, Debug)]
pub struct MemChain {
  genesis_hash: [u8; 32],
  transactions: Vec<TransactionPrefix>,
  outputs: OutputIndex,
}

impl MemChain {
  /// Create a chain from its transactions.
  ///
  /// The genesis hash is the hash of the first transaction.
  pub fn new(transactions: Vec<TransactionPrefix>) -> Result<MemChain, SourceError> {
    let genesis_hash = transactions.first().ok_or(SourceError::EmptyChain)?.hash();
    let mut outputs = OutputIndex::default();
    for tx in &transactions {
      outputs.index(tx);
    }
    Ok(MemChain { genesis_hash, transactions, outputs })
  }

  /// The transactions of this chain.
  pub fn transactions(&self) -> &[TransactionPrefix] {
    &self.transactions
  }
}

impl TransactionSource for MemChain {
  fn for_each_transaction(
    &self,
    f: &mut dyn FnMut(&TransactionPrefix) -> bool,
  ) -> Result<bool, SourceError> {
    for tx in &self.transactions {
      if !f(tx) {
        return Ok(false);
      }
    }
    Ok(true)
  }
  fn output_key(&self, amount: u64, index: u64) -> Option<PublicKey> {
    self.outputs.get(amount, index)
  }
  fn genesis_hash(&self) -> [u8; 32] {
    self.genesis_hash
  }
}

// Call `f` with every blob in the file, and the blob's position
fn for_each_blob(
  path: &Path,
  mut f: impl FnMut(usize, &[u8]) -> Result<bool, SourceError>,
) -> Result<bool, SourceError> {
  let mut file = BufReader::new(File::open(path)?);
  let mut blob = vec![];
  for index in 0 .. {
    if file.fill_buf()?.is_empty() {
      break;
    }
    let len: u64 = read_varint(&mut file)?;
    blob.clear();
    (&mut file).take(len).read_to_end(&mut blob)?;
    if u64::try_from(blob.len()).unwrap() != len {
      Err(io::Error::new(io::ErrorKind::UnexpectedEof, "chain file ended within a transaction"))?;
    }
    if !f(index, &blob)? {
      return Ok(false);
    }
  }
  Ok(true)
}

fn parse(index: usize, mut blob: &[u8]) -> Result<TransactionPrefix, SourceError> {
  let tx = TransactionPrefix::read(&mut blob)
    .map_err(|error| SourceError::MalformedTransaction { index, error })?;
  if !blob.is_empty() {
    Err(SourceError::MalformedTransaction {
      index,
      error: io::Error::other("trailing bytes after transaction"),
    })?;
  }
  Ok(tx)
}

/// A chain stored as a file of serialized transaction prefixes, each prefixed by its length as a
/// VarInt.
///
/// Opening the file reads it once to index its outputs. Transactions are read from the file again
/// each time they're iterated over.
#[derive(Clone, Debug)]
pub struct ChainFile {
  path: PathBuf,
  genesis_hash: [u8; 32],
  outputs: OutputIndex,
}

impl ChainFile {
  /// Open a chain file, indexing its outputs.
  ///
  /// The genesis hash is the Keccak-256 hash of the first blob.
  pub fn open(path: impl AsRef<Path>) -> Result<ChainFile, SourceError> {
    let path = path.as_ref().to_path_buf();
    let mut genesis_hash = None;
    let mut outputs = OutputIndex::default();
    for_each_blob(&path, |index, blob| {
      genesis_hash.get_or_insert_with(|| keccak256(blob));
      outputs.index(&parse(index, blob)?);
      Ok(true)
    })?;
    let genesis_hash = genesis_hash.ok_or(SourceError::EmptyChain)?;
    log::debug!("opened chain file {} with genesis {}", path.display(), hex::encode(genesis_hash));
    Ok(ChainFile { path, genesis_hash, outputs })
  }

  /// The path of this chain file.
  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl TransactionSource for ChainFile {
  fn for_each_transaction(
    &self,
    f: &mut dyn FnMut(&TransactionPrefix) -> bool,
  ) -> Result<bool, SourceError> {
    for_each_blob(&self.path, |index, blob| Ok(f(&parse(index, blob)?)))
  }
  fn output_key(&self, amount: u64, index: u64) -> Option<PublicKey> {
    self.outputs.get(amount, index)
  }
  fn genesis_hash(&self) -> [u8; 32] {
    self.genesis_hash
  }
}

/// Write transactions in the format read by `ChainFile`.
pub fn write_chain_file<W: io::Write>(transactions: &[TransactionPrefix], w: &mut W) -> io::Result<()> {
  for tx in transactions {
    let blob = tx.serialize();
    write_varint(&blob.len(), w)?;
    w.write_all(&blob)?;
  }
  Ok(())
}
