use std::io::{self, Read, Write};

use ryo_io::*;
use ryo_primitives::{keccak256, PublicKey, KeyImage};

/// An input of a transaction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Input {
  /// An input of a miner transaction, creating new coins at this height.
  Gen(u64),
  /// An input spending an output on-chain.
  ToKey {
    /// The amount of the output spent, `0` for RingCT outputs.
    amount: u64,
    /// The ring, as the offset of each member's global index from the prior member's.
    key_offsets: Vec<u64>,
    /// The key image of the output spent.
    key_image: KeyImage,
  },
}

impl Input {
  /// Write the Input.
  pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
    match self {
      Input::Gen(height) => {
        w.write_all(&[255])?;
        write_varint(height, w)
      }

      Input::ToKey { amount, key_offsets, key_image } => {
        w.write_all(&[2])?;
        write_varint(amount, w)?;
        write_vec(write_varint, key_offsets, w)?;
        w.write_all(key_image.as_bytes())
      }
    }
  }

  /// Read an Input.
  ///
  /// The key image is not checked to be a valid point, as its only use here is as an identifier.
  pub fn read<R: Read>(r: &mut R) -> io::Result<Input> {
    Ok(match read_byte(r)? {
      255 => Input::Gen(read_varint(r)?),
      2 => Input::ToKey {
        amount: read_varint(r)?,
        key_offsets: read_vec(read_varint, r)?,
        key_image: KeyImage::from_bytes(read_bytes(r)?),
      },
      _ => Err(io::Error::other("unknown input type"))?,
    })
  }
}

/// An output of a transaction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Output {
  /// The amount of this output, `0` for RingCT outputs.
  pub amount: u64,
  /// The one-time key which can spend this output.
  pub key: PublicKey,
}

impl Output {
  /// Write the Output.
  pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
    write_varint(&self.amount, w)?;
    w.write_all(&[2])?;
    w.write_all(self.key.as_bytes())
  }

  /// Read an Output.
  pub fn read<R: Read>(r: &mut R) -> io::Result<Output> {
    let amount = read_varint(r)?;
    if read_byte(r)? != 2 {
      Err(io::Error::other("unknown output type"))?;
    }
    Ok(Output { amount, key: PublicKey::from_bytes(read_bytes(r)?) })
  }
}

/// The prefix of a transaction, everything other than its signatures and proofs.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TransactionPrefix {
  /// The transaction version. Version 2 transactions are RingCT.
  pub version: u64,
  /// The height, or time, this transaction's outputs are locked until.
  pub unlock_time: u64,
  /// The inputs of this transaction.
  pub inputs: Vec<Input>,
  /// The outputs of this transaction.
  pub outputs: Vec<Output>,
  /// Arbitrary additional data.
  pub extra: Vec<u8>,
}

impl TransactionPrefix {
  /// Write the TransactionPrefix.
  pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
    write_varint(&self.version, w)?;
    write_varint(&self.unlock_time, w)?;
    write_vec(Input::write, &self.inputs, w)?;
    write_vec(Output::write, &self.outputs, w)?;
    write_vec(write_byte, &self.extra, w)
  }

  /// Serialize the TransactionPrefix to a `Vec<u8>`.
  pub fn serialize(&self) -> Vec<u8> {
    let mut res = vec![];
    self.write(&mut res).unwrap();
    res
  }

  /// Read a TransactionPrefix.
  pub fn read<R: Read>(r: &mut R) -> io::Result<TransactionPrefix> {
    let version = read_varint(r)?;
    if !(1 ..= 2).contains(&version) {
      Err(io::Error::other("unsupported transaction version"))?;
    }
    Ok(TransactionPrefix {
      version,
      unlock_time: read_varint(r)?,
      inputs: read_vec(Input::read, r)?,
      outputs: read_vec(Output::read, r)?,
      extra: read_vec(read_byte, r)?,
    })
  }

  /// The hash of this TransactionPrefix, as signed by its inputs.
  pub fn hash(&self) -> [u8; 32] {
    keccak256(self.serialize())
  }

  /// The amount this transaction's outputs are indexed under.
  ///
  /// RingCT outputs, including those of RingCT miner transactions, are all indexed under amount
  /// `0`.
  pub fn output_index_amount(&self, output: &Output) -> u64 {
    if self.version >= 2 {
      0
    } else {
      output.amount
    }
  }
}
