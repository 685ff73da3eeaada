use ryo_primitives::{PublicKey, KeyImage, absolute_to_relative};

use crate::{Input, Output, TransactionPrefix, MemChain};


// The amount of outputs created by `genesis`
const OUTPUTS: u8 = 16;

pub(crate) fn output_key(amount: u64, index: u8) -> PublicKey {
  let mut key = [index; 32];
  key[0] = u8::try_from(amount).unwrap();
  PublicKey::from_bytes(key)
}

// A RingCT miner transaction creating OUTPUTS outputs
pub(crate) fn genesis() -> TransactionPrefix {
  TransactionPrefix {
    version: 2,
    unlock_time: 60,
    inputs: vec![Input::Gen(0)],
    outputs: (0 .. OUTPUTS).map(|i| Output { amount: 0, key: output_key(0, i) }).collect(),
    extra: vec![],
  }
}

// A transaction spending the outputs of the specified amount with these rings
pub(crate) fn spend(amount: u64, rings: &[(u8, &[u64])]) -> TransactionPrefix {
  TransactionPrefix {
    version: if amount == 0 { 2 } else { 1 },
    unlock_time: 0,
    inputs: rings
      .iter()
      .map(|(key_image, ring)| Input::ToKey {
        amount,
        key_offsets: absolute_to_relative(ring),
        key_image: KeyImage::from_bytes([*key_image; 32]),
      })
      .collect(),
    outputs: vec![],
    extra: vec![],
  }
}

pub(crate) fn chain(transactions: &[TransactionPrefix]) -> MemChain {
  MemChain::new([vec![genesis()], transactions.to_vec()].concat()).unwrap()
}
