use std::collections::{HashSet, HashMap};

use ryo_db::Db;
use ryo_primitives::{PublicKey, KeyImage, relative_to_absolute, absolute_to_relative};

use crate::{SourceError, TransactionSource, Input, RingDb};

/// An error when inferring spent outputs.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum BlackballError {
  /// No sources were provided.
  #[error("no sources were provided")]
  NoSources,
}

/// An output, identified by its amount and its global index among outputs of that amount.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct OutputDescriptor {
  /// The amount of the output, `0` for RingCT outputs.
  pub amount: u64,
  /// The global index of the output among outputs of its amount.
  pub index: u64,
}

/// Why an output was deduced to be spent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpentReason {
  /// The output was the only member of a ring.
  SingleMemberRing,
  /// The output was the only member common to two rings with the same key image.
  RingIntersection,
  /// Every other member of a ring containing this output was spent.
  RingExclusion,
}

/// An output deduced to be spent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SpentOutput {
  /// The output.
  pub output: OutputDescriptor,
  /// The output's key, if the source could resolve it.
  pub key: Option<PublicKey>,
  /// Why this output was deduced to be spent.
  pub reason: SpentReason,
}

/// The result of inferring spent outputs.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct BlackballReport {
  /// The outputs deduced to be spent, in the order they were deduced.
  pub spent: Vec<SpentOutput>,
  /// The amount of key images whose rings were disjoint across sources.
  pub disjoint_rings: usize,
  /// The positions of the sources which errored before every transaction was scanned.
  ///
  /// The transactions before the error were still scanned.
  pub failed_sources: Vec<usize>,
  /// The amount of passes made propagating spent outputs through rings.
  pub passes: usize,
}

/// The state of the inference across sources.
///
/// Sources are scanned in order, the first source being the chain whose outputs are reverse
/// indexed. Rings seen under the same key image in later sources narrow the rings from prior
/// sources. Once every source is scanned, `finish` propagates the spent outputs found through
/// every ring they're members of.
pub struct Blackballer<'a, D: Db> {
  ringdb: &'a mut RingDb<D>,
  rct_only: bool,
  sources: usize,

  relative_rings: HashMap<KeyImage, Vec<u64>>,
  outputs: HashMap<OutputDescriptor, HashSet<KeyImage>>,
  spent: HashSet<OutputDescriptor>,
  newly_spent: HashSet<OutputDescriptor>,

  report: BlackballReport,
}

impl<'a, D: Db> Blackballer<'a, D> {
  /// Create a new inference, writing deductions to the specified store.
  ///
  /// If `rct_only` is set, only inputs spending RingCT outputs are considered.
  pub fn new(ringdb: &'a mut RingDb<D>, rct_only: bool) -> Self {
    Blackballer {
      ringdb,
      rct_only,
      sources: 0,
      relative_rings: HashMap::new(),
      outputs: HashMap::new(),
      spent: HashSet::new(),
      newly_spent: HashSet::new(),
      report: BlackballReport::default(),
    }
  }

  fn mark_spent<S: TransactionSource>(
    &mut self,
    source: &S,
    output: OutputDescriptor,
    reason: SpentReason,
  ) {
    let key = source.output_key(output.amount, output.index);
    match key {
      Some(key) => {
        log::info!("blackballing output {} ({reason:?})", hex::encode(key.as_bytes()));
        self.ringdb.blackball(&key);
      }
      None => log::warn!(
        "couldn't find the key for output {} of amount {}, which was spent ({reason:?})",
        output.index,
        output.amount
      ),
    }
    self.newly_spent.insert(output);
    if self.spent.insert(output) {
      self.report.spent.push(SpentOutput { output, key, reason });
    }
  }

  fn scan_input<S: TransactionSource>(
    &mut self,
    source: &S,
    amount: u64,
    key_offsets: &[u64],
    key_image: KeyImage,
  ) {
    let absolute = relative_to_absolute(key_offsets);
    if self.sources == 0 {
      for index in &absolute {
        self
          .outputs
          .entry(OutputDescriptor { amount, index: *index })
          .or_default()
          .insert(key_image);
      }
    }

    let mut new_ring = key_offsets.to_vec();
    if absolute.len() == 1 {
      self.mark_spent(
        source,
        OutputDescriptor { amount, index: absolute[0] },
        SpentReason::SingleMemberRing,
      );
    } else if let Some(common) = self
      .relative_rings
      .get(&key_image)
      .filter(|prior| prior.as_slice() != key_offsets)
      .map(|prior| {
        relative_to_absolute(prior)
          .into_iter()
          .filter(|index| absolute.contains(index))
          .collect::<Vec<_>>()
      })
    {
      log::debug!("key image {key_image:?} was already seen with a distinct ring");
      match common.len() {
        0 => {
          log::warn!("the rings for key image {key_image:?} are disjoint");
          self.report.disjoint_rings += 1;
        }
        1 => self.mark_spent(
          source,
          OutputDescriptor { amount, index: common[0] },
          SpentReason::RingIntersection,
        ),
        // Narrow the ring to the intersection
        _ => new_ring = absolute_to_relative(&common),
      }
    }
    self.relative_rings.insert(key_image, new_ring);
  }

  /// Scan every transaction of a source.
  ///
  /// The first source scanned is the chain whose outputs are reverse indexed for `finish`.
  ///
  /// If the source errors, the transactions prior remain scanned and the source is recorded as
  /// failed within the report. The inference may still be continued and finished.
  pub fn scan<S: TransactionSource>(&mut self, source: &S) -> Result<(), SourceError> {
    let scanned = source.for_each_transaction(&mut |tx| {
      for input in &tx.inputs {
        let Input::ToKey { amount, key_offsets, key_image } = input else { continue };
        if self.rct_only && (*amount != 0) {
          continue;
        }
        self.scan_input(source, *amount, key_offsets, *key_image);
      }
      true
    });
    if scanned.is_err() {
      self.report.failed_sources.push(self.sources);
    }
    self.sources += 1;
    scanned.map(|_| ())
  }

  /// Propagate the spent outputs found through the rings of the first source, until no more
  /// outputs can be deduced as spent.
  ///
  /// Output keys are resolved via the first source.
  pub fn finish<S: TransactionSource>(mut self, primary: &S) -> BlackballReport {
    while !self.newly_spent.is_empty() {
      log::info!("secondary pass due to {} newly found spent outputs", self.newly_spent.len());
      let work_spent = core::mem::take(&mut self.newly_spent);
      self.report.passes += 1;

      for output in work_spent {
        let Some(key_images) = self.outputs.get(&output) else { continue };
        let mut deduced = vec![];
        for key_image in key_images {
          let Some(ring) = self.relative_rings.get(key_image) else { continue };
          let absolute = relative_to_absolute(ring);

          let mut unknown = absolute.iter().filter(|index| {
            !self.spent.contains(&OutputDescriptor { amount: output.amount, index: **index })
          });
          if let (Some(last_unknown), None) = (unknown.next(), unknown.next()) {
            deduced.push(OutputDescriptor { amount: output.amount, index: *last_unknown });
          }
        }
        for deduced in deduced {
          self.mark_spent(primary, deduced, SpentReason::RingExclusion);
        }
      }
    }
    self.report
  }
}

/// Infer which outputs are provably spent, given a chain and any chains forked from it.
///
/// Deductions are blackballed within `db`, namespaced by the genesis hash of the first source. A
/// source which fails is only scanned up to its failure, and the deductions made from every other
/// source still stand.
pub fn blackball<S: TransactionSource, D: Db>(
  db: D,
  sources: &[S],
  rct_only: bool,
) -> Result<BlackballReport, BlackballError> {
  let primary = sources.first().ok_or(BlackballError::NoSources)?;
  let mut ringdb = RingDb::new(db, primary.genesis_hash());
  let mut blackballer = Blackballer::new(&mut ringdb, rct_only);
  for (index, source) in sources.iter().enumerate() {
    log::info!("scanning source {index} for blackballable outputs");
    if let Err(e) = blackballer.scan(source) {
      log::warn!("stopped scanning source {index} early: {e}");
    }
  }
  Ok(blackballer.finish(primary))
}
