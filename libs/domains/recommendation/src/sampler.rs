use rand::seq::index;
use rand::Rng;

use crate::models::EmbeddingRecord;

/// Uniform sampling of seed embeddings, without replacement.
///
/// When fewer records than `sample_size` are available, all of them are
/// returned. The randomness source is injected so callers can pin a seed.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    sample_size: usize,
}

impl Sampler {
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    pub fn sample<R: Rng + ?Sized>(
        &self,
        records: Vec<EmbeddingRecord>,
        rng: &mut R,
    ) -> Vec<EmbeddingRecord> {
        if records.len() <= self.sample_size {
            return records;
        }

        let picked = index::sample(rng, records.len(), self.sample_size);
        let mut slots: Vec<Option<EmbeddingRecord>> = records.into_iter().map(Some).collect();
        picked
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect()
    }
}
