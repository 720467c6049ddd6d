use std::hash::{Hash, Hasher};

use twox_hash::XxHash64;

use lexcheck_core::traits::Embedder;
use lexcheck_core::Result;

/// Deterministic bag-of-words hashing embedder for offline runs and tests.
///
/// Vectors are L2-normalized; the empty text maps to the zero vector.
pub struct FakeEmbedder {
    dim: usize,
    id: String,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self {
        let dim = dim.max(1);
        Self { dim, id: format!("fake:d{dim}") }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }
}

impl Embedder for FakeEmbedder {
    fn model_id(&self) -> &str {
        &self.id
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }
}
