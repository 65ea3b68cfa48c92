//! t-SNE projection to two dimensions, backed by `bhtsne`.
//!
//! Subword inventories are a few hundred units at most, so the exact
//! gradient is used rather than the Barnes-Hut approximation.

use super::Projector;
use crate::defaults::{LEARNING_RATE, PERPLEXITY, TSNE_ITERATIONS};
use tracing::debug;

const EMBEDDING_DIM: u8 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Tsne {
    pub perplexity: f64,
    pub learning_rate: f64,
    pub iterations: usize,
}

impl Default for Tsne {
    fn default() -> Self {
        Self {
            perplexity: PERPLEXITY,
            learning_rate: LEARNING_RATE,
            iterations: TSNE_ITERATIONS,
        }
    }
}

impl Tsne {
    /// Perplexity usable for `n` points.
    ///
    /// Each point needs about three times the perplexity in neighbours.
    pub fn effective_perplexity(&self, n: usize) -> f64 {
        let limit = n.saturating_sub(1) as f64 / 3.0;
        self.perplexity.min(limit)
    }
}

impl Projector for Tsne {
    fn project(&self, points: &[Vec<f64>]) -> Vec<[f64; 2]> {
        let n = points.len();
        if n < 2 {
            return vec![[0.0, 0.0]; n];
        }

        let perplexity = self.effective_perplexity(n);
        let mut tsne = bhtsne::tSNE::new(points);
        tsne.embedding_dim(EMBEDDING_DIM)
            .perplexity(perplexity)
            .learning_rate(self.learning_rate)
            .epochs(self.iterations)
            .exact(|a: &Vec<f64>, b: &Vec<f64>| euclidean(a, b));

        debug!(points = n, perplexity, iterations = self.iterations, "t-SNE projection done");
        tsne.embedding()
            .chunks_exact(usize::from(EMBEDDING_DIM))
            .map(|xy| [xy[0], xy[1]])
            .collect()
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
