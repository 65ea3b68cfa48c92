//! subword-embed - subword embeddings from MLF transcriptions
//!
//! Parses HTK-style Master Label Files into a subword corpus, trains
//! word2vec or fastText embeddings on it and plots them with t-SNE.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod corpus;
pub mod defaults;
pub mod embedding;
pub mod error;
pub mod labels;
#[cfg(feature = "cli")]
pub mod logging;
pub mod mlf;
pub mod trainer;
pub mod visualise;

// MLF parsing
pub use mlf::{ContextWidth, NormalizerConfig, SentenceRecord, TimedArc, normalize};

// Corpus and embeddings
pub use corpus::Corpus;
pub use embedding::EmbeddingTable;
pub use labels::{FallbackPolicy, LabelMap, LabelMapping};
pub use trainer::{EmbeddingModel, EmbeddingTrainer, TrainingJob};
pub use visualise::{Projector, Tsne};

// Error handling
pub use error::{Result, SubwordError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
