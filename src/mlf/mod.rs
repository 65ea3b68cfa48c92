//! HTK master label file (MLF) parsing.
//!
//! Label text flows leaf-first: [`RawLabelBlock`] splits a file into
//! sentences, [`TimedArc`] parses each arc line and normalises its label,
//! and [`SentenceRecord`] groups the arcs of one sentence.

pub mod arc;
pub mod block;
pub mod normalizer;
pub mod sentence;

pub use arc::{FieldValue, TimedArc};
pub use block::RawLabelBlock;
pub use normalizer::{ContextWidth, NormalizerConfig, normalize};
pub use sentence::SentenceRecord;
