//! External embedding trainers.
//!
//! word2vec and fastText run as subprocesses; both leave a word2vec
//! text-format `embedding.txt` in the output directory.

use crate::corpus::load_unique_subwords;
use crate::defaults::{EMBEDDING_FILE, SENTENCE_END_TOKEN};
use crate::embedding::EmbeddingTable;
use crate::error::{Result, SubwordError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Available embedding models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingModel {
    #[default]
    Word2vec,
    Fasttext,
}

impl std::str::FromStr for EmbeddingModel {
    type Err = SubwordError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "word2vec" => Ok(Self::Word2vec),
            "fasttext" => Ok(Self::Fasttext),
            other => Err(SubwordError::ConfigInvalidValue {
                key: "embedding.model".to_string(),
                message: format!("unknown model '{other}', expected word2vec or fasttext"),
            }),
        }
    }
}

/// Inputs and outputs of one training run.
#[derive(Debug, Clone)]
pub struct TrainingJob<'a> {
    pub corpus: &'a Path,
    pub unique_subwords: &'a Path,
    pub output_dir: &'a Path,
    pub vec_length: usize,
}

impl TrainingJob<'_> {
    pub fn embedding_path(&self) -> PathBuf {
        self.output_dir.join(EMBEDDING_FILE)
    }
}

/// Trait for embedding trainers.
///
/// This trait allows swapping the subprocess backends for a fake in tests.
pub trait EmbeddingTrainer {
    fn name(&self) -> &str;

    /// Train on the job's corpus and return the path of the written embedding file.
    fn train(&self, job: &TrainingJob<'_>) -> Result<PathBuf>;
}

/// Runs the reference `word2vec` C tool.
#[derive(Debug, Clone)]
pub struct Word2VecTrainer {
    binary: PathBuf,
}

/// Fixed word2vec hyper-parameters; vocabulary is tiny, so keep every unit.
const WORD2VEC_ARGS: &[&str] = &[
    "-cbow", "0", "-window", "5", "-negative", "5", "-hs", "0", "-sample", "1e-4", "-iter", "15",
    "-min-count", "1", "-binary", "0",
];

impl Word2VecTrainer {
    /// Use the `word2vec` binary inside a word2vec checkout.
    pub fn from_dir(word2vec_dir: &Path) -> Self {
        Self {
            binary: word2vec_dir.join("word2vec"),
        }
    }

    pub fn command(&self, job: &TrainingJob<'_>) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("-train")
            .arg(job.corpus)
            .arg("-output")
            .arg(job.embedding_path())
            .arg("-size")
            .arg(job.vec_length.to_string())
            .args(WORD2VEC_ARGS);
        command
    }
}

impl EmbeddingTrainer for Word2VecTrainer {
    fn name(&self) -> &str {
        "word2vec"
    }

    fn train(&self, job: &TrainingJob<'_>) -> Result<PathBuf> {
        fs::create_dir_all(job.output_dir)?;
        run(self.command(job), self.name())?;
        Ok(job.embedding_path())
    }
}

/// Runs the `fasttext` CLI and rewrites its `.vec` output in vocabulary order.
#[derive(Debug, Clone)]
pub struct FastTextTrainer {
    binary: PathBuf,
}

impl FastTextTrainer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn model_prefix(job: &TrainingJob<'_>) -> PathBuf {
        job.output_dir.join("model")
    }

    pub fn command(&self, job: &TrainingJob<'_>) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("skipgram")
            .arg("-input")
            .arg(job.corpus)
            .arg("-output")
            .arg(Self::model_prefix(job))
            .arg("-dim")
            .arg(job.vec_length.to_string())
            .args(["-minCount", "1"]);
        command
    }
}

impl EmbeddingTrainer for FastTextTrainer {
    fn name(&self) -> &str {
        "fastText"
    }

    fn train(&self, job: &TrainingJob<'_>) -> Result<PathBuf> {
        fs::create_dir_all(job.output_dir)?;
        run(self.command(job), self.name())?;

        let vectors = EmbeddingTable::from_file(&Self::model_prefix(job).with_extension("vec"))?;
        let unique_subwords = load_unique_subwords(job.unique_subwords)?;
        let ordered = order_vocabulary(&vectors, &unique_subwords)?;

        let path = job.embedding_path();
        ordered.save(vectors.len(), &path)?;
        info!(path = %path.display(), rows = ordered.len(), "Wrote fastText embedding");
        Ok(path)
    }
}

/// Reorder a trained vocabulary: `</s>` first, then the corpus subwords, then
/// anything else the model learned.
///
/// Subwords the model never saw are reported and left out.
pub fn order_vocabulary(
    vectors: &EmbeddingTable,
    unique_subwords: &[String],
) -> Result<EmbeddingTable> {
    let mut ordered = EmbeddingTable::new(vectors.dimension());
    let mut written = std::collections::HashSet::new();

    let preferred = std::iter::once(SENTENCE_END_TOKEN).chain(unique_subwords.iter().map(String::as_str));
    for token in preferred {
        if written.contains(token) {
            continue;
        }
        match vectors.get(token) {
            Some(vector) => {
                ordered.push(token, vector.to_vec())?;
                written.insert(token.to_string());
            }
            None => warn!(token, "Subword missing from trained vocabulary"),
        }
    }

    for row in vectors.rows() {
        if !written.contains(&row.token) {
            debug!(token = %row.token, "Adding vocabulary entry not in subword list");
            ordered.push(row.token.as_str(), row.vector.clone())?;
            written.insert(row.token.clone());
        }
    }
    Ok(ordered)
}

/// Run a trainer subprocess and fail if it exits non-zero.
fn run(mut command: Command, name: &str) -> Result<()> {
    info!(trainer = name, "Training embedding");
    debug!(?command, "Spawning trainer");
    let status = command.status().map_err(|e| SubwordError::Trainer {
        message: format!("failed to run {name}: {e}"),
    })?;

    if !status.success() {
        return Err(SubwordError::Trainer {
            message: format!("{name} exited with {status}"),
        });
    }
    Ok(())
}
