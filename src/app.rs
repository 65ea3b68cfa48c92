//! Pipeline stages.
//!
//! Each stage reads its inputs from the paths in [`Config`] and writes its
//! artifacts back to disk, so stages can be run separately:
//! label file → corpus → embedding → visualisation

use crate::config::Config;
use crate::corpus::Corpus;
use crate::embedding::EmbeddingTable;
use crate::error::{Result, SubwordError};
use crate::trainer::{EmbeddingTrainer, TrainingJob};
use crate::visualise::{Projector, visualise_embedding};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Parse the configured label file and write the corpus and unique-subword list.
pub fn build_corpus(config: &Config) -> Result<Corpus> {
    let mlf_file = config
        .corpus
        .mlf_file
        .as_deref()
        .ok_or_else(|| SubwordError::ConfigInvalidValue {
            key: "corpus.mlf_file".to_string(),
            message: "no label file given (use --mlf-file)".to_string(),
        })?;

    let corpus = Corpus::from_file(mlf_file, &config.normalizer()?)?;

    create_parent(&config.corpus.unique_subwords)?;
    corpus.save_unique_subwords(&config.corpus.unique_subwords)?;
    create_parent(&config.corpus.subword_corpus)?;
    corpus.save_corpus(&config.corpus.subword_corpus)?;
    Ok(corpus)
}

/// Train an embedding on the corpus written by [`build_corpus`].
pub fn train_embedding(config: &Config, trainer: &dyn EmbeddingTrainer) -> Result<PathBuf> {
    let job = TrainingJob {
        corpus: &config.corpus.subword_corpus,
        unique_subwords: &config.corpus.unique_subwords,
        output_dir: &config.embedding.output_dir,
        vec_length: config.embedding.vec_length,
    };
    let path = trainer.train(&job)?;
    info!(trainer = trainer.name(), path = %path.display(), "Embedding trained");
    Ok(path)
}

/// Plot the trained embedding, exporting it as JSON when configured.
pub fn visualise(config: &Config, projector: &dyn Projector) -> Result<EmbeddingTable> {
    let labels = config.label_map()?;
    let table = visualise_embedding(
        &config.embedding_path(),
        &labels,
        projector,
        &config.visualisation.image,
    )?;
    if config.embedding.save_json {
        export_json(config, &table)?;
    }
    Ok(table)
}

/// Write the token→vector map next to the embedding file.
pub fn export_json(config: &Config, table: &EmbeddingTable) -> Result<PathBuf> {
    let path = config.embedding_path().with_extension("json");
    table.save_json(&path)?;
    info!(path = %path.display(), "Exported embedding as JSON");
    Ok(path)
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
