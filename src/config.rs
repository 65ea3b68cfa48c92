use crate::defaults;
use crate::error::Result;
use crate::labels::{FallbackPolicy, LabelMap, LabelMapping};
use crate::mlf::NormalizerConfig;
use crate::trainer::{EmbeddingModel, EmbeddingTrainer, FastTextTrainer, Word2VecTrainer};
use crate::visualise::Tsne;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub embedding: EmbeddingConfig,
    pub visualisation: VisualisationConfig,
}

/// Corpus generation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorpusConfig {
    pub mlf_file: Option<PathBuf>,
    pub subword_corpus: PathBuf,
    pub unique_subwords: PathBuf,
    pub context_width: usize,
    pub position_info: bool,
    pub separate_apostrophe: bool,
}

/// Embedding trainer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub model: EmbeddingModel,
    pub vec_length: usize,
    pub output_dir: PathBuf,
    pub word2vec_dir: PathBuf,
    pub fasttext_bin: PathBuf,
    pub save_json: bool,
}

/// t-SNE and plotting configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisualisationConfig {
    pub perplexity: f64,
    pub learning_rate: f64,
    pub iterations: usize,
    pub image: PathBuf,
    pub summary_file: PathBuf,
    pub label_mapping: LabelMapping,
    pub fallback: FallbackPolicy,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            mlf_file: None,
            subword_corpus: PathBuf::from(defaults::SUBWORD_CORPUS),
            unique_subwords: PathBuf::from(defaults::UNIQUE_SUBWORDS),
            context_width: defaults::CONTEXT_WIDTH,
            position_info: false,
            separate_apostrophe: true,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: EmbeddingModel::Word2vec,
            vec_length: defaults::VEC_LENGTH,
            output_dir: PathBuf::from(defaults::EMBEDDING_DIR),
            word2vec_dir: PathBuf::from("word2vec"),
            fasttext_bin: PathBuf::from(defaults::FASTTEXT_BIN),
            save_json: false,
        }
    }
}

impl Default for VisualisationConfig {
    fn default() -> Self {
        Self {
            perplexity: defaults::PERPLEXITY,
            learning_rate: defaults::LEARNING_RATE,
            iterations: defaults::TSNE_ITERATIONS,
            image: PathBuf::from(defaults::VISUALISATION_IMAGE),
            summary_file: PathBuf::from(defaults::SUMMARY_FILE),
            label_mapping: LabelMapping::Identity,
            fallback: FallbackPolicy::Error,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only a missing file falls back to defaults; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SUBWORD_EMBED_MODEL → embedding.model
    /// - SUBWORD_EMBED_CONTEXT → corpus.context_width
    /// - SUBWORD_EMBED_WORD2VEC_DIR → embedding.word2vec_dir
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("SUBWORD_EMBED_MODEL")
            && !model.is_empty()
        {
            match model.parse() {
                Ok(model) => self.embedding.model = model,
                Err(e) => warn!("Ignoring SUBWORD_EMBED_MODEL: {e}"),
            }
        }

        if let Ok(context) = std::env::var("SUBWORD_EMBED_CONTEXT")
            && !context.is_empty()
        {
            match context.parse() {
                Ok(width) => self.corpus.context_width = width,
                Err(e) => warn!("Ignoring SUBWORD_EMBED_CONTEXT '{context}': {e}"),
            }
        }

        if let Ok(dir) = std::env::var("SUBWORD_EMBED_WORD2VEC_DIR")
            && !dir.is_empty()
        {
            self.embedding.word2vec_dir = PathBuf::from(dir);
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/subword-embed/config.toml on Linux, or a path in the
    /// working directory when no config directory is known.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("subword-embed"))
            .unwrap_or_default()
            .join("config.toml")
    }

    /// Validated normaliser settings. Fails on an unsupported context width.
    pub fn normalizer(&self) -> Result<NormalizerConfig> {
        Ok(
            NormalizerConfig::new(self.corpus.context_width, self.corpus.position_info)?
                .with_apostrophe_separation(self.corpus.separate_apostrophe),
        )
    }

    pub fn trainer(&self) -> Box<dyn EmbeddingTrainer> {
        match self.embedding.model {
            EmbeddingModel::Word2vec => {
                Box::new(Word2VecTrainer::from_dir(&self.embedding.word2vec_dir))
            }
            EmbeddingModel::Fasttext => {
                Box::new(FastTextTrainer::new(self.embedding.fasttext_bin.clone()))
            }
        }
    }

    pub fn tsne(&self) -> Tsne {
        Tsne {
            perplexity: self.visualisation.perplexity,
            learning_rate: self.visualisation.learning_rate,
            iterations: self.visualisation.iterations,
        }
    }

    pub fn label_map(&self) -> Result<LabelMap> {
        Ok(LabelMap::from_summary_file(
            &self.visualisation.summary_file,
            self.visualisation.label_mapping,
            self.corpus.separate_apostrophe,
        )?
        .with_fallback(self.visualisation.fallback))
    }

    pub fn embedding_path(&self) -> PathBuf {
        self.embedding.output_dir.join(defaults::EMBEDDING_FILE)
    }

    /// Serialize the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
