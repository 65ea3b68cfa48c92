//! Command-line interface for subword-embed
//!
//! Provides argument parsing using clap derive macros.

use crate::config::Config;
use crate::labels::LabelMapping;
use crate::trainer::EmbeddingModel;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Subword embeddings from MLF transcriptions
#[derive(Parser, Debug)]
#[command(
    name = "subword-embed",
    version,
    about = "Build subword corpora from MLF files and train subword embeddings"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: per-sentence debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the subword corpus and unique-subword list
    Corpus {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        apostrophe: ApostropheArgs,
    },

    /// Build the corpus and train an embedding on it
    Train {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        apostrophe: ApostropheArgs,
        #[command(flatten)]
        embedding: EmbeddingArgs,
    },

    /// Visualise an existing embedding
    #[command(alias = "only-viz")]
    Visualise {
        #[command(flatten)]
        embedding: EmbeddingArgs,
        #[command(flatten)]
        visual: VisualArgs,
        #[command(flatten)]
        apostrophe: ApostropheArgs,
    },

    /// Full pipeline: corpus, training and visualisation
    Run {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        apostrophe: ApostropheArgs,
        #[command(flatten)]
        embedding: EmbeddingArgs,
        #[command(flatten)]
        visual: VisualArgs,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Dump,
}

/// Corpus generation overrides
#[derive(Args, Debug, Default)]
pub struct CorpusArgs {
    /// Input MLF file from which to generate the corpus
    #[arg(short = 'i', long, value_name = "FILE")]
    pub mlf_file: Option<PathBuf>,

    /// Where to write the subword corpus
    #[arg(long, value_name = "FILE")]
    pub subword_corpus: Option<PathBuf>,

    /// Where to write the unique subword list (JSON)
    #[arg(short = 'u', long, value_name = "FILE")]
    pub unique_subwords: Option<PathBuf>,

    /// Subword context: monophone (1), biphone (2), triphone (3)
    #[arg(short = 'c', long = "subword-context", value_name = "WIDTH")]
    pub context_width: Option<usize>,

    /// Keep word-position markers on subwords
    #[arg(long, overrides_with = "no_loc_info")]
    pub loc_info: bool,

    /// Strip word-position markers (default)
    #[arg(long)]
    pub no_loc_info: bool,
}

/// Apostrophe handling, shared by corpus generation and label mapping
#[derive(Args, Debug, Default)]
pub struct ApostropheArgs {
    /// Emit the apostrophe marker as its own token and label it
    #[arg(long, overrides_with = "no_apostrophe_embedding")]
    pub apostrophe_embedding: bool,

    /// Keep the apostrophe marker attached to its subword
    #[arg(long)]
    pub no_apostrophe_embedding: bool,
}

/// Embedding overrides
#[derive(Args, Debug, Default)]
pub struct EmbeddingArgs {
    /// Embedding model to train
    #[arg(short = 'm', long, value_name = "MODEL", value_parser = parse_model)]
    pub model: Option<EmbeddingModel>,

    /// Length of each subword vector
    #[arg(short = 'l', long, value_name = "N")]
    pub vec_length: Option<usize>,

    /// Embedding output directory
    #[arg(short = 'e', long = "embedding", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Local word2vec checkout containing the word2vec binary
    #[arg(long, value_name = "DIR")]
    pub word2vec_dir: Option<PathBuf>,

    /// Also export the embedding as token-to-vector JSON
    #[arg(long)]
    pub save_json: bool,
}

/// Visualisation overrides
#[derive(Args, Debug, Default)]
pub struct VisualArgs {
    /// t-SNE perplexity
    #[arg(short = 'p', long, value_name = "VALUE")]
    pub perplexity: Option<f64>,

    /// t-SNE learning rate
    #[arg(long, value_name = "VALUE")]
    pub learning_rate: Option<f64>,

    /// Label points with English names from the summary file
    #[arg(long, group = "label_mapping")]
    pub map_to_en: bool,

    /// Label points with native names from the summary file
    #[arg(long, group = "label_mapping")]
    pub map_to_native: bool,

    /// Label points with their subword codes
    #[arg(long, group = "label_mapping")]
    pub no_map: bool,

    /// Summary file with subword names
    #[arg(short = 's', long, value_name = "FILE")]
    pub summary_file: Option<PathBuf>,

    /// Where to write the SVG visualisation
    #[arg(long = "emb-visual", value_name = "FILE")]
    pub image: Option<PathBuf>,
}

fn parse_model(s: &str) -> Result<EmbeddingModel, String> {
    s.parse().map_err(|e: crate::error::SubwordError| e.to_string())
}

impl CorpusArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.mlf_file {
            config.corpus.mlf_file = Some(path.clone());
        }
        if let Some(path) = &self.subword_corpus {
            config.corpus.subword_corpus = path.clone();
        }
        if let Some(path) = &self.unique_subwords {
            config.corpus.unique_subwords = path.clone();
        }
        if let Some(width) = self.context_width {
            config.corpus.context_width = width;
        }
        if self.loc_info {
            config.corpus.position_info = true;
        } else if self.no_loc_info {
            config.corpus.position_info = false;
        }
    }
}

impl ApostropheArgs {
    pub fn apply(&self, config: &mut Config) {
        if self.apostrophe_embedding {
            config.corpus.separate_apostrophe = true;
        } else if self.no_apostrophe_embedding {
            config.corpus.separate_apostrophe = false;
        }
    }
}

impl EmbeddingArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(model) = self.model {
            config.embedding.model = model;
        }
        if let Some(len) = self.vec_length {
            config.embedding.vec_length = len;
        }
        if let Some(dir) = &self.output_dir {
            config.embedding.output_dir = dir.clone();
        }
        if let Some(dir) = &self.word2vec_dir {
            config.embedding.word2vec_dir = dir.clone();
        }
        if self.save_json {
            config.embedding.save_json = true;
        }
    }
}

impl VisualArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(perplexity) = self.perplexity {
            config.visualisation.perplexity = perplexity;
        }
        if let Some(rate) = self.learning_rate {
            config.visualisation.learning_rate = rate;
        }
        if let Some(mapping) = self.label_mapping() {
            config.visualisation.label_mapping = mapping;
        }
        if let Some(path) = &self.summary_file {
            config.visualisation.summary_file = path.clone();
        }
        if let Some(path) = &self.image {
            config.visualisation.image = path.clone();
        }
    }

    fn label_mapping(&self) -> Option<LabelMapping> {
        if self.map_to_en {
            Some(LabelMapping::English)
        } else if self.map_to_native {
            Some(LabelMapping::Native)
        } else if self.no_map {
            Some(LabelMapping::Identity)
        } else {
            None
        }
    }
}
