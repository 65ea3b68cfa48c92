use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use std::path::Path;
use subword_embed::app;
use subword_embed::cli::{Cli, Commands, ConfigAction};
use subword_embed::config::Config;
use subword_embed::embedding::EmbeddingTable;
use subword_embed::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_subscriber(logging::level_for(cli.quiet, cli.verbose)) {
        eprintln!("Warning: could not initialise logging: {e}");
    }

    match cli.command {
        Commands::Corpus { corpus, apostrophe } => {
            let mut config = load_config(cli.config.as_deref())?;
            corpus.apply(&mut config);
            apostrophe.apply(&mut config);
            run_corpus(&config, cli.quiet)?;
        }
        Commands::Train {
            corpus,
            apostrophe,
            embedding,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            corpus.apply(&mut config);
            apostrophe.apply(&mut config);
            embedding.apply(&mut config);
            run_corpus(&config, cli.quiet)?;
            let path = run_training(&config, cli.quiet)?;
            if config.embedding.save_json {
                let table = EmbeddingTable::from_file(&path)
                    .with_context(|| format!("Failed to read embedding {}", path.display()))?;
                app::export_json(&config, &table).context("Failed to export embedding")?;
            }
        }
        Commands::Visualise {
            embedding,
            visual,
            apostrophe,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            embedding.apply(&mut config);
            visual.apply(&mut config);
            apostrophe.apply(&mut config);
            run_visualisation(&config, cli.quiet)?;
        }
        Commands::Run {
            corpus,
            apostrophe,
            embedding,
            visual,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            corpus.apply(&mut config);
            apostrophe.apply(&mut config);
            embedding.apply(&mut config);
            visual.apply(&mut config);
            run_corpus(&config, cli.quiet)?;
            run_training(&config, cli.quiet)?;
            run_visualisation(&config, cli.quiet)?;
            status(cli.quiet, "Complete");
        }
        Commands::Config {
            action: ConfigAction::Dump,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let toml = config
                .to_toml()
                .context("Failed to serialize configuration")?;
            print!("{toml}");
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "subword-embed",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/subword-embed/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        let default_path = Config::default_path();
        Config::load_or_default(&default_path)
            .with_context(|| format!("Invalid config at {}", default_path.display()))?
    };

    Ok(config.with_env_overrides())
}

fn run_corpus(config: &Config, quiet: bool) -> Result<()> {
    status(quiet, "Generating corpus...");
    let corpus = app::build_corpus(config).context("Failed to build subword corpus")?;
    if !quiet {
        println!(
            "  {} {}",
            "Sentences:".dimmed(),
            corpus.sentence_count()
        );
        println!(
            "  {}  {}",
            "Subwords:".dimmed(),
            corpus.unique_subwords().len()
        );
    }
    Ok(())
}

fn run_training(config: &Config, quiet: bool) -> Result<std::path::PathBuf> {
    let trainer = config.trainer();
    status(
        quiet,
        &format!("Using {} to generate embeddings...", trainer.name()),
    );
    let path = app::train_embedding(config, trainer.as_ref())
        .with_context(|| format!("{} training failed", trainer.name()))?;
    if !quiet {
        println!("  {} {}", "Embedding:".dimmed(), path.display());
    }
    Ok(path)
}

fn run_visualisation(config: &Config, quiet: bool) -> Result<()> {
    status(quiet, "Creating visualisation using t-SNE...");
    let table = app::visualise(config, &config.tsne()).context("Failed to visualise embedding")?;
    if !quiet {
        println!(
            "  {}     {} subwords → {}",
            "Image:".dimmed(),
            table.subword_rows().count(),
            config.visualisation.image.display()
        );
    }
    Ok(())
}

fn status(quiet: bool, message: &str) {
    if !quiet {
        println!("{}", message.green());
    }
}
