//! playdoc: rewrite a batch of component docs into playground packages.
//!
//! - **batch mode**: `playdoc docs.toml -s ../chakra-ui -o ../starter`
//! - **preview mode**: `playdoc docs.toml --stdout alert` prints one
//!   rewritten page instead of writing files

use anyhow::{bail, Context, Result};
use clap::Parser;
use playdoc::config::Config;
use playdoc::{process_batch, sink, source};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "playdoc",
    about = "Rewrite component documentation into playground MDX, stories and index modules"
)]
struct Cli {
    /// Batch configuration (TOML docs map)
    config: PathBuf,

    /// Root of the raw documentation mirror (overrides `source` in the config)
    #[arg(short = 's', long)]
    source: Option<PathBuf>,

    /// Output root (overrides `output` in the config)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Only process documents whose slug matches this glob. Repeatable.
    #[arg(long)]
    only: Vec<String>,

    /// Print the rewritten page for this slug instead of writing files
    #[arg(long, value_name = "DSD")]
    stdout: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config)?;
    let only = cli
        .only
        .iter()
        .map(|p| glob::Pattern::new(p).with_context(|| format!("invalid glob pattern: {}", p)))
        .collect::<Result<Vec<_>>>()?;

    let source_root = cli
        .source
        .or(config.source.clone())
        .context("--source is required when the config has no `source`")?;

    let mut docs = config.documents(&only);
    if docs.is_empty() {
        tracing::warn!("no documents selected");
    }
    source::load(&mut docs, &source::DirSource::new(source_root));
    let batch_index = process_batch(&mut docs, &config.rewrite);

    if let Some(ref dsd) = cli.stdout {
        let doc = docs
            .iter()
            .find(|d| &d.dsd == dsd)
            .with_context(|| format!("no document with slug: {}", dsd))?;
        println!("{}", doc.dsd_doc.as_deref().unwrap_or_default());
        return Ok(());
    }

    let output = cli
        .output
        .or(config.output.clone())
        .context("--output is required when the config has no `output`")?;

    let saved = sink::save_all(&docs, &output);
    sink::save_batch_index(&batch_index, &output)?;

    let failed = saved.iter().filter(|ok| !**ok).count();
    tracing::info!(saved = saved.len() - failed, failed, "done");
    if failed > 0 {
        bail!("{} of {} documents failed to save", failed, saved.len());
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "playdoc=info",
        1 => "playdoc=debug",
        _ => "playdoc=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
