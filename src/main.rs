//! cue-lyrics - command-line entry point
//!
//! Reads a cue sheet, converts it to timed lyrics and writes the JSON and/or Elm
//! documents. Both documents are rendered before either file is written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cue_lyrics::{ElmLayout, EmptyGroups, OutputConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Book,
    Flat,
}

impl From<LayoutArg> for ElmLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Book => ElmLayout::Book,
            LayoutArg::Flat => ElmLayout::Flat,
        }
    }
}

/// Command-line arguments for cue-lyrics
#[derive(Parser, Debug)]
#[command(name = "cue-lyrics")]
#[command(about = "Convert a sequencer cue sheet into timed lyric documents")]
#[command(version)]
struct Args {
    /// Cue sheet exported from the sequencer
    cue_file: PathBuf,

    /// Write the flat JSON lyric list to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the Elm lyric module to this path
    #[arg(long, default_value = "lyrics.elm")]
    elm: PathBuf,

    /// Do not write the Elm lyric module
    #[arg(long)]
    no_elm: bool,

    /// YAML output configuration
    #[arg(long, env = "CUE_LYRICS_CONFIG")]
    config: Option<PathBuf>,

    /// Elm document layout, overriding the configuration file
    #[arg(long, value_enum)]
    elm_layout: Option<LayoutArg>,

    /// Remove empty trailing lines and pages from the Elm lyric book
    #[arg(long)]
    drop_empty_groups: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cue_lyrics=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let source = fs::read_to_string(&args.cue_file)
        .with_context(|| format!("Failed to read cue file '{}'", args.cue_file.display()))?;
    let conversion = cue_lyrics::convert_with_base(&source, config.position_base)
        .with_context(|| format!("Failed to convert '{}'", args.cue_file.display()))?;

    let json = match &args.json {
        Some(path) => Some((path, conversion.to_json()?)),
        None => None,
    };
    let elm = (!args.no_elm).then(|| (&args.elm, conversion.to_elm(&config)));

    if let Some((path, document)) = json {
        write_output(path, &document)?;
        info!("Wrote {} lyrics to {}", conversion.payloads.len(), path.display());
    }
    if let Some((path, document)) = elm {
        write_output(path, &document)?;
        info!("Wrote {:?} layout Elm module to {}", config.elm_layout, path.display());
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<OutputConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config '{}'", path.display()))?;
            OutputConfig::from_yaml(&content)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?
        }
        None => OutputConfig::default(),
    };

    if let Some(layout) = args.elm_layout {
        config.elm_layout = layout.into();
    }
    if args.drop_empty_groups {
        config.empty_groups = EmptyGroups::Drop;
    }
    Ok(config)
}

fn write_output(path: &Path, document: &str) -> Result<()> {
    fs::write(path, document).with_context(|| format!("Failed to write '{}'", path.display()))
}
