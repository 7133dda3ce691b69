use anyhow::{Context, Result, bail};
use clap::Parser;
use lupyd_markdown_config::{Config, OutputFormat};
use lupyd_markdown_engine::{ElementType, MarkupParser, RuleKind, render_html};
use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

mod live;
mod settings;
mod terminal_presenter;

use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "lupyd-markdown", version)]
#[command(about = "Parse lupyd markup into typed spans, JSON or HTML")]
pub struct Cli {
    /// Input file; stdin is read when omitted
    pub file: Option<PathBuf>,

    /// Output format: spans, json or html
    #[arg(short, long, value_parser = OutputFormat::from_str)]
    pub format: Option<OutputFormat>,

    /// Config file to use instead of ~/.config/lupyd-markdown/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Deepest nesting decomposed before the rest is kept as text
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Leave a rule out of the catalog (repeatable), e.g. `--disable svg`
    #[arg(long = "disable", value_name = "RULE", value_parser = RuleKind::from_str)]
    pub disabled: Vec<RuleKind>,

    /// Open an interactive editor with a live preview
    #[arg(long)]
    pub live: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(&config, &cli)?;
    log::debug!("effective settings: {settings:?}");

    if cli.live {
        let initial = match &cli.file {
            Some(path) => read_file(path)?,
            None => String::new(),
        };
        return live::run(settings, initial);
    }

    let input = match &cli.file {
        Some(path) => read_file(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let output = convert(&input, &settings)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.to_path_buf());
            Config::load_from_path(&path)?
                .with_context(|| format!("Config file not found: {}", path.display()))
        }
        None => {
            let config = Config::load()?;
            if config.is_none() {
                log::debug!("no config at {}", Config::config_path().display());
            }
            Ok(config.unwrap_or_default())
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    let path = Config::expand_path(path).unwrap_or_else(|| path.to_path_buf());
    std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parses `input` and formats it the way `settings` asks for.
fn convert(input: &str, settings: &Settings) -> Result<String> {
    if input.len() > settings.max_input_bytes {
        bail!(
            "Input is {} bytes, over the {} byte limit (see [parser] max_input_bytes)",
            input.len(),
            settings.max_input_bytes
        );
    }

    let catalog = settings.catalog();
    let doc = MarkupParser::new(&catalog)
        .with_options(settings.options)
        .parse(input, ElementType::NORMAL)?;

    let output = match settings.format {
        OutputFormat::Spans => doc.to_string(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string(&doc)?;
            json.push('\n');
            json
        }
        OutputFormat::Html => {
            let mut html = render_html(&doc);
            html.push('\n');
            html
        }
    };
    Ok(output)
}
