use anyhow::{Context, Result};
use lupyd_markdown_config::{Config, OutputFormat};
use lupyd_markdown_engine::{ParseOptions, PatternCatalog, RuleKind};

use crate::Cli;

/// Config file values with command-line overrides applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub options: ParseOptions,
    pub max_input_bytes: usize,
    pub disabled: Vec<RuleKind>,
    pub format: OutputFormat,
}

impl Settings {
    pub fn resolve(config: &Config, cli: &Cli) -> Result<Self> {
        let mut disabled = config
            .catalog
            .disabled
            .iter()
            .map(|name| {
                name.parse::<RuleKind>()
                    .context("Invalid entry in [catalog] disabled")
            })
            .collect::<Result<Vec<_>>>()?;
        for kind in &cli.disabled {
            if !disabled.contains(kind) {
                disabled.push(*kind);
            }
        }

        Ok(Self {
            options: ParseOptions {
                max_depth: cli.max_depth.unwrap_or(config.parser.max_depth),
            },
            max_input_bytes: config.parser.max_input_bytes,
            disabled,
            format: cli.format.unwrap_or(config.output.format),
        })
    }

    /// The standard catalog minus the disabled rules.
    pub fn catalog(&self) -> PatternCatalog {
        PatternCatalog::standard().without(&self.disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("lupyd-markdown").chain(args.iter().copied()))
    }

    #[test]
    fn config_values_apply_without_flags() {
        let mut config = Config::default();
        config.parser.max_depth = 9;
        config.catalog.disabled = vec!["SVG".to_string()];
        config.output.format = OutputFormat::Html;

        let settings = Settings::resolve(&config, &cli(&[])).unwrap();

        assert_eq!(settings.options.max_depth, 9);
        assert_eq!(settings.disabled, vec![RuleKind::Svg]);
        assert_eq!(settings.format, OutputFormat::Html);
    }

    #[test]
    fn default_config_matches_parser_defaults() {
        let settings = Settings::resolve(&Config::default(), &cli(&[])).unwrap();
        assert_eq!(settings.options, ParseOptions::default());
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.parser.max_depth = 9;
        config.catalog.disabled = vec!["svg".to_string()];

        let settings = Settings::resolve(
            &config,
            &cli(&["--max-depth", "3", "--format", "json", "--disable", "hashtag", "--disable", "svg"]),
        )
        .unwrap();

        assert_eq!(settings.options.max_depth, 3);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.disabled, vec![RuleKind::Svg, RuleKind::HashTag]);
        assert!(settings.catalog().get(RuleKind::HashTag).is_none());
        assert_eq!(settings.catalog().len(), RuleKind::BUILT_IN.len() - 2);
    }

    #[test]
    fn unknown_rule_in_config_is_an_error() {
        let mut config = Config::default();
        config.catalog.disabled = vec!["blink".to_string()];

        let err = Settings::resolve(&config, &cli(&[])).unwrap_err();

        assert!(format!("{err:#}").contains("blink"));
    }

    #[test]
    fn unknown_rule_flag_is_rejected_by_clap() {
        assert!(Cli::try_parse_from(["lupyd-markdown", "--disable", "blink"]).is_err());
    }
}
