use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use marq_core::config::{DEFAULT_PORT, FileConfig, Options};

/// Fixed relative path of the optional JSON config file.
pub const CONFIG_FILE: &str = ".marqrc.json";

/// Builds the run options with cascading precedence:
/// 1. CLI arguments (highest priority)
/// 2. Configuration file
/// 3. Defaults (lowest priority)
pub fn load_options(matches: &ArgMatches) -> Result<Options> {
    let file = FileConfig::read(CONFIG_FILE)
        .with_context(|| format!("failed to load {}", CONFIG_FILE))?
        .unwrap_or_default();

    merge(matches, file)
}

fn merge(matches: &ArgMatches, file: FileConfig) -> Result<Options> {
    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .or(file.input_dir);
    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .or(file.output_dir);

    let Some(input) = input else {
        bail!("missing <INPUT_DIR>: pass it as an argument or set inputDir in {CONFIG_FILE}");
    };
    let Some(output) = output else {
        bail!("missing <OUTPUT_DIR>: pass it as an argument or set outputDir in {CONFIG_FILE}");
    };

    let css = match matches.get_many::<String>("css") {
        Some(values) => values.map(PathBuf::from).collect(),
        None => file.css.unwrap_or_default(),
    };

    Ok(Options {
        input,
        output,
        template: matches
            .get_one::<String>("template")
            .map(PathBuf::from)
            .or(file.template),
        css,
        watch: matches.get_flag("watch") || file.watch.unwrap_or(false),
        single: matches.get_flag("single") || file.single.unwrap_or(false),
        live: matches.get_flag("live") || file.live.unwrap_or(false),
        port: matches
            .get_one::<u16>("port")
            .copied()
            .or(file.port)
            .unwrap_or(DEFAULT_PORT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_command;

    fn matches(args: &[&str]) -> ArgMatches {
        build_command().try_get_matches_from(args).unwrap()
    }

    #[test]
    fn defaults_apply_when_nothing_else_is_set() {
        let options = merge(&matches(&["marq", "docs", "site"]), FileConfig::default()).unwrap();

        assert_eq!(options.input, PathBuf::from("docs"));
        assert_eq!(options.output, PathBuf::from("site"));
        assert_eq!(options.template, None);
        assert!(options.css.is_empty());
        assert!(!options.watch);
        assert!(!options.single);
        assert!(!options.live);
        assert_eq!(options.port, 8080);
    }

    #[test]
    fn config_file_fills_missing_required_fields() {
        let file = FileConfig {
            input_dir: Some(PathBuf::from("docs")),
            output_dir: Some(PathBuf::from("site")),
            ..FileConfig::default()
        };

        let options = merge(&matches(&["marq"]), file).unwrap();
        assert_eq!(options.input, PathBuf::from("docs"));
        assert_eq!(options.output, PathBuf::from("site"));
    }

    #[test]
    fn cli_wins_over_the_config_file() {
        let file = FileConfig {
            input_dir: Some(PathBuf::from("from-config")),
            output_dir: Some(PathBuf::from("from-config-out")),
            port: Some(3000),
            css: Some(vec![PathBuf::from("config.css")]),
            ..FileConfig::default()
        };

        let options = merge(
            &matches(&["marq", "docs", "site", "-p", "9000", "-c", "cli.css"]),
            file,
        )
        .unwrap();

        assert_eq!(options.input, PathBuf::from("docs"));
        assert_eq!(options.output, PathBuf::from("site"));
        assert_eq!(options.port, 9000);
        assert_eq!(options.css, vec![PathBuf::from("cli.css")]);
    }

    #[test]
    fn config_file_values_survive_when_cli_is_silent() {
        let file = FileConfig {
            input_dir: Some(PathBuf::from("docs")),
            output_dir: Some(PathBuf::from("site")),
            watch: Some(true),
            port: Some(3000),
            ..FileConfig::default()
        };

        let options = merge(&matches(&["marq"]), file).unwrap();
        assert!(options.watch);
        assert_eq!(options.port, 3000);
    }

    #[test]
    fn missing_required_fields_are_a_usage_error() {
        let err = merge(&matches(&["marq", "docs"]), FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("OUTPUT_DIR"));

        let err = merge(&matches(&["marq"]), FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("INPUT_DIR"));
    }
}
