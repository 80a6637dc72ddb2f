//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Console output format for a generated canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered markdown document
    Markdown,
    /// Canonical document as JSON
    Json,
    /// Colored tree view
    Tree,
}

impl From<OutputFormat> for canvas_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Markdown => canvas_domain::OutputFormat::Markdown,
            OutputFormat::Json => canvas_domain::OutputFormat::Json,
            OutputFormat::Tree => canvas_domain::OutputFormat::Tree,
        }
    }
}

/// CLI arguments for strategy-canvas
#[derive(Parser, Debug)]
#[command(name = "strategy-canvas")]
#[command(author, version, about = "Turn questionnaire answers into a business strategy canvas")]
#[command(long_about = r#"
strategy-canvas asks a short business questionnaire, sends the answers to a
language model and turns its reply into a strategy canvas: stocks, flows,
feedback loops, context, insights and a strategic recommendation.

The canvas is printed and exported as markdown to ./strategy_canvas.md.

Configuration files are loaded from (in priority order):
1. STRATEGY_CANVAS_* environment variables
2. --config <path>                              Explicit config file
3. ./strategy-canvas.toml                       Project-level config
4. ~/.config/strategy-canvas/config.toml        Global config

Example:
  strategy-canvas
  strategy-canvas --answers answers.txt -o tree
  strategy-canvas --reply-file saved_reply.txt --no-export -o json
"#)]
pub struct Cli {
    /// Read answers from a file (one answer per line) instead of prompting
    #[arg(long, value_name = "PATH", conflicts_with = "reply_file")]
    pub answers: Option<PathBuf>,

    /// Process a saved model reply instead of calling the model
    #[arg(long, value_name = "PATH")]
    pub reply_file: Option<PathBuf>,

    /// Model to draft the canvas with
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long, value_name = "TEMP")]
    pub temperature: Option<f32>,

    /// Output format (default: from config, else markdown)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Directory for the markdown export
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Do not write the markdown export
    #[arg(long)]
    pub no_export: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_offline_run() {
        let cli = Cli::try_parse_from([
            "strategy-canvas",
            "--reply-file",
            "reply.txt",
            "-o",
            "tree",
            "-vv",
            "--no-export",
        ])
        .unwrap();
        assert_eq!(cli.reply_file, Some(PathBuf::from("reply.txt")));
        assert_eq!(cli.output, Some(OutputFormat::Tree));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_export);
    }

    #[test]
    fn test_answers_conflicts_with_reply_file() {
        let result = Cli::try_parse_from([
            "strategy-canvas",
            "--answers",
            "a.txt",
            "--reply-file",
            "r.txt",
        ]);
        assert!(result.is_err());
    }
}
