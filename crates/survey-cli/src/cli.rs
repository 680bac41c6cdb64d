//! CLI argument definitions for the survey explorer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use survey_aggregate::DisplayMode;
use survey_model::QuestionId;

#[derive(Parser)]
#[command(
    name = "survey-explorer",
    version,
    about = "Explore survey responses - answer distributions and cross-tabulations",
    long_about = "Explore a survey response table through its question catalog.\n\n\
                  Computes univariate distributions (counts or percentages) and\n\
                  cross-tabulates pairs of single and multiple choice questions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub inputs: InputArgs,

    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct InputArgs {
    /// Response table (.csv or .parquet).
    #[arg(long, value_name = "PATH", env = "SURVEY_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// Question catalog (.toml).
    #[arg(long, value_name = "PATH", env = "SURVEY_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List questionnaire sections.
    Sections,

    /// List questions, optionally restricted to one section.
    Questions(QuestionsArgs),

    /// Distribution of the answers to one question or to a whole section.
    Univariate(UnivariateArgs),

    /// Cross-tabulate two questions.
    Bivariate(BivariateArgs),
}

#[derive(Args)]
pub struct QuestionsArgs {
    /// Section key or title.
    #[arg(long, value_name = "KEY")]
    pub section: Option<String>,
}

#[derive(Args)]
pub struct UnivariateArgs {
    #[command(flatten)]
    pub target: UnivariateTarget,

    /// Quantidade (counts) or Percentual (percentages).
    #[arg(long, value_name = "MODE", default_value = "quantidade")]
    pub mode: DisplayMode,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct UnivariateTarget {
    /// Question id.
    #[arg(long, value_name = "ID")]
    pub question: Option<QuestionId>,

    /// Every question of a section, by key or title.
    #[arg(long, value_name = "KEY")]
    pub section: Option<String>,

    /// Question by its exact display text.
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct BivariateArgs {
    /// First question id (rows of the matrix).
    #[arg(long, value_name = "ID", required_unless_present = "first_text")]
    pub first: Option<QuestionId>,

    /// First question by its exact display text.
    #[arg(long = "first-text", value_name = "TEXT", conflicts_with = "first")]
    pub first_text: Option<String>,

    /// Second question id (columns of the matrix).
    #[arg(long, value_name = "ID", required_unless_present = "second_text")]
    pub second: Option<QuestionId>,

    /// Second question by its exact display text.
    #[arg(long = "second-text", value_name = "TEXT", conflicts_with = "second")]
    pub second_text: Option<String>,

    /// Show each matrix row as percentages of its total.
    #[arg(long)]
    pub percent: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn univariate_requires_one_target() {
        let parsed = Cli::try_parse_from([
            "survey-explorer",
            "univariate",
            "--question",
            "4",
            "--mode",
            "Percentual",
        ])
        .expect("valid arguments");
        let Command::Univariate(args) = parsed.command else {
            panic!("expected univariate");
        };
        assert_eq!(args.target.question, Some(QuestionId::new(4)));
        assert_eq!(args.mode, DisplayMode::Percent);

        assert!(Cli::try_parse_from(["survey-explorer", "univariate"]).is_err());
        assert!(
            Cli::try_parse_from([
                "survey-explorer",
                "univariate",
                "--question",
                "4",
                "--section",
                "P1",
            ])
            .is_err()
        );
    }

    #[test]
    fn bivariate_accepts_ids_or_texts() {
        let parsed = Cli::try_parse_from([
            "survey-explorer",
            "bivariate",
            "--first-text",
            "Cargo atual",
            "--second",
            "10",
        ])
        .expect("valid arguments");
        let Command::Bivariate(args) = parsed.command else {
            panic!("expected bivariate");
        };
        assert_eq!(args.first, None);
        assert_eq!(args.first_text.as_deref(), Some("Cargo atual"));
        assert_eq!(args.second, Some(QuestionId::new(10)));

        assert!(Cli::try_parse_from(["survey-explorer", "bivariate", "--first", "1"]).is_err());
    }
}
