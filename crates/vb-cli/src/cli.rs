//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use vb_store::ThemeMode;

#[derive(Parser)]
#[command(
    name = "versaboard",
    version,
    about = "VersaBoard - inspect and edit a saved board",
    long_about = "Inspect and edit a saved VersaBoard.\n\n\
                  Reads the board snapshot from the data folder, applies the\n\
                  requested change and writes the full snapshot back."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Folder holding the saved board (default: settings file, then the
    /// platform data folder).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

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

#[derive(Subcommand)]
pub enum Command {
    /// List modules in board order with their previews.
    List,

    /// Print a module's state as JSON.
    Get {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Replace a module's state.
    Set {
        #[arg(value_name = "ID")]
        id: String,
        /// New state as JSON, e.g. `7` or `{"ml": 500}`.
        #[arg(value_name = "JSON")]
        json: String,
    },

    /// Restore a module's default state.
    Reset {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Move modules to the front of the board, in the given order.
    ///
    /// Unknown ids are ignored; modules not named keep their relative order
    /// after the named ones.
    Order {
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },

    /// Print the saved snapshot as stored.
    Snapshot,

    /// Show the theme preference, or set it.
    Theme {
        #[arg(value_enum, value_name = "MODE")]
        mode: Option<ThemeArg>,
    },
}

/// CLI theme choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
            ThemeArg::System => ThemeMode::System,
        }
    }
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
