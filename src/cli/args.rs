//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Turn indented outlines into behavior-driven test skeletons
#[derive(Parser, Debug)]
#[command(name = "outline2spec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Report indentation diagnostics and a summary on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Debug logging (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config (default: ./.outline2spec.toml)
    #[arg(
        short,
        long,
        global = true,
        env = "OUTLINE2SPEC_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an outline to test code
    Convert {
        /// Outline file (stdin if omitted or "-")
        #[arg(value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// Render target (default: config default_target)
        #[arg(short, long)]
        target: Option<String>,
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Fail on indentation diagnostics
        #[arg(long)]
        strict: bool,
    },

    /// Show parsed outline as tree
    Tree {
        /// Outline file (stdin if omitted or "-")
        #[arg(value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// List render targets
    Targets,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective config
    Show,
    /// Print a commented config template
    Template,
}
