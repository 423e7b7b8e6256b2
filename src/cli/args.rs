//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::TreeStyle;

/// Generic containers: a doubling dynamic array and a binary search tree
#[derive(Parser, Debug)]
#[command(name = "gencoll")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short = 'c', long = "config", global = true, value_hint = ValueHint::FilePath)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append values to a dynamic array and look elements up
    Array {
        /// Values to append, in order
        values: Vec<String>,

        /// Index to look up (repeatable; negative indices are out of range)
        #[arg(short = 'g', long = "get", allow_negative_numbers = true)]
        indices: Vec<i64>,
    },

    /// Insert values into an ordered tree and traverse it in order
    Tree {
        /// Values to insert, in order
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Rendering (default from config)
        #[arg(short, long, value_enum)]
        style: Option<TreeStyle>,
    },

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
    /// Show effective settings as TOML
    Show,
    /// Print a commented template config
    Template,
    /// Print the global config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_negative_get_when_parsing_then_accepted() {
        let cli = Cli::try_parse_from(["gencoll", "array", "a", "b", "--get", "-1", "--get", "1"])
            .expect("parse");
        match cli.command {
            Some(Commands::Array { values, indices }) => {
                assert_eq!(values, vec!["a", "b"]);
                assert_eq!(indices, vec![-1, 1]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_tree_style_when_parsing_then_value_enum() {
        let cli = Cli::try_parse_from(["gencoll", "-dd", "tree", "5", "-3", "--style", "box"])
            .expect("parse");
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Tree { values, style }) => {
                assert_eq!(values, vec![5, -3]);
                assert_eq!(style, Some(TreeStyle::Box));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
