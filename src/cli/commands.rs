//! Command dispatch: builds the containers from command-line values and
//! prints what they hold.

use std::fmt::Display;
use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings, TreeStyle};
use crate::domain::{DynamicArray, OrderedTree, TreeDisplay};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    match command {
        Commands::Array { values, indices } => {
            let settings = Settings::load(cli.config_file.as_deref())?;
            cmd_array(values, indices, &settings)
        }
        Commands::Tree { values, style } => {
            let settings = Settings::load(cli.config_file.as_deref())?;
            cmd_tree(values, *style, &settings)
        }
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            eprintln!("Generating completion file for {shell:?}...");
            generate(*shell, &mut cmd, "gencoll", &mut io::stdout());
            Ok(())
        }
    }
}

/// Dynamic array holding `values` in order, starting at `initial_capacity`.
pub fn build_array(values: &[String], initial_capacity: usize) -> DynamicArray<String> {
    let mut array = DynamicArray::with_capacity(initial_capacity);
    array.extend(values.iter().cloned());
    array
}

/// Deepest tree the CLI draws; deeper trees get the in-order listing only.
pub const MAX_RENDER_DEPTH: usize = 512;

/// Drawing of `tree` in `style`, or `None` when it is deeper than
/// [`MAX_RENDER_DEPTH`].
pub fn render_tree<T: Display>(
    tree: &OrderedTree<T>,
    style: TreeStyle,
    indent: usize,
) -> Option<String> {
    if tree.depth() > MAX_RENDER_DEPTH {
        return None;
    }
    let rendered = match style {
        TreeStyle::Indent => tree.pretty_print_with(indent),
        TreeStyle::Box => tree.to_termtree().to_string(),
    };
    Some(rendered.trim_end().to_string())
}

/// Drains a fresh traversal with `has_next`/`try_next`.
pub fn traverse<T: Clone>(tree: &OrderedTree<T>) -> CliResult<Vec<T>> {
    let mut iter = tree.iter();
    let mut values = Vec::with_capacity(tree.len());
    while iter.has_next() {
        let value = iter.try_next().map_err(ApplicationError::from)?;
        values.push(value.clone());
    }
    Ok(values)
}

#[instrument(skip(settings))]
fn cmd_array(values: &[String], indices: &[i64], settings: &Settings) -> CliResult<()> {
    let array = build_array(values, settings.array.initial_capacity);
    debug!(size = array.size(), capacity = array.capacity(), "array built");

    output::header("Dynamic array");
    output::detail(&format!("size:     {}", array.size()));
    output::detail(&format!("capacity: {}", array.capacity()));
    output::detail(&format!("elements: {}", array));

    let mut failed = 0;
    for &index in indices {
        match array.get_signed(index) {
            Ok(value) => output::success_detail(&format!("[{index}] = {value}")),
            Err(e) => {
                failed += 1;
                output::failure(&e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Lookups {
            failed,
            total: indices.len(),
        });
    }
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_tree(values: &[i64], style: Option<TreeStyle>, settings: &Settings) -> CliResult<()> {
    let tree: OrderedTree<i64> = values.iter().copied().collect();
    let style = style.unwrap_or(settings.tree.style);
    debug!(len = tree.len(), ?style, "tree built");

    let depth = tree.depth();
    output::header("Ordered tree");
    if tree.is_empty() {
        output::detail("(empty)");
    } else {
        match render_tree(&tree, style, settings.tree.indent) {
            Some(rendered) => output::info(&rendered),
            None => output::warning(&format!(
                "depth {depth} exceeds {MAX_RENDER_DEPTH}, skipping drawing"
            )),
        }
    }

    let in_order = traverse(&tree)?;
    output::action("in-order", &in_order.iter().join(" "));
    output::detail(&format!("depth:  {depth}"));
    output::detail(&format!("leaves: {}", tree.leaves().iter().join(" ")));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config_file.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_values_when_building_array_then_capacity_from_settings() {
        let values: Vec<String> = ["Apple", "Banana", "Cherry"].map(String::from).to_vec();
        let array = build_array(&values, 2);
        assert_eq!(array.capacity(), 4);
        assert_eq!(array.to_string(), "Apple Banana Cherry");
    }

    #[test]
    fn given_tree_when_traversing_then_in_order() {
        let tree: OrderedTree<i64> = [5, 3, 7, 2, 4, 6, 8].into_iter().collect();
        assert_eq!(traverse(&tree).expect("traverse"), vec![2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn given_bad_index_when_running_array_then_lookup_error() {
        let values = vec!["a".to_string()];
        let err = cmd_array(&values, &[0, -1, 1], &Settings::default()).unwrap_err();
        assert!(matches!(err, CliError::Lookups { failed: 2, total: 3 }));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_empty_tree_when_running_tree_then_ok() {
        assert!(cmd_tree(&[], Some(TreeStyle::Box), &Settings::default()).is_ok());
    }

    #[test]
    fn given_shallow_tree_when_rendering_then_drawn_in_style() {
        let tree: OrderedTree<i64> = [5, 3, 7].into_iter().collect();
        assert_eq!(
            render_tree(&tree, TreeStyle::Indent, 4).as_deref(),
            Some("    -> 7\n-> 5\n    -> 3")
        );
        let boxed = render_tree(&tree, TreeStyle::Box, 4).expect("box drawing");
        assert!(boxed.starts_with('5'));
    }

    #[test]
    fn given_sorted_input_deeper_than_limit_when_rendering_then_skipped() {
        let tree: OrderedTree<i64> = (0..=MAX_RENDER_DEPTH as i64).collect();
        assert_eq!(tree.depth(), MAX_RENDER_DEPTH + 1);

        assert_eq!(render_tree(&tree, TreeStyle::Box, 4), None);
        assert_eq!(render_tree(&tree, TreeStyle::Indent, 4), None);
    }

    #[test]
    fn given_long_sorted_input_when_running_tree_then_falls_back_to_listing() {
        let values: Vec<i64> = (1..=5_000).collect();
        for style in [TreeStyle::Box, TreeStyle::Indent] {
            assert!(cmd_tree(&values, Some(style), &Settings::default()).is_ok());
        }
    }
}
