use std::convert::Infallible;
use std::io::{self, Write};

use crate::models::TreeNode;

const BRANCH: &str = "├─";
const LAST_BRANCH: &str = "└─";
const CONTINUE_INDENT: &str = "│ ";
const LAST_INDENT: &str = "  ";

pub fn write_manifest<W: Write>(writer: &mut W, nodes: &[TreeNode]) -> io::Result<()> {
    walk(nodes, |indent: &str, stem: &str, name: &str| {
        writeln!(writer, "{indent}{stem}{name}")
    })
}

pub fn manifest_lines(nodes: &[TreeNode]) -> Vec<String> {
    let mut lines = Vec::new();
    let Ok(()) = walk(
        nodes,
        |indent: &str, stem: &str, name: &str| -> Result<(), Infallible> {
            lines.push(format!("{indent}{stem}{name}"));
            Ok(())
        },
    );
    lines
}

/// Hand each line to `emit` as (indent, connector, name).
fn walk<E, F>(nodes: &[TreeNode], mut emit: F) -> Result<(), E>
where
    F: FnMut(&str, &str, &str) -> Result<(), E>,
{
    walk_level(nodes, "", &mut emit)
}

fn walk_level<E, F>(nodes: &[TreeNode], indent: &str, emit: &mut F) -> Result<(), E>
where
    F: FnMut(&str, &str, &str) -> Result<(), E>,
{
    for (index, node) in nodes.iter().enumerate() {
        let is_last = index + 1 == nodes.len();
        let stem = if is_last { LAST_BRANCH } else { BRANCH };

        emit(indent, stem, &node.name)?;

        if let Some(children) = node.children.as_deref() {
            let next_indent = if is_last { LAST_INDENT } else { CONTINUE_INDENT };
            walk_level(children, &format!("{indent}{next_indent}"), emit)?;
        }
    }

    Ok(())
}

pub fn render_manifest(nodes: &[TreeNode]) -> String {
    manifest_lines(nodes)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}
