use crate::config::Config;
use anyhow::Result;
use blockforge_document::Document;
use blockforge_editor::layers as layer_rows;
use clap::Args;
use colored::Colorize;
use std::fs;

#[derive(Debug, Args)]
pub struct LayersArgs {
    /// Document file
    pub document: String,

    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn layers(args: LayersArgs, cwd: &str) -> Result<()> {
    let source = fs::read_to_string(Config::resolve(cwd, &args.document))?;
    let document = Document::from_json(&source)?;
    let rows = layer_rows(&document.root);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in rows {
        let mut line = format!("{}{} {}", "  ".repeat(row.depth), row.kind.bold(), row.id.dimmed());
        if !row.content.is_empty() {
            line.push_str(&format!(" \"{}\"", preview(&row.content)));
        }
        if !row.visible {
            line.push_str(&format!(" {}", "hidden".yellow()));
        }
        if row.locked {
            line.push_str(&format!(" {}", "locked".red()));
        }
        println!("{}", line);
    }

    Ok(())
}

/// First line of `content`, at most 40 characters
fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or_default();
    let mut short: String = line.chars().take(40).collect();
    if line.chars().count() > 40 {
        short.push('…');
    }
    short
}
