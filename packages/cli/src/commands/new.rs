use crate::config::Config;
use anyhow::{anyhow, Result};
use blockforge_document::Position;
use blockforge_editor::{EditorDocument, Mutation};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Document file to create
    pub path: String,

    /// Element kinds to add to the root, in order
    #[arg(short, long = "kind")]
    pub kinds: Vec<String>,

    /// Force overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn new(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = Config::resolve(cwd, &args.path);

    if path.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let mut doc = EditorDocument::new(config.editor)?;
    for kind in &args.kinds {
        doc.apply(Mutation::AddElement {
            kind: kind.clone(),
            parent_id: None,
            position: Position::End,
        })?;
    }
    doc.save(&path)?;

    println!(
        "  {} Created {} ({} elements)",
        "✓".green(),
        args.path.bright_white(),
        args.kinds.len()
    );

    Ok(())
}
