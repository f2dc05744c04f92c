use crate::config::Config;
use anyhow::{Context, Result};
use blockforge_editor::{EditorDocument, EditorError, Mutation};
use clap::Args;
use colored::Colorize;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Document file
    pub document: String,

    /// JSON file holding one mutation or a list of mutations
    pub mutations: String,

    /// Write the result here instead of back to the document
    #[arg(short, long)]
    pub out: Option<String>,

    /// Undo this many steps after applying
    #[arg(long, default_value = "0")]
    pub undo: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MutationFile {
    Many(Vec<Mutation>),
    One(Mutation),
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let doc_path = Config::resolve(cwd, &args.document);
    let mut doc = EditorDocument::load(&doc_path, config.editor)
        .with_context(|| format!("loading {}", doc_path.display()))?;

    let source = fs::read_to_string(Config::resolve(cwd, &args.mutations))?;
    let mutations = match serde_json::from_str::<MutationFile>(&source)
        .with_context(|| format!("parsing {}", args.mutations))?
    {
        MutationFile::Many(list) => list,
        MutationFile::One(mutation) => vec![mutation],
    };

    let mut changed = 0;
    let mut rejected = 0;
    for mutation in mutations {
        let op = mutation.name();
        match doc.apply(mutation) {
            Ok(result) => {
                if result.changed {
                    changed += 1;
                }
                if let Some(id) = result.created_id {
                    println!("  {} {} → {}", "✓".green(), op, id.cyan());
                }
            }
            Err(err @ (EditorError::InvalidMove(_) | EditorError::Locked(_))) => {
                rejected += 1;
                println!("  {} {} - {}", "⚠️".yellow(), op, err.to_string().yellow());
            }
            Err(err) => return Err(err.into()),
        }
    }

    for _ in 0..args.undo {
        if !doc.undo()? {
            break;
        }
    }

    let out_path = match &args.out {
        Some(out) => Config::resolve(cwd, out),
        None => doc_path,
    };
    doc.save(&out_path)?;

    println!();
    if rejected == 0 {
        println!("{} {} mutations changed the document", "✅".green(), changed);
    } else {
        println!(
            "{} {} mutations changed the document, {} rejected",
            "⚠️".yellow(),
            changed,
            rejected
        );
    }

    Ok(())
}
