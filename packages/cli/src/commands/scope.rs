use crate::config::Config;
use anyhow::Result;
use blockforge_compiler_css::{preview_stylesheet, scope_css};
use clap::Args;
use std::fs;
use std::io::Read;

#[derive(Debug, Args)]
pub struct ScopeArgs {
    /// Stylesheet to scope (`-` reads stdin)
    pub css: String,

    /// Container selector (overrides config)
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Prepend a label comment
    #[arg(short, long)]
    pub label: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<String>,
}

pub fn scope(args: ScopeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let selector = args.scope.unwrap_or(config.scope_selector);

    let css = if args.css == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(Config::resolve(cwd, &args.css))?
    };

    let scoped = match &args.label {
        Some(label) => preview_stylesheet(&css, label, &selector),
        None => scope_css(&css, &selector),
    };

    match &args.out {
        Some(out) => fs::write(Config::resolve(cwd, out), scoped)?,
        None => print!("{}", scoped),
    }

    Ok(())
}
