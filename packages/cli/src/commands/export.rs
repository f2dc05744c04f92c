use crate::config::Config;
use anyhow::{anyhow, Result};
use blockforge_compiler_css::StyleClassCompiler;
use blockforge_compiler_html::compile_to_html;
use blockforge_document::Document;
use clap::Args;
use colored::Colorize;
use std::fs;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Document file
    pub document: String,

    /// Output HTML file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<String>,

    /// Strip whitespace between tags
    #[arg(long)]
    pub minify: bool,

    /// Omit style attributes
    #[arg(long)]
    pub no_inline_styles: bool,

    /// Move inline styles into generated classes and emit their stylesheet
    #[arg(long)]
    pub classes: bool,

    /// Keep the root container wrapper
    #[arg(long)]
    pub include_root: bool,

    /// Template variable value, as name=value
    #[arg(long = "var", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = fs::read_to_string(Config::resolve(cwd, &args.document))?;
    let mut document = Document::from_json(&source)?;

    let mut options = config.export.clone();
    options.minify |= args.minify;
    options.include_root |= args.include_root;
    if args.no_inline_styles {
        options.inline_styles = false;
    }
    options.variable_values.extend(args.vars);

    let stylesheet = if args.classes {
        let mut compiler = StyleClassCompiler::new(config.class_prefix.as_str());
        compiler.compile(&mut document);
        options.inline_styles = false;
        Some(compiler.to_css(options.minify))
    } else {
        None
    };

    let html = compile_to_html(&document, &options);

    match &args.out {
        Some(out) => {
            let path = Config::resolve(cwd, out);
            fs::write(&path, &html)?;
            println!("  {} {} → {}", "✓".green(), args.document, out);
            if let Some(css) = stylesheet {
                let css_path = path.with_extension("css");
                fs::write(&css_path, css)?;
                println!("  {} {} → {}", "✓".green(), args.document, css_path.display());
            }
        }
        None => {
            if let Some(css) = stylesheet {
                println!("<style>\n{}</style>", css);
            }
            println!("{}", html);
        }
    }

    Ok(())
}

fn parse_var(value: &str) -> Result<(String, String)> {
    let (name, value) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("expected name=value, got {:?}", value))?;
    Ok((name.trim().to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var() {
        assert_eq!(
            parse_var("price=10 zł").unwrap(),
            ("price".to_string(), "10 zł".to_string())
        );
        assert_eq!(parse_var("a=b=c").unwrap().1, "b=c");
        assert!(parse_var("missing").is_err());
    }
}
