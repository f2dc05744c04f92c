//! Boundary to an external markup importer.

use blockforge_document::{Node, Variable};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Tree fragment produced by an importer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub css_classes: IndexSet<String>,
}

/// Converts source markup into a [`Fragment`]
pub trait HtmlImporter {
    type Error: std::fmt::Display;

    fn import(&self, source: &str) -> Result<Fragment, Self::Error>;
}

impl<F, E> HtmlImporter for F
where
    F: Fn(&str) -> Result<Fragment, E>,
    E: std::fmt::Display,
{
    type Error = E;

    fn import(&self, source: &str) -> Result<Fragment, E> {
        self(source)
    }
}

/// Importer that always yields an empty fragment, so every import takes the raw-html fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct RawHtmlImporter;

impl HtmlImporter for RawHtmlImporter {
    type Error = std::convert::Infallible;

    fn import(&self, _source: &str) -> Result<Fragment, Self::Error> {
        Ok(Fragment::default())
    }
}
