//! Site configuration: an optional TOML file, overridden by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::categories;
use crate::error::{Error, Result};
use crate::loader::{DirectorySource, HttpSource, TaxonomySource};
use crate::render::{LinkStyle, Renderer, SearchEndpoint, DEFAULT_MAX_AUTHORS, DEFAULT_SEARCH_URL};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "litreview.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Page heading and document title.
    pub title: String,
    /// Path prefix the site is served under, e.g. `/review`.
    pub context: String,
    /// Taxonomy document names, in display order.
    pub taxonomies: Vec<String>,
    pub taxonomy_dir: PathBuf,
    /// When set, documents are fetched from `<base_url>/<name>` instead of `taxonomy_dir`.
    pub base_url: Option<String>,
    pub max_authors: usize,
    pub search_url: String,
    pub port: u16,
    pub address: String,
    pub user_agent: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            title: "Long-Tailed Learning in Healthcare".to_string(),
            context: String::new(),
            taxonomies: categories::default_documents(),
            taxonomy_dir: PathBuf::from("taxonomies"),
            base_url: None,
            max_authors: DEFAULT_MAX_AUTHORS,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            port: 8000,
            address: "127.0.0.1".to_string(),
            user_agent: None,
        }
    }
}

impl SiteConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<SiteConfig> {
        toml::from_str(text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`; with no explicit path, a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<SiteConfig> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !path.exists() {
            tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(SiteConfig::default());
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::io(format!("could not read {}", path.display()), e))?;
        SiteConfig::from_toml(&text, &path)
    }

    /// The context as a mount path: a leading slash and no trailing one,
    /// or empty for the root. `review` becomes `/review`.
    pub fn normalized_context(&self) -> Result<String> {
        let trimmed = self.context.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Ok(String::new());
        }
        let invalid = |message: &str| Error::Setting {
            key: "context",
            message: format!("{:?} {}", self.context, message),
        };
        if trimmed.contains("://") {
            return Err(invalid("is a URL, expected a path such as /review"));
        }
        if let Some(c) = trimmed
            .chars()
            .find(|&c| c.is_whitespace() || matches!(c, '?' | '#' | '<' | '>' | '%' | '\\'))
        {
            return Err(invalid(&format!("contains {:?}", c)));
        }
        if trimmed
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(invalid("has an empty or relative segment"));
        }
        Ok(format!("/{}", trimmed))
    }

    pub fn renderer(&self) -> Result<Renderer> {
        if self.max_authors == 0 {
            return Err(Error::Setting {
                key: "max_authors",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(Renderer {
            max_authors: self.max_authors,
            search: SearchEndpoint::new(self.search_url.clone()),
            context: self.normalized_context()?,
            links: LinkStyle::Routed,
        })
    }

    pub fn source(&self) -> Result<Box<dyn TaxonomySource>> {
        match &self.base_url {
            Some(url) => Ok(Box::new(HttpSource::new(url, self.user_agent.as_deref())?)),
            None => Ok(Box::new(DirectorySource::new(self.taxonomy_dir.clone()))),
        }
    }
}
