//! Sequential taxonomy loading.
//!
//! Documents are fetched one at a time in list order. A failed document is
//! logged and skipped; the rest of the pass continues. Totals are derived
//! from the folded outcomes, never kept as separate counters.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use rocket::tokio::fs;
use serde::Serialize;

use crate::error::{Error, LoadError};
use crate::taxonomy::TaxonomyDocument;

const USER_AGENT: &str = "litreview/0.1 (literature review site)";

/// Where taxonomy documents come from.
#[async_trait]
pub trait TaxonomySource: Send + Sync {
    /// Raw bytes of the document called `name`.
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError>;

    /// Human-readable location of `name`, for diagnostics.
    fn locate(&self, name: &str) -> String;
}

/// Reads documents from a local directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySource { root: root.into() }
    }
}

#[async_trait]
impl TaxonomySource for DirectorySource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.root.join(name);
        fs::read(&path)
            .await
            .map_err(|source| LoadError::Io { path, source })
    }

    fn locate(&self, name: &str) -> String {
        self.root.join(name).display().to_string()
    }
}

/// Fetches documents relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, user_agent: Option<&str>) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(USER_AGENT))
            .build()?;
        Ok(HttpSource {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TaxonomySource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(self.locate(name))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    fn locate(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

/// A document that was fetched and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub name: String,
    pub document: TaxonomyDocument,
}

/// A document that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub document: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub categories: usize,
    pub papers: usize,
}

/// Result of one load pass, sections in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub sections: Vec<LoadedDocument>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Fold step: add one outcome to the report.
    pub fn absorb(mut self, outcome: Result<LoadedDocument, LoadFailure>) -> Self {
        match outcome {
            Ok(loaded) => self.sections.push(loaded),
            Err(failure) => self.failures.push(failure),
        }
        self
    }

    pub fn totals(&self) -> Totals {
        Totals {
            categories: self.sections.len(),
            papers: self.sections.iter().map(|s| s.document.paper_count()).sum(),
        }
    }

    pub fn documents(&self) -> impl Iterator<Item = &TaxonomyDocument> {
        self.sections.iter().map(|s| &s.document)
    }
}

/// Fetch and parse a single document.
pub async fn load_one(
    source: &dyn TaxonomySource,
    name: &str,
) -> Result<LoadedDocument, LoadFailure> {
    let parsed = match source.fetch(name).await {
        Ok(bytes) => serde_json::from_slice::<TaxonomyDocument>(&bytes).map_err(LoadError::from),
        Err(e) => Err(e),
    };
    match parsed {
        Ok(document) => {
            tracing::debug!(
                document = name,
                papers = document.paper_count(),
                "loaded taxonomy"
            );
            Ok(LoadedDocument {
                name: name.to_string(),
                document,
            })
        }
        Err(e) => {
            tracing::warn!(
                document = name,
                location = %source.locate(name),
                "skipping taxonomy: {}",
                e
            );
            Err(LoadFailure {
                document: name.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

/// Run a full load pass over `names`, in order.
pub async fn load_all(source: &dyn TaxonomySource, names: &[String]) -> LoadReport {
    let mut outcomes = Vec::with_capacity(names.len());
    for name in names {
        outcomes.push(load_one(source, name).await);
    }
    let report = outcomes
        .into_iter()
        .fold(LoadReport::default(), LoadReport::absorb);

    let totals = report.totals();
    tracing::info!(
        categories = totals.categories,
        papers = totals.papers,
        failed = report.failures.len(),
        "load pass complete"
    );
    report
}
