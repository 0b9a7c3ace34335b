use std::fmt;

use serde::{Deserialize, Serialize};

/// One research category and its papers, as stored in a taxonomy JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyDocument {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub papers: Vec<PaperRecord>,
}

/// A bibliographic entry. Every field but the title and authors may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Citation key, when the document was built from BibTeX.
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub title: String,
    /// Author names joined by the literal separator `" and "`.
    #[serde(default)]
    pub authors: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bibtex: Option<String>,
}

/// Publication year: hand-authored files use numbers, generated ones strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => f.write_str(s),
        }
    }
}

impl TaxonomyDocument {
    pub fn paper_count(&self) -> usize {
        self.papers.len()
    }

    /// The description, unless it is missing or blank.
    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }
}

impl PaperRecord {
    pub fn year_label(&self) -> String {
        self.year.as_ref().map(Year::to_string).unwrap_or_default()
    }

    pub fn venue(&self) -> Option<&str> {
        non_blank(self.venue.as_deref())
    }

    pub fn abstract_text(&self) -> Option<&str> {
        non_blank(self.abstract_text.as_deref())
    }

    pub fn bibtex(&self) -> Option<&str> {
        non_blank(self.bibtex.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
