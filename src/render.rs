//! Taxonomy documents to page views, and page views to HTML.
//!
//! View building is pure: it borrows the loaded documents and never
//! modifies them. HTML comes from the embedded handlebars templates.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;
use crate::loader::{LoadFailure, LoadReport, Totals};
use crate::modal::{ModalController, ModalEvent, ModalView};
use crate::resources;
use crate::taxonomy::{PaperRecord, TaxonomyDocument};

pub const DEFAULT_MAX_AUTHORS: usize = 3;
pub const DEFAULT_SEARCH_URL: &str = "https://scholar.google.com/scholar?q={query}";
const AUTHOR_SEPARATOR: &str = " and ";
const ET_AL: &str = "et al.";

/// Shortens a `" and "`-joined author list to at most `max` names.
pub fn format_authors(authors: &str, max: usize) -> String {
    let names: Vec<&str> = authors.split(AUTHOR_SEPARATOR).map(str::trim).collect();
    if names.len() > max {
        format!("{}, {}", names[..max].join(", "), ET_AL)
    } else {
        names.join(", ")
    }
}

pub fn first_author(authors: &str) -> &str {
    authors.split(AUTHOR_SEPARATOR).next().unwrap_or_default().trim()
}

/// External citation search, a URL template with a `{query}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint(String);

impl SearchEndpoint {
    pub fn new(template: impl Into<String>) -> Self {
        SearchEndpoint(template.into())
    }

    pub fn link(&self, title: &str, author: &str, year: &str) -> String {
        let query = format!("{} {} {}", title, author, year);
        self.0.replace("{query}", &urlencoding::encode(&query))
    }
}

impl Default for SearchEndpoint {
    fn default() -> Self {
        SearchEndpoint::new(DEFAULT_SEARCH_URL)
    }
}

/// How details links are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// `/paper/<section>/<index>`, answered by the server.
    Routed,
    /// `paper/<section>/<index>.html`, written by the exporter. Links are
    /// relative to a page `depth` directories below the site root.
    StaticFiles { depth: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct CardView<'a> {
    pub title: &'a str,
    pub authors: String,
    pub year: String,
    pub venue: Option<&'a str>,
    pub search_url: String,
    pub details_href: String,
    #[serde(skip)]
    record: &'a PaperRecord,
}

impl CardView<'_> {
    /// The details trigger: a typed event carrying the whole record.
    pub fn details(&self) -> ModalEvent {
        ModalEvent::Details(Box::new(self.record.clone()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView<'a> {
    pub anchor: String,
    pub category: &'a str,
    pub description: Option<&'a str>,
    pub count_label: String,
    pub cards: Vec<CardView<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    pub title: &'a str,
    pub home: String,
    /// Prefix for asset links, ending in `/`.
    pub assets: String,
    pub totals: Totals,
    pub sections: Vec<SectionView<'a>>,
    pub failures: &'a [LoadFailure],
    pub modal: Option<ModalView>,
    pub scroll_locked: bool,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    pub max_authors: usize,
    pub search: SearchEndpoint,
    pub context: String,
    pub links: LinkStyle,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer {
            max_authors: DEFAULT_MAX_AUTHORS,
            search: SearchEndpoint::default(),
            context: String::new(),
            links: LinkStyle::Routed,
        }
    }
}

impl Renderer {
    pub fn with_links(&self, links: LinkStyle) -> Renderer {
        Renderer {
            links,
            ..self.clone()
        }
    }

    fn root(&self) -> String {
        match self.links {
            LinkStyle::Routed => format!("{}/", self.context),
            LinkStyle::StaticFiles { depth } => "../".repeat(depth),
        }
    }

    pub fn home_href(&self) -> String {
        match self.links {
            LinkStyle::Routed => self.root(),
            LinkStyle::StaticFiles { .. } => format!("{}index.html", self.root()),
        }
    }

    pub fn assets_href(&self) -> String {
        format!("{}assets/", self.root())
    }

    pub fn details_href(&self, section: usize, index: usize) -> String {
        match self.links {
            LinkStyle::Routed => format!("{}paper/{}/{}", self.root(), section, index),
            LinkStyle::StaticFiles { .. } => {
                format!("{}paper/{}/{}.html", self.root(), section, index)
            }
        }
    }

    pub fn card<'a>(&self, section: usize, index: usize, paper: &'a PaperRecord) -> CardView<'a> {
        let year = paper.year_label();
        CardView {
            title: &paper.title,
            authors: format_authors(&paper.authors, self.max_authors),
            search_url: self.search.link(&paper.title, first_author(&paper.authors), &year),
            year,
            venue: paper.venue(),
            details_href: self.details_href(section, index),
            record: paper,
        }
    }

    pub fn section<'a>(&self, index: usize, doc: &'a TaxonomyDocument) -> SectionView<'a> {
        SectionView {
            anchor: format!("section-{}", index),
            category: &doc.category,
            description: doc.description(),
            count_label: format!("{} papers", doc.paper_count()),
            cards: doc
                .papers
                .iter()
                .enumerate()
                .map(|(i, paper)| self.card(index, i, paper))
                .collect(),
        }
    }

    pub fn page<'a>(
        &self,
        title: &'a str,
        report: &'a LoadReport,
        modal: &ModalController,
    ) -> PageView<'a> {
        PageView {
            title,
            home: self.home_href(),
            assets: self.assets_href(),
            totals: report.totals(),
            sections: report
                .documents()
                .enumerate()
                .map(|(i, doc)| self.section(i, doc))
                .collect(),
            failures: &report.failures,
            modal: modal.view(),
            scroll_locked: modal.scroll_locked(),
        }
    }
}

#[derive(Serialize)]
struct Layout<'a> {
    title: &'a str,
    assets: &'a str,
    body: String,
    scroll_locked: bool,
}

/// The registered page templates.
pub struct Templates {
    handlebars: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Templates> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("layout", resources::LAYOUT)?;
        handlebars.register_template_string("index", resources::INDEX)?;
        Ok(Templates { handlebars })
    }

    pub fn render_page(&self, page: &PageView<'_>) -> Result<String> {
        let body = self.handlebars.render("index", page)?;
        let html = self.handlebars.render(
            "layout",
            &Layout {
                title: page.title,
                assets: &page.assets,
                body,
                scroll_locked: page.scroll_locked,
            },
        )?;
        Ok(html)
    }
}
