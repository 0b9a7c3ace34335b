//! Literature review site.
//!
//! Taxonomy documents (one JSON file per research category) are loaded in a
//! fixed order, rendered as sections of paper cards, and served by rocket or
//! exported as static files. Each card opens a detail overlay.
//!
//! - `loader`: sequential load pass, folded into a [`LoadReport`]
//! - `render`: author formatting, citation links, page views and templates
//! - `modal`: the closed/open overlay state machine
//! - `bibtex`: builds taxonomy documents from BibTeX citation folders

pub mod bibtex;
pub mod categories;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod modal;
pub mod render;
mod resources;
pub mod server;
pub mod taxonomy;

pub use config::SiteConfig;
pub use error::{Error, LoadError, Result};
pub use loader::{load_all, LoadReport, TaxonomySource, Totals};
pub use modal::{ModalController, ModalEvent, ModalState};
pub use render::{format_authors, Renderer};
pub use taxonomy::{PaperRecord, TaxonomyDocument, Year};
