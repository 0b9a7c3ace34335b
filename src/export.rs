//! Writes the site as static files: the index, one page per paper with the
//! overlay open, and the assets.
//!
//! Links between the written pages are relative, so the output can be
//! opened from disk or copied under any path on a web server.

use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::loader::{LoadReport, Totals};
use crate::modal::ModalController;
use crate::render::{LinkStyle, Templates};
use crate::resources;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub pages: usize,
    pub totals: Totals,
}

fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::io(format!("could not create {}", parent.display()), e))?;
    }
    fs::write(path, contents)
        .map_err(|e| Error::io(format!("could not write {}", path.display()), e))
}

pub fn export_site(
    config: &SiteConfig,
    report: &LoadReport,
    out_dir: &Path,
) -> Result<ExportSummary> {
    let base = config.renderer()?;
    let templates = Templates::new()?;

    let root = base.with_links(LinkStyle::StaticFiles { depth: 0 });
    let page = root.page(&config.title, report, &ModalController::new());
    write(&out_dir.join("index.html"), &templates.render_page(&page)?)?;

    // paper/<section>/<index>.html sits two directories below the root
    let renderer = base.with_links(LinkStyle::StaticFiles { depth: 2 });
    let mut pages = 1;

    for (s, doc) in report.documents().enumerate() {
        for (i, paper) in doc.papers.iter().enumerate() {
            let mut modal = ModalController::new();
            modal.dispatch(renderer.card(s, i, paper).details());
            let page = renderer.page(&config.title, report, &modal);
            let path = out_dir.join("paper").join(s.to_string()).join(format!("{}.html", i));
            write(&path, &templates.render_page(&page)?)?;
            pages += 1;
        }
    }

    write(&out_dir.join("assets/site.css"), resources::STYLESHEET)?;
    write(&out_dir.join("assets/modal.js"), resources::MODAL_SCRIPT)?;

    tracing::info!(dir = %out_dir.display(), pages, "exported site");
    Ok(ExportSummary {
        pages,
        totals: report.totals(),
    })
}
