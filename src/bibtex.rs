//! Builds taxonomy documents from folders of BibTeX citations.
//!
//! Layout is `citations/<category-slug>/*.bib`, one entry per file. Each
//! known category becomes `taxonomies/<category-slug>.json`.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};

use crate::categories::{self, CategoryInfo, CATEGORIES};
use crate::error::{Error, Result};
use crate::taxonomy::{PaperRecord, TaxonomyDocument, Year};

/// Compiled field patterns for single BibTeX entries.
pub struct BibtexParser {
    header: Regex,
    title: Regex,
    author: Regex,
    year: Regex,
    journal: Regex,
    booktitle: Regex,
    abstract_field: Regex,
}

fn field(name: &str) -> std::result::Result<Regex, regex::Error> {
    // `(?:^|[^a-z])` keeps `booktitle` from satisfying `title`
    RegexBuilder::new(&format!(r"(?:^|[^a-z]){}\s*=\s*\{{([^}}]+)\}}", name))
        .case_insensitive(true)
        .build()
}

impl BibtexParser {
    pub fn new() -> Result<BibtexParser> {
        Ok(BibtexParser {
            header: Regex::new(r"^@(\w+)\{([^,]+),")?,
            title: field("title")?,
            author: field("author")?,
            year: RegexBuilder::new(r"(?:^|[^a-z])year\s*=\s*\{?(\d{4})\}?")
                .case_insensitive(true)
                .build()?,
            journal: field("journal")?,
            booktitle: field("booktitle")?,
            abstract_field: field("abstract")?,
        })
    }

    fn capture(re: &Regex, text: &str) -> Option<String> {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    /// Extracts the fields of one entry. The trimmed entry text is kept as `bibtex`.
    pub fn parse_entry(&self, content: &str) -> PaperRecord {
        let content = content.trim();
        PaperRecord {
            key: self
                .header
                .captures(content)
                .and_then(|caps| caps.get(2))
                .map(|m| m.as_str().trim().to_string()),
            title: Self::capture(&self.title, content).unwrap_or_default(),
            authors: Self::capture(&self.author, content).unwrap_or_default(),
            year: Self::capture(&self.year, content).map(Year::Text),
            venue: Self::capture(&self.journal, content)
                .or_else(|| Self::capture(&self.booktitle, content)),
            abstract_text: Self::capture(&self.abstract_field, content),
            bibtex: Some(content.to_string()),
        }
    }
}

fn bib_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(folder)
        .map_err(|e| Error::io(format!("could not list {}", folder.display()), e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| Error::io(format!("could not list {}", folder.display()), e))?
            .path();
        if path.extension().map_or(false, |ext| ext == "bib") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads every `.bib` file in `folder`, in file name order.
pub fn build_category(parser: &BibtexParser, folder: &Path) -> Result<TaxonomyDocument> {
    let slug = folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let info = CategoryInfo::for_slug(&slug);
    let files = bib_files(folder)?;
    tracing::info!(category = %info.name, files = files.len(), "processing citations");

    let mut papers = Vec::with_capacity(files.len());
    for file in files {
        let content = fs::read_to_string(&file)
            .map_err(|e| Error::io(format!("could not read {}", file.display()), e))?;
        papers.push(parser.parse_entry(&content));
    }
    Ok(TaxonomyDocument {
        category: info.name,
        description: Some(info.description),
        papers,
    })
}

fn write_document(doc: &TaxonomyDocument, path: &Path) -> Result<()> {
    let f = File::create(path)
        .map_err(|e| Error::io(format!("could not create {}", path.display()), e))?;
    let mut out = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut out, doc)?;
    writeln!(&mut out)
        .and_then(|_| out.flush())
        .map_err(|e| Error::io(format!("could not write {}", path.display()), e))
}

/// Builds one JSON document per known category folder. Returns paper counts by slug.
pub fn build_all(citations_dir: &Path, output_dir: &Path) -> Result<BTreeMap<String, usize>> {
    for dir in [citations_dir, output_dir] {
        fs::create_dir_all(dir)
            .map_err(|e| Error::io(format!("could not create {}", dir.display()), e))?;
    }
    let parser = BibtexParser::new()?;

    let mut folders = Vec::new();
    let entries = fs::read_dir(citations_dir)
        .map_err(|e| Error::io(format!("could not list {}", citations_dir.display()), e))?;
    for entry in entries {
        let path = entry.map_err(|e| Error::io("could not list citations", e))?.path();
        if path.is_dir() {
            folders.push(path);
        }
    }
    folders.sort();

    let mut stats = BTreeMap::new();
    for folder in folders {
        let slug = match folder.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };
        if !categories::is_known(&slug) {
            tracing::debug!(folder = %folder.display(), "skipping unknown category folder");
            continue;
        }
        let doc = build_category(&parser, &folder)?;
        let out = output_dir.join(format!("{}.json", slug));
        write_document(&doc, &out)?;
        tracing::info!(file = %out.display(), papers = doc.paper_count(), "saved taxonomy");
        stats.insert(slug, doc.paper_count());
    }
    Ok(stats)
}

/// Outcome of creating the citation folder tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
    pub created: Vec<String>,
    pub existing: Vec<String>,
}

/// Creates `citations_dir/<slug>` for each known category.
pub fn setup(citations_dir: &Path) -> Result<SetupReport> {
    let mut report = SetupReport::default();
    for (slug, _, _) in CATEGORIES {
        let folder = citations_dir.join(slug);
        if folder.exists() {
            report.existing.push(slug.to_string());
        } else {
            fs::create_dir_all(&folder)
                .map_err(|e| Error::io(format!("could not create {}", folder.display()), e))?;
            report.created.push(slug.to_string());
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"
@article{lin2017focal,
  title={Focal Loss for Dense Object Detection},
  author={Lin, Tsung-Yi and Goyal, Priya and Girshick, Ross},
  journal={IEEE TPAMI},
  year={2017},
  abstract={The highest accuracy object detectors
  are based on a two-stage approach.}
}
"#;

    const PROCEEDINGS: &str = r#"@inproceedings{cui2019,
  booktitle = {CVPR},
  Title = {Class-Balanced Loss Based on Effective Number of Samples},
  Author = {Cui, Yin and Jia, Menglin},
  year = 2019
}"#;

    #[test]
    fn parses_article_fields() {
        let parser = BibtexParser::new().unwrap();
        let paper = parser.parse_entry(ARTICLE);
        assert_eq!(paper.key.as_deref(), Some("lin2017focal"));
        assert_eq!(paper.title, "Focal Loss for Dense Object Detection");
        assert_eq!(paper.authors, "Lin, Tsung-Yi and Goyal, Priya and Girshick, Ross");
        assert_eq!(paper.year, Some(Year::Text("2017".to_string())));
        assert_eq!(paper.venue.as_deref(), Some("IEEE TPAMI"));
        assert!(paper.abstract_text.unwrap().contains("two-stage approach"));
        assert!(paper.bibtex.unwrap().starts_with("@article{lin2017focal,"));
    }

    #[test]
    fn booktitle_is_venue_not_title() {
        let parser = BibtexParser::new().unwrap();
        let paper = parser.parse_entry(PROCEEDINGS);
        assert_eq!(paper.title, "Class-Balanced Loss Based on Effective Number of Samples");
        assert_eq!(paper.venue.as_deref(), Some("CVPR"));
        assert_eq!(paper.year_label(), "2019");
        assert_eq!(paper.abstract_text, None);
    }

    #[test]
    fn builds_known_categories_only() {
        let root = tempfile::tempdir().unwrap();
        let citations = root.path().join("citations");
        let output = root.path().join("taxonomies");
        fs::create_dir_all(citations.join("loss-functions")).unwrap();
        fs::create_dir_all(citations.join("scratch")).unwrap();
        fs::write(citations.join("loss-functions/b.bib"), PROCEEDINGS).unwrap();
        fs::write(citations.join("loss-functions/a.bib"), ARTICLE).unwrap();
        fs::write(citations.join("loss-functions/notes.txt"), "ignore me").unwrap();
        fs::write(citations.join("scratch/x.bib"), ARTICLE).unwrap();

        let stats = build_all(&citations, &output).unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats["loss-functions"], 2);
        assert!(!output.join("scratch.json").exists());
        let text = fs::read_to_string(output.join("loss-functions.json")).unwrap();
        let doc: TaxonomyDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(doc.category, "Loss Functions");
        assert_eq!(doc.papers[0].key.as_deref(), Some("lin2017focal"));
        assert_eq!(doc.papers[1].key.as_deref(), Some("cui2019"));
    }

    #[test]
    fn setup_reports_created_and_existing() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("surveys")).unwrap();

        let report = setup(root.path()).unwrap();
        assert_eq!(report.existing, vec!["surveys"]);
        assert_eq!(report.created.len(), 9);

        let again = setup(root.path()).unwrap();
        assert!(again.created.is_empty());
        assert_eq!(again.existing.len(), 10);
    }
}
