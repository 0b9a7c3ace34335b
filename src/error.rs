use std::io;
use std::path::PathBuf;

/// Failure fetching or parsing one taxonomy document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed taxonomy: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced by the site, the exporter and the citation builder.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("could not parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {key}: {message}")]
    Setting { key: &'static str, message: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("could not write json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bibtex pattern did not compile: {0}")]
    Pattern(#[from] regex::Error),

    #[error("could not build http client: {0}")]
    Client(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
