use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use litreview::config::SiteConfig;
use litreview::server::{self, Site};
use litreview::{bibtex, export, loader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "litreview",
    version,
    about = "Literature review site: serve, export and build taxonomies"
)]
struct Cli {
    /// Site configuration file (default: ./litreview.toml if present)
    #[arg(long, global = true, env = "LITREVIEW_CONFIG", value_name = "litreview.toml")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the site
    Serve(SiteArgs),
    /// Write the site as static files
    ///
    /// Pages link to each other and to the assets with relative links, so
    /// the output directory works from disk or under any path on a web
    /// server. `--context` has no effect on the written files.
    Render {
        /// Output directory
        #[arg(short, long, default_value = "site")]
        out: PathBuf,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Build taxonomy JSON files from BibTeX citations
    Build {
        #[arg(long, default_value = "citations")]
        citations: PathBuf,
        #[arg(long, default_value = "taxonomies")]
        output: PathBuf,
    },
    /// Create the citation folder for every category
    Setup {
        #[arg(long, default_value = "citations")]
        citations: PathBuf,
    },
}

#[derive(Args)]
struct SiteArgs {
    /// The port to run the server on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
    /// The path the site is served under, e.g., /review
    #[arg(short, long)]
    context: Option<String>,
    /// Directory holding the taxonomy JSON files
    #[arg(long, value_name = "DIR")]
    taxonomy_dir: Option<PathBuf>,
    /// Fetch taxonomy files from this URL instead of a directory
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Authors shown on a card before "et al."
    #[arg(long)]
    max_authors: Option<usize>,
}

impl SiteArgs {
    fn apply(self, mut config: SiteConfig) -> SiteConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(context) = self.context {
            config.context = context;
        }
        if let Some(dir) = self.taxonomy_dir {
            config.taxonomy_dir = dir;
        }
        if self.base_url.is_some() {
            config.base_url = self.base_url;
        }
        if let Some(max) = self.max_authors {
            config.max_authors = max;
        }
        config
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "litreview=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => {
            let config = args.apply(SiteConfig::load(cli.config.as_deref())?);
            tracing::info!(
                port = config.port,
                documents = config.taxonomies.len(),
                "starting server"
            );
            let site = Site::from_config(config)?;
            server::rocket(site)
                .launch()
                .await
                .map_err(|e| anyhow::anyhow!("server failed: {}", e))?;
        }
        Command::Render { out, site } => {
            let config = site.apply(SiteConfig::load(cli.config.as_deref())?);
            let source = config.source()?;
            let report = loader::load_all(source.as_ref(), &config.taxonomies).await;
            let summary = export::export_site(&config, &report, &out)?;
            println!(
                "Wrote {} pages to {} ({} papers in {} categories)",
                summary.pages,
                out.display(),
                summary.totals.papers,
                summary.totals.categories
            );
        }
        Command::Build { citations, output } => {
            let stats = bibtex::build_all(&citations, &output).with_context(|| {
                format!("could not build taxonomies from {}", citations.display())
            })?;
            println!("{}", "=".repeat(60));
            for (category, count) in &stats {
                println!("  {:30} {:3} papers", category, count);
            }
            println!("{}", "=".repeat(60));
            println!("  {:30} {:3} papers", "TOTAL", stats.values().sum::<usize>());
            println!("Taxonomy files saved to: {}/", output.display());
        }
        Command::Setup { citations } => {
            let report = bibtex::setup(&citations)?;
            for slug in &report.created {
                println!("  {:30} (created)", slug);
            }
            for slug in &report.existing {
                println!("  {:30} (already exists)", slug);
            }
            println!(
                "Created: {}, existing: {}, total: {}",
                report.created.len(),
                report.existing.len(),
                report.created.len() + report.existing.len()
            );
        }
    }
    Ok(())
}
