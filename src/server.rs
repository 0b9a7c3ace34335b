use std::sync::RwLock;

use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::response::content::{RawCss, RawHtml, RawJavaScript};
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{get, routes, Build, Rocket, State};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::error::Result;
use crate::loader::{self, LoadFailure, LoadReport, TaxonomySource, Totals};
use crate::modal::ModalController;
use crate::render::{Renderer, Templates};
use crate::resources;

/// Everything the routes share.
pub struct Site {
    config: SiteConfig,
    renderer: Renderer,
    templates: Templates,
    source: Box<dyn TaxonomySource>,
    report: RwLock<LoadReport>,
}

type Failure = (Status, String);
type Reply<T> = std::result::Result<T, Failure>;

fn poisoned<T>(_: T) -> Failure {
    (Status::InternalServerError, "Restart server!".to_string())
}

impl Site {
    /// Fails when the configured context or author limit is unusable.
    pub fn new(config: SiteConfig, source: Box<dyn TaxonomySource>) -> Result<Site> {
        Ok(Site {
            renderer: config.renderer()?,
            templates: Templates::new()?,
            config,
            source,
            report: RwLock::new(LoadReport::default()),
        })
    }

    pub fn from_config(config: SiteConfig) -> Result<Site> {
        let source = config.source()?;
        Site::new(config, source)
    }

    /// Runs a fresh load pass and replaces the current report.
    pub async fn reload(&self) -> Reply<Totals> {
        let report = loader::load_all(self.source.as_ref(), &self.config.taxonomies).await;
        let totals = report.totals();
        *self.report.write().map_err(poisoned)? = report;
        Ok(totals)
    }

    fn render(&self, modal: &ModalController) -> Reply<RawHtml<String>> {
        let report = self.report.read().map_err(poisoned)?;
        let page = self.renderer.page(&self.config.title, &report, modal);
        self.templates
            .render_page(&page)
            .map(RawHtml)
            .map_err(|e| {
                tracing::error!("could not render page: {}", e);
                (Status::InternalServerError, e.to_string())
            })
    }
}

#[get("/")]
fn index(site: &State<Site>) -> Reply<RawHtml<String>> {
    site.render(&ModalController::new())
}

#[get("/paper/<section>/<item>")]
fn paper(site: &State<Site>, section: usize, item: usize) -> Reply<RawHtml<String>> {
    let event = {
        let report = site.report.read().map_err(poisoned)?;
        let doc = report
            .documents()
            .nth(section)
            .ok_or_else(|| (Status::NotFound, format!("No section {}", section)))?;
        let record = doc
            .papers
            .get(item)
            .ok_or_else(|| {
                (Status::NotFound, format!("No paper {} in section {}", item, section))
            })?;
        site.renderer.card(section, item, record).details()
    };
    let mut modal = ModalController::new();
    modal.dispatch(event);
    site.render(&modal)
}

#[get("/reload")]
async fn reload(site: &State<Site>) -> Reply<Redirect> {
    site.reload().await?;
    Ok(Redirect::to(site.renderer.home_href()))
}

#[derive(Serialize)]
struct Summary {
    totals: Totals,
    categories: Vec<String>,
    failures: Vec<LoadFailure>,
}

#[get("/api/summary")]
fn summary(site: &State<Site>) -> Reply<Json<Summary>> {
    let report = site.report.read().map_err(poisoned)?;
    Ok(Json(Summary {
        totals: report.totals(),
        categories: report.documents().map(|d| d.category.clone()).collect(),
        failures: report.failures.clone(),
    }))
}

#[get("/assets/site.css")]
fn stylesheet() -> RawCss<&'static str> {
    RawCss(resources::STYLESHEET)
}

#[get("/assets/modal.js")]
fn modal_script() -> RawJavaScript<&'static str> {
    RawJavaScript(resources::MODAL_SCRIPT)
}

/// Builds the server; the first load pass runs on ignite. The context was
/// validated by `Site::new`, so it is a usable mount path.
pub fn rocket(site: Site) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", site.config.port))
        .merge(("address", site.config.address.clone()));
    let mount_point = if site.renderer.context.is_empty() {
        "/".to_string()
    } else {
        site.renderer.context.clone()
    };
    rocket::custom(figment)
        .manage(site)
        .attach(AdHoc::on_ignite("Load taxonomies", |rocket| async move {
            if let Some(site) = rocket.state::<Site>() {
                if let Err((_, msg)) = site.reload().await {
                    tracing::error!("initial load failed: {}", msg);
                }
            }
            rocket
        }))
        .attach(AdHoc::on_response("Request log", |req, res| {
            Box::pin(async move {
                tracing::debug!(
                    method = %req.method(),
                    uri = %req.uri(),
                    status = res.status().code,
                    "request"
                );
            })
        }))
        .mount(
            mount_point.as_str(),
            routes![index, paper, reload, summary, stylesheet, modal_script],
        )
}
