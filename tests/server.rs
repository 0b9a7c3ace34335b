//! End-to-end checks against the rocket server using a temporary taxonomy directory.

use std::fs;

use litreview::config::SiteConfig;
use litreview::server::{self, Site};
use rocket::http::Status;
use rocket::local::asynchronous::Client;
use tempfile::TempDir;

fn write_taxonomies() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.json"),
        r#"{
            "category": "Data Balancing",
            "description": "Resampling and synthetic data",
            "papers": [
                {"title": "SMOTE", "authors": "Chawla and Bowyer and Hall and Kegelmeyer",
                 "year": 2002, "venue": "JAIR", "abstract": "Synthetic minority over-sampling.",
                 "bibtex": "@article{chawla2002smote,}"},
                {"title": "ADASYN", "authors": "He and Bai", "year": "2008"}
            ]
        }"#,
    )
    .unwrap();
    fs::write(dir.path().join("b.json"), "{ this is not json").unwrap();
    fs::write(
        dir.path().join("c.json"),
        r#"{"category": "Loss Functions", "papers": [{"title": "Focal Loss", "authors": "Lin", "year": 2017}]}"#,
    )
    .unwrap();
    dir
}

fn config(dir: &TempDir) -> SiteConfig {
    SiteConfig {
        title: "Test Review".to_string(),
        taxonomies: vec!["a.json".into(), "b.json".into(), "c.json".into()],
        taxonomy_dir: dir.path().to_path_buf(),
        ..SiteConfig::default()
    }
}

async fn client(dir: &TempDir) -> Client {
    let site = Site::from_config(config(dir)).unwrap();
    Client::tracked(server::rocket(site)).await.unwrap()
}

#[rocket::async_test]
async fn index_lists_loaded_sections_in_order() {
    let dir = write_taxonomies();
    let client = client(&dir).await;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();

    assert!(body.contains(r#"<span id="total-papers">3</span>"#));
    assert!(body.contains(r#"<span id="total-categories">2</span>"#));
    let a = body.find("Data Balancing").unwrap();
    let c = body.find("Loss Functions").unwrap();
    assert!(a < c);
    assert!(body.contains("2 papers"));
    assert!(body.contains("Chawla, Bowyer, Hall, et al."));
    assert!(body.contains("b.json"));
    assert!(!body.contains("paper-modal"));
    assert!(!body.contains("undefined"));
}

#[rocket::async_test]
async fn paper_route_opens_the_overlay() {
    let dir = write_taxonomies();
    let client = client(&dir).await;

    let response = client.get("/paper/0/0").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();

    assert!(body.contains(r#"class="modal-open""#));
    assert!(body.contains("Chawla, Bowyer, Hall, Kegelmeyer"));
    assert!(body.contains(r#"<span id="modal-venue">JAIR</span>"#));
    assert!(body.contains("Synthetic minority over-sampling."));

    let body = client.get("/paper/0/1").dispatch().await.into_string().await.unwrap();
    assert!(body.contains(r#"<span id="modal-venue"></span>"#));
    assert!(body.contains("Abstract not available."));
    assert!(body.contains("BibTeX not available."));
}

#[rocket::async_test]
async fn unknown_paper_is_not_found() {
    let dir = write_taxonomies();
    let client = client(&dir).await;

    assert_eq!(client.get("/paper/2/0").dispatch().await.status(), Status::NotFound);
    assert_eq!(client.get("/paper/1/5").dispatch().await.status(), Status::NotFound);
}

#[rocket::async_test]
async fn reload_recomputes_counts() {
    let dir = write_taxonomies();
    let client = client(&dir).await;

    fs::write(
        dir.path().join("b.json"),
        r#"{"category": "Neural Architecture", "papers": [{"title": "X", "authors": "Y"}]}"#,
    )
    .unwrap();
    let response = client.get("/reload").dispatch().await;
    assert_eq!(response.status(), Status::SeeOther);

    let summary: serde_json::Value = client
        .get("/api/summary")
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(summary["totals"]["categories"], 3);
    assert_eq!(summary["totals"]["papers"], 4);
    assert_eq!(summary["categories"][1], "Neural Architecture");
    assert_eq!(summary["failures"].as_array().unwrap().len(), 0);
}

#[rocket::async_test]
async fn assets_are_served() {
    let dir = write_taxonomies();
    let client = client(&dir).await;

    let script = client.get("/assets/modal.js").dispatch().await;
    assert_eq!(script.status(), Status::Ok);
    assert!(script.into_string().await.unwrap().contains("Escape"));
    assert_eq!(client.get("/assets/site.css").dispatch().await.status(), Status::Ok);
}

#[rocket::async_test]
async fn bare_context_is_mounted_under_a_slash() {
    let dir = write_taxonomies();
    let site = Site::from_config(SiteConfig {
        context: "review".to_string(),
        ..config(&dir)
    })
    .unwrap();
    let client = Client::tracked(server::rocket(site)).await.unwrap();

    let response = client.get("/review/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();
    assert!(body.contains(r#"href="/review/paper/0/1""#));
    assert!(body.contains(r#"href="/review/assets/site.css""#));
    assert_eq!(client.get("/paper/0/0").dispatch().await.status(), Status::NotFound);
    assert_eq!(client.get("/review/paper/0/0").dispatch().await.status(), Status::Ok);
}

#[test]
fn unusable_settings_are_rejected_before_launch() {
    let dir = write_taxonomies();
    let url_context = SiteConfig {
        context: "http://example.com/review".to_string(),
        ..config(&dir)
    };
    assert!(Site::from_config(url_context).is_err());

    let no_authors = SiteConfig {
        max_authors: 0,
        ..config(&dir)
    };
    assert!(Site::from_config(no_authors).is_err());
}
