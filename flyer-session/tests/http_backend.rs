//! HttpBackend against a mockito server.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use flyer_core::{FlyerConfig, Template, TemplateId};
use flyer_session::{CatalogReader, HttpBackend, Session, SessionError, SessionState};

fn config_for(server: &ServerGuard) -> FlyerConfig {
    FlyerConfig {
        api_base: format!("{}/api", server.url()),
        timeout_secs: 5,
        ..FlyerConfig::default()
    }
}

#[tokio::test]
async fn catalog_is_fetched_and_parsed() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/flyer-templates")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"t1","name":"Lakeside","description":"d","preview":"p.png","placeholders":["CTA","Image_1"]},{"id":"t2","name":"Plain"}]"#,
        )
        .create_async()
        .await;

    let snapshot = CatalogReader::new(HttpBackend::new(&config_for(&server))).read().await;
    mock.assert_async().await;

    assert!(snapshot.is_available());
    assert_eq!(snapshot.templates.len(), 2);
    assert!(snapshot.find(&TemplateId::from("t2")).is_some_and(|t| t.placeholders.is_none()));
}

#[tokio::test]
async fn malformed_schema_does_not_sink_the_catalog() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/flyer-templates")
        .with_status(200)
        .with_body(r#"[{"id":"a","name":"A","placeholders":"CTA"},{"id":"b","name":"B"}]"#)
        .create_async()
        .await;

    let snapshot = CatalogReader::new(HttpBackend::new(&config_for(&server))).read().await;
    assert!(snapshot.is_available());
    assert_eq!(snapshot.templates.len(), 2);

    let mut session = Session::default();
    session.select(snapshot.templates[0].clone());
    assert_eq!(session.schema().len(), 13, "rejected list falls back to the default");
}

#[tokio::test]
async fn generation_posts_template_id_and_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate-flyer")
        .match_body(Matcher::Json(json!({
            "templateId": "T1",
            "params": { "Property_Description": "Lake house", "Image_1": "" }
        })))
        .with_status(200)
        .with_body("<div>flyer</div>")
        .create_async()
        .await;
    let backend = HttpBackend::new(&config_for(&server));

    let mut session = Session::default();
    session.select(Template::new("T1", "T1").with_placeholders(["Property_Description", "Image_1"]));
    session.set_field("Property_Description", "Lake house");
    let preview = session.generate(&backend).await.expect("generate");
    assert_eq!(preview.markup.as_raw(), "<div>flyer</div>");
    mock.assert_async().await;
}

#[tokio::test]
async fn numeric_template_ids_round_trip_unchanged() {
    let mut server = Server::new_async().await;
    let _catalog = server
        .mock("GET", "/api/flyer-templates")
        .with_status(200)
        .with_body(r#"[{"id":1,"name":"One","placeholders":["CTA"]},{"id":2,"name":"Two"}]"#)
        .create_async()
        .await;
    let generate = server
        .mock("POST", "/api/generate-flyer")
        .match_body(Matcher::Json(json!({ "templateId": 1, "params": { "CTA": "Call now" } })))
        .with_status(200)
        .with_body("<p>one</p>")
        .create_async()
        .await;
    let backend = HttpBackend::new(&config_for(&server));

    let snapshot = CatalogReader::new(backend.clone()).read().await;
    assert!(snapshot.is_available(), "{:?}", snapshot.unavailable);
    let one = snapshot.find(&TemplateId::Number(1)).cloned().expect("template 1");

    let mut session = Session::default();
    session.select(one);
    session.set_field("CTA", "Call now");
    session.generate(&backend).await.expect("generate");
    generate.assert_async().await;
}

#[tokio::test]
async fn server_error_returns_session_to_selected() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate-flyer")
        .with_status(500)
        .with_body("template exploded")
        .create_async()
        .await;
    let backend = HttpBackend::new(&config_for(&server));

    let mut session = Session::default();
    session.select(Template::new("T2", "T2"));
    session.set_field("CTA", "Call now");
    let err = session.generate(&backend).await.unwrap_err();

    match err {
        SessionError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "template exploded");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.state(), SessionState::TemplateSelected);
    assert_eq!(session.field("CTA"), "Call now");
}
