use archive_ui::controller::{
    CATEGORY_NAME_FIELD, DESCRIPTION_FIELD, DOCUMENT_NAME_FIELD, ELEMENT_FIELD, GENERIC_ERROR,
    LARGE_FIELD, PASSWORD_FIELD, PROPERTY_NAME_FIELD, SMALL_FIELD, WRONG_PASSWORD,
};
use archive_ui::{ApiClient, Controller, Page, PageEvent, RecordingPage, Session};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header::COOKIE},
    routing::post,
    Form, Json, Router,
};
use reqwest::Url;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::process::Command;
use std::sync::Arc;
use tokio::sync::Mutex;

const PASSWORD: &str = "open-sesame";

#[derive(Debug, Clone)]
struct Call {
    path: String,
    cookie: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct Stub {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Stub {
    async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, uri: &Uri, headers: &HeaderMap, body: Value) -> Call {
        let call = Call {
            path: uri.path().to_string(),
            cookie: headers
                .get(COOKIE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            body,
        };
        self.calls.lock().await.push(call.clone());
        call
    }
}

fn authorized(call: &Call) -> bool {
    call.cookie.as_deref() == Some(format!("password={PASSWORD}").as_str())
}

async fn form_action(
    State(stub): State<Stub>,
    uri: Uri,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    let call = stub.record(&uri, &headers, json!(form)).await;
    if call.path == "/connect" {
        return match form.get("password").map(String::as_str) {
            Some("boom") => Err(StatusCode::INTERNAL_SERVER_ERROR),
            Some("padded ") => Ok(Json(json!({ "success": true }))),
            Some(password) => Ok(Json(json!({ "success": password == PASSWORD }))),
            None => Err(StatusCode::BAD_REQUEST),
        };
    }
    Ok(Json(json!({ "success": authorized(&call) })))
}

async fn json_action(
    State(stub): State<Stub>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let call = stub.record(&uri, &headers, body).await;
    if call.body["name"] == "explode" {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(json!({ "success": authorized(&call) })))
}

async fn spawn_stub() -> (Url, Stub) {
    let stub = Stub::default();
    let app = Router::new()
        .route("/connect", post(form_action))
        .route("/add-order-rule", post(form_action))
        .route("/add-category", post(json_action))
        .route("/add-document", post(json_action))
        .route("/add-element", post(json_action))
        .route("/add-description", post(json_action))
        .route("/add-order", post(json_action))
        .route("/analyze", post(json_action))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (Url::parse(&format!("http://{addr}")).unwrap(), stub)
}

fn connected() -> Session {
    let mut session = Session::guest();
    session.connect(PASSWORD);
    session
}

#[tokio::test]
async fn connect_with_correct_password_sets_cookie_and_reloads() {
    let (url, stub) = spawn_stub().await;
    let page = RecordingPage::at("/").with_field(PASSWORD_FIELD, PASSWORD);
    let mut ctl = Controller::new(ApiClient::new(url), Session::guest(), page);

    ctl.connect().await;

    assert_eq!(ctl.session().password(), Some(PASSWORD));
    assert_eq!(ctl.page().events(), &[PageEvent::Reload]);
    let calls = stub.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, json!({ "password": PASSWORD }));
    assert_eq!(calls[0].cookie, None);
}

#[tokio::test]
async fn connect_with_wrong_password_clears_field_and_alerts_once() {
    let (url, _stub) = spawn_stub().await;
    let page = RecordingPage::at("/").with_field(PASSWORD_FIELD, "nope");
    let mut ctl = Controller::new(ApiClient::new(url), Session::guest(), page);

    ctl.connect().await;

    assert!(!ctl.session().is_connected());
    assert_eq!(ctl.page().field(PASSWORD_FIELD).as_deref(), Some(""));
    assert_eq!(ctl.page().events(), &[PageEvent::Alert(WRONG_PASSWORD.into())]);
}

#[tokio::test]
async fn connect_sends_and_stores_the_password_as_typed() {
    let (url, stub) = spawn_stub().await;
    let typed = " open-sesame ";
    let page = RecordingPage::at("/").with_field(PASSWORD_FIELD, typed);
    let mut ctl = Controller::new(ApiClient::new(url), Session::guest(), page);

    ctl.connect().await;

    assert_eq!(stub.calls().await[0].body, json!({ "password": typed }));
    // The stub only accepts the exact password, so this is a rejection.
    assert_eq!(ctl.page().alerts(), vec![WRONG_PASSWORD]);
}

#[tokio::test]
async fn connect_stores_padded_password_when_accepted() {
    let (url, _stub) = spawn_stub().await;
    let page = RecordingPage::at("/").with_field(PASSWORD_FIELD, "padded ");
    let mut ctl = Controller::new(ApiClient::new(url), Session::guest(), page);

    ctl.connect().await;

    assert_eq!(ctl.session().password(), Some("padded "));
    assert_eq!(ctl.page().events(), &[PageEvent::Reload]);
}

#[tokio::test]
async fn rejected_connect_drops_a_previous_session() {
    let (url, _stub) = spawn_stub().await;
    let page = RecordingPage::at("/").with_field(PASSWORD_FIELD, "nope");
    let mut ctl = Controller::new(ApiClient::new(url), connected(), page);

    ctl.connect().await;

    assert!(!ctl.session().is_connected());
    assert_eq!(ctl.session().password(), None);
    assert_eq!(ctl.page().field(PASSWORD_FIELD).as_deref(), Some(""));
    assert_eq!(ctl.page().events(), &[PageEvent::Alert(WRONG_PASSWORD.into())]);
}

#[tokio::test]
async fn connect_server_error_keeps_a_previous_session() {
    let (url, _stub) = spawn_stub().await;
    let page = RecordingPage::at("/").with_field(PASSWORD_FIELD, "boom");
    let mut ctl = Controller::new(ApiClient::new(url), connected(), page);

    ctl.connect().await;

    assert_eq!(ctl.session().password(), Some(PASSWORD));
    assert_eq!(ctl.page().alerts(), vec![GENERIC_ERROR]);
}

#[tokio::test]
async fn connect_server_error_is_reported_generically() {
    let (url, _stub) = spawn_stub().await;
    let page = RecordingPage::at("/").with_field(PASSWORD_FIELD, "boom");
    let mut ctl = Controller::new(ApiClient::new(url), Session::guest(), page);

    ctl.connect().await;

    assert!(!ctl.session().is_connected());
    assert_eq!(ctl.page().alerts(), vec![GENERIC_ERROR]);
}

#[tokio::test]
async fn equal_order_rule_properties_issue_no_request() {
    let (url, stub) = spawn_stub().await;
    for value in ["1", "2", "17"] {
        let page = RecordingPage::at("/add-order-rule-page/3")
            .with_field(LARGE_FIELD, value)
            .with_field(SMALL_FIELD, value);
        let mut ctl = Controller::new(ApiClient::new(url.clone()), connected(), page);
        ctl.add_order_rule().await;
        assert_eq!(ctl.page().alerts(), vec!["Please choose different properties"]);
    }
    assert!(stub.calls().await.is_empty());
}

#[tokio::test]
async fn same_property_spelled_differently_issues_no_request() {
    let (url, stub) = spawn_stub().await;
    for (large, small) in [("4", "04"), ("12", " 012 "), ("+3", "3")] {
        let page = RecordingPage::at("/add-order-rule-page/3")
            .with_field(LARGE_FIELD, large)
            .with_field(SMALL_FIELD, small);
        let mut ctl = Controller::new(ApiClient::new(url.clone()), connected(), page);
        ctl.add_order_rule().await;
        assert_eq!(ctl.page().alerts(), vec!["Please choose different properties"]);
    }
    assert!(stub.calls().await.is_empty());
}

#[tokio::test]
async fn order_rule_success_alerts_then_returns_to_category() {
    let (url, stub) = spawn_stub().await;
    let page = RecordingPage::at("/add-order-rule-page/3")
        .with_field(LARGE_FIELD, "8")
        .with_field(SMALL_FIELD, "9");
    let mut ctl = Controller::new(ApiClient::new(url), connected(), page);

    ctl.add_order_rule().await;

    assert_eq!(
        ctl.page().events(),
        &[
            PageEvent::Alert("Order rule added".into()),
            PageEvent::Navigate("/category/3".into()),
        ]
    );
    let calls = stub.calls().await;
    assert_eq!(calls[0].path, "/add-order-rule");
    assert_eq!(calls[0].body, json!({ "large": "8", "small": "9" }));
    assert!(authorized(&calls[0]));
}

#[tokio::test]
async fn add_category_sends_property_rows_in_order() {
    let (url, stub) = spawn_stub().await;
    let page = RecordingPage::at("/add-category-page").with_field(CATEGORY_NAME_FIELD, "Period");
    let mut ctl = Controller::new(ApiClient::new(url), connected(), page);

    let mut rows = Vec::new();
    for label in ["Beginning", "Scratch", "End"] {
        ctl.page_mut().set_field(PROPERTY_NAME_FIELD, label);
        rows.push(ctl.add_property().unwrap());
    }
    ctl.remove_property(rows[1]);
    ctl.add_category().await;

    assert_eq!(ctl.page().events(), &[PageEvent::Navigate("/categories".into())]);
    let calls = stub.calls().await;
    assert_eq!(
        calls[0].body,
        json!({ "name": "Period", "properties": ["Beginning", "End"] })
    );
}

#[tokio::test]
async fn guest_mutation_is_rejected_and_page_kept() {
    let (url, stub) = spawn_stub().await;
    let page = RecordingPage::at("/add-document-page").with_field(DOCUMENT_NAME_FIELD, "Episode IV");
    let mut ctl = Controller::new(ApiClient::new(url), Session::guest(), page);

    ctl.add_document().await;

    assert_eq!(ctl.page().alerts(), vec!["Could not add the document"]);
    assert_eq!(ctl.page().path(), "/add-document-page");
    assert_eq!(ctl.page().field(DOCUMENT_NAME_FIELD).as_deref(), Some("Episode IV"));
    assert_eq!(stub.calls().await.len(), 1);
}

#[tokio::test]
async fn server_error_on_action_is_a_transport_failure() {
    let (url, _stub) = spawn_stub().await;
    let page = RecordingPage::at("/add-document-page").with_field(DOCUMENT_NAME_FIELD, "explode");
    let mut ctl = Controller::new(ApiClient::new(url), connected(), page);

    ctl.add_document().await;

    assert_eq!(ctl.page().alerts(), vec![GENERIC_ERROR]);
    assert!(ctl.session().is_connected());
}

#[tokio::test]
async fn document_actions_return_to_the_document() {
    let (url, stub) = spawn_stub().await;

    let page = RecordingPage::at("/add-description-page/4")
        .with_field(ELEMENT_FIELD, "2")
        .with_field(DESCRIPTION_FIELD, "It is a period of civil war.");
    let mut ctl = Controller::new(ApiClient::new(url.clone()), connected(), page);
    ctl.add_description().await;
    assert_eq!(ctl.page().events(), &[PageEvent::Navigate("/document/4".into())]);

    let page = RecordingPage::at("/add-order-page/4")
        .with_field(LARGE_FIELD, "1")
        .with_field(SMALL_FIELD, "5");
    let mut ctl = Controller::new(ApiClient::new(url), connected(), page);
    ctl.add_order().await;
    assert_eq!(ctl.page().events(), &[PageEvent::Navigate("/document/4".into())]);

    let calls = stub.calls().await;
    assert_eq!(
        calls[0].body,
        json!({ "document": 4, "element": 2, "description": "It is a period of civil war." })
    );
    assert_eq!(calls[1].body, json!({ "document": 4, "large": 1, "small": 5 }));
}

#[tokio::test]
async fn element_and_analyze_reload_the_page() {
    let (url, stub) = spawn_stub().await;
    let mut ctl = Controller::new(ApiClient::new(url), connected(), RecordingPage::at("/elements/6"));

    ctl.add_element().await;
    ctl.analyze().await;

    assert_eq!(ctl.page().events(), &[PageEvent::Reload, PageEvent::Reload]);
    let calls = stub.calls().await;
    assert_eq!(calls[0].path, "/add-element");
    assert_eq!(calls[0].body, json!({ "category": 6 }));
    assert_eq!(calls[1].path, "/analyze");
    assert_eq!(calls[1].body, json!({}));
}

fn scratch_session_path() -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("archive_ui_cli_{}_{nanos}.json", std::process::id()));
    path
}

async fn run_cli(url: &Url, session: &std::path::Path, args: &[&str]) -> String {
    let mut command = Command::new(env!("CARGO_BIN_EXE_archive_ui"));
    command
        .env("ARCHIVE_URL", url.as_str())
        .env("ARCHIVE_SESSION_PATH", session)
        .env("RUST_LOG", "warn")
        .args(args);
    let output = tokio::task::spawn_blocking(move || command.output())
        .await
        .unwrap()
        .expect("failed to run archive_ui");
    assert!(output.status.success(), "archive_ui {args:?} failed");
    String::from_utf8(output.stdout).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cli_keeps_the_session_between_invocations() {
    let (url, stub) = spawn_stub().await;
    let session = scratch_session_path();

    let out = run_cli(&url, &session, &["connect", PASSWORD]).await;
    assert_eq!(out.trim(), "reload: /");

    let out = run_cli(&url, &session, &["ready"]).await;
    assert_eq!(out.trim(), "navigate: /archive");

    let out = run_cli(&url, &session, &["add-document", "Episode IV"]).await;
    assert_eq!(out.trim(), "navigate: /documents");
    assert!(authorized(stub.calls().await.last().unwrap()));

    let out = run_cli(&url, &session, &["disconnect"]).await;
    assert_eq!(out.trim(), "navigate: /");

    let out = run_cli(&url, &session, &["ready"]).await;
    assert_eq!(out.trim(), "");
}
