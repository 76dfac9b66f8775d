use std::fs;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use eventsphere_api::{AppState, AppStateInner, routes};
use eventsphere_storage::catalog::sample_catalog;
use eventsphere_storage::{FileStore, RelationalStore, StorageMode, Store, StoreResult};
use eventsphere_types::models::{Event, NewAccount, NewEvent, NewRegistration};

const BOUNDARY: &str = "eventsphere-test-boundary";

struct Harness {
    dir: TempDir,
    store: Arc<dyn Store>,
    app: Router,
}

fn harness(mode: StorageMode) -> Harness {
    harness_with(mode, |store| store)
}

/// Build the app around `wrap(store)`, so a test can interpose on the store.
fn harness_with(
    mode: StorageMode,
    wrap: impl FnOnce(Arc<dyn Store>) -> Arc<dyn Store>,
) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn Store> = match mode {
        StorageMode::File => Arc::new(FileStore::init(dir.path().join("data")).unwrap()),
        StorageMode::Relational => {
            Arc::new(RelationalStore::open(&dir.path().join("eventsphere.db")).unwrap())
        }
    };
    store.seed_if_empty(&sample_catalog()).unwrap();
    let store = wrap(store);

    let static_dir = dir.path().join("html");
    fs::create_dir_all(&static_dir).unwrap();
    fs::write(static_dir.join("register.html"), "<form id=\"signup\"></form>").unwrap();

    let state: AppState = Arc::new(AppStateInner {
        store: store.clone(),
        mode,
        static_dir,
        upload_dir: dir.path().join("uploads"),
    });

    Harness {
        dir,
        store,
        app: routes(state),
    }
}

async fn body_text(resp: Response<Body>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(resp: Response<Body>) -> Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn signup(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/register")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

const SIGNUP_FIELDS: &[(&str, &str)] = &[
    ("first-name", "Ana"),
    ("last-name", "Lee"),
    ("email", "a@x.com"),
    ("new-password", "hunter22"),
    ("account-type", "personal"),
    ("event-type", "Wedding"),
    ("decoration", "Balloons"),
    ("decoration", "Lights"),
    ("age", "31"),
    ("referrer", "friend"),
    ("suggestion", ""),
];

/// Store whose email lookup never sees existing accounts, as when a
/// concurrent sign-up commits between the lookup and the insert.
struct StaleLookup(Arc<dyn Store>);

impl Store for StaleLookup {
    fn list_events(&self) -> StoreResult<Vec<Event>> {
        self.0.list_events()
    }

    fn seed_if_empty(&self, catalog: &[NewEvent]) -> StoreResult<usize> {
        self.0.seed_if_empty(catalog)
    }

    fn email_exists(&self, _email: &str) -> StoreResult<bool> {
        Ok(false)
    }

    fn insert_account(&self, account: NewAccount) -> StoreResult<i64> {
        self.0.insert_account(account)
    }

    fn insert_registration(&self, registration: NewRegistration) -> StoreResult<i64> {
        self.0.insert_registration(registration)
    }
}

fn uploaded_files(h: &Harness) -> Vec<String> {
    let dir = h.dir.path().join("uploads");
    let mut names: Vec<String> = match fs::read_dir(&dir) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

// -- Events --

#[tokio::test]
async fn lists_seeded_events_in_date_order() {
    let h = harness(StorageMode::File);
    let resp = h.app.oneshot(get("/api/events")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let events = body_json(resp).await;
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0]["title"], "Summer Music Festival");
    assert_eq!(events[0]["maxAttendees"], 500);
    assert_eq!(events[4]["date"], "2025-11-12");
    assert_eq!(events[4]["time"], "08:30:00");
}

#[tokio::test]
async fn corrupt_events_file_is_a_generic_failure() {
    let h = harness(StorageMode::File);
    fs::write(h.dir.path().join("data").join("events.json"), "{ nope").unwrap();

    let resp = h.app.oneshot(get("/api/events")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, json!({ "error": "Failed to fetch events" }));
}

#[tokio::test]
async fn registers_for_an_event_in_file_mode() {
    let h = harness(StorageMode::File);
    let req = post_json(
        "/api/events/register",
        json!({ "eventId": 1, "firstName": "Ana", "lastName": "Lee", "email": "a@x.com", "phone": "", "message": "" }),
    );

    let resp = h.app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({ "success": true, "message": "Registration successful!", "registrationId": 1 })
    );

    let saved = fs::read_to_string(h.dir.path().join("data").join("registrations.json")).unwrap();
    let saved: Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved[0]["email"], "a@x.com");
    assert!(saved[0].get("phone").is_none());
    assert!(saved[0]["registrationDate"].is_string());
}

#[tokio::test]
async fn registration_without_selected_event_is_rejected() {
    let h = harness(StorageMode::File);
    let req = post_json(
        "/api/events/register",
        json!({ "firstName": "Ana", "lastName": "Lee", "email": "a@x.com" }),
    );

    let resp = h.app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No event selected. Please try again.");
}

#[tokio::test]
async fn malformed_registration_body_is_rejected_as_json() {
    let h = harness(StorageMode::File);
    let req = Request::builder()
        .method("POST")
        .uri("/api/events/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"eventId\": "))
        .unwrap();

    let resp = h.app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["success"], false);
}

#[tokio::test]
async fn relational_registration_for_unknown_event() {
    let h = harness(StorageMode::Relational);
    let req = post_json(
        "/api/events/register",
        json!({ "eventId": 999, "firstName": "Ana", "lastName": "Lee", "email": "a@x.com" }),
    );

    let resp = h.app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "The selected event does not exist.");
}

// -- Accounts --

#[tokio::test]
async fn signup_creates_account_and_redirects() {
    let h = harness(StorageMode::File);
    let req = signup(SIGNUP_FIELDS, Some(("me.png", b"\x89PNG fake".as_slice())));

    let resp = h.app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/thank-you");

    assert!(h.store.email_exists("a@x.com").unwrap());

    let saved = fs::read_to_string(h.dir.path().join("data").join("accounts.json")).unwrap();
    let saved: Value = serde_json::from_str(&saved).unwrap();
    let account = &saved[0];
    assert_eq!(account["decorations"], "Balloons, Lights");
    assert_eq!(account["age"], 31);
    assert!(account["suggestion"].is_null());
    assert!(account["password"].as_str().unwrap().starts_with("$argon2id$"));

    let picture = account["profilePicture"].as_str().unwrap();
    assert!(picture.ends_with("-me.png"));
    assert_eq!(
        fs::read(h.dir.path().join("uploads").join(picture)).unwrap(),
        b"\x89PNG fake"
    );
}

#[tokio::test]
async fn signup_with_existing_email_shows_error_page() {
    let h = harness(StorageMode::File);
    h.store
        .insert_account(NewAccount {
            first_name: "Old".into(),
            last_name: "User".into(),
            email: "a@x.com".into(),
            password: "$argon2id$opaque".into(),
            ..Default::default()
        })
        .unwrap();

    let resp = h.app.oneshot(signup(SIGNUP_FIELDS, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("Email already exists. Please use a different email."));
    assert!(!h.dir.path().join("uploads").exists());
}

#[tokio::test]
async fn relational_signup_twice_is_caught_by_the_precheck() {
    let h = harness(StorageMode::Relational);

    let first = h.app.clone().oneshot(signup(SIGNUP_FIELDS, None)).await.unwrap();
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let second = h.app.oneshot(signup(SIGNUP_FIELDS, None)).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(second).await.contains("Email already exists"));
}

#[tokio::test]
async fn signup_missing_required_field() {
    let h = harness(StorageMode::File);
    let fields: Vec<(&str, &str)> = SIGNUP_FIELDS
        .iter()
        .copied()
        .filter(|(name, _)| *name != "last-name")
        .collect();

    let resp = h.app.oneshot(signup(&fields, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("Last name is required."));
    assert!(!h.store.email_exists("a@x.com").unwrap());
}

#[tokio::test]
async fn unique_constraint_duplicate_renders_same_page_and_drops_upload() {
    let h = harness_with(StorageMode::Relational, |store| -> Arc<dyn Store> {
        Arc::new(StaleLookup(store))
    });

    let first = h
        .app
        .clone()
        .oneshot(signup(SIGNUP_FIELDS, Some(("first.png", b"one".as_slice()))))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(uploaded_files(&h).len(), 1);

    let second = h
        .app
        .clone()
        .oneshot(signup(SIGNUP_FIELDS, Some(("second.png", b"two".as_slice()))))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(second)
        .await
        .contains("Email already exists. Please use a different email."));

    let files = uploaded_files(&h);
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("-first.png"));
}

// -- Pages --

#[tokio::test]
async fn serves_pages_and_health() {
    let h = harness(StorageMode::Relational);

    let resp = h.app.clone().oneshot(get("/register")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("signup"));

    let resp = h.app.clone().oneshot(get("/thank-you")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Thank You!"));

    let resp = h.app.oneshot(get("/health")).await.unwrap();
    assert_eq!(
        body_json(resp).await,
        json!({ "status": "ok", "storage": "relational" })
    );
}
