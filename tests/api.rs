use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Local};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use muse_leads::{
    app,
    config::{AppState, Settings},
};

struct TestApp {
    dir: TempDir,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let router = Self::router_for(&dir);
        Self { dir, router }
    }

    fn router_for(dir: &TempDir) -> Router {
        let settings = Settings {
            data_path: dir.path().join("leads.csv"),
            bind_addr: "127.0.0.1:0".into(),
            default_locale: "en".into(),
        };
        app::router(AppState::new(&settings))
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.expect("body bytes");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).expect("request build");
        self.send(request).await
    }

    async fn write(&self, method: &str, uri: &str, payload: &Value, lang: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(lang) = lang {
            builder = builder.header(header::ACCEPT_LANGUAGE, lang);
        }
        let request = builder
            .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
            .expect("request build");
        self.send(request).await
    }
}

fn payload(name: &str) -> Value {
    json!({
        "requestDate": "2026-10-01",
        "name": name,
        "eventType": "Wedding",
        "eventDate": "2027-06-12",
        "source": "Instagram",
        "venue": "Muse Urban Venue",
        "stage": "New",
    })
}

#[tokio::test]
async fn empty_store_dashboard_is_zero_and_has_no_summary() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metrics"]["total"], 0);
    assert_eq!(body["metrics"]["booked"], 0);
    assert_eq!(body["metrics"]["conversionLabel"], "0.0%");
    assert_eq!(body["metrics"]["overdue"], 0);
    assert_eq!(body["leads"], json!([]));
    assert!(body.get("summary").is_none());
}

#[tokio::test]
async fn creating_a_booked_lead_returns_full_conversion() {
    let app = TestApp::new();
    let mut p = payload("Anna");
    p["stage"] = json!("Booked");

    let (status, body) = app.write("POST", "/api/leads", &p, None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Saved!");
    // booked omitido: herdou do estágio
    assert_eq!(body["lead"]["booked"], true);
    assert_eq!(body["dashboard"]["metrics"]["total"], 1);
    assert_eq!(body["dashboard"]["metrics"]["booked"], 1);
    assert_eq!(body["dashboard"]["metrics"]["conversionLabel"], "100.0%");

    let (_, leads) = app.get("/api/leads").await;
    assert_eq!(leads.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn saved_data_survives_a_restart() {
    let app = TestApp::new();
    let (_, created) = app.write("POST", "/api/leads", &payload("Persisted"), None).await;
    let id = created["lead"]["id"].as_str().expect("id").to_string();

    let restarted = TestApp::router_for(&app.dir);
    let response = restarted
        .oneshot(Request::get(format!("/api/leads/{id}")).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn overdue_counts_only_past_unbooked_follow_ups() {
    let app = TestApp::new();
    let today = Local::now().date_naive();

    let mut late = payload("Late");
    late["nextActionDate"] = json!((today - Duration::days(1)).to_string());
    late["booked"] = json!(false);
    let mut early = payload("Early");
    early["nextActionDate"] = json!((today + Duration::days(1)).to_string());
    early["booked"] = json!(false);

    app.write("POST", "/api/leads", &late, None).await;
    app.write("POST", "/api/leads", &early, None).await;

    let (_, body) = app.get("/api/dashboard").await;
    assert_eq!(body["metrics"]["overdue"], 1);
}

#[tokio::test]
async fn editing_out_of_range_position_is_rejected() {
    let app = TestApp::new();
    app.write("POST", "/api/leads", &payload("Only"), None).await;

    let (status, body) = app.write("PUT", "/api/leads/position/7", &payload("Ghost"), Some("el-GR")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap_or_default().starts_with("Το lead"));

    let (_, leads) = app.get("/api/leads").await;
    assert_eq!(leads[0]["name"], "Only");
    assert_eq!(leads.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn editing_by_id_replaces_the_row() {
    let app = TestApp::new();
    let (_, created) = app.write("POST", "/api/leads", &payload("Before"), None).await;
    let id = created["lead"]["id"].as_str().expect("id").to_string();

    let mut edit = payload("After");
    edit["stage"] = json!("Lost");
    edit["reasonLost"] = json!("OtherVenue");
    let (status, body) = app.write("PUT", &format!("/api/leads/{id}"), &edit, Some("el")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Αποθηκεύτηκε!");
    assert_eq!(body["lead"]["id"], id.as_str());
    assert_eq!(body["lead"]["name"], "After");
    assert_eq!(body["lead"]["reasonLost"], "OtherVenue");

    let (_, options) = app.get("/api/leads/options").await;
    assert_eq!(options[0]["label"], "After — 2027-06-12");
    assert_eq!(options[0]["id"], id.as_str());
}

#[tokio::test]
async fn venue_filter_can_empty_the_view() {
    let app = TestApp::new();
    app.write("POST", "/api/leads", &payload("Muse"), None).await;

    let (status, body) = app.get("/api/dashboard?venue=Couleur%20Locale").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metrics"]["total"], 0);
    assert!(body.get("summary").is_none());
}

#[tokio::test]
async fn repeated_query_params_and_summary() {
    let app = TestApp::new();
    let mut offer = payload("Offer");
    offer["stage"] = json!("Offer");
    let mut lost = payload("Lost");
    lost["stage"] = json!("Lost");
    lost["source"] = json!("Google");
    app.write("POST", "/api/leads", &payload("New"), None).await;
    app.write("POST", "/api/leads", &offer, None).await;
    app.write("POST", "/api/leads", &lost, None).await;

    let (_, body) = app.get("/api/dashboard?stage=New&stage=Offer&booked=no").await;
    assert_eq!(body["metrics"]["total"], 2);
    assert_eq!(body["summary"]["stages"], json!(["New", "Offer"]));
    assert_eq!(body["summary"]["rows"][0]["source"], "Instagram");
    assert_eq!(body["summary"]["rows"][0]["counts"], json!([1, 1]));
    assert_eq!(body["summary"]["rows"][0]["total"], 2);
}

#[tokio::test]
async fn invalid_payload_is_a_localized_400() {
    let app = TestApp::new();
    let mut bad = payload("");
    bad["nextActionDate"] = json!("next tuesday");

    let (status, body) = app.write("POST", "/api/leads", &bad, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["next_action_date"].is_array());

    let (_, leads) = app.get("/api/leads").await;
    assert_eq!(leads, json!([]));
}

#[tokio::test]
async fn unknown_lead_is_404() {
    let app = TestApp::new();
    let (status, _) = app.get("/api/leads/550e8400-e29b-41d4-a716-446655440000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unreadable_file_surfaces_as_500() {
    let app = TestApp::new();
    std::fs::write(app.dir.path().join("leads.csv"), b"\xff\xfe,\xc3\n\xff\n").unwrap();

    let (status, body) = app.get("/api/dashboard").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "The leads file could not be read or written. Nothing was saved."
    );

    // O servidor continua respondendo
    let (status, _) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn legacy_file_ids_can_be_used_for_editing() {
    let app = TestApp::new();
    std::fs::write(
        app.dir.path().join("leads.csv"),
        "Ημ_Αιτήματος,Όνομα,Email,Τηλέφωνο,Τύπος,Ημ_Εκδήλωσης,Πηγή,Χώρος,Στάδιο,Booked,Next_Action,Next_Action_Date,Reason_Lost,Budget_Range,Priority,Σχόλια\n\
         2026-09-01,Eleni,,,Birthday,2026-12-01,Google,Muse Urban Venue,Νέο,False,Call,2026-09-05,,,,\n",
    )
    .unwrap();

    let (_, options) = app.get("/api/leads/options").await;
    let id = options[0]["id"].as_str().expect("id").to_string();

    let (status, lead) = app.get(&format!("/api/leads/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lead["name"], "Eleni");

    let (status, body) = app
        .write("PUT", &format!("/api/leads/{id}"), &payload("Eleni K."), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lead"]["id"], id.as_str());
}

#[tokio::test]
async fn unknown_label_in_file_keeps_the_app_usable() {
    let app = TestApp::new();
    let path = app.dir.path().join("leads.csv");
    std::fs::write(
        &path,
        "Όνομα,Πηγή,Χώρος,Στάδιο,Booked\nA,Facebook,Muse Urban Venue,Νέο,False\n",
    )
    .unwrap();

    let (status, body) = app.get("/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metrics"]["total"], 0);

    let (status, body) = app.write("POST", "/api/leads", &payload("New one"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["dashboard"]["metrics"]["total"], 1);

    let (_, leads) = app.get("/api/leads").await;
    assert_eq!(leads[0]["unrecognized"]["source"], "Facebook");
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains(",Facebook,"));
}

#[tokio::test]
async fn empty_filter_value_hides_every_row() {
    let app = TestApp::new();
    app.write("POST", "/api/leads", &payload("Muse"), None).await;

    let (status, body) = app.get("/api/dashboard?stage=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metrics"]["total"], 0);

    let (_, body) = app.get("/api/dashboard").await;
    assert_eq!(body["metrics"]["total"], 1);
}

#[tokio::test]
async fn form_options_list_every_choice() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/options").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stages"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["venues"], json!(["Muse Urban Venue", "Couleur Locale"]));
    assert_eq!(body["bookedFilters"], json!(["any", "yes", "no"]));
}
