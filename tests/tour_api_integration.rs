//! Integration tests for the tour REST API.
//!
//! Each test spins up an Axum server on a random port backed by an in-memory
//! libSQL database and exercises the real HTTP contract.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use clinic_tour::store::{LibSqlBackend, SettingsStore};
use clinic_tour::tour::dismissal::settings_keys;
use clinic_tour::tour::routes::{TourRouteState, tour_routes};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Start an Axum server on a random port, return (port, store).
async fn start_server() -> (u16, Arc<dyn SettingsStore>) {
    let store: Arc<dyn SettingsStore> = Arc::new(LibSqlBackend::new_memory().await.unwrap());
    let app = tour_routes(TourRouteState {
        store: Arc::clone(&store),
        auto_launch_delay: Duration::from_millis(1000),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (port, store)
}

async fn get_json(url: String) -> Value {
    let resp = reqwest::get(url).await.unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

async fn finish(port: u16, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://127.0.0.1:{port}/api/tour/finish"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

fn titles(plan: &Value) -> Vec<String> {
    plan["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn rest_health_endpoint() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;
        let body = get_json(format!("http://127.0.0.1:{port}/health")).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "clinic-tour");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn fresh_user_gets_auto_launching_mother_tour() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;
        let plan = get_json(format!("http://127.0.0.1:{port}/api/tour?user=alice")).await;

        assert_eq!(plan["role"], "mother");
        assert_eq!(plan["auto_launch"], true);
        assert_eq!(plan["auto_launch_delay_ms"], 1000);
        assert_eq!(plan["steps"].as_array().unwrap().len(), 8);
        assert_eq!(plan["steps"][5]["title"], "🤰 Quick Actions");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn roles_share_prefix_and_closing() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;
        let base = format!("http://127.0.0.1:{port}/api/tour?user=u");
        let mother = titles(&get_json(format!("{base}&role=mother")).await);
        let doctor = titles(&get_json(format!("{base}&role=doctor")).await);
        let admin = titles(&get_json(format!("{base}&role=admin")).await);
        let unknown = titles(&get_json(format!("{base}&role=janitor")).await);

        assert_eq!(mother[..5], doctor[..5]);
        assert_eq!(mother[..5], admin[..5]);
        assert_eq!(mother[7], doctor[7]);
        assert_eq!(mother[7], admin[7]);
        assert_ne!(mother[5..7], doctor[5..7]);
        assert_ne!(doctor[5..7], admin[5..7]);
        assert_eq!(mother, unknown);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn step_buttons_follow_position() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;
        let plan = get_json(format!("http://127.0.0.1:{port}/api/tour")).await;
        let kinds = |i: usize| -> Vec<String> {
            plan["steps"][i]["buttons"]
                .as_array()
                .unwrap()
                .iter()
                .map(|b| b["kind"].as_str().unwrap().to_string())
                .collect()
        };

        assert_eq!(kinds(0), vec!["next"]);
        assert_eq!(kinds(3), vec!["back", "next"]);
        assert_eq!(kinds(7), vec!["back", "finish"]);
        assert!(plan["steps"][7]["opt_out_label"].is_string());
        assert!(plan["steps"][3].get("opt_out_label").is_none());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn finish_without_opt_out_keeps_auto_launch() {
    timeout(TEST_TIMEOUT, async {
        let (port, store) = start_server().await;

        let resp = finish(port, json!({"user": "alice", "opt_out": false})).await;
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["dismissed"], false);

        let stored = store
            .get_setting("alice", settings_keys::TUTORIAL_DISMISSED)
            .await
            .unwrap();
        assert!(stored.is_none());

        let plan = get_json(format!("http://127.0.0.1:{port}/api/tour?user=alice")).await;
        assert_eq!(plan["auto_launch"], true);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn finish_with_opt_out_latches_flag() {
    timeout(TEST_TIMEOUT, async {
        let (port, store) = start_server().await;

        let resp = finish(port, json!({"user": "alice", "opt_out": true})).await;
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["user"], "alice");
        assert_eq!(body["dismissed"], true);

        let stored = store
            .get_setting("alice", settings_keys::TUTORIAL_DISMISSED)
            .await
            .unwrap();
        assert_eq!(stored, Some(json!("true")));

        // Later finishes without the box ticked never clear it
        finish(port, json!({"user": "alice", "opt_out": false})).await;
        let plan = get_json(format!("http://127.0.0.1:{port}/api/tour?user=alice")).await;
        assert_eq!(plan["auto_launch"], false);
        // The full tour is still served for manual launches
        assert_eq!(plan["steps"].as_array().unwrap().len(), 8);

        // Other users are unaffected
        let other = get_json(format!("http://127.0.0.1:{port}/api/tour?user=bob")).await;
        assert_eq!(other["auto_launch"], true);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn external_reset_restores_auto_launch() {
    timeout(TEST_TIMEOUT, async {
        let (port, store) = start_server().await;
        finish(port, json!({"opt_out": true})).await;

        let status = get_json(format!("http://127.0.0.1:{port}/api/tour/dismissal")).await;
        assert_eq!(status["user"], "default");
        assert_eq!(status["dismissed"], true);

        assert!(
            store
                .delete_setting("default", settings_keys::TUTORIAL_DISMISSED)
                .await
                .unwrap()
        );

        let status = get_json(format!("http://127.0.0.1:{port}/api/tour/dismissal")).await;
        assert_eq!(status["dismissed"], false);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn malformed_finish_body_is_rejected() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store) = start_server().await;
        let resp = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/api/tour/finish"))
            .header("content-type", "application/json")
            .body("not json")
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_client_error());
    })
    .await
    .expect("test timed out");
}
