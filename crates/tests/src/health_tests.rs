use crate::fixtures::test_app::{TestApp, TestBackends};
use parole_services::ResourceUsage;
use serde_json::Value;

#[tokio::test]
async fn root_reports_active() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "active");
    assert!(body["message"].as_str().unwrap().starts_with("API Assistant Vocal"));
}

#[tokio::test]
async fn health_reports_usage_and_services() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["memory_usage"], "42.0%");
    assert_eq!(body["cpu_usage"], "12.5%");
    assert!(body["timestamp"].as_f64().unwrap() > 0.0);
    assert!(body["response_time"].as_f64().unwrap() >= 0.0);
    for service in ["stt", "tts", "llm"] {
        assert_eq!(body["services"][service], "operational");
    }
}

#[tokio::test]
async fn health_under_memory_pressure_is_unavailable() {
    let app = TestApp::spawn_with(TestBackends {
        usage: ResourceUsage {
            memory_percent: 95.0,
            cpu_percent: 10.0,
        },
        ..Default::default()
    })
    .await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 503);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "System under high load");
}

#[tokio::test]
async fn health_under_cpu_pressure_is_unavailable() {
    let app = TestApp::spawn_with(TestBackends {
        usage: ResourceUsage {
            memory_percent: 10.0,
            cpu_percent: 99.0,
        },
        ..Default::default()
    })
    .await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 503);
}
