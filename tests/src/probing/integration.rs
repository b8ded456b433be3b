#![cfg(test)]
use std::time::Duration;

use crprobe_common::config::ApiCredentials;
use crprobe_common::tag::PlayerTag;
use crprobe_core::StatusCode;
use crprobe_core::api::{ApiClient, Endpoint};
use crprobe_core::error::ApiError;
use crprobe_core::pacing::BatchPacer;
use crprobe_core::prober::{BurstProber, SequentialProber, SilentObserver, ThrottlePolicy};
use url::Url;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn tags(raw: &[&str]) -> Vec<PlayerTag> {
    raw.iter().map(|t| t.parse().unwrap()).collect()
}

fn client_for(server: &MockServer) -> ApiClient {
    let base = Url::parse(&format!("{}/v1", server.uri())).unwrap();
    ApiClient::new(ApiCredentials::new(TOKEN, base)).unwrap()
}

async fn mount_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/players/%23[A-Z0-9]+/battlelog$"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(server)
        .await;
}

async fn mount_throttled(server: &MockServer, bare_tag: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/players/%23{bare_tag}/battlelog")))
        .respond_with(ResponseTemplate::new(429))
        .with_priority(1)
        .mount(server)
        .await;
}

/// Sends the warm-up request plus every tag once per round, with the bearer token.
#[tokio::test]
async fn sequential_probe_hits_escaped_battlelog_urls() {
    let server = MockServer::start().await;
    mount_ok(&server).await;

    let client = client_for(&server);
    let prober = SequentialProber::new(tags(&["#8PU82CPP", "#208L9JQV9"]), 2);

    let report = prober.run(&client, &SilentObserver).await.unwrap();

    assert_eq!(report.requests, 5);
    assert_eq!(report.status_counts.get(&200), Some(&5));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 5);
    assert_eq!(requests[0].url.path(), "/v1/players/%238PU82CPP/battlelog");
    assert_eq!(requests[2].url.path(), "/v1/players/%23208L9JQV9/battlelog");
}

#[tokio::test]
async fn profile_endpoint_is_selectable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/players/%23LCR9PLVC"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).with_endpoint(Endpoint::Profile);
    let prober = SequentialProber::new(tags(&["#LCR9PLVC"]), 1);

    let report = prober.run(&client, &SilentObserver).await.unwrap();
    assert_eq!(report.requests, 2);
}

#[tokio::test]
async fn burst_records_throttling_and_keeps_going() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    mount_throttled(&server, "RCUCC9JG8").await;

    let client = client_for(&server);
    let prober = BurstProber::new(
        tags(&["#8PU82CPP", "#RCUCC9JG8", "#VG0U9PQ9R"]),
        BatchPacer::new(Duration::from_millis(500), Duration::from_millis(200)),
    );

    let report = prober.run(&client, &SilentObserver).await.unwrap();

    assert!(
        (1..=3).contains(&report.batches),
        "unexpected batch count {}",
        report.batches
    );
    assert_eq!(report.requests, report.batches * 3);
    assert_eq!(report.throttled, report.batches);
    assert!(!report.stopped_on_throttle);
}

#[tokio::test]
async fn burst_stop_policy_ends_after_first_throttled_batch() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    mount_throttled(&server, "8PU82CPP").await;

    let client = client_for(&server);
    let prober = BurstProber::new(
        tags(&["#8PU82CPP", "#208L9JQV9"]),
        BatchPacer::new(Duration::from_secs(30), Duration::from_millis(500)),
    )
    .with_policy(ThrottlePolicy::Stop);

    let report = prober.run(&client, &SilentObserver).await.unwrap();

    assert_eq!(report.batches, 1);
    assert_eq!(report.requests, 2);
    assert!(report.stopped_on_throttle);
}

#[tokio::test]
async fn unreachable_host_aborts_the_batch() {
    let base = Url::parse("http://127.0.0.1:9/v1").unwrap();
    let client = ApiClient::new(ApiCredentials::new(TOKEN, base)).unwrap();
    let prober = BurstProber::new(
        tags(&["#8PU82CPP"]),
        BatchPacer::new(Duration::from_secs(5), Duration::from_millis(500)),
    );

    let result = prober.run(&client, &SilentObserver).await;

    assert!(matches!(result, Err(ApiError::Transport { .. })));
}

#[tokio::test]
async fn player_profile_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/players/%238PU82CPP"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tag": "#8PU82CPP",
            "name": "Knight Main",
            "expLevel": 13,
            "trophies": 6500,
            "bestTrophies": 6800,
            "wins": 2100,
            "losses": 1900,
            "arena": { "id": 54000016, "name": "Royal Crypt" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let profile = client
        .player_profile(&"#8PU82CPP".parse().unwrap())
        .await
        .unwrap();

    assert_eq!(profile.name, "Knight Main");
    assert_eq!(profile.trophies, 6500);
    assert_eq!(profile.battle_count, 0);
}

#[tokio::test]
async fn unknown_player_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"reason":"notFound"}"#))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .player_profile(&"#YPV02J880".parse().unwrap())
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(body.contains("notFound"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Per-response reporting belongs to the observer; the client itself stays quiet.
#[tokio::test]
async fn status_fetches_do_not_log_per_response() {
    let server = MockServer::start().await;
    mount_ok(&server).await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("crprobe_core=trace"))
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = client_for(&server);
    let report = SequentialProber::new(tags(&["#8PU82CPP", "#208L9JQV9"]), 1)
        .run(&client, &SilentObserver)
        .await
        .unwrap();

    assert_eq!(report.requests, 3);
    let captured = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(captured.is_empty(), "unexpected core log output: {captured}");
}
