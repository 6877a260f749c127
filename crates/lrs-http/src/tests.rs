//! Tests against an in-process axum server.

use std::sync::{Arc, Mutex};

use axum::{
  Json, Router,
  extract::{Path, State},
  http::{HeaderMap, StatusCode, header},
  routing::{get, post},
};
use lrs_core::{
  DeliveryError, LocationError,
  location::LocationService,
  transport::StatementTransport,
};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{
  HttpLocationService, LrsClient, LrsConfig, ServiceUrls, XAPI_VERSION,
  XAPI_VERSION_HEADER,
};

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
  let address = listener.local_addr().expect("local addr");
  tokio::spawn(async move { axum::serve(listener, router).await });
  format!("http://{address}")
}

type Received = Arc<Mutex<Vec<(HeaderMap, String)>>>;

fn lrs_router(status: StatusCode, reply: &'static str) -> (Router, Received) {
  let received: Received = Arc::default();
  let router = Router::new()
    .route(
      "/xapi/statements",
      post(
        move |State(received): State<Received>,
              headers: HeaderMap,
              body: String| async move {
          received.lock().unwrap().push((headers, body));
          (status, reply)
        },
      ),
    )
    .with_state(Arc::clone(&received));
  (router, received)
}

// ─── Record store ────────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_statement_with_auth_and_version() {
  let (router, received) = lrs_router(StatusCode::OK, r#"["abc"]"#);
  let base = serve(router).await;
  let client =
    LrsClient::new(LrsConfig::new(format!("{base}/xapi/"), "key", "secret"))
      .unwrap();

  let response = client
    .post_statements(r#"{"verb":{"id":"x"}}"#.to_string())
    .await
    .unwrap();

  assert_eq!(response.status, 200);
  assert_eq!(response.body, r#"["abc"]"#);
  assert!(response.is_success());

  let received = received.lock().unwrap();
  let (headers, body) = &received[0];
  assert_eq!(body, r#"{"verb":{"id":"x"}}"#);
  assert_eq!(headers[XAPI_VERSION_HEADER], XAPI_VERSION);
  assert_eq!(headers[header::CONTENT_TYPE], "application/json");
  // base64("key:secret")
  assert_eq!(headers[header::AUTHORIZATION], "Basic a2V5OnNlY3JldA==");
}

#[tokio::test]
async fn rejection_is_a_response_not_an_error() {
  let (router, _) = lrs_router(StatusCode::BAD_REQUEST, "invalid statement");
  let base = serve(router).await;
  let client =
    LrsClient::new(LrsConfig::new(format!("{base}/xapi"), "k", "s")).unwrap();

  let response = client.post_statements("{}".to_string()).await.unwrap();
  assert_eq!(response.status, 400);
  assert_eq!(response.body, "invalid statement");
  assert!(!response.is_success());
}

#[tokio::test]
async fn unreachable_store_is_a_connection_error() {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let address = listener.local_addr().unwrap();
  drop(listener);

  let client =
    LrsClient::new(LrsConfig::new(format!("http://{address}"), "k", "s"))
      .unwrap();
  let err = client.post_statements("{}".to_string()).await.unwrap_err();
  assert!(matches!(err, DeliveryError::Connection(_)));
}

// ─── Location ────────────────────────────────────────────────────────────────

fn location_router() -> Router {
  Router::new()
    .route("/ip", get(|| async { "1.2.3.4\n" }))
    .route("/blank-ip", get(|| async { "  \n" }))
    .route("/down", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
    .route(
      "/json/{ip}",
      get(|Path(ip): Path<String>| async move {
        Json(json!({
          "status": "success",
          "country": "United States",
          "countryCode": "US",
          "city": "Ashburn",
          "lat": 39.03,
          "lon": -77.5,
          "query": ip,
        }))
      }),
    )
    .route(
      "/private/{ip}",
      get(|| async {
        Json(json!({ "status": "fail", "message": "private range" }))
      }),
    )
    .route("/garbage/{ip}", get(|| async { "<html>oops</html>" }))
}

async fn service(ip_path: &str, geo_path: &str) -> HttpLocationService {
  let base = serve(location_router()).await;
  HttpLocationService::new(ServiceUrls {
    ip_url:  format!("{base}{ip_path}"),
    geo_url: format!("{base}{geo_path}"),
  })
  .unwrap()
}

#[tokio::test]
async fn public_ip_is_trimmed_body() {
  let svc = service("/ip", "/json/{ip}").await;
  assert_eq!(svc.public_ip().await.unwrap(), "1.2.3.4");
}

#[tokio::test]
async fn blank_ip_body_is_rejected() {
  let svc = service("/blank-ip", "/json/{ip}").await;
  assert_eq!(svc.public_ip().await, Err(LocationError::EmptyIp));
}

#[tokio::test]
async fn ip_service_error_status_is_ip_lookup_error() {
  let svc = service("/down", "/json/{ip}").await;
  assert!(matches!(svc.public_ip().await, Err(LocationError::IpLookup(_))));
}

#[tokio::test]
async fn geolocate_substitutes_ip_and_parses_location() {
  let svc = service("/ip", "/json/{ip}").await;
  let location = svc.geolocate("1.2.3.4").await.unwrap();
  assert_eq!(location.country_code.as_deref(), Some("US"));
  assert_eq!(location.city.as_deref(), Some("Ashburn"));
  assert_eq!(location.query.as_deref(), Some("1.2.3.4"));
  assert_eq!(location.lon, Some(-77.5));
}

#[tokio::test]
async fn geolocate_fail_status_is_rejected() {
  let svc = service("/ip", "/private/{ip}").await;
  assert_eq!(
    svc.geolocate("10.0.0.1").await,
    Err(LocationError::Rejected("private range".into()))
  );
}

#[tokio::test]
async fn geolocate_non_json_is_unparseable() {
  let svc = service("/ip", "/garbage/{ip}").await;
  assert!(matches!(
    svc.geolocate("1.2.3.4").await,
    Err(LocationError::Unparseable(_))
  ));
}
