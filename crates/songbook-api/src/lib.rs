//! JSON REST API for Songbook.
//!
//! Exposes an axum [`Router`] backed by any [`SongStore`] and
//! [`SongDetailsProvider`]. TLS and transport concerns are the caller's
//! responsibility.

pub mod error;
pub mod songs;

use std::sync::Arc;

use axum::{Router, routing::get};
use songbook_core::{details::SongDetailsProvider, store::SongStore};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Collaborators shared by every handler.
#[derive(Clone)]
pub struct AppState<S, D> {
  pub store:   Arc<S>,
  pub details: Arc<D>,
}

impl<S, D> AppState<S, D> {
  pub fn new(store: S, details: D) -> Self {
    Self { store: Arc::new(store), details: Arc::new(details) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the songs router for `state`, with per-request tracing.
pub fn router<S, D>(state: AppState<S, D>) -> Router
where
  S: SongStore + Clone + Send + Sync + 'static,
  D: SongDetailsProvider + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/songs", get(songs::list::<S, D>).post(songs::create::<S, D>))
    .route(
      "/songs/{id}",
      get(songs::get_one::<S, D>)
        .put(songs::update::<S, D>)
        .delete(songs::delete::<S, D>),
    )
    .route("/songs/{id}/lyrics", get(songs::lyrics::<S, D>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chrono::NaiveDate;
  use serde_json::{Value, json};
  use songbook_core::song::SongDetails;
  use songbook_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  /// Deterministic provider so responses can be asserted exactly.
  #[derive(Clone)]
  struct FixedDetails;

  impl SongDetailsProvider for FixedDetails {
    async fn details(&self, group: &str, song: &str) -> songbook_core::Result<SongDetails> {
      Ok(SongDetails {
        release_date: NaiveDate::from_ymd_opt(1975, 10, 31).unwrap(),
        lyrics:       "A\n\nB\n\nC".into(),
        link:         format!("https://example.com/{group}/{song}"),
      })
    }
  }

  #[derive(Clone)]
  struct UnavailableDetails;

  impl SongDetailsProvider for UnavailableDetails {
    async fn details(&self, _group: &str, _song: &str) -> songbook_core::Result<SongDetails> {
      Err(songbook_core::Error::Details("upstream timed out".into()))
    }
  }

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(AppState::new(store, FixedDetails))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  async fn create(app: &Router, group: &str, song: &str) -> i64 {
    let (status, body) =
      send(app, "POST", "/songs", Some(json!({ "group": group, "song": song }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
  }

  // ── Create / get ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_provider_details() {
    let app = app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/songs",
      Some(json!({ "group": "Queen", "song": "Innuendo" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["group"], "Queen");
    assert_eq!(body["song"], "Innuendo");
    assert_eq!(body["release_date"], "1975-10-31");
    assert_eq!(body["link"], "https://example.com/Queen/Innuendo");
    assert!(body["created_at"].is_string());
  }

  #[tokio::test]
  async fn create_with_placeholder_provider() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = router(AppState::new(store, songbook_core::details::PlaceholderDetails));
    let (status, body) =
      send(&app, "POST", "/songs", Some(json!({ "group": "Muse", "song": "Uprising" }))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["lyrics"], "Lyrics placeholder for Uprising");
    assert_eq!(body["link"], "https://example.com/Muse/Uprising");
  }

  #[tokio::test]
  async fn create_with_blank_name_is_400() {
    let app = app().await;
    let (status, body) =
      send(&app, "POST", "/songs", Some(json!({ "group": " ", "song": "Innuendo" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("group"));

    let (status, _) = send(&app, "POST", "/songs", Some(json!({ "group": "Queen" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn create_with_malformed_json_is_400() {
    let app = app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/songs")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn provider_failure_is_500_without_detail() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = router(AppState::new(store, UnavailableDetails));
    let (status, body) =
      send(&app, "POST", "/songs", Some(json!({ "group": "Queen", "song": "Innuendo" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
  }

  #[tokio::test]
  async fn get_one_roundtrip_and_404() {
    let app = app().await;
    let id = create(&app, "Queen", "Innuendo").await;

    let (status, body) = send(&app, "GET", &format!("/songs/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    let (status, body) = send(&app, "GET", "/songs/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "song 9999 not found");
  }

  #[tokio::test]
  async fn non_numeric_id_is_400() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/songs/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  // ── List ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_empty_filters_return_all() {
    let app = app().await;
    create(&app, "Queen", "Innuendo").await;
    create(&app, "Muse", "Uprising").await;

    let (status, body) = send(&app, "GET", "/songs?group=&song_name=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn list_filters_exact_group() {
    let app = app().await;
    create(&app, "Queen", "Innuendo").await;
    create(&app, "Queen", "Under Pressure").await;
    create(&app, "Queensryche", "Silent Lucidity").await;

    let (status, body) = send(&app, "GET", "/songs?group=Queen", None).await;
    assert_eq!(status, StatusCode::OK);
    let songs = body.as_array().unwrap();
    assert_eq!(songs.len(), 2);
    assert!(songs.iter().all(|s| s["group"] == "Queen"));
  }

  #[tokio::test]
  async fn list_paginates_and_clamps_limit() {
    let app = app().await;
    for i in 0..3 {
      create(&app, "Band", &format!("Track {i}")).await;
    }

    let (_, body) = send(&app, "GET", "/songs?page=2&limit=2", None).await;
    let songs = body.as_array().unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0]["song"], "Track 2");

    // limit=0 clamps to 1; page=0 clamps to 1.
    let (_, body) = send(&app, "GET", "/songs?page=0&limit=0", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["song"], "Track 0");
  }

  #[tokio::test]
  async fn list_with_non_numeric_limit_is_400() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/songs?limit=lots", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("limit"));
  }

  // ── Lyrics ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn lyrics_paginate_verses() {
    let app = app().await;
    let id = create(&app, "Queen", "Innuendo").await;

    let (status, body) = send(&app, "GET", &format!("/songs/{id}/lyrics?page=1&limit=2"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["A", "B"]));

    let (_, body) = send(&app, "GET", &format!("/songs/{id}/lyrics?page=2&limit=2"), None).await;
    assert_eq!(body, json!(["C"]));

    let (status, body) = send(&app, "GET", &format!("/songs/{id}/lyrics?page=5&limit=2"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn lyrics_default_page_holds_all_three_verses() {
    let app = app().await;
    let id = create(&app, "Queen", "Innuendo").await;
    let (_, body) = send(&app, "GET", &format!("/songs/{id}/lyrics"), None).await;
    assert_eq!(body, json!(["A", "B", "C"]));
  }

  #[tokio::test]
  async fn lyrics_of_missing_song_is_404() {
    let app = app().await;
    let (status, _) = send(&app, "GET", "/songs/77/lyrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Update ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_changes_only_supplied_fields() {
    let app = app().await;
    let id = create(&app, "Queen", "Innuendo").await;

    let (status, body) = send(
      &app,
      "PUT",
      &format!("/songs/{id}"),
      Some(json!({ "release_date": "1991-02-04", "link": "https://example.com/x" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["release_date"], "1991-02-04");
    assert_eq!(body["link"], "https://example.com/x");
    assert_eq!(body["group"], "Queen");
    assert_eq!(body["song"], "Innuendo");
    assert_eq!(body["lyrics"], "A\n\nB\n\nC");

    let (_, reread) = send(&app, "GET", &format!("/songs/{id}"), None).await;
    assert_eq!(reread, body);
  }

  #[tokio::test]
  async fn empty_update_returns_current_row() {
    let app = app().await;
    let id = create(&app, "Queen", "Innuendo").await;
    let (_, before) = send(&app, "GET", &format!("/songs/{id}"), None).await;

    let (status, body) = send(&app, "PUT", &format!("/songs/{id}"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, before);
  }

  #[tokio::test]
  async fn update_with_bad_date_is_400() {
    let app = app().await;
    let id = create(&app, "Queen", "Innuendo").await;

    let (status, body) = send(
      &app,
      "PUT",
      &format!("/songs/{id}"),
      Some(json!({ "song": "Changed", "release_date": "2024-13-40" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("2024-13-40"));

    let (_, unchanged) = send(&app, "GET", &format!("/songs/{id}"), None).await;
    assert_eq!(unchanged["song"], "Innuendo");
  }

  #[tokio::test]
  async fn update_missing_song_is_404() {
    let app = app().await;
    let (status, _) = send(&app, "PUT", "/songs/404", Some(json!({ "lyrics": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/songs/404", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Delete ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_then_get_is_404() {
    let app = app().await;
    let id = create(&app, "Queen", "Innuendo").await;
    let kept = create(&app, "Queen", "Under Pressure").await;

    let (status, body) = send(&app, "DELETE", &format!("/songs/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &format!("/songs/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &format!("/songs/{kept}"), None).await;
    assert_eq!(status, StatusCode::OK);
  }

  #[tokio::test]
  async fn delete_missing_song_is_404() {
    let app = app().await;
    let (status, _) = send(&app, "DELETE", "/songs/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
