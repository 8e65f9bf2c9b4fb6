//! Handlers for `/songs` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/songs` | `?group=&song_name=&page=&limit=`; empty filters match all |
//! | `POST`   | `/songs` | Body: `{"group":"Queen","song":"Innuendo"}` |
//! | `GET`    | `/songs/:id` | 404 if not found |
//! | `GET`    | `/songs/:id/lyrics` | `?page=&limit=`; paginates verses |
//! | `PUT`    | `/songs/:id` | Sparse patch; absent fields are unchanged |
//! | `DELETE` | `/songs/:id` | 204 on success |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use songbook_core::{
  details::SongDetailsProvider,
  page::Page,
  song::{NewSong, Song, SongUpdateRequest, normalize_names},
  store::{SongFilter, SongStore},
  verses,
};

use crate::{AppState, error::ApiError};

// ─── Pagination ───────────────────────────────────────────────────────────────

/// Raw `page`/`limit` query values. Blank values count as absent.
#[derive(Debug, Deserialize, Default)]
pub struct PageParams {
  pub page:  Option<String>,
  pub limit: Option<String>,
}

impl PageParams {
  pub fn to_page(&self) -> Result<Page, ApiError> {
    Ok(Page::clamped(
      parse_int("page", self.page.as_deref())?,
      parse_int("limit", self.limit.as_deref())?,
    ))
  }
}

fn parse_int(name: &str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
  match raw.map(str::trim).filter(|s| !s.is_empty()) {
    None => Ok(None),
    Some(s) => s
      .parse()
      .map(Some)
      .map_err(|_| ApiError::BadRequest(format!("{name} must be an integer, got {s:?}"))),
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub group:     Option<String>,
  pub song_name: Option<String>,
  #[serde(flatten)]
  pub page:      PageParams,
}

/// `GET /songs[?group=...][&song_name=...][&page=...][&limit=...]`
pub async fn list<S, D>(
  State(state): State<AppState<S, D>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Song>>, ApiError>
where
  S: SongStore,
  D: SongDetailsProvider,
{
  let Query(params) = params?;
  let page = params.page.to_page()?;
  let filter = SongFilter::new(params.group, params.song_name);

  let songs = state
    .store
    .list_songs(filter, page)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(songs))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  #[serde(default)]
  pub group: String,
  #[serde(default)]
  pub song:  String,
}

/// `POST /songs` — body: `{"group":"Queen","song":"Innuendo"}`
///
/// Release date, lyrics and link come from the configured details provider.
pub async fn create<S, D>(
  State(state): State<AppState<S, D>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SongStore,
  D: SongDetailsProvider,
{
  let Json(body) = body?;
  let (group, song) = normalize_names(&body.group, &body.song)?;

  let details = state.details.details(group, song).await?;
  let created = state
    .store
    .add_song(NewSong::new(group, song, details))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id = created.id, group = %created.group, song = %created.song, "song created");
  Ok((StatusCode::CREATED, Json(created)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /songs/:id`
pub async fn get_one<S, D>(
  State(state): State<AppState<S, D>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Song>, ApiError>
where
  S: SongStore,
  D: SongDetailsProvider,
{
  let Path(id) = path?;
  let song = state
    .store
    .get_song(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::song_not_found(id))?;
  Ok(Json(song))
}

// ─── Lyrics ───────────────────────────────────────────────────────────────────

/// `GET /songs/:id/lyrics[?page=...][&limit=...]`
pub async fn lyrics<S, D>(
  State(state): State<AppState<S, D>>,
  path: Result<Path<i64>, PathRejection>,
  params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: SongStore,
  D: SongDetailsProvider,
{
  let Path(id) = path?;
  let Query(params) = params?;
  let page = params.to_page()?;

  let lyrics = state
    .store
    .lyrics(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::song_not_found(id))?;
  Ok(Json(verses::paginate(&lyrics, page)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /songs/:id` — body: any subset of
/// `{"group","song","release_date","lyrics","link"}`.
pub async fn update<S, D>(
  State(state): State<AppState<S, D>>,
  path: Result<Path<i64>, PathRejection>,
  body: Result<Json<SongUpdateRequest>, JsonRejection>,
) -> Result<Json<Song>, ApiError>
where
  S: SongStore,
  D: SongDetailsProvider,
{
  let Path(id) = path?;
  let Json(body) = body?;
  let patch = body.into_patch()?;
  let touched = !patch.is_empty();

  let song = state
    .store
    .update_song(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::song_not_found(id))?;

  if touched {
    tracing::info!(id, "song updated");
  }
  Ok(Json(song))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /songs/:id`
pub async fn delete<S, D>(
  State(state): State<AppState<S, D>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: SongStore,
  D: SongDetailsProvider,
{
  let Path(id) = path?;
  let deleted = state
    .store
    .delete_song(id)
    .await
    .map_err(ApiError::store)?;
  if !deleted {
    return Err(ApiError::song_not_found(id));
  }

  tracing::info!(id, "song deleted");
  Ok(StatusCode::NO_CONTENT)
}
