//! REST API endpoint handlers for the Observer server.
//!
//! Reads take the village read lock and render from it. Edits take the
//! write lock, so they land between ticks and never interleave with an
//! update pass.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/village` | Render frame of the outer village |
//! | `GET` | `/api/village/entities` | Raw entity list |
//! | `POST` | `/api/village/items` | Drop a palette item |
//! | `DELETE` | `/api/village/items/{id}` | Remove an entity |
//! | `POST` | `/api/village/clear` | Remove everything |
//! | `GET` | `/api/village/structures/{id}` | Interior frame of a structure |
//! | `POST` | `/api/village/structures/{id}/items` | Place an interior item |
//! | `DELETE` | `/api/village/structures/{id}/items/{item_id}` | Remove an interior item |
//! | `POST` | `/api/village/save` | Archive the village with a PNG body |
//! | `GET` | `/api/villages` | List saved villages |
//! | `DELETE` | `/api/villages/{id}` | Delete a saved village |
//! | `POST` | `/api/villages/{id}/load` | Replace the live village with a saved one |
//! | `GET` | `/api/villages/{id}/image` | Saved village PNG |
//! | `POST` | `/api/studio/generate` | Generate a song, drawing, or video frame |

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use snowglobe_core::render::{interior_frame, render_frame};
use snowglobe_core::tick::VillageState;
use snowglobe_db::VillageArchive;
use snowglobe_studio::{GenerationRequest, StudioError};
use snowglobe_types::{EntityId, InteriorItemId, InteriorKind, PaletteItem, Position};
use snowglobe_world::{clear, place, place_interior, remove, remove_interior};
use tracing::info;
use uuid::Uuid;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies and query parameters
// ---------------------------------------------------------------------------

/// Body of `POST /api/village/items`.
#[derive(Debug, serde::Deserialize)]
pub struct PlaceItemRequest {
    /// The palette item to drop.
    pub item: PaletteItem,
    /// Drop x coordinate.
    pub x: f32,
    /// Drop y coordinate.
    pub y: f32,
}

/// Body of `POST /api/village/structures/{id}/items`.
#[derive(Debug, serde::Deserialize)]
pub struct PlaceInteriorRequest {
    /// The interior item to place.
    pub kind: InteriorKind,
    /// Drop x coordinate on the interior surface.
    pub x: f32,
    /// Drop y coordinate on the interior surface.
    pub y: f32,
}

/// Query parameters for `POST /api/village/save`.
#[derive(Debug, serde::Deserialize)]
pub struct SaveQuery {
    /// Title for the saved village.
    pub title: Option<String>,
}

fn parse_uuid(raw: &str) -> Result<Uuid, ObserverError> {
    Uuid::parse_str(raw).map_err(|e| ObserverError::InvalidUuid(format!("{raw} ({e})")))
}

fn parse_entity_id(raw: &str) -> Result<EntityId, ObserverError> {
    parse_uuid(raw).map(EntityId::from)
}

fn archive_of(state: &AppState) -> Result<&snowglobe_db::PgVillageArchive, ObserverError> {
    state
        .archive
        .as_deref()
        .ok_or(ObserverError::Unavailable("village archive"))
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the village clock and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (tick, year, hour, night, population, total) = {
        let village = state.village.read().await;
        (
            village.clock.tick(),
            village.clock.year(),
            village.clock.hour(),
            village.clock.is_night(),
            village.store.living_count(),
            village.store.len(),
        )
    };
    let sky = if night { "Night" } else { "Day" };
    let archive = if state.archive.is_some() { "on" } else { "off" };
    let studio = if state.studio.is_some() { "on" } else { "off" };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Snowglobe Village</title>
    <style>
        body {{
            background: #0b1d33;
            color: #e8f1ff;
            font-family: 'Segoe UI', 'Helvetica Neue', sans-serif;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #ffffff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #9fb7d6; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #13294a;
            border: 1px solid #2c4b78;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 110px;
        }}
        .metric .label {{ color: #9fb7d6; font-size: 0.85rem; }}
        .metric .value {{ color: #ffd866; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #8ecbff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>Snowglobe Village</h1>
    <p class="subtitle">Archive: {archive} / Studio: {studio}</p>
    <div>
        <div class="metric"><div class="label">Tick</div><div class="value">{tick}</div></div>
        <div class="metric"><div class="label">Year</div><div class="value">{year}</div></div>
        <div class="metric"><div class="label">Hour</div><div class="value">{hour}:00</div></div>
        <div class="metric"><div class="label">Sky</div><div class="value">{sky}</div></div>
        <div class="metric"><div class="label">Residents</div><div class="value">{population}</div></div>
        <div class="metric"><div class="label">Entities</div><div class="value">{total}</div></div>
    </div>
    <ul>
        <li><a href="/api/village">/api/village</a> -- render frame</li>
        <li><a href="/api/village/entities">/api/village/entities</a> -- entity list</li>
        <li><a href="/api/villages">/api/villages</a> -- saved villages</li>
        <li>/ws/ticks -- live tick stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Live village
// ---------------------------------------------------------------------------

/// Render the outer village.
pub async fn get_village(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let village = state.village.read().await;
    Json(render_frame(&village))
}

/// List every entity in list order.
pub async fn list_entities(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let village = state.village.read().await;
    Json(serde_json::json!({
        "count": village.store.len(),
        "living": village.store.living_count(),
        "entities": village.store.entities(),
    }))
}

/// Drop a palette item onto the village.
///
/// Returns `201` with the ids of every entity created. Cap rejections
/// return `409` with the user-visible notice.
pub async fn place_item(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlaceItemRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let mut guard = state.village.write().await;
    let village: &mut VillageState = &mut guard;
    let ids = place(
        &mut village.store,
        request.item,
        Position::new(request.x, request.y),
        village.bounds,
        &village.placement,
        &mut rand::rng(),
    )?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "item": request.item,
            "ids": ids,
        })),
    ))
}

/// Remove an entity and repair references to it.
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let id = parse_entity_id(&id)?;
    let mut village = state.village.write().await;
    let removed = remove(&mut village.store, id)?;
    Ok(Json(removed))
}

/// Remove every entity from the village.
pub async fn clear_village(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut village = state.village.write().await;
    clear(&mut village.store);
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Structure interiors
// ---------------------------------------------------------------------------

/// Render the interior of a structure.
pub async fn get_structure(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let id = parse_entity_id(&id)?;
    let village = state.village.read().await;
    Ok(Json(interior_frame(&village, id)?))
}

/// Place an item inside a structure.
pub async fn place_structure_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<PlaceInteriorRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let structure = parse_entity_id(&id)?;
    let mut guard = state.village.write().await;
    let village: &mut VillageState = &mut guard;
    let item = place_interior(
        &mut village.store,
        structure,
        request.kind,
        Position::new(request.x, request.y),
        village.placement.max_interior_items,
    )?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": item }))))
}

/// Remove an item from a structure's interior.
pub async fn remove_structure_item(
    State(state): State<Arc<AppState>>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ObserverError> {
    let structure = parse_entity_id(&id)?;
    let item = InteriorItemId::from(parse_uuid(&item_id)?);
    let mut village = state.village.write().await;
    let removed = remove_interior(&mut village.store, structure, item)?;
    Ok(Json(removed))
}

// ---------------------------------------------------------------------------
// Archive
// ---------------------------------------------------------------------------

/// Archive the live village. The request body is the rendered PNG.
///
/// The save is validated before the archive is consulted, so an empty
/// village is rejected with `400` even when no archive is configured.
pub async fn save_village(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SaveQuery>,
    image: Bytes,
) -> Result<impl IntoResponse, ObserverError> {
    let title = query.title.unwrap_or_default();
    let snapshot = state.village.read().await.to_snapshot(&title);
    let record =
        snowglobe_db::save_village(state.archive.as_deref(), &snapshot, image.to_vec()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List saved villages, newest first.
pub async fn list_villages(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ObserverError> {
    let records = archive_of(&state)?.list().await?;
    Ok(Json(serde_json::json!({
        "count": records.len(),
        "villages": records,
    })))
}

/// Delete a saved village and its image.
pub async fn delete_village(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let id = parse_uuid(&id)?;
    archive_of(&state)?.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the live village with a saved one.
pub async fn load_village(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let id = parse_uuid(&id)?;
    let snapshot = archive_of(&state)?.load(id).await?;
    let restored = VillageState::from_snapshot(&snapshot, &state.config)
        .map_err(|e| ObserverError::Internal(e.to_string()))?;
    let frame = render_frame(&restored);
    *state.village.write().await = restored;
    info!(village = %id, title = %snapshot.title, "Saved village loaded");
    Ok(Json(frame))
}

/// Serve the PNG stored with a saved village.
pub async fn village_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let id = parse_uuid(&id)?;
    let bytes = archive_of(&state)?.image(id).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}

// ---------------------------------------------------------------------------
// Studio
// ---------------------------------------------------------------------------

/// Generate a song, drawing, or video frame from a description.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerationRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    if request.description.trim().is_empty() {
        return Err(StudioError::EmptyDescription.into());
    }
    let studio = state
        .studio
        .as_deref()
        .ok_or(ObserverError::Unavailable("content generation"))?;
    Ok(Json(studio.generate(&request).await?))
}
