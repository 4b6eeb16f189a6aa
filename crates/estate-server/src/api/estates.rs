//! Estate, tree, stats and drone plan endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use estate_core::models::{DronePlan, Estate, EstateId, EstateStats, NewEstate, NewTree, StoredPlan};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct DronePlanQuery {
    /// Distance budget; when set the response includes the landing cell
    #[serde(alias = "distance")]
    pub max_distance: Option<u64>,
}

/// Create a new estate.
pub async fn create_estate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewEstate>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let estate = state.registry().create_estate(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(IdResponse {
            id: estate.id.to_string(),
        }),
    ))
}

/// Get a specific estate by ID.
pub async fn get_estate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Estate>, ApiError> {
    let estate = state.registry().get_estate(&EstateId::new(id)).await?;
    Ok(Json(estate))
}

/// Plant a tree on an estate.
pub async fn add_tree(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<NewTree>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let tree = state
        .registry()
        .place_tree(&EstateId::new(id), request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(IdResponse {
            id: tree.id.to_string(),
        }),
    ))
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EstateStats>, ApiError> {
    let stats = state.stats().compute_stats(&EstateId::new(id)).await?;
    Ok(Json(stats))
}

/// Survey distance, optionally limited by `max_distance`.
pub async fn get_drone_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<DronePlanQuery>, QueryRejection>,
) -> Result<Json<DronePlan>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let estate_id = EstateId::new(id);

    let plan = match query.max_distance {
        Some(max_distance) => {
            state
                .planner()
                .plan_with_limit(&estate_id, max_distance)
                .await?
        }
        None => DronePlan {
            distance: state.planner().compute_flight_distance(&estate_id).await?,
            rest: None,
        },
    };
    Ok(Json(plan))
}

/// Recompute and store the survey distance.
pub async fn refresh_drone_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StoredPlan>, ApiError> {
    let plan = state.planner().refresh_plan(&EstateId::new(id)).await?;
    Ok(Json(plan))
}
