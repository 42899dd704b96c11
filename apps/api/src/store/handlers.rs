use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{is_preset_avatar, ProfileRow};
use crate::models::resume::ResumeRow;
use crate::state::AppState;
use crate::store::{NewResume, ProfilePatch, ResumePatch};

/// Owner context supplied by the edge. Absent → the caller is not signed in.
#[derive(Deserialize)]
pub struct OwnerQuery {
    pub user_id: Option<Uuid>,
}

impl OwnerQuery {
    fn require(&self) -> Result<Uuid, AppError> {
        self.user_id.ok_or(AppError::Unauthenticated)
    }
}

#[derive(Deserialize)]
pub struct CreateResumeRequest {
    pub user_id: Option<Uuid>,
    #[serde(flatten)]
    pub resume: NewResume,
}

#[derive(Deserialize)]
pub struct UpdateResumeRequest {
    pub user_id: Option<Uuid>,
    #[serde(flatten)]
    pub patch: ResumePatch,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub user_id: Option<Uuid>,
    #[serde(flatten)]
    pub patch: ProfilePatch,
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let owner = params.require()?;
    let rows = state.store.list(owner).await?;
    Ok(Json(rows))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let owner = req.user_id.ok_or(AppError::Unauthenticated)?;
    let row = state.store.create(owner, req.resume).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResumeRequest>,
) -> Result<StatusCode, AppError> {
    let owner = req.user_id.ok_or(AppError::Unauthenticated)?;
    let updated = state.store.update(owner, id, req.patch).await?;
    if !updated {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/resumes/:id
///
/// Idempotent: deleting an already-deleted id still reports success.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<OwnerQuery>,
) -> Result<StatusCode, AppError> {
    let owner = params.require()?;
    state.store.delete(owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<ProfileRow>, AppError> {
    let owner = params.require()?;
    let profile = state
        .store
        .get_profile(owner)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {owner}")))?;
    Ok(Json(profile))
}

/// PATCH /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileRow>, AppError> {
    let owner = req.user_id.ok_or(AppError::Unauthenticated)?;
    if let Some(avatar) = req.patch.avatar.as_deref() {
        if !is_preset_avatar(avatar) {
            return Err(AppError::Validation(format!(
                "'{avatar}' is not a preset avatar"
            )));
        }
    }
    let profile = state.store.update_profile(owner, req.patch).await?;
    Ok(Json(profile))
}
