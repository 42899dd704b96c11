use axum::http::header::{self, HeaderName};
use axum::Json;
use serde::Deserialize;

use crate::builder::form::FormState;
use crate::errors::AppError;
use crate::export::export_pdf;
use crate::models::resume::ProfileType;
use crate::render::render;

/// The builder state a client submits for export. `preview_active` mirrors
/// the builder's view flag: rasterizing the edit form is disallowed, so the
/// flag must be set.
#[derive(Deserialize)]
pub struct ExportRequest {
    pub profile_type: ProfileType,
    #[serde(default)]
    pub form: FormState,
    #[serde(default)]
    pub preview_active: bool,
}

/// POST /api/v1/export
pub async fn handle_export(
    Json(req): Json<ExportRequest>,
) -> Result<([(HeaderName, String); 2], Vec<u8>), AppError> {
    if !req.preview_active {
        return Err(AppError::PreviewNotActive);
    }

    let view = render(req.profile_type, &req.form);
    let pdf = export_pdf(&view).map_err(|e| AppError::Export(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", pdf.file_name),
            ),
        ],
        pdf.bytes,
    ))
}
