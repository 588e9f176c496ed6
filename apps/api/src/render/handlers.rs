use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::render::ExportedDocument;
use crate::state::AppState;

fn attachment_response(doc: ExportedDocument) -> Response {
    (
        [
            (header::CONTENT_TYPE, doc.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", doc.file_name),
            ),
        ],
        doc.bytes,
    )
        .into_response()
}

/// GET /api/v1/export/resume
///
/// Download of the current resume as a print document. A failed export
/// reports and changes nothing.
pub async fn handle_export_resume(State(state): State<AppState>) -> Result<Response, AppError> {
    let exported = {
        let core = state.lock_core();
        core.gate.active_tier().ok_or(AppError::BuilderLocked)?;
        state.exporter.export_resume(&core.resume)?
    };
    Ok(attachment_response(exported))
}

/// GET /api/v1/export/cover-letter
pub async fn handle_export_cover_letter(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let exported = {
        let core = state.lock_core();
        core.gate.active_tier().ok_or(AppError::BuilderLocked)?;
        state
            .exporter
            .export_cover_letter(&core.cover_letter, &core.resume)?
    };
    Ok(attachment_response(exported))
}
