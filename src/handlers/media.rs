use std::path::Path;

use actix_web::{web, HttpResponse};

use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::handlers::response::EnvelopeSchema;
use crate::AppState;

fn content_type(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}

/// GET /media/{kind}/{id}/{file}
///
/// Serves an uploaded image. `kind` is `users`, `categories` or `products`.
#[utoipa::path(
    get,
    path = "/media/{kind}/{id}/{file}",
    params(
        ("kind" = String, Path, description = "users | categories | products"),
        ("id" = i32, Path, description = "Owner id"),
        ("file" = String, Path, description = "File name"),
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "No such file", body = EnvelopeSchema),
    ),
    tag = "media"
)]
pub async fn get_media(
    state: web::Data<AppState>,
    path: web::Path<(String, i32, String)>,
) -> Result<HttpResponse, AppError> {
    let (kind, owner_id, file_name) = path.into_inner();

    let (mime, bytes) = web::block(move || {
        let path = state.catalog.media_path(&kind, owner_id, &file_name)?;
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DomainError::NotFound("file"),
            _ => DomainError::Storage(format!("reading {}: {e}", path.display())),
        })?;
        Ok::<_, DomainError>((content_type(&path), bytes))
    })
    .await??;

    Ok(HttpResponse::Ok().content_type(mime).body(bytes))
}
