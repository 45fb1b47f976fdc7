use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use gallery_core::Upload;

use crate::dto::{DeleteImageResponse, ImageDto, UploadResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Multipart field that carries image files.
const IMAGE_FIELD: &str = "image";

pub async fn upload_images(
    State(state): State<AppState>,
    Path(path): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Upload {
        status: e.status(),
        message: e.body_text(),
    })?;

    let mut uploads = Vec::new();
    loop {
        let field = multipart.next_field().await.map_err(|e| AppError::Upload {
            status: e.status(),
            message: e.body_text(),
        })?;
        let Some(field) = field else { break };

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        // A field without a file name is a form value, not a file
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(|e| AppError::Upload {
            status: e.status(),
            message: e.body_text(),
        })?;
        uploads.push(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    let images = state.run(move |s| s.images.upload_all(&path, &uploads)).await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            uploaded: images.iter().map(ImageDto::from).collect(),
        }),
    ))
}

pub async fn fetch_image(
    State(state): State<AppState>,
    Path((path, img)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let mime = mime_guess::from_path(&img).first_or_octet_stream();
    let bytes = state.run(move |s| s.images.read(&path, &img)).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        bytes,
    )
        .into_response())
}

pub async fn delete_image(
    State(state): State<AppState>,
    Path((path, img)): Path<(String, String)>,
) -> Result<Json<DeleteImageResponse>, AppError> {
    let name = img.clone();
    state.run(move |s| s.images.delete(&path, &name)).await?;
    Ok(Json(DeleteImageResponse {
        code: StatusCode::OK.as_u16(),
        message: format!("Image {img} was successfully deleted"),
    }))
}
