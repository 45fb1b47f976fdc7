use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gallery_core::CoreError;

use crate::dto::{
    CreateGalleryRequest, DeleteGalleryResponse, GalleryContentsResponse, GalleryDto,
    ImageDto, ListGalleriesResponse,
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_galleries(
    State(state): State<AppState>,
) -> Result<Json<ListGalleriesResponse>, AppError> {
    let galleries = state.run(|s| s.galleries.list()).await?;
    Ok(Json(ListGalleriesResponse {
        galleries: galleries.iter().map(GalleryDto::from).collect(),
    }))
}

pub async fn create_gallery(
    State(state): State<AppState>,
    payload: Result<Json<CreateGalleryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GalleryDto>), AppError> {
    // An unreadable body carries no usable name either
    let name = match payload {
        Ok(Json(req)) => req.name,
        Err(rejection) => {
            tracing::debug!("Rejected gallery body: {rejection}");
            return Err(CoreError::MissingName.into());
        }
    };

    let gallery = state.run(move |s| s.galleries.create(name.as_deref())).await?;
    Ok((StatusCode::CREATED, Json(GalleryDto::from(&gallery))))
}

pub async fn list_images(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<GalleryContentsResponse>, AppError> {
    let (gallery, images) = state
        .run(move |s| {
            let images = s.images.list(&path)?;
            let gallery = s.galleries.get(&path)?;
            Ok((gallery, images))
        })
        .await?;

    Ok(Json(GalleryContentsResponse {
        gallery: GalleryDto::from(&gallery),
        images: images.iter().map(ImageDto::from).collect(),
    }))
}

pub async fn delete_gallery(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<DeleteGalleryResponse>, AppError> {
    let name = path.clone();
    state.run(move |s| s.galleries.delete(&name)).await?;
    Ok(Json(DeleteGalleryResponse {
        code: StatusCode::OK.as_u16(),
        success: format!("Gallery {path} was successfully deleted"),
    }))
}
