pub mod galleries;
pub mod images;
pub mod resize;


use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/gallery",
            get(galleries::list_galleries).post(galleries::create_gallery),
        )
        .route(
            "/gallery/{path}",
            get(galleries::list_images)
                .post(images::upload_images)
                .delete(galleries::delete_gallery),
        )
        .route(
            "/gallery/{path}/{img}",
            get(images::fetch_image).delete(images::delete_image),
        )
        .route("/{size}/gallery/{path}/{img}", get(resize::resize_image))
}
