use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use gallery_core::Dimensions;

use crate::error::AppError;
use crate::state::AppState;

/// `GET /{w}x{h}/gallery/{path}/{img}`: resizes and returns the derivative.
pub async fn resize_image(
    State(state): State<AppState>,
    Path((size, path, img)): Path<(String, String, String)>,
) -> Result<Response, AppError> {
    let dims = Dimensions::parse(&size, state.config.resize.max_dimension)?;

    let bytes = state
        .run(move |s| {
            let derivative = s.resizer.resize(&path, &img, dims)?;
            tracing::debug!(
                derivative = %derivative.path,
                width = derivative.width,
                height = derivative.height,
                "serving derivative"
            );
            s.resizer.read_derivative(&derivative)
        })
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        bytes,
    )
        .into_response())
}
