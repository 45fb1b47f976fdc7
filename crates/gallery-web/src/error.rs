use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gallery_core::{CoreError, ErrorKind};
use serde_json::{json, Value};

#[derive(Debug)]
pub enum AppError {
    Core(CoreError),
    /// The request body could not be read as a multipart upload.
    Upload { status: StatusCode, message: String },
    Internal(String),
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError::Core(e)
    }
}

/// Everything needed to render one error payload.
struct ErrorShape {
    status: StatusCode,
    paths: &'static [&'static str],
    field: &'static str,
    name: &'static str,
    description: String,
}

fn shape(
    status: StatusCode,
    paths: &'static [&'static str],
    field: &'static str,
    name: &'static str,
    description: String,
) -> ErrorShape {
    ErrorShape {
        status,
        paths,
        field,
        name,
        description,
    }
}

impl AppError {
    fn shape(&self) -> ErrorShape {
        match self {
            AppError::Core(err) => {
                let status = status_for(err.kind());
                match err {
                    CoreError::MissingName => shape(
                        status,
                        &["name"],
                        "name",
                        "NAME_NOT_FOUND",
                        "Bad JSON object: 'name' is a required property".to_string(),
                    ),
                    CoreError::InvalidName(name) => shape(
                        status,
                        &["name"],
                        "name",
                        "INVALID_NAME",
                        format!("Bad JSON object: 'name' cannot include '/' or be a directory reference, got '{name}'"),
                    ),
                    CoreError::InvalidPath(path) => shape(
                        status,
                        &["path"],
                        "path",
                        "INVALID_NAME",
                        format!("Bad path: '{path}' is not a valid gallery name"),
                    ),
                    CoreError::InvalidImageName(img) => shape(
                        status,
                        &["img"],
                        "img",
                        "INVALID_NAME",
                        format!("Bad path: '{img}' is not a valid image name"),
                    ),
                    CoreError::MissingFile => shape(
                        status,
                        &["image"],
                        "image",
                        "NOT_EXISTS",
                        "Cannot upload image: image to upload was not found. Check if your key is named as 'image'".to_string(),
                    ),
                    CoreError::InvalidDimensions(spec) => shape(
                        status,
                        &["w", "h"],
                        "wxh",
                        "NOT_CORRECT",
                        format!("Request error: '{spec}' is not a valid {{w}}x{{h}} size"),
                    ),
                    CoreError::ZeroDimensions => shape(
                        status,
                        &["w", "h"],
                        "wxh",
                        "NOT_CORRECT",
                        "Request error: w and h cannot both be 0".to_string(),
                    ),
                    CoreError::AlreadyExists(name) => shape(
                        status,
                        &["name"],
                        "name",
                        "ALREADY_EXISTS",
                        format!("Cannot create directory: directory with name {name} already exists"),
                    ),
                    CoreError::NotEmpty(path) => shape(
                        status,
                        &["path"],
                        "path",
                        "NOT_EMPTY",
                        format!("Cannot delete directory: gallery {path} still contains images"),
                    ),
                    CoreError::GalleryNotFound(path) => shape(
                        status,
                        &["path"],
                        "path",
                        "NOT_EXISTS",
                        format!("Cannot read directory: directory with name {path} does not exist"),
                    ),
                    CoreError::ImageNotFound { gallery, image } => shape(
                        status,
                        &["img"],
                        "img",
                        "NOT_EXISTS",
                        format!("Image was not found: image with name {image} was not found in {gallery} gallery"),
                    ),
                    CoreError::Editing { image, .. } => shape(
                        status,
                        &["path"],
                        "path",
                        "EDITING_ERROR",
                        format!("Image was not edited: image {image} cannot be resized"),
                    ),
                    CoreError::Store(_) => internal(),
                }
            }
            AppError::Upload { status, message } => shape(
                *status,
                &["image"],
                "image",
                "BAD_REQUEST",
                format!("Cannot upload image: {message}"),
            ),
            AppError::Internal(_) => internal(),
        }
    }
}

/// HTTP status for each class of core failure.
fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Editing | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn internal() -> ErrorShape {
    ErrorShape {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        paths: &[],
        field: "error",
        name: "INTERNAL_ERROR",
        description: "Internal server error".to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the real error server-side, return generic message to client
        match &self {
            AppError::Core(CoreError::Store(e)) => tracing::error!("Storage error: {e}"),
            AppError::Core(e @ CoreError::Editing { .. }) => tracing::warn!("{e}"),
            AppError::Internal(msg) => tracing::error!("Internal error: {msg}"),
            _ => {}
        }

        let shape = self.shape();
        let mut body = json!({
            "code": shape.status.as_u16(),
            "payload": {
                "paths": shape.paths,
                "validator": "required",
                "example": Value::Null,
            },
            "description": shape.description,
        });
        if let Some(obj) = body.as_object_mut() {
            obj.insert(shape.field.to_string(), Value::from(shape.name));
        }

        (shape.status, axum::Json(body)).into_response()
    }
}
