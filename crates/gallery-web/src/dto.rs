use chrono::{DateTime, Utc};
use gallery_core::{Gallery, Image};
use serde::{Deserialize, Serialize};
use url::Url;

/// Percent-encodes each segment and joins them with `/`.
///
/// Uses URL path-segment rules, so a space becomes `%20` and a literal `/`
/// inside a segment becomes `%2F`.
pub fn encode_path(segments: &[&str]) -> String {
    let mut url = Url::parse("http://localhost/").expect("static base URL is valid");
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().trim_start_matches('/').to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateGalleryRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GalleryDto {
    pub path: String,
    pub name: String,
}

impl From<&Gallery> for GalleryDto {
    fn from(gallery: &Gallery) -> Self {
        Self {
            path: encode_path(&[gallery.name()]),
            name: gallery.name().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListGalleriesResponse {
    pub galleries: Vec<GalleryDto>,
}

#[derive(Debug, Serialize)]
pub struct ImageDto {
    /// Stored file name.
    pub path: String,
    pub fullpath: String,
    /// Logical name: the file name up to its first `.`.
    pub name: String,
    pub modified: Option<DateTime<Utc>>,
}

impl From<&Image> for ImageDto {
    fn from(image: &Image) -> Self {
        Self {
            path: image.file_name().to_string(),
            fullpath: encode_path(&[image.gallery(), image.file_name()]),
            name: image.logical_name().to_string(),
            modified: image.modified().map(DateTime::<Utc>::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GalleryContentsResponse {
    pub gallery: GalleryDto,
    pub images: Vec<ImageDto>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub uploaded: Vec<ImageDto>,
}

#[derive(Debug, Serialize)]
pub struct DeleteGalleryResponse {
    pub code: u16,
    pub success: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteImageResponse {
    pub code: u16,
    pub message: String,
}
