//! Decode, resample and re-encode a gallery image into its derivative.

use std::time::Instant;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, ImageError};

use crate::error::{CoreError, CoreResult};
use crate::fs::{FsStore, StoreError, StorePath};
use crate::galleries::gallery_path;
use crate::images::{derivative_name, ImageRepository};
use crate::resize::dimensions::{target_dimensions, Dimensions};

/// JPEG quality used for derivatives unless configured otherwise.
pub const DEFAULT_JPEG_QUALITY: u8 = 60;

/// A derivative written by [`ResizeService::resize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivative {
    pub path: StorePath,
    pub width: u32,
    pub height: u32,
}

/// Produces resized JPEG derivatives of gallery images.
#[derive(Debug, Clone)]
pub struct ResizeService {
    store: FsStore,
    images: ImageRepository,
    quality: u8,
}

impl ResizeService {
    /// `quality` is clamped to `1..=100`.
    pub fn new(store: FsStore, quality: u8) -> Self {
        Self {
            images: ImageRepository::new(store.clone()),
            store,
            quality: quality.clamp(1, 100),
        }
    }

    /// Resizes `file_name` in `gallery` and writes the derivative, replacing
    /// any earlier one for the same source.
    ///
    /// The source must be listed among the gallery's entries at call time.
    ///
    /// # Errors
    ///
    /// - [`CoreError::GalleryNotFound`] / [`CoreError::ImageNotFound`] if the
    ///   source cannot be located.
    /// - [`CoreError::ZeroDimensions`] if both sides of `dims` are auto.
    /// - [`CoreError::Editing`] if the source cannot be decoded or the
    ///   result cannot be encoded.
    pub fn resize(&self, gallery: &str, file_name: &str, dims: Dimensions) -> CoreResult<Derivative> {
        let source = self.images.find(gallery, file_name)?;
        if dims.is_auto() {
            return Err(CoreError::ZeroDimensions);
        }

        let started = Instant::now();
        let bytes = self.images.read(gallery, source.file_name())?;
        let editing = |source: ImageError| CoreError::Editing {
            image: file_name.to_string(),
            source,
        };

        let decoded = image::load_from_memory(&bytes).map_err(|e| {
            tracing::warn!(gallery, image = file_name, error = %e, "cannot decode image");
            editing(e)
        })?;
        let (width, height) = target_dimensions(decoded.dimensions(), &dims);
        let rgb = decoded
            .resize_exact(width, height, FilterType::Lanczos3)
            .to_rgb8();

        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, self.quality)
            .encode_image(&rgb)
            .map_err(editing)?;

        let path = gallery_path(gallery)?
            .join(&derivative_name(source.file_name()))
            .map_err(|_| CoreError::InvalidImageName(file_name.to_string()))?;
        match self.store.write_file(&path, &encoded) {
            Ok(()) => {}
            Err(StoreError::NotFound(_)) => {
                return Err(CoreError::GalleryNotFound(gallery.to_string()))
            }
            Err(e) => return Err(e.into()),
        }

        tracing::debug!(
            gallery,
            image = file_name,
            %dims,
            width,
            height,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "wrote derivative"
        );
        Ok(Derivative { path, width, height })
    }

    /// Reads the current content of a derivative file.
    ///
    /// Under concurrent resizes of the same source this may return the
    /// output of another request.
    pub fn read_derivative(&self, derivative: &Derivative) -> CoreResult<Vec<u8>> {
        Ok(self.store.read_file(&derivative.path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resize::Extent;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const MAX: u32 = 10_000;

    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
        let file = fs::File::create(path).unwrap();
        JpegEncoder::new_with_quality(file, 90).encode_image(&img).unwrap();
    }

    fn setup() -> (TempDir, ResizeService) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("Zoo")).unwrap();
        let service = ResizeService::new(FsStore::new(tmp.path()), DEFAULT_JPEG_QUALITY);
        (tmp, service)
    }

    fn decoded_size(path: &Path) -> (u32, u32) {
        image::open(path).unwrap().dimensions()
    }

    #[test]
    fn width_only_preserves_aspect_ratio() {
        let (tmp, service) = setup();
        create_test_jpeg(&tmp.path().join("Zoo").join("cat.jpg"), 200, 100);

        let derivative = service
            .resize("Zoo", "cat.jpg", Dimensions::parse("100x0", MAX).unwrap())
            .unwrap();

        assert_eq!(derivative.path.to_string(), "Zoo/cat-resized.jpg");
        assert_eq!((derivative.width, derivative.height), (100, 50));
        assert_eq!(decoded_size(&tmp.path().join("Zoo").join("cat-resized.jpg")), (100, 50));
    }

    #[test]
    fn explicit_dimensions_are_exact() {
        let (tmp, service) = setup();
        create_test_jpeg(&tmp.path().join("Zoo").join("cat.jpg"), 200, 100);

        service
            .resize("Zoo", "cat.jpg", Dimensions::parse("30x40", MAX).unwrap())
            .unwrap();

        assert_eq!(decoded_size(&tmp.path().join("Zoo").join("cat-resized.jpg")), (30, 40));
    }

    #[test]
    fn repeated_resize_is_idempotent() {
        let (tmp, service) = setup();
        create_test_jpeg(&tmp.path().join("Zoo").join("cat.jpg"), 120, 80);
        let dims = Dimensions { width: Extent::Auto, height: Extent::Pixels(40) };
        let out = tmp.path().join("Zoo").join("cat-resized.jpg");

        service.resize("Zoo", "cat.jpg", dims).unwrap();
        let first = decoded_size(&out);
        service.resize("Zoo", "cat.jpg", dims).unwrap();

        assert_eq!(first, (60, 40));
        assert_eq!(decoded_size(&out), first);
    }

    #[test]
    fn different_sizes_share_one_derivative() {
        let (tmp, service) = setup();
        create_test_jpeg(&tmp.path().join("Zoo").join("cat.jpg"), 100, 100);

        service.resize("Zoo", "cat.jpg", Dimensions::parse("50x0", MAX).unwrap()).unwrap();
        service.resize("Zoo", "cat.jpg", Dimensions::parse("20x0", MAX).unwrap()).unwrap();

        assert_eq!(decoded_size(&tmp.path().join("Zoo").join("cat-resized.jpg")), (20, 20));
    }

    #[test]
    fn png_with_alpha_becomes_jpeg() {
        let (tmp, service) = setup();
        let img = RgbaImage::from_pixel(40, 20, Rgba([255, 0, 0, 100]));
        img.save_with_format(tmp.path().join("Zoo").join("logo.png"), ImageFormat::Png)
            .unwrap();

        let derivative = service
            .resize("Zoo", "logo.png", Dimensions::parse("20x0", MAX).unwrap())
            .unwrap();

        let bytes = service.read_derivative(&derivative).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(image::load_from_memory(&bytes).unwrap().dimensions(), (20, 10));
    }

    #[test]
    fn both_zero_is_rejected_without_writing() {
        let (tmp, service) = setup();
        create_test_jpeg(&tmp.path().join("Zoo").join("cat.jpg"), 10, 10);

        let result = service.resize("Zoo", "cat.jpg", Dimensions::parse("0x0", MAX).unwrap());

        assert!(matches!(result, Err(CoreError::ZeroDimensions)));
        assert!(!tmp.path().join("Zoo").join("cat-resized.jpg").exists());
    }

    #[test]
    fn missing_image_is_not_found() {
        let (_tmp, service) = setup();
        let result = service.resize("Zoo", "ghost.jpg", Dimensions::parse("0x0", MAX).unwrap());
        assert!(matches!(result, Err(CoreError::ImageNotFound { .. })));
    }

    #[test]
    fn missing_gallery_is_not_found() {
        let (_tmp, service) = setup();
        let result = service.resize("Nope", "cat.jpg", Dimensions::parse("10x10", MAX).unwrap());
        assert!(matches!(result, Err(CoreError::GalleryNotFound(_))));
    }

    #[test]
    fn corrupt_source_is_editing_error() {
        let (tmp, service) = setup();
        fs::write(tmp.path().join("Zoo").join("broken.jpg"), b"definitely not a jpeg").unwrap();

        let result = service.resize("Zoo", "broken.jpg", Dimensions::parse("10x10", MAX).unwrap());

        assert!(matches!(result, Err(CoreError::Editing { .. })));
        assert!(!tmp.path().join("Zoo").join("broken-resized.jpg").exists());
    }

    #[test]
    fn quality_is_clamped() {
        let (tmp, _) = setup();
        assert_eq!(ResizeService::new(FsStore::new(tmp.path()), 0).quality, 1);
        assert_eq!(ResizeService::new(FsStore::new(tmp.path()), 255).quality, 100);
    }
}
