//! Image I/O operations service
//!
//! Decode and encode are the collaborator boundary around the pure transform:
//! everything filesystem- or codec-shaped lives here so the orchestrator can
//! treat it as a single fallible step per file.

use crate::error::{Result, UnblackError};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Service for image file input/output
pub struct ImageIoService;

impl ImageIoService {
    /// Load an image from a file path
    ///
    /// Tries extension-based format detection first and falls back to
    /// content-based detection, so a misnamed file still decodes when its
    /// actual format is supported.
    ///
    /// # Errors
    ///
    /// Returns `UnblackError::Decode` when the file cannot be parsed as an
    /// image by either method, and `UnblackError::Io` when it cannot be read.
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(UnblackError::file_io_error(
                "read image file",
                path_ref,
                &std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    UnblackError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data)
                    .map_err(|content_err| UnblackError::decode_error(path_ref, &content_err))
            },
        }
    }

    /// Save an RGBA image, creating parent directories as needed
    ///
    /// The codec is selected from the path's extension; callers are expected
    /// to have routed the path through
    /// [`OutputFormatHandler::ensure_transparency_capable`](crate::services::OutputFormatHandler::ensure_transparency_capable)
    /// first. An existing file at the same path is silently overwritten.
    ///
    /// # Errors
    ///
    /// Returns `UnblackError::Io` when the parent directory cannot be created
    /// and `UnblackError::Write` when encoding fails.
    pub fn save_image<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                UnblackError::file_io_error("create output directory", parent, &e)
            })?;
        }

        image
            .save(path_ref)
            .map_err(|e| UnblackError::write_error(path_ref, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_load_image_missing_file() {
        let result = ImageIoService::load_image("/definitely/not/here.png");
        assert!(matches!(result, Err(UnblackError::Io(_))));
    }

    #[test]
    fn test_load_image_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.jpg");
        std::fs::write(&path, b"not an image at all").unwrap();

        let result = ImageIoService::load_image(&path);
        assert!(matches!(result, Err(UnblackError::Decode(_))));
    }

    #[test]
    fn test_load_image_content_detection_for_misnamed_file() {
        let dir = tempfile::tempdir().unwrap();
        let png_path = dir.path().join("actually_png.jpg");

        // PNG bytes under a .jpg name still decode via content detection
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        std::fs::write(&png_path, &bytes).unwrap();

        let loaded = ImageIoService::load_image(&png_path).unwrap();
        assert_eq!(loaded.to_rgba8().get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_save_image_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/deeply/out.png");

        let img = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 0]));
        ImageIoService::save_image(&img, &out).unwrap();

        assert!(out.exists());
        let reloaded = image::open(&out).unwrap().to_rgba8();
        assert_eq!(reloaded.get_pixel(0, 0), &Rgba([1, 2, 3, 0]));
    }

    #[test]
    fn test_save_image_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.png");

        let first = RgbaImage::from_pixel(1, 1, Rgba([9, 9, 9, 255]));
        ImageIoService::save_image(&first, &out).unwrap();

        let second = RgbaImage::from_pixel(1, 1, Rgba([7, 7, 7, 0]));
        ImageIoService::save_image(&second, &out).unwrap();

        let reloaded = image::open(&out).unwrap().to_rgba8();
        assert_eq!(reloaded.get_pixel(0, 0), &Rgba([7, 7, 7, 0]));
    }
}
