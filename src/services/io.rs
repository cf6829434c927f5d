//! Image I/O operations service
//!
//! Separates file I/O from session logic. Decoding accepts the common raster
//! formats (PNG, JPEG, BMP, GIF, TIFF); encoding goes through the export
//! format handler so JPEG output never carries alpha.

use std::io::Cursor;
use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::config::{EditorConfig, OutputFormat};
use crate::error::{EditorError, Result};
use crate::services::format::ExportFormatHandler;

/// Service for handling image file input/output operations
pub struct ImageIoService;

impl ImageIoService {
    /// Load an image from a file path
    ///
    /// Tries extension-based format detection first, then falls back to
    /// content-based detection so a mislabeled file still loads.
    ///
    /// # Errors
    /// - `EditorError::Io` when the file is missing or unreadable
    /// - `EditorError::Decode` when the bytes are not a readable image
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(EditorError::file_io_error(
                "read image file",
                path_ref,
                &std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                debug!(
                    path = %path_ref.display(),
                    error = %e,
                    "extension-based loading failed, attempting content-based detection"
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    EditorError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data)
                    .map_err(|_| EditorError::decode_error_with_path(path_ref, &e))
            },
        }
    }

    /// Decode an image from in-memory bytes
    ///
    /// # Errors
    /// - `EditorError::Decode` when the bytes are not a readable image
    pub fn load_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
        image::load_from_memory(bytes).map_err(|e| {
            EditorError::decode(format!("Failed to decode image from bytes: {e}"))
        })
    }

    /// Encode an image to in-memory bytes in the given format
    ///
    /// # Errors
    /// - `EditorError::Encode` when the encoder fails
    pub fn encode(
        image: &DynamicImage,
        format: OutputFormat,
        jpeg_quality: u8,
    ) -> Result<Vec<u8>> {
        let prepared = ExportFormatHandler::convert_for_export(image, format);

        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        match format {
            OutputFormat::Png => {
                prepared
                    .write_to(&mut cursor, image::ImageFormat::Png)
                    .map_err(|e| EditorError::encode(format!("Failed to encode as PNG: {e}")))?;
            },
            OutputFormat::Jpeg => {
                let rgb = prepared.to_rgb8();
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, jpeg_quality);
                encoder
                    .encode_image(&rgb)
                    .map_err(|e| EditorError::encode(format!("Failed to encode as JPEG: {e}")))?;
            },
        }

        Ok(buffer)
    }

    /// Save an image to a file, format selected by the destination extension
    ///
    /// Unknown extensions fall back to PNG. Parent directories are created
    /// as needed.
    ///
    /// # Errors
    /// - `EditorError::Encode` when encoding fails
    /// - `EditorError::Io` when the bytes cannot be written
    pub fn save_image<P: AsRef<Path>>(
        image: &DynamicImage,
        path: P,
        config: &EditorConfig,
    ) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    EditorError::file_io_error("create output directory", parent, &e)
                })?;
            }
        }

        let format = ExportFormatHandler::format_for_path(path_ref);
        let bytes = Self::encode(image, format, config.jpeg_quality)?;

        std::fs::write(path_ref, bytes)
            .map_err(|e| EditorError::file_io_error("write image file", path_ref, &e))?;

        debug!(path = %path_ref.display(), %format, "saved image");
        Ok(())
    }
}
