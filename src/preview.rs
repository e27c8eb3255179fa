//! Preview content built from fetched file bytes.
//!
//! The browser fetches raw bytes from the server and turns them into one of
//! these variants for the preview pane. Image decoding runs on a blocking
//! task since the `image` crate is synchronous.

use crate::file_type::FileKind;

/// Decoded preview content for the currently selected file.
/// At most one preview exists at a time; it is dropped (releasing the
/// owned bytes) whenever a new selection replaces it.
#[derive(Debug, Clone)]
pub enum ContentPreview {
    Text {
        file_name: String,
        content: String,
        line_count: usize,
    },
    Image {
        file_name: String,
        data: Vec<u8>,
        width: u32,
        height: u32,
    },
    /// A file type with no inline renderer. Not an error; the user can
    /// still download it.
    Unsupported {
        file_name: String,
        file_type: String,
        size: u64,
    },
}

impl ContentPreview {
    pub fn file_name(&self) -> &str {
        match self {
            ContentPreview::Text { file_name, .. } => file_name,
            ContentPreview::Image { file_name, .. } => file_name,
            ContentPreview::Unsupported { file_name, .. } => file_name,
        }
    }
}

/// Build a text preview from decoded content.
pub fn text_preview(file_name: String, content: String) -> ContentPreview {
    let line_count = content.lines().count();
    ContentPreview::Text {
        file_name,
        content,
        line_count,
    }
}

/// Decode fetched image bytes to validate them and get dimensions.
pub fn decode_image(file_name: String, data: Vec<u8>) -> Result<ContentPreview, String> {
    let img =
        image::load_from_memory(&data).map_err(|e| format!("Failed to decode image: {}", e))?;

    let width = img.width();
    let height = img.height();

    Ok(ContentPreview::Image {
        file_name,
        data,
        width,
        height,
    })
}

/// Build the preview for non-text bytes according to the file kind.
pub async fn binary_preview(
    kind: FileKind,
    file_name: String,
    file_type: String,
    data: Vec<u8>,
) -> Result<ContentPreview, String> {
    match kind {
        FileKind::Image => {
            tokio::task::spawn_blocking(move || decode_image(file_name, data))
                .await
                .map_err(|e| format!("Task error: {}", e))?
        }
        FileKind::Pdf => crate::pdf_preview::load_pdf_preview_async(data, file_name).await,
        FileKind::Text | FileKind::OtherBinary => {
            let size = data.len() as u64;
            Ok(ContentPreview::Unsupported {
                file_name,
                file_type,
                size,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_preview_counts_lines() {
        let preview = text_preview("notes.txt".to_string(), "one\ntwo\nthree".to_string());
        match preview {
            ContentPreview::Text {
                line_count,
                content,
                ..
            } => {
                assert_eq!(line_count, 3);
                assert_eq!(content, "one\ntwo\nthree");
            }
            _ => panic!("expected text preview"),
        }
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        let result = decode_image("broken.png".to_string(), vec![0, 1, 2, 3]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_image_reads_dimensions() {
        // Encode a tiny image in memory so the test needs no fixture file
        let img = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
        let mut png_data = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut png_data),
                image::ImageFormat::Png,
            )
            .unwrap();

        let preview = decode_image("tiny.png".to_string(), png_data).unwrap();
        match preview {
            ContentPreview::Image { width, height, .. } => {
                assert_eq!(width, 3);
                assert_eq!(height, 2);
            }
            _ => panic!("expected image preview"),
        }
    }
}
