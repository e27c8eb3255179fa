//! PDF preview from fetched bytes.
//!
//! Scanned PDFs usually carry one JPEG image per page; for those the first
//! embedded JPEG is pulled out and re-encoded as PNG for the preview pane.
//! Text-based PDFs fall back to plain text extraction via `pdf-extract`.

use lopdf::{Document, Object};

use crate::preview::ContentPreview;

/// Build a preview from PDF bytes: embedded image first, text fallback.
pub fn load_pdf_preview(data: &[u8], file_name: String) -> Result<ContentPreview, String> {
    if let Ok(preview) = extract_first_image(data, file_name.clone()) {
        return Ok(preview);
    }
    extract_text(data, file_name)
}

/// Scan page XObjects for the first JPEG-encoded image stream.
fn extract_first_image(data: &[u8], file_name: String) -> Result<ContentPreview, String> {
    let doc = Document::load_mem(data).map_err(|e| format!("Failed to parse PDF: {}", e))?;

    for page_id in doc.page_iter() {
        let (resources, _) = doc.get_page_resources(page_id);
        let Some(resources) = resources else {
            continue;
        };
        let Ok(xobjects) = resources.get(b"XObject").and_then(Object::as_dict) else {
            continue;
        };

        for (_, obj) in xobjects.iter() {
            let Ok(stream) = obj
                .as_reference()
                .and_then(|id| doc.get_object(id))
                .and_then(Object::as_stream)
            else {
                continue;
            };

            let is_image = stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name_str)
                .map(|s| s == "Image")
                .unwrap_or(false);
            let is_jpeg = stream
                .dict
                .get(b"Filter")
                .and_then(Object::as_name_str)
                .map(|f| f == "DCTDecode")
                .unwrap_or(false);

            if is_image && is_jpeg {
                if let Ok(preview) = reencode_jpeg(&stream.content, file_name.clone()) {
                    return Ok(preview);
                }
            }
        }
    }

    Err("No embedded images found".to_string())
}

fn reencode_jpeg(jpeg_data: &[u8], file_name: String) -> Result<ContentPreview, String> {
    let img = image::load_from_memory_with_format(jpeg_data, image::ImageFormat::Jpeg)
        .map_err(|e| format!("Failed to decode JPEG: {}", e))?;

    let mut png_data = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut png_data),
        image::ImageFormat::Png,
    )
    .map_err(|e| format!("Failed to encode PNG: {}", e))?;

    Ok(ContentPreview::Image {
        file_name,
        width: img.width(),
        height: img.height(),
        data: png_data,
    })
}

fn extract_text(data: &[u8], file_name: String) -> Result<ContentPreview, String> {
    let content = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| format!("Failed to extract text: {}", e))?;

    let content = content.trim().to_string();
    if content.is_empty() {
        return Err("PDF contains no extractable text or images".to_string());
    }

    Ok(crate::preview::text_preview(file_name, content))
}

/// Async wrapper; parsing and decoding are CPU-bound.
pub async fn load_pdf_preview_async(
    data: Vec<u8>,
    file_name: String,
) -> Result<ContentPreview, String> {
    tokio::task::spawn_blocking(move || load_pdf_preview(&data, file_name))
        .await
        .map_err(|e| format!("Task error: {}", e))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let result = load_pdf_preview(b"definitely not a pdf", "bad.pdf".to_string());
        assert!(result.is_err());
    }
}
