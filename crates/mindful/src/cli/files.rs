//! Attachment loading and media export.

use mime::Mime;
use mindful::{Attachment, AttachmentKind, MindfulResult, StorageError, StorageErrorKind};
use std::path::Path;
use tracing::debug;

fn kind_for(extension: &str) -> Option<(AttachmentKind, String)> {
    let found = match extension.to_ascii_lowercase().as_str() {
        "png" => (AttachmentKind::Image, mime::IMAGE_PNG.to_string()),
        "jpg" | "jpeg" => (AttachmentKind::Image, mime::IMAGE_JPEG.to_string()),
        "gif" => (AttachmentKind::Image, mime::IMAGE_GIF.to_string()),
        "webp" => (AttachmentKind::Image, "image/webp".to_string()),
        "heic" => (AttachmentKind::Image, "image/heic".to_string()),
        "pdf" => (AttachmentKind::Pdf, mime::APPLICATION_PDF.to_string()),
        _ => return None,
    };
    Some(found)
}

/// File extension for a media MIME type.
pub fn extension_for(mime_type: &str) -> &'static str {
    let Ok(parsed) = mime_type.parse::<Mime>() else {
        return "bin";
    };
    let subtype = parsed.subtype();
    if parsed.type_() == mime::IMAGE {
        match subtype.as_str() {
            "jpeg" => "jpg",
            "webp" => "webp",
            "gif" => "gif",
            _ => "png",
        }
    } else if parsed.type_() == mime::VIDEO {
        match subtype.as_str() {
            "mp4" => "mp4",
            "webm" => "webm",
            _ => "bin",
        }
    } else {
        "bin"
    }
}

/// Read a file as an entry attachment.
///
/// # Errors
///
/// Unreadable files and extensions other than common images and PDF.
pub async fn load_attachment(path: &Path) -> MindfulResult<Attachment> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let (kind, mime_type) = kind_for(extension).ok_or_else(|| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: unsupported attachment type",
            path.display()
        )))
    })?;

    let data = tokio::fs::read(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    debug!(path = %path.display(), bytes = data.len(), mime = %mime_type, "Attachment loaded");

    Ok(Attachment {
        id: uuid::Uuid::new_v4().to_string(),
        kind,
        mime_type,
        data,
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })
}

/// Write bytes, creating parent directories.
pub async fn write_file(path: &Path, bytes: &[u8]) -> MindfulResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }
    tokio::fs::write(path, bytes).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    Ok(())
}
