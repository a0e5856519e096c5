//! Attachment to request-part conversion.

use mindful_core::{Attachment, AttachmentKind, Input, MediaSource};

/// The inline request part carrying an attachment's bytes.
pub fn attachment_part(attachment: &Attachment) -> Input {
    let source = MediaSource::Binary(attachment.data.clone());
    match attachment.kind {
        AttachmentKind::Image => Input::Image {
            mime: attachment.mime_type.clone(),
            source,
        },
        AttachmentKind::Pdf => Input::Document {
            mime: attachment.mime_type.clone(),
            source,
            filename: Some(attachment.name.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_becomes_named_document() {
        let attachment = Attachment {
            id: "a1".to_string(),
            kind: AttachmentKind::Pdf,
            mime_type: "application/pdf".to_string(),
            data: vec![37, 80, 68, 70],
            name: "notes.pdf".to_string(),
        };

        match attachment_part(&attachment) {
            Input::Document { mime, filename, .. } => {
                assert_eq!(mime, "application/pdf");
                assert_eq!(filename.as_deref(), Some("notes.pdf"));
            }
            other => panic!("expected document part, got {:?}", other),
        }
    }
}
