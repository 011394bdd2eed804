use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

/// Raw file metadata handed over by the external file picker.
///
/// The picker owns the dialog and the filesystem read; by the time a
/// selection reaches the workspace it is already fully in memory.
#[derive(Debug, Clone)]
pub struct FileSelection {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub contents: Vec<u8>,
}

impl FileSelection {
    pub fn new(name: &str, mime_type: &str, contents: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes: contents.len() as u64,
            contents,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// A file associated with an assignment draft or submission.
///
/// Owned by the in-progress draft until submission, after which ownership
/// transfers to the assignment. Never persisted beyond the session.
#[derive(Debug, Clone, Serialize)]
pub struct FileAttachment {
    /// unique per upload event, even for the same file selected twice
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    #[serde(skip_serializing)]
    pub preview: Option<PreviewHandle>,
}

impl FileAttachment {
    /// Builds an attachment from a picker selection, materializing a
    /// preview handle for image content.
    pub fn from_selection(selection: FileSelection) -> Self {
        let preview = if selection.is_image() {
            Some(PreviewHandle::new(selection.contents))
        } else {
            None
        };

        Self {
            id: Uuid::new_v4(),
            name: selection.name,
            mime_type: selection.mime_type,
            size_bytes: selection.size_bytes,
            preview,
        }
    }
}

/// Scoped handle on preview bytes for image attachments.
///
/// The buffer is shared with whatever the presentation layer is rendering
/// and released when the last handle drops, i.e. when the attachment is
/// removed or its session ends.
#[derive(Debug, Clone)]
pub struct PreviewHandle {
    bytes: Arc<Vec<u8>>,
}

impl PreviewHandle {
    fn new(contents: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(contents),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[cfg(test)]
    pub(crate) fn downgrade(&self) -> std::sync::Weak<Vec<u8>> {
        Arc::downgrade(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_selection_gets_a_preview() {
        let selection = FileSelection::new("diagram.png", "image/png", vec![1, 2, 3]);
        let attachment = FileAttachment::from_selection(selection);

        assert!(attachment.preview.is_some());
        assert_eq!(attachment.preview.unwrap().bytes(), &[1, 2, 3]);
    }

    #[test]
    fn non_image_selection_has_no_preview() {
        let selection = FileSelection::new("notes.pdf", "application/pdf", vec![0; 16]);
        let attachment = FileAttachment::from_selection(selection);

        assert!(attachment.preview.is_none());
        assert_eq!(attachment.size_bytes, 16);
    }

    #[test]
    fn attachment_ids_are_unique_per_upload() {
        let a = FileAttachment::from_selection(FileSelection::new("a.txt", "text/plain", vec![1]));
        let b = FileAttachment::from_selection(FileSelection::new("a.txt", "text/plain", vec![1]));

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn preview_buffer_is_released_when_the_attachment_drops() {
        let attachment = FileAttachment::from_selection(FileSelection::new(
            "photo.jpg",
            "image/jpeg",
            vec![9; 32],
        ));
        let weak = attachment.preview.as_ref().unwrap().downgrade();

        drop(attachment);
        assert!(weak.upgrade().is_none());
    }
}
