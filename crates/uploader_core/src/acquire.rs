use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use thiserror::Error;

/// Advisory filter handed to the native picker. `acquire` is the real gate.
pub const PICKER_ACCEPT: &str = "image/*";

/// Blocking notice shown when a non-image is picked or dropped.
pub const NOT_AN_IMAGE_NOTICE: &str = "Please choose an image (jpg/png/webp...).";

const IMAGE_PREFIX: &str = "image/";

pub type FileId = u64;

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

/// A file as reported by the picker or a drop payload, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    /// Declared media type; empty when the host could not tell.
    pub media_type: String,
    pub payload: Bytes,
}

impl FileCandidate {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            payload: payload.into(),
        }
    }
}

/// The validated image currently chosen for submission.
///
/// Each successful `acquire` yields a fresh `id`, even for identical content,
/// so consumers compare selections by identity rather than by bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    id: FileId,
    name: String,
    media_type: String,
    payload: Bytes,
}

impl SelectedFile {
    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no file was provided")]
    NoFile,
    #[error("{media_type:?} is not an image media type")]
    NotAnImage { media_type: String },
}

/// Validates a picked or dropped candidate.
///
/// Both input channels go through here. Only media types starting with
/// `image/` (ASCII case-insensitive) are accepted.
pub fn acquire(candidate: Option<FileCandidate>) -> Result<SelectedFile, ValidationError> {
    let candidate = candidate.ok_or(ValidationError::NoFile)?;
    if !is_image_media_type(&candidate.media_type) {
        return Err(ValidationError::NotAnImage {
            media_type: candidate.media_type,
        });
    }

    Ok(SelectedFile {
        id: NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed),
        name: candidate.name,
        media_type: candidate.media_type,
        payload: candidate.payload,
    })
}

fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .get(..IMAGE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_PREFIX))
}
