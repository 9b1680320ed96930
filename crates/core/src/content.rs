//! Module content kinds.
//!
//! A content entry in a module points at exactly one item: a text, a video,
//! an image, or a file. Each kind lives in its own table and has one
//! kind-specific body column next to the shared item columns.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{validate_title, validate_url, MAX_ITEM_TITLE_LEN};

/// The kind of item a content entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Video,
    Image,
    File,
}

/// All content kinds, in the order they are offered to course authors.
pub const ALL_KINDS: [ContentKind; 4] = [
    ContentKind::Text,
    ContentKind::Video,
    ContentKind::Image,
    ContentKind::File,
];

impl ContentKind {
    /// Lowercase kind name as used in URLs and in the `contents.kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Video => "video",
            ContentKind::Image => "image",
            ContentKind::File => "file",
        }
    }

    /// Parse a kind name. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_KINDS.into_iter().find(|k| k.as_str() == name)
    }

    /// Parse a kind name, rejecting unknown names with a validation error.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        Self::from_name(name).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown content type '{name}'. Must be one of: text, video, image, file"
            ))
        })
    }

    /// Table holding items of this kind.
    pub fn table(self) -> &'static str {
        match self {
            ContentKind::Text => "texts",
            ContentKind::Video => "videos",
            ContentKind::Image => "images",
            ContentKind::File => "files",
        }
    }

    /// Kind-specific column holding the item body.
    pub fn body_column(self) -> &'static str {
        match self {
            ContentKind::Text => "content",
            ContentKind::Video => "url",
            ContentKind::Image | ContentKind::File => "file",
        }
    }

    /// Upload directory for kinds backed by stored media.
    pub fn upload_dir(self) -> Option<&'static str> {
        match self {
            ContentKind::Image => Some("images"),
            ContentKind::File => Some("files"),
            ContentKind::Text | ContentKind::Video => None,
        }
    }
}

impl TryFrom<String> for ContentKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage path for an uploaded media item.
///
/// The file name is reduced to its last path component and placed under the
/// kind's upload directory, e.g. `("notes/week1.pdf", File)` becomes
/// `files/week1.pdf`. Kinds without an upload directory keep the body as-is.
pub fn media_path(kind: ContentKind, file_name: &str) -> String {
    match kind.upload_dir() {
        Some(dir) => {
            let base = file_name
                .rsplit(['/', '\\'])
                .next()
                .unwrap_or(file_name);
            format!("{dir}/{base}")
        }
        None => file_name.to_string(),
    }
}

/// Validate an item's title and body for `kind`, returning the body to store.
///
/// Video bodies must be absolute URLs. Image and file bodies are turned into
/// storage paths with [`media_path`].
pub fn prepare_item(kind: ContentKind, title: &str, body: &str) -> Result<String, CoreError> {
    validate_title("title", title, MAX_ITEM_TITLE_LEN)?;
    let body = body.trim();
    if body.is_empty() {
        return Err(CoreError::Validation(format!(
            "{} must not be empty",
            kind.body_column()
        )));
    }
    match kind {
        ContentKind::Text => Ok(body.to_string()),
        ContentKind::Video => {
            validate_url(body)?;
            Ok(body.to_string())
        }
        ContentKind::Image | ContentKind::File => Ok(media_path(kind, body)),
    }
}
