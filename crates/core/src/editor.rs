//! Configuration handed to the embedded rich-text editor.
//!
//! The editor needs an API key from the environment. When it is missing the
//! editor surface must be replaced by a configuration notice, so
//! [`EditorConfig::from_api_key`] fails with [`CoreError::Configuration`]
//! instead of returning a half-usable config.

use serde::Serialize;

use crate::error::CoreError;

/// Plugins enabled in the editor.
pub const EDITOR_PLUGINS: &[&str] = &[
    "advlist",
    "autolink",
    "lists",
    "link",
    "image",
    "charmap",
    "preview",
    "anchor",
    "searchreplace",
    "visualblocks",
    "code",
    "fullscreen",
    "insertdatetime",
    "media",
    "table",
    "help",
    "wordcount",
];

/// Toolbar layout, one string per toolbar group.
pub const EDITOR_TOOLBAR: &str = "undo redo | blocks | bold italic forecolor | \
    alignleft aligncenter alignright alignjustify | \
    bullist numlist outdent indent | removeformat | help";

/// Editor height in pixels.
pub const EDITOR_HEIGHT: u32 = 500;

/// Notice shown in place of the editor when the key is missing.
pub const MISSING_KEY_NOTICE: &str =
    "Rich text editor is not configured: EDITOR_API_KEY is missing";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorConfig {
    pub api_key: String,
    pub plugins: Vec<&'static str>,
    pub toolbar: &'static str,
    pub height: u32,
}

impl EditorConfig {
    /// Build the editor config, or fail with a configuration error when the
    /// key is absent or blank.
    pub fn from_api_key(api_key: Option<&str>) -> Result<Self, CoreError> {
        match api_key.map(str::trim) {
            Some(key) if !key.is_empty() => Ok(Self {
                api_key: key.to_string(),
                plugins: EDITOR_PLUGINS.to_vec(),
                toolbar: EDITOR_TOOLBAR,
                height: EDITOR_HEIGHT,
            }),
            _ => Err(CoreError::Configuration(MISSING_KEY_NOTICE.into())),
        }
    }
}
