//! Template input and rendered output.
//!
//! Absence of a template is a value, not an error: reading a path that does
//! not exist gives [`TemplateContent::Absent`], and rendering that gives
//! [`ReplacedContent::Absent`].

use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;

/// Raw template text, if the source exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    Present(String),
    Absent,
}

impl TemplateContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Present(text) => Some(text),
            Self::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

impl From<&str> for TemplateContent {
    fn from(text: &str) -> Self {
        Self::Present(text.to_string())
    }
}

impl From<String> for TemplateContent {
    fn from(text: String) -> Self {
        Self::Present(text)
    }
}

/// Rendered text, mirroring the presence of the source template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacedContent {
    Present(String),
    Absent,
}

impl ReplacedContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Present(text) => Some(text),
            Self::Absent => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Present(text) => Some(text),
            Self::Absent => None,
        }
    }
}

/// Read the template at `path`.
///
/// A missing file is [`TemplateContent::Absent`]. Any other failure
/// (permissions, a directory, non-UTF-8 content) is an error.
pub fn read_template(path: &Path) -> Result<TemplateContent> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(TemplateContent::Present(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("no template at {}", path.display());
            Ok(TemplateContent::Absent)
        }
        Err(e) => Err(e.into()),
    }
}
