//! Document export — pluggable, trait-based producer of a downloadable file
//! from the current form.
//!
//! Default: `UnavailableExporter`, which always reports that export is not
//! available. `MarkdownExporter` renders the preview as a markdown document.
//!
//! `AppState` holds an `Arc<dyn Exporter>`, chosen at startup via config.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::form::preview::{render_preview, render_preview_to_md};
use crate::models::form::FormState;

const UNAVAILABLE_MESSAGE: &str =
    "PDF download functionality requires additional libraries and is not available yet";

/// A finished document ready to be sent to the user.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export unavailable: {0}")]
    Unavailable(String),
}

/// Implement this to add an export format without touching the handlers.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn export(&self, form: &FormState) -> Result<ExportArtifact, ExportError>;

    /// Short name surfaced in logs.
    fn backend(&self) -> &'static str;
}

pub struct UnavailableExporter;

#[async_trait]
impl Exporter for UnavailableExporter {
    async fn export(&self, _form: &FormState) -> Result<ExportArtifact, ExportError> {
        Err(ExportError::Unavailable(UNAVAILABLE_MESSAGE.to_string()))
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}

pub struct MarkdownExporter;

#[async_trait]
impl Exporter for MarkdownExporter {
    async fn export(&self, form: &FormState) -> Result<ExportArtifact, ExportError> {
        let preview = render_preview(form);
        let md = render_preview_to_md(&preview);
        Ok(ExportArtifact {
            file_name: format!("{}.md", file_stem(&form.identity.name)),
            content_type: "text/markdown; charset=utf-8",
            body: Bytes::from(md.into_bytes()),
        })
    }

    fn backend(&self) -> &'static str {
        "markdown"
    }
}

/// "Jane Doe" → "jane-doe"; falls back to "resume".
fn file_stem(name: &str) -> String {
    let stem = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    if stem.is_empty() {
        "resume".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_always_errors() {
        let result = UnavailableExporter.export(&FormState::default()).await;
        assert!(matches!(result, Err(ExportError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_markdown_export() {
        let mut form = FormState::default();
        form.identity.name = "Jane Doe".into();
        form.identity.email = "jane@x.com".into();
        let artifact = MarkdownExporter.export(&form).await.unwrap();
        assert_eq!(artifact.file_name, "jane-doe.md");
        let text = std::str::from_utf8(&artifact.body).unwrap();
        assert!(text.starts_with("# Jane Doe\n\njane@x.com\n"));
    }

    #[test]
    fn test_file_stem_fallback() {
        assert_eq!(file_stem(""), "resume");
        assert_eq!(file_stem("  Zoë O'Neil "), "zo-o-neil");
    }
}
