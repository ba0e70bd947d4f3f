use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;

const MIME_PDF: &str = "application/pdf";
const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MIME_TXT: &str = "text/plain";
const MIME_FALLBACK: &str = "application/octet-stream";

/// A resume attachment as it will be sent in the `resume` multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime_type = mime_for_name(&name).to_string();
        Self {
            name,
            mime_type,
            content: content.into(),
        }
    }

    /// Reads a resume from disk. The MIME type is derived from the extension;
    /// unknown extensions are accepted and sent as `application/octet-stream`.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read resume file '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        Ok(Self::new(name, content))
    }
}

/// Maps the picker's accepted extensions (.pdf, .docx, .txt) to content types.
pub fn mime_for_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => MIME_PDF,
        "docx" => MIME_DOCX,
        "txt" => MIME_TXT,
        _ => MIME_FALLBACK,
    }
}

/// User-entered fields prior to submission. Nothing here is validated until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub role: String,
    pub job_description: String,
    pub resume_file: Option<ResumeFile>,
}

impl FormInput {
    /// The role to send, or `None` when the field is empty.
    pub fn role(&self) -> Option<&str> {
        non_empty(&self.role)
    }

    /// The job description to send, or `None` when the field is empty.
    pub fn job_description(&self) -> Option<&str> {
        non_empty(&self.job_description)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
