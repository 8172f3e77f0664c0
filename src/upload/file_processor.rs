use crate::error::UploadError;
use crate::upload::types::{ConversionRequest, FilePreview};
use crate::utils::file_size::FileSizeUtils;
use std::path::Path;

/// Extensions offered by the file dialog.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["json", "pdf", "txt", "text"];

const PREVIEW_LINES: usize = 3;
const PREVIEW_CHARS: usize = 150;

/// A document read from disk, ready to send.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub request: ConversionRequest,
    pub preview: FilePreview,
}

pub struct FileProcessor;

impl FileProcessor {
    pub async fn load(path: &Path) -> Result<LoadedDocument, UploadError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let file_type = Self::declared_type(path);
        let content = String::from_utf8_lossy(&bytes).into_owned();
        let preview = Self::preview(&file_name, file_type, bytes.len() as u64, &content);

        Ok(LoadedDocument {
            request: ConversionRequest {
                content,
                file_name,
                file_type: file_type.to_string(),
            },
            preview,
        })
    }

    /// MIME type implied by the extension, empty when unknown.
    pub fn declared_type(path: &Path) -> &'static str {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("json") => "application/json",
            Some("pdf") => "application/pdf",
            Some("txt") | Some("text") => "text/plain",
            _ => "",
        }
    }

    pub fn preview(file_name: &str, file_type: &str, size: u64, content: &str) -> FilePreview {
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

        let joined = lines
            .iter()
            .take(PREVIEW_LINES)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let mut snippet: String = joined.chars().take(PREVIEW_CHARS).collect();
        snippet.push_str("...");

        FilePreview {
            file_name: file_name.to_string(),
            file_type: if file_type.is_empty() {
                "text/plain".to_string()
            } else {
                file_type.to_string()
            },
            file_size: FileSizeUtils::format_kb(size),
            line_count: lines.len(),
            snippet,
        }
    }
}
