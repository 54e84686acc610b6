use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SelectionError;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub raw_text: String,
}

/// Outcome of one upload, as returned by `POST /api/upload`.
/// Every field is optional: whatever the backend sends is displayed best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub resume_data: Option<ResumeData>,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl ScreeningResult {
    /// Match score as a percentage, or the literal "N/A" when the backend gave none.
    pub fn score_label(&self) -> String {
        score_label(self.match_score)
    }

    pub fn raw_text(&self) -> &str {
        self.resume_data
            .as_ref()
            .map(|d| d.raw_text.as_str())
            .unwrap_or("")
    }

    /// `details` pretty-printed as JSON; absent details print as `null`.
    pub fn details_json(&self) -> String {
        serde_json::to_string_pretty(self.details.as_ref().unwrap_or(&Value::Null))
            .unwrap_or_else(|_| "null".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchEnvelope {
    pub results: Vec<ScreeningResult>,
}

/// The upload endpoint answers either with a single flat result or with a batch
/// envelope (`{ success, total_files, results: [...] }`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Batch(BatchEnvelope),
    Single(ScreeningResult),
}

impl UploadResponse {
    /// One file goes out per submission, so only the first batch entry is kept.
    pub fn into_result(self) -> ScreeningResult {
        match self {
            UploadResponse::Single(result) => result,
            UploadResponse::Batch(batch) => {
                batch
                    .results
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| ScreeningResult {
                        error: Some("No results returned".to_string()),
                        ..Default::default()
                    })
            }
        }
    }
}

/// A resume chosen for upload. Only PDF and DOCX files can be selected.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Result<Self, SelectionError> {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name)
            .ok_or_else(|| SelectionError::UnsupportedType(file_name.clone()))?;
        Ok(Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        })
    }

    pub async fn from_path(path: &Path) -> Result<Self, SelectionError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Check the type before touching the disk.
        if content_type_for(&file_name).is_none() {
            return Err(SelectionError::UnsupportedType(file_name));
        }
        let bytes = tokio::fs::read(path).await?;
        Self::new(file_name, bytes)
    }
}

/// `85%`, `72.5%`, or `N/A` when there is no score.
pub fn score_label(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{score}%"),
        None => "N/A".to_string(),
    }
}

fn content_type_for(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some(PDF_MIME),
        "docx" => Some(DOCX_MIME),
        _ => None,
    }
}
