#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::Path;

use tracing::{debug, info};

use crate::api::ApiError;
use crate::errors::SelectionError;
use crate::lifecycle::{Begin, RequestState, Submission};
use crate::models::{ResumeFile, ScreeningResult};
use crate::state::AppState;

pub const SCREENING_FAILED: &str = "Failed to process resume. Please try again.";

/// What goes out on one screening submit.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub resume: ResumeFile,
    pub job_description: String,
}

/// The upload form and the result of its latest submission.
pub struct ScreeningView {
    state: AppState,
    resume: Option<ResumeFile>,
    job_description: String,
    request: RequestState<ScreeningResult>,
}

impl ScreeningView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            resume: None,
            job_description: String::new(),
            request: RequestState::Idle,
        }
    }

    pub fn select_resume(&mut self, resume: ResumeFile) {
        debug!("Selected resume {}", resume.file_name);
        self.resume = Some(resume);
    }

    /// Reads and selects a file. On error the previous selection stays.
    pub async fn select_resume_path(&mut self, path: &Path) -> Result<(), SelectionError> {
        let resume = ResumeFile::from_path(path).await?;
        self.select_resume(resume);
        Ok(())
    }

    pub fn set_job_description(&mut self, text: &str) {
        self.job_description = text.to_string();
    }

    pub fn resume(&self) -> Option<&ResumeFile> {
        self.resume.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn request(&self) -> &RequestState<ScreeningResult> {
        &self.request
    }

    /// The submit control is disabled while a request is outstanding.
    pub fn can_submit(&self) -> bool {
        !self.request.is_submitting()
    }

    /// Validates the form and moves to `Submitting`. Missing input is a silent no-op.
    pub fn begin(&mut self) -> Begin<UploadRequest> {
        if !self.can_submit() {
            return Begin::Skipped;
        }
        let Some(resume) = self.resume.clone() else {
            return Begin::Skipped;
        };
        if self.job_description.is_empty() {
            return Begin::Skipped;
        }
        if !self.state.session.is_authenticated() {
            self.request = RequestState::Unauthorized;
            return Begin::Unauthorized;
        }

        self.request = RequestState::Submitting;
        Begin::Send(UploadRequest {
            resume,
            job_description: self.job_description.clone(),
        })
    }

    pub fn finish(&mut self, outcome: Result<ScreeningResult, ApiError>) -> Submission {
        self.request = RequestState::settle(outcome, SCREENING_FAILED);
        match &self.request {
            RequestState::Succeeded(result) => info!("Screening finished: {}", result.score_label()),
            RequestState::Unauthorized => self.state.session.invalidate(),
            _ => {}
        }
        Submission::from(&self.request)
    }

    pub async fn submit(&mut self) -> Submission {
        match self.begin() {
            Begin::Skipped => Submission::Skipped,
            Begin::Unauthorized => Submission::Unauthorized,
            Begin::Send(request) => {
                let backend = self.state.backend.clone();
                let outcome = backend
                    .upload(&request.resume, &request.job_description)
                    .await;
                self.finish(outcome)
            }
        }
    }

    /// Drops form input and any result, e.g. on logout.
    pub fn reset(&mut self) {
        self.resume = None;
        self.job_description.clear();
        self.request = RequestState::Idle;
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Screen Resume\n");
        let selected = self
            .resume
            .as_ref()
            .map(|r| r.file_name.as_str())
            .unwrap_or("(no file selected)");
        let _ = writeln!(out, "Upload Resume (PDF/DOCX): {selected}");
        let _ = writeln!(out, "Paste Job Description:");
        if self.job_description.is_empty() {
            out.push_str("  (empty)\n");
        } else {
            for line in self.job_description.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
        if self.request.is_submitting() {
            out.push_str("[Processing...] (disabled)\n");
        } else {
            out.push_str("[Screen Resume]\n");
        }

        match &self.request {
            RequestState::Succeeded(result) => {
                out.push('\n');
                out.push_str(&render_result(result));
            }
            RequestState::Failed(message) => {
                let _ = writeln!(out, "\n{message}");
            }
            RequestState::Idle | RequestState::Submitting | RequestState::Unauthorized => {}
        }
        out
    }
}

fn render_result(result: &ScreeningResult) -> String {
    let mut out = String::from("Results\n");
    if let Some(filename) = &result.filename {
        let _ = writeln!(out, "File: {filename}");
    }
    if let Some(error) = &result.error {
        let _ = writeln!(out, "Error: {error}");
    }
    let _ = writeln!(out, "⭐ Match Score: {}", result.score_label());
    let _ = writeln!(out, "Resume Extract:\n{}", result.raw_text());
    let _ = writeln!(out, "Details:\n{}", result.details_json());
    out
}
