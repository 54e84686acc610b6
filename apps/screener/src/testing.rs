//! In-memory backend for unit tests. Records every call so tests can assert that a
//! skipped submission never reached the network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, Backend, HealthStatus};
use crate::models::{
    Credentials, HistoryEntry, HistoryPage, Identity, Registration, ResumeFile, ScreeningResult,
    SearchMatch, SearchResponse,
};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(String),
    Register(String),
    Logout,
    Upload {
        file_name: String,
        job_description: String,
    },
    Search(String),
    History { limit: u32, offset: u32 },
    Health,
}

/// A scripted answer. `ApiError` is not `Clone`, so failures are described here
/// and materialised per call.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Unauthorized,
    Status(u16),
    Garbled,
}

impl<T: Clone> Reply<T> {
    fn to_result(&self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Unauthorized => Err(ApiError::Unauthorized),
            Reply::Status(status) => Err(ApiError::Rejected {
                status: *status,
                message: "stub failure".to_string(),
            }),
            Reply::Garbled => Err(ApiError::Parse(
                serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            )),
        }
    }
}

pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    upload_reply: Mutex<Reply<ScreeningResult>>,
    search_reply: Mutex<Option<Reply<SearchResponse>>>,
    search_index: Mutex<HashMap<String, Vec<SearchMatch>>>,
    history: Mutex<Vec<HistoryEntry>>,
    history_reply: Mutex<Option<Reply<HistoryPage>>>,
}

pub const PASSWORD: &str = "secret";

impl FakeBackend {
    /// Accepts any username with password `secret`; upload scores 85 and is
    /// recorded in the history; search knows nothing until `index` is called.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            upload_reply: Mutex::new(Reply::Ok(ScreeningResult {
                match_score: Some(85.0),
                resume_data: Some(crate::models::screening::ResumeData {
                    raw_text: "Jane Doe\nRust engineer".to_string(),
                }),
                details: Some(serde_json::json!({"matched_keywords": ["rust"]})),
                ..Default::default()
            })),
            search_reply: Mutex::new(None),
            search_index: Mutex::new(HashMap::new()),
            history: Mutex::new(Vec::new()),
            history_reply: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn network_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn reply_to_upload(&self, reply: Reply<ScreeningResult>) {
        *self.upload_reply.lock().unwrap() = reply;
    }

    /// Overrides every search answer; `None` goes back to the index.
    pub fn reply_to_search(&self, reply: Option<Reply<SearchResponse>>) {
        *self.search_reply.lock().unwrap() = reply;
    }

    pub fn index(&self, keyword: &str, matches: &[(&str, &str)]) {
        let matches = matches
            .iter()
            .map(|(filename, extract)| SearchMatch {
                filename: filename.to_string(),
                extract: extract.to_string(),
            })
            .collect();
        self.search_index
            .lock()
            .unwrap()
            .insert(keyword.to_lowercase(), matches);
    }

    /// Overrides every history answer; `None` goes back to the recorded uploads.
    pub fn reply_to_history(&self, reply: Option<Reply<HistoryPage>>) {
        *self.history_reply.lock().unwrap() = reply;
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn login(&self, credentials: &Credentials<'_>) -> Result<Identity, ApiError> {
        self.record(Call::Login(credentials.username.to_string()));
        if credentials.password == PASSWORD {
            Ok(Identity::named(credentials.username))
        } else {
            Err(ApiError::Rejected {
                status: 401,
                message: "Invalid username or password".to_string(),
            })
        }
    }

    async fn register(&self, registration: &Registration<'_>) -> Result<Identity, ApiError> {
        self.record(Call::Register(registration.username.to_string()));
        if registration.username == "taken" {
            return Err(ApiError::Rejected {
                status: 400,
                message: "Username or email already exists".to_string(),
            });
        }
        Ok(Identity {
            username: registration.username.to_string(),
            id: Some(2),
            email: Some(registration.email.to_string()),
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record(Call::Logout);
        Ok(())
    }

    async fn upload(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<ScreeningResult, ApiError> {
        self.record(Call::Upload {
            file_name: resume.file_name.clone(),
            job_description: job_description.to_string(),
        });
        let result = self.upload_reply.lock().unwrap().to_result()?;
        let mut history = self.history.lock().unwrap();
        let entry = HistoryEntry {
            id: Some(history.len() as i64 + 1),
            filename: resume.file_name.clone(),
            job_title: Some(job_description.chars().take(100).collect()),
            match_score: result.match_score,
            processed_at: None,
        };
        history.insert(0, entry);
        Ok(result)
    }

    async fn search(&self, keyword: &str) -> Result<SearchResponse, ApiError> {
        self.record(Call::Search(keyword.to_string()));
        if let Some(reply) = self.search_reply.lock().unwrap().as_ref() {
            return reply.to_result();
        }
        let matches = self
            .search_index
            .lock()
            .unwrap()
            .get(&keyword.to_lowercase())
            .cloned()
            .unwrap_or_default();
        Ok(SearchResponse { matches })
    }

    async fn history(&self, limit: u32, offset: u32) -> Result<HistoryPage, ApiError> {
        self.record(Call::History { limit, offset });
        if let Some(reply) = self.history_reply.lock().unwrap().as_ref() {
            return reply.to_result();
        }
        let history = self.history.lock().unwrap();
        Ok(HistoryPage {
            items: history
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect(),
            total: history.len() as u64,
            limit,
            offset,
        })
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record(Call::Health);
        Ok(HealthStatus {
            status: "ok".to_string(),
            service: "fake".to_string(),
            version: "0.0.0".to_string(),
        })
    }
}

/// App state over a fresh fake, not logged in.
pub fn app_state() -> (AppState, Arc<FakeBackend>) {
    let backend = FakeBackend::new();
    (AppState::new(backend.clone()), backend)
}

/// App state over a fresh fake with `ada` logged in. The login call is cleared
/// from the record.
pub async fn logged_in_state() -> (AppState, Arc<FakeBackend>) {
    let (state, backend) = app_state();
    state.session.login("ada", PASSWORD).await.unwrap();
    backend.calls.lock().unwrap().clear();
    (state, backend)
}

pub fn pdf(name: &str) -> ResumeFile {
    ResumeFile::new(name, b"%PDF-1.4".to_vec()).unwrap()
}
