use crate::api::{ApiClient, ApiError, ApiResponse, ResponseBody};
use crate::config::UploaderConfig;
use crate::upload::types::{SelectedFile, ServerReport, UploadOutcome};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

const UPLOAD_PATH: &str = "format-statement/";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// The backend only accepts .xlsx.
const ALLOWED_EXTENSIONS: [&str; 1] = [".xlsx"];

pub const ERROR_PREFIX: &str = "Error: ";

const MSG_ONLY_XLSX: &str = "Only .xlsx files are allowed.";
const MSG_SELECT_FILES: &str = "Please select at least one Excel file.";
const MSG_UPLOAD_OK: &str = "Upload & processing successful.";
const MSG_SERVER_ERROR: &str = "Server error (500). Please check backend logs.";
const MSG_UNKNOWN_ERROR: &str = "An unknown error occurred.";
const MSG_WORKER_GONE: &str = "The upload worker stopped before reporting a result.";

/// Owns the selection, the single-flight uploading flag, the status
/// message, and the drag highlight. One submission at a time; the worker
/// reports exactly one terminal outcome over the channel drained by
/// `poll`.
pub struct UploadController {
    client: ApiClient,
    files: Vec<SelectedFile>,
    uploading: bool,
    dragging: bool,
    message: String,
    outcome_receiver: Option<Receiver<UploadOutcome>>,
}

impl UploadController {
    pub fn new(config: UploaderConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: ApiClient::new(&config)?,
            files: Vec::new(),
            uploading: false,
            dragging: false,
            message: String::new(),
            outcome_receiver: None,
        })
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn add_files(&mut self, candidates: Vec<SelectedFile>) {
        let candidate_count = candidates.len();
        let mut kept: Vec<SelectedFile> = candidates
            .into_iter()
            .filter(|file| is_allowed_file(&file.name))
            .collect();

        if kept.is_empty() && candidate_count > 0 {
            tracing::debug!(candidate_count, "selection rejected, nothing ends in .xlsx");
            self.message = MSG_ONLY_XLSX.to_string();
            return;
        }

        let dropped = candidate_count - kept.len();
        if dropped > 0 {
            tracing::debug!(dropped, "filtered non-xlsx candidates out of the selection");
        }
        self.files.append(&mut kept);
        self.message.clear();
    }

    pub fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    pub fn drop_files(&mut self, candidates: Vec<SelectedFile>) {
        self.dragging = false;
        self.add_files(candidates);
    }

    pub fn submit(&mut self) {
        if self.uploading {
            return;
        }
        if self.files.is_empty() {
            self.message = MSG_SELECT_FILES.to_string();
            return;
        }

        self.uploading = true;
        self.message.clear();

        let client = self.client.clone();
        let files = self.files.clone();
        let (sender, receiver) = channel();
        self.outcome_receiver = Some(receiver);

        tracing::info!(files = files.len(), "submitting statements for formatting");
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let outcome = rt.block_on(perform_upload(client, files));
            sender.send(outcome).unwrap_or_default();
        });
    }

    /// Drains the worker channel and applies the terminal transition.
    /// Returns whether anything changed so the GUI can repaint.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.outcome_receiver else {
            return false;
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => UploadOutcome::Failure(MSG_WORKER_GONE.to_string()),
        };

        self.outcome_receiver = None;
        self.uploading = false;
        match outcome {
            UploadOutcome::Success(message) => {
                tracing::info!(%message, "upload finished");
                self.files.clear();
                self.message = message;
            }
            UploadOutcome::Failure(cause) => {
                tracing::warn!(%cause, "upload failed");
                // The selection stays so the user can retry without reselecting.
                self.message = format!("{ERROR_PREFIX}{cause}");
            }
        }
        true
    }
}

fn is_allowed_file(name: &str) -> bool {
    let name = name.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

async fn perform_upload(client: ApiClient, files: Vec<SelectedFile>) -> UploadOutcome {
    let form = match build_form(&files) {
        Ok(form) => form,
        Err(cause) => return UploadOutcome::Failure(cause),
    };

    match client.post_multipart(UPLOAD_PATH, form).await {
        Ok(response) => UploadOutcome::Success(success_message(response)),
        Err(err) => UploadOutcome::Failure(failure_text(&err)),
    }
}

// One repeated "files" field per selection, original filenames preserved.
fn build_form(files: &[SelectedFile]) -> Result<Form, String> {
    let mut form = Form::new();
    for file in files {
        let bytes = file
            .read_bytes()
            .map_err(|e| format!("Failed to read {}: {}", file.name, e))?;
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(XLSX_MIME)
            .map_err(|e| format!("Failed to encode {}: {}", file.name, e))?;
        form = form.part("files", part);
    }
    Ok(form)
}

fn success_message(response: ApiResponse) -> String {
    tracing::debug!(status = %response.status, "backend accepted the statements");
    let ResponseBody::Json(fields) = response.body else {
        return MSG_UPLOAD_OK.to_string();
    };
    match serde_json::from_value::<ServerReport>(Value::Object(fields)) {
        Ok(report) => {
            if let Some(summary) = &report.row_count_summary {
                tracing::debug!(%summary, "row count summary");
            }
            if let Some(summary) = &report.mismatch_summary {
                tracing::debug!(%summary, "mismatch summary");
            }
            report.message.unwrap_or_else(|| MSG_UPLOAD_OK.to_string())
        }
        Err(_) => MSG_UPLOAD_OK.to_string(),
    }
}

// Precedence: structured error/message field, then HTML page detection,
// then plain text verbatim, then the raw failure description.
fn failure_text(err: &ApiError) -> String {
    match err {
        ApiError::Status {
            body: ResponseBody::Json(fields),
            ..
        } => fields
            .get("error")
            .and_then(Value::as_str)
            .or_else(|| fields.get("message").and_then(Value::as_str))
            .unwrap_or(MSG_UNKNOWN_ERROR)
            .to_string(),
        ApiError::Status {
            body: ResponseBody::Text(text),
            ..
        } if looks_like_html(text) => MSG_SERVER_ERROR.to_string(),
        ApiError::Status {
            body: ResponseBody::Text(text),
            ..
        } if !text.trim().is_empty() => text.clone(),
        _ => err.to_string(),
    }
}

// A Django crash page instead of JSON; never show markup to the user.
fn looks_like_html(text: &str) -> bool {
    text.trim_start().starts_with("<!DOCTYPE html>") || text.contains("<html")
}
