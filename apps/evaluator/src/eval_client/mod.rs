/// Evaluation client: the single point of entry for calls to the resume
/// evaluation service.
///
/// One multipart POST per evaluation. No retries and no auth headers. The
/// request deadline is optional and off unless configured.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use tracing::{debug, error, warn};

use crate::errors::SubmitError;
use crate::models::{EvaluationResult, FormInput, ResumeFile};

pub const DEFAULT_ENDPOINT: &str = "https://hirewise-backend-e9l9.onrender.com/evaluate";

pub const FIELD_RESUME: &str = "resume";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_JOB_DESCRIPTION: &str = "job_description";

/// A validated submission: the attachment is guaranteed present and the
/// optional text fields are `None` whenever they were left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    pub resume: ResumeFile,
    pub role: Option<String>,
    pub job_description: Option<String>,
}

impl EvaluationRequest {
    /// Fails with `SubmitError::Validation` when no resume is attached.
    /// No other field is checked.
    pub fn from_input(input: &FormInput) -> Result<Self, SubmitError> {
        let resume = input.resume_file.clone().ok_or(SubmitError::Validation)?;
        Ok(Self {
            resume,
            role: input.role().map(str::to_string),
            job_description: input.job_description().map(str::to_string),
        })
    }

    /// Text parts to send alongside the file, in wire order.
    pub fn text_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = Vec::with_capacity(2);
        if let Some(role) = self.role.as_deref() {
            fields.push((FIELD_ROLE, role));
        }
        if let Some(jd) = self.job_description.as_deref() {
            fields.push((FIELD_JOB_DESCRIPTION, jd));
        }
        fields
    }

    fn into_form(self) -> Result<Form, SubmitError> {
        let resume = Part::bytes(self.resume.content.to_vec())
            .file_name(self.resume.name.clone())
            .mime_str(&self.resume.mime_type)?;

        let mut form = Form::new().part(FIELD_RESUME, resume);
        for (name, value) in self.text_fields() {
            form = form.text(name, value.to_string());
        }
        Ok(form)
    }
}

/// Seam between the controller and the network.
#[async_trait]
pub trait EvaluationClient: Send + Sync {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<EvaluationResult, SubmitError>;
}

/// reqwest-backed client for the evaluation endpoint.
#[derive(Clone)]
pub struct HttpEvaluationClient {
    client: Client,
    endpoint: String,
}

impl HttpEvaluationClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EvaluationClient for HttpEvaluationClient {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<EvaluationResult, SubmitError> {
        debug!(
            file = %request.resume.name,
            bytes = request.resume.content.len(),
            role = request.role.is_some(),
            job_description = request.job_description.is_some(),
            "Building evaluation request"
        );
        let form = request.into_form()?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, endpoint = %self.endpoint, "Evaluation request failed");
                SubmitError::from(e)
            })?;

        let status = response.status();

        if !status.is_success() {
            // An unreadable body becomes the generic server message.
            let body = response.text().await.unwrap_or_default();
            warn!("Evaluation service returned {}: {}", status, body);
            return Err(SubmitError::Server {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<EvaluationResult>(&body).map_err(|e| {
            warn!(error = %e, "Evaluation service returned an unreadable result");
            SubmitError::MalformedResponse(format!("Invalid response from evaluation service: {e}"))
        })
    }
}
