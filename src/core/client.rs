//! Frequency client: forwards text to the analysis service.
//!
//! The service is opaque: it takes the raw text plus two boolean options and
//! answers with an [`AnalysisResult`].  This module owns the request shape,
//! the error taxonomy, and the response checks; it never retries.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use super::model::AnalysisResult;

/// Where the reference analysis service listens.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/analyze";

/// Why an analysis did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// Input was empty or whitespace-only; nothing was sent.
    #[error("Please enter some text to analyze")]
    EmptyInput,

    /// Transport failure (connect, timeout, broken body).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success HTTP status.
    #[error("Server error: HTTP {0}")]
    Status(u16),

    /// The body did not decode, or broke the result contract.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl AnalyzeError {
    /// `true` for transport errors and non-success responses.
    pub fn is_network_or_server(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status(_))
    }
}

impl From<reqwest::Error> for AnalyzeError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => AnalyzeError::Status(status.as_u16()),
            None => AnalyzeError::Network(error.to_string()),
        }
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: String,
    pub remove_stopwords: bool,
    pub case_sensitive: bool,
}

impl AnalyzeRequest {
    /// Build a request from user input.  The text is trimmed; empty input is
    /// rejected here so it can never reach the network.
    pub fn new(
        text: &str,
        remove_stopwords: bool,
        case_sensitive: bool,
    ) -> Result<Self, AnalyzeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnalyzeError::EmptyInput);
        }
        Ok(Self {
            text: text.to_string(),
            remove_stopwords,
            case_sensitive,
        })
    }
}

/// HTTP client for the analysis endpoint.  Cheap to clone.
#[derive(Debug, Clone)]
pub struct FrequencyClient {
    http: Client,
    endpoint: String,
    strict: bool,
}

impl FrequencyClient {
    /// `timeout` of `None` waits forever, matching a plain browser fetch.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.into(),
            strict: true,
        })
    }

    /// Toggle the exact-totals check (see [`AnalysisResult::validate`]).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue exactly one request and decode the answer.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, AnalyzeError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            chars = request.text.len(),
            remove_stopwords = request.remove_stopwords,
            case_sensitive = request.case_sensitive,
            "sending analysis request"
        );

        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let result: AnalysisResult = serde_json::from_slice(&body)
            .map_err(|e| AnalyzeError::MalformedResponse(e.to_string()))?;
        result
            .validate(self.strict)
            .map_err(AnalyzeError::MalformedResponse)?;

        tracing::debug!(
            word_count = result.word_count,
            unique_words = result.unique_words,
            entries = result.frequencies.len(),
            "analysis response decoded"
        );
        Ok(result)
    }
}
