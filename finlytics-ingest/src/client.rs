//! HTTP client for the statement parsing service (`POST /upload`).

use anyhow::{Context, Result};
use finlytics_core::{Completion, ParsedResult, SelectedFile, Session, SessionError, UploadError};
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

use crate::wire::decode_parsed_result;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    base_url: String,
}

impl UploadClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url.trim_end_matches('/'))
    }

    /// Send one statement file as multipart field `file` and decode the result.
    pub async fn upload(&self, file: &SelectedFile) -> Result<ParsedResult, UploadError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.mime())
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        let form = Form::new().part("file", part);

        let url = self.upload_url();
        info!("POST {url} ({}, {} bytes)", file.name, file.size());
        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            debug!("upload rejected: {status} {txt}");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        decode_parsed_result(&body).map_err(|e| UploadError::Decode(e.to_string()))
    }
}

/// Run one full upload cycle for `session`: take a ticket, call the
/// service, hand the outcome back to the session.
pub async fn submit(session: &mut Session, client: &UploadClient) -> Result<Completion, SessionError> {
    let request = session.begin_upload()?;
    let outcome = client.upload(&request.file).await;
    Ok(session.complete_upload(request.ticket, outcome))
}
