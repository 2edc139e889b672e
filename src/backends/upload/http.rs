// SPDX-License-Identifier: GPL-3.0-only

//! Multipart form upload to the capture endpoint
//!
//! The endpoint answers a fragment-swap request with an `HX-Trigger`
//! header naming the outcome event. The header may hold a single name, a
//! comma separated list, or a JSON object keyed by event name.

use super::{Upload, UploadMechanism, UploadOutcome};
use crate::constants::{HX_REQUEST_HEADER, HX_TRIGGER_HEADER, UPLOAD_FIELD_NAME};
use futures::future::BoxFuture;
use reqwest::multipart::{Form, Part};
use tracing::{error, info, warn};

/// Posts the image as the `photo` field of a multipart form
#[derive(Debug, Clone)]
pub struct HttpUpload {
    url: String,
    client: reqwest::Client,
}

impl HttpUpload {
    pub fn new(url: String) -> Self {
        // The endpoint replies 303 with the signal header and no Location
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self { url, client }
    }

    async fn post(
        client: reqwest::Client,
        url: String,
        upload: Upload,
    ) -> Result<Option<String>, reqwest::Error> {
        let part = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.file_name)
            .mime_str(&upload.mime)?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = client
            .post(&url)
            .header(HX_REQUEST_HEADER, "true")
            .multipart(form)
            .send()
            .await?;

        info!(status = %response.status(), "Upload response");

        Ok(response
            .headers()
            .get(HX_TRIGGER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string))
    }
}

impl UploadMechanism for HttpUpload {
    fn submit(&self, upload: Upload) -> BoxFuture<'static, UploadOutcome> {
        let client = self.client.clone();
        let url = self.url.clone();

        Box::pin(async move {
            info!(url = %url, file = %upload.file_name, "Posting upload");
            match Self::post(client, url, upload).await {
                Ok(Some(trigger)) => outcome_from_trigger(&trigger).unwrap_or_else(|| {
                    warn!(trigger = %trigger, "Response named no upload outcome");
                    UploadOutcome::Failure
                }),
                Ok(None) => {
                    warn!("Response carried no trigger header");
                    UploadOutcome::Failure
                }
                Err(e) => {
                    error!(error = %e, "Upload request failed");
                    UploadOutcome::Failure
                }
            }
        })
    }
}

/// Find the outcome event in an `HX-Trigger` header value
pub fn outcome_from_trigger(value: &str) -> Option<UploadOutcome> {
    let value = value.trim();
    if value.starts_with('{') {
        let events: serde_json::Map<String, serde_json::Value> = serde_json::from_str(value).ok()?;
        return events.keys().find_map(|name| UploadOutcome::from_signal(name));
    }
    value.split(',').find_map(UploadOutcome::from_signal)
}
