//! REST implementation of [`IssueTracker`] over a shared `reqwest` client.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::core::types::{Issue, Transition, transitions_locator};
use crate::io::tracker::{
    IssueRecord, IssueTracker, TrackerError, TransitionList, TransitionRequest,
};

/// Tracker client holding one pooled connection set for the whole process.
///
/// Built once at startup; cloning the inner `reqwest::Client` is cheap, but
/// callers share the tracker itself behind an `Arc`. Dropping the last handle
/// closes the pool.
#[derive(Debug, Clone)]
pub struct HttpTracker {
    client: Client,
}

impl HttpTracker {
    /// Build a client that sends `Authorization: Bearer <token>` on every request.
    pub fn new(token: &str, timeout: Duration) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .context("access token is not a valid header value")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("build tracker http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl IssueTracker for HttpTracker {
    #[instrument(skip(self))]
    async fn get_issue(&self, locator: &str) -> Result<Issue, TrackerError> {
        debug!("fetching issue");
        let response = self
            .client
            .get(locator)
            .send()
            .await
            .map_err(|err| transport("GET", locator, &err))?;
        let record: IssueRecord = read_json("GET", locator, response).await?;
        Ok(record.into())
    }

    #[instrument(skip(self))]
    async fn list_transitions(&self, locator: &str) -> Result<Vec<Transition>, TrackerError> {
        let url = transitions_locator(locator);
        debug!(url = %url, "listing transitions");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| transport("GET", &url, &err))?;
        let list: TransitionList = read_json("GET", &url, response).await?;
        Ok(list.into())
    }

    #[instrument(skip(self))]
    async fn perform_transition(
        &self,
        locator: &str,
        transition_id: &str,
    ) -> Result<(), TrackerError> {
        let url = transitions_locator(locator);
        debug!(url = %url, "posting transition");
        let response = self
            .client
            .post(&url)
            .json(&TransitionRequest::new(transition_id))
            .send()
            .await
            .map_err(|err| transport("POST", &url, &err))?;
        check_status("POST", &url, &response)?;
        Ok(())
    }
}

fn transport(method: &'static str, url: &str, err: &reqwest::Error) -> TrackerError {
    TrackerError::Transport {
        method,
        url: url.to_string(),
        message: err.to_string(),
    }
}

fn check_status(
    method: &'static str,
    url: &str,
    response: &Response,
) -> Result<(), TrackerError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(TrackerError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

async fn read_json<T: DeserializeOwned>(
    method: &'static str,
    url: &str,
    response: Response,
) -> Result<T, TrackerError> {
    check_status(method, url, &response)?;
    response.json().await.map_err(|err| TrackerError::Decode {
        method,
        url: url.to_string(),
        message: err.to_string(),
    })
}
