//! Blocking reqwest client implementing the `Http` port; maps reqwest
//! errors/statuses into `HttpError`.
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::errors::HttpError;
use crate::ports::http::Http;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ReqwestHttp {
    client: reqwest::blocking::Client,
}

impl ReqwestHttp {
    pub fn new(user_agent: &str) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Http for ReqwestHttp {
    fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, HttpError> {
        debug!(url, "HTTP GET start");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| {
                warn!(url, error = %e, "HTTP GET failed");
                HttpError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "HTTP GET returned error status");
            return Err(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| {
            warn!(url, error = %e, "failed reading body");
            HttpError::Transport(e.to_string())
        })
    }
}
