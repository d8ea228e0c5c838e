use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::{RequestBuilder, Response, StatusCode};
use url::Url;

use crate::{FailureKind, FetchError};

/// Name of the cookie the site keeps its session in.
const SESSION_COOKIE: &str = "PHPSESSID";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before retry `n` is `backoff_factor * 2^(n-1)` seconds.
    pub backoff_factor: f64,
    pub retry_statuses: Vec<u16>,
    /// Per-attempt deadline. `None` leaves attempts unbounded.
    pub request_timeout: Option<Duration>,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_factor: 0.3,
            retry_statuses: vec![500, 502, 504],
            request_timeout: None,
            redirect_limit: 10,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl FetchSettings {
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16) as i32;
        Duration::from_secs_f64((self.backoff_factor * 2f64.powi(exponent)).max(0.0))
    }

    fn should_retry_status(&self, status: StatusCode) -> bool {
        self.retry_statuses.contains(&status.as_u16())
    }
}

/// Authenticated access to the site.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &Url) -> Result<String, FetchError>;

    async fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    cookie: String,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(credential: &str, settings: FetchSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit));
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            cookie: format!("{SESSION_COOKIE}={credential}"),
            settings,
        })
    }

    /// Sends the request built by `build`, retrying transient failures with
    /// exponential backoff.
    async fn send_with_retry<B>(&self, build: B) -> Result<String, FetchError>
    where
        B: Fn() -> RequestBuilder + Send + Sync,
    {
        let mut retry = 0;
        loop {
            let result = build().header(COOKIE, self.cookie.as_str()).send().await;
            let retryable = match &result {
                Ok(response) => self.settings.should_retry_status(response.status()),
                Err(err) => err.is_connect() || err.is_timeout(),
            };

            if !retryable || retry >= self.settings.max_retries {
                let response = result.map_err(map_reqwest_error)?;
                return self.read_body(response).await;
            }

            retry += 1;
            let delay = self.settings.backoff_delay(retry);
            match &result {
                Ok(response) => engine_debug!(
                    "Retry {} for {} after status {} in {:?}",
                    retry,
                    response.url(),
                    response.status(),
                    delay
                ),
                Err(err) => engine_debug!("Retry {} after {} in {:?}", retry, err, delay),
            }
            // Release the connection before backing off.
            drop(result);
            tokio::time::sleep(delay).await;
        }
    }

    async fn read_body(&self, response: Response) -> Result<String, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        check_scheme(url)?;
        self.send_with_retry(|| self.client.get(url.clone())).await
    }

    async fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> Result<String, FetchError> {
        check_scheme(url)?;
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();
        self.send_with_retry(|| {
            self.client
                .post(url.clone())
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body.clone())
        })
        .await
    }
}

fn check_scheme(url: &Url) -> Result<(), FetchError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("unsupported scheme {other}"),
        )),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_from_factor() {
        let settings = FetchSettings::default();
        let delays: Vec<_> = (1..=5).map(|n| settings.backoff_delay(n)).collect();
        let expected: Vec<_> = [0.3, 0.6, 1.2, 2.4, 4.8]
            .into_iter()
            .map(Duration::from_secs_f64)
            .collect();
        for (delay, want) in delays.iter().zip(&expected) {
            assert!(delay.abs_diff(*want) < Duration::from_millis(1), "{delay:?} vs {want:?}");
        }
    }

    #[test]
    fn only_gateway_errors_retry_by_default() {
        let settings = FetchSettings::default();
        assert!(settings.should_retry_status(StatusCode::BAD_GATEWAY));
        assert!(!settings.should_retry_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!settings.should_retry_status(StatusCode::NOT_FOUND));
    }
}
