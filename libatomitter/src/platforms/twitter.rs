//! Twitter platform implementation
//!
//! Talks to the v1.1 REST API with OAuth 1.0a user-context signing. Only the
//! two endpoints the sync pipeline needs are covered: the user timeline and
//! status updates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::PlatformError;
use crate::platforms::oauth::OAuthSigner;
use crate::platforms::{PlatformResult, Timeline};
use crate::types::{TimelinePost, UrlEntity};

/// Tweet as returned by `statuses/user_timeline` and `statuses/update`
#[derive(Debug, Deserialize)]
struct Tweet {
    id_str: String,
    text: String,
    #[serde(default)]
    entities: Option<Entities>,
}

#[derive(Debug, Default, Deserialize)]
struct Entities {
    #[serde(default)]
    urls: Vec<TweetUrl>,
}

#[derive(Debug, Deserialize)]
struct TweetUrl {
    url: String,
    #[serde(default)]
    expanded_url: Option<String>,
}

impl From<Tweet> for TimelinePost {
    fn from(tweet: Tweet) -> Self {
        let urls = tweet
            .entities
            .unwrap_or_default()
            .urls
            .into_iter()
            .filter_map(|u| u.expanded_url.map(|expanded| UrlEntity::new(u.url, expanded)))
            .collect();

        TimelinePost::new(tweet.id_str, tweet.text, urls)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrors {
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

/// Twitter API client
#[derive(Debug)]
pub struct TwitterClient {
    client: Client,
    base_url: String,
    signer: OAuthSigner,
    timeline_count: u32,
}

impl TwitterClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Network` if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> PlatformResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("atomitter/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            signer: OAuthSigner::from_config(config),
            timeline_count: config.timeline_count,
        })
    }

    #[instrument(skip(self, params))]
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> PlatformResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let auth_header = self.signer.authorization_header("GET", &url, params)?;

        debug!(endpoint, "Making Twitter API request");
        let response = self
            .client
            .get(&url)
            .query(params)
            .header(AUTHORIZATION, auth_header)
            .send()
            .await?;

        handle_response(response).await
    }

    #[instrument(skip(self, form))]
    async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: &[(String, String)],
    ) -> PlatformResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let auth_header = self.signer.authorization_header("POST", &url, form)?;

        debug!(endpoint, "Making Twitter API request");
        let response = self
            .client
            .post(&url)
            .form(form)
            .header(AUTHORIZATION, auth_header)
            .send()
            .await?;

        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> PlatformResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&bytes)
            .map_err(|e| PlatformError::InvalidResponse(e.to_string()));
    }

    let message = match serde_json::from_slice::<ApiErrors>(&bytes) {
        Ok(api_errors) if !api_errors.errors.is_empty() => api_errors
            .errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{} (code {})", e.message, code),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::from_utf8_lossy(&bytes).into_owned(),
    };

    Err(match status {
        StatusCode::UNAUTHORIZED => PlatformError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => PlatformError::RateLimit(message),
        _ => PlatformError::Api {
            status: status.as_u16(),
            body: message,
        },
    })
}

#[async_trait]
impl Timeline for TwitterClient {
    async fn fetch_recent_posts(&self, username: &str) -> PlatformResult<Vec<TimelinePost>> {
        let params = vec![
            ("screen_name".to_string(), username.to_string()),
            ("count".to_string(), self.timeline_count.to_string()),
            ("trim_user".to_string(), "true".to_string()),
            ("exclude_replies".to_string(), "true".to_string()),
            ("include_rts".to_string(), "false".to_string()),
        ];

        let tweets: Vec<Tweet> = self.get("/statuses/user_timeline.json", &params).await?;
        debug!(count = tweets.len(), username, "Fetched timeline");

        Ok(tweets.into_iter().map(TimelinePost::from).collect())
    }

    async fn submit_post(&self, text: &str) -> PlatformResult<String> {
        let form = vec![("status".to_string(), text.to_string())];
        let tweet: Tweet = self.post_form("/statuses/update.json", &form).await?;
        Ok(tweet.id_str)
    }

    fn name(&self) -> &str {
        "twitter"
    }
}
