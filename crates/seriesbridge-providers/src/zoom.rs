//! Meeting-platform API client.
//!
//! Implements the server-to-server OAuth flow (`account_credentials` grant)
//! with in-process token caching, plus the user lookup and meeting creation
//! calls the batch tools need.

use std::time::{Duration, Instant};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, trace};

use seriesbridge_schemas::{ZoomMeetingPayload, ZoomRecurrence};

use crate::error::{ApiError, ApiResult};

const DEFAULT_API_BASE: &str = "https://api.zoom.us/v2";
const DEFAULT_TOKEN_URL: &str = "https://zoom.us/oauth/token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tokens are refreshed this long before their reported expiry.
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(300);

/// Server-to-server OAuth app credentials.
#[derive(Debug, Clone)]
pub struct ZoomCredentials {
    /// The OAuth app's account ID.
    pub account_id: String,
    /// The OAuth app's client ID.
    pub client_id: String,
    /// The OAuth app's client secret.
    pub client_secret: String,
}

#[derive(Debug)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// A user record returned by the users endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoomUser {
    /// The platform-assigned user ID.
    pub id: String,
    /// The user's email address.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// One occurrence of a created recurring meeting.
#[derive(Debug, Clone, Deserialize)]
pub struct MeetingOccurrence {
    #[serde(default)]
    pub occurrence_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
}

/// The meeting object returned after creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedMeeting {
    /// The platform-assigned meeting ID.
    pub id: u64,
    /// Meeting title.
    pub topic: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    /// Join link for attendees.
    #[serde(default)]
    pub join_url: Option<String>,
    /// Registration link, present when registration is enabled.
    #[serde(default)]
    pub registration_url: Option<String>,
    /// The recurrence object as the server stored it.
    #[serde(default)]
    pub recurrence: Option<ZoomRecurrence>,
    /// Scheduled occurrences of the series.
    #[serde(default)]
    pub occurrences: Vec<MeetingOccurrence>,
}

/// Client for the meeting platform's REST API.
pub struct ZoomClient {
    client: Client,
    credentials: ZoomCredentials,
    api_base: String,
    token_url: String,
    token: Option<CachedToken>,
}

impl ZoomClient {
    /// Creates a new client with the given OAuth credentials.
    pub fn new(credentials: ZoomCredentials) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ApiError::network(format!("failed to create HTTP client: {}", e))
                    .with_service("zoom")
            })?;

        Ok(Self {
            client,
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            token: None,
        })
    }

    /// Overrides the API base and token endpoint. Used by tests.
    pub fn with_endpoints(
        mut self,
        api_base: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        self.api_base = api_base.into();
        self.token_url = token_url.into();
        self
    }

    /// Returns a valid access token, fetching a new one when the cached
    /// token is missing or within the expiry buffer.
    async fn access_token(&mut self) -> ApiResult<String> {
        if let Some(ref cached) = self.token
            && Instant::now() < cached.expires_at
        {
            trace!("reusing cached access token");
            return Ok(cached.access_token.clone());
        }

        debug!("requesting new access token");
        let basic = BASE64.encode(format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        ));
        let response = self
            .client
            .post(&self.token_url)
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.credentials.account_id.as_str()),
            ])
            .header("Authorization", format!("Basic {}", basic))
            .send()
            .await
            .map_err(|e| {
                ApiError::network(format!("token request failed: {}", e)).with_service("zoom")
            })?;

        if !response.status().is_success() {
            return Err(error_from_response("token request", response).await);
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ApiError::invalid_response(format!("malformed token response: {}", e))
                .with_service("zoom")
        })?;

        let lifetime = Duration::from_secs(token.expires_in)
            .saturating_sub(TOKEN_EXPIRY_BUFFER);
        self.token = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    /// Looks up a user by email address.
    pub async fn get_user(&mut self, email: &str) -> ApiResult<ZoomUser> {
        let token = self.access_token().await?;
        let url = format!("{}/users/{}", self.api_base, urlencoding::encode(email));
        debug!(email = %email, "looking up user");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| {
                ApiError::network(format!("user lookup failed: {}", e)).with_service("zoom")
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(&format!("user '{}'", email), response).await);
        }

        response.json().await.map_err(|e| {
            ApiError::invalid_response(format!("malformed user response: {}", e))
                .with_service("zoom")
        })
    }

    /// Creates a meeting under the given host.
    pub async fn create_meeting(
        &mut self,
        host_email: &str,
        payload: &ZoomMeetingPayload,
    ) -> ApiResult<CreatedMeeting> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/users/{}/meetings",
            self.api_base,
            urlencoding::encode(host_email)
        );
        debug!(host = %host_email, topic = %payload.topic, "creating meeting");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                ApiError::network(format!("meeting creation failed: {}", e)).with_service("zoom")
            })?;

        if !response.status().is_success() {
            return Err(
                error_from_response(&format!("meeting '{}'", payload.topic), response).await,
            );
        }

        response.json().await.map_err(|e| {
            ApiError::invalid_response(format!("malformed meeting response: {}", e))
                .with_service("zoom")
        })
    }
}

/// Maps an unsuccessful HTTP response to a typed error.
async fn error_from_response(context: &str, response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = if body.is_empty() {
        format!("{}: HTTP {}", context, status)
    } else {
        format!("{}: HTTP {}: {}", context, status, body)
    };

    let error = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::authentication(detail),
        StatusCode::NOT_FOUND => ApiError::not_found(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::bad_request(detail),
        StatusCode::TOO_MANY_REQUESTS => ApiError::rate_limited(detail),
        s if s.is_server_error() => ApiError::server(detail),
        _ => ApiError::invalid_response(detail),
    };
    error.with_service("zoom")
}
