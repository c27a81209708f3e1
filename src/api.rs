// API client module: a small blocking HTTP client for the two VK methods
// this tool needs, `utils.getShortLink` and `utils.getLinkStats`.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::link;

const SHORTEN_METHOD: &str = "utils.getShortLink";
const SHORTEN_VERSION: &str = "5.199";
const STATS_METHOD: &str = "utils.getLinkStats";
const STATS_VERSION: &str = "5.131";

/// Client holding one reqwest blocking client, the API base URL and the
/// access token. Every call is a single attempt.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
    private: bool,
}

/// Every VK method answers with either `response` or `error`.
#[derive(Deserialize, Debug)]
pub struct Envelope<T> {
    pub response: Option<T>,
    pub error: Option<RemoteError>,
}

/// Error object VK puts in the envelope.
#[derive(Deserialize, Debug)]
pub struct RemoteError {
    pub error_code: Option<i64>,
    pub error_msg: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ShortLink {
    pub short_url: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct LinkStats {
    #[serde(default)]
    pub stats: Vec<StatInterval>,
}

/// One interval of click statistics. Only `clicks` matters here.
#[derive(Deserialize, Debug)]
pub struct StatInterval {
    #[serde(default)]
    pub clicks: u64,
}

impl<T> Envelope<T> {
    /// Pull the success payload out, turning an `error` object into
    /// `ApiError::Api`. An error wins if both are present.
    pub fn into_result(self, fallback: &str) -> Result<Option<T>, ApiError> {
        if let Some(err) = self.error {
            return Err(ApiError::Api {
                code: err.error_code,
                message: err
                    .error_msg
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            });
        }
        Ok(self.response)
    }
}

impl LinkStats {
    /// Sum of `clicks` over all intervals; the values come from the server,
    /// so overflow is an error rather than a wrap.
    pub fn total_clicks(&self) -> Result<u64, ApiError> {
        self.stats
            .iter()
            .try_fold(0u64, |acc, s| acc.checked_add(s.clicks))
            .ok_or(ApiError::ClickOverflow)
    }
}

impl ApiClient {
    /// Build a client from the runtime config. The timeout applies to each
    /// request as a whole.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(ApiError::Request)?;
        Ok(ApiClient {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            private: config.private,
        })
    }

    /// Ask VK for a short link pointing at `url` and return it verbatim.
    pub fn shorten(&self, url: &str) -> Result<String, ApiError> {
        let private = if self.private { "1" } else { "0" };
        let envelope: Envelope<ShortLink> = self.call(
            SHORTEN_METHOD,
            &[("v", SHORTEN_VERSION), ("url", url), ("private", private)],
        )?;
        envelope
            .into_result("unknown error")?
            .and_then(|r| r.short_url)
            .ok_or(ApiError::MissingField("response.short_url"))
    }

    /// Total clicks recorded for `short_url` over its whole lifetime.
    pub fn get_click_count(&self, short_url: &str) -> Result<u64, ApiError> {
        let key = link::link_key(short_url)
            .ok_or_else(|| ApiError::InvalidLink(short_url.to_string()))?;
        let envelope: Envelope<LinkStats> = self.call(
            STATS_METHOD,
            &[("v", STATS_VERSION), ("key", key.as_str()), ("interval", "forever")],
        )?;
        let stats = envelope
            .into_result("failed to fetch link statistics")?
            .unwrap_or_default();
        stats.total_clicks()
    }

    /// GET `{base}/{method}` and decode the JSON envelope.
    fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<Envelope<T>, ApiError> {
        let url = format!("{}/{}", self.base_url, method);
        debug!(method, "calling VK API");
        let res = self
            .client
            .get(&url)
            .query(&[("access_token", self.token.as_str())])
            .query(params)
            .send()?;
        let status = res.status();
        debug!(method, %status, "VK API responded");
        if !status.is_success() {
            return Err(ApiError::Http { status });
        }
        let body = res.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
