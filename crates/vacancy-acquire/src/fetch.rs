use reqwest::StatusCode;
use thiserror::Error;

/// Listings page scraped when no other URL is given.
pub const DEFAULT_URL: &str = "https://vacancymail.co.zw/jobs/";

/// Desktop browser identification; the site serves the full listing markup to it.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch page: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: StatusCode, url: String },
}

/// Fetch one page and return its body.
///
/// Any non-2xx status is an error; the body of a failed response is discarded.
pub async fn fetch_page(url: &str) -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(FetchError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }

    let body = response.text().await.map_err(FetchError::Transport)?;
    tracing::debug!(bytes = body.len(), "Received HTML");
    Ok(body)
}
