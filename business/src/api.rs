//! Client for the randomuser-style endpoint.

use log::{error, info};
use thiserror::Error;

use crate::http::{Client, HttpError};
use crate::{RandomUserResponse, User};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] HttpError),
    #[error("API returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// `GET {api_url}?results={count}`, mapped into `User`s.
pub async fn fetch_users(api_url: &str, count: u64) -> Result<Vec<User>, FetchError> {
    info!("Fetching {count} users from {api_url}");

    let response = Client::get(api_url)
        .query("results", count)
        .header("accept", "application/json")
        .send()
        .await?;

    if !response.is_success() {
        error!("{api_url} returned status {}", response.status);
        return Err(FetchError::Status(response.status));
    }

    let body: RandomUserResponse = response.json()?;
    let users: Vec<User> = body.into();
    info!("Fetched {} users", users.len());
    Ok(users)
}
