//! GET-only HTTP client whose futures are `Send` on every target.
//!
//! On native this is reqwest directly. On wasm32 a `reqwest::Response` holds JS
//! values and is not `Send`, so the request runs inside
//! `wasm_bindgen_futures::spawn_local` and the result comes back over a `flume`
//! channel. That keeps `Command` futures `Send` on both targets.

use std::collections::HashMap;

use thiserror::Error;

/// Response reduced to Send-safe data.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Clone, Error)]
#[error("HTTP error: {message}")]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
}

impl RequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Append a query parameter; encoding is left to reqwest.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    pub async fn send(self) -> HttpResult<Response> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.execute().await
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.send_wasm().await
        }
    }

    #[cfg(target_arch = "wasm32")]
    async fn send_wasm(self) -> HttpResult<Response> {
        let (tx, rx) = flume::bounded::<HttpResult<Response>>(1);

        // not Send, which spawn_local does not require
        wasm_bindgen_futures::spawn_local(async move {
            let result = self.execute().await;
            if tx.send_async(result).await.is_err() {
                log::debug!("HTTP response dropped, receiver gone");
            }
        });

        rx.recv_async()
            .await
            .map_err(|_| HttpError::new("Request cancelled"))?
    }

    async fn execute(self) -> HttpResult<Response> {
        let client = reqwest::Client::new();

        let mut request = client.get(&self.url).query(&self.query);
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        // read the status before the body consumes the response
        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?
            .to_vec();

        Ok(Response { status, body })
    }
}

pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &[u8]) -> Response {
        Response {
            status,
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_response_is_success() {
        assert!(response(200, b"").is_success());
        assert!(response(204, b"").is_success());
        assert!(!response(404, b"").is_success());
        assert!(!response(500, b"").is_success());
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct TestData {
            message: String,
        }

        let data: TestData = response(200, br#"{"message": "hello"}"#)
            .json()
            .expect("valid json");
        assert_eq!(data.message, "hello");
    }

    #[test]
    fn test_request_builder_collects_query_and_headers() {
        let builder = Client::get("https://example.com/api/")
            .query("results", 25)
            .header("Accept", "application/json");

        assert_eq!(builder.query, vec![("results".to_owned(), "25".to_owned())]);
        assert_eq!(
            builder.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }
}
