//! GraphQL access to the start.gg API

use crate::config::ClientConfig;
use crate::error::{PreviewError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// Something that can run a GraphQL query and hand back its `data` object
pub trait GraphQlClient {
    fn execute(&self, query: &str, variables: &Value) -> Result<Value>;
}

impl<F> GraphQlClient for F
where
    F: Fn(&str, &Value) -> Result<Value>,
{
    fn execute(&self, query: &str, variables: &Value) -> Result<Value> {
        self(query, variables)
    }
}

/// Run a query and deserialize its `data` into `T`
pub fn query_typed<C, T>(client: &C, query: &str, variables: &Value) -> Result<T>
where
    C: GraphQlClient + ?Sized,
    T: DeserializeOwned,
{
    let data = client.execute(query, variables)?;
    Ok(serde_json::from_value(data)?)
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: Option<String>,
}

/// Blocking HTTP client for `api.start.gg`
pub struct StartggClient {
    client: reqwest::blocking::Client,
    config: ClientConfig,
}

impl StartggClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tournament-preview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }
}

impl GraphQlClient for StartggClient {
    fn execute(&self, query: &str, variables: &Value) -> Result<Value> {
        log::trace!("POST {} variables={}", self.config.api_url, variables);

        let response = self
            .client
            .post(self.config.api_url.clone())
            .bearer_auth(self.config.credentials.token())
            .json(&json!({ "query": query, "variables": variables }))
            .send()?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PreviewError::RateLimited);
        }

        let body = response.text()?;
        if !status.is_success() {
            return Err(PreviewError::HttpStatus { status, body });
        }

        parse_response(&body)
    }
}

/// Split a raw GraphQL response body into its data or its errors
fn parse_response(body: &str) -> Result<Value> {
    let parsed: GraphQlResponse = serde_json::from_str(body)?;

    if let Some(errors) = parsed.errors {
        let messages: Vec<String> = errors
            .into_iter()
            .map(|e| e.message.unwrap_or_else(|| "unknown error".to_string()))
            .collect();
        if !messages.is_empty() {
            return Err(PreviewError::GraphQl(messages));
        }
    }

    match parsed.data {
        Some(Value::Null) | None => Err(PreviewError::MalformedResponse(
            "response has neither data nor errors".to_string(),
        )),
        Some(data) => Ok(data),
    }
}
