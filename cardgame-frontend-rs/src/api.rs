use serde::de::DeserializeOwned;

/// Used when the build doesn't set `CARDGAME_API_BASE`.
pub const DEFAULT_API_BASE: &str = "/api";

pub fn default_api_base() -> &'static str {
    option_env!("CARDGAME_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} is a relative URL and no origin is configured")]
    RelativeUrl(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request against the game server, with `path` relative to the API base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn param_opt(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Extras for a POST: a JSON body, query parameters, and headers.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub body: Option<serde_json::Value>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base: String,
    /// Scheme and host that relative URLs are resolved against.
    pub origin: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base: default_api_base().to_string(),
            origin: browser_origin(),
        }
    }
}

fn browser_origin() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|w| w.location().origin().ok())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// JSON-over-HTTP client for the game server.
///
/// The response status is not looked at: whatever body comes back is parsed as JSON, and
/// a body that isn't JSON is an error. Nothing is retried.
#[derive(Clone, Debug, Default)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `base + path`, exactly.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base)
    }

    pub fn url(&self, path: &str) -> Result<String, ApiError> {
        let endpoint = self.endpoint(path);
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return Ok(endpoint);
        }
        let Some(origin) = &self.config.origin else {
            return Err(ApiError::RelativeUrl(endpoint));
        };
        let origin = origin.trim_end_matches('/');
        if endpoint.starts_with('/') {
            Ok(format!("{origin}{endpoint}"))
        } else {
            Ok(format!("{origin}/{endpoint}"))
        }
    }

    pub async fn jget<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Get, path, RequestOptions::default())
            .await
    }

    pub async fn jpost<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Post, path, RequestOptions::default())
            .await
    }

    pub async fn jpost_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::Post, path, options).await
    }

    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let ApiRequest {
            method,
            path,
            query,
        } = request;
        let options = RequestOptions {
            query,
            ..Default::default()
        };
        self.request(method, &path, options).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        log::debug!("{method:?} {url}");

        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Ok(response.json::<T>().await?)
    }
}

#[cfg(target_arch = "wasm32")]
mod bindings {
    use super::{ApiClient, RequestOptions};
    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    thread_local! {
        static CLIENT: ApiClient = ApiClient::default();
    }

    fn client() -> ApiClient {
        CLIENT.with(|client| client.clone())
    }

    fn to_js(value: &serde_json::Value) -> Result<JsValue, JsValue> {
        value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsValue::from_str(&format!("Failed to convert response: {e:?}")))
    }

    #[wasm_bindgen]
    pub async fn jget(path: String) -> Result<JsValue, JsValue> {
        let value: serde_json::Value = client()
            .jget(&path)
            .await
            .map_err(|e| JsValue::from_str(&format!("Request error: {e}")))?;
        to_js(&value)
    }

    #[wasm_bindgen]
    pub async fn jpost(path: String, body: JsValue) -> Result<JsValue, JsValue> {
        let body = if body.is_undefined() || body.is_null() {
            None
        } else {
            Some(
                serde_wasm_bindgen::from_value::<serde_json::Value>(body)
                    .map_err(|e| JsValue::from_str(&format!("Invalid request body: {e:?}")))?,
            )
        };
        let value: serde_json::Value = client()
            .jpost_with(
                &path,
                RequestOptions {
                    body,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| JsValue::from_str(&format!("Request error: {e}")))?;
        to_js(&value)
    }
}
