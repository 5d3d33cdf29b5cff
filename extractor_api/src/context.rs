use std::env;

use reqwest::{Client, ClientBuilder};

/// Shared state handed to every extractor call.
#[derive(Clone)]
pub struct ExtractionContext {
    pub http: Client,
}

impl ExtractionContext {
    pub fn new() -> ExtractionContext {
        ExtractionContext { http: build_http() }
    }
}

impl Default for ExtractionContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_http() -> Client {
    let mut builder = ClientBuilder::new()
        // default, overridden by extractors per request
        .user_agent("okhttp/4.9.3");

    if let Ok(proxy) = env::var("http_proxy") {
        builder = builder
            .danger_accept_invalid_certs(true)
            .proxy(reqwest::Proxy::all(proxy).unwrap());
    }

    builder.build().unwrap()
}
