use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT_CHARSET, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::error::{Result, ShippingError};
use crate::xml::XmlNode;

const CONTENT_TYPE_VALUE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Raw reply text plus its parsed tree, when the text was well-formed XML.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub text: String,
    pub document: Option<XmlNode>,
}

impl TransportResponse {
    pub fn from_body(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body).into_owned();
        let document = match XmlNode::parse(&text) {
            Ok(node) => Some(node),
            Err(e) => {
                warn!(error = %e, len = text.len(), "could not parse vendor reply");
                None
            }
        };
        Self { text, document }
    }
}

// Sends one access document plus one request document and hands back the reply
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, access: &str, payload: &str, endpoint_url: &str) -> Result<TransportResponse>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, access: &str, payload: &str, endpoint_url: &str) -> Result<TransportResponse> {
        let mut body = String::with_capacity(access.len() + payload.len());
        body.push_str(access);
        body.push_str(payload);

        let response = self
            .client
            .post(endpoint_url)
            .header(CONTENT_TYPE, CONTENT_TYPE_VALUE)
            .header(ACCEPT_CHARSET, "UTF-8")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        debug!(url = endpoint_url, status = status.as_u16(), "vendor replied");

        let bytes: Bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ShippingError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(TransportResponse::from_body(&bytes))
    }
}
