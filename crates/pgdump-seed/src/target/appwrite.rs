//! REST client for an Appwrite-style document database.

use super::{DocumentStore, StoredDocument};
use crate::config::TargetConfig;
use crate::error::{Result, SeedError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Documents requested per list call.
const PAGE_SIZE: usize = 100;

/// Document store backed by the Appwrite databases REST API.
#[derive(Debug, Clone)]
pub struct AppwriteStore {
    client: Client,
    endpoint: String,
    database_id: String,
    permissions: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    #[serde(rename = "documentId")]
    document_id: &'a str,
    data: Value,
    permissions: &'a [String],
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    documents: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

impl AppwriteStore {
    /// Build a client from the target configuration.
    pub fn new(config: &TargetConfig) -> Result<Self> {
        info!(
            "Initializing document store client: endpoint={}, database={}",
            config.endpoint, config.database_id
        );

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-appwrite-project",
            HeaderValue::from_str(&config.project_id)
                .map_err(|e| SeedError::Config(format!("Invalid project id: {}", e)))?,
        );
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| SeedError::Config(format!("Invalid API key format: {}", e)))?;
        key.set_sensitive(true);
        headers.insert("x-appwrite-key", key);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            database_id: config.database_id.clone(),
            permissions: config.permissions.clone(),
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request and decode the JSON body, mapping non-2xx answers to
    /// [`SeedError::Api`].
    async fn send(&self, builder: RequestBuilder) -> Result<Value> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(SeedError::api(status.as_u16(), message));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Split an API document into its id and user fields.
fn into_stored(mut raw: Map<String, Value>) -> StoredDocument {
    let id = raw
        .get("$id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    raw.retain(|key, _| !key.starts_with('$'));
    StoredDocument {
        id,
        data: Value::Object(raw),
    }
}

fn page_queries(offset: usize) -> [(&'static str, String); 2] {
    [
        (
            "queries[]",
            json!({ "method": "limit", "values": [PAGE_SIZE] }).to_string(),
        ),
        (
            "queries[]",
            json!({ "method": "offset", "values": [offset] }).to_string(),
        ),
    ]
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn create(
        &self,
        collection: &str,
        document_id: &str,
        data: Value,
    ) -> Result<StoredDocument> {
        let body = CreateRequest {
            document_id,
            data,
            permissions: &self.permissions,
        };
        let url = self.documents_url(collection);
        let created = self
            .send(self.request(Method::POST, &url).json(&body))
            .await?;

        debug!("Created document {}/{}", collection, document_id);
        match created {
            Value::Object(map) => Ok(into_stored(map)),
            _ => Ok(StoredDocument {
                id: document_id.to_string(),
                data: Value::Null,
            }),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let url = self.documents_url(collection);
        let mut documents = Vec::new();
        let mut reported_total = 0;

        loop {
            let page: DocumentList = serde_json::from_value(
                self.send(
                    self.request(Method::GET, &url)
                        .query(&page_queries(documents.len())),
                )
                .await?,
            )?;

            // The reported total may be capped by the server; only a short
            // page marks the end of the collection.
            let fetched = page.documents.len();
            reported_total = page.total;
            documents.extend(page.documents.into_iter().map(into_stored));

            if fetched < PAGE_SIZE {
                break;
            }
        }

        debug!(
            "Listed {} documents in {} (server reported {})",
            documents.len(),
            collection,
            reported_total
        );
        Ok(documents)
    }

    async fn delete(&self, collection: &str, document_id: &str) -> Result<()> {
        let url = format!("{}/{}", self.documents_url(collection), document_id);
        self.send(self.request(Method::DELETE, &url)).await?;
        debug!("Deleted document {}/{}", collection, document_id);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let url = format!("{}/databases/{}", self.endpoint, self.database_id);
        self.send(self.request(Method::GET, &url))
            .await
            .map_err(|e| SeedError::Unreachable(format!("{}: {}", self.endpoint, e)))?;
        Ok(())
    }

    fn store_type(&self) -> &str {
        "appwrite"
    }
}
