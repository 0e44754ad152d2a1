//! Pinecone vector index with OpenAI embeddings.
//!
//! `connect` resolves the index data-plane host through the control
//! plane once. Each `add_documents` call then embeds the batch with the
//! OpenAI embeddings endpoint and upserts the vectors, `upsert_batch_size`
//! at a time. Vector ids are `{source}#{position}` with the source
//! percent-encoded, since Pinecone only accepts ASCII ids. Re-ingesting a
//! file overwrites its previous vectors instead of duplicating them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::core::config::BackendConfig;
use crate::core::error::{IngestError, Result};
use crate::core::storage::VectorIndex;
use crate::core::types::Document;

const PINECONE_API_VERSION: &str = "2024-07";

pub struct PineconeIndex {
    client: Client,
    index_name: String,
    host: String,
    pinecone_api_key: String,
    openai_api_key: String,
    openai_base_url: String,
    embedding_model: String,
    namespace: Option<String>,
    upsert_batch_size: usize,
}

#[derive(Debug, Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<Vector<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Vector<'a> {
    id: String,
    values: Vec<f32>,
    metadata: VectorMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct VectorMetadata<'a> {
    source: &'a str,
    text: &'a str,
}

impl PineconeIndex {
    /// Resolve the index host and build a ready-to-use client
    pub async fn connect(config: &BackendConfig, timeout: Duration) -> Result<Self> {
        let openai_api_key = required(&config.openai_api_key, "OPENAI_API_KEY")?;
        let pinecone_api_key = required(&config.pinecone_api_key, "PINECONE_API_KEY")?;
        let index_name = required(&config.pinecone_index, "PINECONE_INDEX")?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IngestError::Setup(format!("Failed to build HTTP client: {e}")))?;

        let url = format!(
            "{}/indexes/{}",
            config.pinecone_control_url.trim_end_matches('/'),
            index_name
        );
        tracing::debug!("Resolving Pinecone index host via {}", url);

        let response = client
            .get(&url)
            .header("Api-Key", &pinecone_api_key)
            .header("X-Pinecone-API-Version", PINECONE_API_VERSION)
            .send()
            .await
            .map_err(|e| IngestError::Setup(format!("Pinecone unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::Setup(format!(
                "Cannot describe Pinecone index '{index_name}': {status} {body}"
            )));
        }

        let described: DescribeIndexResponse = response
            .json()
            .await
            .map_err(|e| IngestError::Setup(format!("Bad describe-index response: {e}")))?;

        let host = normalize_host(&described.host);
        tracing::info!("Pinecone index '{}' at {}", index_name, host);

        Ok(Self {
            client,
            index_name,
            host,
            pinecone_api_key,
            openai_api_key,
            openai_base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            embedding_model: config.embedding_model.clone(),
            namespace: config.namespace.clone(),
            upsert_batch_size: config.upsert_batch_size.max(1),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Embed `texts`, returning vectors in input order
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingRequest {
            model: &self.embedding_model,
            input: texts.to_vec(),
        };

        let response = send(
            self.client
                .post(format!("{}/embeddings", self.openai_base_url))
                .bearer_auth(&self.openai_api_key)
                .json(&request),
            "embeddings",
        )
        .await?;

        let mut parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| IngestError::IndexWrite(format!("Bad embeddings response: {e}")))?;

        if parsed.data.len() != texts.len() {
            return Err(IngestError::IndexWrite(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        parsed.data.sort_by_key(|d| d.index);
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }

    async fn upsert(&self, vectors: Vec<Vector<'_>>) -> Result<()> {
        let count = vectors.len();
        let request = UpsertRequest {
            vectors,
            namespace: self.namespace.as_deref(),
        };

        send(
            self.client
                .post(format!("{}/vectors/upsert", self.host))
                .header("Api-Key", &self.pinecone_api_key)
                .header("X-Pinecone-API-Version", PINECONE_API_VERSION)
                .json(&request),
            "upsert",
        )
        .await?;

        tracing::debug!("Upserted {} vectors into '{}'", count, self.index_name);
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    fn name(&self) -> &str {
        "pinecone"
    }

    async fn add_documents(&self, documents: Vec<Document>) -> Result<()> {
        for (batch_no, batch) in documents.chunks(self.upsert_batch_size).enumerate() {
            let texts: Vec<&str> = batch.iter().map(|d| d.text.as_str()).collect();
            let embeddings = self.embed(&texts).await?;

            let offset = batch_no * self.upsert_batch_size;
            let vectors = batch
                .iter()
                .zip(embeddings)
                .enumerate()
                .map(|(i, (doc, values))| Vector {
                    id: vector_id(&doc.metadata.source, offset + i),
                    values,
                    metadata: VectorMetadata {
                        source: &doc.metadata.source,
                        text: &doc.text,
                    },
                })
                .collect();

            self.upsert(vectors).await?;
        }
        Ok(())
    }
}

/// Send a data-plane request; transport failures and non-2xx statuses
/// are index write errors
async fn send(request: RequestBuilder, what: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| IngestError::IndexWrite(format!("{what} request failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("{} returned {}: {}", what, status, body);
        return Err(IngestError::IndexWrite(format!(
            "{what} returned {status}: {body}"
        )));
    }

    Ok(response)
}

/// ASCII vector id for the chunk at `position` of `source`
fn vector_id(source: &str, position: usize) -> String {
    format!("{}#{}", urlencoding::encode(source), position)
}

fn required(value: &Option<String>, name: &str) -> Result<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| IngestError::Setup(format!("{name} is not set")))
}

/// The control plane reports bare hostnames
fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}
