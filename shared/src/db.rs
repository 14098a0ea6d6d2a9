//! Append-only persistence of uploaded documents and answered queries.
//!
//! Neither table is ever read back by the services.

use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio_postgres::{Client, NoTls};
use tracing::{error, info};
use uuid::Uuid;

use crate::dto::{BenefitQueryLog, UploadedDocument};
use crate::utils::ensure_sslmode_disable;

/// Sink for the interaction records written by the services.
#[async_trait]
pub trait InteractionLog: Send + Sync {
    async fn record_document(&self, doc: &UploadedDocument) -> Result<()>;
    async fn record_query(&self, entry: &BenefitQueryLog) -> Result<()>;
}

/// Connects without TLS and drives the connection on a background task.
pub async fn connect(database_url: &str) -> Result<Client> {
    let url = ensure_sslmode_disable(database_url);
    let (client, connection) = tokio_postgres::connect(&url, NoTls)
        .await
        .context("connect postgres")?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!(%e, "postgres connection task ended");
        }
    });
    info!("connected to database (NoTLS)");
    Ok(client)
}

/// Tables are created idempotently on startup.
pub async fn ensure_schema(db: &Client) -> Result<()> {
    db.batch_execute(
        r#"
        CREATE TABLE IF NOT EXISTS uploaded_documents (
            id           uuid PRIMARY KEY,
            filename     text        NOT NULL,
            file_size    bigint      NOT NULL,
            content      text        NOT NULL,
            user_session text        NOT NULL,
            uploaded_at  timestamptz NOT NULL DEFAULT now()
        );
        CREATE TABLE IF NOT EXISTS benefit_queries (
            id                 uuid PRIMARY KEY,
            card_number_masked text        NOT NULL,
            location           text        NOT NULL,
            language           text        NOT NULL,
            query              text        NOT NULL,
            benefit_response   jsonb,
            reasoning_log      text[]      NOT NULL DEFAULT '{}',
            user_session       text        NOT NULL,
            created_at         timestamptz NOT NULL DEFAULT now()
        );
        "#,
    )
    .await
    .context("ensure schema")?;
    Ok(())
}

pub struct PgInteractionLog {
    client: Client,
}

impl PgInteractionLog {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connects and makes sure both tables exist.
    pub async fn open(database_url: &str) -> Result<Self> {
        let client = connect(database_url).await?;
        ensure_schema(&client).await?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl InteractionLog for PgInteractionLog {
    async fn record_document(&self, doc: &UploadedDocument) -> Result<()> {
        let id = Uuid::new_v4();
        self.client
            .execute(
                "INSERT INTO uploaded_documents (id, filename, file_size, content, user_session) VALUES ($1,$2,$3,$4,$5)",
                &[&id, &doc.filename, &doc.file_size, &doc.content, &doc.user_session],
            )
            .await
            .context("insert uploaded_documents")?;
        info!(%id, file = %doc.filename, "stored uploaded document");
        Ok(())
    }

    async fn record_query(&self, entry: &BenefitQueryLog) -> Result<()> {
        let id = Uuid::new_v4();
        let response = serde_json::to_value(&entry.benefit_response).context("encode benefit")?;
        let location = entry.location.to_string();
        let language = entry.language.to_string();
        self.client
            .execute(
                "INSERT INTO benefit_queries (id, card_number_masked, location, language, query, benefit_response, reasoning_log, user_session) \
                 VALUES ($1,$2,$3,$4,$5,$6,$7,$8)",
                &[
                    &id,
                    &entry.card_number_masked,
                    &location,
                    &language,
                    &entry.query,
                    &response,
                    &entry.reasoning_log,
                    &entry.user_session,
                ],
            )
            .await
            .context("insert benefit_queries")?;
        info!(%id, session = %entry.user_session, "stored benefit query");
        Ok(())
    }
}

/// Keeps records in process memory. Used when no database is configured.
#[derive(Default)]
pub struct MemoryInteractionLog {
    documents: Mutex<Vec<UploadedDocument>>,
    queries: Mutex<Vec<BenefitQueryLog>>,
}

impl MemoryInteractionLog {
    pub fn documents(&self) -> Vec<UploadedDocument> {
        self.documents.lock().map(|d| d.clone()).unwrap_or_default()
    }

    pub fn queries(&self) -> Vec<BenefitQueryLog> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl InteractionLog for MemoryInteractionLog {
    async fn record_document(&self, doc: &UploadedDocument) -> Result<()> {
        self.documents
            .lock()
            .map_err(|_| anyhow::anyhow!("document log poisoned"))?
            .push(doc.clone());
        Ok(())
    }

    async fn record_query(&self, entry: &BenefitQueryLog) -> Result<()> {
        self.queries
            .lock()
            .map_err(|_| anyhow::anyhow!("query log poisoned"))?
            .push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benefit::{Benefit, Language, Location};

    #[tokio::test]
    async fn memory_log_appends() {
        let log = MemoryInteractionLog::default();
        log.record_document(&UploadedDocument {
            filename: "terms.pdf".into(),
            file_size: 42,
            content: "text".into(),
            user_session: "session_a".into(),
        })
        .await
        .unwrap();
        log.record_query(&BenefitQueryLog {
            card_number_masked: "4111 XXXX XXXX 1234".into(),
            location: Location::PhoenixMall,
            language: Language::English,
            query: "buy".into(),
            benefit_response: Benefit::fallback(Location::PhoenixMall),
            reasoning_log: vec!["step".into()],
            user_session: "session_a".into(),
        })
        .await
        .unwrap();
        assert_eq!(log.documents().len(), 1);
        assert_eq!(log.queries()[0].reasoning_log, vec!["step".to_string()]);
    }
}
