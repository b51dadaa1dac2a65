//! MongoDocumentStore: protein documents in MongoDB

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection, Database};
use std::time::Duration;
use tracing::{debug, info};

use super::DocumentStore;
use crate::config::MongoConfig;
use crate::error::{DashboardError, DashboardResult, StoreKind};
use crate::model::{ProteinFilter, ProteinRecord, FIELD_SEQUENCE};
use crate::query::{document_filter, sequence_projection};

/// Document store backed by one MongoDB collection.
///
/// The driver keeps a connection pool inside `Client`; each call checks a
/// connection out for the duration of the round trip and returns it on drop.
pub struct MongoDocumentStore {
    database: Database,
    collection: Collection<Document>,
}

impl MongoDocumentStore {
    /// Connect and verify the server answers before serving requests
    pub async fn connect(config: &MongoConfig) -> DashboardResult<Self> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some("protein-dashboard".to_string());
        options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_secs));

        let client = Client::with_options(options)?;
        let store = Self::from_client(&client, &config.database, &config.collection);
        store.ping().await?;

        info!(
            "Connected to MongoDB collection {}.{}",
            config.database, config.collection
        );
        Ok(store)
    }

    /// Wrap an existing client
    pub fn from_client(client: &Client, database: &str, collection: &str) -> Self {
        let database = client.database(database);
        let collection = database.collection::<Document>(collection);
        Self {
            database,
            collection,
        }
    }
}

fn document_to_record(document: Document) -> DashboardResult<ProteinRecord> {
    ProteinRecord::try_from(Bson::Document(document).into_relaxed_extjson()).map_err(|value| {
        DashboardError::decode(StoreKind::Document, format!("expected an object, got {}", value))
    })
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn search(&self, filter: &ProteinFilter) -> DashboardResult<Vec<ProteinRecord>> {
        let query = document_filter(filter);
        debug!(%query, "mongo find");

        let cursor = self.collection.find(query, None).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        documents.into_iter().map(document_to_record).collect()
    }

    async fn count(&self, filter: &ProteinFilter) -> DashboardResult<u64> {
        let query = document_filter(filter);
        debug!(%query, "mongo count_documents");

        Ok(self.collection.count_documents(query, None).await?)
    }

    async fn sequences(&self) -> DashboardResult<Vec<String>> {
        let options = FindOptions::builder()
            .projection(sequence_projection())
            .build();
        let cursor = self.collection.find(Document::new(), options).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents
            .iter()
            .filter_map(|document| document.get_str(FIELD_SEQUENCE).ok())
            .map(str::to_owned)
            .collect())
    }

    async fn ping(&self) -> DashboardResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
