use async_trait::async_trait;
use chrono::Utc;
use events_errors::TableError;
use events_models::{EventRow, NewEvent, UpdateEventRequest};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::table::EventTable;

/// In-process `events` table, used when no database is configured and in
/// tests.
#[derive(Debug, Default)]
pub struct MemoryEventTable {
    rows: RwLock<Vec<EventRow>>,
}

impl MemoryEventTable {
    pub fn new() -> Self { Self::default() }

    pub fn with_rows(rows: Vec<EventRow>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub async fn len(&self) -> usize { self.rows.read().await.len() }

    pub async fn is_empty(&self) -> bool { self.rows.read().await.is_empty() }
}

#[async_trait]
impl EventTable for MemoryEventTable {
    #[instrument(skip_all)]
    async fn select_all(&self) -> Result<Vec<EventRow>, TableError> {
        let mut rows = self.rows.read().await.clone();
        // stable: ties keep insertion order, which is newest first
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    #[instrument(skip_all, fields(title = %event.title))]
    async fn insert(&self, event: NewEvent) -> Result<EventRow, TableError> {
        let row = event.into_row(Uuid::now_v7().to_string(), Utc::now());
        self.rows.write().await.insert(0, row.clone());
        debug!(id = %row.id, "inserted event");
        Ok(row)
    }

    #[instrument(skip(self, update))]
    async fn update_by_id(
        &self, id: &str, update: &UpdateEventRequest,
    ) -> Result<EventRow, TableError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| TableError::NotFound { id: id.to_string() })?;
        update.apply_to(row, Utc::now());
        Ok(row.clone())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> Result<(), TableError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(TableError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
