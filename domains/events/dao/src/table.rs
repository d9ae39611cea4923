use std::sync::Arc;

use async_trait::async_trait;
use events_errors::TableError;
use events_models::{EventRow, NewEvent, UpdateEventRequest};

/// The remote `events` table. Rows come back undecoded; turning them into
/// `Event`s is the caller's job.
#[async_trait]
pub trait EventTable: Send + Sync {
    /// Every row, newest `created_at` first.
    async fn select_all(&self) -> Result<Vec<EventRow>, TableError>;

    /// Inserts one row and returns it as stored.
    async fn insert(&self, event: NewEvent) -> Result<EventRow, TableError>;

    /// Applies the present fields of `update` to the row with `id`.
    async fn update_by_id(
        &self, id: &str, update: &UpdateEventRequest,
    ) -> Result<EventRow, TableError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), TableError>;
}

#[async_trait]
impl<T> EventTable for Arc<T>
where
    T: EventTable + ?Sized,
{
    async fn select_all(&self) -> Result<Vec<EventRow>, TableError> {
        (**self).select_all().await
    }

    async fn insert(&self, event: NewEvent) -> Result<EventRow, TableError> {
        (**self).insert(event).await
    }

    async fn update_by_id(
        &self, id: &str, update: &UpdateEventRequest,
    ) -> Result<EventRow, TableError> {
        (**self).update_by_id(id, update).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), TableError> {
        (**self).delete_by_id(id).await
    }
}
