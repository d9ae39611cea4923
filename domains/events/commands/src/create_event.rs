use std::sync::Arc;

use events_dao::EventTable;
use events_errors::TableError;
use events_models::{CreateEventRequest, Event, RowDecodeError, ValidationError};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum CreateEventError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Decode(#[from] RowDecodeError),
}

#[derive(Clone)]
pub struct CreateEventHandler {
    table: Arc<dyn EventTable>,
}

impl CreateEventHandler {
    pub fn new(table: Arc<dyn EventTable>) -> Self { Self { table } }

    /// Inserts a draft event and returns the stored record.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn execute(
        &self, request: CreateEventRequest,
    ) -> Result<Event, CreateEventError> {
        request.validate()?;
        let row = self.table.insert(request.into_new_event()).await?;
        let event = Event::try_from(row)?;
        info!(id = %event.id, "event created");
        Ok(event)
    }
}
