use std::sync::Arc;

use events_dao::EventTable;
use events_errors::TableError;
use events_models::{Event, RowDecodeError, UpdateEventRequest, ValidationError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum UpdateEventError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Decode(#[from] RowDecodeError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEventCommand {
    pub id: String,
    #[serde(flatten)]
    pub update: UpdateEventRequest,
}

#[derive(Clone)]
pub struct UpdateEventHandler {
    table: Arc<dyn EventTable>,
}

impl UpdateEventHandler {
    pub fn new(table: Arc<dyn EventTable>) -> Self { Self { table } }

    #[instrument(skip(self, command), fields(id = %command.id))]
    pub async fn execute(
        &self, command: UpdateEventCommand,
    ) -> Result<Event, UpdateEventError> {
        command.update.validate()?;
        let row = self.table.update_by_id(&command.id, &command.update).await?;
        let event = Event::try_from(row)?;
        info!("event updated");
        Ok(event)
    }
}
