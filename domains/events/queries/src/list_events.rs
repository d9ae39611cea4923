use std::sync::Arc;

use events_dao::EventTable;
use events_errors::TableError;
use events_models::{Event, RowDecodeError};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ListEventsError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Decode(#[from] RowDecodeError),
}

#[derive(Clone)]
pub struct ListEventsQueryHandler {
    table: Arc<dyn EventTable>,
}

impl ListEventsQueryHandler {
    pub fn new(table: Arc<dyn EventTable>) -> Self { Self { table } }

    /// Every event, newest first. One undecodable row fails the whole read.
    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Vec<Event>, ListEventsError> {
        let rows = self.table.select_all().await?;
        let events = rows
            .into_iter()
            .map(Event::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = events.len(), "events listed");
        Ok(events)
    }
}
