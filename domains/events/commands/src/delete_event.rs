use std::sync::Arc;

use events_dao::EventTable;
use events_errors::TableError;
use serde::Deserialize;
use tracing::{info, instrument};

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteEventCommand {
    pub id: String,
}

#[derive(Clone)]
pub struct DeleteEventHandler {
    table: Arc<dyn EventTable>,
}

impl DeleteEventHandler {
    pub fn new(table: Arc<dyn EventTable>) -> Self { Self { table } }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteEventCommand,
    ) -> Result<(), TableError> {
        self.table.delete_by_id(&command.id).await?;
        info!(id = %command.id, "event deleted");
        Ok(())
    }
}
