use std::sync::Arc;

use events_commands::{
    CreateEventHandler, DeleteEventCommand, DeleteEventHandler,
    UpdateEventCommand, UpdateEventHandler,
};
use events_dao::EventTable;
use events_errors::EventError;
use events_models::{CreateEventRequest, Event, UpdateEventRequest};
use events_queries::ListEventsQueryHandler;
use tokio::sync::{Mutex, RwLock};
use tracing::{instrument, warn};

#[derive(Debug, Default)]
struct StoreState {
    events: Vec<Event>,
    loading: bool,
    error: Option<EventError>,
}

/// Client-side cache of the `events` table.
///
/// Every operation holds `ops` for its whole remote round trip, so calls
/// apply to the cache in the order they were issued. The cache only changes
/// after the remote side reports success. A successful refetch clears the
/// error flag; a successful write leaves it alone.
pub struct EventStore {
    list_events: ListEventsQueryHandler,
    create_event: CreateEventHandler,
    update_event: UpdateEventHandler,
    delete_event: DeleteEventHandler,
    ops: Mutex<()>,
    state: RwLock<StoreState>,
}

impl EventStore {
    pub fn new(table: Arc<dyn EventTable>) -> Self {
        Self {
            list_events: ListEventsQueryHandler::new(table.clone()),
            create_event: CreateEventHandler::new(table.clone()),
            update_event: UpdateEventHandler::new(table.clone()),
            delete_event: DeleteEventHandler::new(table),
            ops: Mutex::new(()),
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Reloads the cache from the table, newest first.
    #[instrument(skip(self))]
    pub async fn refetch(&self) -> Result<(), EventError> {
        let _guard = self.ops.lock().await;
        self.state.write().await.loading = true;

        let result = self.list_events.execute().await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(events) => {
                state.events = events;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch events");
                let err = EventError::fetch(e);
                state.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Refetches and returns the fresh list.
    pub async fn list(&self) -> Result<Vec<Event>, EventError> {
        self.refetch().await?;
        Ok(self.events().await)
    }

    #[instrument(skip(self, request))]
    pub async fn create(
        &self, request: CreateEventRequest,
    ) -> Result<Event, EventError> {
        let _guard = self.ops.lock().await;

        match self.create_event.execute(request).await {
            Ok(event) => {
                let mut state = self.state.write().await;
                state.events.insert(0, event.clone());
                Ok(event)
            }
            Err(e) => {
                warn!(error = %e, "failed to create event");
                Err(self.record(EventError::create(e)).await)
            }
        }
    }

    #[instrument(skip(self, update))]
    pub async fn update(
        &self, id: &str, update: UpdateEventRequest,
    ) -> Result<Event, EventError> {
        let _guard = self.ops.lock().await;
        let command = UpdateEventCommand {
            id: id.to_string(),
            update,
        };

        match self.update_event.execute(command).await {
            Ok(event) => {
                let mut state = self.state.write().await;
                if let Some(slot) =
                    state.events.iter_mut().find(|cached| cached.id == event.id)
                {
                    *slot = event.clone();
                }
                Ok(event)
            }
            Err(e) => {
                warn!(error = %e, "failed to update event");
                Err(self.record(EventError::update(e)).await)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), EventError> {
        let _guard = self.ops.lock().await;
        let command = DeleteEventCommand { id: id.to_string() };

        match self.delete_event.execute(command).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.events.retain(|cached| cached.id != id);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to delete event");
                Err(self.record(EventError::delete(e)).await)
            }
        }
    }

    async fn record(&self, err: EventError) -> EventError {
        self.state.write().await.error = Some(err.clone());
        err
    }

    /// Snapshot of the cached list.
    pub async fn events(&self) -> Vec<Event> {
        self.state.read().await.events.clone()
    }

    pub async fn find(&self, id: &str) -> Option<Event> {
        self.state
            .read()
            .await
            .events
            .iter()
            .find(|event| event.id == id)
            .cloned()
    }

    pub async fn is_loading(&self) -> bool { self.state.read().await.loading }

    pub async fn error(&self) -> Option<EventError> {
        self.state.read().await.error.clone()
    }

    pub async fn clear_error(&self) { self.state.write().await.error = None; }
}
