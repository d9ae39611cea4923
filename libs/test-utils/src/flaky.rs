use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use events_dao::{EventTable, MemoryEventTable};
use events_errors::TableError;
use events_models::{EventRow, NewEvent, UpdateEventRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableOp {
    Select,
    Insert,
    Update,
    Delete,
}

/// Memory table with switchable failures, artificial latency and an
/// in-flight counter.
#[derive(Debug, Default)]
pub struct FlakyEventTable {
    inner: MemoryEventTable,
    failing: Mutex<HashMap<TableOp, String>>,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl FlakyEventTable {
    pub fn new(rows: Vec<EventRow>) -> Self {
        Self {
            inner: MemoryEventTable::with_rows(rows),
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes `op` fail with `message` until `recover` is called.
    pub fn fail(&self, op: TableOp, message: &str) {
        self.failing.lock().unwrap().insert(op, message.to_string());
    }

    pub fn recover(&self) { self.failing.lock().unwrap().clear(); }

    /// Highest number of calls that were ever running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    pub fn inner(&self) -> &MemoryEventTable { &self.inner }

    async fn enter(&self, op: TableOp) -> Result<(), TableError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let failure = self.failing.lock().unwrap().get(&op).cloned();
        if let Some(message) = failure {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            return Err(TableError::Query(message));
        }
        Ok(())
    }

    fn exit(&self) { self.in_flight.fetch_sub(1, Ordering::SeqCst); }
}

#[async_trait]
impl EventTable for FlakyEventTable {
    async fn select_all(&self) -> Result<Vec<EventRow>, TableError> {
        self.enter(TableOp::Select).await?;
        let result = self.inner.select_all().await;
        self.exit();
        result
    }

    async fn insert(&self, event: NewEvent) -> Result<EventRow, TableError> {
        self.enter(TableOp::Insert).await?;
        let result = self.inner.insert(event).await;
        self.exit();
        result
    }

    async fn update_by_id(
        &self, id: &str, update: &UpdateEventRequest,
    ) -> Result<EventRow, TableError> {
        self.enter(TableOp::Update).await?;
        let result = self.inner.update_by_id(id, update).await;
        self.exit();
        result
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), TableError> {
        self.enter(TableOp::Delete).await?;
        let result = self.inner.delete_by_id(id).await;
        self.exit();
        result
    }
}
