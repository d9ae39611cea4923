use async_trait::async_trait;
use events_errors::TableError;
use events_models::{EventRow, NewEvent, UpdateEventRequest, count_column};
use sql_connection::{Object, SqlConnect};
use tokio_postgres::Row;
use tracing::{debug, instrument};

use crate::table::EventTable;

const COLUMNS: &str = "id, title, description, date, time, location, \
                       category, status, attendees, max_attendees, price, \
                       image, organizer, created_at, updated_at";

/// `events` table over a Postgres pool.
#[derive(Clone)]
pub struct PgEventTable {
    db: SqlConnect,
}

impl PgEventTable {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    async fn client(&self) -> Result<Object, TableError> {
        self.db
            .get_client()
            .await
            .map_err(|e| TableError::Connection(e.to_string()))
    }
}

fn query_error(e: tokio_postgres::Error) -> TableError {
    TableError::Query(e.to_string())
}

fn row_to_event_row(row: &Row) -> Result<EventRow, tokio_postgres::Error> {
    Ok(EventRow {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        date: row.try_get("date")?,
        time: row.try_get("time")?,
        location: row.try_get("location")?,
        category: row.try_get("category")?,
        status: row.try_get("status")?,
        attendees: row.try_get("attendees")?,
        max_attendees: row.try_get("max_attendees")?,
        price: row.try_get("price")?,
        image: row.try_get("image")?,
        organizer: row.try_get("organizer")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl EventTable for PgEventTable {
    #[instrument(skip_all)]
    async fn select_all(&self) -> Result<Vec<EventRow>, TableError> {
        let client = self.client().await?;
        let sql =
            format!("SELECT {COLUMNS} FROM events ORDER BY created_at DESC");
        let rows = client.query(&sql, &[]).await.map_err(query_error)?;
        debug!(count = rows.len(), "selected events");

        rows.iter()
            .map(row_to_event_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error)
    }

    #[instrument(skip_all, fields(title = %event.title))]
    async fn insert(&self, event: NewEvent) -> Result<EventRow, TableError> {
        let client = self.client().await?;
        let sql = format!(
            "INSERT INTO events (title, description, date, time, location, \
             category, status, max_attendees, price, image, organizer) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let row = client
            .query_one(
                &sql,
                &[
                    &event.title,
                    &event.description,
                    &event.date,
                    &event.time,
                    &event.location,
                    &event.category.as_str(),
                    &event.status.as_str(),
                    &count_column(event.max_attendees),
                    &event.price,
                    &event.image,
                    &event.organizer,
                ],
            )
            .await
            .map_err(query_error)?;

        row_to_event_row(&row).map_err(query_error)
    }

    #[instrument(skip(self, update))]
    async fn update_by_id(
        &self, id: &str, update: &UpdateEventRequest,
    ) -> Result<EventRow, TableError> {
        let client = self.client().await?;
        let sql = format!(
            "UPDATE events SET \
             title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             date = COALESCE($4, date), \
             time = COALESCE($5, time), \
             location = COALESCE($6, location), \
             category = COALESCE($7, category), \
             max_attendees = COALESCE($8, max_attendees), \
             price = COALESCE($9, price), \
             image = COALESCE($10, image), \
             status = COALESCE($11, status), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let category = update.category.map(|category| category.as_str());
        let status = update.status.map(|status| status.as_str());
        let max_attendees = update.max_attendees.map(count_column);
        let row = client
            .query_opt(
                &sql,
                &[
                    &id,
                    &update.title,
                    &update.description,
                    &update.date,
                    &update.time,
                    &update.location,
                    &category,
                    &max_attendees,
                    &update.price,
                    &update.image,
                    &status,
                ],
            )
            .await
            .map_err(query_error)?
            .ok_or_else(|| TableError::NotFound { id: id.to_string() })?;

        row_to_event_row(&row).map_err(query_error)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> Result<(), TableError> {
        let client = self.client().await?;
        let deleted = client
            .execute("DELETE FROM events WHERE id = $1", &[&id])
            .await
            .map_err(query_error)?;

        if deleted == 0 {
            return Err(TableError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
