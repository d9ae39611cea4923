use sql_connection::Migration;

/// Schema for the `events` table, applied in order.
pub const EVENT_MIGRATIONS: &[Migration] = &[Migration {
    name: "001_create_events",
    sql: include_str!("../../migrations/sql/001_create_events.sql"),
}];
