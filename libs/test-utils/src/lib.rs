pub mod fixtures;
pub mod flaky;
pub mod postgres;

pub use fixtures::*;
pub use flaky::{FlakyEventTable, TableOp};
pub use postgres::TestPostgresContainer;
