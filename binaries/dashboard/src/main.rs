use std::sync::Arc;

use analytics::{
    AnalyticsReport, DashboardSnapshot,
    dashboard::{UPCOMING_PREVIEW_LIMIT, category_summary, upcoming_preview},
    sample::sample_monthly_trend,
};
use anyhow::{Context, Result};
use chrono::{Local, Months, NaiveDate};
use clap::Parser;
use common_errors::ErrorNotice;
use dashboard_views::{CalendarMode, NavTarget, View, ViewController};
use events_dao::{EVENT_MIGRATIONS, EventTable, MemoryEventTable, PgEventTable};
use events_errors::EventError;
use events_queries::{EventFilter, StatusFilter};
use events_store::EventStore;
use serde::Serialize;
use sql_connection::{
    PostgresDbConfig, SqlConnect, SqlMigrator, connect_postgres_db,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

mod cli;
mod render;
mod seed;

enum Backend {
    Postgres(SqlConnect),
    Memory,
}

struct App {
    store: EventStore,
    controller: ViewController,
    backend: Backend,
    today: NaiveDate,
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let database_url = cli.database_url.clone();
    let config = PostgresDbConfig::from_lookup(|key| match key {
        "DATABASE_URL" => database_url.clone(),
        _ => std::env::var(key).ok(),
    });

    let (table, backend): (Arc<dyn EventTable>, Backend) = match config {
        Some(config) => {
            let db = connect_postgres_db(&config).await?;
            info!("PostgreSQL connection pool initialized");
            (Arc::new(PgEventTable::new(db.clone())), Backend::Postgres(db))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory demo events");
            let table = MemoryEventTable::with_rows(seed::sample_rows()?);
            (Arc::new(table), Backend::Memory)
        }
    };

    let mut app = App {
        store: EventStore::new(table),
        controller: ViewController::new(today),
        backend,
        today,
        json: cli.json,
    };

    match app.run(cli.command).await {
        Ok(()) => Ok(()),
        Err(err) => {
            let notice = notice_for(err);
            if app.json {
                app.print_json(&notice)?;
            }
            else {
                eprintln!("{}", render::notice(&notice));
            }
            std::process::exit(1);
        }
    }
}

impl App {
    async fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::List {
                status,
                category,
                search,
            } => {
                self.controller.navigate(NavTarget::View(View::Events));
                *self.controller.filter_mut() = EventFilter {
                    status: status.map_or(StatusFilter::All, StatusFilter::Only),
                    category,
                    search,
                };
                let events = self.store.list().await?;
                let shown = self.controller.filter().apply(&events);
                self.emit(&shown, || render::event_list(&shown));
            }
            Commands::Show { id } => {
                self.controller.navigate(NavTarget::View(View::Events));
                self.store.refetch().await?;
                match self.store.find(&id).await {
                    Some(event) => {
                        self.emit(&event, || render::event_detail(&event))
                    }
                    None => {
                        return Err(ErrorNotice::fatal(
                            NOT_FOUND,
                            &format!("Event not found: {id}"),
                        )
                        .into());
                    }
                }
            }
            Commands::Create(args) => {
                self.controller.navigate(NavTarget::CreateEvent);
                let event = self.store.create(args.into()).await?;
                self.controller.close_modal();
                self.emit(&event, || render::event_detail(&event));
            }
            Commands::Update(args) => {
                let (id, update) = args.into_parts();
                let event = self.store.update(&id, update).await?;
                self.emit(&event, || render::event_detail(&event));
            }
            Commands::Delete { id } => {
                self.store.delete(&id).await?;
                let remaining = self.store.events().await.len();
                info!(%id, remaining, "deleted");
                self.emit(&id, || format!("Deleted {id}\n"));
            }
            Commands::Dashboard => {
                self.controller.navigate(NavTarget::View(View::Dashboard));
                let events = self.store.list().await?;
                let snapshot = DashboardSnapshot::compute(&events, self.today);
                let upcoming =
                    upcoming_preview(&events, self.today, UPCOMING_PREVIEW_LIMIT);
                let legend = category_summary(&events);
                self.emit(&snapshot, || {
                    render::dashboard(&snapshot, &upcoming, &legend)
                });
            }
            Commands::Analytics { sample_trend } => {
                self.controller.navigate(NavTarget::View(View::Analytics));
                let events = self.store.list().await?;
                let report = AnalyticsReport::build(&events);
                let trend = sample_monthly_trend();
                let trend = sample_trend.then_some(&trend[..]);
                self.emit(&report, || render::analytics(&report, trend));
            }
            Commands::Calendar {
                year,
                month,
                week,
                offset,
            } => {
                self.controller.navigate(NavTarget::View(View::Calendar));
                let events = self.store.list().await?;
                let reference = calendar_reference(self.today, year, month, offset);
                let calendar = self.controller.calendar_mut();
                calendar.today(reference);
                if week {
                    calendar.set_mode(CalendarMode::Week);
                }
                let calendar = *self.controller.calendar();
                let text = match calendar.mode() {
                    CalendarMode::Month => {
                        render::calendar_month(&calendar, &events, self.today)
                    }
                    CalendarMode::Week => {
                        render::calendar_week(&calendar, &events, self.today)
                    }
                };
                self.emit(&calendar.month_grid(), || text);
            }
            Commands::Seed => self.seed().await?,
            Commands::Migrate => self.migrate().await?,
        }
        Ok(())
    }

    async fn seed(&self) -> Result<()> {
        match self.backend {
            Backend::Postgres(ref db) => {
                let inserted = seed::seed_postgres(db)
                    .await
                    .context("seeding sample events failed")?;
                self.emit(&inserted, || format!("Seeded {inserted} events\n"));
            }
            Backend::Memory => {
                let count = self.store.list().await?.len();
                self.emit(&count, || {
                    format!("In-memory table already holds {count} sample events\n")
                });
            }
        }
        Ok(())
    }

    async fn migrate(&self) -> Result<()> {
        match self.backend {
            Backend::Postgres(ref db) => {
                let applied = SqlMigrator::new(db.pool().clone())
                    .run(EVENT_MIGRATIONS)
                    .await
                    .context("applying migrations failed")?;
                self.emit(&applied, || {
                    if applied.is_empty() {
                        "Schema is up to date\n".to_string()
                    }
                    else {
                        format!("Applied {}\n", applied.join(", "))
                    }
                });
            }
            Backend::Memory => {
                warn!("no database configured, nothing to migrate");
            }
        }
        Ok(())
    }

    fn emit<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce() -> String) {
        if self.json {
            if let Err(e) = self.print_json(value) {
                warn!(error = %e, "failed to serialize output");
            }
        }
        else {
            print!("{}", text());
        }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

const NOT_FOUND: &str = "NOT_FOUND";

/// Store failures keep their own notice (reads retryable, writes not),
/// notices raised here pass through, anything else is an internal error.
fn notice_for(err: anyhow::Error) -> ErrorNotice {
    if let Some(event_error) = err.downcast_ref::<EventError>() {
        return ErrorNotice::from(event_error);
    }
    match err.downcast::<ErrorNotice>() {
        Ok(notice) => notice,
        Err(err) => ErrorNotice::from(err),
    }
}

/// Calendar month to show: explicit year/month when given, otherwise the
/// current one, shifted by `offset` months.
fn calendar_reference(
    today: NaiveDate, year: Option<i32>, month: Option<u32>, offset: i32,
) -> NaiveDate {
    let base = match (year, month) {
        (None, None) => today,
        (year, month) => NaiveDate::from_ymd_opt(
            year.unwrap_or_else(|| chrono::Datelike::year(&today)),
            month.unwrap_or_else(|| chrono::Datelike::month(&today)),
            1,
        )
        .unwrap_or(today),
    };
    let step = Months::new(offset.unsigned_abs());
    let shifted = if offset >= 0 {
        base.checked_add_months(step)
    }
    else {
        base.checked_sub_months(step)
    };
    shifted.unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_store_errors_keep_their_notice() {
        let notice = notice_for(EventError::fetch("timeout").into());

        assert_eq!(notice.code, "FETCH_FAILED");
        assert!(notice.retryable);
    }

    #[test]
    fn test_missing_event_is_not_retryable() {
        let err: anyhow::Error =
            ErrorNotice::fatal(NOT_FOUND, "Event not found: 42").into();

        let notice = notice_for(err);

        assert_eq!(notice.code, NOT_FOUND);
        assert_eq!(notice.action(), None);
    }

    #[test]
    fn test_seed_and_migrate_failures_are_internal() {
        let err = anyhow::anyhow!("relation \"events\" does not exist")
            .context("seeding sample events failed");

        let notice = notice_for(err);

        assert_eq!(notice.code, "INTERNAL_ERROR");
        assert!(!notice.retryable);
        assert_ne!(notice.code, "CREATE_FAILED");
    }

    #[test]
    fn test_calendar_reference_defaults_to_today() {
        assert_eq!(
            calendar_reference(date(2024, 3, 20), None, None, 0),
            date(2024, 3, 20)
        );
    }

    #[test]
    fn test_calendar_reference_with_offset() {
        assert_eq!(
            calendar_reference(date(2024, 3, 20), None, Some(1), -2),
            date(2023, 11, 1)
        );
        assert_eq!(
            calendar_reference(date(2024, 3, 20), Some(2025), None, 1),
            date(2025, 4, 1)
        );
    }
}
