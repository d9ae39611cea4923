use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use events_models::{Category, CreateEventRequest, Status, UpdateEventRequest};

#[derive(Parser)]
#[command(name = "event-dashboard")]
#[command(about = "Manage events and view dashboard figures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Reference date for upcoming/today logic (default: local date)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Postgres connection string; without one an in-memory demo table is
    /// used
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List events, newest first
    List {
        #[arg(long)]
        status: Option<Status>,
        #[arg(long)]
        category: Option<Category>,
        /// Case-insensitive match on title or description
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one event
    Show { id: String },
    /// Create a draft event
    Create(CreateArgs),
    /// Change some fields of an event
    Update(UpdateArgs),
    /// Delete an event
    Delete { id: String },
    /// Headline figures, upcoming preview and category legend
    Dashboard,
    /// Revenue, attendance, categories and top performers
    Analytics {
        /// Also print the placeholder monthly trend
        #[arg(long)]
        sample_trend: bool,
    },
    /// Month grid (or week) with events per day
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        /// Show the week containing the reference date instead
        #[arg(long)]
        week: bool,
        /// Months to move from the reference (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// Insert the sample events
    Seed,
    /// Apply schema migrations
    Migrate,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    #[arg(long, default_value = "")]
    pub time: String,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "other")]
    pub category: Category,
    #[arg(long)]
    pub max_attendees: u32,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub organizer: Option<String>,
}

impl From<CreateArgs> for CreateEventRequest {
    fn from(args: CreateArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            date: args.date,
            time: args.time,
            location: args.location,
            category: args.category,
            max_attendees: args.max_attendees,
            price: args.price,
            image: args.image,
            organizer: args.organizer,
        }
    }
}

#[derive(Args)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub category: Option<Category>,
    #[arg(long)]
    pub max_attendees: Option<u32>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub status: Option<Status>,
}

impl UpdateArgs {
    pub fn into_parts(self) -> (String, UpdateEventRequest) {
        let update = UpdateEventRequest {
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            category: self.category,
            max_attendees: self.max_attendees,
            price: self.price,
            image: self.image,
            status: self.status,
        };
        (self.id, update)
    }
}
