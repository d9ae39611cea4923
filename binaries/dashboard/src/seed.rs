use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use events_models::{Category, EventRow, Status};
use sql_connection::SqlConnect;
use tracing::{info, instrument};

struct SampleEvent {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    date: &'static str,
    time: &'static str,
    location: &'static str,
    category: Category,
    status: Status,
    attendees: i32,
    max_attendees: i32,
    price: f64,
    image: &'static str,
    organizer: &'static str,
    created_at: &'static str,
    updated_at: &'static str,
}

const SAMPLE_EVENTS: [SampleEvent; 4] = [
    SampleEvent {
        id: "1",
        title: "Tech Innovation Summit 2024",
        description: "Join industry leaders for cutting-edge technology \
                      discussions and networking opportunities.",
        date: "2024-03-15",
        time: "09:00",
        location: "San Francisco Convention Center",
        category: Category::Conference,
        status: Status::Published,
        attendees: 245,
        max_attendees: 500,
        price: 299.0,
        image: "https://images.unsplash.com/photo-1540575467063-178a50c2df87?w=800&h=400&fit=crop",
        organizer: "TechCorp Events",
        created_at: "2024-01-15T10:00:00Z",
        updated_at: "2024-01-20T14:30:00Z",
    },
    SampleEvent {
        id: "2",
        title: "Digital Marketing Workshop",
        description: "Learn the latest digital marketing strategies from \
                      industry experts.",
        date: "2024-03-22",
        time: "14:00",
        location: "Downtown Business Center",
        category: Category::Workshop,
        status: Status::Published,
        attendees: 89,
        max_attendees: 150,
        price: 149.0,
        image: "https://images.unsplash.com/photo-1556761175-b413da4baf72?w=800&h=400&fit=crop",
        organizer: "Marketing Pro",
        created_at: "2024-01-10T09:00:00Z",
        updated_at: "2024-01-18T16:45:00Z",
    },
    SampleEvent {
        id: "3",
        title: "Startup Networking Night",
        description: "Connect with fellow entrepreneurs and potential \
                      investors in a relaxed atmosphere.",
        date: "2024-03-28",
        time: "18:30",
        location: "Rooftop Lounge, City Center",
        category: Category::Networking,
        status: Status::Published,
        attendees: 156,
        max_attendees: 200,
        price: 75.0,
        image: "https://images.unsplash.com/photo-1511578314322-379afb476865?w=800&h=400&fit=crop",
        organizer: "Startup Hub",
        created_at: "2024-01-12T11:30:00Z",
        updated_at: "2024-01-25T13:20:00Z",
    },
    SampleEvent {
        id: "4",
        title: "AI & Machine Learning Seminar",
        description: "Explore the future of artificial intelligence and its \
                      applications across industries.",
        date: "2024-04-05",
        time: "10:00",
        location: "University Tech Campus",
        category: Category::Seminar,
        status: Status::Draft,
        attendees: 0,
        max_attendees: 300,
        price: 199.0,
        image: "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?w=800&h=400&fit=crop",
        organizer: "AI Research Institute",
        created_at: "2024-02-01T08:15:00Z",
        updated_at: "2024-02-05T10:30:00Z",
    },
];

fn timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("bad sample timestamp {value}"))?
        .with_timezone(&Utc))
}

/// Sample rows with their fixed ids, attendee counts and timestamps.
pub fn sample_rows() -> Result<Vec<EventRow>> {
    SAMPLE_EVENTS
        .iter()
        .map(|sample| {
            Ok(EventRow {
                id: sample.id.to_string(),
                title: sample.title.to_string(),
                description: sample.description.to_string(),
                date: sample.date.to_string(),
                time: sample.time.to_string(),
                location: sample.location.to_string(),
                category: sample.category.as_str().to_string(),
                status: sample.status.as_str().to_string(),
                attendees: sample.attendees,
                max_attendees: sample.max_attendees,
                price: sample.price,
                image: Some(sample.image.to_string()),
                organizer: sample.organizer.to_string(),
                created_at: timestamp(sample.created_at)?,
                updated_at: timestamp(sample.updated_at)?,
            })
        })
        .collect()
}

/// Writes the sample rows straight into Postgres, skipping ids that already
/// exist. Returns how many rows were inserted.
#[instrument(skip_all)]
pub async fn seed_postgres(db: &SqlConnect) -> Result<u64> {
    let client = db.get_client().await?;
    let mut inserted = 0;
    for row in sample_rows()? {
        inserted += client
            .execute(
                "INSERT INTO events (id, title, description, date, time, \
                 location, category, status, attendees, max_attendees, \
                 price, image, organizer, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
                 $13, $14, $15) ON CONFLICT (id) DO NOTHING",
                &[
                    &row.id,
                    &row.title,
                    &row.description,
                    &row.date,
                    &row.time,
                    &row.location,
                    &row.category,
                    &row.status,
                    &row.attendees,
                    &row.max_attendees,
                    &row.price,
                    &row.image,
                    &row.organizer,
                    &row.created_at,
                    &row.updated_at,
                ],
            )
            .await?;
    }
    info!(inserted, "sample events seeded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use events_models::Event;

    use super::*;

    #[test]
    fn test_sample_rows_decode() {
        let events: Vec<Event> = sample_rows()
            .unwrap()
            .into_iter()
            .map(|row| Event::try_from(row).unwrap())
            .collect();

        assert_eq!(events.len(), 4);
        assert_eq!(events[0].revenue(), 245.0 * 299.0);
        assert_eq!(events[3].status, Status::Draft);
    }
}
