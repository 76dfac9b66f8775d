use std::path::Path;

use anyhow::{Context, anyhow};
use chrono::{NaiveDate, NaiveTime, SecondsFormat, Utc};

use eventsphere_db::models::{EventRow, NewAccountRow, NewEventRow, NewRegistrationRow};
use eventsphere_db::{Constraint, Database, constraint_violation};
use eventsphere_types::models::{Event, NewAccount, NewEvent, NewRegistration};

use crate::{Store, StoreError, StoreResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// RELATIONAL-mode store backed by SQLite. Uniqueness of account emails and
/// the registration -> event reference are enforced by the schema.
pub struct RelationalStore {
    db: Database,
}

impl RelationalStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }
}

fn event_from_row(row: EventRow) -> anyhow::Result<Event> {
    let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
        .with_context(|| format!("event {} has malformed date '{}'", row.id, row.date))?;
    let time = NaiveTime::parse_from_str(&row.time, TIME_FORMAT)
        .with_context(|| format!("event {} has malformed time '{}'", row.id, row.time))?;
    let max_attendees = u32::try_from(row.max_attendees)
        .map_err(|_| anyhow!("event {} has invalid maxAttendees {}", row.id, row.max_attendees))?;

    Ok(Event {
        id: row.id,
        title: row.title,
        description: row.description,
        date,
        time,
        location: row.location,
        category: row.category,
        price: row.price,
        max_attendees,
        image_url: row.image_url,
    })
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Store for RelationalStore {
    fn list_events(&self) -> StoreResult<Vec<Event>> {
        let rows = self.db.list_events()?;
        let events = rows
            .into_iter()
            .map(event_from_row)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(events)
    }

    fn seed_if_empty(&self, catalog: &[NewEvent]) -> StoreResult<usize> {
        let dates: Vec<(String, String)> = catalog
            .iter()
            .map(|e| {
                (
                    e.date.format(DATE_FORMAT).to_string(),
                    e.time.format(TIME_FORMAT).to_string(),
                )
            })
            .collect();

        let rows: Vec<NewEventRow<'_>> = catalog
            .iter()
            .zip(&dates)
            .map(|(e, (date, time))| NewEventRow {
                title: &e.title,
                description: &e.description,
                date: date.as_str(),
                time: time.as_str(),
                location: &e.location,
                category: &e.category,
                price: e.price,
                max_attendees: i64::from(e.max_attendees),
                image_url: e.image_url.as_deref(),
            })
            .collect();

        Ok(self.db.seed_events_if_empty(&rows)?)
    }

    fn email_exists(&self, email: &str) -> StoreResult<bool> {
        Ok(self.db.email_exists(email)?)
    }

    fn insert_account(&self, account: NewAccount) -> StoreResult<i64> {
        let created_at = now_rfc3339();
        let row = NewAccountRow {
            first_name: &account.first_name,
            last_name: &account.last_name,
            email: &account.email,
            password: &account.password,
            account_type: account.account_type.as_deref(),
            event_type: account.event_type.as_deref(),
            decorations: &account.decorations,
            profile_picture: account.profile_picture.as_deref(),
            age: account.age.map(i64::from),
            referrer: account.referrer.as_deref(),
            suggestion: account.suggestion.as_deref(),
            created_at: &created_at,
        };

        self.db.insert_account(&row).map_err(|e| match constraint_violation(&e) {
            Some(Constraint::Unique) => StoreError::EmailTaken(account.email.clone()),
            _ => StoreError::Backend(e),
        })
    }

    fn insert_registration(&self, registration: NewRegistration) -> StoreResult<i64> {
        let registration_date = now_rfc3339();
        let row = NewRegistrationRow {
            event_id: registration.event_id,
            first_name: &registration.first_name,
            last_name: &registration.last_name,
            email: &registration.email,
            phone: registration.phone.as_deref(),
            message: registration.message.as_deref(),
            registration_date: &registration_date,
        };

        self.db.insert_registration(&row).map_err(|e| match constraint_violation(&e) {
            Some(Constraint::ForeignKey) => StoreError::UnknownEvent(registration.event_id),
            _ => StoreError::Backend(e),
        })
    }
}
