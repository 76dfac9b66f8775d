use crate::Database;
use crate::models::{EventRow, NewAccountRow, NewEventRow, NewRegistrationRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

impl Database {
    // -- Events --

    pub fn list_events(&self) -> Result<Vec<EventRow>> {
        self.with_conn(query_events)
    }

    /// Insert `events` in one transaction if the table is empty. The count
    /// and the inserts run under the writer lock. Returns how many rows were
    /// inserted.
    pub fn seed_events_if_empty(&self, events: &[NewEventRow<'_>]) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let existing: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
            if existing > 0 {
                debug!("events table already holds {} rows, skipping seed", existing);
                return Ok(0);
            }

            let tx = conn.unchecked_transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO events (title, description, date, time, location, category, price, maxAttendees, imageUrl)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )?;
                for e in events {
                    stmt.execute(params![
                        e.title,
                        e.description,
                        e.date,
                        e.time,
                        e.location,
                        e.category,
                        e.price,
                        e.max_attendees,
                        e.image_url,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(events.len())
        })
    }

    // -- Accounts --

    pub fn email_exists(&self, email: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn
                .query_row("SELECT id FROM accounts WHERE email = ?1", [email], |row| {
                    row.get::<_, i64>(0)
                })
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// Insert an account and return its id. A duplicate email fails with a
    /// UNIQUE constraint error; see [`crate::constraint_violation`].
    pub fn insert_account(&self, account: &NewAccountRow<'_>) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO accounts
                 (firstName, lastName, email, password, accountType, eventType, decorations, profilePicture, age, referrer, suggestion, createdAt)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    account.first_name,
                    account.last_name,
                    account.email,
                    account.password,
                    account.account_type,
                    account.event_type,
                    account.decorations,
                    account.profile_picture,
                    account.age,
                    account.referrer,
                    account.suggestion,
                    account.created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    // -- Registrations --

    pub fn insert_registration(&self, reg: &NewRegistrationRow<'_>) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO event_registrations
                 (eventId, firstName, lastName, email, phone, message, registrationDate)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    reg.event_id,
                    reg.first_name,
                    reg.last_name,
                    reg.email,
                    reg.phone,
                    reg.message,
                    reg.registration_date,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }
}

fn query_events(conn: &Connection) -> Result<Vec<EventRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, date, time, location, category, price, maxAttendees, imageUrl
         FROM events
         ORDER BY date ASC, time ASC, id ASC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(EventRow {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                date: row.get(3)?,
                time: row.get(4)?,
                location: row.get(5)?,
                category: row.get(6)?,
                price: row.get(7)?,
                max_attendees: row.get(8)?,
                image_url: row.get(9)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
