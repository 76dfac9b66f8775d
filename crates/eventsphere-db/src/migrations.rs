use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS accounts (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            firstName       TEXT NOT NULL,
            lastName        TEXT NOT NULL,
            email           TEXT NOT NULL UNIQUE,
            password        TEXT NOT NULL,
            accountType     TEXT,
            eventType       TEXT,
            decorations     TEXT NOT NULL DEFAULT '',
            profilePicture  TEXT,
            age             INTEGER CHECK (age IS NULL OR age >= 0),
            referrer        TEXT,
            suggestion      TEXT,
            createdAt       TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS events (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            title           TEXT NOT NULL,
            description     TEXT NOT NULL DEFAULT '',
            date            TEXT NOT NULL,
            time            TEXT NOT NULL,
            location        TEXT NOT NULL,
            category        TEXT NOT NULL,
            price           REAL NOT NULL DEFAULT 0 CHECK (price >= 0),
            maxAttendees    INTEGER NOT NULL DEFAULT 100 CHECK (maxAttendees > 0),
            imageUrl        TEXT,
            createdAt       TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_events_schedule
            ON events(date, time);

        CREATE TABLE IF NOT EXISTS event_registrations (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            eventId             INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            firstName           TEXT NOT NULL,
            lastName            TEXT NOT NULL,
            email               TEXT NOT NULL,
            phone               TEXT,
            message             TEXT,
            registrationDate    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_event_registrations_event
            ON event_registrations(eventId);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
