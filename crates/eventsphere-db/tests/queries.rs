use eventsphere_db::models::{NewAccountRow, NewEventRow, NewRegistrationRow};
use eventsphere_db::{Constraint, Database, constraint_violation};

fn open() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(&dir.path().join("nested").join("events.db")).unwrap();
    (dir, db)
}

fn event<'a>(title: &'a str, date: &'a str, time: &'a str) -> NewEventRow<'a> {
    NewEventRow {
        title,
        description: "",
        date,
        time,
        location: "Hall A",
        category: "Music",
        price: 10.0,
        max_attendees: 50,
        image_url: None,
    }
}

fn count(db: &Database, table: &str) -> i64 {
    db.with_conn(|conn| {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?)
    })
    .unwrap()
}

fn account(email: &str) -> NewAccountRow<'_> {
    NewAccountRow {
        first_name: "Ana",
        last_name: "Lee",
        email,
        password: "$argon2id$opaque",
        account_type: Some("personal"),
        event_type: None,
        decorations: "",
        profile_picture: None,
        age: Some(30),
        referrer: None,
        suggestion: None,
        created_at: "2025-01-01T00:00:00Z",
    }
}

#[test]
fn open_creates_parent_directory_and_tables() {
    let (_dir, db) = open();
    assert_eq!(count(&db, "events"), 0);
    assert_eq!(count(&db, "accounts"), 0);
    assert_eq!(count(&db, "event_registrations"), 0);
    assert!(db.list_events().unwrap().is_empty());
}

#[test]
fn seed_only_fills_an_empty_table() {
    let (_dir, db) = open();
    let catalog = [
        event("late", "2025-09-10", "10:00:00"),
        event("early", "2025-07-15", "18:00:00"),
    ];

    assert_eq!(db.seed_events_if_empty(&catalog).unwrap(), 2);
    assert_eq!(db.seed_events_if_empty(&catalog).unwrap(), 0);
    assert_eq!(count(&db, "events"), 2);
}

#[test]
fn events_are_listed_by_date_then_time() {
    let (_dir, db) = open();
    db.seed_events_if_empty(&[
        event("b", "2025-07-15", "20:00:00"),
        event("c", "2025-09-10", "08:00:00"),
        event("a", "2025-07-15", "09:00:00"),
    ])
    .unwrap();

    let titles: Vec<String> = db.list_events().unwrap().into_iter().map(|e| e.title).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[test]
fn duplicate_email_is_a_unique_violation() {
    let (_dir, db) = open();
    assert!(!db.email_exists("a@x.com").unwrap());

    let id = db.insert_account(&account("a@x.com")).unwrap();
    assert!(id > 0);
    assert!(db.email_exists("a@x.com").unwrap());

    let err = db.insert_account(&account("a@x.com")).unwrap_err();
    assert_eq!(constraint_violation(&err), Some(Constraint::Unique));
}

#[test]
fn registration_requires_existing_event() {
    let (_dir, db) = open();
    let reg = NewRegistrationRow {
        event_id: 99,
        first_name: "Ana",
        last_name: "Lee",
        email: "a@x.com",
        phone: None,
        message: None,
        registration_date: "2025-01-01T00:00:00Z",
    };

    let err = db.insert_registration(&reg).unwrap_err();
    assert_eq!(constraint_violation(&err), Some(Constraint::ForeignKey));

    db.seed_events_if_empty(&[event("a", "2025-07-15", "09:00:00")]).unwrap();
    let event_id = db.list_events().unwrap()[0].id;

    let first = db
        .insert_registration(&NewRegistrationRow { event_id, ..reg })
        .unwrap();
    let (id, email): (i64, String) = db
        .with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT id, email FROM event_registrations WHERE eventId = ?1",
                [event_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?)
        })
        .unwrap();
    assert_eq!(id, first);
    assert_eq!(email, "a@x.com");
}

#[test]
fn non_constraint_errors_are_not_classified() {
    let err = anyhow::anyhow!("disk on fire");
    assert_eq!(constraint_violation(&err), None);
}
