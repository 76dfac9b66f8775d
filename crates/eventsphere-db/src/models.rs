/// Database row types. These map directly to SQLite rows and stay separate
/// from the eventsphere-types models so the DB layer has no serde coupling.

pub struct EventRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub category: String,
    pub price: f64,
    pub max_attendees: i64,
    pub image_url: Option<String>,
}

/// Insert parameters for an event; the id is assigned by SQLite.
pub struct NewEventRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub date: &'a str,
    pub time: &'a str,
    pub location: &'a str,
    pub category: &'a str,
    pub price: f64,
    pub max_attendees: i64,
    pub image_url: Option<&'a str>,
}

pub struct NewAccountRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub account_type: Option<&'a str>,
    pub event_type: Option<&'a str>,
    pub decorations: &'a str,
    pub profile_picture: Option<&'a str>,
    pub age: Option<i64>,
    pub referrer: Option<&'a str>,
    pub suggestion: Option<&'a str>,
    pub created_at: &'a str,
}

pub struct NewRegistrationRow<'a> {
    pub event_id: i64,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub message: Option<&'a str>,
    pub registration_date: &'a str,
}
