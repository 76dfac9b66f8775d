use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// -- Events --

/// A catalog entry. Field names follow the camelCase layout used by the
/// JSON files and the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_max_attendees")]
    pub max_attendees: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_max_attendees() -> u32 {
    100
}

/// An event before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub category: String,
    pub price: f64,
    pub max_attendees: u32,
    pub image_url: Option<String>,
}

impl NewEvent {
    pub fn with_id(&self, id: i64) -> Event {
        Event {
            id,
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
            time: self.time,
            location: self.location.clone(),
            category: self.category.clone(),
            price: self.price,
            max_attendees: self.max_attendees,
            image_url: self.image_url.clone(),
        }
    }
}

/// Catalog order: date, then time, then id so equal slots stay stable.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.time.cmp(&b.time))
            .then(a.id.cmp(&b.id))
    });
}

// -- Accounts --

/// A stored user account. `password` holds an Argon2 PHC string and is
/// opaque to the stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub account_type: Option<String>,
    pub event_type: Option<String>,
    #[serde(default)]
    pub decorations: String,
    pub profile_picture: Option<String>,
    pub age: Option<u32>,
    pub referrer: Option<String>,
    pub suggestion: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub account_type: Option<String>,
    pub event_type: Option<String>,
    pub decorations: String,
    pub profile_picture: Option<String>,
    pub age: Option<u32>,
    pub referrer: Option<String>,
    pub suggestion: Option<String>,
}

impl NewAccount {
    pub fn into_account(self, id: i64, created_at: DateTime<Utc>) -> Account {
        Account {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            account_type: self.account_type,
            event_type: self.event_type,
            decorations: self.decorations,
            profile_picture: self.profile_picture,
            age: self.age,
            referrer: self.referrer,
            suggestion: self.suggestion,
            created_at,
        }
    }
}

// -- Registrations --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub registration_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewRegistration {
    pub event_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl NewRegistration {
    pub fn into_registration(self, id: i64, registration_date: DateTime<Utc>) -> Registration {
        Registration {
            id,
            event_id: self.event_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            registration_date,
        }
    }
}
