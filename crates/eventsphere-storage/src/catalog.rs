//! The demo catalog seeded into an empty event store at startup.

use chrono::{NaiveDate, NaiveTime};

use eventsphere_types::models::NewEvent;

struct Entry {
    title: &'static str,
    description: &'static str,
    date: NaiveDate,
    time: NaiveTime,
    location: &'static str,
    category: &'static str,
    price: f64,
    max_attendees: u32,
    image_url: &'static str,
}

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => panic!("invalid catalog date"),
    }
}

const fn time(hour: u32, min: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, min, 0) {
        Some(t) => t,
        None => panic!("invalid catalog time"),
    }
}

const CATALOG: [Entry; 5] = [
    Entry {
        title: "Summer Music Festival",
        description: "A vibrant outdoor music festival featuring local and international artists across multiple genres.",
        date: date(2025, 7, 15),
        time: time(18, 0),
        location: "Central Park, New York",
        category: "Music",
        price: 75.0,
        max_attendees: 500,
        image_url: "../assets/images/music festival.jpg",
    },
    Entry {
        title: "Tech Innovation Conference",
        description: "Join industry leaders and innovators for a day of tech talks, networking, and product showcases.",
        date: date(2025, 8, 20),
        time: time(9, 0),
        location: "Convention Center, San Francisco",
        category: "Technology",
        price: 150.0,
        max_attendees: 300,
        image_url: "../assets/images/techfest.jpg",
    },
    Entry {
        title: "Cultural Arts Exhibition",
        description: "Explore diverse cultural expressions through art, music, dance, and traditional crafts.",
        date: date(2025, 9, 10),
        time: time(10, 0),
        location: "Art Museum, Chicago",
        category: "Cultural",
        price: 25.0,
        max_attendees: 200,
        image_url: "../assets/images/art.jpg",
    },
    Entry {
        title: "Family Fun Fair",
        description: "A delightful family event with games, rides, food stalls, and entertainment for all ages.",
        date: date(2025, 10, 5),
        time: time(12, 0),
        location: "City Fairgrounds, Los Angeles",
        category: "Family",
        price: 20.0,
        max_attendees: 1000,
        image_url: "../assets/images/fun fair.jpg",
    },
    Entry {
        title: "Corporate Leadership Summit",
        description: "Professional development event focused on leadership skills and business strategy.",
        date: date(2025, 11, 12),
        time: time(8, 30),
        location: "Business Center, Houston",
        category: "Corporate",
        price: 200.0,
        max_attendees: 150,
        image_url: "../assets/images/corporate.jpg",
    },
];

pub fn sample_catalog() -> Vec<NewEvent> {
    CATALOG
        .iter()
        .map(|e| NewEvent {
            title: e.title.to_string(),
            description: e.description.to_string(),
            date: e.date,
            time: e.time,
            location: e.location.to_string(),
            category: e.category.to_string(),
            price: e.price,
            max_attendees: e.max_attendees,
            image_url: Some(e.image_url.to_string()),
        })
        .collect()
}
