use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub movie_id: i64,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    #[serde(default)]
    pub hall: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    // Места через запятую: "A1,A2,C5"
    #[serde(default)]
    pub booked_seats: String,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub show_id: i64,
    // Тоже через запятую, как в поле booked_seats
    pub seats: String,
}

/// Разбирает список мест через запятую, отбрасывая пустые элементы.
pub fn split_seat_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
