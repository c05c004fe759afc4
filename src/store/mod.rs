use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

use crate::error::StoreError;
use crate::models::{show::split_seat_list, Booking, Movie, Show};

/// Содержимое файла с фильмами, сеансами и бронированиями.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowsSeed {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub shows: Vec<Show>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Default)]
pub struct ShowStore {
    data: Arc<ShowsSeed>,
}

impl ShowStore {
    pub fn new(seed: ShowsSeed) -> Self {
        Self { data: Arc::new(seed) }
    }

    pub async fn from_file(path: &str) -> Result<Self, StoreError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.to_string(),
                source,
            })?;
        let seed: ShowsSeed = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.to_string(),
            source,
        })?;

        info!(
            "Loaded {} movies, {} shows, {} bookings from {}",
            seed.movies.len(),
            seed.shows.len(),
            seed.bookings.len(),
            path
        );
        Ok(Self::new(seed))
    }

    pub fn movie(&self, movie_id: i64) -> Option<&Movie> {
        self.data.movies.iter().find(|m| m.id == movie_id)
    }

    pub fn show(&self, show_id: i64) -> Option<&Show> {
        self.data.shows.iter().find(|s| s.id == show_id)
    }

    /// Активные сеансы фильма по дате и времени.
    pub fn upcoming_shows(&self, movie_id: i64) -> Vec<&Show> {
        let mut shows: Vec<&Show> = self
            .data
            .shows
            .iter()
            .filter(|s| s.movie_id == movie_id && s.is_active)
            .collect();
        shows.sort_by_key(|s| (s.show_date, s.show_time));
        shows
    }

    /// Занятые места сеанса или `None`, если сеанс не найден.
    pub fn booked_seats(&self, show_id: i64) -> Option<Vec<String>> {
        let show = self.show(show_id)?;
        Some(booked_for(show, &self.data.bookings))
    }
}

/// Поле `booked_seats` сеанса, если оно не пустое (порядок сохраняется);
/// иначе отсортированное объединение мест всех бронирований сеанса без повторов.
pub fn booked_for(show: &Show, bookings: &[Booking]) -> Vec<String> {
    if !show.booked_seats.trim().is_empty() {
        return split_seat_list(&show.booked_seats);
    }

    bookings
        .iter()
        .filter(|b| b.show_id == show.id)
        .flat_map(|b| split_seat_list(&b.seats))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
