//! booked_seats.rs
//!
//! Клиент для `GET /api/show/{showId}/booked_seats/`.
//! Ответ сервера: `{ "booked": ["A1", "C4", ...] }`.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::{config::BookedSeatsConfig, error::SeatError};

/// Тело ответа со списком занятых мест. Отсутствующее или `null` поле
/// `booked` означает пустой список.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSeatsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub booked: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct BookedSeatsClient {
    /// Базовый URL сайта, без завершающего `/`.
    base_url: String,
    http_client: reqwest::Client,
}

impl BookedSeatsClient {
    pub fn new(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn from_config(config: &BookedSeatsConfig) -> Result<Self, SeatError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout()) // Таймаут для HTTP-запросов.
            .build()?;
        info!("Booked seats client configured for {}", config.base_url);
        Ok(Self::new(&config.base_url, http_client))
    }

    pub fn endpoint(&self, show_id: &str) -> String {
        format!("{}/api/show/{}/booked_seats/", self.base_url, show_id)
    }

    /// Запрашивает занятые места сеанса. Ошибки не повторяются.
    pub async fn fetch_booked_seats(&self, show_id: &str) -> Result<Vec<String>, SeatError> {
        let url = self.endpoint(show_id);
        debug!("Fetching booked seats: {}", url);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeatError::Status(status.as_u16()));
        }

        let body = response.json::<BookedSeatsResponse>().await?;
        debug!("Show {} has {} booked seats", show_id, body.booked.len());
        Ok(body.booked)
    }
}
