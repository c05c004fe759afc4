use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::debug;

use crate::{services::booked_seats::BookedSeatsResponse, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/show/{show_id}/booked_seats/", get(show_booked_seats))
}

// GET /api/show/{show_id}/booked_seats/
// Неизвестный или нечисловой сеанс - пустой список, а не ошибка.
pub async fn show_booked_seats(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<String>,
) -> Json<BookedSeatsResponse> {
    let booked = show_id
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| state.store.booked_seats(id))
        .unwrap_or_default();

    debug!("show_booked_seats show_id={} booked={}", show_id, booked.len());
    Json(BookedSeatsResponse { booked })
}
