use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    controller::{
        render::{escape, render_grid, GridContainer},
        timings::{TimingList, TimingSlot},
        SeatGridController,
    },
    models::{default_layout, SeatId, Show},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/movie/{movie_id}/seats/", get(seat_selection))
}

#[derive(Debug, Deserialize)]
pub struct SeatSelectionQuery {
    pub show_id: Option<String>,
}

fn timing_slot(show: &Show, active: bool) -> TimingSlot {
    let mut meta = show.show_date.format("%d %b").to_string();
    if !show.hall.is_empty() {
        meta = format!("{} · {}", meta, show.hall);
    }
    let slot = TimingSlot::show(show.id.to_string(), show.show_time.format("%H:%M").to_string())
        .with_meta(meta);
    if active {
        slot.activated()
    } else {
        slot
    }
}

// Внутри <script> нельзя оставлять "</"
fn script_json(seats: &[String]) -> String {
    serde_json::to_string(seats)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

// GET /movie/{movie_id}/seats/?show_id=
// Без show_id выбирается первый предстоящий сеанс.
pub async fn seat_selection(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
    Query(query): Query<SeatSelectionQuery>,
) -> Response {
    let Some(movie) = state.store.movie(movie_id) else {
        warn!("seat_selection: movie {} not found", movie_id);
        return (StatusCode::NOT_FOUND, "Movie not found").into_response();
    };

    let upcoming = state.store.upcoming_shows(movie_id);
    let show_id = query
        .show_id
        .filter(|s| !s.trim().is_empty())
        .or_else(|| upcoming.first().map(|s| s.id.to_string()));

    let initial_booked = show_id
        .as_deref()
        .and_then(|id| id.trim().parse::<i64>().ok())
        .and_then(|id| state.store.booked_seats(id))
        .unwrap_or_default();

    let slots = if upcoming.is_empty() {
        vec![TimingSlot::no_shows("No shows available")]
    } else {
        upcoming
            .iter()
            .map(|s| timing_slot(s, show_id.as_deref() == Some(s.id.to_string().as_str())))
            .collect()
    };
    let timings = TimingList::new(&state.config.grid.timings_id, slots);

    let occupied: Vec<SeatId> = initial_booked.iter().map(|s| SeatId::from(s.as_str())).collect();
    let grid = SeatGridController::new(&default_layout(), &occupied);
    let mut container = GridContainer::new(&state.config.grid.container_id);
    container.replace(render_grid(&grid));

    debug!(
        "seat_selection movie={} show={:?} booked={}",
        movie_id,
        show_id,
        initial_booked.len()
    );

    let page = format!(
        concat!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title} - seats</title></head>\n",
            "<body>\n<h1>{title}</h1>\n{timings}\n{grid}\n",
            "<script>var initial_booked_seats = {booked};</script>\n",
            "</body></html>\n"
        ),
        title = escape(&movie.title),
        timings = timings.render(),
        grid = container.outer_html(),
        booked = script_json(&initial_booked),
    );

    Html(page).into_response()
}
