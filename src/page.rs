//! Экземпляр страницы выбора мест.
//!
//! Страница создаёт [`SeatPage`] один раз при загрузке и держит его до ухода
//! со страницы. Остальным скриптам страницы он отдаёт четыре операции:
//! выбранные места, активный сеанс, сверку занятых мест и их загрузку
//! с сервера.

use serde_json::Value;
use std::sync::Arc;
use tokio::{runtime::Handle, sync::Mutex, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::{
    config::GridConfig,
    controller::{
        render::{render_grid, GridContainer},
        timings::{ActiveShow, TimingClick, TimingList, TimingSlot},
        SeatGridController,
    },
    error::SeatError,
    models::{default_layout, SeatId, SeatLayoutEntry, SeatState},
    services::booked_seats::BookedSeatsClient,
};

/// Всё, что скрипт находит на странице в момент загрузки.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub layout: Vec<SeatLayoutEntry>,
    pub grid_container: Option<GridContainer>,
    pub timings: Option<TimingList>,
    /// Список, подставленный шаблоном (`initial_booked_seats`).
    pub initial_booked_seats: Option<Value>,
    /// Глобальный массив страницы (`OCCUPIED_SEATS`).
    pub occupied_seats: Option<Value>,
}

impl PageContext {
    /// Страница с обоими контейнерами и пустым списком сеансов.
    pub fn new(config: &GridConfig) -> Self {
        Self {
            layout: default_layout(),
            grid_container: Some(GridContainer::new(&config.container_id)),
            timings: Some(TimingList::new(&config.timings_id, Vec::new())),
            initial_booked_seats: None,
            occupied_seats: None,
        }
    }

    pub fn with_layout(mut self, layout: Vec<SeatLayoutEntry>) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_timing_slots(mut self, slots: Vec<TimingSlot>) -> Self {
        let id = self
            .timings
            .as_ref()
            .map(|t| t.id().to_string())
            .unwrap_or_else(|| GridConfig::default().timings_id);
        self.timings = Some(TimingList::new(id, slots));
        self
    }

    pub fn with_initial_booked(mut self, value: Value) -> Self {
        self.initial_booked_seats = Some(value);
        self
    }

    pub fn with_occupied_seats(mut self, value: Value) -> Self {
        self.occupied_seats = Some(value);
        self
    }

    pub fn without_grid(mut self) -> Self {
        self.grid_container = None;
        self
    }

    pub fn without_timings(mut self) -> Self {
        self.timings = None;
        self
    }
}

/// Разбирает подставленный список мест. Не-массив считается отсутствующим,
/// не-строковые элементы пропускаются.
pub fn injected_seat_list(value: Option<&Value>) -> Option<Vec<SeatId>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(SeatId::from)
            .collect(),
    )
}

#[derive(Debug)]
struct PageState {
    grid: SeatGridController,
    container: Option<GridContainer>,
    timings: Option<TimingList>,
    // Обработчик кликов вешается только на найденный контейнер
    seat_handler: bool,
    // Номер последнего запроса занятых мест; ответы на более старые отбрасываются
    latest_request: u64,
}

impl PageState {
    fn project(&mut self) {
        if let Some(container) = self.container.as_mut() {
            container.replace(render_grid(&self.grid));
        }
    }

    fn apply_booked<S: AsRef<str>>(&mut self, booked: &[S]) {
        self.grid.mark_booked_seats(booked);
        self.project();
    }
}

#[derive(Debug, Clone)]
pub struct SeatPage {
    state: Arc<Mutex<PageState>>,
    client: BookedSeatsClient,
}

impl SeatPage {
    /// Строит сетку, подключает обработчики и применяет начальную занятость:
    /// список шаблона, иначе места активного сеанса с сервера, иначе
    /// глобальный массив страницы.
    ///
    /// Если нужен запрос к серверу, он запускается в фоне на текущем
    /// tokio runtime, и его `JoinHandle` возвращается вторым значением.
    /// Вне runtime запрос не выполняется, это только логируется.
    pub fn init(ctx: PageContext, client: BookedSeatsClient) -> (Self, Option<JoinHandle<()>>) {
        let template = injected_seat_list(ctx.initial_booked_seats.as_ref()).unwrap_or_default();
        let global = injected_seat_list(ctx.occupied_seats.as_ref()).unwrap_or_default();
        let render_occupied = if template.is_empty() { &global } else { &template };

        let grid = match &ctx.grid_container {
            Some(_) => SeatGridController::new(&ctx.layout, render_occupied),
            None => {
                warn!("Seating grid container not found, grid not built");
                SeatGridController::empty()
            }
        };

        let mut state = PageState {
            seat_handler: ctx.grid_container.is_some(),
            grid,
            container: ctx.grid_container,
            timings: ctx.timings,
            latest_request: 0,
        };
        state.project();

        let initial_show = state
            .timings
            .as_ref()
            .and_then(|t| t.active_show_id())
            .map(str::to_string);

        let mut initial_fetch = None;
        if !template.is_empty() {
            info!("Applying {} booked seats from page template", template.len());
            state.apply_booked(&template);
        } else if initial_show.is_none() && !global.is_empty() {
            info!("Applying {} occupied seats from page globals", global.len());
            state.apply_booked(&global);
        } else if let Some(show_id) = initial_show {
            state.latest_request += 1;
            initial_fetch = Some((show_id, state.latest_request));
        }

        let page = Self {
            state: Arc::new(Mutex::new(state)),
            client,
        };

        let handle = initial_fetch.and_then(|(show_id, request)| {
            info!("Fetching booked seats for initially active show {}", show_id);
            page.spawn_fetch(show_id, request)
        });

        (page, handle)
    }

    // Номер запроса выдаётся при отправке, под блокировкой
    fn spawn_fetch(&self, show_id: String, request: u64) -> Option<JoinHandle<()>> {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!("No tokio runtime, booked seats for show {} not fetched: {}", show_id, e);
                return None;
            }
        };

        let page = self.clone();
        Some(runtime.spawn(async move {
            page.fetch_and_apply(&show_id, request).await;
        }))
    }

    /// Делегированный обработчик кликов по сетке. `target` - идентификатор
    /// места, по которому кликнули. Возвращает `true`, если выбор изменился.
    pub async fn click_seat(&self, target: &str) -> bool {
        let mut state = self.state.lock().await;
        if !state.seat_handler {
            return false;
        }
        match state.grid.toggle(target.trim()) {
            Some(selected) => {
                debug!("Seat {} selected={}", target, selected);
                state.project();
                true
            }
            None => false,
        }
    }

    /// Клик по слоту сеанса. Если у слота есть сеанс, в фоне запускается
    /// обновление занятых мест и возвращается его `JoinHandle`.
    pub async fn click_timing(&self, index: usize) -> Option<JoinHandle<()>> {
        let (show_id, request) = {
            let mut state = self.state.lock().await;
            match state.timings.as_mut()?.click(index) {
                TimingClick::Activated {
                    show_id: Some(show_id),
                } => {
                    state.latest_request += 1;
                    (show_id, state.latest_request)
                }
                _ => return None,
            }
        };

        self.spawn_fetch(show_id, request)
    }

    pub async fn get_selected_seats(&self) -> Vec<SeatId> {
        self.state.lock().await.grid.selected_seats()
    }

    pub async fn get_active_show(&self) -> Option<ActiveShow> {
        self.state.lock().await.timings.as_ref()?.active_show()
    }

    /// Сверяет все места со списком занятых. Прямой вызов отменяет
    /// результат ещё не завершившейся загрузки.
    pub async fn mark_booked_seats<S: AsRef<str>>(&self, booked: &[S]) {
        let mut state = self.state.lock().await;
        state.latest_request += 1;
        state.apply_booked(booked);
    }

    /// Загружает занятые места сеанса и применяет их.
    ///
    /// Ошибки только логируются, состояние при этом не меняется. Ответ
    /// применяется, только если после него не было более нового запроса
    /// или прямой сверки.
    pub async fn fetch_and_mark_booked_seats(&self, show_id: &str) {
        if show_id.is_empty() {
            return;
        }

        let request = {
            let mut state = self.state.lock().await;
            state.latest_request += 1;
            state.latest_request
        };
        self.fetch_and_apply(show_id, request).await;
    }

    async fn fetch_and_apply(&self, show_id: &str, request: u64) {
        // Блокировка не удерживается во время запроса
        let booked = match self.client.fetch_booked_seats(show_id).await {
            Ok(booked) => booked,
            Err(SeatError::Status(status)) => {
                warn!("Booked seats for show {} not loaded: status {}", show_id, status);
                return;
            }
            Err(e) => {
                error!("fetchBookedSeats error for show {}: {}", show_id, e);
                return;
            }
        };

        let mut state = self.state.lock().await;
        if state.latest_request != request {
            debug!(
                "Discarding stale booked seats for show {} (request {}, latest {})",
                show_id, request, state.latest_request
            );
            return;
        }
        state.apply_booked(&booked);
    }

    pub async fn seat_state(&self, id: &str) -> Option<SeatState> {
        self.state.lock().await.grid.state(id)
    }

    pub async fn occupied_seats(&self) -> Vec<SeatId> {
        self.state.lock().await.grid.occupied_seats()
    }

    pub async fn timing_slots(&self) -> Vec<TimingSlot> {
        self.state
            .lock()
            .await
            .timings
            .as_ref()
            .map(|t| t.slots().to_vec())
            .unwrap_or_default()
    }

    /// Текущая разметка контейнера сетки, если он есть на странице.
    pub async fn grid_html(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .container
            .as_ref()
            .map(|c| c.html().to_string())
    }

    pub async fn grid_render_count(&self) -> u64 {
        self.state
            .lock()
            .await
            .container
            .as_ref()
            .map(GridContainer::render_count)
            .unwrap_or(0)
    }

    /// Уход со страницы: незавершённые загрузки больше не применяются,
    /// обработчики отключаются, контейнер очищается.
    pub async fn teardown(&self) {
        let mut state = self.state.lock().await;
        state.latest_request += 1;
        state.seat_handler = false;
        state.timings = None;
        state.grid = SeatGridController::empty();
        if let Some(container) = state.container.as_mut() {
            container.clear();
        }
        info!("Seat page torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn injected_list_requires_array() {
        assert_eq!(injected_seat_list(None), None);
        assert_eq!(injected_seat_list(Some(&json!("A1,A2"))), None);
        assert_eq!(injected_seat_list(Some(&json!({ "booked": ["A1"] }))), None);
        assert_eq!(
            injected_seat_list(Some(&json!(["A1", 7, null, "B2"]))),
            Some(vec![SeatId::from("A1"), SeatId::from("B2")])
        );
    }

    #[test]
    fn init_outside_runtime_skips_initial_fetch() {
        let ctx = PageContext::new(&GridConfig::default())
            .with_timing_slots(vec![TimingSlot::show("3", "18:00").activated()]);
        let client = BookedSeatsClient::new("http://127.0.0.1:9", reqwest::Client::new());

        let (page, fetch) = SeatPage::init(ctx, client);
        assert!(fetch.is_none());
        let state = page.state.try_lock().expect("unlocked");
        assert_eq!(state.grid.seat_ids().len(), 90);
        assert_eq!(state.latest_request, 1);
    }

    #[test]
    fn context_defaults_use_configured_ids() {
        let ctx = PageContext::new(&GridConfig::default());
        assert_eq!(ctx.grid_container.as_ref().map(|c| c.id()), Some("seating-grid"));
        assert_eq!(ctx.timings.as_ref().map(|t| t.id()), Some("timings-list"));
    }
}
