use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use seat_grid::{
    config::GridConfig,
    controller::timings::{ActiveShow, TimingSlot},
    models::{SeatId, SeatState},
    page::{PageContext, SeatPage},
    services::booked_seats::BookedSeatsClient,
};

fn client(server: &MockServer) -> BookedSeatsClient {
    BookedSeatsClient::new(&server.uri(), reqwest::Client::new())
}

fn context() -> PageContext {
    PageContext::new(&GridConfig::default())
}

fn ids(list: &[&str]) -> Vec<SeatId> {
    list.iter().map(|s| SeatId::from(*s)).collect()
}

async fn mount_booked(server: &MockServer, show_id: &str, booked: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/api/show/{}/booked_seats/", show_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "booked": booked })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn empty_page_renders_row_a_free() {
    let server = MockServer::start().await;
    let (page, fetch) = SeatPage::init(context(), client(&server));
    assert!(fetch.is_none());

    for i in 1..=9 {
        let id = format!("A{}", i);
        assert_eq!(page.seat_state(&id).await, Some(SeatState::default()), "{}", id);
    }
    assert!(page.occupied_seats().await.is_empty());
    assert!(page.get_selected_seats().await.is_empty());
    assert_eq!(page.get_active_show().await, None);

    let html = page.grid_html().await.expect("container");
    assert!(html.contains(r#"data-seat-id="A9""#));
}

#[tokio::test]
async fn template_list_wins_and_skips_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "booked": ["J9"] })))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context()
        .with_timing_slots(vec![TimingSlot::show("3", "18:00").activated()])
        .with_initial_booked(json!(["A1"]))
        .with_occupied_seats(json!(["B2"]));
    let (page, fetch) = SeatPage::init(ctx, client(&server));

    assert!(fetch.is_none());
    assert_eq!(page.occupied_seats().await, ids(&["A1"]));
    let html = page.grid_html().await.expect("container");
    assert!(html.contains(
        r#"class="seat seat-booked occupied" data-seat-id="A1" data-seat="A1" aria-label="A1" aria-pressed="false" data-available="false" aria-disabled="true" disabled"#
    ));
}

#[tokio::test]
async fn active_slot_fetches_when_template_is_empty() {
    let server = MockServer::start().await;
    mount_booked(&server, "3", &["C3", "C4"]).await;

    let ctx = context()
        .with_timing_slots(vec![TimingSlot::show("3", "18:00").activated()])
        .with_initial_booked(json!([]))
        .with_occupied_seats(json!(["B2"]));
    let (page, fetch) = SeatPage::init(ctx, client(&server));

    // до ответа сервера сетка отрисована по глобальному списку
    fetch.expect("initial fetch").await.expect("join");
    assert_eq!(page.occupied_seats().await, ids(&["C3", "C4"]));
}

#[tokio::test]
async fn global_list_is_used_without_active_show() {
    let server = MockServer::start().await;
    let ctx = context()
        .with_timing_slots(vec![TimingSlot::show("3", "18:00")])
        .with_initial_booked(json!("not an array"))
        .with_occupied_seats(json!(["B2", "E5"]));
    let (page, fetch) = SeatPage::init(ctx, client(&server));

    assert!(fetch.is_none());
    assert_eq!(page.occupied_seats().await, ids(&["B2", "E5"]));
}

#[tokio::test]
async fn malformed_globals_leave_all_seats_free() {
    let server = MockServer::start().await;
    let ctx = context()
        .with_initial_booked(json!({ "A1": true }))
        .with_occupied_seats(json!(42));
    let (page, _) = SeatPage::init(ctx, client(&server));
    assert!(page.occupied_seats().await.is_empty());
}

#[tokio::test]
async fn missing_container_is_a_no_op() {
    let server = MockServer::start().await;
    let ctx = context().without_grid().with_initial_booked(json!(["A1"]));
    let (page, _) = SeatPage::init(ctx, client(&server));

    assert_eq!(page.grid_html().await, None);
    assert!(!page.click_seat("A2").await);
    page.mark_booked_seats(&["A3"]).await;
    assert!(page.occupied_seats().await.is_empty());
    assert!(page.get_selected_seats().await.is_empty());
}

#[tokio::test]
async fn missing_timings_list_is_a_no_op() {
    let server = MockServer::start().await;
    let (page, _) = SeatPage::init(context().without_timings(), client(&server));
    assert!(page.click_timing(0).await.is_none());
    assert_eq!(page.get_active_show().await, None);
}

#[tokio::test]
async fn clicks_toggle_only_free_seats() {
    let server = MockServer::start().await;
    let ctx = context().with_initial_booked(json!(["A1"]));
    let (page, _) = SeatPage::init(ctx, client(&server));

    assert!(!page.click_seat("A1").await);
    assert_eq!(page.seat_state("A1").await, Some(SeatState::occupied()));

    assert!(page.click_seat("H2").await);
    assert!(page.click_seat("A5").await);
    assert!(page.click_seat("C1").await);
    assert!(page.click_seat("C1").await);
    assert!(!page.click_seat("not-a-seat").await);

    assert_eq!(page.get_selected_seats().await, ids(&["A5", "H2"]));
    let html = page.grid_html().await.expect("container");
    assert!(html.contains(r#"class="seat selected" data-seat-id="H2" data-seat="H2" aria-label="H2" aria-pressed="true""#));
}

#[tokio::test]
async fn reconciliation_releases_previous_bookings() {
    let server = MockServer::start().await;
    let (page, _) = SeatPage::init(context(), client(&server));

    page.mark_booked_seats(&["C3", "C4"]).await;
    page.mark_booked_seats(&["C4"]).await;

    assert_eq!(page.seat_state("C3").await, Some(SeatState::default()));
    assert_eq!(page.seat_state("C4").await, Some(SeatState::occupied()));
    let html = page.grid_html().await.expect("container");
    assert!(html.contains(r#"class="seat" data-seat-id="C3""#));
}

#[tokio::test]
async fn timing_click_switches_show_and_refreshes_seats() {
    let server = MockServer::start().await;
    mount_booked(&server, "1", &["A1"]).await;
    mount_booked(&server, "2", &["B1", "B2"]).await;

    let ctx = context().with_timing_slots(vec![
        TimingSlot::show("1", "10:00").with_meta("10:00 Hall 1").activated(),
        TimingSlot::show("2", "12:00"),
        TimingSlot::no_shows("No shows"),
    ]);
    let (page, fetch) = SeatPage::init(ctx, client(&server));
    fetch.expect("initial fetch").await.expect("join");
    assert_eq!(page.occupied_seats().await, ids(&["A1"]));

    page.click_timing(1).await.expect("fetch").await.expect("join");
    assert_eq!(page.occupied_seats().await, ids(&["B1", "B2"]));
    assert_eq!(
        page.get_active_show().await,
        Some(ActiveShow {
            show_id: "2".to_string(),
            show_text: "12:00".to_string()
        })
    );

    assert!(page.click_timing(2).await.is_none());
    let active: Vec<bool> = page.timing_slots().await.iter().map(|s| s.active).collect();
    assert_eq!(active, vec![false, true, false]);
}

#[tokio::test]
async fn stale_response_does_not_overwrite_newer_show() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/show/1/booked_seats/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "booked": ["A1"] }))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    mount_booked(&server, "2", &["B1"]).await;

    let ctx = context().with_timing_slots(vec![
        TimingSlot::show("1", "10:00"),
        TimingSlot::show("2", "12:00"),
    ]);
    let (page, _) = SeatPage::init(ctx, client(&server));

    let slow = page.click_timing(0).await.expect("fetch");
    let fast = page.click_timing(1).await.expect("fetch");
    fast.await.expect("join");

    // пока медленный запрос висит, клики продолжают работать
    assert!(page.click_seat("D4").await);

    slow.await.expect("join");
    assert_eq!(page.occupied_seats().await, ids(&["B1"]));
    assert_eq!(page.get_selected_seats().await, ids(&["D4"]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stale_response_loses_on_multi_thread_runtime() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/show/1/booked_seats/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "booked": ["A1"] }))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;
    mount_booked(&server, "2", &["B1"]).await;

    let ctx = context().with_timing_slots(vec![
        TimingSlot::show("1", "10:00"),
        TimingSlot::show("2", "12:00"),
    ]);
    let (page, _) = SeatPage::init(ctx, client(&server));

    for _ in 0..10 {
        let slow = page.click_timing(0).await.expect("fetch");
        let fast = page.click_timing(1).await.expect("fetch");
        fast.await.expect("join");
        slow.await.expect("join");
        assert_eq!(page.occupied_seats().await, ids(&["B1"]));
    }
}

#[tokio::test]
async fn initial_fetch_is_superseded_by_direct_mark() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "booked": ["A1"] }))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let ctx = context().with_timing_slots(vec![TimingSlot::show("1", "10:00").activated()]);
    let (page, fetch) = SeatPage::init(ctx, client(&server));

    // задача ещё не успела стартовать, но номер запроса уже выдан
    page.mark_booked_seats(&["G7"]).await;
    fetch.expect("initial fetch").await.expect("join");

    assert_eq!(page.occupied_seats().await, ids(&["G7"]));
}

#[tokio::test]
async fn direct_mark_supersedes_in_flight_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "booked": ["A1"] }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let ctx = context().with_timing_slots(vec![TimingSlot::show("1", "10:00")]);
    let (page, _) = SeatPage::init(ctx, client(&server));

    let pending = page.click_timing(0).await.expect("fetch");
    page.mark_booked_seats(&["F6"]).await;
    pending.await.expect("join");

    assert_eq!(page.occupied_seats().await, ids(&["F6"]));
}

#[tokio::test]
async fn failed_fetch_keeps_previous_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/show/9/booked_seats/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/show/10/booked_seats/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let (page, _) = SeatPage::init(context(), client(&server));
    page.mark_booked_seats(&["A1"]).await;
    let renders = page.grid_render_count().await;

    page.fetch_and_mark_booked_seats("9").await;
    page.fetch_and_mark_booked_seats("10").await;
    page.fetch_and_mark_booked_seats("").await;

    assert_eq!(page.occupied_seats().await, ids(&["A1"]));
    assert_eq!(page.grid_render_count().await, renders);
}

#[tokio::test]
async fn unreachable_server_is_logged_not_surfaced() {
    // порт 9 (discard) на localhost обычно закрыт
    let client = BookedSeatsClient::new("http://127.0.0.1:9", reqwest::Client::new());
    let (page, _) = SeatPage::init(context().with_occupied_seats(json!(["E1"])), client);

    page.fetch_and_mark_booked_seats("1").await;
    assert_eq!(page.occupied_seats().await, ids(&["E1"]));
}

#[tokio::test]
async fn teardown_drops_pending_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "booked": ["A1"] }))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let ctx = context().with_timing_slots(vec![TimingSlot::show("1", "10:00")]);
    let (page, _) = SeatPage::init(ctx, client(&server));

    let pending = page.click_timing(0).await.expect("fetch");
    page.teardown().await;
    let renders = page.grid_render_count().await;
    pending.await.expect("join");

    assert_eq!(page.grid_render_count().await, renders);
    assert!(page.occupied_seats().await.is_empty());
    assert_eq!(page.grid_html().await.as_deref(), Some(""));
    assert!(!page.click_seat("A2").await);
}
