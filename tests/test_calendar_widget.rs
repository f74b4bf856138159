//! Events page calendar against a stub calendar API.

use std::collections::HashMap;

use axum::body::{Body, to_bytes};
use axum::extract::Query;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

use cdls_site::calendar::google::GoogleCalendarClient;
use cdls_site::calendar::{CalendarFeed, CalendarSource, MonthCursor, Zone};
use cdls_site::content::ContentClient;
use cdls_site::site::{SiteState, build_router};

#[derive(Clone)]
enum Stub {
    /// Items for February 2024; every other month is empty.
    February(Vec<Value>),
    Denied,
}

fn timed(id: &str, summary: &str, start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "summary": summary,
        "start": { "dateTime": start },
        "end": { "dateTime": end },
        "location": "La Kretz Hall"
    })
}

fn february() -> Vec<Value> {
    vec![
        timed("a", "Board Meeting", "2024-02-05T18:00:00Z", "2024-02-05T19:30:00Z"),
        timed("b", "Fellows Lunch", "2024-02-14T12:00:00Z", "2024-02-14T13:00:00Z"),
        timed("c", "Seminar", "2024-02-14T15:00:00Z", "2024-02-14T16:00:00Z"),
        timed("d", "Mixer", "2024-02-14T18:00:00Z", "2024-02-14T20:00:00Z"),
        json!({ "id": "e", "summary": "Retreat", "start": { "date": "2024-02-20" }, "end": { "date": "2024-02-21" } }),
    ]
}

async fn stub_calendar(stub: Stub) -> String {
    let app = Router::new().route(
        "/calendar/v3/calendars/{id}/events",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let stub = stub.clone();
            async move {
                match stub {
                    Stub::Denied => (
                        StatusCode::FORBIDDEN,
                        Json(json!({ "error": { "code": 403, "message": "API key not valid" } })),
                    ),
                    Stub::February(items) => {
                        let in_february = params
                            .get("timeMin")
                            .is_some_and(|t| t.starts_with("2024-02-01"));
                        let items = if in_february { items } else { Vec::new() };
                        (StatusCode::OK, Json(json!({ "kind": "calendar#events", "items": items })))
                    }
                }
            }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}/calendar/v3/")
}

async fn calendar_source(stub: Stub) -> CalendarSource {
    let base = stub_calendar(stub).await;
    let client = GoogleCalendarClient::new(
        "test-key".into(),
        "team@group.calendar.google.com".into(),
        100,
        5,
        Zone::from_offset_minutes(Some(0)),
    )
    .unwrap()
    .with_api_base(base);
    CalendarSource::with_client(client)
}

async fn get_page(calendar: CalendarSource, uri: &str) -> (StatusCode, String) {
    let state = SiteState::new("CDLS", ContentClient::unconfigured(), calendar);
    let response = build_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn feed_loads_the_requested_month() {
    let source = calendar_source(Stub::February(february())).await;
    let feed = source.feed(MonthCursor { year: 2024, month0: 1 }).await;
    assert_eq!(feed.events().len(), 5);

    let march = source.feed(MonthCursor { year: 2024, month0: 2 }).await;
    assert_eq!(march, CalendarFeed::Loaded(Vec::new()));
}

#[tokio::test]
async fn denied_request_is_failed_not_empty() {
    let source = calendar_source(Stub::Denied).await;
    match source.feed(MonthCursor { year: 2024, month0: 1 }).await {
        CalendarFeed::Failed(message) => assert!(message.contains("API key not valid"), "{message}"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn events_page_renders_month_grid() {
    let source = calendar_source(Stub::February(february())).await;
    let (status, body) = get_page(source, "/events?year=2024&month=2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"id="calendar""#));
    assert!(body.contains("February 2024"));
    assert!(body.contains("Board Meeting"));
    // Three events on the 14th: two titles and an overflow count.
    assert!(body.contains("Fellows Lunch"));
    assert!(body.contains("Seminar"));
    assert!(!body.contains("Mixer"));
    assert!(body.contains("+1 more"));
    assert!(body.contains("Retreat"));
    assert!(body.contains(r#"href="/events?year=2024&amp;month=1#calendar""#));
    assert!(body.contains(r#"href="/events?year=2024&amp;month=3#calendar""#));
}

#[tokio::test]
async fn december_next_link_points_to_january() {
    let source = calendar_source(Stub::February(Vec::new())).await;
    let (_, body) = get_page(source, "/events?year=2024&month=12").await;
    assert!(body.contains("December 2024"));
    assert!(body.contains(r#"href="/events?year=2025&amp;month=1#calendar""#));
    assert!(body.contains(r#"href="/events?year=2024&amp;month=11#calendar""#));
}

#[tokio::test]
async fn selected_day_lists_its_events() {
    let source = calendar_source(Stub::February(february())).await;
    let (_, body) = get_page(source, "/events?year=2024&month=2&date=2024-02-14").await;
    assert!(body.contains("Wednesday, February 14"));
    assert!(body.contains("Mixer"));
    assert!(body.contains("6:00 PM – 8:00 PM"));
    // Clicking the selected day again clears the selection.
    assert!(body.contains(r#"href="/events?year=2024&amp;month=2#calendar""#));
}

#[tokio::test]
async fn selected_empty_day_says_so() {
    let source = calendar_source(Stub::February(february())).await;
    let (_, body) = get_page(source, "/events?year=2024&month=2&date=2024-02-03").await;
    assert!(body.contains("No events this day."));
}

#[tokio::test]
async fn empty_month_and_failure_read_differently() {
    let empty = calendar_source(Stub::February(february())).await;
    let (_, body) = get_page(empty, "/events/calendar?year=2025&month=1").await;
    assert!(body.contains("January 2025"));
    assert!(body.contains("No events this month."));
    assert!(!body.contains("<html"));

    let denied = calendar_source(Stub::Denied).await;
    let (status, body) = get_page(denied, "/events?year=2024&month=2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Events could not be loaded for this month."));
    assert!(!body.contains("No events this month."));
}

#[tokio::test]
async fn health_reports_calendar() {
    let source = calendar_source(Stub::Denied).await;
    let (_, body) = get_page(source, "/api/health").await;
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["calendar_configured"], true);
    assert_eq!(health["content_configured"], false);
}
