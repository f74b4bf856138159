//! Router-level tests against in-memory snapshot content.

use std::path::Path;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

use cdls_site::calendar::{CalendarSource, CalendarView, MonthCursor, Zone};
use cdls_site::content::providers::sanity::SanityProvider;
use cdls_site::content::providers::snapshot::SnapshotProvider;
use cdls_site::content::{ContentClient, ContentSource, ImageUrlBuilder};
use cdls_site::site::{SiteState, build_router, views};

fn fixture() -> Value {
    json!({
        "people": [
            { "_id": "p-ada", "name": "Ada Lovelace", "slug": { "current": "ada-lovelace" },
              "position": "Professor", "academicUnit": "UCLA",
              "category": "faculty-fellows", "tags": ["staff"] },
            { "_id": "p-grace", "name": "Grace Hopper", "slug": { "current": "grace-hopper" },
              "category": "faculty-fellows", "tags": ["leadership"] },
            { "_id": "p-kat", "name": "Katherine Johnson", "slug": { "current": "katherine-johnson" },
              "category": "fellows", "tags": ["staff"] }
        ],
        "projects": [
            { "_id": "j-tide", "title": "Tide Pools", "slug": { "current": "tide-pools" },
              "year": 2023, "status": "ongoing", "projectCategory": "core-programs",
              "teamMembers": [{ "_type": "reference", "_ref": "p-ada" }],
              "resources": [{ "title": "Field guide", "fileUrl": "https://example.org/guide.pdf" }] }
        ],
        "news": [
            { "_id": "n1", "title": "Cohort Announced", "slug": { "current": "cohort" },
              "publishedAt": "2024-01-05T18:00:00Z" }
        ],
        "events": [
            { "_id": "e-future", "title": "Future Workshop", "slug": { "current": "future-workshop" },
              "startDateTime": "2099-03-01T17:00:00Z", "endDateTime": "2099-03-01T19:30:00Z",
              "locations": [{ "name": "La Kretz Hall", "address": "Los Angeles" }],
              "registrationUrl": "https://example.org/register" },
            { "_id": "e-past", "title": "Past Lecture", "slug": { "current": "past-lecture" },
              "startDateTime": "2001-05-01T17:00:00Z", "eventType": "lecture-series" }
        ]
    })
}

fn snapshot_state(value: Value) -> SiteState {
    let snapshot = SnapshotProvider::from_value(value).unwrap();
    SiteState::new(
        "CDLS",
        ContentClient::new(ContentSource::Snapshot(snapshot), None),
        CalendarSource::disabled(Zone::from_offset_minutes(Some(0))),
    )
}

async fn get_page(state: SiteState, uri: &str) -> (StatusCode, String) {
    let response = build_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

// ── End-to-end scenarios ──────────────────────────────────────────────────────

#[tokio::test]
async fn unconfigured_people_page_renders_empty_state() {
    let (status, body) = get_page(SiteState::unconfigured("CDLS"), "/people").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>People | CDLS</title>"));
    assert!(body.contains("People will appear here once the content store is connected."));
    assert!(!body.contains("person-card"));
}

#[tokio::test]
async fn missing_person_is_not_found() {
    let (status, body) = get_page(snapshot_state(fixture()), "/people/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<title>Not Found | CDLS</title>"));
}

#[tokio::test]
async fn category_and_tag_filters_combine() {
    let (status, body) =
        get_page(snapshot_state(fixture()), "/people?category=faculty-fellows&tag=staff").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ada Lovelace"));
    assert!(!body.contains("Grace Hopper"));
    assert!(!body.contains("Katherine Johnson"));
    assert!(body.contains("Showing 1 of 1 people"));
}

#[test]
fn december_navigates_to_january_of_next_year() {
    let today = chrono::NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
    let mut view = CalendarView::new(MonthCursor { year: 2024, month0: 11 }, today);
    view.next_month();
    assert_eq!(view.cursor(), MonthCursor { year: 2025, month0: 0 });
    assert_eq!(view.cursor().label(), "January 2025");
    assert_eq!(views::calendar_href(&view), "/events?year=2025&month=1#calendar");
}

// ── Pages ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn home_uses_site_title() {
    let (status, body) = get_page(snapshot_state(fixture()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>CDLS | Center for Developing Leadership in Science</title>"));
    assert!(body.contains("Cohort Announced"));
    assert!(body.contains("Jan 5, 2024"));
}

#[tokio::test]
async fn search_matches_institution() {
    let (_, body) = get_page(snapshot_state(fixture()), "/people?q=ucla").await;
    assert!(body.contains("Ada Lovelace"));
    assert!(!body.contains("Grace Hopper"));
}

#[tokio::test]
async fn unmatched_filter_shows_no_match_message() {
    let (status, body) = get_page(snapshot_state(fixture()), "/people?category=pilot").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No people match these filters."));
}

#[tokio::test]
async fn people_paginate_with_load_more_link() {
    let people: Vec<Value> = (0..30)
        .map(|i| json!({ "_id": format!("p{i:02}"), "name": format!("Person {i:02}"),
                         "slug": { "current": format!("person-{i:02}") } }))
        .collect();
    let state = snapshot_state(json!({ "people": people }));

    let (_, first) = get_page(state.clone(), "/people").await;
    assert!(first.contains("Showing 24 of 30 people"));
    assert!(first.contains("Load more (6 remaining)"));
    assert!(first.contains(r#"href="/people?shown=48""#));

    let (_, all) = get_page(state, "/people?shown=48").await;
    assert!(all.contains("Showing 30 of 30 people"));
    assert!(!all.contains("Load more"));
}

#[tokio::test]
async fn person_page_lists_referencing_projects() {
    let (status, body) = get_page(snapshot_state(fixture()), "/people/ada-lovelace").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Ada Lovelace | CDLS</title>"));
    assert!(body.contains("Faculty Fellow"));
    assert!(body.contains("Tide Pools"));
    assert!(body.contains("2023 · Ongoing"));
}

#[tokio::test]
async fn project_page_shows_team_and_resources() {
    let (status, body) = get_page(snapshot_state(fixture()), "/projects/tide-pools").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/people/ada-lovelace""#));
    assert!(body.contains("Field guide"));
    assert!(body.contains("Core Programs"));
}

#[tokio::test]
async fn projects_filter_by_category() {
    let state = snapshot_state(fixture());
    let (_, all) = get_page(state.clone(), "/projects").await;
    assert!(all.contains("Tide Pools"));
    let (_, none) = get_page(state, "/projects?category=fellow-led").await;
    assert!(none.contains("No projects found in this category."));
}

#[tokio::test]
async fn events_split_upcoming_and_past() {
    let (status, body) = get_page(snapshot_state(fixture()), "/events").await;
    assert_eq!(status, StatusCode::OK);
    let upcoming = body.find("Future Workshop").unwrap();
    let past_heading = body.find("Past Events").unwrap();
    let past = body.find("Past Lecture").unwrap();
    assert!(upcoming < past_heading && past_heading < past);
    // No calendar configured: no widget.
    assert!(!body.contains(r#"id="calendar""#));
}

#[tokio::test]
async fn event_page_shows_when_and_where() {
    let (status, body) = get_page(snapshot_state(fixture()), "/events/future-workshop").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sunday, March 1, 2099 at 5:00 PM – 7:30 PM"));
    assert!(body.contains("La Kretz Hall (Los Angeles)"));
    assert!(body.contains("Register for this Event"));
    assert!(body.contains("Details coming soon."));
}

#[tokio::test]
async fn news_pages_render() {
    let state = snapshot_state(fixture());
    let (_, index) = get_page(state.clone(), "/news").await;
    assert!(index.contains("January 5, 2024"));
    let (status, detail) = get_page(state, "/news/cohort").await;
    assert_eq!(status, StatusCode::OK);
    assert!(detail.contains("Content coming soon."));
}

#[tokio::test]
async fn contact_is_static() {
    let (status, body) = get_page(SiteState::unconfigured("CDLS"), "/contact").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Contact Us"));
    assert!(body.contains("mailto:cdls@ucla.edu"));
}

#[tokio::test]
async fn health_reports_configuration() {
    let (status, body) = get_page(snapshot_state(fixture()), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["content_configured"], true);
    assert_eq!(health["calendar_configured"], false);
}

#[tokio::test]
async fn favicon_and_unknown_paths() {
    let (status, _) = get_page(SiteState::unconfigured("CDLS"), "/favicon.ico").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = get_page(SiteState::unconfigured("CDLS"), "/no/such/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Not Found"));
}

#[tokio::test]
async fn calendar_fragment_without_calendar_is_empty() {
    let (status, body) = get_page(SiteState::unconfigured("CDLS"), "/events/calendar?year=2024&month=2").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn image_urls_use_configured_project() {
    let mut value = fixture();
    value["people"][0]["image"] = json!({ "asset": { "_ref": "image-abc123-800x600-jpg" } });
    let snapshot = SnapshotProvider::from_value(value).unwrap();
    let state = SiteState::new(
        "CDLS",
        ContentClient::new(
            ContentSource::Snapshot(snapshot),
            Some(ImageUrlBuilder::new("proj1", "production")),
        ),
        CalendarSource::disabled(Zone::Local),
    );
    let (_, body) = get_page(state, "/people/ada-lovelace").await;
    assert!(body.contains("https://cdn.sanity.io/images/proj1/production/abc123-800x600.jpg"));
}

#[tokio::test]
async fn slugs_are_percent_encoded_in_links() {
    let state = snapshot_state(json!({
        "people": [
            { "_id": "p-odd", "name": "Odd Slug", "slug": { "current": "odd slug/2" } }
        ]
    }));
    let (_, body) = get_page(state.clone(), "/people").await;
    assert!(body.contains(r#"href="/people/odd%20slug%2F2""#), "{body}");

    let (status, body) = get_page(state, "/people/odd%20slug%2F2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Odd Slug"));
}

// ── Remote store ──────────────────────────────────────────────────────────────

/// Content store stub: serves `result` for every query, or 500 when `None`.
async fn stub_store(result: Option<Value>) -> url::Url {
    let app = Router::new().route(
        "/v2024-01-01/data/query/production",
        get(move || {
            let result = result.clone();
            async move {
                match result {
                    Some(result) => (StatusCode::OK, Json(json!({ "result": result, "ms": 1 }))),
                    None => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": { "description": "backend exploded" } })),
                    ),
                }
            }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    url::Url::parse(&format!("http://{addr}/v2024-01-01/data/query/production")).unwrap()
}

fn remote_state(endpoint: url::Url) -> SiteState {
    let provider = SanityProvider::new("proj1", "production", "2024-01-01", false, 5)
        .unwrap()
        .with_endpoint(endpoint);
    SiteState::new(
        "CDLS",
        ContentClient::new(ContentSource::Sanity(provider), None),
        CalendarSource::disabled(Zone::Local),
    )
}

#[tokio::test]
async fn remote_store_feeds_detail_page() {
    let endpoint = stub_store(Some(json!({
        "_id": "n1", "title": "From the Store", "slug": { "current": "from-store" }
    })))
    .await;
    let (status, body) = get_page(remote_state(endpoint), "/news/from-store").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("From the Store"));
}

#[tokio::test]
async fn store_failure_is_bad_gateway_on_detail_pages() {
    let endpoint = stub_store(None).await;
    let (status, body) = get_page(remote_state(endpoint), "/events/anything").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Temporarily Unavailable"));
}

#[tokio::test]
async fn store_failure_degrades_listing_pages() {
    let endpoint = stub_store(None).await;
    let (status, body) = get_page(remote_state(endpoint), "/news").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No news yet. Check back soon."));
}

#[tokio::test]
async fn deleted_team_member_does_not_break_project_page() {
    let endpoint = stub_store(Some(json!({
        "_id": "pr1", "title": "Tide Pools", "slug": { "current": "tide-pools" },
        "teamMembers": [
            { "_id": "p-ada", "name": "Ada Lovelace", "slug": { "current": "ada-lovelace" } },
            null
        ]
    })))
    .await;
    let (status, body) = get_page(remote_state(endpoint), "/projects/tide-pools").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Tide Pools"));
    assert!(body.contains("Ada Lovelace"));
}

#[tokio::test]
async fn partial_image_metadata_keeps_people_listing() {
    let endpoint = stub_store(Some(json!([
        { "_id": "p-ada", "name": "Ada Lovelace", "slug": { "current": "ada-lovelace" } },
        { "_id": "p-grace", "name": "Grace Hopper", "slug": { "current": "grace-hopper" },
          "image": { "asset": { "_ref": "image-abc123-800x600-jpg" },
                     "hotspot": { "x": 0.5, "y": 0.2 } } }
    ])))
    .await;
    let (status, body) = get_page(remote_state(endpoint), "/people").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ada Lovelace"));
    assert!(body.contains("Grace Hopper"));
}

// ── Sample content ────────────────────────────────────────────────────────────

#[tokio::test]
async fn sample_snapshot_renders_every_page() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("content/snapshot.sample.json");
    let snapshot = SnapshotProvider::load(&path).unwrap();
    let state = SiteState::new(
        "CDLS",
        ContentClient::new(ContentSource::Snapshot(snapshot), None),
        CalendarSource::disabled(Zone::from_offset_minutes(Some(-480))),
    );
    for uri in [
        "/",
        "/people",
        "/people/ada-okafor",
        "/people/luis-ramirez",
        "/projects",
        "/projects/wetland-futures",
        "/news",
        "/news/welcoming-2024-cohort",
        "/events",
        "/events/spring-lecture",
        "/events/grant-writing-workshop",
    ] {
        let (status, _) = get_page(state.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}
