//! Axum handlers for page routes.
//!
//! Each handler loads what its page needs from [`SiteState`] and renders a
//! view. Listing loaders swallow content errors (logged, empty list);
//! detail loaders turn a missing record into 404 and a failed fetch into 502.

use axum::{
    Json,
    extract::{Path, Query as QueryParams, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::NaiveDate;
use maud::Markup;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use super::SiteState;
use super::views::{self, PeopleChips};
use crate::calendar::{CalendarFeed, CalendarView, MonthCursor};
use crate::content::{Event, NewsPost, Person, Project, Query};
use crate::listing::{
    self, Listing, ListingParams, PEOPLE_PAGE_SIZE, PROJECTS_PAGE_SIZE, PeopleFilter, ProjectFilter,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn page(markup: Markup) -> Response {
    Html(markup.into_string()).into_response()
}

fn not_found_page(state: &SiteState) -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found(&state.ctx()).into_string())).into_response()
}

/// List query; a failed fetch renders as an empty list.
async fn load_list<T: DeserializeOwned>(state: &SiteState, query: Query) -> Vec<T> {
    state.content.fetch_list(&query).await.unwrap_or_else(|e| {
        warn!(query = query.name(), error = %e, "listing degraded to empty");
        Vec::new()
    })
}

/// Single record, or the error page to send instead.
async fn load_one<T: DeserializeOwned>(state: &SiteState, query: Query) -> Result<T, Response> {
    match state.content.fetch_one(&query).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => {
            debug!(query = query.name(), "record not found");
            Err(not_found_page(state))
        }
        Err(e) => {
            warn!(query = query.name(), error = %e, "detail fetch failed");
            Err((StatusCode::BAD_GATEWAY, Html(views::unavailable(&state.ctx()).into_string())).into_response())
        }
    }
}

// ── Pages ─────────────────────────────────────────────────────────────────────

/// GET /
pub(super) async fn home(State(state): State<SiteState>) -> Response {
    let (people, news) = tokio::join!(
        load_list::<Person>(&state, Query::AllPeople),
        load_list::<NewsPost>(&state, Query::AllNews),
    );
    page(views::home(&state.ctx(), &people, &news))
}

/// GET /people
pub(super) async fn people(
    State(state): State<SiteState>,
    QueryParams(params): QueryParams<ListingParams>,
) -> Response {
    let people: Vec<Person> = load_list(&state, Query::AllPeople).await;
    let listing = Listing::<PeopleFilter>::from_params(&params, PEOPLE_PAGE_SIZE);
    let view = listing.view(&people);
    let categories = listing::available_categories(&people);
    let tags = listing::available_tags(&people);
    page(views::people_index(
        &state.ctx(),
        &listing,
        &view,
        PeopleChips { categories: &categories, tags: &tags },
        state.content.is_configured(),
    ))
}

/// GET /people/{slug}
pub(super) async fn person(State(state): State<SiteState>, Path(slug): Path<String>) -> Response {
    let person: Person = match load_one(&state, Query::PersonBySlug { slug }).await {
        Ok(person) => person,
        Err(response) => return response,
    };
    let projects: Vec<Project> =
        load_list(&state, Query::ProjectsByPerson { person_id: person.id.clone() }).await;
    page(views::person_detail(&state.ctx(), &person, &projects))
}

/// GET /projects
pub(super) async fn projects(
    State(state): State<SiteState>,
    QueryParams(params): QueryParams<ListingParams>,
) -> Response {
    let projects: Vec<Project> = load_list(&state, Query::AllProjects).await;
    let listing = Listing::<ProjectFilter>::from_params(&params, PROJECTS_PAGE_SIZE);
    let view = listing.view(&projects);
    let categories = listing::available_project_categories(&projects);
    page(views::projects_index(
        &state.ctx(),
        &listing,
        &view,
        &categories,
        state.content.is_configured(),
    ))
}

/// GET /projects/{slug}
pub(super) async fn project(State(state): State<SiteState>, Path(slug): Path<String>) -> Response {
    match load_one::<Project>(&state, Query::ProjectBySlug { slug }).await {
        Ok(project) => page(views::project_detail(&state.ctx(), &project)),
        Err(response) => response,
    }
}

/// GET /news
pub(super) async fn news(State(state): State<SiteState>) -> Response {
    let posts: Vec<NewsPost> = load_list(&state, Query::AllNews).await;
    page(views::news_index(&state.ctx(), &posts))
}

/// GET /news/{slug}
pub(super) async fn news_post(State(state): State<SiteState>, Path(slug): Path<String>) -> Response {
    match load_one::<NewsPost>(&state, Query::NewsBySlug { slug }).await {
        Ok(post) => page(views::news_detail(&state.ctx(), &post)),
        Err(response) => response,
    }
}

/// GET /events
pub(super) async fn events(
    State(state): State<SiteState>,
    QueryParams(params): QueryParams<CalendarParams>,
) -> Response {
    let view = params.view(&state);
    let (upcoming, past, feed) = tokio::join!(
        load_list::<Event>(&state, Query::UpcomingEvents),
        load_list::<Event>(&state, Query::PastEvents),
        state.calendar.feed(view.cursor()),
    );
    let widget = calendar_markup(&state, &view, &feed);
    page(views::events_index(&state.ctx(), &upcoming, &past, widget))
}

/// GET /events/{slug}
pub(super) async fn event(State(state): State<SiteState>, Path(slug): Path<String>) -> Response {
    match load_one::<Event>(&state, Query::EventBySlug { slug }).await {
        Ok(event) => page(views::event_detail(&state.ctx(), &event)),
        Err(response) => response,
    }
}

/// GET /events/calendar: the widget alone, for month navigation without
/// reloading the event lists. 204 when no calendar is configured.
pub(super) async fn calendar_fragment(
    State(state): State<SiteState>,
    QueryParams(params): QueryParams<CalendarParams>,
) -> Response {
    let view = params.view(&state);
    let feed = state.calendar.feed(view.cursor()).await;
    match calendar_markup(&state, &view, &feed) {
        Some(widget) => page(widget),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// GET /contact
pub(super) async fn contact(State(state): State<SiteState>) -> Response {
    page(views::contact(&state.ctx()))
}

/// Fallback for unknown paths.
pub(super) async fn fallback(State(state): State<SiteState>) -> Response {
    not_found_page(&state)
}

/// GET /api/health
pub(super) async fn health(State(state): State<SiteState>) -> Response {
    Json(json!({
        "status": "ok",
        "site": &*state.site_name,
        "content_configured": state.content.is_configured(),
        "calendar_configured": state.calendar.is_configured(),
    }))
    .into_response()
}

// ── Calendar ──────────────────────────────────────────────────────────────────

/// `?year=&month=&date=` on the events page. `month` is 1-based. Values
/// that do not parse fall back to the current month with nothing selected.
#[derive(Debug, Default, Deserialize)]
pub(super) struct CalendarParams {
    year: Option<String>,
    month: Option<String>,
    date: Option<String>,
}

impl CalendarParams {
    fn cursor(&self) -> Option<MonthCursor> {
        let year = self.year.as_deref()?.trim().parse::<i32>().ok()?;
        let month = self.month.as_deref()?.trim().parse::<u32>().ok()?;
        MonthCursor::new(year, month.checked_sub(1)?)
    }

    fn view(&self, state: &SiteState) -> CalendarView {
        let zone = state.calendar.zone();
        let date = self
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());
        let cursor = self
            .cursor()
            .or_else(|| date.map(MonthCursor::from_date))
            .unwrap_or_else(|| MonthCursor::from_date(zone.today()));

        let mut view = CalendarView::new(cursor, zone.today());
        if let Some(date) = date {
            view.select(&date.format("%Y-%m-%d").to_string());
        }
        view
    }
}

fn calendar_markup(state: &SiteState, view: &CalendarView, feed: &CalendarFeed) -> Option<Markup> {
    if matches!(feed, CalendarFeed::Disabled) {
        return None;
    }
    let zone = state.calendar.zone();
    let by_date = zone.group(feed.events().iter().cloned());
    Some(views::calendar_widget(view, &by_date, feed, zone))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(year: &str, month: &str, date: Option<&str>) -> CalendarParams {
        CalendarParams {
            year: Some(year.into()),
            month: Some(month.into()),
            date: date.map(String::from),
        }
    }

    #[test]
    fn month_is_one_based() {
        assert_eq!(params("2024", "12", None).cursor(), Some(MonthCursor { year: 2024, month0: 11 }));
        assert_eq!(params("2024", "0", None).cursor(), None);
        assert_eq!(params("2024", "13", None).cursor(), None);
        assert_eq!(params("soon", "2", None).cursor(), None);
    }

    #[test]
    fn date_selects_within_month() {
        let state = SiteState::unconfigured("CDLS");
        let view = params("2024", "2", Some("2024-02-14")).view(&state);
        assert_eq!(view.selected(), Some("2024-02-14"));

        let outside = params("2024", "2", Some("2024-03-01")).view(&state);
        assert_eq!(outside.selected(), None);
    }

    #[test]
    fn date_alone_picks_its_month() {
        let state = SiteState::unconfigured("CDLS");
        let view = CalendarParams { date: Some("2023-07-04".into()), ..Default::default() }.view(&state);
        assert_eq!(view.cursor(), MonthCursor { year: 2023, month0: 6 });
        assert_eq!(view.selected(), Some("2023-07-04"));
    }
}
