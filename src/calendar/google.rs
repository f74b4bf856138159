//! Google Calendar read client.
//!
//! One request per displayed month:
//! `GET {base}/calendars/{id}/events?key=&timeMin=&timeMax=&singleEvents=true&orderBy=startTime&maxResults=`.
//! Recurring events are expanded server-side (`singleEvents`), so the
//! response is already a flat, start-ordered list.

use std::time::Duration;

use chrono::SecondsFormat;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, error};

use super::{CalendarError, MonthCursor, RemoteEvent, Zone};
use crate::config::CalendarConfig;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Clone)]
pub struct GoogleCalendarClient {
    client: Client,
    api_base: String,
    api_key: String,
    calendar_id: String,
    max_results: u32,
    zone: Zone,
}

impl GoogleCalendarClient {
    pub fn new(
        api_key: String,
        calendar_id: String,
        max_results: u32,
        timeout_seconds: u64,
        zone: Zone,
    ) -> Result<Self, CalendarError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| CalendarError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key,
            calendar_id,
            max_results,
            zone,
        })
    }

    /// `None` unless both the API key and the calendar id are set.
    pub fn from_config(config: &CalendarConfig) -> Result<Option<Self>, CalendarError> {
        let (Some(api_key), Some(calendar_id)) = (&config.api_key, &config.calendar_id) else {
            debug!("calendar credentials not configured; widget disabled");
            return Ok(None);
        };
        let zone = Zone::from_offset_minutes(config.timezone_offset_minutes);
        Self::new(
            api_key.clone(),
            calendar_id.clone(),
            config.max_results,
            config.timeout_seconds,
            zone,
        )
        .map(Some)
    }

    /// Point at another API root (a local stub in tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Request URL for `cursor`'s month. The calendar id is a path segment
    /// and is percent-encoded as one.
    pub fn request_url(&self, cursor: MonthCursor) -> Result<Url, CalendarError> {
        let (time_min, time_max) = self
            .zone
            .month_window(cursor)
            .ok_or_else(|| CalendarError::Request(format!("month out of range: {}", cursor.label())))?;

        let mut url = Url::parse(&self.api_base)
            .map_err(|e| CalendarError::Request(format!("invalid calendar endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| CalendarError::Request("calendar endpoint cannot take a path".into()))?
            .extend(["calendars", self.calendar_id.as_str(), "events"]);
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("timeMin", &time_min.to_rfc3339_opts(SecondsFormat::Millis, true))
            .append_pair("timeMax", &time_max.to_rfc3339_opts(SecondsFormat::Millis, true))
            .append_pair("singleEvents", "true")
            .append_pair("orderBy", "startTime")
            .append_pair("maxResults", &self.max_results.to_string());
        Ok(url)
    }

    pub async fn events_for_month(&self, cursor: MonthCursor) -> Result<Vec<RemoteEvent>, CalendarError> {
        let url = self.request_url(cursor)?;
        debug!(month = %cursor.label(), "fetching calendar events");

        // reqwest errors carry the request URL, which holds the API key.
        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            error!(error = %e, "calendar request failed (transport)");
            CalendarError::Request(e.to_string())
        })?;
        let response = check_status(response).await?;

        let body: EventsResponse = response
            .json()
            .await
            .map_err(|e| CalendarError::Decode(format!("failed to parse events: {}", e.without_url())))?;
        debug!(month = %cursor.label(), count = body.items.len(), "calendar events received");
        Ok(body.items)
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    items: Vec<RemoteEvent>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CalendarError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());
    let body = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(ErrorEnvelope { error: ErrorBody { message: Some(message) } }) => message,
        _ => body,
    };
    error!(%status, %body, "calendar API returned HTTP error");
    Err(CalendarError::Status { status: status.as_u16(), body })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GoogleCalendarClient {
        GoogleCalendarClient::new(
            "k3y".into(),
            "team@group.calendar.google.com".into(),
            100,
            5,
            Zone::from_offset_minutes(Some(0)),
        )
        .unwrap()
    }

    #[test]
    fn url_carries_window_and_options() {
        let url = client().request_url(MonthCursor { year: 2024, month0: 1 }).unwrap();
        assert_eq!(url.host_str(), Some("www.googleapis.com"));
        assert_eq!(
            url.path(),
            "/calendar/v3/calendars/team@group.calendar.google.com/events"
        );
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("key"), Some("k3y"));
        assert_eq!(get("timeMin"), Some("2024-02-01T00:00:00.000Z"));
        assert_eq!(get("timeMax"), Some("2024-02-29T23:59:59.000Z"));
        assert_eq!(get("singleEvents"), Some("true"));
        assert_eq!(get("orderBy"), Some("startTime"));
        assert_eq!(get("maxResults"), Some("100"));
    }

    #[test]
    fn calendar_id_is_one_path_segment() {
        let c = GoogleCalendarClient::new("k".into(), "a/b c".into(), 10, 5, Zone::Local).unwrap();
        let url = c.request_url(MonthCursor { year: 2024, month0: 0 }).unwrap();
        assert!(url.path().ends_with("/calendars/a%2Fb%20c/events"), "{}", url.path());
    }

    #[test]
    fn needs_both_credentials() {
        let mut config = crate::config::Config::unconfigured().calendar;
        config.api_key = Some("k".into());
        assert!(GoogleCalendarClient::from_config(&config).unwrap().is_none());
        config.calendar_id = Some("id".into());
        assert!(GoogleCalendarClient::from_config(&config).unwrap().is_some());
    }

    #[test]
    fn events_response_tolerates_missing_items() {
        let body: EventsResponse = serde_json::from_str(r#"{"kind":"calendar#events"}"#).unwrap();
        assert!(body.items.is_empty());
        let body: EventsResponse = serde_json::from_str(
            r#"{"items":[{"id":"e1","summary":"Talk","start":{"dateTime":"2024-02-05T18:00:00-08:00"},"end":{"dateTime":"2024-02-05T19:00:00-08:00"}}]}"#,
        )
        .unwrap();
        assert_eq!(body.items[0].start.date_time.as_deref(), Some("2024-02-05T18:00:00-08:00"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_request_error() {
        let c = client().with_api_base("http://127.0.0.1:9");
        let err = c.events_for_month(MonthCursor { year: 2024, month0: 0 }).await.unwrap_err();
        assert!(matches!(err, CalendarError::Request(_)), "{err:?}");
    }

    #[tokio::test]
    async fn transport_error_does_not_reveal_api_key() {
        let c = GoogleCalendarClient::new(
            "SECRETKEY123".into(),
            "team@group.calendar.google.com".into(),
            100,
            5,
            Zone::from_offset_minutes(Some(0)),
        )
        .unwrap()
        .with_api_base("http://127.0.0.1:9");
        let err = c.events_for_month(MonthCursor { year: 2024, month0: 0 }).await.unwrap_err();
        assert!(!err.to_string().contains("SECRETKEY123"), "{err}");
        assert!(!format!("{err:?}").contains("SECRETKEY123"), "{err:?}");
    }
}
