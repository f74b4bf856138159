//! Calendar widget: month grid arithmetic, date grouping and widget state.
//!
//! The grid is pure calendar arithmetic on `chrono::NaiveDate`. Remote
//! events come from the calendar provider (see [`google`], behind the
//! `calendar` feature) and are grouped by the calendar day their start falls
//! on in the site's zone. The widget is rendered on the server from the
//! month in the query string, so every response describes exactly the month
//! it was asked for.

#[cfg(feature = "calendar")]
pub mod google;

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::config::CalendarConfig;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Event titles shown inside a day cell before collapsing to "+N more".
pub const TITLES_PER_CELL: usize = 2;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("calendar request failed: {0}")]
    Request(String),
    #[error("calendar API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected calendar response: {0}")]
    Decode(String),
}

// ── Month grid ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLayout {
    /// Weekday of the 1st, 0 = Sunday.
    pub first_weekday: u32,
    pub days_in_month: u32,
}

/// Grid shape for `month0` (0 = January) of `year`. `None` when the month
/// index is out of range or the year is outside chrono's supported span.
pub fn month_layout(year: i32, month0: u32) -> Option<MonthLayout> {
    let first = NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, 1)?;
    let next = if month0 == 11 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)?
    };
    Some(MonthLayout {
        first_weekday: first.weekday().num_days_from_sunday(),
        days_in_month: u32::try_from((next - first).num_days()).ok()?,
    })
}

/// The month a calendar is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthCursor {
    pub year: i32,
    /// 0 = January.
    pub month0: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        month_layout(year, month0).map(|_| Self { year, month0 })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self { year: date.year(), month0: date.month0() }
    }

    pub fn next(self) -> Self {
        if self.month0 >= 11 {
            Self { year: self.year.saturating_add(1), month0: 0 }
        } else {
            Self { year: self.year, month0: self.month0 + 1 }
        }
    }

    pub fn prev(self) -> Self {
        if self.month0 == 0 {
            Self { year: self.year.saturating_sub(1), month0: 11 }
        } else {
            Self { year: self.year, month0: self.month0 - 1 }
        }
    }

    pub fn layout(&self) -> Option<MonthLayout> {
        month_layout(self.year, self.month0)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        let layout = self.layout()?;
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, layout.days_in_month)
    }

    /// `YYYY-MM-DD` key of `day` in this month.
    pub fn date_key(&self, day: u32) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month0 + 1, day)
    }

    /// "January 2024".
    pub fn label(&self) -> String {
        let name = MONTH_NAMES.get(self.month0 as usize).copied().unwrap_or("?");
        format!("{name} {}", self.year)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }
}

// ── Remote events ─────────────────────────────────────────────────────────────

/// Start or end of a remote event: an instant for timed events, a bare date
/// for all-day ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Calendar-day key (`YYYY-MM-DD`) of `time` as seen in `tz`.
///
/// A date-time is converted into `tz` before taking its date; one that does
/// not parse falls back to the text before `T`. A date-only value is used
/// as is.
pub fn date_key_in<Tz: TimeZone>(time: &EventTime, tz: &Tz) -> Option<String> {
    let raw = time.date_time.as_deref().or(time.date.as_deref())?;
    if time.date_time.is_some() {
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(instant.with_timezone(tz).date_naive().format("%Y-%m-%d").to_string());
        }
    }
    raw.split('T').next().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Group events by the day they start on. Within a day, events keep their
/// input order; events without a usable start are dropped.
pub fn group_by_date_in<Tz: TimeZone>(
    events: impl IntoIterator<Item = RemoteEvent>,
    tz: &Tz,
) -> BTreeMap<String, Vec<RemoteEvent>> {
    let mut map: BTreeMap<String, Vec<RemoteEvent>> = BTreeMap::new();
    for event in events {
        match date_key_in(&event.start, tz) {
            Some(key) => map.entry(key).or_default().push(event),
            None => warn!(id = %event.id, "calendar event has no start; skipped"),
        }
    }
    map
}

// ── Zone ──────────────────────────────────────────────────────────────────────

/// Time zone the calendar is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The server's local zone.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    /// `None` means local time. Offsets chrono rejects fall back to local.
    pub fn from_offset_minutes(minutes: Option<i32>) -> Self {
        minutes
            .and_then(|m| m.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .map(Zone::Fixed)
            .unwrap_or(Zone::Local)
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.wall_clock(instant).date()
    }

    /// `instant` as read off a clock in this zone.
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Local => instant.with_timezone(&Local).naive_local(),
            Zone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    pub fn date_key(&self, time: &EventTime) -> Option<String> {
        match self {
            Zone::Local => date_key_in(time, &Local),
            Zone::Fixed(offset) => date_key_in(time, offset),
        }
    }

    pub fn group(&self, events: impl IntoIterator<Item = RemoteEvent>) -> BTreeMap<String, Vec<RemoteEvent>> {
        match self {
            Zone::Local => group_by_date_in(events, &Local),
            Zone::Fixed(offset) => group_by_date_in(events, offset),
        }
    }

    /// Wall-clock time in this zone as a UTC instant. Gaps (DST) resolve to
    /// the earliest valid mapping.
    pub fn to_utc(&self, wall: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Local => Local.from_local_datetime(&wall).earliest().map(|t| t.with_timezone(&Utc)),
            Zone::Fixed(offset) => offset.from_local_datetime(&wall).earliest().map(|t| t.with_timezone(&Utc)),
        }
    }

    /// Query window for a month: midnight on the 1st to 23:59:59 on the last day.
    pub fn month_window(&self, cursor: MonthCursor) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.to_utc(cursor.first_day()?.and_hms_opt(0, 0, 0)?)?;
        let end = self.to_utc(cursor.last_day()?.and_hms_opt(23, 59, 59)?)?;
        Some((start, end))
    }

    /// "6:00 PM" for a timed event; `None` for all-day or unparseable values.
    pub fn time_label(&self, time: &EventTime) -> Option<String> {
        let instant = DateTime::parse_from_rfc3339(time.date_time.as_deref()?).ok()?;
        Some(self.wall_clock(instant.with_timezone(&Utc)).format("%-I:%M %p").to_string())
    }
}

// ── Widget state ──────────────────────────────────────────────────────────────

/// Result of loading a month. "Nothing scheduled" and "could not load" are
/// different outcomes and render differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarFeed {
    /// No API key or calendar id configured.
    Disabled,
    Loaded(Vec<RemoteEvent>),
    Failed(String),
}

impl CalendarFeed {
    pub fn events(&self) -> &[RemoteEvent] {
        match self {
            CalendarFeed::Loaded(events) => events,
            CalendarFeed::Disabled | CalendarFeed::Failed(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Padding before the 1st.
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub key: String,
    pub is_today: bool,
    pub is_selected: bool,
    pub event_count: usize,
    /// First [`TITLES_PER_CELL`] titles.
    pub titles: Vec<String>,
    /// Events beyond the listed titles.
    pub more: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    cursor: MonthCursor,
    selected: Option<String>,
    today: NaiveDate,
}

impl CalendarView {
    pub fn new(cursor: MonthCursor, today: NaiveDate) -> Self {
        Self { cursor, selected: None, today }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Toggle selection of `key`. Keys outside the shown month are ignored.
    pub fn select(&mut self, key: &str) {
        if self.selected.as_deref() == Some(key) {
            self.selected = None;
            return;
        }
        let in_month = NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .map(|date| self.cursor.contains(date))
            .unwrap_or(false);
        if in_month {
            self.selected = Some(key.to_string());
        }
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
        self.selected = None;
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.prev();
        self.selected = None;
    }

    /// Leading blanks, then one cell per day of the month.
    pub fn cells(&self, by_date: &BTreeMap<String, Vec<RemoteEvent>>) -> Vec<Cell> {
        let Some(layout) = self.cursor.layout() else {
            return Vec::new();
        };
        let today_key = self.today.format("%Y-%m-%d").to_string();

        let mut cells = Vec::with_capacity((layout.first_weekday + layout.days_in_month) as usize);
        cells.extend((0..layout.first_weekday).map(|_| Cell::Blank));
        for day in 1..=layout.days_in_month {
            let key = self.cursor.date_key(day);
            let events = by_date.get(&key).map(Vec::as_slice).unwrap_or_default();
            cells.push(Cell::Day(DayCell {
                day,
                is_today: key == today_key,
                is_selected: self.selected.as_deref() == Some(key.as_str()),
                event_count: events.len(),
                titles: events.iter().take(TITLES_PER_CELL).map(|e| e.summary.clone()).collect(),
                more: events.len().saturating_sub(TITLES_PER_CELL),
                key,
            }));
        }
        cells
    }

    pub fn selected_events<'a>(&self, by_date: &'a BTreeMap<String, Vec<RemoteEvent>>) -> &'a [RemoteEvent] {
        self.selected
            .as_ref()
            .and_then(|key| by_date.get(key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

// ── Source ────────────────────────────────────────────────────────────────────

/// Where the widget's events come from. Without the `calendar` feature, or
/// without credentials, every month loads as [`CalendarFeed::Disabled`].
#[derive(Debug, Clone, Default)]
pub struct CalendarSource {
    #[cfg(feature = "calendar")]
    client: Option<google::GoogleCalendarClient>,
    zone: Zone,
}

impl CalendarSource {
    pub fn from_config(config: &CalendarConfig) -> Result<Self, CalendarError> {
        let zone = Zone::from_offset_minutes(config.timezone_offset_minutes);
        #[cfg(feature = "calendar")]
        {
            let client = google::GoogleCalendarClient::from_config(config)?;
            Ok(Self { client, zone })
        }
        #[cfg(not(feature = "calendar"))]
        {
            Ok(Self { zone })
        }
    }

    pub fn disabled(zone: Zone) -> Self {
        Self { zone, ..Self::default() }
    }

    #[cfg(feature = "calendar")]
    pub fn with_client(client: google::GoogleCalendarClient) -> Self {
        let zone = client.zone();
        Self { client: Some(client), zone }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn is_configured(&self) -> bool {
        #[cfg(feature = "calendar")]
        {
            self.client.is_some()
        }
        #[cfg(not(feature = "calendar"))]
        {
            false
        }
    }

    pub async fn feed(&self, cursor: MonthCursor) -> CalendarFeed {
        #[cfg(feature = "calendar")]
        if let Some(client) = &self.client {
            return match client.events_for_month(cursor).await {
                Ok(events) => CalendarFeed::Loaded(events),
                Err(e) => {
                    warn!(month = %cursor.label(), error = %e, "calendar fetch failed");
                    CalendarFeed::Failed(e.to_string())
                }
            };
        }
        let _ = cursor;
        CalendarFeed::Disabled
    }
}
