//! Display formatting for dates and event times (en-US style).

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::calendar::Zone;

fn parse(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn wall(raw: &str, zone: Zone) -> Option<NaiveDateTime> {
    parse(raw).map(|t| zone.wall_clock(t))
}

/// "January 5, 2024". Unparseable input is returned unchanged.
pub fn long_date(raw: &str, zone: Zone) -> String {
    wall(raw, zone)
        .map(|t| t.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// "Jan 5, 2024".
pub fn short_date(raw: &str, zone: Zone) -> String {
    wall(raw, zone)
        .map(|t| t.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Event card date: the start date, plus "– <end date>" when the event ends
/// on a different calendar day.
pub fn event_dates(start: &str, end: Option<&str>, zone: Zone) -> String {
    let mut out = long_date(start, zone);
    if let (Some(s), Some(e)) = (wall(start, zone), end.and_then(|e| wall(e, zone))) {
        if s.date() != e.date() {
            out.push_str(" – ");
            out.push_str(&e.format("%B %-d, %Y").to_string());
        }
    }
    out
}

fn date_time(t: NaiveDateTime) -> String {
    t.format("%A, %B %-d, %Y at %-I:%M %p").to_string()
}

/// Event page "When" line: weekday, date and time; a same-day end adds only
/// its time.
pub fn event_when(start: &str, end: Option<&str>, zone: Zone) -> String {
    let Some(s) = wall(start, zone) else {
        return start.to_string();
    };
    let mut out = date_time(s);
    if let Some(e) = end.and_then(|e| wall(e, zone)) {
        out.push_str(" – ");
        if s.date() == e.date() {
            out.push_str(&e.format("%-I:%M %p").to_string());
        } else {
            out.push_str(&date_time(e));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> Zone {
        Zone::from_offset_minutes(Some(0))
    }

    #[test]
    fn long_and_short_dates() {
        assert_eq!(long_date("2024-01-05T10:00:00Z", utc()), "January 5, 2024");
        assert_eq!(short_date("2024-01-05T10:00:00Z", utc()), "Jan 5, 2024");
        assert_eq!(long_date("soon", utc()), "soon");
    }

    #[test]
    fn dates_follow_the_zone() {
        let pacific = Zone::from_offset_minutes(Some(-480));
        assert_eq!(long_date("2024-01-05T03:00:00Z", pacific), "January 4, 2024");
    }

    #[test]
    fn range_only_when_days_differ() {
        assert_eq!(
            event_dates("2024-03-01T17:00:00Z", Some("2024-03-01T19:00:00Z"), utc()),
            "March 1, 2024"
        );
        assert_eq!(
            event_dates("2024-03-01T17:00:00Z", Some("2024-03-03T19:00:00Z"), utc()),
            "March 1, 2024 – March 3, 2024"
        );
        assert_eq!(event_dates("2024-03-01T17:00:00Z", None, utc()), "March 1, 2024");
    }

    #[test]
    fn when_line() {
        assert_eq!(
            event_when("2024-03-01T17:00:00Z", Some("2024-03-01T19:30:00Z"), utc()),
            "Friday, March 1, 2024 at 5:00 PM – 7:30 PM"
        );
        assert_eq!(
            event_when("2024-03-01T17:00:00Z", Some("2024-03-02T09:00:00Z"), utc()),
            "Friday, March 1, 2024 at 5:00 PM – Saturday, March 2, 2024 at 9:00 AM"
        );
    }
}
