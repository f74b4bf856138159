//! Local snapshot provider: answers the fixed queries from a JSON file.
//!
//! The file holds the raw documents grouped by type:
//!
//! ```json
//! { "people": [...], "projects": [...], "news": [...], "events": [...] }
//! ```
//!
//! Queries are evaluated in memory with the same filters, orderings and
//! limits as the remote GROQ text, so pages behave identically offline.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::content::queries::{RECENT_NEWS_LIMIT, UPCOMING_EVENTS_LIMIT};
use crate::content::{ContentError, Query};

#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    people: Vec<Value>,
    #[serde(default)]
    projects: Vec<Value>,
    #[serde(default)]
    news: Vec<Value>,
    #[serde(default)]
    events: Vec<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    docs: Arc<Snapshot>,
}

impl SnapshotProvider {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ContentError::Snapshot(format!("cannot read {}: {e}", path.display())))?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| ContentError::Snapshot(format!("parse error in {}: {e}", path.display())))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ContentError> {
        let docs: Snapshot = serde_json::from_value(value)
            .map_err(|e| ContentError::Snapshot(format!("unexpected snapshot layout: {e}")))?;
        Ok(Self { docs: Arc::new(docs) })
    }

    pub async fn query(&self, query: &Query) -> Result<Value, ContentError> {
        Ok(self.evaluate(query, Utc::now()))
    }

    /// Evaluate `query` as of `now` (only event queries depend on it).
    pub fn evaluate(&self, query: &Query, now: DateTime<Utc>) -> Value {
        let docs = &self.docs;
        match query {
            Query::AllPeople => list(sorted(docs.people.iter(), by_name)),
            Query::PersonBySlug { slug } => by_slug(&docs.people, slug),
            Query::PeopleByCategory { category } => list(sorted(
                docs.people
                    .iter()
                    .filter(|p| str_field(p, "category") == Some(category.as_str())),
                by_name,
            )),
            Query::ProjectsByPerson { person_id } => self.project_list(sorted(
                docs.projects.iter().filter(|p| references(p, person_id)),
                by_year_desc,
            )),
            Query::AllProjects => self.project_list(sorted(docs.projects.iter(), by_year_desc)),
            Query::ProjectBySlug { slug } => match find_by_slug(&docs.projects, slug) {
                Some(project) => self.dereference_team(project),
                None => Value::Null,
            },
            Query::AllNews => list(sorted(docs.news.iter(), by_published_desc)),
            Query::RecentNews => list(
                sorted(docs.news.iter(), by_published_desc)
                    .into_iter()
                    .take(RECENT_NEWS_LIMIT)
                    .collect(),
            ),
            Query::NewsBySlug { slug } => by_slug(&docs.news, slug),
            Query::UpcomingEvents => {
                let upcoming = docs
                    .events
                    .iter()
                    .filter(|e| start_of(e).is_some_and(|start| start >= now));
                list(
                    sorted(upcoming, by_start_asc)
                        .into_iter()
                        .take(UPCOMING_EVENTS_LIMIT)
                        .collect(),
                )
            }
            Query::PastEvents => {
                let past = docs
                    .events
                    .iter()
                    .filter(|e| start_of(e).is_some_and(|start| start < now));
                list(sorted(past, |a, b| by_start_asc(b, a)))
            }
            Query::EventBySlug { slug } => by_slug(&docs.events, slug),
        }
    }

    fn project_list(&self, projects: Vec<&Value>) -> Value {
        Value::Array(projects.into_iter().map(|p| self.dereference_team(p)).collect())
    }

    /// Replace `{ "_ref": id }` team entries with the referenced person.
    /// Dangling references are dropped.
    fn dereference_team(&self, project: &Value) -> Value {
        let mut project = project.clone();
        if let Some(Value::Array(members)) = project.get_mut("teamMembers") {
            let resolved: Vec<Value> = members
                .iter()
                .filter_map(|member| match str_field(member, "_ref") {
                    Some(id) => self
                        .docs
                        .people
                        .iter()
                        .find(|p| str_field(p, "_id") == Some(id))
                        .cloned(),
                    None => Some(member.clone()),
                })
                .collect();
            *members = resolved;
        }
        project
    }
}

// ── Evaluation helpers ────────────────────────────────────────────────────────

fn list(docs: Vec<&Value>) -> Value {
    Value::Array(docs.into_iter().cloned().collect())
}

fn sorted<'a>(
    docs: impl Iterator<Item = &'a Value>,
    cmp: impl Fn(&Value, &Value) -> Ordering,
) -> Vec<&'a Value> {
    let mut docs: Vec<&Value> = docs.collect();
    docs.sort_by(|a, b| cmp(a, b));
    docs
}

fn str_field<'a>(doc: &'a Value, field: &str) -> Option<&'a str> {
    doc.get(field).and_then(Value::as_str)
}

fn slug_of(doc: &Value) -> Option<&str> {
    doc.get("slug").and_then(|s| s.get("current")).and_then(Value::as_str)
}

fn find_by_slug<'a>(docs: &'a [Value], slug: &str) -> Option<&'a Value> {
    docs.iter().find(|d| slug_of(d) == Some(slug))
}

fn by_slug(docs: &[Value], slug: &str) -> Value {
    find_by_slug(docs, slug).cloned().unwrap_or(Value::Null)
}

/// `true` if any `_ref` anywhere in `doc` equals `id`.
fn references(doc: &Value, id: &str) -> bool {
    match doc {
        Value::Object(map) => map.iter().any(|(key, value)| {
            (key == "_ref" && value.as_str() == Some(id)) || references(value, id)
        }),
        Value::Array(items) => items.iter().any(|item| references(item, id)),
        _ => false,
    }
}

fn parse_time(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

fn start_of(event: &Value) -> Option<DateTime<Utc>> {
    parse_time(str_field(event, "startDateTime"))
}

/// Missing keys sort after present ones, in either direction.
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_name(a: &Value, b: &Value) -> Ordering {
    missing_last(str_field(a, "name"), str_field(b, "name"), false)
}

fn by_year_desc(a: &Value, b: &Value) -> Ordering {
    missing_last(
        a.get("year").and_then(Value::as_i64),
        b.get("year").and_then(Value::as_i64),
        true,
    )
}

fn by_published_desc(a: &Value, b: &Value) -> Ordering {
    missing_last(
        parse_time(str_field(a, "publishedAt")),
        parse_time(str_field(b, "publishedAt")),
        true,
    )
}

fn by_start_asc(a: &Value, b: &Value) -> Ordering {
    missing_last(start_of(a), start_of(b), false)
}
