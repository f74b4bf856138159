//! The fixed set of parameterised content queries.
//!
//! Each [`Query`] carries its GROQ text and its `$param` bindings. Providers
//! either ship the text to the remote store or evaluate the query against a
//! local snapshot; both return the same projection.

use serde_json::{Map, Value, json};

use super::types::PersonCategory;

/// Number of upcoming events shown on the events page.
pub const UPCOMING_EVENTS_LIMIT: usize = 6;
/// Number of posts returned by [`Query::RecentNews`].
pub const RECENT_NEWS_LIMIT: usize = 3;

const PERSON_SUMMARY: &str = "{
  _id, name, firstName, familyName, slug, position, academicUnit, email,
  image { _type, asset, hotspot, crop }, imageUrl, website, category, tags
}";

const PERSON_DETAIL: &str = "{
  _id, name, firstName, familyName, slug, position, academicUnit, email, telephone,
  image, imageUrl, content, htmlContent, website, category, tags
}";

const PROJECT_CARD: &str = "{
  _id, title, slug, year, status, projectCategory, description, mainImage, facultyAdvisor, client
}";

const PROJECT_DETAIL: &str = "{
  _id, title, slug, year, status, projectCategory, description, body, mainImage,
  teamMembers[]-> { _id, name, slug, position, image, imageUrl },
  facultyAdvisor, client,
  resources[] { title, \"fileUrl\": file.asset->url },
  originalUrl
}";

const NEWS_CARD: &str = "{ _id, title, slug, author, publishedAt, excerpt, mainImage }";

const NEWS_DETAIL: &str = "{ _id, title, slug, author, publishedAt, excerpt, body, mainImage, originalUrl }";

const EVENT_CARD: &str = "{
  _id, title, slug, startDateTime, endDateTime, locations, description, mainImage, eventType, program
}";

const EVENT_DETAIL: &str = "{
  _id, title, slug, startDateTime, endDateTime, locations, description, body, mainImage,
  eventType, program, registrationUrl, originalUrl
}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    AllPeople,
    PersonBySlug { slug: String },
    PeopleByCategory { category: PersonCategory },
    /// Projects whose team references the person.
    ProjectsByPerson { person_id: String },
    AllProjects,
    ProjectBySlug { slug: String },
    AllNews,
    RecentNews,
    NewsBySlug { slug: String },
    UpcomingEvents,
    PastEvents,
    EventBySlug { slug: String },
}

impl Query {
    /// Stable name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Query::AllPeople => "all_people",
            Query::PersonBySlug { .. } => "person_by_slug",
            Query::PeopleByCategory { .. } => "people_by_category",
            Query::ProjectsByPerson { .. } => "projects_by_person",
            Query::AllProjects => "all_projects",
            Query::ProjectBySlug { .. } => "project_by_slug",
            Query::AllNews => "all_news",
            Query::RecentNews => "recent_news",
            Query::NewsBySlug { .. } => "news_by_slug",
            Query::UpcomingEvents => "upcoming_events",
            Query::PastEvents => "past_events",
            Query::EventBySlug { .. } => "event_by_slug",
        }
    }

    /// `true` when the query yields a single record (or `null`).
    pub fn is_single(&self) -> bool {
        matches!(
            self,
            Query::PersonBySlug { .. }
                | Query::ProjectBySlug { .. }
                | Query::NewsBySlug { .. }
                | Query::EventBySlug { .. }
        )
    }

    /// GROQ text sent to the remote store.
    pub fn groq(&self) -> String {
        match self {
            Query::AllPeople => {
                format!(r#"*[_type == "fellow"] | order(name asc) {PERSON_SUMMARY}"#)
            }
            Query::PersonBySlug { .. } => {
                format!(r#"*[_type == "fellow" && slug.current == $slug][0] {PERSON_DETAIL}"#)
            }
            Query::PeopleByCategory { .. } => format!(
                r#"*[_type == "fellow" && category == $category] | order(name asc) {PERSON_SUMMARY}"#
            ),
            Query::ProjectsByPerson { .. } => format!(
                r#"*[_type == "project" && references($personId)] | order(year desc) {PROJECT_CARD}"#
            ),
            Query::AllProjects => {
                format!(r#"*[_type == "project"] | order(year desc) {PROJECT_CARD}"#)
            }
            Query::ProjectBySlug { .. } => {
                format!(r#"*[_type == "project" && slug.current == $slug][0] {PROJECT_DETAIL}"#)
            }
            Query::AllNews => {
                format!(r#"*[_type == "newsPost"] | order(publishedAt desc) {NEWS_CARD}"#)
            }
            Query::RecentNews => format!(
                r#"*[_type == "newsPost"] | order(publishedAt desc)[0...{RECENT_NEWS_LIMIT}] {NEWS_CARD}"#
            ),
            Query::NewsBySlug { .. } => {
                format!(r#"*[_type == "newsPost" && slug.current == $slug][0] {NEWS_DETAIL}"#)
            }
            Query::UpcomingEvents => format!(
                r#"*[_type == "event" && startDateTime >= now()] | order(startDateTime asc)[0...{UPCOMING_EVENTS_LIMIT}] {EVENT_CARD}"#
            ),
            Query::PastEvents => format!(
                r#"*[_type == "event" && startDateTime < now()] | order(startDateTime desc) {EVENT_CARD}"#
            ),
            Query::EventBySlug { .. } => {
                format!(r#"*[_type == "event" && slug.current == $slug][0] {EVENT_DETAIL}"#)
            }
        }
    }

    /// `$param` bindings, without the leading `$`.
    pub fn params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        match self {
            Query::PersonBySlug { slug }
            | Query::ProjectBySlug { slug }
            | Query::NewsBySlug { slug }
            | Query::EventBySlug { slug } => {
                params.insert("slug".into(), json!(slug));
            }
            Query::PeopleByCategory { category } => {
                params.insert("category".into(), json!(category.as_str()));
            }
            Query::ProjectsByPerson { person_id } => {
                params.insert("personId".into(), json!(person_id));
            }
            _ => {}
        }
        params
    }
}
