//! Content records as the store projects them.
//!
//! Field names follow the store's camelCase wire format. Every optional field
//! tolerates both absence and an explicit `null`; enumeration fields holding
//! a value this site does not know are treated as absent instead of failing
//! the whole page.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::richtext::Block;

// ── Enumerations ──────────────────────────────────────────────────────────────

/// Declares a closed string enumeration with its wire value and display label.
macro_rules! content_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => ($wire:literal, $label:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            /// Every value, in the order filter chips are shown.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Wire value as stored in the content store and used in URLs.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Human-readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownValue(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// A string that is not a member of the expected enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue(pub String);

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl std::error::Error for UnknownValue {}

content_enum! {
    /// Fellowship cohort a person belongs to.
    PersonCategory {
        Fellows => ("fellows", "Fellows"),
        CommunityFellows => ("community-fellows", "Community Fellows"),
        EarlyCareerFellows => ("early-career-fellows", "Early Career Fellows"),
        FacultyFellows => ("faculty-fellows", "Faculty Fellows"),
        Pilot => ("pilot", "Pilot"),
        Veterans => ("veterans", "Veterans"),
    }
}

impl PersonCategory {
    /// Singular badge text on a person's own page.
    pub fn singular_label(&self) -> &'static str {
        match self {
            PersonCategory::EarlyCareerFellows => "Early Career Fellow",
            PersonCategory::FacultyFellows => "Faculty Fellow",
            PersonCategory::CommunityFellows => "Community Fellow",
            PersonCategory::Veterans => "Veteran Fellow",
            PersonCategory::Fellows | PersonCategory::Pilot => "Fellow",
        }
    }
}

content_enum! {
    /// Role tags; a person may carry several.
    PersonTag {
        Staff => ("staff", "Staff"),
        Leadership => ("leadership", "Leadership"),
        TechnicalExperts => ("technical-experts", "Technical Experts"),
        Students => ("students", "Students"),
        BoardOfAdvisors => ("board-of-advisors", "Board of Advisors"),
        Affiliates => ("affiliates", "Affiliates"),
        PastCommunityMembers => ("past-community-members", "Past Community Members"),
    }
}

content_enum! {
    ProjectCategory {
        CommunityPartnerships => ("community-partnerships", "Community Partnerships"),
        FellowLed => ("fellow-led", "Fellow-Led Initiatives"),
        OutreachEducation => ("outreach-education", "Outreach & Education"),
        CorePrograms => ("core-programs", "Core Programs"),
    }
}

content_enum! {
    ProjectStatus {
        Ongoing => ("ongoing", "Ongoing"),
        Completed => ("completed", "Completed"),
    }
}

content_enum! {
    EventType {
        LectureSeries => ("lecture-series", "Lecture Series"),
        Workshop => ("workshop", "Workshop"),
        Community => ("community", "Community"),
        Other => ("other", "Event"),
    }
}

// ── Shared shapes ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

/// Stored image with optional crop and hotspot, all as fractions of the
/// source dimensions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub asset: Option<AssetRef>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub hotspot: Option<Hotspot>,
    #[serde(default)]
    pub crop: Option<Crop>,
}

impl Image {
    /// Asset reference id, e.g. `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`.
    pub fn asset_ref(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .and_then(|a| a.reference.as_deref())
            .filter(|r| !r.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Hotspot {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5, width: 1.0, height: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Crop {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Website {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub position: Option<String>,
    /// Institution.
    #[serde(default)]
    pub academic_unit: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub image: Option<Image>,
    /// Externally hosted portrait, used when `image` is absent.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Biography.
    #[serde(default)]
    pub content: Option<Vec<Block>>,
    /// Legacy raw-HTML biography, used when `content` is empty.
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub website: Option<Website>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub category: Option<PersonCategory>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub tags: Vec<PersonTag>,
}

impl Person {
    pub fn slug(&self) -> Option<&str> {
        slug_of(&self.slug)
    }

    pub fn has_tag(&self, tag: PersonTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Letter shown on the placeholder when there is no portrait.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub project_category: Option<ProjectCategory>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub body: Option<Vec<Block>>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub main_image: Option<Image>,
    /// Unresolvable references come back as `null` and are dropped.
    #[serde(default, deserialize_with = "present_vec")]
    pub team_members: Vec<Person>,
    #[serde(default)]
    pub faculty_advisor: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub original_url: Option<String>,
}

impl Project {
    pub fn slug(&self) -> Option<&str> {
        slug_of(&self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub author: Option<String>,
    /// RFC 3339 timestamp.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: Option<Vec<Block>>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub main_image: Option<Image>,
    #[serde(default)]
    pub original_url: Option<String>,
}

impl NewsPost {
    pub fn slug(&self) -> Option<&str> {
        slug_of(&self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    /// RFC 3339 timestamp.
    pub start_date_time: String,
    #[serde(default)]
    pub end_date_time: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub body: Option<Vec<Block>>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub main_image: Option<Image>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub registration_url: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
}

impl Event {
    pub fn slug(&self) -> Option<&str> {
        slug_of(&self.slug)
    }

    /// Card label; events without a type read as "Event".
    pub fn type_label(&self) -> &'static str {
        self.event_type.map(|t| t.label()).unwrap_or("Event")
    }
}

fn slug_of(slug: &Option<Slug>) -> Option<&str> {
    slug.as_ref().map(|s| s.current.as_str()).filter(|s| !s.is_empty())
}

// ── Lenient field decoding ────────────────────────────────────────────────────

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|s| s.parse().ok())
        .collect())
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

/// Array whose `null` entries (dangling references) are skipped.
fn present_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

/// Nested record that reads as absent when its shape is wrong.
fn lenient_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(raw).ok())
}
