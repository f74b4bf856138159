//! Listing filter and "load more" pagination for the people and projects pages.
//!
//! A [`Listing`] is the whole presentation state of a listing page: the
//! active filter plus how many matching records are shown. Changing the
//! filter resets the count to one page, so a new filter never inherits a
//! stale "load more" position. State round-trips through the page's query
//! string (`?category=&tag=&q=&shown=`), which is how the server-rendered
//! chips and the "load more" link carry it between requests.

use serde::Deserialize;
use url::form_urlencoded;

use crate::content::types::{PersonCategory, PersonTag, ProjectCategory};
use crate::content::{Person, Project};

pub const PEOPLE_PAGE_SIZE: usize = 24;
pub const PROJECTS_PAGE_SIZE: usize = 12;

// ── Filters ───────────────────────────────────────────────────────────────────

/// Raw listing query string. Every field is optional and parsed leniently:
/// unknown values read as "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingParams {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub q: Option<String>,
    pub shown: Option<String>,
}

pub trait ListingFilter<T>: Clone + Default + PartialEq {
    fn matches(&self, item: &T) -> bool;
}

/// Query-string binding of a filter.
pub trait FilterParams: Sized {
    fn from_params(params: &ListingParams) -> Self;

    /// Query-string pairs for this filter; inactive parts are omitted.
    fn params(&self) -> Vec<(&'static str, String)>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeopleFilter {
    pub category: Option<PersonCategory>,
    pub tag: Option<PersonTag>,
    /// Free text matched case-insensitively against name, position and
    /// institution.
    pub query: String,
}

impl PeopleFilter {
    pub fn with_category(&self, category: Option<PersonCategory>) -> Self {
        Self { category, ..self.clone() }
    }

    pub fn with_tag(&self, tag: Option<PersonTag>) -> Self {
        Self { tag, ..self.clone() }
    }
}

impl ListingFilter<Person> for PeopleFilter {
    fn matches(&self, person: &Person) -> bool {
        if self.category.is_some() && person.category != self.category {
            return false;
        }
        if let Some(tag) = self.tag {
            if !person.has_tag(tag) {
                return false;
            }
        }
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let contains = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&query));
        contains(Some(&person.name))
            || contains(person.position.as_deref())
            || contains(person.academic_unit.as_deref())
    }
}

impl FilterParams for PeopleFilter {
    fn from_params(params: &ListingParams) -> Self {
        Self {
            category: params.category.as_deref().and_then(|c| c.parse().ok()),
            tag: params.tag.as_deref().and_then(|t| t.parse().ok()),
            query: params.q.as_deref().map(str::trim).unwrap_or_default().to_string(),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        if let Some(tag) = self.tag {
            pairs.push(("tag", tag.as_str().to_string()));
        }
        if !self.query.trim().is_empty() {
            pairs.push(("q", self.query.trim().to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub category: Option<ProjectCategory>,
}

impl ListingFilter<Project> for ProjectFilter {
    fn matches(&self, project: &Project) -> bool {
        self.category.is_none() || project.project_category == self.category
    }
}

impl FilterParams for ProjectFilter {
    fn from_params(params: &ListingParams) -> Self {
        Self { category: params.category.as_deref().and_then(|c| c.parse().ok()) }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        self.category
            .map(|c| vec![("category", c.as_str().to_string())])
            .unwrap_or_default()
    }
}

// ── Listing state ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<F> {
    filter: F,
    visible_count: usize,
    page_size: usize,
}

impl<F: Default> Listing<F> {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self { filter: F::default(), visible_count: page_size, page_size }
    }
}

impl<F: Clone + Default + PartialEq> Listing<F> {
    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the filter. The visible count goes back to one page only when
    /// the filter actually changes.
    pub fn set_filter(&mut self, filter: F) {
        if filter != self.filter {
            self.filter = filter;
            self.visible_count = self.page_size;
        }
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(F::default());
    }

    pub fn load_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(self.page_size);
    }

    /// Apply the filter to `items` and cut the visible prefix.
    pub fn view<'a, T>(&self, items: &'a [T]) -> ListingView<'a, T>
    where
        F: ListingFilter<T>,
    {
        let filtered: Vec<&T> = items.iter().filter(|item| self.filter.matches(item)).collect();
        let shown = self.visible_count.min(filtered.len());
        ListingView { filtered, shown }
    }

    /// Rebuild state from a request's query string. `shown` below one page
    /// (or unparseable) reads as one page.
    pub fn from_params(params: &ListingParams, page_size: usize) -> Self
    where
        F: FilterParams,
    {
        let mut listing = Self::new(page_size);
        listing.filter = F::from_params(params);
        if let Some(shown) = params.shown.as_deref().and_then(|s| s.trim().parse::<usize>().ok()) {
            listing.visible_count = shown.max(listing.page_size);
        }
        listing
    }

    /// Link to this exact state.
    pub fn href(&self, path: &str) -> String
    where
        F: FilterParams,
    {
        let shown = (self.visible_count > self.page_size).then_some(self.visible_count);
        build_href(path, self.filter.params(), shown)
    }

    /// Link that switches to `filter`; the visible count resets, so `shown`
    /// is left out.
    pub fn filter_href(&self, path: &str, filter: &F) -> String
    where
        F: FilterParams,
    {
        build_href(path, filter.params(), None)
    }

    /// Link for the "load more" button: same filter, one more page.
    pub fn load_more_href(&self, path: &str) -> String
    where
        F: FilterParams,
    {
        let mut next = self.clone();
        next.load_more();
        next.href(path)
    }
}

fn build_href(path: &str, pairs: Vec<(&'static str, String)>, shown: Option<usize>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        query.append_pair(key, value);
    }
    if let Some(shown) = shown {
        query.append_pair("shown", &shown.to_string());
    }
    let query = query.finish();
    if query.is_empty() { path.to_string() } else { format!("{path}?{query}") }
}

/// Result of applying a [`Listing`] to a record list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView<'a, T> {
    filtered: Vec<&'a T>,
    shown: usize,
}

impl<'a, T> ListingView<'a, T> {
    /// Every record matching the filter, in source order.
    pub fn filtered(&self) -> &[&'a T] {
        &self.filtered
    }

    /// The prefix currently on screen.
    pub fn visible(&self) -> &[&'a T] {
        &self.filtered[..self.shown]
    }

    pub fn has_more(&self) -> bool {
        self.shown < self.filtered.len()
    }

    pub fn remaining(&self) -> usize {
        self.filtered.len() - self.shown
    }

    /// Number of matching records.
    pub fn total(&self) -> usize {
        self.filtered.len()
    }
}

// ── Filter chips ──────────────────────────────────────────────────────────────

/// Categories present among `people`, in enumeration order.
pub fn available_categories(people: &[Person]) -> Vec<PersonCategory> {
    PersonCategory::ALL
        .iter()
        .copied()
        .filter(|c| people.iter().any(|p| p.category == Some(*c)))
        .collect()
}

/// Tags present among `people`, in enumeration order.
pub fn available_tags(people: &[Person]) -> Vec<PersonTag> {
    PersonTag::ALL
        .iter()
        .copied()
        .filter(|t| people.iter().any(|p| p.has_tag(*t)))
        .collect()
}

pub fn available_project_categories(projects: &[Project]) -> Vec<ProjectCategory> {
    ProjectCategory::ALL
        .iter()
        .copied()
        .filter(|c| projects.iter().any(|p| p.project_category == Some(*c)))
        .collect()
}
