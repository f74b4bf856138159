//! Maud page templates.
//!
//! Every page is wrapped by [`layout`]. Views take already-loaded records;
//! they never fetch. Image renditions are built here from the shared
//! [`ContentClient`], since only the view knows the size it needs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use url::Url;

use crate::calendar::{CalendarFeed, CalendarView, Cell, RemoteEvent, WEEKDAY_NAMES, Zone};
use crate::content::types::{PersonCategory, PersonTag, ProjectCategory, ProjectStatus};
use crate::content::{ContentClient, Event, Fit, Image, NewsPost, Person, Project};
use crate::listing::{Listing, ListingView, PeopleFilter, ProjectFilter};
use crate::richtext;
use crate::site::format;

const TAGLINE: &str = "Center for Developing Leadership in Science";

const NAV: [(&str, &str); 6] = [
    ("Home", "/"),
    ("Projects", "/projects"),
    ("People", "/people"),
    ("Events", "/events"),
    ("News", "/news"),
    ("Contact", "/contact"),
];

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#faf9f2;color:#2b2b2b}\
a{color:inherit}main{max-width:1200px;margin:0 auto;padding:2rem 1rem}\
header.site,footer.site{background:#2b2b2b;color:#faf9f2;padding:1rem}\
header.site nav a{margin-right:1.25rem;text-decoration:none}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:2rem}\
.chips a{display:inline-block;padding:.4rem 1rem;margin:0 .4rem .4rem 0;border-radius:999px;background:#e6e5dd;text-decoration:none}\
.chips a.active{background:#2b2b2b;color:#faf9f2}\
.calendar .days{display:grid;grid-template-columns:repeat(7,1fr)}\
.calendar .cell{min-height:80px;border:1px solid #eee;padding:.3rem;text-decoration:none;display:block}\
.calendar .today .day{font-weight:bold;color:#3d7a4a}.calendar .selected{background:#e4efe6}\
";

/// Per-request rendering context.
#[derive(Clone, Copy)]
pub struct Ctx<'a> {
    pub site_name: &'a str,
    pub content: &'a ContentClient,
    pub zone: Zone,
}

impl Ctx<'_> {
    /// `width`×`height` crop of `image`, letting the CDN pick the format.
    fn cropped(&self, image: Option<&Image>, width: u32, height: Option<u32>) -> Option<String> {
        let rendition = self.content.image(image)?.width(width).fit(Fit::Crop).auto_format();
        match height {
            Some(h) => rendition.height(h).url(),
            None => rendition.url(),
        }
    }

    fn hero(&self, image: Option<&Image>) -> Option<String> {
        self.content.image(image)?.width(1600).quality(90).auto_format().url()
    }

    fn portrait(&self, person: &Person, size: u32) -> Option<String> {
        self.cropped(person.image.as_ref(), size, Some(size))
            .or_else(|| person.image_url.clone().filter(|u| !u.is_empty()))
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

pub fn layout(ctx: &Ctx, title: Option<&str>, description: Option<&str>, body: Markup) -> Markup {
    let full_title = match title {
        Some(t) => format!("{t} | {}", ctx.site_name),
        None => format!("{} | {TAGLINE}", ctx.site_name),
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (full_title) }
                @if let Some(d) = description {
                    meta name="description" content=(d);
                }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header.site {
                    a.brand href="/" { strong { (ctx.site_name) } }
                    " "
                    nav {
                        @for (label, href) in NAV {
                            a href=(href) { (label) }
                        }
                    }
                }
                main { (body) }
                footer.site {
                    p { (ctx.site_name) " · " (TAGLINE) }
                }
            }
        }
    }
}

pub fn not_found(ctx: &Ctx) -> Markup {
    layout(
        ctx,
        Some("Not Found"),
        None,
        html! {
            h1 { "Not Found" }
            p { "The page you were looking for does not exist." }
            p { a href="/" { "Back to home" } }
        },
    )
}

pub fn unavailable(ctx: &Ctx) -> Markup {
    layout(
        ctx,
        Some("Temporarily Unavailable"),
        None,
        html! {
            h1 { "Temporarily Unavailable" }
            p { "This page could not be loaded right now. Please try again shortly." }
        },
    )
}

// ── Home ──────────────────────────────────────────────────────────────────────

pub const HOME_FEATURED_PEOPLE: usize = 4;
pub const HOME_GALLERY_PEOPLE: usize = 7;
pub const HOME_LATEST_NEWS: usize = 6;

pub fn home(ctx: &Ctx, people: &[Person], news: &[NewsPost]) -> Markup {
    let gallery: Vec<(&Person, String)> = people
        .iter()
        .take(HOME_GALLERY_PEOPLE)
        .filter_map(|p| ctx.portrait(p, 600).map(|src| (p, src)))
        .collect();

    let body = html! {
        section.hero {
            h1 { (TAGLINE) }
            p { "Reimagining who leads, who learns, and who shapes the future of science." }
        }
        @if !gallery.is_empty() {
            section.gallery {
                @for (person, src) in &gallery {
                    img src=(src) alt=(person.name) loading="lazy";
                }
            }
        }
        @if !people.is_empty() {
            section.featured {
                h2 { "Our People" }
                div.grid {
                    @for person in people.iter().take(HOME_FEATURED_PEOPLE) {
                        (person_card(ctx, person))
                    }
                }
                p { a href="/people" { "Meet everyone" } }
            }
        }
        @if !news.is_empty() {
            section.latest-news {
                h2 { "Latest News" }
                div.grid {
                    @for post in news.iter().take(HOME_LATEST_NEWS) {
                        (news_card(ctx, post, true))
                    }
                }
            }
        }
    };
    layout(ctx, None, Some("Reimagining who leads, who learns, and who shapes the future of science."), body)
}

// ── People ────────────────────────────────────────────────────────────────────

fn person_card(ctx: &Ctx, person: &Person) -> Markup {
    let href = person.slug().map(|s| detail_href("people", s));
    html! {
        article.person-card {
            a href=[href.as_deref()] {
                @if let Some(src) = ctx.portrait(person, 400) {
                    img src=(src) alt=(person.name) width="400" height="400" loading="lazy";
                } @else {
                    div.initial { (person.initial().map(String::from).unwrap_or_default()) }
                }
                h3 { (person.name) }
            }
            @if let Some(position) = &person.position { p.position { (position) } }
            @if let Some(unit) = &person.academic_unit { p.unit { (unit) } }
        }
    }
}

pub struct PeopleChips<'a> {
    pub categories: &'a [PersonCategory],
    pub tags: &'a [PersonTag],
}

pub fn people_index(
    ctx: &Ctx,
    listing: &Listing<PeopleFilter>,
    view: &ListingView<Person>,
    chips: PeopleChips,
    configured: bool,
) -> Markup {
    const PATH: &str = "/people";
    let filter = listing.filter();

    let body = html! {
        h1 { "People" }
        form.search method="get" action=(PATH) {
            @if let Some(c) = filter.category { input type="hidden" name="category" value=(c.as_str()); }
            @if let Some(t) = filter.tag { input type="hidden" name="tag" value=(t.as_str()); }
            input type="search" name="q" value=(filter.query)
                placeholder="Search by name, position, or institution...";
            button type="submit" { "Search" }
        }
        @if !chips.categories.is_empty() {
            nav.chips.categories {
                a.active[filter.category.is_none()] href=(listing.filter_href(PATH, &filter.with_category(None))) { "All" }
                @for c in chips.categories {
                    a.active[filter.category == Some(*c)]
                        href=(listing.filter_href(PATH, &filter.with_category(Some(*c)))) { (c.label()) }
                }
            }
        }
        @if !chips.tags.is_empty() {
            nav.chips.tags {
                a.active[filter.tag.is_none()] href=(listing.filter_href(PATH, &filter.with_tag(None))) { "All Roles" }
                @for t in chips.tags {
                    a.active[filter.tag == Some(*t)]
                        href=(listing.filter_href(PATH, &filter.with_tag(Some(*t)))) { (t.label()) }
                }
            }
        }
        @if !configured {
            p.empty { "People will appear here once the content store is connected." }
        } @else if view.total() == 0 {
            p.empty { "No people match these filters." }
        } @else {
            p.count { "Showing " (view.visible().len()) " of " (view.total()) " people" }
            div.grid {
                @for person in view.visible() { (person_card(ctx, person)) }
            }
            @if view.has_more() {
                p { a.load-more href=(listing.load_more_href(PATH)) { "Load more (" (view.remaining()) " remaining)" } }
            }
        }
    };
    layout(
        ctx,
        Some("People"),
        Some("Meet the fellows, staff, and community members of the Center for Developing Leadership in Science."),
        body,
    )
}

pub fn person_detail(ctx: &Ctx, person: &Person, projects: &[Project]) -> Markup {
    let description = match (&person.position, &person.academic_unit) {
        (Some(p), Some(u)) => format!("{} — {p}, {u}", person.name),
        (Some(p), None) => format!("{} — {p}", person.name),
        _ => format!("{} — CDLS Fellow", person.name),
    };
    let website = person.website.as_ref().and_then(|w| w.url.as_deref().map(|u| (u, w.title.as_deref())));

    let body = html! {
        article.person {
            header {
                @if let Some(src) = ctx.portrait(person, 400) {
                    img src=(src) alt=(person.name) width="256" height="256";
                }
                h1 { (person.name) }
                @if let Some(p) = &person.position { p.position { (p) } }
                @if let Some(u) = &person.academic_unit { p.unit { (u) } }
                @if let Some(c) = person.category { span.badge { (c.singular_label()) } }
                @if let Some(email) = &person.email {
                    a.email href={ "mailto:" (email) } { (email) }
                }
                @if let Some((url, title)) = website {
                    a.website href=(url) target="_blank" rel="noopener noreferrer" { (title.unwrap_or("Website")) }
                }
            }
            section.bio {
                @if let Some(blocks) = person.content.as_deref().filter(|b| !b.is_empty()) {
                    (richtext::render(blocks, ctx.content))
                } @else if let Some(html) = person.html_content.as_deref().filter(|h| !h.trim().is_empty()) {
                    (PreEscaped(html))
                }
            }
            @if !projects.is_empty() {
                section.projects {
                    h2 { "Projects" }
                    div.grid {
                        @for project in projects { (project_card(ctx, project)) }
                    }
                }
            }
        }
    };
    layout(ctx, Some(person.name.as_str()), Some(description.as_str()), body)
}

// ── Projects ──────────────────────────────────────────────────────────────────

fn status_label(status: Option<ProjectStatus>) -> &'static str {
    status.map(|s| s.label()).unwrap_or("Project")
}

fn project_card(ctx: &Ctx, project: &Project) -> Markup {
    let href = project.slug().map(|s| detail_href("projects", s));
    let image = ctx
        .content
        .image(project.main_image.as_ref())
        .and_then(|i| i.width(800).quality(85).fit(Fit::Crop).auto_format().url());
    html! {
        article.project-card {
            a href=[href.as_deref()] {
                @if let Some(src) = image {
                    img src=(src) alt=(project.title) loading="lazy";
                } @else {
                    div.placeholder {}
                }
                h3 { (project.title) }
            }
            p.meta {
                @if let Some(year) = project.year { (year) " · " }
                (status_label(project.status))
            }
        }
    }
}

pub fn projects_index(
    ctx: &Ctx,
    listing: &Listing<ProjectFilter>,
    view: &ListingView<Project>,
    categories: &[ProjectCategory],
    configured: bool,
) -> Markup {
    const PATH: &str = "/projects";
    let active = listing.filter().category;

    let body = html! {
        h1 { "Projects" }
        @if !categories.is_empty() {
            nav.chips {
                a.active[active.is_none()] href=(listing.filter_href(PATH, &ProjectFilter::default())) { "All" }
                @for c in categories {
                    a.active[active == Some(*c)]
                        href=(listing.filter_href(PATH, &ProjectFilter { category: Some(*c) })) { (c.label()) }
                }
            }
        }
        @if !configured {
            p.empty { "Projects will appear here once the content store is connected." }
        } @else if view.total() == 0 {
            p.empty { "No projects found in this category." }
        } @else {
            p.count { "Showing " (view.visible().len()) " of " (view.total()) " projects" }
            div.grid {
                @for project in view.visible() { (project_card(ctx, project)) }
            }
            @if view.has_more() {
                p { a.load-more href=(listing.load_more_href(PATH)) { "Load more (" (view.remaining()) " remaining)" } }
            }
        }
    };
    layout(ctx, Some("Projects"), Some("Research projects from the Center for Developing Leadership in Science."), body)
}

pub fn project_detail(ctx: &Ctx, project: &Project) -> Markup {
    let body = html! {
        article.project {
            header {
                h1 { (project.title) }
                div.badges {
                    @if let Some(year) = project.year { span.badge { (year) } }
                    @if let Some(status) = project.status { span.badge { (status.label()) } }
                    @if let Some(c) = project.project_category { span.badge { (c.label()) } }
                }
                @if let Some(src) = ctx.hero(project.main_image.as_ref()) {
                    img.hero src=(src) alt=(project.title);
                }
            }
            @if project.faculty_advisor.is_some() || project.client.is_some() {
                dl.credits {
                    @if let Some(a) = &project.faculty_advisor { dt { "Faculty Advisor" } dd { (a) } }
                    @if let Some(c) = &project.client { dt { "Client" } dd { (c) } }
                }
            }
            section.body {
                @if let Some(blocks) = project.body.as_deref().filter(|b| !b.is_empty()) {
                    (richtext::render(blocks, ctx.content))
                } @else if let Some(d) = &project.description {
                    p { (d) }
                } @else {
                    p.empty { "Details coming soon." }
                }
            }
            @if !project.team_members.is_empty() {
                section.team {
                    h2 { "Team" }
                    ul {
                        @for member in &project.team_members {
                            li {
                                @if let Some(src) = ctx.portrait(member, 96) {
                                    img src=(src) alt=(member.name) width="48" height="48";
                                }
                                @match member.slug() {
                                    Some(slug) => { a href=(detail_href("people", slug)) { (member.name) } }
                                    None => { (member.name) }
                                }
                                @if let Some(p) = &member.position { " · " span.position { (p) } }
                            }
                        }
                    }
                }
            }
            @if !project.resources.is_empty() {
                section.resources {
                    h2 { "Resources" }
                    ul {
                        @for resource in &project.resources {
                            @let title = resource.title.as_deref().unwrap_or("Resource");
                            li {
                                @match &resource.file_url {
                                    Some(url) => { a href=(url) target="_blank" rel="noopener noreferrer" { (title) } }
                                    None => { (title) }
                                }
                            }
                        }
                    }
                }
            }
            @if let Some(url) = &project.original_url {
                p { a href=(url) target="_blank" rel="noopener noreferrer" { "View original" } }
            }
            p { a href="/projects" { "All projects" } }
        }
    };
    layout(ctx, Some(project.title.as_str()), project.description.as_deref(), body)
}

// ── News ──────────────────────────────────────────────────────────────────────

fn news_card(ctx: &Ctx, post: &NewsPost, short: bool) -> Markup {
    let href = post.slug().map(|s| detail_href("news", s));
    let image = ctx
        .content
        .image(post.main_image.as_ref())
        .and_then(|i| i.width(600).quality(90).auto_format().url());
    let date = post.published_at.as_deref().map(|d| {
        if short { format::short_date(d, ctx.zone) } else { format::long_date(d, ctx.zone) }
    });
    html! {
        article.news-card {
            a href=[href.as_deref()] {
                @if let Some(src) = image { img src=(src) alt=(post.title) loading="lazy"; }
                h3 { (post.title) }
            }
            @if let Some(date) = date { time datetime=[post.published_at.as_deref()] { (date) } }
            @if !short {
                @if let Some(excerpt) = &post.excerpt { p.excerpt { (excerpt) } }
            }
        }
    }
}

pub fn news_index(ctx: &Ctx, posts: &[NewsPost]) -> Markup {
    let body = html! {
        h1 { "News" }
        @if posts.is_empty() {
            p.empty { "No news yet. Check back soon." }
        } @else {
            div.grid {
                @for post in posts { (news_card(ctx, post, false)) }
            }
        }
    };
    layout(ctx, Some("News"), Some("Latest news from the Center for Developing Leadership in Science."), body)
}

pub fn news_detail(ctx: &Ctx, post: &NewsPost) -> Markup {
    let body = html! {
        article.news {
            header {
                h1 { (post.title) }
                p.meta {
                    @if let Some(d) = &post.published_at {
                        time datetime=(d) { (format::long_date(d, ctx.zone)) }
                    }
                    @if let Some(author) = &post.author { " · " span.author { (author) } }
                }
                @if let Some(src) = ctx.hero(post.main_image.as_ref()) {
                    img.hero src=(src) alt=(post.title);
                }
            }
            section.body {
                @if let Some(blocks) = post.body.as_deref().filter(|b| !b.is_empty()) {
                    (richtext::render(blocks, ctx.content))
                } @else {
                    p.empty { "Content coming soon." }
                }
            }
            @if let Some(url) = &post.original_url {
                p { a href=(url) target="_blank" rel="noopener noreferrer" { "Read the original article" } }
            }
            p { a href="/news" { "All news" } }
        }
    };
    let description = post
        .excerpt
        .as_deref()
        .unwrap_or("News from the Center for Developing Leadership in Science.");
    layout(ctx, Some(post.title.as_str()), Some(description), body)
}

// ── Events ────────────────────────────────────────────────────────────────────

fn event_card(ctx: &Ctx, event: &Event, past: bool) -> Markup {
    let href = event.slug().map(|s| detail_href("events", s));
    let image = ctx
        .content
        .image(event.main_image.as_ref())
        .and_then(|i| i.width(800).quality(90).fit(Fit::Crop).auto_format().url());
    html! {
        article.event-card.past[past] {
            a href=[href.as_deref()] {
                @if let Some(src) = image {
                    img src=(src) alt=(event.title) loading="lazy";
                } @else {
                    div.placeholder {}
                }
                h3 { (event.title) }
            }
            p.meta {
                time datetime=(event.start_date_time) {
                    (format::event_dates(&event.start_date_time, event.end_date_time.as_deref(), ctx.zone))
                }
                " · "
                span.event-type { (event.type_label()) }
            }
        }
    }
}

pub fn events_index(ctx: &Ctx, upcoming: &[Event], past: &[Event], calendar: Option<Markup>) -> Markup {
    let body = html! {
        h1 { "Events" }
        @if let Some(widget) = calendar { (widget) }
        @if upcoming.is_empty() && past.is_empty() {
            p.empty { "No events yet. Check back soon." }
        }
        @if !upcoming.is_empty() {
            section.upcoming {
                h2 { "Upcoming" }
                div.grid { @for event in upcoming { (event_card(ctx, event, false)) } }
            }
        }
        @if !past.is_empty() {
            section.past {
                h2 { "Past Events" }
                div.grid { @for event in past { (event_card(ctx, event, true)) } }
            }
        }
    };
    layout(
        ctx,
        Some("Events"),
        Some("Upcoming and past events from the Center for Developing Leadership in Science."),
        body,
    )
}

pub fn event_detail(ctx: &Ctx, event: &Event) -> Markup {
    let locations: Vec<String> = event
        .locations
        .iter()
        .filter_map(|l| match (&l.name, &l.address) {
            (Some(n), Some(a)) => Some(format!("{n} ({a})")),
            (Some(n), None) => Some(n.clone()),
            (None, Some(a)) => Some(a.clone()),
            (None, None) => None,
        })
        .collect();

    let body = html! {
        article.event {
            header {
                h1 { (event.title) }
                div.badges {
                    @if event.event_type.is_some() { span.badge { (event.type_label()) } }
                    @if let Some(program) = &event.program { span.badge { (program) } }
                }
                @if let Some(src) = ctx.hero(event.main_image.as_ref()) {
                    img.hero src=(src) alt=(event.title);
                }
            }
            dl.when-where {
                dt { "When" }
                dd { (format::event_when(&event.start_date_time, event.end_date_time.as_deref(), ctx.zone)) }
                @if !locations.is_empty() {
                    dt { "Where" }
                    dd { (locations.join(" · ")) }
                }
            }
            @if let Some(url) = &event.registration_url {
                p { a.register href=(url) target="_blank" rel="noopener noreferrer" { "Register for this Event" } }
            }
            section.body {
                @if let Some(blocks) = event.body.as_deref().filter(|b| !b.is_empty()) {
                    (richtext::render(blocks, ctx.content))
                } @else if let Some(d) = &event.description {
                    p { (d) }
                } @else {
                    p.empty { "Details coming soon." }
                }
            }
            p { a href="/events" { "All events" } }
        }
    };
    let description = event
        .description
        .as_deref()
        .unwrap_or("An event from the Center for Developing Leadership in Science.");
    layout(ctx, Some(event.title.as_str()), Some(description), body)
}

/// Link to the events page showing `view`'s month and selection.
pub fn calendar_href(view: &CalendarView) -> String {
    let cursor = view.cursor();
    let mut href = format!("/events?year={}&month={}", cursor.year, cursor.month0 + 1);
    if let Some(date) = view.selected() {
        href.push_str("&date=");
        href.push_str(date);
    }
    href.push_str("#calendar");
    href
}

/// The month grid. Rendered inside the events page and on its own for
/// `/events/calendar`.
pub fn calendar_widget(
    view: &CalendarView,
    by_date: &BTreeMap<String, Vec<RemoteEvent>>,
    feed: &CalendarFeed,
    zone: Zone,
) -> Markup {
    let mut prev = view.clone();
    prev.prev_month();
    let mut next = view.clone();
    next.next_month();

    let selected_label = view
        .selected()
        .and_then(|key| NaiveDate::parse_from_str(key, "%Y-%m-%d").ok())
        .map(|d| d.format("%A, %B %-d").to_string());

    html! {
        section.calendar id="calendar" {
            header {
                h2 { (view.cursor().label()) }
                nav {
                    a.prev href=(calendar_href(&prev)) aria-label="Previous month" { "‹" }
                    " "
                    a.next href=(calendar_href(&next)) aria-label="Next month" { "›" }
                }
            }
            @match feed {
                CalendarFeed::Failed(_) => {
                    p.calendar-error { "Events could not be loaded for this month." }
                }
                CalendarFeed::Loaded(events) if events.is_empty() => {
                    p.calendar-empty { "No events this month." }
                }
                _ => {}
            }
            div.days.weekdays {
                @for name in WEEKDAY_NAMES { div.weekday { (name) } }
            }
            div.days {
                @for cell in view.cells(by_date) {
                    @match cell {
                        Cell::Blank => { div.cell.blank {} }
                        Cell::Day(day) => {
                            @let toggled = { let mut v = view.clone(); v.select(&day.key); v };
                            a.cell.today[day.is_today].selected[day.is_selected].has-events[day.event_count > 0]
                                href=(calendar_href(&toggled)) {
                                span.day { (day.day) }
                                @for title in &day.titles { span.event-title { (title) } }
                                @if day.more > 0 { span.more { "+" (day.more) " more" } }
                            }
                        }
                    }
                }
            }
            @if let Some(label) = selected_label {
                div.selected-events {
                    h3 { (label) }
                    @let events = view.selected_events(by_date);
                    @if events.is_empty() {
                        p { "No events this day." }
                    } @else {
                        ul {
                            @for event in events {
                                li {
                                    strong { (event.summary) }
                                    @if let Some(start) = zone.time_label(&event.start) {
                                        br;
                                        (start)
                                        @if let Some(end) = zone.time_label(&event.end) { " – " (end) }
                                    }
                                    @if let Some(location) = &event.location {
                                        br;
                                        span.location { (location) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ── Links ─────────────────────────────────────────────────────────────────────

/// `/{section}/{slug}` with the slug percent-encoded as a single path segment.
pub fn detail_href(section: &str, slug: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return format!("/{section}");
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().extend([section, slug]);
    }
    url.path().to_string()
}

// ── Contact ───────────────────────────────────────────────────────────────────

pub fn contact(ctx: &Ctx) -> Markup {
    let body = html! {
        h1 { "Contact Us" }
        p { "We'd love to hear from you. Reach out to learn more about our work or explore partnership opportunities." }
        section.contact {
            h2 { "Get in Touch" }
            h3 { "Email" }
            p { a href="mailto:cdls@ucla.edu" { "cdls@ucla.edu" } }
            h3 { "Location" }
            p {
                "UCLA Institute of the Environment and Sustainability" br;
                "La Kretz Hall, Suite 300" br;
                "Los Angeles, CA 90095"
            }
        }
    };
    layout(ctx, Some("Contact"), Some("Get in touch with the Center for Developing Leadership in Science."), body)
}
