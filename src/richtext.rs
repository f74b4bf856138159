//! Rich text: the content store's block document format rendered to HTML.
//!
//! A document is a flat list of blocks. Text blocks carry styled spans; list
//! membership is a per-block attribute (`listItem` + `level`), so consecutive
//! list blocks are regrouped into `<ul>`/`<ol>` trees here. Embedded images go
//! through the content client's image URL builder.

use maud::{Markup, PreEscaped, html};
use serde::Deserialize;
use tracing::debug;

use crate::content::{ContentClient, Image};

/// Width of images embedded in body text.
pub const INLINE_IMAGE_WIDTH: u32 = 800;

// ── Document model ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "_type")]
pub enum Block {
    #[serde(rename = "block")]
    Text(TextBlock),
    #[serde(rename = "image")]
    Image(Image),
    #[serde(rename = "customHtml")]
    CustomHtml(CustomHtml),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub children: Vec<Span>,
    #[serde(default)]
    pub mark_defs: Vec<MarkDef>,
    #[serde(default)]
    pub list_item: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
}

impl TextBlock {
    fn level(&self) -> u32 {
        self.level.unwrap_or(1).max(1)
    }

    fn list_kind(&self) -> ListKind {
        match self.list_item.as_deref() {
            Some("number") => ListKind::Number,
            _ => ListKind::Bullet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

/// Annotation referenced from a span's `marks` by key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CustomHtml {
    #[serde(default)]
    pub html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Number,
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render a document. Unknown block types are skipped.
pub fn render(blocks: &[Block], content: &ContentClient) -> Markup {
    let mut parts: Vec<Markup> = Vec::with_capacity(blocks.len());
    let mut i = 0;
    while i < blocks.len() {
        match &blocks[i] {
            Block::Text(block) if block.list_item.is_some() => {
                let mut run = Vec::new();
                while let Some(Block::Text(item)) = blocks.get(i) {
                    if item.list_item.is_none() {
                        break;
                    }
                    run.push(item);
                    i += 1;
                }
                parts.push(render_list_run(&run));
                continue;
            }
            Block::Text(block) => parts.push(render_text_block(block)),
            Block::Image(image) => {
                if let Some(markup) = render_image(image, content) {
                    parts.push(markup);
                }
            }
            Block::CustomHtml(custom) => parts.push(PreEscaped(custom.html.clone())),
            Block::Unknown => debug!("skipping unknown rich text block"),
        }
        i += 1;
    }
    html! { @for part in &parts { (part) } }
}

fn render_text_block(block: &TextBlock) -> Markup {
    let inner = render_spans(block);
    match block.style.as_deref().unwrap_or("normal") {
        "h2" => html! { h2 { (inner) } },
        "h3" => html! { h3 { (inner) } },
        "h4" => html! { h4 { (inner) } },
        "blockquote" => html! { blockquote { (inner) } },
        _ => html! { p { (inner) } },
    }
}

/// Consecutive list blocks become sibling lists, split where the list kind
/// changes at the shallowest level; deeper items nest under the item before.
fn render_list_run(items: &[&TextBlock]) -> Markup {
    let base = items.iter().map(|b| b.level()).min().unwrap_or(1);
    let mut lists: Vec<(ListKind, Vec<(&TextBlock, Vec<&TextBlock>)>)> = Vec::new();

    for &item in items {
        if item.level() > base {
            if let Some((_, entries)) = lists.last_mut() {
                if let Some((_, children)) = entries.last_mut() {
                    children.push(item);
                    continue;
                }
            }
        }
        let kind = item.list_kind();
        match lists.last_mut() {
            Some((current, entries)) if *current == kind => entries.push((item, Vec::new())),
            _ => lists.push((kind, vec![(item, Vec::new())])),
        }
    }

    html! {
        @for (kind, entries) in &lists {
            @let body = html! {
                @for (item, children) in entries {
                    li {
                        (render_spans(item))
                        @if !children.is_empty() {
                            (render_list_run(children))
                        }
                    }
                }
            };
            @match kind {
                ListKind::Bullet => { ul { (body) } }
                ListKind::Number => { ol { (body) } }
            }
        }
    }
}

fn render_spans(block: &TextBlock) -> Markup {
    html! {
        @for span in &block.children {
            (render_marked(&span.marks, &span.text, &block.mark_defs))
        }
    }
}

fn render_marked(marks: &[String], text: &str, defs: &[MarkDef]) -> Markup {
    let Some((mark, rest)) = marks.split_first() else {
        return render_text(text);
    };
    let inner = render_marked(rest, text, defs);
    match mark.as_str() {
        "strong" => html! { strong { (inner) } },
        "em" => html! { em { (inner) } },
        "code" => html! { code { (inner) } },
        "underline" => html! { span style="text-decoration: underline" { (inner) } },
        "strike-through" => html! { del { (inner) } },
        key => match defs.iter().find(|d| d.key == key) {
            Some(def) if def.kind == "link" => match def.href.as_deref().filter(|h| is_safe_href(h)) {
                Some(href) => html! {
                    a href=(href) target="_blank" rel="noopener noreferrer" { (inner) }
                },
                None => inner,
            },
            _ => {
                debug!(mark = key, "unknown rich text mark");
                inner
            }
        },
    }
}

/// Text with soft line breaks turned into `<br>`.
fn render_text(text: &str) -> Markup {
    html! {
        @for (n, line) in text.split('\n').enumerate() {
            @if n > 0 { br; }
            (line)
        }
    }
}

fn render_image(image: &Image, content: &ContentClient) -> Option<Markup> {
    let src = content
        .image(Some(image))?
        .width(INLINE_IMAGE_WIDTH)
        .url()?;
    Some(html! {
        figure class="rich-image" {
            img src=(src) alt=(image.alt.as_deref().unwrap_or("")) width=(INLINE_IMAGE_WIDTH) loading="lazy";
        }
    })
}

/// Rejects `javascript:` and other script-capable schemes.
fn is_safe_href(href: &str) -> bool {
    let lower = href.trim().to_ascii_lowercase();
    match lower.split_once(':') {
        Some((scheme, _)) if !scheme.contains('/') => {
            matches!(scheme, "http" | "https" | "mailto" | "tel")
        }
        _ => true,
    }
}
