//! Image URL construction for stored image assets.
//!
//! A stored asset reference looks like `image-<id>-<W>x<H>-<ext>`. The CDN
//! serves transformed renditions at
//! `https://cdn.sanity.io/images/<project>/<dataset>/<id>-<W>x<H>.<ext>?…`.
//! The image's crop and hotspot are folded into a pixel `rect` parameter so
//! that fixed-aspect renditions keep the editor's chosen focus.

use super::types::{Crop, Hotspot, Image};

const CDN_BASE: &str = "https://cdn.sanity.io";

/// How the rendition fits the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    Clip,
    Crop,
    Fill,
    FillMax,
    Max,
    Scale,
    Min,
}

impl Fit {
    fn as_str(&self) -> &'static str {
        match self {
            Fit::Clip => "clip",
            Fit::Crop => "crop",
            Fit::Fill => "fill",
            Fit::FillMax => "fillmax",
            Fit::Max => "max",
            Fit::Scale => "scale",
            Fit::Min => "min",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Jpg,
    Png,
    Webp,
}

impl Format {
    fn as_str(&self) -> &'static str {
        match self {
            Format::Jpg => "jpg",
            Format::Png => "png",
            Format::Webp => "webp",
        }
    }
}

/// Builds rendition URLs for one project/dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self { project_id: project_id.into(), dataset: dataset.into() }
    }

    /// Start a rendition of `image`.
    pub fn image<'a>(&'a self, image: &'a Image) -> ImageUrl<'a> {
        ImageUrl {
            builder: self,
            image,
            width: None,
            height: None,
            fit: None,
            quality: None,
            format: None,
            auto_format: false,
        }
    }
}

/// A rendition under construction. Finish with [`ImageUrl::url`].
#[derive(Debug, Clone)]
pub struct ImageUrl<'a> {
    builder: &'a ImageUrlBuilder,
    image: &'a Image,
    width: Option<u32>,
    height: Option<u32>,
    fit: Option<Fit>,
    quality: Option<u8>,
    format: Option<Format>,
    auto_format: bool,
}

impl ImageUrl<'_> {
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn fit(mut self, fit: Fit) -> Self {
        self.fit = Some(fit);
        self
    }

    /// JPEG/WebP quality, clamped to 0–100.
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality.min(100));
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Let the CDN pick the best format the client accepts.
    pub fn auto_format(mut self) -> Self {
        self.auto_format = true;
        self
    }

    /// Final URL, or `None` when the image has no usable asset reference.
    pub fn url(&self) -> Option<String> {
        let asset = AssetId::parse(self.image.asset_ref()?)?;

        let crop = crop_rect(&asset, &self.image.crop.unwrap_or_default());
        let hotspot = hotspot_rect(&asset, &self.image.hotspot.unwrap_or_default());
        let rect = match (self.width, self.height) {
            (Some(w), Some(h)) => fit_rect(crop, hotspot, w, h),
            _ => crop,
        };

        let mut params = Vec::new();
        if rect.is_effective(&asset) {
            params.push(format!("rect={},{},{},{}", rect.left, rect.top, rect.width, rect.height));
        }
        if let Some(w) = self.width {
            params.push(format!("w={w}"));
        }
        if let Some(h) = self.height {
            params.push(format!("h={h}"));
        }
        if let Some(fm) = self.format {
            params.push(format!("fm={}", fm.as_str()));
        }
        if let Some(q) = self.quality {
            params.push(format!("q={q}"));
        }
        if let Some(fit) = self.fit {
            params.push(format!("fit={}", fit.as_str()));
        }
        if self.auto_format {
            params.push("auto=format".to_string());
        }

        let base = format!(
            "{CDN_BASE}/images/{}/{}/{}-{}x{}.{}",
            self.builder.project_id, self.builder.dataset, asset.id, asset.width, asset.height, asset.ext
        );
        if params.is_empty() {
            Some(base)
        } else {
            Some(format!("{base}?{}", params.join("&")))
        }
    }
}

// ── Asset geometry ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
struct AssetId<'a> {
    id: &'a str,
    width: i64,
    height: i64,
    ext: &'a str,
}

impl<'a> AssetId<'a> {
    /// Parse `image-<id>-<W>x<H>-<ext>`.
    fn parse(reference: &'a str) -> Option<Self> {
        let mut parts = reference.split('-');
        if parts.next()? != "image" {
            return None;
        }
        let id = parts.next()?;
        let (w, h) = parts.next()?.split_once('x')?;
        let ext = parts.next()?;
        if parts.next().is_some() || id.is_empty() || ext.is_empty() {
            return None;
        }
        let width: i64 = w.parse().ok()?;
        let height: i64 = h.parse().ok()?;
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Self { id, width, height, ext })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    left: i64,
    top: i64,
    width: i64,
    height: i64,
}

impl Rect {
    /// Only worth sending when it cuts something off.
    fn is_effective(&self, asset: &AssetId) -> bool {
        self.left != 0 || self.top != 0 || self.width != asset.width || self.height != asset.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

fn crop_rect(asset: &AssetId, crop: &Crop) -> Rect {
    let w = asset.width as f64;
    let h = asset.height as f64;
    let left = (crop.left * w).round() as i64;
    let top = (crop.top * h).round() as i64;
    Rect {
        left,
        top,
        width: (w - crop.right * w - left as f64).round() as i64,
        height: (h - crop.bottom * h - top as f64).round() as i64,
    }
}

fn hotspot_rect(asset: &AssetId, hotspot: &Hotspot) -> Bounds {
    let w = asset.width as f64;
    let h = asset.height as f64;
    let rx = hotspot.width * w / 2.0;
    let ry = hotspot.height * h / 2.0;
    let cx = hotspot.x * w;
    let cy = hotspot.y * h;
    Bounds { left: cx - rx, top: cy - ry, right: cx + rx, bottom: cy + ry }
}

/// Narrow `crop` to the `width:height` aspect ratio, centred on the hotspot
/// and kept inside the crop.
fn fit_rect(crop: Rect, hotspot: Bounds, width: u32, height: u32) -> Rect {
    if width == 0 || height == 0 || crop.width <= 0 || crop.height <= 0 {
        return crop;
    }
    let desired = width as f64 / height as f64;
    let actual = crop.width as f64 / crop.height as f64;

    if actual > desired {
        // Wider than wanted: cut from the sides.
        let h = crop.height;
        let w = (h as f64 * desired).round() as i64;
        let top = crop.top.max(0);
        let centre = ((hotspot.right - hotspot.left) / 2.0 + hotspot.left).round() as i64;
        let mut left = (centre as f64 - w as f64 / 2.0).round().max(0.0) as i64;
        if left < crop.left {
            left = crop.left;
        } else if left + w > crop.left + crop.width {
            left = crop.left + crop.width - w;
        }
        Rect { left, top, width: w, height: h }
    } else {
        // Taller than wanted: cut from top and bottom.
        let w = crop.width;
        let h = (w as f64 / desired).round() as i64;
        let left = crop.left.max(0);
        let centre = ((hotspot.bottom - hotspot.top) / 2.0 + hotspot.top).round() as i64;
        let mut top = (centre as f64 - h as f64 / 2.0).round().max(0.0) as i64;
        if top < crop.top {
            top = crop.top;
        } else if top + h > crop.top + crop.height {
            top = crop.top + crop.height - h;
        }
        Rect { left, top, width: w, height: h }
    }
}
