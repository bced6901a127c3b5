//! Tera rendering engine: [`FlyerStyle`] and [`Renderer`].
//!
//! # Template naming
//!
//! Each flyer template lives at `<template id>/flyer.html.tera`; partials
//! live under `shared/`. Builtin styles:
//!
//! | Style   | Template name              | Placeholders            |
//! |---------|----------------------------|-------------------------|
//! | Modern  | `modern/flyer.html.tera`   | declared (9 fields)     |
//! | Classic | `classic/flyer.html.tera`  | none (default schema)   |
//!
//! A user template directory may override any of these or add new
//! `<id>/flyer.html.tera` files. Every `.tera` file is HTML-autoescaped;
//! image sources are further limited to web URLs by the context builder.
//! Escaping does not make arbitrary attribute values safe, so user templates
//! should not place field values in URL or script positions.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tera::Tera;

use flyer_core::{GenerationRequest, Template, TemplateId, TrustedMarkup};

use crate::context::FlyerContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates, baked in via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("shared/_head.tera", include_str!("templates/_partials/head.tera")),
    ("shared/_highlights.tera", include_str!("templates/_partials/highlights.tera")),
    ("shared/_images.tera", include_str!("templates/_partials/images.tera")),
    ("shared/_extra.tera", include_str!("templates/_partials/extra.tera")),
    ("modern/flyer.html.tera", include_str!("templates/modern.html.tera")),
    ("classic/flyer.html.tera", include_str!("templates/classic.html.tera")),
];

const FLYER_SUFFIX: &str = "/flyer.html.tera";

const MODERN_PLACEHOLDERS: &[&str] = &[
    "Image_Hero",
    "Property_Description",
    "Property_Highlights_line-1",
    "Property_Highlights_line-2",
    "Property_Highlights_line-3",
    "Property_Location",
    "Agent_Name",
    "CTA",
    "Image_1",
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn flyer_template_name(id: &TemplateId) -> String {
    format!("{}{FLYER_SUFFIX}", id.to_string().to_lowercase())
}

/// Tera name for a file under the user template directory: its relative
/// path, lowercased, `/`-separated. `None` for anything but `.tera` files.
fn user_template_name(dir: &Path, path: &Path) -> Option<String> {
    if path.extension()? != "tera" {
        return None;
    }
    let rel = path.strip_prefix(dir).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
        .collect();
    Some(parts.join("/"))
}

/// Every `.tera` file under `dir`, keyed by template name. A missing
/// directory contributes nothing.
fn user_templates(dir: &Path) -> Result<BTreeMap<String, String>, RenderError> {
    let mut found = BTreeMap::new();
    if !dir.is_dir() {
        return Ok(found);
    }
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current)
            .map_err(|source| RenderError::Io { path: current.clone(), source })?;
        for entry in entries {
            let path = entry
                .map_err(|source| RenderError::Io { path: current.clone(), source })?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if let Some(name) = user_template_name(dir, &path) {
                let body = std::fs::read_to_string(&path)
                    .map_err(|source| RenderError::Io { path: path.clone(), source })?;
                found.insert(name, body);
            }
        }
    }
    Ok(found)
}

/// Builtin templates, overlaid by same-named user templates.
fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut sources: BTreeMap<String, String> = TPLS
        .iter()
        .map(|(name, body)| (name.to_string(), body.to_string()))
        .collect();
    if let Some(dir) = user_template_dir {
        sources.extend(user_templates(dir)?);
    }

    let mut tera = Tera::default();
    tera.autoescape_on(vec![".tera"]);
    tera.add_raw_templates(sources)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// FlyerStyle
// ---------------------------------------------------------------------------

/// Builtin flyer styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlyerStyle {
    Modern,
    Classic,
}

impl FlyerStyle {
    /// All builtin styles in catalog order.
    pub fn all() -> &'static [FlyerStyle] {
        &[FlyerStyle::Modern, FlyerStyle::Classic]
    }

    pub fn id(&self) -> &'static str {
        match self {
            FlyerStyle::Modern => "modern",
            FlyerStyle::Classic => "classic",
        }
    }

    pub fn from_id(id: &TemplateId) -> Option<Self> {
        Self::all().iter().copied().find(|s| id.as_str() == Some(s.id()))
    }

    /// Catalog entry describing this style.
    pub fn template(&self) -> Template {
        match self {
            FlyerStyle::Modern => Template::new(self.id(), "Modern")
                .with_description("Hero image, bold headline, three highlights")
                .with_placeholders(MODERN_PLACEHOLDERS.iter().copied()),
            // No declared placeholders: callers fall back to the default schema.
            FlyerStyle::Classic => Template::new(self.id(), "Classic")
                .with_description("Single column listing with gallery"),
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering flyers with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded
/// defaults or add new `<id>/flyer.html.tera` templates.
/// Template names are normalised to lowercase and relative paths.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading embedded templates plus any
    /// overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Ids of every renderable flyer template, sorted.
    pub fn template_ids(&self) -> Vec<TemplateId> {
        self.tera
            .get_template_names()
            .filter_map(|name| name.strip_suffix(FLYER_SUFFIX))
            .map(TemplateId::from)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn has_template(&self, id: &TemplateId) -> bool {
        let name = flyer_template_name(id);
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render the flyer for `ctx.template.id`.
    pub fn render(&self, ctx: &FlyerContext) -> Result<TrustedMarkup, RenderError> {
        let id = TemplateId::from(ctx.template.id.as_str());
        if !self.has_template(&id) {
            return Err(RenderError::UnknownTemplate(id));
        }
        let tera_ctx = ctx.to_tera_context()?;
        let html = self.tera.render(&flyer_template_name(&id), &tera_ctx)?;
        Ok(TrustedMarkup::from_escaped(html.replace("\r\n", "\n")))
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Local rendering backend: catalog of renderable templates plus rendering.
///
/// Create once with [`Renderer::new`] and reuse.
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    /// Construct a new [`Renderer`] with embedded templates only.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_template_dir(None)
    }

    /// Construct a [`Renderer`] that also loads `.tera` files from `dir`.
    pub fn with_template_dir(dir: Option<&Path>) -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(dir)? })
    }

    /// Builtin styles first, then user-supplied templates (no declared
    /// placeholders, named after their id).
    pub fn catalog(&self) -> Vec<Template> {
        let mut templates: Vec<Template> =
            FlyerStyle::all().iter().map(FlyerStyle::template).collect();
        for id in self.engine.template_ids() {
            if FlyerStyle::from_id(&id).is_none() {
                let name = id.to_string();
                templates.push(Template::new(id, name));
            }
        }
        templates
    }

    /// Render `request` to markup.
    pub fn render(&self, request: &GenerationRequest) -> Result<TrustedMarkup, RenderError> {
        let name = self
            .catalog()
            .into_iter()
            .find(|t| t.id == request.template_id)
            .map(|t| t.name)
            .unwrap_or_else(|| request.template_id.to_string());
        let ctx = FlyerContext::from_request(request, &name);
        self.render_with_context(&ctx)
    }

    /// Render using a caller-provided [`FlyerContext`].
    pub fn render_with_context(&self, ctx: &FlyerContext) -> Result<TrustedMarkup, RenderError> {
        self.engine.render(ctx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
