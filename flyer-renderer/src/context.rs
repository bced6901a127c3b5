//! Template context: serializable rendering payload built from a
//! [`GenerationRequest`].
//!
//! Placeholder names are not valid tera identifiers (`Property_Highlights_line-1`),
//! so well-known fields are lifted into named slots and everything else lands
//! in `extra` in payload order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flyer_core::{FieldDescriptor, GenerationRequest};

use crate::error::RenderError;

const DESCRIPTION: &str = "Property_Description";
const LOCATION: &str = "Property_Location";
const TAKEAWAY: &str = "Take_away_Text";
const CTA: &str = "CTA";
const HIGHLIGHT_PREFIX: &str = "Property_Highlights_line-";

/// Flat + structured rendering payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlyerContext {
    pub template: TemplateCtx,
    pub description: Option<String>,
    pub location: Option<String>,
    pub takeaway: Option<String>,
    pub cta: Option<String>,
    /// Non-empty highlight lines, in payload order.
    pub highlights: Vec<String>,
    /// Every image slot in the payload, set or not.
    pub images: Vec<ImageCtx>,
    /// Non-empty fields without a dedicated slot.
    pub extra: Vec<FieldCtx>,
    pub meta: MetaCtx,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateCtx {
    pub id: String,
    pub name: String,
}

/// An image slot; `url` is `None` when the user left it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCtx {
    pub name: String,
    pub label: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldCtx {
    pub name: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaCtx {
    pub flyer_version: String,
    pub generated_at: DateTime<Utc>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Image sources are limited to `http`, `https`, and scheme-less (relative)
/// URLs. Anything else, `javascript:` included, leaves the slot empty.
fn image_url(value: &str) -> Option<String> {
    let url = value.trim();
    let scheme = url
        .split_once(':')
        .map(|(scheme, _)| scheme)
        .filter(|scheme| !scheme.contains('/'));
    match scheme {
        Some(scheme)
            if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") =>
        {
            None
        }
        _ => non_empty(url),
    }
}

impl FlyerContext {
    /// Build a [`FlyerContext`] for `request`, titled `template_name`.
    pub fn from_request(request: &GenerationRequest, template_name: &str) -> Self {
        let mut ctx = FlyerContext {
            template: TemplateCtx {
                id: request.template_id.to_string(),
                name: template_name.to_string(),
            },
            description: None,
            location: None,
            takeaway: None,
            cta: None,
            highlights: Vec::new(),
            images: Vec::new(),
            extra: Vec::new(),
            meta: MetaCtx {
                flyer_version: env!("CARGO_PKG_VERSION").to_string(),
                generated_at: Utc::now(),
            },
        };

        for (name, value) in request.params.iter() {
            let field = FieldDescriptor::new(name);
            if field.is_image() {
                ctx.images.push(ImageCtx {
                    label: field.label(),
                    name: field.name,
                    url: image_url(value),
                });
                continue;
            }
            match name {
                DESCRIPTION => ctx.description = non_empty(value),
                LOCATION => ctx.location = non_empty(value),
                TAKEAWAY => ctx.takeaway = non_empty(value),
                CTA => ctx.cta = non_empty(value),
                _ if name.starts_with(HIGHLIGHT_PREFIX) => {
                    ctx.highlights.extend(non_empty(value));
                }
                _ => {
                    if let Some(value) = non_empty(value) {
                        ctx.extra.push(FieldCtx {
                            label: field.label(),
                            name: field.name,
                            value,
                        });
                    }
                }
            }
        }
        ctx
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyer_core::{payload, FieldState, SchemaResolver, Template};

    fn request(entries: &[(&str, &str)]) -> GenerationRequest {
        let tpl = Template::new("classic", "Classic");
        let schema = SchemaResolver::default().resolve(&tpl);
        let state: FieldState = entries.iter().copied().collect();
        GenerationRequest {
            template_id: tpl.id,
            params: payload::build(&schema, &state),
        }
    }

    #[test]
    fn slots_are_populated() {
        let ctx = FlyerContext::from_request(
            &request(&[
                ("Property_Description", "Lake house"),
                ("Property_Highlights_line-2", "Dock"),
                ("Property_Highlights_line-1", ""),
                ("CTA", "Call now"),
                ("Image_2", "https://img/2.png"),
            ]),
            "Classic",
        );
        assert_eq!(ctx.description.as_deref(), Some("Lake house"));
        assert_eq!(ctx.highlights, ["Dock"]);
        assert_eq!(ctx.cta.as_deref(), Some("Call now"));
        assert!(ctx.location.is_none());
        assert_eq!(ctx.images.len(), 3, "all image slots are forwarded");
        assert_eq!(ctx.images[0].url, None);
        assert_eq!(ctx.images[1].url.as_deref(), Some("https://img/2.png"));
        assert_eq!(ctx.images[1].label, "Image 2");
    }

    #[test]
    fn unknown_fields_go_to_extra() {
        let tpl = Template::new("modern", "Modern").with_placeholders(["Agent_Name", "Image_Hero"]);
        let schema = SchemaResolver::default().resolve(&tpl);
        let state: FieldState = [("Agent_Name", "Kari Nordmann")].into_iter().collect();
        let req = GenerationRequest {
            template_id: tpl.id,
            params: payload::build(&schema, &state),
        };
        let ctx = FlyerContext::from_request(&req, "Modern");
        assert_eq!(ctx.extra.len(), 1);
        assert_eq!(ctx.extra[0].label, "Agent Name");
        assert_eq!(ctx.images[0].name, "Image_Hero");
    }

    #[test]
    fn image_urls_are_limited_to_web_schemes() {
        let ctx = FlyerContext::from_request(
            &request(&[
                ("Image_1", "javascript:alert(1)"),
                ("Image_2", "HTTPS://img/2.png"),
                ("Image_3", "photos/lake:view.png"),
            ]),
            "Classic",
        );
        assert_eq!(ctx.images[0].url, None);
        assert_eq!(ctx.images[1].url.as_deref(), Some("HTTPS://img/2.png"));
        assert_eq!(ctx.images[2].url.as_deref(), Some("photos/lake:view.png"));

        let data = FlyerContext::from_request(&request(&[("Image_1", " data:text/html,x")]), "C");
        assert_eq!(data.images[0].url, None);
    }

    #[test]
    fn to_tera_context_succeeds() {
        let ctx = FlyerContext::from_request(&request(&[]), "Classic");
        let _ = ctx.to_tera_context().expect("context conversion");
    }
}
