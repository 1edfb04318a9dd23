//! Email template rendering engine.
//!
//! Handlebars-based registry of body templates, subjects, and layouts. The
//! edition-specific sources are chosen once, when the engine is created.

pub mod context;
pub mod sources;

use crate::error::{NotificationError, NotificationResult};
use crate::format;
use crate::models::BASE_LAYOUT;
use core_config::Edition;
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub use context::EmailTemplate;

/// Body template definition.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub subject: String,
    pub html: String,
}

impl Template {
    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            html: html.into(),
        }
    }
}

/// Rendered subject and body, before any layout is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub subject: String,
    pub html: String,
}

/// Template engine for rendering email templates.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    templates: BTreeMap<String, Template>,
    layouts: BTreeSet<String>,
    edition: Edition,
}

impl TemplateEngine {
    /// Create an engine with the built-in templates for the compiled edition.
    pub fn new() -> NotificationResult<Self> {
        Self::for_edition(Edition::BUILD)
    }

    fn for_edition(edition: Edition) -> NotificationResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_helper("number", Box::new(number_helper));
        handlebars
            .register_partial("suggested_plan", sources::SUGGESTED_PLAN_PARTIAL)
            .map_err(|e| {
                NotificationError::TemplateError(format!(
                    "Failed to register suggested_plan: {}",
                    e
                ))
            })?;

        let mut engine = Self {
            handlebars,
            templates: BTreeMap::new(),
            layouts: BTreeSet::new(),
            edition,
        };

        engine.register_layout(BASE_LAYOUT, sources::base_layout(edition))?;
        engine.register_defaults()?;

        Ok(engine)
    }

    /// Edition whose content variants this engine holds.
    pub fn edition(&self) -> Edition {
        self.edition
    }

    /// Register a body template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) -> NotificationResult<()> {
        self.handlebars
            .register_template_string(&subject_key(&template.name), &template.subject)
            .map_err(|e| {
                NotificationError::TemplateError(format!(
                    "Failed to register {} subject: {}",
                    template.name, e
                ))
            })?;
        self.handlebars
            .register_template_string(&html_key(&template.name), &template.html)
            .map_err(|e| {
                NotificationError::TemplateError(format!(
                    "Failed to register {} body: {}",
                    template.name, e
                ))
            })?;

        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Register a layout. The rendered body is available to it as `{{{body}}}`.
    pub fn register_layout(&mut self, name: &str, source: &str) -> NotificationResult<()> {
        self.handlebars
            .register_template_string(&layout_key(name), source)
            .map_err(|e| {
                NotificationError::TemplateError(format!(
                    "Failed to register layout {}: {}",
                    name, e
                ))
            })?;

        self.layouts.insert(name.to_string());
        Ok(())
    }

    /// Render the subject and body of a template by name.
    pub fn render(&self, name: &str, data: &Value) -> NotificationResult<RenderedTemplate> {
        if !self.has_template(name) {
            return Err(NotificationError::UnknownTemplate(name.to_string()));
        }

        debug!(template = name, "Rendering email template");

        let subject = self.handlebars.render(&subject_key(name), data)?;
        let html = self.handlebars.render(&html_key(name), data)?;

        Ok(RenderedTemplate {
            subject: subject.trim().to_string(),
            html,
        })
    }

    /// Render a layout by name around data that already carries `body`.
    pub fn render_layout(&self, name: &str, data: &Value) -> NotificationResult<String> {
        if !self.has_layout(name) {
            return Err(NotificationError::UnknownLayout(name.to_string()));
        }

        Ok(self.handlebars.render(&layout_key(name), data)?)
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn has_layout(&self, name: &str) -> bool {
        self.layouts.contains(name)
    }

    /// Registered template names, sorted.
    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    fn register_defaults(&mut self) -> NotificationResult<()> {
        use crate::templates::context::*;

        let defaults = [
            Template::new(
                WelcomeEmail::NAME,
                sources::WELCOME_SUBJECT,
                sources::welcome_html(self.edition),
            ),
            Template::new(
                ActivationEmail::NAME,
                sources::ACTIVATION_SUBJECT,
                sources::ACTIVATION_HTML,
            ),
            Template::new(
                PasswordResetEmail::NAME,
                sources::PASSWORD_RESET_SUBJECT,
                sources::PASSWORD_RESET_HTML,
            ),
            Template::new(
                TrialReminderEmail::NAME,
                sources::TRIAL_REMINDER_SUBJECT,
                sources::TRIAL_REMINDER_HTML,
            ),
            Template::new(
                TrialUpgradeEmail::NAME,
                sources::TRIAL_UPGRADE_SUBJECT,
                sources::TRIAL_UPGRADE_HTML,
            ),
            Template::new(
                OverLimitEmail::NAME,
                sources::OVER_LIMIT_SUBJECT,
                sources::OVER_LIMIT_HTML,
            ),
            Template::new(
                DashboardLockedEmail::NAME,
                sources::DASHBOARD_LOCKED_SUBJECT,
                sources::DASHBOARD_LOCKED_HTML,
            ),
            Template::new(
                YearlyRenewalEmail::NAME,
                sources::YEARLY_RENEWAL_SUBJECT,
                sources::YEARLY_RENEWAL_HTML,
            ),
        ];

        for template in defaults {
            self.register(template)?;
        }

        Ok(())
    }
}

fn subject_key(name: &str) -> String {
    format!("{}_subject", name)
}

fn html_key(name: &str) -> String {
    format!("{}_html", name)
}

fn layout_key(name: &str) -> String {
    format!("layout_{}", name)
}

/// `{{number value}}`: integer with thousands separators.
///
/// Missing or non-numeric values render as nothing.
fn number_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let formatted = match h.param(0).map(|p| p.value()) {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                Some(format::thousands(v))
            } else if let Some(v) = n.as_i64() {
                Some(format::thousands_signed(v))
            } else {
                n.as_f64().map(|v| format::thousands_signed(v.round() as i64))
            }
        }
        Some(Value::String(s)) => s.trim().parse::<u64>().ok().map(format::thousands),
        _ => None,
    };

    if let Some(formatted) = formatted {
        out.write(&formatted)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_engine_creation() {
        let engine = TemplateEngine::new().unwrap();
        assert_eq!(engine.edition(), Edition::BUILD);
        assert!(engine.has_layout(BASE_LAYOUT));
        assert_eq!(
            engine.list_templates(),
            vec![
                "activation",
                "dashboard_locked",
                "over_limit",
                "password_reset",
                "trial_one_week_reminder",
                "trial_upgrade",
                "welcome",
                "yearly_renewal",
            ]
        );
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("nope", &json!({})).unwrap_err();
        assert!(matches!(err, NotificationError::UnknownTemplate(name) if name == "nope"));
    }

    #[test]
    fn test_unknown_layout_is_an_error() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render_layout("fancy", &json!({})).unwrap_err();
        assert!(matches!(err, NotificationError::UnknownLayout(_)));
    }

    #[test]
    fn test_number_helper_formats_and_degrades() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register(Template::new(
                "count",
                "n",
                "[{{number a}}|{{number b}}|{{number c}}|{{number d}}]",
            ))
            .unwrap();

        let rendered = engine
            .render("count", &json!({"a": 1234567, "b": -2500, "c": "9000"}))
            .unwrap();
        assert_eq!(rendered.html, "[1,234,567|-2,500|9,000|]");
    }

    #[test]
    fn test_custom_template() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register(Template::new("custom", "Custom: {{{title}}}", "<p>{{content}}</p>"))
            .unwrap();

        let rendered = engine
            .render("custom", &json!({"title": "Q&A", "content": "Hello World"}))
            .unwrap();
        assert_eq!(rendered.subject, "Custom: Q&A");
        assert_eq!(rendered.html, "<p>Hello World</p>");
    }

    #[test]
    fn test_invalid_template_source_is_rejected() {
        let mut engine = TemplateEngine::new().unwrap();
        let result = engine.register(Template::new("broken", "ok", "{{#if x}}never closed"));
        assert!(matches!(result, Err(NotificationError::TemplateError(_))));
        assert!(!engine.has_template("broken"));
    }

    #[test]
    fn test_layout_variant_matches_edition() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine
            .render_layout(
                BASE_LAYOUT,
                &json!({
                    "body": "<p>inner</p>",
                    "greeting": "Hey there,",
                    "unsubscribe_placeholder": sources::UNSUBSCRIBE_PLACEHOLDER,
                }),
            )
            .unwrap();

        assert!(html.contains("<p>inner</p>"));
        if Edition::BUILD.is_cloud() {
            assert!(html.contains(sources::UNSUBSCRIBE_PLACEHOLDER));
            assert!(html.contains("Reply to this email"));
        } else {
            assert!(!html.contains("pm:unsubscribe"));
            assert!(!html.contains("Reply to this email"));
        }
    }

    #[test]
    fn test_each_edition_variant_compiles() {
        for edition in [Edition::Cloud, Edition::Community] {
            let engine = TemplateEngine::for_edition(edition).unwrap();
            assert_eq!(engine.edition(), edition);
            let welcome = engine.render("welcome", &json!({"product_name": "Zerg"})).unwrap();
            assert_eq!(welcome.subject, "Welcome to Zerg");
        }
    }
}
