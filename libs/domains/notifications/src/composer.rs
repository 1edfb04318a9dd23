//! Email composer.
//!
//! A [`Mailer`] is built once at startup and shared. Each email starts from
//! [`Mailer::base_email`] or [`Mailer::priority_email`], which fix the delivery
//! stream and layout, and is finished by rendering a named template.
//!
//! ```rust,ignore
//! let mailer = Mailer::new(MailerConfig::from_env()?)?;
//!
//! let email = mailer
//!     .priority_email(LayoutConfig::default())
//!     .to("jane@example.com")
//!     .render_template(&ActivationEmail { user: Some(user), code: "123456".into() })?;
//! ```

use crate::config::MailerConfig;
use crate::error::NotificationResult;
use crate::links::{LinkBuilder, SiteLinks};
use crate::models::{
    DeliveryStream, Email, LayoutConfig, MESSAGE_STREAM_PARAM, TRACK_OPENS_PARAM, first_name,
};
use crate::templates::sources::{NEUTRAL_GREETING, UNSUBSCRIBE_PLACEHOLDER};
use crate::templates::{EmailTemplate, TemplateEngine};
use core_config::Edition;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared entry point for composing emails.
#[derive(Clone)]
pub struct Mailer {
    inner: Arc<MailerInner>,
}

struct MailerInner {
    config: MailerConfig,
    engine: TemplateEngine,
    links: Arc<dyn LinkBuilder>,
}

impl Mailer {
    /// Validate the config and build the template engine for the compiled edition.
    pub fn new(config: MailerConfig) -> NotificationResult<Self> {
        let links = SiteLinks::new(config.base_url.clone());
        Self::with_links(config, Arc::new(links))
    }

    /// Like [`Mailer::new`] with a custom link builder.
    pub fn with_links(
        config: MailerConfig,
        links: Arc<dyn LinkBuilder>,
    ) -> NotificationResult<Self> {
        let engine = TemplateEngine::new()?;
        Self::with_engine(config, engine, links)
    }

    /// Use a prepared engine, e.g. one with extra templates registered.
    pub fn with_engine(
        config: MailerConfig,
        engine: TemplateEngine,
        links: Arc<dyn LinkBuilder>,
    ) -> NotificationResult<Self> {
        config.validate()?;

        info!(
            edition = %engine.edition(),
            templates = engine.list_templates().len(),
            "Mailer ready"
        );

        Ok(Self {
            inner: Arc::new(MailerInner {
                config,
                engine,
                links,
            }),
        })
    }

    /// Start an email on the default stream.
    pub fn base_email(&self, layout: LayoutConfig) -> ComposerHandle {
        self.compose(layout, DeliveryStream::Default)
    }

    /// Start an email on the priority stream.
    pub fn priority_email(&self, layout: LayoutConfig) -> ComposerHandle {
        self.compose(layout, DeliveryStream::Priority)
    }

    pub fn edition(&self) -> Edition {
        self.inner.engine.edition()
    }

    pub fn config(&self) -> &MailerConfig {
        &self.inner.config
    }

    pub fn templates(&self) -> Vec<&str> {
        self.inner.engine.list_templates()
    }

    fn compose(&self, layout: LayoutConfig, stream: DeliveryStream) -> ComposerHandle {
        ComposerHandle {
            mailer: self.clone(),
            layout,
            stream,
            to: None,
        }
    }
}

/// An email whose stream and layout are fixed, waiting for a template.
#[derive(Clone)]
pub struct ComposerHandle {
    mailer: Mailer,
    layout: LayoutConfig,
    stream: DeliveryStream,
    to: Option<String>,
}

impl ComposerHandle {
    /// Set the recipient.
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to = Some(address.into());
        self
    }

    pub fn stream(&self) -> DeliveryStream {
        self.stream
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Render a typed template.
    pub fn render_template<T: EmailTemplate>(&self, template: &T) -> NotificationResult<Email> {
        let context = serde_json::to_value(template)?;
        self.render(T::NAME, &context)
    }

    /// Render a template by name with an open context object.
    ///
    /// Fields the template reads but the context lacks render as empty. An
    /// unknown template or layout name is an error.
    pub fn render(&self, template: &str, context: &Value) -> NotificationResult<Email> {
        let inner = &self.mailer.inner;

        debug!(
            template,
            stream = %self.stream,
            layout = ?self.layout.layout,
            "Composing email"
        );

        let mut data = match context {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => {
                warn!(template, kind = value_kind(other), "Ignoring non-object email context");
                Map::new()
            }
        };

        fill_default(&mut data, "product_name", || inner.config.product_name.clone());
        fill_default(&mut data, "billing_url", || inner.links.billing_url());
        fill_default(&mut data, "settings_url", || inner.links.settings_url());

        let first = greeting_name(&data).map(str::to_string);
        let greeting = greeting_for(&data);
        let mut data = Value::Object(data);
        let rendered = inner.engine.render(template, &data)?;

        let html_body = match &self.layout.layout {
            None => rendered.html,
            Some(layout) => {
                if let Value::Object(map) = &mut data {
                    map.insert("body".to_string(), Value::String(rendered.html));
                    map.insert("home_url".to_string(), Value::String(inner.links.home_url()));
                    map.insert("greeting".to_string(), Value::String(greeting));
                    if let Some(name) = first {
                        map.insert("greeting_name".to_string(), Value::String(name));
                    }
                    map.insert(
                        "unsubscribe_placeholder".to_string(),
                        Value::String(UNSUBSCRIBE_PLACEHOLDER.to_string()),
                    );
                }
                inner.engine.render_layout(layout, &data)?
            }
        };

        let mut params = BTreeMap::new();
        params.insert(TRACK_OPENS_PARAM.to_string(), "false".to_string());
        if let Some(tag) = self.stream.provider_tag() {
            params.insert(MESSAGE_STREAM_PARAM.to_string(), tag.to_string());
        }

        Ok(Email {
            from: inner.config.from.clone(),
            to: self.to.clone(),
            subject: rendered.subject,
            html_body,
            stream: self.stream,
            params,
        })
    }
}

/// Insert `key` unless the context already holds a non-null value for it.
fn fill_default(data: &mut Map<String, Value>, key: &str, default: impl FnOnce() -> String) {
    match data.get(key) {
        None | Some(Value::Null) => {
            data.insert(key.to_string(), Value::String(default()));
        }
        Some(_) => {}
    }
}

/// First word of `user.name`, if there is one.
fn greeting_name(data: &Map<String, Value>) -> Option<&str> {
    data.get("user")
        .and_then(|user| user.get("name"))
        .and_then(Value::as_str)
        .and_then(first_name)
}

/// `Hey Jane,` from `user.name`, or the neutral greeting.
fn greeting_for(data: &Map<String, Value>) -> String {
    greeting_name(data)
        .map(|name| format!("Hey {},", name))
        .unwrap_or_else(|| NEUTRAL_GREETING.to_string())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::MockLinkBuilder;
    use serde_json::json;

    fn mock_links() -> Arc<dyn LinkBuilder> {
        let mut links = MockLinkBuilder::new();
        links
            .expect_home_url()
            .return_const("https://mock.test".to_string());
        links
            .expect_billing_url()
            .return_const("https://mock.test/billing".to_string());
        links
            .expect_settings_url()
            .return_const("https://mock.test/settings".to_string());
        Arc::new(links)
    }

    fn mailer() -> Mailer {
        Mailer::with_links(MailerConfig::default(), mock_links()).unwrap()
    }

    #[test]
    fn test_links_come_from_link_builder() {
        let email = mailer()
            .base_email(LayoutConfig::default())
            .render("trial_one_week_reminder", &json!({}))
            .unwrap();

        assert!(email.html_body.contains(r#"href="https://mock.test/billing""#));
        assert!(email.html_body.contains(r#"href="https://mock.test""#));
    }

    #[test]
    fn test_caller_context_wins_over_defaults() {
        let email = mailer()
            .base_email(LayoutConfig::none())
            .render(
                "trial_one_week_reminder",
                &json!({"billing_url": "https://other.test/pay"}),
            )
            .unwrap();

        assert!(email.html_body.contains("https://other.test/pay"));
        assert!(!email.html_body.contains("mock.test"));
    }

    #[test]
    fn test_non_object_context_degrades_to_empty() {
        let email = mailer()
            .base_email(LayoutConfig::default())
            .render("welcome", &json!(["not", "a", "map"]))
            .unwrap();

        assert!(email.html_body.contains(NEUTRAL_GREETING));
    }

    #[test]
    fn test_greeting_uses_first_name() {
        let data = json!({"user": {"name": "Ada Lovelace"}});
        let Value::Object(map) = data else { unreachable!() };
        assert_eq!(greeting_for(&map), "Hey Ada,");
    }

    #[test]
    fn test_greeting_falls_back_when_name_missing_or_blank() {
        for data in [
            json!({}),
            json!({"user": null}),
            json!({"user": {"name": " "}}),
            json!({"user": {"email": "a@b.c"}}),
        ] {
            let Value::Object(map) = data else { unreachable!() };
            assert_eq!(greeting_for(&map), NEUTRAL_GREETING);
        }
    }

    #[test]
    fn test_null_defaults_are_filled() {
        let mut data = Map::new();
        data.insert("billing_url".to_string(), Value::Null);
        data.insert("settings_url".to_string(), json!("https://kept.test"));

        fill_default(&mut data, "billing_url", || "https://mock.test/billing".to_string());
        fill_default(&mut data, "settings_url", || "https://mock.test/settings".to_string());

        assert_eq!(data["billing_url"], "https://mock.test/billing");
        assert_eq!(data["settings_url"], "https://kept.test");
    }

    #[test]
    fn test_handle_keeps_stream_and_layout() {
        let mailer = mailer();
        assert_eq!(mailer.config().product_name, "Zerg");

        let base = mailer.base_email(LayoutConfig::none());
        assert_eq!(base.stream(), DeliveryStream::Default);
        assert_eq!(base.layout(), &LayoutConfig::none());

        let priority = mailer.priority_email(LayoutConfig::default()).to("jane@example.com");
        assert_eq!(priority.stream(), DeliveryStream::Priority);
        assert_eq!(priority.layout(), &LayoutConfig::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = MailerConfig {
            base_url: "ftp://zerg.dev".to_string(),
            ..MailerConfig::default()
        };
        assert!(Mailer::with_links(config, mock_links()).is_err());
    }
}
