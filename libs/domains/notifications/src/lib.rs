//! Notifications Domain
//!
//! Composes the transactional emails the application sends: picks a layout and
//! delivery stream, renders a named template against its context, and stamps
//! the provider metadata. Delivery itself happens elsewhere.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │     Mailer      │  ← config + template engine, built once
//! └────────┬────────┘
//!          │ base_email / priority_email
//! ┌────────▼────────┐
//! │ ComposerHandle  │  ← stream and layout fixed here
//! └────────┬────────┘
//!          │ render / render_template
//! ┌────────▼────────┐
//! │ TemplateEngine  │  ← body, subject, then layout
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │      Email      │  ← handed to a delivery client
//! └─────────────────┘
//! ```
//!
//! # Editions
//!
//! Trial messaging, the reply invitation, and the unsubscribe placeholder only
//! exist in the hosted edition. The self-hosted build is selected with the
//! `community` cargo feature; there is no runtime switch.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_notifications::{LayoutConfig, Mailer, MailerConfig, User, WelcomeEmail};
//!
//! let mailer = Mailer::new(MailerConfig::default())?;
//! let email = mailer
//!     .base_email(LayoutConfig::default())
//!     .to("jane@example.com")
//!     .render_template(&WelcomeEmail { user: Some(User::new("Jane Doe", "jane@example.com")) })?;
//! ```

pub mod composer;
pub mod config;
pub mod error;
pub mod format;
pub mod links;
pub mod models;
pub mod templates;

// Re-export commonly used types
pub use composer::{ComposerHandle, Mailer};
pub use config::MailerConfig;
pub use error::{NotificationError, NotificationResult};
pub use links::{LinkBuilder, SiteLinks};
pub use models::{
    BASE_LAYOUT, Currency, DeliveryStream, Email, LayoutConfig, Money, SuggestedPlan, UsageCycle,
    User,
};
pub use templates::context::{
    ActivationEmail, DashboardLockedEmail, EmailTemplate, OverLimitEmail, PasswordResetEmail,
    TrialReminderEmail, TrialUpgradeEmail, WelcomeEmail, YearlyRenewalEmail,
};
pub use templates::{Template, TemplateEngine};
