//! Data models for the notifications domain.

use crate::format;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the layout applied when none is chosen explicitly.
pub const BASE_LAYOUT: &str = "base";

/// Provider parameter carrying the delivery stream tag.
pub const MESSAGE_STREAM_PARAM: &str = "MessageStream";

/// Provider parameter disabling open tracking.
pub const TRACK_OPENS_PARAM: &str = "TrackOpens";

// ============================================================================
// Composed email
// ============================================================================

/// Provider-side routing for an email.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStream {
    /// Regular transactional stream.
    #[default]
    Default,
    /// Priority stream for mail the user is actively waiting on (codes, resets).
    Priority,
}

impl DeliveryStream {
    /// Value sent to the provider, if the stream needs an explicit tag.
    pub fn provider_tag(&self) -> Option<&'static str> {
        match self {
            DeliveryStream::Default => None,
            DeliveryStream::Priority => Some("priority"),
        }
    }
}

impl fmt::Display for DeliveryStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStream::Default => write!(f, "default"),
            DeliveryStream::Priority => write!(f, "priority"),
        }
    }
}

/// A fully rendered email, ready to hand to a delivery client.
///
/// Contains nothing random or time-dependent: rendering the same input twice
/// yields equal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    /// Sender address.
    pub from: String,
    /// Recipient address, if already known.
    pub to: Option<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body, wrapped in the layout unless the layout was disabled.
    pub html_body: String,
    /// Delivery stream chosen when the composer was created.
    pub stream: DeliveryStream,
    /// Provider parameters (`MessageStream`, `TrackOpens`).
    pub params: BTreeMap<String, String>,
}

impl Email {
    /// The `MessageStream` parameter, present only for non-default streams.
    pub fn message_stream(&self) -> Option<&str> {
        self.params.get(MESSAGE_STREAM_PARAM).map(String::as_str)
    }
}

/// Which layout wraps the rendered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// `None` disables wrapping entirely.
    pub layout: Option<String>,
}

impl LayoutConfig {
    /// No layout: the body is returned exactly as the template rendered it.
    pub fn none() -> Self {
        Self { layout: None }
    }

    /// A specific registered layout.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            layout: Some(name.into()),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::named(BASE_LAYOUT)
    }
}

// ============================================================================
// Template data
// ============================================================================

/// Recipient as seen by templates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// First word of the user's name, `None` for a blank name.
    pub fn first_name(&self) -> Option<&str> {
        first_name(&self.name)
    }
}

/// First whitespace-separated word of `full_name`.
pub fn first_name(full_name: &str) -> Option<&str> {
    full_name.split_whitespace().next()
}

/// Pageview usage over one billing cycle.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UsageCycle {
    label: String,
    pageviews: u64,
    custom_events: u64,
    total: u64,
}

impl UsageCycle {
    /// `label` is the already formatted date range of the cycle.
    pub fn new(label: impl Into<String>, pageviews: u64, custom_events: u64) -> Self {
        Self {
            label: label.into(),
            pageviews,
            custom_events,
            total: pageviews.saturating_add(custom_events),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pageviews(&self) -> u64 {
        self.pageviews
    }

    pub fn custom_events(&self) -> u64 {
        self.custom_events
    }

    /// Billable total: pageviews plus custom events.
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Plan recommended to a user based on their usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestedPlan {
    /// Usage is above every standard tier; the user should contact sales.
    Enterprise,
    /// A standard tier with the given monthly pageview limit.
    Tier { monthly_pageviews: u64 },
}

impl SuggestedPlan {
    pub fn tier(monthly_pageviews: u64) -> Self {
        SuggestedPlan::Tier { monthly_pageviews }
    }

    pub fn is_enterprise(&self) -> bool {
        matches!(self, SuggestedPlan::Enterprise)
    }

    /// Volume label shown in emails (`100k`), `None` for enterprise.
    pub fn volume(&self) -> Option<String> {
        match self {
            SuggestedPlan::Enterprise => None,
            SuggestedPlan::Tier { monthly_pageviews } => {
                Some(format::compact_volume(*monthly_pageviews))
            }
        }
    }
}

impl Serialize for SuggestedPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct PlanView {
            enterprise: bool,
            volume: Option<String>,
        }

        PlanView {
            enterprise: self.is_enterprise(),
            volume: self.volume(),
        }
        .serialize(serializer)
    }
}

/// Billing currency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

/// An amount in minor units (cents), rendered as `$1,234.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    pub minor_units: u64,
    pub currency: Currency,
}

impl Money {
    pub fn new(minor_units: u64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{:02}",
            self.currency.symbol(),
            format::thousands(self.minor_units / 100),
            self.minor_units % 100
        )
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
