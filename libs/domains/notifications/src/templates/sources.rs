//! Handlebars sources for the built-in layouts and templates.
//!
//! Edition-dependent content lives in separate constants; [`base_layout`] and
//! [`welcome_html`] pick one when the engine is built.

use core_config::Edition;

/// Postmark's unsubscribe merge tag, substituted by the provider at send time.
pub const UNSUBSCRIBE_PLACEHOLDER: &str = "{{{ pm:unsubscribe }}}";

macro_rules! enterprise_contact_message {
    () => {
        "Your usage exceeds our standard plans, so please reply back to this email for a tailored quote."
    };
}

/// Fixed sentence replacing a plan suggestion when usage is above every tier.
pub const ENTERPRISE_CONTACT_MESSAGE: &str = enterprise_contact_message!();

/// Greeting used when the recipient's name is unknown.
pub const NEUTRAL_GREETING: &str = "Hey there,";

pub fn base_layout(edition: Edition) -> &'static str {
    match edition {
        Edition::Cloud => BASE_LAYOUT_CLOUD,
        Edition::Community => BASE_LAYOUT_COMMUNITY,
    }
}

pub fn welcome_html(edition: Edition) -> &'static str {
    match edition {
        Edition::Cloud => WELCOME_HTML_CLOUD,
        Edition::Community => WELCOME_HTML_COMMUNITY,
    }
}

// ============================================================================
// Layouts
// ============================================================================

const BASE_LAYOUT_CLOUD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{product_name}}</title>
</head>
<body style="margin: 0; padding: 24px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #18181b; line-height: 1.6;">
  <p>{{greeting}}</p>
  {{{body}}}
  <p>Have a question or feedback? Reply to this email and it goes straight to our team.</p>
  <p>Thanks,<br>The {{product_name}} Team</p>
  <p style="color: #71717a; font-size: 12px; border-top: 1px solid #e4e4e7; padding-top: 16px;">
    <a href="{{home_url}}" style="color: #2563eb; text-decoration: none;">{{product_name}}</a>
  </p>
  <p style="color: #a1a1aa; font-size: 11px;">Don't want to receive these emails? {{{unsubscribe_placeholder}}}</p>
</body>
</html>"#;

const BASE_LAYOUT_COMMUNITY: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{product_name}}</title>
</head>
<body style="margin: 0; padding: 24px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #18181b; line-height: 1.6;">
  <p>{{greeting}}</p>
  {{{body}}}
  <p>Thanks,<br>The {{product_name}} Team</p>
  <p style="color: #71717a; font-size: 12px; border-top: 1px solid #e4e4e7; padding-top: 16px;">
    <a href="{{home_url}}" style="color: #2563eb; text-decoration: none;">{{product_name}}</a>
  </p>
</body>
</html>"#;

// ============================================================================
// Partials
// ============================================================================

pub const SUGGESTED_PLAN_PARTIAL: &str = concat!(
    "{{#if suggested_plan.enterprise}}\n<p>",
    enterprise_contact_message!(),
    "</p>\n{{else}}{{#if suggested_plan.volume}}\n",
    r#"<p>Based on that, we recommend the {{suggested_plan.volume}}/mo plan. You can upgrade from <a href="{{billing_url}}">your billing page</a>.</p>"#,
    "\n{{/if}}{{/if}}"
);

// ============================================================================
// Templates
// ============================================================================

pub const WELCOME_SUBJECT: &str = "Welcome to {{{product_name}}}";

const WELCOME_HTML_CLOUD: &str = r#"<p>Welcome to {{product_name}}! Add your first site and paste the tracking snippet, and your stats will start showing up within minutes.</p>
<p>Your 30-day free trial starts today. No credit card is needed, and you can pick a plan from <a href="{{billing_url}}">your billing page</a> any time before it ends.</p>"#;

const WELCOME_HTML_COMMUNITY: &str = r#"<p>Welcome to {{product_name}}! Add your first site and paste the tracking snippet, and your stats will start showing up within minutes.</p>
<p>You are running the self-hosted Community Edition, so there is no trial and no subscription to manage.</p>"#;

pub const ACTIVATION_SUBJECT: &str = "{{{code}}} is your {{{product_name}}} email verification code";

pub const ACTIVATION_HTML: &str = r#"<p>Enter <b>{{code}}</b> to verify your email address. This code expires in 4 hours.</p>"#;

pub const PASSWORD_RESET_SUBJECT: &str = "Reset your {{{product_name}}} password";

pub const PASSWORD_RESET_HTML: &str = r#"<p>Someone asked to reset the password for your account. Follow the link below to choose a new one:</p>
<p><a href="{{reset_link}}">{{reset_link}}</a></p>
<p>If you didn't ask for this, you can safely ignore this email.</p>"#;

pub const TRIAL_REMINDER_SUBJECT: &str = "Your {{{product_name}}} trial expires next week";

pub const TRIAL_REMINDER_HTML: &str = r#"<p>Your free trial ends in a week. To keep your dashboards running, pick a plan from <a href="{{billing_url}}">your billing page</a>.</p>"#;

pub const TRIAL_UPGRADE_SUBJECT: &str = "Your {{{product_name}}} trial ends soon";

pub const TRIAL_UPGRADE_HTML: &str = r#"<p>Thanks for trying out {{product_name}}! Your free trial is about to end.</p>
<p>In the last 30 days you used {{number usage.total}} billable pageviews{{#if usage.custom_events}}, including {{number usage.custom_events}} custom events{{/if}}.</p>
{{> suggested_plan}}"#;

pub const OVER_LIMIT_SUBJECT: &str = "[Action required] You have outgrown your {{{product_name}}} subscription tier";

pub const OVER_LIMIT_HTML: &str = r#"<p>Your sites went over the pageview limit of your subscription for two billing cycles in a row.</p>
<p>Last cycle ({{last_cycle.label}}) you used {{number last_cycle.total}} billable pageviews. The cycle before ({{penultimate_cycle.label}}) you used {{number penultimate_cycle.total}}.</p>
{{> suggested_plan}}
<p>Your stats keep recording for now, but we'll lock the dashboard if the plan isn't upgraded.</p>"#;

pub const DASHBOARD_LOCKED_SUBJECT: &str = "[Action required] Your {{{product_name}}} dashboard is now locked";

pub const DASHBOARD_LOCKED_HTML: &str = r#"<p>We've locked your dashboards because usage stayed over your subscription limit.</p>
<p>Last cycle ({{last_cycle.label}}) you used {{number last_cycle.total}} billable pageviews. The cycle before ({{penultimate_cycle.label}}) you used {{number penultimate_cycle.total}}.</p>
{{> suggested_plan}}
<p>We're still counting visitors, so no data is lost while the dashboard is locked.</p>"#;

pub const YEARLY_RENEWAL_SUBJECT: &str = "Your {{{product_name}}} subscription is up for renewal";

pub const YEARLY_RENEWAL_HTML: &str = r#"<p>Your yearly subscription renews on {{renewal_date}}, and you'll be charged {{amount}}.</p>
<p>You can review or change your plan on <a href="{{billing_url}}">your billing page</a>.</p>"#;
