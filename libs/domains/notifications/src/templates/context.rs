//! Typed contexts for the built-in templates.
//!
//! Each struct serializes to exactly the keys its template reads, so a missing
//! field is a compile error instead of an empty spot in the email.

use crate::models::{Money, SuggestedPlan, UsageCycle, User};
use serde::Serialize;

/// A template context bound to a registered template name.
pub trait EmailTemplate: Serialize {
    /// Name the template is registered under.
    const NAME: &'static str;
}

#[derive(Debug, Clone, Serialize)]
pub struct WelcomeEmail {
    pub user: Option<User>,
}

impl EmailTemplate for WelcomeEmail {
    const NAME: &'static str = "welcome";
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivationEmail {
    pub user: Option<User>,
    pub code: String,
}

impl EmailTemplate for ActivationEmail {
    const NAME: &'static str = "activation";
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetEmail {
    pub reset_link: String,
}

impl EmailTemplate for PasswordResetEmail {
    const NAME: &'static str = "password_reset";
}

#[derive(Debug, Clone, Serialize)]
pub struct TrialReminderEmail {
    pub user: Option<User>,
}

impl EmailTemplate for TrialReminderEmail {
    const NAME: &'static str = "trial_one_week_reminder";
}

#[derive(Debug, Clone, Serialize)]
pub struct TrialUpgradeEmail {
    pub user: Option<User>,
    pub usage: UsageCycle,
    pub suggested_plan: SuggestedPlan,
}

impl EmailTemplate for TrialUpgradeEmail {
    const NAME: &'static str = "trial_upgrade";
}

#[derive(Debug, Clone, Serialize)]
pub struct OverLimitEmail {
    pub user: Option<User>,
    pub last_cycle: UsageCycle,
    pub penultimate_cycle: UsageCycle,
    pub suggested_plan: SuggestedPlan,
}

impl EmailTemplate for OverLimitEmail {
    const NAME: &'static str = "over_limit";
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardLockedEmail {
    pub user: Option<User>,
    pub last_cycle: UsageCycle,
    pub penultimate_cycle: UsageCycle,
    pub suggested_plan: SuggestedPlan,
}

impl EmailTemplate for DashboardLockedEmail {
    const NAME: &'static str = "dashboard_locked";
}

#[derive(Debug, Clone, Serialize)]
pub struct YearlyRenewalEmail {
    pub user: Option<User>,
    /// Already formatted renewal date.
    pub renewal_date: String,
    pub amount: Money,
}

impl EmailTemplate for YearlyRenewalEmail {
    const NAME: &'static str = "yearly_renewal";
}
