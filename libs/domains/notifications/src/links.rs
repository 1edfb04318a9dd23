//! Links placed into emails.

/// Builds the absolute URLs emails point to.
#[cfg_attr(test, mockall::automock)]
pub trait LinkBuilder: Send + Sync {
    /// Canonical product homepage, used by the layout footer.
    fn home_url(&self) -> String;

    /// Page where a user manages their subscription.
    fn billing_url(&self) -> String;

    /// Account settings page.
    fn settings_url(&self) -> String;
}

/// Links relative to the product's public base URL.
#[derive(Debug, Clone)]
pub struct SiteLinks {
    base_url: String,
}

impl SiteLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn path(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl LinkBuilder for SiteLinks {
    fn home_url(&self) -> String {
        self.base_url.clone()
    }

    fn billing_url(&self) -> String {
        self.path("/settings/billing/subscription")
    }

    fn settings_url(&self) -> String {
        self.path("/settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_links_strip_trailing_slash() {
        let links = SiteLinks::new("https://zerg.dev/");
        assert_eq!(links.home_url(), "https://zerg.dev");
        assert_eq!(links.billing_url(), "https://zerg.dev/settings/billing/subscription");
        assert_eq!(links.settings_url(), "https://zerg.dev/settings");
    }
}
