//! Platform endpoint URLs
//!
//! All endpoints live under `/organizations/{orgId}` relative to the
//! configured API root.

use crate::error::{Error, Result};
use url::Url;

/// URL builder for one organization's endpoints
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    organization_id: u64,
}

impl Endpoints {
    /// Create endpoints for an organization under an API root
    pub fn new(base: Url, organization_id: u64) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "baseUrl",
                format!("{base} cannot carry a path"),
            ));
        }
        Ok(Self {
            base,
            organization_id,
        })
    }

    /// The organization these endpoints address
    pub fn organization_id(&self) -> u64 {
        self.organization_id
    }

    /// `POST .../report_center/reports/{reportId}/schedules/create_snapshot`
    pub fn create_snapshot(&self, report_id: u64) -> Url {
        self.report_url(report_id, &["schedules", "create_snapshot"])
    }

    /// `GET .../report_center/reports/{reportId}/schedules/snapshots/{snapshotId}`
    pub fn snapshot(&self, report_id: u64, snapshot_id: &str) -> Url {
        self.report_url(report_id, &["schedules", "snapshots", snapshot_id])
    }

    /// `GET .../campaign_stats`
    pub fn campaign_stats(&self) -> Url {
        self.organization_url(&["campaign_stats"])
    }

    fn report_url(&self, report_id: u64, tail: &[&str]) -> Url {
        let report_id = report_id.to_string();
        let mut segments = vec!["report_center", "reports", report_id.as_str()];
        segments.extend_from_slice(tail);
        self.organization_url(&segments)
    }

    fn organization_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        let organization = self.organization_id.to_string();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push("organizations")
                .push(&organization)
                .extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod endpoint_tests {
    use super::*;

    fn endpoints(base: &str) -> Endpoints {
        Endpoints::new(Url::parse(base).unwrap(), 4321).unwrap()
    }

    #[test]
    fn test_create_snapshot_url() {
        let url = endpoints("https://app.simpli.fi/api").create_snapshot(728558);
        assert_eq!(
            url.as_str(),
            "https://app.simpli.fi/api/organizations/4321/report_center/reports/728558/schedules/create_snapshot"
        );
    }

    #[test]
    fn test_snapshot_url_with_trailing_slash_base() {
        let url = endpoints("https://app.simpli.fi/api/").snapshot(728558, "991");
        assert_eq!(
            url.as_str(),
            "https://app.simpli.fi/api/organizations/4321/report_center/reports/728558/schedules/snapshots/991"
        );
    }

    #[test]
    fn test_campaign_stats_url() {
        let url = endpoints("http://localhost:8080/api").campaign_stats();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/organizations/4321/campaign_stats"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        let url = Url::parse("mailto:ops@example.com").unwrap();
        assert!(Endpoints::new(url, 1).is_err());
    }
}
