use serde::{Deserialize, Serialize};

use crate::state::is_build_relevant;

/// Application identifier as issued by the distribution platform (e.g. "1234567890").
pub type AppId = String;

/// One monitored application, supplied once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationDescriptor {
    pub id: AppId,
    pub name: String,
    pub webhook_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl ApplicationDescriptor {
    /// Console page for this app, used as the notification deep link.
    pub fn console_url(&self) -> String {
        format!("https://appstoreconnect.apple.com/apps/{}/appstore", self.id)
    }
}

/// Last observed review/release status of one application.
///
/// Identity for change detection is `(lifecycle_state, version_string)` only;
/// the remaining fields are context shown alongside a real change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    pub lifecycle_state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    pub version_string: String,
    pub release_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
}

impl StatusRecord {
    pub fn new(
        lifecycle_state: impl Into<String>,
        version_string: impl Into<String>,
        release_mode: impl Into<String>,
    ) -> Self {
        Self {
            lifecycle_state: lifecycle_state.into(),
            submitted_at: None,
            version_string: version_string.into(),
            release_mode: release_mode.into(),
            build_number: None,
        }
    }

    pub fn with_submitted_at(mut self, submitted_at: impl Into<String>) -> Self {
        self.submitted_at = Some(submitted_at.into());
        self
    }

    /// Attach a build number. Dropped unless the current state is build-relevant.
    pub fn with_build(mut self, build_number: impl Into<String>) -> Self {
        if is_build_relevant(&self.lifecycle_state) {
            self.build_number = Some(build_number.into());
        }
        self
    }

    /// True when state or version differ. Release mode, submission time and
    /// build number are ignored.
    pub fn differs_from(&self, other: &StatusRecord) -> bool {
        self.lifecycle_state != other.lifecycle_state || self.version_string != other.version_string
    }

    /// Version as shown to humans: `"1.2.0 (45)"` for build-relevant states,
    /// plain `"1.2.0"` otherwise.
    pub fn display_version(&self) -> String {
        if is_build_relevant(&self.lifecycle_state) {
            let build = self.build_number.as_deref().unwrap_or("");
            format!("{} ({})", self.version_string, build)
        } else {
            self.version_string.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let rec = StatusRecord::new("IN_REVIEW", "1.2.0", "MANUAL")
            .with_submitted_at("2026-01-02T03:04:05Z")
            .with_build("45");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["lifecycleState"], "IN_REVIEW");
        assert_eq!(json["versionString"], "1.2.0");
        assert_eq!(json["releaseMode"], "MANUAL");
        assert_eq!(json["submittedAt"], "2026-01-02T03:04:05Z");
        assert_eq!(json["buildNumber"], "45");
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let rec: StatusRecord = serde_json::from_str(
            r#"{"lifecycleState":"ACCEPTED","versionString":"2.0","releaseMode":"AFTER_APPROVAL"}"#,
        )
        .unwrap();
        assert!(rec.submitted_at.is_none());
        assert!(rec.build_number.is_none());
    }

    #[test]
    fn build_dropped_outside_build_relevant_states() {
        let rec = StatusRecord::new("REJECTED", "1.2.0", "MANUAL").with_build("45");
        assert!(rec.build_number.is_none());
    }

    #[test]
    fn display_version_in_review_has_build_suffix() {
        let rec = StatusRecord::new("IN_REVIEW", "1.2.0", "MANUAL").with_build("45");
        assert_eq!(rec.display_version(), "1.2.0 (45)");
    }

    #[test]
    fn display_version_rejected_is_plain() {
        let mut rec = StatusRecord::new("REJECTED", "1.2.0", "MANUAL");
        // even a stray build number is not rendered
        rec.build_number = Some("45".into());
        assert_eq!(rec.display_version(), "1.2.0");
    }

    #[test]
    fn display_version_blank_build_when_missing() {
        let rec = StatusRecord::new("WAITING_FOR_REVIEW", "3.1", "SCHEDULED");
        assert_eq!(rec.display_version(), "3.1 ()");
    }

    #[test]
    fn differs_ignores_context_fields() {
        let a = StatusRecord::new("IN_REVIEW", "1.0", "MANUAL").with_build("1");
        let mut b = StatusRecord::new("IN_REVIEW", "1.0", "SCHEDULED")
            .with_submitted_at("2026-03-01T00:00:00Z")
            .with_build("2");
        assert!(!a.differs_from(&b));
        b.version_string = "1.1".into();
        assert!(a.differs_from(&b));
    }

    #[test]
    fn console_url_contains_app_id() {
        let app = ApplicationDescriptor {
            id: "123".into(),
            name: "Demo".into(),
            webhook_url: "https://example.com/hook".into(),
            icon_url: None,
        };
        assert_eq!(
            app.console_url(),
            "https://appstoreconnect.apple.com/apps/123/appstore"
        );
    }
}
