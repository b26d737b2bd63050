//! Lookup tables for lifecycle states and release modes.
//!
//! Every lookup is total: values missing from a table resolve to an explicit
//! default entry instead of failing.

/// Semantic color bucket for a lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBucket {
    Success,
    Failure,
    Waiting,
    QueuedForRelease,
    Preparing,
    Neutral,
}

impl ColorBucket {
    /// RGB code as used by embed-style webhook payloads.
    pub const fn code(self) -> u32 {
        match self {
            ColorBucket::Success => 0x2ECC71,
            ColorBucket::Failure => 0xE74C3C,
            ColorBucket::Waiting => 0xF1C40F,
            ColorBucket::QueuedForRelease => 0x3498DB,
            ColorBucket::Preparing => 0x9B59B6,
            ColorBucket::Neutral => 0x95A5A6,
        }
    }
}

/// Display metadata for one lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    pub state: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    pub color: ColorBucket,
}

const fn info(
    state: &'static str,
    icon: &'static str,
    label: &'static str,
    color: ColorBucket,
) -> StateInfo {
    StateInfo {
        state,
        icon,
        label,
        color,
    }
}

/// Known lifecycle states of a submitted version.
pub const LIFECYCLE_STATES: &[StateInfo] = &[
    info("READY_FOR_SALE", "🟢", "Ready for Sale", ColorBucket::Success),
    info("READY_FOR_DISTRIBUTION", "🟢", "Ready for Distribution", ColorBucket::Success),
    info("ACCEPTED", "✅", "Accepted", ColorBucket::Success),
    info("PENDING_DEVELOPER_RELEASE", "⏸️", "Pending Developer Release", ColorBucket::QueuedForRelease),
    info("PENDING_APPLE_RELEASE", "⏳", "Pending Apple Release", ColorBucket::QueuedForRelease),
    info("PROCESSING_FOR_APP_STORE", "⚙️", "Processing for App Store", ColorBucket::QueuedForRelease),
    info("PROCESSING_FOR_DISTRIBUTION", "⚙️", "Processing for Distribution", ColorBucket::QueuedForRelease),
    info("PREORDER_READY_FOR_SALE", "🛒", "Pre-Order Ready for Sale", ColorBucket::QueuedForRelease),
    info("WAITING_FOR_REVIEW", "🕒", "Waiting for Review", ColorBucket::Waiting),
    info("IN_REVIEW", "🔍", "In Review", ColorBucket::Waiting),
    info("WAITING_FOR_EXPORT_COMPLIANCE", "📄", "Waiting for Export Compliance", ColorBucket::Waiting),
    info("PENDING_CONTRACT", "📝", "Pending Contract", ColorBucket::Waiting),
    info("REJECTED", "❌", "Rejected", ColorBucket::Failure),
    info("METADATA_REJECTED", "⚠️", "Metadata Rejected", ColorBucket::Failure),
    info("INVALID_BINARY", "🚫", "Invalid Binary", ColorBucket::Failure),
    info("DEVELOPER_REJECTED", "↩️", "Developer Rejected", ColorBucket::Failure),
    info("REMOVED_FROM_SALE", "🗑️", "Removed from Sale", ColorBucket::Failure),
    info("DEVELOPER_REMOVED_FROM_SALE", "🗑️", "Developer Removed from Sale", ColorBucket::Failure),
    info("PREPARE_FOR_SUBMISSION", "🛠️", "Prepare for Submission", ColorBucket::Preparing),
    info("READY_FOR_REVIEW", "📤", "Ready for Review", ColorBucket::Preparing),
    info("REPLACED_WITH_NEW_VERSION", "🔁", "Replaced with New Version", ColorBucket::Neutral),
    info("NOT_APPLICABLE", "➖", "Not Applicable", ColorBucket::Neutral),
];

/// Fallback for states not in [`LIFECYCLE_STATES`].
pub const UNKNOWN_STATE: StateInfo = info("UNKNOWN", "❔", "Unknown Status", ColorBucket::Neutral);

/// States for which a build number is shown next to the version.
pub const BUILD_RELEVANT_STATES: &[&str] = &[
    "READY_FOR_DISTRIBUTION",
    "PENDING_DEVELOPER_RELEASE",
    "WAITING_FOR_REVIEW",
    "IN_REVIEW",
];

/// Release modes and their labels.
pub const RELEASE_MODES: &[(&str, &str)] = &[
    ("MANUAL", "Manual Release"),
    ("AFTER_APPROVAL", "Automatic after Approval"),
    ("SCHEDULED", "Scheduled Release"),
];

/// Look up display metadata; unknown states get [`UNKNOWN_STATE`].
pub fn state_info(state: &str) -> &'static StateInfo {
    LIFECYCLE_STATES
        .iter()
        .find(|i| i.state == state)
        .unwrap_or(&UNKNOWN_STATE)
}

pub fn is_known_state(state: &str) -> bool {
    LIFECYCLE_STATES.iter().any(|i| i.state == state)
}

pub fn state_icon(state: &str) -> &'static str {
    state_info(state).icon
}

pub fn state_label(state: &str) -> &'static str {
    state_info(state).label
}

pub fn state_color(state: &str) -> ColorBucket {
    state_info(state).color
}

pub fn is_build_relevant(state: &str) -> bool {
    BUILD_RELEVANT_STATES.contains(&state)
}

/// Label for a release mode. Unknown modes echo the raw value.
pub fn release_mode_label(mode: &str) -> String {
    match RELEASE_MODES.iter().find(|(raw, _)| *raw == mode) {
        Some((_, label)) => label.to_string(),
        None if mode.trim().is_empty() => "Unspecified".to_string(),
        None => mode.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_state_has_nonempty_lookups() {
        for i in LIFECYCLE_STATES {
            assert!(!state_icon(i.state).is_empty(), "{}", i.state);
            assert!(!state_label(i.state).is_empty(), "{}", i.state);
            assert_ne!(state_color(i.state).code(), 0, "{}", i.state);
            assert!(is_known_state(i.state));
        }
    }

    #[test]
    fn unknown_state_falls_back() {
        for raw in ["SOMETHING_NEW", "", "in_review"] {
            assert_eq!(state_info(raw), &UNKNOWN_STATE);
            assert!(!state_icon(raw).is_empty());
            assert!(!state_label(raw).is_empty());
            assert_eq!(state_color(raw), ColorBucket::Neutral);
            assert!(!is_build_relevant(raw));
        }
    }

    #[test]
    fn state_table_has_no_duplicates() {
        for (i, a) in LIFECYCLE_STATES.iter().enumerate() {
            for b in &LIFECYCLE_STATES[i + 1..] {
                assert_ne!(a.state, b.state);
            }
        }
    }

    #[test]
    fn build_relevant_states_are_known() {
        for s in BUILD_RELEVANT_STATES {
            assert!(is_known_state(s), "{s}");
        }
        assert!(is_build_relevant("IN_REVIEW"));
        assert!(!is_build_relevant("REJECTED"));
    }

    #[test]
    fn color_buckets() {
        assert_eq!(state_color("ACCEPTED"), ColorBucket::Success);
        assert_eq!(state_color("REJECTED"), ColorBucket::Failure);
        assert_eq!(state_color("IN_REVIEW"), ColorBucket::Waiting);
        assert_eq!(state_color("PENDING_DEVELOPER_RELEASE"), ColorBucket::QueuedForRelease);
        assert_eq!(state_color("PREPARE_FOR_SUBMISSION"), ColorBucket::Preparing);
    }

    #[test]
    fn release_mode_labels() {
        assert_eq!(release_mode_label("MANUAL"), "Manual Release");
        assert_eq!(release_mode_label("AFTER_APPROVAL"), "Automatic after Approval");
        assert_eq!(release_mode_label("SCHEDULED"), "Scheduled Release");
        assert_eq!(release_mode_label("PHASED"), "PHASED");
        assert_eq!(release_mode_label(""), "Unspecified");
    }
}
