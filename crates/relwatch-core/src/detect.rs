use crate::types::StatusRecord;

/// Which title form a change gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Both,
    VersionOnly,
    StateOnly,
}

/// Classification of a fetched record against the previously stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    /// No prior record existed.
    pub first_seen: bool,
    /// Version differs from an existing prior record.
    pub version_changed: bool,
    /// State differs, or there was no prior record.
    pub state_changed: bool,
}

impl Change {
    pub fn classify(prior: Option<&StatusRecord>, current: &StatusRecord) -> Self {
        match prior {
            None => Self {
                first_seen: true,
                version_changed: false,
                state_changed: true,
            },
            Some(p) => Self {
                first_seen: false,
                version_changed: p.version_string != current.version_string,
                state_changed: p.lifecycle_state != current.lifecycle_state,
            },
        }
    }

    /// Whether this change warrants a notification.
    pub fn is_notifiable(&self) -> bool {
        self.first_seen || self.version_changed || self.state_changed
    }

    pub fn kind(&self) -> ChangeKind {
        match (self.version_changed, self.state_changed) {
            (true, true) => ChangeKind::Both,
            (true, false) => ChangeKind::VersionOnly,
            _ => ChangeKind::StateOnly,
        }
    }
}
