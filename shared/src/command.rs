use serde::{Deserialize, Serialize};

use crate::timers::TimerId;

/// Side effects requested by the reducer. The app turns these into capability
/// calls; tests inspect them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Render,
    StartTimer { id: TimerId, after_ms: u64 },
    CancelTimer { id: TimerId },
    Toast { message: String },
}

impl Command {
    #[must_use]
    pub const fn started_timer(&self) -> Option<TimerId> {
        match self {
            Self::StartTimer { id, .. } => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub const fn cancelled_timer(&self) -> Option<TimerId> {
        match self {
            Self::CancelTimer { id } => Some(*id),
            _ => None,
        }
    }
}
