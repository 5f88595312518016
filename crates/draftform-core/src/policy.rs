use serde::{Deserialize, Serialize};

///
/// SlotPolicy
///
/// Commit-time rule for availability slots that are still missing a day or
/// a time. `RequireComplete` blocks the commit with per-slot issues;
/// `DropIncomplete` omits the unfinished slots from the committed record.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum SlotPolicy {
    DropIncomplete,
    #[default]
    RequireComplete,
}

impl SlotPolicy {
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::RequireComplete)
    }
}

///
/// SessionPolicy
///
/// Per-session behavior flags, fixed when the session is opened.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionPolicy {
    pub slots: SlotPolicy,
}

impl SessionPolicy {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: SlotPolicy::RequireComplete,
        }
    }

    #[must_use]
    pub const fn drop_incomplete_slots(mut self) -> Self {
        self.slots = SlotPolicy::DropIncomplete;
        self
    }
}

///
/// TESTS
///
