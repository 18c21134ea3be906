//! Test-drive workflow state machine.
//!
//! Status is a closed enum, not a free-form string. Transitions are
//! methods that reject invalid source states with [`CoreError::Conflict`],
//! so a request can never be approved twice or completed from `Pending`.
//! `Rejected` and `Completed` are terminal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum stored length of a time slot label (e.g. "Morning").
pub const MAX_TIME_SLOT_LEN: usize = 20;

/// Maximum stored length of an admin comment.
pub const MAX_ADMIN_COMMENT_LEN: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestDriveStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl TestDriveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TestDriveStatus::Pending => "Pending",
            TestDriveStatus::Approved => "Approved",
            TestDriveStatus::Rejected => "Rejected",
            TestDriveStatus::Completed => "Completed",
        }
    }

    /// `Pending -> Approved`.
    pub fn approve(self) -> Result<TestDriveStatus, CoreError> {
        match self {
            TestDriveStatus::Pending => Ok(TestDriveStatus::Approved),
            other => Err(invalid_transition(other, TestDriveStatus::Approved)),
        }
    }

    /// `Pending -> Rejected`. Terminal.
    pub fn reject(self) -> Result<TestDriveStatus, CoreError> {
        match self {
            TestDriveStatus::Pending => Ok(TestDriveStatus::Rejected),
            other => Err(invalid_transition(other, TestDriveStatus::Rejected)),
        }
    }

    /// `Approved -> Completed`. Terminal.
    pub fn complete(self) -> Result<TestDriveStatus, CoreError> {
        match self {
            TestDriveStatus::Approved => Ok(TestDriveStatus::Completed),
            other => Err(invalid_transition(other, TestDriveStatus::Completed)),
        }
    }
}

fn invalid_transition(from: TestDriveStatus, to: TestDriveStatus) -> CoreError {
    CoreError::Conflict(format!(
        "Cannot move test drive request from {from} to {to}"
    ))
}

impl fmt::Display for TestDriveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestDriveStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(TestDriveStatus::Pending),
            "Approved" => Ok(TestDriveStatus::Approved),
            "Rejected" => Ok(TestDriveStatus::Rejected),
            "Completed" => Ok(TestDriveStatus::Completed),
            other => Err(CoreError::Validation(format!(
                "Unknown test drive status '{other}'"
            ))),
        }
    }
}

/// Validate the buyer-supplied time slot label.
pub fn validate_time_slot(slot: &str) -> Result<(), CoreError> {
    let slot = slot.trim();
    if slot.is_empty() {
        return Err(CoreError::Validation("Time slot must not be blank".into()));
    }
    if slot.chars().count() > MAX_TIME_SLOT_LEN {
        return Err(CoreError::Validation(format!(
            "Time slot must be at most {MAX_TIME_SLOT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an admin comment's length. Blank is acceptable here;
/// transitions that require a comment check for that separately.
pub fn validate_admin_comment(comment: &str) -> Result<(), CoreError> {
    if comment.chars().count() > MAX_ADMIN_COMMENT_LEN {
        return Err(CoreError::Validation(format!(
            "Comment must be at most {MAX_ADMIN_COMMENT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate the admin comment supplied on rejection. Required and bounded.
pub fn validate_rejection_comment(comment: &str) -> Result<(), CoreError> {
    let comment = comment.trim();
    if comment.is_empty() {
        return Err(CoreError::Validation(
            "A comment is required when rejecting a test drive request".into(),
        ));
    }
    validate_admin_comment(comment)
}
