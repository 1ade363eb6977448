//! Link validation for the node graph.
//!
//! A proposed link is checked against the structural rules of the graph
//! before it is committed: direction, slot existence, slot occupancy and
//! acyclicity. Rejections are ordinary results, not errors.

use std::fmt;

/// Result of a link validation check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    /// Link may be created.
    Valid,
    /// Link must be rejected, with a reason.
    Invalid(LinkRejection),
}

impl ValidationResult {
    /// Returns true if the link is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Returns the rejection message if invalid, None if valid.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(reason) => Some(reason.message()),
        }
    }
}

/// Reasons a proposed link is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkRejection {
    /// The source is not an output pin or the destination is not an input pin.
    WrongPinRoles,
    /// The destination slot does not exist on its node.
    NoSuchInput,
    /// The destination input already has an incoming link.
    InputOccupied,
    /// The link would close a cycle (including linking a node to itself).
    WouldCreateCycle,
}

impl LinkRejection {
    /// Returns a human-readable rejection message.
    pub fn message(&self) -> &'static str {
        match self {
            LinkRejection::WrongPinRoles => "Links must go from an output to an input",
            LinkRejection::NoSuchInput => "The node has no such input",
            LinkRejection::InputOccupied => "Input is already connected",
            LinkRejection::WouldCreateCycle => "Link would create a cycle",
        }
    }
}

impl fmt::Display for LinkRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
