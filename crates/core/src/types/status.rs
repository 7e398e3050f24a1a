//! Status enums for payment entities.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a payment order at the provider.
///
/// Orders are created from a cart snapshot and finalized by a later capture
/// call; the provider drives the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Created,
    Captured,
}

impl PaymentStatus {
    /// Whether the payment has been finalized.
    #[must_use]
    pub const fn is_captured(&self) -> bool {
        matches!(self, Self::Captured)
    }
}
