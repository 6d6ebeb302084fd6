//! Customer identifiers.
//!
//! Customer records live in an arena (`Vec`) owned by the simulator; queues
//! and logs refer to them by id instead of holding references, so a queued
//! customer and its permanent record can never diverge.

use std::fmt;

/// Index of a customer record in the simulator's customer table, assigned
/// in arrival order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerId(pub u32);

impl CustomerId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomerId({})", self.0)
    }
}
