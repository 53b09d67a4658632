//! The external channel seam.
//!
//! Emission is fire-and-forget: `emit` returns nothing, and an implementation
//! that cannot deliver drops the event. There is no acknowledgement and no retry.

use frames::OutboundEvent;

pub trait Channel {
    fn emit(&self, event: OutboundEvent);
}

// =============================================================================
// TEST HELPERS
// =============================================================================
