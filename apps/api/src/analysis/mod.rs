// Resume/job-text reconciliation.
// Pure, synchronous functions only: no I/O, no shared state. Safe to call from any handler.

pub mod experience;
pub mod normalize;
pub mod profile;
pub mod reconcile;
pub mod requirements;
pub mod sections;
