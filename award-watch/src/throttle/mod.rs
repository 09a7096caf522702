//! Notification throttling.
//!
//! Runs are launched by an external scheduler and may overlap, so the
//! "send at most once" decisions live in shared durable state guarded by
//! exclusive non-blocking locks:
//! - the startup notice goes out once per deployment (until the state
//!   directory is reset)
//! - the "no flights" digest goes out once per UTC calendar day
//!
//! A run that cannot take a lock does not wait; the holder decides.

mod error;
mod gate;
mod memory;
mod store;

pub use error::ThrottleError;
pub use gate::{ThrottleGate, Verdict, start_of_day};
pub use memory::{MemoryLock, MemoryMarkerStore};
pub use store::{FileLock, FileMarkerStore, MarkerStore, Slot};
