//! Background Tasks Module
//!
//! Long-lived work that runs outside the caller's operations. The only task
//! is the TTL sweeper.

mod cleanup;

pub(crate) use cleanup::{spawn_cleanup_task, CleanupHandle};
