//! Test support for the bolão workspace.
//!
//! Integration test binaries install logging through this crate so that every
//! binary honours the same `TEST_LOG` / `RUST_LOG` knobs.

pub mod logging;
