pub use concierge_core::prelude::*;

// vim: ts=4
