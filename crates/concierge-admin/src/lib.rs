//! Admin API handlers for editing the dynamic settings

pub mod group;
pub mod perm;
pub mod settings;

mod prelude;

// vim: ts=4
