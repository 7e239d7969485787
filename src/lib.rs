//! A single-grid flowfield for steering crowds of actors towards a shared
//! target, with a Bevy plugin to keep it up to date as the map changes
//!

pub mod flowfields;
pub mod plugin;
pub mod settings;

pub mod prelude;
