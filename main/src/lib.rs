//! Memory match on a grid controller.
//!
//! Wires the game engine to a configuration, to the terminal and to MIDI note messages.

pub mod application;
pub mod domain;
pub mod infrastructure;
