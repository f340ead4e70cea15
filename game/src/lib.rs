//! The game engine behind the "memory match" puzzle on an 8x8 RGB button grid.
//!
//! Colors are assigned to buttons, a subset of them gets scrambled and the player swaps pairs of
//! buttons until the arrangement matches the target again. Talking to the actual hardware is not
//! part of this crate. It only consumes the [`GridDisplay`] and [`GridInput`] capabilities.

mod error;
pub use error::*;

mod topology;
pub use topology::*;

mod color;
pub use color::*;

mod layout;
pub use layout::*;

mod scramble;
pub use scramble::*;

mod session;
pub use session::*;

mod engine;
pub use engine::*;

mod surface;
pub use surface::*;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
