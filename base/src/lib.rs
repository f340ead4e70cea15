pub mod tracing_util;

pub mod hash_util;

mod channels;
pub use channels::*;

pub mod validation_util;
