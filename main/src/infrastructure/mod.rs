pub mod console;
pub mod midi;
