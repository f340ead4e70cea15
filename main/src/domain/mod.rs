mod rounds;
pub use rounds::*;
