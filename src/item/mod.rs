pub mod definition;
pub mod weight;

pub use definition::*;
pub use weight::*;
