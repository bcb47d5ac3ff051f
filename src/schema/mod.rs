pub mod catalog;
pub mod definition;

pub use catalog::*;
pub use definition::*;
