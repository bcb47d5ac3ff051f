pub mod definition;
pub mod parameter;

pub use definition::*;
pub use parameter::*;
