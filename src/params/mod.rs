pub mod store;
pub mod tree;

pub use store::*;
pub use tree::*;
