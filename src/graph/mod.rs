pub mod canvas;
pub mod factory;
pub mod model;
pub mod snapshot;
pub mod store;

pub use canvas::*;
pub use factory::*;
pub use model::*;
pub use snapshot::*;
pub use store::*;
