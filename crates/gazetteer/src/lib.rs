pub mod location;
pub mod tree;

pub use location::*;
pub use tree::*;
