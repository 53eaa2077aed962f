pub mod lookup;
pub mod sources;

pub use lookup::*;
pub use sources::*;
