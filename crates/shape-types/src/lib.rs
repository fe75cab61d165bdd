pub mod descriptor;
pub mod placed;
pub mod structure;

pub use descriptor::*;
pub use placed::*;
pub use structure::*;
