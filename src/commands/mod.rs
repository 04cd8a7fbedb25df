pub mod install;
pub mod official;

pub use install::*;
pub use official::*;
