pub mod process;
pub mod serve;

pub use process::*;
pub use serve::*;
