
mod printing;
mod types;

pub use types::*;
