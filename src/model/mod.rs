pub mod config;
pub mod platform;
pub mod profile;

pub use config::*;
pub use platform::*;
pub use profile::*;
