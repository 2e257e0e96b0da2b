pub mod config_io;
pub mod profile_store;
pub mod system;
