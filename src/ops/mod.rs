pub mod encode;
pub mod links;
pub mod share;
