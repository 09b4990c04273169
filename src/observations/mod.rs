pub mod cleaning;
pub mod error;
pub mod frame;
pub mod loader;
