pub mod error;
pub mod panels;
pub mod quiver;
pub mod render;
