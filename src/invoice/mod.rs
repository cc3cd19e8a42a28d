//! Invoice drafting and lifecycle management

pub mod draft;
pub mod manager;

pub use draft::*;
pub use manager::*;
