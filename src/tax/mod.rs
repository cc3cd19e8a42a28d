//! Tax rate definitions

pub mod gst;

pub use gst::*;
