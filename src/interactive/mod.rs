//! Interactive visualization module for real-time FOV testing

mod viewer;

pub use viewer::{InteractiveViewer, ViewerConfig};
