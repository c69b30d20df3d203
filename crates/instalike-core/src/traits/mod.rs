//! Ports implemented by outer layers

mod repositories;

pub use repositories::*;
