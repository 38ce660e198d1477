//! Grassbrush - paint and erase procedural grass on arbitrary mesh surfaces

pub mod core;
pub mod math;
pub mod surface;
pub mod grass;
pub mod brush;
