//! Mathematical utilities and data structures

pub mod aabb;
pub mod ray;
pub mod plane;

pub use aabb::Aabb;
pub use ray::Ray;
pub use plane::Plane;
