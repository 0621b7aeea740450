//! Basic geometry primitives for chain manipulation.

pub mod aabb;
pub mod point3;

pub use aabb::Aabb;
pub use point3::Point3;
