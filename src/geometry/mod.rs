//! Typed description of a solid-geometry figure.

pub mod schema;

pub use schema::{Coordinates, Dimensions, GeometrySchema, GeometryType, HelperLine, Point};
