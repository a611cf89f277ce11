//! Scalar type and constants, tracking the geometry kernel's precision
//! configuration so the whole crate switches with it.

pub use csgrs::float_types::{EPSILON, PI, Real, TAU};
