//! Parametric generation of a tokamak-like reactor solid model: a central
//! solenoid wrapped in a stack of nested containment layers, pierced by
//! equatorial ports, ringed by transformer limbs and detector spheres, with
//! limiter and divertor structures and the plasma volume itself.
//!
//! The geometry is driven by a flat, positional configuration stream
//! ([`config`], [`params`]) and realised through Boolean operations on
//! [`csgrs`] meshes ([`reactor`]). Finished bodies are exported as STL
//! surfaces ([`export`]) and declared in a Monte-Carlo simulation input deck
//! ([`deck`], [`assembly`]).
//!
//! # Features
//! - **parallel**: multi-threaded Boolean evaluation and tessellation inside
//!   the geometry kernel.

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod assembly;
pub mod config;
pub mod deck;
pub mod errors;
pub mod export;
pub mod float_types;
pub mod params;
pub mod reactor;

pub use errors::{Error, Result};
pub use params::ReactorParameters;
pub use reactor::Reactor;
