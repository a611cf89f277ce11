//! Solid-body construction for the reactor assembly.
//!
//! [`Reactor`] realises the parameter tree as kernel solids. This module
//! builds the primitives and the nested containment stack; port openings,
//! transformer limbs, limiter, divertor, detector spheres and the plasma
//! volume live in [`features`].
//!
//! Solids are produced fresh on every call and consumed immediately by the
//! exporter; nothing is cached.

mod features;

use csgrs::mesh::Mesh;
use csgrs::traits::CSG;

use crate::errors::{Error, Result};
use crate::float_types::Real;
use crate::params::{ReactorParameters, TorusBounds};

/// Solid type produced by the builders; no per-solid metadata is carried.
pub type Solid = Mesh<()>;

/// Default angular tessellation for cylinders and spheres.
pub const DEFAULT_SEGMENTS: usize = 64;

/// Angular offset of the transformer-limb array relative to the port array,
/// so limbs bisect the gaps between port openings.
pub const LIMB_STAGGER_DEG: Real = 22.5;

#[derive(Debug, Clone)]
pub struct Reactor {
    params: ReactorParameters,
    segments: usize,
}

impl Reactor {
    pub fn new(params: ReactorParameters) -> Self {
        Self {
            params,
            segments: DEFAULT_SEGMENTS,
        }
    }

    /// Override the angular tessellation used for round primitives. Finer
    /// segments produce a finer exported surface mesh at higher cost.
    #[must_use]
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments.max(3);
        self
    }

    pub fn params(&self) -> &ReactorParameters {
        &self.params
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Rectangular-cross-section torus: a cylinder of `outer_r` minus a
    /// concentric cylinder of `inner_r`, vertically centred on z = 0.
    ///
    /// Degenerate radii or height are rejected before the kernel sees them;
    /// the Boolean result would otherwise be silently empty.
    pub fn torus(&self, inner_r: Real, outer_r: Real, height: Real) -> Result<Solid> {
        if inner_r < 0.0 || inner_r >= outer_r || height <= 0.0 {
            return Err(Error::Geometry {
                body: "torus".to_string(),
                reason: format!(
                    "degenerate torus: inner_r={inner_r}, outer_r={outer_r}, height={height}"
                ),
            });
        }
        let outer = Solid::cylinder(outer_r, height, self.segments, None);
        let ring = if inner_r > 0.0 {
            let inner = Solid::cylinder(inner_r, height, self.segments, None);
            outer.difference(&inner)
        } else {
            outer
        };
        Ok(ring.translate(0.0, 0.0, -height / 2.0))
    }

    pub(crate) fn torus_from(&self, bounds: TorusBounds) -> Result<Solid> {
        self.torus(bounds.inner_radius, bounds.outer_radius, bounds.height)
    }

    /// The central solenoid column, vertically centred.
    pub fn central_solenoid(&self) -> Solid {
        let height = self.params.solenoid.solenoid_height;
        Solid::cylinder(
            self.params.solenoid.solenoid_radius,
            height,
            self.segments,
            None,
        )
        .translate(0.0, 0.0, -height / 2.0)
    }

    /// Containment shell `i`: the layer's outer torus with its inner torus
    /// cut away. Layer 0 starts from the solenoid/outer-radius envelope;
    /// deeper layers start from the envelope already shrunk by every layer
    /// before them, so the shells nest strictly.
    pub fn containment_layer(&self, i: usize) -> Result<Solid> {
        let nr_layers = self.params.containment.nr_layers();
        if i >= nr_layers {
            return Err(Error::Geometry {
                body: format!("containment{}", i + 1),
                reason: format!("layer index {i} out of range (nr_layers = {nr_layers})"),
            });
        }
        let outer = self.torus_from(self.params.layer_bounds(i))?;
        let inner = self.torus_from(self.params.layer_inner_bounds(i))?;
        Ok(outer.difference(&inner))
    }

    /// Every containment layer, innermost first, with no cuts applied.
    pub fn containment(&self) -> Result<Vec<Solid>> {
        (0..self.params.containment.nr_layers())
            .map(|i| self.containment_layer(i))
            .collect()
    }

    /// Shell enclosing the whole machine: an outer box minus a concentric
    /// inner box, sized from the limb radius, eight outer radii and four
    /// solenoid heights, padded by `bbox_thickness`.
    pub fn bounding_box(&self) -> Solid {
        let p = &self.params;
        let side = p.limb_radius() + p.containment.outer_radius * 8.0;
        let height = p.solenoid.solenoid_height * 4.0;
        let pad = p.solenoid.bbox_thickness;
        let outer = centred_box(side + pad, side + pad, height + pad);
        let inner = centred_box(side, side, height);
        outer.difference(&inner)
    }
}

/// Axis-aligned box centred on the origin.
pub(crate) fn centred_box(x: Real, y: Real, z: Real) -> Solid {
    Solid::cuboid(x, y, z, None).translate(-x / 2.0, -y / 2.0, -z / 2.0)
}
