//! Typed, immutable reactor parameters decoded from the flat value stream.
//!
//! The stream is positional: three containment scalars, `nr_layers`
//! (outer, inner) thickness pairs, then the solenoid, port, limb, limiter
//! and divertor sections, and a trailing plasma setback. The whole tree is
//! decoded and validated once at startup and never mutated afterwards; every
//! builder reads it by reference.
//!
//! Raw configuration values are stored as read, so [`ReactorParameters::encode`]
//! is the exact positional inverse of [`ReactorParameters::decode`]. Derived
//! quantities (cumulative thicknesses, wall radii, effective limb height)
//! are pure accessors.

use std::path::Path;

use crate::config::{self, Cursor};
use crate::errors::{Error, Result};
use crate::float_types::Real;

/// One shell of the containment stack.
///
/// `outer_thickness` is consumed from the outer radius and, doubled, from
/// the height; `inner_thickness` from the inner radius. Layers are ordered
/// innermost first (index 0 sits against the solenoid).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub outer_thickness: Real,
    pub inner_thickness: Real,
}

/// Which thickness of a [`Layer`] to accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Outer,
    Inner,
}

/// Sum of one thickness kind over layers `[0, upto)`.
pub fn cumulative_thickness(layers: &[Layer], upto: usize, side: Side) -> Real {
    layers[..upto.min(layers.len())]
        .iter()
        .map(|layer| match side {
            Side::Outer => layer.outer_thickness,
            Side::Inner => layer.inner_thickness,
        })
        .sum()
}

/// Radii and height of one rectangular-cross-section torus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusBounds {
    pub inner_radius: Real,
    pub outer_radius: Real,
    pub height: Real,
}

impl TorusBounds {
    /// Shrink radially by `inner` on the inside and `outer` on the outside,
    /// and axially by `outer` on both top and bottom.
    #[must_use]
    pub const fn shrink(&self, inner: Real, outer: Real) -> Self {
        Self {
            inner_radius: self.inner_radius + inner,
            outer_radius: self.outer_radius - outer,
            height: self.height - 2.0 * outer,
        }
    }

    /// A torus these bounds cannot realise: inverted or empty.
    pub const fn is_degenerate(&self) -> bool {
        self.inner_radius < 0.0
            || self.inner_radius >= self.outer_radius
            || self.height <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainmentParameters {
    pub outer_radius: Real,
    pub containment_height: Real,
    /// Shells innermost first; the count is implied by the list.
    pub layers: Vec<Layer>,
    /// Setback of the plasma volume from the innermost wall, every side.
    pub distance_from_plasma: Real,
}

impl ContainmentParameters {
    pub fn nr_layers(&self) -> usize {
        self.layers.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolenoidParameters {
    pub solenoid_radius: Real,
    pub solenoid_height: Real,
    pub bbox_thickness: Real,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortParameters {
    pub nr_ports: usize,
    /// Vertical side of the port cross-section.
    pub z_side: Real,
    /// Tangential side of the port cross-section.
    pub y_side: Real,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbDimensions {
    pub length: Real,
    pub width: Real,
    /// Raw configured height; `0` means "use the solenoid height".
    pub height: Real,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbParameters {
    pub nr_limbs: usize,
    /// Radial offset of the limb array beyond the containment outer radius.
    pub radial_offset: Real,
    /// Radius of the detector spheres flanking each limb.
    pub sphere_radius: Real,
    pub dimensions: LimbDimensions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimiterParameters {
    pub firstwall_thickness: Real,
    /// Shrinks the port cross-section used for the limiter intersection.
    pub limiter_gap: Real,
    pub limiter_thickness: Real,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivertorParameters {
    pub firstwall_thickness: Real,
    /// Half-width of the divertor slot, measured from its centre radius.
    pub width: Real,
    /// Radial clearance of the walls inside the slot, each side.
    pub gap: Real,
    pub thickness: Real,
}

/// The full immutable parameter tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactorParameters {
    pub containment: ContainmentParameters,
    pub solenoid: SolenoidParameters,
    pub ports: PortParameters,
    pub limbs: LimbParameters,
    pub limiter: LimiterParameters,
    pub divertor: DivertorParameters,
}

impl ReactorParameters {
    /// Load, decode and validate a configuration file.
    pub fn from_config(path: &Path) -> Result<Self> {
        Self::decode(&config::read_values(path)?)
    }

    /// Decode the positional value stream and validate the result.
    pub fn decode(values: &[Real]) -> Result<Self> {
        let mut cursor = Cursor::new(values);

        let outer_radius = cursor.next("outer_radius")?;
        let containment_height = cursor.next("containment_height")?;
        let nr_layers = cursor.next_count("nr_layers")?;

        let mut layers = Vec::with_capacity(nr_layers);
        for _ in 0..nr_layers {
            layers.push(Layer {
                outer_thickness: cursor.next("layer outer_thickness")?,
                inner_thickness: cursor.next("layer inner_thickness")?,
            });
        }

        let solenoid = SolenoidParameters {
            solenoid_radius: cursor.next("solenoid_radius")?,
            solenoid_height: cursor.next("solenoid_height")?,
            bbox_thickness: cursor.next("bbox_thickness")?,
        };

        let ports = PortParameters {
            nr_ports: cursor.next_positive_count("nr_ports")?,
            z_side: cursor.next("z_side")?,
            y_side: cursor.next("y_side")?,
        };

        let limbs = LimbParameters {
            nr_limbs: cursor.next_positive_count("nr_limbs")?,
            radial_offset: cursor.next("limb radial_offset")?,
            sphere_radius: cursor.next("sphere_radius")?,
            dimensions: LimbDimensions {
                length: cursor.next("limb_length")?,
                width: cursor.next("limb_width")?,
                height: cursor.next("limb_height")?,
            },
        };

        let limiter = LimiterParameters {
            firstwall_thickness: cursor.next("limiter firstwall_thickness")?,
            limiter_gap: cursor.next("limiter_gap")?,
            limiter_thickness: cursor.next("limiter_thickness")?,
        };

        let divertor = DivertorParameters {
            firstwall_thickness: cursor.next("divertor firstwall_thickness")?,
            width: cursor.next("divertor_width")?,
            gap: cursor.next("divertor_gap")?,
            thickness: cursor.next("divertor_thickness")?,
        };

        let distance_from_plasma = cursor.next("distance_from_plasma")?;
        cursor.finish()?;

        let params = Self {
            containment: ContainmentParameters {
                outer_radius,
                containment_height,
                layers,
                distance_from_plasma,
            },
            solenoid,
            ports,
            limbs,
            limiter,
            divertor,
        };
        params.validate()?;
        Ok(params)
    }

    /// Re-encode into the exact positional stream [`Self::decode`] accepts.
    pub fn encode(&self) -> Vec<Real> {
        let mut values = vec![
            self.containment.outer_radius,
            self.containment.containment_height,
            self.containment.nr_layers() as Real,
        ];
        for layer in &self.containment.layers {
            values.push(layer.outer_thickness);
            values.push(layer.inner_thickness);
        }
        values.extend([
            self.solenoid.solenoid_radius,
            self.solenoid.solenoid_height,
            self.solenoid.bbox_thickness,
            self.ports.nr_ports as Real,
            self.ports.z_side,
            self.ports.y_side,
            self.limbs.nr_limbs as Real,
            self.limbs.radial_offset,
            self.limbs.sphere_radius,
            self.limbs.dimensions.length,
            self.limbs.dimensions.width,
            self.limbs.dimensions.height,
            self.limiter.firstwall_thickness,
            self.limiter.limiter_gap,
            self.limiter.limiter_thickness,
            self.divertor.firstwall_thickness,
            self.divertor.width,
            self.divertor.gap,
            self.divertor.thickness,
            self.containment.distance_from_plasma,
        ]);
        values
    }

    /// Cumulative outer thickness of layers `[0, upto)`.
    pub fn cumulative_outer(&self, upto: usize) -> Real {
        cumulative_thickness(&self.containment.layers, upto, Side::Outer)
    }

    /// Cumulative inner thickness of layers `[0, upto)`.
    pub fn cumulative_inner(&self, upto: usize) -> Real {
        cumulative_thickness(&self.containment.layers, upto, Side::Inner)
    }

    /// The base envelope: solenoid radius to outer radius, full height.
    fn envelope(&self) -> TorusBounds {
        TorusBounds {
            inner_radius: self.solenoid.solenoid_radius,
            outer_radius: self.containment.outer_radius,
            height: self.containment.containment_height,
        }
    }

    /// Outer torus of containment layer `i`: the envelope shrunk by every
    /// layer before it.
    pub fn layer_bounds(&self, i: usize) -> TorusBounds {
        self.envelope()
            .shrink(self.cumulative_inner(i), self.cumulative_outer(i))
    }

    /// Inner torus of layer `i`: [`Self::layer_bounds`] shrunk further by
    /// the layer's own thicknesses.
    pub fn layer_inner_bounds(&self, i: usize) -> TorusBounds {
        let layer = self.containment.layers[i];
        self.layer_bounds(i)
            .shrink(layer.inner_thickness, layer.outer_thickness)
    }

    /// The open chamber left inside the innermost layer.
    pub fn inner_wall_bounds(&self) -> TorusBounds {
        self.layer_bounds(self.containment.nr_layers())
    }

    /// Plasma volume: the chamber set back by `distance_from_plasma` on
    /// every side.
    pub fn plasma_bounds(&self) -> TorusBounds {
        let d = self.containment.distance_from_plasma;
        self.inner_wall_bounds().shrink(d, d)
    }

    /// Radii of the innermost and outermost containment walls, between
    /// which the divertor must fit.
    pub fn divertor_span(&self) -> (Real, Real) {
        let chamber = self.inner_wall_bounds();
        (chamber.inner_radius, chamber.outer_radius)
    }

    /// Centre radius of the divertor, midway between the two walls.
    pub fn divertor_centre(&self) -> Real {
        let (inner, outer) = self.divertor_span();
        (inner + outer) / 2.0
    }

    /// Radius at which the transformer limbs are placed.
    pub fn limb_radius(&self) -> Real {
        self.containment.outer_radius + self.limbs.radial_offset
    }

    /// Effective limb height: the raw value, or the solenoid height when
    /// configured as 0.
    pub fn limb_height(&self) -> Real {
        if self.limbs.dimensions.height == 0.0 {
            self.solenoid.solenoid_height
        } else {
            self.limbs.dimensions.height
        }
    }

    /// Port angles in degrees: index 0 at 0, spaced `360 / nr_ports`.
    pub fn port_angles(&self) -> Vec<Real> {
        let step = 360.0 / self.ports.nr_ports as Real;
        (0..self.ports.nr_ports).map(|i| i as Real * step).collect()
    }

    /// Base limb angles in degrees, before the fixed stagger is applied.
    pub fn limb_angles(&self) -> Vec<Real> {
        let step = 360.0 / self.limbs.nr_limbs as Real;
        (0..self.limbs.nr_limbs).map(|i| i as Real * step).collect()
    }

    /// Geometric consistency checks; anything that would later produce an
    /// empty or inverted Boolean result is rejected here, at load time.
    fn validate(&self) -> Result<()> {
        let c = &self.containment;
        let s = &self.solenoid;

        if c.containment_height <= 0.0 {
            return Err(Error::Configuration(format!(
                "containment height must be positive, got {}",
                c.containment_height
            )));
        }
        if s.solenoid_height <= 0.0 {
            return Err(Error::Configuration(format!(
                "solenoid height must be positive, got {}",
                s.solenoid_height
            )));
        }
        if s.solenoid_radius <= 0.0 || s.solenoid_radius >= c.outer_radius {
            return Err(Error::Configuration(format!(
                "solenoid radius {} must lie in (0, outer radius {})",
                s.solenoid_radius, c.outer_radius
            )));
        }
        if s.bbox_thickness <= 0.0 {
            return Err(Error::Configuration(format!(
                "bounding-box thickness must be positive, got {}",
                s.bbox_thickness
            )));
        }

        for (i, layer) in c.layers.iter().enumerate() {
            if layer.outer_thickness < 0.0 || layer.inner_thickness < 0.0 {
                return Err(Error::Configuration(format!(
                    "layer {i} has a negative thickness"
                )));
            }
        }
        // Every prefix of the stack must leave a non-degenerate torus,
        // including the chamber inside the last layer.
        for i in 0..=c.nr_layers() {
            if self.layer_bounds(i).is_degenerate() {
                return Err(Error::Configuration(format!(
                    "containment stack degenerates after {i} layer(s): \
                     cumulative thicknesses consume the radial or axial span"
                )));
            }
        }

        if self.ports.y_side <= 0.0 || self.ports.z_side <= 0.0 {
            return Err(Error::Configuration(format!(
                "port cross-section {} x {} must be positive",
                self.ports.y_side, self.ports.z_side
            )));
        }
        if self.limiter.limiter_gap < 0.0
            || self.limiter.limiter_gap >= self.ports.y_side.min(self.ports.z_side)
        {
            return Err(Error::Configuration(format!(
                "limiter gap {} leaves no limiter cross-section inside a {} x {} port",
                self.limiter.limiter_gap, self.ports.y_side, self.ports.z_side
            )));
        }
        if self.limiter.firstwall_thickness <= 0.0 || self.limiter.limiter_thickness <= 0.0 {
            return Err(Error::Configuration(
                "limiter wall thicknesses must be positive".to_string(),
            ));
        }

        let (inner_wall, outer_wall) = self.divertor_span();
        let max_width = (outer_wall - inner_wall) / 2.0;
        if self.divertor.width <= 0.0 || self.divertor.width > max_width {
            return Err(Error::Configuration(format!(
                "divertor width {} exceeds the available containment span ({max_width})",
                self.divertor.width
            )));
        }
        if self.divertor.gap < 0.0 || self.divertor.gap >= self.divertor.width {
            return Err(Error::Configuration(format!(
                "divertor gap {} must lie in [0, divertor width {})",
                self.divertor.gap, self.divertor.width
            )));
        }
        if self.divertor.firstwall_thickness <= 0.0 || self.divertor.thickness <= 0.0 {
            return Err(Error::Configuration(
                "divertor wall thicknesses must be positive".to_string(),
            ));
        }

        if c.distance_from_plasma < 0.0 || self.plasma_bounds().is_degenerate() {
            return Err(Error::Configuration(format!(
                "plasma setback {} leaves no plasma volume inside the chamber",
                c.distance_from_plasma
            )));
        }

        let d = &self.limbs.dimensions;
        if d.length <= 0.0 || d.width <= 0.0 || d.height < 0.0 {
            return Err(Error::Configuration(format!(
                "limb dimensions {} x {} x {} are not realisable",
                d.length, d.width, d.height
            )));
        }
        if self.limbs.sphere_radius <= 0.0 {
            return Err(Error::Configuration(format!(
                "detector sphere radius must be positive, got {}",
                self.limbs.sphere_radius
            )));
        }
        if self.limb_radius() <= 0.0 {
            return Err(Error::Configuration(format!(
                "limb radius {} must be positive",
                self.limb_radius()
            )));
        }

        Ok(())
    }
}
