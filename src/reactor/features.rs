//! Port openings, transformer limbs, limiter, divertor, detector spheres
//! and the plasma volume.
//!
//! All angular placement shares one convention: arrays start at angle 0 on
//! the negative-x side and advance by negative rotation about the world z
//! axis. The same sign is used for ports, limiter plates, limbs and spheres
//! so the features stay mutually aligned; limbs and spheres additionally
//! carry the fixed [`LIMB_STAGGER_DEG`] offset.

use csgrs::traits::CSG;
use nalgebra::{Rotation3, Vector3};

use super::{LIMB_STAGGER_DEG, Reactor, Solid, centred_box};
use crate::errors::{Error, Result};
use crate::float_types::Real;

/// Rotate a solid about the world z axis at the origin.
fn rotated_z(solid: &Solid, angle_deg: Real) -> Solid {
    let rotation =
        Rotation3::from_axis_angle(&Vector3::z_axis(), angle_deg.to_radians());
    solid.transform(&rotation.to_homogeneous())
}

impl Reactor {
    /// One port-cutting prism.
    ///
    /// Cross-section `(y_side - gap) x (z_side - gap)`, extruded radially to
    /// 1.5x the cumulative outer containment thickness and positioned to
    /// straddle the outer wall, so it pierces every layer whatever the gap.
    pub fn opening(&self, gap: Real) -> Result<Solid> {
        let ports = &self.params.ports;
        let width = ports.y_side - gap;
        let height = ports.z_side - gap;
        if width <= 0.0 || height <= 0.0 {
            return Err(Error::Geometry {
                body: "opening".to_string(),
                reason: format!("gap {gap} swallows the whole port cross-section"),
            });
        }
        let wall_depth = self
            .params
            .cumulative_outer(self.params.containment.nr_layers());
        let prism = Solid::cuboid(wall_depth * 1.5, width, height, None)
            .translate(0.0, -width / 2.0, -height / 2.0);
        Ok(prism.translate(
            -self.params.containment.outer_radius - wall_depth * 0.1,
            0.0,
            0.0,
        ))
    }

    /// The port array with a per-port `gap`: one opening per port angle,
    /// index 0 at angle 0.
    pub fn opening_array(&self, gap: Real) -> Result<Solid> {
        let nr_ports = self.params.ports.nr_ports;
        let step = 360.0 / nr_ports as Real;
        let mut array = self.opening(gap)?;
        for i in 1..nr_ports {
            array = array.union(&rotated_z(&self.opening(gap)?, -(i as Real * step)));
        }
        Ok(array)
    }

    /// Port-cutting array with no gap.
    pub fn openings(&self) -> Result<Solid> {
        self.opening_array(0.0)
    }

    /// Containment layers with the port array cut out of each.
    pub fn containment_with_ports(&self) -> Result<Vec<Solid>> {
        let openings = self.openings()?;
        (0..self.params.containment.nr_layers())
            .map(|i| Ok(self.containment_layer(i)?.difference(&openings)))
            .collect()
    }

    /// Containment layers with the divertor slot cut out of each.
    pub fn containment_with_divertor(&self) -> Result<Vec<Solid>> {
        let cutter = self.divertor_cutter()?;
        (0..self.params.containment.nr_layers())
            .map(|i| Ok(self.containment_layer(i)?.difference(&cutter)))
            .collect()
    }

    /// Containment layers with both the port array and the divertor slot
    /// cut out of each.
    pub fn containment_with_divertor_and_ports(&self) -> Result<Vec<Solid>> {
        let openings = self.openings()?;
        let cutter = self.divertor_cutter()?;
        (0..self.params.containment.nr_layers())
            .map(|i| {
                Ok(self
                    .containment_layer(i)?
                    .difference(&openings)
                    .difference(&cutter))
            })
            .collect()
    }

    /// Torus that cuts the divertor slot out of the containment stack:
    /// centred between the innermost and outermost walls, solenoid height,
    /// centred on z = 0.
    pub fn divertor_cutter(&self) -> Result<Solid> {
        let centre = self.params.divertor_centre();
        let width = self.params.divertor.width;
        self.torus(
            centre - width,
            centre + width,
            self.params.solenoid.solenoid_height,
        )
    }

    /// Plasma-facing divertor ring, seated directly under the chamber floor.
    pub fn divertor_firstwall(&self) -> Result<Solid> {
        let centre = self.params.divertor_centre();
        let d = &self.params.divertor;
        let half_width = d.width - d.gap;
        let ring = self.torus(
            centre - half_width,
            centre + half_width,
            d.firstwall_thickness,
        )?;
        Ok(ring.translate(
            0.0,
            0.0,
            self.chamber_floor_z() - d.firstwall_thickness / 2.0,
        ))
    }

    /// Divertor structure ring, flush behind the firstwall.
    pub fn divertor_backwall(&self) -> Result<Solid> {
        let centre = self.params.divertor_centre();
        let d = &self.params.divertor;
        let half_width = d.width - d.gap;
        let ring = self.torus(centre - half_width, centre + half_width, d.thickness)?;
        Ok(ring.translate(
            0.0,
            0.0,
            self.chamber_floor_z() - d.firstwall_thickness - d.thickness / 2.0,
        ))
    }

    /// z of the chamber floor: the bottom face of the innermost wall.
    fn chamber_floor_z(&self) -> Real {
        let c = &self.params.containment;
        -c.containment_height / 2.0 + self.params.cumulative_outer(c.nr_layers())
    }

    /// Union of the transformer limbs, staggered from the port array.
    pub fn transformer_limbs(&self) -> Solid {
        let dims = self.params.limbs.dimensions;
        let limb = centred_box(dims.length, dims.width, self.params.limb_height())
            .translate(self.limb_distance(), 0.0, 0.0);
        let nr_limbs = self.params.limbs.nr_limbs;
        let step = 360.0 / nr_limbs as Real;
        let mut limbs = limb.clone();
        for i in 1..nr_limbs {
            limbs = limbs.union(&rotated_z(&limb, -(i as Real * step)));
        }
        rotated_z(&limbs, -LIMB_STAGGER_DEG)
    }

    /// Radial distance from the axis to a limb centre.
    fn limb_distance(&self) -> Real {
        self.params.limb_radius() + self.params.containment.outer_radius
    }

    /// Limiter firstwall: a thin torus against the outermost containment
    /// wall, intersected with the port array shrunk by `limiter_gap` so a
    /// plate remains in each port only.
    pub fn limiter_firstwall(&self) -> Result<Solid> {
        let wall = self.outer_wall_radius();
        let l = &self.params.limiter;
        let ring = self.torus(
            wall,
            wall + l.firstwall_thickness,
            self.params.solenoid.solenoid_height,
        )?;
        Ok(ring.intersection(&self.opening_array(l.limiter_gap)?))
    }

    /// Limiter backwall, stacked radially behind the firstwall plates.
    pub fn limiter_backwall(&self) -> Result<Solid> {
        let wall = self.outer_wall_radius();
        let l = &self.params.limiter;
        let ring = self.torus(
            wall + l.firstwall_thickness,
            wall + l.firstwall_thickness + l.limiter_thickness,
            self.params.solenoid.solenoid_height,
        )?;
        Ok(ring.intersection(&self.opening_array(l.limiter_gap)?))
    }

    /// Radius of the outermost containment wall's inner face.
    fn outer_wall_radius(&self) -> Real {
        self.params.containment.outer_radius
            - self
                .params
                .cumulative_outer(self.params.containment.nr_layers())
    }

    /// Detector spheres flanking one limb along its width axis, at the
    /// unrotated base position.
    pub fn sphere_pair(&self) -> (Solid, Solid) {
        let radius = self.params.limbs.sphere_radius;
        let offset = radius + self.params.limbs.dimensions.width / 2.0;
        let distance = self.limb_distance();
        let stacks = (self.segments / 2).max(2);
        let sphere = Solid::sphere(radius, self.segments, stacks, None);
        (
            sphere.translate(distance, offset, 0.0),
            sphere.translate(distance, -offset, 0.0),
        )
    }

    /// Sphere pairs replicated at every limb angle, carrying the same
    /// stagger as the limbs themselves.
    pub fn sphere_pair_array(&self) -> Vec<(Solid, Solid)> {
        let step = 360.0 / self.params.limbs.nr_limbs as Real;
        let (right, left) = self.sphere_pair();
        (0..self.params.limbs.nr_limbs)
            .map(|i| {
                let angle = -(i as Real * step + LIMB_STAGGER_DEG);
                (rotated_z(&right, angle), rotated_z(&left, angle))
            })
            .collect()
    }

    /// The plasma volume: the chamber torus set back from the innermost
    /// wall by `distance_from_plasma` on every side.
    pub fn plasma_source(&self) -> Result<Solid> {
        self.torus_from(self.params.plasma_bounds())
    }
}
