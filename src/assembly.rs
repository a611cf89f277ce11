//! Full-reactor orchestration: every body constructed, exported and
//! declared in the simulation deck, in a fixed order.
//!
//! Build order: bounding box, plasma, solenoid, containment layers (port and
//! divertor cuts applied), transformer-limb union, detector sphere pairs,
//! limiter firstwall/backwall, divertor firstwall/backwall. Reactor bodies
//! are declared at one deck cursor, detector spheres at a second.

use log::info;

use crate::deck::{CursorId, Deck};
use crate::errors::Result;
use crate::export::Exporter;
use crate::float_types::Real;
use crate::reactor::{Reactor, Solid};

/// Material ids assigned to each exported body.
#[derive(Debug, Clone)]
pub struct BodyMaterials {
    pub bounding_box: String,
    pub plasma: String,
    pub solenoid: String,
    /// Cycled through the containment layers, innermost first.
    pub containment: Vec<String>,
    pub limbs: String,
    pub spheres: String,
    pub limiter_firstwall: String,
    pub limiter_backwall: String,
    pub divertor_firstwall: String,
    pub divertor_backwall: String,
}

impl Default for BodyMaterials {
    fn default() -> Self {
        Self {
            bounding_box: "m21_1".to_string(),
            plasma: "void".to_string(),
            solenoid: "m8_1".to_string(),
            containment: [
                "m10_1", "m12_1", "m11_1", "m10_2", "m13_1", "m6_1", "void", "m14_1",
            ]
            .map(String::from)
            .to_vec(),
            limbs: "m8_1".to_string(),
            spheres: "void".to_string(),
            limiter_firstwall: "m16_1".to_string(),
            limiter_backwall: "m16_2".to_string(),
            divertor_firstwall: "m17_1".to_string(),
            divertor_backwall: "m17_2".to_string(),
        }
    }
}

impl BodyMaterials {
    fn containment_material(&self, layer: usize) -> &str {
        if self.containment.is_empty() {
            return "void";
        }
        &self.containment[layer % self.containment.len()]
    }
}

/// Settings for one full build run.
#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    /// 1-based deck line where reactor-body records are injected.
    pub body_line: usize,
    /// 1-based deck line where detector records are injected.
    pub detector_line: usize,
    /// Scale factor written into every `file` record.
    pub scale: Real,
    pub materials: BodyMaterials,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            body_line: 28,
            detector_line: 68,
            scale: 1.0,
            materials: BodyMaterials::default(),
        }
    }
}

/// Sequences the build, owns the exporter and the deck cursors.
pub struct Assembly<'a> {
    reactor: &'a Reactor,
    exporter: Exporter,
    options: AssemblyOptions,
}

impl<'a> Assembly<'a> {
    pub fn new(reactor: &'a Reactor, exporter: Exporter, options: AssemblyOptions) -> Self {
        Self {
            reactor,
            exporter,
            options,
        }
    }

    /// Build, export and declare every body, injecting records into `deck`.
    pub fn run(&self, deck: &mut Deck) -> Result<()> {
        let bodies = deck.cursor(self.options.body_line);
        let detectors = deck.cursor(self.options.detector_line);
        let materials = &self.options.materials;

        self.emit(
            deck,
            bodies,
            "bbox",
            &self.reactor.bounding_box(),
            &materials.bounding_box,
            true,
        )?;

        let plasma = self
            .reactor
            .plasma_source()
            .map_err(|e| e.for_body("plasma"))?;
        self.emit(deck, bodies, "plasma", &plasma, &materials.plasma, true)?;

        self.emit(
            deck,
            bodies,
            "solenoid",
            &self.reactor.central_solenoid(),
            &materials.solenoid,
            true,
        )?;

        let layers = self
            .reactor
            .containment_with_divertor_and_ports()
            .map_err(|e| e.for_body("containment"))?;
        for (i, layer) in layers.iter().enumerate() {
            let name = format!("containment{}", i + 1);
            self.emit(
                deck,
                bodies,
                &name,
                layer,
                materials.containment_material(i),
                true,
            )?;
        }

        self.emit(
            deck,
            bodies,
            "limb",
            &self.reactor.transformer_limbs(),
            &materials.limbs,
            true,
        )?;

        // Detector spheres form their own record group at the second cursor
        // and carry no group terminator.
        for (i, (right, left)) in self.reactor.sphere_pair_array().iter().enumerate() {
            let right_name = format!("sphere{}", 2 * i);
            let left_name = format!("sphere{}", 2 * i + 1);
            self.emit(deck, detectors, &right_name, right, &materials.spheres, false)?;
            self.emit(deck, detectors, &left_name, left, &materials.spheres, false)?;
        }

        let limiter_fw = self
            .reactor
            .limiter_firstwall()
            .map_err(|e| e.for_body("limiter_firstwall"))?;
        self.emit(
            deck,
            bodies,
            "limiter_firstwall",
            &limiter_fw,
            &materials.limiter_firstwall,
            true,
        )?;
        let limiter_bw = self
            .reactor
            .limiter_backwall()
            .map_err(|e| e.for_body("limiter_backwall"))?;
        self.emit(
            deck,
            bodies,
            "limiter_backwall",
            &limiter_bw,
            &materials.limiter_backwall,
            true,
        )?;

        let divertor_fw = self
            .reactor
            .divertor_firstwall()
            .map_err(|e| e.for_body("divertor_firstwall"))?;
        self.emit(
            deck,
            bodies,
            "divertor_firstwall",
            &divertor_fw,
            &materials.divertor_firstwall,
            true,
        )?;
        let divertor_bw = self
            .reactor
            .divertor_backwall()
            .map_err(|e| e.for_body("divertor_backwall"))?;
        self.emit(
            deck,
            bodies,
            "divertor_backwall",
            &divertor_bw,
            &materials.divertor_backwall,
            true,
        )?;

        Ok(())
    }

    /// Export one body and inject its body/file records at `cursor`.
    fn emit(
        &self,
        deck: &mut Deck,
        cursor: CursorId,
        name: &str,
        solid: &Solid,
        material: &str,
        last: bool,
    ) -> Result<()> {
        let path = self
            .exporter
            .write_stl(solid, name)
            .map_err(|e| e.for_body(name))?;
        info!(
            "exported {name} ({} polygons) -> {}",
            solid.polygons.len(),
            path.display()
        );
        deck.body(cursor, name, material);
        deck.file(
            cursor,
            name,
            &path.display().to_string(),
            self.options.scale,
            last,
        );
        Ok(())
    }
}
