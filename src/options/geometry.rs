use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryStyle, StrandStyle};

/// Sizes and style of ligand render primitives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
pub struct GeometryOptions {
    /// Overall representation.
    #[schemars(title = "Style")]
    pub style: GeometryStyle,
    /// Shape of the flanking strands of multiple bonds.
    #[schemars(title = "Strands")]
    pub strand_style: StrandStyle,
    /// Atom radius before per-element scaling, in angstroms.
    #[schemars(title = "Atom Radius", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub atom_base_radius: f64,
    /// Single-bond cylinder radius, in angstroms.
    #[schemars(title = "Bond Radius", range(min = 0.01, max = 0.3), extend("step" = 0.005))]
    pub bond_base_radius: f64,
    /// Cylinders per curved strand.
    #[schemars(title = "Curve Segments", range(min = 1, max = 32))]
    pub curve_segments: u32,
    /// Outward bulge of curved strands, in strand spacings.
    #[schemars(title = "Curve Bow", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub curve_bow: f64,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            style: GeometryStyle::default(),
            strand_style: StrandStyle::default(),
            atom_base_radius: 0.22,
            bond_base_radius: 0.07,
            curve_segments: 6,
            curve_bow: 0.5,
        }
    }
}
