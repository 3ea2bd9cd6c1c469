use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Perpendicular spacing between parallel strands, in bond radii.
const STRAND_SPACING: f64 = 1.8;

/// Secondary strand radius relative to the primary.
const SECONDARY_RADIUS_SCALE: f64 = 0.85;

/// Envelope used for an atom and for trimming its bonds.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AtomShape {
    /// Sphere of the atom radius.
    Sphere,
    /// Axis-aligned cube with half-extent equal to the atom radius.
    Box,
}

/// Overall molecule representation.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum GeometryStyle {
    /// Scaled spheres joined by cylinders.
    #[default]
    BallAndStick,
    /// Scaled cubes joined by cylinders.
    BoxAndStick,
    /// Thin center-to-center bonds, no atoms.
    Wireframe,
    /// Van der Waals spheres, no bonds.
    SpaceFilling,
}

/// How the non-central strands of a multiple bond are drawn.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StrandStyle {
    /// Parallel straight cylinders.
    #[default]
    Straight,
    /// Outward-bowed quadratic curves split into short cylinders.
    Curved,
}

/// Radii and spacing for one style's bond strands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondMetrics {
    /// Radius of a single or central strand.
    pub radius: f64,
    /// Radius of flanking strands.
    pub secondary_radius: f64,
    /// Center-to-center distance between neighboring strands.
    pub spacing: f64,
}

impl GeometryStyle {
    /// Envelope of atom primitives, `None` when atoms are not drawn.
    #[must_use]
    pub fn atom_shape(self) -> Option<AtomShape> {
        match self {
            Self::BallAndStick | Self::SpaceFilling => Some(AtomShape::Sphere),
            Self::BoxAndStick => Some(AtomShape::Box),
            Self::Wireframe => None,
        }
    }

    /// Envelope bonds are trimmed against; `None` runs bonds center to
    /// center.
    #[must_use]
    pub fn bond_trim_shape(self) -> Option<AtomShape> {
        match self {
            Self::Wireframe => None,
            other => other.atom_shape(),
        }
    }

    /// Whether bond primitives are emitted at all.
    #[must_use]
    pub fn draws_bonds(self) -> bool {
        !matches!(self, Self::SpaceFilling)
    }

    /// Strand dimensions for a base bond radius.
    #[must_use]
    pub fn bond_metrics(self, base_radius: f64) -> BondMetrics {
        match self {
            Self::Wireframe => BondMetrics {
                radius: base_radius * 0.5,
                secondary_radius: base_radius * 0.45,
                spacing: base_radius,
            },
            _ => BondMetrics {
                radius: base_radius,
                secondary_radius: base_radius * SECONDARY_RADIUS_SCALE,
                spacing: base_radius * STRAND_SPACING,
            },
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::BallAndStick => "Ball & Stick",
            Self::BoxAndStick => "Box & Stick",
            Self::Wireframe => "Wireframe",
            Self::SpaceFilling => "Space-filling (CPK)",
        }
    }
}
