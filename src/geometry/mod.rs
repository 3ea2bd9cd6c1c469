//! Render geometry for parsed molecules.
//!
//! [`MoleculeGeometryBuilder`] turns a [`crate::molecule::Molecule`] into a
//! flat list of [`RenderPrimitive`]s: atom spheres or boxes, and bond
//! cylinders trimmed to the atom envelopes with parallel strands for
//! multiple bonds. Output order is deterministic: atoms in declaration
//! order, then bonds in declaration order.

mod builder;
mod style;
pub mod vector;

pub use builder::MoleculeGeometryBuilder;
use glam::DVec3;
use serde::Serialize;
pub use style::{AtomShape, BondMetrics, GeometryStyle, StrandStyle};
pub use vector::Orientation;

/// One atom's sphere or box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomPrimitive {
    /// Index of the atom in its molecule.
    pub index: usize,
    /// Uppercased element symbol.
    pub symbol: String,
    /// Envelope shape.
    pub shape: AtomShape,
    /// Sphere radius, or cube half-extent.
    pub radius: f64,
    /// Atom center, verbatim from the file.
    pub center: DVec3,
    /// RGB color.
    pub color: [f32; 3],
}

/// Role of a bond cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrandKind {
    /// Single bond, or the central strand of an odd multiple bond.
    Primary,
    /// Straight flanking strand of a multiple bond.
    Secondary,
    /// One piece of a curved flanking strand.
    CurveSegment,
}

/// A cylinder between two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondPrimitive {
    /// First end cap center.
    pub start: DVec3,
    /// Second end cap center.
    pub end: DVec3,
    /// Cylinder radius.
    pub radius: f64,
    /// RGB color.
    pub color: [f32; 3],
    /// Strand role.
    pub kind: StrandKind,
    /// Rotation of a unit +Y cylinder onto the segment.
    pub orientation: Option<Orientation>,
}

impl BondPrimitive {
    /// Midpoint, where a unit cylinder should be translated to.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.start + self.end) * 0.5
    }

    /// Cylinder height.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Anything the scene layer has to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderPrimitive {
    /// An atom envelope.
    Atom(AtomPrimitive),
    /// A bond cylinder.
    Bond(BondPrimitive),
}

impl RenderPrimitive {
    /// The atom primitive, if this is one.
    #[must_use]
    pub fn as_atom(&self) -> Option<&AtomPrimitive> {
        match self {
            Self::Atom(atom) => Some(atom),
            Self::Bond(_) => None,
        }
    }

    /// The bond primitive, if this is one.
    #[must_use]
    pub fn as_bond(&self) -> Option<&BondPrimitive> {
        match self {
            Self::Bond(bond) => Some(bond),
            Self::Atom(_) => None,
        }
    }
}
