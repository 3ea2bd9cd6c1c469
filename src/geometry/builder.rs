use glam::DVec3;

use super::vector::{
    find_perpendicular, quadratic_point, surface_offset, Orientation, EPSILON,
};
use super::{
    AtomPrimitive, BondPrimitive, GeometryStyle, RenderPrimitive, StrandKind,
    StrandStyle,
};
use crate::elements::ElementTable;
use crate::molecule::{Atom, BondOrder, Molecule};
use crate::options::{GeometryOptions, DEFAULT_BOND_COLOR};

/// Builds render primitives for one molecule at a time.
///
/// Holds only borrowed, read-only state, so one builder can be shared across
/// threads and its methods called for atoms and bonds in any order.
pub struct MoleculeGeometryBuilder<'a, E: ElementTable + ?Sized> {
    options: &'a GeometryOptions,
    elements: &'a E,
    bond_color: [f32; 3],
}

impl<'a, E: ElementTable + ?Sized> MoleculeGeometryBuilder<'a, E> {
    /// Create a builder using `elements` for per-symbol radius and color.
    pub fn new(options: &'a GeometryOptions, elements: &'a E) -> Self {
        Self {
            options,
            elements,
            bond_color: DEFAULT_BOND_COLOR,
        }
    }

    /// Override the bond cylinder color.
    #[must_use]
    pub fn with_bond_color(mut self, color: [f32; 3]) -> Self {
        self.bond_color = color;
        self
    }

    fn style(&self) -> GeometryStyle {
        self.options.style
    }

    /// Display radius of an atom with this symbol under the current style.
    #[must_use]
    pub fn atom_radius(&self, symbol: &str) -> f64 {
        let symbol = symbol.trim().to_uppercase();
        match self.style() {
            GeometryStyle::SpaceFilling => {
                self.elements.vdw_radius_for_symbol(&symbol)
            }
            _ => {
                self.options.atom_base_radius
                    * self.elements.scale_for_symbol(&symbol)
            }
        }
    }

    /// Envelope for one atom, or `None` when the style draws no atoms.
    #[must_use]
    pub fn build_atom_primitive(
        &self,
        atom: &Atom,
        index: usize,
    ) -> Option<AtomPrimitive> {
        let shape = self.style().atom_shape()?;
        let symbol = atom.normalized_symbol();
        Some(AtomPrimitive {
            index,
            shape,
            radius: self.atom_radius(&symbol),
            center: atom.position(),
            color: self.elements.color_for_symbol(&symbol),
            symbol,
        })
    }

    /// Cylinders for one bond between atom centers `a` and `b`.
    ///
    /// Bonds are trimmed to the atom envelopes (`radius_a`, `radius_b`).
    /// Multiple bonds fan out into parallel strands along a fixed
    /// perpendicular; odd orders keep a straight primary strand on the axis.
    /// Coincident atoms, or envelopes that swallow the whole bond, yield no
    /// cylinders.
    #[must_use]
    pub fn build_bond_primitives(
        &self,
        order: BondOrder,
        a: DVec3,
        b: DVec3,
        radius_a: f64,
        radius_b: f64,
    ) -> Vec<BondPrimitive> {
        let Some(u) = (b - a).try_normalize() else {
            return Vec::new();
        };

        let trim = self.style().bond_trim_shape();
        let start = a + u * surface_offset(trim, radius_a, u);
        let end = b - u * surface_offset(trim, radius_b, u);
        if (end - start).dot(u) <= EPSILON {
            return Vec::new();
        }

        let metrics = self.style().bond_metrics(self.options.bond_base_radius);
        let strands = order.strand_count();
        let mut out = Vec::with_capacity(strands);

        if strands % 2 == 1 {
            out.push(self.cylinder(start, end, metrics.radius, StrandKind::Primary));
        }
        if strands == 1 {
            return out;
        }

        let lateral = find_perpendicular(u);
        let half = (strands - 1) as f64 / 2.0;
        for k in 0..strands {
            let slot = k as f64 - half;
            if slot == 0.0 {
                continue;
            }
            let offset = lateral * (slot * metrics.spacing);
            match self.options.strand_style {
                StrandStyle::Straight => out.push(self.cylinder(
                    start + offset,
                    end + offset,
                    metrics.secondary_radius,
                    StrandKind::Secondary,
                )),
                StrandStyle::Curved => {
                    let bow = lateral
                        * (slot.signum() * self.options.curve_bow * metrics.spacing);
                    self.push_curved_strand(
                        [start + offset, end + offset],
                        bow,
                        metrics.secondary_radius,
                        &mut out,
                    );
                }
            }
        }
        out
    }

    /// All primitives for a molecule: atoms first, then bonds.
    ///
    /// Bond indices are converted to 0-based and clamped into the atom
    /// range; a bond whose ends clamp onto the same atom is skipped.
    #[must_use]
    pub fn build(&self, molecule: &Molecule) -> Vec<RenderPrimitive> {
        let atom_count = molecule.atoms.len();
        let mut out = Vec::with_capacity(atom_count + molecule.bonds.len());

        out.extend(
            molecule
                .atoms
                .iter()
                .enumerate()
                .filter_map(|(i, atom)| self.build_atom_primitive(atom, i))
                .map(RenderPrimitive::Atom),
        );

        if !self.style().draws_bonds() {
            return out;
        }

        for bond in &molecule.bonds {
            let Some((i1, i2)) = bond.clamped_indices(atom_count) else {
                break;
            };
            if (i1 as i64 + 1, i2 as i64 + 1) != (bond.a1, bond.a2) {
                log::warn!(
                    "bond {}-{} out of range for {atom_count} atoms, drawn as {}-{}",
                    bond.a1,
                    bond.a2,
                    i1 + 1,
                    i2 + 1
                );
            }
            if i1 == i2 {
                log::debug!("skipping bond {}-{}: same atom", bond.a1, bond.a2);
                continue;
            }

            let (atom_a, atom_b) = (&molecule.atoms[i1], &molecule.atoms[i2]);
            let cylinders = self.build_bond_primitives(
                bond.order,
                atom_a.position(),
                atom_b.position(),
                self.atom_radius(&atom_a.symbol),
                self.atom_radius(&atom_b.symbol),
            );
            if cylinders.is_empty() {
                log::debug!("bond {}-{} is degenerate", bond.a1, bond.a2);
            }
            out.extend(cylinders.into_iter().map(RenderPrimitive::Bond));
        }

        log::debug!(
            "built {} primitives for '{}' ({} atoms, {} bonds)",
            out.len(),
            molecule.title.trim(),
            atom_count,
            molecule.bonds.len()
        );
        out
    }

    fn cylinder(
        &self,
        start: DVec3,
        end: DVec3,
        radius: f64,
        kind: StrandKind,
    ) -> BondPrimitive {
        BondPrimitive {
            start,
            end,
            radius,
            color: self.bond_color,
            kind,
            orientation: Orientation::aligning(end - start),
        }
    }

    /// Quadratic strand through a control point displaced by `bow` from the
    /// chord midpoint, split into `curve_segments` cylinders.
    fn push_curved_strand(
        &self,
        [p0, p2]: [DVec3; 2],
        bow: DVec3,
        radius: f64,
        out: &mut Vec<BondPrimitive>,
    ) {
        let p1 = (p0 + p2) * 0.5 + bow;
        let segments = self.options.curve_segments.max(1);
        let mut prev = p0;
        for i in 1..=segments {
            let next = quadratic_point(p0, p1, p2, f64::from(i) / f64::from(segments));
            out.push(self.cylinder(prev, next, radius, StrandKind::CurveSegment));
            prev = next;
        }
    }
}
