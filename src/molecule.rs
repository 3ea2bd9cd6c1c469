//! Parsed molecular model: atoms, bonds, molecules and multi-molecule sets.
//!
//! Everything here is produced once by [`crate::parser::parse`] and is
//! immutable afterwards. Bond atom indices are kept exactly as written in the
//! source file (1-based, unchecked); range handling belongs to the geometry
//! stage.

use std::collections::BTreeMap;

use glam::DVec3;
use serde::Serialize;

/// Base URL of the RCSB ligand summary pages.
const LIGAND_DOC_BASE: &str = "https://www.rcsb.org/ligand";

/// A single atom record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atom {
    /// X coordinate in angstroms.
    pub x: f64,
    /// Y coordinate in angstroms.
    pub y: f64,
    /// Z coordinate in angstroms.
    pub z: f64,
    /// Element symbol, case preserved from the source file.
    pub symbol: String,
    /// Formal charge decoded from the atom record's charge code.
    pub charge: i32,
}

impl Atom {
    /// Atom center as a vector.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Symbol normalized for table lookups.
    #[must_use]
    pub fn normalized_symbol(&self) -> String {
        self.symbol.trim().to_uppercase()
    }
}

/// Map a molfile atom charge code to a formal charge.
///
/// Codes outside the table (including 0 and the doublet-radical code 4)
/// decode to a neutral atom.
#[must_use]
pub fn charge_from_code(code: i32) -> i32 {
    match code {
        1 => 3,
        2 => 2,
        3 => 1,
        5 => -1,
        6 => -2,
        7 => -3,
        _ => 0,
    }
}

/// Inverse of [`charge_from_code`] for charges representable in the table.
#[must_use]
pub fn code_from_charge(charge: i32) -> i32 {
    match charge {
        3 => 1,
        2 => 2,
        1 => 3,
        -1 => 5,
        -2 => 6,
        -3 => 7,
        _ => 0,
    }
}

/// Bond multiplicity as encoded in a bond record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BondOrder {
    /// Order code 1.
    Single,
    /// Order code 2.
    Double,
    /// Order code 3.
    Triple,
    /// Order code 4.
    Aromatic,
    /// Any other integer code (query bonds, malformed data).
    Other(i32),
}

impl BondOrder {
    /// Decode a raw bond order code.
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Single,
            2 => Self::Double,
            3 => Self::Triple,
            4 => Self::Aromatic,
            other => Self::Other(other),
        }
    }

    /// The raw code as written in a bond record.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Aromatic => 4,
            Self::Other(code) => code,
        }
    }

    /// Number of parallel strands drawn for this order.
    ///
    /// Aromatic bonds draw like double bonds; unknown codes draw as a single
    /// strand.
    #[must_use]
    pub fn strand_count(self) -> usize {
        match self {
            Self::Double | Self::Aromatic => 2,
            Self::Triple => 3,
            Self::Single | Self::Other(_) => 1,
        }
    }
}

/// A single bond record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bond {
    /// First atom, 1-based as written in the file.
    pub a1: i64,
    /// Second atom, 1-based as written in the file.
    pub a2: i64,
    /// Bond order.
    pub order: BondOrder,
}

impl Bond {
    /// Zero-based atom indices clamped into `[0, atom_count - 1]`.
    ///
    /// Returns `None` for a molecule without atoms.
    #[must_use]
    pub fn clamped_indices(&self, atom_count: usize) -> Option<(usize, usize)> {
        let last = atom_count.checked_sub(1)?;
        let clamp = |one_based: i64| -> usize {
            let zero_based = one_based.saturating_sub(1).max(0);
            usize::try_from(zero_based).map_or(last, |i| i.min(last))
        };
        Some((clamp(self.a1), clamp(self.a2)))
    }
}

/// One molecule block.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Molecule {
    /// First header line.
    pub title: String,
    /// Second header line (program / timestamp).
    pub program: String,
    /// Third header line.
    pub comment: String,
    /// Atoms in declaration order.
    pub atoms: Vec<Atom>,
    /// Bonds in declaration order.
    pub bonds: Vec<Bond>,
    /// Data items from the trailing property section.
    pub properties: BTreeMap<String, String>,
}

impl Molecule {
    /// Look up a property value by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Sum of formal charges over all atoms.
    #[must_use]
    pub fn net_charge(&self) -> i32 {
        self.atoms.iter().map(|a| a.charge).sum()
    }
}

/// All molecules parsed from one file. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleculeSet {
    /// Caller-supplied identifier (typically a ligand code).
    pub id: String,
    pub(crate) molecules: Vec<Molecule>,
}

impl MoleculeSet {
    /// Molecules in source order.
    #[must_use]
    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    /// First molecule of the file.
    #[must_use]
    pub fn first(&self) -> &Molecule {
        // Constructed only by the parser, which rejects empty input.
        &self.molecules[0]
    }

    /// Number of molecules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }

    /// Consume the set, yielding owned molecules.
    #[must_use]
    pub fn into_molecules(self) -> Vec<Molecule> {
        self.molecules
    }

    /// RCSB summary page for this ligand id.
    #[must_use]
    pub fn doc_url(&self) -> String {
        format!("{LIGAND_DOC_BASE}/{}", self.id.trim().to_uppercase())
    }
}
