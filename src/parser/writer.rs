use std::fmt::Write;

use super::{BLOCK_TERMINATOR, END_MARKER};
use crate::molecule::{code_from_charge, Molecule, MoleculeSet};

/// Serialize one molecule as a V2000-style block (without `$$$$`).
///
/// The output reads back through [`super::parse`] with identical atom, bond
/// and property data, coordinates rounded to four decimals. The charge code
/// is written as the seventh atom token, where the reader expects it.
#[must_use]
pub fn write_molecule(mol: &Molecule) -> String {
    let mut out = String::new();
    for header in [&mol.title, &mol.program, &mol.comment] {
        out.push_str(header);
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
        mol.atoms.len(),
        mol.bonds.len()
    );

    for atom in &mol.atoms {
        let _ = writeln!(
            out,
            "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0{:>3}",
            atom.x,
            atom.y,
            atom.z,
            atom.symbol,
            code_from_charge(atom.charge)
        );
    }
    for bond in &mol.bonds {
        let _ = writeln!(
            out,
            "{:>3}{:>3}{:>3}  0",
            bond.a1,
            bond.a2,
            bond.order.code()
        );
    }
    out.push_str(END_MARKER);
    out.push('\n');

    for (name, value) in &mol.properties {
        let _ = writeln!(out, "> <{name}>");
        if !value.is_empty() {
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Serialize a whole set as SDF text, each block closed by `$$$$`.
#[must_use]
pub fn write_set(set: &MoleculeSet) -> String {
    set.molecules()
        .iter()
        .map(|mol| format!("{}{BLOCK_TERMINATOR}\n", write_molecule(mol)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const ETHANOL: &str = "\
ethanol
  hand-written
charged copy
  3  2  0  0  0  0  0  0  0  0999 V2000
   -0.8830    0.1600    0.0000 C   0  0  0
    0.6110   -0.1980    1.2500 C   0  0  0
    1.3870    1.0030   -0.4410 O   0  0  5
  1  2  1  0
  2  3  1  0
M  END
> <SOURCE>
test fixture
line two

$$$$
";

    #[test]
    fn written_block_reads_back_identically() {
        let original = parse(ETHANOL, "eoh").unwrap();
        let text = write_set(&original);
        let reparsed = parse(&text, "eoh").unwrap();
        assert_eq!(original, reparsed);
        assert_eq!(reparsed.first().atoms[2].charge, -1);
    }

    #[test]
    fn counts_line_matches_contents() {
        let original = parse(ETHANOL, "eoh").unwrap();
        let text = write_molecule(original.first());
        let counts = text.lines().nth(3).unwrap();
        let mut tokens = counts.split_whitespace();
        assert_eq!(tokens.next(), Some("3"));
        assert_eq!(tokens.next(), Some("2"));
        assert!(text.contains("\nM  END\n"));
    }
}
