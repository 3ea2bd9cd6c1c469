use std::collections::BTreeMap;

use super::{ParseError, BLOCK_TERMINATOR, END_MARKER};
use crate::molecule::{charge_from_code, Atom, Bond, BondOrder, Molecule, MoleculeSet};

/// Parse molfile/SDF text into every molecule it contains.
///
/// Blocks are separated by `$$$$`. Each block must carry the three header
/// lines, a counts line, the declared atom and bond records and an `M  END`
/// line; an optional data-item section may follow. The first failing block
/// fails the whole call.
pub fn parse(text: &str, id: &str) -> Result<MoleculeSet, ParseError> {
    let mut molecules = Vec::new();
    let mut line_base = 1;

    for raw in text.split(BLOCK_TERMINATOR) {
        let trimmed_start = raw.trim_start();
        let block = trimmed_start.trim_end();
        if !block.is_empty() {
            let skipped = &raw[..raw.len() - trimmed_start.len()];
            let first_line = line_base + skipped.matches('\n').count();
            molecules.push(parse_block(block, first_line)?);
        }
        line_base += raw.matches('\n').count();
    }

    if molecules.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    log::debug!("parsed {} molecule(s) for '{id}'", molecules.len());
    Ok(MoleculeSet {
        id: id.to_owned(),
        molecules,
    })
}

/// Forward-only cursor over the lines of one block.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    first_line: usize,
}

impl<'a> LineCursor<'a> {
    fn new(lines: Vec<&'a str>, first_line: usize) -> Self {
        Self {
            lines,
            pos: 0,
            first_line,
        }
    }

    fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    /// Input line number of the next unread line.
    fn line_number(&self) -> usize {
        self.first_line + self.pos
    }

    /// Input line number of the block's last line.
    fn last_line_number(&self) -> usize {
        self.first_line + self.lines.len().saturating_sub(1)
    }

    fn next(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line)
    }

    /// Consume exactly `n` lines, or nothing if fewer remain.
    fn take(&mut self, n: usize) -> Option<&[&'a str]> {
        if self.remaining() < n {
            return None;
        }
        let start = self.pos;
        self.pos += n;
        Some(&self.lines[start..self.pos])
    }

    /// Consume lines while `keep` holds; the first rejected line stays
    /// unread.
    fn take_while(&mut self, keep: impl Fn(&str) -> bool) -> &[&'a str] {
        let start = self.pos;
        while self.lines.get(self.pos).is_some_and(|l| keep(l)) {
            self.pos += 1;
        }
        &self.lines[start..self.pos]
    }

    /// Advance past the first line matching `pred`. Returns whether one was
    /// found.
    fn skip_past(&mut self, pred: impl Fn(&str) -> bool) -> bool {
        while let Some(line) = self.next() {
            if pred(line) {
                return true;
            }
        }
        false
    }
}

fn parse_block(block: &str, first_line: usize) -> Result<Molecule, ParseError> {
    let mut lines: Vec<&str> =
        block.lines().map(|l| l.trim_end_matches('\r')).collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        let _ = lines.pop();
    }

    let mut cursor = LineCursor::new(lines, first_line);
    let counts_line_no = first_line + 3;
    let Some(&[title, program, comment, counts]) = cursor.take(4) else {
        return Err(ParseError::InvalidHeader {
            line: counts_line_no,
        });
    };
    let (atom_count, bond_count) = parse_counts(counts).ok_or(
        ParseError::InvalidHeader {
            line: counts_line_no,
        },
    )?;

    let atoms = parse_records(&mut cursor, atom_count, parse_atom_record)
        .map_err(|line| ParseError::InvalidAtomRecord { line })?;
    let bonds = parse_records(&mut cursor, bond_count, parse_bond_record)
        .map_err(|line| ParseError::InvalidBondRecord { line })?;

    if !cursor.skip_past(|l| l.trim_start().starts_with(END_MARKER)) {
        return Err(ParseError::MissingTerminator {
            line: cursor.last_line_number(),
        });
    }

    let properties = parse_properties(&mut cursor);

    Ok(Molecule {
        title: title.to_owned(),
        program: program.to_owned(),
        comment: comment.to_owned(),
        atoms,
        bonds,
        properties,
    })
}

/// Parse `count` consecutive records. On failure returns the input line
/// number of the malformed (or first missing) record.
fn parse_records<T>(
    cursor: &mut LineCursor<'_>,
    count: usize,
    parse_one: fn(&str) -> Option<T>,
) -> Result<Vec<T>, usize> {
    let start = cursor.line_number();
    let missing = start + cursor.remaining();
    let lines = cursor.take(count).ok_or(missing)?;
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| parse_one(line).ok_or(start + i))
        .collect()
}

fn parse_counts(line: &str) -> Option<(usize, usize)> {
    let mut tokens = line.split_whitespace();
    let atoms = tokens.next()?.parse().ok()?;
    let bonds = tokens.next()?.parse().ok()?;
    Some((atoms, bonds))
}

fn parse_atom_record(line: &str) -> Option<Atom> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return None;
    }
    let x = tokens[0].parse().ok()?;
    let y = tokens[1].parse().ok()?;
    let z = tokens[2].parse().ok()?;
    let charge = tokens
        .get(6)
        .and_then(|t| t.parse::<i32>().ok())
        .map_or(0, charge_from_code);

    Some(Atom {
        x,
        y,
        z,
        symbol: tokens[3].to_owned(),
        charge,
    })
}

fn parse_bond_record(line: &str) -> Option<Bond> {
    let mut tokens = line.split_whitespace();
    let a1 = tokens.next()?.parse().ok()?;
    let a2 = tokens.next()?.parse().ok()?;
    let order = tokens.next()?.parse().ok()?;
    Some(Bond {
        a1,
        a2,
        order: BondOrder::from_code(order),
    })
}

/// Collect `> <NAME>` data items. Anything else is skipped.
fn parse_properties(cursor: &mut LineCursor<'_>) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    while let Some(line) = cursor.next() {
        if !line.trim_start().starts_with('>') {
            continue;
        }
        let Some(name) = property_name(line) else {
            continue;
        };
        let values = cursor.take_while(|l| {
            !l.trim().is_empty() && !l.trim_start().starts_with('>')
        });
        let _ = properties.insert(name.to_owned(), values.join("\n"));
    }
    properties
}

/// Text between the first `<` and the next `>` after it. `> <>` yields an
/// empty name, which is kept like any other.
fn property_name(line: &str) -> Option<&str> {
    let open = line.find('<')?;
    let rest = &line[open + 1..];
    Some(&rest[..rest.find('>')?])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Title\nProg\nComment\n  2  1  0  0  0\n    0.0000    0.0000    0.0000 C   0  0\n    1.5000    0.0000    0.0000 O   0  0\n  1  2  2  0\nM  END\n$$$$";

    fn block(atoms: &[&str], bonds: &[&str], tail: &str) -> String {
        let mut s = format!(
            "mol\n  prog\n\n{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000\n",
            atoms.len(),
            bonds.len()
        );
        for line in atoms.iter().chain(bonds) {
            s.push_str(line);
            s.push('\n');
        }
        s.push_str(tail);
        s
    }

    #[test]
    fn parses_sample_molecule() {
        let set = parse(SAMPLE, "co").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.id, "co");

        let mol = set.first();
        assert_eq!(mol.title, "Title");
        assert_eq!(mol.program, "Prog");
        assert_eq!(mol.comment, "Comment");
        assert_eq!(mol.atoms.len(), 2);
        assert_eq!(mol.atoms[0].symbol, "C");
        assert_eq!(mol.atoms[1].symbol, "O");
        assert_eq!(mol.atoms[1].x, 1.5);
        assert_eq!(mol.bonds.len(), 1);
        assert_eq!(mol.bonds[0].order, BondOrder::Double);
        assert_eq!((mol.bonds[0].a1, mol.bonds[0].a2), (1, 2));
    }

    #[test]
    fn splits_multiple_blocks_in_order() {
        let a = SAMPLE.replace("Title", "first");
        let b = SAMPLE.replace("Title", "second");
        let c = SAMPLE.replace("Title", "third");
        let text = format!("{a}\n{b}\n\n{c}\n");
        let set = parse(&text, "multi").unwrap();
        let titles: Vec<&str> =
            set.molecules().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse("", "x"), Err(ParseError::EmptyInput));
        assert_eq!(parse("  \n$$$$\n\n$$$$  ", "x"), Err(ParseError::EmptyInput));
    }

    #[test]
    fn short_header_is_rejected() {
        let err = parse("only\nthree\nlines", "x").unwrap_err();
        assert_eq!(err, ParseError::InvalidHeader { line: 4 });
    }

    #[test]
    fn non_numeric_counts_are_rejected() {
        let err = parse("t\np\nc\n  a  1\nM  END", "x").unwrap_err();
        assert_eq!(err, ParseError::InvalidHeader { line: 4 });

        let err = parse("t\np\nc\n  3\nM  END", "x").unwrap_err();
        assert_eq!(err, ParseError::InvalidHeader { line: 4 });

        let err = parse("t\np\nc\n -1  0\nM  END", "x").unwrap_err();
        assert_eq!(err, ParseError::InvalidHeader { line: 4 });
    }

    #[test]
    fn malformed_atom_reports_its_line() {
        let text = block(
            &["    0.0000    0.0000    0.0000 C   0  0", "    1.0 abc 0.0 N"],
            &[],
            "M  END\n",
        );
        assert_eq!(
            parse(&text, "x").unwrap_err(),
            ParseError::InvalidAtomRecord { line: 6 }
        );

        let text = block(&["    1.0 2.0 3.0"], &[], "M  END\n");
        assert_eq!(
            parse(&text, "x").unwrap_err(),
            ParseError::InvalidAtomRecord { line: 5 }
        );
    }

    #[test]
    fn truncated_atom_block_is_rejected() {
        let text = "t\np\nc\n  3  0\n 0.0 0.0 0.0 C\n";
        assert!(matches!(
            parse(text, "x").unwrap_err(),
            ParseError::InvalidAtomRecord { .. }
        ));
    }

    #[test]
    fn malformed_bond_reports_its_line() {
        let text = block(
            &[" 0.0 0.0 0.0 C", " 1.0 0.0 0.0 C"],
            &["  1  2"],
            "M  END\n",
        );
        assert_eq!(
            parse(&text, "x").unwrap_err(),
            ParseError::InvalidBondRecord { line: 7 }
        );
    }

    #[test]
    fn missing_terminator_fails_whole_parse() {
        let text = SAMPLE.replace("M  END\n", "");
        assert!(matches!(
            parse(&text, "x").unwrap_err(),
            ParseError::MissingTerminator { .. }
        ));

        // A valid first block does not rescue a broken second one.
        let text = format!("{SAMPLE}\n{}", SAMPLE.replace("M  END", "M  CHG"));
        assert!(matches!(
            parse(&text, "x").unwrap_err(),
            ParseError::MissingTerminator { .. }
        ));
    }

    #[test]
    fn errors_in_later_blocks_use_file_line_numbers() {
        let bad = block(&[" 0.0 0.0 0.0 C", " x 0.0 0.0 C"], &[], "M  END\n");
        let text = format!("{SAMPLE}\n{bad}$$$$\n");
        // SAMPLE spans lines 1-9, the bad block starts on line 10.
        assert_eq!(
            parse(&text, "x").unwrap_err(),
            ParseError::InvalidAtomRecord { line: 15 }
        );
    }

    #[test]
    fn charge_code_is_the_seventh_token() {
        let text = block(
            &[
                " 0.0 0.0 0.0 N 0 0 3",
                " 1.0 0.0 0.0 O 0 0 5",
                " 2.0 0.0 0.0 Fe 0 0 1",
                " 3.0 0.0 0.0 C 0 0 4",
                " 4.0 0.0 0.0 C 0 0 x",
                " 5.0 0.0 0.0 C 0 3",
            ],
            &[],
            "M  END\n",
        );
        let set = parse(&text, "x").unwrap();
        let charges: Vec<i32> =
            set.first().atoms.iter().map(|a| a.charge).collect();
        assert_eq!(charges, [1, -1, 3, 0, 0, 0]);
    }

    #[test]
    fn tolerates_crlf_and_tabs() {
        let text = "t\r\np\r\nc\r\n\t1\t0\r\n0.5\t-1.25\t2e1\tcl\r\nM  END\r\n";
        let mol = parse(text, "x").unwrap().into_molecules().remove(0);
        assert_eq!(mol.atoms[0].symbol, "cl");
        assert_eq!(mol.atoms[0].y, -1.25);
        assert_eq!(mol.atoms[0].z, 20.0);
    }

    #[test]
    fn reads_properties_after_terminator() {
        let tail = "M  CHG  1   1   1\nM  END\n> <PUBCHEM_ID>\n2244\n\n>  <SYNONYMS>  (1)\naspirin\nacetylsalicylic acid\n> <EMPTY>\n\nstray text\n> no name here\n";
        let text = block(&[" 0.0 0.0 0.0 C"], &[], tail);
        let mol = parse(&text, "x").unwrap().into_molecules().remove(0);

        assert_eq!(mol.property("PUBCHEM_ID"), Some("2244"));
        assert_eq!(
            mol.property("SYNONYMS"),
            Some("aspirin\nacetylsalicylic acid")
        );
        assert_eq!(mol.property("EMPTY"), Some(""));
        assert_eq!(mol.properties.len(), 3);
    }

    #[test]
    fn empty_property_name_is_stored() {
        let tail = "M  END\n> <>\nval\n\n> <NAME>\nx\n";
        let text = block(&[" 0.0 0.0 0.0 C"], &[], tail);
        let mol = parse(&text, "x").unwrap().into_molecules().remove(0);
        assert_eq!(mol.property(""), Some("val"));
        assert_eq!(mol.property("NAME"), Some("x"));
    }

    #[test]
    fn redeclared_property_keeps_last_value() {
        let tail = "M  END\n> <NAME>\nfirst\n\n> <NAME>\nsecond\n";
        let text = block(&[" 0.0 0.0 0.0 C"], &[], tail);
        let mol = parse(&text, "x").unwrap().into_molecules().remove(0);
        assert_eq!(mol.property("NAME"), Some("second"));
    }

    #[test]
    fn out_of_range_bond_indices_are_kept_verbatim() {
        let text = block(&[" 0.0 0.0 0.0 C"], &["  1  9  1"], "M  END\n");
        let mol = parse(&text, "x").unwrap().into_molecules().remove(0);
        assert_eq!(mol.bonds[0].a2, 9);
    }

    #[test]
    fn zero_atom_molecule_is_valid() {
        let set = parse("t\np\nc\n  0  0\nM  END\n", "x").unwrap();
        assert!(set.first().atoms.is_empty());
    }
}
