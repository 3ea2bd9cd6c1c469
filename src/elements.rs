//! Element lookup: display scale, CPK color and van der Waals radius by
//! symbol.
//!
//! Geometry code only sees the [`ElementTable`] trait, so tests can inject a
//! fixed fake instead of a full periodic table. [`PeriodicTable`] is the
//! default implementation, either built in or loaded from a periodic-table
//! JSON document.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::LigviewError;

/// Color used for symbols missing from the table (magenta, easy to spot).
pub const FALLBACK_COLOR: [f32; 3] = [1.0, 0.08, 0.58];

/// Van der Waals radius assumed for unknown symbols, in angstroms.
pub const DEFAULT_VDW_RADIUS: f64 = 1.5;

/// Symbol → display properties.
pub trait ElementTable {
    /// Whether the table has an entry for this symbol.
    fn is_known(&self, symbol: &str) -> bool;

    /// Multiplier applied to the base atom radius. `1.0` when unknown.
    fn scale_for_symbol(&self, symbol: &str) -> f64;

    /// RGB display color. A fallback color when unknown.
    fn color_for_symbol(&self, symbol: &str) -> [f32; 3];

    /// Van der Waals radius in angstroms.
    fn vdw_radius_for_symbol(&self, _symbol: &str) -> f64 {
        DEFAULT_VDW_RADIUS
    }
}

/// Descriptive data for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInfo {
    /// Uppercased symbol (lookup key).
    pub symbol: String,
    /// Element name.
    pub name: Option<String>,
    /// Atomic number.
    pub number: Option<u32>,
    /// Standard atomic weight.
    pub atomic_mass: Option<f64>,
    /// Category such as "noble gas".
    pub category: Option<String>,
    /// CPK color.
    pub cpk_color: Option<[f32; 3]>,
    /// Van der Waals radius in angstroms.
    pub vdw_radius: Option<f64>,
    /// Radius multiplier for ball-and-stick atoms.
    pub display_scale: f64,
}

impl ElementInfo {
    /// Name if known, symbol otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol)
    }
}

/// Map of uppercased symbol → [`ElementInfo`].
#[derive(Debug, Clone)]
pub struct PeriodicTable {
    elements: FxHashMap<String, ElementInfo>,
    fallback_color: [f32; 3],
}

/// (symbol, name, number, mass, CPK color, vdW radius)
type BuiltinRow = (&'static str, &'static str, u32, f64, [f32; 3], f64);

/// Jmol CPK colors and Bondi radii for elements common in ligands.
const BUILTIN: &[BuiltinRow] = &[
    ("H", "Hydrogen", 1, 1.008, [1.0, 1.0, 1.0], 1.20),
    ("B", "Boron", 5, 10.81, [1.0, 0.71, 0.71], 1.92),
    ("C", "Carbon", 6, 12.011, [0.565, 0.565, 0.565], 1.70),
    ("N", "Nitrogen", 7, 14.007, [0.188, 0.314, 0.973], 1.55),
    ("O", "Oxygen", 8, 15.999, [1.0, 0.051, 0.051], 1.52),
    ("F", "Fluorine", 9, 18.998, [0.565, 0.878, 0.314], 1.47),
    ("NA", "Sodium", 11, 22.990, [0.671, 0.361, 0.949], 2.27),
    ("MG", "Magnesium", 12, 24.305, [0.541, 1.0, 0.0], 1.73),
    ("SI", "Silicon", 14, 28.085, [0.941, 0.784, 0.627], 2.10),
    ("P", "Phosphorus", 15, 30.974, [1.0, 0.502, 0.0], 1.80),
    ("S", "Sulfur", 16, 32.06, [1.0, 1.0, 0.188], 1.80),
    ("CL", "Chlorine", 17, 35.45, [0.122, 0.941, 0.122], 1.75),
    ("K", "Potassium", 19, 39.098, [0.561, 0.251, 0.831], 2.75),
    ("CA", "Calcium", 20, 40.078, [0.239, 1.0, 0.0], 2.31),
    ("MN", "Manganese", 25, 54.938, [0.612, 0.478, 0.780], 1.97),
    ("FE", "Iron", 26, 55.845, [0.878, 0.4, 0.2], 1.94),
    ("CO", "Cobalt", 27, 58.933, [0.941, 0.565, 0.627], 1.92),
    ("CU", "Copper", 29, 63.546, [0.784, 0.502, 0.2], 1.40),
    ("ZN", "Zinc", 30, 65.38, [0.490, 0.502, 0.690], 1.39),
    ("SE", "Selenium", 34, 78.971, [1.0, 0.631, 0.0], 1.90),
    ("BR", "Bromine", 35, 79.904, [0.651, 0.161, 0.161], 1.85),
    ("I", "Iodine", 53, 126.904, [0.580, 0.0, 0.580], 1.98),
];

impl PeriodicTable {
    /// Table of common ligand elements, no external data needed.
    #[must_use]
    pub fn builtin() -> Self {
        let elements = BUILTIN
            .iter()
            .map(|&(symbol, name, number, mass, color, vdw)| {
                let info = ElementInfo {
                    symbol: symbol.to_owned(),
                    name: Some(name.to_owned()),
                    number: Some(number),
                    atomic_mass: Some(mass),
                    category: None,
                    cpk_color: Some(color),
                    vdw_radius: Some(vdw),
                    display_scale: 1.0,
                };
                (symbol.to_owned(), info)
            })
            .collect();
        Self {
            elements,
            fallback_color: FALLBACK_COLOR,
        }
    }

    /// Load a periodic-table JSON document of the form
    /// `{"elements": [{"symbol": "C", "cpk-hex": "909090", ...}]}`.
    ///
    /// Radii above 10 are taken to be picometres and converted to
    /// angstroms. Unparseable colors are dropped rather than rejected.
    pub fn from_json(json: &str) -> Result<Self, LigviewError> {
        let root: RawRoot = serde_json::from_str(json)
            .map_err(|e| LigviewError::ElementTable(e.to_string()))?;

        let elements = root
            .elements
            .into_iter()
            .map(|raw| {
                let symbol = raw.symbol.trim().to_uppercase();
                let info = ElementInfo {
                    symbol: symbol.clone(),
                    name: raw.name,
                    number: raw.number,
                    atomic_mass: raw.atomic_mass,
                    category: raw.category,
                    cpk_color: raw.cpk_hex.as_deref().and_then(parse_hex_color),
                    vdw_radius: raw
                        .van_der_waal_radius
                        .or(raw.van_der_waals_radius)
                        .map(normalize_vdw),
                    display_scale: raw.display_scale.unwrap_or(1.0),
                };
                (symbol, info)
            })
            .collect();

        Ok(Self {
            elements,
            fallback_color: FALLBACK_COLOR,
        })
    }

    /// Replace the color used for unknown symbols.
    #[must_use]
    pub fn with_fallback_color(mut self, color: [f32; 3]) -> Self {
        self.fallback_color = color;
        self
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn info(&self, symbol: &str) -> Option<&ElementInfo> {
        self.elements.get(&symbol.trim().to_uppercase())
    }

    /// Number of known elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All entries ordered by atomic number (unnumbered entries last).
    #[must_use]
    pub fn all(&self) -> Vec<&ElementInfo> {
        let mut all: Vec<&ElementInfo> = self.elements.values().collect();
        all.sort_by_key(|e| (e.number.unwrap_or(u32::MAX), e.symbol.clone()));
        all
    }
}

impl Default for PeriodicTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ElementTable for PeriodicTable {
    fn is_known(&self, symbol: &str) -> bool {
        self.info(symbol).is_some()
    }

    fn scale_for_symbol(&self, symbol: &str) -> f64 {
        self.info(symbol).map_or(1.0, |e| e.display_scale)
    }

    fn color_for_symbol(&self, symbol: &str) -> [f32; 3] {
        self.info(symbol)
            .and_then(|e| e.cpk_color)
            .unwrap_or(self.fallback_color)
    }

    fn vdw_radius_for_symbol(&self, symbol: &str) -> f64 {
        self.info(symbol)
            .and_then(|e| e.vdw_radius)
            .unwrap_or(DEFAULT_VDW_RADIUS)
    }
}

#[derive(Deserialize)]
struct RawRoot {
    elements: Vec<RawElement>,
}

#[derive(Deserialize)]
struct RawElement {
    symbol: String,
    name: Option<String>,
    number: Option<u32>,
    atomic_mass: Option<f64>,
    category: Option<String>,
    #[serde(rename = "cpk-hex")]
    cpk_hex: Option<String>,
    van_der_waal_radius: Option<f64>,
    van_der_waals_radius: Option<f64>,
    display_scale: Option<f64>,
}

/// Parse `RRGGBB` or `RRGGBBAA` (optional `#`); alpha is ignored.
fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let cleaned = hex.trim().trim_start_matches('#');
    if cleaned.len() != 6 && cleaned.len() != 8 {
        return None;
    }
    let value = u32::from_str_radix(cleaned, 16).ok()?;
    let rgb = if cleaned.len() == 8 { value >> 8 } else { value };
    let channel = |shift: u32| ((rgb >> shift) & 0xFF) as f32 / 255.0;
    Some([channel(16), channel(8), channel(0)])
}

fn normalize_vdw(raw: f64) -> f64 {
    if raw > 10.0 {
        raw / 100.0
    } else {
        raw
    }
}
