use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::elements::{ElementTable, FALLBACK_COLOR};

/// Gray used for bond cylinders unless overridden.
pub const DEFAULT_BOND_COLOR: [f32; 3] = [0.75, 0.75, 0.75];

/// Color palette options for ligand rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// RGB color of every bond cylinder.
    pub bond_color: [f32; 3],
    /// RGB color for symbols the element table does not know.
    pub fallback_atom_color: [f32; 3],
    /// Per-element RGB overrides keyed by symbol (any case).
    pub element_overrides: HashMap<String, [f32; 3]>,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            bond_color: DEFAULT_BOND_COLOR,
            fallback_atom_color: FALLBACK_COLOR,
            element_overrides: HashMap::new(),
        }
    }
}

impl ColorOptions {
    /// Override color for a symbol, if one is configured.
    #[must_use]
    pub fn element_override(&self, symbol: &str) -> Option<[f32; 3]> {
        let symbol = symbol.trim();
        self.element_overrides
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(symbol))
            .map(|(_, color)| *color)
    }

    /// Wrap an element table so lookups honor these colors.
    #[must_use]
    pub fn tint<'a, E: ElementTable + ?Sized>(
        &'a self,
        elements: &'a E,
    ) -> TintedElements<'a, E> {
        TintedElements {
            elements,
            colors: self,
        }
    }
}

/// An [`ElementTable`] with per-symbol color overrides and a configurable
/// fallback color layered on top.
pub struct TintedElements<'a, E: ElementTable + ?Sized> {
    elements: &'a E,
    colors: &'a ColorOptions,
}

impl<E: ElementTable + ?Sized> ElementTable for TintedElements<'_, E> {
    fn is_known(&self, symbol: &str) -> bool {
        self.elements.is_known(symbol)
    }

    fn scale_for_symbol(&self, symbol: &str) -> f64 {
        self.elements.scale_for_symbol(symbol)
    }

    fn color_for_symbol(&self, symbol: &str) -> [f32; 3] {
        if let Some(color) = self.colors.element_override(symbol) {
            return color;
        }
        if self.elements.is_known(symbol) {
            self.elements.color_for_symbol(symbol)
        } else {
            self.colors.fallback_atom_color
        }
    }

    fn vdw_radius_for_symbol(&self, symbol: &str) -> f64 {
        self.elements.vdw_radius_for_symbol(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::PeriodicTable;

    #[test]
    fn overrides_win_over_table_colors() {
        let mut colors = ColorOptions::default();
        let _ = colors
            .element_overrides
            .insert("c".to_owned(), [0.0, 1.0, 0.0]);
        let table = PeriodicTable::builtin();
        let tinted = colors.tint(&table);

        assert_eq!(tinted.color_for_symbol("C"), [0.0, 1.0, 0.0]);
        assert_eq!(tinted.color_for_symbol("O"), table.color_for_symbol("O"));
        assert_eq!(tinted.scale_for_symbol("O"), table.scale_for_symbol("O"));
    }

    #[test]
    fn unknown_symbols_use_configured_fallback() {
        let colors = ColorOptions {
            fallback_atom_color: [0.2, 0.2, 0.2],
            ..ColorOptions::default()
        };
        let table = PeriodicTable::builtin().with_fallback_color([0.9, 0.9, 0.0]);
        assert_eq!(colors.tint(&table).color_for_symbol("QQ"), [0.2, 0.2, 0.2]);
    }

    /// Knows only "MG", drawn in the magenta fallback color.
    struct MagentaOnly;

    impl ElementTable for MagentaOnly {
        fn is_known(&self, symbol: &str) -> bool {
            symbol.eq_ignore_ascii_case("MG")
        }

        fn scale_for_symbol(&self, _symbol: &str) -> f64 {
            1.0
        }

        fn color_for_symbol(&self, _symbol: &str) -> [f32; 3] {
            FALLBACK_COLOR
        }
    }

    #[test]
    fn known_element_with_fallback_color_is_kept() {
        let colors = ColorOptions {
            fallback_atom_color: [0.2, 0.2, 0.2],
            ..ColorOptions::default()
        };
        let tinted = colors.tint(&MagentaOnly);
        assert_eq!(tinted.color_for_symbol("Mg"), FALLBACK_COLOR);
        assert_eq!(tinted.color_for_symbol("Zz"), [0.2, 0.2, 0.2]);
    }
}
