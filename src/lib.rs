// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Ligand structure loading and render geometry.
//!
//! Ligview reads MDL molfile / SDF text into an immutable molecular model
//! and turns each molecule into a flat list of render primitives (atom
//! spheres or boxes and bond cylinders) ready for any scene layer.
//!
//! # Key entry points
//!
//! - [`parser::parse`] - SDF text to a [`molecule::MoleculeSet`]
//! - [`geometry::MoleculeGeometryBuilder`] - molecule to
//!   [`geometry::RenderPrimitive`]s
//! - [`elements::PeriodicTable`] - per-element color, scale and radius
//! - [`options::Options`] - geometry and color configuration (TOML presets)
//! - [`source::LigandRepository`] - fetch by id with cache and bundle
//!   fallbacks
//!
//! # Pipeline
//!
//! Text is obtained from a [`source::SourceLoader`], parsed once, and then
//! handed to the geometry builder together with an
//! [`elements::ElementTable`]. Parsing fails on the first malformed block;
//! geometry never fails and skips degenerate bonds with a log trace.

pub mod elements;
pub mod error;
pub mod geometry;
pub mod molecule;
pub mod options;
pub mod parser;
pub mod source;
