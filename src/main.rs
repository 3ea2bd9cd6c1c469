//! `ligview <ID | path.sdf> [preset.toml]`
//!
//! Loads a ligand from a local file or by id (RCSB download with cache and
//! bundle fallbacks), builds render geometry for every molecule and writes
//! the primitives to `<ID>.primitives.json`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ligview::elements::PeriodicTable;
use ligview::error::LigviewError;
use ligview::geometry::{MoleculeGeometryBuilder, RenderPrimitive};
use ligview::molecule::MoleculeSet;
use ligview::options::Options;
use ligview::parser::parse;
use ligview::source::{
    decode_text, normalize_id, CacheStore, DirectoryLoader, LigandRepository,
    RcsbLoader,
};
use serde::Serialize;

const CACHE_DIR: &str = "assets/ligand_cache";
const BUNDLE_DIR: &str = "assets/ligands";
const ELEMENTS_FILE: &str = "assets/periodic_table.json";

#[derive(Serialize)]
struct MoleculeDump<'a> {
    title: &'a str,
    atom_count: usize,
    bond_count: usize,
    net_charge: i32,
    primitives: Vec<RenderPrimitive>,
}

#[derive(Serialize)]
struct Dump<'a> {
    id: &'a str,
    doc_url: String,
    style: &'static str,
    molecules: Vec<MoleculeDump<'a>>,
}

fn load_set(input: &str) -> Result<MoleculeSet, LigviewError> {
    let path = Path::new(input);
    if path.is_file() {
        let text = decode_text(std::fs::read(path)?);
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map_or_else(|| normalize_id(input), normalize_id);
        return Ok(parse(&text, &id)?);
    }

    let repo = LigandRepository::new(RcsbLoader::new())
        .with_cache(CacheStore::new(CACHE_DIR))
        .with_bundle(DirectoryLoader::new(BUNDLE_DIR));
    let loaded = repo.load(input)?;
    log::info!("{} loaded from {:?}", loaded.set.id, loaded.source);
    Ok(loaded.set)
}

fn load_elements() -> Result<PeriodicTable, LigviewError> {
    let path = Path::new(ELEMENTS_FILE);
    if !path.is_file() {
        return Ok(PeriodicTable::builtin());
    }
    let table = PeriodicTable::from_json(&std::fs::read_to_string(path)?)?;
    log::info!("{} elements from {}", table.len(), path.display());
    Ok(table)
}

fn run(input: &str, preset: Option<&str>) -> Result<(), LigviewError> {
    let options = match preset {
        Some(p) => Options::load(Path::new(p))?,
        None => Options::default(),
    };
    let set = load_set(input)?;
    let table = load_elements()?;
    let elements = options.colors.tint(&table);
    let builder = MoleculeGeometryBuilder::new(&options.geometry, &elements)
        .with_bond_color(options.colors.bond_color);

    let molecules: Vec<MoleculeDump<'_>> = set
        .molecules()
        .iter()
        .map(|mol| MoleculeDump {
            title: mol.title.trim(),
            atom_count: mol.atoms.len(),
            bond_count: mol.bonds.len(),
            net_charge: mol.net_charge(),
            primitives: builder.build(mol),
        })
        .collect();
    let primitive_count: usize =
        molecules.iter().map(|m| m.primitives.len()).sum();

    let dump = Dump {
        id: &set.id,
        doc_url: set.doc_url(),
        style: options.geometry.style.title(),
        molecules,
    };
    let out_path = format!("{}.primitives.json", set.id);
    let writer = BufWriter::new(File::create(&out_path)?);
    serde_json::to_writer_pretty(writer, &dump).map_err(std::io::Error::from)?;

    log::info!(
        "{}: {} molecule(s), {} primitives ({}) -> {}",
        set.id,
        set.len(),
        primitive_count,
        dump.style,
        out_path
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        log::error!("Usage: ligview <LIGAND_ID or path.sdf> [preset.toml]");
        std::process::exit(1);
    };
    let preset = args.next();

    if let Err(e) = run(&input, preset.as_deref()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
