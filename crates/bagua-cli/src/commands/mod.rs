pub mod cast;
pub mod links;
pub mod policy;
pub mod search;
pub mod session;
pub mod show;
pub mod table;
pub mod transform;
pub mod trigrams;

use std::fs;
use std::path::{Path, PathBuf};

use bagua_core::{Hexagram, HexagramCatalog, HexagramNumber, TransformationTable};
use bagua_oracle::{CasterConfig, ContentLibrary, LineDrawMethod};

/// Casting options collected from the command line.
pub struct CastSettings {
    pub seed: Option<u64>,
    pub method: String,
    pub attempts: u32,
    pub content: Option<PathBuf>,
}

impl CastSettings {
    /// Build a caster configuration, rejecting unknown draw methods.
    pub fn config(&self) -> Result<CasterConfig, String> {
        let method: LineDrawMethod = self.method.parse().map_err(|e| format!("{e}"))?;
        let mut config = CasterConfig::default()
            .with_max_attempts(self.attempts)
            .with_draw_method(method);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

/// Refuse to run anything if the built-in catalog or its table is broken.
pub fn startup_check() -> Result<(), String> {
    let catalog = catalog()?;
    let table = TransformationTable::build(catalog).map_err(|e| e.to_string())?;
    table.self_check().map_err(|e| e.to_string())?;
    tracing::debug!("catalog and transformation table verified");
    Ok(())
}

/// The validated built-in catalog.
fn catalog() -> Result<&'static HexagramCatalog, String> {
    HexagramCatalog::standard().map_err(|e| format!("hexagram catalog is corrupt: {e}"))
}

/// Find a hexagram by number or by name.
fn find_hexagram<'a>(catalog: &'a HexagramCatalog, query: &str) -> Result<&'a Hexagram, String> {
    match query.trim().parse::<u8>() {
        Ok(number) => HexagramNumber::new(number)
            .map(|n| catalog.get(n))
            .map_err(|e| e.to_string()),
        Err(_) => catalog
            .find_by_name(query)
            .ok_or_else(|| format!("hexagram not found: \"{query}\"")),
    }
}

/// Load an optional content library; no path means an empty library.
fn load_content(path: Option<&Path>) -> Result<ContentLibrary, String> {
    let Some(path) = path else {
        return Ok(ContentLibrary::default());
    };
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    ContentLibrary::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

/// One-line label with glyph, e.g. `䷊ 11 Tai (Peace)`.
fn label(catalog: &HexagramCatalog, number: HexagramNumber) -> String {
    let hexagram = catalog.get(number);
    format!("{} {}", hexagram.symbol(), hexagram.label())
}
