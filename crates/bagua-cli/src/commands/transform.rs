use std::path::PathBuf;

use bagua_core::transform;
use bagua_core::{
    ChangingLines, HexagramCatalog, HexagramNumber, LinePosition, PatternResolver,
    TopicalLinkTable, TransformationTable, Trigram,
};
use bagua_oracle::{Cast, CasterConfig, Reading, suggest};
use colored::Colorize;
use serde::Serialize;

/// A hand-picked transformation collected from the command line.
pub struct TransformRequest {
    pub hexagram: Option<String>,
    pub upper: Option<String>,
    pub lower: Option<String>,
    pub lines: Vec<u8>,
    pub to: Option<String>,
    pub steps: bool,
    pub seed: Option<u64>,
    pub content: Option<PathBuf>,
    pub prompt: bool,
    pub json: bool,
}

/// One single-line flip along the way.
#[derive(Serialize)]
struct Step {
    line: LinePosition,
    hexagram: HexagramNumber,
}

pub fn run(request: &TransformRequest) -> Result<(), String> {
    let catalog = super::catalog()?;
    let base = base_hexagram(catalog, request)?;

    // Flip order: as typed, or bottom-up when derived from a target.
    let order: Vec<LinePosition> = match &request.to {
        Some(query) => {
            let target = super::find_hexagram(catalog, query)?.number;
            transform::changes_between(catalog, base, target)
                .map_err(|e| e.to_string())?
                .iter()
                .collect()
        }
        None => picked_lines(&request.lines)?,
    };
    let changing: ChangingLines = order.iter().copied().collect();

    let cast = Cast::chosen(catalog, base, changing).map_err(|e| e.to_string())?;
    let library = super::load_content(request.content.as_deref())?;
    let table = TransformationTable::build(catalog).map_err(|e| e.to_string())?;
    let links = TopicalLinkTable::standard().map_err(|e| e.to_string())?;

    let mut config = CasterConfig::default();
    if let Some(seed) = request.seed {
        config = config.with_seed(seed);
    }
    let reading = Reading::assemble(&cast, catalog, &library);
    let suggestion = suggest(&cast, &table, links, &mut config.rng());
    let steps = if request.steps {
        step_through(catalog, base, &order)?
    } else {
        Vec::new()
    };

    if request.json {
        let value = serde_json::json!({
            "cast": cast,
            "reading": reading,
            "prompt": reading.prompt(),
            "suggestion": suggestion,
            "steps": steps,
        });
        let out = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} -> {}",
        super::label(catalog, cast.base).bold(),
        super::label(catalog, cast.result).bold()
    );
    print!("{}", super::cast::details(catalog, &cast, &reading, &suggestion));

    if !steps.is_empty() {
        println!();
        println!("  {}", "one line at a time".dimmed());
        for step in &steps {
            println!("    line {} -> {}", step.line, super::label(catalog, step.hexagram));
        }
    }

    if request.prompt {
        println!();
        println!("{}", "  prompt".dimmed());
        for line in reading.prompt().lines() {
            println!("    {line}");
        }
    }

    Ok(())
}

/// The base from a hexagram query, or from two stacked trigrams.
fn base_hexagram(
    catalog: &HexagramCatalog,
    request: &TransformRequest,
) -> Result<HexagramNumber, String> {
    match (&request.hexagram, &request.upper, &request.lower) {
        (Some(query), _, _) => Ok(super::find_hexagram(catalog, query)?.number),
        (None, Some(upper), Some(lower)) => {
            let lines = Trigram::stack(trigram(upper)?, trigram(lower)?);
            catalog
                .resolve(lines)
                .ok_or_else(|| format!("no hexagram has the pattern {lines}"))
        }
        _ => Err("give a hexagram, or both --upper and --lower".to_string()),
    }
}

fn trigram(query: &str) -> Result<Trigram, String> {
    Trigram::parse(query).ok_or_else(|| format!("unknown trigram: \"{query}\""))
}

/// Validate typed line positions, keeping their order.
fn picked_lines(values: &[u8]) -> Result<Vec<LinePosition>, String> {
    let mut seen = ChangingLines::none();
    let mut order = Vec::with_capacity(values.len());
    for &value in values {
        let position = LinePosition::new(value).map_err(|e| e.to_string())?;
        if seen.contains(position) {
            return Err(format!("line {position} listed twice"));
        }
        seen.insert(position);
        order.push(position);
    }
    Ok(order)
}

fn step_through(
    catalog: &HexagramCatalog,
    base: HexagramNumber,
    order: &[LinePosition],
) -> Result<Vec<Step>, String> {
    let mut current = base;
    let mut steps = Vec::with_capacity(order.len());
    for &line in order {
        current = transform::apply_in_order(catalog, current, [line]).map_err(|e| e.to_string())?;
        steps.push(Step {
            line,
            hexagram: current,
        });
    }
    Ok(steps)
}
