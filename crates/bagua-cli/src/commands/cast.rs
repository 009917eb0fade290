use bagua_core::{HexagramCatalog, TopicalLinkTable, TransformationTable};
use bagua_oracle::{
    Cast, CastQuality, DivinationCaster, DivinationSession, Reading, Suggestion, suggest,
};
use colored::Colorize;

use super::CastSettings;

pub fn run(settings: &CastSettings, count: u32, prompt: bool, json: bool) -> Result<(), String> {
    let catalog = super::catalog()?;
    let config = settings.config()?;
    let library = super::load_content(settings.content.as_deref())?;
    let table = TransformationTable::build(catalog).map_err(|e| e.to_string())?;
    let links = TopicalLinkTable::standard().map_err(|e| e.to_string())?;

    let caster = DivinationCaster::new(catalog, config.clone()).with_table(table.clone());
    let mut session = DivinationSession::new(&config);
    let mut results = Vec::new();

    for _ in 0..count {
        let cast = caster.cast(&mut session);
        let reading = Reading::assemble(&cast, catalog, &library);
        let suggestion = suggest(&cast, &table, links, session.rng());

        if json {
            results.push(serde_json::json!({
                "index": session.cast_count(),
                "cast": cast,
                "reading": reading,
                "prompt": reading.prompt(),
                "suggestion": suggestion,
            }));
            continue;
        }

        println!("{}", render(catalog, session.cast_count(), &cast, &reading, &suggestion));
        if prompt {
            println!("{}", "  prompt".dimmed());
            for line in reading.prompt().lines() {
                println!("    {line}");
            }
            println!();
        }
    }

    if json {
        let out = serde_json::to_string_pretty(&results).map_err(|e| e.to_string())?;
        println!("{out}");
    }

    Ok(())
}

/// Human-readable summary of one cast.
pub fn render(
    catalog: &HexagramCatalog,
    index: u32,
    cast: &Cast,
    reading: &Reading,
    suggestion: &Suggestion,
) -> String {
    let mut out = format!("  {} ({})\n", format!("Cast {index}").bold(), cast.mode);
    out.push_str(&details(catalog, cast, reading, suggestion));
    out
}

/// Base, result, lines, guideline, focus, and next step; one per line.
pub fn details(
    catalog: &HexagramCatalog,
    cast: &Cast,
    reading: &Reading,
    suggestion: &Suggestion,
) -> String {
    let mut out = format!("  base:      {}\n", super::label(catalog, cast.base));
    out.push_str(&format!("  result:    {}\n", super::label(catalog, cast.result)));
    out.push_str(&format!("  changing:  {}\n", cast.changing));
    if let Some(draws) = &cast.draws {
        let values: Vec<String> = draws.iter().map(|d| d.value().to_string()).collect();
        out.push_str(&format!("  draws:     {} (bottom first)\n", values.join(" ")));
    }
    out.push_str(&format!(
        "  guideline: {} ({})\n",
        reading.guideline,
        reading.guideline.description()
    ));
    out.push_str(&format!("  focus:     {}\n", reading.focus));
    out.push_str(&format!("  next:      {suggestion}\n"));
    if cast.quality != CastQuality::Clean {
        out.push_str(&format!("  {}\n", cast.quality.description().yellow()));
    }
    out
}
