use std::path::Path;

use bagua_core::{LinePosition, MathModel, TopicalLinkTable, TransformationTable};
use bagua_oracle::ContentSource;
use colored::Colorize;

pub fn run(query: &str, content: Option<&Path>, json: bool) -> Result<(), String> {
    let catalog = super::catalog()?;
    let hexagram = super::find_hexagram(catalog, query)?;
    let library = super::load_content(content)?;
    let record = library.record(hexagram.number);

    let (upper, lower) = hexagram.trigrams();

    if json {
        let value = serde_json::json!({
            "hexagram": hexagram,
            "symbol": hexagram.symbol().to_string(),
            "content": record,
            "combinations": {
                "abstract": MathModel::Abstract.combination(upper, lower),
                "concrete": MathModel::Concrete.combination(upper, lower),
            },
        });
        let out = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    // Header
    println!("  {} {}", hexagram.symbol(), hexagram.label().bold());
    println!();

    // Lines, top first
    for pos in LinePosition::all().rev() {
        println!("  {pos}  {}", hexagram.lines.line(pos).glyph());
    }
    println!();

    println!("  upper:   {} {upper} ({})", upper.symbol(), upper.image());
    println!("  lower:   {} {lower} ({})", lower.symbol(), lower.image());

    println!();
    println!("  {}", "mathematics".dimmed());
    for model in [MathModel::Abstract, MathModel::Concrete] {
        let pair = format!(
            "{} over {}",
            upper.concept(model).name,
            lower.concept(model).name
        );
        match model.combination(upper, lower) {
            Some(meaning) => println!("    {:<9} {pair}: {meaning}", model.to_string()),
            None => println!("    {:<9} {pair}", model.to_string()),
        }
    }

    if let Some(record) = &record {
        println!();
        if record.name != hexagram.name {
            println!("  name:      {}", record.name);
        }
        if let Some(ref viewpoint) = record.core_viewpoint {
            println!("  viewpoint: {viewpoint}");
        }
        if let Some(ref summary) = record.summary {
            println!("  summary:   {summary}");
        }
        if let Some(ref models) = record.mental_models {
            println!("  models:    {models}");
        }
        if !record.keywords.is_empty() {
            println!("  keywords:  {}", record.keywords.join(", "));
        }
    }

    // Single-line changes
    let table = TransformationTable::build(catalog).map_err(|e| e.to_string())?;
    println!();
    println!("  {}", "changing one line".dimmed());
    for pos in LinePosition::all() {
        let target = table.get(hexagram.number, pos);
        println!("    line {pos} -> {}", super::label(catalog, target));
    }

    let links = TopicalLinkTable::standard().map_err(|e| e.to_string())?;
    let related = links.related(hexagram.number);
    if !related.is_empty() {
        println!();
        println!("  {}", "related".dimmed());
        for &number in related {
            println!("    {}", super::label(catalog, number));
        }
    }

    Ok(())
}
