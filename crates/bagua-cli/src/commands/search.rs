use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(keyword: &str, content: &Path) -> Result<(), String> {
    let catalog = super::catalog()?;
    let library = super::load_content(Some(content))?;
    let results = library.search(keyword);

    if results.is_empty() {
        println!("  No hexagrams mention \"{keyword}\".");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Hexagram", "Name", "Core viewpoint"]);

    for record in &results {
        let glyph = catalog.get(record.number).symbol();
        let viewpoint = match record.core_viewpoint.as_deref() {
            Some(text) if text.chars().count() > 60 => {
                format!("{}...", text.chars().take(57).collect::<String>())
            }
            Some(text) => text.to_string(),
            None => "-".to_string(),
        };
        table.add_row(vec![
            format!("{glyph} {}", record.number),
            record.name.clone(),
            viewpoint,
        ]);
    }

    println!("{table}");
    println!();
    let noun = if results.len() == 1 { "match" } else { "matches" };
    println!("  {} {noun}", results.len());

    Ok(())
}
