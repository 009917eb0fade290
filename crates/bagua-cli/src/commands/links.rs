use std::fs;
use std::path::Path;

use bagua_core::TopicalLinkTable;
use comfy_table::{ContentArrangement, Table};

pub fn run(query: Option<&str>, file: Option<&Path>) -> Result<(), String> {
    let catalog = super::catalog()?;
    let loaded;
    let links = match file {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            loaded = TopicalLinkTable::from_json(&json).map_err(|e| e.to_string())?;
            &loaded
        }
        None => TopicalLinkTable::standard().map_err(|e| e.to_string())?,
    };

    if let Some(query) = query {
        let hexagram = super::find_hexagram(catalog, query)?;
        println!("  {}", super::label(catalog, hexagram.number));
        let related = links.related(hexagram.number);
        if related.is_empty() {
            println!("    no related hexagrams");
        }
        for &number in related {
            println!("    -> {}", super::label(catalog, number));
        }
        return Ok(());
    }

    if links.is_empty() {
        println!("  No links defined.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Hexagram", "Related"]);
    for (from, related) in links.iter() {
        let related: Vec<String> = related
            .iter()
            .map(|&n| format!("{} {}", n, catalog.get(n).name))
            .collect();
        table.add_row(vec![super::label(catalog, from), related.join(", ")]);
    }

    println!("{table}");
    println!();
    println!("  {} hexagrams with links", links.len());

    Ok(())
}
