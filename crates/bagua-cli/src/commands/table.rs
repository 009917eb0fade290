use bagua_core::{LinePosition, TransformationTable};
use comfy_table::{ContentArrangement, Table};

pub fn run(json: bool, check: bool) -> Result<(), String> {
    let catalog = super::catalog()?;
    let table = TransformationTable::build(catalog).map_err(|e| e.to_string())?;

    if check {
        table.self_check().map_err(|e| e.to_string())?;
        println!(
            "  {} entries, every change leads away and flips back",
            TransformationTable::ENTRIES
        );
        return Ok(());
    }

    if json {
        let out = serde_json::to_string_pretty(&table.to_nested()).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let mut grid = Table::new();
    grid.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["No.".to_string(), "Name".to_string()];
    header.extend(LinePosition::all().map(|pos| format!("line {pos}")));
    grid.set_header(header);

    for hexagram in catalog.iter() {
        let mut row = vec![
            format!("{} {}", hexagram.symbol(), hexagram.number),
            hexagram.name.to_string(),
        ];
        row.extend(table.neighbors(hexagram.number).iter().map(|n| n.to_string()));
        grid.add_row(row);
    }

    println!("{grid}");
    println!();
    println!("  {} entries", TransformationTable::ENTRIES);

    Ok(())
}
