use bagua_core::Guideline;
use comfy_table::{ContentArrangement, Table};

pub fn run(count: Option<usize>) -> Result<(), String> {
    if let Some(count) = count {
        if count > 6 {
            return Err(format!("invalid changing-line count: {count} (expected 0-6)"));
        }
        let guideline = Guideline::for_count(count);
        println!("  {guideline}");
        println!("  {}", guideline.description());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Changing", "Guideline", "Rule"]);
    for count in 0..=6 {
        let guideline = Guideline::for_count(count);
        table.add_row(vec![
            count.to_string(),
            guideline.to_string(),
            guideline.description().to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
