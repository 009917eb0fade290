use bagua_core::{MathModel, Trigram};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(model: &str, analysis: bool, json: bool) -> Result<(), String> {
    let model = MathModel::parse(model)
        .ok_or_else(|| format!("unknown model: \"{model}\" (expected abstract or concrete)"))?;

    if json {
        let out = serde_json::to_string_pretty(&model.analyze()).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Trigram", "Image", "Lines", "Concept", "Theme"]);

    for trigram in Trigram::ALL {
        let concept = trigram.concept(model);
        table.add_row(vec![
            trigram.symbol().to_string(),
            trigram.to_string(),
            trigram.image().to_string(),
            format!("{:03b}", trigram.bits()),
            concept.name.to_string(),
            concept.theme.to_string(),
        ]);
    }

    println!("  {} model", model.to_string().bold());
    println!("{table}");
    println!();
    println!("  {}", "dualities".dimmed());
    for (a, b) in model.duality_pairs() {
        println!(
            "    {} {} <-> {} {}",
            a.symbol(),
            a.concept(model).name,
            b.symbol(),
            b.concept(model).name
        );
    }

    if analysis {
        print_analysis(model);
    }

    Ok(())
}

/// Upper-by-lower grid of authored pairs, then the coverage summary.
fn print_analysis(model: MathModel) {
    let analysis = model.analyze();

    let mut grid = Table::new();
    grid.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["upper \\ lower".to_string()];
    header.extend(Trigram::ALL.iter().map(|t| format!("{} {t}", t.symbol())));
    grid.set_header(header);

    for upper in Trigram::ALL {
        let mut row = vec![format!("{} {}", upper.symbol(), upper.concept(model).name)];
        row.extend(Trigram::ALL.iter().map(|&lower| {
            match model.combination(upper, lower) {
                Some(_) => "x".to_string(),
                None => ".".to_string(),
            }
        }));
        grid.add_row(row);
    }

    println!();
    println!("  {}", "pairs".dimmed());
    println!("{grid}");
    println!();
    println!(
        "  coverage: {}/{} pairs ({:.1}%)",
        analysis.covered, analysis.total_hexagrams, analysis.coverage
    );
    println!("  open:     {} pairs", analysis.open_combinations.len());
}
