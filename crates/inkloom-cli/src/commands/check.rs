use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use inkloom_engine::{Severity, validate};

pub fn run(path: &Path) -> Result<(), String> {
    let document = super::load_story(path)?;
    let report = validate(&document);

    if report.is_empty() {
        println!("  All checks passed for '{}'.", path.display());
        println!("  {} nodes, start at '{}'", document.nodes().len(), document.start_node());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Level", "Node", "Problem"]);
    for issue in &report.issues {
        table.add_row(vec![issue.severity.to_string(), issue.node.clone(), issue.message.clone()]);
    }
    println!("{table}");
    println!();

    let errors = report.count(Severity::Error);
    let warnings = report.count(Severity::Warning);
    println!(
        "  {} error{}, {} warning{}",
        errors,
        if errors == 1 { "" } else { "s" },
        warnings,
        if warnings == 1 { "" } else { "s" },
    );

    if report.has_errors() {
        Err("story has errors".into())
    } else {
        println!("  {}", "No errors.".green());
        Ok(())
    }
}
