use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{RiskLabel, UrlReport};

/// Render a colored terminal report.
pub fn render(reports: &[UrlReport], verbose: bool, quiet: bool) -> Result<()> {
    let total = reports.len();
    let phishing_count = reports
        .iter()
        .filter(|r| r.verdict.label == RiskLabel::Phishing)
        .count();
    let benign_count = total - phishing_count;

    if quiet {
        println!(
            "Total: {}  Benign: {}  Phishing: {}",
            total,
            benign_count.to_string().green(),
            phishing_count.to_string().red(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "phish-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("URLs checked       : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Benign          : {:>4}", "✓".green(), benign_count)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Phishing        : {:>4}", "✗".red(), phishing_count)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    // Single-URL check: lead with the verdict message
    if let [report] = reports {
        let line = format!(
            "{} (confidence: {:.2}%)",
            report.verdict.message(),
            report.verdict.confidence
        );
        match report.verdict.label {
            RiskLabel::Phishing => println!(" {}\n", line.red().bold()),
            RiskLabel::Benign => println!(" {}\n", line.green()),
        }
    }

    if phishing_count > 0 {
        println!(" {} URLs flagged as phishing:\n", "[PHISHING]".red().bold());
        render_table(reports, RiskLabel::Phishing);
        println!();
    }

    // Verbose: show benign URLs with their feature details too
    if verbose && benign_count > 0 {
        println!(" {} URLs scored benign:\n", "[BENIGN]".green().bold());
        render_table(reports, RiskLabel::Benign);
        println!();
    }

    Ok(())
}

fn render_table(reports: &[UrlReport], label_filter: RiskLabel) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("URL").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("Length").add_attribute(Attribute::Bold),
            Cell::new("HTTPS").add_attribute(Attribute::Bold),
            Cell::new("Age (days)").add_attribute(Attribute::Bold),
            Cell::new("Special").add_attribute(Attribute::Bold),
            Cell::new("IP host").add_attribute(Attribute::Bold),
        ]);

    for report in reports.iter().filter(|r| r.verdict.label == label_filter) {
        let (verdict_str, verdict_color) = match report.verdict.label {
            RiskLabel::Benign => ("✓ benign", Color::Green),
            RiskLabel::Phishing => ("✗ phishing", Color::Red),
        };

        let f = &report.features;
        table.add_row(vec![
            Cell::new(&report.url),
            Cell::new(verdict_str)
                .fg(verdict_color)
                .set_alignment(CellAlignment::Center),
            Cell::new(format!("{:.2}%", report.verdict.confidence))
                .set_alignment(CellAlignment::Right),
            Cell::new(f.url_length).set_alignment(CellAlignment::Right),
            Cell::new(if f.contains_https == 1 { "yes" } else { "no" }),
            Cell::new(f.domain_age_days).set_alignment(CellAlignment::Right),
            Cell::new(f.special_char_count).set_alignment(CellAlignment::Right),
            Cell::new(if f.is_ip_address { "yes" } else { "no" }),
        ]);
    }

    println!("{}", table);
}
