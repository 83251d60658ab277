use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::evaluator::ApplicationType;
use crate::license::{License, Restriction};
use crate::models::{Dependency, DependencyInfo};

/// Render a colored terminal report.
pub fn render(info: &DependencyInfo, application: ApplicationType, verbose: bool, quiet: bool) {
    let deps = &info.dependencies;
    let total = deps.len();
    let unrestricted = count_tier(deps, Restriction::Unrestricted);
    let internal_only = count_tier(deps, Restriction::AmbassadorServers);

    if quiet {
        println!(
            "Total: {}  Unrestricted: {}  Internal-only: {}  Licenses: {}",
            total,
            unrestricted.to_string().green(),
            internal_only.to_string().yellow(),
            info.licenses.len(),
        );
        return;
    }

    println!(
        "\n {} v{}",
        "attribution-report".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Application type: {}\n", application);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total dependencies : {}", total));
    println!(" │  {:<48} │", format!("Distinct licenses  : {}", info.licenses.len()));
    println!(
        " │  {:<48} │",
        format!("{}  Unrestricted    : {:>4}", "✓".green(), unrestricted)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Internal-only   : {:>4}", "⚠".yellow(), internal_only)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if internal_only > 0 {
        println!(" {} Dependencies restricted to internal servers:\n", "[INTERNAL]".yellow().bold());
        render_table(deps, Restriction::AmbassadorServers);
        println!();
    }

    if verbose && unrestricted > 0 {
        println!(" {} Unrestricted dependencies:\n", "[OK]".green().bold());
        render_table(deps, Restriction::Unrestricted);
        println!();
    }
}

/// The tightest tier among a dependency's licenses.
fn strictest(dep: &Dependency) -> Restriction {
    dep.licenses
        .iter()
        .map(License::restriction)
        .min()
        .unwrap_or(Restriction::Unrestricted)
}

fn count_tier(deps: &[Dependency], tier: Restriction) -> usize {
    deps.iter().filter(|d| strictest(d) == tier).count()
}

fn render_table(deps: &[Dependency], tier: Restriction) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("License(s)").add_attribute(Attribute::Bold),
            Cell::new("Restriction").add_attribute(Attribute::Bold),
        ]);

    for dep in deps.iter().filter(|d| strictest(d) == tier) {
        let licenses: Vec<&str> = dep.licenses.iter().map(License::name).collect();
        let color = match tier {
            Restriction::Unrestricted => Color::Green,
            Restriction::AmbassadorServers => Color::Yellow,
            Restriction::Forbidden => Color::Red,
        };

        table.add_row(vec![
            Cell::new(&dep.name),
            Cell::new(&dep.version),
            Cell::new(licenses.join("\n")),
            Cell::new(tier.to_string())
                .fg(color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}
