use std::fmt::Write;

use crate::license::License;
use crate::models::DependencyInfo;

/// Render the report as a Markdown table followed by the referenced licenses.
pub fn render(info: &DependencyInfo) -> String {
    let mut out = String::new();

    if info.dependencies.is_empty() {
        out.push_str("This application has no third-party dependencies.\n");
        return out;
    }

    out.push_str("Dependencies used by this application:\n\n");
    out.push_str("| Name | Version | License(s) |\n");
    out.push_str("| --- | --- | --- |\n");
    for dep in &info.dependencies {
        let licenses: Vec<&str> = dep.licenses.iter().map(License::name).collect();
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            escape(&dep.name),
            escape(&dep.version),
            escape(&licenses.join(", "))
        );
    }

    out.push_str("\nLicenses referenced above:\n\n");
    for (name, url) in &info.licenses {
        if url.is_empty() {
            let _ = writeln!(out, "- {name}");
        } else {
            let _ = writeln!(out, "- [{name}]({url})");
        }
    }
    out
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}
