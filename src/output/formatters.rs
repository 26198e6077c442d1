//! Output formatting functionality
//!
//! Rendering helpers shared by the formatters in the parent module.

use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;

use crate::error::{ModulithError, Result};
use crate::models::summary::{DependencyListing, ModuleSummary, VerificationReport};
use crate::models::type_ref::local_name;
use crate::models::violation::Violation;

fn paint(use_colors: bool, style: Style, text: impl AsRef<str>) -> String {
    if use_colors {
        style.paint(text.as_ref()).to_string()
    } else {
        text.as_ref().to_string()
    }
}

/// Render a module summary as a documentation block
pub fn format_module_text(module: &ModuleSummary, use_colors: bool) -> String {
    let mut output = String::new();

    output.push_str(&paint(use_colors, Blue.bold(), format!("## {} ##", module.display_name)));
    output.push('\n');
    output.push_str(&format!("> Logical name: {}\n", module.name));
    output.push_str(&format!("> Base package: {}\n", module.base_package));

    if module.explicit_interfaces {
        output.push_str("> Named interfaces:\n");
        for interface in &module.named_interfaces {
            let types: Vec<&str> = interface.types.iter().map(|t| local_name(t)).collect();
            output.push_str(&format!(
                "  + {} ({} types): [{}]\n",
                paint(use_colors, Cyan.normal(), &interface.name),
                types.len(),
                types.join(", ")
            ));
        }
    }

    if module.components.is_empty() {
        output.push_str("> Components: none\n");
    } else {
        output.push_str("> Components:\n");
        for component in &module.components {
            output.push_str(&format!("  {}\n", component));
        }
    }

    if !module.dependencies.is_empty() {
        output.push_str(&format!("> Depends on: {}\n", module.dependencies.join(", ")));
    }

    output
}

/// Render one violation as a text block
pub fn format_violation_text(violation: &Violation, use_colors: bool) -> String {
    format!(
        "{} Module '{}' depends on non-exposed type {} within module '{}'!\n  {}\n",
        paint(use_colors, Red.bold(), "✗"),
        violation.origin_module,
        paint(use_colors, Yellow.normal(), &violation.target_type),
        violation.target_module,
        paint(use_colors, Style::new().dimmed(), &violation.description)
    )
}

/// Render a verification report as text
pub fn format_report_text(report: &VerificationReport, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&paint(use_colors, Blue.bold(), "Module Verification Summary"));
    output.push_str("\n\n");
    output.push_str(&format!("Root package: {}\n", report.root_package));
    output.push_str(&format!("Modules: {}\n", report.modules.len()));
    output.push_str(&format!("Types: {}\n", report.type_count));
    output.push_str(&format!("Duration: {}ms\n", report.duration_ms));

    if verbose {
        output.push_str("\nModules:\n\n");
        for module in &report.modules {
            output.push_str(&format_module_text(module, use_colors));
            output.push('\n');
        }
    }

    if !report.cycles.is_empty() {
        output.push('\n');
        output.push_str(&paint(
            use_colors,
            Yellow.bold(),
            format!("Cyclic module dependencies: {}", report.cycles.len()),
        ));
        output.push('\n');
        for cycle in &report.cycles {
            output.push_str(&format!("  {}\n", cycle.join(" <-> ")));
        }
    }

    output.push('\n');
    if report.violations.is_empty() {
        output.push_str(&paint(use_colors, Green.bold(), "✓ No violations found"));
        output.push('\n');
    } else {
        output.push_str(&paint(
            use_colors,
            Red.bold(),
            format!("Violations: {}", report.violations.len()),
        ));
        output.push_str("\n\n");
        for violation in report.violations.iter() {
            output.push_str(&format_violation_text(violation, use_colors));
        }
    }

    output
}

/// Render a dependency listing as text
pub fn format_dependencies_text(listing: &DependencyListing, use_colors: bool) -> String {
    let mut output = String::new();

    output.push_str(&paint(
        use_colors,
        Blue.bold(),
        format!("Dependencies of '{}' ({})", listing.module, listing.depth),
    ));
    output.push('\n');

    if listing.dependencies.is_empty() {
        output.push_str("  none\n");
    } else {
        for dependency in &listing.dependencies {
            output.push_str(&format!("  {}\n", dependency));
        }
    }

    output.push_str("\nBase packages:\n");
    for package in &listing.base_packages {
        output.push_str(&format!("  {}\n", package));
    }

    output
}

/// Serialize any value as pretty JSON
pub fn format_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| ModulithError::JsonSerialize { source: e })
}

fn csv_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| ModulithError::io_error(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ModulithError::CsvSerialize { source: e })
}

/// One row per violation
pub fn format_violations_csv(report: &VerificationReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "origin_module",
        "target_module",
        "origin_type",
        "target_type",
        "kind",
        "description",
    ])?;

    for violation in report.violations.iter() {
        let kind = violation.kind.to_string();
        writer.write_record([
            violation.origin_module.as_str(),
            violation.target_module.as_str(),
            violation.origin_type.as_str(),
            violation.target_type.as_str(),
            kind.as_str(),
            violation.description.as_str(),
        ])?;
    }

    csv_string(writer)
}

/// One row per module, list cells joined with `;`
pub fn format_modules_csv(modules: &[ModuleSummary]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "name",
        "display_name",
        "base_package",
        "named_interfaces",
        "components",
        "dependencies",
    ])?;

    for module in modules {
        let interfaces: Vec<&str> = module.named_interfaces.iter().map(|i| i.name.as_str()).collect();
        let interfaces = interfaces.join(";");
        let components = module.components.join(";");
        let dependencies = module.dependencies.join(";");
        writer.write_record([
            module.name.as_str(),
            module.display_name.as_str(),
            module.base_package.as_str(),
            interfaces.as_str(),
            components.as_str(),
            dependencies.as_str(),
        ])?;
    }

    csv_string(writer)
}

/// One row per dependency module; the module itself has an empty dependency
pub fn format_dependencies_csv(listing: &DependencyListing) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["module", "depth", "dependency", "base_package"])?;

    let depth = listing.depth.to_string();
    let mut rows = vec![("", listing.base_packages.first().map(String::as_str).unwrap_or(""))];
    rows.extend(
        listing
            .dependencies
            .iter()
            .zip(listing.base_packages.iter().skip(1))
            .map(|(dependency, package)| (dependency.as_str(), package.as_str())),
    );

    for (dependency, package) in rows {
        writer.write_record([listing.module.as_str(), depth.as_str(), dependency, package])?;
    }

    csv_string(writer)
}
