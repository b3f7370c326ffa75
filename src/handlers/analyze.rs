use crate::analyzer::analyze_template;
use crate::cli::ReportFormat;
use crate::reports;
use colored::Colorize;
use std::path::PathBuf;

pub fn handle_analyze(
    template: PathBuf,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> crate::Result<()> {
    println!("🔍 Analyzing template: {}", template.display());

    let analysis = analyze_template(&template)?;

    let rendered = match format {
        ReportFormat::Json => reports::render_json(&analysis)?,
        ReportFormat::Html => reports::render_html(&analysis)?,
        ReportFormat::Table => render_table(&analysis),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            println!("✅ Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    if !analysis.unsupported_resources.is_empty() {
        println!(
            "{} {} resource(s) have no alarm recommendations: {}",
            "ℹ️ ".dimmed(),
            analysis.unsupported_resources.len(),
            analysis.unsupported_resources.join(", ").dimmed()
        );
    }

    Ok(())
}

fn render_table(analysis: &crate::analyzer::ExtendedAnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} resources analyzed, {} with recommendations\n",
        analysis.metadata.total_resources, analysis.metadata.supported_resources
    ));

    for resource in &analysis.resources {
        out.push_str(&format!(
            "\n{} ({})\n",
            resource.logical_id.bold(),
            resource.resource_type
        ));
        for metric in &resource.metrics {
            out.push_str(&format!(
                "  {:<30} {:<18} warn ≥ {:<12} crit ≥ {:<12} [{}]\n",
                metric.metric_name,
                metric.namespace,
                metric.recommended_threshold.warning,
                metric.recommended_threshold.critical,
                metric.importance
            ));
        }
    }
    out
}
