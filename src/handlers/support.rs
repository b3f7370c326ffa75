use crate::analyzer::types::SupportedResourceType;
use crate::analyzer::recommended_metrics;
use colored::Colorize;

pub fn handle_support(detailed: bool) -> crate::Result<()> {
    println!("Supported resource types:\n");

    for resource_type in SupportedResourceType::all_supported() {
        let metrics = recommended_metrics(*resource_type);
        println!(
            "  {} ({} metric(s))",
            resource_type.aws_type().bold(),
            metrics.len()
        );

        if detailed {
            for metric in metrics {
                println!(
                    "    {:<30} warn ≥ {:<14} crit ≥ {:<14} [{}]",
                    metric.metric_name,
                    metric.recommended_threshold.warning,
                    metric.recommended_threshold.critical,
                    metric.importance
                );
            }
        }
    }

    if !detailed {
        println!("\nUse --detailed to list every metric with thresholds.");
    }
    Ok(())
}
