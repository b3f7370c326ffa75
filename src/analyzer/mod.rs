//! # Template Analyzer
//!
//! Parses CloudFormation/SAM templates and attaches CloudWatch metric
//! recommendations from the fixed registry to every supported resource.
//! The analyzer's output, [`ExtendedAnalysisResult`], is the only input
//! the CDK generator ever sees.

pub mod recommendations;
pub mod template;
pub mod types;

pub use recommendations::recommended_metrics;
pub use types::{
    AnalysisMetadata, ExtendedAnalysisResult, Importance, MetricDefinition, PropertyMap,
    ResourceWithMetrics, Severity, SupportedResourceType, ThresholdPair,
};

use crate::error::Result;
use log::info;
use std::path::Path;

/// Analyze a CloudFormation/SAM template and recommend alarms for every
/// supported resource found in it.
pub fn analyze_template(path: &Path) -> Result<ExtendedAnalysisResult> {
    let parsed = template::parse_template(path)?;
    let total_resources = parsed.len();

    let mut resources = Vec::new();
    let mut unsupported = Vec::new();

    for resource in parsed {
        let resource_type = SupportedResourceType::parse(&resource.resource_type);
        if resource_type.is_supported() {
            resources.push(ResourceWithMetrics {
                logical_id: resource.logical_id,
                resource_type: resource.resource_type,
                resource_properties: resource.properties,
                metrics: recommended_metrics(resource_type),
            });
        } else {
            unsupported.push(format!(
                "{} ({})",
                resource.logical_id, resource.resource_type
            ));
        }
    }

    info!(
        "analyzed {}: {} resources, {} supported, {} unsupported",
        path.display(),
        total_resources,
        resources.len(),
        unsupported.len()
    );

    Ok(ExtendedAnalysisResult {
        metadata: AnalysisMetadata {
            template_path: path.display().to_string(),
            total_resources,
            supported_resources: resources.len(),
            version: crate::VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        },
        resources,
        unsupported_resources: unsupported,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn attaches_metrics_and_tracks_unsupported() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
Resources:
  Db:
    Type: AWS::RDS::DBInstance
  Bucket:
    Type: AWS::S3::Bucket
"#,
        )
        .unwrap();

        let result = analyze_template(file.path()).expect("analyze");
        assert_eq!(result.metadata.total_resources, 2);
        assert_eq!(result.metadata.supported_resources, 1);
        assert_eq!(result.resources.len(), 1);
        assert!(!result.resources[0].metrics.is_empty());
        assert_eq!(result.unsupported_resources, vec!["Bucket (AWS::S3::Bucket)"]);
    }
}
