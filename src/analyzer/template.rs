//! CloudFormation/SAM template parsing.
//!
//! Templates are parsed with `serde_yaml`, which also accepts JSON, so a
//! single code path covers both formats. Only the `Resources` section is
//! inspected; everything else in the template is ignored.

use crate::analyzer::types::PropertyMap;
use crate::error::{AnalysisError, Result};
use log::debug;
use std::path::Path;

/// A raw template resource: logical ID, AWS type, and its properties.
#[derive(Debug, Clone)]
pub struct TemplateResource {
    pub logical_id: String,
    pub resource_type: String,
    pub properties: PropertyMap,
}

/// Parse the `Resources` section of a CloudFormation/SAM template file.
///
/// Resources without a `Type` string are skipped with a debug log rather
/// than failing the whole analysis; a missing or empty `Resources`
/// section is an error.
pub fn parse_template(path: &Path) -> Result<Vec<TemplateResource>> {
    let display_path = path.display().to_string();

    if !path.exists() {
        return Err(AnalysisError::TemplateNotFound { path: display_path }.into());
    }

    let content = std::fs::read_to_string(path)?;
    let doc: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| AnalysisError::TemplateParsing {
            path: display_path.clone(),
            message: e.to_string(),
        })?;

    let resources = doc
        .get("Resources")
        .and_then(|r| r.as_mapping())
        .ok_or_else(|| AnalysisError::MissingResources {
            path: display_path.clone(),
        })?;

    let mut parsed = Vec::with_capacity(resources.len());
    for (key, value) in resources {
        let Some(logical_id) = key.as_str() else {
            debug!("skipping resource with non-string logical ID: {:?}", key);
            continue;
        };
        let Some(resource_type) = value.get("Type").and_then(|t| t.as_str()) else {
            debug!("skipping resource '{}' without a Type", logical_id);
            continue;
        };

        let properties = value
            .get("Properties")
            .map(|props| yaml_to_property_map(logical_id, props))
            .transpose()?
            .unwrap_or_default();

        parsed.push(TemplateResource {
            logical_id: logical_id.to_string(),
            resource_type: resource_type.to_string(),
            properties,
        });
    }

    if parsed.is_empty() {
        return Err(AnalysisError::MissingResources { path: display_path }.into());
    }

    debug!("parsed {} resources from {}", parsed.len(), display_path);
    Ok(parsed)
}

/// Convert a YAML properties node into a JSON property map. YAML allows
/// non-string keys, which JSON does not; those templates are rejected.
fn yaml_to_property_map(logical_id: &str, props: &serde_yaml::Value) -> Result<PropertyMap> {
    let json: serde_json::Value =
        serde_json::to_value(props).map_err(|e| AnalysisError::TemplateParsing {
            path: logical_id.to_string(),
            message: format!("properties are not representable as JSON: {}", e),
        })?;

    match json {
        serde_json::Value::Object(map) => Ok(map),
        _ => Ok(PropertyMap::new()),
    }
}
