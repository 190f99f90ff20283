//! Catalog adapter
//!
//! Fetches the tool listing from a [`ToolHost`] once per session and converts
//! each declared input schema into the string-typed invocation contract the
//! reasoning engine sees.
//!
//! Conversion rules, per tool:
//!
//! 1. If the schema declares the subject property (`city` by default), the
//!    contract is exactly one required parameter with that name.
//! 2. Otherwise, a schema without properties yields an empty contract.
//! 3. Otherwise every property becomes a parameter, in schema order, required
//!    iff listed in the schema's `required` array.
//!
//! Values are always strings; any non-string declared type is recorded in
//! [`ParameterSpec::declared_type`] and otherwise ignored.

use crate::application::tooling::{HostError, RemoteTool, ToolHost};
use crate::types::{ParameterSpec, ToolCatalog, ToolDescriptor};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("tool catalog unavailable: {0}")]
    CatalogUnavailable(#[from] HostError),
}

impl CatalogError {
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::CatalogUnavailable(HostError::Spawn { server, .. }) => format!(
                "Could not start the '{server}' tool server. Check the [server] command in your configuration."
            ),
            CatalogError::CatalogUnavailable(err) => {
                format!("Could not load the tool list: {err}")
            }
        }
    }
}

/// Ask the host for its tools and build the session catalog.
///
/// Repeated tool names keep their first occurrence.
pub async fn fetch_catalog(
    host: &dyn ToolHost,
    subject_field: &str,
) -> Result<ToolCatalog, CatalogError> {
    let listing = host.list_tools().await.map_err(|err| {
        warn!(%err, "Tool host could not list its tools");
        CatalogError::CatalogUnavailable(err)
    })?;

    let descriptors = listing
        .iter()
        .map(|tool| describe(tool, subject_field))
        .collect();
    let (catalog, duplicates) = ToolCatalog::from_descriptors(descriptors);
    for name in &duplicates {
        warn!(tool = name.as_str(), "Tool listed more than once; keeping the first");
    }

    info!(tools = catalog.len(), names = ?catalog.names(), "Tool catalog ready");
    Ok(catalog)
}

fn describe(tool: &RemoteTool, subject_field: &str) -> ToolDescriptor {
    let parameters = convert_schema(tool.input_schema.as_ref(), subject_field);
    debug!(
        tool = tool.name.as_str(),
        parameters = parameters.len(),
        "Converted tool schema"
    );
    ToolDescriptor::new(
        tool.name.clone(),
        tool.description.clone().unwrap_or_default(),
        parameters,
    )
}

/// Convert one declared input schema into parameter specs.
pub fn convert_schema(schema: Option<&Value>, subject_field: &str) -> Vec<ParameterSpec> {
    let Some(properties) = schema
        .and_then(|schema| schema.get("properties"))
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    if let Some(subject) = properties.get(subject_field) {
        let mut spec = ParameterSpec::required(subject_field, property_description(subject));
        spec.declared_type = foreign_type(subject);
        return vec![spec];
    }

    let required: Vec<&str> = schema
        .and_then(|schema| schema.get("required"))
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    properties
        .iter()
        .map(|(name, property)| ParameterSpec {
            name: name.clone(),
            required: required.contains(&name.as_str()),
            description: property_description(property),
            declared_type: foreign_type(property),
        })
        .collect()
}

fn property_description(property: &Value) -> String {
    property
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Declared type when it is something other than `string`.
fn foreign_type(property: &Value) -> Option<String> {
    match property.get("type")? {
        Value::String(kind) if kind == "string" => None,
        Value::String(kind) => Some(kind.clone()),
        other => Some(other.to_string()),
    }
}
