use serde::Serialize;
use serde_json::{Map as JsonMap, Value};
use std::collections::{BTreeMap, HashMap};

/// Argument mapping handed to a tool. Every value is a string.
pub type ToolArguments = BTreeMap<String, String>;

/// One parameter of a tool's invocation contract.
///
/// Values are always passed as strings. `declared_type` records what the
/// remote schema claimed (`"integer"`, `"boolean"`, ...) for diagnostics only;
/// it is never used to validate or convert arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    pub required: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            description: description.into(),
            declared_type: None,
        }
    }

    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: description.into(),
            declared_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Vec<ParameterSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Render the contract as a JSON schema where every property is a string.
    ///
    /// This is the schema the reasoning engine sees, not the one the tool host
    /// declared.
    pub fn input_schema(&self) -> Value {
        let mut properties = JsonMap::new();
        let mut required = Vec::new();
        for param in &self.parameters {
            let mut property = JsonMap::new();
            property.insert("type".to_string(), Value::String("string".to_string()));
            if !param.description.is_empty() {
                property.insert(
                    "description".to_string(),
                    Value::String(param.description.clone()),
                );
            }
            properties.insert(param.name.clone(), Value::Object(property));
            if param.required {
                required.push(Value::String(param.name.clone()));
            }
        }

        let mut schema = JsonMap::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        Value::Object(schema)
    }
}

/// Ordered set of tool descriptors keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    /// Build a catalog, keeping the first descriptor for any repeated name.
    ///
    /// Returns the catalog together with the names that were dropped.
    pub fn from_descriptors(descriptors: Vec<ToolDescriptor>) -> (Self, Vec<String>) {
        let mut catalog = Self::default();
        let mut duplicates = Vec::new();
        for descriptor in descriptors {
            if catalog.index.contains_key(&descriptor.name) {
                duplicates.push(descriptor.name);
                continue;
            }
            catalog
                .index
                .insert(descriptor.name.clone(), catalog.tools.len());
            catalog.tools.push(descriptor);
        }
        (catalog, duplicates)
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallRequest {
    pub call_id: String,
    pub tool_name: String,
    pub arguments: ToolArguments,
}

impl ToolCallRequest {
    pub fn new(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        arguments: ToolArguments,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// What the reasoning engine said in one round.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssistantMessage {
    pub text: String,
    pub tool_calls: Vec<ToolCallRequest>,
}

impl AssistantMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_tool_calls(text: impl Into<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
        Self {
            text: text.into(),
            tool_calls,
        }
    }

    pub fn is_final(&self) -> bool {
        self.tool_calls.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub call_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    System(String),
    User(String),
    Assistant(AssistantMessage),
    ToolResult(ToolResult),
}

impl Turn {
    pub fn tool_result(call_id: impl Into<String>, text: impl Into<String>) -> Self {
        Turn::ToolResult(ToolResult {
            call_id: call_id.into(),
            text: text.into(),
        })
    }

    pub fn role(&self) -> &'static str {
        match self {
            Turn::System(_) => "system",
            Turn::User(_) => "user",
            Turn::Assistant(_) => "assistant",
            Turn::ToolResult(_) => "tool",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestrationResult {
    FinalAnswer(String),
    RoundLimitExceeded,
}

/// Coerce engine-supplied JSON arguments to the string-or-absent contract.
///
/// Strings pass through, numbers and booleans use their JSON text, `null`
/// means absent, arrays and objects become compact JSON text.
pub fn coerce_arguments(value: &Value) -> ToolArguments {
    let Some(object) = value.as_object() else {
        return ToolArguments::new();
    };
    object
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect()
}

/// Wire form of an argument mapping: a JSON object of strings.
pub fn arguments_to_json(arguments: &ToolArguments) -> Value {
    Value::Object(
        arguments
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect(),
    )
}
