//! Descriptor model for `protoc-gen-doc` JSON output.
//!
//! Every field is optional on the wire and falls back to its default, so partial descriptors
//! (hand-written fixtures, older generator versions) still load.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Documentation {
    pub files: Vec<File>,
    pub scalar_value_types: Vec<ScalarValueType>,
}

impl Documentation {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(text)?;
        tracing::debug!(files = doc.files.len(), "loaded descriptor");
        Ok(doc)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let doc: Self = serde_json::from_reader(reader)?;
        tracing::debug!(files = doc.files.len(), "loaded descriptor");
        Ok(doc)
    }

    /// Looks a file up by its `name` (the `.proto` path).
    pub fn file(&self, name: &str) -> Result<&File> {
        self.files
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::UnknownFile {
                name: name.to_string(),
            })
    }

    pub fn scalar_value_type(&self, proto_type: &str) -> Option<&ScalarValueType> {
        self.scalar_value_types
            .iter()
            .find(|t| t.proto_type == proto_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct File {
    pub name: String,
    pub description: String,
    pub package: String,
    pub has_enums: bool,
    pub has_extensions: bool,
    pub has_messages: bool,
    pub has_services: bool,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
    pub extensions: Vec<Extension>,
    pub services: Vec<Service>,
}

impl File {
    pub fn message(&self, full_name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.full_name == full_name)
    }

    pub fn enumeration(&self, full_name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.full_name == full_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Message {
    pub name: String,
    pub long_name: String,
    pub full_name: String,
    pub description: String,
    pub has_extensions: bool,
    pub has_fields: bool,
    pub has_oneofs: bool,
    pub extensions: Vec<Extension>,
    pub fields: Vec<MessageField>,
}

impl Message {
    /// Label used for diagram nodes: `longName`, or `name` when the descriptor omits it.
    pub fn display_name(&self) -> &str {
        if self.long_name.is_empty() {
            &self.name
        } else {
            &self.long_name
        }
    }

    pub fn has_validated_fields(&self) -> bool {
        self.fields.iter().any(MessageField::has_validation)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageField {
    pub name: String,
    pub description: String,
    pub label: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub long_type: String,
    pub full_type: String,
    pub ismap: bool,
    pub isoneof: bool,
    pub oneofdecl: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<FieldOptions>,
}

impl MessageField {
    pub fn is_deprecated(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.deprecated)
            .unwrap_or(false)
    }

    pub fn has_validation(&self) -> bool {
        self.options
            .as_ref()
            .is_some_and(|o| o.validator_field.is_some() || o.validate_rules.is_some())
    }

    /// Every validation rule attached to the field, `validator.field` rules first.
    pub fn validation_rules(&self) -> impl Iterator<Item = &ValidatorRule> {
        self.options.iter().flat_map(|o| {
            o.validator_field
                .iter()
                .flatten()
                .chain(o.validate_rules.iter().flatten())
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(rename = "validator.field", skip_serializing_if = "Option::is_none")]
    pub validator_field: Option<Vec<ValidatorRule>>,
    #[serde(rename = "validate.rules", skip_serializing_if = "Option::is_none")]
    pub validate_rules: Option<Vec<ValidatorRule>>,
    /// Custom options, kept verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorRule {
    pub name: String,
    pub value: Value,
}

impl ValidatorRule {
    /// `value` rendered the way documentation shows it (strings unquoted).
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Enum {
    pub name: String,
    pub long_name: String,
    pub full_name: String,
    pub description: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumValue {
    pub name: String,
    pub number: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Extension {
    pub name: String,
    pub long_name: String,
    pub full_name: String,
    pub description: String,
    pub label: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub long_type: String,
    pub full_type: String,
    pub number: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    pub containing_type: String,
    pub containing_long_type: String,
    pub containing_full_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub long_name: String,
    pub full_name: String,
    pub description: String,
    pub methods: Vec<ServiceMethod>,
}

impl Service {
    /// `(method, rule)` pairs for every `google.api.http` binding, in declaration order.
    pub fn http_bindings(&self) -> impl Iterator<Item = (&ServiceMethod, &HttpRule)> {
        self.methods
            .iter()
            .flat_map(|m| m.http_rules().iter().map(move |r| (m, r)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceMethod {
    pub name: String,
    pub description: String,
    pub request_type: String,
    pub request_long_type: String,
    pub request_full_type: String,
    pub request_streaming: bool,
    pub response_type: String,
    pub response_long_type: String,
    pub response_full_type: String,
    pub response_streaming: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<MethodOptions>,
}

impl ServiceMethod {
    pub fn http_rules(&self) -> &[HttpRule] {
        self.options
            .as_ref()
            .and_then(|o| o.http.as_ref())
            .map(|h| h.rules.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodOptions {
    #[serde(rename = "google.api.http", skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpOptions>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpOptions {
    pub rules: Vec<HttpRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpRule {
    pub method: String,
    pub pattern: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScalarValueType {
    pub proto_type: String,
    pub notes: String,
    pub cpp_type: String,
    pub cs_type: String,
    pub go_type: String,
    pub java_type: String,
    pub php_type: String,
    pub python_type: String,
    pub ruby_type: String,
}
