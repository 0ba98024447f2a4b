//! Intermediate representation for layout schemas.
//!
//! Layout metadata from any source normalizes to these types before being
//! lowered and assembled into documents.

use serde::Deserialize;
use std::collections::BTreeMap;

/// One field as described by the remote layout metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field name as it appears on the layout.
    pub name: String,
    /// Remote result kind (`"number"`, `"text"`, ...). Missing means text.
    #[serde(default)]
    pub result: String,
    /// Name of the value list attached to the field, if any.
    #[serde(default)]
    pub value_list: Option<String>,
}

/// A named list of permitted values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueList {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Everything the metadata source reports for one layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetadata {
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Portal name to the fields shown in that portal.
    #[serde(default)]
    pub portals: BTreeMap<String, Vec<FieldDescriptor>>,
    /// `None` when the source did not send a value-list catalog.
    #[serde(default)]
    pub value_lists: Option<Vec<ValueList>>,
}

/// The canonical kind of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// FileMaker number: may hold text or be empty at runtime.
    FmNumber,
    /// Closed set of string values.
    ValueList { values: Vec<String> },
}

/// One entry of a canonical schema. Names are unique within a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub name: String,
    pub kind: FieldKind,
}

/// Canonical schema of one portal on a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalSchema {
    /// Raw portal name.
    pub schema_name: String,
    pub schema: Vec<SchemaEntry>,
}

/// Output flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Structural type aliases only.
    #[serde(alias = "ts")]
    TypesOnly,
    /// Zod validators plus types inferred from them.
    #[default]
    #[serde(alias = "zod")]
    Validator,
}

/// How value-list fields are typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueListMode {
    /// Only the listed values.
    Strict,
    /// The listed values or the empty string.
    #[serde(alias = "allowEmpty")]
    AllowEmpty,
    /// Value lists are not used for typing.
    #[default]
    Ignore,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: result.into(),
            value_list: None,
        }
    }

    pub fn with_value_list(mut self, value_list: impl Into<String>) -> Self {
        self.value_list = Some(value_list.into());
        self
    }
}

impl ValueList {
    pub fn new(name: impl Into<String>, values: Vec<&str>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(String::from).collect(),
        }
    }
}

impl SchemaEntry {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_from_wire_shape() {
        let meta: LayoutMetadata = serde_json::from_str(
            r#"{
                "fields": [
                    {"name": "id", "result": "number"},
                    {"name": "status", "result": "text", "valueList": "Statuses"},
                    {"name": "notes"}
                ],
                "portals": {"Orders": [{"name": "Orders::total", "result": "number"}]},
                "valueLists": [{"name": "Statuses", "values": ["Open", "Closed"]}]
            }"#,
        )
        .unwrap();

        assert_eq!(meta.fields[1].value_list.as_deref(), Some("Statuses"));
        assert_eq!(meta.fields[2].result, "");
        assert_eq!(meta.portals["Orders"].len(), 1);
        assert_eq!(meta.value_lists.unwrap()[0].values, vec!["Open", "Closed"]);
    }

    #[test]
    fn backend_spellings() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: Backend,
        }
        let parse = |s: &str| {
            serde_json::from_str::<Wrapper>(&format!(r#"{{"backend": "{s}"}}"#))
                .unwrap()
                .backend
        };
        assert_eq!(parse("types-only"), Backend::TypesOnly);
        assert_eq!(parse("ts"), Backend::TypesOnly);
        assert_eq!(parse("validator"), Backend::Validator);
        assert_eq!(parse("zod"), Backend::Validator);
    }

    #[test]
    fn value_list_mode_spellings() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: ValueListMode,
        }
        let parse = |s: &str| {
            serde_json::from_str::<Wrapper>(&format!(r#"{{"mode": "{s}"}}"#))
                .unwrap()
                .mode
        };
        assert_eq!(parse("strict"), ValueListMode::Strict);
        assert_eq!(parse("allow-empty"), ValueListMode::AllowEmpty);
        assert_eq!(parse("allowEmpty"), ValueListMode::AllowEmpty);
        assert_eq!(parse("ignore"), ValueListMode::Ignore);
        assert_eq!(ValueListMode::default(), ValueListMode::Ignore);
    }
}
