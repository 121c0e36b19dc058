//! # Static Schema Descriptors
//!
//! Schemas for types that only exist as data. A descriptor names a type
//! and lists its properties with optional annotations; it is loaded from
//! JSON or YAML and turned into a `Schema<Record>`.
//!
//! ```yaml
//! type: App\Person
//! properties:
//!   - name: name
//!     type: string
//!   - name: age
//!     type: int|null
//!   - name: notes        # untyped
//! ```

use std::collections::HashSet;

use hydrate_core::Value;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{Schema, SchemaBuilder};

/// Error loading a schema descriptor.
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("invalid JSON descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML descriptor: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("descriptor for {type_name} declares property '{property}' more than once")]
    DuplicateProperty { type_name: String, property: String },
}

/// A type declared as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDescriptor {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
}

/// One declared property of a [`SchemaDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDescriptor {
    pub name: String,
    /// Raw annotation, e.g. `stdClass[]|null`. Absent means untyped.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub declared: Option<String>,
}

impl SchemaDescriptor {
    pub fn from_json_str(json: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, DescriptorError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build the record schema. Fresh records hold one empty slot per
    /// property, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::DuplicateProperty` if a name repeats.
    pub fn into_schema(self) -> Result<Schema<Record>, DescriptorError> {
        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.name.as_str()) {
                return Err(DescriptorError::DuplicateProperty {
                    type_name: self.type_name.clone(),
                    property: property.name.clone(),
                });
            }
        }

        let template = Record {
            type_name: self.type_name.clone(),
            fields: self
                .properties
                .iter()
                .map(|p| (p.name.clone(), None))
                .collect(),
        };
        let builder = SchemaBuilder::with_factory(self.type_name, move || template.clone());

        let schema = self
            .properties
            .into_iter()
            .enumerate()
            .fold(builder, |builder, (slot, property)| {
                builder.property(
                    property.name,
                    property.declared.as_deref(),
                    Box::new(move |record: &mut Record, value: Value| {
                        if let Some(field) = record.fields.get_mut(slot) {
                            field.1 = Some(value);
                        }
                        Ok(())
                    }),
                )
            })
            .build();
        Ok(schema)
    }
}

/// An instance of a descriptor-declared type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, Option<Value>)>,
}

impl Record {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The value of a set property.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    /// True if `name` was supplied when the record was constructed.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Every declared property with its value, if set, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_ref()))
    }
}
