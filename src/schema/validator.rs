//! Payload validation against a JSON Schema

use super::types::SchemaNode;
use crate::error::{Error, Result};
use serde_json::Value;

/// Schema shipped with the crate for CMDB payloads
pub const BUNDLED_SCHEMA: &str = include_str!("../../schemas/portal-cmdb-schema.json");

const MAX_VALUE_PREVIEW: usize = 80;

/// A parsed schema ready for validation
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: SchemaNode,
}

impl Schema {
    /// Load the bundled CMDB schema
    ///
    /// A malformed bundled schema is a requirement failure: nothing can be
    /// validated without it.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_SCHEMA)
            .map_err(|e| Error::requirement(format!("Bundled CMDB schema is unusable: {e}")))
    }

    /// Parse a schema from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: SchemaNode = serde_json::from_str(json)?;
        Ok(Self { root })
    }

    /// Build a schema from a root node
    pub fn from_node(root: SchemaNode) -> Self {
        Self { root }
    }

    /// The root schema node
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Validate an instance, reporting the first violation found
    pub fn validate(&self, instance: &Value) -> Result<()> {
        let mut path = InstancePath::default();
        match check(&self.root, instance, &mut path) {
            Some(violation) => Err(Error::validation(violation)),
            None => Ok(()),
        }
    }

    /// Check whether an instance conforms
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).is_ok()
    }
}

/// Location inside the instance being validated
#[derive(Debug, Default)]
struct InstancePath {
    segments: Vec<Segment>,
}

#[derive(Debug)]
enum Segment {
    Key(String),
    Index(usize),
}

impl InstancePath {
    fn render(&self) -> String {
        if self.segments.is_empty() {
            return "root".to_string();
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                Segment::Index(i) => {
                    out.push_str(&format!("[{i}]"));
                }
            }
        }
        out
    }
}

fn violation(message: String, path: &InstancePath) -> Option<String> {
    Some(format!("{message} at {}", path.render()))
}

fn preview(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > MAX_VALUE_PREVIEW {
        let cut: String = text.chars().take(MAX_VALUE_PREVIEW).collect();
        format!("{cut}...")
    } else {
        text
    }
}

fn check(node: &SchemaNode, instance: &Value, path: &mut InstancePath) -> Option<String> {
    if let Some(expected) = &node.json_type {
        if !expected.matches(instance) {
            return violation(
                format!("{} is not of type {expected}", preview(instance)),
                path,
            );
        }
    }

    if let Some(allowed) = &node.enum_values {
        if !allowed.contains(instance) {
            let list = Value::Array(allowed.clone());
            return violation(
                format!("{} is not one of {}", preview(instance), preview(&list)),
                path,
            );
        }
    }

    match instance {
        Value::Object(map) => {
            for name in &node.required {
                if !map.contains_key(name) {
                    return violation(format!("'{name}' is a required property"), path);
                }
            }

            for (name, value) in map {
                match node.properties.get(name) {
                    Some(child) => {
                        path.segments.push(Segment::Key(name.clone()));
                        let found = check(child, value, path);
                        path.segments.pop();
                        if found.is_some() {
                            return found;
                        }
                    }
                    None if node.additional_properties == Some(false) => {
                        return violation(
                            format!("Additional properties are not allowed ('{name}' was unexpected)"),
                            path,
                        );
                    }
                    None => {}
                }
            }
        }
        Value::Array(items) => {
            if let Some(min) = node.min_items {
                if items.len() < min {
                    return violation(format!("{} is too short", preview(instance)), path);
                }
            }

            if let Some(item_schema) = &node.items {
                for (i, item) in items.iter().enumerate() {
                    path.segments.push(Segment::Index(i));
                    let found = check(item_schema, item, path);
                    path.segments.pop();
                    if found.is_some() {
                        return found;
                    }
                }
            }
        }
        Value::String(s) => {
            if let Some(min) = node.min_length {
                if s.chars().count() < min {
                    return violation(format!("{} is too short", preview(instance)), path);
                }
            }
        }
        _ => {}
    }

    None
}

