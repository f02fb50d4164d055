//! Raw model declaration: ordered field name -> descriptor mapping.

use serde_json::Value;

/// Semantic kind of a declared field. The primary-key sample value is
/// consulted only to learn whether the key type is numeric or textual,
/// for coercing URL path parameters.
#[derive(Clone, Debug)]
pub enum FieldKind {
    PrimaryKey { sample: Value },
    Value,
}

#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
}

/// Declaration of one model: field names in declaration order.
#[derive(Clone, Debug, Default)]
pub struct ModelDefinition {
    fields: Vec<(String, FieldDescriptor)>,
}

impl ModelDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the primary-key field. The sample value decides how URL
    /// path ids are coerced (number vs string).
    pub fn primary_key(mut self, name: impl Into<String>, sample: Value) -> Self {
        self.fields.push((
            name.into(),
            FieldDescriptor {
                kind: FieldKind::PrimaryKey { sample },
            },
        ));
        self
    }

    /// Declare a regular value field.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push((
            name.into(),
            FieldDescriptor {
                kind: FieldKind::Value,
            },
        ));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(n, d)| (n.as_str(), d))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }
}
