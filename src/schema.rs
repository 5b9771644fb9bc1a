// Strongly-typed schema produced by inference. No serde_json::Value here.
use std::fmt;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Boolean,
    Int32,
    Int64,
    Float64,
}

impl PrimitiveKind {
    pub fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Primitive { kind: PrimitiveKind, optional: bool },
    Struct {
        fields: Vec<Field>,  // first-occurrence order
        optional: bool,
    },
    Array {
        element: Box<Schema>,
        optional: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

impl Schema {
    pub fn optional_primitive(kind: PrimitiveKind) -> Self {
        Schema::Primitive { kind, optional: true }
    }

    pub fn optional_array(element: Schema) -> Self {
        Schema::Array { element: Box::new(element), optional: true }
    }

    /// Empty optional struct; what an absent document infers to.
    pub fn empty_struct() -> Self {
        StructBuilder::new().build()
    }

    pub fn is_optional(&self) -> bool {
        match self {
            Schema::Primitive { optional, .. }
            | Schema::Struct { optional, .. }
            | Schema::Array { optional, .. } => *optional,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::Primitive { kind, .. } => kind.type_name(),
            Schema::Struct { .. } => "struct",
            Schema::Array { .. } => "array",
        }
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Schema::Primitive { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Struct fields; empty for non-struct schemas.
    pub fn fields(&self) -> &[Field] {
        match self {
            Schema::Struct { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.fields().iter().find(|f| f.name == name).map(|f| &f.schema)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields().iter().map(|f| f.name.as_str()).collect()
    }

    pub fn element(&self) -> Option<&Schema> {
        match self {
            Schema::Array { element, .. } => Some(element),
            _ => None,
        }
    }
}

/// Compact one-line rendering, e.g. `struct{id: int32, tags: array<string>}`.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Primitive { kind, .. } => write!(f, "{kind}"),
            Schema::Array { element, .. } => write!(f, "array<{element}>"),
            Schema::Struct { fields, .. } => {
                f.write_str("struct{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.schema)?;
                }
                f.write_str("}")
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// BUILDER
// ————————————————————————————————————————————————————————————————————————————

/// Growing struct schema shared by the plain-object and array-union paths.
///
/// Field names are unique: the first definition of a name wins and any
/// later `add_field` with the same name is a no-op.
#[derive(Debug, Clone, Default)]
pub struct StructBuilder {
    fields: IndexMap<String, Schema>,
}

impl StructBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Append `name` unless already present. Returns `true` if appended.
    pub fn add_field(&mut self, name: &str, schema: Schema) -> bool {
        if self.has_field(name) {
            return false;
        }
        self.fields.insert(name.to_owned(), schema);
        true
    }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn build(self) -> Schema {
        let fields = self.fields
            .into_iter()
            .map(|(name, schema)| Field { name, schema })
            .collect();
        Schema::Struct { fields, optional: true }
    }
}
