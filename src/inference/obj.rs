use serde_json::{Map, Value};

use crate::error::Result;
use crate::schema::{Schema, StructBuilder};
use super::value_to_schema;

/// Struct schema of one object, fields in source order.
pub fn build_struct(map: &Map<String, Value>, path: &str) -> Result<Schema> {
    let mut builder = StructBuilder::new();
    fold_fields(&mut builder, map, path)?;
    Ok(builder.build())
}

/// Feed an object's entries into `builder`.
///
/// Each value's schema is resolved before the name is checked, so a failing
/// value aborts even when its name is a duplicate that would be ignored.
pub(crate) fn fold_fields(builder: &mut StructBuilder, map: &Map<String, Value>, path: &str) -> Result<()> {
    for (name, value) in map {
        let field_path = format!("{path}.{name}");
        let Some(schema) = value_to_schema(value, &field_path)? else {
            tracing::debug!(path = %field_path, "dropping field with no inferable schema");
            continue;
        };
        if !builder.add_field(name, schema) {
            tracing::trace!(path = %field_path, "ignoring duplicate field; first definition wins");
        }
    }
    Ok(())
}
