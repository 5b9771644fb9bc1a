//! Connect-style JSON rendering of a [`Schema`].
//!
//! Same envelope a Kafka Connect JSON converter uses for its `schema` part:
//! `{"type": "struct", "fields": [{..., "field": "id"}], "optional": true}`.
use serde_json::{json, Map, Value};

use crate::schema::Schema;

pub fn to_connect_json(schema: &Schema) -> Value {
    match schema {
        Schema::Primitive { kind, optional } => json!({
            "type": kind.type_name(),
            "optional": optional,
        }),
        Schema::Array { element, optional } => json!({
            "type": "array",
            "items": to_connect_json(element),
            "optional": optional,
        }),
        Schema::Struct { fields, optional } => {
            let fields = fields.iter().map(|f| {
                let mut o = match to_connect_json(&f.schema) {
                    Value::Object(o) => o,
                    _ => Map::new(),  // every arm above renders an object
                };
                o.insert("field".to_owned(), Value::from(f.name.clone()));
                Value::Object(o)
            }).collect::<Vec<_>>();
            json!({
                "type": "struct",
                "fields": fields,
                "optional": optional,
            })
        }
    }
}
