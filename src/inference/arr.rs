use serde_json::Value;

use crate::error::{ArrayConflict, InferenceError, Result};
use crate::schema::{Schema, StructBuilder};
use super::{describe, scalar_to_schema, tag_of};

/// Validate homogeneity and return the representative element.
///
/// Nulls are skipped. The first non-null element fixes the reference tag;
/// every later non-null element must share it, and numbers must also
/// resolve to the same width. `None` when there is no non-null element.
pub fn representative_element<'a>(xs: &'a [Value], path: &str) -> Result<Option<&'a Value>> {
    let mut reference: Option<&Value> = None;
    let mut reference_schema: Option<Schema> = None;

    for el in xs.iter().filter(|el| !el.is_null()) {
        let Some(first) = reference else {
            reference = Some(el);
            if matches!(el, Value::Number(_)) {
                reference_schema = scalar_to_schema(el);
            }
            continue;
        };

        let found = tag_of(el);
        if found != tag_of(first) {
            return Err(InferenceError::InconsistentArrayType {
                path: path.to_owned(),
                conflict: ArrayConflict::Tag { reference: describe(first), found },
            });
        }

        // numbers can resolve to different widths
        if let Some(ref_schema) = &reference_schema {
            let el_schema = scalar_to_schema(el);
            if el_schema.as_ref() != Some(ref_schema) {
                return Err(InferenceError::InconsistentArrayType {
                    path: path.to_owned(),
                    conflict: number_conflict(first, ref_schema, el, el_schema.as_ref()),
                });
            }
        }
    }

    Ok(reference)
}

fn number_conflict(first: &Value, ref_schema: &Schema, el: &Value, el_schema: Option<&Schema>) -> ArrayConflict {
    // both sides are numbers here, so both resolved to primitives
    match (ref_schema.primitive_kind(), el_schema.and_then(Schema::primitive_kind)) {
        (Some(reference_kind), Some(found_kind)) => ArrayConflict::Number {
            reference: describe(first),
            found: describe(el),
            reference_kind,
            found_kind,
        },
        _ => ArrayConflict::Tag { reference: describe(first), found: tag_of(el) },
    }
}

/// Schema of an array value; `Ok(None)` drops the field carrying it.
///
/// Empty arrays and arrays holding only nulls have no sample to infer from.
pub fn array_schema(xs: &[Value], path: &str) -> Result<Option<Schema>> {
    if xs.is_empty() {
        tracing::debug!(path, "empty array; no element sample");
        return Ok(None);
    }
    let Some(sample) = representative_element(xs, path)? else {
        tracing::debug!(path, len = xs.len(), "array holds only nulls; dropping");
        return Ok(None);
    };

    let element = match sample {
        Value::Object(_) => union_struct(xs, path)?,
        // arrays of arrays are not supported
        other => scalar_to_schema(other).ok_or_else(|| InferenceError::UnrecognizedArrayMember {
            path: path.to_owned(),
            member: tag_of(other),
        })?,
    };
    Ok(Some(Schema::optional_array(element)))
}

/// Merge every object element into one struct.
///
/// New names append in first-seen order across the whole array; a name
/// already present keeps its first definition, even across elements.
pub fn union_struct(xs: &[Value], path: &str) -> Result<Schema> {
    let member_path = format!("{path}[]");
    let mut builder = StructBuilder::new();
    for el in xs {
        let Value::Object(map) = el else { continue };
        super::obj::fold_fields(&mut builder, map, &member_path)?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Tag;
    use crate::schema::PrimitiveKind;
    use serde_json::json;

    fn arr(v: Value) -> Vec<Value> {
        match v {
            Value::Array(xs) => xs,
            other => panic!("not an array: {other}"),
        }
    }

    fn schema_of(v: Value) -> Result<Option<Schema>> {
        array_schema(&arr(v), "$.xs")
    }

    #[test]
    fn nulls_are_skipped() {
        let s = schema_of(json!(["a", null, "b"])).unwrap().unwrap();
        assert_eq!(s.to_string(), "array<string>");
        assert!(s.is_optional());

        let s = schema_of(json!([null, 3, null, 4])).unwrap().unwrap();
        assert_eq!(s.element().and_then(Schema::primitive_kind), Some(PrimitiveKind::Int32));
    }

    #[test]
    fn representative_is_first_non_null() {
        let xs = arr(json!([null, true, false]));
        let rep = representative_element(&xs, "$").unwrap();
        assert_eq!(rep, Some(&json!(true)));
    }

    #[test]
    fn empty_and_all_null_arrays_are_absent() {
        assert_eq!(schema_of(json!([])).unwrap(), None);
        assert_eq!(schema_of(json!([null, null])).unwrap(), None);
        assert_eq!(representative_element(&arr(json!([null])), "$").unwrap(), None);
    }

    #[test]
    fn mixed_tags_fail() {
        let err = schema_of(json!([1, "x"])).unwrap_err();
        assert_eq!(
            err,
            InferenceError::InconsistentArrayType {
                path: "$.xs".into(),
                conflict: ArrayConflict::Tag { reference: "1".into(), found: Tag::String },
            }
        );
        assert_eq!(err.to_string(), "field `$.xs` is not a homogeneous array (1 x string)");

        let err = schema_of(json!([{"a": 1}, null, [1]])).unwrap_err();
        assert_eq!(err.kind(), "inconsistent_array_type");
    }

    #[test]
    fn mixed_number_widths_fail() {
        let err = schema_of(json!([5, 5000000000i64])).unwrap_err();
        assert_eq!(
            err,
            InferenceError::InconsistentArrayType {
                path: "$.xs".into(),
                conflict: ArrayConflict::Number {
                    reference: "5".into(),
                    found: "5000000000".into(),
                    reference_kind: PrimitiveKind::Int32,
                    found_kind: PrimitiveKind::Int64,
                },
            }
        );
        assert!(schema_of(json!([1, 2.5])).is_err());
        assert!(schema_of(json!([1.5, 2.5, null])).is_ok());
    }

    #[test]
    fn nested_arrays_are_unrecognized() {
        let err = schema_of(json!([[1], [2]])).unwrap_err();
        assert_eq!(
            err,
            InferenceError::UnrecognizedArrayMember { path: "$.xs".into(), member: Tag::Array }
        );
    }

    #[test]
    fn object_union_appends_new_fields_in_order() {
        let s = schema_of(json!([{"a": 1}, {"b": "x"}])).unwrap().unwrap();
        assert_eq!(s.to_string(), "array<struct{a: int32, b: string}>");
    }

    #[test]
    fn object_union_first_definition_wins() {
        let s = schema_of(json!([
            {"id": 1, "name": "x"},
            null,
            {"id": "one", "extra": true},
            {"extra": 7, "name": 3.5}
        ])).unwrap().unwrap();
        assert_eq!(s.to_string(), "array<struct{id: int32, name: string, extra: boolean}>");
    }

    #[test]
    fn object_union_drops_uninferable_fields_until_seen_again() {
        let s = schema_of(json!([{"a": null, "b": []}, {"a": "x"}])).unwrap().unwrap();
        assert_eq!(s.to_string(), "array<struct{a: string}>");
    }

    #[test]
    fn failing_duplicate_still_aborts() {
        let err = schema_of(json!([{"v": [1]}, {"v": [1, true]}])).unwrap_err();
        assert_eq!(err.path(), "$.xs[].v");
    }

    #[test]
    fn union_skips_non_objects() {
        let xs = arr(json!([1, {"a": true}, "x"]));
        let s = union_struct(&xs, "$").unwrap();
        assert_eq!(s.to_string(), "struct{a: boolean}");
    }
}
