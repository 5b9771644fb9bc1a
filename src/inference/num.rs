use serde_json::Number;
use crate::schema::PrimitiveKind;

/// Numeric width: narrowest of int32 → int64 → float64.
///
/// Integers above `i64::MAX` (only representable as u64) and every
/// non-integral number resolve to float64.
pub fn classify_number(n: &Number) -> PrimitiveKind {
    match n.as_i64() {
        Some(i) if i32::try_from(i).is_ok() => PrimitiveKind::Int32,
        Some(_) => PrimitiveKind::Int64,
        None => PrimitiveKind::Float64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kind(v: serde_json::Value) -> PrimitiveKind {
        match v {
            serde_json::Value::Number(n) => classify_number(&n),
            other => panic!("not a number: {other}"),
        }
    }

    #[test]
    fn int32_bounds() {
        assert_eq!(kind(json!(5)), PrimitiveKind::Int32);
        assert_eq!(kind(json!(0)), PrimitiveKind::Int32);
        assert_eq!(kind(json!(i32::MAX)), PrimitiveKind::Int32);
        assert_eq!(kind(json!(i32::MIN)), PrimitiveKind::Int32);
        assert_eq!(kind(json!(i32::MAX as i64 + 1)), PrimitiveKind::Int64);
        assert_eq!(kind(json!(i32::MIN as i64 - 1)), PrimitiveKind::Int64);
    }

    #[test]
    fn int64_bounds() {
        assert_eq!(kind(json!(5000000000i64)), PrimitiveKind::Int64);
        assert_eq!(kind(json!(i64::MAX)), PrimitiveKind::Int64);
        assert_eq!(kind(json!(i64::MIN)), PrimitiveKind::Int64);
        assert_eq!(kind(json!(i64::MAX as u64 + 1)), PrimitiveKind::Float64);
    }

    #[test]
    fn reals_are_float64() {
        assert_eq!(kind(json!(5.5)), PrimitiveKind::Float64);
        assert_eq!(kind(json!(-0.25)), PrimitiveKind::Float64);
        // parsed from text with a fraction part, even if integral in value
        let n: serde_json::Value = serde_json::from_str("5.0").unwrap();
        assert_eq!(kind(n), PrimitiveKind::Float64);
        let big: serde_json::Value = serde_json::from_str("1e300").unwrap();
        assert_eq!(kind(big), PrimitiveKind::Float64);
    }
}
