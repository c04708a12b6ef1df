//! Key Codec Module
//!
//! Scalar keys and values, their JSON form, and the URL-path form used to
//! address single entries under `/cache/{key}`.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};

use crate::error::{CacheError, Result};

/// Fractional digits used when a float is rendered as a path key.
pub const FLOAT_PATH_PRECISION: usize = 6;

// == Scalar ==
/// A JSON scalar used for both keys and values.
///
/// Equality is wire equality: JSON has a single number type, so an
/// `Integer` equals a `Float` holding the same number.
#[derive(Debug, Clone)]
pub enum Scalar {
    String(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
}

/// The kind of a [`Scalar`], used when decoding a typed path key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Bool,
    Integer,
    Float,
}

impl Scalar {
    /// Returns the kind of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Integer(_) => ScalarKind::Integer,
            Scalar::Float(_) => ScalarKind::Float,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::String(a), Scalar::String(b)) => a == b,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Integer(a), Scalar::Integer(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Integer(i), Scalar::Float(f)) | (Scalar::Float(f), Scalar::Integer(i)) => {
                float_as_exact_i64(*f) == Some(*i)
            }
            _ => false,
        }
    }
}

/// The integer `f` represents exactly, if any. Comparing in the integer domain
/// keeps equality transitive past 2^53, where distinct i64s share an f64.
fn float_as_exact_i64(f: f64) -> Option<i64> {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if f.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_path_key(self))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

// == JSON Encoding ==
impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::String(v) => serializer.serialize_str(v),
            Scalar::Bool(v) => serializer.serialize_bool(*v),
            Scalar::Integer(v) => serializer.serialize_i64(*v),
            Scalar::Float(v) => serializer.serialize_f64(*v),
        }
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON string, number or boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Scalar, E> {
        Ok(Scalar::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Scalar, E> {
        Ok(Scalar::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Scalar, E> {
        // Past i64::MAX only the float form survives.
        Ok(i64::try_from(v)
            .map(Scalar::Integer)
            .unwrap_or(Scalar::Float(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Scalar, E> {
        Ok(Scalar::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Scalar, E> {
        Ok(Scalar::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Scalar, E> {
        Ok(Scalar::String(v))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

// == Path Encoding ==
/// Renders a key in its URL-path form.
///
/// Integers as base-10 digits, floats with six fractional digits
/// (`3.14` becomes `3.140000`), booleans as `true`/`false`, strings as-is.
/// No percent-encoding is applied.
pub fn encode_path_key(key: &Scalar) -> String {
    match key {
        Scalar::String(s) => s.clone(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Integer(i) => i.to_string(),
        Scalar::Float(f) => format!("{:.*}", FLOAT_PATH_PRECISION, f),
    }
}

/// Parses a path segment as a key of the expected kind.
///
/// Fails with [`CacheError::Decode`] when `raw` is not a valid rendering of
/// `kind`. Non-finite floats are rejected.
pub fn decode_path_key(raw: &str, kind: ScalarKind) -> Result<Scalar> {
    match kind {
        ScalarKind::String => Ok(Scalar::String(raw.to_string())),
        ScalarKind::Bool => match raw {
            "true" => Ok(Scalar::Bool(true)),
            "false" => Ok(Scalar::Bool(false)),
            _ => Err(CacheError::Decode(format!("'{}' is not a boolean", raw))),
        },
        ScalarKind::Integer => raw
            .parse::<i64>()
            .map(Scalar::Integer)
            .map_err(|e| CacheError::Decode(format!("'{}' is not an integer: {}", raw, e))),
        ScalarKind::Float => raw
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Scalar::Float)
            .ok_or_else(|| CacheError::Decode(format!("'{}' is not a finite number", raw))),
    }
}

/// Infers the kind of an untyped path segment.
///
/// Tries boolean, then integer, then float; anything else is a string.
pub fn infer_path_key(raw: &str) -> Scalar {
    [ScalarKind::Bool, ScalarKind::Integer, ScalarKind::Float]
        .into_iter()
        .find_map(|kind| decode_path_key(raw, kind).ok())
        .unwrap_or_else(|| Scalar::String(raw.to_string()))
}

/// Returns the canonical addressing token for a key.
///
/// The key is rendered in path form and re-inferred, so every spelling of the
/// same number collapses to one token: `100`, `100.0` and `"100.000000"` all
/// map to `"100"`. Floats keep six fractional digits unless they are all zero.
pub fn canonical_key(key: &Scalar) -> String {
    match infer_path_key(&encode_path_key(key)) {
        Scalar::Float(f) => canonical_float(f),
        other => encode_path_key(&other),
    }
}

fn canonical_float(f: f64) -> String {
    let fixed = format!("{:.*}", FLOAT_PATH_PRECISION, f);
    match fixed.strip_suffix(".000000") {
        Some("-0") => "0".to_string(),
        Some(whole) => whole.to_string(),
        None => fixed,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_key() {
        assert_eq!(encode_path_key(&Scalar::Integer(100)), "100");
        assert_eq!(encode_path_key(&Scalar::Integer(-1)), "-1");
        assert_eq!(encode_path_key(&Scalar::Float(3.14)), "3.140000");
        assert_eq!(encode_path_key(&Scalar::Float(100.001)), "100.001000");
        assert_eq!(encode_path_key(&Scalar::Bool(true)), "true");
        assert_eq!(encode_path_key(&Scalar::Bool(false)), "false");
        assert_eq!(encode_path_key(&Scalar::from("bazooty")), "bazooty");
    }

    #[test]
    fn test_decode_path_key_by_kind() {
        assert_eq!(
            decode_path_key("99", ScalarKind::Integer).unwrap(),
            Scalar::Integer(99)
        );
        assert_eq!(
            decode_path_key("3.140000", ScalarKind::Float).unwrap(),
            Scalar::Float(3.14)
        );
        assert_eq!(
            decode_path_key("true", ScalarKind::Bool).unwrap(),
            Scalar::Bool(true)
        );
        assert_eq!(
            decode_path_key("99", ScalarKind::String).unwrap(),
            Scalar::from("99")
        );
    }

    #[test]
    fn test_decode_path_key_errors() {
        assert!(matches!(
            decode_path_key("yes", ScalarKind::Bool),
            Err(CacheError::Decode(_))
        ));
        assert!(matches!(
            decode_path_key("1.5", ScalarKind::Integer),
            Err(CacheError::Decode(_))
        ));
        assert!(matches!(
            decode_path_key("inf", ScalarKind::Float),
            Err(CacheError::Decode(_))
        ));
        assert!(matches!(
            decode_path_key("NaN", ScalarKind::Float),
            Err(CacheError::Decode(_))
        ));
    }

    #[test]
    fn test_infer_path_key() {
        assert_eq!(infer_path_key("false").kind(), ScalarKind::Bool);
        assert_eq!(infer_path_key("-1").kind(), ScalarKind::Integer);
        assert_eq!(infer_path_key("100.001000").kind(), ScalarKind::Float);
        assert_eq!(infer_path_key("haggis").kind(), ScalarKind::String);
        assert_eq!(infer_path_key("nan").kind(), ScalarKind::String);
    }

    #[test]
    fn test_canonical_key_collapses_numeric_spellings() {
        let int = canonical_key(&Scalar::Integer(100));
        assert_eq!(int, "100");
        assert_eq!(canonical_key(&Scalar::Float(100.0)), int);
        assert_eq!(canonical_key(&Scalar::from("100.000000")), int);
        assert_eq!(canonical_key(&infer_path_key("100.000000")), int);
    }

    #[test]
    fn test_canonical_key_float_precision() {
        assert_eq!(canonical_key(&Scalar::Float(100.001)), "100.001000");
        assert_eq!(canonical_key(&Scalar::Float(9999999.999)), "9999999.999000");
        assert_eq!(canonical_key(&Scalar::Float(-0.0005)), "-0.000500");
        assert_eq!(canonical_key(&Scalar::Float(-0.0000001)), "0");
        assert_eq!(
            canonical_key(&Scalar::Float(100.001)),
            canonical_key(&infer_path_key("100.001"))
        );
    }

    #[test]
    fn test_canonical_key_bool_and_string() {
        assert_eq!(canonical_key(&Scalar::Bool(true)), "true");
        assert_eq!(canonical_key(&Scalar::from("alpha")), "alpha");
        // Flat namespace: the string "true" addresses the same entry.
        assert_eq!(canonical_key(&Scalar::from("true")), "true");
    }

    #[test]
    fn test_wire_equality() {
        assert_eq!(Scalar::Integer(100), Scalar::Float(100.0));
        assert_eq!(Scalar::Float(101.0), Scalar::Integer(101));
        assert_ne!(Scalar::Integer(100), Scalar::Float(100.001));
        assert_ne!(Scalar::Integer(1), Scalar::Bool(true));
        assert_ne!(Scalar::from("100"), Scalar::Integer(100));
    }

    #[test]
    fn test_wire_equality_exact_past_f64_precision() {
        // 2^53 + 1 rounds to 2^53 as an f64 but is a different integer.
        let float = Scalar::Float(9_007_199_254_740_992.0);
        assert_eq!(Scalar::Integer(9_007_199_254_740_992), float);
        assert_ne!(Scalar::Integer(9_007_199_254_740_993), float);

        assert_eq!(Scalar::Integer(i64::MIN), Scalar::Float(-9_223_372_036_854_775_808.0));
        assert_ne!(Scalar::Integer(i64::MAX), Scalar::Float(9_223_372_036_854_775_808.0));
        assert_ne!(Scalar::Integer(0), Scalar::Float(f64::NAN));
    }

    #[test]
    fn test_json_decode() {
        let parsed: Vec<Scalar> =
            serde_json::from_str(r#"["beta", true, 100, 100.001, -0.0005]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Scalar::from("beta"),
                Scalar::Bool(true),
                Scalar::Integer(100),
                Scalar::Float(100.001),
                Scalar::Float(-0.0005),
            ]
        );
        assert_eq!(parsed[2].kind(), ScalarKind::Integer);
        assert_eq!(parsed[3].kind(), ScalarKind::Float);
    }

    #[test]
    fn test_json_decode_large_unsigned_becomes_float() {
        let parsed: Scalar = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(parsed.kind(), ScalarKind::Float);
    }

    #[test]
    fn test_json_decode_rejects_non_scalars() {
        assert!(serde_json::from_str::<Scalar>("null").is_err());
        assert!(serde_json::from_str::<Scalar>("[1]").is_err());
        assert!(serde_json::from_str::<Scalar>(r#"{"a":1}"#).is_err());
    }

    #[test]
    fn test_json_integer_float_lose_distinction() {
        // 100.0 goes out as a float and comes back equal to integer 100.
        let json = serde_json::to_string(&Scalar::Float(100.0)).unwrap();
        let back: Scalar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Scalar::Integer(100));
    }
}
