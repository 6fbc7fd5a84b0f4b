//! Wire representations consumed by a contract-invocation client.
//!
//! Call arguments travel as an ordered array of `{vname, type, value}`
//! triples. A value is either a plain string (decimal, hex, or raw text), a
//! tagged `{constructor, argtypes, arguments}` object for pairs and named
//! variants, or a plain array for lists.
//!
//! Default serde formatting of these structs is the wire format; no
//! post-processing is applied. Field order is fixed by declaration order.

use serde::{Deserialize, Serialize};

use crate::errors::TesseraResult;
use crate::value::{Qualifier, Value};

/// A single wire-encoded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    /// Decimal, hex, or raw string form of a leaf.
    Prim(String),
    /// Tagged constructor application (pairs and named variants).
    Adt(AdtWire),
    /// Ordered list of wire values.
    List(Vec<WireValue>),
}

/// The tagged-object wire form of a constructor application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdtWire {
    pub constructor: String,
    pub argtypes: Vec<String>,
    pub arguments: Vec<WireValue>,
}

/// One call argument: name, wire type tag, and wire value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireParam {
    pub vname: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: WireValue,
}

impl WireParam {
    pub fn new(vname: impl Into<String>, ty: impl Into<String>, value: WireValue) -> Self {
        Self {
            vname: vname.into(),
            ty: ty.into(),
            value,
        }
    }

    /// Build a parameter from a typed value, deriving both the type tag and
    /// the wire form. Fails if either derivation fails; no partial output.
    pub fn from_value(
        vname: impl Into<String>,
        value: &Value,
        qual: Option<&Qualifier>,
    ) -> TesseraResult<Self> {
        Ok(Self {
            vname: vname.into(),
            ty: value.type_tag(qual)?,
            value: value.to_wire(qual)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use serde_json::json;

    #[test]
    fn prim_serializes_as_bare_string() {
        let w = WireValue::Prim("10".to_string());
        assert_eq!(serde_json::to_value(&w).unwrap(), json!("10"));
    }

    #[test]
    fn adt_serializes_as_tagged_object() {
        let w = WireValue::Adt(AdtWire {
            constructor: "Pair".to_string(),
            argtypes: vec!["ByStr20".to_string(), "Uint128".to_string()],
            arguments: vec![
                WireValue::Prim(format!("0x{}", "0".repeat(40))),
                WireValue::Prim("10".to_string()),
            ],
        });
        assert_eq!(
            serde_json::to_value(&w).unwrap(),
            json!({
                "constructor": "Pair",
                "argtypes": ["ByStr20", "Uint128"],
                "arguments": [format!("0x{}", "0".repeat(40)), "10"],
            })
        );
    }

    #[test]
    fn list_serializes_as_plain_array() {
        let w = WireValue::List(vec![
            WireValue::Prim("1".to_string()),
            WireValue::Prim("2".to_string()),
        ]);
        assert_eq!(serde_json::to_value(&w).unwrap(), json!(["1", "2"]));
    }

    #[test]
    fn wire_value_roundtrips_through_json() {
        let w = WireValue::Adt(AdtWire {
            constructor: "Pair".to_string(),
            argtypes: vec!["String".to_string(), "Uint32".to_string()],
            arguments: vec![
                WireValue::List(vec![WireValue::Prim("x".to_string())]),
                WireValue::Prim("7".to_string()),
            ],
        });
        let text = serde_json::to_string(&w).unwrap();
        let back: WireValue = serde_json::from_str(&text).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn param_uses_renamed_type_field() {
        let p = WireParam::new("amount", "Uint128", WireValue::Prim("10".to_string()));
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"vname": "amount", "type": "Uint128", "value": "10"})
        );
    }

    #[test]
    fn param_from_value_derives_type_and_wire() {
        let v = Value::address(Address::ZERO);
        let p = WireParam::from_value("to", &v, None).unwrap();
        assert_eq!(p.vname, "to");
        assert_eq!(p.ty, "ByStr20");
        assert_eq!(p.value, WireValue::Prim(format!("0x{}", "0".repeat(40))));
    }

    #[test]
    fn param_from_value_fails_atomically_for_unbound_variant() {
        let v = Value::variant(vec![]);
        assert!(WireParam::from_value("action", &v, None).is_err());
    }
}
