//! Typed contract-call values.
//!
//! `Value` is a closed sum type over the payloads a transition parameter can
//! carry: fixed addresses, bounded unsigned integers, byte strings, opaque
//! scalars, and the list/pair/variant composites. Payloads are immutable
//! after construction; every encoding is a pure function of the payload.
//!
//! Named variants are not self-naming. Their constructor is the qualified
//! `(contract address, variant name)` pair, threaded into `type_tag` and
//! `to_wire` as an explicit [`Qualifier`] parameter. The parameter propagates
//! recursively through lists, pairs, and nested variants, so a variant stays
//! correctly qualified wherever its enclosing value is re-used. Typing or
//! wire-encoding a tree that contains a variant without a qualifier fails
//! with `UnboundType`.
//!
//! Hash fragments depend only on the payload bytes, never on display strings
//! or qualifiers: the receiving contract re-derives the same fragments from
//! its own inputs to verify a signature.

use crate::address::Address;
use crate::errors::{TesseraError, TesseraResult};
use crate::hash::HashFragment;
use crate::types;
use crate::wire::{AdtWire, WireValue};

/// Declared width of a bounded unsigned integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UintWidth {
    U32,
    U128,
}

impl UintWidth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U32 => types::UINT32,
            Self::U128 => types::UINT128,
        }
    }

    /// Largest value representable in this width.
    pub fn max(&self) -> u128 {
        match self {
            Self::U32 => u32::MAX as u128,
            Self::U128 => u128::MAX,
        }
    }
}

/// Declared width of a byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteWidth {
    B33,
    B64,
    Variable,
}

impl ByteWidth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::B33 => types::BYSTR33,
            Self::B64 => types::BYSTR64,
            Self::Variable => types::BYSTR,
        }
    }

    /// Required payload length, if fixed.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            Self::B33 => Some(33),
            Self::B64 => Some(64),
            Self::Variable => None,
        }
    }
}

/// The `(contract address, variant name)` pair that names a variant
/// constructor. Threaded as a parameter; never stored on a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    contract: Address,
    variant: String,
}

impl Qualifier {
    pub fn new(contract: Address, variant: impl Into<String>) -> Self {
        Self {
            contract,
            variant: variant.into(),
        }
    }

    pub fn contract(&self) -> &Address {
        &self.contract
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Qualified constructor tag: lower-cased contract address and variant
    /// name, period-joined.
    pub fn tag(&self) -> String {
        format!("{}.{}", self.contract.to_hex(), self.variant)
    }
}

/// An immutable scalar or composite contract-call payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 20-byte fixed address (`ByStr20`).
    Address(Address),
    /// Byte string of a declared width (`ByStr33`, `ByStr64`, `ByStr`).
    ByteString { width: ByteWidth, bytes: Vec<u8> },
    /// Bounded unsigned integer (`Uint32`, `Uint128`). The bound is enforced
    /// at construction, so encoding never overflows.
    Uint { width: UintWidth, value: u128 },
    /// Opaque free-text scalar (`String`).
    Str(String),
    /// Block-number-like decimal scalar (`BNum`).
    BNum(String),
    /// Ordered, same-typed elements. `elem` carries the declared element tag
    /// when the list was built empty and the tag cannot be derived.
    List {
        elem: Option<String>,
        items: Vec<Value>,
    },
    /// Exactly two independently-typed values.
    Pair(Box<Value>, Box<Value>),
    /// Ordered arguments under a qualifier-named constructor.
    Variant(Vec<Value>),
}

impl Value {
    pub fn address(addr: Address) -> Self {
        Value::Address(addr)
    }

    /// Byte string from raw bytes, checking the declared width.
    pub fn byte_string(width: ByteWidth, bytes: Vec<u8>) -> TesseraResult<Self> {
        if let Some(expected) = width.fixed_len() {
            if bytes.len() != expected {
                return Err(TesseraError::invalid_argument(format!(
                    "{} payload must be {expected} bytes, got {}",
                    width.as_str(),
                    bytes.len()
                )));
            }
        }
        Ok(Value::ByteString { width, bytes })
    }

    /// Byte string from hex text (0x prefix optional, any casing).
    pub fn byte_string_from_hex(width: ByteWidth, text: &str) -> TesseraResult<Self> {
        let hexpart = text.trim().strip_prefix("0x").unwrap_or(text.trim());
        let bytes = hex::decode(hexpart.to_ascii_lowercase())
            .map_err(|e| TesseraError::invalid_argument(format!("invalid hex payload: {e}")))?;
        Self::byte_string(width, bytes)
    }

    pub fn uint32(value: u32) -> Self {
        Value::Uint {
            width: UintWidth::U32,
            value: value as u128,
        }
    }

    pub fn uint128(value: u128) -> Self {
        Value::Uint {
            width: UintWidth::U128,
            value,
        }
    }

    /// Bounded integer from an explicit width and value.
    pub fn uint(width: UintWidth, value: u128) -> TesseraResult<Self> {
        if value > width.max() {
            return Err(TesseraError::width_overflow(format!(
                "value {value} exceeds {}",
                width.as_str()
            )));
        }
        Ok(Value::Uint { width, value })
    }

    /// Bounded integer from decimal text.
    pub fn uint_from_decimal(width: UintWidth, text: &str) -> TesseraResult<Self> {
        let value: u128 = text.trim().parse().map_err(|e| {
            TesseraError::invalid_argument(format!("invalid decimal integer {text:?}: {e}"))
        })?;
        Self::uint(width, value)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Block-number scalar. The payload must be plain decimal digits.
    pub fn bnum(s: impl Into<String>) -> TesseraResult<Self> {
        let s = s.into();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(TesseraError::invalid_argument(format!(
                "BNum must be a decimal string, got {s:?}"
            )));
        }
        Ok(Value::BNum(s))
    }

    /// List whose element type is derived from the first element.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List { elem: None, items }
    }

    /// List with an explicitly declared element tag. Required for empty
    /// lists, where the tag cannot be derived.
    pub fn typed_list(elem: impl Into<String>, items: Vec<Value>) -> Self {
        Value::List {
            elem: Some(elem.into()),
            items,
        }
    }

    pub fn pair(first: Value, second: Value) -> Self {
        Value::Pair(Box::new(first), Box::new(second))
    }

    pub fn variant(args: Vec<Value>) -> Self {
        Value::Variant(args)
    }

    /// The wire type tag of this value.
    ///
    /// The qualifier threads recursively into composites; a variant anywhere
    /// in the tree without one fails with `UnboundType`.
    pub fn type_tag(&self, qual: Option<&Qualifier>) -> TesseraResult<String> {
        match self {
            Value::Address(_) => Ok(types::BYSTR20.to_string()),
            Value::ByteString { width, .. } => Ok(width.as_str().to_string()),
            Value::Uint { width, .. } => Ok(width.as_str().to_string()),
            Value::Str(_) => Ok(types::STRING.to_string()),
            Value::BNum(_) => Ok(types::BNUM.to_string()),
            Value::List { elem, items } => {
                let elem_tag = match (elem, items.first()) {
                    (Some(t), _) => t.clone(),
                    (None, Some(first)) => first.type_tag(qual)?,
                    (None, None) => {
                        return Err(TesseraError::invalid_argument(
                            "cannot derive element type of an empty untyped list",
                        ))
                    }
                };
                for item in items {
                    let t = item.type_tag(qual)?;
                    if t != elem_tag {
                        return Err(TesseraError::invalid_argument(format!(
                            "list elements must share one type: expected {elem_tag}, got {t}"
                        )));
                    }
                }
                Ok(format!("List ({elem_tag})"))
            }
            Value::Pair(first, second) => Ok(format!(
                "{} ({}) ({})",
                types::PAIR,
                first.type_tag(qual)?,
                second.type_tag(qual)?
            )),
            Value::Variant(_) => match qual {
                Some(q) => Ok(q.tag()),
                None => Err(TesseraError::unbound_type(
                    "named variant has no contract-address/variant-name qualifier",
                )),
            },
        }
    }

    /// Canonical wire form.
    ///
    /// Lower-case hex for addresses and byte strings, decimal text for
    /// integers, the raw string for scalars, a plain array for lists, and a
    /// tagged object for pairs and variants. Child failures abort the whole
    /// encode; no partial output is produced.
    pub fn to_wire(&self, qual: Option<&Qualifier>) -> TesseraResult<WireValue> {
        match self {
            Value::Address(addr) => Ok(WireValue::Prim(addr.to_hex())),
            Value::ByteString { bytes, .. } => {
                Ok(WireValue::Prim(format!("0x{}", hex::encode(bytes))))
            }
            Value::Uint { value, .. } => Ok(WireValue::Prim(value.to_string())),
            Value::Str(s) => Ok(WireValue::Prim(s.clone())),
            Value::BNum(s) => Ok(WireValue::Prim(s.clone())),
            Value::List { items, .. } => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.to_wire(qual)?);
                }
                Ok(WireValue::List(out))
            }
            Value::Pair(first, second) => Ok(WireValue::Adt(AdtWire {
                constructor: types::PAIR.to_string(),
                argtypes: vec![first.type_tag(qual)?, second.type_tag(qual)?],
                arguments: vec![first.to_wire(qual)?, second.to_wire(qual)?],
            })),
            Value::Variant(args) => {
                let q = qual.ok_or_else(|| {
                    TesseraError::unbound_type(
                        "named variant has no contract-address/variant-name qualifier",
                    )
                })?;
                let mut argtypes = Vec::with_capacity(args.len());
                let mut arguments = Vec::with_capacity(args.len());
                for arg in args {
                    argtypes.push(arg.type_tag(qual)?);
                    arguments.push(arg.to_wire(qual)?);
                }
                Ok(WireValue::Adt(AdtWire {
                    constructor: q.tag(),
                    argtypes,
                    arguments,
                }))
            }
        }
    }

    /// Canonical hash fragment.
    ///
    /// Leaves digest a fixed-width byte encoding of the payload; composites
    /// concatenate their children's fragments in order without re-hashing.
    pub fn hash_fragment(&self) -> HashFragment {
        match self {
            Value::Address(addr) => HashFragment::of_bytes(addr.as_bytes()),
            Value::ByteString { bytes, .. } => HashFragment::of_bytes(bytes),
            Value::Uint { width, value } => match width {
                UintWidth::U32 => HashFragment::of_bytes(&(*value as u32).to_be_bytes()),
                UintWidth::U128 => HashFragment::of_bytes(&value.to_be_bytes()),
            },
            Value::Str(s) => HashFragment::of_bytes(s.as_bytes()),
            Value::BNum(s) => HashFragment::of_bytes(s.as_bytes()),
            Value::List { items, .. } => {
                HashFragment::concat(items.iter().map(|v| v.hash_fragment()))
            }
            Value::Pair(first, second) => {
                HashFragment::concat([first.hash_fragment(), second.hash_fragment()])
            }
            Value::Variant(args) => HashFragment::concat(args.iter().map(|v| v.hash_fragment())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{digest_bytes, DIGEST_LEN};
    use assert_matches::assert_matches;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn uint_bounds_enforced_at_construction() {
        assert!(Value::uint(UintWidth::U32, u32::MAX as u128).is_ok());
        assert_matches!(
            Value::uint(UintWidth::U32, u32::MAX as u128 + 1),
            Err(TesseraError::WidthOverflow(_))
        );
        assert!(Value::uint(UintWidth::U128, u128::MAX).is_ok());
    }

    #[test]
    fn uint_decimal_roundtrip() {
        let v = Value::uint_from_decimal(UintWidth::U128, "340282366920938463463374607431768211455")
            .unwrap();
        assert_eq!(
            v.to_wire(None).unwrap(),
            WireValue::Prim("340282366920938463463374607431768211455".to_string())
        );
    }

    #[test]
    fn uint_decimal_rejects_garbage() {
        assert_matches!(
            Value::uint_from_decimal(UintWidth::U32, "-1"),
            Err(TesseraError::InvalidArgument(_))
        );
        assert_matches!(
            Value::uint_from_decimal(UintWidth::U32, "ten"),
            Err(TesseraError::InvalidArgument(_))
        );
    }

    #[test]
    fn uint_fragment_uses_fixed_width_big_endian() {
        let v32 = Value::uint32(10);
        assert_eq!(
            v32.hash_fragment().as_bytes(),
            digest_bytes(&10u32.to_be_bytes())
        );

        let v128 = Value::uint128(10);
        assert_eq!(
            v128.hash_fragment().as_bytes(),
            digest_bytes(&10u128.to_be_bytes())
        );

        // Same numeric value, different canonical widths, different digests.
        assert_ne!(v32.hash_fragment(), v128.hash_fragment());
    }

    #[test]
    fn scalar_fragment_hashes_utf8_directly() {
        let s = Value::string("42");
        assert_eq!(s.hash_fragment().as_bytes(), digest_bytes(b"42"));

        let b = Value::bnum("42").unwrap();
        assert_eq!(b.hash_fragment(), s.hash_fragment());
    }

    #[test]
    fn bnum_must_be_decimal() {
        assert!(Value::bnum("123").is_ok());
        assert_matches!(Value::bnum("12a"), Err(TesseraError::InvalidArgument(_)));
        assert_matches!(Value::bnum(""), Err(TesseraError::InvalidArgument(_)));
    }

    #[test]
    fn byte_string_widths_enforced() {
        assert!(Value::byte_string(ByteWidth::B33, vec![1u8; 33]).is_ok());
        assert_matches!(
            Value::byte_string(ByteWidth::B33, vec![1u8; 32]),
            Err(TesseraError::InvalidArgument(_))
        );
        assert!(Value::byte_string(ByteWidth::Variable, vec![1u8; 7]).is_ok());
    }

    #[test]
    fn byte_string_wire_is_lowercase_prefixed() {
        let v = Value::byte_string_from_hex(ByteWidth::Variable, "0xAABB").unwrap();
        assert_eq!(v.to_wire(None).unwrap(), WireValue::Prim("0xaabb".to_string()));
    }

    #[test]
    fn list_wire_preserves_length_and_order() {
        let v = Value::list(vec![Value::uint32(3), Value::uint32(1), Value::uint32(2)]);
        let wire = v.to_wire(None).unwrap();
        assert_eq!(
            wire,
            WireValue::List(vec![
                WireValue::Prim("3".to_string()),
                WireValue::Prim("1".to_string()),
                WireValue::Prim("2".to_string()),
            ])
        );
        assert_eq!(v.type_tag(None).unwrap(), "List (Uint32)");
    }

    #[test]
    fn heterogeneous_list_rejected_at_typing() {
        let v = Value::list(vec![Value::uint32(1), Value::string("x")]);
        assert_matches!(v.type_tag(None), Err(TesseraError::InvalidArgument(_)));
    }

    #[test]
    fn empty_list_needs_declared_element_tag() {
        let untyped = Value::list(vec![]);
        assert_matches!(untyped.type_tag(None), Err(TesseraError::InvalidArgument(_)));

        let typed = Value::typed_list("Uint128", vec![]);
        assert_eq!(typed.type_tag(None).unwrap(), "List (Uint128)");
        assert_eq!(typed.to_wire(None).unwrap(), WireValue::List(vec![]));
    }

    #[test]
    fn pair_fragment_is_concatenation_of_children() {
        let p = Value::pair(Value::address(addr(0x11)), Value::uint128(10));
        let frag = p.hash_fragment();
        assert_eq!(frag.len(), 2 * DIGEST_LEN);

        let f1 = Value::address(addr(0x11)).hash_fragment();
        let f2 = Value::uint128(10).hash_fragment();
        assert_eq!(frag, HashFragment::concat([f1, f2]));
        // Hex lengths add up under a single shared prefix.
        assert_eq!(frag.to_hex().len(), 2 + 2 * DIGEST_LEN * 2);
    }

    #[test]
    fn pair_wire_matches_tagged_tuple_shape() {
        let p = Value::pair(Value::address(Address::ZERO), Value::uint128(10));
        let wire = p.to_wire(None).unwrap();
        assert_eq!(
            wire,
            WireValue::Adt(AdtWire {
                constructor: "Pair".to_string(),
                argtypes: vec!["ByStr20".to_string(), "Uint128".to_string()],
                arguments: vec![
                    WireValue::Prim(format!("0x{}", "0".repeat(40))),
                    WireValue::Prim("10".to_string()),
                ],
            })
        );
    }

    #[test]
    fn variant_requires_qualifier() {
        let v = Value::variant(vec![Value::uint32(1)]);
        assert_matches!(v.to_wire(None), Err(TesseraError::UnboundType(_)));
        assert_matches!(v.type_tag(None), Err(TesseraError::UnboundType(_)));
    }

    #[test]
    fn qualifier_tag_joins_lowercase_address_and_name() {
        let q = Qualifier::new(addr(0xAB), "Transfer");
        assert_eq!(q.tag(), format!("0x{}.Transfer", "ab".repeat(20)));
    }

    #[test]
    fn qualifier_threads_into_nested_variants() {
        let inner = Value::variant(vec![Value::uint32(7)]);
        let outer = Value::pair(Value::list(vec![inner]), Value::string("memo"));

        assert_matches!(outer.to_wire(None), Err(TesseraError::UnboundType(_)));

        let q = Qualifier::new(addr(0x22), "Wrapped");
        let wire = outer.to_wire(Some(&q)).unwrap();
        let WireValue::Adt(pair) = wire else {
            panic!("expected tagged pair");
        };
        assert_eq!(pair.constructor, "Pair");
        assert_eq!(pair.argtypes[0], format!("List ({})", q.tag()));
        let WireValue::List(items) = &pair.arguments[0] else {
            panic!("expected list argument");
        };
        let WireValue::Adt(nested) = &items[0] else {
            panic!("expected nested variant");
        };
        assert_eq!(nested.constructor, q.tag());
        assert_eq!(nested.argtypes, vec!["Uint32".to_string()]);
    }

    #[test]
    fn variant_fragment_concatenates_argument_fragments() {
        let v = Value::variant(vec![Value::uint32(1), Value::string("x")]);
        let expected = HashFragment::concat([
            Value::uint32(1).hash_fragment(),
            Value::string("x").hash_fragment(),
        ]);
        assert_eq!(v.hash_fragment(), expected);
    }

    #[test]
    fn encoding_is_deterministic_across_calls() {
        let v = Value::pair(Value::uint128(99), Value::string("s"));
        assert_eq!(v.hash_fragment(), v.hash_fragment());
        assert_eq!(v.to_wire(None).unwrap(), v.to_wire(None).unwrap());
    }
}
