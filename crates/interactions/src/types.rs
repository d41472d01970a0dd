// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Contract argument types and values
//!
//! [`TypeExpr`] is the parsed form of an ABI type string such as
//! `List<Option<BigUint>>` or `variadic<multi<TokenIdentifier,u64>>`.
//! [`TypedValue`] is a value of one of those types, ready to be encoded
//! into call data or produced by decoding query results.

use std::fmt;

use alloy_primitives::{I256, U256};

use crate::{
    address::Address,
    error::{InteractionError, InteractionResult},
};

/// Parsed ABI type
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TypeExpr {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    BigUint,
    BigInt,
    Bool,
    Address,
    TokenIdentifier,
    EgldOrEsdtTokenIdentifier,
    Bytes,
    Option(Box<TypeExpr>),
    List(Box<TypeExpr>),
    /// Fixed-size array, no length prefix when nested
    Array(usize, Box<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    /// Any number of trailing arguments
    Variadic(Box<TypeExpr>),
    /// Trailing argument that may be omitted
    Optional(Box<TypeExpr>),
    /// Several arguments treated as one logical value
    Multi(Vec<TypeExpr>),
    /// Struct or enum defined in the ABI `types` section
    Named(String),
}

impl TypeExpr {
    /// Parse an ABI type string
    pub fn parse(input: &str) -> InteractionResult<Self> {
        let mut parser = Parser {
            input: input.as_bytes(),
            pos: 0,
            source: input,
        };
        let expr = parser.expr()?;
        parser.skip_ws();
        if parser.pos != parser.input.len() {
            return Err(parser.error("trailing characters"));
        }
        Ok(expr)
    }

    /// Whether the type expands to several top-level arguments
    pub fn is_multi_arg(&self) -> bool {
        matches!(self, Self::Variadic(_) | Self::Optional(_) | Self::Multi(_))
    }

    fn from_generic(
        name: &str,
        mut params: Vec<TypeExpr>,
        parser: &Parser<'_>,
    ) -> InteractionResult<Self> {
        let single = |params: &mut Vec<TypeExpr>| -> InteractionResult<Box<TypeExpr>> {
            if params.len() == 1 {
                Ok(Box::new(params.remove(0)))
            } else {
                Err(parser.error(format!("{name} takes exactly one type parameter")))
            }
        };

        match name {
            "Option" => Ok(Self::Option(single(&mut params)?)),
            "List" | "Vec" | "ManagedVec" => Ok(Self::List(single(&mut params)?)),
            "variadic" | "MultiValueEncoded" | "MultiValueManagedVec" => {
                Ok(Self::Variadic(single(&mut params)?))
            }
            "optional" | "OptionalValue" => Ok(Self::Optional(single(&mut params)?)),
            "tuple" => Ok(Self::Tuple(params)),
            "multi" => Ok(Self::Multi(params)),
            _ => match name.strip_prefix("array").map(str::parse::<usize>) {
                Some(Ok(len)) => Ok(Self::Array(len, single(&mut params)?)),
                _ => Err(parser.error(format!("unknown generic type {name}"))),
            },
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" | "usize" => Self::U32,
            "u64" => Self::U64,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" | "isize" => Self::I32,
            "i64" => Self::I64,
            "BigUint" => Self::BigUint,
            "BigInt" => Self::BigInt,
            "bool" => Self::Bool,
            "Address" | "ManagedAddress" => Self::Address,
            "TokenIdentifier" => Self::TokenIdentifier,
            "EgldOrEsdtTokenIdentifier" => Self::EgldOrEsdtTokenIdentifier,
            "bytes" | "ManagedBuffer" | "BoxedBytes" => Self::Bytes,
            "H256" => Self::Array(32, Box::new(Self::U8)),
            other => Self::Named(other.to_string()),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, types: &[TypeExpr]) -> fmt::Result {
            for (i, ty) in types.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{ty}")?;
            }
            Ok(())
        }

        match self {
            Self::U8 => f.write_str("u8"),
            Self::U16 => f.write_str("u16"),
            Self::U32 => f.write_str("u32"),
            Self::U64 => f.write_str("u64"),
            Self::I8 => f.write_str("i8"),
            Self::I16 => f.write_str("i16"),
            Self::I32 => f.write_str("i32"),
            Self::I64 => f.write_str("i64"),
            Self::BigUint => f.write_str("BigUint"),
            Self::BigInt => f.write_str("BigInt"),
            Self::Bool => f.write_str("bool"),
            Self::Address => f.write_str("Address"),
            Self::TokenIdentifier => f.write_str("TokenIdentifier"),
            Self::EgldOrEsdtTokenIdentifier => f.write_str("EgldOrEsdtTokenIdentifier"),
            Self::Bytes => f.write_str("bytes"),
            Self::Option(inner) => write!(f, "Option<{inner}>"),
            Self::List(inner) => write!(f, "List<{inner}>"),
            Self::Array(len, inner) => write!(f, "array{len}<{inner}>"),
            Self::Tuple(types) => {
                f.write_str("tuple<")?;
                join(f, types)?;
                f.write_str(">")
            }
            Self::Variadic(inner) => write!(f, "variadic<{inner}>"),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
            Self::Multi(types) => {
                f.write_str("multi<")?;
                join(f, types)?;
                f.write_str(">")
            }
            Self::Named(name) => f.write_str(name),
        }
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn error(&self, message: impl fmt::Display) -> InteractionError {
        InteractionError::abi(format!(
            "cannot parse type `{}` at {}: {message}",
            self.source, self.pos
        ))
    }

    fn skip_ws(&mut self) {
        while self.input.get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }
    }

    fn ident(&mut self) -> InteractionResult<&str> {
        self.skip_ws();
        let start = self.pos;
        while self
            .input
            .get(self.pos)
            .is_some_and(|c| c.is_ascii_alphanumeric() || *c == b'_')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected type name"));
        }
        Ok(&self.source[start..self.pos])
    }

    fn eat(&mut self, expected: u8) -> bool {
        self.skip_ws();
        if self.input.get(self.pos) == Some(&expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> InteractionResult<TypeExpr> {
        let name = self.ident()?.to_string();
        if !self.eat(b'<') {
            return Ok(TypeExpr::from_name(&name));
        }

        let mut params = vec![self.expr()?];
        while self.eat(b',') {
            params.push(self.expr()?);
        }
        if !self.eat(b'>') {
            return Err(self.error("expected `>`"));
        }
        TypeExpr::from_generic(&name, params, self)
    }
}

/// Value passed to or returned from a contract endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TypedValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    BigUint(U256),
    /// Signed value of up to 256 bits
    BigInt(I256),
    Bool(bool),
    Address(Address),
    TokenIdentifier(String),
    /// `EGLD` or an ESDT token identifier
    EgldOrEsdt(String),
    Bytes(Vec<u8>),
    /// Content of an `arrayN<u8>`, encoded without a length prefix
    FixedBytes(Vec<u8>),
    Option(Option<Box<TypedValue>>),
    List(Vec<TypedValue>),
    Tuple(Vec<TypedValue>),
    Struct {
        name: String,
        fields: Vec<(String, TypedValue)>,
    },
    Enum {
        name: String,
        variant: String,
        discriminant: u8,
        fields: Vec<(String, TypedValue)>,
    },
    Variadic(Vec<TypedValue>),
    OptionalArg(Option<Box<TypedValue>>),
    Multi(Vec<TypedValue>),
}

impl TypedValue {
    /// Token identifier value
    pub fn token(identifier: impl Into<String>) -> Self {
        Self::TokenIdentifier(identifier.into())
    }

    /// `EGLD` or ESDT identifier value
    pub fn egld_or_esdt(identifier: impl Into<String>) -> Self {
        Self::EgldOrEsdt(identifier.into())
    }

    /// Arbitrary byte buffer
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(value.into())
    }

    /// Optional trailing argument
    pub fn optional(value: Option<Self>) -> Self {
        Self::OptionalArg(value.map(Box::new))
    }

    /// Struct value with its fields in declaration order
    pub fn structure<N: Into<String>>(name: impl Into<String>, fields: Vec<(N, Self)>) -> Self {
        Self::Struct {
            name: name.into(),
            fields: fields.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::BigUint(_) => "BigUint",
            Self::BigInt(_) => "BigInt",
            Self::Bool(_) => "bool",
            Self::Address(_) => "Address",
            Self::TokenIdentifier(_) => "TokenIdentifier",
            Self::EgldOrEsdt(_) => "EgldOrEsdtTokenIdentifier",
            Self::Bytes(_) => "bytes",
            Self::FixedBytes(_) => "array",
            Self::Option(_) => "Option",
            Self::List(_) => "List",
            Self::Tuple(_) => "tuple",
            Self::Struct { .. } => "struct",
            Self::Enum { .. } => "enum",
            Self::Variadic(_) => "variadic",
            Self::OptionalArg(_) => "optional",
            Self::Multi(_) => "multi",
        }
    }

    fn mismatch(&self, expected: &str) -> InteractionError {
        InteractionError::codec(format!("expected {expected}, found {}", self.kind()))
    }

    /// Unsigned integer value, including `BigUint` values that fit
    pub fn as_u64(&self) -> InteractionResult<u64> {
        match self {
            Self::U8(v) => Ok(u64::from(*v)),
            Self::U16(v) => Ok(u64::from(*v)),
            Self::U32(v) => Ok(u64::from(*v)),
            Self::U64(v) => Ok(*v),
            Self::BigUint(v) => u64::try_from(*v)
                .map_err(|_| InteractionError::codec(format!("{v} does not fit in u64"))),
            other => Err(other.mismatch("unsigned integer")),
        }
    }

    /// Arbitrary-precision unsigned value, widening fixed-size integers
    pub fn as_biguint(&self) -> InteractionResult<U256> {
        match self {
            Self::BigUint(v) => Ok(*v),
            other => other.as_u64().map(U256::from),
        }
    }

    /// Signed integer value of up to 64 bits
    pub fn as_i64(&self) -> InteractionResult<i64> {
        match self {
            Self::I8(v) => Ok(i64::from(*v)),
            Self::I16(v) => Ok(i64::from(*v)),
            Self::I32(v) => Ok(i64::from(*v)),
            Self::I64(v) => Ok(*v),
            Self::BigInt(v) => i64::try_from(*v)
                .map_err(|_| InteractionError::codec(format!("{v} does not fit in i64"))),
            other => Err(other.mismatch("signed integer")),
        }
    }

    /// Arbitrary-precision signed value, widening fixed-size integers
    pub fn as_bigint(&self) -> InteractionResult<I256> {
        match self {
            Self::BigInt(v) => Ok(*v),
            other => {
                let value = other.as_i64()?;
                Ok(I256::from_raw(U256::from_be_bytes(sign_extend(
                    &value.to_be_bytes(),
                ))))
            }
        }
    }

    /// Boolean value
    pub fn as_bool(&self) -> InteractionResult<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            other => Err(other.mismatch("bool")),
        }
    }

    /// Address value
    pub fn as_address(&self) -> InteractionResult<Address> {
        match self {
            Self::Address(v) => Ok(*v),
            other => Err(other.mismatch("Address")),
        }
    }

    /// Token identifier or UTF-8 buffer as text
    pub fn as_str(&self) -> InteractionResult<&str> {
        match self {
            Self::TokenIdentifier(v) | Self::EgldOrEsdt(v) => Ok(v),
            Self::Bytes(v) => std::str::from_utf8(v)
                .map_err(|e| InteractionError::codec(format!("buffer is not UTF-8: {e}"))),
            other => Err(other.mismatch("string")),
        }
    }

    /// Raw byte content
    pub fn as_bytes(&self) -> InteractionResult<&[u8]> {
        match self {
            Self::Bytes(v) | Self::FixedBytes(v) => Ok(v),
            Self::TokenIdentifier(v) | Self::EgldOrEsdt(v) => Ok(v.as_bytes()),
            other => Err(other.mismatch("bytes")),
        }
    }

    /// Inner value of an `Option` or `optional`
    pub fn as_option(&self) -> InteractionResult<Option<&TypedValue>> {
        match self {
            Self::Option(v) | Self::OptionalArg(v) => Ok(v.as_deref()),
            other => Err(other.mismatch("Option")),
        }
    }

    /// Items of any sequence-like value
    pub fn as_list(&self) -> InteractionResult<&[TypedValue]> {
        match self {
            Self::List(v) | Self::Tuple(v) | Self::Variadic(v) | Self::Multi(v) => Ok(v),
            other => Err(other.mismatch("list")),
        }
    }

    /// Named field of a struct or enum variant
    pub fn field(&self, name: &str) -> InteractionResult<&TypedValue> {
        let (type_name, fields) = match self {
            Self::Struct { name, fields } | Self::Enum { name, fields, .. } => (name, fields),
            other => return Err(other.mismatch("struct")),
        };
        fields
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
            .ok_or_else(|| InteractionError::codec(format!("{type_name} has no field {name}")))
    }

    /// Variant name of an enum value
    pub fn variant(&self) -> InteractionResult<&str> {
        match self {
            Self::Enum { variant, .. } => Ok(variant),
            other => Err(other.mismatch("enum")),
        }
    }
}

impl From<u8> for TypedValue {
    fn from(value: u8) -> Self {
        Self::U8(value)
    }
}

impl From<u32> for TypedValue {
    fn from(value: u32) -> Self {
        Self::U32(value)
    }
}

impl From<u64> for TypedValue {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<U256> for TypedValue {
    fn from(value: U256) -> Self {
        Self::BigUint(value)
    }
}

impl From<I256> for TypedValue {
    fn from(value: I256) -> Self {
        Self::BigInt(value)
    }
}

/// Widen big-endian two's complement bytes to 256 bits
pub(crate) fn sign_extend(bytes: &[u8]) -> [u8; 32] {
    let negative = bytes.first().is_some_and(|b| b & 0x80 != 0);
    let mut buf = if negative { [0xff; 32] } else { [0; 32] };
    let start = 32usize.saturating_sub(bytes.len());
    buf[start..].copy_from_slice(&bytes[bytes.len().saturating_sub(32)..]);
    buf
}

impl From<Address> for TypedValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}
