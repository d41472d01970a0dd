// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Binary codec for contract arguments and results
//!
//! Top-level values (one call argument or one returned buffer) use minimal
//! big-endian encoding: zero is the empty buffer and leading zero bytes are
//! dropped. Nested values (inside a struct, list or option) use fixed widths
//! and `u32` length prefixes so they can be concatenated.

use alloy_primitives::{I256, U256};

use crate::{
    abi::{Abi, AbiTypeDef},
    address::Address,
    error::{InteractionError, InteractionResult},
    types::{TypeExpr, TypedValue, sign_extend},
};

/// Encode one top-level argument
pub fn encode_top(value: &TypedValue) -> InteractionResult<Vec<u8>> {
    let encoded = match value {
        TypedValue::U8(v) => trim_unsigned(&v.to_be_bytes()),
        TypedValue::U16(v) => trim_unsigned(&v.to_be_bytes()),
        TypedValue::U32(v) => trim_unsigned(&v.to_be_bytes()),
        TypedValue::U64(v) => trim_unsigned(&v.to_be_bytes()),
        TypedValue::I8(v) => trim_signed(&v.to_be_bytes()),
        TypedValue::I16(v) => trim_signed(&v.to_be_bytes()),
        TypedValue::I32(v) => trim_signed(&v.to_be_bytes()),
        TypedValue::I64(v) => trim_signed(&v.to_be_bytes()),
        TypedValue::BigUint(v) => biguint_bytes(*v),
        TypedValue::BigInt(v) => bigint_bytes(*v),
        TypedValue::Bool(v) => {
            if *v {
                vec![1]
            } else {
                Vec::new()
            }
        }
        TypedValue::Address(v) => v.as_bytes().to_vec(),
        TypedValue::TokenIdentifier(v) | TypedValue::EgldOrEsdt(v) => v.as_bytes().to_vec(),
        TypedValue::Bytes(v) | TypedValue::FixedBytes(v) => v.clone(),
        TypedValue::Option(None) => Vec::new(),
        TypedValue::Option(Some(inner)) => {
            let mut out = vec![1];
            encode_nested_into(inner, &mut out)?;
            out
        }
        TypedValue::List(items) | TypedValue::Tuple(items) => {
            let mut out = Vec::new();
            for item in items {
                encode_nested_into(item, &mut out)?;
            }
            out
        }
        TypedValue::Struct { fields, .. } => {
            let mut out = Vec::new();
            for (_, field) in fields {
                encode_nested_into(field, &mut out)?;
            }
            out
        }
        TypedValue::Enum {
            discriminant: 0,
            fields,
            ..
        } if fields.is_empty() => Vec::new(),
        TypedValue::Enum { .. } => encode_nested(value)?,
        TypedValue::Variadic(_) | TypedValue::OptionalArg(_) | TypedValue::Multi(_) => {
            return Err(InteractionError::codec(
                "multi-argument value cannot be encoded as a single argument",
            ));
        }
    };
    Ok(encoded)
}

/// Encode a value nested inside another value
pub fn encode_nested(value: &TypedValue) -> InteractionResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_nested_into(value, &mut out)?;
    Ok(out)
}

fn encode_nested_into(value: &TypedValue, out: &mut Vec<u8>) -> InteractionResult<()> {
    match value {
        TypedValue::U8(v) => out.push(*v),
        TypedValue::U16(v) => out.extend_from_slice(&v.to_be_bytes()),
        TypedValue::U32(v) => out.extend_from_slice(&v.to_be_bytes()),
        TypedValue::U64(v) => out.extend_from_slice(&v.to_be_bytes()),
        TypedValue::I8(v) => out.extend_from_slice(&v.to_be_bytes()),
        TypedValue::I16(v) => out.extend_from_slice(&v.to_be_bytes()),
        TypedValue::I32(v) => out.extend_from_slice(&v.to_be_bytes()),
        TypedValue::I64(v) => out.extend_from_slice(&v.to_be_bytes()),
        TypedValue::BigUint(v) => push_prefixed(&biguint_bytes(*v), out)?,
        TypedValue::BigInt(v) => push_prefixed(&bigint_bytes(*v), out)?,
        TypedValue::Bool(v) => out.push(u8::from(*v)),
        TypedValue::Address(v) => out.extend_from_slice(v.as_bytes()),
        TypedValue::TokenIdentifier(v) | TypedValue::EgldOrEsdt(v) => {
            push_prefixed(v.as_bytes(), out)?;
        }
        TypedValue::Bytes(v) => push_prefixed(v, out)?,
        TypedValue::FixedBytes(v) => out.extend_from_slice(v),
        TypedValue::Option(None) => out.push(0),
        TypedValue::Option(Some(inner)) => {
            out.push(1);
            encode_nested_into(inner, out)?;
        }
        TypedValue::List(items) => {
            out.extend_from_slice(&length_prefix(items.len())?);
            for item in items {
                encode_nested_into(item, out)?;
            }
        }
        TypedValue::Tuple(items) => {
            for item in items {
                encode_nested_into(item, out)?;
            }
        }
        TypedValue::Struct { fields, .. } => {
            for (_, field) in fields {
                encode_nested_into(field, out)?;
            }
        }
        TypedValue::Enum {
            discriminant,
            fields,
            ..
        } => {
            out.push(*discriminant);
            for (_, field) in fields {
                encode_nested_into(field, out)?;
            }
        }
        TypedValue::Variadic(_) | TypedValue::OptionalArg(_) | TypedValue::Multi(_) => {
            return Err(InteractionError::codec(
                "multi-argument value cannot be nested",
            ));
        }
    }
    Ok(())
}

/// Encode call arguments, expanding variadic, optional and multi values
/// into separate top-level arguments
pub fn encode_args(values: &[TypedValue]) -> InteractionResult<Vec<Vec<u8>>> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        push_arg(value, &mut out)?;
    }
    Ok(out)
}

fn push_arg(value: &TypedValue, out: &mut Vec<Vec<u8>>) -> InteractionResult<()> {
    match value {
        TypedValue::Variadic(items) | TypedValue::Multi(items) => {
            for item in items {
                push_arg(item, out)?;
            }
        }
        TypedValue::OptionalArg(None) => {}
        TypedValue::OptionalArg(Some(inner)) => push_arg(inner, out)?,
        other => out.push(encode_top(other)?),
    }
    Ok(())
}

/// Hex form of an encoded argument as it appears in call data
pub fn hex_arg(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Minimal big-endian bytes of an unsigned value
pub fn biguint_bytes(value: U256) -> Vec<u8> {
    trim_unsigned(&value.to_be_bytes_vec())
}

/// Minimal big-endian two's complement bytes of a signed value
pub fn bigint_bytes(value: I256) -> Vec<u8> {
    trim_signed(&value.into_raw().to_be_bytes::<32>())
}

fn trim_unsigned(bytes: &[u8]) -> Vec<u8> {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

fn trim_signed(bytes: &[u8]) -> Vec<u8> {
    let mut start = 0;
    while start < bytes.len() {
        let redundant = match bytes[start] {
            0x00 => bytes.get(start + 1).is_none_or(|next| next & 0x80 == 0),
            0xff => bytes.get(start + 1).is_some_and(|next| next & 0x80 != 0),
            _ => false,
        };
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

fn length_prefix(len: usize) -> InteractionResult<[u8; 4]> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| InteractionError::codec(format!("length {len} exceeds u32")))
}

fn push_prefixed(bytes: &[u8], out: &mut Vec<u8>) -> InteractionResult<()> {
    out.extend_from_slice(&length_prefix(bytes.len())?);
    out.extend_from_slice(bytes);
    Ok(())
}

/// Decode one top-level buffer as `ty`
pub fn decode_top(bytes: &[u8], ty: &TypeExpr, abi: &Abi) -> InteractionResult<TypedValue> {
    let value = match ty {
        TypeExpr::U8 => TypedValue::U8(u8::try_from(top_unsigned(bytes, 1)?).map_err(width)?),
        TypeExpr::U16 => TypedValue::U16(u16::try_from(top_unsigned(bytes, 2)?).map_err(width)?),
        TypeExpr::U32 => TypedValue::U32(u32::try_from(top_unsigned(bytes, 4)?).map_err(width)?),
        TypeExpr::U64 => TypedValue::U64(top_unsigned(bytes, 8)?),
        TypeExpr::I8 => TypedValue::I8(i8::try_from(top_signed(bytes, 1)?).map_err(width)?),
        TypeExpr::I16 => TypedValue::I16(i16::try_from(top_signed(bytes, 2)?).map_err(width)?),
        TypeExpr::I32 => TypedValue::I32(i32::try_from(top_signed(bytes, 4)?).map_err(width)?),
        TypeExpr::I64 => TypedValue::I64(top_signed(bytes, 8)?),
        TypeExpr::BigInt => TypedValue::BigInt(read_bigint(bytes)?),
        TypeExpr::BigUint => TypedValue::BigUint(read_biguint(bytes)?),
        TypeExpr::Bool => match bytes {
            [] => TypedValue::Bool(false),
            [1] => TypedValue::Bool(true),
            _ => return Err(InteractionError::codec("invalid bool encoding")),
        },
        TypeExpr::Address => TypedValue::Address(Address::from_slice(bytes)?),
        TypeExpr::TokenIdentifier => TypedValue::TokenIdentifier(utf8(bytes)?),
        TypeExpr::EgldOrEsdtTokenIdentifier => TypedValue::EgldOrEsdt(utf8(bytes)?),
        TypeExpr::Bytes => TypedValue::Bytes(bytes.to_vec()),
        TypeExpr::Array(len, inner) if **inner == TypeExpr::U8 => {
            if bytes.len() != *len {
                return Err(InteractionError::codec(format!(
                    "expected {len} bytes, got {}",
                    bytes.len()
                )));
            }
            TypedValue::FixedBytes(bytes.to_vec())
        }
        TypeExpr::Option(inner) => match bytes.split_first() {
            None => TypedValue::Option(None),
            Some((1, rest)) => {
                let mut reader = Reader::new(rest);
                let value = reader.nested(inner, abi)?;
                reader.finish()?;
                TypedValue::Option(Some(Box::new(value)))
            }
            Some(_) => return Err(InteractionError::codec("invalid Option discriminant")),
        },
        TypeExpr::List(inner) => {
            let mut reader = Reader::new(bytes);
            let mut items = Vec::new();
            while !reader.is_empty() {
                items.push(reader.nested(inner, abi)?);
            }
            TypedValue::List(items)
        }
        TypeExpr::Named(name) if bytes.is_empty() => match abi.type_def(name) {
            Some(AbiTypeDef::Enum { variants }) => {
                let variant = variants
                    .iter()
                    .find(|v| v.discriminant == 0)
                    .ok_or_else(|| InteractionError::codec(format!("{name} has no variant 0")))?;
                TypedValue::Enum {
                    name: name.clone(),
                    variant: variant.name.clone(),
                    discriminant: 0,
                    fields: Vec::new(),
                }
            }
            _ => {
                return Err(InteractionError::codec(format!(
                    "empty buffer for {name}"
                )));
            }
        },
        TypeExpr::Variadic(_) | TypeExpr::Optional(_) | TypeExpr::Multi(_) => {
            return Err(InteractionError::codec(
                "multi-result type must be decoded with decode_results",
            ));
        }
        nested => {
            let mut reader = Reader::new(bytes);
            let value = reader.nested(nested, abi)?;
            reader.finish()?;
            value
        }
    };
    Ok(value)
}

/// Decode a nested encoding that fills `bytes` exactly
pub fn decode_nested(bytes: &[u8], ty: &TypeExpr, abi: &Abi) -> InteractionResult<TypedValue> {
    let mut reader = Reader::new(bytes);
    let value = reader.nested(ty, abi)?;
    reader.finish()?;
    Ok(value)
}

/// Decode the buffers returned by a query against the endpoint's output types
pub fn decode_results(
    results: &[Vec<u8>],
    outputs: &[TypeExpr],
    abi: &Abi,
) -> InteractionResult<Vec<TypedValue>> {
    let mut cursor = 0;
    let mut values = Vec::with_capacity(outputs.len());
    for output in outputs {
        values.push(decode_result(results, &mut cursor, output, abi)?);
    }
    Ok(values)
}

fn decode_result(
    results: &[Vec<u8>],
    cursor: &mut usize,
    ty: &TypeExpr,
    abi: &Abi,
) -> InteractionResult<TypedValue> {
    match ty {
        TypeExpr::Variadic(inner) => {
            let mut items = Vec::new();
            while *cursor < results.len() {
                items.push(decode_result(results, cursor, inner, abi)?);
            }
            Ok(TypedValue::Variadic(items))
        }
        TypeExpr::Optional(inner) => {
            if *cursor < results.len() {
                let value = decode_result(results, cursor, inner, abi)?;
                Ok(TypedValue::OptionalArg(Some(Box::new(value))))
            } else {
                Ok(TypedValue::OptionalArg(None))
            }
        }
        TypeExpr::Multi(types) => types
            .iter()
            .map(|t| decode_result(results, cursor, t, abi))
            .collect::<InteractionResult<Vec<_>>>()
            .map(TypedValue::Multi),
        single => {
            let bytes = results.get(*cursor).ok_or_else(|| {
                InteractionError::codec(format!("missing return value at index {cursor}"))
            })?;
            *cursor += 1;
            decode_top(bytes, single, abi)
        }
    }
}

fn width(_: std::num::TryFromIntError) -> InteractionError {
    InteractionError::codec("value exceeds type width")
}

fn top_unsigned(bytes: &[u8], size: usize) -> InteractionResult<u64> {
    if bytes.len() > size {
        return Err(InteractionError::codec(format!(
            "{} bytes do not fit in {size}",
            bytes.len()
        )));
    }
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

fn top_signed(bytes: &[u8], size: usize) -> InteractionResult<i64> {
    if bytes.len() > size {
        return Err(InteractionError::codec(format!(
            "{} bytes do not fit in {size}",
            bytes.len()
        )));
    }
    let negative = bytes.first().is_some_and(|b| b & 0x80 != 0);
    let mut buf = if negative { [0xff; 8] } else { [0; 8] };
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    Ok(i64::from_be_bytes(buf))
}

fn read_biguint(bytes: &[u8]) -> InteractionResult<U256> {
    U256::try_from_be_slice(bytes)
        .ok_or_else(|| InteractionError::codec("BigUint exceeds 256 bits"))
}

fn read_bigint(bytes: &[u8]) -> InteractionResult<I256> {
    if bytes.len() > 32 {
        return Err(InteractionError::codec("BigInt exceeds 256 bits"));
    }
    Ok(I256::from_raw(U256::from_be_bytes(sign_extend(bytes))))
}

fn utf8(bytes: &[u8]) -> InteractionResult<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| InteractionError::codec(format!("identifier is not UTF-8: {e}")))
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn finish(&self) -> InteractionResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(InteractionError::codec(format!(
                "{} trailing bytes",
                self.data.len() - self.pos
            )))
        }
    }

    fn take(&mut self, len: usize) -> InteractionResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                InteractionError::codec(format!(
                    "unexpected end of input: need {len} bytes at offset {}",
                    self.pos
                ))
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self) -> InteractionResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn fixed<const N: usize>(&mut self) -> InteractionResult<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    fn length(&mut self) -> InteractionResult<usize> {
        let len = u32::from_be_bytes(self.fixed::<4>()?);
        usize::try_from(len).map_err(|_| InteractionError::codec("length exceeds usize"))
    }

    fn prefixed(&mut self) -> InteractionResult<&'a [u8]> {
        let len = self.length()?;
        self.take(len)
    }

    fn nested(&mut self, ty: &TypeExpr, abi: &Abi) -> InteractionResult<TypedValue> {
        let value = match ty {
            TypeExpr::U8 => TypedValue::U8(self.byte()?),
            TypeExpr::U16 => TypedValue::U16(u16::from_be_bytes(self.fixed()?)),
            TypeExpr::U32 => TypedValue::U32(u32::from_be_bytes(self.fixed()?)),
            TypeExpr::U64 => TypedValue::U64(u64::from_be_bytes(self.fixed()?)),
            TypeExpr::I8 => TypedValue::I8(i8::from_be_bytes(self.fixed()?)),
            TypeExpr::I16 => TypedValue::I16(i16::from_be_bytes(self.fixed()?)),
            TypeExpr::I32 => TypedValue::I32(i32::from_be_bytes(self.fixed()?)),
            TypeExpr::I64 => TypedValue::I64(i64::from_be_bytes(self.fixed()?)),
            TypeExpr::BigInt => TypedValue::BigInt(read_bigint(self.prefixed()?)?),
            TypeExpr::BigUint => TypedValue::BigUint(read_biguint(self.prefixed()?)?),
            TypeExpr::Bool => match self.byte()? {
                0 => TypedValue::Bool(false),
                1 => TypedValue::Bool(true),
                other => {
                    return Err(InteractionError::codec(format!(
                        "invalid bool byte {other}"
                    )));
                }
            },
            TypeExpr::Address => TypedValue::Address(Address::from_slice(self.take(32)?)?),
            TypeExpr::TokenIdentifier => TypedValue::TokenIdentifier(utf8(self.prefixed()?)?),
            TypeExpr::EgldOrEsdtTokenIdentifier => TypedValue::EgldOrEsdt(utf8(self.prefixed()?)?),
            TypeExpr::Bytes => TypedValue::Bytes(self.prefixed()?.to_vec()),
            TypeExpr::Option(inner) => match self.byte()? {
                0 => TypedValue::Option(None),
                1 => TypedValue::Option(Some(Box::new(self.nested(inner, abi)?))),
                other => {
                    return Err(InteractionError::codec(format!(
                        "invalid Option discriminant {other}"
                    )));
                }
            },
            TypeExpr::List(inner) => {
                let count = self.length()?;
                let mut items = Vec::with_capacity(count.min(1024));
                for _ in 0..count {
                    items.push(self.nested(inner, abi)?);
                }
                TypedValue::List(items)
            }
            TypeExpr::Array(len, inner) if **inner == TypeExpr::U8 => {
                TypedValue::FixedBytes(self.take(*len)?.to_vec())
            }
            TypeExpr::Array(len, inner) => TypedValue::Tuple(
                (0..*len)
                    .map(|_| self.nested(inner, abi))
                    .collect::<InteractionResult<_>>()?,
            ),
            TypeExpr::Tuple(types) => TypedValue::Tuple(
                types
                    .iter()
                    .map(|t| self.nested(t, abi))
                    .collect::<InteractionResult<_>>()?,
            ),
            TypeExpr::Named(name) => self.named(name, abi)?,
            TypeExpr::Variadic(_) | TypeExpr::Optional(_) | TypeExpr::Multi(_) => {
                return Err(InteractionError::codec(
                    "multi-argument type cannot be nested",
                ));
            }
        };
        Ok(value)
    }

    fn named(&mut self, name: &str, abi: &Abi) -> InteractionResult<TypedValue> {
        match abi.type_def(name) {
            Some(AbiTypeDef::Struct { fields }) => {
                let mut values = Vec::with_capacity(fields.len());
                for field in fields {
                    let ty = TypeExpr::parse(&field.type_name)?;
                    values.push((field.name.clone(), self.nested(&ty, abi)?));
                }
                Ok(TypedValue::Struct {
                    name: name.to_string(),
                    fields: values,
                })
            }
            Some(AbiTypeDef::Enum { variants }) => {
                let discriminant = self.byte()?;
                let variant = variants
                    .iter()
                    .find(|v| v.discriminant == discriminant)
                    .ok_or_else(|| {
                        InteractionError::codec(format!(
                            "{name} has no variant with discriminant {discriminant}"
                        ))
                    })?;
                let mut values = Vec::with_capacity(variant.fields.len());
                for field in &variant.fields {
                    let ty = TypeExpr::parse(&field.type_name)?;
                    values.push((field.name.clone(), self.nested(&ty, abi)?));
                }
                Ok(TypedValue::Enum {
                    name: name.to_string(),
                    variant: variant.name.clone(),
                    discriminant,
                    fields: values,
                })
            }
            None => Err(InteractionError::abi(format!(
                "type {name} is not defined in {}",
                abi.name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_top(value: TypedValue) -> String {
        hex::encode(encode_top(&value).unwrap())
    }

    fn hex_nested(value: TypedValue) -> String {
        hex::encode(encode_nested(&value).unwrap())
    }

    #[test]
    fn top_level_is_minimal() {
        assert_eq!(hex_top(TypedValue::U64(0)), "");
        assert_eq!(hex_top(TypedValue::U64(1)), "01");
        assert_eq!(hex_top(TypedValue::U64(256)), "0100");
        assert_eq!(hex_top(TypedValue::U8(255)), "ff");
        assert_eq!(hex_top(TypedValue::I64(-1)), "ff");
        assert_eq!(hex_top(TypedValue::I64(128)), "0080");
        assert_eq!(hex_top(TypedValue::I64(-129)), "ff7f");
        assert_eq!(hex_top(TypedValue::I16(-2)), "fe");
        assert_eq!(
            hex_top(TypedValue::BigUint(U256::from(1_000_000_000_000_000_000u64))),
            "0de0b6b3a7640000"
        );
        assert_eq!(hex_top(TypedValue::Bool(true)), "01");
        assert_eq!(hex_top(TypedValue::Bool(false)), "");
        assert_eq!(hex_top(TypedValue::token("EGLD")), "45474c44");
    }

    #[test]
    fn nested_uses_widths_and_prefixes() {
        assert_eq!(hex_nested(TypedValue::U32(5)), "00000005");
        assert_eq!(hex_nested(TypedValue::U64(1)), "0000000000000001");
        assert_eq!(hex_nested(TypedValue::I8(-1)), "ff");
        assert_eq!(hex_nested(TypedValue::I32(-2)), "fffffffe");
        assert_eq!(hex_nested(TypedValue::BigUint(U256::ZERO)), "00000000");
        assert_eq!(hex_nested(TypedValue::BigUint(U256::from(1000u64))), "0000000203e8");
        assert_eq!(hex_nested(TypedValue::token("EGLD")), "0000000445474c44");
        assert_eq!(hex_nested(TypedValue::Bool(false)), "00");
        assert_eq!(hex_nested(TypedValue::Option(None)), "00");
        assert_eq!(
            hex_nested(TypedValue::List(vec![TypedValue::U8(1), TypedValue::U8(2)])),
            "000000020102"
        );
        assert_eq!(hex_nested(TypedValue::FixedBytes(vec![0xaa, 0xbb])), "aabb");
    }

    #[test]
    fn option_and_list_at_top_level() {
        let some = TypedValue::Option(Some(Box::new(TypedValue::U32(7))));
        assert_eq!(hex_top(some), "0100000007");
        assert_eq!(hex_top(TypedValue::Option(None)), "");
        let list = TypedValue::List(vec![TypedValue::U16(1), TypedValue::U16(2)]);
        assert_eq!(hex_top(list), "00010002");
    }

    #[test]
    fn enums() {
        let unit = TypedValue::Enum {
            name: "AuctionType".into(),
            variant: "None".into(),
            discriminant: 0,
            fields: Vec::new(),
        };
        assert_eq!(hex_top(unit.clone()), "");
        assert_eq!(hex_nested(unit), "00");

        let nft = TypedValue::Enum {
            name: "AuctionType".into(),
            variant: "Nft".into(),
            discriminant: 1,
            fields: Vec::new(),
        };
        assert_eq!(hex_top(nft), "01");
    }

    #[test]
    fn args_expand_multi_values() {
        let args = encode_args(&[
            TypedValue::U64(3),
            TypedValue::Variadic(vec![
                TypedValue::Multi(vec![TypedValue::token("A-123456"), TypedValue::U64(0)]),
                TypedValue::Multi(vec![TypedValue::token("B-123456"), TypedValue::U64(2)]),
            ]),
            TypedValue::optional(None),
        ])
        .unwrap();
        let hex: Vec<String> = args.iter().map(|a| hex_arg(a)).collect();
        assert_eq!(
            hex,
            vec!["03", "412d313233343536", "", "422d313233343536", "02"]
        );

        assert!(encode_top(&TypedValue::Variadic(vec![])).is_err());
    }

    #[test]
    fn decode_top_level() {
        let abi = Abi::default();
        assert_eq!(
            decode_top(&[], &TypeExpr::U64, &abi).unwrap(),
            TypedValue::U64(0)
        );
        assert_eq!(
            decode_top(&[0x01, 0x00], &TypeExpr::U32, &abi).unwrap(),
            TypedValue::U32(256)
        );
        assert_eq!(
            decode_top(&[0xff], &TypeExpr::I64, &abi).unwrap(),
            TypedValue::I64(-1)
        );
        assert_eq!(
            decode_top(&[0x80], &TypeExpr::I8, &abi).unwrap(),
            TypedValue::I8(-128)
        );
        assert!(decode_top(&[1, 2, 3], &TypeExpr::U16, &abi).is_err());
        assert!(decode_top(&[2], &TypeExpr::Bool, &abi).is_err());
        assert_eq!(
            decode_top(b"", &TypeExpr::Option(Box::new(TypeExpr::U32)), &abi).unwrap(),
            TypedValue::Option(None)
        );
        assert_eq!(
            decode_top(
                &[0, 0, 0, 1, 0, 0, 0, 2],
                &TypeExpr::List(Box::new(TypeExpr::U32)),
                &abi
            )
            .unwrap(),
            TypedValue::List(vec![TypedValue::U32(1), TypedValue::U32(2)])
        );
    }

    #[test]
    fn bigint_wider_than_64_bits() {
        let abi = Abi::default();
        // -2^80
        let mut bytes = vec![0xff];
        bytes.extend_from_slice(&[0; 10]);
        let value = decode_top(&bytes, &TypeExpr::BigInt, &abi).unwrap();
        let expected = I256::ZERO - I256::from_raw(U256::from(1u64) << 80usize);
        assert_eq!(value, TypedValue::BigInt(expected));
        assert_eq!(encode_top(&value).unwrap(), bytes);

        assert_eq!(
            decode_top(&[], &TypeExpr::BigInt, &abi).unwrap(),
            TypedValue::BigInt(I256::ZERO)
        );
        assert_eq!(hex_top(TypedValue::BigInt(I256::MINUS_ONE)), "ff");
        assert_eq!(
            hex_nested(TypedValue::BigInt(I256::from_raw(U256::from(128u64)))),
            "000000020080"
        );
        assert_eq!(
            decode_nested(&[0, 0, 0, 2, 0x00, 0x80], &TypeExpr::BigInt, &abi).unwrap(),
            TypedValue::BigInt(I256::from_raw(U256::from(128u64)))
        );
        assert!(decode_top(&[1; 33], &TypeExpr::BigInt, &abi).is_err());
    }

    #[test]
    fn decode_nested_rejects_truncation() {
        let abi = Abi::default();
        let error = decode_nested(&[0, 0, 0, 4, b'E', b'G'], &TypeExpr::TokenIdentifier, &abi)
            .unwrap_err();
        assert!(error.to_string().contains("unexpected end of input"));
        assert!(decode_nested(&[0, 0, 0, 1, 0xaa], &TypeExpr::U32, &abi).is_err());
    }

    #[test]
    fn decode_results_handles_multi_outputs() {
        let abi = Abi::default();
        let outputs = vec![
            TypeExpr::U64,
            TypeExpr::Variadic(Box::new(TypeExpr::Multi(vec![
                TypeExpr::TokenIdentifier,
                TypeExpr::BigUint,
            ]))),
        ];
        let results = vec![
            vec![0x02],
            b"EGLD".to_vec(),
            vec![0x0a],
            b"USDC-c76f1f".to_vec(),
            vec![],
        ];
        let values = decode_results(&results, &outputs, &abi).unwrap();
        assert_eq!(values[0], TypedValue::U64(2));
        let pairs = values[1].as_list().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].as_list().unwrap()[0].as_str().unwrap(), "USDC-c76f1f");
        assert_eq!(pairs[1].as_list().unwrap()[1].as_biguint().unwrap(), U256::ZERO);

        let optional = [TypeExpr::Optional(Box::new(TypeExpr::U32))];
        assert_eq!(
            decode_results(&[], &optional, &abi).unwrap(),
            vec![TypedValue::OptionalArg(None)]
        );
        assert!(decode_results(&[], &[TypeExpr::U32], &abi).is_err());
    }
}
