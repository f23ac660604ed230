//! Tag-prefixed binary encoding of JSON values
//!
//! Wire format (all integers u32 little-endian):
//!
//! ```text
//! Array   tag 1 | element count | elements in order
//! Object  tag 2 | pair count    | per pair: key length, UTF-8 key, value
//! Null    tag 3
//! Boolean tag 4 | one byte 0/1
//! Number  tag 5 | length | canonical JSON number text
//! String  tag 6 | length | UTF-8 bytes
//! ```
//!
//! Numbers travel as their canonical JSON text, so integers up to 2^53 and
//! ordinary floats round-trip exactly and keep their integer-ness.

use serde_json::{Map, Value};

use super::errors::{CodecError, CodecResult};

// serde_json stops parsing at 128 levels, so every value that can reach
// `encode` fits well inside this. Anything deeper is a corrupt buffer and
// must not be allowed to recurse the stack away.
const MAX_DEPTH: usize = 256;

const TAG_ARRAY: u8 = 1;
const TAG_OBJECT: u8 = 2;
const TAG_NULL: u8 = 3;
const TAG_BOOLEAN: u8 = 4;
const TAG_NUMBER: u8 = 5;
const TAG_STRING: u8 = 6;

/// Encode a value into its binary form.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);
    encode_into(value, &mut buf);
    buf
}

fn encode_into(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Null => buf.push(TAG_NULL),
        Value::Bool(b) => {
            buf.push(TAG_BOOLEAN);
            buf.push(u8::from(*b));
        }
        Value::Number(n) => {
            buf.push(TAG_NUMBER);
            put_bytes(buf, n.to_string().as_bytes());
        }
        Value::String(s) => {
            buf.push(TAG_STRING);
            put_bytes(buf, s.as_bytes());
        }
        Value::Array(elements) => {
            buf.push(TAG_ARRAY);
            buf.extend_from_slice(&(elements.len() as u32).to_le_bytes());
            for element in elements {
                encode_into(element, buf);
            }
        }
        Value::Object(members) => {
            buf.push(TAG_OBJECT);
            buf.extend_from_slice(&(members.len() as u32).to_le_bytes());
            for (key, member) in members {
                put_bytes(buf, key.as_bytes());
                encode_into(member, buf);
            }
        }
    }
}

fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    buf.extend_from_slice(bytes);
}

/// Decode a binary buffer back into a value.
///
/// The entire buffer must be consumed; leftover bytes are a fault, the same
/// as a truncated or unrecognized prefix.
pub fn decode(data: &[u8]) -> CodecResult<Value> {
    let mut reader = Reader { buf: data, pos: 0 };
    let value = reader.read_value(0)?;
    if reader.pos != data.len() {
        return Err(CodecError::TrailingBytes {
            count: data.len() - reader.pos,
        });
    }
    Ok(value)
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn read_value(&mut self, depth: usize) -> CodecResult<Value> {
        if depth >= MAX_DEPTH {
            return Err(CodecError::NestingTooDeep { limit: MAX_DEPTH });
        }
        let offset = self.pos;
        let tag = self.read_u8()?;
        match tag {
            TAG_NULL => Ok(Value::Null),
            TAG_BOOLEAN => {
                let offset = self.pos;
                match self.read_u8()? {
                    0 => Ok(Value::Bool(false)),
                    1 => Ok(Value::Bool(true)),
                    value => Err(CodecError::InvalidBoolean { value, offset }),
                }
            }
            TAG_NUMBER => {
                let literal = self.read_string()?;
                let number = serde_json::from_str(&literal)
                    .map_err(|_| CodecError::InvalidNumber { literal })?;
                Ok(Value::Number(number))
            }
            TAG_STRING => Ok(Value::String(self.read_string()?)),
            TAG_ARRAY => {
                let count = self.read_u32()?;
                let mut elements = Vec::new();
                for _ in 0..count {
                    elements.push(self.read_value(depth + 1)?);
                }
                Ok(Value::Array(elements))
            }
            TAG_OBJECT => {
                let count = self.read_u32()?;
                let mut members = Map::new();
                for _ in 0..count {
                    let key = self.read_string()?;
                    let member = self.read_value(depth + 1)?;
                    members.insert(key, member);
                }
                Ok(Value::Object(members))
            }
            tag => Err(CodecError::UnknownTag { tag, offset }),
        }
    }

    fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.read_exact(1)?[0])
    }

    fn read_u32(&mut self) -> CodecResult<u32> {
        let bytes = self.read_exact(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_string(&mut self) -> CodecResult<String> {
        let len = self.read_u32()? as usize;
        let offset = self.pos;
        let bytes = self.read_exact(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| CodecError::InvalidUtf8 { offset })
    }

    fn read_exact(&mut self, wanted: usize) -> CodecResult<&'a [u8]> {
        let available = self.buf.len() - self.pos;
        if available < wanted {
            return Err(CodecError::Truncated {
                wanted,
                available,
                offset: self.pos,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + wanted];
        self.pos += wanted;
        Ok(bytes)
    }
}
