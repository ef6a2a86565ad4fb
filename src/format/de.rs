//! Typed binding of document values through serde
//!
//! Values on disk are untyped text, so the deserializer is weakly typed:
//! numeric and boolean fields are parsed from strings, and a scalar bound to a
//! list becomes a one-element list.

use serde::de::value::{SeqDeserializer, StrDeserializer};
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, Error as _, IntoDeserializer, MapAccess, Unexpected,
    Visitor,
};
use serde::forward_to_deserialize_any;

use super::document::{Table, Value};
use super::error::BindError;

/// Bind a typed record from one section's keys
pub fn from_table<T: DeserializeOwned>(table: &Table) -> Result<T, BindError> {
    from_entries(table.iter().map(|(key, value)| (key.clone(), value)))
}

/// Bind a typed record from arbitrary `(key, value)` pairs, e.g. flat paths
pub fn from_entries<'a, T, I>(entries: I) -> Result<T, BindError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (String, &'a Value)>,
{
    T::deserialize(EntriesDeserializer {
        entries: entries.into_iter().collect(),
    })
}

struct EntriesDeserializer<'a> {
    entries: Vec<(String, &'a Value)>,
}

impl<'de, 'a> de::Deserializer<'de> for EntriesDeserializer<'a> {
    type Error = BindError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_map(EntriesAccess {
            entries: self.entries.into_iter(),
            pending: None,
        })
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct EntriesAccess<'a> {
    entries: std::vec::IntoIter<(String, &'a Value)>,
    pending: Option<(String, &'a Value)>,
}

impl<'de, 'a> MapAccess<'de> for EntriesAccess<'a> {
    type Error = BindError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, BindError> {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };

        let key_de: StrDeserializer<'_, BindError> = key.as_str().into_deserializer();
        let bound = seed.deserialize(key_de)?;
        self.pending = Some((key, value));
        Ok(Some(bound))
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(
        &mut self,
        seed: V,
    ) -> Result<V::Value, BindError> {
        let (key, value) = self
            .pending
            .take()
            .ok_or_else(|| BindError::custom("value requested before its key"))?;

        seed.deserialize(ValueDeserializer(value))
            .map_err(|e| e.at(&key))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

struct ValueDeserializer<'a>(&'a Value);

impl<'a> ValueDeserializer<'a> {
    fn unexpected(&self) -> Unexpected<'a> {
        match self.0 {
            Value::String(s) => Unexpected::Str(s),
            Value::Integer(i) => Unexpected::Signed(*i),
            Value::Float(f) => Unexpected::Float(*f),
            Value::Boolean(b) => Unexpected::Bool(*b),
            Value::Array(_) => Unexpected::Seq,
        }
    }
}

fn visit_strings<'de, V: Visitor<'de>>(
    items: &[String],
    visitor: V,
) -> Result<V::Value, BindError> {
    let mut seq: SeqDeserializer<_, BindError> =
        SeqDeserializer::new(items.iter().map(String::as_str));
    let value = visitor.visit_seq(&mut seq)?;
    seq.end()?;
    Ok(value)
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

macro_rules! deserialize_integer {
    ($($method:ident => $ty:ty, $visit:ident;)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
                match self.0 {
                    Value::String(s) => match s.trim().parse::<$ty>() {
                        Ok(n) => visitor.$visit(n),
                        Err(_) => Err(BindError::invalid_value(self.unexpected(), &visitor)),
                    },
                    Value::Integer(i) => visitor.visit_i64(*i),
                    Value::Float(f) => visitor.visit_f64(*f),
                    _ => Err(BindError::invalid_type(self.unexpected(), &visitor)),
                }
            }
        )*
    };
}

impl<'de, 'a> de::Deserializer<'de> for ValueDeserializer<'a> {
    type Error = BindError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self.0 {
            Value::String(s) => visitor.visit_str(s),
            Value::Integer(i) => visitor.visit_i64(*i),
            Value::Float(f) => visitor.visit_f64(*f),
            Value::Boolean(b) => visitor.visit_bool(*b),
            Value::Array(items) => visit_strings(items, visitor),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self.0 {
            Value::Boolean(b) => visitor.visit_bool(*b),
            Value::Integer(i) => visitor.visit_bool(*i != 0),
            Value::String(s) => match parse_bool(s) {
                Some(b) => visitor.visit_bool(b),
                None => Err(BindError::invalid_value(self.unexpected(), &visitor)),
            },
            _ => Err(BindError::invalid_type(self.unexpected(), &visitor)),
        }
    }

    deserialize_integer! {
        deserialize_i8 => i8, visit_i8;
        deserialize_i16 => i16, visit_i16;
        deserialize_i32 => i32, visit_i32;
        deserialize_i64 => i64, visit_i64;
        deserialize_u8 => u8, visit_u8;
        deserialize_u16 => u16, visit_u16;
        deserialize_u32 => u32, visit_u32;
        deserialize_u64 => u64, visit_u64;
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self.0 {
            Value::Float(f) => visitor.visit_f64(*f),
            Value::Integer(i) => visitor.visit_f64(*i as f64),
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(f) => visitor.visit_f64(f),
                Err(_) => Err(BindError::invalid_value(self.unexpected(), &visitor)),
            },
            _ => Err(BindError::invalid_type(self.unexpected(), &visitor)),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self.0 {
            Value::String(s) => visitor.visit_str(s),
            Value::Integer(i) => visitor.visit_string(i.to_string()),
            Value::Float(f) => visitor.visit_string(f.to_string()),
            Value::Boolean(b) => visitor.visit_string(b.to_string()),
            Value::Array(_) => Err(BindError::invalid_type(self.unexpected(), &visitor)),
        }
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        self.deserialize_str(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, BindError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self.0 {
            Value::Array(items) => visit_strings(items, visitor),
            Value::String(s) if s.is_empty() => visit_strings(&[], visitor),
            Value::String(s) => visit_strings(std::slice::from_ref(s), visitor),
            _ => Err(BindError::invalid_type(self.unexpected(), &visitor)),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, BindError> {
        match self.0 {
            Value::String(s) => {
                let variant: StrDeserializer<'_, BindError> = s.as_str().into_deserializer();
                visitor.visit_enum(variant)
            }
            _ => Err(BindError::invalid_type(self.unexpected(), &visitor)),
        }
    }

    forward_to_deserialize_any! {
        i128 u128 char bytes byte_buf unit unit_struct tuple tuple_struct
        map struct identifier ignored_any
    }
}
