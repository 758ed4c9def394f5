//! serde glue for the protobuf-shaped fields of the model.
//!
//! Enum fields are stored as `i32` on the wire but read and written as their
//! protobuf names in JSON (`"GIGABYTE"`). Values outside the enum fall back
//! to the raw number. Timestamps are RFC 3339 strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NameOrNumber<E> {
    Name(E),
    Number(i32),
}

fn serialize_enum<E, S>(value: i32, serializer: S) -> Result<S::Ok, S::Error>
where
    E: TryFrom<i32> + Serialize,
    S: Serializer,
{
    match E::try_from(value) {
        Ok(known) => known.serialize(serializer),
        Err(_) => serializer.serialize_i32(value),
    }
}

fn deserialize_enum<'de, E, D>(deserializer: D) -> Result<i32, D::Error>
where
    E: Deserialize<'de> + Into<i32>,
    D: Deserializer<'de>,
{
    match NameOrNumber::<E>::deserialize(deserializer)? {
        NameOrNumber::Name(known) => Ok(known.into()),
        NameOrNumber::Number(value) => Ok(value),
    }
}

macro_rules! enum_field {
    ($module:ident, $enum:ty) => {
        pub mod $module {
            use serde::{Deserializer, Serializer};

            pub fn serialize<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
                super::serialize_enum::<$enum, S>(*value, serializer)
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
                super::deserialize_enum::<$enum, D>(deserializer)
            }
        }
    };
}

enum_field!(memory_unit, crate::model::memory::Unit);
enum_field!(storage_driver, crate::model::storage::Driver);
enum_field!(screen_panel, crate::model::screen::Panel);
enum_field!(keyboard_layout, crate::model::keyboard::Layout);

pub mod timestamp {
    use prost_types::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(timestamp) => serializer.serialize_some(&timestamp.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| text.parse::<Timestamp>().map_err(serde::de::Error::custom))
            .transpose()
    }
}
