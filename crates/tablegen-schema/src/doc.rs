//! Raw schema document, exactly as loaded from configuration.
//!
//! Nothing here is checked; shape problems surface as validation errors
//! rather than parse failures, so every section defaults to empty. The one
//! exception is a repeated map key, which would otherwise be dropped by the
//! parser before validation could see it.

use indexmap::{IndexMap, map::Entry};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor},
};
use std::{fmt, hash::Hash, marker::PhantomData};

///
/// RawSchema
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct RawSchema {
    #[serde(deserialize_with = "unique_keys")]
    pub tables: IndexMap<String, RawTable>,
    #[serde(deserialize_with = "unique_keys")]
    pub enums: IndexMap<String, Vec<String>>,
}

impl RawSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, replacing any previous table of the same name.
    #[must_use]
    pub fn table(mut self, name: impl Into<String>, table: RawTable) -> Self {
        self.tables.insert(name.into(), table);
        self
    }

    /// Add an enum, replacing any previous enum of the same name.
    #[must_use]
    pub fn enumeration<I, S>(mut self, name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums
            .insert(name.into(), variants.into_iter().map(Into::into).collect());
        self
    }
}

///
/// RawTable
///
/// Both maps keep declaration order; that order is the encoding order.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTable {
    #[serde(deserialize_with = "unique_keys")]
    pub primary_keys: IndexMap<String, String>,
    #[serde(deserialize_with = "unique_keys")]
    pub schema: IndexMap<String, String>,
}

impl RawTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn key(mut self, field: impl Into<String>, ty: impl Into<String>) -> Self {
        self.primary_keys.insert(field.into(), ty.into());
        self
    }

    #[must_use]
    pub fn value(mut self, field: impl Into<String>, ty: impl Into<String>) -> Self {
        self.schema.insert(field.into(), ty.into());
        self
    }
}

// unique_keys
// map deserializer that fails on a repeated key instead of keeping the last one
fn unique_keys<'de, D, K, V>(deserializer: D) -> Result<IndexMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Eq + Hash + fmt::Display,
    V: Deserialize<'de>,
{
    struct UniqueKeys<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for UniqueKeys<K, V>
    where
        K: Deserialize<'de> + Eq + Hash + fmt::Display,
        V: Deserialize<'de>,
    {
        type Value = IndexMap<K, V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map with unique keys")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));

            while let Some((key, value)) = access.next_entry::<K, V>()? {
                match map.entry(key) {
                    Entry::Occupied(entry) => {
                        return Err(de::Error::custom(format_args!(
                            "duplicate key `{}`",
                            entry.key()
                        )));
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(value);
                    }
                }
            }

            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueKeys(PhantomData))
}
