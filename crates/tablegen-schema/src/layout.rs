//! Binary layout planning.
//!
//! Key fields are packed into the key blob; static value fields are packed
//! independently into the static data blob. Dynamic value fields carry no
//! offset: they trail the static blob in declaration order, each behind its
//! own length prefix.

use crate::{
    node::{Field, Table},
    types::TypeDescriptor,
};
use std::fmt::Write as _;
use xxhash_rust::xxh3::xxh3_64;

///
/// StaticSlot
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StaticSlot {
    pub field: String,
    pub ty: TypeDescriptor,
    pub offset: usize,
    pub width: usize,
}

impl StaticSlot {
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }
}

///
/// DynamicSlot
///
/// `index` is the position among dynamic fields, i.e. how many length-prefixed
/// fields precede this one.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DynamicSlot {
    pub field: String,
    pub ty: TypeDescriptor,
    pub index: usize,
}

///
/// Layout
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    pub table: String,
    pub key: Vec<StaticSlot>,
    pub static_data: Vec<StaticSlot>,
    pub dynamic: Vec<DynamicSlot>,
}

impl Layout {
    /// Width of the key blob.
    #[must_use]
    pub fn key_width(&self) -> usize {
        blob_width(&self.key)
    }

    /// Width of the static data blob.
    #[must_use]
    pub fn static_data_width(&self) -> usize {
        blob_width(&self.static_data)
    }

    /// Fixed bytes per record across both blobs.
    #[must_use]
    pub fn record_size(&self) -> usize {
        self.key_width() + self.static_data_width()
    }

    #[must_use]
    pub fn get_static(&self, field: &str) -> Option<&StaticSlot> {
        self.key
            .iter()
            .chain(&self.static_data)
            .find(|slot| slot.field == field)
    }

    /// Canonical one-line description; stable across runs.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = format!("{}|key", self.table);
        for slot in &self.key {
            let _ = write!(out, ":{}={}@{}+{}", slot.field, slot.ty, slot.offset, slot.width);
        }
        out.push_str("|data");
        for slot in &self.static_data {
            let _ = write!(out, ":{}={}@{}+{}", slot.field, slot.ty, slot.offset, slot.width);
        }
        out.push_str("|dynamic");
        for slot in &self.dynamic {
            let _ = write!(out, ":{}={}#{}", slot.field, slot.ty, slot.index);
        }

        out
    }

    /// 64-bit xxh3 hash of [`Self::describe`].
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(self.describe().as_bytes())
    }
}

fn blob_width(slots: &[StaticSlot]) -> usize {
    slots.last().map_or(0, StaticSlot::end)
}

/// Plan the layout of a validated table.
#[must_use]
pub fn plan(table: &Table) -> Layout {
    let key = pack(table.key_fields.iter());

    let (fixed, variable): (Vec<&Field>, Vec<&Field>) =
        table.value_fields.iter().partition(|f| !f.is_dynamic());

    let static_data = pack(fixed.into_iter());
    let dynamic = variable
        .into_iter()
        .enumerate()
        .map(|(index, field)| DynamicSlot {
            field: field.name.clone(),
            ty: field.ty.clone(),
            index,
        })
        .collect();

    Layout {
        table: table.name.clone(),
        key,
        static_data,
        dynamic,
    }
}

// pack
// prefix-sum static widths in declaration order
fn pack<'a>(fields: impl Iterator<Item = &'a Field>) -> Vec<StaticSlot> {
    let mut offset = 0;

    fields
        .filter_map(|field| {
            let width = field.ty.byte_width()?;
            let slot = StaticSlot {
                field: field.name.clone(),
                ty: field.ty.clone(),
                offset,
                width,
            };
            offset += width;

            Some(slot)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        doc::{RawSchema, RawTable},
        types::Primitive,
        validate::validate,
    };
    use proptest::prelude::*;

    fn plan_one(raw: RawTable) -> Layout {
        let schema = validate(&RawSchema::new().table("T", raw).enumeration("Enum1", ["E1", "E2", "E3"]))
            .expect("valid schema");
        plan(&schema.tables()[0])
    }

    #[test]
    fn example_table_layout() {
        let layout = plan_one(
            RawTable::new()
                .key("k1", "uint256")
                .value("v1", "bool")
                .value("v2", "Enum1"),
        );

        assert_eq!(layout.key_width(), 32);
        assert_eq!(layout.static_data_width(), 2);
        assert!(layout.dynamic.is_empty());
        assert_eq!(layout.get_static("v2").map(|s| s.offset), Some(1));
    }

    #[test]
    fn key_and_value_offsets_restart_at_zero() {
        let layout = plan_one(
            RawTable::new()
                .key("a", "uint8")
                .key("b", "address")
                .key("c", "int24")
                .value("x", "bytes16")
                .value("y", "uint64"),
        );

        let offsets = |slots: &[StaticSlot]| slots.iter().map(|s| (s.offset, s.width)).collect::<Vec<_>>();
        assert_eq!(offsets(&layout.key), [(0, 1), (1, 20), (21, 3)]);
        assert_eq!(offsets(&layout.static_data), [(0, 16), (16, 8)]);
        assert_eq!(layout.record_size(), 24 + 24);
    }

    #[test]
    fn dynamic_fields_are_isolated_in_declaration_order() {
        let layout = plan_one(
            RawTable::new()
                .key("id", "bytes32")
                .value("name", "string")
                .value("level", "uint16")
                .value("blob", "bytes")
                .value("alive", "bool"),
        );

        let statics: Vec<_> = layout.static_data.iter().map(|s| s.field.as_str()).collect();
        let dynamics: Vec<_> = layout.dynamic.iter().map(|s| (s.field.as_str(), s.index)).collect();
        assert_eq!(statics, ["level", "alive"]);
        assert_eq!(dynamics, [("name", 0), ("blob", 1)]);
        assert_eq!(layout.static_data_width(), 3);
        assert_eq!(layout.dynamic[0].ty, TypeDescriptor::Primitive(Primitive::String));
    }

    #[test]
    fn fingerprint_tracks_layout_changes() {
        let a = plan_one(RawTable::new().key("k", "uint8").value("v", "uint16"));
        let b = plan_one(RawTable::new().key("k", "uint8").value("v", "uint32"));

        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.describe(), "T|key:k=uint8@0+1|data:v=uint16@0+2|dynamic");
    }

    fn type_name() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "uint8", "uint24", "uint256", "int40", "int128", "bytes1", "bytes32", "address", "bool",
            "Enum1", "string", "bytes",
        ])
    }

    proptest! {
        #[test]
        fn blob_widths_equal_summed_field_widths(
            keys in prop::collection::vec(type_name(), 1..6),
            values in prop::collection::vec(type_name(), 1..8),
        ) {
            let mut raw = RawTable::new();
            for (i, ty) in keys.iter().enumerate() {
                let ty = if *ty == "string" || *ty == "bytes" { "uint8" } else { *ty };
                raw = raw.key(format!("k{i}"), ty);
            }
            for (i, ty) in values.iter().enumerate() {
                raw = raw.value(format!("v{i}"), *ty);
            }

            let schema = validate(&RawSchema::new().table("T", raw).enumeration("Enum1", ["E1", "E2", "E3"])).unwrap();
            let table = &schema.tables()[0];
            let layout = plan(table);

            let key_sum: usize = table.key_fields.iter().filter_map(|f| f.ty.byte_width()).sum();
            let data_sum: usize = table.value_fields.iter().filter_map(|f| f.ty.byte_width()).sum();
            prop_assert_eq!(layout.key_width(), key_sum);
            prop_assert_eq!(layout.static_data_width(), data_sum);
            prop_assert_eq!(
                layout.static_data.len() + layout.dynamic.len(),
                table.value_fields.len()
            );
            for pair in layout.static_data.windows(2) {
                prop_assert_eq!(pair[0].end(), pair[1].offset);
            }
        }
    }
}
