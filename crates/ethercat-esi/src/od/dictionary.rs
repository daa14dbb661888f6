// crates/ethercat-esi/src/od/dictionary.rs

use super::datatypes::DataTypeRegistry;
use super::record::{FieldRegistry, ObjectRecord, build_record};
use crate::error::EsiError;
use crate::literal::parse_number;
use crate::xml::Element;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::debug;

/// Dictionary key: the raw `Index` and `SubIdx` text of a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjectKey {
    pub index: String,
    pub sub_index: String,
}

impl ObjectKey {
    pub fn of(record: &ObjectRecord) -> Self {
        Self {
            index: record.index().to_string(),
            sub_index: record.sub_index().to_string(),
        }
    }
}

/// Returns `true` for `DT` followed by exactly four uppercase hex digits.
pub fn is_custom_type(data_type: &str) -> bool {
    let bytes = data_type.as_bytes();
    bytes.len() == 6
        && data_type.starts_with("DT")
        && bytes[2..]
            .iter()
            .all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F'))
}

/// The flattened object dictionary, in insertion order.
///
/// Writing to an existing key replaces the record but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct ObjectDictionary {
    entries: Vec<(ObjectKey, ObjectRecord)>,
    positions: BTreeMap<ObjectKey, usize>,
}

impl ObjectDictionary {
    /// Builds the dictionary from every `Objects/Object` element of the document,
    /// expanding objects whose type is a custom `DTxxxx` DataType.
    pub fn from_document(
        root: &Element,
        types: &DataTypeRegistry,
        registry: &mut FieldRegistry,
    ) -> Result<Self, EsiError> {
        let mut od = Self::default();
        for element in root.find_nested("Objects", "Object") {
            let mut record = build_record(element, registry);
            if !record.contains("SubIdx") {
                record.set("SubIdx", "");
            }

            // Phase 1: SubItems of a custom type, under the object's Index.
            if let Some(type_name) = record.data_type().filter(|t| is_custom_type(t)) {
                let data_type = types
                    .get(type_name)
                    .ok_or_else(|| EsiError::UnknownCustomDataType {
                        index: record.index().to_string(),
                        data_type: type_name.to_string(),
                    })?;
                for sub_item in data_type.sub_items() {
                    let mut expanded = sub_item.clone();
                    expanded.set("Index", record.index());
                    od.insert(expanded);
                }
            }

            // Phase 2: the literal object always lands last and wins collisions.
            od.insert(record);
        }
        Ok(od)
    }

    /// Inserts a record under its own (Index, SubIdx). Returns the replaced record.
    pub fn insert(&mut self, record: ObjectRecord) -> Option<ObjectRecord> {
        let key = ObjectKey::of(&record);
        match self.positions.get(&key) {
            Some(&pos) => {
                debug!("Object {}:{} overwritten", key.index, key.sub_index);
                Some(core::mem::replace(&mut self.entries[pos].1, record))
            }
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
                None
            }
        }
    }

    pub fn get(&self, index: &str, sub_index: &str) -> Option<&ObjectRecord> {
        let key = ObjectKey {
            index: index.to_string(),
            sub_index: sub_index.to_string(),
        };
        self.positions.get(&key).map(|&pos| &self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ObjectKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Records ordered numerically by Index, then SubIdx. Unparseable values
    /// sort first and keep their relative insertion order.
    pub fn sorted(&self) -> Vec<&ObjectRecord> {
        let mut records: Vec<&ObjectRecord> = self.iter().collect();
        records.sort_by_key(|r| (parse_number(r.index()), parse_number(r.sub_index())));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn record(index: &str, sub_index: &str, name: &str) -> ObjectRecord {
        let mut r = ObjectRecord::default();
        r.set("Index", index);
        r.set("SubIdx", sub_index);
        r.set("Name", name);
        r
    }

    #[test]
    fn test_custom_type_pattern() {
        assert!(is_custom_type("DT1018"));
        assert!(is_custom_type("DTF00A"));
        assert!(!is_custom_type("DT1c00"));
        assert!(!is_custom_type("DT10180"));
        assert!(!is_custom_type("DT101"));
        assert!(!is_custom_type("UDINT"));
        assert!(!is_custom_type("XT1018"));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut od = ObjectDictionary::default();
        assert!(od.insert(record("#x1000", "", "a")).is_none());
        assert!(od.insert(record("#x2000", "", "b")).is_none());
        let old = od.insert(record("#x1000", "", "c")).unwrap();
        assert_eq!(old.name(), Some("a"));

        let names: Vec<&str> = od.iter().filter_map(|r| r.name()).collect();
        assert_eq!(names, ["c", "b"]);
    }

    #[test]
    fn test_sorted_orders_numerically() {
        let mut od = ObjectDictionary::default();
        od.insert(record("#x1A00", "", "rx"));
        od.insert(record("#x1000", "", "type"));
        od.insert(record("#x1018", "2", "product"));
        od.insert(record("#x1018", "10", "ten"));
        od.insert(record("#x1018", "1", "vendor"));

        let names: Vec<&str> = od.sorted().iter().filter_map(|r| r.name()).collect();
        assert_eq!(names, ["type", "vendor", "product", "ten", "rx"]);
        // Insertion order is untouched
        assert_eq!(od.iter().next().unwrap().name(), Some("rx"));
    }

    #[test]
    fn test_expansion_inherits_index_and_literal_wins() {
        let root = parse_document(
            r#"<Profile><Dictionary>
                 <DataTypes>
                   <DataType>
                     <Name>DT1018</Name>
                     <SubItem><SubIdx>0</SubIdx><Name>Count</Name></SubItem>
                     <SubItem><SubIdx>1</SubIdx><Name>Vendor ID</Name></SubItem>
                   </DataType>
                 </DataTypes>
                 <Objects>
                   <Object><Index>#x1018</Index><Name>Identity</Name><Type>DT1018</Type><SubIdx>0</SubIdx></Object>
                 </Objects>
               </Dictionary></Profile>"#,
        )
        .unwrap();
        let mut fields = FieldRegistry::new();
        let types = DataTypeRegistry::from_document(&root, &mut fields).unwrap();
        let od = ObjectDictionary::from_document(&root, &types, &mut fields).unwrap();

        assert_eq!(od.len(), 2);
        assert_eq!(od.get("#x1018", "0").unwrap().name(), Some("Identity"));
        let vendor = od.get("#x1018", "1").unwrap();
        assert_eq!(vendor.name(), Some("Vendor ID"));
        assert_eq!(vendor.index(), "#x1018");
        // The DataType itself is not modified by expansion
        assert_eq!(types.get("DT1018").unwrap().sub_item("1").unwrap().index(), "");
    }

    #[test]
    fn test_unknown_custom_type_fails() {
        let root = parse_document(
            "<Objects><Object><Index>#x6000</Index><Type>DT6000</Type></Object></Objects>",
        )
        .unwrap();
        let mut fields = FieldRegistry::new();
        let types = DataTypeRegistry::from_document(&root, &mut fields).unwrap();
        let result = ObjectDictionary::from_document(&root, &types, &mut fields);
        assert!(matches!(
            result,
            Err(EsiError::UnknownCustomDataType { ref index, ref data_type })
                if index == "#x6000" && data_type == "DT6000"
        ));
    }
}
