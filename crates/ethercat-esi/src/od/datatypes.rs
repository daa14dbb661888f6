// crates/ethercat-esi/src/od/datatypes.rs

use super::record::{FieldRegistry, ObjectRecord, apply_child, build_record};
use crate::error::EsiError;
use crate::xml::Element;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, warn};

/// SubIdx given to a SubItem that has none, chosen to sort after real ones.
pub const MISSING_SUB_INDEX: &str = "99";

/// A `<DataType>` from the dictionary, with its SubItems in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataType {
    pub name: String,
    /// Fields of the DataType element itself (BitSize, BaseType, ...).
    pub record: ObjectRecord,
    sub_items: Vec<(String, ObjectRecord)>,
}

impl DataType {
    /// SubItem records in first-insertion order of their SubIdx.
    pub fn sub_items(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.sub_items.iter().map(|(_, record)| record)
    }

    pub fn sub_item(&self, sub_index: &str) -> Option<&ObjectRecord> {
        self.sub_items
            .iter()
            .find(|(key, _)| key == sub_index)
            .map(|(_, record)| record)
    }

    pub fn has_sub_items(&self) -> bool {
        !self.sub_items.is_empty()
    }

    /// Inserts under `sub_index`; a repeated SubIdx replaces the earlier record in place.
    fn insert_sub_item(&mut self, sub_index: String, record: ObjectRecord) {
        match self.sub_items.iter_mut().find(|(key, _)| *key == sub_index) {
            Some(slot) => slot.1 = record,
            None => self.sub_items.push((sub_index, record)),
        }
    }
}

/// All custom DataTypes of a document, by name.
#[derive(Debug, Clone, Default)]
pub struct DataTypeRegistry {
    types: BTreeMap<String, DataType>,
}

impl DataTypeRegistry {
    /// Reads every `DataTypes/DataType` element in the document.
    pub fn from_document(root: &Element, registry: &mut FieldRegistry) -> Result<Self, EsiError> {
        let mut types = Self::default();
        for element in root.find_nested("DataTypes", "DataType") {
            let data_type = parse_data_type(element, registry)?;
            if let Some(previous) = types.types.insert(data_type.name.clone(), data_type) {
                debug!("DataType {} defined more than once, keeping the last", previous.name);
            }
        }
        Ok(types)
    }

    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn parse_data_type(element: &Element, registry: &mut FieldRegistry) -> Result<DataType, EsiError> {
    let mut data_type = DataType::default();
    for child in &element.children {
        if child.tag == "SubItem" {
            let mut sub_item = build_record(child, registry);
            let present = sub_item
                .get("SubIdx")
                .filter(|s| !s.is_empty())
                .map(String::from);
            let sub_index = match present {
                Some(s) => s,
                None => {
                    warn!(
                        "SubItem {} lacks SubIdx node (array?)",
                        sub_item.name().unwrap_or_default()
                    );
                    sub_item.set("SubIdx", MISSING_SUB_INDEX);
                    String::from(MISSING_SUB_INDEX)
                }
            };
            data_type.insert_sub_item(sub_index, sub_item);
        } else {
            // Base fields register columns like any object field.
            apply_child(&mut data_type.record, child, registry);
        }
    }
    data_type.name = data_type
        .record
        .name()
        .filter(|n| !n.is_empty())
        .map(String::from)
        .ok_or(EsiError::MissingElement {
            element: "DataType/Name",
        })?;
    Ok(data_type)
}
