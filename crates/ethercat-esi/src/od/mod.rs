// crates/ethercat-esi/src/od/mod.rs

//! The object dictionary path: ESI `Objects` and `DataTypes` flattened into
//! uniform records and rendered as a table.
//!
//! Records are built in two passes over the element tree. The first pass
//! indexes every custom `DataType`; the second flattens each `Object` and
//! expands the ones typed `DTxxxx` into their SubItems. Every field name met
//! along the way is added to a shared [`FieldRegistry`], which later becomes
//! the CSV header.

mod csv;
mod datatypes;
mod dictionary;
mod record;

pub use csv::write_csv;
pub use datatypes::{DataType, DataTypeRegistry, MISSING_SUB_INDEX};
pub use dictionary::{ObjectDictionary, ObjectKey, is_custom_type};
pub use record::{CORE_FIELDS, FieldRegistry, ObjectRecord, build_record};

use crate::error::EsiError;
use crate::xml;
use alloc::string::String;
use log::info;

/// Row order of a rendered dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// The order records were inserted while reading the file.
    #[default]
    Insertion,
    /// Numerically by Index, then SubIdx.
    Sorted,
}

/// Everything read on the dictionary path of one ESI file.
#[derive(Debug, Clone, Default)]
pub struct DictionaryDump {
    pub fields: FieldRegistry,
    pub data_types: DataTypeRegistry,
    pub dictionary: ObjectDictionary,
}

impl DictionaryDump {
    /// Renders the dictionary as CSV with the registry as header.
    pub fn to_csv(&self, order: RowOrder) -> Result<String, EsiError> {
        match order {
            RowOrder::Insertion => write_csv(&self.fields, self.dictionary.iter()),
            RowOrder::Sorted => write_csv(&self.fields, self.dictionary.sorted()),
        }
    }
}

/// Reads the DataTypes and Objects of an ESI document.
///
/// # Errors
/// Returns an `EsiError` if the XML is malformed, a DataType has no name, or
/// an Object references a DataType the file does not define.
pub fn load_object_dictionary_from_str(xml_content: &str) -> Result<DictionaryDump, EsiError> {
    let root = xml::parse_document(xml_content)?;
    let mut fields = FieldRegistry::new();

    let data_types = DataTypeRegistry::from_document(&root, &mut fields)?;
    info!("{} DataTypes", data_types.len());

    let dictionary = ObjectDictionary::from_document(&root, &data_types, &mut fields)?;
    info!("{} Objects and sub-Objects", dictionary.len());

    Ok(DictionaryDump {
        fields,
        data_types,
        dictionary,
    })
}
