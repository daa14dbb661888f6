// src/lib.rs

#![no_std]
#![doc = "Reads EtherCAT Slave Information (ESI) XML files."]
#![doc = ""]
#![doc = "This `no_std + alloc` library turns an ESI file into two artifacts:"]
#![doc = ""]
#![doc = "- `load_object_dictionary_from_str`: the `Objects` and `DataTypes` of a"]
#![doc = "  device profile flattened into one table, rendered as CSV."]
#![doc = "- `generate_slave_code`: IEC 61131-3 Structured Text that registers each"]
#![doc = "  device's sync managers and FMMUs, plus packed PDO struct declarations."]

extern crate alloc;

// --- Crate Modules ---

pub mod codegen;
mod error;
pub mod literal;
mod model;
pub mod od;
mod parser;
mod resolver;
mod types;
mod xml;

// --- Public API Re-exports ---

pub use codegen::{CodegenOptions, SlaveCodeGenerator, generate_slave_code};
pub use error::EsiError;
pub use literal::{StandardTypeSizes, SyncManagerType, TypeSizes};
pub use od::{DictionaryDump, RowOrder, load_object_dictionary_from_str};
pub use parser::load_esi_from_str;
pub use types::{Device, EsiFile, FmmuDesc, Pdo, PdoEntry, SyncManagerDesc, Vendor};
pub use xml::{Element, parse_document};
