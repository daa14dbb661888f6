// crates/ethercat-esi/src/model/vendor.rs

use super::common::LocalizedTexts;
use alloc::string::String;
use serde::Deserialize;

/// Represents `<Vendor>`.
#[derive(Debug, Deserialize, Default)]
pub struct Vendor {
    /// The vendor ID, hex (`#x00000002`) or decimal.
    #[serde(rename = "Id", default)]
    pub id: String,

    #[serde(rename = "Name", default)]
    pub name: LocalizedTexts,
}
