// crates/ethercat-esi/src/model/common.rs

//! Contains common helper structs shared by the ESI elements.

use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

/// Windows LCID for US English, the language preferred when picking a name.
pub const LCID_EN_US: &str = "1033";

/// Represents `<Name LcId="1033">Value</Name>`; also used for `<Comment>`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LocalizedText {
    #[serde(rename = "@LcId", default)]
    pub lc_id: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Picks the English text if present, otherwise the first one.
pub(crate) fn preferred_text(texts: &[LocalizedText]) -> Option<&str> {
    texts
        .iter()
        .find(|t| t.lc_id.as_deref() == Some(LCID_EN_US))
        .or_else(|| texts.first())
        .map(|t| t.value.trim())
}

/// Helper for texts that may be repeated per language.
pub(crate) type LocalizedTexts = Vec<LocalizedText>;
