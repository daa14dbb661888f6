// crates/ethercat-esi/src/literal.rs

//! Conversion of ESI literal text into Structured Text literals, and the
//! static tables keyed by IEC 61131-3 elementary type names.

use crate::error::EsiError;
use alloc::format;
use alloc::string::{String, ToString};

/// Structured Text literal for `true`.
pub const ST_TRUE: &str = "TRUE";
/// Structured Text literal for `false`.
pub const ST_FALSE: &str = "FALSE";

/// Converts an ESI number (`#x0123` or `291`) into a Structured Text literal.
///
/// Hex values are re-emitted with the `16#` radix prefix; anything else is
/// assumed to be decimal and passed through.
pub fn normalize_number(xml_text: &str) -> String {
    let text = xml_text.trim();
    match text.strip_prefix("#x") {
        Some(digits) => format!("16#{}", digits),
        None => text.to_string(),
    }
}

/// Parses an ESI number (`#x0123` or `291`) into its value.
pub fn parse_number(xml_text: &str) -> Option<u64> {
    let text = xml_text.trim();
    match text.strip_prefix("#x") {
        Some(digits) => u64::from_str_radix(digits, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Converts an ESI boolean (`1`/`0`) into `TRUE`/`FALSE`.
pub fn normalize_bool(xml_text: &str) -> Result<&'static str, EsiError> {
    match xml_text.trim() {
        "1" => Ok(ST_TRUE),
        "0" => Ok(ST_FALSE),
        other => Err(EsiError::InvalidBooleanLiteral(other.to_string())),
    }
}

/// Direction keyword of a sync manager, as written in the text of `<Sm>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SyncManagerType {
    Inputs,
    Outputs,
    MBoxIn,
    MBoxOut,
}

impl SyncManagerType {
    /// Parses the exact keyword; no case folding.
    pub fn from_keyword(xml_text: &str) -> Result<Self, EsiError> {
        match xml_text {
            "Inputs" => Ok(Self::Inputs),
            "Outputs" => Ok(Self::Outputs),
            "MBoxIn" => Ok(Self::MBoxIn),
            "MBoxOut" => Ok(Self::MBoxOut),
            other => Err(EsiError::UnknownSyncManagerType(other.to_string())),
        }
    }

    /// The `usiType` code passed to `AddSyncManager`.
    pub fn code(self) -> u8 {
        match self {
            Self::Inputs => 0,
            Self::Outputs => 1,
            Self::MBoxIn => 2,
            Self::MBoxOut => 3,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Inputs => "Inputs",
            Self::Outputs => "Outputs",
            Self::MBoxIn => "MBoxIn",
            Self::MBoxOut => "MBoxOut",
        }
    }
}

/// Hungarian-notation prefix for PDO struct members.
///
/// `ARRAY [..] OF T` gets `a` followed by the prefix of `T`.
pub fn type_prefix(data_type: &str) -> Result<String, EsiError> {
    let data_type = data_type.trim();
    if data_type.starts_with("ARRAY ") {
        let element = data_type.rsplit(' ').next().unwrap_or_default();
        return Ok(format!("a{}", type_prefix(element)?));
    }
    let prefix = match data_type {
        "BOOL" | "BIT" => "x",
        "SINT" => "si",
        "INT" => "i",
        "DINT" => "di",
        "LINT" => "li",
        "USINT" => "usi",
        "BYTE" => "by",
        "UINT" => "ui",
        "WORD" => "w",
        "UDINT" => "udi",
        "DWORD" => "dw",
        "ULINT" => "uli",
        "LWORD" => "lw",
        "REAL" => "r",
        "LREAL" => "lr",
        t if t == "STRING" || t.starts_with("STRING(") => "s",
        other => return Err(EsiError::UnknownDataType(other.to_string())),
    };
    Ok(prefix.to_string())
}

/// Byte size of a PDO entry's data type, as laid out in a packed struct.
///
/// Implementations are injected into the code generator so targets with a
/// different memory layout can supply their own table.
pub trait TypeSizes {
    fn byte_size(&self, data_type: &str) -> Result<usize, EsiError>;
}

/// Sizes of the IEC 61131-3 elementary types with `pack_mode := 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTypeSizes;

/// Length of a plain `STRING` without an explicit size, plus the terminator.
const DEFAULT_STRING_BYTES: usize = 81;

impl TypeSizes for StandardTypeSizes {
    fn byte_size(&self, data_type: &str) -> Result<usize, EsiError> {
        let data_type = data_type.trim();
        if data_type.starts_with("ARRAY ") {
            return array_size(self, data_type);
        }
        if let Some(len) = data_type
            .strip_prefix("STRING(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let chars: usize = len
                .trim()
                .parse()
                .map_err(|_| EsiError::UnknownDataType(data_type.to_string()))?;
            return chars
                .checked_add(1)
                .ok_or_else(|| EsiError::SizeOverflow(data_type.to_string()));
        }
        let size = match data_type {
            "BOOL" | "BIT" | "SINT" | "USINT" | "BYTE" => 1,
            "INT" | "UINT" | "WORD" => 2,
            "DINT" | "UDINT" | "DWORD" | "REAL" => 4,
            "LINT" | "ULINT" | "LWORD" | "LREAL" => 8,
            "STRING" => DEFAULT_STRING_BYTES,
            other => return Err(EsiError::UnknownDataType(other.to_string())),
        };
        Ok(size)
    }
}

/// `ARRAY [lo..hi] OF T` => `(hi - lo + 1) * size(T)`.
fn array_size(sizes: &impl TypeSizes, data_type: &str) -> Result<usize, EsiError> {
    let unknown = || EsiError::UnknownDataType(data_type.to_string());
    let open = data_type.find('[').ok_or_else(unknown)?;
    let close = data_type.find(']').ok_or_else(unknown)?;
    let (lo, hi) = data_type
        .get(open + 1..close)
        .and_then(|bounds| bounds.split_once(".."))
        .ok_or_else(unknown)?;
    let lo: i64 = lo.trim().parse().map_err(|_| unknown())?;
    let hi: i64 = hi.trim().parse().map_err(|_| unknown())?;
    if hi < lo {
        return Err(unknown());
    }
    let element = data_type.rsplit(' ').next().unwrap_or_default();
    let overflow = || EsiError::SizeOverflow(data_type.to_string());
    let count = hi
        .checked_sub(lo)
        .and_then(|span| span.checked_add(1))
        .and_then(|count| usize::try_from(count).ok())
        .ok_or_else(overflow)?;
    count
        .checked_mul(sizes.byte_size(element)?)
        .ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_number() {
        assert_eq!(normalize_number("#x1A2B"), "16#1A2B");
        assert_eq!(normalize_number("123"), "123");
        assert_eq!(normalize_number(" #x0 "), "16#0");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("#x1A00"), Some(0x1A00));
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("#xZZ"), None);
    }

    #[test]
    fn test_normalize_bool() {
        assert_eq!(normalize_bool("1").unwrap(), "TRUE");
        assert_eq!(normalize_bool("0").unwrap(), "FALSE");
        assert!(matches!(
            normalize_bool("2"),
            Err(EsiError::InvalidBooleanLiteral(ref s)) if s == "2"
        ));
        assert!(matches!(
            normalize_bool("true"),
            Err(EsiError::InvalidBooleanLiteral(_))
        ));
    }

    #[test]
    fn test_sync_manager_codes_are_a_bijection() {
        let all = [
            SyncManagerType::Inputs,
            SyncManagerType::Outputs,
            SyncManagerType::MBoxIn,
            SyncManagerType::MBoxOut,
        ];
        for (expected, ty) in all.iter().enumerate() {
            assert_eq!(ty.code() as usize, expected);
            assert_eq!(SyncManagerType::from_keyword(ty.keyword()).unwrap(), *ty);
        }
        for bad in ["inputs", "Output", "MBoxState", ""] {
            assert!(matches!(
                SyncManagerType::from_keyword(bad),
                Err(EsiError::UnknownSyncManagerType(_))
            ));
        }
    }

    #[test]
    fn test_type_prefix() {
        assert_eq!(type_prefix("BOOL").unwrap(), "x");
        assert_eq!(type_prefix("UDINT").unwrap(), "udi");
        assert_eq!(type_prefix("ARRAY [0..3] OF BYTE").unwrap(), "aby");
        assert_eq!(type_prefix("ARRAY [0..1] OF ARRAY [0..1] OF INT").unwrap(), "ai");
        assert!(matches!(
            type_prefix("FLOAT32"),
            Err(EsiError::UnknownDataType(ref s)) if s == "FLOAT32"
        ));
        assert!(matches!(
            type_prefix("ARRAY [0..3] OF WIDGET"),
            Err(EsiError::UnknownDataType(_))
        ));
    }

    #[test]
    fn test_standard_type_sizes() {
        let sizes = StandardTypeSizes;
        assert_eq!(sizes.byte_size("BOOL").unwrap(), 1);
        assert_eq!(sizes.byte_size("UINT").unwrap(), 2);
        assert_eq!(sizes.byte_size("REAL").unwrap(), 4);
        assert_eq!(sizes.byte_size("LWORD").unwrap(), 8);
        assert_eq!(sizes.byte_size("STRING(10)").unwrap(), 11);
        assert_eq!(sizes.byte_size("ARRAY [0..3] OF UDINT").unwrap(), 16);
        assert_eq!(sizes.byte_size("ARRAY [1..2] OF BYTE").unwrap(), 2);
        assert!(matches!(
            sizes.byte_size("ARRAY [3..1] OF BYTE"),
            Err(EsiError::UnknownDataType(_))
        ));
        assert!(matches!(
            sizes.byte_size("WIDGET"),
            Err(EsiError::UnknownDataType(_))
        ));
    }

    #[test]
    fn test_oversized_arrays_are_rejected() {
        let sizes = StandardTypeSizes;
        assert!(matches!(
            sizes.byte_size("ARRAY [0..4611686018427387904] OF LWORD"),
            Err(EsiError::SizeOverflow(ref t)) if t == "ARRAY [0..4611686018427387904] OF LWORD"
        ));
        assert!(matches!(
            sizes.byte_size("ARRAY [-9223372036854775808..0] OF BYTE"),
            Err(EsiError::SizeOverflow(_))
        ));
        assert!(matches!(
            sizes.byte_size("ARRAY [-9223372036854775808..9223372036854775807] OF BYTE"),
            Err(EsiError::SizeOverflow(_))
        ));
        assert!(matches!(
            sizes.byte_size("STRING(18446744073709551615)"),
            Err(EsiError::SizeOverflow(_))
        ));
    }
}
