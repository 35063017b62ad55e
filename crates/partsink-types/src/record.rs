//! Record measurement and partition identity.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Position of a partition within one run (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionId(u32);

impl PartitionId {
    /// Create a new partition identifier.
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw partition index.
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PartitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PartitionId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// ---------------------------------------------------------------------------
// Length measurement
// ---------------------------------------------------------------------------

/// Unit used to measure a record against the chunk size threshold.
///
/// The sink's limit is not documented in terms of a specific unit, so the
/// measurement is configurable. `Utf16` counts UTF-16 code units, which is
/// what JVM-hosted sinks compare against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    /// UTF-8 encoded bytes.
    Bytes,
    /// Unicode scalar values.
    #[default]
    Chars,
    /// UTF-16 code units.
    Utf16,
}

impl LengthUnit {
    /// Measure one record.
    #[must_use]
    pub fn measure(self, record: &str) -> usize {
        match self {
            Self::Bytes => record.len(),
            Self::Chars => record.chars().count(),
            Self::Utf16 => record.encode_utf16().count(),
        }
    }

    /// Wire-format string used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Chars => "chars",
            Self::Utf16 => "utf16",
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_measures_the_same_in_every_unit() {
        for unit in [LengthUnit::Bytes, LengthUnit::Chars, LengthUnit::Utf16] {
            assert_eq!(unit.measure("abcde"), 5, "unit {unit}");
        }
    }

    #[test]
    fn multibyte_text_differs_by_unit() {
        // "é" is 2 bytes / 1 char / 1 utf16 unit; "😀" is 4 / 1 / 2.
        let s = "é😀";
        assert_eq!(LengthUnit::Bytes.measure(s), 6);
        assert_eq!(LengthUnit::Chars.measure(s), 2);
        assert_eq!(LengthUnit::Utf16.measure(s), 3);
    }

    #[test]
    fn default_unit_is_chars() {
        assert_eq!(LengthUnit::default(), LengthUnit::Chars);
    }

    #[test]
    fn length_unit_deserializes_snake_case() {
        let unit: LengthUnit = serde_json::from_str("\"utf16\"").unwrap();
        assert_eq!(unit, LengthUnit::Utf16);
        assert!(serde_json::from_str::<LengthUnit>("\"words\"").is_err());
    }

    #[test]
    fn partition_id_displays_index() {
        assert_eq!(PartitionId::new(7).to_string(), "7");
        assert_eq!(PartitionId::from(3).index(), 3);
    }
}
