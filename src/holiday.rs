// 📅 Holiday Record - the single normalized entity both sources produce
// Serialized form: {"date": "YYYY-MM-DD", "name": "...", "is_national": 0|1}

use serde::{Deserialize, Serialize};

/// HolidayRecord - one holiday on one calendar day
/// Fields are never mutated after construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// Day-precision date, always `YYYY-MM-DD` (zero-padded)
    pub date: String,

    /// Display label; may be empty when the source row was malformed
    pub name: String,

    /// National holiday vs. regional / joint-leave / informational entry
    #[serde(with = "national_flag")]
    pub is_national: bool,
}

impl HolidayRecord {
    pub fn new(date: impl Into<String>, name: impl Into<String>, is_national: bool) -> Self {
        HolidayRecord {
            date: date.into(),
            name: name.into(),
            is_national,
        }
    }

    /// Build the `YYYY-MM-DD` key from its parts
    pub fn format_date(year: i32, month_code: &str, day: u32) -> String {
        format!("{:04}-{}-{:02}", year, month_code, day)
    }
}

// ============================================================================
// is_national <-> 0/1
// ============================================================================

/// Downstream consumers read `is_national` as an integer
mod national_flag {
    use serde::de::{self, Deserializer, Unexpected};
    use serde::{Deserialize, Serializer};

    pub fn serialize<S>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*flag))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::invalid_value(
                Unexpected::Unsigned(other as u64),
                &"0 or 1",
            )),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
