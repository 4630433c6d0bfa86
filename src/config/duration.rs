//! Duration scalar with dual-format deserialization

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Duration scalar used throughout the input model.
///
/// Deserializes from either a duration string such as "250ms" or "1m30s",
/// or a bare number of nanoseconds (the form older clients emit); always
/// serializes back to the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl Duration {
    pub fn as_std(self) -> std::time::Duration {
        self.0
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Self(d)
    }
}

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(self.0).to_string())
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Nanos(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Nanos(n) => {
                if !n.is_finite() || n < 0.0 {
                    return Err(serde::de::Error::custom("invalid duration"));
                }
                Ok(Duration(std::time::Duration::from_nanos(n as u64)))
            }
            Repr::Text(s) => humantime::parse_duration(&s)
                .map(Duration)
                .map_err(serde::de::Error::custom),
        }
    }
}
