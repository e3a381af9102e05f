use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

/// Requested visible lifetime of a notification.
///
/// Serialized as a number of milliseconds, or the string `"infinite"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LifetimeRepr", into = "LifetimeRepr")]
pub enum Lifetime {
    Finite(Duration),
    Infinite,
}

impl Lifetime {
    pub const fn from_millis(ms: u64) -> Self {
        Lifetime::Finite(Duration::from_millis(ms))
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Lifetime::Finite(_))
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Lifetime::Finite(d) => Some(*d),
            Lifetime::Infinite => None,
        }
    }
}

impl From<Duration> for Lifetime {
    fn from(value: Duration) -> Self {
        Lifetime::Finite(value)
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifetime::Finite(d) => write!(f, "{}ms", d.as_millis()),
            Lifetime::Infinite => write!(f, "infinite"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum LifetimeRepr {
    Millis(u64),
    Keyword(String),
}

impl TryFrom<LifetimeRepr> for Lifetime {
    type Error = String;

    fn try_from(value: LifetimeRepr) -> Result<Self, Self::Error> {
        match value {
            LifetimeRepr::Millis(ms) => Ok(Lifetime::from_millis(ms)),
            LifetimeRepr::Keyword(s) if s.eq_ignore_ascii_case("infinite") => {
                Ok(Lifetime::Infinite)
            }
            LifetimeRepr::Keyword(s) => Err(format!("invalid duration '{}'", s)),
        }
    }
}

impl From<Lifetime> for LifetimeRepr {
    fn from(value: Lifetime) -> Self {
        match value {
            Lifetime::Finite(d) => {
                LifetimeRepr::Millis(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            }
            Lifetime::Infinite => LifetimeRepr::Keyword("infinite".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime_from_millis() {
        assert_eq!(
            Lifetime::from_millis(1500).as_duration(),
            Some(Duration::from_millis(1500))
        );
        assert!(Lifetime::from_millis(0).is_finite());
        assert_eq!(Lifetime::Infinite.as_duration(), None);
    }

    #[test]
    fn test_lifetime_deserialization() {
        let finite: Lifetime = serde_json::from_str("2000").unwrap();
        assert_eq!(finite, Lifetime::from_millis(2000));

        let infinite: Lifetime = serde_json::from_str("\"infinite\"").unwrap();
        assert_eq!(infinite, Lifetime::Infinite);

        assert!(serde_json::from_str::<Lifetime>("\"soon\"").is_err());
    }

    #[test]
    fn test_lifetime_serialization() {
        assert_eq!(
            serde_json::to_string(&Lifetime::from_millis(6000)).unwrap(),
            "6000"
        );
        assert_eq!(
            serde_json::to_string(&Lifetime::Infinite).unwrap(),
            "\"infinite\""
        );
    }

    #[test]
    fn test_lifetime_display() {
        assert_eq!(Lifetime::from_millis(250).to_string(), "250ms");
        assert_eq!(Lifetime::Infinite.to_string(), "infinite");
    }
}
