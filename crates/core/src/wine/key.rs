//! Partition key typing, coercion of path parameters, and id generation.

use std::str::FromStr;

use rand::Rng;
use uuid::Uuid;

use super::WineId;

/// Largest id generated for numeric tables. Keeps ids exact when handled as
/// JSON numbers by clients.
pub(crate) const MAX_SAFE_ID: i64 = (1 << 53) - 1;

/// Declared storage type of the partition key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyType {
    /// Numeric key (`"N"`).
    #[default]
    Number,
    /// String key (`"S"`).
    Text,
}

impl KeyType {
    /// The type tag used in table schemas.
    pub fn tag(&self) -> &'static str {
        match self {
            KeyType::Number => "N",
            KeyType::Text => "S",
        }
    }
}

impl FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "N" | "n" => Ok(KeyType::Number),
            "S" | "s" => Ok(KeyType::Text),
            other => Err(format!("Unknown key type: {other}")),
        }
    }
}

/// Outcome of converting a textual id into the table's key type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercedKey {
    Id(WineId),
    /// A numeric key was expected but the input had no leading integer.
    /// Matches no stored record.
    NotANumber,
}

impl CoercedKey {
    /// Normalizes an id taken from a request body to the table's key type.
    pub fn from_id(id: WineId, key_type: KeyType) -> Self {
        match (id, key_type) {
            (WineId::Number(n), KeyType::Number) => CoercedKey::Id(WineId::Number(n)),
            (WineId::Number(n), KeyType::Text) => CoercedKey::Id(WineId::Text(n.to_string())),
            (WineId::Text(s), key_type) => coerce_key(&s, key_type),
        }
    }

    pub fn id(&self) -> Option<&WineId> {
        match self {
            CoercedKey::Id(id) => Some(id),
            CoercedKey::NotANumber => None,
        }
    }
}

/// Converts a path parameter into the table's key type.
///
/// Numeric keys use a leading-integer parse; text keys pass through unchanged.
pub fn coerce_key(param: &str, key_type: KeyType) -> CoercedKey {
    match key_type {
        KeyType::Number => parse_leading_integer(param)
            .map(|n| CoercedKey::Id(WineId::Number(n)))
            .unwrap_or(CoercedKey::NotANumber),
        KeyType::Text => CoercedKey::Id(WineId::Text(param.to_string())),
    }
}

/// Parses the integer prefix of `s`.
///
/// Leading whitespace and a single sign are accepted, then decimal digits up to
/// the first non-digit. Returns `None` when no digit is found or the value does
/// not fit in an `i64`.
pub(crate) fn parse_leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return None;
    }

    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Generates a fresh id of the given key type.
pub fn generate_id(key_type: KeyType) -> WineId {
    match key_type {
        KeyType::Number => WineId::Number(rand::rng().random_range(1..=MAX_SAFE_ID)),
        KeyType::Text => WineId::Text(Uuid::new_v4().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_path_param_coerces_to_integer() {
        assert_eq!(
            coerce_key("7", KeyType::Number),
            CoercedKey::Id(WineId::Number(7))
        );
    }

    #[test]
    fn test_non_numeric_path_param_is_not_a_number() {
        assert_eq!(coerce_key("abc", KeyType::Number), CoercedKey::NotANumber);
        assert_eq!(coerce_key("", KeyType::Number), CoercedKey::NotANumber);
        assert_eq!(coerce_key("-", KeyType::Number), CoercedKey::NotANumber);
    }

    #[test]
    fn test_text_key_passes_through() {
        assert_eq!(
            coerce_key("abc", KeyType::Text),
            CoercedKey::Id(WineId::Text("abc".to_string()))
        );
    }

    #[test]
    fn test_parse_leading_integer_prefixes() {
        assert_eq!(parse_leading_integer("42abc"), Some(42));
        assert_eq!(parse_leading_integer("  12"), Some(12));
        assert_eq!(parse_leading_integer("-3"), Some(-3));
        assert_eq!(parse_leading_integer("+5"), Some(5));
        assert_eq!(parse_leading_integer("3.9"), Some(3));
        assert_eq!(parse_leading_integer("007"), Some(7));
    }

    #[test]
    fn test_parse_leading_integer_rejects_overflow() {
        assert_eq!(parse_leading_integer("99999999999999999999999"), None);
    }

    #[test]
    fn test_from_id_normalizes_body_ids() {
        assert_eq!(
            CoercedKey::from_id(WineId::Text("15".to_string()), KeyType::Number),
            CoercedKey::Id(WineId::Number(15))
        );
        assert_eq!(
            CoercedKey::from_id(WineId::Number(15), KeyType::Text),
            CoercedKey::Id(WineId::Text("15".to_string()))
        );
        assert_eq!(
            CoercedKey::from_id(WineId::Text("nope".to_string()), KeyType::Number),
            CoercedKey::NotANumber
        );
    }

    #[test]
    fn test_key_type_from_str() {
        assert_eq!("N".parse::<KeyType>().unwrap(), KeyType::Number);
        assert_eq!("S".parse::<KeyType>().unwrap(), KeyType::Text);
        assert!("B".parse::<KeyType>().is_err());
        assert_eq!(KeyType::default().tag(), "N");
    }

    #[test]
    fn test_generated_ids_match_key_type() {
        match generate_id(KeyType::Number) {
            WineId::Number(n) => assert!((1..=MAX_SAFE_ID).contains(&n)),
            other => panic!("expected numeric id, got {other:?}"),
        }

        match generate_id(KeyType::Text) {
            WineId::Text(s) => {
                Uuid::parse_str(&s).expect("Should be valid UUID");
            }
            other => panic!("expected text id, got {other:?}"),
        }
    }

    #[test]
    fn test_generated_numeric_ids_round_trip_through_coercion() {
        let id = generate_id(KeyType::Number);
        assert_eq!(
            coerce_key(&id.to_string(), KeyType::Number),
            CoercedKey::Id(id)
        );
    }
}
