//! Backend record identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a backend record (event, office, office head, requirement, ...).
///
/// The backend hands out numeric primary keys; the client never mints them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("RecordId: {}: {}", s, e)))?;
        Ok(Self(value))
    }
}

/// Parse a comma separated list of identifiers (`"3, 7,11"`), preserving order.
///
/// Empty segments are ignored; an entirely empty list is a validation error.
pub fn parse_id_list(input: &str) -> Result<Vec<RecordId>, DomainError> {
    let ids = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RecordId::from_str)
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(DomainError::validation("at least one identifier is required"));
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_value(RecordId::new(42)).unwrap();
        assert_eq!(json, serde_json::json!(42));

        let back: RecordId = serde_json::from_value(serde_json::json!(7)).unwrap();
        assert_eq!(back, RecordId::new(7));
    }

    #[test]
    fn rejects_non_numeric_id() {
        let err = "abc".parse::<RecordId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.contains("abc")));
    }

    #[test]
    fn id_list_keeps_order_and_skips_blanks() {
        let ids = parse_id_list(" 3, 7,,11 ").unwrap();
        assert_eq!(
            ids,
            vec![RecordId::new(3), RecordId::new(7), RecordId::new(11)]
        );
    }

    #[test]
    fn empty_id_list_is_rejected() {
        assert!(matches!(parse_id_list(" , "), Err(DomainError::Validation(_))));
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(n in any::<i64>()) {
            let id = RecordId::new(n);
            prop_assert_eq!(id.to_string().parse::<RecordId>().unwrap(), id);
        }

        #[test]
        fn id_list_preserves_every_element(values in prop::collection::vec(any::<i64>(), 1..20)) {
            let joined = values.iter().map(i64::to_string).collect::<Vec<_>>().join(",");
            let parsed = parse_id_list(&joined).unwrap();
            prop_assert_eq!(parsed.into_iter().map(i64::from).collect::<Vec<_>>(), values);
        }
    }
}
