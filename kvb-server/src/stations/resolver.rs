//! Free-form station input resolution.
//!
//! User input arrives as a numeric id, an exact station name, or a
//! misspelled name. The input is classified once at the API boundary
//! into a [`StationRef`], then resolved against the directory:
//! id → exact case-insensitive name → fuzzy best match, first hit wins.

use serde::Deserialize;
use serde::de::Error as _;

use super::directory::{StationDirectory, StationId};
use super::error::StationError;
use super::fuzzy::token_set_ratio;

/// Fuzzy matches scoring below this are rejected as no-match rather
/// than returned as a spuriously confident "best" hit.
pub const MIN_FUZZY_SCORE: u8 = 40;

/// A station reference as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationRef {
    /// Numeric station id, taken at face value.
    ById(StationId),
    /// Station name, to be matched against the directory.
    ByName(String),
}

impl StationRef {
    /// Classify a free-form string: digit strings become ids,
    /// everything else is treated as a name.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<StationId>() {
            Ok(id) => StationRef::ById(id),
            Err(_) => StationRef::ByName(input.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for StationRef {
    /// Accepts a JSON number or string, so `{"station": 46}` and
    /// `{"station": "Neumarkt"}` both work.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Number(n) => {
                let id = n
                    .as_u64()
                    .or_else(|| n.as_f64().map(|f| f.trunc() as u64))
                    .ok_or_else(|| D::Error::custom("station id is not a valid number"))?;
                Ok(StationRef::ById(id as StationId))
            }
            serde_json::Value::String(s) => Ok(StationRef::parse(&s)),
            other => Err(D::Error::custom(format!(
                "station must be a number or string, got {other}"
            ))),
        }
    }
}

/// How the resolved station was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// Caller supplied the id directly.
    Id,
    /// Exact (case-insensitive) name match.
    Exact,
    /// Fuzzy best match with its similarity score.
    Fuzzy(u8),
}

/// A resolved (name, id) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStation {
    /// Canonical directory name; absent when an unknown id was supplied.
    pub name: Option<String>,
    pub id: StationId,
    pub confidence: Confidence,
}

/// Resolve a station reference against the directory.
///
/// Pure function of the directory and the input. Resolution order,
/// first match wins:
///
/// 1. An id is accepted directly; the name is derived via the inverse
///    lookup and may be absent for unknown ids.
/// 2. An exact case-insensitive name match returns that station.
/// 3. Otherwise the single highest token-set-similarity station wins,
///    ties broken by directory iteration order (deterministic for a
///    fixed directory). Scores below [`MIN_FUZZY_SCORE`] are rejected.
///
/// An empty directory resolves nothing by name.
pub fn resolve(
    directory: &StationDirectory,
    station: &StationRef,
) -> Result<ResolvedStation, StationError> {
    match station {
        StationRef::ById(id) => Ok(ResolvedStation {
            name: directory.by_id(*id).map(str::to_string),
            id: *id,
            confidence: Confidence::Id,
        }),
        StationRef::ByName(name) => {
            if let Some(id) = directory.by_name(name) {
                return Ok(ResolvedStation {
                    name: directory.by_id(id).map(str::to_string),
                    id,
                    confidence: Confidence::Exact,
                });
            }

            let mut best: Option<(&str, StationId, u8)> = None;
            for (key, &id) in directory.all() {
                let score = token_set_ratio(name, key);
                if best.is_none_or(|(_, _, best_score)| score > best_score) {
                    best = Some((key, id, score));
                }
            }

            match best {
                Some((key, id, score)) if score >= MIN_FUZZY_SCORE => Ok(ResolvedStation {
                    name: Some(key.to_string()),
                    id,
                    confidence: Confidence::Fuzzy(score),
                }),
                _ => Err(StationError::NoMatch {
                    input: name.clone(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn directory() -> StationDirectory {
        StationDirectory::from_map(BTreeMap::from([
            ("Drehbrücke".to_string(), 46),
            ("Neumarkt".to_string(), 2),
            ("Dom/Hbf".to_string(), 8),
            ("Porz Markt".to_string(), 177),
        ]))
    }

    #[test]
    fn parse_classifies_digits_as_id() {
        assert_eq!(StationRef::parse("46"), StationRef::ById(46));
        assert_eq!(StationRef::parse(" 46 "), StationRef::ById(46));
        assert_eq!(
            StationRef::parse("Neumarkt"),
            StationRef::ByName("Neumarkt".to_string())
        );
    }

    #[test]
    fn numeric_input_resolves_regardless_of_directory() {
        let resolved = resolve(&directory(), &StationRef::ById(9999)).unwrap();
        assert_eq!(resolved.id, 9999);
        assert_eq!(resolved.name, None);
        assert_eq!(resolved.confidence, Confidence::Id);
    }

    #[test]
    fn known_id_derives_name() {
        let resolved = resolve(&directory(), &StationRef::ById(46)).unwrap();
        assert_eq!(resolved.name.as_deref(), Some("Drehbrücke"));
    }

    #[test]
    fn exact_name_match_is_case_insensitive() {
        let resolved =
            resolve(&directory(), &StationRef::ByName("neumarkt".into())).unwrap();
        assert_eq!(resolved.id, 2);
        assert_eq!(resolved.name.as_deref(), Some("Neumarkt"));
        assert_eq!(resolved.confidence, Confidence::Exact);
    }

    #[test]
    fn exact_match_takes_precedence_over_fuzzy() {
        // "dom/hbf" is an exact hit even though "Dom/Hbf" would also be
        // the fuzzy winner.
        let resolved =
            resolve(&directory(), &StationRef::ByName("dom/hbf".into())).unwrap();
        assert_eq!(resolved.confidence, Confidence::Exact);
    }

    #[test]
    fn typo_resolves_to_fuzzy_best_match() {
        let resolved =
            resolve(&directory(), &StationRef::ByName("drehbrucke".into())).unwrap();
        assert_eq!(resolved.id, 46);
        assert_eq!(resolved.name.as_deref(), Some("Drehbrücke"));
        match resolved.confidence {
            Confidence::Fuzzy(score) => assert!(score >= 80, "score was {score}"),
            other => panic!("expected fuzzy match, got {other:?}"),
        }
    }

    #[test]
    fn fuzzy_resolution_is_deterministic() {
        let dir = directory();
        let first = resolve(&dir, &StationRef::ByName("markt".into())).unwrap();
        for _ in 0..10 {
            let again = resolve(&dir, &StationRef::ByName("markt".into())).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn hopeless_input_is_rejected() {
        let err = resolve(&directory(), &StationRef::ByName("xqzzy".into())).unwrap_err();
        assert!(matches!(err, StationError::NoMatch { .. }));
    }

    #[test]
    fn empty_directory_never_matches_names() {
        let dir = StationDirectory::from_map(BTreeMap::new());
        let err = resolve(&dir, &StationRef::ByName("Neumarkt".into())).unwrap_err();
        assert!(matches!(err, StationError::NoMatch { .. }));
    }

    #[test]
    fn deserialize_number_and_string() {
        let by_id: StationRef = serde_json::from_str("46").unwrap();
        assert_eq!(by_id, StationRef::ById(46));

        let numeric_string: StationRef = serde_json::from_str("\"46\"").unwrap();
        assert_eq!(numeric_string, StationRef::ById(46));

        let by_name: StationRef = serde_json::from_str("\"Neumarkt\"").unwrap();
        assert_eq!(by_name, StationRef::ByName("Neumarkt".to_string()));

        assert!(serde_json::from_str::<StationRef>("[1, 2]").is_err());
    }
}
