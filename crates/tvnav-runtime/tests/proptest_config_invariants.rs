//! Property-based invariant tests for environment configuration parsing.
//!
//! 1. Any non-negative millisecond value parses; zero disables the ticker.
//! 2. Unknown tie-break and input-mode words are rejected with their key.
//! 3. Parsing ignores unrelated variables.

use std::collections::HashMap;
use std::time::Duration;

use proptest::prelude::*;
use tvnav_runtime::config::{
    ENV_GEOMETRY_REFRESH_MS, ENV_INPUT_MODE, ENV_POLL_TIMEOUT_MS, ENV_TIE_BREAK,
};
use tvnav_runtime::{ConfigError, NavigatorConfig};

fn parse(vars: &HashMap<String, String>) -> Result<NavigatorConfig, ConfigError> {
    NavigatorConfig::from_lookup(|key| vars.get(key).cloned())
}

fn vars(pairs: &[(&str, String)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

proptest! {
    #[test]
    fn millis_round_trip(refresh in 0u64..=86_400_000, poll in 0u64..=60_000) {
        let config = parse(&vars(&[
            (ENV_GEOMETRY_REFRESH_MS, refresh.to_string()),
            (ENV_POLL_TIMEOUT_MS, poll.to_string()),
        ]))
        .unwrap();
        let expected_refresh = (refresh > 0).then(|| Duration::from_millis(refresh));
        prop_assert_eq!(config.geometry_refresh, expected_refresh);
        prop_assert_eq!(config.poll_timeout, Duration::from_millis(poll));
    }

    #[test]
    fn unknown_words_are_rejected(word in "[a-z]{1,12}") {
        prop_assume!(!["registry", "lexicographic"].contains(&word.as_str()));
        let err = parse(&vars(&[(ENV_TIE_BREAK, word.clone())])).unwrap_err();
        prop_assert_eq!(err.key, ENV_TIE_BREAK);
        prop_assert_eq!(err.value, word.clone());

        prop_assume!(!["auto", "tv", "pointer"].contains(&word.as_str()));
        let err = parse(&vars(&[(ENV_INPUT_MODE, word.clone())])).unwrap_err();
        prop_assert_eq!(err.key, ENV_INPUT_MODE);
    }

    #[test]
    fn unrelated_variables_are_ignored(key in "[A-Z_]{1,20}", value in ".*") {
        prop_assume!(!key.starts_with("TVNAV_"));
        prop_assert_eq!(parse(&vars(&[(key.as_str(), value)])), Ok(NavigatorConfig::default()));
    }
}
