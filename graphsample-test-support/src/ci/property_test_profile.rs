//! Property-test case budget for CI and local overrides.
//!
//! Suites pass their own default and let `GRAPHSAMPLE_PBT_CASES` raise or
//! lower it for every suite at once.

use std::env;

/// Environment variable overriding the number of proptest cases.
pub const GRAPHSAMPLE_PBT_CASES_ENV_KEY: &str = "GRAPHSAMPLE_PBT_CASES";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
}

impl ProptestRunProfile {
    /// Loads the profile from the environment, falling back to
    /// `default_cases` when the override is missing or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use graphsample_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32) -> Self {
        Self::load_with_lookup(default_cases, |key| env::var(key).ok())
    }

    fn load_with_lookup<F>(default_cases: u32, lookup: F) -> Self
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let cases = match lookup(GRAPHSAMPLE_PBT_CASES_ENV_KEY) {
            Some(raw) => parse_cases(&raw).unwrap_or_else(|reason| {
                tracing::warn!(
                    env = GRAPHSAMPLE_PBT_CASES_ENV_KEY,
                    raw = %raw,
                    reason = %reason,
                    fallback = default_cases,
                    "invalid property-test case override; using default",
                );
                default_cases
            }),
            None => default_cases,
        };
        Self { cases }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}
