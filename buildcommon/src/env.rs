//! Environment lookup
//!
//! Reads of the process environment go through [`EnvSource`], so the
//! resolution logic can be driven by an in-memory map in tests.

use rustc_hash::FxHashMap;

/// Source of environment variables
pub trait EnvSource {
    /// Get the value of a variable, or `None` if it is not set
    fn get(&self, key: &str) -> Option<String>;

    /// Get the value of a variable. Unset and non-unicode values are empty
    fn var(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }
}

/// The environment of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment
pub type EnvMap = FxHashMap<String, String>;

impl EnvSource for EnvMap {
    fn get(&self, key: &str) -> Option<String> {
        FxHashMap::get(self, key).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Build an [`EnvMap`] from key-value pairs
pub fn env_map<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> EnvMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_is_empty() {
        let env = env_map([("GITHUB_SHA", "abc123")]);
        assert_eq!(env.var("GITHUB_SHA"), "abc123");
        assert_eq!(env.var("GITHUB_RUN_ID"), "");
        assert_eq!(env.get("GITHUB_RUN_ID"), None);
    }

    #[test]
    fn reference_forwards_lookup() {
        let env = env_map([("GITHUB_REF", "refs/heads/main")]);
        let by_ref = &env;
        assert_eq!(by_ref.var("GITHUB_REF"), "refs/heads/main");
    }

    #[test]
    fn process_env_reads_path() {
        // PATH is set in every test harness we run in
        assert!(ProcessEnv.get("PATH").is_some());
    }
}
