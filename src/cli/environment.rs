//! Detection of development mode and CI runners from environment variables

use std::env;

/// Variables set by common CI providers
const CI_VARIABLES: &[&str] = &[
    "CI",
    "CONTINUOUS_INTEGRATION",
    "BUILD_NUMBER",
    "RUN_ID",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "JENKINS_URL",
    "BUILDKITE",
    "TEAMCITY_VERSION",
    "TF_BUILD",
];

/// What the process environment says about how we are running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunEnvironment {
    /// `NODE_ENV` or `WKSTD_ENV` is `development`
    pub development: bool,

    /// Running under a CI provider
    pub ci: bool,
}

impl RunEnvironment {
    /// Reads the current process environment
    pub fn detect() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let development = ["WKSTD_ENV", "NODE_ENV"]
            .into_iter()
            .any(|name| lookup(name).is_some_and(|v| v == "development"));

        let ci = CI_VARIABLES.iter().copied().any(|name| {
            lookup(name).is_some_and(|v| !v.is_empty() && v != "false" && v != "0")
        });

        Self { development, ci }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(vars: &[(&str, &str)]) -> RunEnvironment {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunEnvironment::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment() {
        assert_eq!(env_of(&[]), RunEnvironment::default());
    }

    #[test]
    fn node_env_development() {
        let env = env_of(&[("NODE_ENV", "development")]);
        assert!(env.development);
        assert!(!env.ci);
    }

    #[test]
    fn production_is_not_development() {
        assert!(!env_of(&[("NODE_ENV", "production")]).development);
    }

    #[test]
    fn ci_providers_detected() {
        assert!(env_of(&[("GITHUB_ACTIONS", "true")]).ci);
        assert!(env_of(&[("JENKINS_URL", "http://ci.local/")]).ci);
    }

    #[test]
    fn ci_false_is_ignored() {
        assert!(!env_of(&[("CI", "false")]).ci);
        assert!(!env_of(&[("CI", "0")]).ci);
    }
}
