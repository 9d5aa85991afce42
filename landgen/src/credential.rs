//! API credential lookup
//!
//! The credential comes from the process environment, is read once per run and
//! is never written to logs: its `Debug` output is redacted.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

/// Key-value lookup over process-wide configuration
pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

impl<E: Env + ?Sized> Env for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Env for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Opaque API secret
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Resolve the credential from `key`; unset and blank values count as absent
    pub fn resolve(env: &impl Env, key: &str) -> Option<Self> {
        debug!(%key, "Credential::resolve: called");
        env.var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Self)
    }

    /// Raw secret, for the outbound request header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_resolve_present() {
        let credential = Credential::resolve(&env(&[("GEMINI_API_KEY", "abc123")]), "GEMINI_API_KEY");
        assert_eq!(credential, Some(Credential::new("abc123")));
    }

    #[test]
    fn test_resolve_missing_or_blank() {
        assert!(Credential::resolve(&env(&[]), "GEMINI_API_KEY").is_none());
        assert!(Credential::resolve(&env(&[("GEMINI_API_KEY", "")]), "GEMINI_API_KEY").is_none());
        assert!(Credential::resolve(&env(&[("GEMINI_API_KEY", "  \n")]), "GEMINI_API_KEY").is_none());
    }

    #[test]
    fn test_resolve_uses_configured_key() {
        let pairs = env(&[("OTHER_KEY", "xyz")]);
        assert!(Credential::resolve(&pairs, "GEMINI_API_KEY").is_none());
        assert_eq!(Credential::resolve(&pairs, "OTHER_KEY"), Some(Credential::new("xyz")));
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::new("super-secret");
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("super-secret"));
        assert_eq!(rendered, "Credential(<redacted>)");
    }

    #[test]
    #[serial]
    fn test_process_env() {
        let key = "LANDGEN_TEST_CREDENTIAL";
        // SAFETY: serialized with every other test that touches the environment
        unsafe { std::env::set_var(key, "from-process") };
        assert_eq!(
            Credential::resolve(&ProcessEnv, key),
            Some(Credential::new("from-process"))
        );

        unsafe { std::env::remove_var(key) };
        assert!(Credential::resolve(&ProcessEnv, key).is_none());
    }
}
