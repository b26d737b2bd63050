/// Source of the bearer credential for API calls.
///
/// Issuing and signing the credential happens elsewhere; implementations only
/// hand out the current value.
pub trait TokenProvider {
    fn token(&self) -> anyhow::Result<String>;
}

/// A pre-issued token held for the whole run.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read the token from an environment variable. Missing or blank is an error.
    pub fn from_env(var: &str) -> anyhow::Result<Self> {
        match std::env::var(var) {
            Ok(v) if !v.trim().is_empty() => Ok(Self(v.trim().to_string())),
            _ => anyhow::bail!("credential missing: set the {var} environment variable"),
        }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}
