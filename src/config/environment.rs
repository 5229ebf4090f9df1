//! Target environment selection.

use std::fmt;
use std::str::FromStr;

/// Production REST endpoint.
pub const PRODUCTION_BASE_URL: &str = "https://openapi-api.alibaba.com/rest";

/// Sandbox REST endpoint.
pub const SANDBOX_BASE_URL: &str = "https://openapi-api-sandbox.alibaba.com/rest";

/// The Alibaba Open Platform environment requests are sent to.
///
/// # Example
///
/// ```rust
/// use alibaba_api::Environment;
///
/// let env: Environment = "sandbox".parse().unwrap();
/// assert_eq!(env, Environment::Sandbox);
/// assert_eq!(env.to_string(), "sandbox");
/// assert!(env.base_url().contains("sandbox"));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// The live platform.
    #[default]
    Production,
    /// The non-production sandbox.
    Sandbox,
}

impl Environment {
    /// Maps the sandbox flag onto an environment.
    #[must_use]
    pub const fn from_sandbox_flag(use_sandbox: bool) -> Self {
        if use_sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    /// Returns the REST base URL for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Sandbox => SANDBOX_BASE_URL,
        }
    }

    /// Returns `true` for the sandbox environment.
    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Sandbox => f.write_str("sandbox"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}
