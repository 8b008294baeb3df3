//! Build-time options.
//!
//! Options are resolved once by the caller (usually at process startup) and passed to
//! `build_with` explicitly. Nothing in this crate reads the environment on its own.

use crate::{FhirError, FhirResult};

/// Environment variable consulted by [`BuildOptions::from_env_value`] callers.
pub const SKIP_VALIDATION_ENV: &str = "CITATION_SKIP_VALIDATION";

/// Controls what `build_with` checks before handing out a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    validate: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::validated()
    }
}

impl BuildOptions {
    /// Run every structural rule. This is what `build` uses.
    pub const fn validated() -> Self {
        Self { validate: true }
    }

    /// Skip structural rules.
    ///
    /// Required fields are still enforced since a record cannot hold an absent required value.
    pub const fn unchecked() -> Self {
        Self { validate: false }
    }

    pub fn validate(&self) -> bool {
        self.validate
    }

    /// Resolve options from the raw value of [`SKIP_VALIDATION_ENV`].
    ///
    /// An unset or blank value keeps validation on. Accepted flags are `1/true/yes/on` (skip)
    /// and `0/false/no/off` (validate), case-insensitively.
    pub fn from_env_value(value: Option<String>) -> FhirResult<Self> {
        let value = value
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty());

        match value.as_deref() {
            None => Ok(Self::default()),
            Some("1" | "true" | "yes" | "on") => Ok(Self::unchecked()),
            Some("0" | "false" | "no" | "off") => Ok(Self::validated()),
            Some(other) => Err(FhirError::InvalidConfig(format!(
                "{SKIP_VALIDATION_ENV} must be a boolean flag, got '{other}'"
            ))),
        }
    }
}
