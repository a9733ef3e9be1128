//! # Evaluator Configuration

use std::fmt;

/// Options that change how the operator protocol behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvalConfig {
    /// Record a diagnostic whenever a bits value is used as a boolean
    pub strict_bool: bool,

    /// Default upper bound for the length of a text representation
    pub repr_limit: usize,

    /// Largest accepted left shift distance
    pub shift_limit: usize,
}

impl EvalConfig {
    /// Smallest representation limit that still fits a sigil and a digit
    pub const MIN_REPR_LIMIT: usize = 2;

    pub const DEFAULT: Self = Self {
        strict_bool: false,
        repr_limit: usize::MAX,
        shift_limit: usize::MAX,
    };

    pub const fn new(
        strict_bool: bool,
        repr_limit: usize,
        shift_limit: usize,
    ) -> Result<Self, ConfigError> {
        if repr_limit < Self::MIN_REPR_LIMIT {
            return Err(ConfigError::InvalidReprLimit);
        }
        if shift_limit == 0 {
            return Err(ConfigError::InvalidShiftLimit);
        }
        Ok(Self {
            strict_bool,
            repr_limit,
            shift_limit,
        })
    }

    /// Same options with strict boolean diagnostics switched on
    pub const fn strict(self) -> Self {
        Self {
            strict_bool: true,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::new(self.strict_bool, self.repr_limit, self.shift_limit).map(|_| ())
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for EvalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EvalConfig(strict_bool={}, repr_limit={}, shift_limit={})",
            self.strict_bool, self.repr_limit, self.shift_limit
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    InvalidReprLimit,
    InvalidShiftLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidReprLimit => write!(
                f,
                "repr_limit must be at least {}",
                EvalConfig::MIN_REPR_LIMIT
            ),
            ConfigError::InvalidShiftLimit => write!(f, "shift_limit must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}
