//! Validated types for endpoints and polling parameters
//!
//! These wrappers enforce their invariants at construction time so the rest
//! of the crate never re-checks them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use thiserror::Error;

/// Validation errors for configuration values
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("endpoint URL cannot be empty or whitespace")]
    EmptyUrl,

    #[error("endpoint URL must start with http:// or https://: {0}")]
    InvalidUrlScheme(String),

    #[error("meter name cannot be empty or whitespace")]
    EmptyMeterName,

    #[error("interval cannot be 0 ms")]
    ZeroInterval,

    #[error("timeout cannot be 0 ms")]
    ZeroTimeout,
}

/// Macro to generate validated string newtypes.
///
/// Each generated type gets a validating `new()`, `as_str()`, `AsRef<str>`,
/// `Display`, `FromStr` (for clap value parsing) and serde impls that
/// validate on deserialization.
macro_rules! validated_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident(String) {
            validation: |$s_param:ident| $validation:expr,
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            #[doc = concat!("Create a new ", stringify!($name), " after validation")]
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let $s_param: String = value.into();
                let validate = || $validation;
                validate()?;
                Ok(Self($s_param))
            }

            #[doc = concat!("Get the ", stringify!($name), " as a string slice")]
            #[must_use]
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::new(s).map_err(serde::de::Error::custom)
            }
        }
    };
}

validated_string! {
    /// An HTTP(S) endpoint URL
    ///
    /// Only the scheme is validated here; full URL parsing is the HTTP
    /// client's job. Scheme validation catches the common config mistake of
    /// pasting a bare `host:port`.
    pub struct EndpointUrl(String) {
        validation: |s| {
            if s.trim().is_empty() {
                Err(ValidationError::EmptyUrl)
            } else if !(s.starts_with("http://") || s.starts_with("https://")) {
                Err(ValidationError::InvalidUrlScheme(s.clone()))
            } else {
                Ok(())
            }
        },
    }
}

validated_string! {
    /// The name of a Dropwizard meter inside the metrics document
    pub struct MeterName(String) {
        validation: |s| {
            if s.trim().is_empty() {
                Err(ValidationError::EmptyMeterName)
            } else {
                Ok(())
            }
        },
    }
}

impl MeterName {
    /// The meter the original health-check service publishes
    #[must_use]
    pub fn cassandra_requests() -> Self {
        Self("cassandra-requests".to_string())
    }
}

/// The fixed polling period in milliseconds, guaranteed non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PollInterval(NonZeroU64);

impl PollInterval {
    /// Default poll period: one refresh per second
    pub const DEFAULT: Self = Self(NonZeroU64::new(1000).unwrap());

    /// Create a new PollInterval from milliseconds, returning None if 0
    #[must_use]
    pub const fn new(millis: u64) -> Option<Self> {
        match NonZeroU64::new(millis) {
            Some(nz) => Some(Self(nz)),
            None => None,
        }
    }

    /// Get the period in milliseconds
    #[must_use]
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0.get()
    }

    /// Get the period as a `Duration`
    #[must_use]
    #[inline]
    pub const fn as_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.0.get())
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PollInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.get())
    }
}

impl TryFrom<u64> for PollInterval {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ValidationError::ZeroInterval)
    }
}

impl Serialize for PollInterval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.get())
    }
}

impl<'de> Deserialize<'de> for PollInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Self::new(millis).ok_or_else(|| serde::de::Error::custom("interval cannot be 0 ms"))
    }
}

/// Per-request timeout in milliseconds, guaranteed non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTimeout(NonZeroU64);

impl RequestTimeout {
    /// Default request timeout, kept below the default poll period so a
    /// hung endpoint normally resolves before the next tick
    pub const DEFAULT: Self = Self(NonZeroU64::new(800).unwrap());

    /// Create a new RequestTimeout from milliseconds, returning None if 0
    #[must_use]
    pub const fn new(millis: u64) -> Option<Self> {
        match NonZeroU64::new(millis) {
            Some(nz) => Some(Self(nz)),
            None => None,
        }
    }

    /// Get the timeout in milliseconds
    #[must_use]
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0.get()
    }

    /// Get the timeout as a `Duration`
    #[must_use]
    #[inline]
    pub const fn as_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.0.get())
    }
}

impl Default for RequestTimeout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for RequestTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.get())
    }
}

impl TryFrom<u64> for RequestTimeout {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ValidationError::ZeroTimeout)
    }
}

impl Serialize for RequestTimeout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.get())
    }
}

impl<'de> Deserialize<'de> for RequestTimeout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Self::new(millis).ok_or_else(|| serde::de::Error::custom("timeout cannot be 0 ms"))
    }
}

/// Number of tokio worker threads
///
/// 0 means "use all available CPU cores". The default of 1 keeps the whole
/// dashboard on a single logical thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadCount(usize);

impl ThreadCount {
    /// Create a new ThreadCount (0 = auto-detect)
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self(count)
    }

    /// Resolve to a concrete thread count
    #[must_use]
    pub fn get(&self) -> usize {
        if self.0 == 0 {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1)
        } else {
            self.0
        }
    }
}

impl FromStr for ThreadCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path to the configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPath(String);

impl ConfigPath {
    /// Get the path as a string slice
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ConfigPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&str> for ConfigPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl FromStr for ConfigPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
