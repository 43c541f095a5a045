//! Validation of textual Kubernetes quantities.
//!
//! Quantities follow the `<signedNumber><suffix>` serialization format used by the Kubernetes API
//! machinery, e.g. `500m`, `1.5Gi` or `2e3`. Dies accept quantities as text in their `*_str`
//! convenience setters and reject malformed input with a [`ParseQuantityError`] before anything
//! is stored.

use std::{
    fmt::{Display, Write},
    num::ParseFloatError,
    str::FromStr,
};

use k8s_openapi::apimachinery::pkg::api::resource::Quantity as K8sQuantity;
use snafu::{ResultExt as _, Snafu, ensure};

mod suffix;

pub use suffix::*;

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum ParseQuantityError {
    #[snafu(display("input is either empty or contains non-ascii characters"))]
    InvalidFormat,

    #[snafu(display("failed to parse floating point number"))]
    InvalidFloat { source: ParseFloatError },

    #[snafu(display("failed to parse suffix"))]
    InvalidSuffix { source: ParseSuffixError },
}

/// A parsed quantity.
///
/// The numeric part is kept as a [`f64`], arbitrary-precision numbers are not supported.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Quantity {
    value: f64,
    suffix: Option<Suffix>,
}

impl Quantity {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn suffix(&self) -> Option<Suffix> {
        self.suffix
    }
}

impl FromStr for Quantity {
    type Err = ParseQuantityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        ensure!(!input.is_empty() && input.is_ascii(), InvalidFormatSnafu);

        // The sign is part of the number, it must never be mistaken for the start of the suffix.
        let unsigned = input.trim_start_matches(['+', '-']);
        let sign_len = input.len() - unsigned.len();
        ensure!(sign_len <= 1, InvalidFormatSnafu);

        match unsigned.find(|c: char| c != '.' && !c.is_ascii_digit()) {
            Some(suffix_index) => {
                let (value, suffix) = input.split_at(sign_len + suffix_index);
                let value = f64::from_str(value).context(InvalidFloatSnafu)?;
                let suffix = Suffix::from_str(suffix).context(InvalidSuffixSnafu)?;

                Ok(Self {
                    value,
                    suffix: Some(suffix),
                })
            }
            None => Ok(Self {
                value: f64::from_str(input).context(InvalidFloatSnafu)?,
                suffix: None,
            }),
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value == 0.0 {
            return f.write_char('0');
        }

        match &self.suffix {
            Some(suffix) => write!(f, "{value}{suffix}", value = self.value),
            None => write!(f, "{value}", value = self.value),
        }
    }
}

impl From<Quantity> for K8sQuantity {
    fn from(value: Quantity) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<&K8sQuantity> for Quantity {
    type Error = ParseQuantityError;

    fn try_from(value: &K8sQuantity) -> Result<Self, Self::Error> {
        Self::from_str(&value.0)
    }
}

/// Validates `input` and returns it as a Kubernetes [`Quantity`][K8sQuantity].
///
/// The text is kept verbatim, it is only checked, never normalized.
pub fn parse(input: &str) -> Result<K8sQuantity, ParseQuantityError> {
    Quantity::from_str(input)?;
    Ok(K8sQuantity(input.to_owned()))
}
