use std::{fmt::Display, ops::Deref, str::FromStr};

use snafu::{Snafu, ensure};

#[derive(Debug, PartialEq, Eq, Snafu)]
#[snafu(display("failed to parse {input:?} as quantity suffix"))]
pub struct ParseSuffixError {
    input: String,
}

/// The `<suffix>` part of a quantity.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum Suffix {
    DecimalMultiple(DecimalMultiple),
    BinaryMultiple(BinaryMultiple),
    DecimalExponent(DecimalExponent),
}

impl FromStr for Suffix {
    type Err = ParseSuffixError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if let Ok(binary) = BinaryMultiple::from_str(input) {
            return Ok(Self::BinaryMultiple(binary));
        }

        if let Ok(decimal) = DecimalMultiple::from_str(input) {
            return Ok(Self::DecimalMultiple(decimal));
        }

        if let Some(exponent) = input.strip_prefix(['e', 'E']) {
            // The exponent must be a signed integer.
            let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            ensure!(
                !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
                ParseSuffixSnafu { input }
            );

            if let Ok(exponent) = f64::from_str(exponent) {
                return Ok(Self::DecimalExponent(DecimalExponent(exponent)));
            }
        }

        ParseSuffixSnafu { input }.fail()
    }
}

impl Display for Suffix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DecimalMultiple(decimal) => write!(f, "{decimal}"),
            Self::BinaryMultiple(binary) => write!(f, "{binary}"),
            Self::DecimalExponent(exponent) => write!(f, "e{exponent}"),
        }
    }
}

/// Binary multiples (powers of 2) as defined in IEC 80000-13.
///
/// Kubernetes drops the trailing `B` of the official units:
///
/// ```plain
/// - 1024^1, KiB (Ki), Kibibyte
/// - 1024^2, MiB (Mi), Mebibyte
/// - 1024^3, GiB (Gi), Gibibyte
/// - 1024^4, TiB (Ti), Tebibyte
/// - 1024^5, PiB (Pi), Pebibyte
/// - 1024^6, EiB (Ei), Exbibyte
/// ```
///
/// Larger units are not part of the [Kubernetes serialization format][k8s-serialization-format].
///
/// [k8s-serialization-format]: https://github.com/kubernetes/apimachinery/blob/8c60292e48e46c4faa1e92acb232ce6adb37512c/pkg/api/resource/quantity.go#L37-L59
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, strum::Display, strum::EnumString)]
pub enum BinaryMultiple {
    #[strum(serialize = "Ki")]
    Kibi,

    #[strum(serialize = "Mi")]
    Mebi,

    #[strum(serialize = "Gi")]
    Gibi,

    #[strum(serialize = "Ti")]
    Tebi,

    #[strum(serialize = "Pi")]
    Pebi,

    #[strum(serialize = "Ei")]
    Exbi,
}

/// Decimal SI multiples (powers of 10).
///
/// Note that Kubernetes uses a lowercase `k` for kilo.
///
/// ```plain
/// - 1000^-3, (n): nano
/// - 1000^-2, (u): micro
/// - 1000^-1, (m): milli
/// - 1000^ 1, (k): kilo
/// - 1000^ 2, (M): mega
/// - 1000^ 3, (G): giga
/// - 1000^ 4, (T): tera
/// - 1000^ 5, (P): peta
/// - 1000^ 6, (E): exa
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, strum::Display, strum::EnumString)]
pub enum DecimalMultiple {
    #[strum(serialize = "n")]
    Nano,

    #[strum(serialize = "u")]
    Micro,

    #[strum(serialize = "m")]
    Milli,

    #[strum(serialize = "k")]
    Kilo,

    #[strum(serialize = "M")]
    Mega,

    #[strum(serialize = "G")]
    Giga,

    #[strum(serialize = "T")]
    Tera,

    #[strum(serialize = "P")]
    Peta,

    #[strum(serialize = "E")]
    Exa,
}

/// Scientific (E) notation, e.g. the `e3` in `1.5e3`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct DecimalExponent(f64);

impl DecimalExponent {
    pub fn new(exponent: f64) -> Self {
        Self(exponent)
    }
}

impl Deref for DecimalExponent {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for DecimalExponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
