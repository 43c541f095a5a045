//! Dies for the `core/v1` group.

use snafu::Snafu;

use crate::quantity::ParseQuantityError;

mod container;
mod persistent_volume_claim;
mod pod;
mod volume;

pub use container::*;
pub use persistent_volume_claim::*;
pub use pod::*;
pub use volume::*;

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("failed to parse quantity {input:?} for resource {name:?}"))]
    ParseQuantity {
        source: ParseQuantityError,
        name: String,
        input: String,
    },
}

/// Parses `input` for the resource `name`, attaching both to the error.
fn parse_quantity(
    name: &str,
    input: &str,
) -> Result<k8s_openapi::apimachinery::pkg::api::resource::Quantity> {
    use snafu::ResultExt as _;

    crate::quantity::parse(input).context(ParseQuantitySnafu { name, input })
}
