//! The die for [`Quantity`], a plain alias for its serialized text.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use crate::{
    die::Alias,
    macros::die,
    quantity::{self, ParseQuantityError},
};

die! {
    /// Die for [`Quantity`].
    QuantityDie, QUANTITY_BLANK for Quantity {
        empty(this) {
            this.0.trim().is_empty()
        }
    }
}

impl Alias for Quantity {
    type Underlying = String;

    fn into_underlying(self) -> Self::Underlying {
        self.0
    }
}

impl QuantityDie {
    /// Sets the quantity text as is, without validating it.
    pub fn value(&self, value: impl Into<String>) -> Self {
        self.die_stamp(|r| r.0 = value.into())
    }

    /// Validates `value` before storing it.
    pub fn value_str(&self, value: &str) -> Result<Self, ParseQuantityError> {
        self.die_try_stamp(|r| {
            *r = quantity::parse(value)?;
            Ok(())
        })
    }
}
