use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{
        PersistentVolumeClaim, PersistentVolumeClaimSpec, PersistentVolumeClaimStatus,
        VolumeResourceRequirements,
    },
    apimachinery::pkg::api::resource::Quantity,
};

use super::{Result, parse_quantity};
use crate::{
    apis::meta::v1::LabelSelectorDie,
    die::die_with_ptr,
    macros::{die, object_die},
};

die! {
    /// Die for [`PersistentVolumeClaim`].
    PersistentVolumeClaimDie, PERSISTENT_VOLUME_CLAIM_BLANK for PersistentVolumeClaim {}
}

object_die!(PersistentVolumeClaim {
    spec: PersistentVolumeClaimSpec,
    status: PersistentVolumeClaimStatus,
});

die! {
    /// Die for [`PersistentVolumeClaimSpec`].
    PersistentVolumeClaimSpecDie, PERSISTENT_VOLUME_CLAIM_SPEC_BLANK for PersistentVolumeClaimSpec {
        optional {
            access_modes: Vec<String>,
            storage_class_name: String,
            volume_attributes_class_name: String,
            volume_mode: String,
            volume_name: String,
        }
    }
}

impl PersistentVolumeClaimSpecDie {
    pub fn resources_die(&self, f: impl FnOnce(&VolumeResourceRequirementsDie)) -> Self {
        self.die_stamp(|r| r.resources = die_with_ptr(r.resources.take(), f))
    }

    pub fn selector_die(&self, f: impl FnOnce(&LabelSelectorDie)) -> Self {
        self.die_stamp(|r| r.selector = die_with_ptr(r.selector.take(), f))
    }

    /// Requests `quantity` of storage, e.g. `10Gi`.
    pub fn storage_request_str(&self, quantity: &str) -> Result<Self> {
        let quantity = parse_quantity("storage", quantity)?;
        Ok(self.resources_die(|d| {
            d.add_request("storage", quantity);
        }))
    }
}

die! {
    /// Die for [`VolumeResourceRequirements`].
    VolumeResourceRequirementsDie, VOLUME_RESOURCE_REQUIREMENTS_BLANK for VolumeResourceRequirements {
        optional {
            limits: BTreeMap<String, Quantity>,
            requests: BTreeMap<String, Quantity>,
        }
    }
}

impl VolumeResourceRequirementsDie {
    pub fn add_limit(&self, name: impl Into<String>, quantity: Quantity) -> Self {
        self.die_stamp(|r| {
            r.limits
                .get_or_insert_with(BTreeMap::new)
                .insert(name.into(), quantity);
        })
    }

    /// Like [`Self::add_limit`], but parses the quantity first.
    pub fn add_limit_str(&self, name: &str, quantity: &str) -> Result<Self> {
        let quantity = parse_quantity(name, quantity)?;
        Ok(self.add_limit(name, quantity))
    }

    pub fn add_request(&self, name: impl Into<String>, quantity: Quantity) -> Self {
        self.die_stamp(|r| {
            r.requests
                .get_or_insert_with(BTreeMap::new)
                .insert(name.into(), quantity);
        })
    }

    /// Like [`Self::add_request`], but parses the quantity first.
    pub fn add_request_str(&self, name: &str, quantity: &str) -> Result<Self> {
        let quantity = parse_quantity(name, quantity)?;
        Ok(self.add_request(name, quantity))
    }
}

die! {
    /// Die for [`PersistentVolumeClaimStatus`].
    PersistentVolumeClaimStatusDie, PERSISTENT_VOLUME_CLAIM_STATUS_BLANK for PersistentVolumeClaimStatus {
        optional {
            access_modes: Vec<String>,
            capacity: BTreeMap<String, Quantity>,
            phase: String,
        }
    }
}
