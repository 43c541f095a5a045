use k8s_openapi::{
    api::core::v1::{EmptyDirVolumeSource, SecretVolumeSource, Volume},
    apimachinery::pkg::api::resource::Quantity,
};

use super::{Result, parse_quantity};
use crate::{die::die_with_ptr, macros::die};

die! {
    /// Die for [`Volume`].
    VolumeDie, VOLUME_BLANK for Volume {
        required {
            name: String,
        }
    }
}

impl VolumeDie {
    pub fn empty_dir_die(&self, f: impl FnOnce(&EmptyDirVolumeSourceDie)) -> Self {
        self.die_stamp(|r| r.empty_dir = die_with_ptr(r.empty_dir.take(), f))
    }

    pub fn secret_die(&self, f: impl FnOnce(&SecretVolumeSourceDie)) -> Self {
        self.die_stamp(|r| r.secret = die_with_ptr(r.secret.take(), f))
    }
}

die! {
    /// Die for [`EmptyDirVolumeSource`].
    EmptyDirVolumeSourceDie, EMPTY_DIR_VOLUME_SOURCE_BLANK for EmptyDirVolumeSource {
        optional {
            medium: String,
            size_limit: Quantity,
        }
        // `emptyDir: {}` selects the volume source, it is never dropped.
        empty(_this) {
            false
        }
    }
}

impl EmptyDirVolumeSourceDie {
    /// Like [`Self::size_limit`], but parses the quantity first.
    pub fn size_limit_str(&self, size_limit: &str) -> Result<Self> {
        let size_limit = parse_quantity("size_limit", size_limit)?;
        Ok(self.size_limit(size_limit))
    }
}

die! {
    /// Die for [`SecretVolumeSource`].
    SecretVolumeSourceDie, SECRET_VOLUME_SOURCE_BLANK for SecretVolumeSource {
        optional {
            default_mode: i32,
            optional: bool,
            secret_name: String,
        }
        empty(_this) {
            false
        }
    }
}
