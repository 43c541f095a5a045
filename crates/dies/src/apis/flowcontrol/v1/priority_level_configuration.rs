use k8s_openapi::api::flowcontrol::v1::{
    ExemptPriorityLevelConfiguration, LimitResponse, LimitedPriorityLevelConfiguration,
    PriorityLevelConfiguration, PriorityLevelConfigurationCondition,
    PriorityLevelConfigurationSpec, PriorityLevelConfigurationStatus, QueuingConfiguration,
};

use crate::{
    die::{die_release_all, die_with_ptr},
    macros::{die, object_die},
};

die! {
    /// Die for [`PriorityLevelConfiguration`].
    PriorityLevelConfigurationDie, PRIORITY_LEVEL_CONFIGURATION_BLANK for PriorityLevelConfiguration {}
}

object_die!(PriorityLevelConfiguration {
    spec: PriorityLevelConfigurationSpec,
    status: PriorityLevelConfigurationStatus,
});

die! {
    /// Die for [`PriorityLevelConfigurationSpec`].
    PriorityLevelConfigurationSpecDie, PRIORITY_LEVEL_CONFIGURATION_SPEC_BLANK for PriorityLevelConfigurationSpec {
        required {
            type_: String,
        }
    }
}

impl PriorityLevelConfigurationSpecDie {
    /// Switches to the `Limited` type and edits its settings.
    pub fn limited_die(&self, f: impl FnOnce(&LimitedPriorityLevelConfigurationDie)) -> Self {
        self.die_stamp(|r| {
            r.type_ = "Limited".to_owned();
            r.limited = die_with_ptr(r.limited.take(), f);
        })
    }

    /// Switches to the `Exempt` type and edits its settings.
    pub fn exempt_die(&self, f: impl FnOnce(&ExemptPriorityLevelConfigurationDie)) -> Self {
        self.die_stamp(|r| {
            r.type_ = "Exempt".to_owned();
            r.exempt = die_with_ptr(r.exempt.take(), f);
        })
    }
}

die! {
    /// Die for [`LimitedPriorityLevelConfiguration`].
    LimitedPriorityLevelConfigurationDie, LIMITED_PRIORITY_LEVEL_CONFIGURATION_BLANK for LimitedPriorityLevelConfiguration {
        optional {
            borrowing_limit_percent: i32,
            lendable_percent: i32,
            nominal_concurrency_shares: i32,
        }
    }
}

impl LimitedPriorityLevelConfigurationDie {
    pub fn limit_response_die(&self, f: impl FnOnce(&LimitResponseDie)) -> Self {
        self.die_stamp(|r| r.limit_response = die_with_ptr(r.limit_response.take(), f))
    }
}

die! {
    /// Die for [`ExemptPriorityLevelConfiguration`].
    ExemptPriorityLevelConfigurationDie, EXEMPT_PRIORITY_LEVEL_CONFIGURATION_BLANK for ExemptPriorityLevelConfiguration {
        optional {
            lendable_percent: i32,
            nominal_concurrency_shares: i32,
        }
    }
}

die! {
    /// Die for [`LimitResponse`].
    LimitResponseDie, LIMIT_RESPONSE_BLANK for LimitResponse {
        required {
            type_: String,
        }
    }
}

impl LimitResponseDie {
    /// Rejects excess requests, which drops any queuing settings.
    pub fn reject(&self) -> Self {
        self.die_stamp(|r| {
            r.type_ = "Reject".to_owned();
            r.queuing = None;
        })
    }

    /// Queues excess requests and edits the queuing settings.
    pub fn queuing_die(&self, f: impl FnOnce(&QueuingConfigurationDie)) -> Self {
        self.die_stamp(|r| {
            r.type_ = "Queue".to_owned();
            r.queuing = die_with_ptr(r.queuing.take(), f);
        })
    }
}

die! {
    /// Die for [`QueuingConfiguration`].
    QueuingConfigurationDie, QUEUING_CONFIGURATION_BLANK for QueuingConfiguration {
        optional {
            hand_size: i32,
            queue_length_limit: i32,
            queues: i32,
        }
    }
}

die! {
    /// Die for [`PriorityLevelConfigurationStatus`].
    PriorityLevelConfigurationStatusDie, PRIORITY_LEVEL_CONFIGURATION_STATUS_BLANK for PriorityLevelConfigurationStatus {}
}

impl PriorityLevelConfigurationStatusDie {
    /// Replaces all conditions.
    pub fn conditions_die(
        &self,
        conditions: impl IntoIterator<Item = PriorityLevelConfigurationConditionDie>,
    ) -> Self {
        self.die_stamp(|r| r.conditions = Some(die_release_all(conditions)))
    }
}

die! {
    /// Die for [`PriorityLevelConfigurationCondition`].
    PriorityLevelConfigurationConditionDie, PRIORITY_LEVEL_CONFIGURATION_CONDITION_BLANK for PriorityLevelConfigurationCondition {
        optional {
            message: String,
            reason: String,
            status: String,
            type_: String,
        }
    }
}
