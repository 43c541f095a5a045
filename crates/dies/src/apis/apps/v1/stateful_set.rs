use k8s_openapi::{
    api::apps::v1::{
        RollingUpdateStatefulSetStrategy, StatefulSet, StatefulSetCondition, StatefulSetSpec,
        StatefulSetStatus, StatefulSetUpdateStrategy,
    },
    apimachinery::pkg::util::intstr::IntOrString,
};

use crate::{
    apis::{
        core::v1::{PersistentVolumeClaimDie, PodTemplateSpecDie},
        meta::v1::LabelSelectorDie,
    },
    die::{die_release_all, die_with, die_with_ptr},
    macros::{die, object_die},
};

die! {
    /// Die for [`StatefulSet`].
    StatefulSetDie, STATEFUL_SET_BLANK for StatefulSet {}
}

object_die!(StatefulSet {
    spec: StatefulSetSpec,
    status: StatefulSetStatus,
});

die! {
    /// Die for [`StatefulSetSpec`].
    StatefulSetSpecDie, STATEFUL_SET_SPEC_BLANK for StatefulSetSpec {
        optional {
            min_ready_seconds: i32,
            pod_management_policy: String,
            replicas: i32,
            revision_history_limit: i32,
        }
    }
}

impl StatefulSetSpecDie {
    pub fn selector_die(&self, f: impl FnOnce(&LabelSelectorDie)) -> Self {
        self.die_stamp(|r| r.selector = die_with(std::mem::take(&mut r.selector), f))
    }

    pub fn template_die(&self, f: impl FnOnce(&PodTemplateSpecDie)) -> Self {
        self.die_stamp(|r| r.template = die_with(std::mem::take(&mut r.template), f))
    }

    /// Replaces all volume claim templates.
    pub fn volume_claim_templates_die(
        &self,
        claims: impl IntoIterator<Item = PersistentVolumeClaimDie>,
    ) -> Self {
        self.die_stamp(|r| r.volume_claim_templates = Some(die_release_all(claims)))
    }

    pub fn update_strategy_die(&self, f: impl FnOnce(&StatefulSetUpdateStrategyDie)) -> Self {
        self.die_stamp(|r| r.update_strategy = die_with_ptr(r.update_strategy.take(), f))
    }
}

die! {
    /// Die for [`StatefulSetUpdateStrategy`].
    StatefulSetUpdateStrategyDie, STATEFUL_SET_UPDATE_STRATEGY_BLANK for StatefulSetUpdateStrategy {
        optional {
            type_: String,
        }
    }
}

impl StatefulSetUpdateStrategyDie {
    /// Switches to the `OnDelete` strategy, which has no rolling update settings.
    pub fn on_delete(&self) -> Self {
        self.die_stamp(|r| {
            r.type_ = Some("OnDelete".to_owned());
            r.rolling_update = None;
        })
    }

    /// Switches to the `RollingUpdate` strategy and edits its settings.
    pub fn rolling_update_die(&self, f: impl FnOnce(&RollingUpdateStatefulSetStrategyDie)) -> Self {
        self.die_stamp(|r| {
            r.type_ = Some("RollingUpdate".to_owned());
            r.rolling_update = die_with_ptr(r.rolling_update.take(), f);
        })
    }
}

die! {
    /// Die for [`RollingUpdateStatefulSetStrategy`].
    RollingUpdateStatefulSetStrategyDie, ROLLING_UPDATE_STATEFUL_SET_STRATEGY_BLANK for RollingUpdateStatefulSetStrategy {
        optional {
            max_unavailable: IntOrString,
            partition: i32,
        }
    }
}

die! {
    /// Die for [`StatefulSetStatus`].
    StatefulSetStatusDie, STATEFUL_SET_STATUS_BLANK for StatefulSetStatus {
        required {
            replicas: i32,
        }
        optional {
            collision_count: i32,
            current_replicas: i32,
            current_revision: String,
            observed_generation: i64,
            ready_replicas: i32,
            update_revision: String,
            updated_replicas: i32,
        }
    }
}

impl StatefulSetStatusDie {
    /// Replaces all conditions.
    pub fn conditions_die(
        &self,
        conditions: impl IntoIterator<Item = StatefulSetConditionDie>,
    ) -> Self {
        self.die_stamp(|r| r.conditions = Some(die_release_all(conditions)))
    }
}

die! {
    /// Die for [`StatefulSetCondition`].
    StatefulSetConditionDie, STATEFUL_SET_CONDITION_BLANK for StatefulSetCondition {
        required {
            status: String,
            type_: String,
        }
        optional {
            message: String,
            reason: String,
        }
    }
}
