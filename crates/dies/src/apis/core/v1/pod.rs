use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{
        Container, ContainerStatus, HostAlias, Pod, PodCondition, PodDNSConfig,
        PodDNSConfigOption, PodReadinessGate, PodSecurityContext, PodSpec, PodStatus,
        PodTemplateSpec, SELinuxOptions, SeccompProfile, Sysctl, Toleration,
        TopologySpreadConstraint, Volume, WindowsSecurityContextOptions,
    },
    apimachinery::pkg::api::resource::Quantity,
};

use super::{ContainerDie, ContainerStatusDie, Result, VolumeDie, parse_quantity};
use crate::{
    apis::meta::v1::{LabelSelectorDie, ObjectMetaDie},
    die::{die_release_all, die_upsert, die_with_ptr},
    macros::{die, object_die},
};

die! {
    /// Die for [`Pod`].
    PodDie, POD_BLANK for Pod {}
}

object_die!(Pod {
    spec: PodSpec,
    status: PodStatus,
});

die! {
    /// Die for [`PodSpec`].
    PodSpecDie, POD_SPEC_BLANK for PodSpec {
        optional {
            active_deadline_seconds: i64,
            automount_service_account_token: bool,
            dns_policy: String,
            enable_service_links: bool,
            host_ipc: bool,
            host_network: bool,
            host_pid: bool,
            hostname: String,
            node_name: String,
            node_selector: BTreeMap<String, String>,
            preemption_policy: String,
            priority: i32,
            priority_class_name: String,
            restart_policy: String,
            runtime_class_name: String,
            scheduler_name: String,
            service_account_name: String,
            set_hostname_as_fqdn: bool,
            share_process_namespace: bool,
            subdomain: String,
            termination_grace_period_seconds: i64,
        }
    }
}

impl PodSpecDie {
    /// Edits the volume called `name`, adding it if missing.
    pub fn volume_die(&self, name: &str, f: impl FnOnce(&VolumeDie)) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.volumes.get_or_insert_with(Vec::new),
                |volume| volume.name == name,
                || named_volume(name),
                f,
            );
        })
    }

    /// Edits the init container called `name`, adding it if missing.
    pub fn init_container_die(&self, name: &str, f: impl FnOnce(&ContainerDie)) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.init_containers.get_or_insert_with(Vec::new),
                |container| container.name == name,
                || named_container(name),
                f,
            );
        })
    }

    /// Edits the container called `name`, adding it if missing.
    pub fn container_die(&self, name: &str, f: impl FnOnce(&ContainerDie)) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                &mut r.containers,
                |container| container.name == name,
                || named_container(name),
                f,
            );
        })
    }

    pub fn security_context_die(&self, f: impl FnOnce(&PodSecurityContextDie)) -> Self {
        self.die_stamp(|r| r.security_context = die_with_ptr(r.security_context.take(), f))
    }

    /// Edits the toleration for `key`, adding it if missing.
    pub fn toleration_die(&self, key: &str, f: impl FnOnce(&TolerationDie)) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.tolerations.get_or_insert_with(Vec::new),
                |toleration| toleration.key.as_deref() == Some(key),
                || Toleration {
                    key: Some(key.to_owned()),
                    ..Toleration::default()
                },
                f,
            );
        })
    }

    /// Replaces all host aliases.
    pub fn host_aliases_die(&self, hosts: impl IntoIterator<Item = HostAliasDie>) -> Self {
        self.die_stamp(|r| r.host_aliases = Some(die_release_all(hosts)))
    }

    pub fn dns_config_die(&self, f: impl FnOnce(&PodDNSConfigDie)) -> Self {
        self.die_stamp(|r| r.dns_config = die_with_ptr(r.dns_config.take(), f))
    }

    /// Replaces all readiness gates.
    pub fn readiness_gates_die(&self, gates: impl IntoIterator<Item = PodReadinessGateDie>) -> Self {
        self.die_stamp(|r| r.readiness_gates = Some(die_release_all(gates)))
    }

    pub fn add_overhead(&self, name: impl Into<String>, quantity: Quantity) -> Self {
        self.die_stamp(|r| {
            r.overhead
                .get_or_insert_with(BTreeMap::new)
                .insert(name.into(), quantity);
        })
    }

    /// Like [`Self::add_overhead`], but parses the quantity first.
    pub fn add_overhead_str(&self, name: &str, quantity: &str) -> Result<Self> {
        let quantity = parse_quantity(name, quantity)?;
        Ok(self.add_overhead(name, quantity))
    }

    /// Edits the topology spread constraint for `topology_key`, adding it if missing.
    pub fn topology_spread_constraint_die(
        &self,
        topology_key: &str,
        f: impl FnOnce(&TopologySpreadConstraintDie),
    ) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.topology_spread_constraints.get_or_insert_with(Vec::new),
                |constraint| constraint.topology_key == topology_key,
                || TopologySpreadConstraint {
                    topology_key: topology_key.to_owned(),
                    ..TopologySpreadConstraint::default()
                },
                f,
            );
        })
    }
}

fn named_volume(name: &str) -> Volume {
    Volume {
        name: name.to_owned(),
        ..Volume::default()
    }
}

fn named_container(name: &str) -> Container {
    Container {
        name: name.to_owned(),
        ..Container::default()
    }
}

die! {
    /// Die for [`PodSecurityContext`].
    PodSecurityContextDie, POD_SECURITY_CONTEXT_BLANK for PodSecurityContext {
        optional {
            fs_group: i64,
            fs_group_change_policy: String,
            run_as_group: i64,
            run_as_non_root: bool,
            run_as_user: i64,
            supplemental_groups: Vec<i64>,
        }
    }
}

impl PodSecurityContextDie {
    pub fn se_linux_options_die(&self, f: impl FnOnce(&SELinuxOptionsDie)) -> Self {
        self.die_stamp(|r| r.se_linux_options = die_with_ptr(r.se_linux_options.take(), f))
    }

    pub fn windows_options_die(
        &self,
        f: impl FnOnce(&WindowsSecurityContextOptionsDie),
    ) -> Self {
        self.die_stamp(|r| r.windows_options = die_with_ptr(r.windows_options.take(), f))
    }

    /// Replaces all sysctls.
    pub fn sysctls_die(&self, sysctls: impl IntoIterator<Item = SysctlDie>) -> Self {
        self.die_stamp(|r| r.sysctls = Some(die_release_all(sysctls)))
    }

    pub fn seccomp_profile_die(&self, f: impl FnOnce(&SeccompProfileDie)) -> Self {
        self.die_stamp(|r| r.seccomp_profile = die_with_ptr(r.seccomp_profile.take(), f))
    }
}

die! {
    /// Die for [`SELinuxOptions`].
    SELinuxOptionsDie, SE_LINUX_OPTIONS_BLANK for SELinuxOptions {
        optional {
            level: String,
            role: String,
            type_: String,
            user: String,
        }
    }
}

die! {
    /// Die for [`WindowsSecurityContextOptions`].
    WindowsSecurityContextOptionsDie, WINDOWS_SECURITY_CONTEXT_OPTIONS_BLANK for WindowsSecurityContextOptions {
        optional {
            gmsa_credential_spec: String,
            gmsa_credential_spec_name: String,
            host_process: bool,
            run_as_user_name: String,
        }
    }
}

die! {
    /// Die for [`SeccompProfile`].
    SeccompProfileDie, SECCOMP_PROFILE_BLANK for SeccompProfile {
        required {
            type_: String,
        }
        optional {
            localhost_profile: String,
        }
    }
}

die! {
    /// Die for [`Sysctl`].
    SysctlDie, SYSCTL_BLANK for Sysctl {
        required {
            name: String,
            value: String,
        }
    }
}

die! {
    /// Die for [`Toleration`].
    TolerationDie, TOLERATION_BLANK for Toleration {
        optional {
            effect: String,
            key: String,
            operator: String,
            toleration_seconds: i64,
            value: String,
        }
    }
}

die! {
    /// Die for [`HostAlias`].
    HostAliasDie, HOST_ALIAS_BLANK for HostAlias {
        optional {
            hostnames: Vec<String>,
        }
    }
}

die! {
    /// Die for [`PodDNSConfig`].
    PodDNSConfigDie, POD_DNS_CONFIG_BLANK for PodDNSConfig {
        optional {
            nameservers: Vec<String>,
            searches: Vec<String>,
        }
    }
}

impl PodDNSConfigDie {
    /// Replaces all resolver options.
    pub fn options_die(&self, options: impl IntoIterator<Item = PodDNSConfigOptionDie>) -> Self {
        self.die_stamp(|r| r.options = Some(die_release_all(options)))
    }
}

die! {
    /// Die for [`PodDNSConfigOption`].
    PodDNSConfigOptionDie, POD_DNS_CONFIG_OPTION_BLANK for PodDNSConfigOption {
        optional {
            name: String,
            value: String,
        }
    }
}

die! {
    /// Die for [`PodReadinessGate`].
    PodReadinessGateDie, POD_READINESS_GATE_BLANK for PodReadinessGate {
        required {
            condition_type: String,
        }
    }
}

die! {
    /// Die for [`TopologySpreadConstraint`].
    TopologySpreadConstraintDie, TOPOLOGY_SPREAD_CONSTRAINT_BLANK for TopologySpreadConstraint {
        required {
            max_skew: i32,
            topology_key: String,
            when_unsatisfiable: String,
        }
        optional {
            match_label_keys: Vec<String>,
            min_domains: i32,
            node_affinity_policy: String,
            node_taints_policy: String,
        }
    }
}

impl TopologySpreadConstraintDie {
    pub fn label_selector_die(&self, f: impl FnOnce(&LabelSelectorDie)) -> Self {
        self.die_stamp(|r| r.label_selector = die_with_ptr(r.label_selector.take(), f))
    }
}

die! {
    /// Die for [`PodStatus`].
    PodStatusDie, POD_STATUS_BLANK for PodStatus {
        optional {
            host_ip: String,
            message: String,
            nominated_node_name: String,
            phase: String,
            pod_ip: String,
            qos_class: String,
            reason: String,
        }
    }
}

impl PodStatusDie {
    /// Replaces all conditions.
    pub fn conditions_die(&self, conditions: impl IntoIterator<Item = PodConditionDie>) -> Self {
        self.die_stamp(|r| r.conditions = Some(die_release_all(conditions)))
    }

    /// Edits the status of the init container called `name`, adding it if missing.
    pub fn init_container_status_die(
        &self,
        name: &str,
        f: impl FnOnce(&ContainerStatusDie),
    ) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.init_container_statuses.get_or_insert_with(Vec::new),
                |status| status.name == name,
                || named_container_status(name),
                f,
            );
        })
    }

    /// Edits the status of the container called `name`, adding it if missing.
    pub fn container_status_die(&self, name: &str, f: impl FnOnce(&ContainerStatusDie)) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.container_statuses.get_or_insert_with(Vec::new),
                |status| status.name == name,
                || named_container_status(name),
                f,
            );
        })
    }

    /// Edits the status of the ephemeral container called `name`, adding it if missing.
    pub fn ephemeral_container_status_die(
        &self,
        name: &str,
        f: impl FnOnce(&ContainerStatusDie),
    ) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.ephemeral_container_statuses.get_or_insert_with(Vec::new),
                |status| status.name == name,
                || named_container_status(name),
                f,
            );
        })
    }
}

fn named_container_status(name: &str) -> ContainerStatus {
    ContainerStatus {
        name: name.to_owned(),
        ..ContainerStatus::default()
    }
}

die! {
    /// Die for [`PodCondition`].
    PodConditionDie, POD_CONDITION_BLANK for PodCondition {
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

impl PodConditionDie {
    pub fn true_(&self) -> Self {
        self.status("True")
    }

    pub fn false_(&self) -> Self {
        self.status("False")
    }

    pub fn unknown(&self) -> Self {
        self.status("Unknown")
    }
}

die! {
    /// Die for [`PodTemplateSpec`].
    PodTemplateSpecDie, POD_TEMPLATE_SPEC_BLANK for PodTemplateSpec {}
}

impl PodTemplateSpecDie {
    pub fn metadata_die(&self, f: impl FnOnce(&ObjectMetaDie)) -> Self {
        self.die_stamp(|r| r.metadata = die_with_ptr(r.metadata.take(), f))
    }

    pub fn spec_die(&self, f: impl FnOnce(&PodSpecDie)) -> Self {
        self.die_stamp(|r| r.spec = die_with_ptr(r.spec.take(), f))
    }
}
