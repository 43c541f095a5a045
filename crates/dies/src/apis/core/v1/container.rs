use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{
        Capabilities, Container, ContainerPort, ContainerStatus, EnvVar, ResourceRequirements,
        SecurityContext, VolumeMount,
    },
    apimachinery::pkg::api::resource::Quantity,
};

use super::{Result, SELinuxOptionsDie, SeccompProfileDie, parse_quantity};
use crate::{
    die::{die_upsert, die_with_ptr},
    macros::die,
};

die! {
    /// Die for [`Container`].
    ContainerDie, CONTAINER_BLANK for Container {
        required {
            name: String,
        }
        optional {
            args: Vec<String>,
            command: Vec<String>,
            image: String,
            image_pull_policy: String,
            restart_policy: String,
            stdin: bool,
            stdin_once: bool,
            termination_message_path: String,
            termination_message_policy: String,
            tty: bool,
            working_dir: String,
        }
    }
}

impl ContainerDie {
    /// Edits the environment variable called `name`, adding it if missing.
    pub fn env_die(&self, name: &str, f: impl FnOnce(&EnvVarDie)) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.env.get_or_insert_with(Vec::new),
                |var| var.name == name,
                || EnvVar {
                    name: name.to_owned(),
                    ..EnvVar::default()
                },
                f,
            );
        })
    }

    /// Edits the port called `name`, adding it if missing.
    pub fn port_die(&self, name: &str, f: impl FnOnce(&ContainerPortDie)) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.ports.get_or_insert_with(Vec::new),
                |port| port.name.as_deref() == Some(name),
                || ContainerPort {
                    name: Some(name.to_owned()),
                    ..ContainerPort::default()
                },
                f,
            );
        })
    }

    /// Edits the mount of the volume called `name`, adding it if missing.
    pub fn volume_mount_die(&self, name: &str, f: impl FnOnce(&VolumeMountDie)) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.volume_mounts.get_or_insert_with(Vec::new),
                |mount| mount.name == name,
                || VolumeMount {
                    name: name.to_owned(),
                    ..VolumeMount::default()
                },
                f,
            );
        })
    }

    pub fn resources_die(&self, f: impl FnOnce(&ResourceRequirementsDie)) -> Self {
        self.die_stamp(|r| r.resources = die_with_ptr(r.resources.take(), f))
    }

    pub fn security_context_die(&self, f: impl FnOnce(&SecurityContextDie)) -> Self {
        self.die_stamp(|r| r.security_context = die_with_ptr(r.security_context.take(), f))
    }
}

die! {
    /// Die for [`EnvVar`].
    EnvVarDie, ENV_VAR_BLANK for EnvVar {
        required {
            name: String,
        }
        optional {
            value: String,
        }
    }
}

die! {
    /// Die for [`ContainerPort`].
    ContainerPortDie, CONTAINER_PORT_BLANK for ContainerPort {
        required {
            container_port: i32,
        }
        optional {
            host_ip: String,
            host_port: i32,
            name: String,
            protocol: String,
        }
    }
}

impl ContainerPortDie {
    pub fn tcp(&self) -> Self {
        self.protocol("TCP")
    }

    pub fn udp(&self) -> Self {
        self.protocol("UDP")
    }
}

die! {
    /// Die for [`VolumeMount`].
    VolumeMountDie, VOLUME_MOUNT_BLANK for VolumeMount {
        required {
            mount_path: String,
            name: String,
        }
        optional {
            mount_propagation: String,
            read_only: bool,
            sub_path: String,
            sub_path_expr: String,
        }
    }
}

die! {
    /// Die for [`ResourceRequirements`].
    ResourceRequirementsDie, RESOURCE_REQUIREMENTS_BLANK for ResourceRequirements {
        optional {
            limits: BTreeMap<String, Quantity>,
            requests: BTreeMap<String, Quantity>,
        }
    }
}

impl ResourceRequirementsDie {
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
    /// Die for [`SecurityContext`].
    SecurityContextDie, SECURITY_CONTEXT_BLANK for SecurityContext {
        optional {
            allow_privilege_escalation: bool,
            privileged: bool,
            proc_mount: String,
            read_only_root_filesystem: bool,
            run_as_group: i64,
            run_as_non_root: bool,
            run_as_user: i64,
        }
    }
}

impl SecurityContextDie {
    pub fn capabilities_die(&self, f: impl FnOnce(&CapabilitiesDie)) -> Self {
        self.die_stamp(|r| r.capabilities = die_with_ptr(r.capabilities.take(), f))
    }

    pub fn se_linux_options_die(&self, f: impl FnOnce(&SELinuxOptionsDie)) -> Self {
        self.die_stamp(|r| r.se_linux_options = die_with_ptr(r.se_linux_options.take(), f))
    }

    pub fn seccomp_profile_die(&self, f: impl FnOnce(&SeccompProfileDie)) -> Self {
        self.die_stamp(|r| r.seccomp_profile = die_with_ptr(r.seccomp_profile.take(), f))
    }
}

die! {
    /// Die for [`Capabilities`].
    CapabilitiesDie, CAPABILITIES_BLANK for Capabilities {
        optional {
            add: Vec<String>,
            drop: Vec<String>,
        }
    }
}

die! {
    /// Die for [`ContainerStatus`].
    ContainerStatusDie, CONTAINER_STATUS_BLANK for ContainerStatus {
        required {
            image: String,
            image_id: String,
            name: String,
            ready: bool,
            restart_count: i32,
        }
        optional {
            container_id: String,
            started: bool,
        }
    }
}
