//! Dies for `meta/v1` types shared by every object.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector, LabelSelectorRequirement, ObjectMeta, OwnerReference,
};
use tracing::warn;

use crate::{
    die::{die_release_all, die_upsert},
    macros::die,
};

die! {
    /// Die for [`ObjectMeta`].
    ObjectMetaDie, OBJECT_META_BLANK for ObjectMeta {
        optional {
            annotations: BTreeMap<String, String>,
            deletion_grace_period_seconds: i64,
            finalizers: Vec<String>,
            generation: i64,
            labels: BTreeMap<String, String>,
            namespace: String,
            resource_version: String,
            uid: String,
        }
    }
}

impl ObjectMetaDie {
    pub fn name(&self, name: impl Into<String>) -> Self {
        self.die_stamp(|r| {
            if let Some(generate_name) = &r.generate_name {
                warn!(
                    %generate_name,
                    "ObjectMeta has 'generate_name' set, Kubernetes will prioritize 'name' over it"
                );
            }
            r.name = Some(name.into());
        })
    }

    pub fn name_opt(&self, name: impl Into<Option<String>>) -> Self {
        self.die_stamp(|r| r.name = name.into())
    }

    pub fn generate_name(&self, generate_name: impl Into<String>) -> Self {
        self.die_stamp(|r| {
            if let Some(name) = &r.name {
                warn!(
                    %name,
                    "ObjectMeta has 'name' set, Kubernetes will ignore 'generate_name'"
                );
            }
            r.generate_name = Some(generate_name.into());
        })
    }

    /// This adds a single label to the existing labels.
    /// It'll override a label with the same key.
    pub fn add_label(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.die_stamp(|r| {
            r.labels
                .get_or_insert_with(BTreeMap::new)
                .insert(key.into(), value.into());
        })
    }

    /// This adds a single annotation to the existing annotations.
    /// It'll override an annotation with the same key.
    pub fn add_annotation(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.die_stamp(|r| {
            r.annotations
                .get_or_insert_with(BTreeMap::new)
                .insert(key.into(), value.into());
        })
    }

    /// Replaces all owner references.
    pub fn owner_references_die(
        &self,
        references: impl IntoIterator<Item = OwnerReferenceDie>,
    ) -> Self {
        self.die_stamp(|r| r.owner_references = Some(die_release_all(references)))
    }
}

die! {
    /// Die for [`OwnerReference`].
    OwnerReferenceDie, OWNER_REFERENCE_BLANK for OwnerReference {
        required {
            api_version: String,
            kind: String,
            name: String,
            uid: String,
        }
        optional {
            block_owner_deletion: bool,
            controller: bool,
        }
    }
}

die! {
    /// Die for [`LabelSelector`].
    LabelSelectorDie, LABEL_SELECTOR_BLANK for LabelSelector {
        optional {
            match_labels: BTreeMap<String, String>,
        }
    }
}

impl LabelSelectorDie {
    pub fn add_match_label(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.die_stamp(|r| {
            r.match_labels
                .get_or_insert_with(BTreeMap::new)
                .insert(key.into(), value.into());
        })
    }

    /// Edits the match expression for `key`, adding it if missing.
    pub fn match_expression_die(
        &self,
        key: &str,
        f: impl FnOnce(&LabelSelectorRequirementDie),
    ) -> Self {
        self.die_stamp(|r| {
            die_upsert(
                r.match_expressions.get_or_insert_with(Vec::new),
                |requirement| requirement.key == key,
                || LabelSelectorRequirement {
                    key: key.to_owned(),
                    ..LabelSelectorRequirement::default()
                },
                f,
            );
        })
    }
}

die! {
    /// Die for [`LabelSelectorRequirement`].
    LabelSelectorRequirementDie, LABEL_SELECTOR_REQUIREMENT_BLANK for LabelSelectorRequirement {
        required {
            key: String,
            operator: String,
        }
        optional {
            values: Vec<String>,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_sets_only_the_name() {
        let meta = OBJECT_META_BLANK.name("my-name").die_release();

        assert_eq!(
            meta,
            ObjectMeta {
                name: Some("my-name".to_owned()),
                ..ObjectMeta::default()
            }
        );
    }

    #[test]
    fn labels_accumulate() {
        let meta = OBJECT_META_BLANK
            .add_label("app", "web")
            .add_label("tier", "frontend")
            .add_label("app", "api")
            .die_release();

        assert_eq!(
            meta.labels,
            Some(BTreeMap::from([
                ("app".to_owned(), "api".to_owned()),
                ("tier".to_owned(), "frontend".to_owned()),
            ]))
        );
    }

    #[test]
    fn owner_references_replace_previous_ones() {
        let owner = |name: &str| {
            OWNER_REFERENCE_BLANK
                .api_version("apps/v1")
                .kind("StatefulSet")
                .name(name)
                .controller(true)
        };

        let meta = OBJECT_META_BLANK
            .owner_references_die([owner("old")])
            .owner_references_die([owner("first"), owner("second")])
            .die_release();

        let names: Vec<_> = meta
            .owner_references
            .expect("owner references are set")
            .into_iter()
            .map(|reference| reference.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn match_expression_upsert() {
        let selector = LABEL_SELECTOR_BLANK
            .match_expression_die("app", |d| {
                d.operator("In").values(vec!["web".to_owned()]);
            })
            .match_expression_die("tier", |d| {
                d.operator("Exists");
            })
            .match_expression_die("app", |d| {
                d.operator("NotIn");
            })
            .die_release();

        assert_eq!(
            selector.match_expressions,
            Some(vec![
                LabelSelectorRequirement {
                    key: "app".to_owned(),
                    operator: "NotIn".to_owned(),
                    values: Some(vec!["web".to_owned()]),
                },
                LabelSelectorRequirement {
                    key: "tier".to_owned(),
                    operator: "Exists".to_owned(),
                    values: None,
                },
            ])
        );
    }
}
