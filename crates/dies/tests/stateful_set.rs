#![cfg(feature = "apps")]

use dies::{
    apis::{
        apps::v1::{STATEFUL_SET_BLANK, StatefulSetDie},
        core::v1::PERSISTENT_VOLUME_CLAIM_BLANK,
    },
    k8s_openapi::{
        api::apps::v1::StatefulSet, apimachinery::pkg::apis::meta::v1::ObjectMeta,
    },
};
use rstest::rstest;

#[rstest]
#[case::empty(STATEFUL_SET_BLANK.die_immutable(true), StatefulSet::default())]
#[case::object_metadata(
    STATEFUL_SET_BLANK.metadata_die(|d| {
        d.name("my-name");
    }),
    StatefulSet {
        metadata: ObjectMeta {
            name: Some("my-name".to_owned()),
            ..ObjectMeta::default()
        },
        ..StatefulSet::default()
    }
)]
fn stateful_set(#[case] die: StatefulSetDie, #[case] expected: StatefulSet) {
    assert_eq!(die.die_release(), expected);
}

#[test]
fn database_stateful_set() {
    let stateful_set = STATEFUL_SET_BLANK
        .metadata_die(|d| {
            d.name("db").namespace("default").add_label("app", "db");
        })
        .spec_die(|d| {
            d.replicas(3)
                .selector_die(|d| {
                    d.add_match_label("app", "db");
                })
                .template_die(|d| {
                    d.spec_die(|d| {
                        d.container_die("postgres", |d| {
                            d.image("postgres:17")
                                .port_die("sql", |d| {
                                    d.container_port(5432);
                                })
                                .volume_mount_die("data", |d| {
                                    d.mount_path("/var/lib/postgresql/data");
                                });
                        });
                    });
                })
                .volume_claim_templates_die([PERSISTENT_VOLUME_CLAIM_BLANK
                    .metadata_die(|d| {
                        d.name("data");
                    })
                    .spec_die(|d| {
                        d.storage_request_str("10Gi").expect("valid quantity");
                    })])
                .update_strategy_die(|d| {
                    d.rolling_update_die(|d| {
                        d.partition(1);
                    });
                });
        })
        .die_release();

    assert_eq!(stateful_set.metadata.name.as_deref(), Some("db"));
    let spec = stateful_set.spec.expect("spec is set");
    assert_eq!(spec.replicas, Some(3));

    let template_spec = spec.template.spec.expect("template spec is set");
    let container = &template_spec.containers[0];
    assert_eq!(container.name, "postgres");
    assert_eq!(
        container.ports.as_ref().map(|ports| ports[0].container_port),
        Some(5432)
    );

    let claims = spec.volume_claim_templates.expect("claims are set");
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].metadata.name.as_deref(), Some("data"));

    let strategy = spec.update_strategy.expect("update strategy is set");
    assert_eq!(strategy.type_.as_deref(), Some("RollingUpdate"));
    assert_eq!(
        strategy.rolling_update.and_then(|rolling| rolling.partition),
        Some(1)
    );
}

#[test]
fn mutable_object_chain() {
    let stateful_set = STATEFUL_SET_BLANK.die_immutable(false);
    stateful_set.metadata_die(|d| {
        d.name("web");
    });
    stateful_set.status_die(|d| {
        d.replicas(2).ready_replicas(2);
    });

    let released = stateful_set.die_release();
    assert_eq!(released.metadata.name.as_deref(), Some("web"));
    assert_eq!(released.status.map(|status| status.replicas), Some(2));
    assert_eq!(STATEFUL_SET_BLANK.die_release(), StatefulSet::default());
}
