//! Create tests.

use acier_aci::{Aci, Permission};
use acier_core::{EntryStore, GroupDirectory, GroupKind, Lookup};
use acier_ops::{AciRequest, Error, FindCriteria, GroupRef, TargetType};

use crate::common::*;

#[tokio::test]
async fn test_create_stores_and_returns_text() {
    let h = TestHarness::new().await;
    let text = h.service.create("edit names", &names_request()).await.unwrap();

    assert_eq!(
        text,
        format!(
            r#"(targetattr = "cn || sn")(version 3.0;acl "edit names";allow (read,write) groupdn = "ldap:///{HELPDESK_DN}";)"#
        )
    );
    assert_eq!(h.raw().await, vec![text]);
    assert_eq!(h.directory.write_count(), 1);
}

#[tokio::test]
async fn test_create_then_show_round_trips() {
    let h = TestHarness::new().await;
    let request = names_request().with_memberof("eng").with_type(TargetType::User);
    let created = h.service.create("people", &request).await.unwrap();

    let shown = h.service.show("PEOPLE").await.unwrap();
    let created = Aci::parse(&created).unwrap();
    assert!(Aci::parse(&shown).unwrap().structural_eq(&created));
    assert_eq!(
        created.target.target_filter.unwrap().expression,
        format!("(memberOf={ENG_DN})")
    );
}

#[tokio::test]
async fn test_create_duplicate_is_rejected() {
    let h = TestHarness::new().await;
    h.service.create("edit names", &names_request()).await.unwrap();

    // Same rule, different name case, permission order and attribute order.
    let again = AciRequest::new("helpdesk", vec![Permission::Write, Permission::Read])
        .with_attrs(["SN", "cn"]);
    let err = h.service.create("Edit Names", &again).await.unwrap_err();

    assert!(err.is_duplicate());
    assert_eq!(h.raw().await.len(), 1);
    assert_eq!(h.directory.write_count(), 1);
}

#[tokio::test]
async fn test_create_same_name_different_body_is_allowed() {
    let h = TestHarness::new().await;
    h.service.create("edit names", &names_request()).await.unwrap();

    let other = names_request().with_attrs(["mail"]);
    h.service.create("edit names", &other).await.unwrap();
    assert_eq!(h.raw().await.len(), 2);
}

#[tokio::test]
async fn test_create_makes_missing_taskgroup() {
    let h = TestHarness::new().await;
    let request = AciRequest::new("mailadmins", vec![Permission::All]).with_attrs(["mail"]);
    let text = h.service.create("mail admin", &request).await.unwrap();

    let Lookup::Found(dn) = h
        .directory
        .find_group(GroupKind::TaskGroup, "mailadmins")
        .await
        .unwrap()
    else {
        unreachable!("taskgroup should have been created");
    };
    assert!(text.contains(&format!("ldap:///{dn}")));

    let entry = h.directory.get_entry(&dn, &["description"]).await.unwrap();
    assert_eq!(entry.values("description"), ["mail admin".to_string()]);
}

#[tokio::test]
async fn test_create_with_unknown_memberof_fails() {
    let h = TestHarness::new().await;
    let request = names_request().with_memberof("ghosts");
    let err = h.service.create("haunted", &request).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(h.raw().await.is_empty());
    assert_eq!(h.directory.write_count(), 0);
}

#[tokio::test]
async fn test_create_without_target_is_invalid() {
    let h = TestHarness::new().await;
    let request = AciRequest::new("helpdesk", vec![Permission::Read]);
    let err = h.service.create("nowhere", &request).await.unwrap_err();

    assert!(matches!(err, Error::Aci(acier_aci::Error::Invalid(_))));
    assert!(h.raw().await.is_empty());
}

#[tokio::test]
async fn test_create_without_permissions_is_invalid() {
    let h = TestHarness::new().await;
    let request = AciRequest::new("helpdesk", vec![]).with_attrs(["cn"]);
    let err = h.service.create("no rights", &request).await.unwrap_err();
    assert!(matches!(err, Error::Aci(_)));
}

#[tokio::test]
async fn test_create_keeps_malformed_values() {
    let h = TestHarness::with_raw_acis(&["garbage value", A1]).await;
    h.service.create("edit names", &names_request()).await.unwrap();

    let raw = h.raw().await;
    assert_eq!(raw.len(), 3);
    assert_eq!(raw[0], "garbage value");
    assert_eq!(raw[1], A1);
}

#[tokio::test]
async fn test_create_rejects_taskgroup_name_with_semicolon() {
    let h = TestHarness::new().await;
    let request = AciRequest::new("ops;1", vec![Permission::Read]).with_attrs(["cn"]);

    let err = h.service.create("x", &request).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Core(acier_core::Error::Validation { .. })
    ));
    assert!(h.raw().await.is_empty());
    assert_eq!(h.directory.write_count(), 0);
}

#[tokio::test]
async fn test_create_with_semicolon_in_grantee_dn_reads_back() {
    let h = TestHarness::new().await;
    let request = AciRequest::new(GroupRef::Dn("cn=ops;1,dc=example".into()), vec![Permission::Read])
        .with_attrs(["cn"]);

    let text = h.service.create("x", &request).await.unwrap();
    assert_eq!(
        text,
        r#"(targetattr = "cn")(version 3.0;acl "x";allow (read) groupdn = "ldap:///cn=ops;1,dc=example";)"#
    );

    let stored = Aci::parse(&h.raw().await[0]).unwrap();
    assert_eq!(stored.bind_rule.dn(), Some("cn=ops;1,dc=example"));
    assert_eq!(h.service.show("x").await.unwrap(), text);
    assert_eq!(h.service.find(&FindCriteria::default()).await.unwrap().count, 1);
    assert!(h.service.delete("x").await.unwrap());
    assert!(h.raw().await.is_empty());
}
