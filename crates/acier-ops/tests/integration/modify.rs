//! Modify tests.

use acier_aci::{Aci, Permission};
use acier_ops::{GroupRef, ModifyRequest, TargetType};

use crate::common::*;

#[tokio::test]
async fn test_modify_missing_is_not_found() {
    let h = TestHarness::new().await;
    let err = h
        .service
        .modify("nope", &ModifyRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(h.directory.write_count(), 0);
}

#[tokio::test]
async fn test_modify_changes_only_requested_fields() {
    let h = TestHarness::new().await;
    let request = names_request().with_memberof("eng").with_subtree("ou=people,dc=example,dc=com");
    let before = h.service.create("people", &request).await.unwrap();

    let change = ModifyRequest {
        permissions: Some(vec![Permission::Read]),
        ..ModifyRequest::default()
    };
    let after = h.service.modify("people", &change).await.unwrap();

    let before = Aci::parse(&before).unwrap();
    let after = Aci::parse(&after).unwrap();
    assert_eq!(after.permissions, vec![Permission::Read]);
    assert_eq!(after.bind_rule, before.bind_rule);
    assert_eq!(after.target, before.target);
    assert_eq!(h.raw().await, vec![after.to_string()]);
}

#[tokio::test]
async fn test_modify_keeps_grantee_without_creating_groups() {
    let h = TestHarness::with_raw_acis(&[A1]).await;
    let change = ModifyRequest {
        attrs: Some(vec!["mail".into()]),
        ..ModifyRequest::default()
    };
    let text = h.service.modify("a1", &change).await.unwrap();

    assert_eq!(
        text,
        r#"(targetattr = "mail")(version 3.0;acl "a1";allow (read) groupdn = "ldap:///cn=g1,dc=example";)"#
    );
}

#[tokio::test]
async fn test_modify_type_replaces_existing_subtree() {
    let h = TestHarness::new().await;
    let request = names_request().with_subtree("ou=people,dc=example,dc=com");
    h.service.create("people", &request).await.unwrap();

    let change = ModifyRequest {
        target_type: Some(TargetType::User),
        ..ModifyRequest::default()
    };
    let after = Aci::parse(&h.service.modify("people", &change).await.unwrap()).unwrap();
    assert_eq!(
        after.target.target.unwrap().expression,
        "ldap:///uid=*,cn=users,cn=accounts,dc=example,dc=com"
    );
}

#[tokio::test]
async fn test_modify_new_taskgroup_name() {
    let h = TestHarness::new().await;
    h.service.create("people", &names_request()).await.unwrap();

    let change = ModifyRequest {
        taskgroup: Some(GroupRef::from("newtg")),
        ..ModifyRequest::default()
    };
    let after = Aci::parse(&h.service.modify("people", &change).await.unwrap()).unwrap();
    assert_eq!(
        after.bind_rule.dn(),
        Some("cn=newtg,cn=taskgroups,cn=accounts,dc=example,dc=com")
    );
}

#[tokio::test]
async fn test_modify_failure_after_delete_loses_original() {
    let h = TestHarness::new().await;
    h.service.create("people", &names_request()).await.unwrap();

    let change = ModifyRequest {
        memberof: Some("ghosts".into()),
        ..ModifyRequest::default()
    };
    let err = h.service.modify("people", &change).await.unwrap_err();

    assert!(err.is_not_found());
    // Delete already happened; the original is gone.
    assert!(h.raw().await.is_empty());
    assert!(h.service.show("people").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_modify_into_duplicate_of_other_aci_loses_original() {
    let h = TestHarness::new().await;
    h.service.create("people", &names_request()).await.unwrap();
    h.service
        .create("people", &names_request().with_attrs(["mail"]))
        .await
        .unwrap();

    // The first "people" found is the cn/sn one; turning it into the mail
    // one collides with the second.
    let change = ModifyRequest {
        attrs: Some(vec!["mail".into()]),
        ..ModifyRequest::default()
    };
    let err = h.service.modify("people", &change).await.unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(h.raw().await.len(), 1);
}

/// Everyone except `cn=blocked` may read every attribute except
/// `userPassword`.
const EXCLUSIONS: &str = r#"(targetattr != "userPassword")(version 3.0;acl "self";allow (read) groupdn != "ldap:///cn=blocked,dc=example";)"#;

#[tokio::test]
async fn test_modify_permissions_keeps_not_equal_clauses() {
    let h = TestHarness::with_raw_acis(&[EXCLUSIONS]).await;
    let change = ModifyRequest {
        permissions: Some(vec![Permission::Read, Permission::Write]),
        ..ModifyRequest::default()
    };

    let text = h.service.modify("self", &change).await.unwrap();
    assert_eq!(
        text,
        r#"(targetattr != "userPassword")(version 3.0;acl "self";allow (read,write) groupdn != "ldap:///cn=blocked,dc=example";)"#
    );
    assert_eq!(h.raw().await, vec![text]);
}

#[tokio::test]
async fn test_modify_keeps_non_groupdn_bind_rule() {
    let h = TestHarness::with_raw_acis(&[
        r#"(targetattr = "mail")(version 3.0;acl "anon";allow (read) userdn = "ldap:///anyone";)"#,
    ])
    .await;
    let change = ModifyRequest {
        attrs: Some(vec!["mail".into(), "cn".into()]),
        ..ModifyRequest::default()
    };

    let after = Aci::parse(&h.service.modify("anon", &change).await.unwrap()).unwrap();
    assert_eq!(after.bind_rule.keyword, "userdn");
    assert_eq!(after.bind_rule.expression, "ldap:///anyone");
    assert_eq!(after.target.attrs(), ["mail".to_string(), "cn".to_string()]);
}

#[tokio::test]
async fn test_modify_replacing_a_clause_drops_its_operator() {
    let h = TestHarness::with_raw_acis(&[EXCLUSIONS]).await;
    let change = ModifyRequest {
        attrs: Some(vec!["cn".into()]),
        ..ModifyRequest::default()
    };

    let after = Aci::parse(&h.service.modify("self", &change).await.unwrap()).unwrap();
    let attr = after.target.target_attr.unwrap();
    assert_eq!(attr.operator, acier_aci::Operator::Equal);
    assert_eq!(attr.expression, vec!["cn".to_string()]);
    assert_eq!(after.bind_rule.operator, acier_aci::Operator::NotEqual);
}
