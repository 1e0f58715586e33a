//! Delete tests.

use crate::common::*;

#[tokio::test]
async fn test_delete_missing_name_is_not_found() {
    let h = TestHarness::with_raw_acis(&[A1]).await;
    let err = h.service.delete("zz").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "ACI \"zz\" not found");
    assert_eq!(h.directory.write_count(), 0);
}

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let h = TestHarness::with_raw_acis(&[A1]).await;
    let kept = h.service.create("edit names", &names_request()).await.unwrap();

    assert!(h.service.delete("A1").await.unwrap());
    assert_eq!(h.raw().await, vec![kept]);
}

#[tokio::test]
async fn test_delete_matches_differently_formatted_value() {
    let stored = r#"(targetattr="cn")(version 3.0; acl "a1"; allow(read) groupdn="ldap:///cn=g1,dc=example";)"#;
    let h = TestHarness::with_raw_acis(&["junk", stored, "more junk"]).await;

    h.service.delete("a1").await.unwrap();
    assert_eq!(h.raw().await, vec!["junk".to_string(), "more junk".to_string()]);
}

#[tokio::test]
async fn test_delete_only_first_structural_duplicate() {
    let reformatted = r#"(targetattr="cn")(version 3.0;acl "A1";allow (read) groupdn = "ldap:///cn=g1,dc=example";)"#;
    let h = TestHarness::with_raw_acis(&[A1, reformatted]).await;

    h.service.delete("a1").await.unwrap();
    assert_eq!(h.raw().await, vec![reformatted.to_string()]);
}
