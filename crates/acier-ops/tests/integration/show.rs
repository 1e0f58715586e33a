//! Show tests.

use crate::common::*;

#[tokio::test]
async fn test_show_returns_canonical_text() {
    let stored = r#"(targetattr="cn")(version 3.0; acl "a1"; allow(read) groupdn="ldap:///cn=g1,dc=example";)"#;
    let h = TestHarness::with_raw_acis(&[stored]).await;

    assert_eq!(h.service.show("A1").await.unwrap(), A1);
    assert_eq!(h.directory.write_count(), 0);
}

#[tokio::test]
async fn test_show_missing_is_not_found() {
    let h = TestHarness::with_raw_acis(&[A1]).await;
    assert!(h.service.show("a2").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_show_ignores_malformed_values() {
    let h = TestHarness::with_raw_acis(&["(broken", A1, "(version 3.0;acl \"a1\";)"]).await;
    assert_eq!(h.service.show("a1").await.unwrap(), A1);
}
