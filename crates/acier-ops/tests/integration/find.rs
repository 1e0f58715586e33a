//! Find tests.

use acier_aci::Permission;
use acier_ops::{AciRequest, FindCriteria, TargetType};

use crate::common::*;

async fn populated() -> TestHarness {
    let h = TestHarness::with_raw_acis(&[A1, "not an aci"]).await;
    h.service.create("edit names", &names_request()).await.unwrap();
    h.service
        .create(
            "eng mail",
            &AciRequest::new("helpdesk", vec![Permission::Read, Permission::Write, Permission::Add])
                .with_attrs(["mail"])
                .with_memberof("eng"),
        )
        .await
        .unwrap();
    h.service
        .create(
            "host names",
            &AciRequest::new("hostadmins", vec![Permission::Write])
                .with_attrs(["cn"])
                .with_type(TargetType::Host),
        )
        .await
        .unwrap();
    h
}

fn names(result: &acier_ops::FindResult) -> Vec<String> {
    result
        .entries
        .iter()
        .map(|text| acier_aci::Aci::parse(text).unwrap().name)
        .collect()
}

#[tokio::test]
async fn test_find_by_term() {
    let h = TestHarness::with_raw_acis(&[A1]).await;

    let result = h.service.find(&FindCriteria::term("a1")).await.unwrap();
    assert_eq!(result.count, 1);
    assert_eq!(result.entries, vec![A1.to_string()]);

    let result = h.service.find(&FindCriteria::term("zz")).await.unwrap();
    assert_eq!(result.count, 0);
    assert!(result.entries.is_empty());
}

#[tokio::test]
async fn test_find_empty_term_returns_all_decodable() {
    let h = populated().await;
    let result = h.service.find(&FindCriteria::default()).await.unwrap();
    assert_eq!(result.count, 4);
    assert_eq!(names(&result), vec!["a1", "edit names", "eng mail", "host names"]);
    assert_eq!(h.directory.write_count(), 3);
}

#[tokio::test]
async fn test_find_term_is_case_insensitive_substring() {
    let h = populated().await;
    let result = h.service.find(&FindCriteria::term("NAMES")).await.unwrap();
    assert_eq!(names(&result), vec!["edit names", "host names"]);
}

#[tokio::test]
async fn test_find_by_aciname_is_exact() {
    let h = populated().await;
    let criteria = FindCriteria {
        aciname: Some("eng mail".into()),
        ..FindCriteria::default()
    };
    assert_eq!(h.service.find(&criteria).await.unwrap().count, 1);

    let criteria = FindCriteria {
        aciname: Some("ENG MAIL".into()),
        ..FindCriteria::default()
    };
    assert_eq!(h.service.find(&criteria).await.unwrap().count, 0);
}

#[tokio::test]
async fn test_find_by_attrs() {
    let h = populated().await;
    let criteria = FindCriteria {
        attrs: Some(vec!["SN".into(), "cn".into()]),
        ..FindCriteria::default()
    };
    assert_eq!(names(&h.service.find(&criteria).await.unwrap()), vec!["edit names"]);
}

#[tokio::test]
async fn test_find_by_permissions_exact_set() {
    let h = populated().await;
    let criteria = FindCriteria {
        permissions: Some(vec![Permission::Write, Permission::Read]),
        ..FindCriteria::default()
    };
    // "eng mail" also has add, so it is not an exact match.
    assert_eq!(names(&h.service.find(&criteria).await.unwrap()), vec!["edit names"]);
}

#[tokio::test]
async fn test_find_by_taskgroup() {
    let h = populated().await;
    let criteria = FindCriteria {
        taskgroup: Some("hostadmins".into()),
        ..FindCriteria::default()
    };
    assert_eq!(names(&h.service.find(&criteria).await.unwrap()), vec!["host names"]);
}

#[tokio::test]
async fn test_find_unresolved_taskgroup_is_inert() {
    let h = populated().await;
    let criteria = FindCriteria {
        term: "names".into(),
        taskgroup: Some("nobody".into()),
        ..FindCriteria::default()
    };
    assert_eq!(h.service.find(&criteria).await.unwrap().count, 2);
}

#[tokio::test]
async fn test_find_by_memberof_chains() {
    let h = populated().await;
    let criteria = FindCriteria {
        memberof: Some("eng".into()),
        ..FindCriteria::default()
    };
    assert_eq!(names(&h.service.find(&criteria).await.unwrap()), vec!["eng mail"]);

    // Combined with a term that excludes it, nothing survives.
    let criteria = FindCriteria {
        term: "host".into(),
        memberof: Some("eng".into()),
        ..FindCriteria::default()
    };
    assert_eq!(h.service.find(&criteria).await.unwrap().count, 0);
}

#[tokio::test]
async fn test_find_unresolved_memberof_is_inert() {
    let h = populated().await;
    let criteria = FindCriteria {
        memberof: Some("ghosts".into()),
        ..FindCriteria::default()
    };
    assert_eq!(h.service.find(&criteria).await.unwrap().count, 4);
}

#[tokio::test]
async fn test_find_by_filter_subtree_and_type() {
    let h = populated().await;

    let criteria = FindCriteria {
        filter: Some(format!("memberOf={ENG_DN}")),
        ..FindCriteria::default()
    };
    assert_eq!(names(&h.service.find(&criteria).await.unwrap()), vec!["eng mail"]);

    let criteria = FindCriteria {
        target_type: Some(TargetType::Host),
        ..FindCriteria::default()
    };
    assert_eq!(names(&h.service.find(&criteria).await.unwrap()), vec!["host names"]);

    let criteria = FindCriteria {
        subtree: Some("cn=*,cn=computers,cn=accounts,dc=example,dc=com".into()),
        ..FindCriteria::default()
    };
    assert_eq!(names(&h.service.find(&criteria).await.unwrap()), vec!["host names"]);
}

#[tokio::test]
async fn test_find_combines_criteria() {
    let h = populated().await;
    let criteria = FindCriteria {
        term: "e".into(),
        attrs: Some(vec!["cn".into(), "sn".into()]),
        taskgroup: Some("helpdesk".into()),
        permissions: Some(vec![Permission::Read, Permission::Write]),
        ..FindCriteria::default()
    };
    let result = h.service.find(&criteria).await.unwrap();
    assert_eq!(result.count, 1);
    assert_eq!(names(&result), vec!["edit names"]);
}
