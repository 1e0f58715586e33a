//! Registry dispatch tests.

use acier_ops::{CommandInput, CommandOutput, CommandRegistry, FindCriteria, ModifyRequest};

use crate::common::*;

#[tokio::test]
async fn test_registry_drives_full_lifecycle() {
    let h = TestHarness::new().await;
    let registry = CommandRegistry::with_defaults();

    let created = registry
        .dispatch(
            "aci_create",
            &h.service,
            CommandInput::Create {
                name: "edit names".into(),
                request: names_request(),
            },
        )
        .await
        .unwrap();
    let CommandOutput::Aci(text) = created else {
        unreachable!("create returns an ACI");
    };

    let shown = registry
        .dispatch("aci_show", &h.service, CommandInput::Show { name: "edit names".into() })
        .await
        .unwrap();
    assert_eq!(shown, CommandOutput::Aci(text));

    let modified = registry
        .dispatch(
            "aci_mod",
            &h.service,
            CommandInput::Modify {
                name: "edit names".into(),
                request: ModifyRequest {
                    attrs: Some(vec!["cn".into()]),
                    ..ModifyRequest::default()
                },
            },
        )
        .await
        .unwrap();
    assert!(matches!(modified, CommandOutput::Aci(t) if t.contains(r#"(targetattr = "cn")"#)));

    let found = registry
        .dispatch("aci_find", &h.service, CommandInput::Find(FindCriteria::term("edit")))
        .await
        .unwrap();
    assert!(matches!(found, CommandOutput::Acis(ref r) if r.count == 1));

    let deleted = registry
        .dispatch("aci_delete", &h.service, CommandInput::Delete { name: "edit names".into() })
        .await
        .unwrap();
    assert_eq!(deleted, CommandOutput::Deleted(true));
    assert!(h.raw().await.is_empty());
}
