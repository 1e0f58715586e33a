//! Common test utilities and harness for ACI operation tests.

use std::sync::Arc;

use acier_aci::Permission;
use acier_core::{DirectoryConfig, GroupKind};
use acier_directory::MemoryDirectory;
use acier_ops::{AciRequest, AciService};

/// DN of the `helpdesk` task-group in the default layout.
pub const HELPDESK_DN: &str = "cn=helpdesk,cn=taskgroups,cn=accounts,dc=example,dc=com";

/// DN of the `eng` group in the default layout.
pub const ENG_DN: &str = "cn=eng,cn=groups,cn=accounts,dc=example,dc=com";

/// Test harness wiring a service to an in-memory directory.
///
/// The directory starts with task-group `helpdesk` and groups `eng` and
/// `admins`.
pub struct TestHarness {
    /// Directory backing the service
    pub directory: Arc<MemoryDirectory>,
    /// Service under test
    pub service: AciService,
}

impl TestHarness {
    /// Creates a harness with the default groups and no ACIs.
    pub async fn new() -> Self {
        let config = DirectoryConfig::default();
        let directory = Arc::new(MemoryDirectory::new(config.clone()));
        directory
            .add_group(GroupKind::TaskGroup, "helpdesk")
            .await
            .unwrap();
        directory.add_group(GroupKind::Group, "eng").await.unwrap();
        directory.add_group(GroupKind::Group, "admins").await.unwrap();
        let service = AciService::new(directory.clone(), directory.clone(), config);
        Self { directory, service }
    }

    /// Creates a harness whose base entry already holds `raw` ACI values.
    pub async fn with_raw_acis(raw: &[&str]) -> Self {
        let harness = Self::new().await;
        harness
            .directory
            .set_raw_acis(raw.iter().copied())
            .await
            .unwrap();
        harness
    }

    /// Current raw values of the `aci` attribute.
    pub async fn raw(&self) -> Vec<String> {
        self.directory.raw_acis().await
    }
}

/// A `read,write` on `cn || sn` request granted to `helpdesk`.
pub fn names_request() -> AciRequest {
    AciRequest::new("helpdesk", vec![Permission::Read, Permission::Write]).with_attrs(["cn", "sn"])
}

/// A single `read` ACI on `cn` granted to `cn=g1,dc=example`.
pub const A1: &str =
    r#"(targetattr = "cn")(version 3.0;acl "a1";allow (read) groupdn = "ldap:///cn=g1,dc=example";)"#;
