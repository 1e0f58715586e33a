//! Turns an [`AciRequest`] into an [`Aci`], or applies a
//! [`ModifyRequest`] on top of an existing one.

use acier_aci::{Aci, BindRule};
use acier_core::{DirectoryConfig, GroupDirectory, GroupKind, Lookup};

use crate::error::Result;
use crate::request::{AciRequest, GroupRef, ModifyRequest, TargetType, subtree_uri};

/// Target qualifiers shared by create and modify requests.
struct Qualifiers<'r> {
    attrs: Option<&'r [String]>,
    target_type: Option<TargetType>,
    memberof: Option<&'r str>,
    filter: Option<&'r str>,
    subtree: Option<&'r str>,
    targetgroup: Option<&'r str>,
}

impl<'r> From<&'r AciRequest> for Qualifiers<'r> {
    fn from(r: &'r AciRequest) -> Self {
        Self {
            attrs: r.attrs.as_deref(),
            target_type: r.target_type,
            memberof: r.memberof.as_deref(),
            filter: r.filter.as_deref(),
            subtree: r.subtree.as_deref(),
            targetgroup: r.targetgroup.as_deref(),
        }
    }
}

impl<'r> From<&'r ModifyRequest> for Qualifiers<'r> {
    fn from(r: &'r ModifyRequest) -> Self {
        Self {
            attrs: r.attrs.as_deref(),
            target_type: r.target_type,
            memberof: r.memberof.as_deref(),
            filter: r.filter.as_deref(),
            subtree: r.subtree.as_deref(),
            targetgroup: r.targetgroup.as_deref(),
        }
    }
}

/// Builds ACIs from requests, resolving group references on the way.
pub struct AciBuilder<'a> {
    groups: &'a dyn GroupDirectory,
    config: &'a DirectoryConfig,
}

impl<'a> AciBuilder<'a> {
    /// Create a builder over a group directory and layout.
    pub fn new(groups: &'a dyn GroupDirectory, config: &'a DirectoryConfig) -> Self {
        Self { groups, config }
    }

    /// Build the ACI `name` described by `request`.
    ///
    /// A missing grantee task-group is created with the ACI name as its
    /// description. Missing `memberof` or `targetgroup` groups are
    /// [`NotFound`](acier_core::Error::NotFound).
    pub async fn build(&self, name: &str, request: &AciRequest) -> Result<Aci> {
        let grantee = self.resolve_grantee(name, &request.taskgroup).await?;

        let mut aci = Aci::new(name);
        aci.set_permissions(request.permissions.iter().copied());
        aci.set_bind_rule(BindRule::group_dn(&grantee));
        self.apply_qualifiers(&mut aci, request.into()).await?;
        Ok(aci)
    }

    /// Apply the fields `request` sets to `aci`.
    ///
    /// Clauses the request does not touch are left exactly as they are,
    /// operator and bind keyword included. Setting any of `target_type`,
    /// `targetgroup` or `subtree` replaces the `target` clause; setting
    /// `memberof` or `filter` replaces the `targetfilter` clause.
    pub async fn apply(&self, aci: &mut Aci, request: &ModifyRequest) -> Result<()> {
        if let Some(taskgroup) = &request.taskgroup {
            let grantee = self.resolve_grantee(&aci.name, taskgroup).await?;
            aci.set_bind_rule(BindRule::group_dn(&grantee));
        }
        if let Some(permissions) = &request.permissions {
            aci.set_permissions(permissions.iter().copied());
        }
        self.apply_qualifiers(aci, request.into()).await
    }

    async fn apply_qualifiers(&self, aci: &mut Aci, q: Qualifiers<'_>) -> Result<()> {
        if let Some(attrs) = q.attrs {
            aci.set_target_attr(attrs.iter().cloned());
        }
        if let Some(group) = q.memberof {
            let dn = self.require_group(group).await?;
            aci.set_target_filter(&format!("memberOf={dn}"));
        }
        if let Some(filter) = q.filter {
            aci.set_target_filter(filter);
        }
        if let Some(target_type) = q.target_type {
            aci.set_target(target_type.target_uri(self.config));
        }
        if let Some(group) = q.targetgroup {
            let dn = self.require_group(group).await?;
            aci.set_target(subtree_uri(&dn));
        }
        if let Some(subtree) = q.subtree {
            aci.set_target(subtree_uri(subtree));
        }
        Ok(())
    }

    async fn resolve_grantee(&self, aci_name: &str, taskgroup: &GroupRef) -> Result<String> {
        let name = match taskgroup {
            GroupRef::Dn(dn) => return Ok(dn.clone()),
            GroupRef::Name(name) => name,
        };
        match self.groups.find_group(GroupKind::TaskGroup, name).await? {
            Lookup::Found(dn) => Ok(dn),
            Lookup::NotFound => {
                log::info!("Taskgroup '{name}' not found, creating it for ACI '{aci_name}'");
                let entry = self.groups.create_taskgroup(name, aci_name).await?;
                Ok(entry.dn)
            }
        }
    }

    async fn require_group(&self, name: &str) -> Result<String> {
        let lookup = self.groups.find_group(GroupKind::Group, name).await?;
        Ok(lookup.require(GroupKind::Group, name)?)
    }
}
