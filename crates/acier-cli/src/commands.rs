//! Mapping from parsed subcommands to registry commands.

use std::sync::Arc;

use acier_aci::normalize_permissions;
use acier_core::GroupKind;
use acier_directory::FileDirectory;
use acier_ops::{
    AciRequest, AciService, CommandInput, CommandRegistry, FindCriteria, GroupRef, ModifyRequest,
};

use crate::cli::{Command, GroupAction, TargetArgs};
use crate::config::AcierConfig;
use crate::error::{Error, Result};
use crate::output;

/// A registry command ready to dispatch.
#[derive(Debug)]
pub struct Invocation {
    /// Registry key
    pub command: &'static str,
    /// ACI name, empty for find
    pub name: String,
    /// Command input
    pub input: CommandInput,
}

/// Translate an ACI subcommand into a registry invocation.
///
/// Returns `None` for subcommands that do not go through the registry.
pub fn invocation(command: Command) -> Option<Invocation> {
    let (key, name, input) = match command {
        Command::Create {
            name,
            taskgroup,
            permissions,
            target,
        } => {
            let mut request = AciRequest::new(taskgroup, normalize_permissions(&permissions));
            apply_target(&mut request, target);
            let input = CommandInput::Create {
                name: name.clone(),
                request,
            };
            ("aci_create", name, input)
        }
        Command::Delete { name } => {
            let input = CommandInput::Delete { name: name.clone() };
            ("aci_delete", name, input)
        }
        Command::Modify {
            name,
            taskgroup,
            permissions,
            target,
        } => {
            let request = ModifyRequest {
                taskgroup: taskgroup.map(GroupRef::Name),
                permissions: permissions.as_deref().map(normalize_permissions),
                attrs: target.attrs,
                target_type: target.target_type,
                memberof: target.memberof,
                filter: target.filter,
                subtree: target.subtree,
                targetgroup: target.targetgroup,
            };
            let input = CommandInput::Modify {
                name: name.clone(),
                request,
            };
            ("aci_mod", name, input)
        }
        Command::Find {
            term,
            aciname,
            taskgroup,
            permissions,
            target,
        } => {
            let criteria = FindCriteria {
                term,
                aciname,
                attrs: target.attrs,
                taskgroup,
                permissions: permissions.as_deref().map(normalize_permissions),
                memberof: target.memberof,
                filter: target.filter,
                subtree: target.subtree,
                target_type: target.target_type,
            };
            ("aci_find", String::new(), CommandInput::Find(criteria))
        }
        Command::Show { name } => {
            let input = CommandInput::Show { name: name.clone() };
            ("aci_show", name, input)
        }
        Command::Group { .. } | Command::Config { .. } => return None,
    };
    Some(Invocation {
        command: key,
        name,
        input,
    })
}

fn apply_target(request: &mut AciRequest, target: TargetArgs) {
    request.attrs = target.attrs;
    request.target_type = target.target_type;
    request.memberof = target.memberof;
    request.filter = target.filter;
    request.subtree = target.subtree;
    request.targetgroup = target.targetgroup;
}

/// Run a non-config subcommand against the configured directory file and
/// return the text to print.
pub async fn run(config: &AcierConfig, command: Command) -> Result<String> {
    let directory = Arc::new(FileDirectory::new(
        config.store.path.clone(),
        config.directory.clone(),
    ));

    if let Command::Group {
        action: GroupAction::Add { name, task, desc },
    } = command
    {
        let kind = if task {
            GroupKind::TaskGroup
        } else {
            GroupKind::Group
        };
        let dn = directory.add_group(kind, &name, &desc).await?;
        return Ok(format!("Added {} \"{name}\"\n  {dn}", kind.label()));
    }

    let Some(invocation) = invocation(command) else {
        return Err(Error::config("config subcommands do not use the directory"));
    };

    let service = AciService::new(directory.clone(), directory, config.directory.clone());
    let registry = CommandRegistry::with_defaults();
    let result = registry
        .dispatch(invocation.command, &service, invocation.input)
        .await?;
    Ok(output::render(invocation.command, &invocation.name, &result))
}
