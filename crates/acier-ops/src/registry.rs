//! Explicit command registry.
//!
//! Front ends look commands up by name and hand them a [`CommandInput`].
//! The registry is built once at startup with
//! [`CommandRegistry::with_defaults`] and passed by reference to whatever
//! needs to dispatch.
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = CommandRegistry::with_defaults();
//! let output = registry
//!     .dispatch("aci_show", &service, CommandInput::Show { name: "a1".into() })
//!     .await?;
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::request::{AciRequest, FindCriteria, FindResult, ModifyRequest};
use crate::service::AciService;

/// Input to a command.
#[derive(Debug, Clone)]
pub enum CommandInput {
    /// Create an ACI.
    Create {
        /// ACI name
        name: String,
        /// What to build
        request: AciRequest,
    },
    /// Delete an ACI by name.
    Delete {
        /// ACI name
        name: String,
    },
    /// Modify an ACI by name.
    Modify {
        /// ACI name
        name: String,
        /// Fields to change
        request: ModifyRequest,
    },
    /// Search ACIs.
    Find(FindCriteria),
    /// Show one ACI by name.
    Show {
        /// ACI name
        name: String,
    },
}

/// Output of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// A single serialized ACI.
    Aci(String),
    /// Serialized ACIs with their count.
    Acis(FindResult),
    /// Outcome of a delete.
    Deleted(bool),
}

/// A named operation the registry can dispatch to.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Registry key, e.g. `aci_create`.
    fn name(&self) -> &'static str;

    /// One-line description for help output.
    fn summary(&self) -> &'static str;

    /// Run the command.
    async fn execute(&self, service: &AciService, input: CommandInput) -> Result<CommandOutput>;
}

/// Mapping from command name to handler.
pub struct CommandRegistry {
    handlers: BTreeMap<&'static str, Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// A registry holding the five ACI commands.
    pub fn with_defaults() -> Self {
        Self::new()
            .register(CreateCommand)
            .register(DeleteCommand)
            .register(ModifyCommand)
            .register(FindCommand)
            .register(ShowCommand)
    }

    /// Add a handler, replacing any handler with the same name.
    pub fn register<H: CommandHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.insert(handler.name(), Box::new(handler));
        self
    }

    /// Look up a handler.
    pub fn get(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.keys().copied().collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the command called `name`.
    pub async fn dispatch(
        &self,
        name: &str,
        service: &AciService,
        input: CommandInput,
    ) -> Result<CommandOutput> {
        let handler = self
            .get(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
        log::debug!("Dispatching {name}");
        handler.execute(service, input).await
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

struct CreateCommand;

#[async_trait]
impl CommandHandler for CreateCommand {
    fn name(&self) -> &'static str {
        "aci_create"
    }

    fn summary(&self) -> &'static str {
        "Create new ACI."
    }

    async fn execute(&self, service: &AciService, input: CommandInput) -> Result<CommandOutput> {
        let CommandInput::Create { name, request } = input else {
            return Err(Error::InvalidInput {
                command: self.name(),
                expected: "create",
            });
        };
        Ok(CommandOutput::Aci(service.create(&name, &request).await?))
    }
}

struct DeleteCommand;

#[async_trait]
impl CommandHandler for DeleteCommand {
    fn name(&self) -> &'static str {
        "aci_delete"
    }

    fn summary(&self) -> &'static str {
        "Delete ACI."
    }

    async fn execute(&self, service: &AciService, input: CommandInput) -> Result<CommandOutput> {
        let CommandInput::Delete { name } = input else {
            return Err(Error::InvalidInput {
                command: self.name(),
                expected: "delete",
            });
        };
        Ok(CommandOutput::Deleted(service.delete(&name).await?))
    }
}

struct ModifyCommand;

#[async_trait]
impl CommandHandler for ModifyCommand {
    fn name(&self) -> &'static str {
        "aci_mod"
    }

    fn summary(&self) -> &'static str {
        "Modify ACI."
    }

    async fn execute(&self, service: &AciService, input: CommandInput) -> Result<CommandOutput> {
        let CommandInput::Modify { name, request } = input else {
            return Err(Error::InvalidInput {
                command: self.name(),
                expected: "modify",
            });
        };
        Ok(CommandOutput::Aci(service.modify(&name, &request).await?))
    }
}

struct FindCommand;

#[async_trait]
impl CommandHandler for FindCommand {
    fn name(&self) -> &'static str {
        "aci_find"
    }

    fn summary(&self) -> &'static str {
        "Search for ACIs."
    }

    async fn execute(&self, service: &AciService, input: CommandInput) -> Result<CommandOutput> {
        let CommandInput::Find(criteria) = input else {
            return Err(Error::InvalidInput {
                command: self.name(),
                expected: "find",
            });
        };
        Ok(CommandOutput::Acis(service.find(&criteria).await?))
    }
}

struct ShowCommand;

#[async_trait]
impl CommandHandler for ShowCommand {
    fn name(&self) -> &'static str {
        "aci_show"
    }

    fn summary(&self) -> &'static str {
        "Display ACI."
    }

    async fn execute(&self, service: &AciService, input: CommandInput) -> Result<CommandOutput> {
        let CommandInput::Show { name } = input else {
            return Err(Error::InvalidInput {
                command: self.name(),
                expected: "show",
            });
        };
        Ok(CommandOutput::Aci(service.show(&name).await?))
    }
}
