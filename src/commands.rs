//! One-shot commands driving a resource panel through its lifecycle.
//!
//! Each mutating command mounts the panel, waits for the initial list, opens
//! the modal, fills the form, submits, and prints the reloaded table, the same
//! sequence an interactive session goes through.

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

use crate::api::{ApiClient, ApiError, HttpClient};
use crate::cli::{AccessRuleCommand, Cli, Command, ConfigCommand, UserCommand};
use crate::config::{Config, DisplayConfig};
use crate::constants::{
    ERROR_DELETE_FAILED, ERROR_LIST_LOAD_FAILED, ERROR_SAVE_FAILED, SUCCESS_ACCESS_RULE_DELETED,
    SUCCESS_ACCESS_RULE_SAVED, SUCCESS_USER_CREATED, SUCCESS_USER_DELETED, SUCCESS_USER_UPDATED,
};
use crate::lifecycle::{FormOutcome, LifecycleController, LifecycleError, ResourceForm};
use crate::logger::Logger;
use crate::notify::LatestNotification;
use crate::resources::{AccessRules, BucketScope, GlobalScope, Resource, Users};
use crate::table::Table;

/// Shared dependencies of every command
#[derive(Clone)]
pub struct CommandContext {
    pub client: Arc<dyn ApiClient>,
    pub notifier: Arc<LatestNotification>,
    pub display: DisplayConfig,
}

impl CommandContext {
    pub fn new(client: Arc<dyn ApiClient>, display: DisplayConfig) -> Self {
        Self {
            client,
            notifier: Arc::new(LatestNotification::new()),
            display,
        }
    }

    /// Mount a panel and wait for its first list load.
    ///
    /// A failed load is fatal only when the command needs the list; otherwise
    /// it is logged and the panel stays usable.
    pub async fn open_panel<R: Resource>(&self, scope: R::Scope, needs_list: bool) -> Result<LifecycleController<R>> {
        let mut panel = LifecycleController::new(self.client.clone(), self.notifier.clone(), scope);
        panel.mount()?;
        panel.settle().await?;
        if let Some(error) = self.notifier.take() {
            let message = load_failed_message::<R>(&error);
            if needs_list {
                anyhow::bail!(message);
            }
            warn!("{}, continuing without the current list", message);
        }
        Ok(panel)
    }

    fn render<R: Resource>(&self, panel: &LifecycleController<R>) -> String {
        Table::new(&self.display).render::<R>(panel.records(), panel.is_loading())
    }

    /// Render the panel after a mutation, surfacing a failed reload
    async fn after_mutation<R: Resource>(&self, panel: &mut LifecycleController<R>, success: &str) -> Result<String> {
        panel.settle().await?;
        let table = self.render(panel);
        match self.notifier.take() {
            Some(error) => Ok(format!("{}\n{}\n\n{}", success, load_failed_message::<R>(&error), table)),
            None => Ok(format!("{}\n\n{}", success, table)),
        }
    }

    pub async fn list<R: Resource>(&self, scope: R::Scope) -> Result<String> {
        let panel = self.open_panel::<R>(scope, true).await?;
        Ok(self.render(&panel))
    }

    /// Create a record with the fields set by `fill`
    pub async fn add<R, F>(&self, scope: R::Scope, success: &str, fill: F) -> Result<String>
    where
        R: Resource,
        F: FnOnce(&mut ResourceForm<R>) -> Result<(), ApiError>,
    {
        let mut panel = self.open_panel::<R>(scope, false).await?;
        panel.open_add()?;
        let form = panel.form_mut().ok_or(LifecycleError::NoFormOpen)?;
        fill(form)?;
        self.save(&mut panel, success).await
    }

    /// Edit the record `key` with the fields changed by `fill`
    pub async fn edit<R, F>(&self, scope: R::Scope, key: &str, success: &str, fill: F) -> Result<String>
    where
        R: Resource,
        F: FnOnce(&mut ResourceForm<R>) -> Result<(), ApiError>,
    {
        let mut panel = self.open_panel::<R>(scope, true).await?;
        panel.open_edit(key).await?;
        let form = panel.form_mut().ok_or(LifecycleError::NoFormOpen)?;
        if let Some(error) = form.error() {
            anyhow::bail!("Failed to load {} '{}': {}", R::DISPLAY_NAME, key, error);
        }
        fill(form)?;
        self.save(&mut panel, success).await
    }

    pub async fn delete<R: Resource>(&self, scope: R::Scope, key: &str, success: &str) -> Result<String> {
        let mut panel = self.open_panel::<R>(scope, true).await?;
        panel.open_delete(key)?;
        let outcome = panel.confirm_delete().await?;
        match outcome {
            FormOutcome::Completed => self.after_mutation(&mut panel, success).await,
            _ => {
                let error = panel
                    .delete_confirmation()
                    .and_then(|confirmation| confirmation.error())
                    .unwrap_or("unknown error");
                anyhow::bail!("{} {}: {}", ERROR_DELETE_FAILED, R::DISPLAY_NAME.to_lowercase(), error)
            }
        }
    }

    async fn save<R: Resource>(&self, panel: &mut LifecycleController<R>, success: &str) -> Result<String> {
        let outcome = panel.submit_form().await?;
        match outcome {
            FormOutcome::Completed => self.after_mutation(panel, success).await,
            _ => {
                let error = panel.form().and_then(|form| form.error()).unwrap_or("unknown error");
                anyhow::bail!("{} {}: {}", ERROR_SAVE_FAILED, R::DISPLAY_NAME.to_lowercase(), error)
            }
        }
    }
}

fn load_failed_message<R: Resource>(error: &ApiError) -> String {
    format!("{} {}: {}", ERROR_LIST_LOAD_FAILED, R::ENTITY_NAME, error)
}

/// Run a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    if let Command::Config(ConfigCommand::Init { path }) = &cli.command {
        let path = match path {
            Some(path) => path.clone(),
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    }
    .with_endpoint(cli.endpoint.clone())?;

    Logger::from_config(&config.logging)?
        .with_stderr(cli.verbose)
        .install()
        .context("Failed to initialize logging")?;

    let client = HttpClient::from_config(&config.server)?;
    info!("Using console server at {}", client.base_url());
    let context = CommandContext::new(Arc::new(client), config.display.clone());

    let output = execute(&context, cli.command).await?;
    println!("{}", output);
    Ok(())
}

/// Execute a resource command and return its printable output
pub async fn execute(context: &CommandContext, command: Command) -> Result<String> {
    match command {
        Command::AccessRules(command) => execute_access_rules(context, command).await,
        Command::Users(command) => execute_users(context, command).await,
        Command::Config(_) => anyhow::bail!("config commands do not talk to the server"),
    }
}

async fn execute_access_rules(context: &CommandContext, command: AccessRuleCommand) -> Result<String> {
    match command {
        AccessRuleCommand::List { bucket } => context.list::<AccessRules>(BucketScope::new(bucket)).await,
        AccessRuleCommand::Add { bucket, prefix, access } => {
            context
                .add::<AccessRules, _>(BucketScope::new(bucket), SUCCESS_ACCESS_RULE_SAVED, |form| {
                    form.draft_mut().prefix = prefix;
                    form.select("access", &access)
                })
                .await
        }
        AccessRuleCommand::Edit { bucket, prefix, access } => {
            context
                .edit::<AccessRules, _>(BucketScope::new(bucket), &prefix, SUCCESS_ACCESS_RULE_SAVED, |form| {
                    form.select("access", &access)
                })
                .await
        }
        AccessRuleCommand::Delete { bucket, prefix } => {
            context
                .delete::<AccessRules>(BucketScope::new(bucket), &prefix, SUCCESS_ACCESS_RULE_DELETED)
                .await
        }
    }
}

async fn execute_users(context: &CommandContext, command: UserCommand) -> Result<String> {
    match command {
        UserCommand::List => context.list::<Users>(GlobalScope).await,
        UserCommand::Add(args) => {
            context
                .add::<Users, _>(GlobalScope, SUCCESS_USER_CREATED, |form| {
                    let draft = form.draft_mut();
                    draft.access_key = args.access_key;
                    draft.secret_key = args.secret_key;
                    draft.groups = args.groups;
                    Ok(())
                })
                .await
        }
        UserCommand::Edit {
            access_key,
            status,
            groups,
        } => {
            context
                .edit::<Users, _>(GlobalScope, &access_key, SUCCESS_USER_UPDATED, |form| {
                    if let Some(status) = status {
                        form.select("user-status", &status)?;
                    }
                    if !groups.is_empty() {
                        form.draft_mut().groups = groups;
                    }
                    Ok(())
                })
                .await
        }
        UserCommand::Delete { access_key } => {
            context
                .delete::<Users>(GlobalScope, &access_key, SUCCESS_USER_DELETED)
                .await
        }
    }
}
