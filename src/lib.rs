//! Bucketry - a terminal client for an object-storage console server
//!
//! This library manages remote collections exposed by the console REST API,
//! bucket access rules and users, through one create/edit/delete lifecycle:
//! fetch the collection, display it, mutate a record through a modal, and
//! refetch.
//!
//! # Modules
//!
//! * [`api`] - REST client trait, HTTP implementation and error types
//! * [`resources`] - Record schemas and endpoints per resource kind
//! * [`lifecycle`] - Loader, modal controller, forms and delete confirmation
//! * [`notify`] - Notification sink for list-load errors
//! * [`table`] - Plain-text table rendering
//! * [`config`] - Application configuration management
//! * [`cli`] / [`commands`] - Command line front-end

/// REST client for the console API
pub mod api;

/// Command line arguments
pub mod cli;

/// Command execution on top of the lifecycle controller
pub mod commands;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Create/edit/delete lifecycle for remote collections
pub mod lifecycle;

/// Logging setup
pub mod logger;

/// Notification sink
pub mod notify;

/// Resource kinds managed through the API
pub mod resources;

/// Table rendering for resource collections
pub mod table;
