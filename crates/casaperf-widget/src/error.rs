//! Widget error types.

use casaperf_commerce::CommerceError;
use thiserror::Error;

use crate::commands::CommandKind;

/// Errors raised while setting the widget up.
///
/// Once running, the widget absorbs failures into defaults; these only
/// surface from configuration parsing and page boot.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Page configuration is not valid TOML for [`WidgetConfig`](crate::config::WidgetConfig).
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// A handler is already registered for this command kind.
    #[error("Handler already registered for {0:?}")]
    AlreadyRegistered(CommandKind),

    /// A required browser object was unavailable.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Commerce layer failure.
    #[error("Commerce error: {0}")]
    Commerce(#[from] CommerceError),
}
