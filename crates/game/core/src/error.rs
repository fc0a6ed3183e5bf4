//! Common error infrastructure for tower-core.
//!
//! Domain-specific errors (`FloorError`, `CombatError`, `StateError`) live next
//! to the operations that raise them; this module holds the classification
//! shared by all of them.

use crate::state::{FloorId, Layer, Position};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may try another action (e.g. an enemy that cannot be beaten yet)
/// - **Validation**: invalid input such as an off-map coordinate
/// - **Internal**: state inconsistency that indicates a bug or corrupt data
/// - **Fatal**: the game cannot continue (e.g. no active hero)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Location information attached to errors for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ErrorContext {
    pub floor: Option<FloorId>,
    pub layer: Option<Layer>,
    pub position: Option<Position>,
}

impl ErrorContext {
    #[must_use]
    pub fn new(floor: FloorId) -> Self {
        Self {
            floor: Some(floor),
            layer: None,
            position: None,
        }
    }

    /// Attaches a layer to this context (builder pattern).
    #[must_use]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Attaches a position to this context (builder pattern).
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Common trait for all tower-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the location information for this error, if available.
    fn context(&self) -> Option<ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
