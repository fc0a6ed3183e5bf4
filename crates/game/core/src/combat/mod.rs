//! Combat resolution system.
//!
//! - `damage`: the [`DamageCalculator`] service and the default [`StandardFormula`]
//! - `style`: display text/colour of cached damage previews
//! - `error`: failures raised while resolving a battle

pub mod damage;
mod error;
pub mod style;

pub use damage::{DamageCalculator, DamageResult, Special, StandardFormula};
pub use error::CombatError;
pub use style::{DamageStyle, format_damage};
