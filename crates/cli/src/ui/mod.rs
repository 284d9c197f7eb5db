//! Terminal output helpers

pub mod icons;
pub mod prompt;

pub use icons::StatusIcon;
pub use prompt::confirm;
