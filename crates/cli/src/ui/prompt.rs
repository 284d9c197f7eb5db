//! Interactive confirmations

use crate::error::Result;
use dialoguer::{Confirm, theme::ColorfulTheme};

/// Ask a yes/no question, defaulting to no
///
/// Returns `true` without asking when `assume_yes` is set. A non-interactive
/// session never confirms implicitly.
pub fn confirm(prompt: &str, assume_yes: bool, interactive: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !interactive {
        tracing::warn!("Cannot ask for confirmation without a terminal, pass --yes to proceed");
        return Ok(false);
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(confirm("Install?", true, false).unwrap());
    }

    #[test]
    fn test_non_interactive_declines() {
        assert!(!confirm("Install?", false, false).unwrap());
    }
}
