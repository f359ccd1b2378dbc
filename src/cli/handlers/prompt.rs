//! Interactive confirmation

use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::error::Result;

/// Ask before a destructive action; `assume_yes` skips the prompt
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
