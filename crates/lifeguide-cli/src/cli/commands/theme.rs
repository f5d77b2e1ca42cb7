//! Theme command handlers.

use anyhow::Result;
use lifeguide_core::preferences::{PreferenceStore, ThemeMode};

pub fn get() -> Result<()> {
    println!("{}", PreferenceStore::open_default().theme_mode()?);
    Ok(())
}

pub fn set(mode: ThemeMode) -> Result<()> {
    PreferenceStore::open_default().set_theme_mode(mode)?;
    println!("Theme set to {mode}");
    Ok(())
}
