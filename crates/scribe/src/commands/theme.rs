//! `scribe theme` command implementation.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use scribe_config::{CliSettings, Config, SystemTheme};
use scribe_state::{
    AppContext, ColorScheme, FilePreferences, RootAttributes, ThemeEvent, ToastKind, ToastQueue,
};

use super::flush_toasts;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the theme command.
#[derive(Args)]
pub(crate) struct ThemeArgs {
    #[command(subcommand)]
    action: Option<ThemeAction>,

    /// Path to configuration file (default: auto-discover scribe.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Preferences file (overrides config).
    #[arg(long, global = true, env = "SCRIBE_PREFERENCES")]
    preferences_file: Option<PathBuf>,

    /// Treat the system as preferring dark mode when nothing is saved.
    #[arg(long, global = true)]
    system_dark: bool,
}

#[derive(Subcommand, Clone, Copy, Default)]
enum ThemeAction {
    /// Print the current theme (default).
    #[default]
    Show,
    /// Switch between dark and light.
    Toggle,
    /// Switch to dark mode.
    Dark,
    /// Switch to light mode.
    Light,
}

impl ThemeArgs {
    /// Execute the theme command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or the preferences file cannot be loaded.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let settings = CliSettings {
            preferences_file: self.preferences_file,
            system_default: self.system_dark.then_some(SystemTheme::Dark),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        let preferences = FilePreferences::load(&config.theme_resolved.preferences_file)?;
        let system_dark = config.theme_resolved.system_default.is_dark();
        let duration = config.toast.duration();

        let mut app = AppContext::new(preferences, RootAttributes::new(), || system_dark)
            .with_toasts(ToastQueue::new().with_default_duration(duration));
        let changes = app.theme.subscribe();

        match self.action.unwrap_or_default() {
            ThemeAction::Show => {}
            ThemeAction::Toggle => {
                app.theme.toggle();
            }
            ThemeAction::Dark => app.theme.set_dark(true),
            ThemeAction::Light => app.theme.set_dark(false),
        }

        for event in changes.drain() {
            let ThemeEvent::Changed { dark } = event;
            app.toasts.add_with(
                format!("Switched to {} mode", ColorScheme::from_dark(dark)),
                ToastKind::Success,
                duration,
            );
        }

        output.highlight(&format!("Theme: {}", app.theme.color_scheme()));
        output.info(&format!(
            "Root classes: [{}]",
            app.theme.root().classes().collect::<Vec<_>>().join(", ")
        ));
        output.info(&format!(
            "Preferences: {}",
            app.theme.storage().path().display()
        ));
        flush_toasts(output, &mut app.toasts);

        Ok(())
    }
}
