//! Configured bindings.

use hotkey_core::{config_path, load_config, AppConfig, HotKey, WindowHandle};
use hotkey_manager::{HotKeyHost, HotKeyRegistration};

/// Binding name that ends the demo.
pub const QUIT: &str = "quit";

/// A parsed binding.
#[derive(Debug, Clone)]
pub struct NamedHotKey {
    pub name: String,
    pub hotkey: HotKey,
}

impl NamedHotKey {
    pub fn is_quit(&self) -> bool {
        self.name == QUIT
    }
}

/// Load config.toml (or the defaults) and parse every binding.
///
/// Bad bindings are logged and skipped; a broken file falls back to the
/// defaults.
pub fn load() -> Vec<NamedHotKey> {
    let config = match config_path() {
        Some(path) => {
            tracing::info!("Loading config from: {}", path.display());
            load_config(&path).unwrap_or_else(|e| {
                tracing::error!("{} - using default bindings", e);
                AppConfig::default()
            })
        }
        None => {
            tracing::warn!("No config directory - using default bindings");
            AppConfig::default()
        }
    };

    resolve(&config)
}

fn resolve(config: &AppConfig) -> Vec<NamedHotKey> {
    config
        .hotkeys
        .iter()
        .filter_map(|binding| match binding.hotkey() {
            Ok(hotkey) => Some(NamedHotKey {
                name: binding.name.clone(),
                hotkey,
            }),
            Err(e) => {
                tracing::warn!("Skipping binding: {}", e);
                None
            }
        })
        .collect()
}

/// Register every binding on `owner`, logging presses.
///
/// `on_quit` runs when the quit binding fires. Bindings the OS refuses are
/// logged and skipped. Fails only if nothing could be bound.
pub fn bind_all<F>(
    host: &HotKeyHost,
    bindings: &[NamedHotKey],
    owner: WindowHandle,
    on_quit: F,
) -> Result<Vec<HotKeyRegistration>, String>
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    let mut registrations = Vec::with_capacity(bindings.len());

    for binding in bindings {
        let registration = match host.acquire(binding.hotkey, owner) {
            Ok(registration) if registration.is_registered() => registration,
            Ok(_) => {
                tracing::warn!("'{}' ({}) was not bound", binding.name, binding.hotkey);
                continue;
            }
            Err(e) => {
                tracing::warn!("'{}' unavailable: {}", binding.name, e);
                continue;
            }
        };

        let name = binding.name.clone();
        let quit = binding.is_quit();
        let on_quit = on_quit.clone();
        registration.subscribe(move |event| {
            tracing::info!("'{}' pressed ({})", name, event.hotkey);
            if quit {
                on_quit();
            }
        });

        tracing::info!("Bound '{}' to {}", binding.name, binding.hotkey);
        registrations.push(registration);
    }

    if registrations.is_empty() {
        return Err("No hotkeys could be registered".to_string());
    }
    Ok(registrations)
}
