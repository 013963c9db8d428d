//! Hotkey demo - main entry point.
//!
//! Loads the configured bindings, registers them as global hotkeys and
//! logs every press until the "quit" binding fires.
//!
//! On Windows this runs a real message loop on a message-only window.
//! Elsewhere (or with `--simulate`) it drives the same registrations
//! through the simulated backend with a scripted sequence of presses.

mod bindings;
#[cfg(windows)]
mod native;
mod simulated;

use bindings::NamedHotKey;

/// Initialize the tracing subscriber for structured logging.
///
/// Log levels can be controlled via the `RUST_LOG` environment variable:
/// - `RUST_LOG=debug` - Enable debug logs for all modules
/// - `RUST_LOG=info,hotkey_manager=trace` - Info for most, trace for the manager
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info")
            .add_directive("hotkey_manager=debug".parse().expect("valid directive"))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[cfg(windows)]
fn run_native(bindings: &[NamedHotKey]) -> Result<(), String> {
    native::run(bindings)
}

#[cfg(not(windows))]
fn run_native(bindings: &[NamedHotKey]) -> Result<(), String> {
    tracing::info!("No native backend on this platform, using the simulated one");
    simulated::run(bindings)
}

fn main() {
    init_tracing();
    tracing::info!("Hotkey demo starting...");

    let bindings = bindings::load();
    if bindings.is_empty() {
        tracing::error!("No usable hotkey bindings configured");
        std::process::exit(1);
    }

    let simulate = std::env::args().skip(1).any(|arg| arg == "--simulate");

    let result = if simulate {
        simulated::run(&bindings)
    } else {
        run_native(&bindings)
    };

    if let Err(e) = result {
        tracing::error!("Hotkey demo failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Hotkey demo exiting");
}
