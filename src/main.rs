// LinkSphere - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Headless application listing (--list-apps)
// 4. Library loading and eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use linksphere::app;

pub use linksphere::core;
pub use linksphere::platform;
pub use linksphere::ui;
pub use linksphere::util;

use clap::{Parser, ValueEnum};
use crate::core::model::{OsKind, ScanTarget, Theme};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

/// LinkSphere - organise shortcuts to applications, folders, and files.
///
/// Scans the platform's standard application folders and keeps a persistent
/// library of shortcuts and notes.
#[derive(Parser, Debug)]
#[command(name = "LinkSphere", version, about)]
struct Cli {
    /// Start with this colour scheme (overrides config.toml).
    #[arg(short = 't', long = "theme", value_enum)]
    theme: Option<ThemeArg>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Print discovered application paths, one per line, and exit.
    #[arg(long = "list-apps")]
    list_apps: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and read config.toml before logging so the
    // configured level can take effect.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (mut config, config_warnings) =
        platform::config::load_config(&platform_paths.config_file());

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        os = %OsKind::current(),
        "LinkSphere starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    if let Some(theme) = cli.theme {
        config.theme = theme.into();
    }

    if cli.list_apps {
        std::process::exit(list_apps(&config.extra_scan_roots));
    }

    let library_path = platform_paths.library_file();
    let library =
        app::store::load(&library_path).unwrap_or_else(crate::core::library::Library::new);

    tracing::info!(
        shortcuts = library.shortcuts().len(),
        notes = library.notes().len(),
        "Ready to launch GUI"
    );

    let mut state = app::state::AppState::new(library, &config, Some(library_path), cli.debug);
    state.warnings.extend(config_warnings);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(util::constants::APP_NAME)
            .with_inner_size(util::constants::WINDOW_SIZE)
            .with_min_inner_size(util::constants::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::LinkSphereApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LinkSphere GUI: {e}");
        std::process::exit(1);
    }
}

/// Run a scan on the calling thread and print each match. Returns the exit code.
fn list_apps(extra_roots: &[std::path::PathBuf]) -> i32 {
    let os_kind = OsKind::current();
    let Some(target) = ScanTarget::for_os(os_kind) else {
        eprintln!("Application scanning is not supported on {os_kind}");
        return 2;
    };
    let target = target.with_extra_roots(extra_roots.iter().cloned());

    let report = crate::core::scanner::scan_target(&target, |_| {}, || false);
    for path in &report.paths {
        println!("{path}");
    }
    tracing::info!(
        found = report.paths.len(),
        files = report.files_scanned,
        skipped = report.skipped,
        "Application listing complete"
    );
    0
}
