use std::process::ExitCode;

use log::LevelFilter;
use portal_core::{
    Application, Container, Display, HeadlessDisplay, Settings, gui::TickCounter,
};

use crate::abs::App;

mod abs;

/// Installs the global logger, writing timestamped lines to stderr.
fn setup_logger(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

/// Builds the menu shown when the application starts.
fn main_menu(settings: &Settings) -> portal_core::Result<Container> {
    let mut menu = Container::new("menu");
    menu.add_component(
        TickCounter::new("ticks").with_report_every(u64::from(settings.window.tick_rate.get())),
    )?;
    Ok(menu)
}

fn run<D: Display>(settings: &Settings, frames: Option<u64>) -> portal_core::Result<()> {
    let mut app = Application::<D>::new(settings.window.clone())?;
    app.window_mut().set_menu(main_menu(settings)?);
    app.run_frames(frames);
    Ok(())
}

fn main() -> ExitCode {
    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    if let Err(e) = setup_logger(settings.log_level) {
        eprintln!("Failed to set up logging: {}", e);
    }
    if let Some(e) = settings_error {
        log::warn!("Could not load settings, using defaults: {}", e);
    }

    log::info!("Portal {} starting", env!("CARGO_PKG_VERSION"));

    let result = if settings.headless {
        // A headless run has no close button, so it always gets a frame limit.
        let frames = settings
            .frames
            .unwrap_or(u64::from(settings.window.tick_rate.get()));
        run::<HeadlessDisplay>(&settings, Some(frames))
    } else {
        run::<App>(&settings, settings.frames)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
