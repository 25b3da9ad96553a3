use anyhow::{Context, Result};
use goban_menu::app::events::{ShellCommand, UserEvent};
use goban_menu::app::{self, DetachedProxy, EventProxy, HeadlessController, ShellHost};
use goban_menu::config::{self, AppConfig, MemorySettings};
use goban_menu::core::{Collaborators, HostShell, MainAction};
use goban_menu::platform::Platform;
use std::collections::HashMap;
use std::io::BufRead;
use std::sync::Arc;
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::WindowBuilder,
};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load config, using defaults: {:#}", e);
        AppConfig::default()
    });

    // `--print-menu [platform]` dumps the published tree as JSON and exits.
    let mut args = std::env::args().skip(1);
    let print_only = match args.next().as_deref() {
        Some("--print-menu") => Some(args.next()),
        Some(other) => anyhow::bail!("unknown argument `{other}`"),
        None => None,
    };
    let platform = match print_only.as_ref().and_then(Option::as_deref) {
        Some(name) => name.parse::<Platform>()?,
        None => config.platform(),
    };

    let settings = Arc::new(MemorySettings::from_config(&config));
    let collaborators = |host: Arc<dyn HostShell>| Collaborators {
        controller: Arc::new(HeadlessController::default()),
        settings: settings.clone(),
        translator: config.translator(),
        host,
        identity: config.identity(),
    };

    // Printing needs no display, so it runs before any event loop exists.
    if print_only.is_some() {
        let host: Arc<dyn HostShell> = Arc::new(ShellHost::new(DetachedProxy));
        let menu = app::build_menu(platform, collaborators(host))
            .with_context(|| format!("failed to build the {platform} menu"))?;
        println!("{}", serde_json::to_string_pretty(&menu.to_json()?)?);
        return Ok(());
    }

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let host: Arc<dyn HostShell> = Arc::new(ShellHost::new(proxy.clone()));
    let menu = app::build_menu(platform, collaborators(host))
        .with_context(|| format!("failed to build the {platform} menu"))?;

    let window = WindowBuilder::new()
        .with_title(&config.app_name)
        .build(&event_loop)
        .context("Failed to build Window")?;
    let mut windows = HashMap::from([(window.id(), window)]);

    spawn_command_reader(proxy);

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                tracing::info!("Application initialized.");
            }
            Event::WindowEvent {
                window_id,
                event: WindowEvent::CloseRequested,
                ..
            } => {
                windows.remove(&window_id);
                if windows.is_empty() {
                    shutdown(&mut config, &settings);
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::UserEvent(UserEvent::Forward(action)) => match action {
                MainAction::NewWindow => {
                    match WindowBuilder::new()
                        .with_title(&config.app_name)
                        .build(target)
                    {
                        Ok(window) => {
                            windows.insert(window.id(), window);
                        }
                        Err(e) => tracing::error!("Failed to open a new window: {}", e),
                    }
                }
                MainAction::CheckForUpdates => {
                    let url = format!("{}/releases", config.repository);
                    if let Err(e) = open::that(&url) {
                        tracing::error!("Failed to open {}: {}", url, e);
                    }
                }
            },
            Event::UserEvent(UserEvent::Command(command)) => match command {
                ShellCommand::Activate(id) => {
                    if let Err(e) = menu.activate(&id) {
                        tracing::warn!("Activating {} failed: {:#}", id, e);
                    }
                }
                ShellCommand::Print => {
                    for line in menu.outline() {
                        tracing::info!("{}", line);
                    }
                }
                ShellCommand::Quit => {
                    shutdown(&mut config, &settings);
                    *control_flow = ControlFlow::Exit;
                }
            },
            _ => (),
        }
    });
}

/// Reads control commands from stdin and posts them to the event loop.
fn spawn_command_reader(proxy: impl EventProxy) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<ShellCommand>() {
                Ok(command) => proxy.send_event(UserEvent::Command(command)),
                Err(e) => tracing::warn!("{}", e),
            }
        }
    });
}

fn shutdown(config: &mut AppConfig, settings: &MemorySettings) {
    tracing::info!("Shutting down. Saving settings...");
    config.settings = settings.export();
    if let Err(e) = config::settings::save_config(config, None) {
        tracing::error!("Failed to save config on exit: {}", e);
    }
}
