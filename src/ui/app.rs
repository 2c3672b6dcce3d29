//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::dashboard::{ControllerCommand, ViewState};
use crate::events::Event as ControllerEvent;
use crate::network::Network;
use crate::ui::dashboard::{DashboardState, KeyOutcome, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc, watch};

#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Shown while the controller connects.
    Splash,
    Dashboard(Box<DashboardState>),
}

#[derive(Debug)]
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,
    network: Network,
    wallet_url: String,
    current_screen: Screen,
    /// Events that arrived while the splash was showing.
    splash_events: Vec<ControllerEvent>,
    /// Receives events from the controller task.
    event_receiver: mpsc::Receiver<ControllerEvent>,
    /// Latest view published by the controller.
    view_receiver: watch::Receiver<ViewState>,
    /// Sends user commands to the controller task.
    command_sender: mpsc::Sender<ControllerCommand>,
    /// Stops the controller task.
    shutdown_sender: broadcast::Sender<()>,
    ui_config: UIConfig,
}

impl App {
    pub fn new(
        network: Network,
        wallet_url: String,
        event_receiver: mpsc::Receiver<ControllerEvent>,
        view_receiver: watch::Receiver<ViewState>,
        command_sender: mpsc::Sender<ControllerCommand>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            network,
            wallet_url,
            current_screen: Screen::Splash,
            splash_events: Vec::new(),
            event_receiver,
            view_receiver,
            command_sender,
            shutdown_sender,
            ui_config,
        }
    }

    fn show_dashboard(&mut self) {
        let mut state = DashboardState::new(
            self.network,
            self.wallet_url.clone(),
            self.start_time,
            self.ui_config.clone(),
        );
        for event in self.splash_events.drain(..) {
            state.add_event(event);
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    /// Drain controller events into the dashboard, or hold them until it
    /// is shown.
    fn receive_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match &mut self.current_screen {
                Screen::Dashboard(state) => state.add_event(event),
                Screen::Splash => self.splash_events.push(event),
            }
        }
    }

    /// Queue a command without blocking the render loop.
    fn send_command(&mut self, command: ControllerCommand) {
        if let Err(e) = self.command_sender.try_send(command) {
            log::warn!("dropped {:?}: {}", command, e);
            if let Screen::Dashboard(state) = &mut self.current_screen {
                state.command_dropped();
            }
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    loop {
        app.receive_events();

        if let Screen::Dashboard(state) = &mut app.current_screen {
            let view = app.view_receiver.borrow_and_update().clone();
            state.update(view);
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.show_dashboard();
                continue;
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                let outcome = if let Screen::Dashboard(state) = &mut app.current_screen {
                    state.handle_key(key.code)
                } else if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    KeyOutcome::Quit
                } else {
                    // Any other key skips the splash screen
                    app.show_dashboard();
                    KeyOutcome::None
                };

                match outcome {
                    KeyOutcome::Quit => {
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                    KeyOutcome::Command(command) => app.send_command(command),
                    KeyOutcome::None => {}
                }
            }
        }
    }
}

fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
