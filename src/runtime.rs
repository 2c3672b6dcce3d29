//! Runs the dashboard controller as a background task driven by commands

use crate::consts::cli_consts::COMMAND_QUEUE_SIZE;
use crate::dashboard::{ControllerCommand, Dashboard};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Spawn the controller: it loads the view, then handles commands one at a
/// time until the command channel closes or shutdown is signalled.
pub fn start_controller(
    mut dashboard: Dashboard,
    mut shutdown: broadcast::Receiver<()>,
) -> (mpsc::Sender<ControllerCommand>, JoinHandle<()>) {
    let (command_sender, mut commands) = mpsc::channel::<ControllerCommand>(COMMAND_QUEUE_SIZE);

    let handle = tokio::spawn(async move {
        tokio::select! {
            _ = dashboard.start() => {}
            _ = shutdown.recv() => return,
        }

        loop {
            let command = tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => command,
                    None => break,
                },
                _ = shutdown.recv() => break,
            };
            log::debug!("controller command: {:?}", command);

            // Errors were already reported as events
            tokio::select! {
                _ = dashboard.execute(command) => {}
                _ = shutdown.recv() => break,
            }
        }
    });

    (command_sender, handle)
}
