//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_starting, print_summary},
};
use crate::dashboard::{ControllerCommand, Dashboard};
use crate::error::DashboardError;
use std::error::Error;

/// Connects, loads the view, optionally runs one write, and prints a summary.
///
/// Events are printed as they arrive. Ctrl+C abandons the command and the run
/// fails; a transaction already handed to the wallet is not cancelled by that.
pub async fn run_headless_mode(
    session: SessionData,
    command: Option<ControllerCommand>,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", session.network, &session.wallet_url);

    let SessionData {
        mut dashboard,
        mut event_receiver,
        ..
    } = session;

    let printer = tokio::spawn(async move {
        while let Some(event) = event_receiver.recv().await {
            if event.should_display() {
                println!("{}", event);
            }
        }
    });

    let outcome = tokio::select! {
        result = execute(&mut dashboard, command) => Some(result),
        _ = tokio::signal::ctrl_c() => {
            log::warn!("interrupted; the view below may be incomplete");
            None
        }
    };

    let view = dashboard.view().clone();
    // Closes the event channel so the printer drains and exits
    drop(dashboard);
    let _ = printer.await;

    print_summary(&view);
    exit_status(outcome)
}

/// Connect, load the view, then run `command`.
///
/// Only a failed connection stops the command. Read failures were already
/// reported and reset their value; they fail a plain status run but never
/// keep a requested write from going out.
async fn execute(
    dashboard: &mut Dashboard,
    command: Option<ControllerCommand>,
) -> Result<(), DashboardError> {
    dashboard.connect_wallet().await?;
    let loaded = dashboard.refresh_all().await;
    match command {
        Some(command) => dashboard.execute(command).await,
        None => loaded,
    }
}

/// `None` means the run was interrupted before it finished.
fn exit_status(outcome: Option<Result<(), DashboardError>>) -> Result<(), Box<dyn Error>> {
    match outcome {
        Some(result) => {
            result?;
            print_session_exit_success();
            Ok(())
        }
        None => Err("Interrupted before the command finished".into()),
    }
}
