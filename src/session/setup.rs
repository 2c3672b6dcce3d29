//! Session setup and initialization

use crate::config::Settings;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::dashboard::{Dashboard, ViewState, WalletGate};
use crate::events::{Event, EventSender};
use crate::network::Network;
use crate::wallet::JsonRpcWallet;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Controller that owns the wallet connection and the view
    pub dashboard: Dashboard,
    /// Events emitted by the controller
    pub event_receiver: mpsc::Receiver<Event>,
    /// Latest published view
    pub view_receiver: watch::Receiver<ViewState>,
    pub network: Network,
    pub wallet_url: String,
}

/// Builds the wallet client and the controller for a session.
///
/// Nothing is sent to the wallet yet; the first request happens when the
/// controller starts.
pub fn setup_session(settings: &Settings) -> Result<SessionData, Box<dyn Error>> {
    let wallet = JsonRpcWallet::new(&settings.wallet_url)?;
    log::debug!("wallet endpoint: {}", wallet.url());
    let gate = WalletGate::new(Arc::new(wallet), settings.network);

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (dashboard, view_receiver) =
        Dashboard::new(gate, settings.contracts, EventSender::new(event_sender));

    Ok(SessionData {
        dashboard,
        event_receiver,
        view_receiver,
        network: settings.network,
        wallet_url: settings.wallet_url.clone(),
    })
}
