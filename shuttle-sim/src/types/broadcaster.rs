use std::{net::TcpStream, sync::Mutex, time::Duration};

use logger::{Color, Logger};
use tungstenite::{Message, WebSocket};

use super::sim_error::SimError;

const WRITE_TIMEOUT_SECS: u64 = 2;
const HANDSHAKE_TIMEOUT_SECS: u64 = 2;

/// Connected feed clients. Every snapshot goes to all of them.
pub struct Broadcaster {
    clients: Mutex<Vec<WebSocket<TcpStream>>>,
    logger: Logger,
}

impl Broadcaster {
    pub fn new(logger: Logger) -> Self {
        Self {
            clients: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Upgrades a fresh connection and adds it to the audience.
    ///
    /// A client that does not finish the upgrade within
    /// `HANDSHAKE_TIMEOUT_SECS` is dropped, so silent connections cannot hold
    /// a handshake worker.
    pub fn register(&self, stream: TcpStream) -> Result<(), SimError> {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown peer".to_string());
        let _ = stream.set_write_timeout(Some(Duration::from_secs(WRITE_TIMEOUT_SECS)));
        let _ = stream.set_read_timeout(Some(Duration::from_secs(HANDSHAKE_TIMEOUT_SECS)));

        match tungstenite::accept(stream) {
            Ok(socket) => {
                // Clients are only written to once subscribed.
                let _ = socket.get_ref().set_read_timeout(None);
                self.clients
                    .lock()
                    .map_err(|_| SimError::LockError("clients".to_string()))?
                    .push(socket);
                let _ = self
                    .logger
                    .info(&format!("Client {} subscribed", peer), Color::Green, true);
            }
            Err(e) => {
                let _ = self
                    .logger
                    .warn(&format!("Handshake with {} failed: {}", peer, e), true);
            }
        }
        Ok(())
    }

    /// Sends `text` to every client, dropping the ones that fail. Returns how
    /// many clients received it.
    pub fn broadcast(&self, text: &str) -> Result<usize, SimError> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|_| SimError::LockError("clients".to_string()))?;

        let before = clients.len();
        clients.retain_mut(|socket| socket.send(Message::text(text)).is_ok());

        let dropped = before - clients.len();
        if dropped > 0 {
            let _ = self
                .logger
                .info(&format!("Dropped {} client(s)", dropped), Color::Yellow, true);
        }
        Ok(clients.len())
    }
}
