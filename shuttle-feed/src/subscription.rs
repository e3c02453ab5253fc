use std::{
    io::ErrorKind,
    net::{SocketAddr, TcpStream, ToSocketAddrs},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use logger::{Color, Logger};
use tungstenite::{http::Uri, stream::MaybeTlsStream, HandshakeError, Message, WebSocket};

use crate::{config::FeedConfig, errors::FeedError, message::decode, state::ShuttleState};

type FeedSocket = WebSocket<MaybeTlsStream<TcpStream>>;

/// Host and port of a feed endpoint, checked before any I/O happens.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub url: String,
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Accepts `ws://` and `wss://` URLs only.
    pub fn parse(url: &str) -> Result<Self, FeedError> {
        let invalid = || FeedError::InvalidEndpoint(url.to_string());
        let uri: Uri = url.parse().map_err(|_| invalid())?;

        let default_port = match uri.scheme_str() {
            Some("ws") => 80,
            Some("wss") => 443,
            _ => return Err(invalid()),
        };
        let host = uri
            .host()
            .filter(|host| !host.is_empty())
            .ok_or_else(invalid)?
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string();

        Ok(Self {
            url: url.to_string(),
            host,
            port: uri.port_u16().unwrap_or(default_port),
        })
    }

    fn socket_addr(&self) -> Result<SocketAddr, FeedError> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| FeedError::Connection(e.to_string()))?
            .next()
            .ok_or_else(|| FeedError::Connection(format!("{} did not resolve", self.host)))
    }
}

/// An open feed channel.
///
/// Opening spawns one reader thread that connects, decodes every inbound
/// message and hands whole [`ShuttleState`] snapshots to the owner. Dropping
/// or closing the subscription stops that thread and closes the socket.
/// There is no reconnection: once the channel fails the owner keeps whatever
/// it received last.
pub struct Subscription {
    updates: Receiver<ShuttleState>,
    stop: Arc<AtomicBool>,
    closed: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Starts listening to the feed at `config.endpoint`.
    ///
    /// `notify` runs on the reader thread after each accepted snapshot, so a
    /// UI can schedule a repaint. Connection problems are logged, not
    /// returned: only an unusable endpoint fails here.
    pub fn open<F>(config: FeedConfig, logger: Logger, notify: F) -> Result<Self, FeedError>
    where
        F: Fn() + Send + 'static,
    {
        let endpoint = Endpoint::parse(&config.endpoint)?;
        let (sender, updates) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let closed = Arc::new(AtomicBool::new(false));

        let reader = {
            let stop = Arc::clone(&stop);
            let closed = Arc::clone(&closed);
            thread::Builder::new()
                .name("shuttle-feed".to_string())
                .spawn(move || {
                    run_reader(&config, &endpoint, &sender, &stop, &notify, &logger);
                    closed.store(true, Ordering::SeqCst);
                })?
        };

        Ok(Self {
            updates,
            stop,
            closed,
            reader: Some(reader),
        })
    }

    /// Newest snapshot received since the last call, if any. Older pending
    /// snapshots are discarded.
    pub fn try_latest(&self) -> Option<ShuttleState> {
        self.updates.try_iter().last()
    }

    /// Whether the reader has stopped, either on request or because the
    /// channel failed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Stops the reader and waits for it to release the socket.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_reader<F: Fn()>(
    config: &FeedConfig,
    endpoint: &Endpoint,
    sender: &Sender<ShuttleState>,
    stop: &AtomicBool,
    notify: &F,
    logger: &Logger,
) {
    let mut socket = match connect(config, endpoint, stop) {
        Ok(None) => {
            let _ = logger.info("Feed subscription closed while connecting", Color::Cyan, false);
            return;
        }
        Ok(Some(socket)) => {
            let _ = logger.info(
                &format!("Connected to feed at {}", endpoint.url),
                Color::Green,
                false,
            );
            socket
        }
        Err(e) => {
            let _ = logger.error(&e.to_string(), true);
            return;
        }
    };

    match read_loop(&mut socket, sender, stop, notify, logger) {
        Ok(()) => {
            let _ = logger.info("Feed subscription closed", Color::Cyan, false);
        }
        Err(FeedError::Closed) => {
            let _ = logger.warn("Feed closed by remote, keeping last known state", true);
        }
        Err(e) => {
            let _ = logger.error(&format!("{}, keeping last known state", e), true);
        }
    }
}

// Returns `None` when the subscription is closed before the handshake ends.
fn connect(
    config: &FeedConfig,
    endpoint: &Endpoint,
    stop: &AtomicBool,
) -> Result<Option<FeedSocket>, FeedError> {
    let addr = endpoint.socket_addr()?;
    let stream = TcpStream::connect_timeout(&addr, config.connect_timeout)
        .map_err(|e| FeedError::Connection(e.to_string()))?;
    if stop.load(Ordering::SeqCst) {
        return Ok(None);
    }
    stream.set_read_timeout(Some(config.poll_interval))?;
    stream.set_write_timeout(Some(config.connect_timeout))?;

    let deadline = Instant::now() + config.connect_timeout;
    let mut attempt = tungstenite::client_tls(endpoint.url.as_str(), stream);
    let socket = loop {
        match attempt {
            Ok((socket, _response)) => break socket,
            Err(HandshakeError::Interrupted(handshake)) => {
                if stop.load(Ordering::SeqCst) {
                    return Ok(None);
                }
                if Instant::now() >= deadline {
                    return Err(FeedError::Handshake(format!(
                        "{} did not answer the upgrade in time",
                        endpoint.url
                    )));
                }
                attempt = handshake.handshake();
            }
            Err(HandshakeError::Failure(e)) => return Err(FeedError::Handshake(e.to_string())),
        }
    };

    set_poll_timeout(socket.get_ref(), config.poll_interval)?;
    Ok(Some(socket))
}

// Reads must time out so the stop flag gets checked.
fn set_poll_timeout(stream: &MaybeTlsStream<TcpStream>, timeout: Duration) -> Result<(), FeedError> {
    match stream {
        MaybeTlsStream::Plain(tcp) => tcp.set_read_timeout(Some(timeout))?,
        MaybeTlsStream::Rustls(tls) => tls.get_ref().set_read_timeout(Some(timeout))?,
        _ => {}
    }
    Ok(())
}

fn read_loop<F: Fn()>(
    socket: &mut FeedSocket,
    sender: &Sender<ShuttleState>,
    stop: &AtomicBool,
    notify: &F,
    logger: &Logger,
) -> Result<(), FeedError> {
    while !stop.load(Ordering::SeqCst) {
        match socket.read() {
            Ok(Message::Close(_)) => return Err(FeedError::Closed),
            Ok(message) if message.is_text() || message.is_binary() => {
                match message.to_text().map_err(FeedError::from).and_then(decode) {
                    Ok(state) => {
                        if sender.send(state).is_err() {
                            return Ok(());
                        }
                        notify();
                    }
                    Err(e) => {
                        let _ = logger.warn(&format!("Skipping feed message: {}", e), false);
                    }
                }
            }
            Ok(_) => {}
            Err(tungstenite::Error::Io(e))
                if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let _ = socket.close(None);
    let _ = socket.flush();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_endpoint_with_port() {
        let endpoint = Endpoint::parse("ws://127.0.0.1:8080").unwrap();

        assert_eq!(endpoint.host, "127.0.0.1");
        assert_eq!(endpoint.port, 8080);
    }

    #[test]
    fn test_parse_uses_scheme_default_port() {
        assert_eq!(Endpoint::parse("ws://shuttle.local/feed").unwrap().port, 80);
        assert_eq!(Endpoint::parse("wss://shuttle.local/feed").unwrap().port, 443);
    }

    #[test]
    fn test_parse_strips_ipv6_brackets() {
        assert_eq!(Endpoint::parse("ws://[::1]:9000").unwrap().host, "::1");
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        for url in ["http://shuttle.local", "127.0.0.1:8080", "", "ws://"] {
            assert!(
                matches!(Endpoint::parse(url), Err(FeedError::InvalidEndpoint(_))),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_open_rejects_invalid_endpoint() {
        let result = Subscription::open(FeedConfig::new("tcp://nowhere"), Logger::console("test"), || {});

        assert!(matches!(result, Err(FeedError::InvalidEndpoint(_))));
    }
}
