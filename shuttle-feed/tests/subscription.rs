use std::{
    net::TcpListener,
    sync::mpsc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use logger::Logger;
use shuttle_feed::{FeedConfig, ShuttleState, Subscription};
use tungstenite::Message;
use viewport::Coordinates;

const SCENARIO_MESSAGE: &str = r#"{"etas": {"stop1": "3 min", "stop2": "7 min"}, "busPosition": {"latitude": 43.2627, "longitude": -79.9161}}"#;

// Serves one client: sends `frames` in order, then waits for the client to
// hang up.
fn serve_once(frames: Vec<&'static str>) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let url = format!("ws://{}", listener.local_addr().unwrap());

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("Failed to accept client");
        let mut socket = tungstenite::accept(stream).expect("Handshake failed");
        for frame in frames {
            socket.send(Message::text(frame)).expect("Failed to send frame");
        }
        loop {
            match socket.read() {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
    });

    (url, server)
}

fn wait_for_state(subscription: &Subscription, timeout: Duration) -> Option<ShuttleState> {
    let deadline = Instant::now() + timeout;
    let mut latest = None;
    while Instant::now() < deadline {
        if let Some(state) = subscription.try_latest() {
            latest = Some(state);
        }
        if latest.is_some() && subscription.try_latest().is_none() {
            return latest;
        }
        thread::sleep(Duration::from_millis(20));
    }
    latest
}

#[test]
fn test_subscription_delivers_feed_message() {
    let (url, server) = serve_once(vec![SCENARIO_MESSAGE]);
    let (notified, notifications) = mpsc::channel();

    let subscription = Subscription::open(FeedConfig::new(&url), Logger::console("test"), move || {
        let _ = notified.send(());
    })
    .expect("Failed to open subscription");

    let state = wait_for_state(&subscription, Duration::from_secs(5)).expect("No state received");

    assert_eq!(state.eta("stop1"), Some("3 min"));
    assert_eq!(state.eta("stop2"), Some("7 min"));
    assert_eq!(state.bus_position, Coordinates::new(43.2627, -79.9161));
    assert!(
        notifications.recv_timeout(Duration::from_secs(1)).is_ok(),
        "notify was not called"
    );

    subscription.close();
    server.join().expect("Server thread panicked");
}

#[test]
fn test_malformed_messages_are_skipped() {
    let (url, server) = serve_once(vec!["not json", r#"{"etas": {}}"#, SCENARIO_MESSAGE]);

    let subscription = Subscription::open(FeedConfig::new(&url), Logger::console("test"), || {})
        .expect("Failed to open subscription");

    let state = wait_for_state(&subscription, Duration::from_secs(5)).expect("No state received");

    assert_eq!(state.eta("stop1"), Some("3 min"));
    assert!(!subscription.is_closed());

    drop(subscription);
    server.join().expect("Server thread panicked");
}

#[test]
fn test_refused_connection_closes_without_state() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    drop(listener);

    let subscription = Subscription::open(FeedConfig::new(&url), Logger::console("test"), || {})
        .expect("Failed to open subscription");

    let deadline = Instant::now() + Duration::from_secs(5);
    while !subscription.is_closed() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(20));
    }

    assert!(subscription.is_closed());
    assert!(subscription.try_latest().is_none());
}

#[test]
fn test_remote_close_ends_subscription() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut socket = tungstenite::accept(stream).unwrap();
        socket.send(Message::text(SCENARIO_MESSAGE)).unwrap();
        let _ = socket.close(None);
        while socket.read().is_ok() {}
    });

    let subscription = Subscription::open(FeedConfig::new(&url), Logger::console("test"), || {})
        .expect("Failed to open subscription");

    let deadline = Instant::now() + Duration::from_secs(5);
    while !subscription.is_closed() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(20));
    }

    assert!(subscription.is_closed());
    let state = subscription.try_latest().expect("State sent before close was lost");
    assert_eq!(state.eta("stop2"), Some("7 min"));

    server.join().unwrap();
}

#[test]
fn test_close_during_stalled_handshake_returns_promptly() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let (release, released) = mpsc::channel::<()>();
    let server = thread::spawn(move || {
        // Accepts the connection but never answers the upgrade request.
        let (_stream, _) = listener.accept().unwrap();
        let _ = released.recv_timeout(Duration::from_secs(10));
    });

    let subscription = Subscription::open(FeedConfig::new(&url), Logger::console("test"), || {})
        .expect("Failed to open subscription");
    thread::sleep(Duration::from_millis(100));

    let started = Instant::now();
    subscription.close();
    let waited = started.elapsed();

    assert!(waited < Duration::from_secs(1), "close() took {:?}", waited);

    let _ = release.send(());
    server.join().unwrap();
}
