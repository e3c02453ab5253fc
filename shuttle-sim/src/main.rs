mod types;

use std::{
    env,
    net::TcpListener,
    sync::Arc,
    thread,
    time::Duration,
};

use logger::{Color, Logger};
use shuttle_feed::encode;
use threadpool::ThreadPool;
use types::{
    broadcaster::Broadcaster, route::Route, sim_error::SimError, simulation::Simulation,
    TICK_FREQUENCY_MILLIS,
};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const ADDR_VAR: &str = "SHUTTLE_SIM_ADDR";
const HANDSHAKE_WORKERS: usize = 4;

fn main() -> Result<(), SimError> {
    let addr = env::var(ADDR_VAR).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let logger = Logger::console("shuttle-sim");

    let listener = TcpListener::bind(&addr).map_err(|_| SimError::Bind(addr.clone()))?;
    let _ = logger.info(
        &format!("Serving shuttle feed on ws://{}", addr),
        Color::Cyan,
        true,
    );

    let broadcaster = Arc::new(Broadcaster::new(logger.clone()));
    let thread_pool = ThreadPool::new(HANDSHAKE_WORKERS);

    {
        let broadcaster = Arc::clone(&broadcaster);
        let logger = logger.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => {
                        let broadcaster = Arc::clone(&broadcaster);
                        let logger = logger.clone();
                        thread_pool.execute(move || {
                            if let Err(e) = broadcaster.register(stream) {
                                let _ = logger.error(&e.to_string(), true);
                            }
                        });
                    }
                    Err(e) => {
                        let _ = logger.warn(&format!("Failed to accept client: {}", e), true);
                    }
                }
            }
        });
    }

    let mut simulation = Simulation::new(Route::campus_loop()?);
    let tick = Duration::from_millis(TICK_FREQUENCY_MILLIS);

    loop {
        thread::sleep(tick);
        let snapshot = simulation.tick(tick.as_secs_f64());
        let text = encode(&snapshot)?;

        if let Err(e) = broadcaster.broadcast(&text) {
            let _ = logger.error(&e.to_string(), true);
        }
    }
}
