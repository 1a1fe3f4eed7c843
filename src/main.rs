//! MudraLock - gesture-password daemon
//!
//! Reads commands from stdin (`record`, `unlock`, `erase`, `quit`) and
//! forwards them to the capture thread, which owns the gyro and the
//! enrolled reference gesture. Runs against the simulated gyro; a real
//! SPI transport plugs in behind the same driver trait.

use std::env;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mudra_lock::{
    AppConfig, CaptureSession, CaptureThread, ConsoleUi, Error, EventLatch, FileGestureStore,
    MockGyro, MockGyroConfig, MotionScript, Result, UserRequest,
};

/// Parse config path from command line arguments.
///
/// Supports:
/// - `mudra-lock <path>` (positional)
/// - `mudra-lock --config <path>` (flag-based)
/// - `mudra-lock -c <path>` (short flag)
///
/// Defaults to `/etc/mudralock.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "/etc/mudralock.toml".to_string()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("MudraLock starting...");

    let config_path = parse_config_path();
    let config = match AppConfig::from_file(&config_path) {
        Ok(config) => {
            log::info!("Using config: {}", config_path);
            config
        }
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No config at {}, using defaults", config_path);
            AppConfig::default()
        }
        Err(e) => return Err(e),
    };

    let store = FileGestureStore::new(&config.storage.gesture_path);
    let gyro = MockGyro::new(MockGyroConfig::default(), MotionScript::stationary());

    let latch = Arc::new(EventLatch::new());
    let running = Arc::new(AtomicBool::new(true));

    let mut session = CaptureSession::new(
        config.session_config()?,
        Box::new(gyro),
        Box::new(store),
        Box::new(ConsoleUi),
        Arc::clone(&latch),
    );
    session.load_reference()?;

    let ctrlc_running = Arc::clone(&running);
    let ctrlc_latch = Arc::clone(&latch);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        ctrlc_running.store(false, Ordering::Relaxed);
        ctrlc_latch.raise(UserRequest::Shutdown);
    })
    .map_err(|e| Error::Config(format!("Error setting Ctrl-C handler: {}", e)))?;

    let capture = CaptureThread::spawn(session, Arc::clone(&running))?;

    log::info!("MudraLock running. Commands: record, unlock, erase, quit.");

    // Input loop on the main thread; stdin EOF counts as quit.
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !running.load(Ordering::Relaxed) {
            break;
        }
        let line = line?;
        match line.trim() {
            "record" | "r" => latch.raise(UserRequest::Record),
            "unlock" | "u" => latch.raise(UserRequest::Unlock),
            "erase" | "e" => latch.raise(UserRequest::Erase),
            "quit" | "q" => break,
            "" => {}
            other => log::warn!("unknown command: {}", other),
        }
    }

    running.store(false, Ordering::Relaxed);
    latch.raise(UserRequest::Shutdown);
    capture.join();

    log::info!("MudraLock stopped");
    Ok(())
}
