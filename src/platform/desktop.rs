//! Desktop platform implementation.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::PlatformError;
use crate::formatter::TickFormatter;
use crate::platform::tracing_buffer::{SwitchableMakeWriter, SwitchableWriter};

pub fn sleep(duration: Duration) {
    spin_sleep::sleep(duration);
}

/// The game's random source; seeded runs are reproducible.
pub fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

/// Keeps track of where log output goes for the lifetime of the program.
pub struct LogHandle {
    buffer: Option<SwitchableWriter>,
}

impl LogHandle {
    /// Writes out any lines held back while the terminal was in use.
    pub fn release(&self) {
        if let Some(buffer) = &self.buffer {
            if let Err(e) = buffer.release() {
                eprintln!("Failed to flush buffered logs: {e}");
            }
        }
    }
}

/// Installs the global subscriber.
///
/// With a log file every line is appended to it as it happens; otherwise lines are buffered until
/// [`LogHandle::release`] is called after the terminal has been restored.
pub fn init_logging(log_file: Option<&Path>) -> Result<LogHandle, PlatformError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info", name = env!("CARGO_CRATE_NAME"))));

    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| PlatformError::LoggingInit(format!("Could not open {}: {}", path.display(), e)))?;
            install(filter, Mutex::new(file), false)?;
            Ok(LogHandle { buffer: None })
        }
        None => {
            let writer = SwitchableWriter::new();
            install(filter, SwitchableMakeWriter::new(writer.clone()), true)?;
            Ok(LogHandle { buffer: Some(writer) })
        }
    }
}

fn install<W>(filter: EnvFilter, make_writer: W, ansi: bool) -> Result<(), PlatformError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = FmtSubscriber::builder()
        .with_ansi(ansi)
        .event_format(TickFormatter)
        .with_env_filter(filter)
        .with_writer(make_writer)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).map_err(|e| PlatformError::LoggingInit(e.to_string()))
}
