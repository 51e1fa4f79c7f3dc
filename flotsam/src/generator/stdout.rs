//! The stdout generator
//!
//! Writes one synthetic app-log line to standard output per tick, pausing a
//! fixed period between ticks. The pause is deliberately not compensated for
//! generation overhead, so the actual rate runs slightly under the nominal
//! one. Once per report interval the generator appends a throughput
//! annotation to an extra line: the iteration count divided by the
//! configured interval, never by measured elapsed time, so the figure is a
//! deliberate approximation.
//!
//! Diagnostics go through `tracing`; the stdout byte stream carries
//! generated data only.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    time::{self, Duration, Instant},
};
use tracing::info;

use flotsam_payload::{AppLog, Generator};

use crate::signals::Shutdown;

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
/// Configuration of this generator.
pub struct Config {
    /// The seed for random operations against this target. When absent the
    /// generator seeds itself from OS entropy.
    pub seed: Option<[u8; 32]>,
    /// The pause between lines, in milliseconds.
    pub period_millis: u64,
    /// The throughput report interval, in seconds. Also the fixed divisor of
    /// the reported rate. Must be non-zero.
    pub report_interval_seconds: u64,
    /// The payload configuration
    pub payload: flotsam_payload::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            period_millis: 100,
            report_interval_seconds: 10,
            payload: flotsam_payload::Config::default(),
        }
    }
}

/// Errors produced by [`Stdout`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Creation of payload failed.
    #[error("Creation of payload failed: {0}")]
    Payload(#[from] flotsam_payload::Error),
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to convert, value is 0
    #[error("Value provided is zero")]
    Zero,
}

#[derive(Debug)]
/// The stdout generator.
///
/// This generator is responsible for writing synthetic log lines to standard
/// output.
pub struct Stdout {
    rng: StdRng,
    payload: AppLog,
    period: Duration,
    report_interval: Duration,
    shutdown: Shutdown,
}

impl Stdout {
    /// Create a new [`Stdout`] instance
    ///
    /// # Errors
    ///
    /// Creation will fail if the payload configuration is out of range or
    /// the report interval is zero.
    pub fn new(config: &Config, shutdown: Shutdown) -> Result<Self, Error> {
        if config.report_interval_seconds == 0 {
            return Err(Error::Zero);
        }

        let rng = match config.seed {
            Some(seed) => StdRng::from_seed(seed),
            None => StdRng::from_os_rng(),
        };
        let payload = AppLog::new(config.payload)?;

        Ok(Self {
            rng,
            payload,
            period: Duration::from_millis(config.period_millis),
            report_interval: Duration::from_secs(config.report_interval_seconds),
            shutdown,
        })
    }

    /// Run [`Stdout`] until a shutdown signal is received.
    ///
    /// # Errors
    ///
    /// Function will error if the write path to standard output fails.
    pub async fn spin(self) -> Result<(), Error> {
        info!("Stdout generator running");

        let mut stdout = tokio::io::stdout();
        self.run(&mut stdout).await
    }

    async fn run<W>(self, writer: &mut W) -> Result<(), Error>
    where
        W: AsyncWrite + Unpin,
    {
        let Self {
            mut rng,
            payload,
            period,
            report_interval,
            mut shutdown,
        } = self;

        // Counter and checkpoint are owned by the loop. The counter tracks
        // iterations since the last report, not since startup.
        let mut count: u64 = 0;
        let mut checkpoint = Instant::now();

        loop {
            count += 1;
            let line = payload.generate(&mut rng)?;
            writer.write_all(format!("{line}\n").as_bytes()).await?;
            writer.flush().await?;

            tokio::select! {
                () = time::sleep(period) => {}
                () = shutdown.recv() => {
                    info!("shutdown signal received");
                    return Ok(());
                }
            }

            if checkpoint.elapsed() > report_interval {
                checkpoint = Instant::now();
                let line = payload.generate(&mut rng)?;
                let rate = count as f64 / report_interval.as_secs_f64();
                writer
                    .write_all(format!("{line} speed: {rate}/s\n").as_bytes())
                    .await?;
                writer.flush().await?;
                count = 0;
            }
        }
    }
}
