use std::{io, path::PathBuf};

use clap::Parser;
use flotsam::{
    config::{self, Config},
    generator,
    signals::{self, Shutdown},
};
use tokio::{runtime::Builder, signal};
use tracing::info;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

#[derive(thiserror::Error, Debug)]
enum Error {
    #[error("Failed to load flotsam config: {0}")]
    Config(#[from] config::Error),
    #[error("Flotsam generator returned an error: {0}")]
    Generator(#[from] generator::Error),
    #[error(transparent)]
    Signal(#[from] signals::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Could not join the generator task: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Opts {
    /// path on disk to the configuration file. When absent the built-in
    /// defaults apply.
    #[clap(long)]
    config_path: Option<PathBuf>,
}

async fn inner_main(config: Config) -> Result<(), Error> {
    let shutdown = Shutdown::new();
    let server = generator::Server::new(config.generator, shutdown.clone())?;
    let mut server_handle = tokio::spawn(server.spin());

    tokio::select! {
        res = signal::ctrl_c() => {
            res?;
            info!("received ctrl-c");
            shutdown.signal()?;
            server_handle.await??;
        }
        res = &mut server_handle => {
            res??;
        }
    }

    Ok(())
}

fn main() -> Result<(), Error> {
    // Diagnostics go to stderr. Standard output belongs to the generated
    // stream and must stay clean for whatever consumes it.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_ansi(false)
        .finish()
        .init();

    let version = env!("CARGO_PKG_VERSION");
    info!("Starting flotsam {version} run.");

    let opts = Opts::parse();
    let config = match &opts.config_path {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };

    let runtime = Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()?;
    let res = runtime.block_on(inner_main(config));
    info!("All done.");
    res
}
