use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing::info;

use rme_osc::config::Config;
use rme_osc::error::OscError;
use rme_osc::osc::{OscArg, Transport};
use rme_osc::params;

#[derive(Parser)]
#[command(name = "rme-osc")]
#[command(about = "OSC remote control for RME audio interfaces", long_about = None)]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device host, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Port the device listens on
    #[arg(long)]
    send_port: Option<u16>,

    /// Local port replies arrive on (0 lets the OS pick)
    #[arg(long)]
    recv_port: Option<u16>,

    /// Reply deadline in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send one OSC message with explicit type tags (i = int32, f = float32)
    Send {
        path: String,
        tags: String,
        values: Vec<String>,
    },
    /// Set a parameter to a float value, by name or OSC address
    Set { param: String, value: f32 },
    /// Read one parameter back from the device
    Get { param: String },
    /// Print incoming OSC traffic
    Monitor {
        /// Stop after this many seconds instead of running until interrupted
        #[arg(long)]
        duration: Option<u64>,
    },
    /// List the known parameter names
    Params,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    if let Command::Params = cli.command {
        for (name, addr) in params::all() {
            println!("{:<20} {}", name, addr);
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.send_port {
        config.send_port = port;
    }
    if let Some(port) = cli.recv_port {
        config.recv_port = port;
    }
    if let Some(ms) = cli.timeout_ms {
        config.timeout_ms = ms;
    }

    let mut transport = Transport::open(&config)?;
    info!("talking to {}:{}", config.host, config.send_port);

    match cli.command {
        Command::Send { path, tags, values } => {
            transport.send_tagged(&path, &tags, &values)?;
        }
        Command::Set { param, value } => {
            let addr = params::resolve(&param)?;
            transport.send_message(&addr, vec![OscArg::Float(value)])?;
        }
        Command::Get { param } => {
            let addr = params::resolve(&param)?;
            println!("{}", transport.read_param(&addr)?);
        }
        Command::Monitor { duration } => {
            monitor(&transport, duration)?;
        }
        Command::Params => unreachable!("handled before the transport opens"),
    }

    transport.close();
    Ok(())
}

fn monitor(transport: &Transport, duration: Option<u64>) -> Result<(), OscError> {
    let deadline = duration.map(|secs| Instant::now() + Duration::from_secs(secs));
    loop {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Ok(());
            }
        }
        match transport.recv_message() {
            Ok(msg) => match params::describe(&msg.addr) {
                Some(name) => println!("{} ({}) {:?}", msg.addr, name, msg.args),
                None => println!("{} {:?}", msg.addr, msg.args),
            },
            // recv_message times out at the configured deadline so the loop
            // can notice the duration bound; keep waiting.
            Err(OscError::Timeout) => continue,
            Err(err) => return Err(err),
        }
    }
}
