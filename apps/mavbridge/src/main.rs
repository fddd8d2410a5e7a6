use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

use hud_bridge::{
    BridgeConfig, BridgeMetrics, BridgePlugin, DispatchOutcome, MessageKind, Router, VfrHudBridge,
};
use mavlink::ardupilotmega::{MavMessage, VFR_HUD_DATA, WIND_DATA};
use mavlink::error::MessageReadError;
use telemetry_sink::{ChannelSink, JsonLinesSink};

#[derive(Parser, Debug)]
#[command(
    name = "mavbridge",
    version,
    about = "MAVLink VFR_HUD / WIND telemetry bridge",
    disable_help_subcommand = true
)]
struct Cli {
    /// Bridge config YAML (topics, queue size, validation)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the registration table
    Kinds,
    /// Connect to a MAVLink stream and print translated messages as JSON lines
    Listen {
        /// MAVLink connection address (e.g. udpin:0.0.0.0:14550, tcpout:127.0.0.1:5760)
        #[arg(long, default_value = "udpin:0.0.0.0:14550")]
        address: String,
        /// Stop after this many received messages
        #[arg(long)]
        max_messages: Option<u64>,
        /// Print Prometheus metrics to stderr on exit
        #[arg(long, action = ArgAction::SetTrue)]
        metrics: bool,
    },
    /// Translate one message given on the command line
    Translate {
        #[command(subcommand)]
        input: TranslateInput,
    },
}

#[derive(Subcommand, Debug)]
enum TranslateInput {
    /// VFR_HUD fields
    VfrHud {
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        airspeed: f32,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        groundspeed: f32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        heading: i16,
        /// Percent, 0..100
        #[arg(long, default_value_t = 0)]
        throttle: u16,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        alt: f32,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        climb: f32,
    },
    /// WIND fields
    Wind {
        /// Degrees, direction the wind comes from
        #[arg(long, allow_hyphen_values = true)]
        direction: f32,
        #[arg(long, allow_hyphen_values = true)]
        speed: f32,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        speed_z: f32,
    },
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => hud_bridge::load_config_file(path)?,
        None => BridgeConfig::default(),
    };

    match cli.command {
        Commands::Kinds => print_kinds(&cfg),
        Commands::Listen {
            address,
            max_messages,
            metrics,
        } => listen(&cfg, &address, max_messages, metrics),
        Commands::Translate { input } => translate_once(&cfg, input),
    }
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn print_kinds(cfg: &BridgeConfig) -> Result<()> {
    println!("{:>5}  {:<10} topic", "id", "message");
    for entry in VfrHudBridge::register_all() {
        println!(
            "{:>5}  {:<10} {}",
            entry.id(),
            entry.kind.name(),
            cfg.topics.topic_for_kind(entry.kind)
        );
    }
    Ok(())
}

fn translate_once(cfg: &BridgeConfig, input: TranslateInput) -> Result<()> {
    let message = match input {
        TranslateInput::VfrHud {
            airspeed,
            groundspeed,
            heading,
            throttle,
            alt,
            climb,
        } => MavMessage::VFR_HUD(VFR_HUD_DATA {
            airspeed,
            groundspeed,
            alt,
            climb,
            heading,
            throttle,
        }),
        TranslateInput::Wind {
            direction,
            speed,
            speed_z,
        } => MavMessage::WIND(WIND_DATA {
            direction,
            speed,
            speed_z,
        }),
    };

    let sink = Arc::new(JsonLinesSink::new(io::stdout()));
    let bridge = VfrHudBridge::new(cfg, sink);
    match bridge.dispatch(&message) {
        DispatchOutcome::Rejected(e) | DispatchOutcome::SinkClosed(e) => Err(e.into()),
        outcome if outcome.published() == 0 => Err(anyhow!("nothing published")),
        _ => Ok(()),
    }
}

fn listen(
    cfg: &BridgeConfig,
    address: &str,
    max_messages: Option<u64>,
    print_metrics: bool,
) -> Result<()> {
    let metrics = BridgeMetrics::new()?;
    let (sink, rx) = ChannelSink::bounded(cfg.queue_size);

    let writer = thread::spawn(move || -> Result<()> {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        for item in rx {
            writeln!(out, "{}", telemetry_sink::encode_line(&item)?)?;
            out.flush()?;
        }
        Ok(())
    });

    let mut router = Router::new();
    router.add_plugin(Box::new(
        VfrHudBridge::new(cfg, Arc::new(sink)).with_metrics(metrics.clone()),
    ))?;
    let routed: Vec<String> = router
        .subscribed_kinds()
        .iter()
        .filter_map(|&id| MessageKind::from_id(id))
        .map(|k| k.to_string())
        .collect();
    info!(address, kinds = ?routed, "connecting");

    let conn = mavlink::connect::<MavMessage>(address)
        .with_context(|| format!("opening MAVLink connection: {address}"))?;

    let mut received: u64 = 0;
    let mut sink_closed = None;
    loop {
        if writer.is_finished() {
            warn!("output writer stopped");
            break;
        }
        match conn.recv() {
            Ok((_header, message)) => {
                if let DispatchOutcome::SinkClosed(e) = router.route(&message) {
                    error!(error = %e, "output closed, stopping");
                    sink_closed = Some(e);
                    break;
                }
                received += 1;
                if max_messages.is_some_and(|max| received >= max) {
                    info!(received, "message limit reached");
                    break;
                }
            }
            Err(MessageReadError::Io(e)) if e.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(1));
            }
            Err(MessageReadError::Io(e)) => {
                error!(error = %e, "connection closed");
                break;
            }
            Err(e) => {
                warn!(error = %e, "dropping undecodable frame");
            }
        }
    }

    // Dropping the router releases the sink so the writer drains and exits.
    drop(router);
    writer
        .join()
        .map_err(|_| anyhow!("output writer panicked"))?
        .context("writing translated messages")?;
    if let Some(e) = sink_closed {
        return Err(e.into());
    }

    if print_metrics {
        eprint!("{}", metrics.encode_text());
    }
    Ok(())
}
