// Remote controller: sends latch opcodes to a running lander, one connection per command.

use lander_server::domain::Thruster;
use lander_server::interface_adapters::protocol::encode_opcode;
use lander_server::use_cases::LatchCommand;

use std::{env, fmt, io, time::Duration};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{error, info};

const USAGE: &str = "usage: thrust_client <bottom|left|right|top> <on|off|pulse> [pulse_ms]";
const DEFAULT_PULSE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    On,
    Off,
    // Press-and-release, like holding the controller button.
    Pulse(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Request {
    thruster: Thruster,
    action: Action,
}

#[derive(Debug, PartialEq, Eq)]
enum UsageError {
    MissingArgument,
    UnknownThruster(String),
    UnknownAction(String),
    InvalidPulse(String),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingArgument => f.write_str(USAGE),
            UsageError::UnknownThruster(t) => write!(f, "unknown thruster {t:?}\n{USAGE}"),
            UsageError::UnknownAction(a) => write!(f, "unknown action {a:?}\n{USAGE}"),
            UsageError::InvalidPulse(ms) => write!(f, "invalid pulse length {ms:?}\n{USAGE}"),
        }
    }
}

fn parse_args<I>(mut args: I) -> Result<Request, UsageError>
where
    I: Iterator<Item = String>,
{
    let thruster = args.next().ok_or(UsageError::MissingArgument)?;
    let thruster = match thruster.to_ascii_lowercase().as_str() {
        "bottom" => Thruster::Bottom,
        "left" => Thruster::Left,
        "right" => Thruster::Right,
        "top" => Thruster::Top,
        _ => return Err(UsageError::UnknownThruster(thruster)),
    };

    let action = args.next().ok_or(UsageError::MissingArgument)?;
    let action = match action.to_ascii_lowercase().as_str() {
        "on" => Action::On,
        "off" => Action::Off,
        "pulse" => match args.next() {
            Some(ms) => ms
                .parse::<u64>()
                .map(|ms| Action::Pulse(Duration::from_millis(ms)))
                .map_err(|_| UsageError::InvalidPulse(ms))?,
            None => Action::Pulse(DEFAULT_PULSE),
        },
        _ => return Err(UsageError::UnknownAction(action)),
    };

    Ok(Request { thruster, action })
}

fn lander_addr() -> String {
    let host = env::var("LANDER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("LANDER_REMOTE_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(8888);
    format!("{host}:{port}")
}

async fn send_command(addr: &str, command: LatchCommand) -> io::Result<()> {
    let opcode = encode_opcode(command);
    let mut stream = TcpStream::connect(addr).await?;
    stream.write_all(&[opcode]).await?;
    stream.shutdown().await?;
    info!(%addr, opcode, thruster = %command.thruster(), "command sent");
    Ok(())
}

async fn run(addr: &str, request: Request) -> io::Result<()> {
    let thruster = request.thruster;
    match request.action {
        Action::On => send_command(addr, LatchCommand::Set(thruster)).await,
        Action::Off => send_command(addr, LatchCommand::Clear(thruster)).await,
        Action::Pulse(hold) => {
            send_command(addr, LatchCommand::Set(thruster)).await?;
            tokio::time::sleep(hold).await;
            send_command(addr, LatchCommand::Clear(thruster)).await
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

#[tokio::main]
async fn main() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let request = match parse_args(env::args().skip(1)) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let addr = lander_addr();
    if let Err(e) = run(&addr, request).await {
        error!(%addr, error = %e, "failed to reach lander");
        std::process::exit(1);
    }
}
