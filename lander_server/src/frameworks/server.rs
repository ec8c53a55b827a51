// Framework bootstrap for the lander runtime.

use crate::domain::systems::lander_movement::spawn_pose;
use crate::domain::{FrameSnapshot, KeySource, Presenter, ThrusterFlags};
use crate::frameworks::config;
use crate::interface_adapters::input::IdleKeys;
use crate::interface_adapters::net::remote_listener;
use crate::interface_adapters::presenter::TracePresenter;
use crate::use_cases::game::lander_task;
use crate::use_cases::{GameSettings, ThrusterLatch};

use std::net::SocketAddr;
use std::{io, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::timeout;
use tracing::{error, info, warn};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

enum Stopped {
    Simulation(Result<(), JoinError>),
    Listener(Result<io::Result<()>, JoinError>),
}

/// Running simulation plus remote listener, sharing one thruster latch.
pub struct LanderHandle {
    latch: Arc<ThrusterLatch>,
    remote_addr: SocketAddr,
    frame_rx: watch::Receiver<FrameSnapshot>,
    shutdown_tx: watch::Sender<bool>,
    simulation: Option<JoinHandle<()>>,
    listener: Option<JoinHandle<io::Result<()>>>,
}

impl LanderHandle {
    pub fn latch(&self) -> &Arc<ThrusterLatch> {
        &self.latch
    }

    /// Address the remote command listener is bound to.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Receiver for the most recent frame.
    pub fn frames(&self) -> watch::Receiver<FrameSnapshot> {
        self.frame_rx.clone()
    }

    pub fn request_shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Waits until the simulation ends on its own or the listener fails.
    pub async fn stopped(&mut self) -> io::Result<()> {
        let (Some(simulation), Some(listener)) =
            (self.simulation.as_mut(), self.listener.as_mut())
        else {
            return Ok(());
        };

        let stopped = tokio::select! {
            joined = simulation => Stopped::Simulation(joined),
            joined = listener => Stopped::Listener(joined),
        };

        match stopped {
            Stopped::Simulation(joined) => {
                self.simulation = None;
                joined.map_err(io::Error::other)?;
                info!("simulation finished");
                Ok(())
            }
            Stopped::Listener(joined) => {
                self.listener = None;
                let result = joined.map_err(io::Error::other)?;
                result.inspect_err(|e| error!(error = %e, "remote listener failed"))
            }
        }
    }

    /// Signals both tasks to stop and joins each with a bounded grace period.
    pub async fn shutdown(mut self) -> io::Result<()> {
        self.request_shutdown();

        if let Some(simulation) = self.simulation.take() {
            join_with_grace("simulation", simulation, config::SHUTDOWN_GRACE).await;
        }

        let mut result = Ok(());
        if let Some(listener) = self.listener.take() {
            let joined = join_with_grace("remote listener", listener, config::SHUTDOWN_GRACE).await;
            if let Some(joined) = joined {
                result = joined;
            }
        }
        info!("lander stopped");
        result
    }
}

async fn join_with_grace<T>(
    task: &'static str,
    handle: JoinHandle<T>,
    grace: Duration,
) -> Option<T> {
    let abort = handle.abort_handle();
    match timeout(grace, handle).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            error!(task, error = %e, "task failed");
            None
        }
        Err(_) => {
            warn!(
                task,
                grace_ms = grace.as_millis() as u64,
                "task did not stop in time; aborting"
            );
            abort.abort();
            None
        }
    }
}

/// Starts the simulation loop and the remote listener on `listener`.
pub fn spawn<K, P>(
    listener: TcpListener,
    settings: GameSettings,
    read_timeout: Duration,
    keys: K,
    presenter: P,
) -> io::Result<LanderHandle>
where
    K: KeySource + 'static,
    P: Presenter + 'static,
{
    let remote_addr = listener.local_addr()?;
    let latch = Arc::new(ThrusterLatch::new());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (frame_tx, frame_rx) = watch::channel(FrameSnapshot {
        tick: 0,
        pose: spawn_pose(&settings.tuning.arena),
        thrusters: ThrusterFlags::NONE,
        dock: settings.tuning.arena.dock,
    });

    let simulation = tokio::spawn(lander_task(
        keys,
        presenter,
        Arc::clone(&latch),
        frame_tx,
        settings,
        shutdown_rx.clone(),
    ));
    let listener = tokio::spawn(remote_listener(
        listener,
        Arc::clone(&latch),
        read_timeout,
        shutdown_rx,
    ));

    Ok(LanderHandle {
        latch,
        remote_addr,
        frame_rx,
        shutdown_tx,
        simulation: Some(simulation),
        listener: Some(listener),
    })
}

/// Binds the remote command port. A failure here is fatal to the process.
pub async fn bind_remote(address: SocketAddr) -> io::Result<TcpListener> {
    TcpListener::bind(address).await.inspect_err(|e| {
        error!(%address, error = %e, "failed to bind");
    })
}

pub async fn run_with_config() -> io::Result<()> {
    init_runtime();

    let settings = config::game_settings().map_err(|e| {
        error!(error = %e, "invalid configuration");
        io::Error::other(e)
    })?;

    let address = SocketAddr::from(([0, 0, 0, 0], config::remote_port()));
    let listener = bind_remote(address).await?;

    let mut lander = spawn(
        listener,
        settings,
        config::read_timeout(),
        IdleKeys,
        TracePresenter::new(config::trace_every()),
    )?;

    let outcome = tokio::select! {
        stopped = lander.stopped() => stopped,
        signal = tokio::signal::ctrl_c() => {
            info!("interrupt received");
            signal
        }
    };

    let shutdown = lander.shutdown().await;
    outcome.and(shutdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_fails_on_an_occupied_port() {
        let taken = bind_remote(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind ephemeral port");
        let address = taken.local_addr().expect("local addr");

        let err = bind_remote(address).await.expect_err("port already in use");
        assert_eq!(err.kind(), io::ErrorKind::AddrInUse);
    }
}
