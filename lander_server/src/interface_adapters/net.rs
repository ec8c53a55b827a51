use crate::interface_adapters::protocol::decode_opcode;
use crate::use_cases::game::shutdown_requested;
use crate::use_cases::{LatchCommand, MIN_INTERVAL, ThrusterLatch};

use std::{io, sync::Arc, time::Duration};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{Instrument, debug, error, info, info_span, warn};

// Only the first byte matters; the rest of a longer write is discarded.
const READ_BUF_LEN: usize = 256;

#[derive(Debug)]
enum ReadError {
    Io(io::Error),
    TimedOut,
}

/// Accepts remote controllers one at a time and applies their opcode to the latch.
///
/// Accept failures are fatal and returned to the caller. Per-connection read problems are
/// logged and the loop moves on to the next connection.
pub async fn remote_listener(
    listener: TcpListener,
    latch: Arc<ThrusterLatch>,
    read_timeout: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> io::Result<()> {
    let address = listener.local_addr()?;
    let read_timeout = read_timeout.max(MIN_INTERVAL);
    info!(%address, "remote command listener ready");

    loop {
        let (mut stream, peer) = tokio::select! {
            _ = shutdown_requested(&mut shutdown) => {
                info!("remote command listener shutting down");
                return Ok(());
            }
            accepted = listener.accept() => accepted.inspect_err(|e| {
                error!(error = %e, "failed to accept remote connection");
            })?,
        };

        let span = info_span!("remote_command", %peer);
        let read = tokio::select! {
            _ = shutdown_requested(&mut shutdown) => {
                info!("remote command listener shutting down");
                return Ok(());
            }
            read = read_opcode(&mut stream, read_timeout).instrument(span.clone()) => read,
        };

        span.in_scope(|| match read {
            Ok(Some(byte)) => {
                apply_opcode(byte, &latch);
            }
            Ok(None) => debug!("connection closed without a command"),
            Err(ReadError::TimedOut) => {
                warn!(timeout_ms = read_timeout.as_millis() as u64, "remote read timed out")
            }
            Err(ReadError::Io(e)) => warn!(error = %e, "remote read failed"),
        });
        // Dropping the stream closes the connection; no reply is sent.
    }
}

async fn read_opcode<R>(reader: &mut R, read_timeout: Duration) -> Result<Option<u8>, ReadError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; READ_BUF_LEN];
    match timeout(read_timeout, reader.read(&mut buf)).await {
        Err(_) => Err(ReadError::TimedOut),
        Ok(Err(e)) => Err(ReadError::Io(e)),
        Ok(Ok(0)) => Ok(None),
        Ok(Ok(_)) => Ok(Some(buf[0])),
    }
}

/// Decodes one opcode and applies it. Unknown opcodes are ignored.
pub fn apply_opcode(byte: u8, latch: &ThrusterLatch) -> Option<LatchCommand> {
    let Some(command) = decode_opcode(byte) else {
        debug!(opcode = byte, "ignoring unknown opcode");
        return None;
    };

    latch.apply(command);
    let engaged = matches!(command, LatchCommand::Set(_));
    info!(
        opcode = byte,
        thruster = %command.thruster(),
        engaged,
        latch = latch.load().bits(),
        "remote thruster command"
    );
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Thruster, ThrusterFlags};
    use crate::use_cases::EngineBus;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn unknown_opcode_leaves_latch_alone() {
        let latch = ThrusterLatch::new();
        latch.set(Thruster::Right);
        assert_eq!(apply_opcode(0xFF, &latch), None);
        assert_eq!(apply_opcode(0, &latch), None);
        assert_eq!(latch.load(), ThrusterFlags::from(Thruster::Right));
    }

    #[test]
    fn on_and_off_opcodes_toggle_the_latch() {
        let latch = ThrusterLatch::new();
        assert_eq!(
            apply_opcode(0b0000_1000, &latch),
            Some(LatchCommand::Set(Thruster::Top))
        );
        assert!(latch.load().contains(Thruster::Top));
        apply_opcode(0b1000_0000, &latch);
        assert!(latch.load().is_empty());
    }

    #[test]
    fn opcodes_reach_the_bus_through_its_shared_latch() {
        let mut bus = EngineBus::new(Arc::new(ThrusterLatch::new()));
        apply_opcode(0b0000_0001, bus.latch());
        bus.end_tick();
        assert_eq!(bus.effective_flags(), ThrusterFlags::from(Thruster::Bottom));

        apply_opcode(0b0001_0000, bus.latch());
        assert!(bus.effective_flags().is_empty());
    }

    #[tokio::test]
    async fn reads_only_the_first_byte() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(&[0b0000_0010, 0b0000_0001, 0xAA]).await.expect("write");
        let byte = read_opcode(&mut server, Duration::from_secs(1))
            .await
            .expect("read");
        assert_eq!(byte, Some(0b0000_0010));
    }

    #[tokio::test]
    async fn closed_peer_yields_no_command() {
        let (client, mut server) = tokio::io::duplex(64);
        drop(client);
        let byte = read_opcode(&mut server, Duration::from_secs(1))
            .await
            .expect("read");
        assert_eq!(byte, None);
    }

    #[tokio::test]
    async fn silent_peer_times_out() {
        let (_client, mut server) = tokio::io::duplex(64);
        let read = read_opcode(&mut server, Duration::from_millis(20)).await;
        assert!(matches!(read, Err(ReadError::TimedOut)));
    }
}
