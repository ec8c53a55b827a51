// Shared helpers for spinning up a lander runtime on an ephemeral port.
#![allow(dead_code)]

use lander_server::LanderHandle;
use lander_server::domain::{FrameSnapshot, KeySource, Presenter, ThrusterFlags};
use lander_server::use_cases::GameSettings;
use std::{net::SocketAddr, time::Duration};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

pub const WAIT: Duration = Duration::from_secs(5);

// Presenter that draws nothing; tests read frames from the watch channel instead.
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _frame: &FrameSnapshot) {}
}

// Start a lander with a fast tick, bound to an OS-assigned local port.
pub async fn start<K>(keys: K) -> LanderHandle
where
    K: KeySource + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let settings = GameSettings {
        tick_interval: Duration::from_millis(1),
        ..GameSettings::default()
    };
    lander_server::spawn(
        listener,
        settings,
        Duration::from_millis(300),
        keys,
        NullPresenter,
    )
    .expect("spawn lander")
}

// One command per connection: connect, write, close.
pub async fn send_opcode(addr: SocketAddr, byte: u8) {
    let mut stream = TcpStream::connect(addr).await.expect("connect to listener");
    stream.write_all(&[byte]).await.expect("write opcode");
    stream.shutdown().await.expect("close write half");
}

// Poll the latch until it matches `expected`, failing after `WAIT`.
pub async fn wait_for_latch(lander: &LanderHandle, expected: ThrusterFlags) {
    let waited = tokio::time::timeout(WAIT, async {
        while lander.latch().load() != expected {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await;
    assert!(
        waited.is_ok(),
        "latch stuck at {:#06b}, expected {:#06b}",
        lander.latch().load().bits(),
        expected.bits()
    );
}
