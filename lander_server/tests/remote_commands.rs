mod support;

use lander_server::domain::{KeyState, Thruster, ThrusterFlags};
use lander_server::interface_adapters::input::{IdleKeys, ScriptedKeys};
use std::time::Duration;
use support::{WAIT, send_opcode, start, wait_for_latch};
use tokio::net::TcpStream;

#[tokio::test]
async fn bottom_on_latches_and_pushes_the_lander_up() {
    let lander = start(IdleKeys).await;
    let addr = lander.remote_addr();

    send_opcode(addr, 0b0000_0001).await;
    wait_for_latch(&lander, Thruster::Bottom.into()).await;

    // Net acceleration is thrust minus gravity, so vertical speed eventually turns upward.
    let mut frames = lander.frames();
    tokio::time::timeout(WAIT, frames.wait_for(|f| f.pose.vy < 0.0))
        .await
        .expect("lander should climb")
        .expect("frames channel open");
    assert!(frames.borrow().thrusters.contains(Thruster::Bottom));

    lander.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn left_on_then_right_off_leaves_only_left() {
    let lander = start(IdleKeys).await;
    let addr = lander.remote_addr();

    send_opcode(addr, 0b0000_0010).await;
    send_opcode(addr, 0b0100_0000).await;
    wait_for_latch(&lander, Thruster::Left.into()).await;

    // Give the listener a moment to process anything still queued.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(lander.latch().load(), ThrusterFlags::from(Thruster::Left));

    lander.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn repeated_off_is_idempotent_and_on_off_round_trips() {
    let lander = start(IdleKeys).await;
    let addr = lander.remote_addr();

    send_opcode(addr, 0b0000_1000).await; // top on
    send_opcode(addr, 0b0000_0100).await; // right on
    let both: ThrusterFlags = [Thruster::Top, Thruster::Right].into_iter().collect();
    wait_for_latch(&lander, both).await;

    send_opcode(addr, 0b1000_0000).await; // top off
    wait_for_latch(&lander, Thruster::Right.into()).await;
    send_opcode(addr, 0b1000_0000).await; // top off again
    send_opcode(addr, 0b0100_0000).await; // right off
    wait_for_latch(&lander, ThrusterFlags::NONE).await;

    lander.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn bad_connections_do_not_stop_the_listener() {
    let lander = start(IdleKeys).await;
    let addr = lander.remote_addr();

    // Unknown opcode, then a peer that closes without writing.
    send_opcode(addr, 0b0001_0001).await;
    drop(TcpStream::connect(addr).await.expect("connect"));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(lander.latch().load().is_empty());

    send_opcode(addr, 0b0000_0001).await;
    wait_for_latch(&lander, Thruster::Bottom.into()).await;

    lander.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn shutdown_is_prompt_with_a_stalled_peer() {
    let lander = start(IdleKeys).await;
    let _stalled = TcpStream::connect(lander.remote_addr())
        .await
        .expect("connect");
    tokio::time::sleep(Duration::from_millis(20)).await;

    tokio::time::timeout(Duration::from_secs(2), lander.shutdown())
        .await
        .expect("shutdown should not wait on the stalled peer")
        .expect("clean shutdown");
}

#[tokio::test]
async fn escape_key_stops_the_simulation() {
    let mut script = vec![KeyState::default(); 3];
    script.push(KeyState {
        escape: true,
        ..KeyState::default()
    });
    let mut lander = start(ScriptedKeys::new(script)).await;

    tokio::time::timeout(WAIT, lander.stopped())
        .await
        .expect("simulation should stop on escape")
        .expect("stopped cleanly");
    assert_eq!(lander.frames().borrow().tick, 3);

    lander.shutdown().await.expect("clean shutdown");
}
