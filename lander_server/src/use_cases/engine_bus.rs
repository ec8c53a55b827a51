// Engine state bus: transient local thrusters plus the shared remote latch.

use super::types::LatchCommand;
use crate::domain::{Thruster, ThrusterFlags};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Remote thruster bits shared between the listener and the simulation.
///
/// This is the listener-facing half of the bus: the listener holds an `Arc` and latches
/// thrusters with [`set`](Self::set) and [`clear`](Self::clear); the simulation reads it through
/// [`EngineBus::effective_flags`].
///
/// Every mutation is a single atomic read-modify-write on one byte, so readers only ever see
/// one of the 16 valid combinations.
#[derive(Debug, Default)]
pub struct ThrusterLatch {
    bits: AtomicU8,
}

impl ThrusterLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, thruster: Thruster) {
        self.bits.fetch_or(thruster.bit(), Ordering::Relaxed);
    }

    pub fn clear(&self, thruster: Thruster) {
        self.bits.fetch_and(!thruster.bit(), Ordering::Relaxed);
    }

    pub fn apply(&self, command: LatchCommand) {
        match command {
            LatchCommand::Set(t) => self.set(t),
            LatchCommand::Clear(t) => self.clear(t),
        }
    }

    pub fn load(&self) -> ThrusterFlags {
        ThrusterFlags::from_bits_truncate(self.bits.load(Ordering::Relaxed))
    }

    /// Drops every latched thruster.
    pub fn reset(&self) {
        self.bits.store(0, Ordering::Relaxed);
    }
}

/// Per-simulation view of the thruster command state.
#[derive(Debug)]
pub struct EngineBus {
    transient: ThrusterFlags,
    latch: Arc<ThrusterLatch>,
}

impl EngineBus {
    pub fn new(latch: Arc<ThrusterLatch>) -> Self {
        Self {
            transient: ThrusterFlags::NONE,
            latch,
        }
    }

    /// Adds locally commanded thrusters for the current tick only.
    pub fn apply_local(&mut self, flags: ThrusterFlags) {
        self.transient |= flags;
    }

    pub fn effective_flags(&self) -> ThrusterFlags {
        self.transient | self.latch.load()
    }

    /// Clears this tick's transient flags; the latch is left alone.
    pub fn end_tick(&mut self) {
        self.transient = ThrusterFlags::NONE;
    }

    pub fn latch(&self) -> &Arc<ThrusterLatch> {
        &self.latch
    }
}
