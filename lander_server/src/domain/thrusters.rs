// Thruster identities and the 4-bit flag set the physics step consumes.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// One of the four lander thrusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thruster {
    Bottom,
    Left,
    Right,
    Top,
}

impl Thruster {
    pub const ALL: [Thruster; 4] = [
        Thruster::Bottom,
        Thruster::Left,
        Thruster::Right,
        Thruster::Top,
    ];

    /// Bit this thruster occupies inside a [`ThrusterFlags`] set.
    pub const fn bit(self) -> u8 {
        match self {
            Thruster::Bottom => 0b0001,
            Thruster::Left => 0b0010,
            Thruster::Right => 0b0100,
            Thruster::Top => 0b1000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Thruster::Bottom => "bottom",
            Thruster::Left => "left",
            Thruster::Right => "right",
            Thruster::Top => "top",
        }
    }
}

impl fmt::Display for Thruster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of active thrusters.
///
/// Only the low nibble is ever populated, so every value is one of the 16 valid combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ThrusterFlags(u8);

impl ThrusterFlags {
    pub const MASK: u8 = 0b1111;
    pub const NONE: ThrusterFlags = ThrusterFlags(0);

    /// Builds a set from raw bits, dropping anything above the low nibble.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, thruster: Thruster) -> bool {
        self.0 & thruster.bit() != 0
    }

    pub fn insert(&mut self, thruster: Thruster) {
        self.0 |= thruster.bit();
    }

    pub fn remove(&mut self, thruster: Thruster) {
        self.0 &= !thruster.bit();
    }

    pub fn iter(self) -> impl Iterator<Item = Thruster> {
        Thruster::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl From<Thruster> for ThrusterFlags {
    fn from(thruster: Thruster) -> Self {
        Self(thruster.bit())
    }
}

impl FromIterator<Thruster> for ThrusterFlags {
    fn from_iter<I: IntoIterator<Item = Thruster>>(iter: I) -> Self {
        let mut flags = ThrusterFlags::NONE;
        for thruster in iter {
            flags.insert(thruster);
        }
        flags
    }
}

impl BitOr for ThrusterFlags {
    type Output = ThrusterFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ThrusterFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
