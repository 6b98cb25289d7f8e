use std::fmt::{Debug, Display, Formatter};
use std::ops::{BitXor, Not};

/// A reference to a netlist node together with a polarity bit.
///
/// The packing is the same as for AIGER literals: `raw = id << 1 | inverted`.
/// Node 0 is the constant node, so `Signal::FALSE` is raw `0` and
/// `Signal::TRUE` is raw `1`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Signal(u32);

// Constructors
impl Signal {
    pub const FALSE: Self = Self(0);
    pub const TRUE: Self = Self(1);

    pub const fn new(id: u32, inverted: bool) -> Self {
        Self(id << 1 | inverted as u32)
    }

    pub const fn from_id(id: u32) -> Self {
        Self(id << 1)
    }
}

// Getters
impl Signal {
    pub(crate) const fn raw(self) -> u32 {
        self.0
    }

    /// Identity of the referenced node.
    pub const fn id(self) -> u32 {
        self.0 >> 1
    }

    pub(crate) const fn index(self) -> usize {
        (self.0 >> 1) as usize
    }

    /// The same node with non-inverted polarity.
    pub const fn regular(self) -> Self {
        Self(self.0 & !1)
    }
}

// Checks
impl Signal {
    pub const fn is_const(self) -> bool {
        self.id() == 0
    }

    pub const fn is_inverted(self) -> bool {
        self.0 & 1 != 0
    }
}

impl From<bool> for Signal {
    fn from(b: bool) -> Self {
        if b {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }
}

impl Not for Signal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(self.0 ^ 1)
    }
}

impl Not for &Signal {
    type Output = Signal;

    fn not(self) -> Self::Output {
        Signal(self.0 ^ 1)
    }
}

/// Conditional negation: `s ^ true == !s`.
impl BitXor<bool> for Signal {
    type Output = Self;

    fn bitxor(self, rhs: bool) -> Self::Output {
        Self(self.0 ^ rhs as u32)
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_const() {
            write!(f, "{}", self.0 & 1)
        } else {
            if self.is_inverted() {
                write!(f, "!")?;
            }
            write!(f, "n{}", self.id())
        }
    }
}

impl Debug for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
