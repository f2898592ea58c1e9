/// Logical time for the deterministic simulation.
///
/// Represents a tick counter with no dependency on `std::time`. Time
/// advances only when the scheduler steps — never from wall-clock
/// observation.

/// A logical tick in simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(u64);

impl Tick {
    /// The zero-point of simulation time.
    pub const ZERO: Tick = Tick(0);

    /// Create a new `Tick` from a raw value.
    #[inline]
    pub fn new(value: u64) -> Self {
        Tick(value)
    }

    /// Return the raw tick value.
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Compute the tick that is `delta` ticks after `self`.
    /// Returns `None` on overflow (should never happen in practice).
    #[inline]
    pub fn plus(self, delta: u64) -> Option<Tick> {
        self.0.checked_add(delta).map(Tick)
    }

    /// Returns `true` if `self` is strictly before `other`.
    #[inline]
    pub fn is_before(self, other: Tick) -> bool {
        self.0 < other.0
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T={}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(Tick::ZERO.value(), 0);
    }

    #[test]
    fn test_ordering() {
        let t1 = Tick::new(10);
        let t2 = Tick::new(20);
        assert!(t1 < t2);
        assert!(t1.is_before(t2));
        assert!(!t2.is_before(t1));
    }

    #[test]
    fn test_plus() {
        let t = Tick::new(100);
        assert_eq!(t.plus(50).unwrap().value(), 150);
    }

    #[test]
    fn test_plus_overflow() {
        let t = Tick::new(u64::MAX);
        assert!(t.plus(1).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Tick::new(42)), "T=42");
    }

    #[test]
    fn test_equality() {
        assert_eq!(Tick::new(99), Tick::new(99));
    }
}
