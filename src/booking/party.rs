//! Party Size

use std::fmt;

/// Number of guests for a reservation, always within [`PartySize::MIN`]..=[`PartySize::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartySize(u8);

impl PartySize {
    /// Smallest bookable party
    pub const MIN: u8 = 1;

    /// Largest party bookable online
    pub const MAX: u8 = 12;

    /// Party size a fresh reservation starts with
    pub const DEFAULT: Self = Self(2);

    /// Parties of this size or larger must hold the table with a card.
    pub const CARD_HOLD_FROM: u8 = 6;

    /// Create a party size, clamping out-of-range values.
    pub fn new(guests: i64) -> Self {
        let clamped = guests.clamp(i64::from(Self::MIN), i64::from(Self::MAX));

        Self(u8::try_from(clamped).unwrap_or(Self::MAX))
    }

    /// Number of guests
    pub fn get(self) -> u8 {
        self.0
    }

    /// One more guest, stopping at the maximum.
    #[must_use]
    pub fn increment(self) -> Self {
        Self::new(i64::from(self.0) + 1)
    }

    /// One fewer guest, stopping at the minimum.
    #[must_use]
    pub fn decrement(self) -> Self {
        Self::new(i64::from(self.0) - 1)
    }

    /// Returns true if the reservation needs a card to hold the table.
    pub fn requires_card_hold(self) -> bool {
        self.0 >= Self::CARD_HOLD_FROM
    }
}

impl Default for PartySize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 Guest")
        } else {
            write!(f, "{} Guests", self.0)
        }
    }
}
