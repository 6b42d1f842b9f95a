//! Tables
//!
//! The fixed set of table types a guest can request.

use std::{fmt, ops::RangeInclusive, str::FromStr};

use crate::booking::{BookingError, party::PartySize};

/// Kind of table requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableType {
    /// Cozy booth
    Booth,

    /// Window table
    Window,

    /// Family table
    Family,

    /// Private corner
    PrivateCorner,
}

impl TableType {
    /// Every table type, in the order they are offered.
    pub const ALL: [Self; 4] = [Self::Booth, Self::Window, Self::Family, Self::PrivateCorner];

    /// Stable identifier used by forms.
    pub fn id(self) -> &'static str {
        match self {
            Self::Booth => "booth",
            Self::Window => "window",
            Self::Family => "family",
            Self::PrivateCorner => "private",
        }
    }

    /// Reference data for this table type.
    pub fn option(self) -> &'static TableOption {
        match self {
            Self::Booth => &BOOTH,
            Self::Window => &WINDOW,
            Self::Family => &FAMILY,
            Self::PrivateCorner => &PRIVATE_CORNER,
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option().name)
    }
}

impl FromStr for TableType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.id() == s)
            .ok_or_else(|| BookingError::UnknownTable(s.to_string()))
    }
}

/// A table type as shown on the reservation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOption {
    /// Which table this describes
    pub table: TableType,

    /// Display name
    pub name: &'static str,

    /// Guests the table seats comfortably
    pub capacity: RangeInclusive<u8>,

    /// Premium seating
    pub premium: bool,
}

impl TableOption {
    /// Capacity as shown to guests, e.g. `"2-4 people"`.
    pub fn capacity_label(&self) -> String {
        format!("{}-{} people", self.capacity.start(), self.capacity.end())
    }

    /// Returns true if the party fits the table's capacity.
    pub fn seats(&self, party: PartySize) -> bool {
        self.capacity.contains(&party.get())
    }
}

static BOOTH: TableOption = TableOption {
    table: TableType::Booth,
    name: "Cozy Booth",
    capacity: 2..=4,
    premium: false,
};

static WINDOW: TableOption = TableOption {
    table: TableType::Window,
    name: "Window Table",
    capacity: 2..=6,
    premium: true,
};

static FAMILY: TableOption = TableOption {
    table: TableType::Family,
    name: "Family Table",
    capacity: 6..=8,
    premium: false,
};

static PRIVATE_CORNER: TableOption = TableOption {
    table: TableType::PrivateCorner,
    name: "Private Corner",
    capacity: 4..=6,
    premium: true,
};

/// Reference data for every table type, in [`TableType::ALL`] order.
pub static TABLE_OPTIONS: [&TableOption; 4] = [&BOOTH, &WINDOW, &FAMILY, &PRIVATE_CORNER];
