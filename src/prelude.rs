//! Nonna Rosa prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    booking::{
        Booking, BookingDraft, BookingError, BookingSnapshot, BookingWizard, CONFIRMATION_MESSAGE,
        Confirmation, ContactDetails, Field, PartySize, Step, StepValidity, SummaryLine,
        TABLE_OPTIONS, TableOption, TableType, TimeSlot, schedule::available_dates,
    },
    cart::{Cart, CartSnapshot, CartTotals, Choice, Customizations, LineItem, LineItemKey},
    menu::{Category, Favorites, Menu, MenuError, MenuItem, MenuItemKey, NewMenuItem},
    pricing::{Price, PricingError, PricingPolicy},
    receipt::{ReceiptError, write_cart, write_confirmation},
    tags::Tags,
};
