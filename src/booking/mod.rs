//! Booking
//!
//! The three-step table reservation wizard. Each step has its own required fields; the wizard
//! only moves forward once they are filled in, and moving back never loses anything entered.
//!
//! 1. [`Step::DateTime`]: date and time slot
//! 2. [`Step::TableParty`]: table type, party size, special requests
//! 3. [`Step::Contact`]: name, email and phone, then [`BookingWizard::submit`]

use std::fmt;

use jiff::civil::Date;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod contact;
pub mod party;
pub mod schedule;
pub mod tables;

pub use contact::ContactDetails;
pub use party::PartySize;
pub use schedule::TimeSlot;
pub use tables::{TABLE_OPTIONS, TableOption, TableType};

/// Acknowledgement shown once a reservation is confirmed.
pub const CONFIRMATION_MESSAGE: &str =
    "Reservation confirmed! You'll receive a confirmation email shortly.";

/// Where the guest is in the wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Step {
    /// Step 1: pick a date and time
    #[default]
    DateTime,

    /// Step 2: pick a table and party details
    TableParty,

    /// Step 3: leave contact details
    Contact,

    /// Submitted; no further changes
    Confirmed,
}

impl Step {
    /// The form steps in order.
    pub const FORM_STEPS: [Self; 3] = [Self::DateTime, Self::TableParty, Self::Contact];

    /// 1-based position in the form, `None` once confirmed.
    pub fn number(self) -> Option<u8> {
        match self {
            Self::DateTime => Some(1),
            Self::TableParty => Some(2),
            Self::Contact => Some(3),
            Self::Confirmed => None,
        }
    }

    /// Heading shown above the step.
    pub fn title(self) -> &'static str {
        match self {
            Self::DateTime => "Select Date & Time",
            Self::TableParty => "Choose Table & Party Details",
            Self::Contact => "Your Information",
            Self::Confirmed => "Reservation Confirmed",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A field the wizard requires before moving on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Reservation date
    Date,

    /// Reservation time slot
    Time,

    /// Table type
    Table,

    /// Guest name
    Name,

    /// Guest email
    Email,

    /// Guest phone
    Phone,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Table => "table",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        })
    }
}

/// Why the wizard refused a transition or an input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    /// Required fields of the current step are empty; the wizard stays where it is.
    #[error("{step} is incomplete: missing {}", join_fields(.missing))]
    Incomplete {
        /// Step that can't be left yet
        step: Step,
        /// Fields still empty
        missing: SmallVec<[Field; 3]>,
    },

    /// `advance` was called on the last form step; use `submit`.
    #[error("{0} is the last step; submit the reservation instead")]
    SubmitRequired(Step),

    /// `submit` was called before reaching the last form step.
    #[error("cannot submit from {0}")]
    NotAtFinalStep(Step),

    /// The reservation was already confirmed.
    #[error("reservation already confirmed")]
    AlreadyConfirmed,

    /// Form sent a table id that doesn't exist.
    #[error("unknown table type: {0}")]
    UnknownTable(String),

    /// Form sent a time that isn't a bookable slot.
    #[error("unknown time slot: {0}")]
    UnknownTimeSlot(String),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    /// Reservation date
    pub date: Option<Date>,

    /// Reservation time
    pub time: Option<TimeSlot>,

    /// Number of guests
    pub party_size: PartySize,

    /// Requested table
    pub table: Option<TableType>,

    /// Free text for the kitchen or host
    pub special_requests: String,

    /// How to reach the guest
    pub contact: ContactDetails,
}

impl BookingDraft {
    /// Required fields of `step` that are still empty.
    pub fn missing(&self, step: Step) -> SmallVec<[Field; 3]> {
        let mut missing = SmallVec::new();

        match step {
            Step::DateTime => {
                if self.date.is_none() {
                    missing.push(Field::Date);
                }
                if self.time.is_none() {
                    missing.push(Field::Time);
                }
            }
            Step::TableParty => {
                if self.table.is_none() {
                    missing.push(Field::Table);
                }
            }
            Step::Contact => {
                if self.contact.name.trim().is_empty() {
                    missing.push(Field::Name);
                }
                if self.contact.email.trim().is_empty() {
                    missing.push(Field::Email);
                }
                if self.contact.phone.trim().is_empty() {
                    missing.push(Field::Phone);
                }
            }
            Step::Confirmed => {}
        }

        missing
    }

    /// Returns true if `step` has every required field.
    pub fn is_complete(&self, step: Step) -> bool {
        self.missing(step).is_empty()
    }

    /// Lines for the reservation summary sidebar.
    pub fn summary(&self) -> SmallVec<[SummaryLine; 4]> {
        let mut lines = SmallVec::new();

        lines.push(SummaryLine {
            label: "Date",
            value: self.date.map_or_else(
                || NOT_SELECTED.to_string(),
                |date| date.strftime("%A, %B %-d, %Y").to_string(),
            ),
        });

        lines.push(SummaryLine {
            label: "Time",
            value: self
                .time
                .map_or_else(|| NOT_SELECTED.to_string(), |time| time.to_string()),
        });

        lines.push(SummaryLine {
            label: "Party Size",
            value: self.party_size.to_string(),
        });

        if let Some(table) = self.table {
            lines.push(SummaryLine {
                label: "Table",
                value: table.to_string(),
            });
        }

        lines
    }
}

const NOT_SELECTED: &str = "Not selected";

/// One labelled line of the reservation summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Label, e.g. "Party Size"
    pub label: &'static str,

    /// Value, e.g. "4 Guests"
    pub value: String,
}

/// Whether each form step currently has its required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepValidity {
    /// Date and time chosen
    pub date_time: bool,

    /// Table chosen
    pub table_party: bool,

    /// Contact details filled in
    pub contact: bool,
}

impl StepValidity {
    /// Validity of a single step; `Confirmed` is never valid to leave.
    pub fn for_step(self, step: Step) -> bool {
        match step {
            Step::DateTime => self.date_time,
            Step::TableParty => self.table_party,
            Step::Contact => self.contact,
            Step::Confirmed => false,
        }
    }
}

/// Read-only view of the wizard handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSnapshot {
    /// Current step
    pub step: Step,

    /// Everything entered so far
    pub draft: BookingDraft,

    /// Per-step validity, drives the enabled state of "continue"
    pub validity: StepValidity,
}

/// A finalised reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Reservation date
    pub date: Date,

    /// Reservation time
    pub time: TimeSlot,

    /// Number of guests
    pub party_size: PartySize,

    /// Table type
    pub table: TableType,

    /// Special requests, if any were given
    pub special_requests: Option<String>,

    /// Guest contact details
    pub contact: ContactDetails,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// The reservation as submitted
    pub booking: Booking,

    /// Acknowledgement to show the guest
    pub message: &'static str,
}

/// Reservation wizard
#[derive(Debug, Clone, Default)]
pub struct BookingWizard {
    step: Step,
    draft: BookingDraft,
}

impl BookingWizard {
    /// Start a fresh reservation on step 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step
    pub fn step(&self) -> Step {
        self.step
    }

    /// Everything entered so far
    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Validity of every form step.
    pub fn validity(&self) -> StepValidity {
        StepValidity {
            date_time: self.draft.is_complete(Step::DateTime),
            table_party: self.draft.is_complete(Step::TableParty),
            contact: self.draft.is_complete(Step::Contact),
        }
    }

    /// Returns true if the current step can be left forwards (by `advance` or `submit`).
    pub fn can_advance(&self) -> bool {
        self.validity().for_step(self.step)
    }

    /// Step, draft and validity together.
    pub fn snapshot(&self) -> BookingSnapshot {
        BookingSnapshot {
            step: self.step,
            draft: self.draft.clone(),
            validity: self.validity(),
        }
    }

    /// Choose the reservation date.
    pub fn set_date(&mut self, date: Date) {
        self.edit(Field::Date, |draft| draft.date = Some(date));
    }

    /// Choose the time slot.
    pub fn set_time(&mut self, time: TimeSlot) {
        self.edit(Field::Time, |draft| draft.time = Some(time));
    }

    /// Set the number of guests, clamped to the bookable range.
    pub fn set_party_size(&mut self, guests: i64) {
        self.edit_party_size(|_| PartySize::new(guests));
    }

    /// One more guest, up to the maximum.
    pub fn increment_party_size(&mut self) {
        self.edit_party_size(PartySize::increment);
    }

    /// One fewer guest, down to the minimum.
    pub fn decrement_party_size(&mut self) {
        self.edit_party_size(PartySize::decrement);
    }

    /// Choose the table type.
    pub fn set_table(&mut self, table: TableType) {
        self.edit(Field::Table, |draft| draft.table = Some(table));
    }

    /// Replace the special requests text.
    pub fn set_special_requests(&mut self, requests: impl Into<String>) {
        if self.is_confirmed("special requests") {
            return;
        }

        self.draft.special_requests = requests.into();
    }

    /// Set the guest's name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.edit(Field::Name, |draft| draft.contact.name = name);
    }

    /// Set the guest's email.
    pub fn set_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        self.edit(Field::Email, |draft| draft.contact.email = email);
    }

    /// Set the guest's phone number.
    pub fn set_phone(&mut self, phone: impl Into<String>) {
        let phone = phone.into();
        self.edit(Field::Phone, |draft| draft.contact.phone = phone);
    }

    /// Move to the next form step if the current one is complete.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Incomplete`]: required fields are empty; the step does not change.
    /// - [`BookingError::SubmitRequired`]: already on the last form step.
    /// - [`BookingError::AlreadyConfirmed`]: the reservation was submitted.
    pub fn advance(&mut self) -> Result<Step, BookingError> {
        let next = match self.step {
            Step::DateTime => Step::TableParty,
            Step::TableParty => Step::Contact,
            Step::Contact => return Err(BookingError::SubmitRequired(self.step)),
            Step::Confirmed => return Err(BookingError::AlreadyConfirmed),
        };

        self.ensure_complete(self.step)?;

        debug!(from = %self.step, to = %next, "advanced booking step");

        self.step = next;

        Ok(next)
    }

    /// Move back one form step, keeping everything entered. No-op on step 1 or once confirmed.
    pub fn retreat(&mut self) -> Step {
        let previous = match self.step {
            Step::TableParty => Step::DateTime,
            Step::Contact => Step::TableParty,
            Step::DateTime | Step::Confirmed => self.step,
        };

        if previous != self.step {
            debug!(from = %self.step, to = %previous, "retreated booking step");
            self.step = previous;
        }

        self.step
    }

    /// Confirm the reservation from the last form step.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotAtFinalStep`]: called before reaching the contact step.
    /// - [`BookingError::Incomplete`]: a required field is empty; nothing changes.
    /// - [`BookingError::AlreadyConfirmed`]: the reservation was already submitted.
    pub fn submit(&mut self) -> Result<Confirmation, BookingError> {
        match self.step {
            Step::Contact => {}
            Step::Confirmed => return Err(BookingError::AlreadyConfirmed),
            other => return Err(BookingError::NotAtFinalStep(other)),
        }

        for step in Step::FORM_STEPS {
            self.ensure_complete(step)?;
        }

        let draft = &self.draft;

        let (Some(date), Some(time), Some(table)) = (draft.date, draft.time, draft.table) else {
            return Err(BookingError::Incomplete {
                step: Step::DateTime,
                missing: draft.missing(Step::DateTime),
            });
        };

        let special_requests = draft.special_requests.trim();

        let booking = Booking {
            date,
            time,
            party_size: draft.party_size,
            table,
            special_requests: (!special_requests.is_empty()).then(|| special_requests.to_string()),
            contact: draft.contact.clone(),
        };

        info!(
            %date,
            %time,
            guests = booking.party_size.get(),
            table = table.id(),
            "reservation confirmed"
        );

        self.step = Step::Confirmed;

        Ok(Confirmation {
            booking,
            message: CONFIRMATION_MESSAGE,
        })
    }

    /// Discard the draft and start over on step 1.
    pub fn restart(&mut self) {
        debug!(from = %self.step, "restarted booking");

        *self = Self::new();
    }

    fn ensure_complete(&self, step: Step) -> Result<(), BookingError> {
        let missing = self.draft.missing(step);

        if missing.is_empty() {
            Ok(())
        } else {
            debug!(%step, missing = %join_fields(&missing), "booking step incomplete");
            Err(BookingError::Incomplete { step, missing })
        }
    }

    fn edit(&mut self, field: Field, apply: impl FnOnce(&mut BookingDraft)) {
        if self.is_confirmed(field) {
            return;
        }

        apply(&mut self.draft);

        debug!(%field, "updated booking field");
    }

    fn edit_party_size(&mut self, apply: impl FnOnce(PartySize) -> PartySize) {
        if self.is_confirmed("party size") {
            return;
        }

        self.draft.party_size = apply(self.draft.party_size);

        debug!(guests = self.draft.party_size.get(), "updated party size");
    }

    fn is_confirmed(&self, field: impl fmt::Display) -> bool {
        let confirmed = self.step == Step::Confirmed;

        if confirmed {
            warn!(%field, "ignored change to a confirmed reservation");
        }

        confirmed
    }
}
