//! Contact Details

/// How to reach the guest about their reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    /// Full name
    pub name: String,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: String,
}

impl ContactDetails {
    /// Returns true once name, email and phone all have something other than whitespace.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.phone]
            .iter()
            .all(|value| !value.trim().is_empty())
    }
}
