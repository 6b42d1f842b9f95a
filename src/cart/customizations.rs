//! Customizations
//!
//! Options chosen for a dish (crust, size, extra toppings). Two line items are the same line
//! when they share a menu item and equal customizations; equality ignores the order in which
//! options were picked.

use std::fmt;

use smallvec::SmallVec;

/// One selected option within a group, e.g. `crust: thin`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Choice {
    group: String,
    option: String,
}

impl Choice {
    /// Create a choice.
    pub fn new(group: &str, option: &str) -> Self {
        Self {
            group: group.trim().to_string(),
            option: option.trim().to_string(),
        }
    }

    /// Option group (e.g. `crust`)
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Selected option (e.g. `thin`)
    pub fn option(&self) -> &str {
        &self.option
    }
}

/// Canonical set of choices: sorted by group then option, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Customizations {
    choices: SmallVec<[Choice; 4]>,
}

impl Customizations {
    /// No customizations.
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from `(group, option)` pairs in any order.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        pairs
            .into_iter()
            .map(|(group, option)| Choice::new(group, option))
            .collect()
    }

    /// Add a choice, keeping the set canonical.
    #[must_use]
    pub fn with(mut self, group: &str, option: &str) -> Self {
        let choice = Choice::new(group, option);

        if let Err(pos) = self.choices.binary_search(&choice) {
            self.choices.insert(pos, choice);
        }

        self
    }

    /// Canonical text form, `group=option` pairs joined by `;`.
    ///
    /// Equal customizations always produce the same signature.
    pub fn signature(&self) -> String {
        self.to_string()
    }

    /// Iterate over the choices in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter()
    }

    /// Returns true if nothing was customised.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl FromIterator<Choice> for Customizations {
    fn from_iter<I: IntoIterator<Item = Choice>>(iter: I) -> Self {
        let mut choices: SmallVec<[Choice; 4]> = iter.into_iter().collect();

        choices.sort();
        choices.dedup();

        Self { choices }
    }
}

impl fmt::Display for Customizations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, choice) in self.choices.iter().enumerate() {
            if idx > 0 {
                f.write_str(";")?;
            }

            write!(f, "{}={}", choice.group, choice.option)?;
        }

        Ok(())
    }
}
