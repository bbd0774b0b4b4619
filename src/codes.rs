//! Lookup tables shared by the form builder and the serializer.
//!
//! Interventions are identified by a small numeric code in the form (the `value` of each option in
//! the multi-select) and by a string key in the schedule consumed by the simulator. Interaction
//! spaces are the campus sub-activities that a "custom intervention" can switch off one by one;
//! their codes follow the interaction type numbering of the simulator.
//!
//! All tables are static and read-only. Iterate over the codes in display order with
//! [`strum::IntoEnumIterator`]:
//!
//! ```rust
//! use ixa_interventions::codes::InterventionCode;
//! use strum::IntoEnumIterator;
//!
//! let keys: Vec<&str> = InterventionCode::iter().map(InterventionCode::simulator_key).collect();
//! assert_eq!(keys[3], "lockdown");
//! ```

use serde_derive::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// JSON key holding the duration of a block in a serialized schedule.
pub const NUM_DAYS_KEY: &str = "num_days";
/// JSON key holding the compliance probability of a block in a serialized schedule.
pub const COMPLIANCE_KEY: &str = "compliance";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum InterventionCode {
    NoIntervention = 0,
    CaseIsolation = 1,
    ClassIsolation = 2,
    Lockdown = 3,
    Evacuation = 4,
    SelectiveShutdown = 5,
}

impl InterventionCode {
    /// Looks up a numeric code. Returns `None` for codes outside the table.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::iter().find(|intervention| intervention.code() == code)
    }

    /// Reverse lookup from the simulator key used in serialized schedules.
    #[must_use]
    pub fn from_simulator_key(key: &str) -> Option<Self> {
        Self::iter().find(|intervention| intervention.simulator_key() == key)
    }

    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Text shown for this option in the form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            InterventionCode::NoIntervention => "No Intervention (business as usual)",
            InterventionCode::CaseIsolation => "Case Isolation",
            InterventionCode::ClassIsolation => "Class Isolation",
            InterventionCode::Lockdown => "Shelter in Place (no activity allowed)",
            InterventionCode::Evacuation => "Campus Evacuation",
            InterventionCode::SelectiveShutdown => "Custom intervention",
        }
    }

    /// Key the simulator expects for this intervention.
    #[must_use]
    pub fn simulator_key(self) -> &'static str {
        match self {
            InterventionCode::NoIntervention => "no_intervention",
            InterventionCode::CaseIsolation => "case_isolation",
            InterventionCode::ClassIsolation => "class_isolation",
            InterventionCode::Lockdown => "lockdown",
            InterventionCode::Evacuation => "evacuation",
            InterventionCode::SelectiveShutdown => "selective_shutdown",
        }
    }

    /// Only the custom intervention carries a list of interaction spaces.
    #[must_use]
    pub fn has_spaces(self) -> bool {
        self == InterventionCode::SelectiveShutdown
    }
}

impl TryFrom<u8> for InterventionCode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("Unknown intervention code {code}"))
    }
}

impl From<InterventionCode> for u8 {
    fn from(intervention: InterventionCode) -> Self {
        intervention.code()
    }
}

// Codes 0 (no off-campus visitors) and 9 and up are not exposed in the form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum InteractionSpaceCode {
    Classes = 1,
    Hostels = 2,
    Messes = 3,
    Cafeterias = 4,
    Library = 5,
    SportsAndGym = 6,
    RecreationalSpaces = 7,
    Home = 8,
}

impl InteractionSpaceCode {
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::iter().find(|space| space.code() == code)
    }

    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            InteractionSpaceCode::Classes => "No Classes",
            InteractionSpaceCode::Hostels => "Stay within Hostels",
            InteractionSpaceCode::Messes => "Close Messes",
            InteractionSpaceCode::Cafeterias => "Close Cafeterias",
            InteractionSpaceCode::Library => "Close Library",
            InteractionSpaceCode::SportsAndGym => "Close Sports&Gym",
            InteractionSpaceCode::RecreationalSpaces => "Close Rec. Spaces",
            InteractionSpaceCode::Home => "Stay at Home",
        }
    }
}

impl TryFrom<u8> for InteractionSpaceCode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("Unknown interaction space code {code}"))
    }
}

impl From<InteractionSpaceCode> for u8 {
    fn from(space: InteractionSpaceCode) -> Self {
        space.code()
    }
}
