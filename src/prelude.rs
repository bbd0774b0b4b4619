pub use crate::assembler::{assemble_intervention_json, FormArrays};
pub use crate::block::{BlockValues, InterventionBlock, InterventionEntry, SerializedBlock};
pub use crate::codes::{InteractionSpaceCode, InterventionCode};
pub use crate::error::InterventionError;
pub use crate::form::{ElementId, FormState};
pub use crate::populate::block_values_from_json;
pub use crate::submission::{read_schedule, InterventionSubmission};
