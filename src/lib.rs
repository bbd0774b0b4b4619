//! Intervention schedules for campus epidemic simulations
//!
//! An intervention schedule is a sequence of intervention blocks. Each block keeps a set of
//! policy actions (case isolation, lockdown, evacuation, ...) active for a number of days with a
//! given compliance probability. The simulator reads the schedule as a JSON array with one object
//! per block.
//!
//! This crate holds everything between the form a user fills in and that JSON array:
//! * [`codes`]: the lookup tables from intervention and interaction space codes to labels and
//!   simulator keys.
//! * [`view`] and [`render`]: the layout of one block as plain data, and its HTML rendering.
//! * [`form`]: the state of a form being edited, with adding, editing, deleting and collecting
//!   blocks.
//! * [`assembler`]: the parallel form arrays to schedule JSON.
//! * [`populate`]: a saved schedule back to form values, for editing.
//! * [`submission`]: the saved payload and schedule files.
//!
//! ```rust
//! use ixa_interventions::prelude::*;
//!
//! let mut form = FormState::new();
//! let block = form.new_block();
//! form.select_interventions(block, &[InterventionCode::CaseIsolation, InterventionCode::Lockdown])
//!     .unwrap();
//! form.set_compliance(block, "0.5").unwrap();
//! form.set_duration(block, "14").unwrap();
//!
//! let schedule = form.collect().unwrap().assemble().unwrap();
//! assert_eq!(
//!     serde_json::to_string(&schedule).unwrap(),
//!     r#"[{"num_days":14,"compliance":0.5,"case_isolation":{"active":true},"lockdown":{"active":true}}]"#
//! );
//! ```
pub mod assembler;
pub mod block;
pub mod codes;
pub mod error;
pub mod form;
pub mod log;
pub mod populate;
pub mod prelude;
pub mod render;
pub mod runner;
pub mod settings;
pub mod submission;
pub mod view;

pub use crate::assembler::{assemble_intervention_json, FormArrays};
pub use crate::block::{BlockValues, InterventionBlock, SerializedBlock};
pub use crate::error::InterventionError;
pub use crate::form::FormState;
pub use crate::log::{debug, error, info, trace, warn};
