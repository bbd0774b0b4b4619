//! The state of one intervention form.
//!
//! A `FormState` owns everything the page keeps while a schedule is being edited: the blocks in
//! display order, the number of blocks created so far and the generator handing out element ids.
//! Ids are sequential and never reused, even after a block is deleted, so every field id in the
//! form stays unique.
//!
//! Field values are kept as the text typed into the inputs. They are only parsed and checked when
//! the form is collected for submission, and a bad field is reported with a message naming the
//! block.

use std::collections::BTreeSet;

use log::{debug, info};
use serde_json::{Map, Value};

use crate::assembler::FormArrays;
use crate::block::{BlockValues, InterventionBlock};
use crate::codes::{InteractionSpaceCode, InterventionCode};
use crate::error::InterventionError;
use crate::populate::block_values_from_json;
use crate::submission::InterventionSubmission;
pub use crate::view::ElementId;
use crate::view::{build_block_view, BlockView};

/// Hands out element ids in increasing order.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    #[must_use]
    pub fn starting_at(next: u64) -> Self {
        IdGenerator { next }
    }

    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to `next_id` returns.
    #[must_use]
    pub fn peek(&self) -> ElementId {
        ElementId(self.next)
    }
}

#[derive(Debug, Default)]
pub struct FormState {
    blocks: Vec<BlockView>,
    count: usize,
    ids: IdGenerator,
    defaults: BlockValues,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        FormState::default()
    }

    /// A form whose blank blocks are pre-filled with `defaults`.
    #[must_use]
    pub fn with_defaults(defaults: BlockValues) -> Self {
        FormState {
            defaults,
            ..FormState::default()
        }
    }

    /// A form whose first block gets `first_id`, for pages that already hold blocks.
    #[must_use]
    pub fn starting_at(first_id: u64) -> Self {
        FormState {
            ids: IdGenerator::starting_at(first_id),
            ..FormState::default()
        }
    }

    /// Lays out a block with the form defaults and appends it. Returns the id of the new block.
    pub fn new_block(&mut self) -> ElementId {
        let defaults = self.defaults.clone();
        self.add_block(&defaults)
    }

    /// Lays out a block pre-populated with `values` and appends it.
    pub fn add_block(&mut self, values: &BlockValues) -> ElementId {
        let element_id = self.ids.next_id();
        let view = build_block_view(self.count, element_id, values);
        self.blocks.push(view);
        self.count += 1;
        debug!("Added intervention block {element_id}");
        element_id
    }

    /// Appends a block populated from one element of a saved schedule.
    pub fn existing_block(&mut self, block: &Map<String, Value>) -> ElementId {
        let values = block_values_from_json(block);
        self.add_block(&values)
    }

    /// Appends one block per element of a saved schedule, in order.
    pub fn load_schedule(&mut self, schedule: &[Map<String, Value>]) -> Vec<ElementId> {
        let ids: Vec<ElementId> = schedule
            .iter()
            .map(|block| self.existing_block(block))
            .collect();
        info!("Loaded {} intervention blocks", ids.len());
        ids
    }

    /// Removes the block and all of its fields. There is no undo; the counters are left alone.
    pub fn delete_block(&mut self, element_id: ElementId) -> Result<(), InterventionError> {
        let index = self.index_of(element_id)?;
        self.blocks.remove(index);
        debug!("Deleted intervention block {element_id}");
        Ok(())
    }

    pub fn select_interventions(
        &mut self,
        element_id: ElementId,
        interventions: &[InterventionCode],
    ) -> Result<(), InterventionError> {
        self.block_mut(element_id)?.select_interventions(interventions);
        Ok(())
    }

    pub fn set_compliance(
        &mut self,
        element_id: ElementId,
        value: &str,
    ) -> Result<(), InterventionError> {
        self.block_mut(element_id)?.compliance.value = Some(value.to_string());
        Ok(())
    }

    pub fn set_duration(
        &mut self,
        element_id: ElementId,
        value: &str,
    ) -> Result<(), InterventionError> {
        self.block_mut(element_id)?.duration.value = Some(value.to_string());
        Ok(())
    }

    pub fn set_space(
        &mut self,
        element_id: ElementId,
        space: InteractionSpaceCode,
        checked: bool,
    ) -> Result<(), InterventionError> {
        self.block_mut(element_id)?.set_space(space, checked);
        Ok(())
    }

    #[must_use]
    pub fn block(&self, element_id: ElementId) -> Option<&BlockView> {
        self.blocks
            .iter()
            .find(|view| view.element_id == element_id)
    }

    /// The live blocks in display order.
    #[must_use]
    pub fn blocks(&self) -> &[BlockView] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks created over the life of the form, including deleted ones.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn next_element_id(&self) -> ElementId {
        self.ids.peek()
    }

    /// Parses every block's fields.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDuration` or `InvalidCompliance` for the first block whose field does not
    /// hold a positive whole number of days or a probability.
    pub fn intervention_blocks(&self) -> Result<Vec<InterventionBlock>, InterventionError> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(index, view)| {
                let duration_days = parse_duration(index, view.duration.value.as_deref())?;
                let compliance_probability =
                    parse_compliance(index, view.compliance.value.as_deref())?;
                Ok(InterventionBlock {
                    selected_interventions: view.select.selected().into_iter().collect(),
                    compliance_probability,
                    duration_days,
                    disabled_spaces: view.spaces.checked().into_iter().collect::<BTreeSet<_>>(),
                })
            })
            .collect()
    }

    /// Gathers the parallel arrays handed to the assembler, one entry per block in display order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::intervention_blocks`].
    pub fn collect(&self) -> Result<FormArrays, InterventionError> {
        let mut arrays = FormArrays::default();
        for block in self.intervention_blocks()? {
            arrays.intv.push(
                block
                    .selected_interventions
                    .iter()
                    .map(|intervention| i64::from(intervention.code()))
                    .collect(),
            );
            arrays.compliance.push(block.compliance_probability);
            arrays.num_days.push(i64::from(block.duration_days));
            arrays.spaces.push(
                block
                    .disabled_spaces
                    .iter()
                    .map(|space| space.code().to_string())
                    .collect(),
            );
        }
        Ok(arrays)
    }

    /// Collects and assembles the form into the payload posted under `name`.
    pub fn submit(&self, name: &str) -> Result<InterventionSubmission, InterventionError> {
        let schedule = self.collect()?.assemble()?;
        InterventionSubmission::new(name, schedule)
    }

    fn index_of(&self, element_id: ElementId) -> Result<usize, InterventionError> {
        self.blocks
            .iter()
            .position(|view| view.element_id == element_id)
            .ok_or(InterventionError::UnknownBlock(element_id))
    }

    fn block_mut(&mut self, element_id: ElementId) -> Result<&mut BlockView, InterventionError> {
        let index = self.index_of(element_id)?;
        Ok(&mut self.blocks[index])
    }
}

/// A duration is a whole number of days, at least 1.
pub fn parse_duration(block: usize, value: Option<&str>) -> Result<u32, InterventionError> {
    let text = value.unwrap_or_default();
    match text.trim().parse::<u32>() {
        Ok(days) if days >= 1 => Ok(days),
        _ => Err(InterventionError::InvalidDuration {
            block,
            value: text.to_string(),
        }),
    }
}

/// A compliance probability is a number in [0, 1].
pub fn parse_compliance(block: usize, value: Option<&str>) -> Result<f64, InterventionError> {
    let text = value.unwrap_or_default();
    match text.trim().parse::<f64>() {
        Ok(probability) if (0.0..=1.0).contains(&probability) => Ok(probability),
        _ => Err(InterventionError::InvalidCompliance {
            block,
            value: text.to_string(),
        }),
    }
}
