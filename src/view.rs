//! Declarative description of one intervention block.
//!
//! [`build_block_view`] lays out a block the way the page shows it: a multi-select of
//! interventions, a hidden-by-default checklist of interaction spaces, the compliance and duration
//! inputs and a delete control. The description is plain data; [`crate::render`] turns it into
//! markup and [`crate::form::FormState`] applies user edits to it.

use std::fmt::{self, Display};

use strum::IntoEnumIterator;

use crate::block::BlockValues;
use crate::codes::{InteractionSpaceCode, InterventionCode};

/// Identifier of a block in a form. Ids are handed out by the form in increasing order and are
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub(crate) u64);

impl ElementId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const SPACE_CHECKLIST_LABEL: &str = "Select the interaction spaces to disable";
pub const COMPLIANCE_LABEL: &str = "Compliance Probability";
pub const DURATION_LABEL: &str = "Duration of intervention block (days)";
pub const DELETE_LABEL: &str = "Delete Block";
pub const SPACE_CHECKBOX_NAME: &str = "interaction_space_box";

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: InterventionCode,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterventionSelect {
    pub id: String,
    pub options: Vec<SelectOption>,
}

impl InterventionSelect {
    /// Makes `intervention` the only selected option.
    pub fn set_value(&mut self, intervention: InterventionCode) {
        for option in &mut self.options {
            option.selected = option.value == intervention;
        }
    }

    /// Replaces the selection. A single code goes through [`Self::set_value`]; several codes are
    /// each marked selected. Codes are matched against the options, so a code without an option
    /// cannot be selected.
    pub fn select(&mut self, interventions: &[InterventionCode]) {
        match interventions {
            [] => self.clear(),
            [single] => self.set_value(*single),
            many => {
                for option in &mut self.options {
                    option.selected = many.contains(&option.value);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        for option in &mut self.options {
            option.selected = false;
        }
    }

    #[must_use]
    pub fn selected(&self) -> Vec<InterventionCode> {
        self.options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceCheckbox {
    pub id: String,
    pub name: &'static str,
    pub value: InteractionSpaceCode,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceChecklist {
    pub container_id: String,
    pub list_id: String,
    pub label: &'static str,
    pub visible: bool,
    pub checkboxes: Vec<SpaceCheckbox>,
}

impl SpaceChecklist {
    #[must_use]
    pub fn checked(&self) -> Vec<InteractionSpaceCode> {
        self.checkboxes
            .iter()
            .filter(|checkbox| checkbox.checked)
            .map(|checkbox| checkbox.value)
            .collect()
    }
}

/// A numeric `<input>`. Attribute values are kept as the text the page would carry; `value` is
/// whatever the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberInput {
    pub id: String,
    pub label: &'static str,
    pub min: Option<&'static str>,
    pub max: Option<&'static str>,
    pub step: &'static str,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteControl {
    pub label: &'static str,
    /// The block removed when the control is used.
    pub target: ElementId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    /// The id of the list item, taken from the running count of blocks created.
    pub item_id: usize,
    pub element_id: ElementId,
    pub select: InterventionSelect,
    pub spaces: SpaceChecklist,
    pub compliance: NumberInput,
    pub duration: NumberInput,
    pub delete: DeleteControl,
}

impl BlockView {
    /// Changes the selected interventions. The space checklist is shown exactly when the custom
    /// intervention ends up selected.
    pub fn select_interventions(&mut self, interventions: &[InterventionCode]) {
        self.select.select(interventions);
        self.refresh_space_visibility();
    }

    fn refresh_space_visibility(&mut self) {
        self.spaces.visible = self
            .select
            .selected()
            .iter()
            .any(|intervention| intervention.has_spaces());
    }

    pub fn set_space(&mut self, space: InteractionSpaceCode, checked: bool) {
        for checkbox in &mut self.spaces.checkboxes {
            if checkbox.value == space {
                checkbox.checked = checked;
            }
        }
    }
}

/// Lays out one block. `count` is the number of blocks created so far in the form and
/// `element_id` the id reserved for this block; every field id is derived from `element_id`.
#[must_use]
pub fn build_block_view(count: usize, element_id: ElementId, values: &BlockValues) -> BlockView {
    let select = InterventionSelect {
        id: format!("mulIntv{element_id}"),
        options: InterventionCode::iter()
            .map(|intervention| SelectOption {
                value: intervention,
                label: intervention.label(),
                selected: false,
            })
            .collect(),
    };

    let spaces = SpaceChecklist {
        container_id: format!("spaceDiv{element_id}"),
        list_id: format!("spaceList{element_id}"),
        label: SPACE_CHECKLIST_LABEL,
        visible: false,
        checkboxes: InteractionSpaceCode::iter()
            .map(|space| SpaceCheckbox {
                id: format!("space{element_id}_{}", space.code()),
                name: SPACE_CHECKBOX_NAME,
                value: space,
                label: space.label(),
                checked: values.spaces.contains(&space),
            })
            .collect(),
    };

    let compliance = NumberInput {
        id: format!("compProb{element_id}"),
        label: COMPLIANCE_LABEL,
        min: Some("0"),
        max: Some("1"),
        step: "0.001",
        value: values.compliance.map(|compliance| compliance.to_string()),
    };

    let duration = NumberInput {
        id: format!("numDays{element_id}"),
        label: DURATION_LABEL,
        min: Some("1"),
        max: None,
        step: "1",
        value: values.num_days.map(|num_days| num_days.to_string()),
    };

    let mut view = BlockView {
        item_id: count,
        element_id,
        select,
        spaces,
        compliance,
        duration,
        delete: DeleteControl {
            label: DELETE_LABEL,
            target: element_id,
        },
    };
    view.select_interventions(&values.interventions);
    view
}
