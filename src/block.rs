//! Intervention blocks in their two shapes: the typed values held by the form and the serialized
//! JSON object consumed by the simulator.

use std::collections::{BTreeMap, BTreeSet};

use serde_derive::{Deserialize, Serialize};

use crate::codes::{InteractionSpaceCode, InterventionCode};

/// One intervention period as held by the form after its fields have been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct InterventionBlock {
    pub selected_interventions: BTreeSet<InterventionCode>,
    pub compliance_probability: f64,
    pub duration_days: u32,
    /// Only meaningful when `InterventionCode::SelectiveShutdown` is selected.
    pub disabled_spaces: BTreeSet<InteractionSpaceCode>,
}

impl InterventionBlock {
    #[must_use]
    pub fn to_serialized(&self) -> SerializedBlock {
        let spaces: Vec<i64> = self
            .disabled_spaces
            .iter()
            .map(|space| i64::from(space.code()))
            .collect();
        let mut serialized =
            SerializedBlock::new(i64::from(self.duration_days), self.compliance_probability);
        for intervention in &self.selected_interventions {
            serialized.activate(*intervention, &spaces);
        }
        serialized
    }
}

/// The value of an intervention key in a serialized block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionEntry {
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spaces: Option<Vec<i64>>,
}

/// One element of the schedule array read by the simulator:
///
/// ```json
/// {"num_days": 14, "compliance": 0.5, "selective_shutdown": {"active": true, "spaces": [2, 4]}}
/// ```
///
/// `num_days` and `compliance` are written first; intervention keys follow in key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedBlock {
    pub num_days: i64,
    pub compliance: f64,
    #[serde(flatten)]
    pub interventions: BTreeMap<String, InterventionEntry>,
}

impl SerializedBlock {
    #[must_use]
    pub fn new(num_days: i64, compliance: f64) -> Self {
        SerializedBlock {
            num_days,
            compliance,
            interventions: BTreeMap::new(),
        }
    }

    /// Marks `intervention` active. `NoIntervention` adds nothing, and `spaces` is only recorded
    /// for the custom intervention.
    pub fn activate(&mut self, intervention: InterventionCode, spaces: &[i64]) {
        if intervention == InterventionCode::NoIntervention {
            return;
        }
        let entry = InterventionEntry {
            active: true,
            spaces: intervention.has_spaces().then(|| spaces.to_vec()),
        };
        self.interventions
            .insert(intervention.simulator_key().to_string(), entry);
    }

    pub fn is_active(&self, intervention: InterventionCode) -> bool {
        self.interventions
            .get(intervention.simulator_key())
            .is_some_and(|entry| entry.active)
    }
}

/// Prior values used to pre-populate a block when it is laid out. Every field is optional so a
/// blank block is `BlockValues::default()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockValues {
    pub num_days: Option<i64>,
    pub compliance: Option<f64>,
    pub interventions: Vec<InterventionCode>,
    pub spaces: Vec<InteractionSpaceCode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_intervention_adds_no_key() {
        let mut block = SerializedBlock::new(7, 1.0);
        block.activate(InterventionCode::NoIntervention, &[]);
        assert!(block.interventions.is_empty());
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({"num_days": 7, "compliance": 1.0})
        );
    }

    #[test]
    fn spaces_only_under_custom_intervention() {
        let mut block = SerializedBlock::new(3, 0.25);
        block.activate(InterventionCode::Evacuation, &[1, 2]);
        block.activate(InterventionCode::SelectiveShutdown, &[1, 2]);
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "num_days": 3,
                "compliance": 0.25,
                "evacuation": {"active": true},
                "selective_shutdown": {"active": true, "spaces": [1, 2]},
            })
        );
        assert!(block.is_active(InterventionCode::Evacuation));
        assert!(!block.is_active(InterventionCode::Lockdown));
    }

    #[test]
    fn typed_block_serializes() {
        let block = InterventionBlock {
            selected_interventions: BTreeSet::from([
                InterventionCode::CaseIsolation,
                InterventionCode::SelectiveShutdown,
            ]),
            compliance_probability: 0.9,
            duration_days: 21,
            disabled_spaces: BTreeSet::from([
                InteractionSpaceCode::Library,
                InteractionSpaceCode::Classes,
            ]),
        };
        let serialized = block.to_serialized();
        assert_eq!(serialized.num_days, 21);
        assert_eq!(
            serialized.interventions["selective_shutdown"].spaces,
            Some(vec![1, 5])
        );
        assert_eq!(serialized.interventions["case_isolation"].spaces, None);
    }

    #[test]
    fn key_order_in_output() {
        let mut block = SerializedBlock::new(14, 0.5);
        block.activate(InterventionCode::Lockdown, &[]);
        block.activate(InterventionCode::CaseIsolation, &[]);
        assert_eq!(
            serde_json::to_string(&block).unwrap(),
            r#"{"num_days":14,"compliance":0.5,"case_isolation":{"active":true},"lockdown":{"active":true}}"#
        );
    }
}
