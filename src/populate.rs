//! Reverse mapping from a saved schedule back to the values a form block is laid out with.
//!
//! A key of a serialized block counts as an intervention marker when it is one of the simulator
//! keys of [`InterventionCode`] and is neither `num_days` nor `compliance`. Interaction spaces are
//! restored from the `spaces` list under the custom intervention.

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::block::{BlockValues, SerializedBlock};
use crate::codes::{InteractionSpaceCode, InterventionCode, COMPLIANCE_KEY, NUM_DAYS_KEY};
use crate::error::InterventionError;

/// Builds the pre-population values for one saved block.
///
/// Missing or non-numeric `num_days`/`compliance` leave the corresponding field empty, as does a
/// fractional `num_days`. Intervention codes are returned in code order regardless of key order
/// in the JSON. Unknown interaction space codes are dropped.
#[must_use]
pub fn block_values_from_json(block: &Map<String, Value>) -> BlockValues {
    let mut values = BlockValues {
        num_days: block.get(NUM_DAYS_KEY).and_then(whole_days),
        compliance: block.get(COMPLIANCE_KEY).and_then(Value::as_f64),
        ..BlockValues::default()
    };

    for (key, entry) in block {
        if key == NUM_DAYS_KEY || key == COMPLIANCE_KEY {
            continue;
        }
        let Some(intervention) = InterventionCode::from_simulator_key(key) else {
            debug!("Skipping key {key:?}, not an intervention");
            continue;
        };
        values.interventions.push(intervention);
        if intervention.has_spaces() {
            values.spaces = spaces_from_entry(entry);
        }
    }

    values.interventions.sort_unstable();
    values.interventions.dedup();
    values
}

/// Same as [`block_values_from_json`] for a block that is already typed.
pub fn block_values_from_serialized(
    block: &SerializedBlock,
) -> Result<BlockValues, InterventionError> {
    match serde_json::to_value(block)? {
        Value::Object(map) => Ok(block_values_from_json(&map)),
        _ => Err("A serialized block must be a JSON object".into()),
    }
}

/// Durations written by other tools may be floats such as `14.0`; those are kept when whole.
#[allow(clippy::cast_possible_truncation)]
fn whole_days(value: &Value) -> Option<i64> {
    if let Some(days) = value.as_i64() {
        return Some(days);
    }
    let days = value.as_f64()?;
    (days.fract() == 0.0 && days >= i64::MIN as f64 && days < i64::MAX as f64)
        .then_some(days as i64)
}

fn spaces_from_entry(entry: &Value) -> Vec<InteractionSpaceCode> {
    let Some(list) = entry.get("spaces").and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut spaces: Vec<InteractionSpaceCode> = list
        .iter()
        .filter_map(|value| {
            let space = value
                .as_u64()
                .and_then(|code| u8::try_from(code).ok())
                .and_then(InteractionSpaceCode::from_code);
            if space.is_none() {
                warn!("Dropping unknown interaction space {value}");
            }
            space
        })
        .collect();
    spaces.sort_unstable();
    spaces.dedup();
    spaces
}
