//! Assembles the schedule JSON from the arrays collected out of the form.
//!
//! The form hands over four parallel arrays, one entry per block in display order: the codes
//! selected in each block's multi-select, the compliance values, the durations and the values of
//! each block's checked interaction spaces. Each index becomes one [`SerializedBlock`].
//!
//! Durations and compliance values are copied as given. Range checks belong to the form (see
//! [`crate::form::FormState::collect`]); whatever reaches the assembler is passed through to the
//! simulator unchanged.

use std::str::FromStr;

use log::{trace, warn};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::block::SerializedBlock;
use crate::codes::InterventionCode;
use crate::error::InterventionError;

/// The parallel arrays collected from the form.
///
/// Form controls report their values as strings, so every array accepts numeric strings as well
/// as JSON numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormArrays {
    #[serde(deserialize_with = "deserialize_code_lists")]
    pub intv: Vec<Vec<i64>>,
    #[serde(deserialize_with = "deserialize_values")]
    pub compliance: Vec<f64>,
    #[serde(deserialize_with = "deserialize_values")]
    pub num_days: Vec<i64>,
    /// Kept as text; the assembler reports a space that is not an integer for its block.
    #[serde(deserialize_with = "deserialize_space_lists")]
    pub spaces: Vec<Vec<String>>,
}

impl FormArrays {
    pub fn assemble(&self) -> Result<Vec<SerializedBlock>, InterventionError> {
        assemble_intervention_json(&self.intv, &self.compliance, &self.num_days, &self.spaces)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FormValue<T> {
    Number(T),
    Text(String),
}

impl<T: FromStr> FormValue<T> {
    fn parse<E: de::Error>(self) -> Result<T, E> {
        match self {
            FormValue::Number(number) => Ok(number),
            FormValue::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected a number, got {text:?}"))),
        }
    }
}

fn deserialize_values<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    Vec::<FormValue<T>>::deserialize(deserializer)?
        .into_iter()
        .map(FormValue::parse)
        .collect()
}

fn deserialize_code_lists<'de, D>(deserializer: D) -> Result<Vec<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Vec<FormValue<i64>>>::deserialize(deserializer)?
        .into_iter()
        .map(|list| list.into_iter().map(FormValue::parse).collect())
        .collect()
}

fn deserialize_space_lists<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let lists = Vec::<Vec<FormValue<i64>>>::deserialize(deserializer)?;
    Ok(lists
        .into_iter()
        .map(|list| {
            list.into_iter()
                .map(|value| match value {
                    FormValue::Text(text) => text,
                    FormValue::Number(number) => number.to_string(),
                })
                .collect()
        })
        .collect())
}

/// Builds one serialized block per index of the parallel arrays.
///
/// Code 0 contributes nothing, code 5 carries the block's interaction spaces and codes missing
/// from the table are skipped.
///
/// # Errors
///
/// Returns `InterventionError::MismatchedInputs` if the arrays differ in length and
/// `InterventionError::InvalidSpace` if a space value of a block is not an integer.
pub fn assemble_intervention_json(
    intv: &[Vec<i64>],
    compliance: &[f64],
    num_days: &[i64],
    spaces: &[Vec<String>],
) -> Result<Vec<SerializedBlock>, InterventionError> {
    let count = intv.len();
    if compliance.len() != count || num_days.len() != count || spaces.len() != count {
        return Err(InterventionError::MismatchedInputs {
            interventions: count,
            compliance: compliance.len(),
            num_days: num_days.len(),
            spaces: spaces.len(),
        });
    }

    let mut schedule = Vec::with_capacity(count);
    for (index, codes) in intv.iter().enumerate() {
        let mut block = SerializedBlock::new(num_days[index], compliance[index]);
        let block_spaces = parse_spaces(index, &spaces[index])?;
        for &code in codes {
            match u8::try_from(code).ok().and_then(InterventionCode::from_code) {
                Some(intervention) => block.activate(intervention, &block_spaces),
                None => warn!("Ignoring unknown intervention code {code} in block {index}"),
            }
        }
        trace!("Assembled block {index}: {block:?}");
        schedule.push(block);
    }
    Ok(schedule)
}

fn parse_spaces(block: usize, values: &[String]) -> Result<Vec<i64>, InterventionError> {
    values
        .iter()
        .map(|value| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| InterventionError::InvalidSpace {
                    block,
                    value: value.clone(),
                })
        })
        .collect()
}
