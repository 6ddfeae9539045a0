//! JSON pipeline documents.
//!
//! ```json
//! { "steps": [ { "op": "resize", "options": { "width": 300, "fit": "crop" } } ] }
//! ```
//!
//! Option order inside each step follows the file. Every step must name a registered operation
//! kind, and every option is validated through that kind's table.

use std::io::Read;

use crate::{
    error::{TransformError, TransformResult},
    operation::Operation,
    pipeline::Pipeline,
    value::OptionValue,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineDocument {
    pub steps: Vec<StepDocument>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDocument {
    pub op: String,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl PipelineDocument {
    pub fn from_reader<R: Read>(r: R) -> TransformResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TransformError::serde(format!("pipeline document: {e}")))
    }

    pub fn from_json_str(s: &str) -> TransformResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| TransformError::serde(format!("pipeline document: {e}")))
    }

    pub fn to_json_pretty(&self) -> TransformResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TransformError::serde(format!("pipeline document: {e}")))
    }

    #[tracing::instrument(level = "debug", skip(self), fields(steps = self.steps.len()))]
    pub fn into_pipeline(self) -> TransformResult<Pipeline> {
        let mut pipeline = Pipeline::new();
        for (i, step) in self.steps.iter().enumerate() {
            pipeline.append(step.to_operation().map_err(|e| e.in_step(i))?);
        }
        Ok(pipeline)
    }

    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        Self {
            steps: pipeline.iter().map(StepDocument::from_operation).collect(),
        }
    }
}

impl StepDocument {
    pub fn to_operation(&self) -> TransformResult<Operation> {
        let mut op = Operation::for_kind(&self.op)?;
        for (name, json) in &self.options {
            op.set_json(name, json)?;
        }
        tracing::trace!(kind = %self.op, options = op.len(), "step loaded");
        Ok(op)
    }

    pub fn from_operation(op: &Operation) -> Self {
        Self {
            op: op.kind().to_owned(),
            options: op
                .options()
                .map(|o| (o.name.clone(), value_to_json(&o.value)))
                .collect(),
        }
    }
}

fn value_to_json(value: &OptionValue) -> serde_json::Value {
    use serde_json::Value;

    match value {
        OptionValue::Bool(b) => Value::Bool(*b),
        OptionValue::Int(v) | OptionValue::Bounded { value: v, .. } => Value::from(*v),
        OptionValue::Text(s) => Value::String(s.clone()),
        OptionValue::Enum(token) => Value::String((*token).to_owned()),
        OptionValue::Resource(r) => Value::String(r.as_str().to_owned()),
        OptionValue::List(items) => Value::Array(items.iter().map(value_to_json).collect()),
    }
}
