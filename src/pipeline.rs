use std::{fmt, io::Read};

use crate::{
    document::PipelineDocument,
    error::TransformResult,
    fingerprint::{PipelineFingerprint, fingerprint_pipeline},
    grammar::SEGMENT_SEPARATOR,
    operation::Operation,
};

/// Ordered chain of operations, rendered as `seg1/seg2/...`.
///
/// Nodes are kept exactly as appended: never reordered, merged or deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pipeline {
    ops: Vec<Operation>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, op: impl Into<Operation>) -> &mut Self {
        self.ops.push(op.into());
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.ops.iter()
    }

    #[tracing::instrument(level = "debug", skip(self), fields(ops = self.ops.len()))]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                out.push(SEGMENT_SEPARATOR);
            }
            op.render_into(&mut out);
        }
        out
    }

    pub fn fingerprint(&self) -> PipelineFingerprint {
        fingerprint_pipeline(self)
    }

    /// Load a JSON pipeline document, validating every step against its option table.
    pub fn from_reader<R: Read>(r: R) -> TransformResult<Self> {
        PipelineDocument::from_reader(r)?.into_pipeline()
    }

    pub fn from_json_str(s: &str) -> TransformResult<Self> {
        PipelineDocument::from_json_str(s)?.into_pipeline()
    }

    pub fn to_document(&self) -> PipelineDocument {
        PipelineDocument::from_pipeline(self)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<O: Into<Operation>> FromIterator<O> for Pipeline {
    fn from_iter<I: IntoIterator<Item = O>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<O: Into<Operation>> Extend<O> for Pipeline {
    fn extend<I: IntoIterator<Item = O>>(&mut self, iter: I) {
        self.ops.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl IntoIterator for Pipeline {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}
