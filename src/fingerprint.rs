use xxhash_rust::xxh3::Xxh3;

use crate::{operation::Operation, pipeline::Pipeline};

const XXH3_SEED: u64 = 0x5d1c_0a7e_93f4_b2e1;

/// Stable 128-bit key of a pipeline's canonical form, usable as a downstream cache key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PipelineFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for PipelineFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub fn fingerprint_pipeline(pipeline: &Pipeline) -> PipelineFingerprint {
    let mut h = StableHasher::new();
    h.write_u64(pipeline.len() as u64);
    for op in pipeline.iter() {
        write_operation(&mut h, op);
    }
    h.finish()
}

fn write_operation(h: &mut StableHasher, op: &Operation) {
    h.write_str(op.kind());
    h.write_u64(op.len() as u64);
    for opt in op.options() {
        h.write_str(&opt.name);
        h.write_str(&opt.value.encode());
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    // Length prefix keeps ("ab","c") and ("a","bc") apart.
    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(&self) -> PipelineFingerprint {
        let v = self.inner.digest128();
        PipelineFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}
