//! Randomized cross-check of `MyVector` against `std::vec::Vec`.
//!
//! Both containers receive the same seeded stream of operations. After every
//! step the contents must match, `capacity >= len` must hold and capacity
//! must not have shrunk.

use my_vector::MyVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressConfig {
    pub ops: usize,
    pub seed: u64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            ops: 10_000,
            seed: 42,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StressReport {
    pub ops: usize,
    pub max_len: usize,
    pub final_capacity: usize,
    pub reallocations: usize,
    pub rejected: usize,
}

/// First step at which the two containers disagreed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub step: usize,
    pub op: String,
    pub detail: String,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({}): {}", self.step, self.op, self.detail)
    }
}

impl std::error::Error for Divergence {}

pub fn run(config: StressConfig) -> Result<StressReport, Divergence> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut ours: MyVector<i64> = MyVector::new();
    let mut model: Vec<i64> = Vec::new();
    let mut report = StressReport::default();

    for step in 0..config.ops {
        let before = ours.capacity();
        let diverged = |op: String, detail: String| Divergence { step, op, detail };

        let op = match rng.random_range(0..10) {
            0..=3 => {
                let x = rng.random_range(-1000..1000);
                ours.push_back(x);
                model.push(x);
                format!("push {}", x)
            }
            4 | 5 => {
                match (ours.pop_back(), model.pop()) {
                    (Ok(a), Some(b)) if a == b => {}
                    (Err(e), None) if e.is_out_of_range() => report.rejected += 1,
                    (a, b) => {
                        return Err(diverged(
                            "pop".into(),
                            format!("got {:?}, std gave {:?}", a, b),
                        ));
                    }
                }
                "pop".to_string()
            }
            6 => {
                // One past end is deliberately reachable to exercise rejection.
                let idx = rng.random_range(0..=model.len() + 1);
                let x = rng.random_range(-1000..1000);
                let res = ours.insert(ours.begin() + idx as isize, x);
                let op = format!("insert {} {}", idx, x);
                match res {
                    Ok(pos) if idx <= model.len() => {
                        model.insert(idx, x);
                        if pos.get(&ours) != Ok(&x) {
                            return Err(diverged(op, "returned cursor misses the value".into()));
                        }
                    }
                    Err(e) if idx > model.len() && e.is_out_of_range() => report.rejected += 1,
                    other => return Err(diverged(op, format!("unexpected {:?}", other))),
                }
                op
            }
            7 => {
                let idx = rng.random_range(0..=model.len());
                let res = ours.erase(ours.begin() + idx as isize);
                let op = format!("erase {}", idx);
                match res {
                    Ok(_) if idx < model.len() => {
                        model.remove(idx);
                    }
                    Err(e) if idx >= model.len() && e.is_out_of_range() => report.rejected += 1,
                    other => return Err(diverged(op, format!("unexpected {:?}", other))),
                }
                op
            }
            8 => {
                let idx = rng.random_range(0..=model.len());
                let (a, b) = (ours.at(idx).ok(), model.get(idx));
                if a != b {
                    return Err(diverged(
                        format!("at {}", idx),
                        format!("got {:?}, std gave {:?}", a, b),
                    ));
                }
                format!("at {}", idx)
            }
            _ => {
                if rng.random_ratio(1, 50) {
                    ours.clear();
                    model.clear();
                    if ours.capacity() != before {
                        return Err(diverged("clear".into(), "capacity changed".into()));
                    }
                }
                "maybe clear".to_string()
            }
        };

        if ours != model {
            return Err(diverged(op, format!("{:?} != {:?}", ours, model)));
        }
        if ours.capacity() < ours.len() {
            return Err(diverged(op, "capacity below length".into()));
        }
        if ours.capacity() < before {
            return Err(diverged(op, "capacity shrank".into()));
        }
        if ours.capacity() != before {
            report.reallocations += 1;
        }
        report.max_len = report.max_len.max(ours.len());
        report.ops += 1;
    }

    report.final_capacity = ours.capacity();
    Ok(report)
}
