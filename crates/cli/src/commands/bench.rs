//! Container timing experiment.
//!
//! Inserts the same random integers into six standard containers, looks
//! them up and walks them end to end, timing each phase per
//! container. Results are indicative only: one run, wall-clock time, no
//! statistical treatment.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList};
use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::BenchConfig;

/// Values are drawn from `0..size * VALUE_SPREAD`, so roughly a tenth of the
/// lookups hit.
const VALUE_SPREAD: u64 = 10;

/// Timing of one operation on one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchResult {
    pub name: String,
    pub elapsed: Duration,
}

impl BenchResult {
    #[must_use]
    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

#[derive(Default)]
struct Containers {
    vec: Vec<u64>,
    list: LinkedList<u64>,
    hash_set: HashSet<u64>,
    tree_set: BTreeSet<u64>,
    hash_map: HashMap<u64, u64>,
    tree_map: BTreeMap<u64, u64>,
}

type Phase = fn(&mut Containers, &[u64]);

const ADD: [(&str, Phase); 6] = [
    ("Vec", |c, data| {
        c.vec.clear();
        c.vec.extend(data.iter().copied());
    }),
    ("LinkedList", |c, data| {
        c.list.clear();
        for &v in data {
            c.list.push_back(v);
        }
    }),
    ("HashSet", |c, data| {
        c.hash_set.clear();
        for &v in data {
            c.hash_set.insert(v);
        }
    }),
    ("BTreeSet", |c, data| {
        c.tree_set.clear();
        for &v in data {
            c.tree_set.insert(v);
        }
    }),
    ("HashMap", |c, data| {
        c.hash_map.clear();
        for &v in data {
            c.hash_map.insert(v, v);
        }
    }),
    ("BTreeMap", |c, data| {
        c.tree_map.clear();
        for &v in data {
            c.tree_map.insert(v, v);
        }
    }),
];

const CONTAINS: [(&str, Phase); 6] = [
    ("Vec", |c, lookups| {
        black_box(lookups.iter().filter(|&p| c.vec.contains(p)).count());
    }),
    ("LinkedList", |c, lookups| {
        black_box(lookups.iter().filter(|&p| c.list.contains(p)).count());
    }),
    ("HashSet", |c, lookups| {
        black_box(lookups.iter().filter(|&p| c.hash_set.contains(p)).count());
    }),
    ("BTreeSet", |c, lookups| {
        black_box(lookups.iter().filter(|&p| c.tree_set.contains(p)).count());
    }),
    ("HashMap", |c, lookups| {
        black_box(lookups.iter().filter(|&p| c.hash_map.contains_key(p)).count());
    }),
    ("BTreeMap", |c, lookups| {
        black_box(lookups.iter().filter(|&p| c.tree_map.contains_key(p)).count());
    }),
];

const ITERATE: [(&str, Phase); 6] = [
    ("Vec", |c, _| {
        black_box(c.vec.iter().fold(0u64, |acc, v| acc.wrapping_add(*v)));
    }),
    ("LinkedList", |c, _| {
        black_box(c.list.iter().fold(0u64, |acc, v| acc.wrapping_add(*v)));
    }),
    ("HashSet", |c, _| {
        black_box(c.hash_set.iter().fold(0u64, |acc, v| acc.wrapping_add(*v)));
    }),
    ("BTreeSet", |c, _| {
        black_box(c.tree_set.iter().fold(0u64, |acc, v| acc.wrapping_add(*v)));
    }),
    ("HashMap", |c, _| {
        black_box(c.hash_map.values().fold(0u64, |acc, v| acc.wrapping_add(*v)));
    }),
    ("BTreeMap", |c, _| {
        black_box(c.tree_map.values().fold(0u64, |acc, v| acc.wrapping_add(*v)));
    }),
];

fn random_values(rng: &mut StdRng, count: usize, bound: u64) -> Vec<u64> {
    (0..count).map(|_| rng.random_range(0..bound)).collect()
}

/// Time every phase on every container. Results are sorted fastest first.
#[must_use]
pub fn measure(config: &BenchConfig, seed: u64) -> Vec<BenchResult> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bound = u64::try_from(config.size)
        .unwrap_or(u64::MAX)
        .saturating_mul(VALUE_SPREAD)
        .max(1);
    let data = random_values(&mut rng, config.size, bound);
    let lookups = random_values(&mut rng, config.lookups, bound);

    let mut containers = Containers::default();

    for round in 0..config.warmup {
        for (_, phase) in ADD {
            phase(&mut containers, &data);
        }
        for (_, phase) in CONTAINS {
            phase(&mut containers, &lookups);
        }
        for (_, phase) in ITERATE {
            phase(&mut containers, &data);
        }
        debug!(round, "Warm-up round done");
    }

    let mut results = Vec::with_capacity(ADD.len() + CONTAINS.len() + ITERATE.len());
    let phases: [(&str, &[(&str, Phase)], &[u64]); 3] = [
        ("add", &ADD, &data),
        ("contains", &CONTAINS, &lookups),
        ("iterate", &ITERATE, &data),
    ];
    for (operation, table, input) in phases {
        for (container, phase) in table {
            let start = Instant::now();
            phase(&mut containers, input);
            results.push(BenchResult {
                name: format!("{container} {operation}"),
                elapsed: start.elapsed(),
            });
        }
    }

    results.sort_by_key(|r| r.elapsed);
    results
}

/// Run the benchmark and print a ranked table.
#[allow(clippy::print_stdout)]
pub fn run(config: &BenchConfig, seed: u64) {
    info!(
        size = config.size,
        lookups = config.lookups,
        warmup = config.warmup,
        seed,
        "Running container benchmark"
    );

    let results = measure(config, seed);

    println!(
        "Container benchmark: {} elements, {} lookups, {} warm-up rounds",
        config.size, config.lookups, config.warmup
    );
    for (rank, result) in results.iter().enumerate() {
        println!("{:>3}. {:<22} {:>12.3} ms", rank + 1, result.name, result.millis());
    }
    println!();
    println!("Hash containers answer membership in constant time; B-trees in logarithmic time.");
    println!("Vec and LinkedList scan linearly, so contains grows with size times lookups.");
    println!("Vec iterates fastest thanks to contiguous memory; LinkedList chases pointers.");
}
