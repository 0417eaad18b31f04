// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Criterion configuration shared by the archwize benches.
//!
//! Repair and render passes run in microseconds, so the defaults favour many short samples.
//! `ARCHWIZE_BENCH_FLAMEGRAPH_HZ=0` turns the pprof flamegraph off.

use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

struct Knob<T> {
    var: &'static str,
    default: T,
    range: RangeInclusive<T>,
}

impl<T: FromStr + PartialOrd + Copy> Knob<T> {
    fn read(&self) -> T {
        let value = env::var(self.var)
            .ok()
            .and_then(|raw| raw.trim().parse::<T>().ok())
            .unwrap_or(self.default);
        if self.range.contains(&value) {
            value
        } else {
            self.default
        }
    }
}

const FLAMEGRAPH_HZ: Knob<i32> =
    Knob { var: "ARCHWIZE_BENCH_FLAMEGRAPH_HZ", default: 250, range: 0..=1000 };
const SAMPLES: Knob<usize> = Knob { var: "ARCHWIZE_BENCH_SAMPLES", default: 100, range: 10..=500 };
const WARMUP_MS: Knob<u64> =
    Knob { var: "ARCHWIZE_BENCH_WARMUP_MS", default: 500, range: 100..=30_000 };
const MEASURE_MS: Knob<u64> =
    Knob { var: "ARCHWIZE_BENCH_MEASURE_MS", default: 2_000, range: 100..=120_000 };

pub fn criterion() -> Criterion {
    let config = Criterion::default()
        .sample_size(SAMPLES.read())
        .warm_up_time(Duration::from_millis(WARMUP_MS.read()))
        .measurement_time(Duration::from_millis(MEASURE_MS.read()));

    match FLAMEGRAPH_HZ.read() {
        0 => config,
        hz => config.with_profiler(PProfProfiler::new(hz, Output::Flamegraph(None))),
    }
}
