//! telemetry/timers.rs
//! Stage timers for the serializer.
//!
//! Summary: one slot per stage (record source, encoder, push sink), each with
//! the accumulated time and the number of measurements. The run clock starts
//! when the first chunk is requested, not when the serializer is built.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Source,
    Encode,
    Write,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Source, Stage::Encode, Stage::Write];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Source => "source",
            Stage::Encode => "encode",
            Stage::Write  => "write",
        };
        f.write_str(name)
    }
}

/// Accumulated time of one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTime {
    pub total: Duration,
    pub samples: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTimes {
    source: StageTime,
    encode: StageTime,
    write: StageTime,
}

impl StageTimes {
    fn slot(&self, stage: Stage) -> &StageTime {
        match stage {
            Stage::Source => &self.source,
            Stage::Encode => &self.encode,
            Stage::Write => &self.write,
        }
    }

    fn slot_mut(&mut self, stage: Stage) -> &mut StageTime {
        match stage {
            Stage::Source => &mut self.source,
            Stage::Encode => &mut self.encode,
            Stage::Write => &mut self.write,
        }
    }

    pub fn add(&mut self, stage: Stage, dur: Duration) {
        let slot = self.slot_mut(stage);
        slot.total += dur;
        slot.samples += 1;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.slot(stage).total
    }

    /// How many times the stage was measured.
    pub fn samples(&self, stage: Stage) -> u64 {
        self.slot(stage).samples
    }

    pub fn get_ms(&self, stage: Stage) -> f64 {
        self.get(stage).as_secs_f64() * 1_000.0
    }

    pub fn total(&self) -> Duration {
        Stage::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// Whether a stage was ever measured, even if it took no measurable time.
    pub fn contains(&self, stage: Stage) -> bool {
        self.samples(stage) > 0
    }

    /// Measured stages only.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, StageTime)> + '_ {
        Stage::ALL
            .into_iter()
            .map(|s| (s, *self.slot(s)))
            .filter(|(_, t)| t.samples > 0)
    }
}

/// Wall clock of one run plus per-stage times.
#[derive(Clone, Debug, Default)]
pub struct TelemetryTimer {
    started: Option<Instant>,
    ended: Option<Instant>,
    stage_times: StageTimes,
}

impl TelemetryTimer {
    /// An idle timer. Elapsed time is zero until `start`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock. Later calls keep the first start.
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Freeze the elapsed time. Later calls keep the first end time.
    /// Finishing a timer that never started leaves it at zero.
    pub fn finish(&mut self) {
        if self.ended.is_none() {
            let now = Instant::now();
            self.started.get_or_insert(now);
            self.ended = Some(now);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.ended.is_some()
    }

    pub fn add_stage_time(&mut self, stage: Stage, dur: Duration) {
        self.stage_times.add(stage, dur);
    }

    pub fn stage_times(&self) -> &StageTimes {
        &self.stage_times
    }

    pub fn elapsed(&self) -> Duration {
        match (self.started, self.ended) {
            (None, _) => Duration::ZERO,
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
        }
    }
}
