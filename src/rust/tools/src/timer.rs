use std::time::{Duration, Instant};

/// Collects labelled wall-clock durations in the order they were measured.
#[derive(Default)]
pub struct Stopwatch {
    laps: Vec<(&'static str, Duration)>,
}

impl Stopwatch {
    pub fn new() -> Stopwatch {
        Stopwatch { laps: Vec::new() }
    }

    /// Time `f`, record it under `label` and hand back its result.
    pub fn measure<T, F: FnOnce() -> T>(&mut self, label: &'static str, f: F) -> T {
        let before = Instant::now();
        let result = f();
        self.laps.push((label, before.elapsed()));
        result
    }

    pub fn laps(&self) -> &[(&'static str, Duration)] {
        &self.laps
    }

    pub fn lines(&self) -> Vec<String> {
        self.laps
            .iter()
            .map(|(label, elapsed)| format!("{} : {} ms", label, elapsed.as_millis()))
            .collect()
    }

    pub fn report(&self) {
        for line in self.lines() {
            println!("{}", line);
        }
    }
}
