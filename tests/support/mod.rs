#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::vec::Vec;

use fireflame_composer::{Entropy, Instant, Rgb, SignalPin, StripDriver};

/// Strip driver that records every frame it is asked to write
#[derive(Clone, Default)]
pub struct RecordingStrip {
    frames: Arc<Mutex<Vec<Vec<Rgb>>>>,
    releases: Arc<Mutex<usize>>,
    failing: bool,
}

impl RecordingStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records frames but reports every write as failed
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> Vec<Vec<Rgb>> {
        self.frames.lock().unwrap().clone()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn last_frame(&self) -> Option<Vec<Rgb>> {
        self.frames.lock().unwrap().last().cloned()
    }

    pub fn releases(&self) -> usize {
        *self.releases.lock().unwrap()
    }
}

impl StripDriver for RecordingStrip {
    type Error = &'static str;

    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
        self.frames.lock().unwrap().push(colors.to_vec());
        if self.failing {
            return Err("bus error");
        }
        Ok(())
    }

    fn release(&mut self) {
        *self.releases.lock().unwrap() += 1;
    }
}

/// Random stream that always yields the same values
pub struct FixedEntropy {
    pub red: u8,
    pub roll: bool,
}

impl FixedEntropy {
    pub fn red(red: u8) -> Self {
        Self { red, roll: true }
    }

    pub fn rolling(roll: bool) -> Self {
        Self { red: 0, roll }
    }
}

impl Entropy for FixedEntropy {
    fn next_u8_in(&mut self, low: u8, high: u8) -> u8 {
        self.red.clamp(low, high)
    }

    fn next_u64_in(&mut self, low: u64, _high: u64) -> u64 {
        low
    }

    fn chance(&mut self, _probability: f32) -> bool {
        self.roll
    }
}

/// Pin that plays back a list of reads, repeating the last one forever
pub struct ScriptedPin {
    reads: Vec<Result<bool, ()>>,
    position: usize,
}

impl ScriptedPin {
    pub fn levels(levels: &[bool]) -> Self {
        Self {
            reads: levels.iter().map(|level| Ok(*level)).collect(),
            position: 0,
        }
    }

    pub fn reads(reads: &[Result<bool, ()>]) -> Self {
        Self {
            reads: reads.to_vec(),
            position: 0,
        }
    }
}

impl SignalPin for ScriptedPin {
    type Error = ();

    fn read(&mut self) -> Result<bool, Self::Error> {
        let index = self.position.min(self.reads.len() - 1);
        self.position += 1;
        self.reads[index]
    }
}

/// Pin that flips its level on every read
pub struct TogglingPin {
    pub level: bool,
}

impl SignalPin for TogglingPin {
    type Error = ();

    fn read(&mut self) -> Result<bool, Self::Error> {
        self.level = !self.level;
        Ok(self.level)
    }
}

/// Pin held at one level
pub struct ConstantPin(pub bool);

impl SignalPin for ConstantPin {
    type Error = ();

    fn read(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0)
    }
}

/// Clock that advances by `step_ms` on every call
pub fn ticking_clock(step_ms: u64) -> impl FnMut() -> Instant {
    let mut now = 0;
    move || {
        now += step_ms;
        Instant::from_millis(now)
    }
}

pub fn is_dark(frame: &[Rgb]) -> bool {
    frame.iter().all(|pixel| *pixel == Rgb::new(0, 0, 0))
}
