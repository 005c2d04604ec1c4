//! Side-effect boundary between the VM and the outside world.

use std::fmt;
use std::io::Write;
use std::time::Duration;

/// How the VM interprets the 4-byte words consumed by typed instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationMode {
    #[default]
    Int,
    Float,
}

/// A 4-byte word read under a given [`OperationMode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i32),
    Float(f32),
}

impl Scalar {
    pub fn from_word(mode: OperationMode, word: [u8; 4]) -> Self {
        match mode {
            OperationMode::Int => Scalar::Int(i32::from_le_bytes(word)),
            OperationMode::Float => Scalar::Float(f32::from_le_bytes(word)),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            // Whole floats keep their decimal point so they never read as ints.
            Scalar::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Scalar::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Receives the effects of action and display instructions.
///
/// The VM has already popped and typed the arguments; implementations only
/// carry the effect out. A real desktop integration would inject `move_to`
/// into the OS input queue.
pub trait Host {
    fn move_to(&mut self, x: i32, y: i32);
    fn delay(&mut self, duration: Duration);
    fn display(&mut self, offset: i32, value: Scalar);
}

/// Default host: prints displays to stdout, blocks the thread for delays and
/// logs cursor moves.
#[derive(Debug, Default)]
pub struct StdHost;

impl Host for StdHost {
    fn move_to(&mut self, x: i32, y: i32) {
        tracing::info!(x, y, "move");
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn display(&mut self, offset: i32, value: Scalar) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "Offset: {offset} | Value: {value}") {
            tracing::error!("failed to write display output: {e}");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Move { x: i32, y: i32 },
    Delay(Duration),
    Display { offset: i32, value: Scalar },
}

/// Host that records every effect instead of performing it. Delays return
/// immediately.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values passed to `display`, in order.
    pub fn displayed(&self) -> Vec<Scalar> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Display { value, .. } => Some(*value),
                _ => None,
            })
            .collect()
    }
}

impl Host for RecordingHost {
    fn move_to(&mut self, x: i32, y: i32) {
        self.events.push(HostEvent::Move { x, y });
    }

    fn delay(&mut self, duration: Duration) {
        self.events.push(HostEvent::Delay(duration));
    }

    fn display(&mut self, offset: i32, value: Scalar) {
        self.events.push(HostEvent::Display { offset, value });
    }
}
