//! Presentation side of the loop.
//!
//! The core hands every iteration's [`FrameOutput`] to a [`FrameSink`]; the
//! sink is the only place where display frames leave the process.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use steadytick_core::sim::FrameOutput;

/// Consumer of display frames.
pub trait FrameSink {
    fn present(&mut self, frame: &FrameOutput) -> std::io::Result<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn present(&mut self, frame: &FrameOutput) -> std::io::Result<()> {
        (**self).present(frame)
    }
}

/// Writes one line per frame:
/// `t=<ts>ms dt=<dt>ms pos=<p> vel=<v> valid=<b>`.
pub struct ConsoleSink<W: Write> {
    writer: W,
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for ConsoleSink<W> {
    fn present(&mut self, frame: &FrameOutput) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "t={}ms dt={}ms pos={} vel={} valid={}",
            frame.timestamp,
            frame.dt_ms,
            frame.display.position,
            frame.display.velocity,
            frame.display.valid
        )
    }
}

/// Emits every frame as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl FrameSink for TracingSink {
    fn present(&mut self, frame: &FrameOutput) -> std::io::Result<()> {
        info!(
            timestamp = frame.timestamp,
            dt_ms = frame.dt_ms,
            position = frame.display.position,
            velocity = frame.display.velocity,
            valid = frame.display.valid,
            steps = frame.report.steps,
            overloaded = frame.report.overloaded,
            "Frame"
        );
        Ok(())
    }
}

/// Keeps the most recent frame for a reader on another thread.
#[derive(Debug, Default, Clone)]
pub struct LatestFrameSink {
    latest: Arc<Mutex<Option<FrameOutput>>>,
}

impl LatestFrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last presented frame, if any.
    pub fn latest(&self) -> Option<FrameOutput> {
        *self.latest.lock()
    }
}

impl FrameSink for LatestFrameSink {
    fn present(&mut self, frame: &FrameOutput) -> std::io::Result<()> {
        *self.latest.lock() = Some(*frame);
        Ok(())
    }
}

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &FrameOutput) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steadytick_core::frame::FrameReport;
    use steadytick_core::state::SystemState;
    use tracing_test::traced_test;

    fn frame() -> FrameOutput {
        FrameOutput {
            timestamp: 32,
            dt_ms: 16,
            display: SystemState::new(0.25, 1.5),
            report: FrameReport::default(),
        }
    }

    #[test]
    fn console_line_format() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.present(&frame()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "t=32ms dt=16ms pos=0.25 vel=1.5 valid=true\n");
    }

    #[test]
    fn latest_frame_is_shared() {
        let mut sink = LatestFrameSink::new();
        let reader = sink.clone();
        assert!(reader.latest().is_none());
        sink.present(&frame()).unwrap();
        assert_eq!(reader.latest(), Some(frame()));
    }

    #[traced_test]
    #[test]
    fn tracing_sink_emits_event() {
        TracingSink.present(&frame()).unwrap();
        assert!(logs_contain("dt_ms=16"));
    }
}
