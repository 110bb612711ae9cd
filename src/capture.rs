//! Live capture loop.
//!
//! A [`FrameSource`] produces frames on demand (a camera, a directory of
//! stills, a test vector). [`poll_until_decoded`] reads frames one at a time
//! until one decodes, the source runs dry, or the caller cancels.

use image::GrayImage;

use crate::decoder::DecodeConfig;
use crate::error::BarError;
use crate::pipeline::decode_frame;

/// Producer of grayscale frames.
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<GrayImage>, BarError>;
}

/// Cooperative cancellation, checked once per loop iteration.
pub trait CancelSignal {
    /// True once the loop should stop.
    fn is_cancelled(&mut self) -> bool;
}

impl<F: FnMut() -> bool> CancelSignal for F {
    fn is_cancelled(&mut self) -> bool {
        self()
    }
}

/// Signal that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_cancelled(&mut self) -> bool {
        false
    }
}

/// Frames held in memory, handed out in order
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    frames: std::collections::VecDeque<GrayImage>,
}

impl VecSource {
    /// Source yielding `frames` front to back
    pub fn new(frames: Vec<GrayImage>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl FrameSource for VecSource {
    fn next_frame(&mut self) -> Result<Option<GrayImage>, BarError> {
        Ok(self.frames.pop_front())
    }
}

/// Result of a successful capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    /// Decoded text
    pub text: String,
    /// Frames read, including the one that decoded
    pub frames_polled: usize,
}

/// Poll `source` until a frame decodes.
///
/// Per-frame failures (see [`BarError::is_recoverable`]) move on to the next
/// frame. Any other decode error ends the loop, as does a failing source.
pub fn poll_until_decoded<S, C>(
    source: &mut S,
    cancel: &mut C,
    config: &DecodeConfig,
) -> Result<CaptureOutcome, BarError>
where
    S: FrameSource + ?Sized,
    C: CancelSignal + ?Sized,
{
    let mut frames_polled = 0usize;
    loop {
        if cancel.is_cancelled() {
            return Err(BarError::Cancelled);
        }

        let Some(frame) = source.next_frame()? else {
            return Err(BarError::SourceExhausted {
                frames: frames_polled,
            });
        };
        frames_polled += 1;

        match decode_frame(&frame, config) {
            Ok(text) => {
                if crate::debug::debug_enabled() {
                    eprintln!("CAPTURE: decoded {:?} on frame {}", text, frames_polled);
                }
                return Ok(CaptureOutcome {
                    text,
                    frames_polled,
                });
            }
            Err(err) if err.is_recoverable() => {
                if crate::debug::debug_enabled() {
                    eprintln!("CAPTURE: frame {} skipped: {}", frames_polled, err);
                }
            }
            Err(err) => return Err(err),
        }
    }
}
