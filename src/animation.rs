// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The animation: a run of frames over the same viewport, each with
//! a slightly larger exponent than the last.
//!
//! Frames are independent of one another, so they are all handed to
//! the worker pool at once; each frame then splits its own rows
//! across the same pool.  As frames finish they are passed over a
//! bounded channel to a small set of writer threads.  The channel
//! holds one frame per pool thread; past that, a finished frame waits
//! for the writers to catch up.  The run
//! ends only when every frame has been written, or has failed to be.

use crossbeam::channel;
use crossbeam::thread::ScopedJoinHandle;
use emit::{frame_name, Emitter};
use errors::{ConfigurationError, EmissionError, RenderError};
use escape::DEFAULT_ITERATION_CAP;
use frame::generate;
use grid::ColorGrid;
use palette;
use planes::Viewport;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::time::Instant;

/// Which frame this is, and the exponent it is rendered with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameDescriptor {
    /// Position in the animation, from 0.
    pub index: usize,
    /// The exponent in `z ← z^exponent + c` for this frame.
    pub exponent: f64,
}

/// A frame that was computed but could not be emitted.
#[derive(Debug)]
pub struct FrameFailure {
    /// The frame's index.
    pub index: usize,
    /// Why it failed.
    pub error: EmissionError,
}

/// What happened over a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Frames successfully emitted.
    pub rendered: usize,
    /// Frames that failed to emit, in no particular order.
    pub failures: Vec<FrameFailure>,
}

impl RunSummary {
    /// True if every frame made it out.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: RunSummary) {
        self.rendered += other.rendered;
        self.failures.extend(other.failures);
    }
}

/// Room for one finished frame per pool thread, so a frame only waits
/// on the writers once every thread has a frame queued behind them.
fn channel_capacity(pool: &ThreadPool, writers: usize) -> usize {
    pool.current_num_threads().max(writers)
}

/// The parameters of an animation.  Validated once, up front, and
/// read-only afterwards.
#[derive(Copy, Clone, Debug)]
pub struct Animation {
    viewport: Viewport,
    frame_count: usize,
    base_exponent: f64,
    exponent_increment: f64,
    iteration_cap: u32,
}

impl Animation {
    /// Every frame's exponent must be finite and positive: zero to a
    /// non-positive power is undefined, and every orbit starts there.
    /// The exponent is linear in the frame index, so checking the
    /// first and last frames covers them all.
    pub fn new(
        viewport: Viewport,
        frame_count: usize,
        base_exponent: f64,
        exponent_increment: f64,
        iteration_cap: u32,
    ) -> Result<Self, ConfigurationError> {
        if frame_count == 0 {
            return Err(ConfigurationError::Zero("Frame count"));
        }
        if iteration_cap == 0 {
            return Err(ConfigurationError::Zero("Iteration cap"));
        }
        let animation = Animation {
            viewport,
            frame_count,
            base_exponent,
            exponent_increment,
            iteration_cap,
        };
        for &index in &[0, frame_count - 1] {
            let exponent = animation.exponent_for(index);
            if !exponent.is_finite() || exponent <= 0.0 {
                return Err(ConfigurationError::Exponent(index, exponent));
            }
        }
        Ok(animation)
    }

    /// An animation with the default iteration cap.
    pub fn with_defaults(
        viewport: Viewport,
        frame_count: usize,
        base_exponent: f64,
        exponent_increment: f64,
    ) -> Result<Self, ConfigurationError> {
        Animation::new(
            viewport,
            frame_count,
            base_exponent,
            exponent_increment,
            DEFAULT_ITERATION_CAP,
        )
    }

    /// The shared viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Number of frames in the animation.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Iterations per point before giving up on escape.
    pub fn iteration_cap(&self) -> u32 {
        self.iteration_cap
    }

    /// The exponent for frame `index`.  Computed directly from the
    /// index rather than accumulated, so late frames don't drift.
    pub fn exponent_for(&self, index: usize) -> f64 {
        self.base_exponent + (index as f64) * self.exponent_increment
    }

    /// Every frame of the animation, in order.
    pub fn descriptors(&self) -> Vec<FrameDescriptor> {
        (0..self.frame_count)
            .map(|index| FrameDescriptor {
                index,
                exponent: self.exponent_for(index),
            })
            .collect()
    }

    /// Compute and color a single frame on the current pool.
    pub fn render_frame(&self, frame: &FrameDescriptor) -> ColorGrid {
        let started = Instant::now();
        let depths = generate(&self.viewport, frame.exponent, self.iteration_cap);
        let colors = palette::map(&depths);
        debug!(
            "Frame {} (exponent {:.4}) computed in {:?}, max depth {}",
            frame.index,
            frame.exponent,
            started.elapsed(),
            depths.max_depth()
        );
        colors
    }

    /// Render every frame on `pool` and hand each to `emitter` from one
    /// of `writers` writer threads.  A frame that fails to emit is
    /// logged and recorded in the summary; the rest carry on.  Only the
    /// loss of every writer, or a panic, fails the run as a whole.
    pub fn run<E: Emitter>(
        &self,
        pool: &ThreadPool,
        emitter: &E,
        writers: usize,
    ) -> Result<RunSummary, RenderError> {
        let writers = writers.max(1);
        let capacity = channel_capacity(pool, writers);
        let (sender, receiver) = channel::bounded::<(FrameDescriptor, ColorGrid)>(capacity);

        let outcome = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<RunSummary>> = (0..writers)
                .map(|_| {
                    let receiver = receiver.clone();
                    spawner.spawn(move |_| {
                        let mut summary = RunSummary::default();
                        for (frame, colors) in receiver.iter() {
                            let name = frame_name(frame.index);
                            match emitter.emit(&name, &colors) {
                                Ok(path) => {
                                    info!("Saved image: {}", path.display());
                                    summary.rendered += 1;
                                }
                                Err(error) => {
                                    error!("Frame {} was not saved: {}", name, error);
                                    summary.failures.push(FrameFailure {
                                        index: frame.index,
                                        error,
                                    });
                                }
                            }
                        }
                        summary
                    })
                })
                .collect();
            drop(receiver);

            let computed = pool.install(|| {
                self.descriptors()
                    .into_par_iter()
                    .try_for_each_with(sender, |sender, frame| {
                        let colors = self.render_frame(&frame);
                        sender
                            .send((frame, colors))
                            .map_err(|_| RenderError::EmitterDisconnected(frame.index))
                    })
            });

            let mut summary = RunSummary::default();
            for handle in handles {
                match handle.join() {
                    Ok(part) => summary.merge(part),
                    Err(_) => return Err(RenderError::WorkerPanicked),
                }
            }
            computed.map(|_| summary)
        });

        match outcome {
            Ok(result) => result,
            Err(_) => Err(RenderError::WorkerPanicked),
        }
    }
}
