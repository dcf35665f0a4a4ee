//! Headless animation driver that splits each move into small rotations.

use std::collections::VecDeque;
use std::f64::consts::PI;

use cubemath::Float;

use crate::{Cube, CubeError, DEFAULT_ANGLE, Dialect, LayerList, Move};

/// Default rotation per frame, in radians.
pub const DEFAULT_ANGLE_STEP: Float = PI / 20.0;

/// If the remaining rotation is within this much of one angle step, the move
/// is finished in the current frame.
const FINISH_EPSILON: Float = 1e-9;

/// Settings for an [`Animator`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationSettings {
    /// Rotation per frame, in radians. Half turns rotate twice as fast.
    pub angle_step: Float,
    /// Whether the animation starts paused.
    pub paused: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            angle_step: DEFAULT_ANGLE_STEP,
            paused: false,
        }
    }
}

/// Result of advancing an [`Animator`] by one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The animator is paused. Nothing changed.
    Paused,
    /// There are no moves to animate. Nothing changed.
    Idle,
    /// The current move advanced.
    Advanced {
        /// Fraction of the current move completed, from 0.0 to 1.0.
        progress: Float,
    },
    /// The current move was completed this frame.
    Finished(String),
}

#[derive(Debug, Clone)]
struct QueuedMove {
    /// Move as it was entered, before translation.
    text: String,
    mv: Move,
    layers: LayerList,
}

/// Cube with a queue of moves that are applied a little at a time.
#[derive(Debug, Clone)]
pub struct Animator {
    cube: Cube,
    dialect: Dialect,
    angle_step: Float,
    paused: bool,

    /// Queue of moves. The front move is the one in progress, if `progress`
    /// is nonzero.
    queue: VecDeque<QueuedMove>,
    /// Rotation already applied for the front move, in radians of a quarter
    /// turn.
    progress: Float,
}

impl Animator {
    /// Constructs an animator for a cube.
    pub fn new(cube: Cube, dialect: Dialect, settings: AnimationSettings) -> Self {
        let AnimationSettings { angle_step, paused } = settings;
        let angle_step = if angle_step > 0.0 && angle_step.is_finite() {
            angle_step
        } else {
            log::warn!("invalid angle step {angle_step}; using {DEFAULT_ANGLE_STEP}");
            DEFAULT_ANGLE_STEP
        };

        Self {
            cube,
            dialect,
            angle_step,
            paused,

            queue: VecDeque::new(),
            progress: 0.0,
        }
    }

    /// Returns the cube, including any partially applied move.
    pub fn cube(&self) -> &Cube {
        &self.cube
    }
    /// Returns the dialect used to interpret moves.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Adds a move to the end of the queue.
    ///
    /// Returns an error, without changing the queue, if the move is invalid
    /// for the dialect or the cube size.
    pub fn push(&mut self, text: &str) -> Result<(), CubeError> {
        let mv = self.dialect.parse_move(text)?;
        let layers = mv.layers(self.cube.size())?;
        log::debug!("queued {text:?} as {mv}");
        self.queue.push_back(QueuedMove {
            text: text.to_owned(),
            mv,
            layers,
        });
        Ok(())
    }

    /// Advances the animation by one frame.
    pub fn step(&mut self) -> Step {
        if self.paused {
            return Step::Paused;
        }
        let Some(current) = self.queue.front() else {
            return Step::Idle;
        };

        let remaining = DEFAULT_ANGLE - self.progress;
        let is_last_frame = remaining <= self.angle_step + FINISH_EPSILON;
        let delta = if is_last_frame {
            remaining
        } else {
            self.angle_step
        };
        log::trace!("rotating {} by {delta}", current.mv);
        self.cube.apply_move_layers(current.mv, &current.layers, delta);
        self.progress += delta;

        if is_last_frame {
            self.finish_current().map_or(Step::Idle, Step::Finished)
        } else {
            Step::Advanced {
                progress: self.progress / DEFAULT_ANGLE,
            }
        }
    }

    /// Pops the front move and resets progress. Returns the text of the move.
    fn finish_current(&mut self) -> Option<String> {
        self.progress = 0.0;
        let finished = self.queue.pop_front()?;
        log::debug!("finished {:?}", finished.text);
        Some(finished.text)
    }

    /// Immediately completes the current move and every queued move, even if
    /// paused. Returns the moves that were completed.
    pub fn catch_up(&mut self) -> Vec<String> {
        let mut finished = vec![];
        while let Some(current) = self.queue.front() {
            let remaining = DEFAULT_ANGLE - self.progress;
            self.cube.apply_move_layers(current.mv, &current.layers, remaining);
            finished.extend(self.finish_current());
        }
        finished
    }

    /// Pauses or unpauses the animation.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("animation {}", if self.paused { "paused" } else { "resumed" });
    }
    /// Returns whether the animation is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }
    /// Returns whether there are no moves in progress or queued.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
    /// Returns the number of moves in progress or queued.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
    /// Returns the move in progress and the fraction of it that has been
    /// completed.
    pub fn current(&self) -> Option<(&str, Float)> {
        let current = self.queue.front()?;
        Some((&current.text, self.progress / DEFAULT_ANGLE))
    }

    /// Returns the cube, discarding any queued moves.
    pub fn into_cube(self) -> Cube {
        self.cube
    }
}
