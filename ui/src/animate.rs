//! Background animation through positions along one axis.

use log::{debug, error, trace};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use ndview_core::num::Element;

use crate::config::CtrlConfig;
use crate::render::Raster;
use crate::viewer::SharedViewer;

/// Animation state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    /// There is no running animation.
    ///
    /// - `start()` leads to the `Running` state and spawns a task.
    /// - `cancel()` does nothing.
    Idle,

    /// The task is stepping through frames.
    ///
    /// - `start()` is rejected.
    /// - `cancel()` leads to the `CancelRequested` state and wakes the task.
    /// - The task may finish on its own, leading to the `Idle` state.
    Running,

    /// The task has been asked to stop. It will do so at the next frame
    /// boundary, leading to the `Idle` state.
    ///
    /// - `start()` is rejected.
    /// - `cancel()` does nothing.
    CancelRequested,
}

type Shared = Arc<(Mutex<State>, Condvar)>;

/// Handle given to an animation task, used to check for cancellation.
#[derive(Debug, Clone)]
pub struct CancelToken(Shared);
impl CancelToken {
    /// Returns `true` if the task has been asked to stop.
    pub fn wants_cancel(&self) -> bool {
        *self.0 .0.lock() != State::Running
    }
    /// Waits until one frame interval has passed. Returns `false` early if the
    /// task is asked to stop in the meantime.
    pub fn wait_frame(&self, interval: Duration) -> bool {
        let (lock, condvar) = &*self.0;
        let deadline = Instant::now() + interval;
        let mut state = lock.lock();
        while *state == State::Running {
            if condvar.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        *state == State::Running
    }
}

/// Steps a viewer through positions along an axis on another thread, one
/// animation at a time.
#[derive(Debug)]
pub struct Animator {
    shared: Shared,
    interval: Duration,
    handle: Option<JoinHandle<()>>,
}
// The animation gives up waiting for the viewer's lock once cancelled, so
// dropping an animator while holding that lock does not deadlock.
impl Drop for Animator {
    fn drop(&mut self) {
        trace!("Dropping animator");
        self.cancel();
        self.wait();
    }
}
impl Default for Animator {
    fn default() -> Self {
        Self::new(&CtrlConfig::default())
    }
}
impl Animator {
    /// Creates an idle animator using the configured frame interval.
    pub fn new(config: &CtrlConfig) -> Self {
        Self::with_interval(config.animation_frame_interval)
    }
    /// Creates an idle animator with a particular frame interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            shared: Arc::new((Mutex::new(State::Idle), Condvar::new())),
            interval,
            handle: None,
        }
    }

    /// Returns the time between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }
    /// Returns `true` if an animation is running or stopping.
    pub fn is_running(&self) -> bool {
        *self.shared.0.lock() != State::Idle
    }

    /// Starts stepping the position along `axis`, rendering once per step and
    /// passing each raster to `on_frame` along with the frame number. Stops
    /// after `frames` frames, or when cancelled if `frames` is `None`.
    ///
    /// Returns `false` without doing anything if an animation is already
    /// running or `axis` is one of the displayed axes, since stepping it
    /// would not change the picture.
    ///
    /// Must not be called while holding the viewer's lock.
    pub fn start<T: Element>(
        &mut self,
        viewer: SharedViewer<T>,
        axis: usize,
        frames: Option<usize>,
        mut on_frame: impl 'static + Send + FnMut(usize, &Raster),
    ) -> bool {
        if viewer.lock().plane().is_display_axis(axis) {
            debug!("Not animating along displayed axis {}", axis);
            return false;
        }
        {
            let mut state = self.shared.0.lock();
            if *state != State::Idle {
                trace!("Animation already running; ignoring start request");
                return false;
            }
            *state = State::Running;
        }
        // The previous task has already left the `Running` state.
        self.join();

        let shared = Arc::clone(&self.shared);
        let token = CancelToken(Arc::clone(&shared));
        let interval = self.interval;
        trace!("Starting animation along axis {}", axis);
        self.handle = Some(std::thread::spawn(move || {
            let mut frame = 0;
            'frames: while frames.map_or(true, |n| frame < n) && !token.wants_cancel() {
                {
                    // Wait for the viewer without ignoring cancellation.
                    let mut viewer = loop {
                        if let Some(guard) = viewer.try_lock_for(interval) {
                            break guard;
                        }
                        if token.wants_cancel() {
                            break 'frames;
                        }
                    };
                    if let Err(e) = viewer.step_position(axis) {
                        error!("Stopping animation: {:#}", e);
                        break;
                    }
                    match viewer.render() {
                        Ok(raster) => on_frame(frame, raster),
                        Err(e) => {
                            error!("Stopping animation: {:#}", e);
                            break;
                        }
                    }
                }
                frame += 1;
                if frames.map_or(false, |n| frame >= n) || !token.wait_frame(interval) {
                    break;
                }
            }
            trace!("Animation finished after {} frames", frame);

            let (lock, condvar) = &*shared;
            *lock.lock() = State::Idle;
            condvar.notify_all();
        }));
        true
    }

    /// Asks the running animation to stop at the next frame boundary.
    pub fn cancel(&self) {
        let (lock, condvar) = &*self.shared;
        let mut state = lock.lock();
        if *state == State::Running {
            trace!("Requesting animation cancel");
            *state = State::CancelRequested;
            condvar.notify_all();
        }
    }

    /// Blocks until no animation is running.
    ///
    /// If the viewer's lock is held by the caller, the animation cannot make
    /// progress; call `cancel()` first in that case so that it stops at its
    /// next attempt to lock the viewer.
    pub fn wait(&mut self) {
        {
            let (lock, condvar) = &*self.shared;
            let mut state = lock.lock();
            while *state != State::Idle {
                condvar.wait(&mut state);
            }
        }
        self.join();
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Animation thread panicked");
            }
        }
    }
}
