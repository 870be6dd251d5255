//! Step sequencer - turns a [`Script`] plus elapsed time into one
//! joystick report per host poll.
//!
//! ## State machine
//!
//! ```text
//! Init ──► Settle ──► Running ──(wrap: LoopBack)──► Running
//!            ▲           │
//! ResetPosition          └──(wrap: Finish)──► Finished
//! ```
//!
//! `Init` and `Settle` each burn one neutral cycle before playback starts.
//! `ResetPosition` is entered only through [`Sequencer::reset`].
//!
//! ## Timing
//!
//! Tick-based actions count evaluated cycles and need no clock motion.
//! Time-based actions open a window `[start, deadline]` on their first
//! cycle and advance on the first cycle where `now > deadline`. When a
//! time-based action advances, the next deadline is the old deadline plus
//! the next action's budget, never `now` plus the budget: scheduling error
//! is carried forward instead of accumulating step by step.

use crate::clock::Clock;
use crate::config;
use crate::echo::EchoBuffer;
use crate::hid::JoystickReport;
use crate::script::{Hold, Script};

#[cfg(test)]
mod tests;

/// Sequencer phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Just powered up; one warm-up cycle.
    Init,
    /// External reset requested; rewinds to the first action.
    ResetPosition,
    /// Second warm-up cycle before playback.
    Settle,
    /// Playing the script.
    Running,
    /// Script ended under [`WrapPolicy::Finish`]; idles forever.
    Finished,
}

/// What happens after the last action of the script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WrapPolicy {
    /// Restart at the script's loop start and keep running.
    LoopBack,
    /// Stop in [`Phase::Finished`].
    Finish,
}

/// Open time window of a time-based action.
///
/// `start` is where the chain of back-to-back time-based actions was
/// anchored, not where the current action began: a re-arm only moves
/// `deadline`. The current action advances once `now > deadline`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub start: u64,
    pub deadline: u64,
}

/// Snapshot for status logging and the indicator LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    pub phase: Phase,
    pub cursor: usize,
    pub laps: u32,
    pub indicator: bool,
}

pub struct Sequencer<'a> {
    script: Script<'a>,
    wrap: WrapPolicy,
    phase: Phase,
    cursor: usize,
    ticks_in_action: u32,
    window: Option<Window>,
    echo: EchoBuffer,
    indicator: bool,
    laps: u32,
}

impl<'a> Sequencer<'a> {
    /// Sequencer with the default echo count that loops forever.
    pub fn new(script: Script<'a>) -> Self {
        Self::with_options(script, config::ECHOES, WrapPolicy::LoopBack)
    }

    pub fn with_options(script: Script<'a>, echoes: u8, wrap: WrapPolicy) -> Self {
        Self {
            script,
            wrap,
            phase: Phase::Init,
            cursor: 0,
            ticks_in_action: 0,
            window: None,
            echo: EchoBuffer::new(echoes),
            indicator: false,
            laps: 0,
        }
    }

    /// Compute the report for this poll.
    ///
    /// Never blocks. Pending echoes are served first and freeze all other
    /// state.
    pub fn tick<C: Clock + ?Sized>(&mut self, clock: &C) -> JoystickReport {
        if let Some(report) = self.echo.replay() {
            return report;
        }

        let mut report = JoystickReport::neutral();

        match self.phase {
            Phase::Init => self.phase = Phase::Settle,
            Phase::ResetPosition => {
                self.cursor = 0;
                self.ticks_in_action = 0;
                self.window = None;
                self.phase = Phase::Settle;
            }
            Phase::Settle => self.phase = Phase::Running,
            Phase::Running => self.step(clock, &mut report),
            Phase::Finished => return report,
        }

        self.echo.arm(report);
        report
    }

    /// Rewind to the first action on the next fresh evaluation.
    pub fn reset(&mut self) {
        self.phase = Phase::ResetPosition;
    }

    fn step<C: Clock + ?Sized>(&mut self, clock: &C, report: &mut JoystickReport) {
        let action = self.script.action_at(self.cursor);

        if let Hold::Millis(ms) = action.hold {
            if self.window.is_none() {
                let start = clock.now_ms();
                self.window = Some(Window {
                    start,
                    deadline: start.saturating_add(u64::from(ms)),
                });
            }
        }

        action.kind.apply(report);
        if let Some(lit) = action.kind.indicator() {
            self.indicator = lit;
        }

        self.ticks_in_action = self.ticks_in_action.saturating_add(1);

        match action.hold {
            Hold::Ticks(n) => {
                if self.ticks_in_action > u32::from(n) {
                    self.window = None;
                    self.advance(report);
                }
            }
            Hold::Immediate => {
                self.window = None;
                self.advance(report);
            }
            Hold::Millis(_) => {
                let expired = self
                    .window
                    .is_some_and(|window| clock.now_ms() > window.deadline);
                if expired && self.advance(report) {
                    let next_ms = u64::from(self.script.action_at(self.cursor).target_duration_ms());
                    if let Some(window) = self.window.as_mut() {
                        window.deadline = window.deadline.saturating_add(next_ms);
                    }
                }
            }
        }
    }

    /// Move to the next action, applying the wrap policy past the end.
    /// Returns `false` if playback finished.
    fn advance(&mut self, report: &mut JoystickReport) -> bool {
        self.ticks_in_action = 0;

        let next = self.cursor + 1;
        if next < self.script.len() {
            self.cursor = next;
            return true;
        }

        *report = JoystickReport::neutral();
        match self.wrap {
            WrapPolicy::LoopBack => {
                self.cursor = self.script.loop_start();
                self.laps = self.laps.saturating_add(1);
                true
            }
            WrapPolicy::Finish => {
                self.phase = Phase::Finished;
                false
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the current action, always within the script.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Evaluated cycles spent on the current action.
    pub fn ticks_in_action(&self) -> u32 {
        self.ticks_in_action
    }

    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Echoes still owed before the next fresh evaluation.
    pub fn echo_remaining(&self) -> u8 {
        self.echo.remaining()
    }

    /// Most recently computed report.
    pub fn last_report(&self) -> &JoystickReport {
        self.echo.last()
    }

    /// `true` while the macro is holding A or B.
    pub fn indicator(&self) -> bool {
        self.indicator
    }

    /// Number of times playback looped back.
    pub fn laps(&self) -> u32 {
        self.laps
    }

    /// How long the caller should idle before the next evaluation, if the
    /// sequencer has nothing left to play.
    pub fn idle_hint(&self) -> Option<u64> {
        (self.phase == Phase::Finished).then_some(config::FINISHED_IDLE_MS)
    }

    pub fn status(&self) -> Status {
        Status {
            phase: self.phase,
            cursor: self.cursor,
            laps: self.laps,
            indicator: self.indicator,
        }
    }
}
