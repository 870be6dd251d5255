//! Script table - the ordered, timed list of actions the sequencer plays.
//!
//! A script is immutable and fixed at build time. Each [`Action`] pairs a
//! button gesture with a [`Hold`] that decides when the sequencer moves
//! on: after a number of polling cycles, after a millisecond budget, or
//! immediately.

use crate::config::{
    BUTTON_PRESS_MS, DRIFT_CORRECTION_JUMP, DRIFT_CORRECTION_MS, JUMP_COUNT, JUMP_WAIT_MS,
    SELECT_SETTLE_MS,
};
use crate::error::Error;
use crate::hid::{Buttons, JoystickReport, STICK_MAX, STICK_MIN};

/// Gesture performed while an action is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionKind {
    Up,
    Down,
    Left,
    Right,
    X,
    Y,
    A,
    B,
    L,
    R,
    /// Left stick up while holding R.
    Throw,
    /// Release everything.
    Nothing,
    /// L and R together (controller pairing gesture).
    Triggers,
}

impl ActionKind {
    /// Apply this gesture to a report.
    pub fn apply(self, report: &mut JoystickReport) {
        match self {
            ActionKind::Up => report.ly = STICK_MIN,
            ActionKind::Down => report.ly = STICK_MAX,
            ActionKind::Left => report.lx = STICK_MIN,
            ActionKind::Right => report.lx = STICK_MAX,
            ActionKind::X => report.buttons |= Buttons::X,
            ActionKind::Y => report.buttons |= Buttons::Y,
            ActionKind::A => report.buttons |= Buttons::A,
            ActionKind::B => report.buttons |= Buttons::B,
            ActionKind::L => report.buttons |= Buttons::L,
            ActionKind::R => report.buttons |= Buttons::R,
            ActionKind::Throw => {
                report.ly = STICK_MIN;
                report.buttons |= Buttons::R;
            }
            ActionKind::Triggers => report.buttons |= Buttons::L | Buttons::R,
            ActionKind::Nothing => *report = JoystickReport::neutral(),
        }
    }

    /// Status indicator level this gesture implies, if it changes it.
    ///
    /// A and B light the indicator, a release turns it off, everything
    /// else leaves it as it was.
    pub const fn indicator(self) -> Option<bool> {
        match self {
            ActionKind::A | ActionKind::B => Some(true),
            ActionKind::Nothing => Some(false),
            _ => None,
        }
    }
}

/// Advance condition of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hold {
    /// Hold for this many polling cycles; advance on the one after.
    Ticks(u16),
    /// Hold until the clock passes the window deadline.
    Millis(u32),
    /// Advance on the first cycle.
    Immediate,
}

/// One line of a script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Action {
    pub kind: ActionKind,
    pub hold: Hold,
}

impl Action {
    /// Tick-based action. A zero count degrades to [`Hold::Immediate`].
    pub const fn ticks(kind: ActionKind, ticks: u16) -> Self {
        let hold = if ticks == 0 {
            Hold::Immediate
        } else {
            Hold::Ticks(ticks)
        };
        Self { kind, hold }
    }

    /// Time-based action. A zero budget degrades to [`Hold::Immediate`].
    pub const fn millis(kind: ActionKind, ms: u32) -> Self {
        let hold = if ms == 0 {
            Hold::Immediate
        } else {
            Hold::Millis(ms)
        };
        Self { kind, hold }
    }

    /// Polling cycles this action holds, or 0 if it is not tick-based.
    pub const fn duration_ticks(&self) -> u16 {
        match self.hold {
            Hold::Ticks(n) => n,
            _ => 0,
        }
    }

    /// Millisecond budget of this action, or 0 if it is not time-based.
    pub const fn target_duration_ms(&self) -> u32 {
        match self.hold {
            Hold::Millis(ms) => ms,
            _ => 0,
        }
    }
}

/// Immutable ordered list of actions plus the index playback loops back to.
#[derive(Clone, Copy, Debug)]
pub struct Script<'a> {
    actions: &'a [Action],
    loop_start: usize,
}

impl<'a> Script<'a> {
    /// Build a script, checking it is non-empty and that `loop_start`
    /// names one of its actions.
    pub const fn new(actions: &'a [Action], loop_start: usize) -> Result<Self, Error> {
        if actions.is_empty() {
            return Err(Error::EmptyScript);
        }
        if loop_start >= actions.len() {
            return Err(Error::LoopStartOutOfRange {
                loop_start,
                len: actions.len(),
            });
        }
        Ok(Self {
            actions,
            loop_start,
        })
    }

    pub const fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always `false`; construction rejects empty scripts.
    pub const fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Index playback resumes from after the last action.
    pub const fn loop_start(&self) -> usize {
        self.loop_start
    }

    pub const fn actions(&self) -> &'a [Action] {
        self.actions
    }

    /// Action at `index`, clamped to the last action.
    pub fn action_at(&self, index: usize) -> Action {
        self.actions[index.min(self.actions.len() - 1)]
    }
}

// Default macro: "100 jumps"

/// Controller sync followed by the super-jump selection.
const PREAMBLE: [Action; 9] = [
    // Setup controller
    Action::ticks(ActionKind::Nothing, 250),
    Action::ticks(ActionKind::Triggers, 5),
    Action::ticks(ActionKind::Nothing, 150),
    Action::ticks(ActionKind::Triggers, 5),
    Action::ticks(ActionKind::Nothing, 250),
    Action::ticks(ActionKind::A, 5),
    Action::ticks(ActionKind::Nothing, 250),
    // Select super jump
    Action::millis(ActionKind::A, BUTTON_PRESS_MS),
    Action::millis(ActionKind::Nothing, SELECT_SETTLE_MS),
];

/// Index of the first jump; the macro loops back here after the last one.
pub const JUMP_LOOP_START: usize = PREAMBLE.len();

/// Total number of actions in the default macro.
pub const JUMP_SCRIPT_LEN: usize = JUMP_LOOP_START + 2 * JUMP_COUNT;

const _: () = assert!(JUMP_LOOP_START < JUMP_SCRIPT_LEN);

static JUMP_STEPS: [Action; JUMP_SCRIPT_LEN] = build_jump_steps();

const fn build_jump_steps() -> [Action; JUMP_SCRIPT_LEN] {
    let mut steps = [Action::ticks(ActionKind::Nothing, 0); JUMP_SCRIPT_LEN];

    let mut i = 0;
    while i < PREAMBLE.len() {
        steps[i] = PREAMBLE[i];
        i += 1;
    }

    let mut jump = 1;
    while jump <= JUMP_COUNT {
        let at = JUMP_LOOP_START + (jump - 1) * 2;
        let wait = if jump == DRIFT_CORRECTION_JUMP {
            JUMP_WAIT_MS + DRIFT_CORRECTION_MS
        } else {
            JUMP_WAIT_MS
        };
        steps[at] = Action::millis(ActionKind::B, BUTTON_PRESS_MS);
        steps[at + 1] = Action::millis(ActionKind::Nothing, wait);
        jump += 1;
    }

    steps
}

/// The compiled-in macro: sync the controller, select the super jump,
/// then jump 101 times and loop back to the first jump forever.
pub fn jump_script() -> Script<'static> {
    Script {
        actions: &JUMP_STEPS,
        loop_start: JUMP_LOOP_START,
    }
}
