use macroquad::input::KeyCode;
use macroquad::math::Vec2;
use tracing::trace;

use crate::geom::Direction;

/// Logical keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Walk towards -x.
    MoveLeft,
    /// Walk towards +x.
    MoveRight,
    /// Walk towards -y.
    MoveUp,
    /// Walk towards +y.
    MoveDown,
    /// Quit immediately.
    Exit,
    /// Put the camera back to identity framing.
    ResetCamera,
    /// Zoom in while held.
    ZoomIn,
    /// Zoom out while held.
    ZoomOut,
    /// Rotate clockwise while held.
    RotateCw,
    /// Rotate counter-clockwise while held.
    RotateCcw,
}

const ACTION_COUNT: usize = 10;

impl InputAction {
    const ALL: [InputAction; ACTION_COUNT] = [
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::MoveUp,
        InputAction::MoveDown,
        InputAction::Exit,
        InputAction::ResetCamera,
        InputAction::ZoomIn,
        InputAction::ZoomOut,
        InputAction::RotateCw,
        InputAction::RotateCcw,
    ];

    const fn index(self) -> usize {
        match self {
            InputAction::MoveLeft => 0,
            InputAction::MoveRight => 1,
            InputAction::MoveUp => 2,
            InputAction::MoveDown => 3,
            InputAction::Exit => 4,
            InputAction::ResetCamera => 5,
            InputAction::ZoomIn => 6,
            InputAction::ZoomOut => 7,
            InputAction::RotateCw => 8,
            InputAction::RotateCcw => 9,
        }
    }
}

/// Default keyboard layout: WASD and arrows move, Escape quits, Space resets
/// the camera, Q/E zoom, R/T rotate.
pub const KEY_BINDINGS: &[(KeyCode, InputAction)] = &[
    (KeyCode::A, InputAction::MoveLeft),
    (KeyCode::Left, InputAction::MoveLeft),
    (KeyCode::D, InputAction::MoveRight),
    (KeyCode::Right, InputAction::MoveRight),
    (KeyCode::W, InputAction::MoveUp),
    (KeyCode::Up, InputAction::MoveUp),
    (KeyCode::S, InputAction::MoveDown),
    (KeyCode::Down, InputAction::MoveDown),
    (KeyCode::Escape, InputAction::Exit),
    (KeyCode::Space, InputAction::ResetCamera),
    (KeyCode::E, InputAction::ZoomIn),
    (KeyCode::Q, InputAction::ZoomOut),
    (KeyCode::R, InputAction::RotateCw),
    (KeyCode::T, InputAction::RotateCcw),
];

/// A fixed-size set of [`InputAction`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet {
    bits: [bool; ACTION_COUNT],
}

impl ActionSet {
    /// Adds or removes `action`.
    pub fn set(&mut self, action: InputAction, on: bool) {
        self.bits[action.index()] = on;
    }

    /// Whether `action` is in the set.
    pub fn contains(&self, action: InputAction) -> bool {
        self.bits[action.index()]
    }
}

impl<const N: usize> From<[InputAction; N]> for ActionSet {
    fn from(actions: [InputAction; N]) -> Self {
        let mut set = ActionSet::default();
        for a in actions {
            set.set(a, true);
        }
        set
    }
}

/// Everything one tick sees of the keyboard and pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Went down since the previous tick.
    pub just_pressed: ActionSet,
    /// Went up since the previous tick.
    pub just_released: ActionSet,
    /// Currently down.
    pub held: ActionSet,
    /// Pointer position in screen pixels.
    pub cursor: Vec2,
}

impl InputSnapshot {
    /// Snapshot with the given press edges and nothing else.
    pub fn pressed(actions: impl Into<ActionSet>) -> Self {
        Self {
            just_pressed: actions.into(),
            ..Self::default()
        }
    }

    /// Snapshot with the given release edges and nothing else.
    pub fn released(actions: impl Into<ActionSet>) -> Self {
        Self {
            just_released: actions.into(),
            ..Self::default()
        }
    }
}

/// Gathers per-frame key edges and hands them out once per tick.
///
/// Frames and ticks do not line up one to one: edges seen in a frame that ran
/// no tick are kept for the next tick, and a frame that runs several ticks
/// only delivers its edges to the first one. A release that follows a press
/// no tick has seen yet is held back one tick, so a short tap still ends in a
/// release.
#[derive(Debug, Default)]
pub struct InputCollector {
    pending_pressed: ActionSet,
    pending_released: ActionSet,
    deferred_released: ActionSet,
    held: ActionSet,
    cursor: Vec2,
}

impl InputCollector {
    /// Records one frame's raw key state.
    pub fn record_frame(
        &mut self,
        pressed: ActionSet,
        released: ActionSet,
        held: ActionSet,
        cursor: Vec2,
    ) {
        for action in InputAction::ALL {
            let (down, up) = (pressed.contains(action), released.contains(action));
            // both edges in one frame: the held state tells which came last
            if down && up && !held.contains(action) {
                self.record_press(action);
                self.record_release(action);
            } else {
                if up {
                    self.record_release(action);
                }
                if down {
                    self.record_press(action);
                }
            }
        }
        self.held = held;
        self.cursor = cursor;
    }

    fn record_press(&mut self, action: InputAction) {
        self.pending_pressed.set(action, true);
        self.deferred_released.set(action, false);
    }

    fn record_release(&mut self, action: InputAction) {
        if self.pending_pressed.contains(action) {
            self.deferred_released.set(action, true);
        } else {
            self.pending_released.set(action, true);
        }
    }

    /// Snapshot for the next tick; consumes pending edges.
    pub fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            just_pressed: std::mem::take(&mut self.pending_pressed),
            just_released: std::mem::take(&mut self.pending_released),
            held: self.held,
            cursor: self.cursor,
        };
        self.pending_released = std::mem::take(&mut self.deferred_released);
        snapshot
    }

    /// Last recorded pointer position.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }
}

/// What the frame loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Terminate now.
    Exit,
}

/// Turns key edges into a single current movement [`Direction`].
///
/// A press takes over unless the opposite direction is active; any release of
/// a movement key stops movement, even while another movement key is still
/// held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentResolver {
    direction: Direction,
}

// evaluation order is part of the behavior when several edges share a tick
const MOVE_KEYS: [(InputAction, Direction); 4] = [
    (InputAction::MoveLeft, Direction::Left),
    (InputAction::MoveRight, Direction::Right),
    (InputAction::MoveDown, Direction::Down),
    (InputAction::MoveUp, Direction::Up),
];

impl IntentResolver {
    /// Current movement intent.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Applies one tick's edges.
    pub fn apply(&mut self, input: &InputSnapshot) -> Control {
        for (action, dir) in MOVE_KEYS {
            if input.just_pressed.contains(action) {
                if self.direction != dir.opposite() {
                    self.direction = dir;
                }
            } else if input.just_released.contains(action) {
                self.direction = Direction::None;
            }
        }
        trace!(direction = ?self.direction, "intent resolved");

        if input.just_pressed.contains(InputAction::Exit) {
            Control::Exit
        } else {
            Control::Continue
        }
    }
}
