//! Game mode state machine with deferred transitions
//!
//! The graph is a fixed table keyed by [`StateId`] and [`Trigger`], wired once
//! at startup. Firing a trigger never changes the current state directly: the
//! edge target is queued and the owner applies at most one queued transition
//! at the start of each frame. An `enter` hook that fires another trigger
//! therefore costs one more frame per hop.

use std::collections::VecDeque;
use std::fmt;

/// Every mode the game can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateId {
    Start,
    Reset,
    FieldSetup,
    Countdown,
    Playing,
    Pause,
    GameOver,
    Shutdown,
}

impl StateId {
    pub const COUNT: usize = 8;

    pub const ALL: [StateId; Self::COUNT] = [
        StateId::Start,
        StateId::Reset,
        StateId::FieldSetup,
        StateId::Countdown,
        StateId::Playing,
        StateId::Pause,
        StateId::GameOver,
        StateId::Shutdown,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable tag used in logs
    pub fn tag(self) -> &'static str {
        match self {
            StateId::Start => "Start",
            StateId::Reset => "Reset",
            StateId::FieldSetup => "Field Setup",
            StateId::Countdown => "Countdown",
            StateId::Playing => "Playing",
            StateId::Pause => "Pause",
            StateId::GameOver => "Game Over",
            StateId::Shutdown => "Shutdown",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Named outgoing edges a state may define
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Done,
    Quit,
    Pause,
    Next,
    Confirm,
    Cancel,
    GameOver,
}

impl Trigger {
    pub const COUNT: usize = 7;

    pub const ALL: [Trigger; Self::COUNT] = [
        Trigger::Done,
        Trigger::Quit,
        Trigger::Pause,
        Trigger::Next,
        Trigger::Confirm,
        Trigger::Cancel,
        Trigger::GameOver,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Fixed edge table: `edges[from][trigger] -> Option<target>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionGraph {
    edges: [[Option<StateId>; Trigger::COUNT]; StateId::COUNT],
}

impl TransitionGraph {
    /// Graph with no edges at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// The game's wiring
    pub fn pong() -> Self {
        use StateId::*;

        let mut graph = Self::empty();

        graph.connect(Start, Trigger::Confirm, FieldSetup);
        graph.connect(Start, Trigger::Quit, Shutdown);

        graph.connect(Reset, Trigger::Next, FieldSetup);
        graph.connect(Reset, Trigger::Quit, Shutdown);

        graph.connect(FieldSetup, Trigger::Next, Countdown);
        graph.connect(FieldSetup, Trigger::Quit, Shutdown);

        graph.connect(Countdown, Trigger::Next, Playing);
        graph.connect(Countdown, Trigger::Quit, Shutdown);

        graph.connect(Playing, Trigger::Pause, Pause);
        graph.connect(Playing, Trigger::Next, FieldSetup);
        graph.connect(Playing, Trigger::GameOver, GameOver);
        graph.connect(Playing, Trigger::Quit, Shutdown);

        // Pressing pause again resumes
        graph.connect(Pause, Trigger::Pause, Playing);
        graph.connect(Pause, Trigger::Quit, Shutdown);

        graph.connect(GameOver, Trigger::Confirm, Reset);
        graph.connect(GameOver, Trigger::Cancel, Shutdown);
        graph.connect(GameOver, Trigger::Quit, Shutdown);

        graph
    }

    pub fn connect(&mut self, from: StateId, trigger: Trigger, to: StateId) {
        self.edges[from.index()][trigger.index()] = Some(to);
    }

    pub fn target(&self, from: StateId, trigger: Trigger) -> Option<StateId> {
        self.edges[from.index()][trigger.index()]
    }

    /// States reachable from `initial` (including it), in discovery order
    pub fn reachable_from(&self, initial: StateId) -> Vec<StateId> {
        let mut seen = [false; StateId::COUNT];
        let mut order = Vec::new();
        let mut frontier = VecDeque::from([initial]);
        seen[initial.index()] = true;

        while let Some(state) = frontier.pop_front() {
            order.push(state);
            for target in self.edges[state.index()].iter().flatten() {
                if !seen[target.index()] {
                    seen[target.index()] = true;
                    frontier.push_back(*target);
                }
            }
        }
        order
    }
}

/// Current state plus the queue of pending transitions
#[derive(Debug, Clone)]
pub struct StateMachine {
    graph: TransitionGraph,
    current: StateId,
    pending: VecDeque<StateId>,
}

impl StateMachine {
    pub fn new(graph: TransitionGraph, initial: StateId) -> Self {
        Self {
            graph,
            current: initial,
            pending: VecDeque::new(),
        }
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queue the current state's edge for `trigger`. Unmapped edges are a
    /// silent no-op. Returns whether anything was queued.
    pub fn trigger(&mut self, trigger: Trigger) -> bool {
        match self.graph.target(self.current, trigger) {
            Some(target) => {
                self.pending.push_back(target);
                true
            }
            None => false,
        }
    }

    pub fn done(&mut self) -> bool {
        self.trigger(Trigger::Done)
    }

    pub fn quit(&mut self) -> bool {
        self.trigger(Trigger::Quit)
    }

    pub fn pause(&mut self) -> bool {
        self.trigger(Trigger::Pause)
    }

    pub fn next(&mut self) -> bool {
        self.trigger(Trigger::Next)
    }

    pub fn confirm(&mut self) -> bool {
        self.trigger(Trigger::Confirm)
    }

    pub fn cancel(&mut self) -> bool {
        self.trigger(Trigger::Cancel)
    }

    pub fn game_over(&mut self) -> bool {
        self.trigger(Trigger::GameOver)
    }

    /// Pop the oldest pending target, if any
    pub fn take_pending(&mut self) -> Option<StateId> {
        self.pending.pop_front()
    }

    /// Swap the current state. Callers run the old state's `exit` hook
    /// before this and the new state's `enter` hook after.
    pub fn set_current(&mut self, state: StateId) -> StateId {
        std::mem::replace(&mut self.current, state)
    }
}
