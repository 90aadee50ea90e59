//! Named panel states and the directed graph connecting them.
//!
//! A [`StateGraph`] answers one question: dragging from a state in a given
//! direction, which state are we heading for? States without an edge in that
//! direction map to themselves, which the controller reads as "this drag
//! direction cannot start a transition here".

use crate::config::ConfigError;
use crate::detector::SwipeDirections;

/// A resting state of the panel with its endpoint progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedState {
    name: &'static str,
    progress: f32,
}

impl FeedState {
    /// Panel fully hidden
    pub const CLOSED: Self = Self::new("closed", 0.0);
    /// Panel fully shown
    pub const OPEN: Self = Self::new("open", 1.0);

    pub const fn new(name: &'static str, progress: f32) -> Self {
        Self { name, progress }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Endpoint progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress
    }
}

impl std::fmt::Display for FeedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.progress)
    }
}

/// Direction of a drag along the panel axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Positive,
    Negative,
}

impl SwipeDirection {
    pub fn from_positive(is_positive: bool) -> Self {
        if is_positive {
            SwipeDirection::Positive
        } else {
            SwipeDirection::Negative
        }
    }

    pub fn as_flag(self) -> SwipeDirections {
        match self {
            SwipeDirection::Positive => SwipeDirections::POSITIVE,
            SwipeDirection::Negative => SwipeDirections::NEGATIVE,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Edge {
    from: FeedState,
    direction: SwipeDirection,
    to: FeedState,
}

/// Lookup table `(state, direction) -> state` plus the home state
#[derive(Clone, Debug)]
pub struct StateGraph {
    home: FeedState,
    edges: Vec<Edge>,
}

impl StateGraph {
    /// Closed/open panel: a positive drag opens, a negative drag closes
    pub fn two_state() -> Self {
        Self {
            home: FeedState::CLOSED,
            edges: vec![
                Edge {
                    from: FeedState::CLOSED,
                    direction: SwipeDirection::Positive,
                    to: FeedState::OPEN,
                },
                Edge {
                    from: FeedState::OPEN,
                    direction: SwipeDirection::Negative,
                    to: FeedState::CLOSED,
                },
            ],
        }
    }

    /// Start building a graph whose resting state is `home`
    pub fn builder(home: FeedState) -> StateGraphBuilder {
        StateGraphBuilder {
            home,
            edges: Vec::new(),
        }
    }

    /// The state the panel starts in and returns to on close
    pub fn home(&self) -> FeedState {
        self.home
    }

    /// State reached by dragging from `from` in the given direction, or
    /// `from` itself when no edge exists
    pub fn target_state(&self, from: FeedState, is_drag_toward_positive: bool) -> FeedState {
        let direction = SwipeDirection::from_positive(is_drag_toward_positive);
        self.edges
            .iter()
            .find(|edge| edge.from == from && edge.direction == direction)
            .map_or(from, |edge| edge.to)
    }

    /// Directions in which a drag starting at `from` can go somewhere
    pub fn swipe_directions(&self, from: FeedState) -> SwipeDirections {
        let mut directions = SwipeDirections::empty();
        if self.target_state(from, true) != from {
            directions |= SwipeDirections::POSITIVE;
        }
        if self.target_state(from, false) != from {
            directions |= SwipeDirections::NEGATIVE;
        }
        directions
    }
}

impl Default for StateGraph {
    fn default() -> Self {
        Self::two_state()
    }
}

/// Builder for a custom [`StateGraph`]
#[derive(Clone, Debug)]
pub struct StateGraphBuilder {
    home: FeedState,
    edges: Vec<Edge>,
}

impl StateGraphBuilder {
    /// Add an edge taken when dragging from `from` in `direction`
    pub fn edge(mut self, from: FeedState, direction: SwipeDirection, to: FeedState) -> Self {
        self.edges.push(Edge {
            from,
            direction,
            to,
        });
        self
    }

    pub fn build(self) -> Result<StateGraph, ConfigError> {
        let mut states = vec![self.home];
        for edge in &self.edges {
            states.push(edge.from);
            states.push(edge.to);
        }
        for state in &states {
            if !(0.0..=1.0).contains(&state.progress) {
                return Err(ConfigError::StateOutOfRange {
                    name: state.name,
                    progress: state.progress,
                });
            }
            if states
                .iter()
                .any(|other| other.name == state.name && other != state)
            {
                return Err(ConfigError::DuplicateName(state.name));
            }
        }

        for (i, edge) in self.edges.iter().enumerate() {
            if edge.from == edge.to {
                return Err(ConfigError::SelfLoop(edge.from.name));
            }
            let duplicate = self.edges[..i]
                .iter()
                .any(|prev| prev.from == edge.from && prev.direction == edge.direction);
            if duplicate {
                return Err(ConfigError::DuplicateEdge(edge.from.name));
            }
        }

        Ok(StateGraph {
            home: self.home,
            edges: self.edges,
        })
    }
}
