// src/viewer/mod.rs
//
// Rendering-agnostic viewer core. The live yew component and the exported
// standalone script both drive this state machine's rules.

pub mod cache;
pub mod config;
pub mod engine;
pub mod gesture;
pub mod layout;
pub mod markup;
pub mod styles;
pub mod timer;
pub mod view;

pub use engine::{Effect, KeyCommand, ViewerEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }

    // None past either end.
    pub fn apply(self, index: usize, len: usize) -> Option<usize> {
        let target = index.checked_add_signed(self.step())?;
        (target < len).then_some(target)
    }
}
