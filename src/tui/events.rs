use tile48::engine::{Difficulty, Direction};
use tile48::Result;

pub(crate) trait EventSource {
    fn next_event(&self) -> Result<Event>;
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    UserInput(UserInput),
    Resize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum UserInput {
    Direction(Direction),
    Undo,
    NewGame,
    Difficulty(Difficulty),
    ToggleTheme,
    Quit,
}
