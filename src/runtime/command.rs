use crate::terminal::KeyEvent;
use crate::widgets::traits::HitTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    PrevMonth,
    NextMonth,
    InputKey(KeyEvent),
    Activate(HitTarget),
    Noop,
}
