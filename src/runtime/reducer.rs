use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::state::AppState;
use crate::widgets::traits::InteractionResult;

pub struct Reducer;

impl Reducer {
    pub fn reduce(state: &mut AppState, command: Command) -> Vec<Effect> {
        match command {
            Command::Exit => {
                state.request_exit();
                vec![Effect::RequestRender]
            }
            Command::PrevMonth => collect_effects(state.navigate(-1)),
            Command::NextMonth => collect_effects(state.navigate(1)),
            Command::InputKey(key) => collect_effects(state.dispatch_key_to_focused(key)),
            Command::Activate(target) => collect_effects(state.activate(target)),
            Command::Noop => vec![],
        }
    }
}

fn collect_effects(result: InteractionResult) -> Vec<Effect> {
    let mut effects: Vec<Effect> = result.actions.into_iter().map(Effect::Action).collect();
    if result.request_render {
        effects.push(Effect::RequestRender);
    }
    effects
}
