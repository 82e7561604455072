use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::Reducer;
use crate::state::AppState;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::{RenderFrame, Renderer};
use log::{info, warn};
use std::io;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(120);

pub struct Runtime {
    state: AppState,
    terminal: Terminal,
    key_bindings: KeyBindings,
    renderer: Renderer,
    last_frame: RenderFrame,
}

impl Runtime {
    pub fn new(state: AppState, terminal: Terminal) -> Self {
        Self::with_key_bindings(state, terminal, KeyBindings::new())
    }

    pub fn with_key_bindings(
        state: AppState,
        terminal: Terminal,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            state,
            terminal,
            key_bindings,
            renderer: Renderer::default(),
            last_frame: RenderFrame::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Runs until exit is requested and hands the final state back.
    pub fn run(mut self) -> io::Result<AppState> {
        self.terminal.enter()?;
        info!("calendar opened at {}", self.state.calendar().month());

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.state.should_exit() {
                let event = self.terminal.poll_event(POLL_INTERVAL)?;
                self.dispatch_terminal_event(event)?;
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        if let (Err(run_err), Err(exit_err)) = (&run_result, &exit_result) {
            warn!("terminal restore failed after {run_err}: {exit_err}");
        }
        run_result.and(exit_result)?;

        info!(
            "calendar closed with {} selected dates",
            self.state.calendar().selection().len()
        );
        Ok(self.state)
    }

    fn dispatch_terminal_event(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Resize(size) => {
                self.terminal.set_size(size);
                self.render()
            }
            TerminalEvent::Key(key) => {
                self.terminal.reset_scroll();
                let command = self.key_bindings.resolve(key);
                self.process_command(command)
            }
            TerminalEvent::Click(pos) => {
                let row = self.terminal.frame_row(pos.row);
                let command = self
                    .last_frame
                    .hit_test(pos.col, row)
                    .map(Command::Activate)
                    .unwrap_or(Command::Noop);
                self.process_command(command)
            }
            TerminalEvent::Scroll(delta) => {
                self.terminal.scroll(delta);
                self.render()
            }
            TerminalEvent::Tick => Ok(()),
        }
    }

    fn process_command(&mut self, command: Command) -> io::Result<()> {
        let effects = Reducer::reduce(&mut self.state, command);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        let mut render_requested = false;

        for effect in effects {
            match effect {
                Effect::Action(action) => {
                    render_requested |= self.state.handle_widget_action(action);
                }
                Effect::RequestRender => {
                    render_requested = true;
                }
            }
        }

        if render_requested {
            self.render()?;
        }

        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        self.last_frame = self.renderer.render(&self.state, self.terminal.size());
        self.terminal.render_frame(&self.last_frame)
    }
}
