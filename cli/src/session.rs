use std::io::Write;
use std::str::FromStr;

use statig::prelude::{InitializedStateMachine, IntoStateMachineExt};

use crate::messages::{Command, CommandParseError};
use crate::state::SessionState;

/// Interactive driver: one text command in, responses written to `W`.
pub struct Session<W>
where
    W: Write + 'static,
{
    state_machine: InitializedStateMachine<SessionState<W>>,
    finished: bool,
}

impl<W> Session<W>
where
    W: Write + 'static,
{
    pub fn new(out: W) -> Self {
        let session_state = SessionState::new(out);
        let session_state_machine = session_state.uninitialized_state_machine().init();
        Self {
            state_machine: session_state_machine,
            finished: false,
        }
    }

    pub fn handle_command(&mut self, command: &str) -> Result<(), CommandParseError> {
        let command = Command::from_str(command)?;
        if command == Command::Quit {
            self.finished = true;
        }
        self.state_machine.handle(&command);
        Ok(())
    }

    /// Whether `quit` has been received.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
