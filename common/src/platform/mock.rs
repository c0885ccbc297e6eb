use std::io;

use crate::platform::{ActuatorError, ReaderError, StepActuator, VolumeReader};
use crate::store::{LevelStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCommand {
    Up,
    Down,
    MuteToggle,
}

/// Records every command instead of posting it; no settling delays.
#[derive(Debug, Default)]
pub struct MockActuator {
    pub commands: Vec<StepCommand>,
    pub fail_after: Option<usize>,
}

impl MockActuator {
    pub fn new() -> Result<MockActuator, ActuatorError> {
        Ok(MockActuator::default())
    }

    fn push(&mut self, command: StepCommand) -> Result<(), ActuatorError> {
        if let Some(limit) = self.fail_after {
            if self.commands.len() >= limit {
                return Err(ActuatorError::NoTargetWindow);
            }
        }
        self.commands.push(command);
        Ok(())
    }
}

impl StepActuator for MockActuator {
    fn step_up(&mut self) -> Result<(), ActuatorError> {
        self.push(StepCommand::Up)
    }

    fn step_down(&mut self) -> Result<(), ActuatorError> {
        self.push(StepCommand::Down)
    }

    fn toggle_mute(&mut self) -> Result<(), ActuatorError> {
        self.push(StepCommand::MuteToggle)
    }
}

#[derive(Debug)]
pub struct MockReader {
    pub fraction: f32,
    pub fail: bool,
}

impl MockReader {
    pub fn new() -> Result<MockReader, ReaderError> {
        Ok(MockReader::default())
    }

    pub fn with_fraction(fraction: f32) -> MockReader {
        MockReader {
            fraction,
            fail: false,
        }
    }
}

impl Default for MockReader {
    fn default() -> MockReader {
        MockReader::with_fraction(0.5)
    }
}

impl VolumeReader for MockReader {
    fn read_current(&self) -> Result<f32, ReaderError> {
        if self.fail {
            return Err(ReaderError::NoDefaultDevice);
        }
        Ok(self.fraction)
    }
}

#[derive(Debug, Default)]
pub struct MockStore {
    pub level: Option<i32>,
    pub fail_store: bool,
    pub fail_load: bool,
}

impl LevelStore for MockStore {
    fn store(&mut self, level: i32) -> Result<(), StoreError> {
        if self.fail_store {
            return Err(StoreError::Io(io::Error::from(
                io::ErrorKind::PermissionDenied,
            )));
        }
        self.level = Some(level);
        Ok(())
    }

    fn load(&self) -> Result<Option<i32>, StoreError> {
        if self.fail_load {
            return Err(StoreError::Io(io::Error::from(
                io::ErrorKind::PermissionDenied,
            )));
        }
        Ok(self.level)
    }
}
