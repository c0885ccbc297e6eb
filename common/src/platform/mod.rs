pub mod mock;
#[cfg(windows)]
mod windows;

use thiserror::Error;

#[cfg(windows)]
pub type DefaultActuator = windows::AppCommandActuator;
#[cfg(windows)]
pub type DefaultReader = windows::EndpointReader;

#[cfg(not(windows))]
pub type DefaultActuator = mock::MockActuator;
#[cfg(not(windows))]
pub type DefaultReader = mock::MockReader;

#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("no window available to receive volume commands")]
    NoTargetWindow,
    #[error("posting volume command failed (code {0})")]
    PostFailed(u32),
}

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("no default audio render device")]
    NoDefaultDevice,
    #[error("audio endpoint activation failed (HRESULT {0:#010x})")]
    ActivationFailed(i32),
    #[error("volume query failed (HRESULT {0:#010x})")]
    QueryFailed(i32),
}

/// Write-only command channel to the system volume. Commands are
/// fire-and-forget: the receiving subsystem applies them at its own pace and
/// there is no way to read the channel's state back, so callers that need a
/// known level must reset to zero and rebuild step by step.
pub trait StepActuator {
    fn step_up(&mut self) -> Result<(), ActuatorError>;
    fn step_down(&mut self) -> Result<(), ActuatorError>;
    fn toggle_mute(&mut self) -> Result<(), ActuatorError>;
}

impl<T: StepActuator + ?Sized> StepActuator for &mut T {
    fn step_up(&mut self) -> Result<(), ActuatorError> {
        (**self).step_up()
    }

    fn step_down(&mut self) -> Result<(), ActuatorError> {
        (**self).step_down()
    }

    fn toggle_mute(&mut self) -> Result<(), ActuatorError> {
        (**self).toggle_mute()
    }
}

/// Point-in-time query of the default render endpoint's volume as a fraction
/// in [0.0, 1.0]. This is a separate read path with no guaranteed consistency
/// with the actuator's command channel.
pub trait VolumeReader {
    fn read_current(&self) -> Result<f32, ReaderError>;
}

impl<T: VolumeReader + ?Sized> VolumeReader for &T {
    fn read_current(&self) -> Result<f32, ReaderError> {
        (**self).read_current()
    }
}
