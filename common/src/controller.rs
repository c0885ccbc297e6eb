use log::{debug, warn};
use thiserror::Error;

use crate::constants::MAX_VOLUME;
use crate::platform::{ActuatorError, StepActuator, VolumeReader};
use crate::store::{LevelStore, StoreError};

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("volume level {0} is out of range (0-50)")]
    OutOfRange(i32),
    #[error("no stored volume level to restore")]
    NoStoredLevel,
    #[error("volume step delivery failed")]
    Actuator(#[from] ActuatorError),
    #[error("volume level store failed")]
    Store(#[from] StoreError),
}

/// Drives the system volume to absolute levels over a channel that only
/// exposes relative steps. Because the channel cannot be queried, every set
/// begins from a forced zero baseline: step down past the bottom of the
/// scale, then step up to the target.
pub struct VolumeController<A, R, S> {
    actuator: A,
    reader: R,
    store: S,
}

impl<A, R, S> VolumeController<A, R, S>
where
    A: StepActuator,
    R: VolumeReader,
    S: LevelStore,
{
    pub fn new(actuator: A, reader: R, store: S) -> VolumeController<A, R, S> {
        VolumeController {
            actuator,
            reader,
            store,
        }
    }

    /// Sets the volume to `target` on the 0-50 scale. `target == 0` mutes and
    /// remembers the current level for a later [`restore_default`].
    ///
    /// An actuator error aborts the remaining steps of the current phase and
    /// may leave the volume partially adjusted; no rollback is attempted.
    ///
    /// [`restore_default`]: VolumeController::restore_default
    pub fn set_absolute(&mut self, target: i32) -> Result<(), ControlError> {
        if !(0..=MAX_VOLUME).contains(&target) {
            return Err(ControlError::OutOfRange(target));
        }

        if target == 0 {
            self.remember_current_level();
        }

        debug!("reset phase: {} step-down commands", MAX_VOLUME);
        for _ in 0..MAX_VOLUME {
            self.actuator.step_down()?;
        }

        if target == 0 {
            return Ok(());
        }

        debug!("build-up phase: {} step-up commands", target);
        for _ in 0..target {
            self.actuator.step_up()?;
        }

        if let Err(err) = self.store.store(target) {
            warn!("volume set to {} but storing the level failed: {}", target, err);
        }
        Ok(())
    }

    /// Sets the volume back to the last remembered non-muted level.
    pub fn restore_default(&mut self) -> Result<(), ControlError> {
        match self.store.load()? {
            Some(level) => {
                debug!("restoring volume level {}", level);
                self.set_absolute(level)
            }
            None => Err(ControlError::NoStoredLevel),
        }
    }

    /// Snapshots the current level before a mute so it can be restored later.
    /// Read and store failures are warnings; the mute itself must proceed.
    fn remember_current_level(&mut self) {
        let fraction = match self.reader.read_current() {
            Ok(fraction) => fraction,
            Err(err) => {
                warn!("muting without remembering the current level: {}", err);
                return;
            }
        };
        // Truncation, not rounding: a fraction just below a step boundary
        // reports the lower level.
        let level = (fraction.clamp(0.0, 1.0) * MAX_VOLUME as f32) as i32;
        if level == 0 {
            debug!("current level is already 0, nothing to remember");
            return;
        }
        if let Err(err) = self.store.store(level) {
            warn!("failed to remember pre-mute level {}: {}", level, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::platform::mock::{MockActuator, MockReader, MockStore, StepCommand};

    fn controller<'a>(
        actuator: &'a mut MockActuator,
        reader: &'a MockReader,
        store: &'a mut MockStore,
    ) -> VolumeController<&'a mut MockActuator, &'a MockReader, &'a mut MockStore> {
        VolumeController::new(actuator, reader, store)
    }

    fn trace(downs: usize, ups: usize) -> Vec<StepCommand> {
        let mut commands = vec![StepCommand::Down; downs];
        commands.extend(vec![StepCommand::Up; ups]);
        commands
    }

    #[test]
    fn test_set_absolute_resets_then_builds_up() {
        for target in 0..=MAX_VOLUME {
            let mut actuator = MockActuator::default();
            let reader = MockReader::default();
            let mut store = MockStore::default();

            controller(&mut actuator, &reader, &mut store)
                .set_absolute(target)
                .unwrap();

            assert_eq!(actuator.commands, trace(50, target as usize));
            if target > 0 {
                assert_eq!(store.level, Some(target));
            }
        }
    }

    #[test]
    fn test_out_of_range_issues_no_commands() {
        for target in [-1, 51] {
            let mut actuator = MockActuator::default();
            let reader = MockReader::default();
            let mut store = MockStore::default();

            let err = controller(&mut actuator, &reader, &mut store)
                .set_absolute(target)
                .unwrap_err();

            assert!(matches!(err, ControlError::OutOfRange(t) if t == target));
            assert!(actuator.commands.is_empty());
            assert_eq!(store.level, None);
        }
    }

    #[test]
    fn test_mute_remembers_truncated_current_level() {
        let mut actuator = MockActuator::default();
        let reader = MockReader::with_fraction(0.40);
        let mut store = MockStore::default();

        controller(&mut actuator, &reader, &mut store)
            .set_absolute(0)
            .unwrap();

        assert_eq!(store.level, Some(20));
        assert_eq!(actuator.commands, trace(50, 0));
    }

    #[test]
    fn test_mute_never_stores_zero() {
        let mut actuator = MockActuator::default();
        let reader = MockReader::with_fraction(0.005);
        let mut store = MockStore::default();

        controller(&mut actuator, &reader, &mut store)
            .set_absolute(0)
            .unwrap();

        assert_eq!(store.level, None);
        assert_eq!(actuator.commands, trace(50, 0));
    }

    #[test]
    fn test_mute_proceeds_when_reader_fails() {
        let mut actuator = MockActuator::default();
        let reader = MockReader {
            fraction: 0.40,
            fail: true,
        };
        let mut store = MockStore::default();

        controller(&mut actuator, &reader, &mut store)
            .set_absolute(0)
            .unwrap();

        assert_eq!(store.level, None);
        assert_eq!(actuator.commands, trace(50, 0));
    }

    #[test]
    fn test_restore_reproduces_set_trace() {
        let mut actuator = MockActuator::default();
        let reader = MockReader::with_fraction(0.40);
        let mut store = MockStore::default();

        // Mute from 40%, then restore: the remembered level is rebuilt with
        // the same trace a direct set_absolute(20) would produce.
        controller(&mut actuator, &reader, &mut store)
            .set_absolute(0)
            .unwrap();
        actuator.commands.clear();

        controller(&mut actuator, &reader, &mut store)
            .restore_default()
            .unwrap();

        assert_eq!(actuator.commands, trace(50, 20));
        assert_eq!(store.level, Some(20));
    }

    #[test]
    fn test_restore_with_empty_store_issues_no_commands() {
        let mut actuator = MockActuator::default();
        let reader = MockReader::default();
        let mut store = MockStore::default();

        let err = controller(&mut actuator, &reader, &mut store)
            .restore_default()
            .unwrap_err();

        assert!(matches!(err, ControlError::NoStoredLevel));
        assert!(actuator.commands.is_empty());
    }

    #[test]
    fn test_restore_surfaces_store_read_failure() {
        let mut actuator = MockActuator::default();
        let reader = MockReader::default();
        let mut store = MockStore {
            fail_load: true,
            ..MockStore::default()
        };

        let err = controller(&mut actuator, &reader, &mut store)
            .restore_default()
            .unwrap_err();

        assert!(matches!(err, ControlError::Store(_)));
        assert!(actuator.commands.is_empty());
    }

    #[test]
    fn test_actuator_failure_aborts_remaining_steps() {
        let mut actuator = MockActuator {
            fail_after: Some(10),
            ..MockActuator::default()
        };
        let reader = MockReader::default();
        let mut store = MockStore::default();

        let err = controller(&mut actuator, &reader, &mut store)
            .set_absolute(30)
            .unwrap_err();

        assert!(matches!(err, ControlError::Actuator(_)));
        assert_eq!(actuator.commands.len(), 10);
        assert_eq!(store.level, None);
    }

    #[test]
    fn test_set_succeeds_when_store_write_fails() {
        let mut actuator = MockActuator::default();
        let reader = MockReader::default();
        let mut store = MockStore {
            fail_store: true,
            ..MockStore::default()
        };

        controller(&mut actuator, &reader, &mut store)
            .set_absolute(30)
            .unwrap();

        assert_eq!(actuator.commands, trace(50, 30));
        assert_eq!(store.level, None);
    }
}
