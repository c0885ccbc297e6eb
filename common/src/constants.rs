use std::time::Duration;

pub const MAX_VOLUME: i32 = 50;

/// The volume-command channel processes posts at its own pace; commands queued
/// faster than this get dropped or coalesced.
pub const STEP_UP_SETTLE: Duration = Duration::from_millis(20);
pub const STEP_DOWN_SETTLE: Duration = Duration::from_millis(10);

pub const VOLCTL_STATE_DIR: &str = "volctl";
pub const VOLCTL_STATE_FILE: &str = "volume.json";
