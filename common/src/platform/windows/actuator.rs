use std::ptr;
use std::thread;
use std::time::Duration;

use log::trace;
use winapi::ctypes::c_short;
use winapi::shared::minwindef::{LPARAM, WPARAM};
use winapi::shared::windef::HWND;
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::winuser::{
    FindWindowW, GetForegroundWindow, PostMessageW, APPCOMMAND_VOLUME_DOWN,
    APPCOMMAND_VOLUME_MUTE, APPCOMMAND_VOLUME_UP, WM_APPCOMMAND,
};

use crate::constants::{STEP_DOWN_SETTLE, STEP_UP_SETTLE};
use crate::platform::{ActuatorError, StepActuator};

const SHELL_TRAY_CLASS: &str = "Shell_TrayWnd";

/// Posts WM_APPCOMMAND volume commands to the shell taskbar window, falling
/// back to the current foreground window if the taskbar is not discoverable.
pub struct AppCommandActuator {
    hwnd: HWND,
}

impl AppCommandActuator {
    pub fn new() -> Result<AppCommandActuator, ActuatorError> {
        let class: Vec<u16> = SHELL_TRAY_CLASS.encode_utf16().chain(Some(0)).collect();
        let mut hwnd = unsafe { FindWindowW(class.as_ptr(), ptr::null()) };
        if hwnd.is_null() {
            hwnd = unsafe { GetForegroundWindow() };
        }
        if hwnd.is_null() {
            return Err(ActuatorError::NoTargetWindow);
        }
        Ok(AppCommandActuator { hwnd })
    }

    fn post(&self, command: c_short, settle: Duration) -> Result<(), ActuatorError> {
        trace!("posting appcommand {}", command);
        // The command lives in the high word of lParam, per GET_APPCOMMAND_LPARAM.
        let lparam = (command as LPARAM) << 16;
        let posted =
            unsafe { PostMessageW(self.hwnd, WM_APPCOMMAND, self.hwnd as WPARAM, lparam) };
        if posted == 0 {
            return Err(ActuatorError::PostFailed(unsafe { GetLastError() }));
        }
        thread::sleep(settle);
        Ok(())
    }
}

impl StepActuator for AppCommandActuator {
    fn step_up(&mut self) -> Result<(), ActuatorError> {
        self.post(APPCOMMAND_VOLUME_UP, STEP_UP_SETTLE)
    }

    fn step_down(&mut self) -> Result<(), ActuatorError> {
        self.post(APPCOMMAND_VOLUME_DOWN, STEP_DOWN_SETTLE)
    }

    fn toggle_mute(&mut self) -> Result<(), ActuatorError> {
        self.post(APPCOMMAND_VOLUME_MUTE, STEP_UP_SETTLE)
    }
}
