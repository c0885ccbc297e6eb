use std::ptr;

use winapi::shared::winerror::FAILED;
use winapi::um::combaseapi::{CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL};
use winapi::um::endpointvolume::IAudioEndpointVolume;
use winapi::um::mmdeviceapi::{
    eMultimedia, eRender, CLSID_MMDeviceEnumerator, IMMDevice, IMMDeviceEnumerator,
};
use winapi::um::objbase::COINIT_APARTMENTTHREADED;
use winapi::Interface;
use wio::com::ComPtr;

use crate::platform::{ReaderError, VolumeReader};

// HRESULT_FROM_WIN32(ERROR_NOT_FOUND): no default render endpoint exists.
const E_NOTFOUND: i32 = 0x8007_0490_u32 as i32;

/// Snapshots the default render endpoint's master volume scalar over COM.
/// Every COM pointer is scoped to a single query so repeated invocations
/// cannot leak handles.
pub struct EndpointReader;

impl EndpointReader {
    pub fn new() -> Result<EndpointReader, ReaderError> {
        Ok(EndpointReader)
    }
}

struct ComGuard;

impl ComGuard {
    fn new() -> Result<ComGuard, ReaderError> {
        // S_FALSE just means COM was already initialised on this thread.
        let hr = unsafe { CoInitializeEx(ptr::null_mut(), COINIT_APARTMENTTHREADED) };
        if FAILED(hr) {
            return Err(ReaderError::ActivationFailed(hr));
        }
        Ok(ComGuard)
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

impl VolumeReader for EndpointReader {
    fn read_current(&self) -> Result<f32, ReaderError> {
        let _com = ComGuard::new()?;

        let enumerator = unsafe {
            let mut raw = ptr::null_mut();
            let hr = CoCreateInstance(
                &CLSID_MMDeviceEnumerator,
                ptr::null_mut(),
                CLSCTX_ALL,
                &IMMDeviceEnumerator::uuidof(),
                &mut raw,
            );
            if FAILED(hr) {
                return Err(ReaderError::ActivationFailed(hr));
            }
            ComPtr::from_raw(raw as *mut IMMDeviceEnumerator)
        };

        let device = unsafe {
            let mut raw: *mut IMMDevice = ptr::null_mut();
            let hr = enumerator.GetDefaultAudioEndpoint(eRender, eMultimedia, &mut raw);
            if hr == E_NOTFOUND {
                return Err(ReaderError::NoDefaultDevice);
            }
            if FAILED(hr) {
                return Err(ReaderError::ActivationFailed(hr));
            }
            ComPtr::from_raw(raw)
        };

        let endpoint = unsafe {
            let mut raw = ptr::null_mut();
            let hr = device.Activate(
                &IAudioEndpointVolume::uuidof(),
                CLSCTX_ALL,
                ptr::null_mut(),
                &mut raw,
            );
            if FAILED(hr) {
                return Err(ReaderError::ActivationFailed(hr));
            }
            ComPtr::from_raw(raw as *mut IAudioEndpointVolume)
        };

        let mut fraction = 0.0f32;
        let hr = unsafe { endpoint.GetMasterVolumeLevelScalar(&mut fraction) };
        if FAILED(hr) {
            return Err(ReaderError::QueryFailed(hr));
        }
        Ok(fraction)
    }
}
