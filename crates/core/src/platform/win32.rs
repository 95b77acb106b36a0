use std::ffi::c_void;
use std::process::{Command as ProcessCommand, Stdio};

use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
};
use windows::Win32::System::Console::GetConsoleWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextW, SetWindowPos, HWND_TOP, MONITORINFOF_PRIMARY, SWP_NOZORDER,
    SWP_SHOWWINDOW,
};

use crate::error::LaunchError;
use crate::logger;
use crate::script::encode_powershell;
use crate::types::*;
use super::Platform;

/// Native backend: Win32 enumeration and placement, Windows Terminal (`wt`)
/// for new windows and tabs, PowerShell for the picker.
pub struct Win32Platform;

fn to_hwnd(id: WindowId) -> HWND {
    HWND(id as usize as *mut c_void)
}

fn to_id(hwnd: HWND) -> WindowId {
    hwnd.0 as usize as WindowId
}

unsafe extern "system" fn collect_monitor(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    data: LPARAM,
) -> BOOL {
    let monitors = &mut *(data.0 as *mut Vec<Monitor>);

    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;
    if GetMonitorInfoW(hmonitor, &mut info as *mut MONITORINFOEXW as *mut MONITORINFO).as_bool() {
        let r = info.monitorInfo.rcMonitor;
        let len = info.szDevice.iter().position(|&c| c == 0).unwrap_or(info.szDevice.len());
        monitors.push(Monitor {
            name: String::from_utf16_lossy(&info.szDevice[..len]),
            x: r.left,
            y: r.top,
            width: r.right - r.left,
            height: r.bottom - r.top,
            primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
        });
    }
    BOOL(1)
}

unsafe extern "system" fn collect_window(hwnd: HWND, data: LPARAM) -> BOOL {
    let windows = &mut *(data.0 as *mut Vec<(WindowId, String)>);

    let mut buf = [0u16; 256];
    let len = GetWindowTextW(hwnd, &mut buf);
    if len > 0 {
        windows.push((to_id(hwnd), String::from_utf16_lossy(&buf[..len as usize])));
    }
    BOOL(1)
}

impl Platform for Win32Platform {
    fn monitors(&self) -> Result<Vec<Monitor>, LaunchError> {
        let mut monitors: Vec<Monitor> = Vec::new();
        let ok = unsafe {
            EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(collect_monitor),
                LPARAM(&mut monitors as *mut Vec<Monitor> as isize),
            )
        };
        if !ok.as_bool() {
            return Err(LaunchError::DetectionFailed(format!(
                "EnumDisplayMonitors failed: {}",
                windows::core::Error::from_win32()
            )));
        }
        Ok(monitors)
    }

    fn windows(&self) -> Vec<(WindowId, String)> {
        let mut windows: Vec<(WindowId, String)> = Vec::new();
        let res = unsafe {
            EnumWindows(
                Some(collect_window),
                LPARAM(&mut windows as *mut Vec<(WindowId, String)> as isize),
            )
        };
        if let Err(e) = res {
            logger::warn_p("win32", &format!("EnumWindows failed: {}", e));
        }
        windows
    }

    fn set_bounds(&self, window: WindowId, rect: Rect) -> Result<(), LaunchError> {
        unsafe {
            SetWindowPos(
                to_hwnd(window),
                HWND_TOP,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOZORDER | SWP_SHOWWINDOW,
            )
        }
        .map_err(|e| LaunchError::PositionFailed(format!("SetWindowPos failed: {}", e)))
    }

    fn current_window(&self) -> Option<WindowId> {
        let hwnd = unsafe { GetConsoleWindow() };
        if hwnd.0.is_null() {
            None
        } else {
            Some(to_id(hwnd))
        }
    }

    fn spawn_terminal(&self, title: &str, working_dir: &str, script: &str) -> Result<(), LaunchError> {
        let encoded = encode_powershell(script);
        ProcessCommand::new("wt")
            .args(["--title", title, "-d", working_dir])
            .args(["powershell", "-NoExit", "-EncodedCommand", &encoded])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| LaunchError::DispatchFailed(e.to_string()))
    }

    fn open_tab(&self, working_dir: &str, script: &str) -> Result<(), LaunchError> {
        let encoded = encode_powershell(script);
        ProcessCommand::new("wt")
            .args(["-w", "0", "new-tab", "-d", working_dir])
            .args(["powershell", "-NoExit", "-EncodedCommand", &encoded])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| LaunchError::DispatchFailed(e.to_string()))
    }

    fn run_script(&self, script: &str) -> Result<(), LaunchError> {
        let encoded = encode_powershell(script);
        let status = ProcessCommand::new("powershell")
            .args(["-EncodedCommand", &encoded])
            .status()
            .map_err(|e| LaunchError::PickerFailed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::PickerFailed(format!("powershell exited with {}", status)))
        }
    }
}
