//! Win32 notification area: a hidden window plus a `Shell_NotifyIconW` balloon

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::mem;
use std::ptr;

use windows_sys::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_INFO, NIF_MESSAGE, NIF_TIP, NIIF_USER, NIM_ADD,
    NIM_DELETE, NIM_MODIFY, NIN_BALLOONHIDE, NIN_BALLOONTIMEOUT, NIN_BALLOONUSERCLICK,
    NOTIFYICONDATAW,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW, LoadIconW,
    PostQuitMessage, RegisterClassExW, TranslateMessage, UnregisterClassW, CW_USEDEFAULT,
    HICON, IDI_APPLICATION, MSG, WM_DESTROY, WNDCLASSEXW, WS_OVERLAPPED, WS_SYSMENU,
};

use super::{NotifyShell, ShellEvent, NOTIFY_CALLBACK_ID};
use crate::error::{Error, Result, TextField};
use crate::request::NotificationRequest;

const CLASS_NAME: &str = "bugme_notify_class";
const WINDOW_NAME: &str = "bugme";

thread_local! {
    /// Events the window procedure has translated but the loop has not consumed.
    /// Only the thread that created the window ever touches it.
    static INBOX: RefCell<VecDeque<ShellEvent>> = const { RefCell::new(VecDeque::new()) };
}

pub struct Win32Window {
    hwnd: HWND,
    instance: HINSTANCE,
}

pub struct Win32Icon {
    data: NOTIFYICONDATAW,
}

pub struct Win32Shell {
    class_name: Vec<u16>,
}

impl Win32Shell {
    pub fn new() -> Self {
        INBOX.with(|inbox| inbox.borrow_mut().clear());
        Self {
            class_name: wide(CLASS_NAME),
        }
    }
}

impl Drop for Win32Shell {
    fn drop(&mut self) {
        INBOX.with(|inbox| inbox.borrow_mut().clear());
    }
}

/// NUL-terminated UTF-16 copy of `s`
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Copy `text` into a fixed UTF-16 buffer, failing rather than truncating
fn copy_wide(dst: &mut [u16], text: &str, field: TextField) -> Result<()> {
    let encoded: Vec<u16> = text.encode_utf16().collect();
    if encoded.len() >= dst.len() {
        return Err(Error::ArgumentTooLong {
            field,
            limit: dst.len() - 1,
            len: encoded.len(),
        });
    }
    dst[..encoded.len()].copy_from_slice(&encoded);
    dst[encoded.len()] = 0;
    Ok(())
}

/// The stock application icon; the executable embeds no icon resource
fn load_icon() -> Result<HICON> {
    let icon = unsafe { LoadIconW(ptr::null_mut(), IDI_APPLICATION) };
    if icon.is_null() {
        return Err(Error::PlatformIconCreateFailed(io::Error::last_os_error()));
    }
    Ok(icon)
}

fn translate(message: u32, lparam: LPARAM) -> Option<ShellEvent> {
    match message {
        NOTIFY_CALLBACK_ID => Some(match (lparam as u32) & 0xFFFF {
            NIN_BALLOONTIMEOUT => ShellEvent::BalloonTimeout,
            NIN_BALLOONHIDE => ShellEvent::BalloonHidden,
            NIN_BALLOONUSERCLICK => ShellEvent::BalloonClicked,
            _ => ShellEvent::Other,
        }),
        WM_DESTROY => Some(ShellEvent::WindowDestroyed),
        _ => None,
    }
}

unsafe extern "system" fn window_procedure(
    hwnd: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match translate(message, lparam) {
        Some(event) => {
            INBOX.with(|inbox| inbox.borrow_mut().push_back(event));
            0
        }
        None => unsafe { DefWindowProcW(hwnd, message, wparam, lparam) },
    }
}

impl NotifyShell for Win32Shell {
    type Window = Win32Window;
    type Icon = Win32Icon;

    fn register_window(&mut self) -> Result<Win32Window> {
        let window_name = wide(WINDOW_NAME);
        unsafe {
            let instance = GetModuleHandleW(ptr::null());

            let mut class_info: WNDCLASSEXW = mem::zeroed();
            class_info.cbSize = mem::size_of::<WNDCLASSEXW>() as u32;
            class_info.hInstance = instance;
            class_info.lpszClassName = self.class_name.as_ptr();
            class_info.lpfnWndProc = Some(window_procedure);

            if RegisterClassExW(&class_info) == 0 {
                return Err(Error::PlatformRegistrationFailed(io::Error::last_os_error()));
            }

            let hwnd = CreateWindowExW(
                0,
                self.class_name.as_ptr(),
                window_name.as_ptr(),
                WS_OVERLAPPED | WS_SYSMENU,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                ptr::null_mut(),
                ptr::null_mut(),
                instance,
                ptr::null(),
            );
            if hwnd.is_null() {
                let err = io::Error::last_os_error();
                UnregisterClassW(self.class_name.as_ptr(), instance);
                return Err(Error::PlatformRegistrationFailed(err));
            }

            Ok(Win32Window { hwnd, instance })
        }
    }

    fn add_icon(&mut self, window: &Win32Window, callback_id: u32, tooltip: &str) -> Result<Win32Icon> {
        let icon = load_icon()?;
        unsafe {
            let mut data: NOTIFYICONDATAW = mem::zeroed();
            data.cbSize = mem::size_of::<NOTIFYICONDATAW>() as u32;
            data.hWnd = window.hwnd;
            data.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
            data.uCallbackMessage = callback_id;
            data.hIcon = icon;
            copy_wide(&mut data.szTip, tooltip, TextField::Tooltip)?;

            if Shell_NotifyIconW(NIM_ADD, &data) == 0 {
                return Err(Error::PlatformIconCreateFailed(io::Error::last_os_error()));
            }
            Ok(Win32Icon { data })
        }
    }

    fn publish(&mut self, icon: &mut Win32Icon, request: &NotificationRequest) -> Result<()> {
        let data = &mut icon.data;
        data.uFlags = NIF_INFO;
        data.dwInfoFlags = NIIF_USER;
        copy_wide(&mut data.szInfo, request.message.as_str(), TextField::Message)?;
        copy_wide(&mut data.szInfoTitle, request.title.as_str(), TextField::Title)?;

        if unsafe { Shell_NotifyIconW(NIM_MODIFY, &*data) } == 0 {
            return Err(Error::PlatformPublishFailed(io::Error::last_os_error()));
        }
        Ok(())
    }

    fn remove_icon(&mut self, icon: Win32Icon) {
        let mut data: NOTIFYICONDATAW = unsafe { mem::zeroed() };
        data.cbSize = mem::size_of::<NOTIFYICONDATAW>() as u32;
        data.hWnd = icon.data.hWnd;
        data.uID = icon.data.uID;
        if unsafe { Shell_NotifyIconW(NIM_DELETE, &data) } == 0 {
            tracing::warn!(error = %io::Error::last_os_error(), "Failed to remove status-area icon");
        }
    }

    fn release_window(&mut self, window: Win32Window) {
        unsafe {
            if DestroyWindow(window.hwnd) == 0 {
                tracing::warn!(error = %io::Error::last_os_error(), "Failed to destroy window");
            }
            UnregisterClassW(self.class_name.as_ptr(), window.instance);
        }
    }

    fn next_event(&mut self) -> Result<ShellEvent> {
        loop {
            if let Some(event) = INBOX.with(|inbox| inbox.borrow_mut().pop_front()) {
                return Ok(event);
            }

            let mut message: MSG = unsafe { mem::zeroed() };
            match unsafe { GetMessageW(&mut message, ptr::null_mut(), 0, 0) } {
                -1 => return Err(Error::EventQueueFailure(io::Error::last_os_error())),
                0 => return Ok(ShellEvent::Stop(message.wParam as i32)),
                _ => unsafe {
                    TranslateMessage(&message);
                    DispatchMessageW(&message);
                },
            }
        }
    }

    fn request_stop(&mut self, code: i32) {
        unsafe { PostQuitMessage(code) };
    }
}
