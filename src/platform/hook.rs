//! Background cancel-key listener
//!
//! A dedicated thread installs a low-level keyboard hook and pumps messages
//! for it. Critical threading requirements:
//! - Hook callback runs on the listener thread, NOT the playback thread
//! - Hook only sets the cancel flag, it never blocks or consumes keys
//! - Only one listener may be installed at a time

use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, KBDLLHOOKSTRUCT, MSG, PM_NOREMOVE,
    PeekMessageW, PostQuitMessage, PostThreadMessageW, SetWindowsHookExW, TranslateMessage,
    UnhookWindowsHookEx, WH_KEYBOARD_LL, WM_KEYDOWN, WM_QUIT, WM_SYSKEYDOWN,
};
use windows::core::PCWSTR;

use crate::input::{CancelFlag, CancelKey, ListenerError};

/// What the hook procedure reacts to
///
/// A hook procedure cannot capture state, so the active listener is
/// published here for the lifetime of its thread.
struct ActiveListener {
    key: CancelKey,
    flag: CancelFlag,
}

static ACTIVE_LISTENER: Mutex<Option<ActiveListener>> = Mutex::new(None);

fn clear_active_listener() {
    if let Ok(mut slot) = ACTIVE_LISTENER.lock() {
        *slot = None;
    }
}

/// Installed keyboard hook with its message-loop thread
///
/// Dropping the hook stops the thread and removes the hook.
#[derive(Debug)]
pub struct KeyboardHook {
    thread_id: u32,
    thread_handle: Option<JoinHandle<()>>,
}

impl KeyboardHook {
    /// Installs the hook and waits until it is live
    pub fn install(key: CancelKey, flag: CancelFlag) -> Result<Self, ListenerError> {
        {
            let mut slot = ACTIVE_LISTENER
                .lock()
                .map_err(|_| ListenerError::HookInstallFailed)?;
            if slot.is_some() {
                return Err(ListenerError::AlreadyActive);
            }
            *slot = Some(ActiveListener { key, flag });
        }

        let (ready_tx, ready_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("cancel-listener".to_string())
            .spawn(move || message_loop(ready_tx))
            .map_err(|err| {
                clear_active_listener();
                ListenerError::ThreadSpawnFailed(err)
            })?;

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => Ok(Self {
                thread_id,
                thread_handle: Some(handle),
            }),
            Ok(Err(err)) => {
                let _ = handle.join();
                clear_active_listener();
                Err(err)
            }
            Err(_) => {
                let _ = handle.join();
                clear_active_listener();
                Err(ListenerError::HookInstallFailed)
            }
        }
    }

    /// Stops listening; a no-op when already stopped
    pub fn stop(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            // Fails harmlessly when the thread already quit on the cancel key
            let _ = unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) };
            let _ = handle.join();
            clear_active_listener();
        }
    }

    #[cfg(test)]
    pub fn is_listening(&self) -> bool {
        self.thread_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for KeyboardHook {
    fn drop(&mut self) {
        // Guaranteed cleanup
        self.stop();
    }
}

/// Listener thread body: install, report readiness, pump until WM_QUIT
fn message_loop(ready: Sender<Result<u32, ListenerError>>) {
    let mut msg = MSG::default();

    // Force creation of this thread's message queue so WM_QUIT can be posted
    let _ = unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE) };

    let hook = unsafe {
        GetModuleHandleW(PCWSTR::null()).and_then(|module| {
            SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), module, 0)
        })
    };
    let hook = match hook {
        Ok(hook) => hook,
        Err(_) => {
            let _ = ready.send(Err(ListenerError::HookInstallFailed));
            return;
        }
    };

    let _ = ready.send(Ok(unsafe { GetCurrentThreadId() }));

    loop {
        let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        // 0 is WM_QUIT, -1 is an error
        if result.0 == 0 || result.0 == -1 {
            break;
        }
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    let _ = unsafe { UnhookWindowsHookEx(hook) };
}

/// Low-level keyboard hook procedure
///
/// Must always call CallNextHookEx so other applications keep seeing keys.
unsafe extern "system" fn keyboard_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let is_key_down = wparam.0 == WM_KEYDOWN as usize || wparam.0 == WM_SYSKEYDOWN as usize;

    if code >= 0 && is_key_down {
        let vk_code = unsafe { (*(lparam.0 as *const KBDLLHOOKSTRUCT)).vkCode };

        if let Ok(slot) = ACTIVE_LISTENER.lock() {
            if let Some(active) = slot.as_ref() {
                if vk_code == active.key.vk_code() {
                    active.flag.cancel();
                    unsafe { PostQuitMessage(0) };
                }
            }
        }
    }

    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}
