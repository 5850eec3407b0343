//! Key event synthesis through `SendInput`

use std::io;

use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_KEYBOARD, KEYBD_EVENT_FLAGS, KEYBDINPUT, KEYEVENTF_KEYUP,
    KEYEVENTF_UNICODE, MAPVK_VK_TO_VSC, MapVirtualKeyW, SendInput, VIRTUAL_KEY, VkKeyScanW,
};

use crate::input::{InputError, KeySink};

/// Injects key events into whatever window has focus
///
/// Holds no OS handle; every call is a self-contained `SendInput`.
#[derive(Debug, Default)]
pub struct SendInputSink;

impl SendInputSink {
    fn send(&self, key: char, release: bool) -> Result<(), InputError> {
        let inputs = key_inputs(key, release);
        let sent = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };

        if sent as usize == inputs.len() {
            Ok(())
        } else {
            Err(InputError::Rejected {
                key,
                source: io::Error::last_os_error(),
            })
        }
    }
}

impl KeySink for SendInputSink {
    fn key_down(&mut self, key: char) -> Result<(), InputError> {
        self.send(key, false)
    }

    fn key_up(&mut self, key: char) -> Result<(), InputError> {
        self.send(key, true)
    }
}

/// Virtual key for `key` when it is typed without any modifier
///
/// Characters needing Shift or AltGr, or absent from the active layout,
/// return None and go through as Unicode input instead.
fn unmodified_virtual_key(key: char) -> Option<u16> {
    let mut units = [0u16; 2];
    let [unit] = key.encode_utf16(&mut units) else {
        return None;
    };

    let scan = unsafe { VkKeyScanW(*unit) } as u16;
    // High byte holds the shift state; 0xFFFF means "no key"
    if scan >> 8 == 0 { Some(scan & 0xFF) } else { None }
}

fn key_inputs(key: char, release: bool) -> Vec<INPUT> {
    let up = if release { KEYEVENTF_KEYUP } else { KEYBD_EVENT_FLAGS(0) };

    match unmodified_virtual_key(key) {
        Some(vk) => {
            let scan = unsafe { MapVirtualKeyW(vk as u32, MAPVK_VK_TO_VSC) } as u16;
            vec![keyboard_input(VIRTUAL_KEY(vk), scan, up)]
        }
        None => {
            let mut units = [0u16; 2];
            key.encode_utf16(&mut units)
                .iter()
                .map(|&unit| keyboard_input(VIRTUAL_KEY(0), unit, KEYEVENTF_UNICODE | up))
                .collect()
        }
    }
}

fn keyboard_input(vk: VIRTUAL_KEY, scan: u16, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn astral_characters_become_two_unicode_events() {
        let inputs = key_inputs('🎹', false);
        assert_eq!(inputs.len(), 2);
        for input in &inputs {
            let ki = unsafe { input.Anonymous.ki };
            assert_eq!(ki.wVk, VIRTUAL_KEY(0));
            assert_eq!(ki.dwFlags, KEYEVENTF_UNICODE);
        }
    }

    #[test]
    fn release_sets_keyup_flag() {
        let inputs = key_inputs('🎹', true);
        let ki = unsafe { inputs[0].Anonymous.ki };
        assert_eq!(ki.dwFlags, KEYEVENTF_UNICODE | KEYEVENTF_KEYUP);
    }
}
