// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Read-only access to `HKEY_LOCAL_MACHINE`.

use crate::error::{LocatorError, Result};
use std::sync::Arc;

/// Which half of the WOW64 registry split to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryView {
    Registry32,
    Registry64,
}

pub trait RegistryReader: Send + Sync {
    /// Names of the direct subkeys of `HKLM\<path>`. A missing key has no
    /// subkeys.
    fn subkeys(&self, view: RegistryView, path: &str) -> Result<Vec<String>>;

    /// The string value `name` of `HKLM\<path>`, or `None` when the key or
    /// the value does not exist.
    fn string_value(&self, view: RegistryView, path: &str, name: &str) -> Result<Option<String>>;
}

/// The registry of the running system.
pub fn default_registry() -> Arc<dyn RegistryReader> {
    #[cfg(windows)]
    {
        Arc::new(windows_impl::WinRegistry)
    }

    #[cfg(not(windows))]
    {
        Arc::new(UnavailableRegistry)
    }
}

/// Stand-in used on platforms without a registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRegistry;

impl RegistryReader for UnavailableRegistry {
    fn subkeys(&self, _view: RegistryView, path: &str) -> Result<Vec<String>> {
        Err(LocatorError::RegistryUnavailable(format!(
            "cannot enumerate '{path}' on this platform"
        )))
    }

    fn string_value(&self, _view: RegistryView, path: &str, name: &str) -> Result<Option<String>> {
        Err(LocatorError::RegistryUnavailable(format!(
            "cannot read '{path}\\{name}' on this platform"
        )))
    }
}

#[cfg(windows)]
mod windows_impl {
    use super::RegistryView;
    use crate::error::{LocatorError, Result};
    use std::ffi::OsStr;
    use std::iter;
    use std::os::windows::ffi::OsStrExt;
    use std::ptr;
    use winapi::shared::minwindef::{DWORD, HKEY};
    use winapi::shared::winerror::{
        ERROR_FILE_NOT_FOUND, ERROR_NO_MORE_ITEMS, ERROR_PATH_NOT_FOUND, ERROR_SUCCESS,
    };
    use winapi::um::winnt::{KEY_READ, KEY_WOW64_32KEY, KEY_WOW64_64KEY, REG_EXPAND_SZ, REG_SZ};
    use winapi::um::winreg::{
        HKEY_LOCAL_MACHINE, RegCloseKey, RegEnumKeyExW, RegOpenKeyExW, RegQueryValueExW,
    };

    // Registry key names are limited to 255 characters
    const MAX_KEY_NAME: usize = 256;

    pub struct WinRegistry;

    struct OpenKey(HKEY);

    impl Drop for OpenKey {
        fn drop(&mut self) {
            unsafe {
                RegCloseKey(self.0);
            }
        }
    }

    fn to_wide(s: &str) -> Vec<u16> {
        OsStr::new(s).encode_wide().chain(iter::once(0)).collect()
    }

    fn wide_to_string(buffer: &[u16]) -> String {
        let terminator = buffer
            .iter()
            .position(|&ch| ch == 0)
            .unwrap_or(buffer.len());
        String::from_utf16_lossy(&buffer[..terminator])
    }

    fn is_missing(status: DWORD) -> bool {
        status == ERROR_FILE_NOT_FOUND || status == ERROR_PATH_NOT_FOUND
    }

    fn open(view: RegistryView, path: &str) -> Result<Option<OpenKey>> {
        let wide_path = to_wide(path);
        let access = KEY_READ
            | match view {
                RegistryView::Registry32 => KEY_WOW64_32KEY,
                RegistryView::Registry64 => KEY_WOW64_64KEY,
            };

        let mut hkey: HKEY = ptr::null_mut();
        let status =
            unsafe { RegOpenKeyExW(HKEY_LOCAL_MACHINE, wide_path.as_ptr(), 0, access, &mut hkey) }
                as DWORD;

        if status == ERROR_SUCCESS {
            Ok(Some(OpenKey(hkey)))
        } else if is_missing(status) {
            Ok(None)
        } else {
            Err(LocatorError::RegistryUnavailable(format!(
                "failed to open HKLM\\{path}: Win32 error {status}"
            )))
        }
    }

    impl super::RegistryReader for WinRegistry {
        fn subkeys(&self, view: RegistryView, path: &str) -> Result<Vec<String>> {
            let Some(key) = open(view, path)? else {
                return Ok(Vec::new());
            };

            let mut names = Vec::new();
            let mut index: DWORD = 0;
            loop {
                let mut name = [0u16; MAX_KEY_NAME];
                let mut name_len = MAX_KEY_NAME as DWORD;
                let status = unsafe {
                    RegEnumKeyExW(
                        key.0,
                        index,
                        name.as_mut_ptr(),
                        &mut name_len,
                        ptr::null_mut(),
                        ptr::null_mut(),
                        ptr::null_mut(),
                        ptr::null_mut(),
                    )
                } as DWORD;

                if status == ERROR_NO_MORE_ITEMS {
                    break;
                }
                if status != ERROR_SUCCESS {
                    return Err(LocatorError::RegistryUnavailable(format!(
                        "failed to enumerate HKLM\\{path}: Win32 error {status}"
                    )));
                }

                names.push(wide_to_string(&name[..name_len as usize]));
                index += 1;
            }

            Ok(names)
        }

        fn string_value(
            &self,
            view: RegistryView,
            path: &str,
            name: &str,
        ) -> Result<Option<String>> {
            let Some(key) = open(view, path)? else {
                return Ok(None);
            };
            let wide_name = to_wide(name);

            let mut value_type: DWORD = 0;
            let mut byte_len: DWORD = 0;
            let status = unsafe {
                RegQueryValueExW(
                    key.0,
                    wide_name.as_ptr(),
                    ptr::null_mut(),
                    &mut value_type,
                    ptr::null_mut(),
                    &mut byte_len,
                )
            } as DWORD;

            if is_missing(status) {
                return Ok(None);
            }
            if status != ERROR_SUCCESS {
                return Err(LocatorError::RegistryUnavailable(format!(
                    "failed to query HKLM\\{path}\\{name}: Win32 error {status}"
                )));
            }
            if value_type != REG_SZ && value_type != REG_EXPAND_SZ {
                return Ok(None);
            }

            let mut buffer = vec![0u16; (byte_len as usize).div_ceil(2) + 1];
            let status = unsafe {
                RegQueryValueExW(
                    key.0,
                    wide_name.as_ptr(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                    buffer.as_mut_ptr() as *mut u8,
                    &mut byte_len,
                )
            } as DWORD;

            if status != ERROR_SUCCESS {
                return Err(LocatorError::RegistryUnavailable(format!(
                    "failed to read HKLM\\{path}\\{name}: Win32 error {status}"
                )));
            }

            Ok(Some(wide_to_string(&buffer)))
        }
    }
}
