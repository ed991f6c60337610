use crate::error::LocatorError;

pub fn get_exit_code(error: &LocatorError) -> i32 {
    match error {
        LocatorError::InvalidVersionFormat(_) | LocatorError::ConfigError(_) => 2,

        LocatorError::CurrentJvmUnavailable(_) => 3,

        _ => 1,
    }
}
