//! Error classification and exit codes.

use setbench_core::constants::exit_codes;
use setbench_core::BenchError;
use setbench_settings::SettingsError;

/// Map a failed run to its process exit code.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let code = if err.downcast_ref::<SettingsError>().is_some() {
        exit_codes::ERROR_CONFIG
    } else {
        match err.downcast_ref::<BenchError>() {
            Some(BenchError::InvalidOption(_) | BenchError::NoMatch(_)) => exit_codes::ERROR_CONFIG,
            _ => exit_codes::ERROR_GENERIC,
        }
    };
    u8::try_from(code).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_errors_are_config_errors() {
        let err = anyhow::Error::new(SettingsError::Unknown("x_y".into()));
        assert_eq!(exit_code(&err), 4);
    }

    #[test]
    fn invalid_options_are_config_errors() {
        let err = anyhow::Error::new(BenchError::InvalidOption("epochs".into()));
        assert_eq!(exit_code(&err), 4);
        let err = anyhow::Error::new(BenchError::NoMatch("zzz".into()));
        assert_eq!(exit_code(&err), 4);
    }

    #[test]
    fn other_errors_are_generic() {
        let err = anyhow::Error::new(BenchError::DuplicateCase("a".into()));
        assert_eq!(exit_code(&err), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("io failure")), 1);
    }
}
