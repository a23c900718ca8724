//! Explicit registry of declared settings.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::cell::SettingCell;
use crate::error::SettingsError;
use crate::setting::{CommandLine, Mutability, Setting, SettingHandle, SettingValue};

/// Snapshot of one declared setting, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct SettingInfo {
    pub full_name: String,
    pub type_name: &'static str,
    pub current: String,
    pub default: String,
    pub reason: String,
    pub description: String,
    pub mutability: Mutability,
    pub command_line: CommandLine,
}

/// Maps full setting names to their declarations.
///
/// Populated by explicit [`declare`](Self::declare) calls at program start;
/// command-line overrides are applied once through [`init`](Self::init).
#[derive(Default)]
pub struct SettingsRegistry {
    settings: RwLock<BTreeMap<String, Arc<dyn SettingHandle>>>,
    initialized: AtomicBool,
}

impl SettingsRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a setting and return a typed handle for reading it.
    pub fn declare<T, C>(
        &self,
        setting: Setting<T, C>,
    ) -> Result<Arc<Setting<T, C>>, SettingsError>
    where
        T: SettingValue,
        C: SettingCell<T> + 'static,
    {
        let full_name = setting.meta().full_name();
        let setting = Arc::new(setting);
        let mut settings = self.settings.write();
        if settings.contains_key(&full_name) {
            return Err(SettingsError::AlreadyDeclared(full_name));
        }
        let handle: Arc<dyn SettingHandle> = setting.clone();
        settings.insert(full_name.clone(), handle);
        tracing::debug!(setting = %full_name, "declared setting");
        Ok(setting)
    }

    /// Look up a setting by full name.
    pub fn lookup(&self, full_name: &str) -> Option<Arc<dyn SettingHandle>> {
        self.settings.read().get(full_name).map(Arc::clone)
    }

    /// Apply `project_name=value` overrides. May only be called once.
    ///
    /// Every override is parsed and checked before any is applied, so a bad
    /// override leaves all settings untouched and the registry uninitialized.
    /// Returns the number of overrides applied.
    pub fn init<S: AsRef<str>>(&self, overrides: &[S]) -> Result<usize, SettingsError> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(SettingsError::AlreadyInitialized);
        }
        let pending = match self.resolve_overrides(overrides) {
            Ok(pending) => pending,
            Err(err) => {
                self.initialized.store(false, Ordering::SeqCst);
                return Err(err);
            }
        };
        for PendingOverride {
            name,
            value,
            setting,
        } in &pending
        {
            setting.apply_override(value)?;
            tracing::info!(setting = *name, value = *value, "applied command-line override");
        }
        Ok(pending.len())
    }

    fn resolve_overrides<'a, S: AsRef<str>>(
        &self,
        overrides: &'a [S],
    ) -> Result<Vec<PendingOverride<'a>>, SettingsError> {
        overrides
            .iter()
            .map(|raw| -> Result<PendingOverride<'a>, SettingsError> {
                let (name, value) = parse_override(raw.as_ref())?;
                let setting = self
                    .lookup(name)
                    .ok_or_else(|| SettingsError::Unknown(name.to_string()))?;
                setting.check_override(value)?;
                Ok(PendingOverride {
                    name,
                    value,
                    setting,
                })
            })
            .collect()
    }

    /// Whether [`init`](Self::init) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Parse and set a value at runtime, honoring mutability.
    pub fn set_from_str(
        &self,
        full_name: &str,
        value: &str,
        reason: &str,
    ) -> Result<(), SettingsError> {
        let setting = self
            .lookup(full_name)
            .ok_or_else(|| SettingsError::Unknown(full_name.to_string()))?;
        setting.set_from_str(value, reason)
    }

    /// Restore every setting to its default.
    pub fn reset_all(&self) {
        for setting in self.settings.read().values() {
            setting.reset();
        }
    }

    /// Describe every setting, sorted by full name.
    pub fn list(&self) -> Vec<SettingInfo> {
        self.settings
            .read()
            .iter()
            .map(|(full_name, setting)| {
                let meta = setting.meta();
                SettingInfo {
                    full_name: full_name.clone(),
                    type_name: meta.type_name,
                    current: setting.current_string(),
                    default: setting.default_string(),
                    reason: setting.update_reason(),
                    description: meta.description.clone(),
                    mutability: meta.mutability,
                    command_line: meta.command_line,
                }
            })
            .collect()
    }

    /// Current value of every setting as `(full_name, value)`.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.settings
            .read()
            .iter()
            .map(|(full_name, setting)| (full_name.clone(), setting.current_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.settings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.read().is_empty()
    }
}

/// An override that parsed and passed its setting's checks.
struct PendingOverride<'a> {
    name: &'a str,
    value: &'a str,
    setting: Arc<dyn SettingHandle>,
}

/// Split `project_name=value`; the value may itself contain `=`.
fn parse_override(raw: &str) -> Result<(&str, &str), SettingsError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(SettingsError::MalformedOverride(raw.to_string())),
    }
}
