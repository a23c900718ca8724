//! Typed settings and their metadata.

use std::fmt::{self, Display};
use std::str::FromStr;

use parking_lot::Mutex;
use serde::Serialize;

use crate::cell::{LockFreeCell, LockedCell, SettingCell};
use crate::error::SettingsError;

/// Whether a setting may change after initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mutability {
    Immutable,
    Mutable,
}

/// Whether a setting accepts overrides from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommandLine {
    AcceptOverrides,
    RejectOverrides,
}

/// Values a setting can hold: cloneable, shareable, printable and parseable.
pub trait SettingValue: Clone + Send + Sync + Display + 'static {
    /// Parse a value from its textual form.
    fn parse_value(s: &str) -> Result<Self, String>;
}

impl<T> SettingValue for T
where
    T: Clone + Send + Sync + Display + FromStr + 'static,
    T::Err: Display,
{
    fn parse_value(s: &str) -> Result<Self, String> {
        s.parse().map_err(|e: T::Err| e.to_string())
    }
}

/// Descriptive part of a setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingMeta {
    pub project: String,
    pub name: String,
    pub type_name: &'static str,
    pub description: String,
    pub mutability: Mutability,
    pub command_line: CommandLine,
}

impl SettingMeta {
    /// Metadata for `project_name`, mutable and overridable by default.
    pub fn new(project: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            name: name.into(),
            type_name: "",
            description: String::new(),
            mutability: Mutability::Mutable,
            command_line: CommandLine::AcceptOverrides,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn mutability(mut self, mutability: Mutability) -> Self {
        self.mutability = mutability;
        self
    }

    #[must_use]
    pub fn command_line(mut self, command_line: CommandLine) -> Self {
        self.command_line = command_line;
        self
    }

    /// Globally unique name, `project_name`.
    pub fn full_name(&self) -> String {
        format!("{}_{}", self.project, self.name)
    }
}

const DEFAULT_REASON: &str = "default";

/// A named, typed setting whose value lives in the cell `C`.
pub struct Setting<T, C = LockedCell<T>> {
    meta: SettingMeta,
    default: T,
    cell: C,
    reason: Mutex<String>,
}

impl<T: SettingValue> Setting<T> {
    /// Setting backed by a reader-writer lock.
    pub fn locked(meta: SettingMeta, default: T) -> Self {
        let cell = LockedCell::new(default.clone());
        Self::with_cell(meta, default, cell)
    }
}

impl<T: SettingValue + Copy> Setting<T, LockFreeCell<T>> {
    /// Setting backed by an atomic cell.
    pub fn lock_free(meta: SettingMeta, default: T) -> Self {
        let cell = LockFreeCell::new(default);
        Self::with_cell(meta, default, cell)
    }
}

impl<T, C> Setting<T, C>
where
    T: SettingValue,
    C: SettingCell<T>,
{
    /// Setting backed by an arbitrary cell already holding `default`.
    pub fn with_cell(mut meta: SettingMeta, default: T, cell: C) -> Self {
        meta.type_name = std::any::type_name::<T>();
        Self {
            meta,
            default,
            cell,
            reason: Mutex::new(DEFAULT_REASON.to_string()),
        }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> T {
        self.cell.load()
    }

    /// Change the value at runtime. Immutable settings refuse.
    pub fn set(&self, value: T, reason: &str) -> Result<(), SettingsError> {
        if self.meta.mutability == Mutability::Immutable {
            return Err(SettingsError::Immutable(self.meta.full_name()));
        }
        self.store(value, reason);
        Ok(())
    }

    /// Restore the default value.
    pub fn reset(&self) {
        self.store(self.default.clone(), DEFAULT_REASON);
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn meta(&self) -> &SettingMeta {
        &self.meta
    }

    /// Why the current value was set: `"default"` until first changed.
    pub fn update_reason(&self) -> String {
        self.reason.lock().clone()
    }

    fn store(&self, value: T, reason: &str) {
        self.cell.store(value);
        *self.reason.lock() = reason.to_string();
        tracing::debug!(setting = %self.meta.full_name(), reason, "setting updated");
    }

    fn parse(&self, value: &str) -> Result<T, SettingsError> {
        T::parse_value(value).map_err(|reason| SettingsError::InvalidValue {
            name: self.meta.full_name(),
            value: value.to_string(),
            reason,
        })
    }

    fn parse_override(&self, value: &str) -> Result<T, SettingsError> {
        if self.meta.command_line == CommandLine::RejectOverrides {
            return Err(SettingsError::OverrideRejected(self.meta.full_name()));
        }
        self.parse(value)
    }
}

impl<T, C> fmt::Debug for Setting<T, C>
where
    T: SettingValue,
    C: SettingCell<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("name", &self.meta.full_name())
            .field("default", &self.default.to_string())
            .field("current", &self.get().to_string())
            .finish_non_exhaustive()
    }
}

/// Type-erased view of a setting, as held by the registry.
pub trait SettingHandle: Send + Sync {
    fn meta(&self) -> &SettingMeta;

    /// Current value rendered as text.
    fn current_string(&self) -> String;

    /// Default value rendered as text.
    fn default_string(&self) -> String;

    fn update_reason(&self) -> String;

    /// Parse and set, honoring mutability.
    fn set_from_str(&self, value: &str, reason: &str) -> Result<(), SettingsError>;

    /// Check that a command-line override would be accepted, without
    /// applying it.
    fn check_override(&self, value: &str) -> Result<(), SettingsError>;

    /// Parse and set a command-line override, honoring the override policy.
    fn apply_override(&self, value: &str) -> Result<(), SettingsError>;

    fn reset(&self);
}

impl<T, C> SettingHandle for Setting<T, C>
where
    T: SettingValue,
    C: SettingCell<T>,
{
    fn meta(&self) -> &SettingMeta {
        &self.meta
    }

    fn current_string(&self) -> String {
        self.get().to_string()
    }

    fn default_string(&self) -> String {
        self.default.to_string()
    }

    fn update_reason(&self) -> String {
        Setting::update_reason(self)
    }

    fn set_from_str(&self, value: &str, reason: &str) -> Result<(), SettingsError> {
        let parsed = self.parse(value)?;
        self.set(parsed, reason)
    }

    fn check_override(&self, value: &str) -> Result<(), SettingsError> {
        self.parse_override(value).map(drop)
    }

    fn apply_override(&self, value: &str) -> Result<(), SettingsError> {
        let parsed = self.parse_override(value)?;
        self.store(parsed, "command line");
        Ok(())
    }

    fn reset(&self) {
        Setting::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> SettingMeta {
        SettingMeta::new("demo", "trivial").description("desc")
    }

    #[test]
    fn full_name_joins_project() {
        assert_eq!(meta().full_name(), "demo_trivial");
    }

    #[test]
    fn defaults_and_type_name() {
        let s = Setting::locked(meta(), 100i64);
        assert_eq!(s.get(), 100);
        assert_eq!(*s.default_value(), 100);
        assert_eq!(s.meta().type_name, "i64");
        assert_eq!(s.update_reason(), "default");
    }

    #[test]
    fn set_and_reset() {
        let s = Setting::lock_free(meta(), 100i64);
        s.set(5, "test").unwrap();
        assert_eq!(s.get(), 5);
        assert_eq!(s.update_reason(), "test");
        s.reset();
        assert_eq!(s.get(), 100);
        assert_eq!(s.update_reason(), "default");
    }

    #[test]
    fn immutable_refuses_set() {
        let s = Setting::locked(meta().mutability(Mutability::Immutable), 1i64);
        assert!(matches!(s.set(2, "x"), Err(SettingsError::Immutable(_))));
        assert_eq!(s.get(), 1);
    }

    #[test]
    fn immutable_accepts_override() {
        let s = Setting::locked(meta().mutability(Mutability::Immutable), 1i64);
        s.apply_override("7").unwrap();
        assert_eq!(s.get(), 7);
        assert_eq!(s.update_reason(), "command line");
    }

    #[test]
    fn rejected_override() {
        let s = Setting::locked(meta().command_line(CommandLine::RejectOverrides), 1i64);
        assert!(matches!(
            s.apply_override("2"),
            Err(SettingsError::OverrideRejected(_))
        ));
        // Runtime updates are still allowed.
        s.set_from_str("3", "runtime").unwrap();
        assert_eq!(s.get(), 3);
    }

    #[test]
    fn check_override_leaves_value() {
        let s = Setting::locked(meta(), 1i64);
        s.check_override("9").unwrap();
        assert_eq!(s.get(), 1);
        assert_eq!(s.update_reason(), "default");
        assert!(s.check_override("nine").is_err());

        let rejecting = Setting::locked(meta().command_line(CommandLine::RejectOverrides), 1i64);
        assert!(matches!(
            rejecting.check_override("2"),
            Err(SettingsError::OverrideRejected(_))
        ));
    }

    #[test]
    fn parse_failure_reports_value() {
        let s = Setting::locked(meta(), 1i64);
        let err = s.set_from_str("abc", "x").unwrap_err();
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn debug_shows_name_and_values() {
        let s = Setting::locked(meta(), 100i64);
        s.set(5, "test").unwrap();
        let text = format!("{s:?}");
        assert!(text.starts_with("Setting"));
        assert!(text.contains("demo_trivial"));
        assert!(text.contains("\"100\""));
        assert!(text.contains("\"5\""));
    }

    #[test]
    fn string_setting() {
        let s = Setting::locked(
            SettingMeta::new("demo", "non_trivial"),
            String::from("default"),
        );
        assert_eq!(s.current_string(), "default");
        s.set_from_str("other", "x").unwrap();
        assert_eq!(s.get(), "other");
        assert_eq!(s.default_string(), "default");
    }
}
