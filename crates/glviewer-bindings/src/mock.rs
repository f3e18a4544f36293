//! In-memory test doubles.
//!
//! [`MockProgram`] stores uniform values in a map and [`RecordingHost`]
//! records every call the registry makes, so registration and event handling
//! can be asserted without a GPU or a window.

use std::collections::HashMap;

use crate::error::UniformError;
use crate::host::{ScreenSize, Subscription, WindowHost};
use crate::program::UniformProgram;
use crate::uniform::{UniformKind, UniformSet, UniformValue};

/// A program whose uniforms live in host memory.
#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    declared: UniformSet,
    values: HashMap<String, UniformValue>,
    writes: usize,
}

impl MockProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` with a zero initial value.
    pub fn with_uniform(mut self, name: &str, kind: UniformKind) -> Self {
        self.declared.insert(name, kind);
        if let Some(zero) = UniformValue::zero(kind) {
            self.values.insert(name.to_string(), zero);
        }
        self
    }

    /// Declares `name` with the kind of `value` and `value` as its initial value.
    pub fn with_value(mut self, name: &str, value: UniformValue) -> Self {
        self.declared.insert(name, value.kind());
        self.values.insert(name.to_string(), value);
        self
    }

    /// Number of successful `set_uniform` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl UniformProgram for MockProgram {
    fn declared_uniforms(&self) -> &UniformSet {
        &self.declared
    }

    fn uniform_value(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), UniformError> {
        let declared = self.declared.kind(name).ok_or_else(|| UniformError::Unknown {
            name: name.to_string(),
        })?;
        if declared != value.kind() {
            return Err(UniformError::KindMismatch {
                name: name.to_string(),
                declared,
                written: value.kind(),
            });
        }
        self.values.insert(name.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

/// A call made on a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Subscribe(Subscription),
    SetExclusivePointer(bool),
}

/// A window that records calls instead of acting on them.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub screen: ScreenSize,
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn with_screen(width: u32, height: u32) -> Self {
        Self {
            screen: ScreenSize::new(width, height),
            calls: Vec::new(),
        }
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = &Subscription> {
        self.calls.iter().filter_map(|call| match call {
            HostCall::Subscribe(s) => Some(s),
            HostCall::SetExclusivePointer(_) => None,
        })
    }

    /// Whether exclusive capture is on after replaying all calls.
    pub fn pointer_captured(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|call| match call {
                HostCall::SetExclusivePointer(enabled) => Some(*enabled),
                HostCall::Subscribe(_) => None,
            })
            .unwrap_or(false)
    }
}

impl WindowHost for RecordingHost {
    fn subscribe(&mut self, subscription: Subscription) {
        self.calls.push(HostCall::Subscribe(subscription));
    }

    fn set_exclusive_pointer(&mut self, enabled: bool) {
        self.calls.push(HostCall::SetExclusivePointer(enabled));
    }

    fn screen_size(&self) -> ScreenSize {
        self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_undeclared_writes() {
        let mut p = MockProgram::new();
        let err = p.set_uniform("time", UniformValue::Float(1.0)).unwrap_err();
        assert_eq!(err, UniformError::Unknown { name: "time".into() });
        assert_eq!(p.writes(), 0);
    }

    #[test]
    fn rejects_kind_mismatch() {
        let mut p = MockProgram::new().with_uniform("mouse", UniformKind::Vec2);
        assert!(matches!(
            p.set_uniform("mouse", UniformValue::Float(1.0)),
            Err(UniformError::KindMismatch { .. })
        ));
    }

    #[test]
    fn opaque_uniforms_have_no_value() {
        let p = MockProgram::new().with_uniform("palette", UniformKind::Other);
        assert!(p.has_uniform("palette"));
        assert_eq!(p.uniform_value("palette"), None);
    }
}
