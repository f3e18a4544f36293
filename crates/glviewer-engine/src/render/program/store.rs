use glviewer_bindings::{UniformError, UniformKind, UniformSet, UniformValue};

use super::reflect::UniformDecl;

#[derive(Debug)]
struct Slot {
    name: String,
    kind: UniformKind,
    value: Option<UniformValue>,
    dirty: bool,
}

/// Host-side uniform values with per-slot dirty tracking.
///
/// Slot order follows the declarations it was built from, so a slot index
/// doubles as the index of the matching GPU buffer.
#[derive(Debug)]
pub(crate) struct UniformStore {
    declared: UniformSet,
    slots: Vec<Slot>,
}

impl UniformStore {
    pub(crate) fn new(decls: &[UniformDecl]) -> Self {
        let slots = decls
            .iter()
            .map(|d| Slot {
                name: d.name.clone(),
                kind: d.kind,
                value: UniformValue::zero(d.kind),
                dirty: false,
            })
            .collect();
        let declared = decls.iter().map(|d| (d.name.clone(), d.kind)).collect();

        Self { declared, slots }
    }

    pub(crate) fn declared(&self) -> &UniformSet {
        &self.declared
    }

    pub(crate) fn get(&self, name: &str) -> Option<UniformValue> {
        self.slots.iter().find(|s| s.name == name).and_then(|s| s.value)
    }

    pub(crate) fn set(&mut self, name: &str, value: UniformValue) -> Result<(), UniformError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| UniformError::Unknown {
                name: name.to_string(),
            })?;

        if slot.kind != value.kind() {
            return Err(UniformError::KindMismatch {
                name: name.to_string(),
                declared: slot.kind,
                written: value.kind(),
            });
        }

        slot.value = Some(value);
        slot.dirty = true;
        Ok(())
    }

    /// Yields `(slot index, value)` for every slot written since the last
    /// drain and marks them clean.
    pub(crate) fn drain_dirty(&mut self) -> impl Iterator<Item = (usize, UniformValue)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            if !s.dirty {
                return None;
            }
            s.dirty = false;
            s.value.map(|v| (i, v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, binding: u32, kind: UniformKind) -> UniformDecl {
        UniformDecl {
            name: name.into(),
            binding,
            kind,
            size: 16,
        }
    }

    fn store() -> UniformStore {
        UniformStore::new(&[
            decl("time", 0, UniformKind::Float),
            decl("mouse", 1, UniformKind::Vec2),
            decl("lut", 2, UniformKind::Other),
        ])
    }

    #[test]
    fn starts_zeroed_and_clean() {
        let mut s = store();
        assert_eq!(s.get("time"), Some(UniformValue::Float(0.0)));
        assert_eq!(s.get("mouse"), Some(UniformValue::Vec2([0.0, 0.0])));
        assert_eq!(s.get("lut"), None);
        assert_eq!(s.drain_dirty().count(), 0);
    }

    #[test]
    fn writes_are_drained_once() {
        let mut s = store();
        s.set("mouse", UniformValue::Vec2([0.5, -0.5])).unwrap();

        let drained: Vec<_> = s.drain_dirty().collect();
        assert_eq!(drained, [(1, UniformValue::Vec2([0.5, -0.5]))]);
        assert_eq!(s.drain_dirty().count(), 0);
        assert_eq!(s.get("mouse"), Some(UniformValue::Vec2([0.5, -0.5])));
    }

    #[test]
    fn repeated_writes_coalesce() {
        let mut s = store();
        s.set("time", UniformValue::Float(1.0)).unwrap();
        s.set("time", UniformValue::Float(2.0)).unwrap();

        let drained: Vec<_> = s.drain_dirty().collect();
        assert_eq!(drained, [(0, UniformValue::Float(2.0))]);
    }

    #[test]
    fn rejects_unknown_and_mismatched_writes() {
        let mut s = store();
        assert_eq!(
            s.set("resolution", UniformValue::Vec2([1.0, 1.0])),
            Err(UniformError::Unknown {
                name: "resolution".into()
            })
        );
        assert!(matches!(
            s.set("time", UniformValue::Vec2([1.0, 1.0])),
            Err(UniformError::KindMismatch { .. })
        ));
        assert!(matches!(
            s.set("lut", UniformValue::Float(1.0)),
            Err(UniformError::KindMismatch { .. })
        ));
        assert_eq!(s.drain_dirty().count(), 0);
    }
}
