use std::collections::BTreeMap;
use std::fmt;

/// Host-visible shape of a declared uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformKind {
    Float,
    Vec2,
    Vec3,
    Vec4,
    /// Declared by the program but not writable from the host (integers,
    /// matrices, structs). Stays at its zero default.
    Other,
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UniformKind::Float => "f32",
            UniformKind::Vec2 => "vec2<f32>",
            UniformKind::Vec3 => "vec3<f32>",
            UniformKind::Vec4 => "vec4<f32>",
            UniformKind::Other => "opaque",
        };
        f.write_str(s)
    }
}

/// A value written into a uniform slot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
        }
    }

    /// The zero value for `kind`, or `None` for kinds the host cannot write.
    pub fn zero(kind: UniformKind) -> Option<Self> {
        match kind {
            UniformKind::Float => Some(UniformValue::Float(0.0)),
            UniformKind::Vec2 => Some(UniformValue::Vec2([0.0; 2])),
            UniformKind::Vec3 => Some(UniformValue::Vec3([0.0; 3])),
            UniformKind::Vec4 => Some(UniformValue::Vec4([0.0; 4])),
            UniformKind::Other => None,
        }
    }

    /// Components in declaration order, ready for upload.
    pub fn components(&self) -> &[f32] {
        match self {
            UniformValue::Float(v) => std::slice::from_ref(v),
            UniformValue::Vec2(v) => v,
            UniformValue::Vec3(v) => v,
            UniformValue::Vec4(v) => v,
        }
    }
}

/// Names and kinds of the uniforms a program declares.
///
/// Ordered by name so iteration (and therefore logging) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformSet {
    entries: BTreeMap<String, UniformKind>,
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration. Returns the previous kind if `name` was already present.
    pub fn insert(&mut self, name: impl Into<String>, kind: UniformKind) -> Option<UniformKind> {
        self.entries.insert(name.into(), kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<UniformKind> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, UniformKind)> for UniformSet {
    fn from_iter<I: IntoIterator<Item = (S, UniformKind)>>(iter: I) -> Self {
        let mut set = UniformSet::new();
        for (name, kind) in iter {
            set.insert(name, kind);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_matches_kind() {
        for kind in [UniformKind::Float, UniformKind::Vec2, UniformKind::Vec3, UniformKind::Vec4] {
            assert_eq!(UniformValue::zero(kind).map(|v| v.kind()), Some(kind));
        }
    }

    #[test]
    fn opaque_kind_has_no_zero_value() {
        assert_eq!(UniformValue::zero(UniformKind::Other), None);
    }

    #[test]
    fn components_follow_declaration_order() {
        assert_eq!(UniformValue::Float(2.5).components(), &[2.5]);
        assert_eq!(UniformValue::Vec3([1.0, 2.0, 3.0]).components(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn set_iterates_by_name() {
        let set: UniformSet = [("time", UniformKind::Float), ("mouse", UniformKind::Vec2)]
            .into_iter()
            .collect();
        let names: Vec<_> = set.names().collect();
        assert_eq!(names, ["mouse", "time"]);
        assert_eq!(set.kind("time"), Some(UniformKind::Float));
        assert!(!set.contains("resolution"));
    }
}
