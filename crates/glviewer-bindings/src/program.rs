use crate::error::UniformError;
use crate::uniform::{UniformKind, UniformSet, UniformValue};

/// Uniform access to a compiled shader program.
///
/// Implementations own the storage behind each slot; the registry only reads
/// and writes values by name. Activation for drawing is not part of this
/// contract, it is provided by the concrete program type.
pub trait UniformProgram {
    /// Every uniform the program declares, recognized or not.
    fn declared_uniforms(&self) -> &UniformSet;

    /// Current value of `name`. `None` if undeclared or not host-readable.
    fn uniform_value(&self, name: &str) -> Option<UniformValue>;

    /// Writes `value` into `name`. The value is sampled by the next draw.
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), UniformError>;

    fn has_uniform(&self, name: &str) -> bool {
        self.declared_uniforms().contains(name)
    }

    fn uniform_kind(&self, name: &str) -> Option<UniformKind> {
        self.declared_uniforms().kind(name)
    }
}
