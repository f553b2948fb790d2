/// An implementation of a time-decaying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f32) -> f32;
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f32,
}

impl Constant {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f32) -> f32 {
        self.value
    }
}

/// v(t) = 1 / t
///
/// Unbounded as `t` approaches zero, so callers must start counting at `t = 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reciprocal;

impl Reciprocal {
    pub fn new() -> Self {
        Self
    }
}

impl Decay for Reciprocal {
    fn evaluate(&self, t: f32) -> f32 {
        1.0 / t
    }
}
