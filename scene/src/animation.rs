//! Keyframe animation data attached to entities.

use std::collections::BTreeMap;

/// Keyframes of one animated property, keyed by frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    keys: BTreeMap<i32, f32>,
}

impl Curve {
    /// Creates an empty curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key at `frame`, returning the value it replaced.
    pub fn insert(&mut self, frame: i32, value: f32) -> Option<f32> {
        self.keys.insert(frame, value)
    }

    /// Removes the key at `frame`.
    pub fn remove(&mut self, frame: i32) -> Option<f32> {
        self.keys.remove(&frame)
    }

    pub fn get(&self, frame: i32) -> Option<f32> {
        self.keys.get(&frame).copied()
    }

    pub fn contains(&self, frame: i32) -> bool {
        self.keys.contains_key(&frame)
    }

    /// Key frames in ascending order.
    pub fn frames(&self) -> impl Iterator<Item = i32> + '_ {
        self.keys.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// All animated properties of one entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationSet {
    curves: BTreeMap<String, Curve>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a key on `property`, creating the curve if needed.
    pub fn insert_key(&mut self, property: impl Into<String>, frame: i32, value: f32) -> Option<f32> {
        self.curves
            .entry(property.into())
            .or_default()
            .insert(frame, value)
    }

    pub fn curve(&self, property: &str) -> Option<&Curve> {
        self.curves.get(property)
    }

    pub fn curve_mut(&mut self, property: &str) -> Option<&mut Curve> {
        self.curves.get_mut(property)
    }

    /// Animated property names, sorted.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    /// Properties that have a key at `frame`.
    pub fn properties_keyed_at(&self, frame: i32) -> impl Iterator<Item = &str> {
        self.curves
            .iter()
            .filter(move |(_, curve)| curve.contains(frame))
            .map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
