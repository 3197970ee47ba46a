//! Sky gradient settings.

/// Three-stop gradient sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkySettings {
    /// Zenith color, linear RGB.
    pub top: [f32; 3],
    /// Horizon color, linear RGB.
    pub middle: [f32; 3],
    /// Nadir color, linear RGB.
    pub bottom: [f32; 3],
}

impl SkySettings {
    /// Neutral grey studio backdrop.
    pub const STUDIO: Self = Self {
        top: [0.212, 0.212, 0.212],
        middle: [0.576, 0.576, 0.576],
        bottom: [0.133, 0.133, 0.133],
    };

    /// Returns these settings with a different zenith color.
    #[must_use]
    pub const fn with_top(mut self, top: [f32; 3]) -> Self {
        self.top = top;
        self
    }

    /// Returns these settings with a different horizon color.
    #[must_use]
    pub const fn with_middle(mut self, middle: [f32; 3]) -> Self {
        self.middle = middle;
        self
    }

    /// Returns these settings with a different nadir color.
    #[must_use]
    pub const fn with_bottom(mut self, bottom: [f32; 3]) -> Self {
        self.bottom = bottom;
        self
    }
}

impl Default for SkySettings {
    fn default() -> Self {
        Self::STUDIO
    }
}
