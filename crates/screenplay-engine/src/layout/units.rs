use std::ops::{Add, AddAssign, Sub};

/// Length in twips (1/1440 inch, 1/20 point).
///
/// Every screenplay measurement is a whole number of twips, so layout
/// comparisons are exact. Arithmetic saturates: out-of-range page settings
/// clamp instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Twips(pub i32);

impl Twips {
    pub const PER_INCH: i32 = 1440;
    pub const PER_POINT: i32 = 20;
    pub const ZERO: Twips = Twips(0);

    pub fn from_inches(inches: f32) -> Self {
        Twips((inches * Self::PER_INCH as f32).round() as i32)
    }

    pub fn from_points(points: f32) -> Self {
        Twips((points * Self::PER_POINT as f32).round() as i32)
    }

    pub fn inches(self) -> f32 {
        self.0 as f32 / Self::PER_INCH as f32
    }

    pub fn points(self) -> f32 {
        self.0 as f32 / Self::PER_POINT as f32
    }
}

impl Add for Twips {
    type Output = Twips;

    fn add(self, rhs: Twips) -> Twips {
        Twips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Twips {
    fn add_assign(&mut self, rhs: Twips) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Twips {
    type Output = Twips;

    fn sub(self, rhs: Twips) -> Twips {
        Twips(self.0.saturating_sub(rhs.0))
    }
}
