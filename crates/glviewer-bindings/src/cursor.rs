use crate::host::ScreenSize;

/// Running sum of screen-normalized pointer displacements.
///
/// Starts at `(0, 0)` and has no reset: it accumulates for the lifetime of
/// the owning registry.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CursorOffset {
    x: f32,
    y: f32,
}

impl CursorOffset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `(dx / width, dy / height)` and returns the new total.
    ///
    /// A zero screen dimension leaves that axis unscaled.
    pub fn accumulate(&mut self, dx: f32, dy: f32, screen: ScreenSize) -> [f32; 2] {
        self.x += normalize(dx, screen.width);
        self.y += normalize(dy, screen.height);
        self.get()
    }

    pub fn get(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

fn normalize(delta: f32, extent: u32) -> f32 {
    if extent == 0 {
        delta
    } else {
        delta / extent as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin() {
        assert_eq!(CursorOffset::new().get(), [0.0, 0.0]);
    }

    #[test]
    fn divides_by_screen_extent() {
        let mut c = CursorOffset::new();
        assert_eq!(c.accumulate(100.0, 50.0, ScreenSize::new(1000, 500)), [0.1, 0.1]);
    }

    #[test]
    fn accumulates_across_calls() {
        let mut c = CursorOffset::new();
        let screen = ScreenSize::new(200, 100);
        c.accumulate(20.0, 10.0, screen);
        c.accumulate(-40.0, 30.0, screen);
        let [x, y] = c.get();
        assert!((x - -0.1).abs() < 1e-6);
        assert!((y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn zero_extent_passes_delta_through() {
        let mut c = CursorOffset::new();
        assert_eq!(c.accumulate(3.0, 4.0, ScreenSize::new(0, 0)), [3.0, 4.0]);
    }

    #[test]
    fn zero_extent_is_per_axis() {
        let mut c = CursorOffset::new();
        assert_eq!(c.accumulate(3.0, 4.0, ScreenSize::new(0, 8)), [3.0, 0.5]);
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let mut c = CursorOffset::new();
        let screen = ScreenSize::new(640, 480);
        c.accumulate(64.0, 48.0, screen);
        let before = c.get();
        assert_eq!(c.accumulate(0.0, 0.0, screen), before);
    }
}
