/// Triangular membership function with feet `a`, `c` and peak `b`.
/// `a == b` or `b == c` gives a shoulder: the peak itself still has degree 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Triangle {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn degree(&self, x: f64) -> f64 {
        let Triangle { a, b, c } = *self;
        if x == b {
            1.0
        } else if x <= a || x >= c {
            0.0
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        }
    }

    /// Degree cut at `level` (Mamdani implication).
    pub fn clipped(&self, x: f64, level: f64) -> f64 {
        self.degree(x).min(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_shoulder() {
        let low = Triangle::new(0.0, 0.0, 40.0);
        assert_eq!(low.degree(0.0), 1.0);
        assert_eq!(low.degree(20.0), 0.5);
        assert_eq!(low.degree(40.0), 0.0);
        assert_eq!(low.degree(70.0), 0.0);
    }

    #[test]
    fn test_right_shoulder() {
        let high = Triangle::new(60.0, 100.0, 100.0);
        assert_eq!(high.degree(100.0), 1.0);
        assert_eq!(high.degree(60.0), 0.0);
        assert_eq!(high.degree(80.0), 0.5);
        assert_eq!(high.degree(10.0), 0.0);
    }

    #[test]
    fn test_symmetric_peak() {
        let mid = Triangle::new(20.0, 50.0, 80.0);
        assert_eq!(mid.degree(50.0), 1.0);
        assert_eq!(mid.degree(35.0), 0.5);
        assert_eq!(mid.degree(65.0), 0.5);
        assert_eq!(mid.degree(20.0), 0.0);
        assert_eq!(mid.degree(80.0), 0.0);
    }

    #[test]
    fn test_fractional_breakpoints() {
        let very_low = Triangle::new(0.0, 0.0, 2.5);
        assert_eq!(very_low.degree(0.0), 1.0);
        assert!((very_low.degree(1.0) - 0.6).abs() < 1e-12);
        assert!((very_low.degree(2.0) - 0.2).abs() < 1e-12);
        assert_eq!(very_low.degree(3.0), 0.0);
    }

    #[test]
    fn test_clipped() {
        let mid = Triangle::new(2.5, 5.0, 7.5);
        assert_eq!(mid.clipped(5.0, 0.3), 0.3);
        assert!((mid.clipped(3.0, 0.9) - 0.2).abs() < 1e-12);
        assert_eq!(mid.clipped(9.0, 1.0), 0.0);
    }
}
