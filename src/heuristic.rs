use crate::SQRT_2;
use grid_util::point::Point;

/// Estimate of the remaining cost between two cells. A* only returns optimal
/// paths when the estimate never exceeds the true cost (it is admissible);
/// this is not checked.
pub trait Heuristic {
    fn estimate(&self, from: Point, to: Point) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(Point, Point) -> f64,
{
    fn estimate(&self, from: Point, to: Point) -> f64 {
        self(from, to)
    }
}

/// `|dx| + |dy|`, admissible for orthogonal movement.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        ((from.x - to.x).abs() + (from.y - to.y).abs()) as f64
    }
}

/// `max(|dx|, |dy|)`, admissible for any movement that allows diagonals.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chebyshev;

impl Heuristic for Chebyshev {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        (from.x - to.x).abs().max((from.y - to.y).abs()) as f64
    }
}

/// Exact cost on an open 8-connected grid with diagonal steps costing [SQRT_2].
#[derive(Clone, Copy, Debug, Default)]
pub struct Octile;

impl Heuristic for Octile {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        let delta_x = (from.x - to.x).abs();
        let delta_y = (from.y - to.y).abs();
        // As many diagonal steps as possible before going straight
        let diagonal = delta_x.min(delta_y) as f64;
        let straight = (delta_x - delta_y).abs() as f64;
        diagonal * SQRT_2 + straight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 3);
        assert_eq!(Manhattan.estimate(a, b), 5.0);
        assert_eq!(Chebyshev.estimate(a, b), 3.0);
        assert!((Octile.estimate(a, b) - (2.0 * SQRT_2 + 1.0)).abs() < 1e-9);
        assert_eq!(Manhattan.estimate(b, b), 0.0);
    }

    #[test]
    fn closures_are_heuristics() {
        let zero = |_: Point, _: Point| 0.0;
        assert_eq!(zero.estimate(Point::new(0, 0), Point::new(9, 9)), 0.0);
    }
}
