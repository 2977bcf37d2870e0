use hexmove::{
    grid::{grid_len, range},
    HexGrid, HexPoint, Point3,
};
use proptest::prelude::*;

fn point(max: i32) -> impl Strategy<Value = HexPoint> {
    (-max..=max, -max..=max).prop_map(|(q, r)| HexPoint::new(q, r))
}

/// The closed-form cell counts from the docs
#[test]
fn test_known_sizes() {
    for (radius, expected) in [(0, 1), (1, 7), (4, 61)] {
        let grid = HexGrid::generate(radius, 0.5, Point3::origin()).unwrap();
        assert_eq!(grid.len(), expected, "radius {}", radius);
    }
}

#[test]
fn test_known_distances() {
    let origin = HexPoint::ORIGIN;
    assert_eq!(origin.distance_to(HexPoint::new(1, 0)), 1);
    assert_eq!(origin.distance_to(HexPoint::new(2, -1)), 2);
    assert_eq!(HexPoint::new(-2, 1).distance_to(HexPoint::new(2, -1)), 4);
}

proptest! {
    #[test]
    fn test_grid_len(radius in 0..40i32) {
        let grid = HexGrid::generate(radius, 1.0, Point3::origin()).unwrap();
        let r = radius as usize;
        prop_assert_eq!(grid.len(), 3 * r * r + 3 * r + 1);
        prop_assert_eq!(grid.len(), grid_len(radius));
    }

    /// Generation should match the textbook hex disk test on q, r, and q+r
    #[test]
    fn test_disk_membership(radius in 0..12i32, point in point(15)) {
        let grid = HexGrid::generate(radius, 1.0, Point3::origin()).unwrap();
        let in_disk = point.q().abs() <= radius
            && point.r().abs() <= radius
            && (point.q() + point.r()).abs() <= radius;
        prop_assert_eq!(grid.contains(point), in_disk);
    }

    #[test]
    fn test_distance_symmetric(a in point(1000), b in point(1000)) {
        prop_assert_eq!(a.distance_to(b), b.distance_to(a));
        prop_assert_eq!(a.distance_to(a), 0);
    }

    #[test]
    fn test_distance_triangle(
        a in point(100),
        b in point(100),
        c in point(100),
    ) {
        prop_assert!(a.distance_to(c) <= a.distance_to(b) + b.distance_to(c));
    }

    #[test]
    fn test_reachable_bounds(
        radius in 0..8i32,
        origin in point(8),
        budget in 0..10u32,
    ) {
        let grid = HexGrid::generate(radius, 1.0, Point3::origin()).unwrap();
        let reachable = range::reachable(&grid, origin, budget);
        prop_assert!(!reachable.contains(&origin));
        for position in &reachable {
            prop_assert!(grid.contains(*position));
            let distance = origin.distance_to(*position);
            prop_assert!(distance > 0 && distance <= budget);
        }
        // ...and nothing in range was left out
        let expected = grid
            .cells()
            .filter(|cell| {
                let distance = origin.distance_to(cell.position());
                distance > 0 && distance <= budget
            })
            .count();
        prop_assert_eq!(reachable.len(), expected);
        if budget == 0 {
            prop_assert!(reachable.is_empty());
        }
    }

    /// Every cell center maps back to its own cell, wherever the grid is
    #[test]
    fn test_world_round_trip(
        x in -100.0..100.0f64,
        y in -100.0..100.0f64,
        z in -100.0..100.0f64,
        size in 0.01..10.0f64,
    ) {
        let grid = HexGrid::generate(3, size, Point3::new(x, y, z)).unwrap();
        let layout = grid.layout();
        for cell in grid.cells() {
            prop_assert_eq!(
                layout.world_to_hex(cell.world_position()),
                Some(cell.position())
            );
            let nearest = grid
                .nearest_cell(cell.world_position(), layout.inner_radius())
                .map(|cell| cell.position());
            prop_assert_eq!(nearest, Some(cell.position()));
        }
    }
}
