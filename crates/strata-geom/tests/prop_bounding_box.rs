use proptest::prelude::*;
use strata_geom::{BoundingBox, Facing};

fn coord() -> impl Strategy<Value = i32> {
    -100_000i32..=100_000
}

fn arb_box() -> impl Strategy<Value = BoundingBox> {
    (coord(), coord(), coord(), coord(), coord(), coord())
        .prop_map(|(a, b, c, d, e, f)| BoundingBox::new(a, b, c, d, e, f))
}

fn arb_facing() -> impl Strategy<Value = Facing> {
    prop::sample::select(Facing::PLANE.to_vec())
}

proptest! {
    // Construction always normalises corners
    #[test]
    fn corners_are_ordered(b in arb_box()) {
        prop_assert!(b.min_x <= b.max_x);
        prop_assert!(b.min_y <= b.max_y);
        prop_assert!(b.min_z <= b.max_z);
    }

    // Intersection is symmetric and reflexive
    #[test]
    fn intersection_symmetric(a in arb_box(), b in arb_box()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        prop_assert!(a.intersects(&a));
    }

    // Expanding covers both inputs
    #[test]
    fn expand_covers_both(a in arb_box(), b in arb_box()) {
        let mut u = a;
        u.expand_to(&b);
        prop_assert!(u.contains(a.min_x, a.min_y, a.min_z));
        prop_assert!(u.contains(b.max_x, b.max_y, b.max_z));
        prop_assert!(u.intersects(&a) && u.intersects(&b));
    }

    // Offsetting preserves size and moves the min corner
    #[test]
    fn offset_preserves_size(a in arb_box(), dx in -500i32..500, dy in -500i32..500, dz in -500i32..500) {
        let mut b = a;
        b.offset(dx, dy, dz);
        prop_assert_eq!((a.x_size(), a.y_size(), a.z_size()), (b.x_size(), b.y_size(), b.z_size()));
        prop_assert_eq!(b.min_x, a.min_x + dx);
    }

    // Oriented boxes keep the requested dimensions, swapping width and length on the x axis
    #[test]
    fn oriented_dimensions(x in coord(), y in 0i32..200, z in coord(), w in 1i32..30, h in 1i32..30, l in 1i32..30, f in arb_facing()) {
        let b = BoundingBox::oriented(x, y, z, 0, 0, 0, w, h, l, f);
        prop_assert_eq!(b.y_size(), h);
        match f {
            Facing::North | Facing::South => {
                prop_assert_eq!(b.x_size(), w);
                prop_assert_eq!(b.z_size(), l);
            }
            Facing::West | Facing::East => {
                prop_assert_eq!(b.x_size(), l);
                prop_assert_eq!(b.z_size(), w);
            }
        }
        // the attachment point is always on the box
        prop_assert!(b.contains(x, y, z));
    }
}

#[test]
fn oriented_north_extends_towards_negative_z() {
    let b = BoundingBox::oriented(10, 64, 10, 0, 0, 0, 3, 3, 7, Facing::North);
    assert_eq!(b, BoundingBox::new(10, 64, 4, 12, 66, 10));
    let b = BoundingBox::oriented(10, 64, 10, 0, 0, 0, 3, 3, 7, Facing::West);
    assert_eq!(b, BoundingBox::new(4, 64, 10, 10, 66, 12));
}

#[test]
fn touching_faces_intersect_but_gaps_do_not() {
    let a = BoundingBox::new(0, 0, 0, 4, 4, 4);
    assert!(a.intersects(&BoundingBox::new(4, 0, 0, 8, 4, 4)));
    assert!(!a.intersects(&BoundingBox::new(5, 0, 0, 8, 4, 4)));
    assert!(!a.intersects(&BoundingBox::new(0, 5, 0, 4, 9, 4)));
}

#[test]
fn chunk_column_covers_the_whole_chunk() {
    let b = BoundingBox::chunk_column(-1, 2);
    assert_eq!((b.min_x, b.min_z, b.max_x, b.max_z), (-16, 32, -1, 47));
    assert_eq!((b.min_y, b.max_y), (0, 255));
}
