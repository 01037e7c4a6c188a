use super::{CellRng, GenLayer, LayerRef, LayerSeed};
use std::sync::Arc;

/// Doubles the resolution of its parent. The top-left child keeps the parent
/// value; the others pick among the neighbouring parent cells.
pub struct Zoom {
    seed: LayerSeed,
    parent: LayerRef,
    fuzzy: bool,
}

impl Zoom {
    /// Majority-vote zoom.
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent, fuzzy: false }
    }

    /// Majority-vote zoom left out of world seeding.
    pub fn unseeded(salt: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::unseeded(salt), parent, fuzzy: false }
    }

    /// Zoom whose diagonal child is a uniform pick of the four corners.
    pub fn fuzzy(salt: i64, world_seed: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent, fuzzy: true }
    }
}

fn mode_or_random(r: &mut CellRng, a: i32, b: i32, c: i32, d: i32) -> i32 {
    if b == c && c == d {
        b
    } else if a == b && a == c {
        a
    } else if a == b && a == d {
        a
    } else if a == c && a == d {
        a
    } else if a == b && c != d {
        a
    } else if a == c && b != d {
        a
    } else if a == d && b != c {
        a
    } else if b == c && a != d {
        b
    } else if b == d && a != c {
        b
    } else if c == d && a != b {
        c
    } else {
        r.choose(&[a, b, c, d])
    }
}

impl GenLayer for Zoom {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let (px, pz) = (x >> 1, z >> 1);
        let pw = (width >> 1) + 2;
        let ph = (height >> 1) + 2;
        let parent = self.parent.get_ints(px, pz, pw, ph);
        let tw = (pw - 1) << 1;
        let th = (ph - 1) << 1;
        let mut tmp = vec![0; tw * th];
        for k in 0..ph - 1 {
            let mut idx = (k << 1) * tw;
            let mut top_left = parent[k * pw];
            let mut bottom_left = parent[(k + 1) * pw];
            for i in 0..pw - 1 {
                let mut r = self.seed.cell((i as i32 + px) << 1, (k as i32 + pz) << 1);
                let top_right = parent[i + 1 + k * pw];
                let bottom_right = parent[i + 1 + (k + 1) * pw];
                tmp[idx] = top_left;
                tmp[idx + tw] = r.choose(&[top_left, bottom_left]);
                idx += 1;
                tmp[idx] = r.choose(&[top_left, top_right]);
                tmp[idx + tw] = if self.fuzzy {
                    r.choose(&[top_left, top_right, bottom_left, bottom_right])
                } else {
                    mode_or_random(&mut r, top_left, top_right, bottom_left, bottom_right)
                };
                idx += 1;
                top_left = top_right;
                bottom_left = bottom_right;
            }
        }
        let (ox, oz) = ((x & 1) as usize, (z & 1) as usize);
        let mut out = Vec::with_capacity(width * height);
        for j in 0..height {
            let start = (j + oz) * tw + ox;
            out.extend_from_slice(&tmp[start..start + width]);
        }
        out
    }
}

/// `times` majority zooms with consecutive salts starting at `salt`.
pub fn magnify(salt: i64, world_seed: i64, parent: LayerRef, times: usize) -> LayerRef {
    let mut layer = parent;
    for i in 0..times {
        layer = Arc::new(Zoom::new(salt + i as i64, world_seed, layer));
    }
    layer
}

/// Final 4x magnification: each block takes the value of the nearest of four
/// jittered points placed around the parent cell corners.
pub struct VoronoiZoom {
    seed: LayerSeed,
    parent: LayerRef,
}

impl VoronoiZoom {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent }
    }

    fn jitter(&self, x: i32, z: i32, dx: f64, dz: f64) -> (f64, f64) {
        let mut r = self.seed.cell(x, z);
        let a = (r.next_int(1024) as f64 / 1024.0 - 0.5) * 3.6 + dx;
        let b = (r.next_int(1024) as f64 / 1024.0 - 0.5) * 3.6 + dz;
        (a, b)
    }
}

impl GenLayer for VoronoiZoom {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let (x, z) = (x - 2, z - 2);
        let (px, pz) = (x >> 2, z >> 2);
        // rounded up so any alignment of any width fits in the scratch grid
        let pw = ((width + 3) >> 2) + 2;
        let ph = ((height + 3) >> 2) + 2;
        let parent = self.parent.get_ints(px, pz, pw, ph);
        let tw = (pw - 1) << 2;
        let th = (ph - 1) << 2;
        let mut tmp = vec![0; tw * th];
        for k in 0..ph - 1 {
            let cz = k as i32 + pz;
            let mut north_west = parent[k * pw];
            let mut south_west = parent[(k + 1) * pw];
            for i in 0..pw - 1 {
                let cx = i as i32 + px;
                let (ax, az) = self.jitter(cx << 2, cz << 2, 0.0, 0.0);
                let (bx, bz) = self.jitter((cx + 1) << 2, cz << 2, 4.0, 0.0);
                let (cxx, czz) = self.jitter(cx << 2, (cz + 1) << 2, 0.0, 4.0);
                let (dx, dz) = self.jitter((cx + 1) << 2, (cz + 1) << 2, 4.0, 4.0);
                let north_east = parent[i + 1 + k * pw] & 255;
                let south_east = parent[i + 1 + (k + 1) * pw] & 255;
                for row in 0..4 {
                    let zf = row as f64;
                    let mut idx = ((k << 2) + row) * tw + (i << 2);
                    for col in 0..4 {
                        let xf = col as f64;
                        let da = (zf - az) * (zf - az) + (xf - ax) * (xf - ax);
                        let db = (zf - bz) * (zf - bz) + (xf - bx) * (xf - bx);
                        let dc = (zf - czz) * (zf - czz) + (xf - cxx) * (xf - cxx);
                        let dd = (zf - dz) * (zf - dz) + (xf - dx) * (xf - dx);
                        tmp[idx] = if da < db && da < dc && da < dd {
                            north_west
                        } else if db < da && db < dc && db < dd {
                            north_east
                        } else if dc < da && dc < db && dc < dd {
                            south_west
                        } else {
                            south_east
                        };
                        idx += 1;
                    }
                }
                north_west = north_east;
                south_west = south_east;
            }
        }
        let (ox, oz) = ((x & 3) as usize, (z & 3) as usize);
        let mut out = Vec::with_capacity(width * height);
        for j in 0..height {
            let start = (j + oz) * tw + ox;
            out.extend_from_slice(&tmp[start..start + width]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Distinct value per coordinate so zoom provenance is visible.
    struct Coords;

    impl GenLayer for Coords {
        fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
            let mut out = Vec::with_capacity(width * height);
            for j in 0..height as i32 {
                for i in 0..width as i32 {
                    out.push(((x + i) & 0xFF) | (((z + j) & 0xFF) << 8));
                }
            }
            out
        }
    }

    #[test]
    fn even_cells_keep_the_parent_value() {
        let zoom = Zoom::new(2001, 12345, Arc::new(Coords));
        let (x0, z0) = (-7, 5);
        let grid = zoom.get_ints(x0, z0, 13, 9);
        for j in 0..9 {
            for i in 0..13 {
                let (x, z) = (x0 + i, z0 + j);
                if x & 1 == 0 && z & 1 == 0 {
                    let parent = Coords.get_ints(x >> 1, z >> 1, 1, 1)[0];
                    assert_eq!(grid[(i + j * 13) as usize], parent, "({x}, {z})");
                }
            }
        }
    }

    #[test]
    fn zoomed_cells_come_from_adjacent_parents() {
        let zoom = Zoom::fuzzy(2000, 3, Arc::new(Coords));
        let grid = zoom.get_ints(0, 0, 16, 16);
        for j in 0..16i32 {
            for i in 0..16i32 {
                let v = grid[(i + j * 16) as usize];
                let (px, pz) = (v & 0xFF, v >> 8);
                assert!(px == i >> 1 || px == (i >> 1) + 1, "{i} {j} -> {px}");
                assert!(pz == j >> 1 || pz == (j >> 1) + 1, "{i} {j} -> {pz}");
            }
        }
    }

    /// Only the x coordinate survives the voronoi byte mask.
    struct Columns;

    impl GenLayer for Columns {
        fn get_ints(&self, x: i32, _z: i32, width: usize, height: usize) -> Vec<i32> {
            (0..height).flat_map(|_| (0..width as i32).map(move |i| (x + i) & 0xFF)).collect()
        }
    }

    #[test]
    fn voronoi_picks_a_nearby_parent_column() {
        let voronoi = VoronoiZoom::new(10, 114514, Arc::new(Columns));
        let grid = voronoi.get_ints(-5, 3, 16, 16);
        for j in 0..16i32 {
            for i in 0..16i32 {
                let px = grid[(i + j * 16) as usize];
                let x = -5 + i - 2;
                assert!(px == (x >> 2) & 0xFF || px == ((x >> 2) + 1) & 0xFF, "{i} {j} -> {px}");
            }
        }
    }

    #[test]
    fn magnify_zero_is_identity() {
        let parent: LayerRef = Arc::new(Coords);
        let same = magnify(1000, 1, parent.clone(), 0);
        assert_eq!(same.get_ints(3, 4, 5, 6), parent.get_ints(3, 4, 5, 6));
    }
}
