use crate::JavaRandom;

const GRAD_X: [f64; 16] = [
    1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0, 0.0,
];
const GRAD_Y: [f64; 16] = [
    1.0, 1.0, -1.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0,
];
const GRAD_Z: [f64; 16] = [
    0.0, 0.0, 0.0, 0.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 0.0, 1.0, 0.0, -1.0,
];

/// Single-octave gradient noise over a shuffled 256-entry lattice.
#[derive(Clone, Debug)]
pub struct ImprovedNoise {
    perm: [i32; 512],
    pub x_coord: f64,
    pub y_coord: f64,
    pub z_coord: f64,
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn grad(hash: i32, x: f64, y: f64, z: f64) -> f64 {
    let i = (hash & 15) as usize;
    GRAD_X[i] * x + GRAD_Y[i] * y + GRAD_Z[i] * z
}

#[inline]
fn grad2(hash: i32, x: f64, z: f64) -> f64 {
    let i = (hash & 15) as usize;
    GRAD_X[i] * x + GRAD_Z[i] * z
}

/// Integer lattice cell and fractional offset of one coordinate.
#[inline]
fn split(v: f64) -> (usize, f64) {
    let mut i = v as i32;
    if v < i as f64 {
        i -= 1;
    }
    ((i & 255) as usize, v - i as f64)
}

impl ImprovedNoise {
    /// Draws three offsets and then shuffles the permutation table.
    pub fn new(rng: &mut JavaRandom) -> Self {
        let x_coord = rng.next_double() * 256.0;
        let y_coord = rng.next_double() * 256.0;
        let z_coord = rng.next_double() * 256.0;
        let mut perm = [0i32; 512];
        for (i, p) in perm.iter_mut().take(256).enumerate() {
            *p = i as i32;
        }
        for l in 0..256usize {
            let j = rng.next_bounded_int(256 - l as i32) as usize + l;
            perm.swap(l, j);
            perm[l + 256] = perm[l];
        }
        Self {
            perm,
            x_coord,
            y_coord,
            z_coord,
        }
    }

    #[inline]
    pub fn permutation(&self, i: usize) -> i32 {
        self.perm[i & 511]
    }

    #[inline]
    fn p(&self, i: i32) -> i32 {
        self.perm[i as usize]
    }

    /// Adds `noise / noise_scale` for every point of an `xs * ys * zs` grid to
    /// `out`, ordered x-major, then z, then y. With `ys == 1` the y axis is
    /// dropped and the grid is x-major then z.
    #[allow(clippy::too_many_arguments)]
    pub fn populate_noise_array(
        &self,
        out: &mut [f64],
        x_off: f64,
        y_off: f64,
        z_off: f64,
        xs: usize,
        ys: usize,
        zs: usize,
        x_scale: f64,
        y_scale: f64,
        z_scale: f64,
        noise_scale: f64,
    ) {
        let inv = 1.0 / noise_scale;
        if ys == 1 {
            let mut idx = 0;
            for xi in 0..xs {
                let (cx, fx) = split(x_off + xi as f64 * x_scale + self.x_coord);
                let u = fade(fx);
                for zi in 0..zs {
                    let (cz, fz) = split(z_off + zi as f64 * z_scale + self.z_coord);
                    let w = fade(fz);
                    let a = self.p(self.perm[cx]) + cz as i32;
                    let b = self.p(self.perm[cx + 1]) + cz as i32;
                    let x0 = lerp(u, grad2(self.p(a), fx, fz), grad(self.p(b), fx - 1.0, 0.0, fz));
                    let x1 = lerp(
                        u,
                        grad(self.p(a + 1), fx, 0.0, fz - 1.0),
                        grad(self.p(b + 1), fx - 1.0, 0.0, fz - 1.0),
                    );
                    out[idx] += lerp(w, x0, x1) * inv;
                    idx += 1;
                }
            }
            return;
        }

        let mut idx = 0;
        let mut last_cy: i32 = -1;
        let (mut d1, mut d2, mut d3, mut d4) = (0.0, 0.0, 0.0, 0.0);
        for xi in 0..xs {
            let (cx, fx) = split(x_off + xi as f64 * x_scale + self.x_coord);
            let u = fade(fx);
            for zi in 0..zs {
                let (cz, fz) = split(z_off + zi as f64 * z_scale + self.z_coord);
                let w = fade(fz);
                for yi in 0..ys {
                    let (cy, fy) = split(y_off + yi as f64 * y_scale + self.y_coord);
                    let v = fade(fy);
                    // corner gradients only change when the y cell changes
                    if yi == 0 || cy as i32 != last_cy {
                        last_cy = cy as i32;
                        let cz = cz as i32;
                        let a = self.perm[cx] + cy as i32;
                        let aa = self.p(a) + cz;
                        let ab = self.p(a + 1) + cz;
                        let b = self.perm[cx + 1] + cy as i32;
                        let ba = self.p(b) + cz;
                        let bb = self.p(b + 1) + cz;
                        d1 = lerp(u, grad(self.p(aa), fx, fy, fz), grad(self.p(ba), fx - 1.0, fy, fz));
                        d2 = lerp(
                            u,
                            grad(self.p(ab), fx, fy - 1.0, fz),
                            grad(self.p(bb), fx - 1.0, fy - 1.0, fz),
                        );
                        d3 = lerp(
                            u,
                            grad(self.p(aa + 1), fx, fy, fz - 1.0),
                            grad(self.p(ba + 1), fx - 1.0, fy, fz - 1.0),
                        );
                        d4 = lerp(
                            u,
                            grad(self.p(ab + 1), fx, fy - 1.0, fz - 1.0),
                            grad(self.p(bb + 1), fx - 1.0, fy - 1.0, fz - 1.0),
                        );
                    }
                    let y0 = lerp(v, d1, d2);
                    let y1 = lerp(v, d3, d4);
                    out[idx] += lerp(w, y0, y1) * inv;
                    idx += 1;
                }
            }
        }
    }
}
