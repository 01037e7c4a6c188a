use crate::JavaRandom;

const GRAD3: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

fn skew() -> (f64, f64) {
    let sqrt3 = 3.0f64.sqrt();
    (0.5 * (sqrt3 - 1.0), (3.0 - sqrt3) / 6.0)
}

#[inline]
fn fast_floor(v: f64) -> i32 {
    if v > 0.0 { v as i32 } else { v as i32 - 1 }
}

#[inline]
fn corner(t: f64, g: usize, x: f64, y: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        0.0
    } else {
        t *= t;
        t * t * (GRAD3[g][0] * x + GRAD3[g][1] * y)
    }
}

/// Two-dimensional simplex noise.
#[derive(Clone, Debug)]
pub struct SimplexNoise {
    perm: [i32; 512],
    pub xo: f64,
    pub yo: f64,
    pub zo: f64,
}

impl SimplexNoise {
    pub fn new(rng: &mut JavaRandom) -> Self {
        let xo = rng.next_double() * 256.0;
        let yo = rng.next_double() * 256.0;
        let zo = rng.next_double() * 256.0;
        let mut perm = [0i32; 512];
        for (i, p) in perm.iter_mut().take(256).enumerate() {
            *p = i as i32;
        }
        for i in 0..256usize {
            let j = rng.next_bounded_int(256 - i as i32) as usize + i;
            perm.swap(i, j);
            perm[i + 256] = perm[i];
        }
        Self { perm, xo, yo, zo }
    }

    #[inline]
    fn p(&self, i: i32) -> i32 {
        self.perm[i as usize]
    }

    #[inline]
    fn sample(&self, x: f64, y: f64) -> f64 {
        let (f2, g2) = skew();
        let s = (x + y) * f2;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let t = (i + j) as f64 * g2;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };
        let x1 = x0 - i1 as f64 + g2;
        let y1 = y0 - j1 as f64 + g2;
        let x2 = x0 - 1.0 + 2.0 * g2;
        let y2 = y0 - 1.0 + 2.0 * g2;
        let ii = i & 255;
        let jj = j & 255;
        let gi0 = (self.p(ii + self.p(jj)) % 12) as usize;
        let gi1 = (self.p(ii + i1 + self.p(jj + j1)) % 12) as usize;
        let gi2 = (self.p(ii + 1 + self.p(jj + 1)) % 12) as usize;
        let n0 = corner(0.5 - x0 * x0 - y0 * y0, gi0, x0, y0);
        let n1 = corner(0.5 - x1 * x1 - y1 * y1, gi1, x1, y1);
        let n2 = corner(0.5 - x2 * x2 - y2 * y2, gi2, x2, y2);
        70.0 * (n0 + n1 + n2)
    }

    /// Noise at an absolute point (no offsets applied).
    pub fn value(&self, x: f64, y: f64) -> f64 {
        self.sample(x, y)
    }

    /// Adds `noise * amplitude` over a `w x h` grid (row-major in z) to `out`.
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &self,
        out: &mut [f64],
        x: f64,
        z: f64,
        w: usize,
        h: usize,
        x_scale: f64,
        z_scale: f64,
        amplitude: f64,
    ) {
        let mut idx = 0;
        for j in 0..h {
            let d0 = (z + j as f64) * z_scale + self.yo;
            for i in 0..w {
                let d1 = (x + i as f64) * x_scale + self.xo;
                out[idx] += self.sample(d1, d0) * amplitude;
                idx += 1;
            }
        }
    }
}

/// Octave sum of simplex layers.
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    levels: Vec<SimplexNoise>,
}

impl PerlinNoise {
    pub fn new(rng: &mut JavaRandom, levels: usize) -> Self {
        Self {
            levels: (0..levels).map(|_| SimplexNoise::new(rng)).collect(),
        }
    }

    /// Octave sum at a point; each octave halves the frequency and doubles the weight.
    pub fn value(&self, x: f64, z: f64) -> f64 {
        let mut sum = 0.0;
        let mut f = 1.0;
        for level in &self.levels {
            sum += level.value(x * f, z * f) / f;
            f /= 2.0;
        }
        sum
    }

    #[allow(clippy::too_many_arguments)]
    pub fn region(
        &self,
        out: &mut Vec<f64>,
        x: f64,
        z: f64,
        w: usize,
        h: usize,
        x_scale: f64,
        z_scale: f64,
        scale_exp: f64,
    ) {
        self.region_with_divisor(out, x, z, w, h, x_scale, z_scale, scale_exp, 0.5);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn region_with_divisor(
        &self,
        out: &mut Vec<f64>,
        x: f64,
        z: f64,
        w: usize,
        h: usize,
        x_scale: f64,
        z_scale: f64,
        scale_exp: f64,
        divisor: f64,
    ) {
        out.clear();
        out.resize(w * h, 0.0);
        let mut d1 = 1.0;
        let mut d0 = 1.0;
        for level in &self.levels {
            level.add(out, x, z, w, h, x_scale * d0 * d1, z_scale * d0 * d1, 0.55 / d1);
            d0 *= scale_exp;
            d1 *= divisor;
        }
    }
}
