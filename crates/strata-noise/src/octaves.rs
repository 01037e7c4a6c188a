use crate::math::lfloor;
use crate::{ImprovedNoise, JavaRandom};

/// Sum of `n` gradient-noise octaves, each at half the frequency and double
/// the amplitude of the one before.
#[derive(Clone, Debug)]
pub struct OctavesNoise {
    octaves: Vec<ImprovedNoise>,
}

impl OctavesNoise {
    pub fn new(rng: &mut JavaRandom, count: usize) -> Self {
        let octaves = (0..count).map(|_| ImprovedNoise::new(rng)).collect();
        Self { octaves }
    }

    pub fn octave_count(&self) -> usize {
        self.octaves.len()
    }

    pub fn octave(&self, i: usize) -> Option<&ImprovedNoise> {
        self.octaves.get(i)
    }

    /// Fills `out` (resized to `xs * ys * zs` and zeroed) with the octave sum
    /// sampled on a grid starting at the integer lattice offset.
    #[allow(clippy::too_many_arguments)]
    pub fn generate(
        &self,
        out: &mut Vec<f64>,
        x_off: i32,
        y_off: i32,
        z_off: i32,
        xs: usize,
        ys: usize,
        zs: usize,
        x_scale: f64,
        y_scale: f64,
        z_scale: f64,
    ) {
        out.clear();
        out.resize(xs * ys * zs, 0.0);
        let mut amp = 1.0f64;
        for octave in &self.octaves {
            let mut dx = x_off as f64 * amp * x_scale;
            let dy = y_off as f64 * amp * y_scale;
            let mut dz = z_off as f64 * amp * z_scale;
            let mut kx = lfloor(dx);
            let mut kz = lfloor(dz);
            dx -= kx as f64;
            dz -= kz as f64;
            // keep the lattice offset small enough for exact f64 arithmetic
            kx %= 16_777_216;
            kz %= 16_777_216;
            dx += kx as f64;
            dz += kz as f64;
            octave.populate_noise_array(
                out,
                dx,
                dy,
                dz,
                xs,
                ys,
                zs,
                x_scale * amp,
                y_scale * amp,
                z_scale * amp,
                amp,
            );
            amp /= 2.0;
        }
    }

    /// Horizontal slice at the fixed lattice height 10.
    pub fn generate_2d(
        &self,
        out: &mut Vec<f64>,
        x_off: i32,
        z_off: i32,
        xs: usize,
        zs: usize,
        x_scale: f64,
        z_scale: f64,
    ) {
        self.generate(out, x_off, 10, z_off, xs, 1, zs, x_scale, 1.0, z_scale);
    }
}
