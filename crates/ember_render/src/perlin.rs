//! Gradient lattice noise.
//!
//! Random unit vectors sit on a 256^3 wrapped lattice; the value at a point
//! is a Hermite-smoothed trilinear blend of dot products against the eight
//! surrounding gradients, which keeps the minima and maxima off the lattice
//! points. Output is in [-1, 1].

use crate::sampling::random_unit_vector;
use ember_math::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const POINT_COUNT: usize = 256;

/// Seeded gradient-noise generator.
///
/// The gradient and permutation tables are built once from the seed and are
/// read-only afterwards, so one instance can be shared across render threads.
#[derive(Debug, Clone)]
pub struct Perlin {
    rand_vec: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    /// Build the gradient and permutation tables from a seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let rand_vec = (0..POINT_COUNT)
            .map(|_| random_unit_vector(&mut rng))
            .collect();

        Self {
            rand_vec,
            perm_x: Self::generate_perm(&mut rng),
            perm_y: Self::generate_perm(&mut rng),
            perm_z: Self::generate_perm(&mut rng),
        }
    }

    fn generate_perm(rng: &mut ChaCha8Rng) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
        for i in (1..POINT_COUNT).rev() {
            let target = rng.gen_range(0..=i);
            perm.swap(i, target);
        }
        perm
    }

    /// Evaluate the noise at a point. Returns a value in [-1, 1].
    pub fn noise(&self, p: Vec3) -> f32 {
        let i = p.x.floor() as i32;
        let j = p.y.floor() as i32;
        let k = p.z.floor() as i32;
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    let xi = ((i + di as i32) & 255) as usize;
                    let yj = ((j + dj as i32) & 255) as usize;
                    let zk = ((k + dk as i32) & 255) as usize;
                    let index = self.perm_x[xi] ^ self.perm_y[yj] ^ self.perm_z[zk];
                    *cell = self.rand_vec[index];
                }
            }
        }

        // Hermite cubic smoothing of the interpolation weights
        let uu = u * u * (3.0 - 2.0 * u);
        let vv = v * v * (3.0 - 2.0 * v);
        let ww = w * w * (3.0 - 2.0 * w);

        let mut accum = 0.0;
        for (di, plane) in c.iter().enumerate() {
            for (dj, row) in plane.iter().enumerate() {
                for (dk, cell) in row.iter().enumerate() {
                    let (fi, fj, fk) = (di as f32, dj as f32, dk as f32);
                    let weight = Vec3::new(u - fi, v - fj, w - fk);
                    accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                        * (fj * vv + (1.0 - fj) * (1.0 - vv))
                        * (fk * ww + (1.0 - fk) * (1.0 - ww))
                        * cell.dot(weight);
                }
            }
        }

        accum
    }
}
