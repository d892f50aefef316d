//! 随机源
//!
//! 所有随机步骤都通过 `RandomSource` 取数；`SimRng` 以显式 seed 构建，
//! 同一 seed + 同一配置 => 同一结果。

use rand::rngs::SmallRng;
use rand::{Rng as _, RngCore, SeedableRng};

pub trait RandomSource {
    /// [0, 1) 上的均匀变量
    fn uniform01(&mut self) -> f64;

    /// [0, bound) 上的均匀整数；`bound` 必须 > 0。
    fn uniform_int(&mut self, bound: usize) -> usize;

    /// 以概率 `p` 返回 true（单次 `uniform01() < p`）。
    #[inline]
    fn bernoulli(&mut self, p: f64) -> bool {
        self.uniform01() < p
    }
}

/// 可复现的仿真随机数发生器
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    inner: SmallRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// 构建时使用的 seed
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 派生一个独立的子随机流（子流 seed 由父流决定，因而仍可复现）。
    pub fn fork(&mut self) -> SimRng {
        SimRng::new(self.inner.next_u64())
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn uniform01(&mut self) -> f64 {
        self.inner.r#gen::<f64>()
    }

    #[inline]
    fn uniform_int(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "bound must be > 0");
        self.inner.gen_range(0..bound)
    }
}
