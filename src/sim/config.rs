//! 仿真配置
//!
//! 对应命令行的 11 个位置参数，外加可复现 seed 与不变量检查开关。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// 种群规模
    pub n: usize,
    /// 蓝色节点比例
    pub p_blue: f64,
    /// 红色节点所在簇的碎裂概率
    pub p_fragm_r: f64,
    /// 蓝色节点所在簇的碎裂概率
    pub p_fragm_b: f64,
    pub p_merge_rr: f64,
    pub p_merge_rb: f64,
    pub p_merge_bb: f64,
    /// 同簇易感节点每 tick 的感染概率
    pub p_inf: f64,
    /// 感染节点每 tick 的康复概率
    pub p_rec: f64,
    /// 引入疾病前的热化 tick 数
    pub therm: u64,
    /// 疫情阶段最多运行的 tick 数
    pub steps: u64,
    /// 未指定时由驱动器随机生成并写入报告
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub check_invariants: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n: 1000,
            p_blue: 0.5,
            p_fragm_r: 0.1,
            p_fragm_b: 0.1,
            p_merge_rr: 0.5,
            p_merge_rb: 0.5,
            p_merge_bb: 0.5,
            p_inf: 0.1,
            p_rec: 0.05,
            therm: 10_000,
            steps: 10_000,
            seed: None,
            check_invariants: false,
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn probabilities(&self) -> [(&'static str, f64); 8] {
        [
            ("p_blue", self.p_blue),
            ("p_fragm_r", self.p_fragm_r),
            ("p_fragm_b", self.p_fragm_b),
            ("p_merge_rr", self.p_merge_rr),
            ("p_merge_rb", self.p_merge_rb),
            ("p_merge_bb", self.p_merge_bb),
            ("p_inf", self.p_inf),
            ("p_rec", self.p_rec),
        ]
    }

    /// 校验 N > 0 且所有概率落在 [0, 1]（NaN 不在区间内，同样被拒绝）。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        for (name, value) in self.probabilities() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        Ok(())
    }
}
