//! 运行报告
//!
//! 终端统计：初始感染簇大小、（可选）消亡时刻与康复比例、最终比值 R。

use std::fmt;

use serde::Serialize;

use super::time::Tick;

/// 疾病消亡记录
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Burnout {
    pub tick: Tick,
    /// 消亡时已康复节点占总人口的百分比
    pub recovered_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub n: usize,
    /// 热化结束时的簇数
    pub clusters_after_therm: usize,
    /// 热化结束时两个随机节点同簇的概率
    pub same_cluster_probability: f64,
    /// 初始感染簇大小（R 的分母）
    pub seed_cluster_size: usize,
    /// 播种阶段感染的节点数
    pub seeded_infections: usize,
    pub burnout: Option<Burnout>,
    /// 实际运行的疫情 tick 数
    pub ticks_run: u64,
    pub total_recovered: usize,
    pub infected_remaining: usize,
    /// 累计康复数 / 初始感染簇大小
    pub final_ratio: f64,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "First infected cluster was a cluster of size: {}",
            self.seed_cluster_size
        )?;
        if let Some(b) = &self.burnout {
            writeln!(
                f,
                "Disease has vanished from the populations at time t={} !",
                b.tick.0
            )?;
            writeln!(
                f,
                "{}% of the total population contracted the disease and recovered!",
                b.recovered_percent
            )?;
        }
        writeln!(
            f,
            "The ratio of all the infected people to the initially infected cluster:"
        )?;
        write!(f, "R= {}", self.final_ratio)
    }
}

/// 多次独立运行的汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub seed: u64,
    pub runs: Vec<RunReport>,
    pub burnouts: usize,
    pub mean_final_ratio: f64,
    /// 平均累计康复比例（占总人口）
    pub mean_recovered_fraction: f64,
}

impl BatchReport {
    pub fn from_runs(seed: u64, runs: Vec<RunReport>) -> Self {
        let k = runs.len().max(1) as f64;
        let burnouts = runs.iter().filter(|r| r.burnout.is_some()).count();
        let mean_final_ratio = runs.iter().map(|r| r.final_ratio).sum::<f64>() / k;
        let mean_recovered_fraction = runs
            .iter()
            .map(|r| r.total_recovered as f64 / r.n.max(1) as f64)
            .sum::<f64>()
            / k;
        Self {
            seed,
            runs,
            burnouts,
            mean_final_ratio,
            mean_recovered_fraction,
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.runs.iter().enumerate() {
            writeln!(
                f,
                "run {i}: seed={} seed_cluster={} burnout={} R={}",
                r.seed,
                r.seed_cluster_size,
                r.burnout
                    .map_or_else(|| "none".to_string(), |b| b.tick.0.to_string()),
                r.final_ratio
            )?;
        }
        write!(
            f,
            "runs={} burnouts={} mean_R={} mean_recovered_fraction={}",
            self.runs.len(),
            self.burnouts,
            self.mean_final_ratio,
            self.mean_recovered_fraction
        )
    }
}
