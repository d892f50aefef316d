//! 动力学引擎
//!
//! 每个 tick 按固定顺序执行：传播 -> 康复 -> 碎裂 -> 合并。
//! 热化阶段只执行碎裂与合并。
//!
//! 传播与康复都基于 tick 开始时的快照（感染簇集合、感染节点集合），
//! 本 tick 新感染的节点既不会在本 tick 内继续传播，也不会在本 tick 内康复。

use tracing::{debug, trace};

use super::config::SimConfig;
use super::rng::RandomSource;
use crate::model::{ClusterId, ClusterWorld, Color, Health, NodeId};

/// 单个疫情 tick 的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub new_infections: usize,
    pub recoveries: usize,
    pub fragmented: bool,
    pub merged: bool,
    /// 康复之后感染数为 0（疾病消亡）
    pub extinct: bool,
}

#[derive(Debug, Clone)]
pub struct DynamicsEngine {
    /// [蓝, 红] 碎裂概率
    fragm: [f64; 2],
    merge_bb: f64,
    merge_rr: f64,
    merge_rb: f64,
    p_inf: f64,
    p_rec: f64,
}

fn color_slot(c: Color) -> usize {
    match c {
        Color::Blue => 0,
        Color::Red => 1,
    }
}

impl DynamicsEngine {
    pub fn from_config(cfg: &SimConfig) -> Self {
        Self {
            fragm: [cfg.p_fragm_b, cfg.p_fragm_r],
            merge_bb: cfg.p_merge_bb,
            merge_rr: cfg.p_merge_rr,
            merge_rb: cfg.p_merge_rb,
            p_inf: cfg.p_inf,
            p_rec: cfg.p_rec,
        }
    }

    pub fn fragmentation_prob(&self, color: Color) -> f64 {
        self.fragm[color_slot(color)]
    }

    /// 对称的合并概率表
    pub fn merge_prob(&self, a: Color, b: Color) -> f64 {
        match (a, b) {
            (Color::Blue, Color::Blue) => self.merge_bb,
            (Color::Red, Color::Red) => self.merge_rr,
            _ => self.merge_rb,
        }
    }

    /// 热化 tick：只有结构演化，没有疾病。
    pub fn thermalize_tick<R: RandomSource + ?Sized>(&self, world: &mut ClusterWorld, rng: &mut R) {
        self.fragment(world, rng);
        self.merge(world, rng);
    }

    /// 完整的疫情 tick。疾病消亡时跳过本 tick 的碎裂与合并。
    pub fn epidemic_tick<R: RandomSource + ?Sized>(
        &self,
        world: &mut ClusterWorld,
        rng: &mut R,
    ) -> TickOutcome {
        let infected_clusters = world.index.snapshot_clusters();
        let infected_nodes: Vec<NodeId> = world.population.infected().iter().copied().collect();

        let mut out = TickOutcome {
            new_infections: self.transmit(world, &infected_clusters, rng),
            recoveries: self.recover(world, &infected_nodes, rng),
            ..TickOutcome::default()
        };

        if world.population.infected_count() == 0 {
            out.extinct = true;
            return out;
        }

        out.fragmented = self.fragment(world, rng);
        out.merged = self.merge(world, rng);
        out
    }

    /// 对快照中每个感染簇的每个易感成员独立抽一次，低于 `p_inf` 即感染。
    pub fn transmit<R: RandomSource + ?Sized>(
        &self,
        world: &mut ClusterWorld,
        infected_clusters: &[ClusterId],
        rng: &mut R,
    ) -> usize {
        let mut infected = 0;
        for &c in infected_clusters {
            // 传播不改变成员关系，但 infect 需要 &mut world，先收集易感成员
            let susceptible: Vec<NodeId> = match world.partition.members_of(c) {
                Some(members) => members
                    .iter()
                    .copied()
                    .filter(|&m| world.population.health(m) == Health::Susceptible)
                    .collect(),
                None => continue,
            };
            for m in susceptible {
                if rng.bernoulli(self.p_inf) && world.infect(m) {
                    trace!(node = m.0, cluster = c.0, "感染");
                    infected += 1;
                }
            }
        }
        infected
    }

    /// tick 开始时的每个感染节点独立抽一次，低于 `p_rec` 即康复。
    pub fn recover<R: RandomSource + ?Sized>(
        &self,
        world: &mut ClusterWorld,
        infected_nodes: &[NodeId],
        rng: &mut R,
    ) -> usize {
        let mut recovered = 0;
        for &n in infected_nodes {
            if rng.bernoulli(self.p_rec) && world.recover(n) {
                trace!(node = n.0, "康复");
                recovered += 1;
            }
        }
        recovered
    }

    /// 随机选一个节点，按其颜色决定是否将其所在簇碎裂为单点簇。
    pub fn fragment<R: RandomSource + ?Sized>(&self, world: &mut ClusterWorld, rng: &mut R) -> bool {
        let n = world.population.len();
        if n == 0 {
            return false;
        }
        let node = NodeId(rng.uniform_int(n));
        let cluster = world.partition.cluster_of(node);
        let p = self.fragmentation_prob(world.population.color(node));
        if !rng.bernoulli(p) {
            return false;
        }
        debug!(node = node.0, cluster = cluster.0, size = world.partition.size_of(cluster), "触发碎裂");
        world.split_cluster(cluster);
        true
    }

    /// 随机选两个节点，按颜色对决定是否合并二者所在簇（第一个节点的簇保留）。
    pub fn merge<R: RandomSource + ?Sized>(&self, world: &mut ClusterWorld, rng: &mut R) -> bool {
        let n = world.population.len();
        if n == 0 {
            return false;
        }
        let a = NodeId(rng.uniform_int(n));
        let b = NodeId(rng.uniform_int(n));
        let p = self.merge_prob(world.population.color(a), world.population.color(b));
        if !rng.bernoulli(p) {
            return false;
        }
        let ca = world.partition.cluster_of(a);
        let cb = world.partition.cluster_of(b);
        if ca == cb {
            return false;
        }
        world.merge_clusters(ca, cb)
    }
}
