//! 簇划分
//!
//! 维护节点 -> 簇、簇 -> 成员的双向映射，支持碎裂（split）与合并（union）。
//! 簇 ID 由单调递增的 `u64` 计数器分配，被销毁的 ID 不会再出现。
//!
//! 所有容器都是有序的：迭代顺序决定随机数的消耗顺序，
//! 不能依赖随机化的哈希顺序，否则同一 seed 无法复现同一结果。

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use super::id::{ClusterId, NodeId};
use crate::sim::RandomSource;

#[derive(Debug, Clone, Default)]
pub struct ClusterPartition {
    clusters: BTreeMap<ClusterId, BTreeSet<NodeId>>,
    /// assignment[node] = 节点当前所属簇
    assignment: Vec<ClusterId>,
    next_id: u64,
}

impl ClusterPartition {
    /// 为每个节点在 [0, n) 中均匀选择一个候选簇 ID（balls-into-bins）。
    /// 未被选中的候选 ID 不会出现在划分中。
    pub fn initialize<R: RandomSource + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut clusters: BTreeMap<ClusterId, BTreeSet<NodeId>> = BTreeMap::new();
        let mut assignment = Vec::with_capacity(n);
        for i in 0..n {
            let cl = ClusterId(rng.uniform_int(n) as u64);
            clusters.entry(cl).or_default().insert(NodeId(i));
            assignment.push(cl);
        }
        Self {
            clusters,
            assignment,
            next_id: n as u64,
        }
    }

    /// 由显式分配构建：`assignment[i]` 为节点 i 的簇 ID。
    ///
    /// 计数器从 `max(n, max_id + 1)` 开始，保证后续分配不会撞上已有 ID。
    pub fn from_assignment(assignment: Vec<ClusterId>) -> Self {
        let mut clusters: BTreeMap<ClusterId, BTreeSet<NodeId>> = BTreeMap::new();
        for (i, &cl) in assignment.iter().enumerate() {
            clusters.entry(cl).or_default().insert(NodeId(i));
        }
        let floor = assignment.iter().map(|c| c.0 + 1).max().unwrap_or(0);
        let next_id = floor.max(assignment.len() as u64);
        Self {
            clusters,
            assignment,
            next_id,
        }
    }

    fn alloc_id(&mut self) -> ClusterId {
        let id = ClusterId(self.next_id);
        self.next_id += 1;
        id
    }

    /// 将簇完全碎裂为单点簇：每个成员获得一个新分配的 ID，原 ID 被丢弃。
    ///
    /// 单点簇也会被重新编号。返回 (成员, 新簇) 列表，按成员 ID 升序；
    /// 簇不存在时返回空列表。
    pub fn split(&mut self, id: ClusterId) -> Vec<(NodeId, ClusterId)> {
        let Some(members) = self.clusters.remove(&id) else {
            return Vec::new();
        };
        let mut moved = Vec::with_capacity(members.len());
        for n in members {
            let fresh = self.alloc_id();
            self.assignment[n.0] = fresh;
            self.clusters.insert(fresh, BTreeSet::from([n]));
            moved.push((n, fresh));
        }
        trace!(cluster = id.0, pieces = moved.len(), "簇碎裂");
        moved
    }

    /// 将 `b` 的全部成员并入 `a`，`a` 的 ID 保留（左操作数胜出）。
    ///
    /// `a == b` 或任一簇不存在时为 no-op，返回 false。
    pub fn union(&mut self, a: ClusterId, b: ClusterId) -> bool {
        if a == b || !self.clusters.contains_key(&a) {
            return false;
        }
        let Some(moved) = self.clusters.remove(&b) else {
            return false;
        };
        for &n in &moved {
            self.assignment[n.0] = a;
        }
        trace!(into = a.0, from = b.0, moved = moved.len(), "簇合并");
        if let Some(dst) = self.clusters.get_mut(&a) {
            dst.extend(moved);
        }
        true
    }

    pub fn cluster_of(&self, node: NodeId) -> ClusterId {
        self.assignment[node.0]
    }

    pub fn members_of(&self, id: ClusterId) -> Option<&BTreeSet<NodeId>> {
        self.clusters.get(&id)
    }

    /// 簇大小；不存在的簇大小为 0。
    pub fn size_of(&self, id: ClusterId) -> usize {
        self.clusters.get(&id).map_or(0, BTreeSet::len)
    }

    pub fn contains(&self, id: ClusterId) -> bool {
        self.clusters.contains_key(&id)
    }

    /// 最大簇；并列时取 ID 最小者。没有任何簇时返回 None。
    pub fn largest(&self) -> Option<ClusterId> {
        let mut best: Option<(ClusterId, usize)> = None;
        for (&id, members) in &self.clusters {
            // 升序遍历 + 严格大于 => 并列时保留较小 ID
            if best.is_none_or(|(_, size)| members.len() > size) {
                best = Some((id, members.len()));
            }
        }
        best.map(|(id, _)| id)
    }

    /// 当前簇数
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn node_count(&self) -> usize {
        self.assignment.len()
    }

    /// 下一个将被分配的簇 ID
    pub fn next_id(&self) -> ClusterId {
        ClusterId(self.next_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClusterId, &BTreeSet<NodeId>)> {
        self.clusters.iter().map(|(&id, m)| (id, m))
    }

    /// 两个不同的随机节点落在同一簇的概率：Σ k(k-1)/2 ÷ N(N-1)/2。
    pub fn same_cluster_probability(&self) -> f64 {
        let n = self.assignment.len() as f64;
        if n < 2.0 {
            return 0.0;
        }
        let pairs: f64 = self
            .clusters
            .values()
            .map(|m| {
                let k = m.len() as f64;
                k * (k - 1.0) / 2.0
            })
            .sum();
        pairs / (n * (n - 1.0) / 2.0)
    }
}
