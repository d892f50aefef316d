//! 感染簇索引
//!
//! 簇 ID -> 该簇中当前处于 Infected 的成员集合。
//! 一个簇出现在索引中当且仅当它至少含有一个感染成员；
//! 索引随每次感染、康复、碎裂、合并增量更新，不做全量扫描。

use std::collections::{BTreeMap, BTreeSet};

use super::id::{ClusterId, NodeId};

#[derive(Debug, Clone, Default)]
pub struct InfectionIndex {
    by_cluster: BTreeMap<ClusterId, BTreeSet<NodeId>>,
}

impl InfectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 节点在簇 `cluster` 中被感染。
    pub fn on_infected(&mut self, node: NodeId, cluster: ClusterId) {
        self.by_cluster.entry(cluster).or_default().insert(node);
    }

    /// 节点在簇 `cluster` 中康复；集合变空时移除该簇条目。
    pub fn on_recovered(&mut self, node: NodeId, cluster: ClusterId) {
        if let Some(set) = self.by_cluster.get_mut(&cluster) {
            set.remove(&node);
            if set.is_empty() {
                self.by_cluster.remove(&cluster);
            }
        }
    }

    /// 簇 `old` 碎裂为 `pieces`（成员 -> 新单点簇）。
    /// 原簇中的感染成员各自迁入自己的新簇条目。
    pub fn on_split(&mut self, old: ClusterId, pieces: &[(NodeId, ClusterId)]) {
        let Some(infected) = self.by_cluster.remove(&old) else {
            return;
        };
        for &(node, fresh) in pieces {
            if infected.contains(&node) {
                self.by_cluster.entry(fresh).or_default().insert(node);
            }
        }
    }

    /// 簇 `b` 并入 `a`：b 的感染集合并入 a，b 的条目被移除。
    /// 双方都没有感染成员时不会为 a 创建条目。
    pub fn on_union(&mut self, a: ClusterId, b: ClusterId) {
        if a == b {
            return;
        }
        let Some(from_b) = self.by_cluster.remove(&b) else {
            return;
        };
        self.by_cluster.entry(a).or_default().extend(from_b);
    }

    /// 可重复遍历的 (簇, 感染成员) 序列，按簇 ID 升序。
    pub fn infected_clusters(&self) -> impl Iterator<Item = (ClusterId, &BTreeSet<NodeId>)> + '_ {
        self.by_cluster.iter().map(|(&id, set)| (id, set))
    }

    /// 当前含感染成员的簇 ID 快照（真实拷贝，不受后续修改影响）。
    pub fn snapshot_clusters(&self) -> Vec<ClusterId> {
        self.by_cluster.keys().copied().collect()
    }

    pub fn get(&self, cluster: ClusterId) -> Option<&BTreeSet<NodeId>> {
        self.by_cluster.get(&cluster)
    }

    pub fn contains(&self, cluster: ClusterId) -> bool {
        self.by_cluster.contains_key(&cluster)
    }

    pub fn len(&self) -> usize {
        self.by_cluster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_cluster.is_empty()
    }

    /// 索引中的感染节点总数
    pub fn infected_total(&self) -> usize {
        self.by_cluster.values().map(BTreeSet::len).sum()
    }
}
