//! 簇世界
//!
//! 聚合种群、簇划分与感染索引三者；所有会影响索引的结构/健康事件
//! 都经由这里完成，保证三者同步更新。

use std::collections::BTreeSet;

use tracing::debug;

use super::id::{ClusterId, NodeId};
use super::infection::InfectionIndex;
use super::node::Health;
use super::partition::ClusterPartition;
use super::population::Population;
use crate::error::InvariantViolation;

#[derive(Debug, Clone)]
pub struct ClusterWorld {
    pub(crate) population: Population,
    pub(crate) partition: ClusterPartition,
    pub(crate) index: InfectionIndex,
}

impl ClusterWorld {
    /// 组装世界。种群中已有的感染节点会被写入索引。
    pub fn new(population: Population, partition: ClusterPartition) -> Self {
        debug_assert_eq!(population.len(), partition.node_count());
        let mut index = InfectionIndex::new();
        for &n in population.infected() {
            index.on_infected(n, partition.cluster_of(n));
        }
        Self {
            population,
            partition,
            index,
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn partition(&self) -> &ClusterPartition {
        &self.partition
    }

    pub fn index(&self) -> &InfectionIndex {
        &self.index
    }

    /// S -> I 并登记到索引。
    pub fn infect(&mut self, node: NodeId) -> bool {
        if !self.population.infect(node) {
            return false;
        }
        self.index.on_infected(node, self.partition.cluster_of(node));
        true
    }

    /// I -> R 并从索引移除。
    pub fn recover(&mut self, node: NodeId) -> bool {
        if !self.population.recover(node) {
            return false;
        }
        self.index.on_recovered(node, self.partition.cluster_of(node));
        true
    }

    /// 碎裂 `cluster`，返回产生的单点簇数。
    pub fn split_cluster(&mut self, cluster: ClusterId) -> usize {
        let pieces = self.partition.split(cluster);
        self.index.on_split(cluster, &pieces);
        debug!(cluster = cluster.0, pieces = pieces.len(), "碎裂完成");
        pieces.len()
    }

    /// 将 `b` 并入 `a`；同一簇时不做任何事。
    pub fn merge_clusters(&mut self, a: ClusterId, b: ClusterId) -> bool {
        if !self.partition.union(a, b) {
            return false;
        }
        self.index.on_union(a, b);
        debug!(into = a.0, from = b.0, size = self.partition.size_of(a), "合并完成");
        true
    }

    /// 全量校验划分完整性与索引一致性（O(N log N)，仅用于测试与 --check-invariants）。
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let n = self.population.len();
        let next = self.partition.next_id();
        let mut seen = vec![false; n];

        for (id, members) in self.partition.iter() {
            if members.is_empty() {
                return Err(InvariantViolation::EmptyClusterRetained(id));
            }
            if id >= next {
                return Err(InvariantViolation::IdAboveCounter { id, next });
            }
            let mut infected_here = BTreeSet::new();
            for &m in members {
                if std::mem::replace(&mut seen[m.0], true) {
                    return Err(InvariantViolation::DuplicateMember(m));
                }
                let assigned = self.partition.cluster_of(m);
                if assigned != id {
                    return Err(InvariantViolation::NodeInWrongCluster {
                        node: m,
                        assigned,
                        listed: id,
                    });
                }
                if self.population.health(m) == Health::Infected {
                    infected_here.insert(m);
                }
            }
            match self.index.get(id) {
                None if infected_here.is_empty() => {}
                Some(set) if *set == infected_here => {}
                _ => return Err(InvariantViolation::IndexMismatch(id)),
            }
        }

        if let Some(i) = seen.iter().position(|s| !s) {
            return Err(InvariantViolation::NodeUnassigned(NodeId(i)));
        }
        // 索引里存在但划分中已不存在的簇
        if let Some((id, _)) = self
            .index
            .infected_clusters()
            .find(|(id, _)| !self.partition.contains(*id))
        {
            return Err(InvariantViolation::IndexMismatch(id));
        }
        let indexed = self.index.infected_total();
        let tracked = self.population.infected_count();
        if indexed != tracked {
            return Err(InvariantViolation::HealthCountMismatch { tracked, indexed });
        }
        Ok(())
    }
}
