mod config;
mod driver;
mod rng;

use crate::model::{ClusterId, ClusterPartition, ClusterWorld, Color, NodeId, Population};

/// 簇快照：(簇, 有序成员) 列表，便于整体比较
pub(crate) fn clusters_of(p: &ClusterPartition) -> Vec<(ClusterId, Vec<NodeId>)> {
    p.iter()
        .map(|(id, m)| (id, m.iter().copied().collect()))
        .collect()
}

/// 由显式簇分配构建世界，所有节点为蓝色
pub(crate) fn world_from(assignment: &[u64]) -> ClusterWorld {
    let population = Population::from_colors(assignment.iter().map(|_| Color::Blue));
    let partition =
        ClusterPartition::from_assignment(assignment.iter().map(|&c| ClusterId(c)).collect());
    ClusterWorld::new(population, partition)
}
