//! 错误类型
//!
//! 配置错误在仿真开始前被拒绝；不变量违例属于程序错误，运行直接中止。

use thiserror::Error;

use crate::model::{ClusterId, NodeId};

/// 配置校验错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population size N must be > 0")]
    ZeroPopulation,
    #[error("{name} must be a probability in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
}

/// 划分/索引/健康状态之间的一致性违例
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("node {0:?} is not a member of any cluster")]
    NodeUnassigned(NodeId),
    #[error("node {node:?} is assigned to {assigned:?} but listed under {listed:?}")]
    NodeInWrongCluster {
        node: NodeId,
        assigned: ClusterId,
        listed: ClusterId,
    },
    #[error("node {0:?} appears in more than one cluster")]
    DuplicateMember(NodeId),
    #[error("cluster {0:?} is empty but still present")]
    EmptyClusterRetained(ClusterId),
    #[error("cluster id {id:?} is not below the allocation counter {next:?}")]
    IdAboveCounter { id: ClusterId, next: ClusterId },
    #[error("infection index for {0:?} does not match the cluster's infected members")]
    IndexMismatch(ClusterId),
    #[error("population tracks {tracked} infected nodes, index holds {indexed}")]
    HealthCountMismatch { tracked: usize, indexed: usize },
}

/// 仿真运行错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("partition has no clusters")]
    EmptyPartition,
    #[error("invariant violated at tick {tick}: {violation}")]
    Invariant {
        tick: u64,
        violation: InvariantViolation,
    },
}
