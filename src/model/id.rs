//! 标识符类型
//!
//! 定义节点和簇的唯一标识符。

use serde::{Deserialize, Serialize};

/// 节点标识符（0..N-1，稳定不变）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// 簇标识符：由单调递增计数器分配，永不复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClusterId(pub u64);
