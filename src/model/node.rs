//! 节点定义
//!
//! 节点的颜色（类型）不可变；健康状态只允许 S -> I -> R 单调转移。

use serde::{Deserialize, Serialize};

use super::id::NodeId;

/// 节点颜色（二元类型），决定碎裂/合并概率。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Blue,
    Red,
}

/// 健康状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    Susceptible,
    Infected,
    Recovered,
}

impl Health {
    /// 是否允许从 `self` 转移到 `next`。
    pub fn can_become(self, next: Health) -> bool {
        matches!(
            (self, next),
            (Health::Susceptible, Health::Infected) | (Health::Infected, Health::Recovered)
        )
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    color: Color,
    pub(crate) health: Health,
}

impl Node {
    pub fn new(id: NodeId, color: Color) -> Self {
        Self {
            id,
            color,
            health: Health::Susceptible,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn health(&self) -> Health {
        self.health
    }
}
