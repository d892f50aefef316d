//! 种群模型
//!
//! 固定大小的节点数组，拥有节点身份、颜色与健康状态；
//! 同时维护当前感染节点集合与累计康复数。

use std::collections::BTreeSet;

use super::id::NodeId;
use super::node::{Color, Health, Node};

#[derive(Debug, Clone)]
pub struct Population {
    nodes: Vec<Node>,
    /// 当前处于 Infected 的节点（有序，保证迭代顺序可复现）
    infected: BTreeSet<NodeId>,
    recovered: usize,
}

impl Population {
    /// 构建 `n` 个节点：`i < n * p_blue` 的节点为蓝色，其余为红色。
    pub fn new(n: usize, p_blue: f64) -> Self {
        let blue_cut = n as f64 * p_blue;
        let nodes = (0..n)
            .map(|i| {
                let color = if (i as f64) < blue_cut {
                    Color::Blue
                } else {
                    Color::Red
                };
                Node::new(NodeId(i), color)
            })
            .collect();
        Self {
            nodes,
            infected: BTreeSet::new(),
            recovered: 0,
        }
    }

    /// 由显式颜色序列构建（测试与自定义场景使用）。
    pub fn from_colors(colors: impl IntoIterator<Item = Color>) -> Self {
        let nodes = colors
            .into_iter()
            .enumerate()
            .map(|(i, c)| Node::new(NodeId(i), c))
            .collect();
        Self {
            nodes,
            infected: BTreeSet::new(),
            recovered: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn color(&self, id: NodeId) -> Color {
        self.nodes[id.0].color()
    }

    pub fn health(&self, id: NodeId) -> Health {
        self.nodes[id.0].health
    }

    /// S -> I。节点不是易感状态时返回 false 且不做任何修改。
    pub fn infect(&mut self, id: NodeId) -> bool {
        let node = &mut self.nodes[id.0];
        if !node.health.can_become(Health::Infected) {
            return false;
        }
        node.health = Health::Infected;
        self.infected.insert(id);
        true
    }

    /// I -> R。节点不是感染状态时返回 false 且不做任何修改。
    pub fn recover(&mut self, id: NodeId) -> bool {
        let node = &mut self.nodes[id.0];
        if !node.health.can_become(Health::Recovered) {
            return false;
        }
        node.health = Health::Recovered;
        self.infected.remove(&id);
        self.recovered += 1;
        true
    }

    pub fn infected(&self) -> &BTreeSet<NodeId> {
        &self.infected
    }

    pub fn infected_count(&self) -> usize {
        self.infected.len()
    }

    pub fn recovered_count(&self) -> usize {
        self.recovered
    }
}
