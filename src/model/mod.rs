//! 种群与簇结构模块
//!
//! 此模块包含节点、种群、簇划分、感染簇索引，以及把三者绑在一起的世界。

// 子模块声明
mod id;
mod infection;
mod node;
mod partition;
mod population;
mod world;

// 重新导出公共接口
pub use id::{ClusterId, NodeId};
pub use infection::InfectionIndex;
pub use node::{Color, Health, Node};
pub use partition::ClusterPartition;
pub use population::Population;
pub use world::ClusterWorld;
