//! 仿真核心模块
//!
//! 此模块包含随机源、配置、每 tick 的动力学引擎，以及三阶段仿真驱动器。

// 子模块声明
mod config;
mod driver;
mod engine;
mod report;
mod rng;
mod time;

// 重新导出公共接口
pub use config::SimConfig;
pub use driver::{Seeding, SimulationDriver, run_batch};
pub use engine::{DynamicsEngine, TickOutcome};
pub use report::{BatchReport, Burnout, RunReport};
pub use rng::{RandomSource, SimRng};
pub use time::Tick;
