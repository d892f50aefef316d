//! 仿真驱动器
//!
//! 三阶段协议：热化 -> 播种 -> 疫情循环，最终产出 `RunReport`。

use tracing::{debug, info};

use super::config::SimConfig;
use super::engine::{DynamicsEngine, TickOutcome};
use super::report::{BatchReport, Burnout, RunReport};
use super::rng::{RandomSource, SimRng};
use super::time::Tick;
use crate::error::SimError;
use crate::model::{ClusterId, ClusterPartition, ClusterWorld, Population};

/// 播种结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeding {
    pub cluster: ClusterId,
    pub size: usize,
    pub infected: usize,
}

/// 单次运行的驱动器：独占自己的随机源与三种核心结构。
pub struct SimulationDriver {
    cfg: SimConfig,
    engine: DynamicsEngine,
    world: ClusterWorld,
    rng: SimRng,
    now: Tick,
}

impl SimulationDriver {
    /// 按配置构建；未指定 seed 时随机生成一个。
    pub fn new(cfg: SimConfig) -> Result<Self, SimError> {
        let seed = cfg.seed.unwrap_or_else(rand::random);
        Self::with_rng(cfg, SimRng::new(seed))
    }

    /// 使用给定随机源构建种群与初始划分。
    pub fn with_rng(cfg: SimConfig, mut rng: SimRng) -> Result<Self, SimError> {
        cfg.validate()?;
        let population = Population::new(cfg.n, cfg.p_blue);
        let partition = ClusterPartition::initialize(cfg.n, &mut rng);
        let world = ClusterWorld::new(population, partition);
        Self::from_world(cfg, world, rng)
    }

    /// 使用预先构建好的世界（自定义初始划分/感染）。
    pub fn from_world(cfg: SimConfig, world: ClusterWorld, rng: SimRng) -> Result<Self, SimError> {
        cfg.validate()?;
        Ok(Self {
            engine: DynamicsEngine::from_config(&cfg),
            cfg,
            world,
            rng,
            now: Tick::ZERO,
        })
    }

    pub fn world(&self) -> &ClusterWorld {
        &self.world
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    fn verify(&self, tick: u64) -> Result<(), SimError> {
        if !self.cfg.check_invariants {
            return Ok(());
        }
        self.world
            .check_invariants()
            .map_err(|violation| SimError::Invariant { tick, violation })
    }

    /// 阶段 1：只做碎裂与合并，共 `therm` 个 tick。
    #[tracing::instrument(skip(self), fields(therm = self.cfg.therm))]
    pub fn thermalize(&mut self) -> Result<(), SimError> {
        info!("▶️  开始热化");
        for t in 1..=self.cfg.therm {
            self.engine.thermalize_tick(&mut self.world, &mut self.rng);
            self.verify(t)?;
        }
        info!(
            clusters = self.world.partition.cluster_count(),
            "✅ 热化完成"
        );
        Ok(())
    }

    /// 阶段 2：在最大簇中确定性地感染编号最小的成员，其余成员各以 0.5 概率感染。
    #[tracing::instrument(skip(self))]
    pub fn seed_epidemic(&mut self) -> Result<Seeding, SimError> {
        let cluster = self
            .world
            .partition
            .largest()
            .ok_or(SimError::EmptyPartition)?;
        let members: Vec<_> = self
            .world
            .partition
            .members_of(cluster)
            .map(|m| m.iter().copied().collect())
            .unwrap_or_default();

        let mut infected = 0;
        if let Some((&first, rest)) = members.split_first() {
            infected += usize::from(self.world.infect(first));
            for &m in rest {
                if self.rng.bernoulli(0.5) && self.world.infect(m) {
                    infected += 1;
                }
            }
        }
        self.verify(0)?;

        let seeding = Seeding {
            cluster,
            size: members.len(),
            infected,
        };
        info!(cluster = cluster.0, size = seeding.size, infected, "播种完成");
        Ok(seeding)
    }

    /// 执行一个疫情 tick。
    pub fn step(&mut self) -> Result<TickOutcome, SimError> {
        self.now = self.now.next();
        let out = self.engine.epidemic_tick(&mut self.world, &mut self.rng);
        self.verify(self.now.0)?;
        Ok(out)
    }

    /// 阶段 3：最多 `steps` 个 tick，疾病消亡时提前结束。
    #[tracing::instrument(skip(self), fields(steps = self.cfg.steps))]
    pub fn run_epidemic(&mut self) -> Result<Option<Burnout>, SimError> {
        info!("▶️  开始疫情阶段");
        while self.now.0 < self.cfg.steps {
            let out = self.step()?;
            if out.extinct {
                let recovered_percent =
                    self.world.population.recovered_count() as f64 * 100.0
                        / self.world.population.len() as f64;
                debug!(tick = self.now.0, recovered_percent, "疾病消亡");
                return Ok(Some(Burnout {
                    tick: self.now,
                    recovered_percent,
                }));
            }
        }
        Ok(None)
    }

    /// 完整三阶段运行。
    pub fn run(mut self) -> Result<RunReport, SimError> {
        self.thermalize()?;
        let clusters_after_therm = self.world.partition.cluster_count();
        let same_cluster_probability = self.world.partition.same_cluster_probability();

        let seeding = self.seed_epidemic()?;
        let burnout = self.run_epidemic()?;

        let total_recovered = self.world.population.recovered_count();
        let report = RunReport {
            seed: self.rng.seed(),
            n: self.world.population.len(),
            clusters_after_therm,
            same_cluster_probability,
            seed_cluster_size: seeding.size,
            seeded_infections: seeding.infected,
            burnout,
            ticks_run: self.now.0,
            total_recovered,
            infected_remaining: self.world.population.infected_count(),
            final_ratio: total_recovered as f64 / seeding.size as f64,
        };
        info!(
            ticks = report.ticks_run,
            recovered = report.total_recovered,
            ratio = report.final_ratio,
            "✅ 运行完成"
        );
        Ok(report)
    }
}

/// 执行 `runs` 次独立运行；每次运行从主随机源派生自己的子随机源。
pub fn run_batch(cfg: &SimConfig, runs: usize) -> Result<BatchReport, SimError> {
    cfg.validate()?;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let mut master = SimRng::new(seed);
    let mut reports = Vec::with_capacity(runs);
    for i in 0..runs {
        let rng = master.fork();
        debug!(run = i, seed = rng.seed(), "开始独立运行");
        reports.push(SimulationDriver::with_rng(cfg.clone(), rng)?.run()?);
    }
    Ok(BatchReport::from_runs(seed, reports))
}
