//! Simulated vehicle driving the replan trigger at a fixed rate.
//!
//! Stands in for the pose/goal messaging layer: goals come from a scenario
//! file one at a time, and the pose moves along the current plan at cruise
//! speed every tick.

use std::collections::VecDeque;
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use swiftlet_plan::occupancy::VoxelMap;
use swiftlet_plan::pathfinding::astar::SENSING_CLAMP_FACTOR;
use swiftlet_plan::{ReplanTrigger, SearchContext, SwiftletConfig, TickOutcome, WorldPoint};

use crate::error::Result;
use crate::scenario::Scenario;

/// Planning attempts per goal before it is skipped
const MAX_ATTEMPTS_PER_GOAL: usize = 3;

/// What happened on a logged tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Planned,
    Failed,
    Reached,
    Skipped,
}

/// One logged event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanRecord {
    pub tick: u64,
    pub time: f64,
    pub kind: RecordKind,
    pub pose: WorldPoint,
    pub goal: WorldPoint,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waypoints: Vec<WorldPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default)]
    pub nodes_expanded: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a whole run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub scenario: String,
    pub ticks: u64,
    pub sim_time: f64,
    pub goals_reached: usize,
    pub goals_skipped: usize,
    pub plans: usize,
    pub failures: usize,
    pub final_pose: WorldPoint,
    pub records: Vec<PlanRecord>,
}

impl RunSummary {
    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{}: {} reached, {} skipped, {} plans, {} failures in {} ticks ({:.2}s sim)",
            self.scenario,
            self.goals_reached,
            self.goals_skipped,
            self.plans,
            self.failures,
            self.ticks,
            self.sim_time
        )
    }

    /// Write the summary as YAML
    pub fn write(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

/// Fixed-rate replanning loop over a scenario
pub struct Simulator {
    ctx: SearchContext,
    trigger: ReplanTrigger,
    map: VoxelMap,
    pose: WorldPoint,
    goals: VecDeque<WorldPoint>,
    active_goal: Option<WorldPoint>,
    attempts: usize,
    following: bool,
    cursor: usize,
    dt: f64,
    speed: f64,
    tick: u64,
    summary: RunSummary,
}

impl Simulator {
    /// Build the map and planner for a scenario.
    ///
    /// The search step follows the scenario's map resolution.
    pub fn new(config: &SwiftletConfig, scenario: &Scenario) -> Result<Self> {
        config.validate()?;

        let mut planner = config.to_planner_config();
        if planner.step_size != scenario.world.resolution {
            info!(
                "[Sim] Using map resolution {:.3} as search step (config {:.3})",
                scenario.world.resolution, planner.step_size
            );
            planner.step_size = scenario.world.resolution;
        }
        if !planner.covers_sensing_range() {
            warn!(
                "[Sim] Pool reach {:.2} is below half the clamped sensing range {:.2}, endpoints will be clamped to the pool border",
                planner.pool_reach(),
                planner.sensing_range * SENSING_CLAMP_FACTOR / 2.0
            );
        }
        let ctx = SearchContext::new(planner)?;

        let map = scenario.build_map();
        info!(
            "[Sim] Scenario '{}': map {:?} voxels, {} occupied, {} goals",
            scenario.name,
            map.dims(),
            map.occupied_count(),
            scenario.goals.len()
        );

        Ok(Self {
            ctx,
            trigger: ReplanTrigger::new(config.to_replan_config()),
            map,
            pose: scenario.start,
            goals: scenario.goals.iter().copied().collect(),
            active_goal: None,
            attempts: 0,
            following: false,
            cursor: 0,
            dt: 1.0 / config.navigation.loop_rate_hz,
            speed: config.navigation.cruise_speed,
            tick: 0,
            summary: RunSummary {
                scenario: scenario.name.clone(),
                final_pose: scenario.start,
                ..Default::default()
            },
        })
    }

    /// Run one control tick. Returns false once every goal is done.
    pub fn step(&mut self) -> bool {
        self.trigger.on_pose(self.pose);

        let goal = match self.active_goal {
            Some(goal) => goal,
            None => {
                let Some(goal) = self.goals.pop_front() else {
                    return false;
                };
                info!("[Sim] Next goal {}", goal);
                self.active_goal = Some(goal);
                self.attempts = 0;
                self.trigger.on_goal(goal);
                goal
            }
        };

        match self.trigger.tick(&mut self.ctx, &self.map) {
            TickOutcome::Idle => {}
            TickOutcome::Reached => {
                info!("[Sim] Reached {} at tick {}", goal, self.tick);
                self.record(RecordKind::Reached, goal, None);
                self.summary.goals_reached += 1;
                self.active_goal = None;
                self.following = false;
            }
            TickOutcome::Planned => {
                self.summary.plans += 1;
                let (len, waypoints, cost, expanded) = match self.trigger.current_plan() {
                    Some(plan) => (
                        plan.len(),
                        plan.waypoints.clone(),
                        plan.cost,
                        plan.stats.nodes_expanded,
                    ),
                    None => (0, Vec::new(), 0.0, 0),
                };
                self.summary.records.push(PlanRecord {
                    tick: self.tick,
                    time: self.time(),
                    kind: RecordKind::Planned,
                    pose: self.pose,
                    goal,
                    waypoints,
                    cost: Some(cost),
                    nodes_expanded: expanded,
                    error: None,
                });

                if len <= 1 {
                    // Already at the end of what the planner can reach
                    self.fail_attempt(goal, "plan makes no progress".to_string());
                } else {
                    self.cursor = 0;
                    self.following = true;
                }
            }
            TickOutcome::Failed(e) => {
                self.summary.failures += 1;
                self.fail_attempt(goal, e.to_string());
            }
        }

        self.advance();
        self.tick += 1;
        true
    }

    /// Run until all goals are done or `max_ticks` elapse.
    ///
    /// With `realtime`, each tick is padded to the loop interval.
    pub fn run(mut self, max_ticks: u64, realtime: bool) -> RunSummary {
        let interval = Duration::from_secs_f64(self.dt);

        while self.tick < max_ticks {
            let tick_start = Instant::now();
            if !self.step() {
                break;
            }
            if realtime {
                let elapsed = tick_start.elapsed();
                if elapsed < interval {
                    std::thread::sleep(interval - elapsed);
                }
            }
        }

        if self.tick >= max_ticks && (self.active_goal.is_some() || !self.goals.is_empty()) {
            warn!(
                "[Sim] Stopped after {} ticks with {} goals outstanding",
                self.tick,
                self.goals.len() + usize::from(self.active_goal.is_some())
            );
        }

        self.summary.ticks = self.tick;
        self.summary.sim_time = self.time();
        self.summary.final_pose = self.pose;
        self.summary
    }

    fn time(&self) -> f64 {
        self.tick as f64 * self.dt
    }

    fn record(&mut self, kind: RecordKind, goal: WorldPoint, error: Option<String>) {
        self.summary.records.push(PlanRecord {
            tick: self.tick,
            time: self.time(),
            kind,
            pose: self.pose,
            goal,
            waypoints: Vec::new(),
            cost: None,
            nodes_expanded: self.ctx.last_stats().nodes_expanded,
            error,
        });
    }

    fn fail_attempt(&mut self, goal: WorldPoint, reason: String) {
        self.attempts += 1;
        if self.attempts >= MAX_ATTEMPTS_PER_GOAL {
            warn!(
                "[Sim] Skipping goal {} after {} attempts: {}",
                goal, self.attempts, reason
            );
            self.record(RecordKind::Skipped, goal, Some(reason));
            self.summary.goals_skipped += 1;
            self.active_goal = None;
            self.following = false;
        } else {
            debug!("[Sim] Attempt {} for {} failed: {}", self.attempts, goal, reason);
            self.record(RecordKind::Failed, goal, Some(reason));
            self.trigger.on_goal(goal);
        }
    }

    /// Move along the current plan by one tick of travel.
    fn advance(&mut self) {
        if !self.following {
            return;
        }
        let Some(plan) = self.trigger.current_plan() else {
            return;
        };

        let mut budget = self.speed * self.dt;
        while budget > 0.0 && self.cursor < plan.waypoints.len() {
            let target = plan.waypoints[self.cursor];
            let d = self.pose.distance(&target);
            if d <= budget {
                self.pose = target;
                budget -= d;
                self.cursor += 1;
            } else {
                self.pose = self.pose + (target - self.pose) * (budget / d);
                budget = 0.0;
            }
        }

        if self.cursor >= plan.waypoints.len() {
            self.following = false;
            // Plan used up: ask again, which either reports the goal reached
            // or plans the next leg
            if let Some(goal) = self.active_goal {
                debug!("[Sim] Plan finished at {}, re-requesting {}", self.pose, goal);
                self.trigger.on_goal(goal);
            }
        }
    }
}
