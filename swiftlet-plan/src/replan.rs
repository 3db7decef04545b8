//! Goal-driven replan trigger.
//!
//! Tracks the latest pose and goal and decides, once per control tick,
//! whether to plan. A new goal sets a pending flag; the next tick plans
//! from the current pose unless the vehicle is already there.

use log::{debug, info, warn};

use crate::core::WorldPoint;
use crate::error::PlanError;
use crate::occupancy::OccupancyOracle;
use crate::pathfinding::{PlannedPath, SearchContext};

/// Runtime trigger configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ReplanConfig {
    /// Distance at which the goal counts as reached
    pub goal_tolerance: f64,
    /// Keep planning every tick until the goal is reached
    pub replan_until_reached: bool,
}

impl Default for ReplanConfig {
    fn default() -> Self {
        Self {
            goal_tolerance: 0.1,
            replan_until_reached: false,
        }
    }
}

/// What a tick did
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Nothing pending (or no pose yet)
    Idle,
    /// Pose within tolerance of the goal; pending flag cleared
    Reached,
    /// A new plan replaced the stored one
    Planned,
    /// Planning failed; the previous plan is kept
    Failed(PlanError),
}

/// Pending-goal state machine in front of a [`SearchContext`]
#[derive(Clone, Debug, Default)]
pub struct ReplanTrigger {
    config: ReplanConfig,
    pose: Option<WorldPoint>,
    goal: Option<WorldPoint>,
    pending: bool,
    plan: Option<PlannedPath>,
    plans: usize,
    failures: usize,
}

impl ReplanTrigger {
    /// Create a trigger with no pose, goal or plan
    pub fn new(config: ReplanConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Latest vehicle position
    pub fn on_pose(&mut self, position: WorldPoint) {
        self.pose = Some(position);
    }

    /// New target; the next tick will plan
    pub fn on_goal(&mut self, goal: WorldPoint) {
        debug!("[Replan] New goal {}", goal);
        self.goal = Some(goal);
        self.pending = true;
    }

    /// Whether a plan is owed
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Latest pose, if any
    pub fn pose(&self) -> Option<WorldPoint> {
        self.pose
    }

    /// Latest goal, if any
    pub fn goal(&self) -> Option<WorldPoint> {
        self.goal
    }

    /// Last successful plan
    pub fn current_plan(&self) -> Option<&PlannedPath> {
        self.plan.as_ref()
    }

    /// Successful plans so far
    pub fn plan_count(&self) -> usize {
        self.plans
    }

    /// Failed planning attempts so far
    pub fn failure_count(&self) -> usize {
        self.failures
    }

    /// Whether the pose is within tolerance of the goal
    pub fn goal_reached(&self) -> bool {
        match (self.pose, self.goal) {
            (Some(pose), Some(goal)) => pose.distance(&goal) < self.config.goal_tolerance,
            _ => false,
        }
    }

    /// Run one control tick
    pub fn tick<O>(&mut self, ctx: &mut SearchContext, oracle: &O) -> TickOutcome
    where
        O: OccupancyOracle + ?Sized,
    {
        if !self.pending {
            return TickOutcome::Idle;
        }
        let (Some(pose), Some(goal)) = (self.pose, self.goal) else {
            return TickOutcome::Idle;
        };

        if self.goal_reached() {
            info!("[Replan] Goal {} reached", goal);
            self.pending = false;
            return TickOutcome::Reached;
        }

        let outcome = match ctx.plan(oracle, pose, goal) {
            Ok(plan) => {
                debug!("[Replan] Planned {}", plan);
                self.plan = Some(plan);
                self.plans += 1;
                TickOutcome::Planned
            }
            Err(e) => {
                warn!("[Replan] [{}] {}; keeping previous plan", e.code(), e);
                self.failures += 1;
                TickOutcome::Failed(e)
            }
        };

        if !self.config.replan_until_reached {
            self.pending = false;
        }
        outcome
    }
}
