//! Default value functions for serde deserialization.

pub fn step_size() -> f64 {
    0.1
}

pub fn pool_size() -> i64 {
    100
}

pub fn sensing_range() -> f64 {
    10.0
}

pub fn tie_breaker() -> f64 {
    1.0001
}

pub fn slow_search_warn_secs() -> f64 {
    0.1
}

pub fn collinear_angle() -> f64 {
    0.05
}

pub fn goal_tolerance() -> f64 {
    0.1
}

pub fn loop_rate_hz() -> f64 {
    20.0
}

pub fn cruise_speed() -> f64 {
    1.0
}

pub fn max_ticks() -> u64 {
    2_000
}
