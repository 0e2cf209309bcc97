pub mod planner;
pub mod ticks;
