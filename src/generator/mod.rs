pub mod agent_executor;
pub mod compose;
pub mod context;
pub mod interview;
pub mod outlet;
pub mod plan;
pub mod step_forward_agent;
pub mod workflow;
