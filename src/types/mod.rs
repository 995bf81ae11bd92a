pub mod analyst;
pub mod interview;
pub mod report;

pub use analyst::{Analyst, GenerateAnalystsState, Perspectives};
pub use interview::{InterviewState, InterviewTurn, TurnRole};
pub use report::ResearchGraphState;
