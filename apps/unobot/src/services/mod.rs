pub mod game_flow;
pub mod outcome;

pub use game_flow::{Actor, UnoService};
pub use outcome::{FollowUp, LogSink, Notice, Outcome, OutcomeSink, Target};
