pub use oracle_queue::*;
pub use raffle::*;
pub use treasury::*;

pub mod oracle_queue;
pub mod raffle;
pub mod treasury;
