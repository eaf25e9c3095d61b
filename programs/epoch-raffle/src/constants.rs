/// Length of one epoch's ticket sale window, in seconds.
pub const EPOCH_INTERVAL_SECONDS: i64 = 300;

/// Upper bound on tickets recorded in a single epoch. Sizes the raffle account.
pub const MAX_TICKETS_PER_EPOCH: u32 = 250;

/// How long a randomness request may stay unanswered before anyone can re-issue it.
pub const RANDOMNESS_RETRY_GRACE_SECONDS: i64 = 24 * 60 * 60;

/// Marker returned as upkeep perform data. Never interpreted.
pub const PERFORM_DATA_MARKER: [u8; 1] = [0];

pub const RAFFLE_SEED: &[u8] = b"raffle";
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const ORACLE_QUEUE_SEED: &[u8] = b"oracle_queue";
