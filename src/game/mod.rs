mod contracts;
mod error;
mod names;
mod session;
mod types;

pub use contracts::{Contract, GuessContract, GuessIsKnown, SessionInProgress};
pub use error::SessionError;
pub use names::{ValidNameSet, canonical_name};
pub use session::{DEFAULT_ATTEMPT_BUDGET, GameSession, SessionSettings};
pub use types::{GuessOutcome, SessionId, SessionStatus};
