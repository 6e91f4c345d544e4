use crate::state::{GameParameters, Round};
use commons::*;
use concordium_std::*;

/// Type of the parameter to the `init` function.
#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// CIS-2 token contract holding the bid asset.
    pub ledger: ContractAddress,
    /// Randomness oracle contract.
    pub oracle: ContractAddress,
    /// Dead account receiving burned tokens.
    pub burn_address: AccountAddress,
    /// Initial game configuration.
    pub params: GameParameters,
}

/// Parameter of the `setTimeIncreaseRange` entry point.
#[derive(Debug, Serialize, SchemaType)]
pub struct TimeIncreaseRangeParams {
    /// Inclusive lower bound of the randomized extension.
    pub min: Duration,
    /// Inclusive upper bound of the randomized extension.
    pub max: Duration,
}

/// Return type of the `claimReward` entry point.
#[derive(Debug, PartialEq, Eq, Serialize, SchemaType)]
pub struct ClaimOutcome {
    /// The crowned account all proceeds were routed to.
    pub winner: AccountAddress,
    /// The winner's share of the pool.
    pub amount: ContractTokenAmount,
}

/// Return type of the `view` entry point.
#[derive(Debug, Serialize, SchemaType)]
pub struct ViewResult {
    pub round: Round,
    pub params: GameParameters,
}
