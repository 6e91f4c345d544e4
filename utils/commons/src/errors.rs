use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Only account addresses can place bids or claim rewards (Error code: -4).
    OnlyAccountAddress,
    /// A settled round has a winner that has not claimed yet (Error code: -5).
    UnclaimedWinner,
    /// The cooldown after the previous round has not elapsed (Error code: -6).
    CoolDownActive,
    /// The sender is banned from bidding (Error code: -7).
    Blacklisted,
    /// The winner of the previous round sits out the current one
    /// (Error code: -8).
    PreviousWinnerExcluded,
    /// No round has finished unchallenged, nothing to claim (Error code: -9).
    NoWinner,
    /// The extension bounds are not ordered or exceed the hard ceiling
    /// (Error code: -10).
    InvalidTimeRange,
    /// The bid amount must be positive (Error code: -11).
    InvalidBidAmount,
    /// Timestamp arithmetic overflowed (Error code: -12).
    InvalidDuration,
    /// A fund-moving entry point was re-entered from one of its own external
    /// calls (Error code: -13).
    ReentrantCall,
    /// Configuration can only change between rounds (Error code: -14).
    RoundInProgress,
    /// Failed to invoke a contract (Error code: -15).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -16).
    InvokeTransferError,
    /// A collaborator contract returned an unusable response
    /// (Error code: -17).
    Incompatible,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfer invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Mapping CustomContractError to ContractError.
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}

/// Failure of a read-only query to a collaborator contract.
#[derive(Debug)]
pub enum ContractReadError<R> {
    Call(CallContractError<R>),
    Compatibility,
    Parse,
}

impl<R> From<ContractReadError<R>> for CustomContractError {
    fn from(e: ContractReadError<R>) -> Self {
        match e {
            ContractReadError::Call(_) => Self::InvokeContractError,
            ContractReadError::Compatibility | ContractReadError::Parse => Self::Incompatible,
        }
    }
}
