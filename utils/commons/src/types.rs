use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Wrapping the custom errors in a type with CIS-2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

/// The auction pool is denominated in a single fungible CIS-2 token, so the
/// unit token ID is used everywhere.
pub type ContractTokenId = TokenIdUnit;

pub type ContractTokenAmount = TokenAmountU64;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;

/// Parameter type for the CIS-2 `balanceOf` query specialized to the pool
/// token.
pub type ContractBalanceOfQueryParams = BalanceOfQueryParams<ContractTokenId>;

pub type ContractBalanceOfQueryResponse = BalanceOfQueryResponse<ContractTokenAmount>;
