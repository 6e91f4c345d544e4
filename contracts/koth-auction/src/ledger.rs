//! Adapter over the external CIS-2 token ledger. Every transfer is atomic on
//! the ledger side; failures are propagated, never swallowed.
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

/// Receive function of this contract invoked by the ledger when tokens land
/// in custody.
pub const RECEIVE_HOOK_NAME: &str = "KothAuction.onReceivingCIS2";

/// Pull `amount` of the pool token from `from` into the contract's custody.
/// Requires the contract to be an operator of `from` on the ledger.
pub fn pull_to_self<T>(
    host: &mut impl HasHost<T>,
    ledger: &ContractAddress,
    from: AccountAddress,
    self_address: ContractAddress,
    amount: ContractTokenAmount,
) -> ContractResult<()> {
    transfer(
        host,
        ledger,
        Address::Account(from),
        Receiver::Contract(
            self_address,
            OwnedReceiveName::new_unchecked(RECEIVE_HOOK_NAME.into())
                .as_receive_name()
                .entrypoint_name()
                .into(),
        ),
        amount,
    )
}

/// Move `amount` of the pool token from the contract's custody to an account.
/// Zero-amount transfers are elided.
pub fn push_to_account<T>(
    host: &mut impl HasHost<T>,
    ledger: &ContractAddress,
    self_address: ContractAddress,
    to: AccountAddress,
    amount: ContractTokenAmount,
) -> ContractResult<()> {
    if amount.0 == 0 {
        return Ok(());
    }
    transfer(
        host,
        ledger,
        Address::Contract(self_address),
        Receiver::Account(to),
        amount,
    )
}

fn transfer<T>(
    host: &mut impl HasHost<T>,
    ledger: &ContractAddress,
    from: Address,
    to: Receiver,
    amount: ContractTokenAmount,
) -> ContractResult<()> {
    let parameter: TransferParameter = TransferParams(vec![Transfer {
        token_id: TokenIdUnit(),
        amount,
        from,
        to,
        data: AdditionalData::empty(),
    }]);
    host.invoke_contract(
        ledger,
        &parameter,
        EntrypointName::new_unchecked("transfer"),
        Amount::zero(),
    )
    .map_err(handle_call_error)?;

    Ok(())
}

/// Query the pool token balance held by `holder`.
pub fn balance_of<T>(
    host: &impl HasHost<T>,
    ledger: &ContractAddress,
    holder: Address,
) -> ContractResult<ContractTokenAmount> {
    let parameter = ContractBalanceOfQueryParams {
        queries: vec![BalanceOfQuery {
            token_id: TokenIdUnit(),
            address: holder,
        }],
    };
    let mut response = host
        .invoke_contract_read_only(
            ledger,
            &parameter,
            EntrypointName::new_unchecked("balanceOf"),
            Amount::zero(),
        )
        .map_err(handle_call_error)?
        .ok_or(CustomContractError::Incompatible)?;

    let BalanceOfQueryResponse(amounts) = ContractBalanceOfQueryResponse::deserial(&mut response)
        .map_err(|_| CustomContractError::Incompatible)?;

    match amounts.first() {
        Some(amount) => Ok(*amount),
        None => Err(CustomContractError::Incompatible.into()),
    }
}

fn handle_call_error<R>(error: CallContractError<R>) -> ContractError {
    match error {
        CallContractError::MissingEntrypoint | CallContractError::MissingContract => {
            CustomContractError::Incompatible.into()
        }
        e => CustomContractError::from(e).into(),
    }
}
