use commons::*;
use concordium_std::*;

use crate::events::*;
use crate::external::*;
use crate::ledger;
use crate::oracle::HostRandomnessExt;
use crate::state::{GameParameters, State};

/// Initialize the auction in the idle state with the given collaborator
/// addresses and game configuration.
#[init(contract = "KothAuction", parameter = "InitParams")]
fn contract_init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let init_params = InitParams::deserial(&mut ctx.parameter_cursor())?;
    init_params.params.validate()?;
    Ok(State::new(
        state_builder,
        init_params.params,
        init_params.ledger,
        init_params.oracle,
        init_params.burn_address,
    ))
}

/// Admit a bid: pull the fixed bid amount from the sender, burn a tenth of it
/// right away, and push the countdown out to the base delay plus a randomized
/// extension. The base delay is re-added on every bid, not just the first
/// one; the pot compounds deliberately.
///
/// It rejects if:
/// - the sender is a contract rather than an account,
/// - a settled round still has an unclaimed winner,
/// - the cooldown after the previous round has not elapsed,
/// - the sender is banned or won the previous round,
/// - the ledger transfer or the oracle call fails.
#[receive(
    contract = "KothAuction",
    name = "placeBid",
    mutable,
    enable_logger,
    return_value = "Timestamp"
)]
fn contract_place_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<Timestamp> {
    let bidder = match ctx.sender() {
        Address::Account(account) => account,
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress.into()),
    };
    let now = ctx.metadata().slot_time();
    let self_address = ctx.self_address();

    let state = host.state_mut();
    ensure!(!state.locked, CustomContractError::ReentrantCall.into());
    state.check_admission(&bidder, now)?;

    // A fresh round starts with the base delay alone; the randomized end time
    // below replaces this before the call returns.
    if state.round.last_bidder.is_none() {
        state.round.auction_end_time = now
            .checked_add(state.params.end_delay)
            .ok_or(CustomContractError::InvalidDuration)?;
    }

    let bid_amount = state.params.bid_amount;
    let burn_amount = bid_burn_amount(bid_amount);
    let ledger_address = state.ledger;
    let oracle_address = state.oracle;
    let burn_address = state.burn_address;
    state.locked = true;

    ledger::pull_to_self(host, &ledger_address, bidder, self_address, bid_amount)?;
    ledger::push_to_account(host, &ledger_address, self_address, burn_address, burn_amount)?;

    let random = host
        .get_random_value(&oracle_address)
        .map_err(CustomContractError::from)?;

    let state = host.state_mut();
    let extension = state.extension_from(random);
    let end_time = now
        .checked_add(state.params.end_delay)
        .and_then(|t| t.checked_add(extension))
        .ok_or(CustomContractError::InvalidDuration)?;
    state.round.amount_burned.0 += burn_amount.0;
    state.record_bid(bidder, end_time);
    state.locked = false;

    logger.log(&AuctionEvent::BidPlaced(BidPlacedEvent {
        bidder,
        amount: bid_amount,
        end_time,
    }))?;
    logger.log(&AuctionEvent::TokensBurned(TokensBurnedEvent {
        amount: burn_amount,
    }))?;

    Ok(end_time)
}

/// Settle a finished round. Anyone may trigger settlement, but the pool is
/// distributed to the recorded winner: 60% to the winner, 20% retained in
/// custody to seed the next round, 5% to the treasury, and the exact
/// remainder to the burn sink. The round resets and the cooldown starts in
/// the same atomic step.
#[receive(
    contract = "KothAuction",
    name = "claimReward",
    mutable,
    enable_logger,
    return_value = "ClaimOutcome"
)]
fn contract_claim_reward<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<ClaimOutcome> {
    if let Address::Contract(_) = ctx.sender() {
        bail!(CustomContractError::OnlyAccountAddress.into());
    }
    let now = ctx.metadata().slot_time();
    let self_address = ctx.self_address();

    let state = host.state_mut();
    ensure!(!state.locked, CustomContractError::ReentrantCall.into());
    ensure!(
        state.round.has_winner(now),
        CustomContractError::NoWinner.into()
    );
    let winner = state
        .round
        .last_bidder
        .ok_or(CustomContractError::NoWinner)?;
    let ledger_address = state.ledger;
    let burn_address = state.burn_address;
    let treasury_address = state.params.treasury_address;
    state.locked = true;

    let total = ledger::balance_of(host, &ledger_address, Address::Contract(self_address))?;
    let shares = settlement_shares(total);

    ledger::push_to_account(host, &ledger_address, self_address, winner, shares.winner)?;
    ledger::push_to_account(
        host,
        &ledger_address,
        self_address,
        treasury_address,
        shares.treasury,
    )?;
    ledger::push_to_account(host, &ledger_address, self_address, burn_address, shares.burn)?;
    // The next-round seed never leaves custody.

    let state = host.state_mut();
    state.round.amount_burned.0 += shares.burn.0;
    state.finish_round(now)?;
    state.locked = false;

    logger.log(&AuctionEvent::WinnerClaimed(WinnerClaimedEvent {
        winner,
        amount: shares.winner,
    }))?;
    logger.log(&AuctionEvent::TokensBurned(TokensBurnedEvent {
        amount: shares.burn,
    }))?;

    Ok(ClaimOutcome {
        winner,
        amount: shares.winner,
    })
}

/// Hook invoked by the ledger when tokens are transferred into custody.
/// Custody is tracked on the ledger itself, so nothing is recorded here.
#[receive(contract = "KothAuction", name = "onReceivingCIS2")]
fn contract_on_cis2_received<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure!(
        ctx.sender() == Address::Contract(host.state().ledger),
        ContractError::Unauthorized
    );
    Ok(())
}

/// View function telling whether the current round has finished unchallenged.
#[receive(contract = "KothAuction", name = "hasWinner", return_value = "bool")]
fn contract_has_winner<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<bool> {
    Ok(host.state().round.has_winner(ctx.metadata().slot_time()))
}

/// View function returning the current round and game configuration.
#[receive(contract = "KothAuction", name = "view", return_value = "ViewResult")]
fn contract_view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ViewResult> {
    let state = host.state();
    Ok(ViewResult {
        round: state.round.clone(),
        params: state.params.clone(),
    })
}

/// View function telling whether an account is banned from bidding.
#[receive(
    contract = "KothAuction",
    name = "isBanned",
    parameter = "AccountAddress",
    return_value = "bool"
)]
fn contract_is_banned<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<bool> {
    let address: AccountAddress = ctx.parameter_cursor().get()?;
    Ok(host.state().blacklist.contains(&address))
}

fn ensure_owner(ctx: &impl HasReceiveContext) -> ContractResult<()> {
    ensure!(
        ctx.sender().matches_account(&ctx.owner()),
        ContractError::Unauthorized
    );
    Ok(())
}

/// Configuration changes only between rounds: no outstanding bid, which also
/// covers the settled-but-unclaimed case.
fn ensure_between_rounds<S: HasStateApi>(state: &State<S>) -> ContractResult<()> {
    ensure!(
        state.round.last_bidder.is_none(),
        CustomContractError::RoundInProgress.into()
    );
    Ok(())
}

/// Update the inclusive bounds of the randomized extension. Owner-only,
/// between rounds.
#[receive(
    contract = "KothAuction",
    name = "setTimeIncreaseRange",
    parameter = "TimeIncreaseRangeParams",
    mutable,
    enable_logger
)]
fn contract_set_time_increase_range<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure_owner(ctx)?;
    let range: TimeIncreaseRangeParams = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    ensure_between_rounds(state)?;
    GameParameters::validate_range(range.min, range.max)?;
    state.params.min_time_increase = range.min;
    state.params.max_time_increase = range.max;
    logger.log(&AuctionEvent::ParametersUpdated(ParametersUpdatedEvent {
        params: state.params.clone(),
    }))?;
    Ok(())
}

/// Update the base duration added on every bid. Owner-only, between rounds.
#[receive(
    contract = "KothAuction",
    name = "setEndDelay",
    parameter = "Duration",
    mutable,
    enable_logger
)]
fn contract_set_end_delay<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure_owner(ctx)?;
    let delay: Duration = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    ensure_between_rounds(state)?;
    state.params.end_delay = delay;
    logger.log(&AuctionEvent::ParametersUpdated(ParametersUpdatedEvent {
        params: state.params.clone(),
    }))?;
    Ok(())
}

/// Update the mandatory quiet period between rounds. Owner-only, between
/// rounds.
#[receive(
    contract = "KothAuction",
    name = "setCoolDownTime",
    parameter = "Duration",
    mutable,
    enable_logger
)]
fn contract_set_cool_down_time<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure_owner(ctx)?;
    let cool_down: Duration = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    ensure_between_rounds(state)?;
    state.params.cool_down_time = cool_down;
    logger.log(&AuctionEvent::ParametersUpdated(ParametersUpdatedEvent {
        params: state.params.clone(),
    }))?;
    Ok(())
}

/// Update the fixed bid size. Owner-only, between rounds.
#[receive(
    contract = "KothAuction",
    name = "setBidAmount",
    parameter = "ContractTokenAmount",
    mutable,
    enable_logger
)]
fn contract_set_bid_amount<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure_owner(ctx)?;
    let amount: ContractTokenAmount = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    ensure_between_rounds(state)?;
    ensure!(amount.0 > 0, CustomContractError::InvalidBidAmount.into());
    state.params.bid_amount = amount;
    logger.log(&AuctionEvent::ParametersUpdated(ParametersUpdatedEvent {
        params: state.params.clone(),
    }))?;
    Ok(())
}

/// Update the settlement-time treasury destination. Owner-only, between
/// rounds.
#[receive(
    contract = "KothAuction",
    name = "setTreasuryAddress",
    parameter = "AccountAddress",
    mutable,
    enable_logger
)]
fn contract_set_treasury_address<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure_owner(ctx)?;
    let address: AccountAddress = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    ensure_between_rounds(state)?;
    state.params.treasury_address = address;
    logger.log(&AuctionEvent::ParametersUpdated(ParametersUpdatedEvent {
        params: state.params.clone(),
    }))?;
    Ok(())
}

/// Ban an account from bidding. Owner-only; effective immediately, also
/// mid-round.
#[receive(
    contract = "KothAuction",
    name = "banAddress",
    parameter = "AccountAddress",
    mutable,
    enable_logger
)]
fn contract_ban_address<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure_owner(ctx)?;
    let address: AccountAddress = ctx.parameter_cursor().get()?;
    host.state_mut().blacklist.insert(address);
    logger.log(&AuctionEvent::AddressBanned(BlacklistEvent { address }))?;
    Ok(())
}

/// Lift a ban. Owner-only.
#[receive(
    contract = "KothAuction",
    name = "unbanAddress",
    parameter = "AccountAddress",
    mutable,
    enable_logger
)]
fn contract_unban_address<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure_owner(ctx)?;
    let address: AccountAddress = ctx.parameter_cursor().get()?;
    host.state_mut().blacklist.remove(&address);
    logger.log(&AuctionEvent::AddressUnbanned(BlacklistEvent { address }))?;
    Ok(())
}

/// Clear the previous-winner exclusion. Owner-only.
#[receive(contract = "KothAuction", name = "resetLastWinner", mutable)]
fn contract_reset_last_winner<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure_owner(ctx)?;
    host.state_mut().round.last_winner = None;
    Ok(())
}

/// Escape hatch: move tokens out of custody to the owner, regardless of round
/// state.
#[receive(
    contract = "KothAuction",
    name = "emergencyWithdraw",
    parameter = "ContractTokenAmount",
    mutable,
    enable_logger
)]
fn contract_emergency_withdraw<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure_owner(ctx)?;
    let amount: ContractTokenAmount = ctx.parameter_cursor().get()?;
    let state = host.state_mut();
    ensure!(!state.locked, CustomContractError::ReentrantCall.into());
    let ledger_address = state.ledger;
    state.locked = true;

    ledger::push_to_account(
        host,
        &ledger_address,
        ctx.self_address(),
        ctx.owner(),
        amount,
    )?;

    host.state_mut().locked = false;
    logger.log(&AuctionEvent::EmergencyWithdraw(EmergencyWithdrawEvent {
        amount,
    }))?;
    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::*;
    use concordium_cis2::*;
    use core::fmt::Debug;
    use test_infrastructure::*;

    const OWNER: AccountAddress = AccountAddress([0u8; 32]);
    const ALICE: AccountAddress = AccountAddress([1u8; 32]);
    const BOB: AccountAddress = AccountAddress([2u8; 32]);
    const TREASURY: AccountAddress = AccountAddress([3u8; 32]);
    const BURN_SINK: AccountAddress = AccountAddress([4u8; 32]);
    const CAROL: AccountAddress = AccountAddress([5u8; 32]);

    const LEDGER: ContractAddress = ContractAddress { index: 1, subindex: 0 };
    const ORACLE: ContractAddress = ContractAddress { index: 2, subindex: 0 };
    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };

    /// One bid of 1.0 unit at six decimals.
    const BID: ContractTokenAmount = TokenAmountU64(1_000_000);
    const BID_BURN: ContractTokenAmount = TokenAmountU64(100_000);

    const END_DELAY_MS: u64 = 10 * 60 * 1_000;
    const COOL_DOWN_MS: u64 = 60 * 60 * 1_000;

    fn game_parameters() -> GameParameters {
        GameParameters {
            bid_amount: BID,
            end_delay: Duration::from_minutes(10),
            min_time_increase: Duration::from_seconds(60),
            max_time_increase: Duration::from_seconds(300),
            cool_down_time: Duration::from_hours(1),
            treasury_address: TREASURY,
        }
    }

    fn fresh_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let state = State::new(
            &mut state_builder,
            game_parameters(),
            LEDGER,
            ORACLE,
            BURN_SINK,
        );
        TestHost::new(state, state_builder)
    }

    fn receive_ctx<'a>(sender: AccountAddress, slot_time: u64) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_owner(OWNER);
        ctx.set_sender(Address::Account(sender));
        ctx.set_self_address(SELF_ADDRESS);
        ctx.set_metadata_slot_time(Timestamp::from_timestamp_millis(slot_time));
        ctx
    }

    fn entrypoint(name: &str) -> OwnedEntrypointName {
        OwnedEntrypointName::new_unchecked(name.into())
    }

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_timestamp_millis(millis)
    }

    /// Accepts the two transfers of an admitted bid: the pull into custody
    /// and the immediate burn.
    fn is_bid_transfer(params: &TransferParameter) -> bool {
        if params.0.len() != 1 {
            return false;
        }
        let transfer = &params.0[0];
        match (&transfer.from, &transfer.to) {
            (Address::Account(_), Receiver::Contract(to, _)) => {
                *to == SELF_ADDRESS && transfer.amount == BID
            }
            (Address::Contract(from), Receiver::Account(to)) => {
                *from == SELF_ADDRESS && *to == BURN_SINK && transfer.amount == BID_BURN
            }
            _ => false,
        }
    }

    /// Accepts the settlement transfers of a 100-unit pool: 60 to the
    /// winner, 5 to the treasury, 15 to the burn sink.
    fn is_settlement_transfer(params: &TransferParameter) -> bool {
        if params.0.len() != 1 {
            return false;
        }
        let transfer = &params.0[0];
        let to = match (&transfer.from, &transfer.to) {
            (Address::Contract(from), Receiver::Account(to)) if *from == SELF_ADDRESS => *to,
            _ => return false,
        };
        (to == ALICE && transfer.amount == TokenAmountU64(60))
            || (to == TREASURY && transfer.amount == TokenAmountU64(5))
            || (to == BURN_SINK && transfer.amount == TokenAmountU64(15))
    }

    fn mock_bid_collaborators(host: &mut TestHost<State<TestStateApi>>, random: u64) {
        host.setup_mock_entrypoint(
            LEDGER,
            entrypoint("transfer"),
            parse_and_check_mock::<TransferParameter, _>(is_bid_transfer, ()),
        );
        host.setup_mock_entrypoint(
            ORACLE,
            entrypoint("getRandomValue"),
            parse_and_ok_mock::<(), _>(random),
        );
    }

    fn balance_of_mock(total: u64) -> MockFn<State<TestStateApi>> {
        MockFn::new(move |parameter, _amount, _balance, _state| {
            ContractBalanceOfQueryParams::deserial(&mut Cursor::new(parameter))
                .map_err(|_| CallContractError::Trap)?;
            Ok((false, Some(BalanceOfQueryResponse(vec![TokenAmountU64(total)]))))
        })
    }

    fn expect_error<E, T>(expr: Result<T, E>, err: E, msg: &str)
    where
        E: PartialEq + Debug,
        T: Debug,
    {
        let actual = expr.expect_err(msg);
        assert_eq!(actual, err);
    }

    #[concordium_test]
    fn test_init_starts_idle() {
        let init_params = InitParams {
            ledger: LEDGER,
            oracle: ORACLE,
            burn_address: BURN_SINK,
            params: game_parameters(),
        };
        let parameter_bytes = to_bytes(&init_params);
        let mut ctx = TestInitContext::empty();
        ctx.set_parameter(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();

        let state = contract_init(&ctx, &mut state_builder).expect("init should succeed");
        claim_eq!(state.round.last_bidder, None);
        claim_eq!(state.round.last_winner, None);
        claim_eq!(state.round.amount_burned, TokenAmountU64(0));
        claim!(!state.locked);
        claim_eq!(state.params.bid_amount, BID);
        claim_eq!(state.ledger, LEDGER);
    }

    #[concordium_test]
    fn test_init_rejects_invalid_configuration() {
        let mut params = game_parameters();
        params.min_time_increase = Duration::from_seconds(300);
        params.max_time_increase = Duration::from_seconds(60);
        let init_params = InitParams {
            ledger: LEDGER,
            oracle: ORACLE,
            burn_address: BURN_SINK,
            params,
        };
        let parameter_bytes = to_bytes(&init_params);
        let mut ctx = TestInitContext::empty();
        ctx.set_parameter(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();

        claim!(contract_init(&ctx, &mut state_builder).is_err());
    }

    #[concordium_test]
    fn test_place_bid_sets_randomized_end_time() {
        let mut host = fresh_host();
        // Oracle returns 0, so the extension takes the lower bound of 60s.
        mock_bid_collaborators(&mut host, 0);
        let ctx = receive_ctx(ALICE, 1_000);
        let mut logger = TestLogger::init();

        let end_time = contract_place_bid(&ctx, &mut host, &mut logger)
            .expect("bid should be admitted");
        claim_eq!(end_time, at(1_000 + END_DELAY_MS + 60_000));

        let round = &host.state().round;
        claim_eq!(round.last_bidder, Some(ALICE));
        claim_eq!(round.auction_end_time, end_time);
        claim_eq!(round.amount_burned, BID_BURN);
        claim!(!host.state().locked);

        claim_eq!(logger.logs.len(), 2);
        claim_eq!(logger.logs[0][0], BID_PLACED_TAG);
        claim_eq!(logger.logs[1][0], TOKENS_BURNED_TAG);
    }

    #[concordium_test]
    fn test_extension_upper_boundary() {
        let mut host = fresh_host();
        // 240_000 is the last raw value before the modulus wraps, giving the
        // full 300s extension.
        mock_bid_collaborators(&mut host, 240_000);
        let ctx = receive_ctx(ALICE, 1_000);
        let mut logger = TestLogger::init();

        let end_time = contract_place_bid(&ctx, &mut host, &mut logger)
            .expect("bid should be admitted");
        claim_eq!(end_time, at(1_000 + END_DELAY_MS + 300_000));
    }

    #[concordium_test]
    fn test_rebid_extends_from_current_time() {
        let mut host = fresh_host();
        mock_bid_collaborators(&mut host, 0);
        let mut logger = TestLogger::init();

        let first = contract_place_bid(&receive_ctx(ALICE, 1_000), &mut host, &mut logger)
            .expect("first bid should be admitted");

        let second = contract_place_bid(&receive_ctx(BOB, 2_000), &mut host, &mut logger)
            .expect("challenging bid should be admitted");
        claim_eq!(second, at(2_000 + END_DELAY_MS + 60_000));
        claim!(second > first);
        claim_eq!(host.state().round.last_bidder, Some(BOB));
        claim_eq!(
            host.state().round.amount_burned,
            TokenAmountU64(2 * BID_BURN.0)
        );
    }

    #[concordium_test]
    fn test_has_winner_lifecycle() {
        let mut host = fresh_host();
        mock_bid_collaborators(&mut host, 0);
        let mut logger = TestLogger::init();

        let end_time = contract_place_bid(&receive_ctx(ALICE, 1_000), &mut host, &mut logger)
            .expect("bid should be admitted");

        let just_before = receive_ctx(BOB, end_time.timestamp_millis() - 1);
        claim!(!contract_has_winner(&just_before, &host).expect("view should succeed"));

        let at_end = receive_ctx(BOB, end_time.timestamp_millis());
        claim!(contract_has_winner(&at_end, &host).expect("view should succeed"));
    }

    #[concordium_test]
    fn test_place_bid_rejects_contract_sender() {
        let mut host = fresh_host();
        let mut ctx = receive_ctx(ALICE, 1_000);
        ctx.set_sender(Address::Contract(LEDGER));
        let mut logger = TestLogger::init();

        expect_error(
            contract_place_bid(&ctx, &mut host, &mut logger),
            CustomContractError::OnlyAccountAddress.into(),
            "bids must originate directly from accounts",
        );
    }

    #[concordium_test]
    fn test_place_bid_rejects_during_cooldown() {
        let mut host = fresh_host();
        host.state_mut().round.next_start_time = at(10_000);
        let mut logger = TestLogger::init();

        expect_error(
            contract_place_bid(&receive_ctx(ALICE, 9_999), &mut host, &mut logger),
            CustomContractError::CoolDownActive.into(),
            "bid before the cooldown elapsed should be rejected",
        );
        claim_eq!(host.state().round.last_bidder, None);
    }

    #[concordium_test]
    fn test_place_bid_rejects_banned_account() {
        let mut host = fresh_host();
        host.state_mut().blacklist.insert(ALICE);
        let mut logger = TestLogger::init();

        expect_error(
            contract_place_bid(&receive_ctx(ALICE, 1_000), &mut host, &mut logger),
            CustomContractError::Blacklisted.into(),
            "banned accounts cannot bid",
        );
    }

    #[concordium_test]
    fn test_place_bid_rejects_previous_winner() {
        let mut host = fresh_host();
        host.state_mut().round.last_winner = Some(ALICE);
        let mut logger = TestLogger::init();

        expect_error(
            contract_place_bid(&receive_ctx(ALICE, 1_000), &mut host, &mut logger),
            CustomContractError::PreviousWinnerExcluded.into(),
            "the previous winner sits out one round",
        );
        claim_eq!(host.state().round.last_bidder, None);

        // Any other account is free to bid.
        mock_bid_collaborators(&mut host, 0);
        contract_place_bid(&receive_ctx(BOB, 1_000), &mut host, &mut logger)
            .expect("other accounts are not excluded");
    }

    #[concordium_test]
    fn test_place_bid_rejects_while_winner_unclaimed() {
        let mut host = fresh_host();
        host.state_mut().record_bid(BOB, at(500));
        let mut logger = TestLogger::init();

        expect_error(
            contract_place_bid(&receive_ctx(ALICE, 1_000), &mut host, &mut logger),
            CustomContractError::UnclaimedWinner.into(),
            "no bid is admitted while a winner is unclaimed",
        );
    }

    #[concordium_test]
    fn test_place_bid_rejects_reentry() {
        let mut host = fresh_host();
        host.state_mut().locked = true;
        let mut logger = TestLogger::init();

        expect_error(
            contract_place_bid(&receive_ctx(ALICE, 1_000), &mut host, &mut logger),
            CustomContractError::ReentrantCall.into(),
            "a locked entry point cannot be re-entered",
        );
    }

    #[concordium_test]
    fn test_claim_reward_rejects_reentry() {
        let mut host = fresh_host();
        host.state_mut().record_bid(ALICE, at(5_000));
        host.state_mut().locked = true;
        let mut logger = TestLogger::init();

        expect_error(
            contract_claim_reward(&receive_ctx(BOB, 6_000), &mut host, &mut logger),
            CustomContractError::ReentrantCall.into(),
            "a locked entry point cannot be re-entered",
        );
        claim_eq!(host.state().round.last_bidder, Some(ALICE));
    }

    #[concordium_test]
    fn test_emergency_withdraw_rejects_reentry() {
        let mut host = fresh_host();
        host.state_mut().locked = true;
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&TokenAmountU64(42));
        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&parameter_bytes);

        expect_error(
            contract_emergency_withdraw(&ctx, &mut host, &mut logger),
            CustomContractError::ReentrantCall.into(),
            "a locked entry point cannot be re-entered",
        );
    }

    #[concordium_test]
    fn test_oracle_failure_aborts_bid() {
        let mut host = fresh_host();
        host.setup_mock_entrypoint(
            LEDGER,
            entrypoint("transfer"),
            parse_and_check_mock::<TransferParameter, _>(is_bid_transfer, ()),
        );
        host.setup_mock_entrypoint(ORACLE, entrypoint("getRandomValue"), failing_mock());
        let mut logger = TestLogger::init();

        expect_error(
            contract_place_bid(&receive_ctx(ALICE, 1_000), &mut host, &mut logger),
            CustomContractError::InvokeContractError.into(),
            "oracle failure must abort the bid",
        );
    }

    #[concordium_test]
    fn test_ledger_failure_aborts_bid() {
        let mut host = fresh_host();
        host.setup_mock_entrypoint(LEDGER, entrypoint("transfer"), failing_mock());
        let mut logger = TestLogger::init();

        expect_error(
            contract_place_bid(&receive_ctx(ALICE, 1_000), &mut host, &mut logger),
            CustomContractError::InvokeContractError.into(),
            "ledger failure must abort the bid",
        );
    }

    #[concordium_test]
    fn test_claim_reward_splits_pool() {
        let mut host = fresh_host();
        host.state_mut().record_bid(ALICE, at(5_000));
        host.setup_mock_entrypoint(LEDGER, entrypoint("balanceOf"), balance_of_mock(100));
        host.setup_mock_entrypoint(
            LEDGER,
            entrypoint("transfer"),
            parse_and_check_mock::<TransferParameter, _>(is_settlement_transfer, ()),
        );
        let mut logger = TestLogger::init();

        // Anyone may settle; the proceeds still go to the last bidder.
        let outcome = contract_claim_reward(&receive_ctx(BOB, 6_000), &mut host, &mut logger)
            .expect("claim should settle the round");
        claim_eq!(
            outcome,
            ClaimOutcome {
                winner: ALICE,
                amount: TokenAmountU64(60),
            }
        );

        let round = &host.state().round;
        claim_eq!(round.last_winner, Some(ALICE));
        claim_eq!(round.last_bidder, None);
        claim_eq!(round.auction_end_time, at(0));
        claim_eq!(round.next_start_time, at(6_000 + COOL_DOWN_MS));
        claim_eq!(round.amount_burned, TokenAmountU64(15));
        claim!(!host.state().locked);

        claim_eq!(logger.logs.len(), 2);
        claim_eq!(logger.logs[0][0], WINNER_CLAIMED_TAG);
        claim_eq!(logger.logs[1][0], TOKENS_BURNED_TAG);

        // The round is settled, a second claim has nothing to pay out.
        expect_error(
            contract_claim_reward(&receive_ctx(BOB, 7_000), &mut host, &mut logger),
            CustomContractError::NoWinner.into(),
            "settling twice must be rejected",
        );
    }

    #[concordium_test]
    fn test_claim_reward_rejects_while_countdown_runs() {
        let mut host = fresh_host();
        host.state_mut().record_bid(ALICE, at(5_000));
        let mut logger = TestLogger::init();

        expect_error(
            contract_claim_reward(&receive_ctx(BOB, 4_999), &mut host, &mut logger),
            CustomContractError::NoWinner.into(),
            "claim before the countdown elapsed should be rejected",
        );
    }

    #[concordium_test]
    fn test_claim_reward_rejects_contract_sender() {
        let mut host = fresh_host();
        host.state_mut().record_bid(ALICE, at(5_000));
        let mut ctx = receive_ctx(BOB, 6_000);
        ctx.set_sender(Address::Contract(LEDGER));
        let mut logger = TestLogger::init();

        expect_error(
            contract_claim_reward(&ctx, &mut host, &mut logger),
            CustomContractError::OnlyAccountAddress.into(),
            "claims must originate directly from accounts",
        );
    }

    #[concordium_test]
    fn test_previous_winner_sits_out_one_round() {
        let mut host = fresh_host();
        host.state_mut().record_bid(ALICE, at(5_000));
        host.setup_mock_entrypoint(LEDGER, entrypoint("balanceOf"), balance_of_mock(100));
        host.setup_mock_entrypoint(
            LEDGER,
            entrypoint("transfer"),
            parse_and_check_mock::<TransferParameter, _>(is_settlement_transfer, ()),
        );
        let mut logger = TestLogger::init();
        contract_claim_reward(&receive_ctx(BOB, 6_000), &mut host, &mut logger)
            .expect("claim should settle the round");

        let next_round_start = 6_000 + COOL_DOWN_MS;
        mock_bid_collaborators(&mut host, 0);

        expect_error(
            contract_place_bid(&receive_ctx(ALICE, next_round_start), &mut host, &mut logger),
            CustomContractError::PreviousWinnerExcluded.into(),
            "the crowned account cannot open the next round",
        );

        contract_place_bid(&receive_ctx(BOB, next_round_start), &mut host, &mut logger)
            .expect("any other account can open the next round");
    }

    #[concordium_test]
    fn test_reset_last_winner() {
        let mut host = fresh_host();
        host.state_mut().round.last_winner = Some(ALICE);

        expect_error(
            contract_reset_last_winner(&receive_ctx(ALICE, 1_000), &mut host),
            ContractError::Unauthorized,
            "only the owner can reset the exclusion",
        );

        contract_reset_last_winner(&receive_ctx(OWNER, 1_000), &mut host)
            .expect("owner resets the exclusion");
        claim_eq!(host.state().round.last_winner, None);
    }

    #[concordium_test]
    fn test_set_bid_amount() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&TokenAmountU64(2_000_000));
        let mut ctx = receive_ctx(ALICE, 1_000);
        ctx.set_parameter(&parameter_bytes);
        expect_error(
            contract_set_bid_amount(&ctx, &mut host, &mut logger),
            ContractError::Unauthorized,
            "only the owner can change the bid size",
        );

        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&parameter_bytes);
        contract_set_bid_amount(&ctx, &mut host, &mut logger)
            .expect("owner update should succeed");
        claim_eq!(host.state().params.bid_amount, TokenAmountU64(2_000_000));
        claim_eq!(logger.logs[0][0], PARAMETERS_UPDATED_TAG);

        let zero_bytes = to_bytes(&TokenAmountU64(0));
        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&zero_bytes);
        expect_error(
            contract_set_bid_amount(&ctx, &mut host, &mut logger),
            CustomContractError::InvalidBidAmount.into(),
            "a zero bid size is rejected",
        );
    }

    #[concordium_test]
    fn test_setters_rejected_mid_round() {
        let mut host = fresh_host();
        host.state_mut().record_bid(ALICE, at(5_000));
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&TokenAmountU64(2_000_000));
        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&parameter_bytes);
        expect_error(
            contract_set_bid_amount(&ctx, &mut host, &mut logger),
            CustomContractError::RoundInProgress.into(),
            "configuration is frozen while a round is live",
        );

        let delay_bytes = to_bytes(&Duration::from_minutes(5));
        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&delay_bytes);
        expect_error(
            contract_set_end_delay(&ctx, &mut host, &mut logger),
            CustomContractError::RoundInProgress.into(),
            "configuration is frozen while a round is live",
        );
    }

    #[concordium_test]
    fn test_set_time_increase_range() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        let bad_range = to_bytes(&TimeIncreaseRangeParams {
            min: Duration::from_seconds(300),
            max: Duration::from_seconds(300),
        });
        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&bad_range);
        expect_error(
            contract_set_time_increase_range(&ctx, &mut host, &mut logger),
            CustomContractError::InvalidTimeRange.into(),
            "bounds must be strictly ordered",
        );

        let above_ceiling = to_bytes(&TimeIncreaseRangeParams {
            min: Duration::from_hours(1),
            max: Duration::from_hours(25),
        });
        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&above_ceiling);
        expect_error(
            contract_set_time_increase_range(&ctx, &mut host, &mut logger),
            CustomContractError::InvalidTimeRange.into(),
            "the upper bound is capped by the hard ceiling",
        );

        let good_range = to_bytes(&TimeIncreaseRangeParams {
            min: Duration::from_seconds(30),
            max: Duration::from_seconds(90),
        });
        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&good_range);
        contract_set_time_increase_range(&ctx, &mut host, &mut logger)
            .expect("owner update should succeed");
        claim_eq!(
            host.state().params.min_time_increase,
            Duration::from_seconds(30)
        );
        claim_eq!(
            host.state().params.max_time_increase,
            Duration::from_seconds(90)
        );
    }

    #[concordium_test]
    fn test_ban_and_unban_flow() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();
        let carol_bytes = to_bytes(&CAROL);

        let mut ctx = receive_ctx(ALICE, 1_000);
        ctx.set_parameter(&carol_bytes);
        expect_error(
            contract_ban_address(&ctx, &mut host, &mut logger),
            ContractError::Unauthorized,
            "only the owner can ban",
        );

        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&carol_bytes);
        contract_ban_address(&ctx, &mut host, &mut logger).expect("owner ban should succeed");
        claim_eq!(logger.logs[0][0], ADDRESS_BANNED_TAG);

        let mut view_ctx = receive_ctx(ALICE, 1_000);
        view_ctx.set_parameter(&carol_bytes);
        claim!(contract_is_banned(&view_ctx, &host).expect("view should succeed"));

        expect_error(
            contract_place_bid(&receive_ctx(CAROL, 1_000), &mut host, &mut logger),
            CustomContractError::Blacklisted.into(),
            "banned accounts cannot bid",
        );

        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&carol_bytes);
        contract_unban_address(&ctx, &mut host, &mut logger).expect("unban should succeed");

        mock_bid_collaborators(&mut host, 0);
        contract_place_bid(&receive_ctx(CAROL, 1_000), &mut host, &mut logger)
            .expect("unbanned accounts can bid again");
    }

    #[concordium_test]
    fn test_emergency_withdraw() {
        let mut host = fresh_host();
        host.setup_mock_entrypoint(
            LEDGER,
            entrypoint("transfer"),
            parse_and_check_mock::<TransferParameter, _>(
                |params: &TransferParameter| {
                    params.0.len() == 1
                        && params.0[0].amount == TokenAmountU64(42)
                        && matches!(&params.0[0].to, Receiver::Account(to) if *to == OWNER)
                },
                (),
            ),
        );
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&TokenAmountU64(42));

        let mut ctx = receive_ctx(ALICE, 1_000);
        ctx.set_parameter(&parameter_bytes);
        expect_error(
            contract_emergency_withdraw(&ctx, &mut host, &mut logger),
            ContractError::Unauthorized,
            "only the owner can withdraw",
        );

        let mut ctx = receive_ctx(OWNER, 1_000);
        ctx.set_parameter(&parameter_bytes);
        contract_emergency_withdraw(&ctx, &mut host, &mut logger)
            .expect("owner withdrawal should succeed");
        claim!(!host.state().locked);
        claim_eq!(logger.logs[0][0], EMERGENCY_WITHDRAW_TAG);
    }

    #[concordium_test]
    fn test_receive_hook_only_accepts_ledger() {
        let mut host = fresh_host();

        let mut ctx = receive_ctx(ALICE, 1_000);
        ctx.set_sender(Address::Contract(LEDGER));
        contract_on_cis2_received(&ctx, &host).expect("the ledger may notify the contract");

        let mut ctx = receive_ctx(ALICE, 1_000);
        ctx.set_sender(Address::Contract(ORACLE));
        expect_error(
            contract_on_cis2_received(&ctx, &host),
            ContractError::Unauthorized,
            "foreign token contracts are rejected",
        );

        expect_error(
            contract_on_cis2_received(&receive_ctx(ALICE, 1_000), &host),
            ContractError::Unauthorized,
            "plain accounts are rejected",
        );
    }

    #[concordium_test]
    fn test_view_reports_round_and_parameters() {
        let mut host = fresh_host();
        host.state_mut().record_bid(ALICE, at(5_000));

        let result = contract_view(&receive_ctx(BOB, 1_000), &host)
            .expect("view should succeed");
        claim_eq!(result.round.last_bidder, Some(ALICE));
        claim_eq!(result.round.auction_end_time, at(5_000));
        claim_eq!(result.params.bid_amount, BID);
    }
}
