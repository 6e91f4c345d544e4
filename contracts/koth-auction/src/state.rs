use commons::*;
use concordium_cis2::*;
use concordium_std::*;

/// Owner-mutable game configuration. Changed only between rounds through the
/// dedicated setter entry points.
#[derive(Debug, Clone, Serialize, SchemaType)]
pub struct GameParameters {
    /// Fixed token amount required per bid.
    pub bid_amount: ContractTokenAmount,
    /// Base duration added to the end time on every bid.
    pub end_delay: Duration,
    /// Inclusive lower bound of the randomized extension.
    pub min_time_increase: Duration,
    /// Inclusive upper bound of the randomized extension.
    pub max_time_increase: Duration,
    /// Minimum gap between a round's settlement and the next round's first
    /// bid.
    pub cool_down_time: Duration,
    /// Destination of the treasury cut at settlement.
    pub treasury_address: AccountAddress,
}

impl GameParameters {
    pub fn validate(&self) -> Result<(), CustomContractError> {
        ensure!(self.bid_amount.0 > 0, CustomContractError::InvalidBidAmount);
        Self::validate_range(self.min_time_increase, self.max_time_increase)
    }

    /// The extension bounds must be strictly ordered and capped by the hard
    /// ceiling.
    pub fn validate_range(min: Duration, max: Duration) -> Result<(), CustomContractError> {
        ensure!(min.millis() < max.millis(), CustomContractError::InvalidTimeRange);
        ensure!(
            max.millis() <= MAX_TIME_INCREASE_MILLIS,
            CustomContractError::InvalidTimeRange
        );
        Ok(())
    }
}

/// The single live or settled auction instance.
#[derive(Debug, Clone, Serialize, SchemaType)]
pub struct Round {
    /// Account holding the current last bid; `None` while idle.
    pub last_bidder: Option<AccountAddress>,
    /// The most recently crowned account, excluded from the immediately
    /// following round.
    pub last_winner: Option<AccountAddress>,
    /// Absolute time at which the round ends if unchallenged. Meaningful only
    /// while `last_bidder` is set.
    pub auction_end_time: Timestamp,
    /// No bid is admitted before this time.
    pub next_start_time: Timestamp,
    /// Cumulative units sent to the burn sink.
    pub amount_burned: ContractTokenAmount,
}

impl Round {
    pub fn idle() -> Self {
        Round {
            last_bidder: None,
            last_winner: None,
            auction_end_time: Timestamp::from_timestamp_millis(0),
            next_start_time: Timestamp::from_timestamp_millis(0),
            amount_burned: TokenAmountU64(0),
        }
    }

    /// A round has a winner iff a bid is outstanding and its countdown has
    /// elapsed. Recomputed on every call, never cached.
    pub fn has_winner(&self, now: Timestamp) -> bool {
        self.last_bidder.is_some() && now >= self.auction_end_time
    }
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Game configuration, mutable by the owner between rounds.
    pub params: GameParameters,
    /// The live/settled round.
    pub round: Round,
    /// Accounts banned from bidding.
    pub blacklist: StateSet<AccountAddress, S>,
    /// Set while a fund-moving entry point is between its external calls.
    pub locked: bool,
    /// CIS-2 token contract holding the bid asset.
    pub ledger: ContractAddress,
    /// Randomness oracle contract.
    pub oracle: ContractAddress,
    /// Dead account receiving burned tokens.
    pub burn_address: AccountAddress,
}

impl<S: HasStateApi> State<S> {
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        params: GameParameters,
        ledger: ContractAddress,
        oracle: ContractAddress,
        burn_address: AccountAddress,
    ) -> Self {
        State {
            params,
            round: Round::idle(),
            blacklist: state_builder.new_set(),
            locked: false,
            ledger,
            oracle,
            burn_address,
        }
    }

    /// Gate of checks a bid must pass before any funds move. Rejection leaves
    /// the state untouched.
    pub fn check_admission(
        &self,
        bidder: &AccountAddress,
        now: Timestamp,
    ) -> Result<(), CustomContractError> {
        ensure!(!self.round.has_winner(now), CustomContractError::UnclaimedWinner);
        ensure!(
            now >= self.round.next_start_time,
            CustomContractError::CoolDownActive
        );
        ensure!(!self.blacklist.contains(bidder), CustomContractError::Blacklisted);
        ensure!(
            self.round.last_winner.as_ref() != Some(bidder),
            CustomContractError::PreviousWinnerExcluded
        );
        Ok(())
    }

    /// Map a raw oracle value into `[min_time_increase, max_time_increase]`
    /// inclusive via modulo-range reduction. The modulus is taken in
    /// milliseconds, so a 60s-300s range has 240_001 reachable values.
    pub fn extension_from(&self, random: u64) -> Duration {
        let min = self.params.min_time_increase.millis();
        let max = self.params.max_time_increase.millis();
        Duration::from_millis(min + random % (max - min + 1))
    }

    pub fn record_bid(&mut self, bidder: AccountAddress, end_time: Timestamp) {
        self.round.last_bidder = Some(bidder);
        self.round.auction_end_time = end_time;
    }

    /// Reset the round to idle in the same step that disburses the pool:
    /// crown the last bidder, clear the countdown and start the cooldown.
    pub fn finish_round(&mut self, now: Timestamp) -> Result<(), CustomContractError> {
        self.round.last_winner = self.round.last_bidder.take();
        self.round.auction_end_time = Timestamp::from_timestamp_millis(0);
        self.round.next_start_time = now
            .checked_add(self.params.cool_down_time)
            .ok_or(CustomContractError::InvalidDuration)?;
        Ok(())
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const ALICE: AccountAddress = AccountAddress([1u8; 32]);
    const BOB: AccountAddress = AccountAddress([2u8; 32]);
    const TREASURY: AccountAddress = AccountAddress([3u8; 32]);
    const BURN_SINK: AccountAddress = AccountAddress([4u8; 32]);
    const LEDGER: ContractAddress = ContractAddress { index: 1, subindex: 0 };
    const ORACLE: ContractAddress = ContractAddress { index: 2, subindex: 0 };

    fn game_parameters() -> GameParameters {
        GameParameters {
            bid_amount: TokenAmountU64(1_000_000),
            end_delay: Duration::from_minutes(10),
            min_time_increase: Duration::from_seconds(60),
            max_time_increase: Duration::from_seconds(300),
            cool_down_time: Duration::from_hours(1),
            treasury_address: TREASURY,
        }
    }

    fn fresh_state(state_builder: &mut TestStateBuilder) -> State<TestStateApi> {
        State::new(state_builder, game_parameters(), LEDGER, ORACLE, BURN_SINK)
    }

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_timestamp_millis(millis)
    }

    #[concordium_test]
    fn test_idle_round_is_zeroed() {
        let round = Round::idle();
        claim_eq!(round.last_bidder, None);
        claim_eq!(round.last_winner, None);
        claim_eq!(round.auction_end_time, at(0));
        claim_eq!(round.next_start_time, at(0));
        claim_eq!(round.amount_burned, TokenAmountU64(0));
    }

    #[concordium_test]
    fn test_has_winner_predicate() {
        let mut round = Round::idle();
        claim!(!round.has_winner(at(1_000)), "idle round has no winner");

        round.last_bidder = Some(ALICE);
        round.auction_end_time = at(5_000);
        claim!(!round.has_winner(at(4_999)), "countdown still running");
        claim!(round.has_winner(at(5_000)), "winner exactly at the end time");
        claim!(round.has_winner(at(6_000)), "winner after the end time");
    }

    #[concordium_test]
    fn test_extension_bounds() {
        let mut state_builder = TestStateBuilder::new();
        let state = fresh_state(&mut state_builder);

        // min = 60s, max = 300s: 240_001 distinct millisecond values.
        claim_eq!(state.extension_from(0), Duration::from_seconds(60));
        claim_eq!(
            state.extension_from(240_000),
            Duration::from_seconds(300)
        );
        claim_eq!(state.extension_from(240_001), Duration::from_seconds(60));

        let wrapped = state.extension_from(u64::MAX);
        claim!(wrapped.millis() >= 60_000 && wrapped.millis() <= 300_000);
    }

    #[concordium_test]
    fn test_admission_gate() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);

        claim_eq!(state.check_admission(&ALICE, at(0)), Ok(()));

        state.round.next_start_time = at(10_000);
        claim_eq!(
            state.check_admission(&ALICE, at(9_999)),
            Err(CustomContractError::CoolDownActive)
        );
        claim_eq!(state.check_admission(&ALICE, at(10_000)), Ok(()));

        state.blacklist.insert(ALICE);
        claim_eq!(
            state.check_admission(&ALICE, at(10_000)),
            Err(CustomContractError::Blacklisted)
        );
        claim_eq!(state.check_admission(&BOB, at(10_000)), Ok(()));
        state.blacklist.remove(&ALICE);

        state.round.last_winner = Some(ALICE);
        claim_eq!(
            state.check_admission(&ALICE, at(10_000)),
            Err(CustomContractError::PreviousWinnerExcluded)
        );
        claim_eq!(state.check_admission(&BOB, at(10_000)), Ok(()));
        state.round.last_winner = None;

        state.record_bid(BOB, at(20_000));
        claim_eq!(
            state.check_admission(&ALICE, at(20_000)),
            Err(CustomContractError::UnclaimedWinner)
        );
        claim_eq!(state.check_admission(&ALICE, at(19_999)), Ok(()));
    }

    #[concordium_test]
    fn test_finish_round_resets_to_idle() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);

        state.record_bid(ALICE, at(5_000));
        state.finish_round(at(6_000)).expect("cooldown fits in a timestamp");

        claim_eq!(state.round.last_winner, Some(ALICE));
        claim_eq!(state.round.last_bidder, None);
        claim_eq!(state.round.auction_end_time, at(0));
        claim_eq!(
            state.round.next_start_time,
            at(6_000 + 60 * 60 * 1_000)
        );
        claim!(!state.round.has_winner(at(7_000)));
    }

    #[concordium_test]
    fn test_parameter_validation() {
        let mut params = game_parameters();
        claim_eq!(params.validate(), Ok(()));

        params.bid_amount = TokenAmountU64(0);
        claim_eq!(params.validate(), Err(CustomContractError::InvalidBidAmount));

        params = game_parameters();
        params.min_time_increase = Duration::from_seconds(300);
        params.max_time_increase = Duration::from_seconds(300);
        claim_eq!(params.validate(), Err(CustomContractError::InvalidTimeRange));

        claim_eq!(
            GameParameters::validate_range(
                Duration::from_hours(1),
                Duration::from_hours(25)
            ),
            Err(CustomContractError::InvalidTimeRange)
        );
    }
}
