//! A single-round "king of the hill" bidding auction.
//!
//! Participants place fixed-size bids of a fungible CIS-2 token; every bid
//! pushes the countdown out by a randomized duration, and the last bidder
//! standing when the countdown expires claims a proportional share of the
//! accumulated pool.
#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod ledger;
mod oracle;
mod state;
