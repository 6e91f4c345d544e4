//! Shared errors, types and helpers for the auction contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{calculations::*, constants::*, errors::*, types::*};

use concordium_cis2::*;
use concordium_std::*;

pub mod test;

mod calculations;
mod constants;
mod errors;
mod types;
