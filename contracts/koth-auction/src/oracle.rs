//! Adapter over the external randomness oracle. The oracle returns a fresh
//! unsigned 64-bit value on demand; any failure aborts the enclosing
//! invocation.
use commons::*;
use concordium_std::*;

pub trait HostRandomnessExt<S>: HasHost<S> {
    /// Fetch a fresh random value from the oracle contract.
    fn get_random_value(
        &self,
        oracle: &ContractAddress,
    ) -> Result<u64, ContractReadError<Self::ReturnValueType>> {
        let mut response = self
            .invoke_contract_read_only(
                oracle,
                &(),
                EntrypointName::new_unchecked("getRandomValue"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        u64::deserial(&mut response).map_err(|_| ContractReadError::Parse)
    }
}

impl<S, H: HasHost<S>> HostRandomnessExt<S> for H {}
