#[cfg(not(target_arch = "wasm32"))]
pub use inner::*;

#[cfg(not(target_arch = "wasm32"))]
mod inner {
    use concordium_std::test_infrastructure::MockFn;
    use concordium_std::*;

    /// Mock entrypoint that parses its parameter and answers with a fixed
    /// return value.
    pub fn parse_and_ok_mock<D: Deserial, S>(
        return_value: impl Clone + Serial + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _amount, _balance, _state| {
            D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            Ok((false, Some(return_value.clone())))
        })
    }

    /// Mock entrypoint that parses its parameter, traps unless the predicate
    /// accepts it, and answers with a fixed return value.
    pub fn parse_and_check_mock<D: Deserial, S>(
        check: impl Fn(&D) -> bool + 'static,
        return_value: impl Clone + Serial + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _, _, _state| {
            let value =
                D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            if !check(&value) {
                return Err(CallContractError::Trap);
            };
            Ok((false, Some(return_value.clone())))
        })
    }

    /// Mock entrypoint that rejects every invocation, for exercising external
    /// call failures.
    pub fn failing_mock<S>() -> MockFn<S> {
        MockFn::new(|_parameter, _, _, _state: &mut S| -> Result<(bool, Option<()>), _> {
            Err(CallContractError::Trap)
        })
    }
}
