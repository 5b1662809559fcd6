//! Values paired with the cost of producing them.

use crate::OperationCost;

/// An operation's return value together with the work it took.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// The wrapped return value.
    pub value: T,
    /// Work recorded while producing `value`.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Moves the cost into `acc` and hands back the value.
    pub fn unwrap_add_cost(self, acc: &mut OperationCost) -> T {
        *acc += self.cost;
        self.value
    }

    /// Drops the cost and hands back the value.
    ///
    /// Never panics; this only strips the accounting wrapper.
    pub fn unwrap(self) -> T {
        self.value
    }

    /// Borrow the recorded cost.
    pub fn cost(&self) -> &OperationCost {
        &self.cost
    }

    /// Borrow the wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Maps the value, keeping the cost.
    pub fn map<B>(self, f: impl FnOnce(T) -> B) -> CostContext<B> {
        CostContext {
            value: f(self.value),
            cost: self.cost,
        }
    }

    /// Adds `cost` on top of what is already recorded.
    pub fn add_cost(mut self, cost: OperationCost) -> Self {
        self.cost += cost;
        self
    }
}

/// A `Result` wrapped in a [`CostContext`].
pub type CostResult<T, E> = CostContext<Result<T, E>>;

impl<T, E> CostResult<T, E> {
    /// Maps the `Ok` value, keeping the cost.
    pub fn map_ok<B>(self, f: impl FnOnce(T) -> B) -> CostResult<B, E> {
        self.map(|result| result.map(f))
    }

    /// Maps the `Err` value, keeping the cost.
    pub fn map_err<B>(self, f: impl FnOnce(E) -> B) -> CostResult<T, B> {
        self.map(|result| result.map_err(f))
    }

    /// Chains another costed operation on `Ok`, summing both costs.
    pub fn flat_map_ok<B>(self, f: impl FnOnce(T) -> CostResult<B, E>) -> CostResult<B, E> {
        let mut cost = self.cost;
        let value = match self.value {
            Ok(x) => f(x).unwrap_add_cost(&mut cost),
            Err(e) => Err(e),
        };
        CostContext { value, cost }
    }

    /// Returns the cost on success, discarding the value.
    pub fn cost_as_result(self) -> Result<OperationCost, E> {
        self.value.map(|_| self.cost)
    }
}

/// Wraps arbitrary values into a [`CostContext`].
pub trait CostsExt {
    /// Wraps `self` with the given cost.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self>
    where
        Self: Sized,
    {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}

/// `?` for [`CostResult`]: unwraps an `Ok`, otherwise returns the error
/// wrapped with the cost accumulated so far.
///
/// The inner expression must itself be a `CostResult`; its cost is added to
/// the accumulator before the early return.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ }.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// Same as [`cost_return_on_error!`] for a plain `Result`: nothing is added
/// to the accumulator.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( $cost:expr, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            match { $($body)+ } {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}
