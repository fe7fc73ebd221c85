/// Receives solver events and optionally returns a control action.
///
/// Solvers call [`Observer::observe`] once per step with a solver-specific
/// event type `E`. Returning `Some(action)` lets the caller steer the solver;
/// returning `None` leaves it alone.
///
/// Two implementations come for free:
///
/// - `()` is a no-op observer, used by the convenience entry points that do
///   not expose observation.
/// - Any `FnMut(&E) -> Option<A>` closure.
///
/// # Example
///
/// ```
/// use thermofin_core::Observer;
///
/// let mut seen = Vec::new();
/// let mut observer = |event: &f64| -> Option<()> {
///     seen.push(*event);
///     None
/// };
///
/// assert_eq!(observer.observe(&1.5), None);
/// assert_eq!(observer.observe(&2.5), None);
/// drop(observer);
/// assert_eq!(seen, vec![1.5, 2.5]);
/// ```
pub trait Observer<E, A> {
    /// Observes an event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Action {
        Halt,
    }

    fn drive<O: Observer<usize, Action>>(mut observer: O, steps: usize) -> usize {
        for step in 0..steps {
            if observer.observe(&step) == Some(Action::Halt) {
                return step;
            }
        }
        steps
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), 10), 10);
    }

    #[test]
    fn closure_observer_can_halt() {
        let halted_at = drive(
            |step: &usize| (*step == 3).then_some(Action::Halt),
            10,
        );
        assert_eq!(halted_at, 3);
    }
}
