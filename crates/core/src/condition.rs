//! Branch conditions.
//!
//! A condition is a side-effect-free predicate over the host's model. It only
//! ever receives a shared reference, so it cannot touch navigation state.

/// Predicate evaluated by a branching path when it is exhausted.
pub trait Condition<M> {
    fn evaluate(&self, model: &M) -> bool;
}

impl<M, F> Condition<M> for F
where
    F: Fn(&M) -> bool,
{
    fn evaluate(&self, model: &M) -> bool {
        self(model)
    }
}

/// Matches unconditionally. Usually the last branch of an exhaustive set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Always;

impl<M> Condition<M> for Always {
    fn evaluate(&self, _model: &M) -> bool {
        true
    }
}

/// Negates the wrapped condition.
#[derive(Debug, Clone, Copy)]
pub struct Not<C>(pub C);

impl<M, C: Condition<M>> Condition<M> for Not<C> {
    fn evaluate(&self, model: &M) -> bool {
        !self.0.evaluate(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Answers {
        include_optional: bool,
    }

    #[test]
    fn closures_are_conditions() {
        let wants_optional = |m: &Answers| m.include_optional;
        assert!(wants_optional.evaluate(&Answers {
            include_optional: true
        }));
        assert!(!wants_optional.evaluate(&Answers {
            include_optional: false
        }));
    }

    #[test]
    fn always_and_not() {
        let model = Answers {
            include_optional: false,
        };
        assert!(Condition::<Answers>::evaluate(&Always, &model));
        assert!(!Not(Always).evaluate(&model));
        assert!(Not(|m: &Answers| m.include_optional).evaluate(&model));
    }
}
