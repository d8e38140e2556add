use crate::rule::RecurrenceRule;

/// Whether replacing `old` with `new` is a real rule change.
///
/// Both sides are compared in normalized form, so cosmetic differences
/// (weekday order, duplicate entries, an interval of 0 versus 1) never
/// trigger a confirmation prompt.
pub fn needs_confirmation(old: &RecurrenceRule, new: &RecurrenceRule) -> bool {
    old.clone().normalized() != new.clone().normalized()
}

/// Answers the "this changes how the task repeats, continue?" question.
///
/// The CLI backs this with an interactive prompt; tests and `--yes` flows
/// use closures. Any `FnMut(&RecurrenceRule, &RecurrenceRule) -> bool`
/// implements the trait.
pub trait ConfirmationPort {
    fn confirm_rule_change(&mut self, old: &RecurrenceRule, new: &RecurrenceRule) -> bool;
}

impl<F> ConfirmationPort for F
where
    F: FnMut(&RecurrenceRule, &RecurrenceRule) -> bool,
{
    fn confirm_rule_change(&mut self, old: &RecurrenceRule, new: &RecurrenceRule) -> bool {
        self(old, new)
    }
}

/// Decides which rule a task ends up with after an edit.
///
/// # Behavior
///
/// The candidate is normalized first. If it is equivalent to the current
/// rule, or the current rule is `never` (nothing scheduled is being
/// rewritten), it applies without a prompt. Otherwise the port is asked
/// once; a declined change leaves the current rule in place.
pub fn apply_rule_change<P>(
    current: RecurrenceRule,
    candidate: RecurrenceRule,
    port: &mut P,
) -> RecurrenceRule
where
    P: ConfirmationPort + ?Sized,
{
    let incoming = candidate.normalized();
    if !needs_confirmation(&current, &incoming) {
        return incoming;
    }
    if current.is_never() {
        return incoming;
    }
    if port.confirm_rule_change(&current, &incoming) {
        incoming
    } else {
        current
    }
}
