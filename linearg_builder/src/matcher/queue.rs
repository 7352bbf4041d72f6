use crate::registry::Target;

/// Callbacks waiting on the outcome of a match, in the order they were queued.
///
/// Each group works against its own queue: merged into the parent when an alternative matches, discarded otherwise.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CallbackQueue {
    entries: Vec<(Target, String)>,
}

impl CallbackQueue {
    pub(crate) fn append(&mut self, target: Target, argument: impl Into<String>) {
        self.entries.push((target, argument.into()));
    }

    pub(crate) fn merge_into(self, parent: &mut CallbackQueue) {
        parent.entries.extend(self.entries);
    }

    pub(crate) fn discard(self) {
        drop(self.entries);
    }

    pub(crate) fn invoke_all(self, mut invoke: impl FnMut(Target, &str)) {
        for (target, argument) in self.entries {
            invoke(target, &argument);
        }
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[(Target, String)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_preserves_order() {
        let mut parent = CallbackQueue::default();
        parent.append(Target::Option(0), "a");
        let mut nested = CallbackQueue::default();
        nested.append(Target::Option(1), "b");
        nested.append(Target::Param(0), "80");

        nested.merge_into(&mut parent);

        assert_eq!(
            parent.entries(),
            &[
                (Target::Option(0), "a".to_string()),
                (Target::Option(1), "b".to_string()),
                (Target::Param(0), "80".to_string()),
            ]
        );
    }

    #[test]
    fn discard_invokes_nothing() {
        let mut parent = CallbackQueue::default();
        parent.append(Target::Option(0), "a");
        let mut nested = CallbackQueue::default();
        nested.append(Target::Option(1), "b");

        nested.discard();

        let mut invoked = Vec::default();
        parent.invoke_all(|target, argument| invoked.push((target, argument.to_string())));
        assert_eq!(invoked, vec![(Target::Option(0), "a".to_string())]);
    }

    #[test]
    fn invoke_all_fifo() {
        let mut queue = CallbackQueue::default();
        for argument in ["x", "y", "z"] {
            queue.append(Target::Param(2), argument);
        }

        let mut invoked = Vec::default();
        queue.invoke_all(|_, argument| invoked.push(argument.to_string()));
        assert_eq!(invoked, vec!["x", "y", "z"]);
    }
}
