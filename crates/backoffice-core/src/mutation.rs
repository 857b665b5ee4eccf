//! Optimistic mutation bookkeeping.

/// One optimistic change to a single field of a single record.
///
/// `previous_value` is captured before the local copy is touched, so a failed
/// remote call can put back exactly what *this* mutation replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationIntent<Id, V> {
    pub target_id: Id,
    pub field: &'static str,
    pub new_value: V,
    pub previous_value: V,
}

impl<Id, V> MutationIntent<Id, V> {
    pub fn new(target_id: Id, field: &'static str, previous_value: V, new_value: V) -> Self {
        Self {
            target_id,
            field,
            new_value,
            previous_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordStatus;

    #[test]
    fn intent_keeps_both_values() {
        let intent = MutationIntent::new(7u64, "status", RecordStatus::Active, RecordStatus::Inactive);
        assert_eq!(intent.previous_value, RecordStatus::Active);
        assert_eq!(intent.new_value, RecordStatus::Inactive);
    }
}
