use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// An insert-only set of bank identifiers with deterministic iteration order.
///
/// The interaction sets on an application (`viewed_by`, `purchased_by`) are
/// append-if-absent collections: inserting an already-present bank is a
/// no-op, and nothing is ever removed outside of reconciler correction.
/// Backends enforce the no-duplicates property with their own uniqueness
/// constraints; this type carries it through the domain layer.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        transparent,
        bound(
            serialize = "B: serde::Serialize + Eq + std::hash::Hash",
            deserialize = "B: serde::Deserialize<'de> + Eq + std::hash::Hash"
        )
    )
)]
pub struct BankGroup<B>(pub IndexSet<B, FxBuildHasher>);

impl<B: Eq + std::hash::Hash> BankGroup<B> {
    /// Insert a bank, returning whether it was newly added.
    pub fn insert(&mut self, bank_id: B) -> bool {
        self.0.insert(bank_id)
    }
}

// Manual impls: the derives would demand `B: Default` / `B: PartialEq`,
// but an empty group needs nothing of its member type and set equality
// needs `Eq + Hash`.
impl<B> Default for BankGroup<B> {
    fn default() -> Self {
        Self(IndexSet::default())
    }
}

impl<B: Eq + std::hash::Hash> PartialEq for BankGroup<B> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<B: Eq + std::hash::Hash> Eq for BankGroup<B> {}

impl<B> std::ops::Deref for BankGroup<B> {
    type Target = IndexSet<B, FxBuildHasher>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<B> IntoIterator for BankGroup<B> {
    type Item = B;
    type IntoIter = indexmap::set::IntoIter<B>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<B: Eq + std::hash::Hash> FromIterator<B> for BankGroup<B> {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self(IndexSet::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::BankGroup;

    #[test]
    fn insert_is_idempotent() {
        let mut group = BankGroup::default();
        assert!(group.insert("a"));
        assert!(group.insert("b"));
        assert!(!group.insert("a"));
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn deduplicates_on_collect() {
        let group: BankGroup<&str> = ["a", "b", "a", "c", "b"].into_iter().collect();
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn empty_group_needs_nothing_of_its_member_type() {
        // identifier types are Eq + Hash but deliberately not Default
        #[derive(Debug, PartialEq, Eq, Hash)]
        struct Opaque(u64);

        let group: BankGroup<Opaque> = BankGroup::default();
        assert!(group.is_empty());
    }

    #[test]
    fn equality_is_set_equality() {
        let a: BankGroup<&str> = ["x", "y"].into_iter().collect();
        let b: BankGroup<&str> = ["y", "x"].into_iter().collect();
        let c: BankGroup<&str> = ["x"].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
