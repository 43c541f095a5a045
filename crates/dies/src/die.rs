//! The generic immutable builder every typed die is built on.
//!
//! A [`Die`] owns exactly one record. Deriving a new die never touches the record held by the
//! receiver: [`Die::die_stamp`] always works on a private copy and feeds the result back. Whether
//! feeding returns a fresh die or rewrites the receiver in place is controlled by the mutability
//! flag, see [`Die::die_immutable`].
//!
//! The free functions in this module ([`die_with`], [`die_with_ptr`], [`die_upsert`] and
//! [`die_release_all`]) are the building blocks for nested child dies. Typed dies call them from
//! inside [`Die::die_stamp`] so that the copy-on-write rules are never re-implemented per type.
//!
//! A mutable die assumes sequential use. Concurrent stamps through handles of the same mutable
//! die are memory-safe, but the last writer wins.

use std::{fmt, sync::Arc};

use arc_swap::ArcSwap;
use tracing::trace;

/// A plain data aggregate which can be wrapped by a [`Die`].
///
/// Every record type has a process-wide blank die, usually a [`LazyLock`][std::sync::LazyLock]
/// static named `<TYPE>_BLANK`, which wraps [`Default::default`] in immutable mode.
pub trait Record: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Returns the shared blank die for this record type.
    fn blank() -> &'static Die<Self>;

    /// Whether the record counts as empty when released as an optional value.
    ///
    /// [`Die::die_release_ptr`] returns [`None`] for empty records.
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A record which is a thin alias (newtype) around another type.
pub trait Alias: Record {
    type Underlying;

    fn into_underlying(self) -> Self::Underlying;
}

/// An immutable wrapper around a single record.
///
/// Equality only compares the held records, the mutability flag is ignored. Cloning a die
/// produces a deep copy with the same mutability flag; use [`Die::ptr_eq`] to check whether two
/// handles point at the same die.
pub struct Die<R> {
    record: Arc<ArcSwap<R>>,
    mutable: bool,
}

impl<R: Record> Die<R> {
    /// Creates a new immutable die wrapping `record`.
    pub fn new(record: R) -> Self {
        Self::with_mode(record, false)
    }

    fn with_mode(record: R, mutable: bool) -> Self {
        Self {
            record: Arc::new(ArcSwap::from_pointee(record)),
            mutable,
        }
    }

    /// Another handle onto the same storage.
    fn handle(&self) -> Self {
        Self {
            record: Arc::clone(&self.record),
            mutable: self.mutable,
        }
    }

    /// Returns `true` if both handles refer to the same die.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.record, &other.record)
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Returns a die with the requested mutability.
    ///
    /// If the mode already matches, a handle to the receiver is returned. Otherwise the record
    /// is copied into a new die, so a mutable die never shares storage with an immutable one.
    pub fn die_immutable(&self, immutable: bool) -> Self {
        if self.mutable != immutable {
            return self.handle();
        }

        Self::with_mode(self.die_release(), !immutable)
    }

    /// Applies `mutate` to a private copy of the record and feeds the result back.
    ///
    /// Immutable dies return a new die and stay untouched. Mutable dies store the new record in
    /// place and return a handle to themselves, which makes chaining inside child closures work.
    pub fn die_stamp(&self, mutate: impl FnOnce(&mut R)) -> Self {
        let mut record = self.die_release();
        mutate(&mut record);
        self.die_feed(record)
    }

    /// Like [`Self::die_stamp`], but the mutation can fail.
    ///
    /// Nothing is fed back on error, neither mode observes a partially applied mutation.
    pub fn die_try_stamp<E>(
        &self,
        mutate: impl FnOnce(&mut R) -> Result<(), E>,
    ) -> Result<Self, E> {
        let mut record = self.die_release();
        mutate(&mut record)?;
        Ok(self.die_feed(record))
    }

    /// Returns a die wrapping exactly `record`, keeping the current mutability.
    pub fn die_feed(&self, record: R) -> Self {
        if self.mutable {
            self.record.store(Arc::new(record));
            return self.handle();
        }

        Self::new(record)
    }

    /// Like [`Self::die_feed`], but seeds the default record if `record` is [`None`].
    pub fn die_feed_ptr(&self, record: Option<R>) -> Self {
        self.die_feed(record.unwrap_or_default())
    }

    /// Returns a copy of the held record.
    pub fn die_release(&self) -> R {
        (**self.record.load()).clone()
    }

    /// Returns a copy of the held record, or [`None`] if it is [empty][Record::is_empty].
    pub fn die_release_ptr(&self) -> Option<R> {
        let record = self.die_release();
        (!record.is_empty()).then_some(record)
    }
}

impl<R: Alias> Die<R> {
    /// Releases the record and unwraps one level of aliasing.
    pub fn die_release_unwrap(&self) -> R::Underlying {
        self.die_release().into_underlying()
    }
}

impl<R: Record> Default for Die<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: Record> Clone for Die<R> {
    fn clone(&self) -> Self {
        Self::with_mode(self.die_release(), self.mutable)
    }
}

impl<R: Record> PartialEq for Die<R> {
    fn eq(&self, other: &Self) -> bool {
        **self.record.load() == **other.record.load()
    }
}

impl<R: Record> fmt::Debug for Die<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Die")
            .field("record", &**self.record.load())
            .field("mutable", &self.mutable)
            .finish()
    }
}

impl<R: Record> From<R> for Die<R> {
    fn from(record: R) -> Self {
        Self::new(record)
    }
}

/// Feeds `record` into a mutable child die, hands it to `f` and releases the result.
///
/// The child is always mutable, regardless of the parent's mode, so that whatever `f` does to it
/// sticks. The return values of calls made inside `f` can be ignored.
pub fn die_with<C: Record>(record: C, f: impl FnOnce(&Die<C>)) -> C {
    let die = C::blank().die_immutable(false).die_feed(record);
    f(&die);
    die.die_release()
}

/// Like [`die_with`], for optional fields. Releases [`None`] if the child ends up empty.
pub fn die_with_ptr<C: Record>(record: Option<C>, f: impl FnOnce(&Die<C>)) -> Option<C> {
    let die = C::blank().die_immutable(false).die_feed_ptr(record);
    f(&die);
    die.die_release_ptr()
}

/// Releases every die, in order, into a new sequence.
pub fn die_release_all<C: Record>(dies: impl IntoIterator<Item = Die<C>>) -> Vec<C> {
    dies.into_iter().map(|die| die.die_release()).collect()
}

/// Updates the first element matching `matches`, or appends a new one.
///
/// A matching element is edited through a child die and written back at the same position.
/// Without a match, the element returned by `seed` (which should only carry the key) is edited
/// and pushed to the end. Other elements keep their order.
pub fn die_upsert<C: Record>(
    items: &mut Vec<C>,
    matches: impl Fn(&C) -> bool,
    seed: impl FnOnce() -> C,
    f: impl FnOnce(&Die<C>),
) {
    if let Some(index) = items.iter().position(matches) {
        trace!(index, "updating existing element in place");
        let item = std::mem::take(&mut items[index]);
        items[index] = die_with(item, f);
        return;
    }

    trace!(index = items.len(), "appending new element");
    items.push(die_with(seed(), f));
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    struct Item {
        key: String,
        value: Option<i32>,
    }

    static ITEM_BLANK: LazyLock<Die<Item>> = LazyLock::new(Die::default);

    impl Record for Item {
        fn blank() -> &'static Die<Self> {
            LazyLock::force(&ITEM_BLANK)
        }
    }

    fn item(key: &str, value: Option<i32>) -> Item {
        Item {
            key: key.to_owned(),
            value,
        }
    }

    #[test]
    fn stamp_leaves_immutable_receiver_untouched() {
        let die = Die::new(item("a", None));
        let stamped = die.die_stamp(|r| r.value = Some(1));

        assert_eq!(die.die_release(), item("a", None));
        assert_eq!(stamped.die_release(), item("a", Some(1)));
        assert!(!Die::ptr_eq(&die, &stamped));
    }

    #[test]
    fn stamp_rewrites_mutable_receiver() {
        let die = Die::new(item("a", None)).die_immutable(false);
        let stamped = die.die_stamp(|r| r.value = Some(1));

        assert!(Die::ptr_eq(&die, &stamped));
        assert_eq!(die.die_release(), item("a", Some(1)));
    }

    #[test]
    fn die_immutable_copies_only_on_mode_change() {
        let die = Die::new(item("a", None));
        assert!(Die::ptr_eq(&die, &die.die_immutable(true)));

        let mutable = die.die_immutable(false);
        assert!(mutable.is_mutable());
        assert!(!Die::ptr_eq(&die, &mutable));

        mutable.die_stamp(|r| r.value = Some(3));
        assert_eq!(die.die_release(), item("a", None));
    }

    #[test]
    fn blank_is_never_mutated() {
        let mutable = ITEM_BLANK.die_immutable(false);
        mutable.die_stamp(|r| r.key = "changed".to_owned());

        assert_eq!(ITEM_BLANK.die_release(), Item::default());
        assert_eq!(mutable.die_release().key, "changed");
    }

    #[test]
    fn try_stamp_error_keeps_mutable_state() {
        let die = Die::new(item("a", Some(1))).die_immutable(false);
        let result = die.die_try_stamp(|r| {
            r.value = Some(2);
            Err("nope")
        });

        assert_eq!(result, Err("nope"));
        assert_eq!(die.die_release(), item("a", Some(1)));
    }

    #[test]
    fn release_is_detached() {
        let die = Die::new(item("a", Some(1)));
        let mut released = die.die_release();
        released.value = None;

        assert_eq!(die.die_release(), item("a", Some(1)));
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let die = Die::new(item("a", None)).die_immutable(false);
        let copy = die.clone();
        copy.die_stamp(|r| r.value = Some(7));

        assert!(copy.is_mutable());
        assert_eq!(die.die_release(), item("a", None));
        assert_ne!(die, copy);
    }

    #[test]
    fn equality_ignores_mutability() {
        let immutable = Die::new(item("a", None));
        let mutable = immutable.die_immutable(false);

        assert_eq!(immutable, mutable);
    }

    #[test]
    fn release_ptr_of_empty_record_is_none() {
        assert_eq!(ITEM_BLANK.die_release_ptr(), None);
        assert_eq!(
            ITEM_BLANK.die_feed(item("a", None)).die_release_ptr(),
            Some(item("a", None))
        );
    }

    #[test]
    fn with_ptr_round_trips_untouched_none() {
        assert_eq!(die_with_ptr::<Item>(None, |_| {}), None);
        assert_eq!(
            die_with_ptr::<Item>(None, |d| {
                d.die_stamp(|r| r.value = Some(4));
            }),
            Some(item("", Some(4)))
        );
    }

    #[test]
    fn upsert_updates_in_place_and_appends_unknown_keys() {
        let mut items = vec![item("a", None), item("b", Some(2))];

        die_upsert(
            &mut items,
            |i| i.key == "a",
            || item("a", None),
            |d| {
                d.die_stamp(|r| r.value = Some(1));
            },
        );
        assert_eq!(items, vec![item("a", Some(1)), item("b", Some(2))]);

        die_upsert(&mut items, |i| i.key == "c", || item("c", None), |_| {});
        assert_eq!(
            items,
            vec![item("a", Some(1)), item("b", Some(2)), item("c", None)]
        );
    }

    #[test]
    fn release_all_keeps_argument_order() {
        let released = die_release_all([
            ITEM_BLANK.die_feed(item("z", None)),
            ITEM_BLANK.die_feed(item("a", None)),
        ]);

        assert_eq!(released, vec![item("z", None), item("a", None)]);
    }
}
