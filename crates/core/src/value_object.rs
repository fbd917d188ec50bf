//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Item stacks, snapshots and transaction results are all compared by their
/// attribute values. Two snapshots of the same item type, quantity and data are
/// the same snapshot regardless of where they were captured.
///
/// Value objects that are also immutable (snapshots, results) expose no
/// mutators; to "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
