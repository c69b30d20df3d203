//! Entity identity and equality
//!
//! An entity is "the same" as another when both are the same concrete kind
//! and both carry the same storage-assigned id. Before storage assigns an id
//! the entity is *transient* and is only equal to itself (and to clones of
//! itself that are still transient).
//!
//! Each entity embeds an [`Identity`]. [`EntityRef`] is the copyable handle
//! aggregates use to point at other aggregates; it carries the same
//! equality and hashing contract as the entity it was taken from.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of process-unique instance tokens for transient identity
static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Identifier types usable by entities; `Default` is the unassigned value
pub trait EntityId: Copy + Eq + Hash + Default + fmt::Debug + Send + Sync + 'static {}

impl<T> EntityId for T where T: Copy + Eq + Hash + Default + fmt::Debug + Send + Sync + 'static {}

/// Identity slot embedded in every entity
#[derive(Debug, Clone)]
pub struct Identity<I: EntityId> {
    id: I,
    instance: u64,
}

impl<I: EntityId> Identity<I> {
    /// Fresh identity with no id assigned
    pub fn transient() -> Self {
        Self {
            id: I::default(),
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Identity of an entity rebuilt from storage
    pub fn persisted(id: I) -> Self {
        let mut identity = Self::transient();
        identity.id = id;
        identity
    }

    #[inline]
    pub fn id(&self) -> I {
        self.id
    }

    #[inline]
    pub fn is_transient(&self) -> bool {
        self.id == I::default()
    }

    pub(crate) fn assign(&mut self, id: I) {
        self.id = id;
    }
}

impl<I: EntityId> Default for Identity<I> {
    fn default() -> Self {
        Self::transient()
    }
}

/// Common capability of every domain entity
pub trait Entity: Any {
    type Id: EntityId;

    fn identity(&self) -> &Identity<Self::Id>;

    fn identity_mut(&mut self) -> &mut Identity<Self::Id>;

    #[inline]
    fn id(&self) -> Self::Id {
        self.identity().id()
    }

    #[inline]
    fn is_transient(&self) -> bool {
        self.identity().is_transient()
    }

    /// Record the id chosen by storage
    ///
    /// Changes the entity's hash: assign before the entity is used as a key
    /// or referenced from another aggregate.
    fn assign_id(&mut self, id: Self::Id) {
        self.identity_mut().assign(id);
    }

    fn entity_ref(&self) -> EntityRef<Self::Id>
    where
        Self: Sized,
    {
        EntityRef {
            kind: TypeId::of::<Self>(),
            id: self.id(),
            instance: self.identity().instance,
        }
    }

    /// Equality across entity kinds; `false` whenever the kinds differ
    fn same_entity_as<E: Entity>(&self, other: &E) -> bool
    where
        Self: Sized,
    {
        (other as &dyn Any)
            .downcast_ref::<Self>()
            .is_some_and(|other| self.entity_ref() == other.entity_ref())
    }
}

/// Copyable handle to an entity, compared by entity identity
#[derive(Clone, Copy)]
pub struct EntityRef<I: EntityId> {
    kind: TypeId,
    id: I,
    instance: u64,
}

impl<I: EntityId> EntityRef<I> {
    #[inline]
    pub fn id(&self) -> I {
        self.id
    }

    #[inline]
    pub fn is_transient(&self) -> bool {
        self.id == I::default()
    }

    /// Check whether this handle points at an entity of kind `E`
    pub fn is_kind<E: Entity>(&self) -> bool {
        self.kind == TypeId::of::<E>()
    }

    /// Check whether this handle points at `entity`
    pub fn refers_to<E: Entity<Id = I>>(&self, entity: &E) -> bool {
        self.designates_same(&entity.entity_ref())
    }

    /// Check whether two handles point at the same entity
    ///
    /// Unlike `==`, a handle taken while the entity was transient still
    /// matches one taken after storage assigned its id. Two persisted handles
    /// match only on equal ids.
    pub fn designates_same(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        match (self.is_transient(), other.is_transient()) {
            (false, false) => self.id == other.id,
            _ => self.instance == other.instance,
        }
    }
}

impl<I: EntityId> PartialEq for EntityRef<I> {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        match (self.is_transient(), other.is_transient()) {
            (false, false) => self.id == other.id,
            (true, true) => self.instance == other.instance,
            _ => false,
        }
    }
}

impl<I: EntityId> Eq for EntityRef<I> {}

impl<I: EntityId> Hash for EntityRef<I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        if self.is_transient() {
            self.instance.hash(state);
        } else {
            self.id.hash(state);
        }
    }
}

impl<I: EntityId> fmt::Debug for EntityRef<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_transient() {
            write!(f, "EntityRef(transient #{})", self.instance)
        } else {
            write!(f, "EntityRef({:?})", self.id)
        }
    }
}

/// Implement `PartialEq`, `Eq` and `Hash` through [`Entity::entity_ref`]
macro_rules! entity_equality {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    $crate::entities::Entity::entity_ref(self)
                        == $crate::entities::Entity::entity_ref(other)
                }
            }

            impl Eq for $ty {}

            impl ::std::hash::Hash for $ty {
                fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                    ::std::hash::Hash::hash(&$crate::entities::Entity::entity_ref(self), state);
                }
            }
        )+
    };
}

pub(crate) use entity_equality;
