use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

use super::EntityId;

/// Errors reported by registry operations.
///
/// Gameplay-normal conditions (looking up a missing component, detaching an
/// absent one) are `Option`/no-op semantics, not errors. Only contract
/// violations surface here.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A component of this capability type is already attached.
    #[error("entity {entity} already has a {component} component")]
    DuplicateComponent {
        entity: EntityId,
        component: &'static str,
    },

    /// The entity id does not refer to a live entity.
    #[error("entity {entity} is not registered")]
    UnknownEntity { entity: EntityId },
}

/// A live entity: metadata plus its capability components.
struct EntityRecord {
    name: String,
    active: bool,
    components: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

/// Owns every entity in one simulation instance.
///
/// Components are stored per entity, keyed by their Rust type. Lookup is
/// typed: `get::<HealthState>(id)` returns the one health component or
/// `None`. The registry is mutated only by the tick driver's thread; it
/// provides no interior synchronization.
#[derive(Default)]
pub struct EntityRegistry {
    entities: HashMap<EntityId, EntityRecord>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new entity and returns its id. Ids are never reused.
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(
            id,
            EntityRecord {
                name: name.into(),
                active: true,
                components: HashMap::new(),
            },
        );
        id
    }

    /// Returns true if the id refers to a live entity.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Display name of an entity, if it is live.
    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.entities.get(&id).map(|record| record.name.as_str())
    }

    pub fn is_active(&self, id: EntityId) -> bool {
        self.entities.get(&id).is_some_and(|record| record.active)
    }

    pub fn set_active(&mut self, id: EntityId, active: bool) {
        if let Some(record) = self.entities.get_mut(&id) {
            record.active = active;
        }
    }

    /// Attaches a component to an entity.
    ///
    /// # Errors
    ///
    /// `DuplicateComponent` if a component of this type is already attached,
    /// `UnknownEntity` if the entity is not live. The component is dropped
    /// in both failure cases.
    pub fn attach<C: Any + Send + Sync>(
        &mut self,
        id: EntityId,
        component: C,
    ) -> Result<(), RegistryError> {
        let record = self
            .entities
            .get_mut(&id)
            .ok_or(RegistryError::UnknownEntity { entity: id })?;

        match record.components.entry(TypeId::of::<C>()) {
            std::collections::hash_map::Entry::Occupied(_) => {
                Err(RegistryError::DuplicateComponent {
                    entity: id,
                    component: type_name::<C>(),
                })
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(Box::new(component));
                Ok(())
            }
        }
    }

    /// Typed component lookup.
    pub fn get<C: Any + Send + Sync>(&self, id: EntityId) -> Option<&C> {
        self.entities
            .get(&id)?
            .components
            .get(&TypeId::of::<C>())?
            .downcast_ref::<C>()
    }

    /// Typed mutable component lookup.
    pub fn get_mut<C: Any + Send + Sync>(&mut self, id: EntityId) -> Option<&mut C> {
        self.entities
            .get_mut(&id)?
            .components
            .get_mut(&TypeId::of::<C>())?
            .downcast_mut::<C>()
    }

    pub fn has<C: Any + Send + Sync>(&self, id: EntityId) -> bool {
        self.entities
            .get(&id)
            .is_some_and(|record| record.components.contains_key(&TypeId::of::<C>()))
    }

    /// Removes and drops a component. No-op when the component (or the
    /// entity) is absent.
    pub fn detach<C: Any + Send + Sync>(&mut self, id: EntityId) {
        if let Some(record) = self.entities.get_mut(&id) {
            record.components.remove(&TypeId::of::<C>());
        }
    }

    /// Removes an entity and drops all of its components. The id becomes
    /// invalid; later intents addressed to it are dropped by the pipeline.
    pub fn destroy(&mut self, id: EntityId) {
        self.entities.remove(&id);
    }

    /// Ids of every live entity, in unspecified order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Ids of every live entity carrying a component of type `C`.
    pub fn entities_with<C: Any + Send + Sync>(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, record)| record.components.contains_key(&TypeId::of::<C>()))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Armor(u32);

    #[derive(Debug, PartialEq)]
    struct Tag;

    #[test]
    fn attach_and_typed_lookup() {
        let mut registry = EntityRegistry::new();
        let id = registry.spawn("dummy");

        registry.attach(id, Armor(12)).unwrap();

        assert!(registry.has::<Armor>(id));
        assert_eq!(registry.get::<Armor>(id), Some(&Armor(12)));
        assert!(!registry.has::<Tag>(id));
        assert_eq!(registry.get::<Tag>(id), None);
    }

    #[test]
    fn duplicate_attach_is_reported() {
        let mut registry = EntityRegistry::new();
        let id = registry.spawn("dummy");

        registry.attach(id, Armor(1)).unwrap();
        let err = registry.attach(id, Armor(2)).unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateComponent { entity, .. } if entity == id));
        // The original component survives the failed attach.
        assert_eq!(registry.get::<Armor>(id), Some(&Armor(1)));
    }

    #[test]
    fn attach_to_unknown_entity_fails() {
        let mut registry = EntityRegistry::new();
        let err = registry.attach(EntityId(99), Tag).unwrap_err();
        assert_eq!(err, RegistryError::UnknownEntity {
            entity: EntityId(99)
        });
    }

    #[test]
    fn detach_is_noop_when_absent() {
        let mut registry = EntityRegistry::new();
        let id = registry.spawn("dummy");

        registry.detach::<Armor>(id);

        registry.attach(id, Armor(3)).unwrap();
        registry.detach::<Armor>(id);
        assert!(!registry.has::<Armor>(id));
    }

    #[test]
    fn destroy_invalidates_identity() {
        let mut registry = EntityRegistry::new();
        let id = registry.spawn("dummy");
        registry.attach(id, Armor(3)).unwrap();

        registry.destroy(id);

        assert!(!registry.contains(id));
        assert_eq!(registry.get::<Armor>(id), None);

        // Ids are never reused.
        let next = registry.spawn("other");
        assert_ne!(next, id);
    }

    #[test]
    fn entities_with_filters_by_component() {
        let mut registry = EntityRegistry::new();
        let a = registry.spawn("a");
        let b = registry.spawn("b");
        let _c = registry.spawn("c");
        registry.attach(a, Armor(1)).unwrap();
        registry.attach(b, Armor(2)).unwrap();

        let mut with_armor = registry.entities_with::<Armor>();
        with_armor.sort();
        assert_eq!(with_armor, vec![a, b]);
    }
}
