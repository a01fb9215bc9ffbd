//! Generic named-child upsert of entity collections

use ide_config::{Collection, Identified, Named};
use ide_xml::Element;

use crate::allocator::IdAllocator;
use crate::error::{Error, Result};

/// How a merger treats the identifier attribute of entity elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityMode {
    /// The element owns the identifier: keep it if present, allocate one
    /// otherwise, and report it back onto the entity.
    Assign(&'static str),
    /// The identifier is owned by another file: copy it from the entity,
    /// which must already carry one.
    Mirror(&'static str),
}

/// Writes one kind of entity into a project file tree.
pub trait EntityMerger {
    type Entity: Identified;

    /// Find or create the element all entities of this kind live under.
    ///
    /// Container-level attributes that are not merge-sensitive are forced
    /// here on every run.
    fn container<'a>(&self, root: &'a mut Element) -> &'a mut Element;

    /// Tag of the per-entity element.
    fn entity_tag(&self) -> &'static str;

    /// Attribute carrying the entity name, used as the merge key.
    fn key_attribute(&self) -> &'static str {
        "name"
    }

    fn identity(&self) -> IdentityMode;

    /// Set the kind-specific attributes and descendants of an entity element.
    fn populate(&self, element: &mut Element, entity: &Self::Entity) -> Result<()>;
}

/// Names of the entities a merge created and matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub created: Vec<String>,
    pub matched: Vec<String>,
}

/// Merge a collection into `root` with `merger`.
///
/// Entities are processed in collection order. On success the tree is
/// updated and every entity carries the identifier of its element. The first
/// error aborts the remaining entities, and in that case neither the tree nor
/// any entity is modified.
pub fn merge_entities<M: EntityMerger>(
    merger: &M,
    root: &mut Element,
    entities: &mut Collection<M::Entity>,
    allocator: &dyn IdAllocator,
) -> Result<MergeOutcome> {
    let mut staged = root.clone();
    let mut assigned = Vec::with_capacity(entities.len());
    let mut outcome = MergeOutcome::default();

    let container = merger.container(&mut staged);
    let tag = merger.entity_tag();
    let key = merger.key_attribute();

    for entity in entities.iter() {
        let name = entity.name();
        let existed = container.find_child(tag, &[(key, name)]).is_some();
        let element = container.find_or_create_child(tag, &[(key, name)]);

        let id = match merger.identity() {
            IdentityMode::Assign(attribute) => match element.attribute(attribute) {
                Some(existing) => existing.to_string(),
                None => {
                    let id = allocator.allocate();
                    element.set_attribute(attribute, id.as_str());
                    id
                }
            },
            IdentityMode::Mirror(attribute) => {
                let id = entity
                    .id()
                    .ok_or_else(|| Error::MissingIdentifier {
                        entity: name.to_string(),
                    })?
                    .to_string();
                element.set_attribute(attribute, id.as_str());
                id
            }
        };

        merger.populate(element, entity)?;

        tracing::debug!(tag, name, id = %id, created = !existed, "Merged entity");
        if existed {
            outcome.matched.push(name.to_string());
        } else {
            outcome.created.push(name.to_string());
        }
        assigned.push((name.to_string(), id));
    }

    *root = staged;
    for (name, id) in assigned {
        if let Some(entity) = entities.get_mut(&name) {
            entity.set_id(id);
        }
    }

    Ok(outcome)
}
