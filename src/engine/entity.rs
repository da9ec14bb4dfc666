use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

/// An independently animated element.
///
/// `Env` is the read-only slice of world state the update rule needs (gravity, canvas size,
/// current time). Rendering only reads.
pub trait Entity {
    type Env: ?Sized;

    fn step(&mut self, env: &Self::Env, rng: &mut SketchRng);

    fn is_expired(&self) -> bool;

    fn render(&self, painter: &mut Painter<'_>);
}

/// Ordered homogeneous entity collection.
#[derive(Clone, Debug)]
pub struct EntityStore<E> {
    items: Vec<E>,
    spawned: u64,
    retired: u64,
}

impl<E> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            spawned: 0,
            retired: 0,
        }
    }
}

impl<E> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: E) {
        self.items.push(entity);
        self.spawned += 1;
    }

    pub fn extend(&mut self, entities: impl IntoIterator<Item = E>) {
        for e in entities {
            self.spawn(e);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.items
    }

    /// Entities ever added.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Entities ever removed by [`EntityStore::prune`] or [`EntityStore::retain`].
    pub fn retired(&self) -> u64 {
        self.retired
    }

    /// Keep the entities for which `keep` holds; returns how many were removed.
    pub fn retain(&mut self, keep: impl FnMut(&E) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        let removed = before - self.items.len();
        self.retired += removed as u64;
        removed
    }

    pub fn clear(&mut self) {
        self.retired += self.items.len() as u64;
        self.items.clear();
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn step_all(&mut self, env: &E::Env, rng: &mut SketchRng) {
        for e in &mut self.items {
            e.step(env, rng);
        }
    }

    /// Drop every expired entity, preserving the order and state of the rest.
    pub fn prune(&mut self) -> usize {
        self.retain(|e| !e.is_expired())
    }

    pub fn render_all(&self, painter: &mut Painter<'_>) {
        for e in &self.items {
            e.render(painter);
        }
    }
}

impl<'a, E> IntoIterator for &'a EntityStore<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/entity.rs"]
mod tests;
