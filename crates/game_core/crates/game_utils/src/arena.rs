// arena.rs: stockage clé=Id pour les entités du monde (réseaux, joueurs, coffres)
// Chaque entité porte son propre Id; l'arène le relie à une clé slotmap, accès O(1),
// et un retrait ne décale pas les autres entrées.

use slotmap::{DefaultKey, SlotMap};
use std::collections::HashMap;
use std::hash::Hash;

/// Types porteurs de leur propre Id d'arène
pub trait HasId<Id> {
    fn id_ref(&self) -> &Id;
}

#[derive(Debug)]
pub struct Arena<T, Id>
where
    Id: Eq + Hash + Copy,
{
    slab: SlotMap<DefaultKey, T>,
    // index: Id -> SlotKey
    index: HashMap<Id, DefaultKey>,
}

impl<T, Id> Default for Arena<T, Id>
where
    Id: Eq + Hash + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Id> Arena<T, Id>
where
    Id: Eq + Hash + Copy,
{
    pub fn new() -> Self {
        Self {
            slab: SlotMap::with_key(),
            index: HashMap::new(),
        }
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.index.get(&id).and_then(|&k| self.slab.get(k))
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        match self.index.get(&id) {
            Some(&k) => self.slab.get_mut(k),
            None => None,
        }
    }

    pub fn contains(&self, id: Id) -> bool {
        self.index.contains_key(&id)
    }

    /// Retire et retourne l’élément par Id
    pub fn remove(&mut self, id: Id) -> Option<T> {
        self.index.remove(&id).and_then(|k| self.slab.remove(k))
    }

    /// Iterates over the ids currently stored, in no particular order
    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.index.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slab.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slab.values_mut()
    }

    pub fn len(&self) -> usize {
        self.slab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slab.is_empty()
    }
}

impl<T, Id> Arena<T, Id>
where
    Id: Eq + Hash + Copy,
    T: HasId<Id>,
{
    /// Place `value` sous l'Id qu'il porte. Remplace et retourne l'ancien si présent.
    pub fn insert(&mut self, value: T) -> Option<T> {
        let id = *value.id_ref();
        if let Some(&k) = self.index.get(&id) {
            if let Some(slot) = self.slab.get_mut(k) {
                return Some(std::mem::replace(slot, value));
            }
        }
        let k = self.slab.insert(value);
        self.index.insert(id, k);
        None
    }
}

impl<T, Id> Clone for Arena<T, Id>
where
    Id: Eq + Hash + Copy,
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            slab: self.slab.clone(),
            index: self.index.clone(),
        }
    }
}
