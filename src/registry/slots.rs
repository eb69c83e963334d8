//! Generational slot arena
//!
//! Slots are handed out from a free list and stamped with a generation, so a
//! key to a removed (or replaced) value stops resolving instead of aliasing
//! whatever reuses the slot.

/// Index plus generation of a live slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub index: u32,
    pub generation: u32,
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Arena with an optional fixed capacity.
///
/// Iteration follows insertion order.
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    order: Vec<u32>,
    capacity: Option<u32>,
}

impl<T> SlotArena<T> {
    /// Arena holding at most `capacity` values. All slots are reserved up front.
    pub fn bounded(capacity: u32) -> Self {
        Self {
            slots: (0..capacity)
                .map(|_| Slot {
                    generation: 0,
                    value: None,
                })
                .collect(),
            // Popped from the back, so slot 0 is handed out first.
            free: (0..capacity).rev().collect(),
            order: Vec::with_capacity(capacity as usize),
            capacity: Some(capacity),
        }
    }

    /// Arena that grows on demand.
    pub fn unbounded() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            capacity: None,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the next insert would fail.
    pub fn is_full(&self) -> bool {
        self.capacity.is_some() && self.free.is_empty()
    }

    /// Store `value`, or hand it back when the arena is full.
    pub fn insert(&mut self, value: T) -> Result<SlotKey, T> {
        let index = match self.free.pop() {
            Some(index) => index,
            None if self.capacity.is_none() => {
                self.slots.push(Slot {
                    generation: 0,
                    value: None,
                });
                self.slots.len() as u32 - 1
            }
            None => return Err(value),
        };

        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);
        self.order.push(index);
        Ok(SlotKey {
            index,
            generation: slot.generation,
        })
    }

    pub fn get(&self, key: SlotKey) -> Option<&T> {
        self.slots
            .get(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        self.slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Remove the value behind `key` and recycle its slot.
    pub fn remove(&mut self, key: SlotKey) -> Option<T> {
        let slot = self
            .slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.order.retain(|&i| i != key.index);
        self.free.push(key.index);
        Some(value)
    }

    /// Swap in a new value under a fresh generation; the old key goes stale.
    pub fn replace(&mut self, key: SlotKey, value: T) -> Option<(SlotKey, T)> {
        let slot = self
            .slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation && slot.value.is_some())?;
        let old = slot.value.replace(value)?;
        slot.generation = slot.generation.wrapping_add(1);
        Some((
            SlotKey {
                index: key.index,
                generation: slot.generation,
            },
            old,
        ))
    }

    /// Live values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &T)> {
        self.order.iter().filter_map(|&index| {
            let slot = &self.slots[index as usize];
            slot.value.as_ref().map(|value| {
                (
                    SlotKey {
                        index,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }

    /// Remove every value, in insertion order.
    pub fn drain(&mut self) -> Vec<T> {
        let order = std::mem::take(&mut self.order);
        let mut out = Vec::with_capacity(order.len());
        for index in order {
            let slot = &mut self.slots[index as usize];
            if let Some(value) = slot.value.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index);
                out.push(value);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_rejects_overflow() {
        let mut arena = SlotArena::bounded(2);
        assert!(arena.insert("a").is_ok());
        assert!(arena.insert("b").is_ok());
        assert!(arena.is_full());
        assert_eq!(arena.insert("c"), Err("c"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_slots_assigned_in_order() {
        let mut arena = SlotArena::bounded(3);
        let keys: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|v| arena.insert(v).unwrap().index)
            .collect();
        assert_eq!(keys, vec![0, 1, 2]);
    }

    #[test]
    fn test_removed_slot_is_reused_and_old_key_is_stale() {
        let mut arena = SlotArena::bounded(2);
        let a = arena.insert("a").unwrap();
        let _b = arena.insert("b").unwrap();
        assert_eq!(arena.remove(a), Some("a"));
        assert!(!arena.is_full());

        let c = arena.insert("c").unwrap();
        assert_eq!(c.index, a.index);
        assert_ne!(c.generation, a.generation);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(c), Some(&"c"));
        assert_eq!(arena.remove(a), None);
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut arena = SlotArena::bounded(3);
        let a = arena.insert("a").unwrap();
        arena.insert("b").unwrap();
        arena.remove(a);
        arena.insert("c").unwrap();
        let values: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["b", "c"]);
    }

    #[test]
    fn test_replace_bumps_generation() {
        let mut arena = SlotArena::unbounded();
        let a = arena.insert(1).unwrap();
        let (fresh, old) = arena.replace(a, 2).unwrap();
        assert_eq!(old, 1);
        assert_eq!(fresh.index, a.index);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(fresh), Some(&2));
        assert!(arena.replace(a, 3).is_none());
    }

    #[test]
    fn test_unbounded_grows_and_drains() {
        let mut arena = SlotArena::unbounded();
        for i in 0..10 {
            arena.insert(i).unwrap();
        }
        assert!(!arena.is_full());
        assert_eq!(arena.drain(), (0..10).collect::<Vec<_>>());
        assert_eq!(arena.len(), 0);
    }
}
