//! NodeList: sentinel-headed singly-linked list stored in a slotmap arena.
//!
//! Nodes live in a `SlotMap` and link to their successor by key, so
//! relinking is key reassignment and a removed node's key never aliases a
//! later one.
//!
//! ```text
//!   head (sentinel link)
//!     │
//!     ▼
//!   [k3: C] ──► [k2: B] ──► [k1: A] ──► None
//! ```
//!
//! A [`Position`] names a *link slot*, not a node: `Position::HEAD` is the
//! sentinel's link and the position after node `k` is `k`'s `next` link.
//! The element "at" a position is whatever that link points to, so the
//! sentinel is never an element and inserting or removing at the front needs
//! no special case. Removing the element at `p` leaves `p` naming the former
//! successor.

use crate::error::InvariantError;
use slotmap::{DefaultKey, SlotMap};

/// Largest number of nodes the arena can hold.
pub const MAX_NODES: usize = (u32::MAX - 1) as usize;

/// A link slot in a [`NodeList`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position(Slot);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum Slot {
    Sentinel,
    After(DefaultKey),
}

impl Position {
    /// The sentinel's link; the element here is the front of the list.
    pub const HEAD: Position = Position(Slot::Sentinel);

    pub fn is_head(&self) -> bool {
        matches!(self.0, Slot::Sentinel)
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    next: Option<DefaultKey>,
}

#[derive(Debug)]
pub struct NodeList<T> {
    head: Option<DefaultKey>,
    nodes: SlotMap<DefaultKey, Node<T>>,
}

impl<T> NodeList<T> {
    pub fn new() -> Self {
        Self {
            head: None,
            nodes: SlotMap::with_key(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            head: None,
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of the front element (always the sentinel link).
    pub fn first(&self) -> Position {
        Position::HEAD
    }

    /// True if no element is at `p`. Stale positions are at the end.
    pub fn is_end(&self, p: Position) -> bool {
        self.link(p).is_none()
    }

    /// Position following the element at `p`, or `None` when `p` is the end.
    pub fn next(&self, p: Position) -> Option<Position> {
        self.link(p).map(|k| Position(Slot::After(k)))
    }

    pub fn inspect(&self, p: Position) -> Option<&T> {
        let k = self.link(p)?;
        self.nodes.get(k).map(|n| &n.value)
    }

    pub fn front(&self) -> Option<&T> {
        self.inspect(Position::HEAD)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let k = self.head?;
        self.nodes.get_mut(k).map(|n| &mut n.value)
    }

    /// Links `value` in as the new front element.
    pub fn push_front(&mut self, value: T) {
        let k = self.nodes.insert(Node {
            value,
            next: self.head,
        });
        self.head = Some(k);
    }

    /// Unlinks and returns the element at `p`. Afterwards `p` names the
    /// removed element's successor.
    pub fn remove(&mut self, p: Position) -> Option<T> {
        let target = self.link(p)?;
        let node = self.nodes.remove(target)?;
        self.set_link(p, node.next);
        Some(node.value)
    }

    /// Moves the element at `p` to the front without touching the arena.
    ///
    /// Three links change: the sentinel points at the element, the element
    /// points at the old front, and `p` points at the element's old
    /// successor. When `p` is the sentinel the element is already first and
    /// nothing changes. Returns `false` if there is no element at `p`.
    pub fn splice_to_front(&mut self, p: Position) -> bool {
        let Some(target) = self.link(p) else {
            return false;
        };
        if p.is_head() {
            return true;
        }
        let Some(node) = self.nodes.get_mut(target) else {
            return false;
        };
        let after = node.next;
        node.next = self.head;
        self.head = Some(target);
        self.set_link(p, after)
    }

    /// Walks from the sentinel and checks that every stored node is reached
    /// exactly once.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let stored = self.nodes.len();
        let mut steps = 0;
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = self
                .nodes
                .get(k)
                .ok_or(InvariantError::DanglingLink { steps })?;
            if steps == stored {
                return Err(InvariantError::Cycle {
                    steps: steps + 1,
                    stored,
                });
            }
            steps += 1;
            cur = node.next;
        }
        if steps == stored {
            Ok(())
        } else {
            Err(InvariantError::Unreachable {
                reachable: steps,
                stored,
            })
        }
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cur: self.head,
            remaining: self.nodes.len(),
        }
    }

    fn link(&self, p: Position) -> Option<DefaultKey> {
        match p.0 {
            Slot::Sentinel => self.head,
            Slot::After(k) => self.nodes.get(k).and_then(|n| n.next),
        }
    }

    fn set_link(&mut self, p: Position, to: Option<DefaultKey>) -> bool {
        match p.0 {
            Slot::Sentinel => {
                self.head = to;
                true
            }
            Slot::After(k) => match self.nodes.get_mut(k) {
                Some(n) => {
                    n.next = to;
                    true
                }
                None => false,
            },
        }
    }
}

/// Front-to-back iterator; stops after `len` elements even on a corrupt list.
#[cfg(test)]
pub(crate) struct Iter<'a, T> {
    list: &'a NodeList<T>,
    cur: Option<DefaultKey>,
    remaining: usize,
}

#[cfg(test)]
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.cur?)?;
        self.remaining -= 1;
        self.cur = node.next;
        Some(&node.value)
    }
}
