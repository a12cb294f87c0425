// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Interning pool mapping state stacks to small integer ids.
//!
//! Host text widgets offer a single integer as per-line carried state; the
//! pool is the bridge between that slot and the unbounded nested
//! [`StateStack`] representation. Interning is referentially transparent:
//! structurally equal stacks always map to the same id, and an id decodes
//! to the same stack forever. The pool grows monotonically; in practice the
//! number of distinct reachable stacks per language is small, bounded by
//! the frame-shape combinations the tokenizers can produce.

use std::collections::HashMap;

use crate::syntax::types::StateStack;

/// Opaque per-line state identifier exchanged with the host.
pub type StateId = i32;

/// Reserved id decoding to the empty stack (start of document).
pub const EMPTY_STATE: StateId = -1;

/// Bidirectional map between stack values and interned ids.
#[derive(Debug, Default)]
pub struct StateStackPool {
    by_stack: HashMap<StateStack, StateId>,
    by_id: Vec<StateStack>,
}

impl StateStackPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for a stack, assigning a fresh one the first time a
    /// structurally distinct stack is seen.
    pub fn intern(&mut self, stack: &StateStack) -> StateId {
        if let Some(&id) = self.by_stack.get(stack) {
            return id;
        }
        let id = self.by_id.len() as StateId;
        self.by_stack.insert(stack.clone(), id);
        self.by_id.push(stack.clone());
        id
    }

    /// Decodes an id back into a stack. [`EMPTY_STATE`] and ids never
    /// assigned decode to the empty stack; this never fails.
    pub fn get(&self, id: StateId) -> StateStack {
        if id < 0 {
            return StateStack::empty();
        }
        self.by_id.get(id as usize).cloned().unwrap_or_default()
    }

    /// Number of distinct stacks interned so far.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
