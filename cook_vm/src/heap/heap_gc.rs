// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mark and sweep of environment records.
//!
//! Every scope entered while evaluating allocates an environment, so a loop
//! with a lexical head allocates one per iteration. Objects are never
//! freed, which makes every function object a root: the environments it
//! closed over stay alive for as long as the agent does.

use super::{DeclarativeEnvironmentIndex, Heap};
use crate::ecmascript::{
    execution::{Agent, Environment},
    types::ObjectKind,
};

/// Live environments below this count are never collected.
const MIN_GC_THRESHOLD: usize = 1024;

/// Collects unreachable environments once enough have been allocated since
/// the last collection. Does nothing while code is running: environment
/// handles held by the evaluator on the host stack are not roots.
pub(crate) fn maybe_heap_gc(agent: &mut Agent) {
    if !agent.execution_context_stack.is_empty() {
        return;
    }
    let threshold = agent.heap.gc_threshold.max(MIN_GC_THRESHOLD);
    if agent.heap.live_environments() < threshold {
        return;
    }
    heap_gc(agent);
    agent.heap.gc_threshold = agent.heap.live_environments() * 2;
}

/// Frees every environment that no realm, execution context or function
/// object can reach. Freed slots are reused by later allocations.
pub(crate) fn heap_gc(agent: &mut Agent) {
    let mut marks = vec![false; agent.heap.environments.len()];
    let mut queue: Vec<Environment> = agent
        .execution_context_stack
        .iter()
        .map(|context| context.ecmascript_code.lexical_environment)
        .collect();
    queue.extend(agent.heap.realms.iter().map(|realm| realm.global_env));
    queue.extend(
        agent
            .heap
            .objects
            .iter()
            .filter_map(|object| match &object.kind {
                ObjectKind::ECMAScriptFunction(function) => Some(function.environment),
                _ => None,
            }),
    );

    // Mark: follow outer links from every root.
    while let Some(env) = queue.pop() {
        let index = env.0.into_index();
        if marks[index] {
            continue;
        }
        marks[index] = true;
        if let Some(outer) = agent.heap[env].outer_env {
            queue.push(outer);
        }
    }

    // Sweep.
    let Heap {
        environments,
        free_environments,
        ..
    } = &mut agent.heap;
    for (index, (record, marked)) in environments.iter_mut().zip(marks).enumerate() {
        if !marked && record.take().is_some() {
            free_environments.push(DeclarativeEnvironmentIndex::from_index(index));
        }
    }
}

impl Heap<'_> {
    pub(crate) fn live_environments(&self) -> usize {
        self.environments.len() - self.free_environments.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::{AgentOptions, new_declarative_environment};

    #[test]
    fn unreachable_environments_are_reused() {
        let mut agent = Agent::new(AgentOptions::default());
        let root = new_declarative_environment(&mut agent, None);
        let child = new_declarative_environment(&mut agent, Some(root));
        heap_gc(&mut agent);
        assert_eq!(agent.heap.live_environments(), 0);
        let reused = new_declarative_environment(&mut agent, None);
        assert!(reused == root || reused == child);
        assert_eq!(agent.heap.environments.len(), 2);
    }
}
