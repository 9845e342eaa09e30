//! Dependency graph over one batch.
//!
//! Edge `A -> B` means A lists B in its dependencies. Dependency ids that name
//! no task in the batch are inert: they contribute no edge.

use std::collections::{HashMap, HashSet};

use crate::domain::CanonicalTask;

/// Read-only view of the batch keyed by task id.
pub struct DependencyGraph<'a> {
    tasks: &'a [CanonicalTask],
    edges: HashMap<&'a str, &'a [String]>,
}

impl<'a> DependencyGraph<'a> {
    pub fn from_tasks(tasks: &'a [CanonicalTask]) -> Self {
        let mut edges = HashMap::with_capacity(tasks.len());
        for task in tasks {
            edges.entry(task.id.as_str()).or_insert(task.dependencies.as_slice());
        }
        Self { tasks, edges }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    /// Dependencies of `id`, empty when the task is not in the batch.
    pub fn dependencies(&self, id: &str) -> &'a [String] {
        self.edges.get(id).copied().unwrap_or(&[])
    }

    /// Number of other tasks whose dependency list contains `id`.
    pub fn blocker_count(&self, id: &str) -> usize {
        self.tasks.iter().filter(|task| task.id != id && task.depends_on(id)).count()
    }

    /// Returns true if a cycle is reachable from `id`.
    ///
    /// Each call runs a fresh search, so scoring a batch of V tasks with E edges
    /// costs O(V * (V + E)) overall. Use a `CycleDetector` directly to share
    /// resolved nodes across several starting points.
    pub fn has_cycle(&self, id: &str) -> bool {
        CycleDetector::new(self).has_cycle(id)
    }

    fn node(&self, id: &str) -> Option<&'a str> {
        self.edges.get_key_value(id).map(|(key, _)| *key)
    }
}

/// Three-color depth-first cycle search.
///
/// `visiting` holds the nodes on the current exploration path; `visited` holds
/// nodes whose subtree is finished. The search uses an explicit stack, so long
/// dependency chains cannot overflow the call stack.
pub struct CycleDetector<'g, 'a> {
    graph: &'g DependencyGraph<'a>,
    visiting: HashSet<&'a str>,
    visited: HashSet<&'a str>,
}

impl<'g, 'a> CycleDetector<'g, 'a> {
    pub fn new(graph: &'g DependencyGraph<'a>) -> Self {
        Self {
            graph,
            visiting: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    pub fn has_cycle(&mut self, task_id: &str) -> bool {
        // Unknown ids have no dependencies
        let Some(start) = self.graph.node(task_id) else {
            return false;
        };
        if self.visiting.contains(start) {
            return true;
        }
        if self.visited.contains(start) {
            return false;
        }

        // Each frame is (node, index of the next dependency to explore)
        let mut stack: Vec<(&'a str, usize)> = vec![(start, 0)];
        self.visiting.insert(start);

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let deps = self.graph.dependencies(node);

            if next >= deps.len() {
                stack.pop();
                self.finish(node);
                continue;
            }
            frame.1 += 1;

            let Some(dep) = self.graph.node(&deps[next]) else {
                continue;
            };
            if self.visiting.contains(dep) {
                for &(on_path, _) in stack.iter().rev() {
                    self.finish(on_path);
                }
                return true;
            }
            if self.visited.contains(dep) {
                continue;
            }
            self.visiting.insert(dep);
            stack.push((dep, 0));
        }

        false
    }

    /// Returns true if `id` has been fully explored by this detector.
    pub fn is_resolved(&self, id: &str) -> bool {
        self.visited.contains(id)
    }

    fn finish(&mut self, node: &'a str) {
        self.visiting.remove(node);
        self.visited.insert(node);
    }
}
