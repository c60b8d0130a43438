//! Plugin application ordering.
//!
//! Plugins are returned as an explicit ordered list: dependencies before
//! the plugins that consume them, deferred plugins after every declared one.

use appdesc_core::{ClasspathDependency, PluginPhase, PluginSpec};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::{ConfigError, ConfigResult};

/// Validate plugin declarations and return them in application order.
///
/// Ties are broken by declaration order.
pub fn order_plugins(
    plugins: Vec<PluginSpec>,
    buildscript: &[ClasspathDependency],
) -> ConfigResult<Vec<PluginSpec>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, plugin) in plugins.iter().enumerate() {
        if index.insert(plugin.id.as_str(), i).is_some() {
            return Err(ConfigError::Duplicate(format!("plugin '{}'", plugin.id)));
        }
    }

    for plugin in &plugins {
        if let Some(coordinate) = &plugin.classpath {
            if !buildscript.iter().any(|dep| dep.provides(coordinate)) {
                return Err(ConfigError::UnresolvedReference(format!(
                    "plugin '{}' needs buildscript classpath '{}'",
                    plugin.id, coordinate
                )));
            }
        }
    }

    // deps[i] holds the indices that must be applied before plugin i
    let mut deps: Vec<Vec<usize>> = Vec::with_capacity(plugins.len());
    for plugin in &plugins {
        let mut before = Vec::new();
        for dep in &plugin.after {
            let Some(&j) = index.get(dep.as_str()) else {
                return Err(ConfigError::UnresolvedReference(format!(
                    "plugin '{}' is ordered after unknown plugin '{}'",
                    plugin.id, dep
                )));
            };
            before.push(j);
        }
        if plugin.phase == PluginPhase::Deferred {
            before.extend(
                plugins
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.phase == PluginPhase::Declared)
                    .map(|(j, _)| j),
            );
        }
        before.sort_unstable();
        before.dedup();
        deps.push(before);
    }

    if let Some(cycle) = detect_cycle(&plugins, &deps) {
        return Err(ConfigError::CycleDetected(cycle));
    }

    let order = topological_order(&deps);
    let mut slots: Vec<Option<PluginSpec>> = plugins.into_iter().map(Some).collect();
    let ordered: Vec<PluginSpec> = order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect();

    for (position, plugin) in ordered.iter().enumerate() {
        debug!(position, plugin = %plugin.id, phase = ?plugin.phase, "Plugin ordered");
    }

    Ok(ordered)
}

/// Kahn's algorithm, always picking the lowest ready index.
fn topological_order(deps: &[Vec<usize>]) -> Vec<usize> {
    let mut remaining: Vec<usize> = deps.iter().map(|d| d.len()).collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); deps.len()];
    for (i, before) in deps.iter().enumerate() {
        for &j in before {
            dependents[j].push(i);
        }
    }

    let mut ready: BTreeSet<usize> = remaining
        .iter()
        .enumerate()
        .filter(|(_, n)| **n == 0)
        .map(|(i, _)| i)
        .collect();

    let mut order = Vec::with_capacity(deps.len());
    while let Some(i) = ready.pop_first() {
        order.push(i);
        for &k in &dependents[i] {
            remaining[k] -= 1;
            if remaining[k] == 0 {
                ready.insert(k);
            }
        }
    }
    order
}

/// Detect cycles in the plugin graph using DFS.
fn detect_cycle(plugins: &[PluginSpec], deps: &[Vec<usize>]) -> Option<String> {
    let mut visited = vec![false; plugins.len()];
    let mut on_stack = vec![false; plugins.len()];

    for start in 0..plugins.len() {
        if !visited[start] {
            let cycle = dfs_detect_cycle(start, plugins, deps, &mut visited, &mut on_stack);
            if cycle.is_some() {
                return cycle;
            }
        }
    }
    None
}

fn dfs_detect_cycle(
    node: usize,
    plugins: &[PluginSpec],
    deps: &[Vec<usize>],
    visited: &mut [bool],
    on_stack: &mut [bool],
) -> Option<String> {
    visited[node] = true;
    on_stack[node] = true;

    for &dep in &deps[node] {
        if !visited[dep] {
            if let Some(cycle) = dfs_detect_cycle(dep, plugins, deps, visited, on_stack) {
                return Some(cycle);
            }
        } else if on_stack[dep] {
            return Some(format!("{} -> {}", plugins[node].id, plugins[dep].id));
        }
    }

    on_stack[node] = false;
    None
}
