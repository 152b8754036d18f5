//! Variable scopes for template rendering.
//!
//! The root scope is the caller's data mapping. Each loop iteration layers a
//! single binding on top of its parent; lookups fall through to the parent,
//! so a binding shadows an outer name for its own subtree only and the
//! parent is never modified.

use crate::value::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Most names listed when describing a scope in an error message.
const DESCRIBE_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Root(&'a BTreeMap<String, Value>),
    Binding {
        name: &'a str,
        value: &'a Value,
        parent: &'a Scope<'a>,
    },
}

impl<'a> Scope<'a> {
    pub fn root(data: &'a BTreeMap<String, Value>) -> Self {
        Scope::Root(data)
    }

    /// A child scope with `name` bound to `value`.
    pub fn bind<'b>(&'b self, name: &'b str, value: &'b Value) -> Scope<'b> {
        Scope::Binding {
            name,
            value,
            parent: self,
        }
    }

    /// Look up a name, innermost binding first.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        let mut scope = self;
        loop {
            match *scope {
                Scope::Root(data) => return data.get(key),
                Scope::Binding {
                    name,
                    value,
                    parent,
                } => {
                    if name == key {
                        return Some(value);
                    }
                    scope = parent;
                }
            }
        }
    }

    /// Every name visible from this scope, sorted.
    pub fn names(&self) -> BTreeSet<&'a str> {
        let mut names = BTreeSet::new();
        let mut scope = self;
        loop {
            match *scope {
                Scope::Root(data) => {
                    names.extend(data.keys().map(String::as_str));
                    return names;
                }
                Scope::Binding { name, parent, .. } => {
                    names.insert(name);
                    scope = parent;
                }
            }
        }
    }

    /// Short description for error messages, e.g. `scope {items, user}`.
    pub fn describe(&self) -> String {
        let names = self.names();
        let mut listed: Vec<&str> = names.iter().copied().take(DESCRIBE_LIMIT).collect();
        if names.len() > DESCRIBE_LIMIT {
            listed.push("...");
        }
        format!("scope {{{}}}", listed.join(", "))
    }
}
