//! Scope-aware name resolution over a source snapshot.
//!
//! A snapshot is partitioned once into four buckets keyed by name. Explicit
//! scopes (`user:`, `workspace:`, `stack:`) only ever look in their own
//! bucket; the ambient scope (`source:`) walks from the most specific
//! enclosing context outward: stack, workspace, user, then stored ambient
//! sources.

use std::collections::HashMap;

use serde_json::Value;

use super::types::{Scope, Source, SourceContext};
use crate::references::Reference;

/// Anything that can answer a `(scope, name)` lookup.
///
/// Not-found is a normal outcome (`None`), never an error.
pub trait SourceLookup {
    fn lookup(&self, scope: Scope, name: &str) -> Option<&Value>;

    /// The value a parsed reference should render from.
    fn lookup_reference(&self, reference: &Reference) -> Option<&Value> {
        self.lookup(reference.scope, &reference.name)
    }
}

/// Ambient fallback order, most specific first.
const AMBIENT_CHAIN: [Scope; 4] = [Scope::Stack, Scope::Workspace, Scope::User, Scope::Ambient];

/// Name-keyed buckets of source values visible from one context.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    stack: HashMap<String, Value>,
    workspace: HashMap<String, Value>,
    user: HashMap<String, Value>,
    ambient: HashMap<String, Value>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition a snapshot into the buckets visible from `ctx`.
    ///
    /// A scoped source is visible when its qualifying id matches the
    /// context's. A source without a qualifying id has already been narrowed
    /// by whoever fetched it and joins its bucket as-is. The first source
    /// with a given name in a bucket wins.
    pub fn from_snapshot(ctx: &SourceContext, sources: &[Source]) -> Self {
        let mut map = Self::new();
        for source in sources {
            if !is_visible(ctx, source) {
                tracing::trace!(
                    name = %source.name,
                    scope = %source.scope,
                    "source not visible from context"
                );
                continue;
            }
            map.bucket_mut(source.scope)
                .entry(source.name.clone())
                .or_insert_with(|| source.value.clone());
        }
        map
    }

    /// Insert a value into a bucket, replacing any previous value.
    pub fn insert(&mut self, scope: Scope, name: impl Into<String>, value: Value) {
        self.bucket_mut(scope).insert(name.into(), value);
    }

    /// Builder form of [`SourceMap::insert`].
    #[must_use]
    pub fn with(mut self, scope: Scope, name: impl Into<String>, value: Value) -> Self {
        self.insert(scope, name, value);
        self
    }

    /// Resolve `name` at `scope`.
    pub fn resolve(&self, scope: Scope, name: &str) -> Option<&Value> {
        match scope {
            Scope::Ambient => {
                AMBIENT_CHAIN.iter().find_map(|s| self.bucket(*s).get(name))
            }
            other => self.bucket(other).get(name),
        }
    }

    /// Number of sources held in the bucket for `scope`.
    pub fn len(&self, scope: Scope) -> usize {
        self.bucket(scope).len()
    }

    pub fn is_empty(&self) -> bool {
        AMBIENT_CHAIN.iter().all(|s| self.bucket(*s).is_empty())
    }

    fn bucket(&self, scope: Scope) -> &HashMap<String, Value> {
        match scope {
            Scope::Stack => &self.stack,
            Scope::Workspace => &self.workspace,
            Scope::User => &self.user,
            Scope::Ambient => &self.ambient,
        }
    }

    fn bucket_mut(&mut self, scope: Scope) -> &mut HashMap<String, Value> {
        match scope {
            Scope::Stack => &mut self.stack,
            Scope::Workspace => &mut self.workspace,
            Scope::User => &mut self.user,
            Scope::Ambient => &mut self.ambient,
        }
    }
}

impl SourceLookup for SourceMap {
    fn lookup(&self, scope: Scope, name: &str) -> Option<&Value> {
        self.resolve(scope, name)
    }
}

/// A set of ambient values layered on top of another lookup.
///
/// Used by batch expansion to pin one combination: bare `source:NAME`
/// references see the layer first. Explicit bucket references, and
/// references with an index or path, go straight through to the base.
#[derive(Debug)]
pub struct Layered<'a, L: SourceLookup + ?Sized> {
    top: HashMap<String, Value>,
    base: &'a L,
}

impl<'a, L: SourceLookup + ?Sized> Layered<'a, L> {
    pub fn new<I, K>(values: I, base: &'a L) -> Self
    where
        I: IntoIterator<Item = (K, String)>,
        K: Into<String>,
    {
        let top = values.into_iter().map(|(k, v)| (k.into(), Value::String(v))).collect();
        Self { top, base }
    }
}

impl<L: SourceLookup + ?Sized> SourceLookup for Layered<'_, L> {
    fn lookup(&self, scope: Scope, name: &str) -> Option<&Value> {
        if scope == Scope::Ambient
            && let Some(v) = self.top.get(name)
        {
            return Some(v);
        }
        self.base.lookup(scope, name)
    }

    fn lookup_reference(&self, reference: &Reference) -> Option<&Value> {
        if reference.index.is_some() || !reference.path.is_empty() {
            return self.base.lookup_reference(reference);
        }
        self.lookup(reference.scope, &reference.name)
    }
}

/// Resolve a single reference directly against a raw snapshot.
pub fn resolve<'a>(
    ctx: &SourceContext,
    sources: &'a [Source],
    scope: Scope,
    name: &str,
) -> Option<&'a Value> {
    let find = |s: Scope| {
        sources
            .iter()
            .find(|src| src.scope == s && src.name == name && is_visible(ctx, src))
            .map(|src| &src.value)
    };
    match scope {
        Scope::Ambient => AMBIENT_CHAIN.iter().find_map(|s| find(*s)),
        other => find(other),
    }
}

fn is_visible(ctx: &SourceContext, source: &Source) -> bool {
    let (own, wanted) = match source.scope {
        Scope::Ambient => return true,
        Scope::Stack => (&source.stack_id, &ctx.stack_id),
        Scope::Workspace => (&source.workspace_id, &ctx.workspace_id),
        Scope::User => (&source.user_id, &ctx.user_id),
    };
    match (own, wanted) {
        (None, _) => true,
        (Some(a), Some(b)) => a == b,
        (Some(_), None) => false,
    }
}
