//! Completion items and their final ranking.

use std::cmp::Reverse;

use smol_str::SmolStr;

use crate::base::Priority;
use crate::hir::Symbol;

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompletionItem {
    /// The text to insert.
    pub name: SmolStr,
    /// Text shown instead of `name`, if different.
    pub display_name: Option<SmolStr>,
    /// Offset of the item within the typed name; items past the cursor are
    /// dropped.
    pub offset: usize,
    /// Higher is closer to the query origin.
    pub proximity: i32,
    pub priority: Priority,
    /// The symbol the item was produced from.
    pub symbol: Option<Symbol>,
    pub hidden: bool,
}

impl CompletionItem {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            offset: 0,
            proximity: 0,
            priority: Priority::default(),
            symbol: None,
            hidden: false,
        }
    }

    /// An item for one completion variant of `symbol`.
    pub fn from_symbol(symbol: &Symbol, variant: impl Into<SmolStr>) -> Self {
        Self::new(variant)
            .with_priority(symbol.priority().unwrap_or_default())
            .with_proximity(symbol.proximity().unwrap_or(0))
            .with_hidden(symbol.hide_from_completion())
            .with_symbol(symbol.clone())
    }

    pub fn with_display_name(mut self, display_name: impl Into<SmolStr>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_proximity(mut self, proximity: i32) -> Self {
        self.proximity = proximity;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Sort by `(name, display name, offset)` and keep one item per key: the one
/// with the highest priority, then the highest proximity.
pub fn sort_and_dedup(mut items: Vec<CompletionItem>) -> Vec<CompletionItem> {
    items.sort_by(|a, b| {
        (&a.name, &a.display_name, a.offset, Reverse(a.priority), Reverse(a.proximity)).cmp(&(
            &b.name,
            &b.display_name,
            b.offset,
            Reverse(b.priority),
            Reverse(b.proximity),
        ))
    });
    items.dedup_by(|later, kept| {
        later.name == kept.name && later.display_name == kept.display_name && later.offset == kept.offset
    });
    items
}
