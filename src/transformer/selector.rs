//! Selector scoping.
//!
//! Each compound is rewritten left to right against a *context*: the
//! resolved inheritance chain of the last class or element seen (the root
//! class at the start of every compound).
//!
//! - `.a` becomes the scoped names of its chain, `.entry--a.base--root`
//! - `Comp` (an imported element) becomes the scoped root of its stylesheet
//! - `::part` continues into a descendant chunk scoped by the stylesheet
//!   that defines `part`, first match along the chain
//! - `:state` compiles through the first chain entry declaring it
//! - `:global(...)` is emitted verbatim and collected

use std::rc::Rc;

use crate::base::Span;
use crate::base::constants::{GLOBAL_PSEUDO, SELECTOR_ARGUMENT_PSEUDO_CLASSES, is_native_pseudo_class, is_native_pseudo_element};
use crate::diagnostics::messages;
use crate::processor::{Meta, StateDef, Symbol};
use crate::resolver::CssResolve;
use crate::selector::{Combinator, Compound, Selector, SimpleSelector, parse_selector_list, stringify_selector_list};

use super::context::{Scope, TransformContext};

/// Nesting limit for custom selectors referencing each other.
const MAX_CUSTOM_SELECTOR_DEPTH: usize = 16;

/// Resolution context of the compound being rewritten.
struct ChunkContext {
    meta: Rc<Meta>,
    chain: Vec<CssResolve>,
}

enum PseudoElementTarget {
    Class(Rc<Meta>, Vec<CssResolve>),
    Custom(Rc<Meta>, String),
}

impl TransformContext<'_> {
    /// Scope a selector list written in `scope`.
    pub fn scope_selector(&mut self, scope: &Scope, text: &str, span: Option<Span>) -> String {
        let mut scoped = Vec::new();
        for selector in parse_selector_list(text) {
            for expanded in expand_custom_selectors(&scope.meta, &selector, 0) {
                scoped.push(self.scope_complex(scope, &expanded, span));
            }
        }
        stringify_selector_list(&scoped)
    }

    fn scope_complex(&mut self, scope: &Scope, selector: &Selector, span: Option<Span>) -> Selector {
        let root = scope.meta.root.clone();
        let root_chain = self
            .resolver
            .resolve_extends(&scope.meta, &root, false, &mut self.diagnostics);

        let mut chunks = Vec::new();
        for compound in &selector.chunks {
            let mut context = ChunkContext {
                meta: scope.meta.clone(),
                chain: root_chain.clone(),
            };
            let mut current = Compound::new(compound.combinator, Vec::new());
            for node in &compound.nodes {
                match node {
                    SimpleSelector::Class(name) => {
                        let chain =
                            self.resolver
                                .resolve_extends(&context.meta, name, false, &mut self.diagnostics);
                        let nodes = self.chain_selectors(&chain);
                        if nodes.is_empty() {
                            current.nodes.push(SimpleSelector::raw(format!(".{}", context.meta.scoped(name))));
                        } else {
                            current.nodes.extend(nodes);
                        }
                        context.chain = chain;
                    }
                    SimpleSelector::Type(name) if context.meta.element(name).is_some() => {
                        let chain = self
                            .resolver
                            .resolve_extends(&context.meta, name, true, &mut self.diagnostics);
                        let nodes = self.chain_selectors(&chain);
                        if nodes.is_empty() {
                            current.nodes.push(node.clone());
                        } else {
                            current.nodes.extend(nodes);
                        }
                        context.chain = chain;
                    }
                    SimpleSelector::Type(_) => {
                        current.nodes.push(node.clone());
                        context.chain = Vec::new();
                    }
                    SimpleSelector::Nesting => {
                        current.nodes.push(node.clone());
                        if let Some(class) = &scope.nesting {
                            context.chain = self.resolver.resolve_extends(
                                &scope.meta,
                                class,
                                false,
                                &mut self.diagnostics,
                            );
                        }
                    }
                    SimpleSelector::PseudoElement { name, .. } if is_native_pseudo_element(name) => {
                        current.nodes.push(node.clone());
                    }
                    SimpleSelector::PseudoElement { name, .. } => {
                        match self.find_pseudo_element(&context.chain, name) {
                            Some(PseudoElementTarget::Class(meta, chain)) => {
                                chunks.push(std::mem::take(&mut current));
                                current.combinator = Some(Combinator::Descendant);
                                current.nodes = self.chain_selectors(&chain);
                                context = ChunkContext { meta, chain };
                            }
                            Some(PseudoElementTarget::Custom(meta, custom)) => {
                                let inner = self.scope_selector(&Scope::new(meta.clone()), &custom, span);
                                let text = if parse_selector_list(&inner).len() > 1 {
                                    format!(":is({inner})")
                                } else {
                                    inner
                                };
                                chunks.push(std::mem::take(&mut current));
                                current.combinator = Some(Combinator::Descendant);
                                current.nodes = vec![SimpleSelector::raw(text)];
                                context = ChunkContext {
                                    meta,
                                    chain: Vec::new(),
                                };
                            }
                            None => {
                                self.warn_word(scope, span, messages::unknown_pseudo_element(name), name);
                                current.nodes.push(node.clone());
                            }
                        }
                    }
                    SimpleSelector::PseudoClass { name, argument } if name == GLOBAL_PSEUDO => {
                        let global = argument.as_deref().unwrap_or_default().trim().to_string();
                        self.globals.insert(global.clone());
                        current.nodes.push(SimpleSelector::raw(global));
                    }
                    SimpleSelector::PseudoClass { name, argument } => {
                        if let Some((owner, definition)) = find_state(&context.chain, name) {
                            let text =
                                self.state_selector(scope, &owner, name, &definition, argument.as_deref(), span);
                            current.nodes.push(SimpleSelector::raw(text));
                        } else if is_native_pseudo_class(name) {
                            match argument {
                                Some(argument) if SELECTOR_ARGUMENT_PSEUDO_CLASSES.contains(&name.as_str()) => {
                                    let inner_scope = if Rc::ptr_eq(&context.meta, &scope.meta) {
                                        scope.clone()
                                    } else {
                                        Scope::new(context.meta.clone())
                                    };
                                    let inner = self.scope_selector(&inner_scope, argument, span);
                                    current.nodes.push(SimpleSelector::PseudoClass {
                                        name: name.clone(),
                                        argument: Some(inner),
                                    });
                                }
                                _ => current.nodes.push(node.clone()),
                            }
                        } else {
                            if !name.starts_with("--") {
                                self.warn_word(scope, span, messages::unknown_state_usage(name), name);
                            }
                            current.nodes.push(node.clone());
                        }
                    }
                    _ => current.nodes.push(node.clone()),
                }
            }
            chunks.push(current);
        }
        Selector::new(chunks)
    }

    /// Selector nodes for a resolved chain: each non-alias entry's scoped
    /// class, stopping at the first `-st-global`.
    fn chain_selectors(&mut self, chain: &[CssResolve]) -> Vec<SimpleSelector> {
        let mut nodes = Vec::new();
        for entry in chain.iter().filter(|entry| !entry.is_alias()) {
            match &entry.symbol {
                Symbol::Class(class) => {
                    if let Some(global) = &class.global {
                        self.globals.insert(global.clone());
                        nodes.push(SimpleSelector::raw(global.clone()));
                        break;
                    }
                    nodes.push(SimpleSelector::raw(format!(".{}", entry.scoped_name())));
                }
                Symbol::Element(element) => nodes.push(SimpleSelector::Type(element.name.to_string())),
                _ => {}
            }
        }
        nodes
    }

    fn find_pseudo_element(&mut self, chain: &[CssResolve], name: &str) -> Option<PseudoElementTarget> {
        for entry in chain.iter().filter(|entry| !entry.is_alias()) {
            if entry.meta.class(name).is_some() {
                let resolved = self
                    .resolver
                    .resolve_extends(&entry.meta, name, false, &mut self.diagnostics);
                return Some(PseudoElementTarget::Class(entry.meta.clone(), resolved));
            }
            if let Some(custom) = entry.meta.custom_selectors.get(name) {
                return Some(PseudoElementTarget::Custom(entry.meta.clone(), custom.clone()));
            }
        }
        None
    }
}

/// First chain entry declaring `name` as a state, with its definition.
fn find_state(chain: &[CssResolve], name: &str) -> Option<(Rc<Meta>, StateDef)> {
    chain
        .iter()
        .filter(|entry| !entry.is_alias())
        .find_map(|entry| match &entry.symbol {
            Symbol::Class(class) => class
                .states
                .as_ref()
                .and_then(|states| states.get(name))
                .map(|definition| (entry.meta.clone(), definition.clone())),
            _ => None,
        })
}

/// Replace `:--name` custom selectors of `meta` with their definitions. A
/// definition with several selectors multiplies the selector.
pub(super) fn expand_custom_selectors(meta: &Meta, selector: &Selector, depth: usize) -> Vec<Selector> {
    if depth > MAX_CUSTOM_SELECTOR_DEPTH {
        return vec![selector.clone()];
    }
    for (chunk_index, chunk) in selector.chunks.iter().enumerate() {
        for (node_index, node) in chunk.nodes.iter().enumerate() {
            let SimpleSelector::PseudoClass { name, argument: None } = node else {
                continue;
            };
            let Some(custom) = name
                .strip_prefix("--")
                .and_then(|name| meta.custom_selectors.get(name))
            else {
                continue;
            };

            let mut expanded = Vec::new();
            for replacement in parse_selector_list(custom) {
                let mut inserted = replacement.chunks;
                let Some(first) = inserted.first_mut() else {
                    continue;
                };
                let mut head = chunk.nodes[..node_index].to_vec();
                head.append(&mut first.nodes);
                first.nodes = head;
                first.combinator = chunk.combinator;
                if let Some(last) = inserted.last_mut() {
                    last.nodes.extend(chunk.nodes[node_index + 1..].iter().cloned());
                }

                let mut chunks = selector.chunks[..chunk_index].to_vec();
                chunks.extend(inserted);
                chunks.extend(selector.chunks[chunk_index + 1..].iter().cloned());
                expanded.extend(expand_custom_selectors(meta, &Selector::new(chunks), depth + 1));
            }
            return expanded;
        }
    }
    vec![selector.clone()]
}
