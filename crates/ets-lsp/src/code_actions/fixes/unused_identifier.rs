//! Delete declarations reported as unused.
//!
//! Handles variable declarators, import bindings, class members and named
//! declarations. Declarators and import bindings are removed from their
//! list; when every entry of a list goes, the whole statement goes with it.

use ets_common::diagnostics::diagnostic_codes;
use ets_common::position::TextRange;
use ets_parser::syntax_kind_ext::*;
use ets_parser::{NodeIndex, NodeList};
use ets_scanner::SyntaxKind;
use indexmap::{IndexMap, IndexSet};

use super::{FixDescriptor, single_action, touching_node};
use crate::code_actions::{
    CodeFixAction, CodeFixAllContext, CodeFixContext, CodeFixProvider, CodeFixRegistry, CombinedCodeActions,
};
use crate::project::ProjectFile;
use crate::text_changes::{ChangeTracker, ConfigurableStartEnd, NodeOrNodes};

const FIX: FixDescriptor = FixDescriptor {
    fix_name: "unusedIdentifier",
    fix_id: "unusedIdentifier_delete",
    description: "Remove unused declaration",
    fix_all_description: "Delete all unused declarations",
};

const ERROR_CODES: &[u32] = &[
    diagnostic_codes::DECLARED_BUT_NEVER_READ,
    diagnostic_codes::DECLARED_BUT_NEVER_USED,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// Default name identifier, namespace import or import specifier.
    ImportBinding { import: NodeIndex, binding: NodeIndex },
    Declarator { list: NodeIndex, declaration: NodeIndex },
    Node(NodeIndex),
}

fn get_info(file: &ProjectFile, pos: u32) -> Option<Target> {
    let arena = file.arena();
    let token = touching_node(file, pos);
    if !arena.is_kind(token, SyntaxKind::Identifier as u16) {
        return None;
    }
    let parent = arena.parent_of(token);
    let parent_kind = arena.kind_of(parent)?;
    let names_parent = arena.get_declaration_name(parent) == token;
    let enclosing_import = || {
        let import = arena.find_ancestor(parent, |k| k == IMPORT_DECLARATION);
        import.is_some().then_some(import)
    };

    match parent_kind {
        IMPORT_SPECIFIER | NAMESPACE_IMPORT if names_parent => Some(Target::ImportBinding {
            import: enclosing_import()?,
            binding: parent,
        }),
        IMPORT_CLAUSE if names_parent => Some(Target::ImportBinding {
            import: enclosing_import()?,
            binding: token,
        }),
        VARIABLE_DECLARATION if names_parent => {
            let list = arena.parent_of(parent);
            arena.is_kind(list, VARIABLE_DECLARATION_LIST).then_some(Target::Declarator {
                list,
                declaration: parent,
            })
        }
        PROPERTY_DECLARATION | METHOD_DECLARATION | GET_ACCESSOR | SET_ACCESSOR if names_parent => {
            let container = arena.parent_of(parent);
            arena
                .kind_of(container)
                .is_some_and(is_class_like)
                .then_some(Target::Node(parent))
        }
        FUNCTION_DECLARATION | CLASS_DECLARATION | STRUCT_DECLARATION | INTERFACE_DECLARATION
        | TYPE_ALIAS_DECLARATION | ENUM_DECLARATION
            if names_parent =>
        {
            Some(Target::Node(parent))
        }
        _ => None,
    }
}

/// Targets of one session, grouped by the list or import they belong to.
#[derive(Default)]
struct Deletions {
    imports: IndexMap<NodeIndex, IndexSet<NodeIndex>>,
    declarators: IndexMap<NodeIndex, IndexSet<NodeIndex>>,
    nodes: IndexSet<NodeIndex>,
}

impl Deletions {
    fn add(&mut self, target: Target) {
        match target {
            Target::ImportBinding { import, binding } => {
                self.imports.entry(import).or_default().insert(binding);
            }
            Target::Declarator { list, declaration } => {
                self.declarators.entry(list).or_default().insert(declaration);
            }
            Target::Node(node) => {
                self.nodes.insert(node);
            }
        }
    }

    fn apply<'a>(&self, tracker: &mut ChangeTracker<'a>, file: &'a ProjectFile) {
        for (&import, unused) in &self.imports {
            delete_import_bindings(tracker, file, import, unused);
        }
        for (&list, unused) in &self.declarators {
            delete_declarators(tracker, file, list, unused);
        }
        for &node in &self.nodes {
            tracker.delete(file, NodeOrNodes::Node(node));
        }
    }
}

fn delete_import_bindings<'a>(
    tracker: &mut ChangeTracker<'a>,
    file: &'a ProjectFile,
    import: NodeIndex,
    unused: &IndexSet<NodeIndex>,
) {
    let arena = file.arena();
    let Some(decl) = arena.get(import).and_then(|n| arena.get_import_decl(n)) else {
        return;
    };
    let Some(clause) = arena.get(decl.import_clause).and_then(|n| arena.get_import_clause(n)) else {
        return;
    };
    let bindings_node = arena.get(clause.named_bindings);
    let named_elements = bindings_node
        .filter(|n| n.kind == NAMED_IMPORTS)
        .and_then(|n| arena.get_named_imports(n))
        .map(|named| &named.elements);

    let mut all = Vec::new();
    if clause.name.is_some() {
        all.push(clause.name);
    }
    if bindings_node.is_some_and(|n| n.kind == NAMESPACE_IMPORT) {
        all.push(clause.named_bindings);
    }
    if let Some(elements) = named_elements {
        all.extend(elements.iter());
    }
    if all.iter().all(|b| unused.contains(b)) {
        tracker.delete(file, NodeOrNodes::Node(import));
        return;
    }

    // Some binding survives from here on.
    let name = arena.get(clause.name);
    if let (Some(name), Some(bindings)) = (name, bindings_node) {
        if unused.contains(&clause.name) {
            tracker.delete_range(file, TextRange::new(name.pos, bindings.pos));
            delete_named_elements(tracker, file, named_elements, unused);
            return;
        }
        let whole_bindings_unused = match named_elements {
            Some(elements) => !elements.is_empty() && elements.iter().all(|e| unused.contains(&e)),
            None => unused.contains(&clause.named_bindings),
        };
        if whole_bindings_unused {
            tracker.delete_range(file, TextRange::new(name.end, bindings.end));
            return;
        }
    }
    delete_named_elements(tracker, file, named_elements, unused);
}

fn delete_named_elements<'a>(
    tracker: &mut ChangeTracker<'a>,
    file: &'a ProjectFile,
    elements: Option<&NodeList>,
    unused: &IndexSet<NodeIndex>,
) {
    if let Some(elements) = elements {
        delete_list_elements(tracker, file, elements, unused);
    }
}

fn delete_declarators<'a>(
    tracker: &mut ChangeTracker<'a>,
    file: &'a ProjectFile,
    list: NodeIndex,
    unused: &IndexSet<NodeIndex>,
) {
    let arena = file.arena();
    let Some(declarations) = arena.get(list).and_then(|n| arena.get_variable(n)).map(|v| &v.declarations) else {
        return;
    };
    if declarations.iter().all(|d| unused.contains(&d)) {
        let statement = arena.parent_of(list);
        let whole = if arena.is_kind(statement, VARIABLE_STATEMENT) { statement } else { list };
        tracker.delete(file, NodeOrNodes::Node(whole));
        return;
    }
    delete_list_elements(tracker, file, declarations, unused);
}

/// Delete the `unused` entries of a separated list that keeps at least one
/// entry. A run of deleted entries takes the separator after it, or the one
/// before it when the run reaches the end of the list.
fn delete_list_elements<'a>(
    tracker: &mut ChangeTracker<'a>,
    file: &'a ProjectFile,
    list: &NodeList,
    unused: &IndexSet<NodeIndex>,
) {
    let elements = &list.nodes;
    let mut i = 0;
    while i < elements.len() {
        if !unused.contains(&elements[i]) {
            i += 1;
            continue;
        }
        let mut last = i;
        while last + 1 < elements.len() && unused.contains(&elements[last + 1]) {
            last += 1;
        }
        if let Some(&next) = elements.get(last + 1) {
            tracker.delete_node_range_excluding_end(
                file,
                elements[i],
                next,
                Some(ConfigurableStartEnd::non_adjusted()),
            );
        } else if i > 0 {
            let arena = file.arena();
            if let (Some(kept), Some(end)) = (arena.get(elements[i - 1]), arena.get(elements[last])) {
                tracker.delete_range(file, TextRange::new(kept.end, end.end));
            }
        }
        i = last + 1;
    }
}

pub struct UnusedIdentifier;

impl CodeFixProvider for UnusedIdentifier {
    fn error_codes(&self) -> &'static [u32] {
        ERROR_CODES
    }

    fn fix_ids(&self) -> &'static [&'static str] {
        &[FIX.fix_id]
    }

    fn get_code_actions(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction> {
        let Some(file) = context.file() else {
            return Vec::new();
        };
        let Some(target) = get_info(file, context.span.start) else {
            return Vec::new();
        };
        let mut deletions = Deletions::default();
        deletions.add(target);
        single_action(context, &FIX, FIX.description, |tracker| deletions.apply(tracker, file))
    }

    /// Targets are collected first so that a list losing all of its entries
    /// is deleted as one statement.
    fn get_all_code_actions(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions {
        let Some(file) = context.file() else {
            return CombinedCodeActions::default();
        };
        let mut deletions = Deletions::default();
        for diagnostic in CodeFixRegistry::matching_diagnostics(context, ERROR_CODES) {
            if let Some(target) = get_info(file, diagnostic.start) {
                deletions.add(target);
            }
        }
        let changes = ChangeTracker::with(&context.text_changes_context(), |tracker| {
            deletions.apply(tracker, file)
        });
        CombinedCodeActions {
            changes,
            commands: Vec::new(),
        }
    }
}
