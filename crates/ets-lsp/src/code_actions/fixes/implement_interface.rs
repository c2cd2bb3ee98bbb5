//! A class that does not implement every member of an interface it names:
//! add stubs for the missing properties and methods.

use ets_common::diagnostics::diagnostic_codes;
use ets_parser::NodeIndex;
use ets_parser::syntax_kind_ext::{CONSTRUCTOR, METHOD_SIGNATURE, PROPERTY_SIGNATURE, is_class_like};
use ets_scanner::SyntaxKind;
use rustc_hash::FxHashSet;

use super::{FixDescriptor, single_action, touching_node};
use crate::code_actions::{
    CodeFixAction, CodeFixAllContext, CodeFixContext, CodeFixProvider, CodeFixRegistry, CombinedCodeActions,
};
use crate::hierarchy_utils::{get_class_super_classes, get_interface_super_interfaces, resolve_heritage_type};
use crate::project::{Project, ProjectFile};
use crate::resolver::DeclRef;
use crate::text_changes::{ChangeTracker, SynthNode};

const FIX: FixDescriptor = FixDescriptor {
    fix_name: "fixClassIncorrectlyImplementsInterface",
    fix_id: "fixClassIncorrectlyImplementsInterface",
    description: "Implement interface",
    fix_all_description: "Implement all unimplemented interfaces",
};

const ERROR_CODES: &[u32] = &[diagnostic_codes::CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE];

const NOT_IMPLEMENTED: &str = "Method not implemented.";

fn get_class(file: &ProjectFile, pos: u32) -> Option<NodeIndex> {
    let class = file.arena().find_ancestor(touching_node(file, pos), is_class_like);
    class.is_some().then_some(class)
}

/// An interface named in the class's `implements` clause.
struct Implemented {
    /// Source text of the heritage entry, e.g. `Shape<T>`.
    text: String,
    interface: DeclRef,
}

fn implemented_interfaces(project: &Project, file: &ProjectFile, class: NodeIndex) -> Vec<Implemented> {
    let arena = file.arena();
    let Some(clauses) = arena.get_heritage_clauses(class) else {
        return Vec::new();
    };
    clauses
        .iter()
        .filter_map(|clause| arena.get(clause).and_then(|n| arena.get_heritage_clause(n)))
        .filter(|clause| clause.token == SyntaxKind::ImplementsKeyword as u16)
        .flat_map(|clause| clause.types.iter())
        .filter_map(|ty| {
            let interface = resolve_heritage_type(project, file, ty)?;
            Some(Implemented {
                text: arena.get_node_text(ty).to_string(),
                interface,
            })
        })
        .collect()
}

fn member_names(project: &Project, decl: DeclRef) -> Vec<String> {
    let Some(file) = project.file_by_id(decl.file) else {
        return Vec::new();
    };
    let arena = file.arena();
    arena
        .get_members(decl.node)
        .map(|members| {
            members
                .iter()
                .filter_map(|m| arena.get_declaration_name_text(m))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Names the class already has, itself or through its superclasses.
fn class_member_names(project: &Project, class: DeclRef) -> FxHashSet<String> {
    std::iter::once(class)
        .chain(get_class_super_classes(project, class))
        .flat_map(|decl| member_names(project, decl))
        .collect()
}

/// Stub for an interface member, copying its parameter and type text.
fn stub_for(file: &ProjectFile, member: NodeIndex) -> Option<(String, SynthNode)> {
    let arena = file.arena();
    let node = arena.get(member)?;
    let signature = arena.get_signature(node)?;
    let name = arena.get_name_text(signature.name)?.to_string();
    let type_node = SynthNode::reuse(file, signature.type_annotation).map(Box::new);
    let stub = match node.kind {
        PROPERTY_SIGNATURE => SynthNode::PropertyDeclaration {
            modifiers: Vec::new(),
            name: name.clone(),
            question: signature.question_token,
            type_node,
            initializer: None,
        },
        METHOD_SIGNATURE => SynthNode::MethodDeclaration {
            modifiers: Vec::new(),
            name: name.clone(),
            question: signature.question_token,
            parameters: signature
                .parameters
                .iter()
                .flat_map(|params| params.iter())
                .filter_map(|param| SynthNode::reuse(file, param))
                .collect(),
            return_type: type_node,
            body: Some(Box::new(SynthNode::block(vec![SynthNode::throw_error(NOT_IMPLEMENTED)], true))),
        },
        _ => return None,
    };
    Some((name, stub))
}

/// Add stubs for the members of `interface` (and the interfaces it
/// extends) whose names are not in `existing`. Added names join `existing`.
fn add_missing_members<'a>(
    tracker: &mut ChangeTracker<'a>,
    project: &'a Project,
    file: &'a ProjectFile,
    class: NodeIndex,
    interface: DeclRef,
    existing: &mut FxHashSet<String>,
) {
    let mut stubs = Vec::new();
    for iface in std::iter::once(interface).chain(get_interface_super_interfaces(project, interface)) {
        let Some(iface_file) = project.file_by_id(iface.file) else {
            continue;
        };
        let Some(members) = iface_file.arena().get_members(iface.node) else {
            continue;
        };
        for member in members.iter() {
            if let Some((name, stub)) = stub_for(iface_file, member) {
                if existing.insert(name) {
                    stubs.push(stub);
                }
            }
        }
    }

    let constructor = file
        .arena()
        .get_members(class)
        .and_then(|members| members.iter().find(|&m| file.arena().is_kind(m, CONSTRUCTOR)));
    match constructor {
        Some(ctor) => {
            for stub in stubs {
                tracker.insert_node_after(file, ctor, stub);
            }
        }
        None => {
            for stub in stubs {
                tracker.insert_member_at_start(file, class, stub);
            }
        }
    }
}

pub struct ImplementInterface;

impl CodeFixProvider for ImplementInterface {
    fn error_codes(&self) -> &'static [u32] {
        ERROR_CODES
    }

    fn fix_ids(&self) -> &'static [&'static str] {
        &[FIX.fix_id]
    }

    /// One action per interface in the `implements` clause.
    fn get_code_actions(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction> {
        let Some(file) = context.file() else {
            return Vec::new();
        };
        let Some(class) = get_class(file, context.span.start) else {
            return Vec::new();
        };
        let project = context.project;
        let class_ref = DeclRef::new(file.id(), class);
        implemented_interfaces(project, file, class)
            .into_iter()
            .flat_map(|implemented| {
                let mut existing = class_member_names(project, class_ref);
                single_action(
                    context,
                    &FIX,
                    format!("Implement interface '{}'", implemented.text),
                    |tracker| {
                        add_missing_members(tracker, project, file, class, implemented.interface, &mut existing)
                    },
                )
            })
            .collect()
    }

    fn get_all_code_actions(&self, context: &CodeFixAllContext<'_>) -> CombinedCodeActions {
        let project = context.project;
        let mut seen = FxHashSet::default();
        CodeFixRegistry::code_fix_all(context, ERROR_CODES, |tracker, file, diagnostic| {
            let Some(class) = get_class(file, diagnostic.start) else {
                return;
            };
            if !seen.insert(class) {
                return;
            }
            let mut existing = class_member_names(project, DeclRef::new(file.id(), class));
            for implemented in implemented_interfaces(project, file, class) {
                add_missing_members(tracker, project, file, class, implemented.interface, &mut existing);
            }
        })
    }
}
