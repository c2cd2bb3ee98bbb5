//! The change tracker: a session that records edits and turns them into
//! per-file text changes.
//!
//! Every operation only appends to the session's lists; the parse tree is
//! never touched. Operations on nodes that are missing from the file (or of
//! a kind the operation does not handle) record nothing.

use ets_common::comments::{
    get_leading_comment_ranges, has_comments_before_line_break, is_line_break, shebang_end,
    skip_trivia, skip_whitespaces_and_line_breaks,
};
use ets_common::position::TextRange;
use ets_parser::syntax::{TokenInfo, get_containing_list, scan_token_at};
use ets_parser::syntax_kind_ext::*;
use ets_parser::{NodeIndex, NodeList};
use ets_scanner::{SyntaxKind, token_to_string};
use indexmap::IndexMap;
use tracing::trace;

use super::factory::SynthNode;
use super::finalize;
use super::insert_options::{need_semicolon_between, options_for_insert_after, options_for_insert_before};
use super::printer::{NodePrinter, TextPrinter};
use super::trivia::{NodeSpan, adjusted_end, adjusted_range, adjusted_start, line_indentation};
use super::types::{
    Change, ChangeNodeOptions, ClassInsertInfo, ConfigurableStartEnd, ContainerKey, DeletedNode,
    FileTextChanges, InsertNodeOptions, LeadingTriviaOption, NewFile, NodeOrNodes,
    ReplaceWithMultipleNodesOptions,
};
use crate::config::{FormatCodeSettings, UserPreferences};
use crate::project::ProjectFile;

/// Settings shared by every edit of one session.
#[derive(Clone, Copy)]
pub struct TextChangesContext<'a> {
    pub format_settings: &'a FormatCodeSettings,
    pub preferences: &'a UserPreferences,
    pub printer: &'a dyn NodePrinter,
}

impl<'a> TextChangesContext<'a> {
    pub fn new(format_settings: &'a FormatCodeSettings, preferences: &'a UserPreferences) -> Self {
        Self {
            format_settings,
            preferences,
            printer: &TextPrinter,
        }
    }

    pub fn with_printer(mut self, printer: &'a dyn NodePrinter) -> Self {
        self.printer = printer;
        self
    }
}

/// Range options used by `delete_node` and friends when none are given.
const DELETE_DEFAULT: ConfigurableStartEnd = ConfigurableStartEnd::leading(LeadingTriviaOption::IncludeAll);

pub struct ChangeTracker<'a> {
    changes: Vec<Change<'a>>,
    deleted_nodes: Vec<DeletedNode<'a>>,
    new_files: Vec<NewFile<'a>>,
    classes_with_nodes_inserted_at_start: IndexMap<ContainerKey, ClassInsertInfo<'a>>,
    format_settings: &'a FormatCodeSettings,
    preferences: &'a UserPreferences,
    printer: &'a dyn NodePrinter,
    new_line: String,
}

impl<'a> ChangeTracker<'a> {
    /// Run one edit session: create a tracker, hand it to `edit`, and
    /// finalize whatever was recorded.
    pub fn with<F>(context: &TextChangesContext<'a>, edit: F) -> Vec<FileTextChanges>
    where
        F: FnOnce(&mut ChangeTracker<'a>),
    {
        let mut tracker = ChangeTracker::from_context(context);
        edit(&mut tracker);
        tracker.get_changes()
    }

    fn from_context(context: &TextChangesContext<'a>) -> Self {
        Self {
            changes: Vec::new(),
            deleted_nodes: Vec::new(),
            new_files: Vec::new(),
            classes_with_nodes_inserted_at_start: IndexMap::new(),
            format_settings: context.format_settings,
            preferences: context.preferences,
            printer: context.printer,
            new_line: context.format_settings.new_line_character.clone(),
        }
    }

    /// Edits recorded so far, in call order.
    pub fn change_list(&self) -> &[Change<'a>] {
        &self.changes
    }

    pub fn new_line(&self) -> &str {
        &self.new_line
    }

    fn push(&mut self, change: Change<'a>) {
        let range = change.range();
        trace!(
            file = change.file().file_name(),
            pos = range.pos,
            end = range.end,
            kind = change.kind_name(),
            "record change"
        );
        self.changes.push(change);
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    pub fn delete_range(&mut self, file: &'a ProjectFile, range: TextRange) {
        self.push(Change::RemoveNode { file, range });
    }

    /// Delete a node, by default with the trivia that shares its line.
    pub fn delete_node(&mut self, file: &'a ProjectFile, node: NodeIndex, options: Option<ConfigurableStartEnd>) {
        let Some(span) = NodeSpan::of(file, node) else {
            return;
        };
        let range = adjusted_range(file, span, span, options.unwrap_or(DELETE_DEFAULT));
        self.delete_range(file, range);
    }

    pub fn delete_node_range(
        &mut self,
        file: &'a ProjectFile,
        start_node: NodeIndex,
        end_node: NodeIndex,
        options: Option<ConfigurableStartEnd>,
    ) {
        let (Some(start), Some(end)) = (NodeSpan::of(file, start_node), NodeSpan::of(file, end_node)) else {
            return;
        };
        let options = options.unwrap_or(DELETE_DEFAULT);
        let pos = adjusted_start(file, start, options, false);
        let end = adjusted_end(file, end, options).max(pos);
        self.delete_range(file, TextRange::new(pos, end));
    }

    /// Delete from `start_node` up to the adjusted start of `after_end_node`,
    /// or to the end of the file when `after_end_node` is `NodeIndex::NONE`.
    pub fn delete_node_range_excluding_end(
        &mut self,
        file: &'a ProjectFile,
        start_node: NodeIndex,
        after_end_node: NodeIndex,
        options: Option<ConfigurableStartEnd>,
    ) {
        let Some(start) = NodeSpan::of(file, start_node) else {
            return;
        };
        let options = options.unwrap_or(DELETE_DEFAULT);
        let pos = adjusted_start(file, start, options, false);
        let end = if after_end_node.is_none() {
            file.source_text().len() as u32
        } else {
            match NodeSpan::of(file, after_end_node) {
                Some(after) => adjusted_start(file, after, options, false),
                None => return,
            }
        };
        self.delete_range(file, TextRange::new(pos, end.max(pos)));
    }

    /// Delete a modifier keyword and the whitespace after it.
    pub fn delete_modifier(&mut self, file: &'a ProjectFile, modifier: NodeIndex) {
        let Some(span) = NodeSpan::of(file, modifier) else {
            return;
        };
        let end = skip_trivia(file.source_text(), span.end, true, false);
        self.delete_range(file, TextRange::new(span.start, end));
    }

    /// Queue a deletion by node identity, resolved when the session ends.
    pub fn delete(&mut self, file: &'a ProjectFile, node: NodeOrNodes) {
        let present = match &node {
            NodeOrNodes::Node(idx) => file.contains(*idx),
            NodeOrNodes::List(nodes) => !nodes.is_empty() && nodes.iter().all(|&n| file.contains(n)),
        };
        if present {
            self.deleted_nodes.push(DeletedNode { file, node });
        }
    }

    // =========================================================================
    // Replacement
    // =========================================================================

    pub fn replace_range(&mut self, file: &'a ProjectFile, range: TextRange, node: SynthNode, options: InsertNodeOptions) {
        self.push(Change::ReplaceWithSingleNode {
            file,
            range,
            node,
            options,
        });
    }

    pub fn replace_node(&mut self, file: &'a ProjectFile, old_node: NodeIndex, new_node: SynthNode, options: ChangeNodeOptions) {
        self.replace_node_range(file, old_node, old_node, new_node, options);
    }

    pub fn replace_node_range(
        &mut self,
        file: &'a ProjectFile,
        start_node: NodeIndex,
        end_node: NodeIndex,
        new_node: SynthNode,
        options: ChangeNodeOptions,
    ) {
        let (Some(start), Some(end)) = (NodeSpan::of(file, start_node), NodeSpan::of(file, end_node)) else {
            return;
        };
        let range = adjusted_range(file, start, end, options.range);
        self.replace_range(file, range, new_node, options.insert);
    }

    pub fn replace_range_with_nodes(
        &mut self,
        file: &'a ProjectFile,
        range: TextRange,
        nodes: Vec<SynthNode>,
        options: ReplaceWithMultipleNodesOptions,
    ) {
        if nodes.is_empty() {
            return;
        }
        self.push(Change::ReplaceWithMultipleNodes {
            file,
            range,
            nodes,
            options,
        });
    }

    pub fn replace_node_with_nodes(
        &mut self,
        file: &'a ProjectFile,
        old_node: NodeIndex,
        nodes: Vec<SynthNode>,
        options: ChangeNodeOptions,
    ) {
        self.replace_node_range_with_nodes(file, old_node, old_node, nodes, options);
    }

    pub fn replace_node_range_with_nodes(
        &mut self,
        file: &'a ProjectFile,
        start_node: NodeIndex,
        end_node: NodeIndex,
        nodes: Vec<SynthNode>,
        options: ChangeNodeOptions,
    ) {
        let (Some(start), Some(end)) = (NodeSpan::of(file, start_node), NodeSpan::of(file, end_node)) else {
            return;
        };
        let range = adjusted_range(file, start, end, options.range);
        self.replace_range_with_nodes(
            file,
            range,
            nodes,
            ReplaceWithMultipleNodesOptions {
                insert: options.insert,
                joiner: None,
            },
        );
    }

    pub fn replace_node_with_text(&mut self, file: &'a ProjectFile, old_node: NodeIndex, text: impl Into<String>) {
        let Some(span) = NodeSpan::of(file, old_node) else {
            return;
        };
        let range = adjusted_range(file, span, span, ConfigurableStartEnd::non_adjusted());
        self.replace_range_with_text(file, range, text);
    }

    pub fn replace_range_with_text(&mut self, file: &'a ProjectFile, range: TextRange, text: impl Into<String>) {
        self.push(Change::Text {
            file,
            range,
            text: text.into(),
        });
    }

    /// Replace an object literal property, adding a separator after it
    /// unless a comma already follows.
    pub fn replace_property_assignment(&mut self, file: &'a ProjectFile, old_node: NodeIndex, new_node: SynthNode) {
        let suffix = if self.next_comma_token(file, old_node).is_some() {
            String::new()
        } else {
            format!(",{}", self.new_line)
        };
        let options = ChangeNodeOptions {
            range: ConfigurableStartEnd::default(),
            insert: InsertNodeOptions::suffix(suffix),
        };
        self.replace_node(file, old_node, new_node, options);
    }

    /// Replace a constructor's body with a multi-line block of `statements`.
    pub fn replace_constructor_body(&mut self, file: &'a ProjectFile, ctor: NodeIndex, statements: Vec<SynthNode>) {
        let arena = file.arena();
        let Some(body) = arena.get(ctor).and_then(|n| arena.get_constructor(n)).map(|c| c.body) else {
            return;
        };
        if body.is_none() {
            return;
        }
        self.replace_node(file, body, SynthNode::block(statements, true), ChangeNodeOptions::default());
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    pub fn insert_node_at(&mut self, file: &'a ProjectFile, pos: u32, node: SynthNode, options: InsertNodeOptions) {
        self.replace_range(file, TextRange::empty(pos), node, options);
    }

    pub fn insert_nodes_at(
        &mut self,
        file: &'a ProjectFile,
        pos: u32,
        nodes: Vec<SynthNode>,
        options: ReplaceWithMultipleNodesOptions,
    ) {
        self.replace_range_with_nodes(file, TextRange::empty(pos), nodes, options);
    }

    pub fn insert_text(&mut self, file: &'a ProjectFile, pos: u32, text: impl Into<String>) {
        self.replace_range_with_text(file, TextRange::empty(pos), text);
    }

    pub fn insert_modifier_at(&mut self, file: &'a ProjectFile, pos: u32, modifier: SyntaxKind, options: InsertNodeOptions) {
        self.insert_node_at(file, pos, SynthNode::token(modifier), options);
    }

    /// Insert `modifier ` in front of `before`.
    pub fn insert_modifier_before(&mut self, file: &'a ProjectFile, modifier: SyntaxKind, before: NodeIndex) {
        let Some(span) = NodeSpan::of(file, before) else {
            return;
        };
        self.insert_modifier_at(file, span.start, modifier, InsertNodeOptions::suffix(" "));
    }

    pub fn insert_node_before(
        &mut self,
        file: &'a ProjectFile,
        before: NodeIndex,
        new_node: SynthNode,
        blank_line_between: bool,
        options: ConfigurableStartEnd,
    ) {
        let Some(span) = NodeSpan::of(file, before) else {
            return;
        };
        let pos = adjusted_start(file, span, options, false);
        let insert_options =
            options_for_insert_before(file.arena(), before, new_node.kind(), blank_line_between, &self.new_line);
        self.insert_node_at(file, pos, new_node, insert_options);
    }

    pub fn insert_node_after(&mut self, file: &'a ProjectFile, after: NodeIndex, new_node: SynthNode) {
        let Some(end) = self.insert_node_after_worker(file, after, new_node.kind()) else {
            return;
        };
        let options = options_for_insert_after(file, after, &self.new_line);
        self.insert_node_at(file, end, new_node, options);
    }

    pub fn insert_nodes_after(&mut self, file: &'a ProjectFile, after: NodeIndex, new_nodes: Vec<SynthNode>) {
        let Some(first_kind) = new_nodes.first().map(SynthNode::kind) else {
            return;
        };
        let Some(end) = self.insert_node_after_worker(file, after, first_kind) else {
            return;
        };
        let options = ReplaceWithMultipleNodesOptions {
            insert: options_for_insert_after(file, after, &self.new_line),
            joiner: None,
        };
        self.insert_nodes_at(file, end, new_nodes, options);
    }

    /// Insert after the comma that follows `after`, or after `after` itself
    /// when no comma follows.
    pub fn insert_node_after_comma(&mut self, file: &'a ProjectFile, after: NodeIndex, new_node: SynthNode) {
        let Some(span) = NodeSpan::of(file, after) else {
            return;
        };
        let end = match self.next_comma_token(file, after) {
            Some(comma) => {
                let comma_span = NodeSpan {
                    full_start: span.end,
                    start: comma.pos,
                    end: comma.end,
                };
                adjusted_end(file, comma_span, ConfigurableStartEnd::default())
            }
            None => match self.insert_node_after_worker(file, after, new_node.kind()) {
                Some(end) => end,
                None => return,
            },
        };
        let options = options_for_insert_after(file, after, &self.new_line);
        self.insert_node_at(file, end, new_node, options);
    }

    /// Adds a `;` after `after` when the new node could otherwise merge with
    /// it, and returns the insertion offset.
    fn insert_node_after_worker(&mut self, file: &'a ProjectFile, after: NodeIndex, new_kind: u16) -> Option<u32> {
        let span = NodeSpan::of(file, after)?;
        let after_kind = file.arena().kind_of(after)?;
        if need_semicolon_between(after_kind, new_kind) {
            let ends_with_semicolon = span.end > 0
                && file.source_text().as_bytes().get(span.end as usize - 1) == Some(&b';');
            if !ends_with_semicolon {
                self.replace_range(
                    file,
                    TextRange::empty(span.end),
                    SynthNode::token(SyntaxKind::SemicolonToken),
                    InsertNodeOptions::default(),
                );
            }
        }
        Some(adjusted_end(file, span, ConfigurableStartEnd::default()))
    }

    pub fn insert_node_at_end_of_list(&mut self, file: &'a ProjectFile, list: &NodeList, new_node: SynthNode) {
        self.insert_node_at(file, list.end, new_node, InsertNodeOptions::prefix(", "));
    }

    /// Insert before the closing brace of a block-like scope.
    pub fn insert_node_at_end_of_scope(&mut self, file: &'a ProjectFile, scope: NodeIndex, new_node: SynthNode) {
        let Some(span) = NodeSpan::of(file, scope) else {
            return;
        };
        let text = file.source_text().as_bytes();
        if span.end == 0 || text.get(span.end as usize - 1) != Some(&b'}') {
            return;
        }
        let Some(open_brace_end) = open_brace_end(file, scope) else {
            return;
        };
        let close_brace = span.end - 1;
        let last_child_end = file
            .arena()
            .get_children(scope)
            .into_iter()
            .filter_map(|child| file.arena().get(child).map(|n| n.end))
            .filter(|&end| end <= close_brace)
            .max()
            .unwrap_or(0);
        let brace = NodeSpan {
            full_start: last_child_end.max(open_brace_end),
            start: close_brace,
            end: span.end,
        };
        let pos = adjusted_start(file, brace, ConfigurableStartEnd::default(), false);
        let prefix = if text.get(brace.full_start as usize).is_some_and(|&b| is_line_break(b)) {
            self.new_line.clone()
        } else {
            format!("{0}{0}", self.new_line)
        };
        let options = InsertNodeOptions::with_prefix_and_suffix(prefix, self.new_line.clone());
        self.insert_node_at(file, pos, new_node, options);
    }

    pub fn insert_node_at_top_of_file(&mut self, file: &'a ProjectFile, new_node: SynthNode, blank_line_between: bool) {
        self.insert_at_top_of_file(file, vec![new_node], blank_line_between);
    }

    pub fn insert_nodes_at_top_of_file(
        &mut self,
        file: &'a ProjectFile,
        new_nodes: Vec<SynthNode>,
        blank_line_between: bool,
    ) {
        self.insert_at_top_of_file(file, new_nodes, blank_line_between);
    }

    fn insert_at_top_of_file(&mut self, file: &'a ProjectFile, mut nodes: Vec<SynthNode>, blank_line_between: bool) {
        if nodes.is_empty() {
            return;
        }
        let pos = insertion_position_at_file_top(file);
        let next_is_line_break = file
            .source_text()
            .as_bytes()
            .get(pos as usize)
            .is_some_and(|&b| is_line_break(b));
        let prefix = if pos == 0 {
            String::new()
        } else {
            self.new_line.clone()
        };
        let mut suffix = if next_is_line_break {
            String::new()
        } else {
            self.new_line.clone()
        };
        if blank_line_between {
            suffix.push_str(&self.new_line);
        }
        let options = InsertNodeOptions::with_prefix_and_suffix(prefix, suffix);
        if nodes.len() == 1 {
            let node = nodes.remove(0);
            self.insert_node_at(file, pos, node, options);
        } else {
            let options = ReplaceWithMultipleNodesOptions {
                insert: options,
                joiner: None,
            };
            self.insert_nodes_at(file, pos, nodes, options);
        }
    }

    pub fn insert_node_at_constructor_start(&mut self, file: &'a ProjectFile, ctor: NodeIndex, statement: SynthNode) {
        let Some((statements, multi_line)) = constructor_statements(file, ctor) else {
            return;
        };
        match statements.first() {
            Some(first) if multi_line => {
                self.insert_node_before(file, first, statement, false, ConfigurableStartEnd::default());
            }
            _ => {
                let mut body = vec![statement];
                body.extend(statements.iter().filter_map(|s| SynthNode::reuse(file, s)));
                self.replace_constructor_body(file, ctor, body);
            }
        }
    }

    pub fn insert_node_at_constructor_end(&mut self, file: &'a ProjectFile, ctor: NodeIndex, statement: SynthNode) {
        let Some((statements, multi_line)) = constructor_statements(file, ctor) else {
            return;
        };
        match statements.last() {
            Some(last) if multi_line => self.insert_node_after(file, last, statement),
            _ => {
                let mut body: Vec<SynthNode> = statements.iter().filter_map(|s| SynthNode::reuse(file, s)).collect();
                body.push(statement);
                self.replace_constructor_body(file, ctor, body);
            }
        }
    }

    pub fn insert_export_modifier(&mut self, file: &'a ProjectFile, node: NodeIndex) {
        let Some(span) = NodeSpan::of(file, node) else {
            return;
        };
        self.insert_text(file, span.start, "export ");
    }

    /// Insert `<T, U>` in front of a signature's parameter list.
    pub fn insert_type_parameters(&mut self, file: &'a ProjectFile, node: NodeIndex, type_parameters: Vec<SynthNode>) {
        let arena = file.arena();
        let Some(span) = NodeSpan::of(file, node) else {
            return;
        };
        let Some(parameters) = signature_parameters(file, node) else {
            return;
        };
        let name = arena.get_declaration_name(node);
        let scan_from = arena.get(name).map_or(span.start, |n| n.end);
        let scan_limit = parameters.first().and_then(|p| arena.get(p)).map_or(span.end, |p| p.pos);
        let open_paren = find_token(file, scan_from, scan_limit, SyntaxKind::OpenParenToken).map(|t| t.pos);
        let first_parameter = parameters.first().and_then(|p| arena.get(p)).map(|p| p.pos);
        let Some(start) = open_paren.or(first_parameter) else {
            return;
        };
        let options = ReplaceWithMultipleNodesOptions {
            insert: InsertNodeOptions::with_prefix_and_suffix("<", ">"),
            joiner: Some(", ".to_string()),
        };
        self.insert_nodes_at(file, start, type_parameters, options);
    }

    pub fn insert_first_parameter(&mut self, file: &'a ProjectFile, parameters: &NodeList, parameter: SynthNode) {
        match parameters.first() {
            Some(first) => self.insert_node_before(file, first, parameter, false, ConfigurableStartEnd::default()),
            None => self.insert_node_at(file, parameters.pos, parameter, InsertNodeOptions::default()),
        }
    }

    pub fn insert_import_specifier_at_index(
        &mut self,
        file: &'a ProjectFile,
        specifier: SynthNode,
        named_imports: NodeIndex,
        index: usize,
    ) {
        let arena = file.arena();
        let Some(named) = arena.get(named_imports).and_then(|n| arena.get_named_imports(n)) else {
            return;
        };
        if let Some(&previous) = index.checked_sub(1).and_then(|i| named.elements.nodes.get(i)) {
            self.insert_node_in_list_after(file, previous, specifier);
            return;
        }
        let Some(first) = named.elements.first() else {
            return;
        };
        let import_decl = arena.parent_of(arena.parent_of(named_imports));
        let (Some(first_node), Some(decl_node)) = (arena.get(first), arena.get(import_decl)) else {
            return;
        };
        let blank_line_between = !file.line_map().on_same_line(first_node.pos, decl_node.pos);
        self.insert_node_before(file, first, specifier, blank_line_between, ConfigurableStartEnd::default());
    }

    /// Add a member to a class, struct, interface or type literal.
    pub fn insert_member_at_start(&mut self, file: &'a ProjectFile, container: NodeIndex, member: SynthNode) {
        self.insert_node_at_start_worker(file, container, member);
    }

    /// Add a property to an object literal.
    pub fn insert_node_at_object_start(&mut self, file: &'a ProjectFile, object: NodeIndex, property: SynthNode) {
        self.insert_node_at_start_worker(file, object, property);
    }

    /// Append `element` after the container's last member, or right after
    /// its `{` when it has none.
    pub fn insert_node_at_start_worker(&mut self, file: &'a ProjectFile, container: NodeIndex, element: SynthNode) {
        let arena = file.arena();
        let Some(container_kind) = arena.kind_of(container) else {
            return;
        };
        let is_container = matches!(
            container_kind,
            CLASS_DECLARATION | STRUCT_DECLARATION | INTERFACE_DECLARATION | TYPE_LITERAL | OBJECT_LITERAL_EXPRESSION
        );
        if !is_container || !is_member_kind(element.kind()) {
            return;
        }
        let Some(members) = arena.get_members(container) else {
            return;
        };
        let Some(container_span) = NodeSpan::of(file, container) else {
            return;
        };
        let Some(brace_end) = open_brace_end(file, container) else {
            return;
        };

        let indentation = self
            .guess_indentation_from_existing_members(file, container_span.start, members)
            .unwrap_or_else(|| {
                line_indentation(file, container_span.start, self.format_settings.tab_size)
                    + self.format_settings.indent_size
            });

        let key = ContainerKey {
            file_name: file.file_name().to_string(),
            pos: container_span.start,
        };
        self.classes_with_nodes_inserted_at_start
            .entry(key)
            .or_insert(ClassInsertInfo {
                node: container,
                file,
            });

        let is_object = container_kind == OBJECT_LITERAL_EXPRESSION;
        let (pos, leading_comma) = match members.last().and_then(|m| arena.get(m).map(|n| (m, n.end))) {
            None => (brace_end, false),
            Some((last, last_end)) if is_object && members.has_trailing_comma => {
                let pos = self.next_comma_token(file, last).map_or(last_end, |comma| comma.end);
                (pos, false)
            }
            Some((_, last_end)) => (last_end, is_object),
        };
        let suffix = if is_object {
            ","
        } else if container_kind == INTERFACE_DECLARATION && members.is_empty() {
            ";"
        } else {
            ""
        };
        let prefix = if leading_comma {
            format!(",{}", self.new_line)
        } else {
            self.new_line.clone()
        };
        let options = InsertNodeOptions {
            prefix,
            suffix: suffix.to_string(),
            indentation: Some(indentation),
            delta: None,
        };
        self.insert_node_at(file, pos, element, options);
    }

    /// Shared indentation of the members when each sits on its own line.
    fn guess_indentation_from_existing_members(
        &self,
        file: &ProjectFile,
        container_start: u32,
        members: &NodeList,
    ) -> Option<u32> {
        let line_map = file.line_map();
        let mut indentation = None;
        let mut last_start = container_start;
        for member in members.iter() {
            let start = file.arena().get(member)?.pos;
            if line_map.on_same_line(last_start, start) {
                return None;
            }
            let member_indentation = line_indentation(file, start, self.format_settings.tab_size);
            match indentation {
                None => indentation = Some(member_indentation),
                Some(existing) if existing != member_indentation => return None,
                Some(_) => {}
            }
            last_start = start;
        }
        indentation
    }

    /// Insert `new_node` into the comma separated list that holds `after`.
    pub fn insert_node_in_list_after(&mut self, file: &'a ProjectFile, after: NodeIndex, new_node: SynthNode) {
        let Some(list) = self.containing_list(file, after) else {
            return;
        };
        let Some(index) = list.position_of(after) else {
            return;
        };
        let Some(after_span) = NodeSpan::of(file, after) else {
            return;
        };
        let source = file.source_text();

        if index + 1 < list.len() {
            // Insert before the next element and repeat the separator.
            let next_token = scan_token_at(file.shared_text(), after_span.end);
            if !is_list_separator(next_token.kind) {
                return;
            }
            let Some(next) = NodeSpan::of(file, list.nodes[index + 1]) else {
                return;
            };
            let start = skip_whitespaces_and_line_breaks(source, next.full_start.max(next_token.end));
            let separator = token_to_string(next_token.kind).unwrap_or(",");
            let trivia = source.get(next_token.end as usize..start as usize).unwrap_or("");
            let options = ReplaceWithMultipleNodesOptions {
                insert: InsertNodeOptions::suffix(format!("{separator}{trivia}")),
                joiner: None,
            };
            self.insert_nodes_at(file, start, vec![new_node], options);
            return;
        }

        let line_map = file.line_map();
        let mut separator = SyntaxKind::CommaToken;
        let mut multi_line = false;
        if index > 0 {
            if let Some(previous) = NodeSpan::of(file, list.nodes[index - 1]) {
                let token = scan_token_at(file.shared_text(), previous.end);
                if is_list_separator(token.kind) && token.end <= after_span.start {
                    separator = token.kind;
                }
                multi_line = !line_map.on_same_line(previous.start, after_span.start);
            }
        }
        if has_comments_before_line_break(source, after_span.end) || !line_map.on_same_line(list.pos, list.end) {
            multi_line = true;
        }

        if multi_line {
            self.insert_node_in_list_after_multi_line(file, after, separator, new_node);
        } else {
            let separator = token_to_string(separator).unwrap_or(",");
            self.replace_range(
                file,
                TextRange::empty(after_span.end),
                new_node,
                InsertNodeOptions::prefix(format!("{separator} ")),
            );
        }
    }

    /// Put `separator` right after `after` and `new_node` on its own line
    /// below, at `after`'s indentation.
    pub fn insert_node_in_list_after_multi_line(
        &mut self,
        file: &'a ProjectFile,
        after: NodeIndex,
        separator: SyntaxKind,
        new_node: SynthNode,
    ) {
        let Some(span) = NodeSpan::of(file, after) else {
            return;
        };
        let source = file.source_text();
        self.replace_range(
            file,
            TextRange::empty(span.end),
            SynthNode::token(separator),
            InsertNodeOptions::default(),
        );
        let indentation = line_indentation(file, span.start, self.format_settings.tab_size);
        let mut insert_pos = skip_trivia(source, span.end, true, false);
        while insert_pos != span.end
            && source
                .as_bytes()
                .get(insert_pos as usize - 1)
                .is_some_and(|&b| is_line_break(b))
        {
            insert_pos -= 1;
        }
        let options = InsertNodeOptions {
            prefix: self.new_line.clone(),
            indentation: Some(indentation),
            ..InsertNodeOptions::default()
        };
        self.replace_range(file, TextRange::empty(insert_pos), new_node, options);
    }

    /// The list (arguments, parameters, members, ...) that directly holds `node`.
    pub fn containing_list(&self, file: &'a ProjectFile, node: NodeIndex) -> Option<&'a NodeList> {
        get_containing_list(file.arena(), node)
    }

    /// The comma token right after `node`, if there is one.
    pub fn next_comma_token(&self, file: &ProjectFile, node: NodeIndex) -> Option<TokenInfo> {
        let end = file.arena().get(node)?.end;
        let token = scan_token_at(file.shared_text(), end);
        (token.kind == SyntaxKind::CommaToken).then_some(token)
    }

    pub fn create_new_file(&mut self, old_file: Option<&'a ProjectFile>, file_name: impl Into<String>, statements: Vec<SynthNode>) {
        let file_name = file_name.into();
        trace!(file = %file_name, statements = statements.len(), "record new file");
        self.new_files.push(NewFile {
            old_file,
            file_name,
            statements,
        });
    }

    // =========================================================================
    // Finalization
    // =========================================================================

    /// Turn queued identity deletions into range deletions, one per entry.
    fn finish_delete_declarations(&mut self) {
        let deleted = std::mem::take(&mut self.deleted_nodes);
        for DeletedNode { file, node } in deleted {
            match node {
                NodeOrNodes::Node(idx) => self.delete_node(file, idx, None),
                NodeOrNodes::List(nodes) => {
                    if let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) {
                        self.delete_node_range(file, first, last, None);
                    }
                }
            }
        }
    }

    /// Make single-line containers that received members multi-line.
    fn finish_classes_with_nodes_inserted_at_start(&mut self) {
        let containers: Vec<ClassInsertInfo<'a>> =
            self.classes_with_nodes_inserted_at_start.values().copied().collect();
        for ClassInsertInfo { node, file } in containers {
            let Some(open_end) = open_brace_end(file, node) else {
                continue;
            };
            let Some(close_end) = file.arena().get(node).map(|n| n.end) else {
                continue;
            };
            if close_end <= open_end {
                continue;
            }
            let is_empty = file.arena().get_members(node).is_none_or(|m| m.is_empty());
            let single_line = file.line_map().on_same_line(open_end, close_end);
            if !single_line {
                continue;
            }
            // Whitespace before the closing brace gives way to the line break.
            let close_pos = close_end - 1;
            let space_start = if is_empty {
                open_end
            } else {
                let before = file.source_text().get(open_end as usize..close_pos as usize).unwrap_or("");
                close_pos - (before.len() - before.trim_end_matches([' ', '\t']).len()) as u32
            };
            let new_line = self.new_line.clone();
            self.replace_range_with_text(file, TextRange::new(space_start, close_pos), new_line);
        }
    }

    /// Finalize the session.
    pub fn get_changes(mut self) -> Vec<FileTextChanges> {
        self.finish_delete_declarations();
        self.finish_classes_with_nodes_inserted_at_start();
        let printer = finalize::Finalizer {
            settings: self.format_settings,
            preferences: self.preferences,
            printer: self.printer,
            new_line: &self.new_line,
        };
        let mut changes = printer.changes_to_text(&self.changes);
        changes.extend(self.new_files.iter().map(|new_file| printer.new_file_changes(new_file)));
        tracing::debug!(
            recorded = self.changes.len(),
            files = changes.len(),
            "finalized change tracker"
        );
        changes
    }
}

/// Kinds that `insert_member_at_start` accepts.
fn is_member_kind(kind: u16) -> bool {
    matches!(
        kind,
        PROPERTY_DECLARATION
            | PROPERTY_SIGNATURE
            | PROPERTY_ASSIGNMENT
            | SHORTHAND_PROPERTY_ASSIGNMENT
            | METHOD_SIGNATURE
            | METHOD_DECLARATION
            | SPREAD_ASSIGNMENT
    )
}

fn is_list_separator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CommaToken | SyntaxKind::SemicolonToken | SyntaxKind::ColonToken | SyntaxKind::DotToken
    )
}

/// First token of `kind` in `[from, limit)`.
fn find_token(file: &ProjectFile, from: u32, limit: u32, kind: SyntaxKind) -> Option<TokenInfo> {
    let mut pos = from;
    loop {
        let token = scan_token_at(file.shared_text(), pos);
        if token.kind == SyntaxKind::EndOfFileToken || token.pos >= limit || token.end <= pos {
            return None;
        }
        if token.kind == kind {
            return Some(token);
        }
        pos = token.end;
    }
}

/// End of the `{` that opens a container's body.
pub(crate) fn open_brace_end(file: &ProjectFile, container: NodeIndex) -> Option<u32> {
    let arena = file.arena();
    let node = arena.get(container)?;
    if file.source_text().as_bytes().get(node.pos as usize) == Some(&b'{') {
        return Some(node.pos + 1);
    }
    // Skip the header so braces inside type parameters are not picked up.
    let mut header_end = arena.get(arena.get_declaration_name(container)).map_or(node.pos, |n| n.end);
    let (type_parameters, heritage) = match node.kind {
        CLASS_DECLARATION | STRUCT_DECLARATION => {
            let class = arena.get_class(node)?;
            (class.type_parameters.as_ref(), class.heritage_clauses.as_ref())
        }
        INTERFACE_DECLARATION => {
            let iface = arena.get_interface(node)?;
            (iface.type_parameters.as_ref(), iface.heritage_clauses.as_ref())
        }
        _ => (None, None),
    };
    if let Some(list) = type_parameters {
        header_end = header_end.max(list.end);
    }
    if let Some(last) = heritage.and_then(|h| h.last()).and_then(|h| arena.get(h)) {
        header_end = header_end.max(last.end);
    }
    find_token(file, header_end, node.end, SyntaxKind::OpenBraceToken).map(|t| t.end)
}

fn constructor_statements(file: &ProjectFile, ctor: NodeIndex) -> Option<(&NodeList, bool)> {
    let arena = file.arena();
    let body = arena.get(ctor).and_then(|n| arena.get_constructor(n))?.body;
    let block = arena.get(body).and_then(|n| arena.get_block(n))?;
    Some((&block.statements, block.multi_line))
}

fn signature_parameters(file: &ProjectFile, node: NodeIndex) -> Option<&NodeList> {
    let arena = file.arena();
    let data = arena.get(node)?;
    match data.kind {
        FUNCTION_DECLARATION | FUNCTION_EXPRESSION | ARROW_FUNCTION => arena.get_function(data).map(|f| &f.parameters),
        METHOD_DECLARATION => arena.get_method_decl(data).map(|m| &m.parameters),
        CONSTRUCTOR => arena.get_constructor(data).map(|c| &c.parameters),
        GET_ACCESSOR | SET_ACCESSOR => arena.get_accessor(data).map(|a| &a.parameters),
        METHOD_SIGNATURE => arena.get_signature(data).and_then(|s| s.parameters.as_ref()),
        _ => None,
    }
}

/// Where new top-level statements go: after prologue directives, a shebang
/// line and the file's header comment block.
fn insertion_position_at_file_top(file: &ProjectFile) -> u32 {
    let arena = file.arena();
    let text = file.source_text();
    let line_map = file.line_map();
    let statements: Vec<NodeIndex> = file.statements().map(|s| s.iter().collect()).unwrap_or_default();

    let last_prologue = statements
        .iter()
        .take_while(|&&stmt| is_prologue_directive(file, stmt))
        .last()
        .and_then(|&stmt| arena.get(stmt));
    if let Some(prologue) = last_prologue {
        return advance_past_line_break(text, prologue.end);
    }

    let mut position = shebang_end(text);
    if position > 0 {
        position = advance_past_line_break(text, position);
    }

    let first_statement_line = statements
        .first()
        .and_then(|&s| arena.get(s))
        .map(|s| line_map.line_of(s.pos));
    let mut last_comment: Option<(u32, bool)> = None;
    for comment in get_leading_comment_ranges(text, position) {
        let comment_text = comment.get_text(text);
        let pinned = (comment.is_multi_line && comment_text.starts_with("/*!"))
            || (!comment.is_multi_line && comment_text.starts_with("/// <"));
        if pinned {
            last_comment = Some((comment.end, true));
            continue;
        }
        if let Some((last_end, last_pinned)) = last_comment {
            if last_pinned {
                break;
            }
            // A blank line ends the header block.
            if line_map.line_of(comment.pos) >= line_map.line_of(last_end) + 2 {
                break;
            }
        }
        if let Some(first_line) = first_statement_line {
            if first_line < line_map.line_of(comment.end) + 2 {
                break;
            }
        }
        last_comment = Some((comment.end, false));
    }
    match last_comment {
        Some((end, _)) => advance_past_line_break(text, end),
        None => position,
    }
}

fn is_prologue_directive(file: &ProjectFile, statement: NodeIndex) -> bool {
    let arena = file.arena();
    arena
        .get(statement)
        .and_then(|n| arena.get_expr_statement(n))
        .is_some_and(|s| arena.is_kind(s.expression, SyntaxKind::StringLiteral as u16))
}

fn advance_past_line_break(text: &str, pos: u32) -> u32 {
    let bytes = text.as_bytes();
    let mut pos = pos as usize;
    if let Some(&ch) = bytes.get(pos) {
        if is_line_break(ch) {
            pos += 1;
            if ch == b'\r' && bytes.get(pos) == Some(&b'\n') {
                pos += 1;
            }
        }
    }
    pos as u32
}

#[cfg(test)]
#[path = "../../tests/change_tracker_tests.rs"]
mod change_tracker_tests;
