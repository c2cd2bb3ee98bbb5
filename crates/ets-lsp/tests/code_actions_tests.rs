use super::*;
use crate::text_changes::apply_text_changes;
use ets_common::diagnostics::diagnostic_codes;

const FILE: &str = "main.ets";

struct Harness {
    project: Project,
    settings: FormatCodeSettings,
    preferences: UserPreferences,
    registry: CodeFixRegistry,
}

impl Harness {
    fn new(text: &str) -> Self {
        Self::with_files(&[(FILE, text)])
    }

    fn with_files(files: &[(&str, &str)]) -> Self {
        let mut project = Project::new();
        for (name, text) in files {
            project.set_file(name.to_string(), text.to_string());
        }
        Self {
            project,
            settings: FormatCodeSettings::default(),
            preferences: UserPreferences::default(),
            registry: CodeFixRegistry::with_default_fixes(),
        }
    }

    fn text(&self, file_name: &str) -> &str {
        self.project.file(file_name).expect("file").source_text()
    }

    /// Offset of the first occurrence of `needle` in the main file.
    fn offset(&self, needle: &str) -> u32 {
        self.text(FILE).find(needle).expect("needle") as u32
    }

    fn fixes(&self, pos: u32, code: u32) -> Vec<CodeFixAction> {
        let context = CodeFixContext {
            project: &self.project,
            file_name: FILE,
            error_code: code,
            span: TextSpan::new(pos, 1),
            format_settings: &self.settings,
            preferences: &self.preferences,
        };
        self.registry.get_fixes(&context)
    }

    fn fix_all(&self, fix_id: &str, diagnostics: &[Diagnostic]) -> CombinedCodeActions {
        let context = CodeFixAllContext {
            project: &self.project,
            file_name: FILE,
            fix_id,
            diagnostics,
            format_settings: &self.settings,
            preferences: &self.preferences,
        };
        self.registry.get_all_fixes(&context)
    }

    fn diagnostic(&self, needle: &str, code: u32) -> Diagnostic {
        Diagnostic::error(FILE, self.offset(needle), needle.len() as u32, "", code)
    }

    /// `file_name` after applying its share of `changes`.
    fn apply(&self, changes: &[FileTextChanges], file_name: &str) -> String {
        let file_changes = changes
            .iter()
            .find(|c| c.file_name == file_name)
            .expect("changes for file");
        apply_text_changes(self.text(file_name), &file_changes.text_changes)
    }

    /// Main file after the only fix offered at `needle`.
    fn apply_single(&self, needle: &str, code: u32) -> String {
        let actions = self.fixes(self.offset(needle), code);
        assert_eq!(actions.len(), 1, "expected one action at {needle:?}");
        self.apply(&actions[0].changes, FILE)
    }
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_supported_error_codes_sorted_numerically() {
    let registry = CodeFixRegistry::with_default_fixes();
    assert_eq!(
        registry.get_supported_error_codes(),
        vec![
            "1005", "2377", "2420", "2588", "2612", "2845", "4112", "4113", "4114", "4116", "6133", "6196",
        ]
    );
}

#[test]
fn test_empty_registry_answers_nothing() {
    let registry = CodeFixRegistry::new();
    assert!(registry.get_supported_error_codes().is_empty());
    let harness = Harness::new("const a = 1;\na = 2;\n");
    let context = CodeFixContext {
        project: &harness.project,
        file_name: FILE,
        error_code: diagnostic_codes::CANNOT_ASSIGN_TO_CONST,
        span: TextSpan::new(harness.offset("a = 2"), 1),
        format_settings: &harness.settings,
        preferences: &harness.preferences,
    };
    assert!(registry.get_fixes(&context).is_empty());
}

#[test]
fn test_unknown_code_or_fix_id_yields_nothing() {
    let harness = Harness::new("let a = 1;\n");
    assert!(harness.fixes(0, 9999).is_empty());
    assert_eq!(harness.fix_all("noSuchFix", &[]), CombinedCodeActions::default());
}

#[test]
fn test_unknown_file_yields_nothing() {
    let harness = Harness::new("const a = 1;\na = 2;\n");
    let context = CodeFixContext {
        project: &harness.project,
        file_name: "missing.ets",
        error_code: diagnostic_codes::CANNOT_ASSIGN_TO_CONST,
        span: TextSpan::new(0, 1),
        format_settings: &harness.settings,
        preferences: &harness.preferences,
    };
    assert!(harness.registry.get_fixes(&context).is_empty());
}

#[test]
fn test_action_serializes_camel_case() {
    let harness = Harness::new("const a = 1;\na = 2;\n");
    let actions = harness.fixes(harness.offset("a = 2"), diagnostic_codes::CANNOT_ASSIGN_TO_CONST);
    let json = serde_json::to_value(&actions[0]).expect("serialize");
    assert_eq!(json["fixName"], "convertConstToLet");
    assert_eq!(json["fixId"], "convertConstToLet");
    assert_eq!(json["fixAllDescription"], "Convert all 'const' to 'let'");
    assert_eq!(json["changes"][0]["fileName"], FILE);
    assert_eq!(json["commands"], serde_json::json!([]));
}

#[test]
fn test_fix_all_ignores_diagnostics_of_other_files_and_codes() {
    let harness = Harness::new("const a = 1;\na = 2;\n");
    let mut elsewhere = harness.diagnostic("a = 2", diagnostic_codes::CANNOT_ASSIGN_TO_CONST);
    elsewhere.file = "other.ets".to_string();
    let wrong_code = harness.diagnostic("a = 2", diagnostic_codes::CONDITION_ALWAYS_RETURNS);
    let combined = harness.fix_all("convertConstToLet", &[elsewhere, wrong_code]);
    assert!(combined.changes.is_empty());
}

// =============================================================================
// NaN equality
// =============================================================================

#[test]
fn test_nan_equality_uses_is_nan() {
    let harness = Harness::new("const same = x === NaN;\n");
    let actions = harness.fixes(harness.offset("x ==="), diagnostic_codes::CONDITION_ALWAYS_RETURNS);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].fix_name, "fixNaNEquality");
    assert_eq!(actions[0].description, "Use Number.isNaN()");
    assert_eq!(harness.apply(&actions[0].changes, FILE), "const same = Number.isNaN(x);\n");
}

#[test]
fn test_nan_inequality_is_negated() {
    let harness = Harness::new("const differs = Number.NaN != value;\n");
    assert_eq!(
        harness.apply_single("Number.NaN", diagnostic_codes::CONDITION_ALWAYS_RETURNS),
        "const differs = !Number.isNaN(value);\n"
    );
}

#[test]
fn test_nan_fix_requires_nan_operand() {
    let harness = Harness::new("const same = x === y;\nconst less = x < NaN;\n");
    assert!(harness.fixes(harness.offset("x === y"), diagnostic_codes::CONDITION_ALWAYS_RETURNS).is_empty());
    assert!(harness.fixes(harness.offset("x < NaN"), diagnostic_codes::CONDITION_ALWAYS_RETURNS).is_empty());
}

#[test]
fn test_nan_fix_all() {
    let harness = Harness::new("a === NaN;\nb !== Number.NaN;\n");
    let diagnostics = [
        harness.diagnostic("a ===", diagnostic_codes::CONDITION_ALWAYS_RETURNS),
        harness.diagnostic("b !==", diagnostic_codes::CONDITION_ALWAYS_RETURNS),
    ];
    let combined = harness.fix_all("fixNaNEquality", &diagnostics);
    assert_eq!(harness.apply(&combined.changes, FILE), "Number.isNaN(a);\n!Number.isNaN(b);\n");
}

// =============================================================================
// declare property
// =============================================================================

const REDECLARED: &str = "class A { x: number = 1; }\nclass B extends A {\n    x: number;\n}\n";

#[test]
fn test_add_missing_declare_property() {
    let harness = Harness::new(REDECLARED);
    let pos = harness.text(FILE).rfind("x: number;").expect("property") as u32;
    let actions = harness.fixes(pos, diagnostic_codes::PROPERTY_WILL_OVERWRITE_BASE_PROPERTY);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].description, "Prefix with 'declare'");
    assert_eq!(
        harness.apply(&actions[0].changes, FILE),
        "class A { x: number = 1; }\nclass B extends A {\n    declare x: number;\n}\n"
    );
}

#[test]
fn test_declare_fix_all_prefixes_each_property_once() {
    let harness = Harness::new(REDECLARED);
    let pos = harness.text(FILE).rfind("x: number;").expect("property") as u32;
    let diagnostic = Diagnostic::error(FILE, pos, 1, "", diagnostic_codes::PROPERTY_WILL_OVERWRITE_BASE_PROPERTY);
    let combined = harness.fix_all("addMissingDeclareProperty", &[diagnostic.clone(), diagnostic]);
    assert_eq!(combined.changes[0].text_changes.len(), 1);
}

#[test]
fn test_declare_fix_needs_property_name() {
    let harness = Harness::new(REDECLARED);
    assert!(harness
        .fixes(harness.offset("class B"), diagnostic_codes::PROPERTY_WILL_OVERWRITE_BASE_PROPERTY)
        .is_empty());
}

// =============================================================================
// override modifier
// =============================================================================

#[test]
fn test_add_override_after_accessibility_modifier() {
    let harness = Harness::new("class A { m() {} }\nclass B extends A {\n    public m() {}\n}\n");
    let pos = harness.text(FILE).rfind("m()").expect("method") as u32;
    let actions = harness.fixes(pos, diagnostic_codes::MEMBER_MUST_HAVE_OVERRIDE);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].fix_name, "fixOverrideModifier");
    assert_eq!(actions[0].fix_id.as_deref(), Some("fixAddOverrideModifier"));
    assert_eq!(
        harness.apply(&actions[0].changes, FILE),
        "class A { m() {} }\nclass B extends A {\n    public override m() {}\n}\n"
    );
}

#[test]
fn test_add_override_prefers_static_over_accessibility() {
    let harness = Harness::new("class B extends A {\n    private static m() {}\n}\n");
    assert_eq!(
        harness.apply_single("m()", diagnostic_codes::MEMBER_MUST_HAVE_OVERRIDE_ABSTRACT),
        "class B extends A {\n    private static override m() {}\n}\n"
    );
}

#[test]
fn test_add_override_without_modifiers_goes_first() {
    let harness = Harness::new("class B extends A {\n    m() {}\n}\n");
    assert_eq!(
        harness.apply_single("m()", diagnostic_codes::MEMBER_MUST_HAVE_OVERRIDE),
        "class B extends A {\n    override m() {}\n}\n"
    );
}

#[test]
fn test_add_override_skips_member_that_has_it() {
    let harness = Harness::new("class B extends A {\n    override m() {}\n}\n");
    assert!(harness.fixes(harness.offset("m()"), diagnostic_codes::MEMBER_MUST_HAVE_OVERRIDE).is_empty());
}

#[test]
fn test_remove_override() {
    let harness = Harness::new("class A {\n    override m() {}\n}\n");
    let actions = harness.fixes(harness.offset("m()"), diagnostic_codes::OVERRIDE_WITHOUT_BASE_CLASS);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].description, "Remove 'override' modifier");
    assert_eq!(harness.apply(&actions[0].changes, FILE), "class A {\n    m() {}\n}\n");
}

#[test]
fn test_override_fix_all() {
    let harness = Harness::new("class B extends A {\n    m() {}\n    n() {}\n}\n");
    let diagnostics = [
        harness.diagnostic("m()", diagnostic_codes::MEMBER_MUST_HAVE_OVERRIDE),
        harness.diagnostic("n()", diagnostic_codes::MEMBER_MUST_HAVE_OVERRIDE),
        harness.diagnostic("n()", diagnostic_codes::MEMBER_MUST_HAVE_OVERRIDE),
    ];
    let combined = harness.fix_all("fixAddOverrideModifier", &diagnostics);
    assert_eq!(
        harness.apply(&combined.changes, FILE),
        "class B extends A {\n    override m() {}\n    override n() {}\n}\n"
    );
}

// =============================================================================
// const to let
// =============================================================================

#[test]
fn test_convert_const_to_let() {
    let harness = Harness::new("const a = 1;\na = 2;\n");
    assert_eq!(
        harness.apply_single("a = 2", diagnostic_codes::CANNOT_ASSIGN_TO_CONST),
        "let a = 1;\na = 2;\n"
    );
}

#[test]
fn test_const_to_let_ignores_non_const() {
    let harness = Harness::new("let a = 1;\na = 2;\n");
    assert!(harness.fixes(harness.offset("a = 2"), diagnostic_codes::CANNOT_ASSIGN_TO_CONST).is_empty());
}

#[test]
fn test_const_to_let_edits_declaring_file() {
    let harness = Harness::with_files(&[("consts.ets", "export const LIMIT = 1;\n"), (FILE, "LIMIT = 2;\n")]);
    let actions = harness.fixes(0, diagnostic_codes::CANNOT_ASSIGN_TO_CONST);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].changes.len(), 1);
    assert_eq!(actions[0].changes[0].file_name, "consts.ets");
    assert_eq!(harness.apply(&actions[0].changes, "consts.ets"), "export let LIMIT = 1;\n");
}

#[test]
fn test_const_to_let_fix_all_edits_each_list_once() {
    let harness = Harness::new("const a = 1, b = 2;\na = 3;\nb = 4;\n");
    let diagnostics = [
        harness.diagnostic("a = 3", diagnostic_codes::CANNOT_ASSIGN_TO_CONST),
        harness.diagnostic("b = 4", diagnostic_codes::CANNOT_ASSIGN_TO_CONST),
    ];
    let combined = harness.fix_all("convertConstToLet", &diagnostics);
    assert_eq!(combined.changes[0].text_changes.len(), 1);
    assert_eq!(harness.apply(&combined.changes, FILE), "let a = 1, b = 2;\na = 3;\nb = 4;\n");
}

// =============================================================================
// unused identifiers
// =============================================================================

#[test]
fn test_unused_first_declarator() {
    let harness = Harness::new("let a = 1, b = 2;\nuse(b);\n");
    let actions = harness.fixes(harness.offset("a ="), diagnostic_codes::DECLARED_BUT_NEVER_READ);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].fix_id.as_deref(), Some("unusedIdentifier_delete"));
    assert_eq!(harness.apply(&actions[0].changes, FILE), "let b = 2;\nuse(b);\n");
}

#[test]
fn test_unused_last_declarator_takes_preceding_comma() {
    let harness = Harness::new("let a = 1, b = 2;\nuse(a);\n");
    assert_eq!(
        harness.apply_single("b =", diagnostic_codes::DECLARED_BUT_NEVER_READ),
        "let a = 1;\nuse(a);\n"
    );
}

#[test]
fn test_unused_only_declarator_removes_statement() {
    let harness = Harness::new("let x = 1;\nlet y = 2;\n");
    assert_eq!(
        harness.apply_single("x =", diagnostic_codes::DECLARED_BUT_NEVER_USED),
        "let y = 2;\n"
    );
}

#[test]
fn test_unused_import_specifier() {
    let harness = Harness::new("import { A, B } from './m';\nnew B();\n");
    assert_eq!(
        harness.apply_single("A,", diagnostic_codes::DECLARED_BUT_NEVER_READ),
        "import { B } from './m';\nnew B();\n"
    );
}

#[test]
fn test_unused_default_import_keeps_named_bindings() {
    let harness = Harness::new("import D, { A } from './m';\nnew A();\n");
    assert_eq!(
        harness.apply_single("D,", diagnostic_codes::DECLARED_BUT_NEVER_READ),
        "import { A } from './m';\nnew A();\n"
    );
}

#[test]
fn test_unused_class_member() {
    let harness = Harness::new("class C {\n    private unused(): void {}\n    used(): void {}\n}\n");
    assert_eq!(
        harness.apply_single("unused", diagnostic_codes::DECLARED_BUT_NEVER_READ),
        "class C {\n    used(): void {}\n}\n"
    );
}

#[test]
fn test_unused_function() {
    let harness = Harness::new("function helper() {}\nexport function main() {}\n");
    assert_eq!(
        harness.apply_single("helper", diagnostic_codes::DECLARED_BUT_NEVER_READ),
        "export function main() {}\n"
    );
}

#[test]
fn test_unused_requires_declaration_name() {
    let harness = Harness::new("let a = 1;\nuse(a);\n");
    assert!(harness.fixes(harness.offset("use"), diagnostic_codes::DECLARED_BUT_NEVER_READ).is_empty());
}

#[test]
fn test_unused_fix_all_drops_statement_when_every_declarator_goes() {
    let harness = Harness::new("let a = 1, b = 2;\nlet c = 3;\n");
    let diagnostics = [
        harness.diagnostic("a =", diagnostic_codes::DECLARED_BUT_NEVER_READ),
        harness.diagnostic("b =", diagnostic_codes::DECLARED_BUT_NEVER_USED),
    ];
    let combined = harness.fix_all("unusedIdentifier_delete", &diagnostics);
    assert_eq!(combined.changes[0].text_changes.len(), 1);
    assert_eq!(harness.apply(&combined.changes, FILE), "let c = 3;\n");
}

// =============================================================================
// super call
// =============================================================================

#[test]
fn test_super_call_before_first_statement() {
    let harness = Harness::new("class B extends A {\n    constructor() {\n        this.x = 1;\n    }\n}\n");
    let actions = harness.fixes(
        harness.offset("constructor"),
        diagnostic_codes::CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_SUPER_CALL,
    );
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].description, "Add missing 'super()' call");
    assert_eq!(
        harness.apply(&actions[0].changes, FILE),
        "class B extends A {\n    constructor() {\n        super();\n        this.x = 1;\n    }\n}\n"
    );
}

#[test]
fn test_super_call_fix_all() {
    let harness = Harness::new(
        "class B extends A {\n    constructor() {}\n}\nclass C extends A {\n    constructor() {}\n}\n",
    );
    let pos = harness.text(FILE).rfind("constructor").expect("constructor") as u32;
    let diagnostics = [
        harness.diagnostic("constructor", diagnostic_codes::CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_SUPER_CALL),
        Diagnostic::error(FILE, pos, 11, "", diagnostic_codes::CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_SUPER_CALL),
    ];
    let combined = harness.fix_all("fixConstructorForDerivedNeedSuperCall", &diagnostics);
    assert_eq!(
        harness.apply(&combined.changes, FILE),
        "class B extends A {\n    constructor() {\n        super();\n    }\n}\nclass C extends A {\n    constructor() {\n        super();\n    }\n}\n"
    );
}

#[test]
fn test_super_call_outside_constructor_yields_nothing() {
    let harness = Harness::new("class B extends A {\n    m() {}\n}\n");
    assert!(harness
        .fixes(
            harness.offset("m()"),
            diagnostic_codes::CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_SUPER_CALL
        )
        .is_empty());
}

// =============================================================================
// implement interface
// =============================================================================

const SHAPE: &str = "interface Shape {\n    name: string;\n    area(scale: number): number;\n}\n";

#[test]
fn test_implement_interface_into_empty_class() {
    let text = format!("{SHAPE}class Square implements Shape {{\n}}\n");
    let harness = Harness::new(&text);
    let actions = harness.fixes(harness.offset("Square"), diagnostic_codes::CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].description, "Implement interface 'Shape'");
    assert_eq!(
        harness.apply(&actions[0].changes, FILE),
        format!(
            "{SHAPE}class Square implements Shape {{\n    name: string;\n    area(scale: number): number {{\n        throw new Error(\"Method not implemented.\");\n    }}\n}}\n"
        )
    );
}

#[test]
fn test_implement_interface_skips_existing_members() {
    let text = format!("{SHAPE}class Square implements Shape {{\n    name: string = \"sq\";\n}}\n");
    let harness = Harness::new(&text);
    assert_eq!(
        harness.apply_single("Square", diagnostic_codes::CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE),
        format!(
            "{SHAPE}class Square implements Shape {{\n    name: string = \"sq\";\n    area(scale: number): number {{\n        throw new Error(\"Method not implemented.\");\n    }}\n}}\n"
        )
    );
}

#[test]
fn test_implement_interface_inserts_after_constructor() {
    let harness = Harness::new("interface Named {\n    name: string;\n}\nclass Tag implements Named {\n    constructor() {}\n}\n");
    assert_eq!(
        harness.apply_single("Tag", diagnostic_codes::CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE),
        "interface Named {\n    name: string;\n}\nclass Tag implements Named {\n    constructor() {}\n    name: string;\n}\n"
    );
}

#[test]
fn test_implement_interface_one_action_per_interface() {
    let harness = Harness::new("interface I { a: number; }\ninterface J { b: string; }\nclass K implements I, J {}\n");
    let actions = harness.fixes(harness.offset("K implements"), diagnostic_codes::CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE);
    let descriptions: Vec<&str> = actions.iter().map(|a| a.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Implement interface 'I'", "Implement interface 'J'"]);
}

#[test]
fn test_implement_interface_fix_all_once_per_class() {
    let text = format!("{SHAPE}class Square implements Shape {{\n}}\n");
    let harness = Harness::new(&text);
    let diagnostic = harness.diagnostic("Square", diagnostic_codes::CLASS_INCORRECTLY_IMPLEMENTS_INTERFACE);
    let combined = harness.fix_all("fixClassIncorrectlyImplementsInterface", &[diagnostic.clone(), diagnostic]);
    let applied = harness.apply(&combined.changes, FILE);
    assert_eq!(applied.matches("area(scale: number): number {").count(), 1);
}

// =============================================================================
// expected comma
// =============================================================================

#[test]
fn test_expected_comma_in_object_literal() {
    let harness = Harness::new("const p = { a: 1; b: 2 };\n");
    let actions = harness.fixes(harness.offset("; b"), diagnostic_codes::EXPECTED);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].description, "Change ';' to ','");
    assert_eq!(harness.apply(&actions[0].changes, FILE), "const p = { a: 1, b: 2 };\n");
}

#[test]
fn test_expected_comma_needs_semicolon_in_literal() {
    let harness = Harness::new("const p = { a: 1; b: 2 };\nlet q = 1;\n");
    assert!(harness.fixes(harness.offset("a:"), diagnostic_codes::EXPECTED).is_empty());
    assert!(harness.fixes(harness.offset(";\nlet"), diagnostic_codes::EXPECTED).is_empty());
}

#[test]
fn test_expected_comma_fix_all() {
    let harness = Harness::new("const xs = [1; 2; 3];\n");
    let diagnostics = [
        harness.diagnostic("; 2", diagnostic_codes::EXPECTED),
        harness.diagnostic("; 3", diagnostic_codes::EXPECTED),
    ];
    let combined = harness.fix_all("fixExpectedComma", &diagnostics);
    assert_eq!(harness.apply(&combined.changes, FILE), "const xs = [1, 2, 3];\n");
}
