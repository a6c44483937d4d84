use super::*;
use javastub_model::{
    JavaType, Member, Method, Parameter, TypeKind, TypeParameter, Visibility, NOT_DEPRECATED,
};
use test_case::test_case;

fn parse_ok(source: &str) -> CompileUnit {
    match parse_compile_unit(source) {
        Ok(unit) => unit,
        Err(error) => panic!("expected source to parse, got {error}: {:?}", error.diagnostics()),
    }
}

fn only_type(source: &str) -> JavaType {
    let unit = parse_ok(source);
    assert_eq!(unit.package.types.len(), 1, "expected a single top-level type");
    unit.package.types.into_iter().next().unwrap()
}

fn method<'a>(ty: &'a JavaType, name: &str) -> &'a Method {
    ty.methods()
        .find(|method| method.base.name == name)
        .unwrap_or_else(|| panic!("method {name} missing"))
}

#[test]
fn parameters_keep_names_and_types_in_order() {
    let ty = only_type(
        r#"
        package android.app;

        public class Foo {
            public void bar(int a, String b) { throw new RuntimeException("Stub!"); }
        }
        "#,
    );

    let bar = method(&ty, "bar");
    assert_eq!(
        bar.base.parameters,
        vec![Parameter::new("a", "int"), Parameter::new("b", "String")]
    );
    assert_eq!(bar.return_type, "void");
    assert_eq!(bar.base.visibility, Some(Visibility::Public));
}

#[test]
fn constructor_parameters_keep_names_and_types_in_order() {
    let ty = only_type(
        r#"
        package android.app;

        public class Foo {
            public Foo(int a, String b) { }
        }
        "#,
    );

    let constructor = ty.constructors().next().expect("constructor missing");
    assert_eq!(constructor.base.name, "Foo");
    assert_eq!(
        constructor.base.parameters,
        vec![Parameter::new("a", "int"), Parameter::new("b", "String")]
    );
    assert_eq!(constructor.base.visibility, Some(Visibility::Public));
}

#[test]
fn class_without_extends_gets_object_superclass() {
    let ty = only_type("package p;\npublic class Foo { }\n");
    assert_eq!(ty.extends(), Some("java.lang.Object"));
    assert!(ty.implements.is_empty());
}

#[test]
fn package_declaration_is_optional() {
    let unit = parse_ok("class A { }");
    assert!(unit.package.is_unnamed());
    assert_eq!(unit.package.types[0].name, "A");
    assert_eq!(unit.package.types[0].visibility, None);
}

#[test]
fn imports_are_collected() {
    let unit = parse_ok(
        "package p;\nimport java.util.*;\nimport static java.lang.Math.PI;\nimport java.io.File;\nclass A { }",
    );
    assert_eq!(
        unit.imports,
        vec!["java.util.*", "java.lang.Math.PI", "java.io.File"]
    );
}

#[test_case("@Deprecated public class Old { }", "Deprecated" ; "simple name")]
#[test_case("@java.lang.Deprecated public class Old { }", "Deprecated" ; "qualified name")]
#[test_case("@android.annotation.SuppressLint(\"NewApi\") public class Old { }", NOT_DEPRECATED ; "other annotation")]
#[test_case("public class Old { }", NOT_DEPRECATED ; "no annotation")]
fn deprecation_value(source: &str, expected: &str) {
    assert_eq!(only_type(source).deprecated, expected);
}

#[test]
fn members_carry_their_own_deprecation() {
    let ty = only_type(
        r#"
        public class Widget {
            @Deprecated
            public Widget() { throw new RuntimeException("Stub!"); }
            @Deprecated(since = "29", forRemoval = false) public int width;
            public int height;
        }
        "#,
    );

    let constructor = ty.constructors().next().unwrap();
    assert!(constructor.base.is_deprecated());
    let fields: Vec<_> = ty.fields().collect();
    assert_eq!(fields[0].deprecated, "Deprecated");
    assert_eq!(fields[1].deprecated, NOT_DEPRECATED);
}

#[test]
fn nested_types_stay_nested_and_unrenamed() {
    let ty = only_type(
        r#"
        package a.b;
        public class Outer {
            Outer() { super(null); throw new RuntimeException("Stub!"); }
            public static class Inner extends java.lang.Exception implements java.io.Serializable, java.lang.Comparable<java.lang.String> {
                protected Inner(java.lang.String message, int... codes) throws java.io.IOException, java.lang.IllegalStateException { throw new RuntimeException("Stub!"); }
                public class Innermost { }
            }
        }
        "#,
    );

    assert_eq!(ty.name, "Outer");
    let inner = ty.nested_types().next().unwrap();
    assert_eq!(inner.name, "Inner");
    assert!(inner.is_static);
    assert_eq!(inner.extends(), Some("java.lang.Exception"));
    assert_eq!(
        inner.implements,
        vec!["java.io.Serializable", "java.lang.Comparable<java.lang.String>"]
    );
    assert_eq!(inner.nested_types().next().unwrap().name, "Innermost");

    let constructor = inner.constructors().next().unwrap();
    assert_eq!(constructor.enclosing_type_name, "Inner");
    assert_eq!(constructor.base.visibility, Some(Visibility::Protected));
    assert_eq!(
        constructor.base.parameters,
        vec![
            Parameter::new("message", "java.lang.String"),
            Parameter::new("codes", "int..."),
        ]
    );
    let exceptions: Vec<_> = constructor
        .base
        .exceptions
        .iter()
        .map(|exception| exception.exception_type.as_str())
        .collect();
    assert_eq!(
        exceptions,
        vec!["java.io.IOException", "java.lang.IllegalStateException"]
    );
}

#[test]
fn interface_extends_list_becomes_implements() {
    let ty = only_type(
        r#"
        package p;
        public interface Listener<T extends java.lang.Object> extends java.util.EventListener, java.lang.Cloneable {
            public void onEvent(T event);
            public static final int MODE = 0x10;
            public default int priority() { throw new RuntimeException("Stub!"); }
        }
        "#,
    );

    assert!(ty.is_interface());
    assert_eq!(ty.extends(), None);
    assert_eq!(
        ty.implements,
        vec!["java.util.EventListener", "java.lang.Cloneable"]
    );
    assert_eq!(
        ty.type_parameters,
        vec![TypeParameter {
            name: "T".to_string(),
            bounds: vec!["java.lang.Object".to_string()],
        }]
    );
    assert_eq!(method(&ty, "onEvent").base.parameters[0].parameter_type, "T");
    assert_eq!(ty.fields().next().unwrap().value.as_deref(), Some("0x10"));
    assert_eq!(method(&ty, "priority").return_type, "int");
}

#[test]
fn annotation_types_are_interfaces() {
    let ty = only_type(
        r#"
        public @interface Marker {
            int value() default 0;
            String[] names() default {};
        }
        "#,
    );

    assert_eq!(ty.kind, TypeKind::Interface);
    assert_eq!(method(&ty, "names").return_type, "String[]");
    assert_eq!(ty.methods().count(), 2);
}

#[test]
fn enum_constants_become_leading_fields() {
    let ty = only_type(
        r#"
        package p;
        public enum Color implements java.io.Serializable {
            RED,
            @Deprecated GREEN("g") { },
            BLUE,;
            public int code() { throw new RuntimeException("Stub!"); }
        }
        "#,
    );

    assert_eq!(ty.extends(), Some("java.lang.Enum"));
    assert_eq!(ty.implements, vec!["java.io.Serializable"]);

    let names: Vec<_> = ty.members.iter().map(Member::name).collect();
    assert_eq!(names, vec!["RED", "GREEN", "BLUE", "code"]);

    let fields: Vec<_> = ty.fields().collect();
    for field in &fields {
        assert_eq!(field.field_type, "Color");
        assert!(field.is_static && field.is_final);
        assert_eq!(field.visibility, Some(Visibility::Public));
        assert_eq!(field.value, None);
    }
    assert_eq!(fields[0].deprecated, NOT_DEPRECATED);
    assert_eq!(fields[1].deprecated, "Deprecated");
}

#[test]
fn enum_without_constants_or_members() {
    let ty = only_type("enum Empty { }");
    assert!(ty.members.is_empty());
    assert_eq!(ty.extends(), Some("java.lang.Enum"));
}

#[test]
fn bounded_leading_generic_becomes_type_parameter() {
    let ty = only_type(
        r#"
        public class Box {
            public <T extends java.lang.Number> T first(java.util.List<T> items) { throw new RuntimeException("Stub!"); }
        }
        "#,
    );

    let first = method(&ty, "first");
    assert_eq!(
        first.base.type_parameters,
        vec![TypeParameter {
            name: "T".to_string(),
            bounds: vec!["java.lang.Number".to_string()],
        }]
    );
    assert_eq!(first.return_type, "T");
    assert_eq!(first.base.parameters[0].parameter_type, "java.util.List<T>");
}

#[test]
fn bare_leading_generic_is_treated_as_modifier() {
    let ty = only_type(
        r#"
        public class Box {
            public static <T> T any() { throw new RuntimeException("Stub!"); }
        }
        "#,
    );

    let any = method(&ty, "any");
    assert!(any.base.type_parameters.is_empty());
    assert!(any.base.is_static);
    assert_eq!(any.base.visibility, Some(Visibility::Public));
}

#[test_case("T extends java.lang.Object", true ; "bounded by qualified name")]
#[test_case("K extends Comparable<K>", true ; "bounded by generic")]
#[test_case("java.lang.String", true ; "qualified argument")]
#[test_case("T", false ; "bare name")]
#[test_case("static", false ; "modifier keyword")]
fn modifier_list_classification(entry: &str, expected: bool) {
    assert_eq!(is_type_parameter_entry(entry), expected);
}

#[test]
fn method_flags_follow_modifiers() {
    let ty = only_type(
        r#"
        public abstract class Task {
            protected abstract void run() throws java.lang.Exception;
            public final native synchronized long handle();
            static final transient volatile int state = -1;
        }
        "#,
    );

    assert!(ty.is_abstract);
    let run = method(&ty, "run");
    assert!(run.is_abstract);
    assert_eq!(run.base.visibility, Some(Visibility::Protected));
    assert_eq!(run.base.exceptions[0].simple_name(), "Exception");

    let handle = method(&ty, "handle");
    assert!(handle.base.is_final && handle.is_native && handle.is_synchronized);
    assert!(!handle.is_abstract);

    let state = ty.fields().next().unwrap();
    assert!(state.is_static && state.is_final && state.is_transient && state.is_volatile);
    assert_eq!(state.visibility, None);
    assert_eq!(state.value.as_deref(), Some("-1"));
}

#[test_case("public static final String NAME = \"x\";", Some("\"x\"") ; "string")]
#[test_case("public static final char SEP = '/';", Some("'/'") ; "character")]
#[test_case("public static final long MAX = 9223372036854775807L;", Some("9223372036854775807L") ; "long")]
#[test_case("public static final float NAN = (0.0f / 0.0f);", Some("(0.0f / 0.0f)") ; "ratio")]
#[test_case("public static final boolean ON = true;", Some("true") ; "boolean")]
#[test_case("public static final Object NONE = null;", Some("null") ; "null")]
#[test_case("public static final int MASK = FLAG_A | FLAG_B;", None ; "expression")]
#[test_case("public int count;", None ; "no initializer")]
fn field_values_are_raw_literals(declaration: &str, expected: Option<&str>) {
    let ty = only_type(&format!("class Constants {{ {declaration} }}"));
    assert_eq!(ty.fields().next().unwrap().value.as_deref(), expected);
}

#[test]
fn initializers_produce_no_members() {
    let ty = only_type(
        r#"
        public class Config {
            static { VALUE = 1; }
            { counter = 0; }
            public static final int VALUE;
        }
        "#,
    );

    assert_eq!(ty.members.len(), 1);
    assert_eq!(ty.members[0].name(), "VALUE");
}

#[test]
fn non_stub_bodies_are_skipped() {
    let ty = only_type(
        r#"
        public class List {
            public int size() {
                int n = 0;
                if (n > 0) { return n; }
                for (int i = 0; i < n; i++) { n = n + i; }
                return 0;
            }
            public java.util.Map<java.lang.String, java.util.List<java.lang.Integer>> index() { return null; }
        }
        "#,
    );

    assert_eq!(ty.methods().count(), 2);
    assert_eq!(
        method(&ty, "index").return_type,
        "java.util.Map<java.lang.String, java.util.List<java.lang.Integer>>"
    );
}

#[test_case("void f() { if (x) { y(); } }" ; "method ending in if")]
#[test_case("void f() { if (x) { y(); } else { z(); } }" ; "method ending in if else")]
#[test_case("void f() { try { y(); } catch (Exception e) { z(); } }" ; "method ending in try catch")]
#[test_case("void f() { while (x) { } y(); }" ; "brace statement before semicolon statement")]
#[test_case("void f() { Runnable r = new Runnable() { public void run() { } }; }" ; "anonymous class")]
#[test_case("static { if (x) { y(); } }" ; "static initializer ending in if")]
fn bodies_may_end_with_a_brace_statement(body: &str) {
    let ty = only_type(&format!("class A {{ {body} public int g() {{ return 0; }} }}"));
    assert_eq!(method(&ty, "g").return_type, "int");
}

#[test]
fn stray_semicolons_between_members_are_ignored() {
    let ty = only_type(
        r#"
        public class A {
            ;
            public void f() { throw new RuntimeException("Stub!"); };
            public int count;;
        }
        "#,
    );

    assert_eq!(ty.members.len(), 2);
    assert_eq!(ty.members[0].name(), "f");
    assert_eq!(ty.members[1].name(), "count");
}

#[test]
fn wildcard_arguments_render_back_to_text() {
    let ty = only_type(
        r#"
        public class Sets {
            public static void addAll(java.util.Collection<? super T> target, java.util.Set<? extends T> source, java.lang.Class<?> kind) { }
        }
        "#,
    );

    let types: Vec<_> = method(&ty, "addAll")
        .base
        .parameters
        .iter()
        .map(|parameter| parameter.parameter_type.as_str())
        .collect();
    assert_eq!(
        types,
        vec![
            "java.util.Collection<? super T>",
            "java.util.Set<? extends T>",
            "java.lang.Class<?>",
        ]
    );
}

#[test]
fn annotated_and_final_parameters() {
    let ty = only_type(
        "class A { public void set(@android.annotation.NonNull final java.lang.String value) { } }",
    );
    assert_eq!(
        method(&ty, "set").base.parameters,
        vec![Parameter::new("value", "java.lang.String")]
    );
}

#[test]
fn comments_are_ignored() {
    let ty = only_type(
        r#"
        /** Docs. */
        public class A {
            // line comment
            public void f(/* inline */ int x) { }
        }
        "#,
    );
    assert_eq!(method(&ty, "f").base.parameters.len(), 1);
}

#[test]
fn syntax_error_reports_location() {
    let error = parse_compile_unit("package p;\npublic class Broken {\n  public void run( { }\n}\n")
        .expect_err("missing parameter list close must fail");

    let diagnostics = match &error {
        ParseError::Syntax(diagnostics) => diagnostics.clone(),
        other => panic!("expected a syntax error, got {other:?}"),
    };
    assert!(!diagnostics.is_empty());
    assert!(diagnostics
        .iter()
        .all(|diagnostic| diagnostic.severity == DiagnosticSeverity::Error));
    assert!(diagnostics
        .iter()
        .any(|diagnostic| diagnostic.location.line == 3));
}

#[test]
fn missing_semicolon_after_package_is_a_syntax_error() {
    let error = parse_compile_unit("package p\nclass A { }").unwrap_err();
    assert!(matches!(error, ParseError::Syntax(_)));
}

#[test]
fn lexical_error_becomes_single_diagnostic() {
    let error = parse_compile_unit("class A { # }").unwrap_err();
    assert!(matches!(error, ParseError::Lex(_)));

    let diagnostics = error.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].to_string(), "Error (1:11) unexpected character '#'");
}

#[test]
fn diagnostic_display_format() {
    let diagnostic = Diagnostic::error(4, 2, "unexpected `}`");
    assert_eq!(diagnostic.to_string(), "Error (4:2) unexpected `}`");
}

#[test]
fn grammar_is_reusable_across_parses() {
    let grammar = StubGrammar::new();
    assert!(grammar.parse("class A { }").is_ok());
    assert!(grammar.parse("class B {").is_err());
    let unit = grammar.parse("package q; class C { }").unwrap();
    assert_eq!(unit.package.name, "q");
    assert_eq!(unit.package.types[0].name, "C");
}
