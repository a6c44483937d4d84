use super::*;
use javastub_model::ApiRoot;
use std::fs;
use test_case::test_case;

const WIDGET: &str = r#"
package android.widget;

public class Widget {
    public Widget(int width) { throw new RuntimeException("Stub!"); }
    public void run() { throw new RuntimeException("Stub!"); }
    public java.util.List<java.lang.String> names(java.util.Map<java.lang.String, java.lang.Integer> index) throws java.io.IOException { throw new RuntimeException("Stub!"); }
    public static final int MAX = 1;
    public static class Holder {
        public Holder() { throw new RuntimeException("Stub!"); }
    }
}
"#;

fn entries(sources: &[(&str, &str)]) -> Vec<Result<SourceEntry, ImportError>> {
    sources
        .iter()
        .map(|(name, text)| Ok(SourceEntry::new(*name, text.as_bytes())))
        .collect()
}

fn import(sources: &[(&str, &str)]) -> ImportOutcome {
    StubImporter::default()
        .import_entries(entries(sources))
        .expect("import should succeed")
}

#[test_case("Foo.java", true ; "plain")]
#[test_case("android/app/Foo.JAVA", true ; "upper case suffix")]
#[test_case("META-INF/MANIFEST.MF", false ; "manifest")]
#[test_case("Foo.class", false ; "class file")]
#[test_case("java", false ; "bare word")]
fn java_source_detection(name: &str, expected: bool) {
    assert_eq!(is_java_source(name), expected);
}

#[test]
fn invalid_utf8_is_an_encoding_error() {
    let entry = SourceEntry::new("Bad.java", vec![0x63, 0xff, 0xfe]);
    let error = entry.text().unwrap_err();
    assert!(matches!(error, ImportError::Encoding { ref entry, .. } if entry == "Bad.java"));
}

#[test]
fn entries_starting_with_a_byte_order_mark_import() {
    let mut contents = vec![0xef, 0xbb, 0xbf];
    contents.extend_from_slice(b"package p;\npublic class A { }\n");
    let outcome = StubImporter::default()
        .import_entries(vec![Ok(SourceEntry::new("p/A.java", contents))])
        .expect("import should succeed");

    assert_eq!(outcome.report.files_parsed, 1);
    assert!(outcome.api.find_type("p.A").is_some());
}

#[test]
fn parameters_only_output_keeps_callables_with_parameters() {
    let outcome = import(&[("android/widget/Widget.java", WIDGET)]);
    let xml = render(&outcome.api, OutputMode::ParametersOnly).unwrap();

    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<api>
  <package name="android.widget">
    <class name="Widget">
      <constructor name="Widget">
        <parameter name="width" type="int"/>
      </constructor>
      <method name="names">
        <parameter name="index" type="java.util.Map&lt;java.lang.String, java.lang.Integer&gt;"/>
      </method>
    </class>
    <class name="Widget.Holder"/>
  </package>
</api>
"#;
    assert_eq!(xml, expected);
}

#[test]
fn full_output_carries_every_attribute() {
    let outcome = import(&[("android/widget/Widget.java", WIDGET)]);
    let xml = render(&outcome.api, OutputMode::Full).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<api>\n"));
    assert!(xml.ends_with("</api>\n"));
    assert!(xml.contains(
        r#"<class name="Widget" extends="java.lang.Object" abstract="false" static="false" final="false" visibility="public" deprecated="not deprecated">"#
    ));
    assert!(xml.contains(
        r#"<constructor name="Widget" type="android.widget.Widget" static="false" final="false" visibility="public" deprecated="not deprecated">"#
    ));
    assert!(xml.contains(
        r#"<method name="run" return="void" abstract="false" native="false" synchronized="false" static="false" final="false" visibility="public" deprecated="not deprecated"/>"#
    ));
    assert!(xml.contains(r#"<exception name="IOException" type="java.io.IOException"/>"#));
    assert!(xml.contains(
        r#"<field name="MAX" type="int" static="true" final="true" volatile="false" transient="false" value="1" visibility="public" deprecated="not deprecated"/>"#
    ));
    assert!(xml.contains(
        r#"<constructor name="Widget.Holder" type="android.widget.Widget.Holder" "#
    ));
}

#[test]
fn package_private_members_have_empty_visibility() {
    let outcome = import(&[("A.java", "class A { int count; }")]);
    let xml = render(&outcome.api, OutputMode::Full).unwrap();
    assert!(xml.contains(r#"<package name="">"#));
    assert!(xml.contains(r#"<field name="count" type="int" static="false" final="false" volatile="false" transient="false" visibility="" deprecated="not deprecated"/>"#));
}

#[test]
fn empty_api_renders_empty_root() {
    let xml = render(&ApiRoot::default(), OutputMode::Full).unwrap();
    assert_eq!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<api/>\n");
}

#[test]
fn json_output_serializes_the_model() {
    let outcome = import(&[("android/widget/Widget.java", WIDGET)]);
    let json = render(&outcome.api, OutputMode::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["packages"][0]["name"], "android.widget");
    assert_eq!(value["packages"][0]["types"][1]["name"], "Widget.Holder");
    assert!(json.ends_with('\n'));
}

#[test]
fn non_java_entries_are_skipped_and_counted() {
    let outcome = import(&[
        ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n"),
        ("a/A.java", "package a; public class A { }"),
        ("a/package.html", "<html></html>"),
    ]);

    assert_eq!(outcome.report.entries_visited, 3);
    assert_eq!(outcome.report.entries_skipped, 2);
    assert_eq!(outcome.report.files_parsed, 1);
    assert_eq!(outcome.report.packages, 1);
    assert_eq!(outcome.report.types, 1);
}

#[test]
fn entries_of_one_package_are_merged() {
    let outcome = import(&[
        ("p/B.java", "package p; public class B { }"),
        ("q/Q.java", "package q; public class Q { }"),
        ("p/A.java", "package p; public class A { }"),
    ]);

    let p = outcome.api.package("p").unwrap();
    let names: Vec<_> = p.types.iter().map(|ty| ty.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(outcome.api.packages.len(), 2);
}

#[test]
fn first_broken_entry_stops_the_import() {
    let sources = [
        ("p/A.java", "package p; public class A { }"),
        ("p/Broken.java", "package p; public class Broken {"),
        ("p/C.java", "package p; public class C { }"),
    ];
    let mut pulled = 0;
    let counted = entries(&sources).into_iter().inspect(|_| pulled += 1);

    let error = StubImporter::default()
        .import_entries(counted)
        .expect_err("broken entry must fail the import");

    match error {
        ImportError::Syntax { entry, diagnostics } => {
            assert_eq!(entry, "p/Broken.java");
            assert!(!diagnostics.is_empty());
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
    assert_eq!(pulled, 2);
}

#[test]
fn source_errors_propagate_unchanged() {
    let failing = vec![
        Ok(SourceEntry::new("A.java", "class A { }")),
        Err(ImportError::Io {
            path: "stubs.jar".into(),
            source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated"),
        }),
    ];
    let error = StubImporter::default().import_entries(failing).unwrap_err();
    assert!(matches!(error, ImportError::Io { .. }));
    assert_eq!(error.location(), "stubs.jar");
}

#[test]
fn framework_filter_drops_support_packages() {
    let config = ImporterConfig {
        framework_only: true,
        ..ImporterConfig::default()
    };
    let outcome = StubImporter::new(config)
        .import_entries(entries(&[
            ("android/app/A.java", "package android.app; public class A { }"),
            (
                "android/support/v4/B.java",
                "package android.support.v4; public class B { }",
            ),
            (
                "android/support/v4/C.java",
                "package android.support.v4; public class C { }",
            ),
        ]))
        .unwrap();

    let names: Vec<_> = outcome
        .api
        .packages
        .iter()
        .map(|package| package.name.as_str())
        .collect();
    assert_eq!(names, vec!["android.app"]);
    assert_eq!(outcome.report.packages_filtered, 1);
}

#[test]
fn directory_entries_are_sorted_and_relative() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("b")).unwrap();
    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::write(dir.path().join("b/B.java"), "package b; class B { }").unwrap();
    fs::write(dir.path().join("a/A.java"), "package a; class A { }").unwrap();
    fs::write(dir.path().join("a/notes.txt"), "ignored").unwrap();

    let collected: Vec<SourceEntry> = directory_entries(dir.path())
        .collect::<Result<_, _>>()
        .unwrap();
    let names: Vec<_> = collected.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["a/A.java", "a/notes.txt", "b/B.java"]);
    assert!(collected[1].contents.is_empty());
    assert_eq!(collected[0].text().unwrap(), "package a; class A { }");
}

#[test]
fn import_path_reads_directories() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("p")).unwrap();
    fs::write(dir.path().join("p/A.java"), "package p; public class A { }").unwrap();

    let outcome = StubImporter::default().import_path(dir.path()).unwrap();
    assert!(outcome.api.find_type("p.A").is_some());
}

#[test]
fn import_path_reports_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.jar");
    let error = StubImporter::default().import_path(&missing).unwrap_err();
    assert!(matches!(error, ImportError::Io { ref path, .. } if path == &missing));
}
