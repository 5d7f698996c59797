//! Integration tests for robot-structure

use robot_structure::classifier::ArgumentClassifier;
use robot_structure::classifier::ArgumentClassifier as C;
use robot_structure::config::Config;
use robot_structure::definitions::{
    KeywordCall, LibraryFile, TestCaseDefinition, UserKeywordDefinition,
};
use robot_structure::diagnostics::{DefinitionKind, Diagnostic, duplicate_definition};
use robot_structure::document::ParsedDocument;
use robot_structure::store::DocumentStore;
use robot_structure::token::{DynamicToken, ParsedToken, RawToken, Resolution};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Send library logs to the test output, filtered by `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Minimal stand-in for the tokenizer: finds `cell` on `line` of `source`
/// and returns its absolute character offset.
fn offset_of(source: &str, line: usize, cell: &str) -> i64 {
    let line_start: usize = source
        .lines()
        .take(line)
        .map(|l| l.chars().count() + 1)
        .sum();
    let text = source.lines().nth(line).unwrap();
    let byte_col = text.find(cell).unwrap();
    (line_start + text[..byte_col].chars().count()) as i64
}

fn cell(source: &str, line: usize, text: &str, classification: ArgumentClassifier) -> ParsedToken {
    RawToken::new(text, offset_of(source, line, text))
        .unwrap()
        .classify(classification)
}

fn dynamic(
    source: &str,
    line: usize,
    text: &str,
    classification: ArgumentClassifier,
) -> DynamicToken {
    cell(source, line, text, classification).into()
}

const SUITE: &str = "\
*** Settings ***
Library    SeleniumLibrary    timeout=5    WITH NAME    Browser
Resource    common.robot
Variables    vars.py    staging
Suite Setup    Open Browser To Login Page
Documentation    Login tests
...    for the demo app
Force Tags    smoke
Test Timeout    1 minute

*** Variables ***
${SERVER}    localhost:7272
${SERVER}    example.com

*** Test Cases ***
Valid Login
    Given browser is opened to login page
    When User \"demo\" logs in with password \"mode\"
    Then welcome page should be open

*** Keywords ***
Browser Is Opened To Login Page
    Open Browser To Login Page
User \"${username}\" logs in with password \"${password}\"
    Input Username    ${username}
welcome page should be open
    Title Should Be    Welcome Page
";

/// Populate a document the way the tokenizer would, in source order.
fn parse_suite(source: &str) -> (ParsedDocument, Vec<Diagnostic>) {
    init_tracing();
    let config = Config::default();
    let mut doc = ParsedDocument::new();
    let mut diagnostics = Vec::new();

    let library = LibraryFile::new(dynamic(source, 1, "SeleniumLibrary", C::SettingFile))
        .with_arguments(vec![dynamic(source, 1, "timeout=5", C::SettingFileArg)])
        .with_custom_name(dynamic(source, 1, "Browser", C::SettingFileWithNameValue));
    assert!(doc.add_library_file(library));

    doc.add_resource_file(dynamic(source, 2, "common.robot", C::SettingFile));
    doc.add_variable_file(
        dynamic(source, 3, "vars.py", C::SettingFile),
        vec![dynamic(source, 3, "staging", C::SettingFileArg)],
    );
    doc.set_suite_setup(KeywordCall::new(
        cell(source, 4, "Open Browser To Login Page", C::KeywordCall),
        Vec::new(),
    ));
    doc.add_documentation(dynamic(source, 5, "Login tests", C::SettingVal));
    doc.add_documentation(dynamic(source, 6, "for the demo app", C::SettingVal));
    doc.add_forced_test_tag(dynamic(source, 7, "smoke", C::SettingVal));
    doc.set_default_test_timeout(dynamic(source, 8, "1 minute", C::SettingVal));

    for (line, value) in [(11, "localhost:7272"), (12, "example.com")] {
        let name = cell(source, line, "${SERVER}", C::VariableKey);
        let value = dynamic(source, line, value, C::VariableVal);
        if !doc.add_variable(name.clone(), value) {
            diagnostics.extend(duplicate_definition(
                DefinitionKind::Variable,
                &name,
                &config.diagnostics,
            ));
        }
    }

    let mut test_case = TestCaseDefinition::new(cell(source, 15, "Valid Login", C::NewTestcase));
    for line in 16..=18 {
        let text = source.lines().nth(line).unwrap().trim();
        let keyword = cell(source, line, text, C::KeywordCall);
        test_case.steps.push(KeywordCall::new(keyword, Vec::new()));
    }
    assert!(doc.add_test_case(test_case));

    for line in [21, 23, 25] {
        let text = source.lines().nth(line).unwrap();
        let keyword = UserKeywordDefinition::new(dynamic(source, line, text, C::NewKeyword));
        assert!(doc.add_keyword(keyword));
    }

    (doc, diagnostics)
}

#[test]
fn test_parse_realistic_suite() {
    let (doc, diagnostics) = parse_suite(SUITE);

    let libraries = doc.library_files().unwrap();
    let browser = libraries.get("Browser").unwrap();
    assert_eq!(browser.real_name.text(), "SeleniumLibrary");
    assert_eq!(browser.arguments[0].text(), "timeout=5");

    assert_eq!(doc.resource_files().unwrap()[0].text(), "common.robot");
    let vars_args = doc.variable_files().unwrap().get("vars.py").unwrap();
    assert_eq!(vars_args[0].text(), "staging");
    assert_eq!(
        doc.suite_setup().unwrap().keyword.text(),
        "Open Browser To Login Page"
    );

    let docs: Vec<_> = doc
        .documentation()
        .unwrap()
        .iter()
        .map(|t| t.text())
        .collect();
    assert_eq!(docs, vec!["Login tests", "for the demo app"]);
    assert_eq!(doc.default_test_timeout().unwrap().text(), "1 minute");
    assert!(doc.default_test_tags().is_none());
    assert!(doc.metadata().is_none());

    // First ${SERVER} definition wins, the second becomes a diagnostic
    let server = doc.variables().unwrap().get("${SERVER}").unwrap();
    assert_eq!(server.text(), "localhost:7272");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].start as i64,
        offset_of(SUITE, 12, "${SERVER}")
    );
    assert_eq!(diagnostics[0].end - diagnostics[0].start, "${SERVER}".len());

    assert_eq!(doc.definition_count(), 6);
}

#[test]
fn test_offsets_point_into_source() {
    let (doc, _) = parse_suite(SUITE);
    let chars: Vec<char> = SUITE.chars().collect();

    let test_case = doc.test_cases().unwrap().get("Valid Login").unwrap();
    for step in &test_case.steps {
        let span: String = chars[step.keyword.source_offset()..step.keyword.end_offset()]
            .iter()
            .collect();
        assert_eq!(span, step.keyword.text());
    }
}

#[test]
fn test_resolve_test_steps_to_keywords() {
    let (doc, _) = parse_suite(SUITE);
    let config = Config::default();
    let test_case = doc.test_cases().unwrap().get("Valid Login").unwrap();

    let resolved: Vec<_> = test_case
        .steps
        .iter()
        .map(|step| {
            doc.find_keyword(step.keyword.text(), &config.keywords)
                .map(|keyword| keyword.sequence_name.text())
        })
        .collect();

    assert_eq!(
        resolved,
        vec![
            None, // case differs from "Browser Is Opened To Login Page"
            Some("User \"${username}\" logs in with password \"${password}\""),
            Some("welcome page should be open"),
        ]
    );
}

#[test]
fn test_bdd_prefix_stripping_can_be_disabled() {
    let (doc, _) = parse_suite(SUITE);
    let config = Config::from_init_options(Some(serde_json::json!({
        "keywords": { "strip_bdd_prefixes": false }
    })));

    assert!(
        doc.find_keyword("Then welcome page should be open", &config.keywords)
            .is_none()
    );
    assert!(
        doc.find_keyword("welcome page should be open", &config.keywords)
            .is_some()
    );
}

#[test]
fn test_published_document_resolves_across_threads() {
    let store = std::sync::Arc::new(DocumentStore::new());
    let uri = Url::parse("file:///project/login.robot").unwrap();
    let (doc, _) = parse_suite(SUITE);
    store.publish(uri.clone(), doc);

    let handles: Vec<_> = ["alice", "bob", "carol"]
        .into_iter()
        .map(|user| {
            let store = std::sync::Arc::clone(&store);
            let uri = uri.clone();
            std::thread::spawn(move || {
                let doc = store.get(&uri).unwrap();
                let call = format!("When User \"{user}\" logs in with password \"x\"");
                let keyword = doc.find_keyword(&call, &Default::default()).unwrap();
                keyword
                    .sequence_name
                    .resolve(Resolution::Keyword(keyword.sequence_name.text().to_owned()))
                    .is_ok()
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|resolved| *resolved)
        .count();
    // the slot is set once, whichever reader gets there first
    assert_eq!(successes, 1);

    let doc = store.get(&uri).unwrap();
    let keyword = doc
        .keywords()
        .unwrap()
        .get("User \"${username}\" logs in with password \"${password}\"")
        .unwrap();
    assert!(keyword.sequence_name.is_resolved());
    assert!(store.close(&uri));
}

#[test]
fn test_token_construction_errors() {
    assert!(ParsedToken::new("Log", -1).is_err());
    assert!(RawToken::from_cell(None, 0).is_err());

    let empty = ParsedToken::new("", 0).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.end_offset(), 0);
}
