//! Structural model of one parsed suite or resource file
//!
//! A [`ParsedDocument`] is filled by the tokenizer while it walks the file
//! top to bottom, then handed to read-only consumers. Each field follows one
//! of four mutation rules:
//!
//! - single values are overwritten by later writes
//! - lists are appended to, keeping order and duplicates
//! - keyed definitions keep the first entry for a name and report later
//!   ones by returning `false`
//! - keyed lists (variable files, metadata) are replaced wholesale
//!
//! Collections are allocated on first write. Their accessors return `None`
//! until then, so "never written" stays distinguishable from "written".

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::config::KeywordConfig;
use crate::definitions::{KeywordCall, LibraryFile, TestCaseDefinition, UserKeywordDefinition};
use crate::token::{DynamicToken, ParsedToken, strip_bdd_prefix};

#[derive(Debug, Default)]
pub struct ParsedDocument {
    resource_files: Option<Vec<DynamicToken>>,
    variable_files: Option<HashMap<DynamicToken, Box<[DynamicToken]>>>,
    library_files: Option<HashMap<DynamicToken, LibraryFile>>,
    suite_setup: Option<KeywordCall>,
    suite_teardown: Option<KeywordCall>,
    documentation: Option<Vec<DynamicToken>>,
    metadata: Option<HashMap<ParsedToken, Box<[DynamicToken]>>>,
    forced_test_tags: Option<Vec<DynamicToken>>,
    default_test_tags: Option<Vec<DynamicToken>>,
    default_test_setup: Option<KeywordCall>,
    default_test_teardown: Option<KeywordCall>,
    template: Option<ParsedToken>,
    default_test_timeout: Option<DynamicToken>,
    default_test_timeout_message: Option<ParsedToken>,
    variables: Option<HashMap<ParsedToken, DynamicToken>>,
    test_cases: Option<HashMap<ParsedToken, TestCaseDefinition>>,
    keywords: Option<HashMap<DynamicToken, UserKeywordDefinition>>,
}

/// Insert `value` unless `key` is taken; the first definition wins.
fn insert_first<K, V>(map: &mut Option<HashMap<K, V>>, key: K, value: V, what: &str) -> bool
where
    K: std::hash::Hash + Eq + std::fmt::Display,
{
    match map.get_or_insert_with(HashMap::new).entry(key) {
        Entry::Occupied(existing) => {
            tracing::debug!(
                "Duplicate {} {} ignored, keeping the first definition",
                what,
                existing.key()
            );
            false
        }
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
    }
}

impl ParsedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    // Single values

    pub fn set_suite_setup(&mut self, suite_setup: KeywordCall) {
        self.suite_setup = Some(suite_setup);
    }

    pub fn set_suite_teardown(&mut self, suite_teardown: KeywordCall) {
        self.suite_teardown = Some(suite_teardown);
    }

    pub fn set_default_test_setup(&mut self, default_test_setup: KeywordCall) {
        self.default_test_setup = Some(default_test_setup);
    }

    pub fn set_default_test_teardown(&mut self, default_test_teardown: KeywordCall) {
        self.default_test_teardown = Some(default_test_teardown);
    }

    pub fn set_template(&mut self, template: ParsedToken) {
        self.template = Some(template);
    }

    pub fn set_default_test_timeout(&mut self, default_test_timeout: DynamicToken) {
        self.default_test_timeout = Some(default_test_timeout);
    }

    pub fn set_default_test_timeout_message(&mut self, message: ParsedToken) {
        self.default_test_timeout_message = Some(message);
    }

    // Lists

    pub fn add_resource_file(&mut self, resource_file: DynamicToken) {
        self.resource_files
            .get_or_insert_with(Vec::new)
            .push(resource_file);
    }

    pub fn add_documentation(&mut self, documentation: DynamicToken) {
        self.documentation
            .get_or_insert_with(Vec::new)
            .push(documentation);
    }

    pub fn add_forced_test_tag(&mut self, tag: DynamicToken) {
        self.forced_test_tags.get_or_insert_with(Vec::new).push(tag);
    }

    pub fn add_default_test_tag(&mut self, tag: DynamicToken) {
        self.default_test_tags
            .get_or_insert_with(Vec::new)
            .push(tag);
    }

    // Keyed definitions, first one wins

    /// Add a library import keyed by its custom name.
    ///
    /// Returns `false`, leaving the document unchanged, if a library with
    /// that name was already imported.
    pub fn add_library_file(&mut self, library: LibraryFile) -> bool {
        let key = library.custom_name().clone();
        insert_first(&mut self.library_files, key, library, "library")
    }

    /// Add a variable. Returns `false` if the name is already defined.
    pub fn add_variable(&mut self, name: ParsedToken, value: DynamicToken) -> bool {
        insert_first(&mut self.variables, name, value, "variable")
    }

    /// Add a test case. Returns `false` if the name is already defined.
    pub fn add_test_case(&mut self, test_case: TestCaseDefinition) -> bool {
        let key = test_case.sequence_name.clone();
        insert_first(&mut self.test_cases, key, test_case, "test case")
    }

    /// Add a user keyword. Returns `false` if the name is already defined.
    pub fn add_keyword(&mut self, keyword: UserKeywordDefinition) -> bool {
        let key = keyword.sequence_name.clone();
        insert_first(&mut self.keywords, key, keyword, "keyword")
    }

    // Keyed lists, last one wins

    pub fn add_variable_file(&mut self, variable_file: DynamicToken, arguments: Vec<DynamicToken>) {
        self.variable_files
            .get_or_insert_with(HashMap::new)
            .insert(variable_file, arguments.into_boxed_slice());
    }

    pub fn add_metadata(&mut self, key: ParsedToken, values: Vec<DynamicToken>) {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key, values.into_boxed_slice());
    }

    // Accessors

    pub fn resource_files(&self) -> Option<&[DynamicToken]> {
        self.resource_files.as_deref()
    }

    pub fn variable_files(&self) -> Option<&HashMap<DynamicToken, Box<[DynamicToken]>>> {
        self.variable_files.as_ref()
    }

    pub fn library_files(&self) -> Option<&HashMap<DynamicToken, LibraryFile>> {
        self.library_files.as_ref()
    }

    pub fn suite_setup(&self) -> Option<&KeywordCall> {
        self.suite_setup.as_ref()
    }

    pub fn suite_teardown(&self) -> Option<&KeywordCall> {
        self.suite_teardown.as_ref()
    }

    pub fn documentation(&self) -> Option<&[DynamicToken]> {
        self.documentation.as_deref()
    }

    pub fn metadata(&self) -> Option<&HashMap<ParsedToken, Box<[DynamicToken]>>> {
        self.metadata.as_ref()
    }

    pub fn forced_test_tags(&self) -> Option<&[DynamicToken]> {
        self.forced_test_tags.as_deref()
    }

    pub fn default_test_tags(&self) -> Option<&[DynamicToken]> {
        self.default_test_tags.as_deref()
    }

    pub fn default_test_setup(&self) -> Option<&KeywordCall> {
        self.default_test_setup.as_ref()
    }

    pub fn default_test_teardown(&self) -> Option<&KeywordCall> {
        self.default_test_teardown.as_ref()
    }

    pub fn template(&self) -> Option<&ParsedToken> {
        self.template.as_ref()
    }

    pub fn default_test_timeout(&self) -> Option<&DynamicToken> {
        self.default_test_timeout.as_ref()
    }

    pub fn default_test_timeout_message(&self) -> Option<&ParsedToken> {
        self.default_test_timeout_message.as_ref()
    }

    pub fn variables(&self) -> Option<&HashMap<ParsedToken, DynamicToken>> {
        self.variables.as_ref()
    }

    pub fn test_cases(&self) -> Option<&HashMap<ParsedToken, TestCaseDefinition>> {
        self.test_cases.as_ref()
    }

    pub fn keywords(&self) -> Option<&HashMap<DynamicToken, UserKeywordDefinition>> {
        self.keywords.as_ref()
    }

    /// Number of keyed definitions (libraries, variables, test cases and
    /// keywords) held by the document.
    pub fn definition_count(&self) -> usize {
        self.library_files.as_ref().map_or(0, HashMap::len)
            + self.variables.as_ref().map_or(0, HashMap::len)
            + self.test_cases.as_ref().map_or(0, HashMap::len)
            + self.keywords.as_ref().map_or(0, HashMap::len)
    }

    /// Find the user keyword invoked by `call`.
    ///
    /// An exact name wins over a keyword with embedded arguments. Among
    /// several embedded-argument matches the one defined first in the file is
    /// returned. If nothing matches and prefix stripping is enabled, the
    /// lookup is retried without a leading Given/When/Then/And.
    pub fn find_keyword(
        &self,
        call: &str,
        config: &KeywordConfig,
    ) -> Option<&UserKeywordDefinition> {
        let keywords = self.keywords.as_ref()?;
        let lookup = |name: &str| {
            keywords.get(name).or_else(|| {
                keywords
                    .values()
                    .filter(|keyword| keyword.matches(name))
                    .min_by_key(|keyword| keyword.sequence_name.source_offset())
            })
        };

        lookup(call).or_else(|| {
            if !config.strip_bdd_prefixes {
                return None;
            }
            strip_bdd_prefix(call).and_then(lookup)
        })
    }
}
