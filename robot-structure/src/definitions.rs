//! Definitions and calls collected from a suite file

use crate::token::{DynamicToken, ParsedToken};

/// A keyword invocation: the keyword name followed by its arguments
#[derive(Debug, Clone)]
pub struct KeywordCall {
    pub keyword: ParsedToken,
    pub arguments: Vec<DynamicToken>,
}

impl KeywordCall {
    pub fn new(keyword: ParsedToken, arguments: Vec<DynamicToken>) -> Self {
        Self { keyword, arguments }
    }

    /// Character offset just past the last token of the call.
    pub fn end_offset(&self) -> usize {
        self.arguments
            .last()
            .map_or_else(|| self.keyword.end_offset(), |arg| arg.end_offset())
    }
}

/// A `Library` import from the Settings table
#[derive(Debug, Clone)]
pub struct LibraryFile {
    /// Library name or path as written
    pub real_name: DynamicToken,
    /// Name given with `WITH NAME`, if any
    pub custom_name: Option<DynamicToken>,
    pub arguments: Vec<DynamicToken>,
}

impl LibraryFile {
    pub fn new(real_name: DynamicToken) -> Self {
        Self {
            real_name,
            custom_name: None,
            arguments: Vec::new(),
        }
    }

    pub fn with_custom_name(mut self, custom_name: DynamicToken) -> Self {
        self.custom_name = Some(custom_name);
        self
    }

    pub fn with_arguments(mut self, arguments: Vec<DynamicToken>) -> Self {
        self.arguments = arguments;
        self
    }

    /// The name keywords from this library are qualified with.
    pub fn custom_name(&self) -> &DynamicToken {
        self.custom_name.as_ref().unwrap_or(&self.real_name)
    }
}

/// A test case from the Test Cases table
#[derive(Debug, Clone)]
pub struct TestCaseDefinition {
    pub sequence_name: ParsedToken,
    pub steps: Vec<KeywordCall>,
}

impl TestCaseDefinition {
    pub fn new(sequence_name: ParsedToken) -> Self {
        Self {
            sequence_name,
            steps: Vec::new(),
        }
    }
}

/// A user keyword from the Keywords table
#[derive(Debug, Clone)]
pub struct UserKeywordDefinition {
    /// Keyword name, possibly with embedded `${...}` arguments
    pub sequence_name: DynamicToken,
    pub steps: Vec<KeywordCall>,
}

impl UserKeywordDefinition {
    pub fn new(sequence_name: DynamicToken) -> Self {
        Self {
            sequence_name,
            steps: Vec::new(),
        }
    }

    /// Whether `call` invokes this keyword.
    pub fn matches(&self, call: &str) -> bool {
        self.sequence_name.matches_keyword_call(call)
    }
}
