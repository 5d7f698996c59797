//! Token roles assigned by the tokenizer

use std::fmt;

use serde::{Deserialize, Serialize};

/// The role a token plays within its source file.
///
/// The tokenizer assigns exactly one classifier to each token it produces.
/// Tokens that were never classified report [`ArgumentClassifier::Ignored`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentClassifier {
    /// Not significant to the structural model
    #[default]
    Ignored,
    /// Comment cell (`# ...`)
    Comment,
    /// Table header (`*** Settings ***` etc.)
    Table,
    /// Setting name in the Settings table
    SettingKey,
    /// Variable name in the Variables table
    VariableKey,
    /// Name of a test case starting a new definition
    NewTestcase,
    /// Name of a user keyword starting a new definition
    NewKeyword,
    /// Setting value
    SettingVal,
    /// File named by `Resource`, `Library` or `Variables`
    SettingFile,
    /// The `WITH NAME` marker of a library import
    SettingFileWithNameKey,
    /// Argument passed to an imported library or variable file
    SettingFileArg,
    /// Custom name given after `WITH NAME`
    SettingFileWithNameValue,
    /// Variable value
    VariableVal,
    /// Variable assigned from a keyword's return value
    KeywordLvalue,
    /// Part of a `:FOR` loop header
    ForPart,
    /// Name of the keyword being called
    KeywordCall,
    /// Argument to a keyword call
    KeywordArg,
}

impl ArgumentClassifier {
    /// Tag used in diagnostic renderings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentClassifier::Ignored => "IGNORED",
            ArgumentClassifier::Comment => "COMMENT",
            ArgumentClassifier::Table => "TABLE",
            ArgumentClassifier::SettingKey => "SETTING_KEY",
            ArgumentClassifier::VariableKey => "VARIABLE_KEY",
            ArgumentClassifier::NewTestcase => "NEW_TESTCASE",
            ArgumentClassifier::NewKeyword => "NEW_KEYWORD",
            ArgumentClassifier::SettingVal => "SETTING_VAL",
            ArgumentClassifier::SettingFile => "SETTING_FILE",
            ArgumentClassifier::SettingFileWithNameKey => "SETTING_FILE_WITH_NAME_KEY",
            ArgumentClassifier::SettingFileArg => "SETTING_FILE_ARG",
            ArgumentClassifier::SettingFileWithNameValue => "SETTING_FILE_WITH_NAME_VALUE",
            ArgumentClassifier::VariableVal => "VARIABLE_VAL",
            ArgumentClassifier::KeywordLvalue => "KEYWORD_LVALUE",
            ArgumentClassifier::ForPart => "FOR_PART",
            ArgumentClassifier::KeywordCall => "KEYWORD_CALL",
            ArgumentClassifier::KeywordArg => "KEYWORD_ARG",
        }
    }
}

impl fmt::Display for ArgumentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
