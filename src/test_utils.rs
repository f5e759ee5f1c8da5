//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// One line of a generated schema source
    #[derive(Debug, Clone)]
    pub enum SchemaLine {
        /// Starts with `import`
        Import(String),
        /// Starts with `message`
        Message(String),
        /// Starts with neither keyword
        Other(String),
    }

    impl SchemaLine {
        /// Line text without terminator
        pub fn text(&self) -> String {
            match self {
                Self::Import(s) | Self::Message(s) | Self::Other(s) => s.clone(),
            }
        }

        /// Whether this line is an import
        pub fn is_import(&self) -> bool {
            matches!(self, Self::Import(_))
        }

        /// Whether this line opens a message
        pub fn is_message(&self) -> bool {
            matches!(self, Self::Message(_))
        }
    }

    /// Generate an `import` line
    pub fn import_line() -> impl Strategy<Value = SchemaLine> {
        "import (public )?\"[a-z][a-z0-9_/]{0,15}\\.proto\";".prop_map(SchemaLine::Import)
    }

    /// Generate a `message` line
    pub fn message_line() -> impl Strategy<Value = SchemaLine> {
        "message [A-Z][A-Za-z0-9]{0,10} \\{( required int32 x = 1;)? \\}?"
            .prop_map(SchemaLine::Message)
    }

    /// Generate a line starting with neither `import` nor `message`
    pub fn other_line() -> impl Strategy<Value = SchemaLine> {
        prop_oneof![
            Just(String::new()),
            "syntax = \"proto[23]\";",
            "package [a-z]{1,8};",
            "option [a-z ]{0,12}= [a-z0-9]{1,6};",
            "// [ a-z0-9=;\"]{0,20}",
            "  (import|message) [a-z]{0,8}",
            "\\}",
        ]
        .prop_map(SchemaLine::Other)
    }

    /// Generate a whole schema document as a list of lines
    pub fn schema_document() -> impl Strategy<Value = Vec<SchemaLine>> {
        prop::collection::vec(
            prop_oneof![
                2 => import_line(),
                1 => message_line(),
                3 => other_line(),
            ],
            0..24,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_other_lines_avoid_keywords(line in other_line()) {
            let text = line.text();
            prop_assert!(!text.starts_with("import"));
            prop_assert!(!text.starts_with("message"));
            prop_assert!(!text.contains('\n') && !text.contains('\r'));
        }

        #[test]
        fn test_import_lines_start_with_keyword(line in import_line()) {
            prop_assert!(line.text().starts_with("import"));
            prop_assert!(line.is_import());
        }

        #[test]
        fn test_message_lines_start_with_keyword(line in message_line()) {
            prop_assert!(line.text().starts_with("message"));
            prop_assert!(line.is_message());
        }
    }
}
