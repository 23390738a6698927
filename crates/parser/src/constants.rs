//! Shared constants for Go syntax-tree traversal
//!
//! Node kinds and field names of the tree-sitter Go grammar used by the
//! scanner, the type printer and the declaration extractor.

// ============================================================================
// Node Kind Constants
// ============================================================================

pub(crate) mod node_kinds {
    // Top level
    pub const SOURCE_FILE: &str = "source_file";
    pub const PACKAGE_CLAUSE: &str = "package_clause";
    pub const COMMENT: &str = "comment";

    // Imports
    pub const IMPORT_DECLARATION: &str = "import_declaration";
    pub const IMPORT_SPEC_LIST: &str = "import_spec_list";
    pub const IMPORT_SPEC: &str = "import_spec";

    // Type declarations
    pub const TYPE_DECLARATION: &str = "type_declaration";
    pub const TYPE_SPEC: &str = "type_spec";
    pub const TYPE_ALIAS: &str = "type_alias";
    pub const TYPE_PARAMETER_DECLARATION: &str = "type_parameter_declaration";

    // Interfaces
    pub const INTERFACE_TYPE: &str = "interface_type";
    pub const METHOD_ELEM: &str = "method_elem";
    pub const METHOD_SPEC: &str = "method_spec";

    // Signatures
    pub const PARAMETER_LIST: &str = "parameter_list";
    pub const PARAMETER_DECLARATION: &str = "parameter_declaration";
    pub const VARIADIC_PARAMETER_DECLARATION: &str = "variadic_parameter_declaration";

    // Types
    pub const TYPE_IDENTIFIER: &str = "type_identifier";
    pub const IDENTIFIER: &str = "identifier";
    pub const PACKAGE_IDENTIFIER: &str = "package_identifier";
    pub const FIELD_IDENTIFIER: &str = "field_identifier";
    pub const QUALIFIED_TYPE: &str = "qualified_type";
    pub const POINTER_TYPE: &str = "pointer_type";
    pub const SLICE_TYPE: &str = "slice_type";
    pub const ARRAY_TYPE: &str = "array_type";
    pub const IMPLICIT_LENGTH_ARRAY_TYPE: &str = "implicit_length_array_type";
    pub const MAP_TYPE: &str = "map_type";
    pub const CHANNEL_TYPE: &str = "channel_type";
    pub const FUNCTION_TYPE: &str = "function_type";
    pub const GENERIC_TYPE: &str = "generic_type";
    pub const TYPE_ARGUMENTS: &str = "type_arguments";
    pub const TYPE_ELEM: &str = "type_elem";
    pub const TYPE_CONSTRAINT: &str = "type_constraint";
    pub const NEGATED_TYPE: &str = "negated_type";
    pub const PARENTHESIZED_TYPE: &str = "parenthesized_type";
    pub const STRUCT_TYPE: &str = "struct_type";
    pub const FIELD_DECLARATION_LIST: &str = "field_declaration_list";
    pub const FIELD_DECLARATION: &str = "field_declaration";
}

// ============================================================================
// Field Name Constants
// ============================================================================

pub(crate) mod field_names {
    pub const NAME: &str = "name";
    pub const PATH: &str = "path";
    pub const TYPE: &str = "type";
    pub const TYPE_PARAMETERS: &str = "type_parameters";
    pub const TYPE_ARGUMENTS: &str = "type_arguments";
    pub const PARAMETERS: &str = "parameters";
    pub const RESULT: &str = "result";
    pub const PACKAGE: &str = "package";
    pub const ELEMENT: &str = "element";
    pub const LENGTH: &str = "length";
    pub const KEY: &str = "key";
    pub const VALUE: &str = "value";
    pub const TAG: &str = "tag";
}

// ============================================================================
// Punctuation
// ============================================================================

pub(crate) mod punctuation {
    pub const ARROW: &str = "<-";
    pub const STAR: &str = "*";
    pub const ELLIPSIS: &str = "...";
    pub const BLANK: &str = "_";
}
