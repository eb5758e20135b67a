use std::{collections::HashSet, sync::LazyLock};

///
/// RESERVED_WORDS
/// names that cannot become Rust identifiers in generated code
///

static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    // https://doc.rust-lang.org/reference/keywords.html
    [
        "_", "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn",
        "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
        "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
        "unsafe", "use", "where", "while", "async", "await", "dyn", "abstract", "become", "box",
        "do", "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try",
    ]
    .into_iter()
    .collect()
});

/// Associated items emitted on every generated enum.
const RESERVED_VARIANTS: [&str; 7] = [
    "NAME", "NAMES", "VARIANTS", "WIDTH", "from_u8", "name", "to_u8",
];

/// Built-in type names that generated modules refer to unqualified.
const RESERVED_TYPES: [&str; 17] = [
    "bool", "char", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "str", "u8", "u16",
    "u32", "u64", "u128", "usize",
];

/// Check if an identifier is a reserved word.
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(word)
}

/// Check if a variant name would shadow a generated associated item.
pub fn is_reserved_variant(word: &str) -> bool {
    RESERVED_VARIANTS.contains(&word)
}

/// Check if a type name would shadow a Rust primitive type.
pub fn is_reserved_type(word: &str) -> bool {
    RESERVED_TYPES.contains(&word)
}
