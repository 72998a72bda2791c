//! Identifier normalization shared by the parser and the rewrite engine.

/// Characters stripped from names before they are compared or stored.
const QUOTE_CHARS: [char; 5] = ['"', '`', '\'', '[', ']'];

/// Returns `value` with every quoting character removed.
///
/// `` `t_order`.`user_id` `` becomes `t_order.user_id`.
#[must_use]
pub fn exact_value(value: &str) -> String {
    value.chars().filter(|c| !QUOTE_CHARS.contains(c)).collect()
}
