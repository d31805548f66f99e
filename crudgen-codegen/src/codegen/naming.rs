//! Naming utilities for code generation

use heck::{ToLowerCamelCase, ToPascalCase};

/// Convert a raw identifier to a type name (PascalCase)
/// e.g., "user_account" -> "UserAccount"
pub fn to_pascal_case(raw: &str) -> String {
    raw.to_pascal_case()
}

/// Convert a raw identifier to a field name (camelCase)
/// e.g., "created_at" -> "createdAt"
pub fn to_camel_case(raw: &str) -> String {
    raw.to_lower_camel_case()
}

/// Convert a raw identifier to a URL path segment (lowercase, no delimiters)
/// e.g., "order_item" -> "orderitem"
pub fn to_lower_path(raw: &str) -> String {
    raw.to_pascal_case().to_lowercase()
}

/// Entity name stem shared by every artifact of a table
pub fn to_entity_name(table_name: &str) -> String {
    prefix_leading_digit(to_pascal_case(table_name))
}

/// Java identifiers cannot start with a digit, e.g. "2faCodes" -> "_2faCodes"
fn prefix_leading_digit(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

/// Accessor generated by Lombok for a field, e.g. "orderId" -> "getOrderId"
pub fn to_getter_name(field_name: &str) -> String {
    let mut chars = field_name.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

/// Check if a name is a Java reserved word or literal
pub fn is_java_keyword(name: &str) -> bool {
    matches!(
        name,
        "abstract"
            | "assert"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extends"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "instanceof"
            | "int"
            | "interface"
            | "long"
            | "native"
            | "new"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "strictfp"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "try"
            | "void"
            | "volatile"
            | "while"
            | "true"
            | "false"
            | "null"
            | "_"
    )
}

/// Field name for a column, suffixed with `_` if it collides with a keyword
///
/// Names starting with a digit get a leading `_`.
pub fn escape_field_name(column_name: &str) -> String {
    let camel = prefix_leading_digit(to_camel_case(column_name));
    if is_java_keyword(&camel) {
        format!("{}_", camel)
    } else {
        camel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("users"), "Users");
        assert_eq!(to_pascal_case("user_account"), "UserAccount");
        assert_eq!(to_pascal_case("order-item"), "OrderItem");
        assert_eq!(to_pascal_case("orderItem"), "OrderItem");
        assert_eq!(to_pascal_case("ORDER_ITEM"), "OrderItem");
    }

    #[test]
    fn test_pascal_case_is_stable_on_pascal_input() {
        for name in ["UserAccount", "OrderItem", "Users", "HttpLog", "A"] {
            let once = to_pascal_case(name);
            assert_eq!(to_pascal_case(&once), once);
            assert_eq!(once, name);
        }
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("created_at"), "createdAt");
        assert_eq!(to_camel_case("CreatedAt"), "createdAt");
        assert_eq!(to_camel_case("first-name"), "firstName");
        assert_eq!(to_camel_case("id"), "id");
    }

    #[test]
    fn test_to_lower_path() {
        assert_eq!(to_lower_path("order_item"), "orderitem");
        assert_eq!(to_lower_path("OrderItem"), "orderitem");
        assert_eq!(to_lower_path("users"), "users");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(to_pascal_case(""), "");
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_lower_path(""), "");
        assert_eq!(to_pascal_case("x"), "X");
        assert_eq!(to_camel_case("X"), "x");
        assert_eq!(to_pascal_case("___"), "");
    }

    #[test]
    fn test_getter_name() {
        assert_eq!(to_getter_name("id"), "getId");
        assert_eq!(to_getter_name("orderId"), "getOrderId");
        assert_eq!(to_getter_name("class_"), "getClass_");
    }

    #[test]
    fn test_escape_field_name() {
        assert_eq!(escape_field_name("class"), "class_");
        assert_eq!(escape_field_name("default"), "default_");
        assert_eq!(escape_field_name("user_name"), "userName");
    }

    #[test]
    fn test_leading_digit_is_prefixed() {
        assert_eq!(to_entity_name("2fa_codes"), "_2faCodes");
        assert_eq!(to_entity_name("order_item"), "OrderItem");
        assert_eq!(escape_field_name("2nd_line"), "_2ndLine");
        assert_eq!(to_getter_name(&escape_field_name("2nd_line")), "get_2ndLine");
        assert_eq!(to_lower_path("2fa_codes"), "2facodes");
    }
}
