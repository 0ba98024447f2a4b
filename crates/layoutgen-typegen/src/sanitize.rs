//! Turning user-supplied names into TypeScript identifier fragments.

/// Reduce `raw` to a fragment usable inside a generated identifier.
///
/// Leading and trailing characters that are not ASCII letters or `_` are
/// stripped; interior characters that are not ASCII letters, digits or `_`
/// are removed. The result may be empty. Applying it twice gives the same
/// result as applying it once.
pub fn sanitize(raw: &str) -> String {
    raw.trim_matches(|c: char| !is_edge_char(c))
        .chars()
        .filter(|&c| is_inner_char(c))
        .collect()
}

fn is_edge_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_inner_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_edges_and_interior() {
        assert_eq!(sanitize("Order Items 2"), "OrderItems");
        assert_eq!(sanitize("2024 Sales"), "Sales");
        assert_eq!(sanitize("Line_Item-3x"), "Line_Item3x");
        assert_eq!(sanitize("_private_"), "_private_");
    }

    #[test]
    fn keeps_valid_names() {
        assert_eq!(sanitize("Customer"), "Customer");
        assert_eq!(sanitize("API_Customer2b"), "API_Customer2b");
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(sanitize("Café Menü"), "CafMen");
        assert_eq!(sanitize("été"), "t");
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("123"), "");
        assert_eq!(sanitize("  --  "), "");
    }

    #[test]
    fn idempotent() {
        for raw in [
            "Order Items 2",
            "2024 Sales",
            "Line_Item-3x",
            "a 1 b",
            "x::y",
            "9 lives_",
            "Café",
        ] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "not idempotent for {raw:?}");
        }
    }
}
