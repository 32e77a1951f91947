//! FILENAME: core/exhibit-engine/src/naming.rs
//! PURPOSE: Translates engine names to the host's naming convention.
//! CONTEXT: The engine speaks snake_case ("font_bold"); hosts expect
//! capitalized words ("FontBold"). Every property access crossing into a
//! host goes through `host_name`.

/// "font_bold" -> "FontBold", "list" -> "List".
pub fn host_name(engine_name: &str) -> String {
    engine_name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// "FontBold" -> "font_bold", "InCellDropdown" -> "in_cell_dropdown".
pub fn engine_name(host_name: &str) -> String {
    let mut out = String::with_capacity(host_name.len() + 4);
    for (i, c) in host_name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Host-visible name of the control bound to a dimension.
pub fn control_name(dimension: &str) -> String {
    format!("{}_dropdown", dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_name() {
        assert_eq!(host_name("font_bold"), "FontBold");
        assert_eq!(host_name("list"), "List");
        assert_eq!(host_name("value"), "Value");
        assert_eq!(host_name("in_cell_dropdown"), "InCellDropdown");
        assert_eq!(host_name("_leading__double_"), "LeadingDouble");
    }

    #[test]
    fn test_engine_name() {
        assert_eq!(engine_name("FontBold"), "font_bold");
        assert_eq!(engine_name("Value"), "value");
        assert_eq!(engine_name("InCellDropdown"), "in_cell_dropdown");
    }

    #[test]
    fn test_names_roundtrip() {
        for name in ["font_bold", "list", "value", "name", "show_input"] {
            assert_eq!(engine_name(&host_name(name)), name);
        }
    }

    #[test]
    fn test_control_name() {
        assert_eq!(control_name("Line"), "Line_dropdown");
    }
}
