//! Narrative template rendering.
//!
//! Templates from `duel-core` use `{0}` for the caster and `{k}` for the
//! k-th target. Rendering substitutes display names; unknown placeholders
//! are left as written.

/// Replace every `{n}` in `template` with `names[n]`.
pub fn render(template: &str, names: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            names.get(index).map(|name| (*name, close))
        });
        match substituted {
            Some((name, close)) => {
                out.push_str(name);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_caster_and_targets() {
        let line = render("{0} used Gore I! {1} took 4 damage.", &["Boar", "Viper"]);
        assert_eq!(line, "Boar used Gore I! Viper took 4 damage.");
    }

    #[test]
    fn leaves_unknown_placeholders() {
        assert_eq!(render("{3} and {x} and {", &["A"]), "{3} and {x} and {");
    }

    #[test]
    fn handles_multibyte_names() {
        assert_eq!(render("{1}!", &["a", "Ölwyn"]), "Ölwyn!");
    }
}
