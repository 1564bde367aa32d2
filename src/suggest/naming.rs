//! Name and snippet synthesis for suggested relationships

/// Singularize a relationship name by stripping one trailing `s`
pub(super) fn singularize(name: &str) -> &str {
    name.strip_suffix('s').unwrap_or(name)
}

/// Derive the suggested relationship name from the first hop and the
/// target's plural form.
///
/// Paths of three or more hops use the same rule; middle hops are not
/// folded into the name.
pub(super) fn suggest_name(first_relationship: &str, target_plural: &str) -> String {
    format!("{}_{}", singularize(first_relationship), target_plural)
}

/// Ready-to-paste declaration for the suggested relationship
pub(super) fn snippet(name: &str, target: &str, through_path: &str) -> String {
    format!(
        "relationships:\n  {name}:\n    type: has_many\n    target: {target}\n    through: {through_path}\n"
    )
}
