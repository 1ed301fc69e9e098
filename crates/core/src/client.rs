//! Client display helpers.

/// Join the non-empty address components with `", "`.
///
/// Components are trimmed first; blank parts contribute nothing, so a
/// client with only a city and state renders as `"Austin, TX"` rather
/// than `", , Austin, TX, "`.
///
/// # Examples
///
/// ```
/// use sitedesk_core::client::full_address;
/// assert_eq!(
///     full_address(&["12 Main St", "", "Austin", "TX", "78701"]),
///     "12 Main St, Austin, TX, 78701"
/// );
/// assert_eq!(full_address(&["", "", "", "", ""]), "");
/// ```
pub fn full_address(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
