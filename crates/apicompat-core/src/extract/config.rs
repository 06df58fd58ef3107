//! Extractor configuration.

/// Default visibility predicate: the name starts with an uppercase letter.
///
/// # Example
///
/// ```
/// use apicompat_core::extract::is_exported;
///
/// assert!(is_exported("MyInt"));
/// assert!(is_exported("Ωmega"));
/// assert!(!is_exported("myInt"));
/// assert!(!is_exported("_Hidden"));
/// assert!(!is_exported(""));
/// ```
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Predicate deciding which declared names are part of the public interface.
#[derive(Debug, Clone, Copy, Default)]
pub enum Visibility {
    /// First character is uppercase (see [`is_exported`])
    #[default]
    UppercaseInitial,
    /// Front-end supplied predicate
    Custom(fn(&str) -> bool),
}

impl Visibility {
    pub fn is_public(&self, name: &str) -> bool {
        match self {
            Visibility::UppercaseInitial => is_exported(name),
            Visibility::Custom(predicate) => predicate(name),
        }
    }
}

/// Which struct fields and interface methods are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MemberVisibility {
    /// Every member, public or not
    #[default]
    All,
    /// Only members passing the visibility predicate
    ExportedOnly,
}

/// Extractor settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractorConfig {
    pub visibility: Visibility,
    pub members: MemberVisibility,
}

impl ExtractorConfig {
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_members(mut self, members: MemberVisibility) -> Self {
        self.members = members;
        self
    }

    /// Whether a top-level declaration named `name` is recorded.
    pub fn records_declaration(&self, name: &str) -> bool {
        self.visibility.is_public(name)
    }

    /// Whether a struct field or interface method named `name` is recorded.
    pub fn records_member(&self, name: &str) -> bool {
        match self.members {
            MemberVisibility::All => true,
            MemberVisibility::ExportedOnly => self.visibility.is_public(name),
        }
    }
}
