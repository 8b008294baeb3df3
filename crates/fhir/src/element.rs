//! Fields shared by every record, the `Element` capability trait, and `Extension`.
//!
//! FHIR has three families of records and each carries a different set of inherited fields:
//! - datatypes: `id`, `extension`
//! - backbone elements: `id`, `extension`, `modifierExtension`
//! - resources: `id`, `meta`, `implicitRules`, `language`, `extension`, `modifierExtension`

use crate::datatypes::Meta;
use crate::validation::{Validate, ValidationError};
use crate::value::Value;
use crate::visit::{Visitor, Walk};
use fhir_types::{Code, Id, Uri};
use std::sync::OnceLock;

/// Capabilities every record has, whatever its concrete type.
pub trait Element: Validate + Walk {
    /// Element path of the record's type, e.g. `Citation.statusDate`.
    fn element_name(&self) -> &'static str;
    fn id(&self) -> Option<&str>;
    fn extension(&self) -> &[Extension];
    fn modifier_extension(&self) -> &[Extension];
    fn has_content(&self) -> bool;
}

/// Inherited fields, composed into every record.
pub trait Base {
    fn id(&self) -> Option<&str>;
    fn extension(&self) -> &[Extension];

    fn modifier_extension(&self) -> &[Extension] {
        &[]
    }

    /// `id` alone does not count: an element with only an id is still empty.
    fn has_content(&self) -> bool;
    fn visit_fields<'a>(&'a self, visitor: &mut dyn Visitor<'a>);
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Inherited fields of a datatype.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ElementBase {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
}

/// Inherited fields of a backbone element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BackboneBase {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
}

/// Inherited fields of a resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResourceBase {
    pub id: Option<Id>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<Uri>,
    pub language: Option<Code>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
}

fn walk_list<'a, T: Walk>(items: &'a [T], name: &str, visitor: &mut dyn Visitor<'a>) {
    for (index, item) in items.iter().enumerate() {
        item.walk(name, Some(index), visitor);
    }
}

fn validate_all<T: Validate>(items: &[T]) -> Result<(), ValidationError> {
    items.iter().try_for_each(Validate::validate)
}

impl Base for ElementBase {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }

    fn has_content(&self) -> bool {
        !self.extension.is_empty()
    }

    fn visit_fields<'a>(&'a self, visitor: &mut dyn Visitor<'a>) {
        if let Some(id) = &self.id {
            id.walk("id", None, visitor);
        }
        walk_list(&self.extension, "extension", visitor);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_all(&self.extension)
    }
}

impl Base for BackboneBase {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }

    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    fn has_content(&self) -> bool {
        !self.extension.is_empty() || !self.modifier_extension.is_empty()
    }

    fn visit_fields<'a>(&'a self, visitor: &mut dyn Visitor<'a>) {
        if let Some(id) = &self.id {
            id.walk("id", None, visitor);
        }
        walk_list(&self.extension, "extension", visitor);
        walk_list(&self.modifier_extension, "modifierExtension", visitor);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_all(&self.extension)?;
        validate_all(&self.modifier_extension)
    }
}

impl Base for ResourceBase {
    fn id(&self) -> Option<&str> {
        self.id.as_ref().map(Id::as_str)
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }

    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    fn has_content(&self) -> bool {
        self.meta.is_some()
            || self.implicit_rules.is_some()
            || self.language.is_some()
            || !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
    }

    fn visit_fields<'a>(&'a self, visitor: &mut dyn Visitor<'a>) {
        if let Some(id) = &self.id {
            id.walk("id", None, visitor);
        }
        if let Some(meta) = &self.meta {
            meta.walk("meta", None, visitor);
        }
        if let Some(rules) = &self.implicit_rules {
            rules.walk("implicitRules", None, visitor);
        }
        if let Some(language) = &self.language {
            language.walk("language", None, visitor);
        }
        walk_list(&self.extension, "extension", visitor);
        walk_list(&self.modifier_extension, "modifierExtension", visitor);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(meta) = &self.meta {
            meta.validate()?;
        }
        validate_all(&self.extension)?;
        validate_all(&self.modifier_extension)
    }
}

/// Lazily computed structural hash. Ignored by equality and cloned along with the record.
#[derive(Clone, Default)]
pub(crate) struct HashCache(OnceLock<u64>);

impl HashCache {
    pub(crate) fn get_or_init(&self, compute: impl FnOnce() -> u64) -> u64 {
        *self.0.get_or_init(compute)
    }

    pub(crate) fn get(&self) -> Option<u64> {
        self.0.get().copied()
    }
}

fhir_record! {
    /// Additional content defined by an implementation profile, keyed by `url`.
    ///
    /// In a modifier extension position, consumers that do not understand `url` must treat the
    /// containing record as unprocessable.
    datatype Extension("Extension") builder ExtensionBuilder check extension_rules {
        /// Identifies the meaning of the extension.
        required url("url"): Uri,
        optional value("value"): Value,
    }
}

/// ext-1: an extension has either a value or nested extensions, never both.
fn extension_rules(extension: &Extension) -> Result<(), ValidationError> {
    let has_value = extension.value.is_some();
    let has_nested = !extension.base.extension.is_empty();
    if has_value == has_nested {
        return Err(ValidationError::invariant(
            Extension::ELEMENT,
            "ext-1",
            "must have either extensions or value[x], not both",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::FhirError;

    fn url(text: &str) -> Uri {
        Uri::parse(text).expect("valid uri")
    }

    #[test]
    fn extension_with_value_builds() {
        let ext = Extension::builder()
            .url(url("http://example.org/fhir/ext/reviewed"))
            .value(true)
            .build()
            .expect("valid extension");
        assert_eq!(ext.url().as_str(), "http://example.org/fhir/ext/reviewed");
        assert_eq!(ext.value(), Some(&Value::Boolean(true)));
    }

    #[test]
    fn extension_requires_url() {
        let err = Extension::builder().value(string("x")).build().expect_err("no url");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::MissingRequired {
                element: "Extension",
                field: "url"
            })
        ));
    }

    #[test]
    fn extension_rejects_value_and_nested_together() {
        let nested = Extension::builder()
            .url(url("part"))
            .value(string("a"))
            .build()
            .expect("nested");
        let err = Extension::builder()
            .url(url("http://example.org/complex"))
            .value(string("b"))
            .add_extension(nested.clone())
            .build()
            .expect_err("both value and nested");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::Invariant { key: "ext-1", .. })
        ));

        let complex = Extension::builder()
            .url(url("http://example.org/complex"))
            .add_extension(nested)
            .build()
            .expect("nested only");
        assert_eq!(complex.extension().len(), 1);
    }

    #[test]
    fn nested_extension_errors_surface_first() {
        let bad = ExtensionBuilder {
            url: Some(url("inner")),
            ..ExtensionBuilder::default()
        };
        let inner = bad
            .build_with(crate::BuildOptions::unchecked())
            .expect("unchecked build");
        let err = Extension::builder()
            .url(url("outer"))
            .add_extension(inner)
            .build()
            .expect_err("inner extension is empty");
        match err {
            FhirError::Validation(ValidationError::Invariant { element, key, .. }) => {
                assert_eq!(element, "Extension");
                assert_eq!(key, "ext-1");
            }
            other => panic!("expected ext-1 failure, got {other:?}"),
        }
    }

    #[test]
    fn id_alone_is_not_content() {
        let base = ElementBase {
            id: Some("a1".into()),
            extension: Vec::new(),
        };
        assert!(!base.has_content());
    }
}
