//! Record generator.
//!
//! Every element type in this crate is declared once with [`fhir_record!`]. A declaration lists
//! the record kind (`datatype`, `backbone` or `resource`), the element path used in errors and
//! traversal, the builder type name, an optional extra rule, and the fields in FHIR declaration
//! order:
//!
//! ```text
//! fhir_record! {
//!     backbone StatusDate("Citation.statusDate") builder StatusDateBuilder {
//!         required activity("activity"): CodeableConcept,
//!         optional actual("actual"): bool,
//!         required period("period"): Period,
//!     }
//! }
//! ```
//!
//! Field cardinalities:
//! - `required`: `T` on the record, `Option<T>` on the builder; `build` fails when unset.
//! - `optional`: `Option<T>`.
//! - `boxed`: `Option<Box<T>>` on the record; breaks type recursion (`Reference.identifier`).
//! - `list name + add_name`: `Vec<T>`; `name(iter)` replaces, `add_name(value)` appends.
//!
//! Field constraints:
//! - `[ValueKind::Uri, ...]` after the type restricts a `Value` choice field.
//! - `=> ["Organization", ...]` restricts the target kind of a reference.

macro_rules! fhir_record {
    (
        $(#[$meta:meta])*
        $kind:ident $name:ident ($label:literal) builder $builder:ident $(check $check:path)? {
            $(
                $(#[$fmeta:meta])*
                $card:ident $field:ident $(+ $add:ident)? ($wire:literal): $fty:ty
                    $([ $($choice:expr),+ $(,)? ])?
                    $(=> [ $($target:literal),+ $(,)? ])?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            base: fhir_base_ty!($kind),
            $( $field: fhir_record_ty!($card $fty), )*
            cached_hash: $crate::element::HashCache,
        }

        #[doc = concat!("Builder for [`", stringify!($name), "`].")]
        #[derive(Clone, Debug, Default)]
        pub struct $builder {
            pub base: fhir_base_ty!($kind),
            $(
                $(#[$fmeta])*
                pub $field: fhir_builder_ty!($card $fty),
            )*
        }

        impl $name {
            /// Element path of this record type.
            pub const ELEMENT: &'static str = $label;

            /// An empty builder. Nothing is checked until `build`.
            pub fn builder() -> $builder {
                $builder::default()
            }

            /// Copies every field of this record into a new builder.
            pub fn to_builder(&self) -> $builder {
                $builder::from(self)
            }

            fhir_base_getters!($kind);

            $( fhir_getter!($(#[$fmeta])* $card $field: $fty); )*

            /// `true` when any identity, extension or domain field carries information.
            pub fn has_content(&self) -> bool {
                $crate::element::Base::has_content(&self.base)
                    $( || fhir_is_set!($card &self.$field) )*
            }

            /// Structural hash, computed on first use and cached.
            pub fn hash_code(&self) -> u64 {
                self.cached_hash.get_or_init(|| {
                    use std::hash::{Hash as _, Hasher as _};
                    let mut hasher = std::collections::hash_map::DefaultHasher::new();
                    self.base.hash(&mut hasher);
                    $( self.$field.hash(&mut hasher); )*
                    hasher.finish()
                })
            }

            /// Walks this record and everything below it, naming the root by its element path.
            pub fn accept<'a>(&'a self, visitor: &mut dyn $crate::visit::Visitor<'a>) {
                $crate::visit::Walk::walk(self, $label, None, visitor);
            }

            pub(crate) fn visit_fields<'a>(&'a self, visitor: &mut dyn $crate::visit::Visitor<'a>) {
                $crate::element::Base::visit_fields(&self.base, visitor);
                $( fhir_walk_field!($card &self.$field, $wire, visitor); )*
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                if let (Some(a), Some(b)) = (self.cached_hash.get(), other.cached_hash.get()) {
                    if a != b {
                        return false;
                    }
                }
                self.base == other.base $( && self.$field == other.$field )*
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.hash_code());
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("base", &self.base)
                    $( .field(stringify!($field), &self.$field) )*
                    .finish()
            }
        }

        impl $crate::element::Element for $name {
            fn element_name(&self) -> &'static str {
                $label
            }

            fn id(&self) -> Option<&str> {
                $crate::element::Base::id(&self.base)
            }

            fn extension(&self) -> &[$crate::element::Extension] {
                $crate::element::Base::extension(&self.base)
            }

            fn modifier_extension(&self) -> &[$crate::element::Extension] {
                $crate::element::Base::modifier_extension(&self.base)
            }

            fn has_content(&self) -> bool {
                $name::has_content(self)
            }
        }

        impl $crate::visit::Walk for $name {
            fn walk<'a>(
                &'a self,
                name: &str,
                index: Option<usize>,
                visitor: &mut dyn $crate::visit::Visitor<'a>,
            ) {
                $crate::visit::walk_node(name, index, $crate::visit::Node::$name(self), visitor);
            }
        }

        impl $crate::validation::Validate for $name {
            fn validate(&self) -> Result<(), $crate::validation::ValidationError> {
                $crate::element::Base::validate(&self.base)?;
                $(
                    fhir_each!($card &self.$field, |value| {
                        $crate::validation::Validate::validate(value)?
                    });
                )*
                $($(
                    fhir_each!($card &self.$field, |value| {
                        $crate::validation::check_choice($label, $wire, value, &[$($choice),+])?
                    });
                )?)*
                $($(
                    fhir_each!($card &self.$field, |value| {
                        $crate::validation::check_reference_target(
                            $label,
                            $wire,
                            value,
                            &[$($target),+],
                        )?
                    });
                )?)*
                if fhir_requires_content!($kind) && !self.has_content() {
                    return Err($crate::validation::ValidationError::Empty { element: $label });
                }
                $( $check(self)?; )?
                Ok(())
            }
        }

        impl From<&$name> for $builder {
            fn from(record: &$name) -> Self {
                Self {
                    base: record.base.clone(),
                    $( $field: fhir_to_builder!($card record.$field), )*
                }
            }
        }

        impl $builder {
            fhir_base_setters!($kind);

            $(
                fhir_setter!($(#[$fmeta])* $card $field: $fty);
                $(
                    #[doc = concat!("Appends one entry to `", $wire, "`, keeping earlier entries.")]
                    pub fn $add(mut self, value: impl Into<$fty>) -> Self {
                        self.$field.push(value.into());
                        self
                    }
                )?
            )*

            /// Constructs the record and runs structural validation.
            pub fn build(self) -> $crate::FhirResult<$name> {
                self.build_with($crate::BuildOptions::default())
            }

            /// Constructs the record, validating only if `options` asks for it.
            ///
            /// Required fields are checked either way: a record without them cannot exist.
            pub fn build_with(self, options: $crate::BuildOptions) -> $crate::FhirResult<$name> {
                let record = $name {
                    base: self.base,
                    $( $field: fhir_take!($card self.$field, $label, $wire), )*
                    cached_hash: Default::default(),
                };
                $crate::validation::finish(record, options)
            }
        }
    };
}

macro_rules! fhir_base_ty {
    (datatype) => { $crate::element::ElementBase };
    (backbone) => { $crate::element::BackboneBase };
    (resource) => { $crate::element::ResourceBase };
}

macro_rules! fhir_requires_content {
    (datatype) => { true };
    (backbone) => { true };
    (resource) => { false };
}

macro_rules! fhir_record_ty {
    (required $t:ty) => { $t };
    (optional $t:ty) => { Option<$t> };
    (boxed $t:ty) => { Option<Box<$t>> };
    (list $t:ty) => { Vec<$t> };
}

macro_rules! fhir_builder_ty {
    (required $t:ty) => { Option<$t> };
    (optional $t:ty) => { Option<$t> };
    (boxed $t:ty) => { Option<$t> };
    (list $t:ty) => { Vec<$t> };
}

macro_rules! fhir_getter {
    ($(#[$m:meta])* required $f:ident: $t:ty) => {
        $(#[$m])*
        pub fn $f(&self) -> &$t {
            &self.$f
        }
    };
    ($(#[$m:meta])* optional $f:ident: $t:ty) => {
        $(#[$m])*
        pub fn $f(&self) -> Option<&$t> {
            self.$f.as_ref()
        }
    };
    ($(#[$m:meta])* boxed $f:ident: $t:ty) => {
        $(#[$m])*
        pub fn $f(&self) -> Option<&$t> {
            self.$f.as_deref()
        }
    };
    ($(#[$m:meta])* list $f:ident: $t:ty) => {
        $(#[$m])*
        pub fn $f(&self) -> &[$t] {
            &self.$f
        }
    };
}

macro_rules! fhir_setter {
    ($(#[$m:meta])* list $f:ident: $t:ty) => {
        $(#[$m])*
        ///
        /// Replaces every entry added so far with `values`, in iteration order.
        pub fn $f<I>(mut self, values: I) -> Self
        where
            I: IntoIterator,
            I::Item: Into<$t>,
        {
            self.$f = values.into_iter().map(Into::into).collect();
            self
        }
    };
    ($(#[$m:meta])* $card:ident $f:ident: $t:ty) => {
        $(#[$m])*
        pub fn $f(mut self, value: impl Into<$t>) -> Self {
            self.$f = Some(value.into());
            self
        }
    };
}

macro_rules! fhir_is_set {
    (required $e:expr) => { true };
    (optional $e:expr) => { $e.is_some() };
    (boxed $e:expr) => { $e.is_some() };
    (list $e:expr) => { !$e.is_empty() };
}

macro_rules! fhir_take {
    (required $e:expr, $label:literal, $wire:literal) => {
        match $e {
            Some(value) => value,
            None => return Err($crate::validation::missing($label, $wire)),
        }
    };
    (optional $e:expr, $label:literal, $wire:literal) => { $e };
    (boxed $e:expr, $label:literal, $wire:literal) => { $e.map(Box::new) };
    (list $e:expr, $label:literal, $wire:literal) => { $e };
}

macro_rules! fhir_to_builder {
    (required $e:expr) => { Some($e.clone()) };
    (optional $e:expr) => { $e.clone() };
    (boxed $e:expr) => { $e.as_deref().cloned() };
    (list $e:expr) => { $e.clone() };
}

macro_rules! fhir_walk_field {
    (required $e:expr, $wire:literal, $visitor:ident) => {
        $crate::visit::Walk::walk($e, $wire, None, $visitor);
    };
    (optional $e:expr, $wire:literal, $visitor:ident) => {
        if let Some(value) = $e {
            $crate::visit::Walk::walk(value, $wire, None, $visitor);
        }
    };
    (boxed $e:expr, $wire:literal, $visitor:ident) => {
        if let Some(value) = $e {
            $crate::visit::Walk::walk(&**value, $wire, None, $visitor);
        }
    };
    (list $e:expr, $wire:literal, $visitor:ident) => {
        for (index, value) in $e.iter().enumerate() {
            $crate::visit::Walk::walk(value, $wire, Some(index), $visitor);
        }
    };
}

macro_rules! fhir_each {
    (required $e:expr, |$v:ident| $body:block) => {{
        let $v = $e;
        $body;
    }};
    (optional $e:expr, |$v:ident| $body:block) => {
        if let Some($v) = $e {
            $body;
        }
    };
    (boxed $e:expr, |$v:ident| $body:block) => {
        if let Some($v) = $e {
            let $v = &**$v;
            $body;
        }
    };
    (list $e:expr, |$v:ident| $body:block) => {
        for $v in $e.iter() {
            $body;
        }
    };
}

macro_rules! fhir_base_getters {
    (datatype) => {
        pub fn id(&self) -> Option<&str> {
            self.base.id.as_deref()
        }

        pub fn extension(&self) -> &[$crate::element::Extension] {
            &self.base.extension
        }
    };
    (backbone) => {
        fhir_base_getters!(datatype);

        pub fn modifier_extension(&self) -> &[$crate::element::Extension] {
            &self.base.modifier_extension
        }
    };
    (resource) => {
        /// Logical id of the resource.
        pub fn id(&self) -> Option<&fhir_types::Id> {
            self.base.id.as_ref()
        }

        pub fn meta(&self) -> Option<&$crate::datatypes::Meta> {
            self.base.meta.as_ref()
        }

        pub fn implicit_rules(&self) -> Option<&fhir_types::Uri> {
            self.base.implicit_rules.as_ref()
        }

        pub fn language(&self) -> Option<&fhir_types::Code> {
            self.base.language.as_ref()
        }

        pub fn extension(&self) -> &[$crate::element::Extension] {
            &self.base.extension
        }

        pub fn modifier_extension(&self) -> &[$crate::element::Extension] {
            &self.base.modifier_extension
        }
    };
}

macro_rules! fhir_base_setters {
    (datatype) => {
        /// Element id, unique within the enclosing resource.
        pub fn id(mut self, id: impl Into<String>) -> Self {
            self.base.id = Some(id.into());
            self
        }

        /// Replaces the extensions added so far.
        pub fn extension<I>(mut self, values: I) -> Self
        where
            I: IntoIterator<Item = $crate::element::Extension>,
        {
            self.base.extension = values.into_iter().collect();
            self
        }

        pub fn add_extension(mut self, value: $crate::element::Extension) -> Self {
            self.base.extension.push(value);
            self
        }
    };
    (backbone) => {
        fhir_base_setters!(datatype);
        fhir_base_setters!(@modifier);
    };
    (resource) => {
        /// Logical id of the resource.
        pub fn id(mut self, id: fhir_types::Id) -> Self {
            self.base.id = Some(id);
            self
        }

        pub fn meta(mut self, meta: $crate::datatypes::Meta) -> Self {
            self.base.meta = Some(meta);
            self
        }

        pub fn implicit_rules(mut self, rules: fhir_types::Uri) -> Self {
            self.base.implicit_rules = Some(rules);
            self
        }

        pub fn language(mut self, language: fhir_types::Code) -> Self {
            self.base.language = Some(language);
            self
        }

        /// Replaces the extensions added so far.
        pub fn extension<I>(mut self, values: I) -> Self
        where
            I: IntoIterator<Item = $crate::element::Extension>,
        {
            self.base.extension = values.into_iter().collect();
            self
        }

        pub fn add_extension(mut self, value: $crate::element::Extension) -> Self {
            self.base.extension.push(value);
            self
        }

        fhir_base_setters!(@modifier);
    };
    (@modifier) => {
        /// Replaces the modifier extensions added so far.
        pub fn modifier_extension<I>(mut self, values: I) -> Self
        where
            I: IntoIterator<Item = $crate::element::Extension>,
        {
            self.base.modifier_extension = values.into_iter().collect();
            self
        }

        pub fn add_modifier_extension(mut self, value: $crate::element::Extension) -> Self {
            self.base.modifier_extension.push(value);
            self
        }
    };
}
