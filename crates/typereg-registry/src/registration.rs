use std::any::TypeId;

use typereg_core::{Factory, Item};

/// Everything a registry knows about one registered concrete type.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Shortest of the canonical and aliased names.
    default_name: String,
    /// Canonical name first, then aliased names in alias binding order.
    all_names: Vec<String>,
    type_id: TypeId,
    type_name: &'static str,
    factory: Factory,
}

impl Registration {
    pub(crate) fn new(
        default_name: String,
        all_names: Vec<String>,
        type_id: TypeId,
        type_name: &'static str,
        factory: Factory,
    ) -> Self {
        Self {
            default_name,
            all_names,
            type_id,
            type_name,
            factory,
        }
    }

    /// The name written into type tags.
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// The `<namespace>/<name>` form, always present.
    pub fn canonical_name(&self) -> &str {
        &self.all_names[0]
    }

    /// Every name the type can be looked up by.
    pub fn all_names(&self) -> &[String] {
        &self.all_names
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Allocate a fresh zero value of the registered type.
    pub fn instantiate(&self) -> Box<dyn Item> {
        (self.factory)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let registration = Registration::new(
            "[n]Count".into(),
            vec!["numbers/Count".into(), "[n]Count".into()],
            TypeId::of::<u32>(),
            "u32",
            || -> Box<dyn Item> { Box::new(0u32) },
        );

        assert_eq!(registration.default_name(), "[n]Count");
        assert_eq!(registration.canonical_name(), "numbers/Count");
        assert_eq!(registration.all_names().len(), 2);
        assert_eq!(registration.type_id(), TypeId::of::<u32>());
        assert_eq!(registration.type_name(), "u32");
    }

    #[test]
    fn instantiate_is_fresh_each_time() {
        let registration = Registration::new(
            "numbers/Count".into(),
            vec!["numbers/Count".into()],
            TypeId::of::<u32>(),
            "u32",
            || -> Box<dyn Item> { Box::new(0u32) },
        );

        let mut first = registration.instantiate();
        *first.downcast_mut::<u32>().unwrap() = 7;
        let second = registration.instantiate();
        assert_eq!(second.downcast_ref::<u32>(), Some(&0));
    }
}
