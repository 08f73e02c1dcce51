//! Declarative in-memory host.
//!
//! [`ClassTable`] is the batteries-included [`NativeBinder`]: the embedding
//! application describes its classes, supertypes, constructors, methods, and
//! fields up front, and the table answers the binder queries from those
//! declarations. Array classes are synthesized on first request and cached so
//! assignability and descriptor lookups cover them afterwards.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use crate::error::RegistryError;
use crate::host::{ArrayClass, ClassId, CtorRef, FieldRef, MethodRef, NativeBinder};
use crate::sort::Sort;

#[derive(Debug, Clone)]
struct ClassDef {
    name: Arc<str>,
    descriptor: Arc<str>,
    supers: Vec<ClassId>,
    is_interface: bool,
    ctors: Vec<CtorRef>,
    methods: Vec<MethodRef>,
    fields: Vec<FieldRef>,
}

/// Host class universe declared as data.
///
/// Member lookups walk the declared supertype lists breadth-first, so a class
/// answers for methods and fields its supertypes declare. Constructors are
/// never inherited. Interfaces only answer for their own and their
/// superinterfaces' declarations; they do not see the root class's methods.
pub struct ClassTable {
    classes: FxHashMap<ClassId, ClassDef>,
    by_name: FxHashMap<Arc<str>, ClassId>,
    sorts: FxHashMap<ClassId, Sort>,
    root: ClassId,
    arrays: RwLock<FxHashMap<ClassId, ArrayClass>>,
}

impl ClassTable {
    /// Create a table whose hierarchy is rooted at the named class.
    pub fn new(root_name: &str, root_descriptor: &str) -> Self {
        let root_name: Arc<str> = Arc::from(root_name);
        let descriptor: Arc<str> = Arc::from(root_descriptor);
        let root = ClassId::from_descriptor(&descriptor);
        let def = ClassDef {
            name: Arc::clone(&root_name),
            descriptor,
            supers: Vec::new(),
            is_interface: false,
            ctors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        };
        let mut classes = FxHashMap::default();
        classes.insert(root, def);
        let mut by_name = FxHashMap::default();
        by_name.insert(root_name, root);
        ClassTable {
            classes,
            by_name,
            sorts: FxHashMap::default(),
            root,
            arrays: RwLock::new(FxHashMap::default()),
        }
    }

    /// Declare a class. Supertypes are named and must already exist; classes
    /// without an explicit supertype should name the root.
    pub fn add_class(
        &mut self,
        name: &str,
        descriptor: &str,
        supers: &[&str],
    ) -> Result<ClassId, RegistryError> {
        self.insert_class(name, descriptor, supers, false)
    }

    /// Declare an interface. Its supers list holds superinterfaces only; the
    /// root class's members are deliberately not visible through it.
    pub fn add_interface(
        &mut self,
        name: &str,
        descriptor: &str,
        supers: &[&str],
    ) -> Result<ClassId, RegistryError> {
        self.insert_class(name, descriptor, supers, true)
    }

    fn insert_class(
        &mut self,
        name: &str,
        descriptor: &str,
        supers: &[&str],
        is_interface: bool,
    ) -> Result<ClassId, RegistryError> {
        if self.by_name.contains_key(name) {
            return Err(RegistryError::DuplicateNativeClass(name.to_string()));
        }
        let mut super_ids = Vec::with_capacity(supers.len());
        for super_name in supers {
            super_ids.push(self.class_named(super_name)?);
        }
        let name: Arc<str> = Arc::from(name);
        let descriptor: Arc<str> = Arc::from(descriptor);
        let id = ClassId::from_descriptor(&descriptor);
        if let Some(existing) = self.classes.get(&id) {
            // Descriptor collision; report the class already holding the id.
            return Err(RegistryError::DuplicateNativeClass(existing.name.to_string()));
        }
        let def = ClassDef {
            name: Arc::clone(&name),
            descriptor,
            supers: super_ids,
            is_interface,
            ctors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        };
        self.classes.insert(id, def);
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Pin the canonical sort the binder reports for a class.
    pub fn bind_sort(&mut self, class: &str, sort: Sort) -> Result<(), RegistryError> {
        let id = self.class_named(class)?;
        self.sorts.insert(id, sort);
        Ok(())
    }

    /// Declare a constructor on a class. Parameter classes are named;
    /// `"int[]"`-style names synthesize array classes.
    pub fn add_ctor(&mut self, class: &str, params: &[&str]) -> Result<(), RegistryError> {
        let id = self.class_named(class)?;
        let params = self.resolve_params(params)?;
        let def = self.class_mut(id, class)?;
        def.ctors.push(CtorRef { class: id, params });
        Ok(())
    }

    pub fn add_method(
        &mut self,
        class: &str,
        name: &str,
        params: &[&str],
        ret: &str,
    ) -> Result<(), RegistryError> {
        self.insert_method(class, name, params, ret, false)
    }

    pub fn add_static_method(
        &mut self,
        class: &str,
        name: &str,
        params: &[&str],
        ret: &str,
    ) -> Result<(), RegistryError> {
        self.insert_method(class, name, params, ret, true)
    }

    fn insert_method(
        &mut self,
        class: &str,
        name: &str,
        params: &[&str],
        ret: &str,
        is_static: bool,
    ) -> Result<(), RegistryError> {
        let id = self.class_named(class)?;
        let params = self.resolve_params(params)?;
        let ret = self.resolve_name(ret)?;
        let name: Arc<str> = Arc::from(name);
        let def = self.class_mut(id, class)?;
        def.methods.push(MethodRef {
            class: id,
            name,
            is_static,
            params,
            ret,
        });
        Ok(())
    }

    pub fn add_field(
        &mut self,
        class: &str,
        name: &str,
        ty: &str,
        is_static: bool,
        is_final: bool,
    ) -> Result<(), RegistryError> {
        let id = self.class_named(class)?;
        let ty = self.resolve_name(ty)?;
        let name: Arc<str> = Arc::from(name);
        let def = self.class_mut(id, class)?;
        def.fields.push(FieldRef {
            class: id,
            name,
            is_static,
            is_final,
            ty,
        });
        Ok(())
    }

    fn class_named(&self, name: &str) -> Result<ClassId, RegistryError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownNativeClass(name.to_string()))
    }

    fn class_mut(&mut self, id: ClassId, name: &str) -> Result<&mut ClassDef, RegistryError> {
        self.classes
            .get_mut(&id)
            .ok_or_else(|| RegistryError::UnknownNativeClass(name.to_string()))
    }

    fn resolve_params(&self, params: &[&str]) -> Result<Vec<ClassId>, RegistryError> {
        params.iter().map(|p| self.resolve_name(p)).collect()
    }

    /// Resolve a class name, synthesizing array classes for `[]` suffixes.
    fn resolve_name(&self, name: &str) -> Result<ClassId, RegistryError> {
        let mut base = name;
        let mut dims = 0;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped;
            dims += 1;
        }
        let element = self.class_named(base)?;
        if dims == 0 {
            return Ok(element);
        }
        Ok(self.array_class(element, dims)?.id)
    }

    /// Supertype closure of a class, the class itself first.
    fn hierarchy(&self, class: ClassId) -> Vec<ClassId> {
        let mut seen = vec![class];
        let mut cursor = 0;
        while cursor < seen.len() {
            let current = seen[cursor];
            cursor += 1;
            if let Some(def) = self.classes.get(&current) {
                for sup in &def.supers {
                    if !seen.contains(sup) {
                        seen.push(*sup);
                    }
                }
            }
        }
        seen
    }
}

impl NativeBinder for ClassTable {
    fn find_class(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    fn descriptor(&self, class: ClassId) -> Option<Arc<str>> {
        if let Some(def) = self.classes.get(&class) {
            return Some(Arc::clone(&def.descriptor));
        }
        let arrays = self.arrays.read().ok()?;
        arrays.get(&class).map(|a| Arc::clone(&a.descriptor))
    }

    fn is_assignable(&self, target: ClassId, source: ClassId) -> bool {
        if target == source {
            return true;
        }
        if target == self.root {
            // Everything, arrays included, is assignable to the root.
            return true;
        }
        self.hierarchy(source).contains(&target)
    }

    fn is_interface(&self, class: ClassId) -> bool {
        self.classes.get(&class).is_some_and(|def| def.is_interface)
    }

    fn root_class(&self) -> ClassId {
        self.root
    }

    fn array_class(&self, element: ClassId, dims: usize) -> Result<ArrayClass, RegistryError> {
        let element_descriptor = self
            .descriptor(element)
            .ok_or_else(|| RegistryError::UnknownNativeClass(format!("{element:?}")))?;
        let descriptor: Arc<str> =
            Arc::from(format!("{}{}", "[".repeat(dims), element_descriptor));
        let id = ClassId::from_descriptor(&descriptor);
        if let Ok(mut arrays) = self.arrays.write() {
            arrays
                .entry(id)
                .or_insert_with(|| ArrayClass {
                    id,
                    descriptor: Arc::clone(&descriptor),
                });
        }
        Ok(ArrayClass { id, descriptor })
    }

    fn canonical_sort(&self, class: ClassId) -> Option<Sort> {
        self.sorts.get(&class).copied()
    }

    fn find_constructor(&self, class: ClassId, params: &[ClassId]) -> Option<CtorRef> {
        let def = self.classes.get(&class)?;
        def.ctors.iter().find(|c| c.params == params).cloned()
    }

    fn find_method(&self, class: ClassId, name: &str, params: &[ClassId]) -> Option<MethodRef> {
        for id in self.hierarchy(class) {
            if let Some(def) = self.classes.get(&id) {
                if let Some(m) = def
                    .methods
                    .iter()
                    .find(|m| &*m.name == name && m.params == params)
                {
                    return Some(m.clone());
                }
            }
        }
        None
    }

    fn find_field(&self, class: ClassId, name: &str) -> Option<FieldRef> {
        for id in self.hierarchy(class) {
            if let Some(def) = self.classes.get(&id) {
                if let Some(f) = def.fields.iter().find(|f| &*f.name == name) {
                    return Some(f.clone());
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for ClassTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassTable")
            .field("classes", &self.classes.len())
            .field("root", &self.root)
            .finish()
    }
}
