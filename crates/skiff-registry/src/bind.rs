//! Member binding: attaching constructors, methods, and fields to structs.
//!
//! Every registration follows the same shape: validate the name and overload
//! key against what the struct already holds, check generic signatures for
//! assignability, then resolve the native counterpart through the binder and
//! store the handle alongside the script-visible signature. Collision checks
//! run before any native lookup.

use std::sync::Arc;

use skiff_core::{
    ClassId, Constructor, Field, Method, MethodKey, RegistryError, Type,
};

use crate::builder::{RegistryBuilder, valid_member_name};

impl RegistryBuilder {
    /// Register a constructor overload on a struct.
    ///
    /// `generic_args`, when given, is the script-visible argument list; each
    /// entry must be assignable to the declared argument at the same
    /// position.
    pub fn add_constructor(
        &mut self,
        owner: &str,
        name: &str,
        args: &[Type],
        generic_args: Option<&[Type]>,
    ) -> Result<(), RegistryError> {
        let key = MethodKey::new(name, args.len());
        let (owner_name, owner_class) = {
            let s = self.struct_named(owner)?;
            if !valid_member_name(name) {
                return Err(RegistryError::NameFormat {
                    kind: "constructor",
                    name: name.to_string(),
                });
            }
            if s.constructors.contains_key(&key) {
                return Err(RegistryError::DuplicateOverload {
                    owner: owner.to_string(),
                    kind: "constructor",
                    key: key.to_string(),
                });
            }
            if s.static_methods.contains_key(&key) {
                return Err(collision(owner, "constructor", "static method", &key));
            }
            if s.methods.contains_key(&key) {
                return Err(collision(owner, "constructor", "method", &key));
            }
            (Arc::clone(&s.name), s.class)
        };

        self.check_generic_args(owner, &key, args, generic_args)?;

        let params: Vec<ClassId> = args.iter().map(|a| a.class).collect();
        let ctor = self
            .binder
            .find_constructor(owner_class, &params)
            .ok_or_else(|| RegistryError::MemberNotBound {
                owner: owner.to_string(),
                kind: "constructor",
                member: key.to_string(),
            })?;

        let arguments = generic_args.unwrap_or(args).to_vec();
        let constructor = Constructor {
            name: Arc::from(name),
            owner: Arc::clone(&owner_name),
            arguments,
            ctor,
        };
        self.struct_mut(owner)?.constructors.insert(key, constructor);
        Ok(())
    }

    /// Register a method overload on a struct.
    ///
    /// `native_name` overrides the host-side name when the script name
    /// differs; lookup uses the declared types, storage uses the generic
    /// (script-visible) ones.
    #[allow(clippy::too_many_arguments)]
    pub fn add_method(
        &mut self,
        owner: &str,
        name: &str,
        native_name: Option<&str>,
        is_static: bool,
        rtn: &Type,
        args: &[Type],
        generic_rtn: Option<&Type>,
        generic_args: Option<&[Type]>,
    ) -> Result<(), RegistryError> {
        let kind = if is_static { "static method" } else { "method" };
        let key = MethodKey::new(name, args.len());
        let (owner_name, owner_class) = {
            let s = self.struct_named(owner)?;
            if !valid_member_name(name) {
                return Err(RegistryError::NameFormat {
                    kind: "method",
                    name: name.to_string(),
                });
            }
            if s.constructors.contains_key(&key) {
                return Err(collision(owner, kind, "constructor", &key));
            }
            if is_static {
                if s.static_methods.contains_key(&key) {
                    return Err(RegistryError::DuplicateOverload {
                        owner: owner.to_string(),
                        kind,
                        key: key.to_string(),
                    });
                }
                if s.methods.contains_key(&key) {
                    return Err(collision(owner, kind, "method", &key));
                }
            } else {
                if s.methods.contains_key(&key) {
                    return Err(RegistryError::DuplicateOverload {
                        owner: owner.to_string(),
                        kind,
                        key: key.to_string(),
                    });
                }
                if s.static_methods.contains_key(&key) {
                    return Err(collision(owner, kind, "static method", &key));
                }
            }
            (Arc::clone(&s.name), s.class)
        };

        if let Some(generics) = generic_rtn {
            if !self.binder.is_assignable(rtn.class, generics.class) {
                return Err(RegistryError::GenericMismatch {
                    owner: owner.to_string(),
                    member: key.to_string(),
                    declared: rtn.name.to_string(),
                    generic: generics.name.to_string(),
                });
            }
        }
        self.check_generic_args(owner, &key, args, generic_args)?;

        let params: Vec<ClassId> = args.iter().map(|a| a.class).collect();
        let native = native_name.unwrap_or(name);
        let mref = self
            .binder
            .find_method(owner_class, native, &params)
            .ok_or_else(|| RegistryError::MemberNotBound {
                owner: owner.to_string(),
                kind,
                member: key.to_string(),
            })?;
        if mref.is_static != is_static {
            return Err(RegistryError::StaticMismatch {
                owner: owner.to_string(),
                member: key.to_string(),
                is_static,
            });
        }
        if mref.ret != rtn.class {
            return Err(RegistryError::ReturnMismatch {
                owner: owner.to_string(),
                member: key.to_string(),
                declared: rtn.name.to_string(),
            });
        }

        let method = Method {
            name: Arc::from(name),
            owner: Arc::clone(&owner_name),
            rtn: generic_rtn.unwrap_or(rtn).clone(),
            arguments: generic_args.unwrap_or(args).to_vec(),
            method: mref,
        };
        let s = self.struct_mut(owner)?;
        if is_static {
            s.static_methods.insert(key, method);
        } else {
            s.methods.insert(key, method);
        }
        Ok(())
    }

    /// Register a field on a struct. A field name may appear at most once
    /// per struct across both staticness flavors.
    pub fn add_field(
        &mut self,
        owner: &str,
        name: &str,
        native_name: Option<&str>,
        is_static: bool,
        ty: &Type,
        generic: Option<&Type>,
    ) -> Result<(), RegistryError> {
        let (owner_name, owner_class) = {
            let s = self.struct_named(owner)?;
            if !valid_member_name(name) {
                return Err(RegistryError::NameFormat {
                    kind: "field",
                    name: name.to_string(),
                });
            }
            if s.static_fields.contains_key(name) || s.fields.contains_key(name) {
                return Err(RegistryError::DuplicateField {
                    owner: owner.to_string(),
                    name: name.to_string(),
                });
            }
            (Arc::clone(&s.name), s.class)
        };

        if let Some(generics) = generic {
            if !self.binder.is_assignable(ty.class, generics.class) {
                return Err(RegistryError::GenericMismatch {
                    owner: owner.to_string(),
                    member: name.to_string(),
                    declared: ty.name.to_string(),
                    generic: generics.name.to_string(),
                });
            }
        }

        let native = native_name.unwrap_or(name);
        let fref = self
            .binder
            .find_field(owner_class, native)
            .ok_or_else(|| RegistryError::MemberNotBound {
                owner: owner.to_string(),
                kind: "field",
                member: name.to_string(),
            })?;
        if fref.is_static != is_static {
            return Err(RegistryError::StaticMismatch {
                owner: owner.to_string(),
                member: name.to_string(),
                is_static,
            });
        }
        if is_static && !fref.is_final {
            return Err(RegistryError::StaticFieldNotFinal {
                owner: owner.to_string(),
                member: name.to_string(),
            });
        }

        let field = Field {
            name: Arc::from(name),
            owner: Arc::clone(&owner_name),
            ty: ty.clone(),
            generic: generic.unwrap_or(ty).clone(),
            field: fref,
        };
        let s = self.struct_mut(owner)?;
        if is_static {
            s.static_fields.insert(name.to_string(), field);
        } else {
            s.fields.insert(name.to_string(), field);
        }
        Ok(())
    }

    fn check_generic_args(
        &self,
        owner: &str,
        key: &MethodKey,
        args: &[Type],
        generic_args: Option<&[Type]>,
    ) -> Result<(), RegistryError> {
        let Some(generics) = generic_args else {
            return Ok(());
        };
        if generics.len() != args.len() {
            return Err(RegistryError::GenericArity {
                owner: owner.to_string(),
                member: key.to_string(),
                declared: args.len(),
                generic: generics.len(),
            });
        }
        for (declared, generic) in args.iter().zip(generics) {
            if !self.binder.is_assignable(declared.class, generic.class) {
                return Err(RegistryError::GenericMismatch {
                    owner: owner.to_string(),
                    member: key.to_string(),
                    declared: declared.name.to_string(),
                    generic: generic.name.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn collision(
    owner: &str,
    kind: &'static str,
    existing: &'static str,
    key: &MethodKey,
) -> RegistryError {
    RegistryError::OverloadCollision {
        owner: owner.to_string(),
        kind,
        existing,
        key: key.to_string(),
    }
}
