use super::decl::{MethodDecl, PropertyDecl, TypeDecl};

/// Selects the members a declaration exposes through its generated
/// interface: public, instance, declared directly on the type, and carrying
/// the member marker annotation. Order is declaration order.
pub struct MemberFilter<'a> {
    decl: &'a TypeDecl,
}

impl<'a> MemberFilter<'a> {
    pub fn new(decl: &'a TypeDecl) -> Self {
        MemberFilter { decl }
    }

    pub fn api_properties(&self) -> Vec<&'a PropertyDecl> {
        self.decl
            .properties
            .iter()
            .filter(|property| property.public && !property.is_static && property.api_member)
            .collect()
    }

    pub fn api_methods(&self) -> Vec<&'a MethodDecl> {
        self.decl
            .methods
            .iter()
            .filter(|method| method.public && !method.is_static && method.api_member)
            .collect()
    }
}
