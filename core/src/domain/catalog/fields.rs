//! Filterable fields of each admin resource.
//!
//! Sub-field names are prefixed with their relation path (`staff__name`),
//! which keeps names unique at every nesting level. Relations back to an
//! already visited resource are deferred so the schema stays finite.

use crate::domain::{
    catalog::entities::Resource,
    filter::entities::field::{FieldDescriptor, FieldsProvider},
};

const COMPANY_STATUS: [&str; 3] = ["active", "inactive", "suspended"];
const SKILLS: [&str; 5] = ["backend", "frontend", "design", "support", "sales"];
const PERMISSIONS: [&str; 4] = ["read", "write", "manage_users", "admin"];

pub fn fields_for(resource: Resource) -> FieldsProvider {
    let fields = match resource {
        Resource::Companies => company_fields(""),
        Resource::Staff => staff_fields(""),
        Resource::Users => user_fields(""),
        Resource::Roles => role_fields(""),
    };
    FieldsProvider::resolved(fields)
}

fn nested(prefix: &str, relation: &str) -> String {
    format!("{prefix}{relation}__")
}

pub fn company_fields(prefix: &str) -> Vec<FieldDescriptor> {
    let staff_prefix = nested(prefix, "staff");
    vec![
        FieldDescriptor::text(&format!("{prefix}name"), "Nome"),
        FieldDescriptor::text(&format!("{prefix}document"), "CNPJ"),
        FieldDescriptor::select(&format!("{prefix}status"), "Situação", &COMPANY_STATUS),
        FieldDescriptor::date(&format!("{prefix}created_at"), "Criada em").with_target("createdAt"),
        FieldDescriptor::to_many(
            &format!("{prefix}staff"),
            "Funcionários",
            FieldsProvider::deferred(move || staff_fields(&staff_prefix)),
        ),
    ]
}

pub fn staff_fields(prefix: &str) -> Vec<FieldDescriptor> {
    let company_prefix = nested(prefix, "company");
    vec![
        FieldDescriptor::text(&format!("{prefix}name"), "Nome"),
        FieldDescriptor::text(&format!("{prefix}email"), "E-mail"),
        FieldDescriptor::number(&format!("{prefix}age"), "Idade"),
        FieldDescriptor::number(&format!("{prefix}salary"), "Salário"),
        FieldDescriptor::date(&format!("{prefix}hired_at"), "Contratado em").with_target("hiredAt"),
        FieldDescriptor::boolean(&format!("{prefix}active"), "Ativo"),
        FieldDescriptor::multiselect(&format!("{prefix}skills"), "Habilidades", &SKILLS),
        FieldDescriptor::to_one(
            &format!("{prefix}company"),
            "Empresa",
            FieldsProvider::deferred(move || company_fields(&company_prefix)),
        ),
    ]
}

pub fn user_fields(prefix: &str) -> Vec<FieldDescriptor> {
    let role_prefix = nested(prefix, "role");
    vec![
        FieldDescriptor::text(&format!("{prefix}name"), "Nome"),
        FieldDescriptor::text(&format!("{prefix}email"), "E-mail"),
        FieldDescriptor::boolean(&format!("{prefix}active"), "Ativo"),
        FieldDescriptor::date(&format!("{prefix}last_login_at"), "Último acesso")
            .with_target("lastLoginAt"),
        FieldDescriptor::to_one(
            &format!("{prefix}role"),
            "Perfil",
            FieldsProvider::deferred(move || role_fields(&role_prefix)),
        ),
    ]
}

pub fn role_fields(prefix: &str) -> Vec<FieldDescriptor> {
    let users_prefix = nested(prefix, "users");
    vec![
        FieldDescriptor::text(&format!("{prefix}name"), "Nome"),
        FieldDescriptor::multiselect(&format!("{prefix}permissions"), "Permissões", &PERMISSIONS),
        FieldDescriptor::to_many(
            &format!("{prefix}users"),
            "Usuários",
            FieldsProvider::deferred(move || user_fields(&users_prefix)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::filter::resolver::{FieldResolver, MAX_RELATION_DEPTH};

    fn assert_unique_labels(fields: &[FieldDescriptor]) {
        let labels: HashSet<&str> = fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels.len(), fields.len());
    }

    #[test]
    fn test_labels_unique_per_level() {
        for resource in Resource::ALL {
            let provider = fields_for(resource);
            let resolver = FieldResolver::new(&provider);
            let root = resolver.root();
            assert_unique_labels(&root);
            for relation in root.iter().filter(|f| f.is_relation()) {
                assert_unique_labels(&resolver.relation_fields(relation));
            }
        }
    }

    #[test]
    fn test_cyclic_relations_are_prefixed() {
        let provider = fields_for(Resource::Companies);
        let resolver = FieldResolver::new(&provider);

        let mut scope = resolver.root();
        let mut path = Vec::new();
        for _ in 0..MAX_RELATION_DEPTH {
            let Some(relation) = scope.iter().find(|f| f.is_relation()).cloned() else {
                break;
            };
            path.push(relation.name.clone());
            scope = resolver.relation_fields(&relation);
        }

        assert_eq!(path, vec!["staff", "staff__company", "staff__company__staff"]);
        assert!(scope.iter().any(|f| f.name == "staff__company__staff__name"));
        assert!(scope.iter().all(|f| f.name.starts_with("staff__company__staff__")));
    }

    #[test]
    fn test_target_paths_use_backend_names() {
        let provider = fields_for(Resource::Staff);
        let hired = provider
            .resolve()
            .iter()
            .find(|f| f.name == "hired_at")
            .map(|f| f.target_field_path.clone());
        assert_eq!(hired.as_deref(), Some("hiredAt"));
    }
}
