use super::context::GenContext;
use crate::model::resolved::Namespace;
use crate::model::types::NamespaceId;

/* Scope separator of the target language */
pub const SCOPE_SEPARATOR: &str = "::";

/* Prefix `name` with its namespace unless it is declared in the active namespace.
 * Compares namespace identity: a different namespace with the same path still qualifies. */
pub fn qualify(ctx: &GenContext, decl_namespace: NamespaceId, name: &str) -> String {
    if decl_namespace == ctx.active_namespace() {
        return name.to_string();
    }
    let mut qualified_name = String::new();
    for component in &ctx.schema.namespace(decl_namespace).components {
        qualified_name.push_str(component);
        qualified_name.push_str(SCOPE_SEPARATOR);
    }
    qualified_name.push_str(name);
    qualified_name
}

pub fn open_namespace(ns: &Namespace) -> String {
    let mut output = String::new();
    for component in &ns.components {
        output.push_str(&format!("namespace {} {{\n", component));
    }
    output
}

pub fn close_namespace(ns: &Namespace) -> String {
    let mut output = String::new();
    for component in ns.components.iter().rev() {
        output.push_str(&format!("}}  // namespace {}\n", component));
    }
    output
}

/* Forward declarations for every aggregate, split by scope */
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ForwardDeclarations {
    /* Emitted before the active namespace opens, wrapped in their own blocks */
    pub other_scopes: String,
    /* Emitted unqualified right after the active namespace opens */
    pub active_scope: String,
    /* Number of namespace blocks opened in `other_scopes` */
    pub blocks: usize,
}

/* Plan forward declarations. Aggregates may reference each other cyclically,
 * so all of them are declared up front, including ones emitted by other files.
 * A namespace block is only reopened when the scope differs from the previous
 * out-of-scope entry; interleaved scopes therefore repeat blocks. */
pub fn plan_forward_declarations(ctx: &GenContext) -> ForwardDeclarations {
    let mut plan = ForwardDeclarations::default();
    let mut current: Option<NamespaceId> = None;

    for aggregate in ctx.schema.aggregates.values() {
        let decl = format!("struct {};\n", aggregate.name);
        if aggregate.namespace == ctx.active_namespace() {
            plan.active_scope.push_str(&decl);
            continue;
        }
        if current != Some(aggregate.namespace) {
            if let Some(previous) = current {
                plan.other_scopes.push_str(&close_namespace(ctx.schema.namespace(previous)));
            }
            plan.other_scopes.push_str(&open_namespace(ctx.schema.namespace(aggregate.namespace)));
            plan.blocks += 1;
            current = Some(aggregate.namespace);
        }
        plan.other_scopes.push_str(&decl);
    }

    if let Some(previous) = current {
        plan.other_scopes.push_str(&close_namespace(ctx.schema.namespace(previous)));
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::cpp::CppCodeGeneratorOptions;
    use crate::codegen::cpp_gen::test_utils::schema_from_yaml;

    const INTERLEAVED: &str = r#"
file-name: interleaved
namespaces:
  - [A, B]
  - [C]
  - [Main]
aggregates:
  - { name: First, namespace: 0, fixed: false, fields: [] }
  - { name: Local, namespace: 2, fixed: false, fields: [] }
  - { name: Second, namespace: 0, fixed: false, fields: [] }
  - { name: Third, namespace: 1, fixed: true, fields: [] }
  - { name: Fourth, namespace: 0, fixed: false, fields: [] }
"#;

    #[test]
    fn test_qualify_by_identity() {
        let schema = schema_from_yaml(
            r#"
file-name: same
namespaces:
  - [Game]
  - [Game]
"#,
        );
        let options = CppCodeGeneratorOptions::default();
        let ctx = GenContext::new(&schema, &options);
        assert_eq!(qualify(&ctx, NamespaceId(1), "Monster"), "Monster");
        assert_eq!(qualify(&ctx, NamespaceId(0), "Monster"), "Game::Monster");
    }

    #[test]
    fn test_qualify_root_namespace() {
        let schema = schema_from_yaml(
            r#"
file-name: root
namespaces:
  - []
  - [Game, Ex]
"#,
        );
        let options = CppCodeGeneratorOptions::default();
        let ctx = GenContext::new(&schema, &options);
        assert_eq!(qualify(&ctx, NamespaceId(0), "Top"), "Top");
        assert_eq!(qualify(&ctx, NamespaceId(1), "Inner"), "Inner");
    }

    #[test]
    fn test_open_close_nesting() {
        let ns = Namespace::new(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(open_namespace(&ns), "namespace A {\nnamespace B {\n");
        assert_eq!(close_namespace(&ns), "}  // namespace B\n}  // namespace A\n");
    }

    #[test]
    fn test_forward_declarations_adjacency_grouping() {
        let schema = schema_from_yaml(INTERLEAVED);
        let options = CppCodeGeneratorOptions::default();
        let ctx = GenContext::new(&schema, &options);
        let plan = plan_forward_declarations(&ctx);

        assert_eq!(plan.active_scope, "struct Local;\n");
        /* the active-scope entry does not break the A::B run */
        let expected = "namespace A {\nnamespace B {\n\
struct First;\n\
struct Second;\n\
}  // namespace B\n}  // namespace A\n\
namespace C {\n\
struct Third;\n\
}  // namespace C\n\
namespace A {\nnamespace B {\n\
struct Fourth;\n\
}  // namespace B\n}  // namespace A\n";
        assert_eq!(plan.other_scopes, expected);
        assert_eq!(plan.blocks, 3);
    }

    #[test]
    fn test_forward_declarations_single_scope() {
        let schema = schema_from_yaml(
            r#"
file-name: single
namespaces:
  - [Main]
aggregates:
  - { name: A, namespace: 0, fixed: false, fields: [] }
  - { name: B, namespace: 0, fixed: true, fields: [] }
"#,
        );
        let options = CppCodeGeneratorOptions::default();
        let ctx = GenContext::new(&schema, &options);
        let plan = plan_forward_declarations(&ctx);
        assert_eq!(plan.active_scope, "struct A;\nstruct B;\n");
        assert!(plan.other_scopes.is_empty());
        assert_eq!(plan.blocks, 0);
    }
}
