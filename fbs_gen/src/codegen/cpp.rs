use crate::codegen::cpp_gen::helpers::translate_namespace;
use crate::codegen::cpp_gen::{
    close_namespace, emit_enum, emit_struct, emit_table, open_namespace, plan_forward_declarations,
    GenContext,
};
use crate::model::resolved::Schema;
use anyhow::Context;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub use crate::codegen::cpp_gen::DEFAULT_MAX_SPARSENESS;

const BANNER: &str = "// automatically generated by the FlatBuffers compiler, do not modify\n\n";

pub struct CppCodeGenerator {
    options: CppCodeGeneratorOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppCodeGeneratorOptions {
    pub mutable_buffer: bool,
    pub scoped_enums: bool,
    pub prefixed_enums: bool,
    pub include_dependence_headers: bool,
    pub max_sparseness: i64,
}

impl Default for CppCodeGeneratorOptions {
    fn default() -> Self {
        Self {
            mutable_buffer: false,
            scoped_enums: false,
            prefixed_enums: false,
            include_dependence_headers: false,
            max_sparseness: DEFAULT_MAX_SPARSENESS,
        }
    }
}

impl CppCodeGenerator {
    pub fn new(options: CppCodeGeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CppCodeGeneratorOptions {
        &self.options
    }

    /* Generate the header for one schema. Returns an empty string when the
     * schema declares nothing that has not already been generated elsewhere. */
    pub fn generate(&self, schema: &Schema) -> String {
        let ctx = GenContext::new(schema, &self.options);

        let mut enum_code = String::new();
        let mut enum_code_post = String::new();
        for enum_decl in schema.enums.values().filter(|e| !e.generated) {
            let fragment = emit_enum(&ctx, enum_decl);
            enum_code.push_str(&fragment.declaration);
            if let Some(body) = fragment.dispatcher_body {
                enum_code_post.push_str(&body);
            }
        }

        /* All structs, then all tables */
        let mut decl_code = String::new();
        for aggregate in schema.aggregates.values().filter(|a| !a.generated && a.fixed) {
            decl_code.push_str(&emit_struct(&ctx, aggregate));
        }
        for aggregate in schema.aggregates.values().filter(|a| !a.generated && !a.fixed) {
            decl_code.push_str(&emit_table(&ctx, aggregate));
        }

        if enum_code.is_empty() && decl_code.is_empty() {
            tracing::debug!("nothing to generate for {}", schema.file_name);
            return String::new();
        }

        let forward = plan_forward_declarations(&ctx);
        let active = schema.active_namespace_decl();
        let guard = include_guard(schema);

        let mut code = String::from(BANNER);
        code.push_str(&format!("#ifndef {}\n#define {}\n\n", guard, guard));
        code.push_str("#include \"flatbuffers/flatbuffers.h\"\n\n");
        if self.options.include_dependence_headers {
            code.push_str(&dependence_includes(schema));
        }

        code.push_str(&forward.other_scopes);
        code.push('\n');
        code.push_str(&open_namespace(active));
        code.push('\n');
        code.push_str(&forward.active_scope);
        code.push('\n');

        code.push_str(&enum_code);
        code.push_str(&decl_code);
        code.push_str(&enum_code_post);
        code.push_str(&self.root_helpers(schema));

        code.push_str(&close_namespace(active));
        code.push_str(&format!("\n#endif  // {}\n", guard));
        code
    }

    /* Buffer-level entry points for the root type */
    fn root_helpers(&self, schema: &Schema) -> String {
        let (Some(root_key), Some(root)) = (schema.root_type.as_deref(), schema.root_aggregate()) else {
            return String::new();
        };
        let name = &root.name;
        let qualified_name = translate_namespace(root_key);
        let mut code = String::new();

        code.push_str(&format!(
            "inline const {} *Get{}(const void *buf) {{ return flatbuffers::GetRoot<{}>(buf); }}\n\n",
            qualified_name, name, qualified_name
        ));
        if self.options.mutable_buffer {
            code.push_str(&format!(
                "inline {} *GetMutable{}(void *buf) {{ return flatbuffers::GetMutableRoot<{}>(buf); }}\n\n",
                name, name, name
            ));
        }

        code.push_str(&format!(
            "inline bool Verify{}Buffer(flatbuffers::Verifier &verifier) {{ return verifier.VerifyBuffer<{}>(); }}\n\n",
            name, qualified_name
        ));

        if let Some(identifier) = &schema.file_identifier {
            code.push_str(&format!(
                "inline const char *{}Identifier() {{ return \"{}\"; }}\n\n",
                name, identifier
            ));
            code.push_str(&format!(
                "inline bool {}BufferHasIdentifier(const void *buf) {{ return flatbuffers::BufferHasIdentifier(buf, {}Identifier()); }}\n\n",
                name, name
            ));
        }

        if let Some(extension) = &schema.file_extension {
            code.push_str(&format!(
                "inline const char *{}Extension() {{ return \"{}\"; }}\n\n",
                name, extension
            ));
        }

        let identifier_arg = if schema.file_identifier.is_some() {
            format!(", {}Identifier()", name)
        } else {
            String::new()
        };
        code.push_str(&format!(
            "inline void Finish{}Buffer(flatbuffers::FlatBufferBuilder &fbb, flatbuffers::Offset<{}> root) {{ fbb.Finish(root{}); }}\n\n",
            name, qualified_name, identifier_arg
        ));
        code
    }

    /* Generate and persist `<output_dir>/<file_name>_generated.h`. Nothing is
     * written for an empty artifact. */
    pub fn write(&self, schema: &Schema, output_dir: &Path) -> anyhow::Result<Option<PathBuf>> {
        let code = self.generate(schema);
        if code.is_empty() {
            tracing::info!("skipping {}: no declarations to emit", schema.file_name);
            return Ok(None);
        }

        fs::create_dir_all(output_dir)
            .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
        let path = output_dir.join(generated_file_name("", &schema.file_name));
        fs::write(&path, &code).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("wrote {} ({} bytes)", path.display(), code.len());
        Ok(Some(path))
    }
}

/* `FLATBUFFERS_GENERATED_<FILE>_<NS>_..._H_`, alphanumerics only in the file part */
pub fn include_guard(schema: &Schema) -> String {
    let ident: String = schema.file_name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    let mut guard = format!("FLATBUFFERS_GENERATED_{}_", ident);
    for component in &schema.active_namespace_decl().components {
        guard.push_str(component);
        guard.push('_');
    }
    guard.push_str("H_");
    guard.to_uppercase()
}

/* `#include` lines for every other file of the include set */
fn dependence_includes(schema: &Schema) -> String {
    let included: BTreeSet<&str> = schema.included_files.iter().map(String::as_str).collect();
    let mut code = String::new();
    for file in included {
        let basename = Path::new(file).file_stem().and_then(|s| s.to_str()).unwrap_or(file);
        if basename != schema.file_name {
            code.push_str(&format!("#include \"{}_generated.h\"\n", basename));
        }
    }
    if !code.is_empty() {
        code.push('\n');
    }
    code
}

pub fn generated_file_name(path: &str, file_name: &str) -> String {
    format!("{}{}_generated.h", path, file_name)
}

/* Make rule listing everything the generated header depends on */
pub fn make_rule(schema: &Schema, path: &str) -> String {
    let mut dependencies: BTreeSet<&str> = schema.included_files.iter().map(String::as_str).collect();
    if let Some(source) = &schema.source_file {
        dependencies.insert(source.as_str());
    }

    let mut rule = format!("{}:", generated_file_name(path, &schema.file_name));
    for dependency in dependencies {
        rule.push(' ');
        rule.push_str(dependency);
    }
    rule
}
