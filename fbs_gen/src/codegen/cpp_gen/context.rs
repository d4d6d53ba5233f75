use crate::codegen::cpp::CppCodeGeneratorOptions;
use crate::model::resolved::Schema;
use crate::model::types::NamespaceId;

/* Read-only state shared by every emitter during one generation call */
#[derive(Clone, Copy)]
pub struct GenContext<'a> {
    pub schema: &'a Schema,
    pub options: &'a CppCodeGeneratorOptions,
}

impl<'a> GenContext<'a> {
    pub fn new(schema: &'a Schema, options: &'a CppCodeGeneratorOptions) -> Self {
        Self { schema, options }
    }

    pub fn active_namespace(&self) -> NamespaceId {
        self.schema.active_namespace()
    }
}
