use super::context::GenContext;
use super::scope::qualify;
use crate::model::types::{ScalarKind, TypeRef};

/* Offset width used for every pointer-shaped field */
pub const UOFFSET_TYPE: &str = "flatbuffers::uoffset_t";

/* Width of the largest scalar, where sort-by-size grouping starts */
pub const LARGEST_SCALAR_SIZE: usize = 8;

/* C spelling of a scalar kind */
pub fn scalar_to_c_type(kind: ScalarKind) -> &'static str {
  match kind {
    ScalarKind::Utype => "uint8_t",
    ScalarKind::Byte => "int8_t",
    ScalarKind::Ubyte => "uint8_t",
    ScalarKind::Short => "int16_t",
    ScalarKind::Ushort => "uint16_t",
    ScalarKind::Int => "int32_t",
    ScalarKind::Uint => "uint32_t",
    ScalarKind::Long => "int64_t",
    ScalarKind::Ulong => "uint64_t",
    ScalarKind::Float => "float",
    ScalarKind::Double => "double",
  }
}

/* Serialized width of a field slot, offsets counting as 4 bytes */
pub fn type_size(ty: &TypeRef) -> usize {
  match ty {
    TypeRef::Scalar { kind, .. } => kind.size(),
    TypeRef::Bool => 1,
    TypeRef::String | TypeRef::Vector { .. } | TypeRef::Aggregate { .. } | TypeRef::Union { .. } => 4,
  }
}

/* Basic spelling. In user-facing contexts enums use their own name and bool stays bool. */
pub fn gen_type_basic(ctx: &GenContext, ty: &TypeRef, user_facing: bool) -> String {
  match ty {
    TypeRef::Scalar { kind, enum_ref } => match enum_ref {
      Some(name) if user_facing => {
        let enum_decl = ctx.schema.enum_decl(name);
        qualify(ctx, enum_decl.namespace, &enum_decl.name)
      }
      _ => scalar_to_c_type(*kind).to_string(),
    },
    TypeRef::Bool => {
      if user_facing {
        "bool".to_string()
      } else {
        "uint8_t".to_string()
      }
    }
    TypeRef::String | TypeRef::Vector { .. } | TypeRef::Aggregate { .. } | TypeRef::Union { .. } => {
      "flatbuffers::Offset<void>".to_string()
    }
  }
}

/* Pointee spelling for strings, vectors and aggregates */
pub fn gen_type_pointer(ctx: &GenContext, ty: &TypeRef) -> String {
  match ty {
    TypeRef::String => "flatbuffers::String".to_string(),
    TypeRef::Vector { element } => {
      format!("flatbuffers::Vector<{}>", gen_type_wire(ctx, element, "", false))
    }
    TypeRef::Aggregate { target, .. } => {
      let aggregate = ctx.schema.aggregate(target);
      qualify(ctx, aggregate.namespace, &aggregate.name)
    }
    TypeRef::Union { .. } | TypeRef::Scalar { .. } | TypeRef::Bool => "void".to_string(),
  }
}

/* Spelling used when building: scalars by value, structs by pointer, the rest as offsets */
pub fn gen_type_wire(ctx: &GenContext, ty: &TypeRef, postfix: &str, user_facing: bool) -> String {
  match ty {
    TypeRef::Scalar { .. } | TypeRef::Bool => {
      format!("{}{}", gen_type_basic(ctx, ty, user_facing), postfix)
    }
    TypeRef::Aggregate { fixed: true, .. } => {
      format!("const {} *", gen_type_pointer(ctx, ty))
    }
    TypeRef::Aggregate { fixed: false, .. }
    | TypeRef::String
    | TypeRef::Vector { .. }
    | TypeRef::Union { .. } => {
      format!("flatbuffers::Offset<{}>{}", gen_type_pointer(ctx, ty), postfix)
    }
  }
}

/* Spelling that reflects the serialized size, for verifier bounds checks */
pub fn gen_type_size(ctx: &GenContext, ty: &TypeRef) -> String {
  match ty {
    TypeRef::Scalar { .. } | TypeRef::Bool => gen_type_basic(ctx, ty, false),
    TypeRef::Aggregate { fixed: true, .. } => gen_type_pointer(ctx, ty),
    TypeRef::Aggregate { fixed: false, .. }
    | TypeRef::String
    | TypeRef::Vector { .. }
    | TypeRef::Union { .. } => UOFFSET_TYPE.to_string(),
  }
}

/* Spelling used when reading a buffer */
pub fn gen_type_get(
  ctx: &GenContext,
  ty: &TypeRef,
  after_basic: &str,
  before_ptr: &str,
  after_ptr: &str,
  user_facing: bool,
) -> String {
  match ty {
    TypeRef::Scalar { .. } | TypeRef::Bool => {
      format!("{}{}", gen_type_basic(ctx, ty, user_facing), after_basic)
    }
    TypeRef::String | TypeRef::Vector { .. } | TypeRef::Aggregate { .. } | TypeRef::Union { .. } => {
      format!("{}{}{}", before_ptr, gen_type_pointer(ctx, ty), after_ptr)
    }
  }
}

/* Wrap `val` in a cast when the interface type differs from the storage type.
 * `from` true converts storage to interface, false the other way. */
pub fn gen_underlying_cast(ctx: &GenContext, ty: &TypeRef, from: bool, val: &str) -> String {
  let needs_cast = match ty {
    TypeRef::Scalar { enum_ref, .. } => enum_ref.is_some(),
    TypeRef::Bool => true,
    TypeRef::String | TypeRef::Vector { .. } | TypeRef::Aggregate { .. } | TypeRef::Union { .. } => false,
  };
  if needs_cast {
    format!("static_cast<{}>({})", gen_type_basic(ctx, ty, from), val)
  } else {
    val.to_string()
  }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
